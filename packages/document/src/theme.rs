//! Color themes for pages and storefront templates.

use crate::document::ThemeColors;

/// A named color palette
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub colors: ThemeColors,
}

fn colors(primary: &str, secondary: &str, accent: &str, background: &str, text: &str) -> ThemeColors {
    ThemeColors {
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        accent: accent.to_string(),
        background: background.to_string(),
        text: text.to_string(),
    }
}

/// Store templates only define a short palette; missing slots fall back
/// to the primary color, white background and dark text.
fn template_colors(palette: &[&str]) -> ThemeColors {
    let primary = palette.first().copied().unwrap_or("#3B82F6");
    let secondary = palette.get(1).copied().unwrap_or(primary);
    let accent = palette.get(2).copied().unwrap_or(primary);
    let background = palette.get(3).copied().unwrap_or("#FFFFFF");
    colors(primary, secondary, accent, background, "#111827")
}

/// Page themes
pub fn page_themes() -> Vec<Theme> {
    vec![
        Theme {
            id: "modern-light",
            name: "Modern Light",
            colors: colors("#3B82F6", "#1F2937", "#F59E0B", "#FFFFFF", "#111827"),
        },
        Theme {
            id: "dark-professional",
            name: "Dark Professional",
            colors: colors("#6366F1", "#4F46E5", "#EC4899", "#111827", "#F9FAFB"),
        },
        Theme {
            id: "colorful-creative",
            name: "Colorful Creative",
            colors: colors("#EC4899", "#8B5CF6", "#F59E0B", "#FEFEFE", "#1F2937"),
        },
    ]
}

/// Storefront template palettes
pub fn store_themes() -> Vec<Theme> {
    vec![
        Theme {
            id: "modern-minimal",
            name: "Modern Minimal",
            colors: template_colors(&["#000000", "#FFFFFF", "#F5F5F5", "#E5E5E5"]),
        },
        Theme {
            id: "tech-store",
            name: "Tech Store",
            colors: template_colors(&["#1E40AF", "#3B82F6", "#EFF6FF", "#1F2937"]),
        },
        Theme {
            id: "luxury-brand",
            name: "Luxury Brand",
            colors: template_colors(&["#92400E", "#D97706", "#FEF3C7", "#1F2937"]),
        },
        Theme {
            id: "food-beverage",
            name: "Food & Beverage",
            colors: template_colors(&["#DC2626", "#EF4444", "#FEE2E2", "#1F2937"]),
        },
        Theme {
            id: "creative-portfolio",
            name: "Creative Portfolio",
            colors: template_colors(&["#7C3AED", "#A855F7", "#F3E8FF", "#1F2937"]),
        },
        Theme {
            id: "health-wellness",
            name: "Health & Wellness",
            colors: template_colors(&["#059669", "#10B981", "#D1FAE5", "#1F2937"]),
        },
    ]
}

/// Find a theme by id across page and store palettes
pub fn find_theme(id: &str) -> Option<Theme> {
    page_themes()
        .into_iter()
        .chain(store_themes())
        .find(|theme| theme.id == id)
}
