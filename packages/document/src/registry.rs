//! # Node Registry
//!
//! Static catalogs of element types. Each entry is the template a new node
//! is created from: default `content`, default `styles`, and whether the
//! type can hold children.
//!
//! Two catalogs exist:
//! - [`Registry::page()`]: layout, content, media and form elements of the page builder
//! - [`Registry::store()`]: storefront sections of the store builder (all leaves)

use crate::node::Payload;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::OnceLock;

/// Template for one element type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    /// Type key stored on nodes
    pub id: &'static str,
    /// Display name, used as the default node name
    pub name: &'static str,
    /// Icon identifier for palettes
    pub icon: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub default_content: Payload,
    pub default_styles: Payload,
    pub allow_children: bool,
}

/// Read-only catalog of element types
#[derive(Debug)]
pub struct Registry {
    name: &'static str,
    entries: Vec<RegistryEntry>,
}

impl Registry {
    /// Page builder element catalog
    pub fn page() -> &'static Registry {
        static PAGE: OnceLock<Registry> = OnceLock::new();
        PAGE.get_or_init(page_catalog)
    }

    /// Store builder section catalog
    pub fn store() -> &'static Registry {
        static STORE: OnceLock<Registry> = OnceLock::new();
        STORE.get_or_init(store_catalog)
    }

    /// Resolve a catalog by name (`"page"` or `"store"`)
    pub fn by_name(name: &str) -> Option<&'static Registry> {
        match name {
            "page" => Some(Self::page()),
            "store" => Some(Self::store()),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn lookup(&self, element_type: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|entry| entry.id == element_type)
    }

    pub fn contains(&self, element_type: &str) -> bool {
        self.lookup(element_type).is_some()
    }

    /// All entries in palette order
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&'static str> {
        let mut categories = Vec::new();
        for entry in &self.entries {
            if !categories.contains(&entry.category) {
                categories.push(entry.category);
            }
        }
        categories
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a RegistryEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.category == category)
    }
}

fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        _ => Payload::new(),
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    category: &'static str,
    description: &'static str,
    allow_children: bool,
    default_content: Value,
    default_styles: Value,
) -> RegistryEntry {
    RegistryEntry {
        id,
        name,
        icon,
        category,
        description,
        default_content: payload(default_content),
        default_styles: payload(default_styles),
        allow_children,
    }
}

fn page_catalog() -> Registry {
    let entries = vec![
        // Layout
        entry(
            "container", "Container", "layout", "Layout", "Main container for content", true,
            json!({ "maxWidth": "1200px" }),
            json!({ "padding": "2rem", "margin": "0 auto" }),
        ),
        entry(
            "section", "Section", "layers", "Layout", "Content section with background", true,
            json!({}),
            json!({ "padding": "4rem 0", "backgroundColor": "#FFFFFF" }),
        ),
        entry(
            "row", "Row", "grid", "Layout", "Horizontal row container", true,
            json!({ "columns": 1 }),
            json!({ "display": "flex", "gap": "1rem" }),
        ),
        entry(
            "column", "Column", "columns", "Layout", "Column within a row", true,
            json!({ "width": "100%" }),
            json!({ "flex": "1" }),
        ),
        // Content
        entry(
            "heading", "Heading", "heading-1", "Content", "Text heading (H1-H6)", false,
            json!({ "text": "Your Heading Here", "level": "h1" }),
            json!({ "fontSize": "2.5rem", "fontWeight": "bold", "color": "#111827", "marginBottom": "1rem" }),
        ),
        entry(
            "paragraph", "Paragraph", "type", "Content", "Text paragraph", false,
            json!({ "text": "Your paragraph text goes here. You can edit this content to match your needs." }),
            json!({ "fontSize": "1rem", "lineHeight": "1.6", "color": "#374151", "marginBottom": "1rem" }),
        ),
        entry(
            "button", "Button", "button", "Content", "Call-to-action button", false,
            json!({ "text": "Click Me", "link": "#", "style": "primary" }),
            json!({
                "padding": "0.75rem 1.5rem",
                "backgroundColor": "#3B82F6",
                "color": "#FFFFFF",
                "borderRadius": "0.5rem",
                "border": "none",
                "cursor": "pointer",
                "fontSize": "1rem",
                "fontWeight": "500"
            }),
        ),
        // Media
        entry(
            "image", "Image", "image", "Media", "Image with alt text", false,
            json!({ "src": "https://via.placeholder.com/600x400", "alt": "Placeholder image", "caption": "" }),
            json!({ "width": "100%", "height": "auto", "borderRadius": "0.5rem" }),
        ),
        entry(
            "video", "Video", "video", "Media", "Video player", false,
            json!({ "src": "", "poster": "https://via.placeholder.com/600x400", "autoplay": false, "controls": true }),
            json!({ "width": "100%", "height": "auto", "borderRadius": "0.5rem" }),
        ),
        // Forms
        entry(
            "form", "Contact Form", "edit-3", "Forms", "Contact form with fields", true,
            json!({
                "action": "/contact",
                "method": "POST",
                "fields": [
                    { "type": "text", "name": "name", "label": "Name", "required": true },
                    { "type": "email", "name": "email", "label": "Email", "required": true },
                    { "type": "textarea", "name": "message", "label": "Message", "required": true }
                ]
            }),
            json!({ "padding": "2rem", "backgroundColor": "#F9FAFB", "borderRadius": "0.5rem" }),
        ),
        entry(
            "newsletter", "Newsletter", "plus", "Forms", "Email subscription form", false,
            json!({
                "title": "Subscribe to our newsletter",
                "description": "Get the latest updates and news",
                "placeholder": "Enter your email",
                "buttonText": "Subscribe"
            }),
            json!({ "padding": "2rem", "backgroundColor": "#EFF6FF", "borderRadius": "0.5rem", "textAlign": "center" }),
        ),
        // Advanced
        entry(
            "gallery", "Image Gallery", "grid", "Media", "Image gallery grid", false,
            json!({
                "images": [
                    { "src": "https://via.placeholder.com/300x200", "alt": "Gallery image 1" },
                    { "src": "https://via.placeholder.com/300x200", "alt": "Gallery image 2" },
                    { "src": "https://via.placeholder.com/300x200", "alt": "Gallery image 3" }
                ],
                "columns": 3
            }),
            json!({ "display": "grid", "gap": "1rem", "gridTemplateColumns": "repeat(3, 1fr)" }),
        ),
        entry(
            "testimonial", "Testimonial", "quote", "Content", "Customer testimonial", false,
            json!({
                "quote": "This is an amazing product that has transformed our business.",
                "author": "John Doe",
                "position": "CEO, Company Inc.",
                "avatar": "https://via.placeholder.com/80x80"
            }),
            json!({
                "padding": "2rem",
                "backgroundColor": "#F9FAFB",
                "borderRadius": "0.5rem",
                "textAlign": "center",
                "borderLeft": "4px solid #3B82F6"
            }),
        ),
        entry(
            "spacer", "Spacer", "move", "Layout", "Empty space for layout", false,
            json!({ "height": "2rem" }),
            json!({ "height": "2rem", "width": "100%" }),
        ),
        entry(
            "divider", "Divider", "underline", "Layout", "Horizontal line divider", false,
            json!({ "style": "solid" }),
            json!({ "height": "1px", "backgroundColor": "#E5E7EB", "margin": "2rem 0", "border": "none" }),
        ),
        entry(
            "code", "Code Block", "code", "Content", "Syntax highlighted code", false,
            json!({ "code": "console.log(\"Hello, World!\");", "language": "javascript" }),
            json!({
                "backgroundColor": "#1F2937",
                "color": "#F9FAFB",
                "padding": "1rem",
                "borderRadius": "0.5rem",
                "fontFamily": "monospace",
                "overflow": "auto"
            }),
        ),
    ];

    Registry { name: "page", entries }
}

fn store_catalog() -> Registry {
    // Every storefront section shares the same default styles
    let section_styles = || {
        json!({
            "backgroundColor": "#FFFFFF",
            "textColor": "#111827",
            "padding": "4rem 0",
            "textAlign": "center"
        })
    };

    let entries = vec![
        entry(
            "hero", "Hero Section", "layout", "Sections", "Main banner with call-to-action", false,
            json!({
                "title": "Welcome to Our Store",
                "subtitle": "Discover amazing products at great prices",
                "buttonText": "Shop Now",
                "backgroundImage": "",
                "alignment": "center"
            }),
            section_styles(),
        ),
        entry(
            "products", "Product Grid", "package", "Sections", "Display products in grid layout", false,
            json!({
                "title": "Our Products",
                "columns": 4,
                "showFilters": true,
                "showSorting": true,
                "productsPerPage": 12
            }),
            section_styles(),
        ),
        entry(
            "featured", "Featured Products", "store", "Sections", "Highlight specific products", false,
            json!({ "title": "Featured Products", "products": [], "layout": "carousel" }),
            section_styles(),
        ),
        entry(
            "testimonials", "Testimonials", "type", "Sections", "Customer reviews and feedback", false,
            json!({
                "title": "What Our Customers Say",
                "testimonials": [
                    { "name": "John Doe", "text": "Amazing products and great service!", "rating": 5, "image": "" }
                ]
            }),
            section_styles(),
        ),
        entry(
            "about", "About Section", "edit-3", "Sections", "Tell your brand story", false,
            json!({
                "title": "About Us",
                "text": "We are passionate about providing high-quality products...",
                "image": "",
                "features": ["Quality Products", "Fast Shipping", "Great Support"]
            }),
            section_styles(),
        ),
        entry(
            "contact", "Contact Info", "settings", "Sections", "Contact details and form", false,
            json!({}),
            section_styles(),
        ),
        entry(
            "newsletter", "Newsletter", "plus", "Sections", "Email subscription form", false,
            json!({}),
            section_styles(),
        ),
        entry(
            "gallery", "Image Gallery", "image", "Sections", "Showcase images", false,
            json!({}),
            section_styles(),
        ),
    ];

    Registry { name: "store", entries }
}
