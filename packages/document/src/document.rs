//! # Document
//!
//! The persisted unit of the page builder: page metadata plus the ordered
//! forest of top-level element nodes.
//!
//! Metadata is carried through edits untouched. Fields this crate does not
//! know about are kept in [`Document::extra`] so a document received from
//! the server round-trips without loss.

use crate::node::Node;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A page or storefront document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub theme: String,

    /// Root forest, in render order
    pub(crate) elements: Vec<Node>,

    pub global_styles: GlobalStyles,
    pub seo: Seo,

    #[serde(rename = "customCSS")]
    pub custom_css: String,

    #[serde(rename = "customJS")]
    pub custom_js: String,

    /// Unrecognized top-level fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalStyles {
    pub colors: ThemeColors,
    pub fonts: Fonts,
    pub spacing: Spacing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fonts {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spacing {
    pub container: String,
    pub section: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Seo {
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub og_image: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#3B82F6".to_string(),
            secondary: "#1F2937".to_string(),
            accent: "#F59E0B".to_string(),
            background: "#FFFFFF".to_string(),
            text: "#111827".to_string(),
        }
    }
}

impl Default for Fonts {
    fn default() -> Self {
        Self {
            heading: "Inter".to_string(),
            body: "Inter".to_string(),
        }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            container: "1200px".to_string(),
            section: "4rem".to_string(),
        }
    }
}

impl Default for GlobalStyles {
    fn default() -> Self {
        Self {
            colors: ThemeColors::default(),
            fonts: Fonts::default(),
            spacing: Spacing::default(),
        }
    }
}

impl Document {
    /// Empty document with the builder's default metadata
    pub fn new() -> Self {
        Self {
            id: "page-1".to_string(),
            name: "New Page".to_string(),
            slug: "new-page".to_string(),
            title: "New Page".to_string(),
            description: "A new page created with the page builder".to_string(),
            theme: "modern-light".to_string(),
            elements: Vec::new(),
            global_styles: GlobalStyles::default(),
            seo: Seo::default(),
            custom_css: String::new(),
            custom_js: String::new(),
            extra: Map::new(),
        }
    }

    /// Empty document with the given name and slug
    pub fn named(name: impl Into<String>, slug: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            name,
            slug: slug.into(),
            ..Self::new()
        }
    }

    /// Top-level nodes in order
    pub fn elements(&self) -> &[Node] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Switch theme, replacing the global color tokens
    pub fn apply_theme(&mut self, theme: &Theme) {
        self.theme = theme.id.to_string();
        self.global_styles.colors = theme.colors.clone();
    }

    /// Serialize to a JSON value
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from a JSON value
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::find_theme;
    use serde_json::json;

    #[test]
    fn test_new_document_defaults() {
        let doc = Document::new();
        assert_eq!(doc.slug, "new-page");
        assert_eq!(doc.theme, "modern-light");
        assert_eq!(doc.global_styles.spacing.container, "1200px");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_wire_field_names() {
        let value = Document::new().to_value().unwrap();

        assert!(value.get("globalStyles").is_some());
        assert!(value.get("customCSS").is_some());
        assert!(value.get("customJS").is_some());
        assert_eq!(value["seo"]["metaTitle"], json!(""));
        assert_eq!(value["elements"], json!([]));
    }

    #[test]
    fn test_missing_metadata_uses_defaults() {
        let doc = Document::from_json_str(r#"{ "elements": [] }"#).unwrap();
        assert_eq!(doc.global_styles.fonts.heading, "Inter");
        assert_eq!(doc.id, "page-1");
    }

    #[test]
    fn test_unknown_fields_are_preserved() {
        let json = r#"{ "elements": [], "owner": { "id": 42 }, "version": 7 }"#;
        let doc = Document::from_json_str(json).unwrap();

        assert_eq!(doc.extra["owner"], json!({ "id": 42 }));

        let value = doc.to_value().unwrap();
        assert_eq!(value["version"], json!(7));
    }

    #[test]
    fn test_apply_theme() {
        let mut doc = Document::new();
        doc.apply_theme(&find_theme("colorful-creative").unwrap());

        assert_eq!(doc.theme, "colorful-creative");
        assert_eq!(doc.global_styles.colors.primary, "#EC4899");
    }
}
