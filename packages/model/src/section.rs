//! # Page Sections
//!
//! One ordered, typed content block inside a page.
//!
//! The `type` tag and the type-specific `config` object are modelled as a
//! single sum type, [`SectionConfig`]. On the wire a section looks like:
//!
//! ```json
//! { "id": "section-1700000000000-1", "type": "hero", "config": { "overlayOpacity": 0.4 },
//!   "title": "New arrivals", "content": "", "order": 1, "isVisible": true, ... }
//! ```
//!
//! A `type` outside the closed set (or a known type whose config cannot be
//! decoded) degrades to [`SectionConfig::Unknown`], which keeps the raw JSON
//! so nothing is lost and renders as a placeholder instead of failing.

use crate::error::ModelError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Closed set of section kinds the builder knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionType {
    Hero,
    Text,
    Image,
    Gallery,
    Contact,
    Cta,
    ProductGrid,
}

impl SectionType {
    pub const ALL: [SectionType; 7] = [
        SectionType::Hero,
        SectionType::Text,
        SectionType::Image,
        SectionType::Gallery,
        SectionType::Contact,
        SectionType::Cta,
        SectionType::ProductGrid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Hero => "hero",
            SectionType::Text => "text",
            SectionType::Image => "image",
            SectionType::Gallery => "gallery",
            SectionType::Contact => "contact",
            SectionType::Cta => "cta",
            SectionType::ProductGrid => "productGrid",
        }
    }

    /// Starting configuration for a freshly added section of this type
    pub fn default_config(&self) -> SectionConfig {
        match self {
            SectionType::Hero => SectionConfig::Hero(HeroConfig::default()),
            SectionType::Text => SectionConfig::Text(TextConfig::default()),
            SectionType::Image => SectionConfig::Image(ImageConfig::default()),
            SectionType::Gallery => SectionConfig::Gallery(GalleryConfig::default()),
            SectionType::Contact => SectionConfig::Contact(ContactConfig::default()),
            SectionType::Cta => SectionConfig::Cta(CtaConfig::default()),
            SectionType::ProductGrid => SectionConfig::ProductGrid(ProductGridConfig::default()),
        }
    }

    fn decode_config(&self, raw: Value) -> Result<SectionConfig, serde_json::Error> {
        Ok(match self {
            SectionType::Hero => SectionConfig::Hero(serde_json::from_value(raw)?),
            SectionType::Text => SectionConfig::Text(serde_json::from_value(raw)?),
            SectionType::Image => SectionConfig::Image(serde_json::from_value(raw)?),
            SectionType::Gallery => SectionConfig::Gallery(serde_json::from_value(raw)?),
            SectionType::Contact => SectionConfig::Contact(serde_json::from_value(raw)?),
            SectionType::Cta => SectionConfig::Cta(serde_json::from_value(raw)?),
            SectionType::ProductGrid => SectionConfig::ProductGrid(serde_json::from_value(raw)?),
        })
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModelError::UnknownSectionType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonStyle {
    #[default]
    Primary,
    Secondary,
    Outline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Spacing {
    Compact,
    #[default]
    Normal,
    Relaxed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GalleryLayout {
    #[default]
    Grid,
    Carousel,
    Masonry,
}

/// Full-width banner with optional background image and call to action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// 0.0 (transparent) to 1.0 (opaque)
    pub overlay_opacity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,
    pub button_style: ButtonStyle,
    pub alignment: TextAlignment,

    /// Keys not modelled here, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            subtitle: None,
            background_image: None,
            overlay_opacity: 0.4,
            button_text: None,
            button_link: None,
            button_style: ButtonStyle::Primary,
            alignment: TextAlignment::Center,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextConfig {
    pub alignment: TextAlignment,
    pub size: TextSize,
    pub spacing: Spacing,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryConfig {
    pub images: Vec<GalleryImage>,
    pub layout: GalleryLayout,
    pub columns: u8,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            layout: GalleryLayout::Grid,
            columns: 3,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub show_form: bool,
    pub show_map: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            email: None,
            phone: None,
            address: None,
            show_form: true,
            show_map: false,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CtaConfig {
    pub button_text: String,
    pub button_link: String,
    pub button_style: ButtonStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CtaConfig {
    fn default() -> Self {
        Self {
            button_text: "Shop now".to_string(),
            button_link: "/products".to_string(),
            button_style: ButtonStyle::Primary,
            background_color: None,
            extra: Map::new(),
        }
    }
}

/// Featured records pulled from the catalog by product id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductGridConfig {
    pub product_ids: Vec<String>,
    pub columns: u8,
    pub show_prices: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ProductGridConfig {
    fn default() -> Self {
        Self {
            product_ids: Vec::new(),
            columns: 4,
            show_prices: true,
            max_items: None,
            extra: Map::new(),
        }
    }
}

/// Type tag plus type-specific configuration
#[derive(Debug, Clone, PartialEq)]
pub enum SectionConfig {
    Hero(HeroConfig),
    Text(TextConfig),
    Image(ImageConfig),
    Gallery(GalleryConfig),
    Contact(ContactConfig),
    Cta(CtaConfig),
    ProductGrid(ProductGridConfig),

    /// Unrecognized type, kept verbatim
    Unknown { type_name: String, raw: Value },
}

impl SectionConfig {
    /// Build a config from its wire parts, degrading to `Unknown` instead of failing
    pub fn from_parts(type_name: &str, raw: Value) -> Self {
        let Ok(section_type) = type_name.parse::<SectionType>() else {
            warn!(section_type = type_name, "Unrecognized section type");
            return SectionConfig::Unknown {
                type_name: type_name.to_string(),
                raw,
            };
        };

        if raw.is_null() {
            return section_type.default_config();
        }

        match section_type.decode_config(raw.clone()) {
            Ok(config) => config,
            Err(err) => {
                warn!(section_type = type_name, error = %err, "Section config could not be decoded");
                SectionConfig::Unknown {
                    type_name: type_name.to_string(),
                    raw,
                }
            }
        }
    }

    /// Split into the `type` tag and the `config` JSON object
    pub fn to_parts(&self) -> Result<(String, Value), serde_json::Error> {
        let raw = match self {
            SectionConfig::Hero(c) => serde_json::to_value(c)?,
            SectionConfig::Text(c) => serde_json::to_value(c)?,
            SectionConfig::Image(c) => serde_json::to_value(c)?,
            SectionConfig::Gallery(c) => serde_json::to_value(c)?,
            SectionConfig::Contact(c) => serde_json::to_value(c)?,
            SectionConfig::Cta(c) => serde_json::to_value(c)?,
            SectionConfig::ProductGrid(c) => serde_json::to_value(c)?,
            SectionConfig::Unknown { raw, .. } => raw.clone(),
        };
        Ok((self.type_name().to_string(), raw))
    }

    pub fn section_type(&self) -> Option<SectionType> {
        match self {
            SectionConfig::Hero(_) => Some(SectionType::Hero),
            SectionConfig::Text(_) => Some(SectionType::Text),
            SectionConfig::Image(_) => Some(SectionType::Image),
            SectionConfig::Gallery(_) => Some(SectionType::Gallery),
            SectionConfig::Contact(_) => Some(SectionType::Contact),
            SectionConfig::Cta(_) => Some(SectionType::Cta),
            SectionConfig::ProductGrid(_) => Some(SectionType::ProductGrid),
            SectionConfig::Unknown { .. } => None,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            SectionConfig::Unknown { type_name, .. } => type_name,
            known => known
                .section_type()
                .map(|t| t.as_str())
                .unwrap_or_default(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SectionConfig::Unknown { .. })
    }

    /// Text shown in place of a section whose type cannot be rendered
    pub fn placeholder_label(&self) -> Option<String> {
        match self {
            SectionConfig::Unknown { type_name, .. } if type_name.is_empty() => {
                Some("Unknown section type: (missing)".to_string())
            }
            SectionConfig::Unknown { type_name, .. } => {
                Some(format!("Unknown section type: {}", type_name))
            }
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct TaggedConfig {
    /// Empty when the section carries no `type` at all
    #[serde(rename = "type", default)]
    type_name: String,
    #[serde(default)]
    config: Value,
}

impl Serialize for SectionConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (type_name, config) = self.to_parts().map_err(serde::ser::Error::custom)?;
        TaggedConfig { type_name, config }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SectionConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tagged = TaggedConfig::deserialize(deserializer)?;
        Ok(SectionConfig::from_parts(&tagged.type_name, tagged.config))
    }
}

fn default_visible() -> bool {
    true
}

/// One content block of a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSection {
    pub id: String,

    #[serde(flatten)]
    pub config: SectionConfig,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub content: String,

    /// 1-based position within the page
    pub order: usize,

    #[serde(default = "default_visible")]
    pub is_visible: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PageSection {
    /// Visible, empty section with both timestamps set to `now`
    pub fn new(id: String, config: SectionConfig, order: usize, now: DateTime<Utc>) -> Self {
        Self {
            id,
            config,
            title: String::new(),
            content: String::new(),
            order,
            is_visible: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn section_type(&self) -> Option<SectionType> {
        self.config.section_type()
    }

    pub fn type_name(&self) -> &str {
        self.config.type_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_type_round_trips_through_str() {
        for t in SectionType::ALL {
            assert_eq!(t.as_str().parse::<SectionType>().unwrap(), t);
        }
        assert!("carousel".parse::<SectionType>().is_err());
    }

    #[test]
    fn test_parse_hero_section() {
        let json = json!({
            "id": "section-1-1",
            "type": "hero",
            "config": { "backgroundImage": "/img/crates.jpg", "overlayOpacity": 0.7, "buttonStyle": "outline" },
            "title": "Crate diggers welcome",
            "order": 1,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        });

        let section: PageSection = serde_json::from_value(json).unwrap();
        assert_eq!(section.section_type(), Some(SectionType::Hero));
        assert!(section.is_visible);
        assert_eq!(section.content, "");

        match &section.config {
            SectionConfig::Hero(hero) => {
                assert_eq!(hero.background_image.as_deref(), Some("/img/crates.jpg"));
                assert_eq!(hero.overlay_opacity, 0.7);
                assert_eq!(hero.button_style, ButtonStyle::Outline);
                assert_eq!(hero.alignment, TextAlignment::Center);
            }
            other => panic!("Expected hero config, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let json = json!({
            "id": "section-1-2",
            "type": "gallery",
            "order": 2,
            "isVisible": false,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        });

        let section: PageSection = serde_json::from_value(json).unwrap();
        assert_eq!(section.config, SectionType::Gallery.default_config());
        assert!(!section.is_visible);
    }

    #[test]
    fn test_unknown_type_degrades_to_placeholder() {
        let json = json!({
            "id": "section-1-3",
            "type": "countdown",
            "config": { "endsAt": "2024-12-24" },
            "order": 1,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        });

        let section: PageSection = serde_json::from_value(json).unwrap();
        assert!(section.config.is_unknown());
        assert_eq!(section.type_name(), "countdown");
        assert_eq!(
            section.config.placeholder_label().as_deref(),
            Some("Unknown section type: countdown")
        );

        // Raw config survives a write-back
        let back = serde_json::to_value(&section).unwrap();
        assert_eq!(back["type"], "countdown");
        assert_eq!(back["config"]["endsAt"], "2024-12-24");
    }

    #[test]
    fn test_malformed_known_config_degrades() {
        let json = json!({
            "id": "section-1-4",
            "type": "gallery",
            "config": { "columns": "lots" },
            "order": 1,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        });

        let section: PageSection = serde_json::from_value(json).unwrap();
        assert!(section.config.is_unknown());
        assert_eq!(section.type_name(), "gallery");
    }

    #[test]
    fn test_serialized_shape() {
        let now = DateTime::<Utc>::UNIX_EPOCH;
        let section = PageSection::new(
            "section-0-1".to_string(),
            SectionType::ProductGrid.default_config(),
            1,
            now,
        );

        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["type"], "productGrid");
        assert_eq!(value["config"]["columns"], 4);
        assert_eq!(value["isVisible"], true);
        assert!(value.get("section_type").is_none());
    }

    #[test]
    fn test_unmodelled_config_keys_survive_write_back() {
        let json = json!({
            "id": "section-1-5",
            "type": "hero",
            "config": { "overlayOpacity": 0.5, "textColor": "#fff", "height": "tall" },
            "order": 1,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        });

        let section: PageSection = serde_json::from_value(json).unwrap();
        match &section.config {
            SectionConfig::Hero(hero) => {
                assert_eq!(hero.overlay_opacity, 0.5);
                assert_eq!(hero.extra.get("textColor"), Some(&json!("#fff")));
            }
            other => panic!("Expected hero config, got {:?}", other),
        }

        let back = serde_json::to_value(&section).unwrap();
        assert_eq!(back["config"]["textColor"], "#fff");
        assert_eq!(back["config"]["height"], "tall");
        assert_eq!(back["config"]["overlayOpacity"], 0.5);
    }

    #[test]
    fn test_section_without_type_degrades_to_placeholder() {
        let json = json!({
            "id": "section-1-6",
            "order": 1,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        });

        let section: PageSection = serde_json::from_value(json).unwrap();
        assert!(section.config.is_unknown());
        assert_eq!(section.type_name(), "");
        assert_eq!(
            section.config.placeholder_label().as_deref(),
            Some("Unknown section type: (missing)")
        );
    }
}
