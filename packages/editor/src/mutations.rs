//! # Page Mutations
//!
//! Inputs to the store's mutation actions, plus a serializable command
//! form ([`PageMutation`]) so edits can be scripted or sent over a wire.
//!
//! ## Semantics
//!
//! - `updatePage` is a shallow merge; only fields that are present change
//! - `updateSection` on a missing section id is a silent no-op
//! - structural operations (add/delete/move/duplicate) renumber `order`
//! - `moveSection` at either boundary is a no-op

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vinyl_model::{PageContent, PageSection, SectionConfig, SectionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Partial page fields for `update_page`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<PageSection>>,
}

impl PageUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, page: &mut PageContent) {
        if let Some(title) = &self.title {
            page.title = title.clone();
        }
        if let Some(slug) = &self.slug {
            page.slug = slug.clone();
        }
        if let Some(description) = &self.description {
            page.description = description.clone();
        }
        if let Some(is_published) = self.is_published {
            page.is_published = is_published;
        }
        if let Some(is_draft) = self.is_draft {
            page.is_draft = is_draft;
        }
        if let Some(sections) = &self.sections {
            page.sections = sections.clone();
        }
    }
}

/// Partial section fields for `update_section`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<SectionConfig>,
}

impl SectionUpdate {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn visibility(is_visible: bool) -> Self {
        Self {
            is_visible: Some(is_visible),
            ..Self::default()
        }
    }

    /// Merge into `section` and refresh its `updated_at`
    pub fn apply_to(&self, section: &mut PageSection, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            section.title = title.clone();
        }
        if let Some(content) = &self.content {
            section.content = content.clone();
        }
        if let Some(is_visible) = self.is_visible {
            section.is_visible = is_visible;
        }
        if let Some(config) = &self.config {
            section.config = config.clone();
        }
        section.updated_at = now;
    }
}

/// Fields overlaid on a freshly created section by `add_section`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,

    /// Must match the requested section type; otherwise it is ignored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<SectionConfig>,
}

impl SectionTemplate {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_config(mut self, config: SectionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Overlay onto `section`; returns false when the config was rejected
    pub fn apply_to(&self, section: &mut PageSection, section_type: SectionType) -> bool {
        if let Some(title) = &self.title {
            section.title = title.clone();
        }
        if let Some(content) = &self.content {
            section.content = content.clone();
        }
        if let Some(is_visible) = self.is_visible {
            section.is_visible = is_visible;
        }
        match &self.config {
            Some(config) if config.section_type() == Some(section_type) => {
                section.config = config.clone();
                true
            }
            Some(_) => false,
            None => true,
        }
    }
}

/// Serializable store command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PageMutation {
    UpdatePage {
        fields: PageUpdate,
    },

    #[serde(rename_all = "camelCase")]
    AddSection {
        section_type: SectionType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        template: Option<SectionTemplate>,
    },

    #[serde(rename_all = "camelCase")]
    UpdateSection {
        section_id: String,
        updates: SectionUpdate,
    },

    #[serde(rename_all = "camelCase")]
    DeleteSection {
        section_id: String,
    },

    #[serde(rename_all = "camelCase")]
    MoveSection {
        section_id: String,
        direction: MoveDirection,
    },

    #[serde(rename_all = "camelCase")]
    DuplicateSection {
        section_id: String,
    },

    #[serde(rename_all = "camelCase")]
    SelectSection {
        #[serde(default)]
        section_id: Option<String>,
    },

    /// Record the current page as a history entry
    Checkpoint {
        #[serde(default)]
        label: Option<String>,
    },

    Undo,
    Redo,
    DiscardChanges,
}

impl PageMutation {
    /// Debug name for logging
    pub fn name(&self) -> &'static str {
        match self {
            PageMutation::UpdatePage { .. } => "updatePage",
            PageMutation::AddSection { .. } => "addSection",
            PageMutation::UpdateSection { .. } => "updateSection",
            PageMutation::DeleteSection { .. } => "deleteSection",
            PageMutation::MoveSection { .. } => "moveSection",
            PageMutation::DuplicateSection { .. } => "duplicateSection",
            PageMutation::SelectSection { .. } => "selectSection",
            PageMutation::Checkpoint { .. } => "checkpoint",
            PageMutation::Undo => "undo",
            PageMutation::Redo => "redo",
            PageMutation::DiscardChanges => "discardChanges",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vinyl_model::TextConfig;

    fn section() -> PageSection {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        PageSection::new("s1".to_string(), SectionType::Text.default_config(), 1, epoch)
    }

    #[test]
    fn test_page_update_is_shallow_merge() {
        let mut page = PageContent::new("Old", "old", DateTime::<Utc>::UNIX_EPOCH);
        PageUpdate::title("New").apply_to(&mut page);

        assert_eq!(page.title, "New");
        assert_eq!(page.slug, "old");
    }

    #[test]
    fn test_section_update_refreshes_timestamp() {
        let mut s = section();
        let later = s.updated_at + chrono::Duration::seconds(30);
        SectionUpdate::visibility(false).apply_to(&mut s, later);

        assert!(!s.is_visible);
        assert_eq!(s.updated_at, later);
        assert_eq!(s.created_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_template_with_mismatched_config_is_ignored() {
        let mut s = section();
        let template = SectionTemplate::titled("Intro")
            .with_config(SectionType::Hero.default_config());

        assert!(!template.apply_to(&mut s, SectionType::Text));
        assert_eq!(s.title, "Intro");
        assert_eq!(s.section_type(), Some(SectionType::Text));
    }

    #[test]
    fn test_template_with_matching_config() {
        let mut s = section();
        let config = SectionConfig::Text(TextConfig {
            alignment: vinyl_model::TextAlignment::Right,
            ..TextConfig::default()
        });
        let template = SectionTemplate::default().with_config(config.clone());

        assert!(template.apply_to(&mut s, SectionType::Text));
        assert_eq!(s.config, config);
    }

    #[test]
    fn test_mutation_json_shape() {
        let json = json!([
            { "op": "addSection", "sectionType": "hero", "template": { "title": "Welcome" } },
            { "op": "moveSection", "sectionId": "s1", "direction": "up" },
            { "op": "updatePage", "fields": { "title": "Home" } },
            { "op": "checkpoint", "label": "Before cleanup" },
            { "op": "undo" }
        ]);

        let mutations: Vec<PageMutation> = serde_json::from_value(json).unwrap();
        assert_eq!(mutations.len(), 5);
        assert_eq!(
            mutations[1],
            PageMutation::MoveSection {
                section_id: "s1".to_string(),
                direction: MoveDirection::Up,
            }
        );
        assert_eq!(mutations[4], PageMutation::Undo);

        let back = serde_json::to_value(&mutations[0]).unwrap();
        assert_eq!(back["op"], "addSection");
        assert_eq!(back["sectionType"], "hero");
    }
}
