//! Page document

use crate::ids::new_page_id;
use crate::result::ModelResult;
use crate::section::PageSection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A marketing page: metadata plus an ordered list of sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub is_published: bool,
    #[serde(default = "default_draft")]
    pub is_draft: bool,

    pub last_modified: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub sections: Vec<PageSection>,
}

fn default_draft() -> bool {
    true
}

impl PageContent {
    /// New unpublished draft with no sections
    pub fn new(title: impl Into<String>, slug: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: new_page_id(),
            title: title.into(),
            slug: slug.into(),
            description: String::new(),
            is_published: false,
            is_draft: true,
            last_modified: now,
            created_at: now,
            updated_at: now,
            sections: Vec::new(),
        }
    }

    /// The blank page a fresh editing session starts from
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self::new("Untitled Page", "untitled-page", now)
    }

    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn find_section(&self, section_id: &str) -> Option<&PageSection> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn find_section_mut(&mut self, section_id: &str) -> Option<&mut PageSection> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    /// Rewrite every section's `order` to its 1-based position
    pub fn renumber_sections(&mut self) {
        for (index, section) in self.sections.iter_mut().enumerate() {
            section.order = index + 1;
        }
    }

    /// Mark the persisted-mutation timestamps
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_modified = now;
        self.updated_at = now;
    }
}

/// Where a page sits in the draft/publish lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageLifecycle {
    /// Never published
    Draft,

    /// Live, no pending edits
    Published,

    /// Draft edits pending over a published original
    PendingDraft,
}

impl fmt::Display for PageLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLifecycle::Draft => write!(f, "draft"),
            PageLifecycle::Published => write!(f, "published"),
            PageLifecycle::PendingDraft => write!(f, "pending draft"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionType;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    #[test]
    fn test_new_page_is_unpublished_draft() {
        let page = PageContent::new("Record Store Day", "rsd", now());
        assert!(!page.is_published);
        assert!(page.is_draft);
        assert!(page.sections.is_empty());
        assert!(!page.id.is_empty());
    }

    #[test]
    fn test_renumber_sections() {
        let mut page = PageContent::empty(now());
        for (i, t) in [SectionType::Hero, SectionType::Text, SectionType::Cta].iter().enumerate() {
            page.sections.push(PageSection::new(
                format!("s{}", i),
                t.default_config(),
                (i + 1) * 10,
                now(),
            ));
        }

        page.renumber_sections();
        let orders: Vec<usize> = page.sections.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_page_json() {
        let json = json!({
            "id": "page-1",
            "title": "Summer Sale",
            "slug": "summer-sale",
            "isPublished": true,
            "isDraft": false,
            "lastModified": "2024-06-01T00:00:00Z",
            "createdAt": "2024-05-01T00:00:00Z",
            "updatedAt": "2024-06-01T00:00:00Z",
            "sections": [{
                "id": "section-1-1",
                "type": "text",
                "config": { "alignment": "justify" },
                "content": "All jazz 20% off",
                "order": 1,
                "createdAt": "2024-05-01T00:00:00Z",
                "updatedAt": "2024-05-01T00:00:00Z"
            }]
        });

        let page = PageContent::from_json(&json.to_string()).unwrap();
        assert!(page.is_published);
        assert_eq!(page.description, "");
        assert_eq!(page.sections.len(), 1);
        assert_eq!(page.find_section("section-1-1").unwrap().content, "All jazz 20% off");
        assert_eq!(page.section_index("section-1-1"), Some(0));
        assert!(page.find_section("missing").is_none());

        let reparsed = PageContent::from_json(&page.to_json_pretty().unwrap()).unwrap();
        assert_eq!(reparsed, page);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(PageContent::from_json("{ not json").is_err());
    }
}
