//! Structural checks on a page document

use crate::page::PageContent;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    Error,
    Warning,
}

/// A single structural problem found in a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub level: IssueLevel,

    /// Short rule name, e.g. `order-contiguity`
    pub rule: String,

    pub message: String,

    /// Section the issue was found on, if any
    pub section_id: Option<String>,
}

impl ValidationIssue {
    pub fn error(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            rule: rule.into(),
            message: message.into(),
            section_id: None,
        }
    }

    pub fn warning(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            rule: rule.into(),
            message: message.into(),
            section_id: None,
        }
    }

    pub fn on_section(mut self, section_id: impl Into<String>) -> Self {
        self.section_id = Some(section_id.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == IssueLevel::Error
    }
}

/// Check a page and return every issue found (empty when valid)
pub fn validate_page(page: &PageContent) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if page.slug.trim().is_empty() {
        issues.push(ValidationIssue::error("empty-slug", "Page slug must not be empty"));
    }

    let mut seen = HashSet::new();
    for (index, section) in page.sections.iter().enumerate() {
        if !seen.insert(section.id.as_str()) {
            issues.push(
                ValidationIssue::error(
                    "duplicate-section-id",
                    format!("Section id {} is used more than once", section.id),
                )
                .on_section(&section.id),
            );
        }

        let expected = index + 1;
        if section.order != expected {
            issues.push(
                ValidationIssue::error(
                    "order-contiguity",
                    format!(
                        "Section at position {} has order {} (expected {})",
                        expected, section.order, expected
                    ),
                )
                .on_section(&section.id),
            );
        }

        if let Some(label) = section.config.placeholder_label() {
            issues.push(ValidationIssue::warning("unknown-section-type", label).on_section(&section.id));
        }
    }

    issues
}

pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(ValidationIssue::is_error)
}
