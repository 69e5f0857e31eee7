//! Document model properties

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use serde_json::json;
use vinyl_model::{has_errors, validate_page, PageContent, PageSection, SectionConfig, SectionType};

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Whatever orders a page arrives with, renumbering makes it valid
    #[test]
    fn test_renumbered_page_has_no_errors(
        orders in prop::collection::vec(0usize..1000, 0..20),
        kinds in prop::collection::vec(0..SectionType::ALL.len(), 20),
    ) {
        let mut page = PageContent::new("Back Catalogue", "back-catalogue", epoch());
        for (i, order) in orders.iter().enumerate() {
            let config = SectionType::ALL[kinds[i]].default_config();
            page.sections.push(PageSection::new(format!("section-{}", i), config, *order, epoch()));
        }

        page.renumber_sections();

        prop_assert!(!has_errors(&validate_page(&page)));
    }

    /// Unknown section types survive a JSON round trip untouched
    #[test]
    fn test_unknown_type_is_preserved(type_name in "[a-z]{3,10}Block", columns in 1u32..12) {
        let raw = json!({ "columns": columns, "source": "spotify" });
        let config = SectionConfig::from_parts(&type_name, raw.clone());
        prop_assert!(config.is_unknown());

        let mut page = PageContent::new("Playlists", "playlists", epoch());
        page.sections.push(PageSection::new("section-embed".to_string(), config, 1, epoch()));

        let reloaded = PageContent::from_json(&page.to_json_pretty().unwrap()).unwrap();
        let section = &reloaded.sections[0];

        prop_assert_eq!(section.type_name(), type_name.as_str());
        prop_assert_eq!(
            &section.config,
            &SectionConfig::Unknown { type_name: type_name.clone(), raw }
        );
    }
}

#[test]
fn test_stored_page_with_unknown_section_loads() {
    let json = r#"{
        "id": "4b0f7d2e-0000-4000-8000-000000000001",
        "title": "Home",
        "slug": "home",
        "isPublished": true,
        "isDraft": false,
        "lastModified": "2024-03-01T12:00:00Z",
        "createdAt": "2024-03-01T12:00:00Z",
        "updatedAt": "2024-03-01T12:00:00Z",
        "sections": [
            {
                "id": "section-1",
                "type": "hero",
                "config": { "overlayOpacity": 0.6 },
                "title": "Welcome",
                "content": "",
                "order": 1,
                "createdAt": "2024-03-01T12:00:00Z",
                "updatedAt": "2024-03-01T12:00:00Z"
            },
            {
                "id": "section-2",
                "type": "countdown",
                "config": { "endsAt": "2024-04-20" },
                "title": "Record Store Day",
                "content": "",
                "order": 2,
                "isVisible": false,
                "createdAt": "2024-03-01T12:00:00Z",
                "updatedAt": "2024-03-01T12:00:00Z"
            }
        ]
    }"#;

    let page = PageContent::from_json(json).unwrap();

    assert_eq!(page.sections[0].section_type(), Some(SectionType::Hero));
    assert!(page.sections[0].is_visible);
    assert!(page.sections[1].config.is_unknown());
    assert!(!page.sections[1].is_visible);

    let issues = validate_page(&page);
    assert_eq!(issues.len(), 1);
    assert!(!issues[0].is_error());
    assert_eq!(issues[0].section_id.as_deref(), Some("section-2"));
}

#[test]
fn test_page_with_untyped_section_loads() {
    let json = r#"{
        "id": "4b0f7d2e-0000-4000-8000-000000000002",
        "title": "Events",
        "slug": "events",
        "lastModified": "2024-03-01T12:00:00Z",
        "createdAt": "2024-03-01T12:00:00Z",
        "updatedAt": "2024-03-01T12:00:00Z",
        "sections": [
            { "id": "section-1", "order": 1, "createdAt": "2024-03-01T12:00:00Z", "updatedAt": "2024-03-01T12:00:00Z" }
        ]
    }"#;

    let page = PageContent::from_json(json).unwrap();

    assert!(page.sections[0].config.is_unknown());
    let issues = validate_page(&page);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].message, "Unknown section type: (missing)");
}
