//! Catalog selection by category or free text.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseFieldError;
use crate::record::ApplicationRecord;

/// Category value meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Fields a text query may match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Category,
    AppIdentifier,
}

impl TextField {
    pub const ALL: [TextField; 3] = [
        TextField::Name,
        TextField::Category,
        TextField::AppIdentifier,
    ];

    /// `AppIdentifier` covers every listing label on the record.
    fn matches(self, record: &ApplicationRecord, needle: &str) -> bool {
        let hit = |v: &str| v.to_lowercase().contains(needle);
        match self {
            TextField::Name => hit(record.name.as_str()),
            TextField::Category => hit(record.category.as_str()),
            TextField::AppIdentifier => record
                .app_identifier
                .iter()
                .chain(&record.app_labels)
                .any(|label| hit(label.as_str())),
        }
    }
}

impl FromStr for TextField {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(TextField::Name),
            "category" => Ok(TextField::Category),
            "app" | "appId" | "app-id" => Ok(TextField::AppIdentifier),
            _ => Err(ParseFieldError::new("text field", s)),
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextField::Name => "name",
            TextField::Category => "category",
            TextField::AppIdentifier => "app",
        })
    }
}

/// Records whose category equals `category` exactly, or all of them for
/// [`ALL_CATEGORIES`].
pub fn filter_by_category(
    catalog: &[ApplicationRecord],
    category: &str,
) -> Vec<ApplicationRecord> {
    if category == ALL_CATEGORIES {
        return catalog.to_vec();
    }
    catalog
        .iter()
        .filter(|r| r.category == category)
        .cloned()
        .collect()
}

/// Records where any of `fields` contains `query`, ignoring case.
pub fn filter_by_text(
    catalog: &[ApplicationRecord],
    query: &str,
    fields: &[TextField],
) -> Vec<ApplicationRecord> {
    if query.is_empty() {
        return catalog.to_vec();
    }
    let needle = query.to_lowercase();

    catalog
        .iter()
        .filter(|record| fields.iter().any(|field| field.matches(record, &needle)))
        .cloned()
        .collect()
}

/// `"all"` followed by each distinct non-empty category, in first-seen order.
pub fn categories(catalog: &[ApplicationRecord]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for record in catalog {
        if !record.category.is_empty() && !out[1..].contains(&record.category) {
            out.push(record.category.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, category: &str, app: Option<&str>) -> ApplicationRecord {
        ApplicationRecord {
            name: name.into(),
            category: category.into(),
            app_identifier: app.map(String::from),
            ..Default::default()
        }
    }

    fn catalog() -> Vec<ApplicationRecord> {
        vec![
            record("ALIF", "To‘lov tashkiloti", Some("Alif: shop, pay and transfer")),
            record("XALQ", "Davlat banki", None),
            record("PAYME", "To‘lov tashkiloti", Some("Payme - payments")),
            record("KAPITAL", "Xususiy bank", Some("Kapitalbank")),
        ]
    }

    fn names(records: &[ApplicationRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_category_all_is_identity() {
        let c = catalog();
        assert_eq!(filter_by_category(&c, "all"), c);
    }

    #[test]
    fn test_category_exact_match_keeps_order() {
        let filtered = filter_by_category(&catalog(), "To‘lov tashkiloti");
        assert_eq!(names(&filtered), vec!["ALIF", "PAYME"]);
    }

    #[test]
    fn test_category_is_case_sensitive() {
        assert!(filter_by_category(&catalog(), "davlat banki").is_empty());
    }

    #[test]
    fn test_unknown_category_is_empty() {
        assert!(filter_by_category(&catalog(), "Mikromoliya").is_empty());
    }

    #[test]
    fn test_text_empty_query_returns_input() {
        let c = catalog();
        assert_eq!(filter_by_text(&c, "", &TextField::ALL), c);
    }

    #[test]
    fn test_text_case_insensitive_across_fields() {
        let c = catalog();
        let found = filter_by_text(&c, "pay", &TextField::ALL);
        assert_eq!(names(&found), vec!["ALIF", "PAYME"]);

        let found = filter_by_text(&c, "BANK", &TextField::ALL);
        assert_eq!(names(&found), vec!["XALQ", "KAPITAL"]);
    }

    #[test]
    fn test_text_respects_field_subset() {
        let c = catalog();
        let found = filter_by_text(&c, "pay", &[TextField::Name]);
        assert_eq!(names(&found), vec!["PAYME"]);
        assert!(filter_by_text(&c, "pay", &[]).is_empty());
    }

    #[test]
    fn test_text_skips_missing_app_identifier() {
        let c = catalog();
        let filtered = filter_by_text(&c, "xalq", &[TextField::AppIdentifier]);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_text_matches_secondary_app_label() {
        let raw = serde_json::json!({
            "name": "CLICK",
            "appId": "Click SuperApp",
            "appName": "Click Mobile",
            "category": "To‘lov tashkiloti"
        });
        let c = vec![ApplicationRecord::from_raw(&raw)];

        let found = filter_by_text(&c, "mobile", &[TextField::AppIdentifier]);
        assert_eq!(names(&found), vec!["CLICK"]);

        let found = filter_by_text(&c, "super", &[TextField::AppIdentifier]);
        assert_eq!(names(&found), vec!["CLICK"]);
    }

    #[test]
    fn test_categories_distinct_in_order() {
        let mut c = catalog();
        c.push(record("EMPTY", "", None));
        assert_eq!(
            categories(&c),
            vec!["all", "To‘lov tashkiloti", "Davlat banki", "Xususiy bank"]
        );
    }
}
