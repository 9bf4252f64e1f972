//! Cross-platform join of two catalogs on organization name.

use std::collections::HashMap;
use std::str::FromStr;

use crate::analyzers::sort::{SortDirection, SortField, SortKey, Sortable};
use crate::analyzers::types::CombinedRecord;
use crate::error::ParseFieldError;
use crate::record::ApplicationRecord;

/// Joins `platform_a` with `platform_b` on exact `name`.
///
/// Driven by `platform_a`: each of its records yields one combined row when
/// `platform_b` has a record of the same name, and is dropped otherwise.
/// Output follows `platform_a` order. When `platform_b` repeats a name, its
/// first occurrence is used. Records with an empty name never match.
pub fn merge(
    platform_a: &[ApplicationRecord],
    platform_b: &[ApplicationRecord],
) -> Vec<CombinedRecord> {
    let mut by_name: HashMap<&str, &ApplicationRecord> =
        HashMap::with_capacity(platform_b.len());
    for record in platform_b.iter().filter(|r| !r.name.is_empty()) {
        by_name.entry(record.name.as_str()).or_insert(record);
    }

    platform_a
        .iter()
        .filter_map(|a| {
            let b = by_name.get(a.name.as_str())?;
            let a_score = a.final_score.unwrap_or(0.0);
            let b_score = b.final_score.unwrap_or(0.0);

            Some(CombinedRecord {
                name: a.name.clone(),
                category: a.category.clone(),
                app_label: a
                    .app_identifier
                    .as_ref()
                    .or(b.app_identifier.as_ref())
                    .cloned()
                    .unwrap_or_default(),
                platform_a_score: a_score,
                platform_b_score: b_score,
                average_score: (a_score + b_score) / 2.0,
                platform_a_raters: a.total_raters,
                platform_b_raters: b.total_raters,
            })
        })
        .collect()
}

/// Sortable fields of a [`CombinedRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinedField {
    Name,
    AppLabel,
    Category,
    PlatformAScore,
    PlatformBScore,
    AverageScore,
    PlatformARaters,
    PlatformBRaters,
}

impl SortField for CombinedField {
    fn default_direction(self) -> SortDirection {
        match self {
            CombinedField::Name | CombinedField::AppLabel | CombinedField::Category => {
                SortDirection::Asc
            }
            _ => SortDirection::Desc,
        }
    }
}

impl FromStr for CombinedField {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "name" => CombinedField::Name,
            "appLabel" => CombinedField::AppLabel,
            "category" => CombinedField::Category,
            "platformAScore" | "googlePlayScore" => CombinedField::PlatformAScore,
            "platformBScore" | "appStoreScore" => CombinedField::PlatformBScore,
            "averageScore" => CombinedField::AverageScore,
            "platformARaters" | "googlePlayRaters" => CombinedField::PlatformARaters,
            "platformBRaters" | "appStoreRaters" => CombinedField::PlatformBRaters,
            _ => return Err(ParseFieldError::new("combined field", s)),
        })
    }
}

impl Sortable for CombinedRecord {
    type Field = CombinedField;

    fn sort_key(&self, field: CombinedField) -> SortKey<'_> {
        match field {
            CombinedField::Name => SortKey::Text(&self.name),
            CombinedField::AppLabel => SortKey::Text(&self.app_label),
            CombinedField::Category => SortKey::Text(&self.category),
            CombinedField::PlatformAScore => SortKey::Number(self.platform_a_score),
            CombinedField::PlatformBScore => SortKey::Number(self.platform_b_score),
            CombinedField::AverageScore => SortKey::Number(self.average_score),
            CombinedField::PlatformARaters => SortKey::Number(self.platform_a_raters as f64),
            CombinedField::PlatformBRaters => SortKey::Number(self.platform_b_raters as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::sort::{SortState, sort};

    fn record(name: &str, final_score: f64, app: Option<&str>) -> ApplicationRecord {
        ApplicationRecord {
            name: name.into(),
            category: "To‘lov tashkiloti".into(),
            app_identifier: app.map(String::from),
            final_score: Some(final_score),
            total_raters: 10,
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_matching_name() {
        let gp = vec![record("CLICK", 97.58, Some("Click SuperApp"))];
        let ios = vec![record("CLICK", 95.0, None)];

        let combined = merge(&gp, &ios);

        assert_eq!(combined.len(), 1);
        let click = &combined[0];
        assert_eq!(click.app_label, "Click SuperApp");
        assert_eq!(click.platform_a_score, 97.58);
        assert_eq!(click.platform_b_score, 95.0);
        assert!((click.average_score - 96.29).abs() < 1e-9);
    }

    #[test]
    fn test_merge_drops_unmatched() {
        let gp = vec![record("CLICK", 97.58, None), record("ALIF", 96.31, None)];
        let ios = vec![record("ALIF", 90.0, None), record("UZUM", 80.0, None)];

        let combined = merge(&gp, &ios);

        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].name, "ALIF");
    }

    #[test]
    fn test_merge_is_case_sensitive() {
        let combined = merge(&[record("Click", 1.0, None)], &[record("CLICK", 1.0, None)]);
        assert!(combined.is_empty());
    }

    #[test]
    fn test_merge_follows_platform_a_order() {
        let gp = vec![record("B", 1.0, None), record("A", 2.0, None)];
        let ios = vec![record("A", 3.0, None), record("B", 4.0, None)];

        let names: Vec<_> = merge(&gp, &ios).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_merge_first_duplicate_in_platform_b_wins() {
        let gp = vec![record("PAYME", 80.0, None)];
        let ios = vec![record("PAYME", 60.0, None), record("PAYME", 100.0, None)];

        let combined = merge(&gp, &ios);
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].platform_b_score, 60.0);
    }

    #[test]
    fn test_merge_app_label_falls_back_to_platform_b() {
        let combined = merge(&[record("OSON", 70.0, None)], &[record("OSON", 70.0, Some("Oson"))]);
        assert_eq!(combined[0].app_label, "Oson");

        let combined = merge(&[record("OSON", 70.0, None)], &[record("OSON", 70.0, None)]);
        assert_eq!(combined[0].app_label, "");
    }

    #[test]
    fn test_merge_empty_names_never_match() {
        let combined = merge(&[record("", 70.0, None)], &[record("", 70.0, None)]);
        assert!(combined.is_empty());
    }

    #[test]
    fn test_combined_band_uses_average() {
        let combined = merge(&[record("ATTO", 87.39, None)], &[record("ATTO", 94.0, None)]);
        assert_eq!(combined[0].band(), crate::analyzers::grade::ScoreBand::Excellent);

        let combined = merge(&[record("PLUM", 57.56, None)], &[record("PLUM", 70.0, None)]);
        assert_eq!(combined[0].band(), crate::analyzers::grade::ScoreBand::Fair);
    }

    #[test]
    fn test_combined_default_sort() {
        let gp = vec![record("A", 50.0, None), record("B", 90.0, None)];
        let ios = vec![record("A", 60.0, None), record("B", 80.0, None)];

        let state = SortState::new(CombinedField::AverageScore);
        let sorted = sort(&merge(&gp, &ios), state.field, state.direction);

        assert_eq!(sorted[0].name, "B");
        assert_eq!(sorted[1].name, "A");
    }
}
