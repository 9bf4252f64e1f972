//! Stable ordering of records by a chosen field.
//!
//! Comparison is defined pairwise: numbers compare numerically, text
//! compares by the Unicode Collation Algorithm (CLDR root order), and any
//! other pairing (missing value, text against
//! number) compares equal so the pair keeps its input order.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use feruca::Collator;

use crate::error::ParseFieldError;
use crate::record::ApplicationRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(ParseFieldError::new("sort direction", s)),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}

/// A field's value as seen by the comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
    Missing,
}

/// A field a table can be sorted by.
pub trait SortField: Copy + PartialEq + fmt::Debug {
    /// Direction applied when the field is first selected.
    fn default_direction(self) -> SortDirection;
}

/// A record type that exposes sort keys for its fields.
pub trait Sortable {
    type Field: SortField;

    fn sort_key(&self, field: Self::Field) -> SortKey<'_>;
}

thread_local! {
    static COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Collation order for display text. Accents and case only break ties,
/// with lowercase first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR.with_borrow_mut(|collator| collator.collate(a, b))
}

pub fn compare_keys(a: SortKey<'_>, b: SortKey<'_>) -> Ordering {
    match (a, b) {
        (SortKey::Number(x), SortKey::Number(y)) => {
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (SortKey::Text(x), SortKey::Text(y)) => locale_cmp(x, y),
        _ => Ordering::Equal,
    }
}

/// Returns a new sequence ordered by `field`; ties keep their input order.
pub fn sort<R>(records: &[R], field: R::Field, direction: SortDirection) -> Vec<R>
where
    R: Sortable + Clone,
{
    let cmp = |a: &R, b: &R| {
        let ord = compare_keys(a.sort_key(field), b.sort_key(field));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    };

    // The pairwise comparator is not a total order once missing or mixed
    // keys appear, which `slice::sort_by` does not accept. Insertion sort
    // only moves an element past a strictly greater neighbour.
    let mut out = records.to_vec();
    for i in 1..out.len() {
        let mut j = i;
        while j > 0 && cmp(&out[j], &out[j - 1]) == Ordering::Less {
            out.swap(j, j - 1);
            j -= 1;
        }
    }
    out
}

/// The first `n` records by `field`, largest first.
pub fn top_n<R>(records: &[R], field: R::Field, n: usize) -> Vec<R>
where
    R: Sortable + Clone,
{
    let mut sorted = sort(records, field, SortDirection::Desc);
    sorted.truncate(n);
    sorted
}

/// Current field and direction of a sortable table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortState<F: SortField> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: SortField> SortState<F> {
    pub fn new(field: F) -> Self {
        Self {
            field,
            direction: field.default_direction(),
        }
    }

    /// Selecting the active field flips direction; a new field starts at
    /// its default direction.
    pub fn select(&mut self, field: F) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            *self = Self::new(field);
        }
    }
}

/// Sortable fields of an [`ApplicationRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Name,
    AppLabel,
    Category,
    TotalRaters,
    AverageRating,
    HorizontalScore,
    VerticalScore,
    VerticalScorePercent,
    ActivityScore,
    FinalScore,
    LastMonthDownloads,
    LastMonthRaters,
    LastMonthComments,
}

impl SortField for RecordField {
    fn default_direction(self) -> SortDirection {
        match self {
            RecordField::Name | RecordField::AppLabel | RecordField::Category => {
                SortDirection::Asc
            }
            _ => SortDirection::Desc,
        }
    }
}

impl FromStr for RecordField {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "name" => RecordField::Name,
            "appLabel" => RecordField::AppLabel,
            "category" => RecordField::Category,
            "totalRaters" => RecordField::TotalRaters,
            "averageRating" => RecordField::AverageRating,
            "horizontalScore" => RecordField::HorizontalScore,
            "verticalScore" => RecordField::VerticalScore,
            "verticalScorePercent" => RecordField::VerticalScorePercent,
            "activityScore" => RecordField::ActivityScore,
            "finalScore" => RecordField::FinalScore,
            "lastMonthDownloads" => RecordField::LastMonthDownloads,
            "lastMonthRaters" => RecordField::LastMonthRaters,
            "lastMonthComments" => RecordField::LastMonthComments,
            _ => return Err(ParseFieldError::new("record field", s)),
        })
    }
}

fn optional(value: Option<f64>) -> SortKey<'static> {
    value.map_or(SortKey::Missing, SortKey::Number)
}

impl Sortable for ApplicationRecord {
    type Field = RecordField;

    fn sort_key(&self, field: RecordField) -> SortKey<'_> {
        match field {
            RecordField::Name => SortKey::Text(&self.name),
            RecordField::AppLabel => {
                SortKey::Text(self.app_identifier.as_deref().unwrap_or(""))
            }
            RecordField::Category => SortKey::Text(&self.category),
            RecordField::TotalRaters => SortKey::Number(self.total_raters as f64),
            RecordField::AverageRating => optional(self.average_rating),
            RecordField::HorizontalScore => optional(self.horizontal_score),
            RecordField::VerticalScore => optional(self.vertical_score),
            RecordField::VerticalScorePercent => optional(self.vertical_score_percent),
            RecordField::ActivityScore => optional(self.activity_score),
            RecordField::FinalScore => optional(self.final_score),
            RecordField::LastMonthDownloads => SortKey::Number(self.last_month_downloads as f64),
            RecordField::LastMonthRaters => SortKey::Number(self.last_month_raters as f64),
            RecordField::LastMonthComments => SortKey::Number(self.last_month_comments as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, final_score: Option<f64>) -> ApplicationRecord {
        ApplicationRecord {
            name: name.into(),
            final_score,
            ..Default::default()
        }
    }

    fn names(records: &[ApplicationRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    fn sorted_names(
        c: &[ApplicationRecord],
        field: RecordField,
        direction: SortDirection,
    ) -> Vec<String> {
        sort(c, field, direction).into_iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_numeric_asc_and_desc() {
        let c = vec![
            record("B", Some(50.0)),
            record("A", Some(90.0)),
            record("C", Some(10.0)),
        ];

        assert_eq!(
            sorted_names(&c, RecordField::FinalScore, SortDirection::Asc),
            vec!["C", "B", "A"]
        );
        assert_eq!(
            sorted_names(&c, RecordField::FinalScore, SortDirection::Desc),
            vec!["A", "B", "C"]
        );
    }

    #[test]
    fn test_ties_keep_input_order_both_directions() {
        let c = vec![
            record("first", Some(70.0)),
            record("top", Some(95.0)),
            record("second", Some(70.0)),
        ];

        assert_eq!(
            names(&sort(&c, RecordField::FinalScore, SortDirection::Desc)),
            vec!["top", "first", "second"]
        );
        assert_eq!(
            names(&sort(&c, RecordField::FinalScore, SortDirection::Asc)),
            vec!["first", "second", "top"]
        );
    }

    #[test]
    fn test_missing_values_do_not_reorder() {
        let c = vec![record("none", None), record("low", Some(1.0))];
        assert_eq!(
            sorted_names(&c, RecordField::FinalScore, SortDirection::Asc),
            vec!["none", "low"]
        );
        assert_eq!(
            sorted_names(&c, RecordField::FinalScore, SortDirection::Desc),
            vec!["none", "low"]
        );
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let c = vec![record("payme", None), record("ALIF", None), record("Click", None)];
        assert_eq!(
            sorted_names(&c, RecordField::Name, SortDirection::Asc),
            vec!["ALIF", "Click", "payme"]
        );
        assert_eq!(
            sorted_names(&c, RecordField::Name, SortDirection::Desc),
            vec!["payme", "Click", "ALIF"]
        );
    }

    #[test]
    fn test_text_sort_collates_accented_and_cyrillic() {
        let c: Vec<_> = ["Zoom", "Émile", "Apple", "ёлка", "жук", "ўзбек", "уют", "фото"]
            .into_iter()
            .map(|n| record(n, None))
            .collect();

        assert_eq!(
            sorted_names(&c, RecordField::Name, SortDirection::Asc),
            vec!["Apple", "Émile", "Zoom", "ёлка", "жук", "уют", "ўзбек", "фото"]
        );
    }

    #[test]
    fn test_compare_keys_mismatched_types_equal() {
        let equal = |a, b| compare_keys(a, b) == Ordering::Equal;
        assert!(equal(SortKey::Text("a"), SortKey::Number(1.0)));
        assert!(equal(SortKey::Missing, SortKey::Number(1.0)));
        assert!(equal(SortKey::Missing, SortKey::Text("a")));
        assert!(equal(SortKey::Number(f64::NAN), SortKey::Number(1.0)));
    }

    #[test]
    fn test_locale_cmp_lowercase_first_on_fold_tie() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("apay", "ATTO"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
        assert_eq!(locale_cmp("e", "é"), Ordering::Less);
        assert_eq!(locale_cmp("é", "f"), Ordering::Less);
    }

    #[test]
    fn test_top_n_truncates() {
        let c = vec![
            record("A", Some(10.0)),
            record("B", Some(30.0)),
            record("C", Some(20.0)),
        ];
        assert_eq!(names(&top_n(&c, RecordField::FinalScore, 2)), vec!["B", "C"]);
        assert_eq!(top_n(&c, RecordField::FinalScore, 10).len(), 3);
        assert!(top_n(&c, RecordField::FinalScore, 0).is_empty());
    }

    #[test]
    fn test_sort_state_toggle_and_reset() {
        let mut state = SortState::new(RecordField::Name);
        assert_eq!(state.direction, SortDirection::Asc);

        state.select(RecordField::Name);
        assert_eq!(state.direction, SortDirection::Desc);

        state.select(RecordField::FinalScore);
        assert_eq!(state.field, RecordField::FinalScore);
        assert_eq!(state.direction, SortDirection::Desc);

        state.select(RecordField::AppLabel);
        assert_eq!(state.direction, SortDirection::Asc);
    }

    #[test]
    fn test_record_field_from_str() {
        assert_eq!("finalScore".parse::<RecordField>(), Ok(RecordField::FinalScore));
        assert!("final_score".parse::<RecordField>().is_err());
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
    }
}
