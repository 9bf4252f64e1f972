//! Application records and the normalizer that builds them from raw catalog rows.
//!
//! Raw rows come in two shapes: the current one with a nested `ratings`
//! object, and a legacy flat one (`rating1`..`rating5`, `appName`,
//! `lastMonthReviews`). Every logical field resolves through a fixed lookup
//! chain, so the rest of the crate only ever sees [`ApplicationRecord`].

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::ParseFieldError;

/// Distribution platform a catalog was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    GooglePlay,
    AppStore,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Platform::GooglePlay => "Google Play",
            Platform::AppStore => "App Store",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google-play" | "googleplay" | "gp" => Ok(Platform::GooglePlay),
            "app-store" | "appstore" | "as" => Ok(Platform::AppStore),
            _ => Err(ParseFieldError::new("platform", s)),
        }
    }
}

/// Star level of a rating bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Star {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Star {
    /// Highest level first, the order distributions are reported in.
    pub const DESCENDING: [Star; 5] = [Star::Five, Star::Four, Star::Three, Star::Two, Star::One];

    pub fn level(self) -> u8 {
        match self {
            Star::One => 1,
            Star::Two => 2,
            Star::Three => 3,
            Star::Four => 4,
            Star::Five => 5,
        }
    }
}

/// A field as the engine understands it, independent of how a catalog spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalField {
    Name,
    AppIdentifier,
    Category,
    TotalRaters,
    Rating(Star),
    AverageRating,
    HorizontalScore,
    VerticalScore,
    VerticalScorePercent,
    VolumeValue,
    ActivityScore,
    FinalScore,
    LastMonthDownloads,
    LastMonthRaters,
    LastMonthComments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Count,
    Real,
    Text,
}

impl LogicalField {
    /// Composite scores are precomputed upstream and only validated here.
    pub const COMPOSITE_SCORES: [LogicalField; 5] = [
        LogicalField::HorizontalScore,
        LogicalField::VerticalScore,
        LogicalField::VerticalScorePercent,
        LogicalField::ActivityScore,
        LogicalField::FinalScore,
    ];

    /// Physical locations of the field, in precedence order. Dots descend
    /// into nested objects.
    fn paths(self) -> &'static [&'static str] {
        match self {
            LogicalField::Name => &["name"],
            LogicalField::AppIdentifier => &["appId", "appName"],
            LogicalField::Category => &["category"],
            LogicalField::TotalRaters => &["totalRaters"],
            LogicalField::Rating(Star::Five) => &["ratings.five", "rating5"],
            LogicalField::Rating(Star::Four) => &["ratings.four", "rating4"],
            LogicalField::Rating(Star::Three) => &["ratings.three", "rating3"],
            LogicalField::Rating(Star::Two) => &["ratings.two", "rating2"],
            LogicalField::Rating(Star::One) => &["ratings.one", "rating1"],
            LogicalField::AverageRating => &["averageRating"],
            LogicalField::HorizontalScore => &["horizontalScore"],
            LogicalField::VerticalScore => &["verticalScore"],
            LogicalField::VerticalScorePercent => &["verticalScorePercent"],
            LogicalField::VolumeValue => &["volumeValue"],
            LogicalField::ActivityScore => &["activityScore"],
            LogicalField::FinalScore => &["finalScore"],
            LogicalField::LastMonthDownloads => &["lastMonthDownloads"],
            LogicalField::LastMonthRaters => &["lastMonthRaters"],
            LogicalField::LastMonthComments => &["lastMonthComments", "lastMonthReviews"],
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            LogicalField::Name | LogicalField::AppIdentifier | LogicalField::Category => {
                FieldKind::Text
            }
            LogicalField::TotalRaters
            | LogicalField::Rating(_)
            | LogicalField::LastMonthDownloads
            | LogicalField::LastMonthRaters
            | LogicalField::LastMonthComments => FieldKind::Count,
            _ => FieldKind::Real,
        }
    }
}

/// A resolved field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Count(u64),
    Real(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_count(&self) -> u64 {
        match self {
            FieldValue::Count(n) => *n,
            _ => 0,
        }
    }

    pub fn as_real(&self) -> f64 {
        match self {
            FieldValue::Real(x) => *x,
            FieldValue::Count(n) => *n as f64,
            FieldValue::Text(_) => 0.0,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            _ => String::new(),
        }
    }
}

fn resolve<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(raw, |node, key| node.get(key))
}

fn coerce(value: &Value, kind: FieldKind) -> Option<FieldValue> {
    match kind {
        FieldKind::Count => value
            .as_u64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|x| x.is_finite() && *x >= 0.0 && x.fract() == 0.0)
                    .map(|x| x as u64)
            })
            .map(FieldValue::Count),
        FieldKind::Real => value
            .as_f64()
            .filter(|x| x.is_finite())
            .map(FieldValue::Real),
        FieldKind::Text => value.as_str().map(|s| FieldValue::Text(s.to_string())),
    }
}

/// Returns the first present, type-correct value for `field`, if any.
pub fn lookup(raw: &Value, field: LogicalField) -> Option<FieldValue> {
    field
        .paths()
        .iter()
        .find_map(|path| resolve(raw, path).and_then(|v| coerce(v, field.kind())))
}

/// Every present, type-correct value for `field`, in precedence order.
pub fn lookup_all(raw: &Value, field: LogicalField) -> Vec<FieldValue> {
    field
        .paths()
        .iter()
        .filter_map(|path| resolve(raw, path).and_then(|v| coerce(v, field.kind())))
        .collect()
}

/// Like [`lookup`], but falls back to the field's default (0 or "").
pub fn normalize(raw: &Value, field: LogicalField) -> FieldValue {
    lookup(raw, field).unwrap_or_else(|| match field.kind() {
        FieldKind::Count => FieldValue::Count(0),
        FieldKind::Real => FieldValue::Real(0.0),
        FieldKind::Text => FieldValue::Text(String::new()),
    })
}

/// Per-star rating counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RatingBuckets {
    pub five: u64,
    pub four: u64,
    pub three: u64,
    pub two: u64,
    pub one: u64,
}

impl RatingBuckets {
    pub fn get(&self, star: Star) -> u64 {
        match star {
            Star::One => self.one,
            Star::Two => self.two,
            Star::Three => self.three,
            Star::Four => self.four,
            Star::Five => self.five,
        }
    }

    /// Saturates at `u64::MAX`.
    pub fn total(&self) -> u64 {
        Star::DESCENDING
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(self.get(*s)))
    }

    /// Bucket-wise sum, saturating at `u64::MAX`.
    pub fn saturating_add(self, other: RatingBuckets) -> RatingBuckets {
        RatingBuckets {
            five: self.five.saturating_add(other.five),
            four: self.four.saturating_add(other.four),
            three: self.three.saturating_add(other.three),
            two: self.two.saturating_add(other.two),
            one: self.one.saturating_add(other.one),
        }
    }
}

/// One payment organization's application on one platform.
///
/// Built once at ingestion; composite scores that were absent or
/// non-numeric stay `None` so aggregates can exclude them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub name: String,
    pub app_identifier: Option<String>,
    /// Every listing label the row carries (`appId`, then `appName`).
    #[serde(skip_serializing)]
    pub app_labels: Vec<String>,
    pub category: String,
    pub total_raters: u64,
    pub rating_buckets: RatingBuckets,
    pub average_rating: Option<f64>,
    pub horizontal_score: Option<f64>,
    pub vertical_score: Option<f64>,
    pub vertical_score_percent: Option<f64>,
    pub volume_value: f64,
    pub activity_score: Option<f64>,
    pub final_score: Option<f64>,
    pub last_month_downloads: u64,
    pub last_month_raters: u64,
    pub last_month_comments: u64,
}

impl ApplicationRecord {
    pub fn from_raw(raw: &Value) -> Self {
        let count = |field| normalize(raw, field).as_count();
        let real = |field| lookup(raw, field).map(|v| v.as_real());

        let name = normalize(raw, LogicalField::Name).into_text();

        for field in LogicalField::COMPOSITE_SCORES {
            if lookup(raw, field).is_none() {
                warn!(name = %name, field = ?field, "Composite score missing or non-numeric");
            }
        }

        let app_labels: Vec<String> = lookup_all(raw, LogicalField::AppIdentifier)
            .into_iter()
            .map(FieldValue::into_text)
            .collect();

        ApplicationRecord {
            app_identifier: app_labels.first().cloned(),
            app_labels,
            category: normalize(raw, LogicalField::Category).into_text(),
            total_raters: count(LogicalField::TotalRaters),
            rating_buckets: RatingBuckets {
                five: count(LogicalField::Rating(Star::Five)),
                four: count(LogicalField::Rating(Star::Four)),
                three: count(LogicalField::Rating(Star::Three)),
                two: count(LogicalField::Rating(Star::Two)),
                one: count(LogicalField::Rating(Star::One)),
            },
            average_rating: real(LogicalField::AverageRating),
            horizontal_score: real(LogicalField::HorizontalScore),
            vertical_score: real(LogicalField::VerticalScore),
            vertical_score_percent: real(LogicalField::VerticalScorePercent),
            volume_value: normalize(raw, LogicalField::VolumeValue).as_real(),
            activity_score: real(LogicalField::ActivityScore),
            final_score: real(LogicalField::FinalScore),
            last_month_downloads: count(LogicalField::LastMonthDownloads),
            last_month_raters: count(LogicalField::LastMonthRaters),
            last_month_comments: count(LogicalField::LastMonthComments),
            name,
        }
    }

    /// App identifier when the catalog has one, otherwise the organization name.
    pub fn display_label(&self) -> &str {
        self.app_identifier.as_deref().unwrap_or(&self.name)
    }

    /// Share of five-star ratings in `total_raters`, as a percentage.
    pub fn five_star_percent(&self) -> f64 {
        pct(self.rating_buckets.five, self.total_raters)
    }
}

pub fn pct(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}
