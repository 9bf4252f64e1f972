//! Derived structures produced by the analyzers.

use serde::Serialize;

use crate::analyzers::grade::ScoreBand;

/// Headline statistics for a filtered catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub count: usize,
    pub total_raters: u64,
    pub total_downloads: u64,
    pub average_rating: f64,
    pub average_final_score: f64,
    pub top_final_score: f64,
    pub top_record_name: String,
}

/// One organization present on both platforms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedRecord {
    pub name: String,
    pub category: String,
    pub app_label: String,
    pub platform_a_score: f64,
    pub platform_b_score: f64,
    pub average_score: f64,
    pub platform_a_raters: u64,
    pub platform_b_raters: u64,
}

impl CombinedRecord {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::classify(self.average_score)
    }
}

/// Histogram bin over `finalScore`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBin {
    pub band: ScoreBand,
    pub range: &'static str,
    pub count: usize,
    pub downloads: u64,
}

/// Share of one star level across a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarShare {
    pub level: u8,
    pub count: u64,
    pub percent: f64,
}

/// Leaderboard row for the top-N charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedEntry {
    pub name: String,
    pub app_label: String,
    pub final_score: f64,
    pub average_rating: f64,
    /// `average_rating` on the 0-100 scale of the composite scores.
    pub rating_scaled: f64,
    pub five_star_percent: f64,
}
