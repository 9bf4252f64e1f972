//! Output formatting and export for engine results.
//!
//! Supports pretty-printing, JSON reports, and CSV export of ranked rows.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::Debug;
use std::fs::File;
use tracing::{debug, info};

use crate::record::{ApplicationRecord, Platform};

/// Envelope around a computed view, logged or written as JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<T> {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub data: T,
}

impl<T> Report<T> {
    pub fn new(data: T) -> Self {
        Report {
            generated_at: Utc::now(),
            platform: None,
            category: None,
            data,
        }
    }

    pub fn with_scope(mut self, platform: Platform, category: &str) -> Self {
        self.platform = Some(platform);
        self.category = Some(category.to_string());
        self
    }
}

/// Flat, ranked view of an [`ApplicationRecord`] for tabular export.
#[derive(Debug, Serialize)]
pub struct RankingRow {
    pub rank: usize,
    pub name: String,
    pub app_label: String,
    pub category: String,
    pub total_raters: u64,
    pub average_rating: Option<f64>,
    pub horizontal_score: Option<f64>,
    pub vertical_score_percent: Option<f64>,
    pub activity_score: Option<f64>,
    pub final_score: Option<f64>,
    pub last_month_downloads: u64,
    pub last_month_raters: u64,
    pub last_month_comments: u64,
}

impl RankingRow {
    /// Numbers rows from 1 in the order given.
    pub fn from_records(records: &[ApplicationRecord]) -> Vec<Self> {
        records
            .iter()
            .enumerate()
            .map(|(i, r)| RankingRow {
                rank: i + 1,
                name: r.name.clone(),
                app_label: r.display_label().to_string(),
                category: r.category.clone(),
                total_raters: r.total_raters,
                average_rating: r.average_rating,
                horizontal_score: r.horizontal_score,
                vertical_score_percent: r.vertical_score_percent,
                activity_score: r.activity_score,
                final_score: r.final_score,
                last_month_downloads: r.last_month_downloads,
                last_month_raters: r.last_month_raters,
                last_month_comments: r.last_month_comments,
            })
            .collect()
    }
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes rows to a CSV file with a header, replacing any existing file.
pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    debug!(path, rows = rows.len(), "Writing CSV export");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
