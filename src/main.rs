//! CLI entry point for the payment-app rater.
//!
//! Loads per-platform catalogs and prints summary statistics, ranked tables,
//! the cross-platform view, and rating distributions.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use payapp_rater::analyzers::aggregate::aggregate;
use payapp_rater::analyzers::distribution::{
    histogram_by_score, star_rating_proportions, top_rated, top_scored,
};
use payapp_rater::analyzers::filter::{TextField, categories, filter_by_category, filter_by_text};
use payapp_rater::analyzers::merge::{CombinedField, merge};
use payapp_rater::analyzers::sort::{RecordField, SortDirection, SortState, sort};
use payapp_rater::analyzers::types::{RatedEntry, ScoreBin, StarShare};
use payapp_rater::{
    output::{RankingRow, Report, print_json, print_pretty, write_csv},
    parser::load_catalog,
    record::{ApplicationRecord, Platform},
};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "payapp_rater")]
#[command(
    about = "Rank payment-organization mobile apps on Google Play and the App Store",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CatalogArgs {
    /// Google Play catalog file (.json or .csv)
    #[arg(long, env = "GOOGLE_PLAY_CATALOG")]
    google_play: Option<PathBuf>,

    /// App Store catalog file (.json or .csv)
    #[arg(long, env = "APP_STORE_CATALOG")]
    app_store: Option<PathBuf>,
}

impl CatalogArgs {
    fn load(&self, platform: Platform) -> Result<Vec<ApplicationRecord>> {
        let path = match platform {
            Platform::GooglePlay => self.google_play.as_deref(),
            Platform::AppStore => self.app_store.as_deref(),
        }
        .with_context(|| format!("no catalog configured for {platform}"))?;

        Ok(load_catalog(path)?)
    }
}

#[derive(Args)]
struct Scope {
    /// Platform whose catalog is analyzed (google-play, app-store)
    #[arg(short, long, default_value = "google-play")]
    platform: Platform,

    /// Category to keep, or "all"
    #[arg(short, long, default_value = "all")]
    category: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline statistics for one platform
    Summary {
        #[command(flatten)]
        catalogs: CatalogArgs,

        #[command(flatten)]
        scope: Scope,
    },
    /// Filtered and sorted application table
    Rank {
        #[command(flatten)]
        catalogs: CatalogArgs,

        #[command(flatten)]
        scope: Scope,

        /// Case-insensitive text to search for
        #[arg(short, long, default_value = "")]
        search: String,

        /// Fields the search applies to
        #[arg(long, value_delimiter = ',', default_value = "name,category,app")]
        search_fields: Vec<TextField>,

        /// Field to sort by (e.g. name, finalScore, averageRating)
        #[arg(long, default_value = "name")]
        sort_by: RecordField,

        /// Sort direction; defaults to the field's natural direction
        #[arg(long)]
        order: Option<SortDirection>,

        /// Keep only the first N rows
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// CSV file to export the table to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Organizations present on both platforms with their averaged score
    Combined {
        #[command(flatten)]
        catalogs: CatalogArgs,

        /// Field to sort by (e.g. averageScore, name, googlePlayScore)
        #[arg(long, default_value = "averageScore")]
        sort_by: CombinedField,

        /// Sort direction; defaults to the field's natural direction
        #[arg(long)]
        order: Option<SortDirection>,

        /// CSV file to export the table to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Score histogram, star-rating shares and leaderboards
    Distribution {
        #[command(flatten)]
        catalogs: CatalogArgs,

        #[command(flatten)]
        scope: Scope,

        /// Size of the rating leaderboard
        #[arg(long, default_value_t = 5)]
        top_rated: usize,

        /// Size of the final-score leaderboard
        #[arg(long, default_value_t = 15)]
        top_scored: usize,
    },
    /// Categories available in a platform's catalog
    Categories {
        #[command(flatten)]
        catalogs: CatalogArgs,

        /// Platform whose catalog is listed
        #[arg(short, long, default_value = "google-play")]
        platform: Platform,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DistributionView {
    score_bins: Vec<ScoreBin>,
    star_shares: Vec<StarShare>,
    top_rated: Vec<RatedEntry>,
    top_scored: Vec<RatedEntry>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/payapp_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("payapp_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { catalogs, scope } => summary(&catalogs, &scope)?,
        Commands::Rank {
            catalogs,
            scope,
            search,
            search_fields,
            sort_by,
            order,
            top,
            output,
        } => {
            let mut state = SortState::new(sort_by);
            if let Some(order) = order {
                state.direction = order;
            }
            rank(&catalogs, &scope, &search, &search_fields, state, top, output.as_deref())?;
        }
        Commands::Combined {
            catalogs,
            sort_by,
            order,
            output,
        } => {
            let mut state = SortState::new(sort_by);
            if let Some(order) = order {
                state.direction = order;
            }
            combined(&catalogs, state, output.as_deref())?;
        }
        Commands::Distribution {
            catalogs,
            scope,
            top_rated,
            top_scored,
        } => distribution(&catalogs, &scope, top_rated, top_scored)?,
        Commands::Categories { catalogs, platform } => {
            let catalog = catalogs.load(platform)?;
            let list = categories(&catalog);
            info!(platform = %platform, count = list.len() - 1, "Categories");
            print_json(&Report::new(list))?;
        }
    }

    Ok(())
}

/// Loads the scoped platform's catalog and applies the category filter.
fn scoped(catalogs: &CatalogArgs, scope: &Scope) -> Result<Vec<ApplicationRecord>> {
    let catalog = catalogs.load(scope.platform)?;
    let filtered = filter_by_category(&catalog, &scope.category);
    info!(
        total = catalog.len(),
        selected = filtered.len(),
        "Catalog filtered by category"
    );
    Ok(filtered)
}

#[tracing::instrument(skip_all, fields(platform = %scope.platform, category = %scope.category))]
fn summary(catalogs: &CatalogArgs, scope: &Scope) -> Result<()> {
    let filtered = scoped(catalogs, scope)?;
    let stats = aggregate(&filtered);

    info!(
        count = stats.count,
        top = %stats.top_record_name,
        top_score = stats.top_final_score,
        "Summary computed"
    );
    print_json(&Report::new(stats).with_scope(scope.platform, &scope.category))
}

#[tracing::instrument(
    skip_all,
    fields(
        platform = %scope.platform,
        category = %scope.category,
        search = %search,
        sort = ?state.field,
        order = %state.direction
    )
)]
fn rank(
    catalogs: &CatalogArgs,
    scope: &Scope,
    search: &str,
    search_fields: &[TextField],
    state: SortState<RecordField>,
    top: Option<usize>,
    output: Option<&str>,
) -> Result<()> {
    let filtered = filter_by_text(&scoped(catalogs, scope)?, search, search_fields);
    let mut sorted = sort(&filtered, state.field, state.direction);
    if let Some(n) = top {
        sorted.truncate(n);
    }

    let rows = RankingRow::from_records(&sorted);
    print_pretty(&rows);
    if let Some(path) = output {
        write_csv(path, &rows)?;
        info!(path, rows = rows.len(), "Ranking exported");
    }
    print_json(&Report::new(sorted).with_scope(scope.platform, &scope.category))
}

#[tracing::instrument(skip_all, fields(sort = ?state.field, order = %state.direction))]
fn combined(
    catalogs: &CatalogArgs,
    state: SortState<CombinedField>,
    output: Option<&str>,
) -> Result<()> {
    let google_play = catalogs.load(Platform::GooglePlay)?;
    let app_store = catalogs.load(Platform::AppStore)?;

    let rows = sort(&merge(&google_play, &app_store), state.field, state.direction);
    info!(
        google_play = google_play.len(),
        app_store = app_store.len(),
        combined = rows.len(),
        leader = ?rows.first().map(|r| (r.name.as_str(), r.band())),
        "Catalogs merged"
    );

    if let Some(path) = output {
        write_csv(path, &rows)?;
        info!(path, rows = rows.len(), "Combined table exported");
    }
    print_json(&Report::new(rows))
}

#[tracing::instrument(skip_all, fields(platform = %scope.platform, category = %scope.category))]
fn distribution(catalogs: &CatalogArgs, scope: &Scope, rated: usize, scored: usize) -> Result<()> {
    let filtered = scoped(catalogs, scope)?;

    let view = DistributionView {
        score_bins: histogram_by_score(&filtered),
        star_shares: star_rating_proportions(&filtered),
        top_rated: top_rated(&filtered, rated),
        top_scored: top_scored(&filtered, scored),
    };
    print_json(&Report::new(view).with_scope(scope.platform, &scope.category))
}
