//! Score histograms, star-rating shares and leaderboards.

use crate::analyzers::grade::ScoreBand;
use crate::analyzers::sort::{RecordField, top_n};
use crate::analyzers::types::{RatedEntry, ScoreBin, StarShare};
use crate::record::{ApplicationRecord, RatingBuckets, Star, pct};

/// Buckets records by `finalScore` into the five [`ScoreBand`]s, highest
/// first. A missing score counts as 0.
pub fn histogram_by_score(catalog: &[ApplicationRecord]) -> Vec<ScoreBin> {
    let mut bins: Vec<ScoreBin> = ScoreBand::ALL
        .iter()
        .map(|band| ScoreBin {
            band: *band,
            range: band.label(),
            count: 0,
            downloads: 0,
        })
        .collect();

    for record in catalog {
        let band = ScoreBand::classify(record.final_score.unwrap_or(0.0));
        if let Some(bin) = bins.iter_mut().find(|b| b.band == band) {
            bin.count += 1;
            bin.downloads = bin.downloads.saturating_add(record.last_month_downloads);
        }
    }

    bins
}

/// Sums rating buckets across the catalog and reports each level's share,
/// five stars first. Shares are 0.0 when there are no ratings at all.
pub fn star_rating_proportions(catalog: &[ApplicationRecord]) -> Vec<StarShare> {
    let totals = catalog
        .iter()
        .fold(RatingBuckets::default(), |acc, r| acc.saturating_add(r.rating_buckets));
    let total = totals.total();

    Star::DESCENDING
        .iter()
        .map(|star| {
            let count = totals.get(*star);
            StarShare {
                level: star.level(),
                count,
                percent: pct(count, total),
            }
        })
        .collect()
}

fn rated_entry(record: &ApplicationRecord) -> RatedEntry {
    let average_rating = record.average_rating.unwrap_or(0.0);
    RatedEntry {
        name: record.name.clone(),
        app_label: record.display_label().to_string(),
        final_score: record.final_score.unwrap_or(0.0),
        average_rating,
        rating_scaled: average_rating * 20.0,
        five_star_percent: record.five_star_percent(),
    }
}

/// Top `n` records by average rating.
pub fn top_rated(catalog: &[ApplicationRecord], n: usize) -> Vec<RatedEntry> {
    top_n(catalog, RecordField::AverageRating, n)
        .iter()
        .map(rated_entry)
        .collect()
}

/// Top `n` records by final score.
pub fn top_scored(catalog: &[ApplicationRecord], n: usize) -> Vec<RatedEntry> {
    top_n(catalog, RecordField::FinalScore, n)
        .iter()
        .map(rated_entry)
        .collect()
}
