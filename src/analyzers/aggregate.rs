use crate::analyzers::types::SummaryStats;
use crate::analyzers::utility::{argmax, mean, saturating_sum};
use crate::record::ApplicationRecord;

/// Reduces a filtered catalog into a [`SummaryStats`].
///
/// Counts are summed with missing values as zero. Means and the top score
/// skip records whose value is missing, and every statistic falls back to
/// 0 (or an empty name) when nothing is left to reduce.
pub fn aggregate(catalog: &[ApplicationRecord]) -> SummaryStats {
    let ratings: Vec<f64> = catalog.iter().filter_map(|r| r.average_rating).collect();
    let finals: Vec<f64> = catalog.iter().filter_map(|r| r.final_score).collect();

    let top = argmax(catalog.iter().map(|r| r.final_score));

    SummaryStats {
        count: catalog.len(),
        total_raters: saturating_sum(catalog.iter().map(|r| r.total_raters)),
        total_downloads: saturating_sum(catalog.iter().map(|r| r.last_month_downloads)),
        average_rating: mean(&ratings),
        average_final_score: mean(&finals),
        top_final_score: top.map_or(0.0, |(_, score)| score),
        top_record_name: top
            .map(|(i, _)| catalog[i].name.clone())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        name: &str,
        final_score: Option<f64>,
        average_rating: Option<f64>,
    ) -> ApplicationRecord {
        ApplicationRecord {
            name: name.into(),
            final_score,
            average_rating,
            total_raters: 100,
            last_month_downloads: 1_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_aggregate_empty() {
        let stats = aggregate(&[]);

        assert_eq!(stats.count, 0);
        assert_eq!(stats.total_raters, 0);
        assert_eq!(stats.total_downloads, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.average_final_score, 0.0);
        assert_eq!(stats.top_final_score, 0.0);
        assert_eq!(stats.top_record_name, "");
    }

    #[test]
    fn test_aggregate_two_records() {
        let catalog = vec![
            record("ALIF", Some(96.31), Some(4.77)),
            record("APAY", Some(36.07), Some(3.64)),
        ];
        let stats = aggregate(&catalog);

        assert_eq!(stats.count, 2);
        assert_eq!(stats.total_raters, 200);
        assert_eq!(stats.total_downloads, 2_000);
        assert_eq!(stats.top_final_score, 96.31);
        assert_eq!(stats.top_record_name, "ALIF");
        assert!((stats.average_final_score - 66.19).abs() < 1e-9);
        assert!((stats.average_rating - 4.205).abs() < 1e-9);
    }

    #[test]
    fn test_first_record_wins_exact_tie() {
        let catalog = vec![
            record("low", Some(10.0), None),
            record("first", Some(80.0), None),
            record("second", Some(80.0), None),
        ];
        assert_eq!(aggregate(&catalog).top_record_name, "first");
    }

    #[test]
    fn test_missing_scores_excluded() {
        let catalog = vec![
            record("none", None, None),
            record("scored", Some(40.0), Some(4.0)),
        ];
        let stats = aggregate(&catalog);

        assert_eq!(stats.count, 2);
        assert_eq!(stats.average_final_score, 40.0);
        assert_eq!(stats.average_rating, 4.0);
        assert_eq!(stats.top_record_name, "scored");
    }

    #[test]
    fn test_all_scores_missing() {
        let catalog = vec![record("a", None, None), record("b", None, None)];
        let stats = aggregate(&catalog);

        assert_eq!(stats.top_final_score, 0.0);
        assert_eq!(stats.top_record_name, "");
        assert_eq!(stats.average_final_score, 0.0);
    }

    #[test]
    fn test_aggregate_counts_saturate() {
        let mut big = record("BIG", Some(50.0), None);
        big.total_raters = u64::MAX / 2 + 1;
        big.last_month_downloads = u64::MAX;
        let catalog = vec![big.clone(), big];

        let stats = aggregate(&catalog);

        assert_eq!(stats.total_raters, u64::MAX);
        assert_eq!(stats.total_downloads, u64::MAX);
    }
}
