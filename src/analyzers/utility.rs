/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sum of counts, saturating at `u64::MAX` instead of overflowing.
pub fn saturating_sum<I>(values: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    values.into_iter().fold(0, u64::saturating_add)
}

/// Index of the strictly greatest value; the first one wins on ties.
/// `None` entries are skipped.
pub fn argmax<I>(values: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .fold(None, |best, (i, v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn test_saturating_sum() {
        assert_eq!(saturating_sum([1, 2, 3]), 6);
        assert_eq!(saturating_sum([u64::MAX, 1]), u64::MAX);
        assert_eq!(saturating_sum(Vec::new()), 0);
    }

    #[test]
    fn test_argmax_first_wins_on_tie() {
        let values = vec![Some(3.0), Some(7.0), None, Some(7.0)];
        assert_eq!(argmax(values), Some((1, 7.0)));
    }

    #[test]
    fn test_argmax_skips_missing() {
        assert_eq!(argmax(vec![None, Some(-1.0)]), Some((1, -1.0)));
        assert_eq!(argmax(Vec::<Option<f64>>::new()), None);
        assert_eq!(argmax(vec![None, None]), None);
    }
}
