use crate::error::{EvalError, Result};
use crate::metrics::averaging::Averaging;
use crate::metrics::class_ap::AveragePrecisions;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Reduces per-class results to a single mAP using the requested averaging.
///
/// # Errors
/// `EvalError::NoAnnotations` when no class has a single annotation
/// (this includes an empty map).
pub fn mean_average_precision(aps: &AveragePrecisions, averaging: Averaging) -> Result<f64> {
    match averaging {
        Averaging::Unweighted => unweighted_mean_ap(aps),
        Averaging::Weighted   => weighted_mean_ap(aps),
    }
}

/// Arithmetic mean of AP over the classes with `num_annotations > 0`.
///
/// Unannotated classes are left out of both the sum and the count.
pub fn unweighted_mean_ap(aps: &AveragePrecisions) -> Result<f64> {
    let (sum, count) = aps.values()
        .filter(|c| c.is_annotated())
        .fold((0.0, 0usize), |(sum, count), c| (sum + c.average_precision, count + 1));

    if count == 0 {
        return Err(EvalError::NoAnnotations);
    }
    Ok(sum / count as f64)
}

/// `sum(AP_i * n_i) / sum(n_i)` over every class.
pub fn weighted_mean_ap(aps: &AveragePrecisions) -> Result<f64> {
    let total: usize = aps.values().map(|c| c.num_annotations).sum();
    if total == 0 {
        return Err(EvalError::NoAnnotations);
    }

    let weighted: f64 = aps.values()
        .map(|c| c.average_precision * c.num_annotations as f64)
        .sum();
    Ok(weighted / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::class_ap::ClassAp;

    fn aps(entries: &[(usize, f64, usize)]) -> AveragePrecisions {
        entries.iter()
            .map(|&(label, ap, n)| (label, ClassAp::new(ap, n)))
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn unannotated_class_is_excluded_from_unweighted_mean() {
        let results = aps(&[(0, 0.8, 10), (1, 0.4, 0)]);
        assert!(close(unweighted_mean_ap(&results).unwrap(), 0.8));
        assert!(close(weighted_mean_ap(&results).unwrap(), 0.8));
    }

    #[test]
    fn equal_counts_give_equal_means() {
        let results = aps(&[(0, 0.5, 5), (1, 0.3, 5)]);
        assert!(close(unweighted_mean_ap(&results).unwrap(), 0.4));
        assert!(close(weighted_mean_ap(&results).unwrap(), 0.4));
    }

    #[test]
    fn weighted_mean_follows_annotation_counts() {
        let results = aps(&[(0, 0.9, 30), (1, 0.1, 10), (2, 0.5, 0)]);
        // (0.9*30 + 0.1*10) / 40
        assert!(close(weighted_mean_ap(&results).unwrap(), 0.7));
        assert!(close(unweighted_mean_ap(&results).unwrap(), 0.5));
    }

    #[test]
    fn averaging_selects_the_reduction() {
        let results = aps(&[(0, 1.0, 1), (1, 0.0, 3)]);
        assert!(close(mean_average_precision(&results, Averaging::Unweighted).unwrap(), 0.5));
        assert!(close(mean_average_precision(&results, Averaging::Weighted).unwrap(), 0.25));
    }

    #[test]
    fn all_zero_annotations_is_an_error() {
        let results = aps(&[(0, 0.7, 0), (1, 0.2, 0)]);
        assert!(matches!(unweighted_mean_ap(&results), Err(EvalError::NoAnnotations)));
        assert!(matches!(weighted_mean_ap(&results), Err(EvalError::NoAnnotations)));
    }

    #[test]
    fn empty_map_is_an_error() {
        let results = AveragePrecisions::new();
        assert!(matches!(
            mean_average_precision(&results, Averaging::Unweighted),
            Err(EvalError::NoAnnotations)
        ));
    }
}
