/// Quantile level reported as `p95_latency`.
pub const P95: f64 = 0.95;

/// Linear-interpolation quantile over already-sorted samples.
///
/// For `n` values the fractional rank is `h = q * (n - 1)`; the result
/// interpolates between `sorted[floor(h)]` and `sorted[floor(h) + 1]`.
/// Returns `None` for an empty slice.
pub fn linear_quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;

    let rank = last as f64 * q;
    let lower = (rank.floor().max(0.0) as usize).min(last);
    let upper = (lower + 1).min(last);
    let gamma = rank - lower as f64;

    Some(lerp(sorted[lower], sorted[upper], gamma))
}

/// Interpolates from whichever endpoint is closer to `t`, which keeps
/// the result exact at both ends and monotonic in `t`.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// Sort a copy of `values` ascending.
pub fn sorted(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.into_iter().collect();
    out.sort_unstable_by(f64::total_cmp);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_quantile() {
        assert_eq!(linear_quantile(&[], P95), None);
    }

    #[test]
    fn single_value_is_its_own_quantile() {
        assert_eq!(linear_quantile(&[42.0], P95), Some(42.0));
        assert_eq!(linear_quantile(&[42.0], 0.0), Some(42.0));
    }

    #[test]
    fn endpoints_are_exact() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(linear_quantile(&v, 0.0), Some(1.0));
        assert_eq!(linear_quantile(&v, 1.0), Some(4.0));
        assert_eq!(linear_quantile(&v, 0.5), Some(2.5));
    }

    #[test]
    fn interpolates_between_neighbouring_ranks() {
        // h = 0.95 * 9 = 8.55 → 9 + 0.55 * (10 - 9)
        let v: Vec<f64> = (1..=10).map(f64::from).collect();
        let p = linear_quantile(&v, P95).unwrap();
        assert!((p - 9.55).abs() < 1e-12, "got {p}");
    }

    #[test]
    fn two_samples_land_near_the_upper_one() {
        let p = linear_quantile(&[100.0, 200.0], P95).unwrap();
        assert!((p - 195.0).abs() < 1e-9, "got {p}");
    }

    #[test]
    fn sorted_orders_ascending() {
        assert_eq!(sorted([3.0, -1.0, 2.5]), vec![-1.0, 2.5, 3.0]);
    }
}
