pub mod percentiles;
pub mod rounding;
pub mod summation;

use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryRecord;

use percentiles::{linear_quantile, sorted, P95};
use rounding::round_half_even;
use summation::mean;

/// Decimal places for the two latency figures.
const LATENCY_DP: u32 = 2;
/// Decimal places for the uptime fraction.
const UPTIME_DP: u32 = 4;

/// Summary statistics for one region, built fresh on every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionMetrics {
    /// Mean latency (ms)
    pub avg_latency: f64,
    /// 95th-percentile latency (ms), linear interpolation
    pub p95_latency: f64,
    /// Mean uptime as a fraction in [0, 1]
    pub avg_uptime: f64,
    /// Samples strictly slower than the threshold
    pub breaches: u64,
}

/// Compute the four region statistics over `records`.
///
/// `records` must be non-empty; the dispatcher filters out unknown regions
/// before getting here. Missing (NaN) samples are skipped by the averages
/// and the percentile and never count as breaches; a column with no usable
/// sample yields NaN.
pub fn compute(records: &[TelemetryRecord], threshold_ms: i64) -> RegionMetrics {
    debug_assert!(!records.is_empty(), "compute() needs at least one record");

    let latencies = present(records.iter().map(|r| r.latency_ms));
    let uptimes = present(records.iter().map(|r| r.uptime_pct));

    let avg_latency = mean(&latencies).unwrap_or(f64::NAN);
    let p95_latency = linear_quantile(&sorted(latencies.iter().copied()), P95).unwrap_or(f64::NAN);
    let avg_uptime = mean(&uptimes).unwrap_or(f64::NAN) / 100.0;

    let threshold = threshold_ms as f64;
    let breaches = latencies.iter().filter(|&&l| l > threshold).count() as u64;

    RegionMetrics {
        avg_latency: round_half_even(avg_latency, LATENCY_DP),
        p95_latency: round_half_even(p95_latency, LATENCY_DP),
        avg_uptime: round_half_even(avg_uptime, UPTIME_DP),
        breaches,
    }
}

fn present(values: impl Iterator<Item = f64>) -> Vec<f64> {
    values.filter(|v| !v.is_nan()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn records(samples: &[(f64, f64)]) -> Vec<TelemetryRecord> {
        samples
            .iter()
            .map(|&(lat, up)| TelemetryRecord::new("us", lat, up))
            .collect()
    }

    fn random_records(rng: &mut StdRng, n: usize) -> Vec<TelemetryRecord> {
        (0..n)
            .map(|_| {
                TelemetryRecord::new(
                    "apac",
                    rng.gen_range(50.0..300.0),
                    rng.gen_range(95.0..=100.0),
                )
            })
            .collect()
    }

    #[test]
    fn two_sample_reference_case() {
        let m = compute(&records(&[(100.0, 99.5), (200.0, 99.0)]), 150);

        assert_eq!(
            m,
            RegionMetrics {
                avg_latency: 150.0,
                p95_latency: 195.0,
                avg_uptime: 0.9925,
                breaches: 1,
            }
        );
    }

    #[test]
    fn identical_latencies_collapse_mean_and_p95() {
        let recs = records(&[(123.456, 99.0); 7]);

        let m = compute(&recs, 200);
        assert_eq!(m.avg_latency, 123.46);
        assert_eq!(m.p95_latency, 123.46);
        assert_eq!(m.breaches, 0);

        assert_eq!(compute(&recs, 100).breaches, 7);
    }

    #[test]
    fn sample_equal_to_threshold_is_not_a_breach() {
        let m = compute(&records(&[(150.0, 100.0), (150.5, 100.0)]), 150);
        assert_eq!(m.breaches, 1);
    }

    #[test]
    fn mean_just_below_a_tie_rounds_down() {
        // 1.005 * 100.0 is 100.49999…, so no tie is seen after scaling.
        let m = compute(&records(&[(1.005, 100.0)]), 0);
        assert_eq!(m.avg_latency, 1.0);
        assert_eq!(m.p95_latency, 1.0);
    }

    #[test]
    fn exact_ties_after_scaling_round_to_even() {
        let m = compute(&records(&[(87.465, 93.62), (87.465, 93.03)]), 0);

        assert_eq!(m.avg_latency, 87.46);
        assert_eq!(m.p95_latency, 87.46);
        assert_eq!(m.avg_uptime, 0.9332);
    }

    #[test]
    fn missing_samples_are_skipped() {
        let m = compute(
            &records(&[(100.0, f64::NAN), (f64::NAN, 99.0), (200.0, 97.0)]),
            150,
        );

        assert_eq!(m.avg_latency, 150.0);
        assert_eq!(m.p95_latency, 195.0);
        assert_eq!(m.avg_uptime, 0.98);
        assert_eq!(m.breaches, 1);
    }

    #[test]
    fn all_missing_latencies_give_nan() {
        let m = compute(&records(&[(f64::NAN, 99.0)]), 0);

        assert!(m.avg_latency.is_nan());
        assert!(m.p95_latency.is_nan());
        assert_eq!(m.avg_uptime, 0.99);
        assert_eq!(m.breaches, 0);
    }

    #[test]
    fn uptime_is_a_fraction() {
        let m = compute(&records(&[(10.0, 97.12345), (20.0, 100.0)]), 0);
        assert_eq!(m.avg_uptime, 0.9856);
    }

    #[test]
    fn p95_interpolates_over_unsorted_input() {
        // sorted 10..=200 step 10 (20 values), h = 0.95 * 19 = 18.05
        let mut lats: Vec<(f64, f64)> = (1..=20).map(|i| (f64::from(i) * 10.0, 99.0)).collect();
        lats.reverse();

        let m = compute(&records(&lats), 0);
        assert_eq!(m.p95_latency, 190.5);
        assert_eq!(m.avg_latency, 105.0);
    }

    #[test]
    fn breaches_never_increase_with_threshold() {
        let mut rng = StdRng::seed_from_u64(7);
        let recs = random_records(&mut rng, 250);

        let mut last = u64::MAX;
        for threshold in (0..=350).step_by(5) {
            let b = compute(&recs, threshold).breaches;
            assert!(b <= last, "threshold {threshold}: {b} > {last}");
            last = b;
        }
        assert_eq!(compute(&recs, 0).breaches, 250);
        assert_eq!(last, 0);
    }

    #[test]
    fn uptime_fraction_stays_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [1, 3, 8, 64, 129, 500] {
            let m = compute(&random_records(&mut rng, n), 180);
            assert!((0.0..=1.0).contains(&m.avg_uptime), "n={n}: {}", m.avg_uptime);
            assert!(m.p95_latency >= 50.0 && m.p95_latency <= 300.0);
        }
    }

    #[test]
    fn serializes_with_dashboard_field_names() {
        let m = compute(&records(&[(100.0, 99.5), (200.0, 99.0)]), 150);
        let json = serde_json::to_value(m).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "avg_latency": 150.0,
                "p95_latency": 195.0,
                "avg_uptime": 0.9925,
                "breaches": 1
            })
        );
    }
}
