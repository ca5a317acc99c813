/// Below this length a block is summed with eight interleaved accumulators
/// instead of being split further.
const BLOCK: usize = 128;
const LANES: usize = 8;

/// Pairwise (cascade) summation.
///
/// Short inputs are summed left to right, blocks up to 128 use eight
/// running lanes, longer inputs are split in half on a multiple of eight.
/// The fixed order makes means reproducible bit for bit across runs.
pub fn pairwise_sum(values: &[f64]) -> f64 {
    let n = values.len();

    if n < LANES {
        return values.iter().fold(0.0, |acc, v| acc + v);
    }

    if n <= BLOCK {
        let mut lanes = [0.0f64; LANES];
        lanes.copy_from_slice(&values[..LANES]);

        let unrolled_end = n - n % LANES;
        for chunk in values[LANES..unrolled_end].chunks_exact(LANES) {
            for (lane, v) in lanes.iter_mut().zip(chunk) {
                *lane += v;
            }
        }

        let mut res = ((lanes[0] + lanes[1]) + (lanes[2] + lanes[3]))
            + ((lanes[4] + lanes[5]) + (lanes[6] + lanes[7]));
        for v in &values[unrolled_end..] {
            res += v;
        }
        return res;
    }

    let mut half = n / 2;
    half -= half % LANES;
    pairwise_sum(&values[..half]) + pairwise_sum(&values[half..])
}

/// Arithmetic mean via [`pairwise_sum`]. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(pairwise_sum(values) / values.len() as f64)
}
