/// Round `value` to `dp` decimal places, ties to even.
///
/// The value is scaled by `10^dp` in f64, rounded to the nearest integer
/// with ties going to even, then scaled back. A tie is judged on the scaled
/// product: `87.465 * 100.0` is exactly `8746.5` and lands on `87.46`, while
/// `1.005 * 100.0` is `100.49999…` and lands on `1.0`. Non-finite values
/// come back unchanged.
pub fn round_half_even(value: f64, dp: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let scale = 10f64.powi(dp as i32);
    (value * scale).round_ties_even() / scale
}
