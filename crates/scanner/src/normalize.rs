//! Value normalization applied to feed records before they are reported

use chrono::Utc;

/// Widen a single-precision value and round it to `precision` decimals,
/// half away from zero.
///
/// `8.3_f32` widens to `8.300000190734863`; rounding to two places yields the
/// double `8.3`.
#[must_use]
pub fn float_to_double_round(value: f32, precision: i32) -> f64 {
    let factor = 10_f64.powi(precision);
    (f64::from(value) * factor).round() / factor
}

/// Uppercase the first alphabetic character and lowercase everything else
#[must_use]
pub fn to_sentence_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut capitalized = false;

    for ch in value.chars() {
        if !capitalized && ch.is_alphabetic() {
            out.extend(ch.to_uppercase());
            capitalized = true;
        } else {
            out.extend(ch.to_lowercase());
        }
    }

    out
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`
#[must_use]
pub fn current_iso8601() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
