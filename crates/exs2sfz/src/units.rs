//! Unit conversions shared by the importers and the exporter.

/// Floor used for silence when converting gains to decibels.
pub const MINUS_INFINITY_DB: f64 = -100.0;

/// Ceiling applied to gains that are already written in decibels.
pub const MAX_GAIN_DB: f64 = 24.0;

/// Convert a linear gain to decibels.
///
/// Zero and negative gains map to [`MINUS_INFINITY_DB`], and so does anything
/// quieter than it.
pub fn gain_to_db(gain: f64) -> f64 {
    if gain > 0.0 {
        (20.0 * gain.log10()).max(MINUS_INFINITY_DB)
    } else {
        MINUS_INFINITY_DB
    }
}

/// Interpret a stored gain string as decibels.
///
/// Strings carrying a `dB` suffix (`"-6dB"`) are read as decibels and clamped
/// to `[-100, 24]`. Anything else is a linear gain (`"0.5"`).
pub fn linear_or_db_to_db(input: &str) -> f64 {
    match input.find("dB") {
        Some(pos) => parse_leading_f64(&input[..pos]).clamp(MINUS_INFINITY_DB, MAX_GAIN_DB),
        None => gain_to_db(parse_leading_f64(input)),
    }
}

/// Format a decibel value as stored on preset tree nodes (`"<v>dB"`).
pub fn db_string<T: std::fmt::Display>(db: T) -> String {
    format!("{}dB", db)
}

/// Combine EXS24 coarse (semitones) and fine (cents) tuning into semitones.
pub fn exs_tuning(coarse: i32, fine: i32) -> f64 {
    coarse as f64 + fine as f64 / 100.0
}

/// SFZ `tune` (cents) to a semitone offset.
pub fn tune_to_tuning(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Semitone offset back to SFZ `tune` cents.
pub fn tuning_to_tune(tuning: f64) -> i64 {
    (tuning * 100.0).round() as i64
}

/// SFZ `amp_veltrack` percentage to a fraction.
pub fn velocity_track_fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// Fraction back to an `amp_veltrack` percentage.
///
/// Only fractions in `[0, 1)` produce a value; full tracking is the SFZ
/// default and out-of-range fractions have no SFZ equivalent.
pub fn velocity_track_percent(fraction: f64) -> Option<i64> {
    if (0.0..1.0).contains(&fraction) {
        Some((fraction * 100.0).round() as i64)
    } else {
        None
    }
}

/// Length of the longest prefix of `s` that reads as a decimal number.
fn numeric_prefix_len(s: &str, allow_fraction: bool) -> usize {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if allow_fraction && end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > end + 1 || has_digits {
            has_digits |= frac_end > end + 1;
            end = frac_end;
        }
    }
    if !has_digits {
        return 0;
    }
    if allow_fraction && end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-') | Some(b'+')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    end
}

/// Best-effort float parse: reads the numeric prefix, `0.0` when there is none.
pub fn parse_leading_f64(s: &str) -> f64 {
    let s = s.trim_start();
    let len = numeric_prefix_len(s, true);
    s[..len].parse().unwrap_or(0.0)
}

/// Best-effort integer parse: reads the integer prefix, `0` when there is none.
pub fn parse_leading_i64(s: &str) -> i64 {
    let s = s.trim_start();
    let len = numeric_prefix_len(s, false);
    s[..len].parse().unwrap_or(0)
}

/// Format with at most `places` decimals, trimming trailing zeros.
pub fn format_decimal(value: f64, places: usize) -> String {
    let formatted = format!("{:.*}", places, value);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
