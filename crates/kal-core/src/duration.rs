//! Go duration text codec.
//!
//! The apiserver writes request latencies as Go `time.Duration` strings
//! (`5ms`, `1.503s`, `2m0.1s`). [`parse_duration`] accepts the same grammar
//! as Go's `time.ParseDuration` and [`format_duration`] renders the same
//! canonical form as `Duration.String()`. Both work in signed nanoseconds.

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_MIN: u64 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MIN;

/// Fraction digits beyond this cannot change a nanosecond result.
const MAX_FRACTION_DIGITS: u32 = 18;

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        // U+00B5 micro sign and U+03BC greek small letter mu
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(NANOS_PER_MIN),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Parse a Go duration string such as `300ms`, `-1.5h` or `2h45m`.
///
/// Returns `None` for anything Go would reject: empty input, a component
/// without digits or without a known unit, or a total outside `i64`
/// nanoseconds.
pub fn parse_duration(s: &str) -> Option<i64> {
    let (negative, mut rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if rest == "0" {
        return Some(0);
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let first = rest.as_bytes()[0];
        if first != b'.' && !first.is_ascii_digit() {
            return None;
        }

        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after_int) = rest.split_at(int_len);
        let whole: u128 = if int_digits.is_empty() { 0 } else { int_digits.parse().ok()? };

        let (frac_digits, after_frac) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let len = tail.bytes().take_while(u8::is_ascii_digit).count();
                tail.split_at(len)
            }
            None => ("", after_int),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return None;
        }

        let unit_len = after_frac
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_frac.len());
        if unit_len == 0 {
            return None;
        }
        let (unit, tail) = after_frac.split_at(unit_len);
        let scale = u128::from(unit_nanos(unit)?);

        total = total.checked_add(whole.checked_mul(scale)?)?;
        total = total.checked_add(fraction_nanos(frac_digits, scale))?;
        if total > u128::from(i64::MAX.unsigned_abs()) + 1 {
            return None;
        }
        rest = tail;
    }

    if negative {
        let magnitude = i128::try_from(total).ok()?;
        i64::try_from(-magnitude).ok()
    } else {
        i64::try_from(total).ok()
    }
}

/// `0.<digits>` of `scale`, truncated to whole nanoseconds.
fn fraction_nanos(digits: &str, scale: u128) -> u128 {
    let kept = &digits[..digits.len().min(MAX_FRACTION_DIGITS as usize)];
    if kept.is_empty() {
        return 0;
    }
    let value: u128 = kept.parse().unwrap_or(0);
    value * scale / 10u128.pow(kept.len() as u32)
}

/// Render nanoseconds the way Go's `Duration.String()` does.
pub fn format_duration(nanos: i64) -> String {
    if nanos == 0 {
        return "0s".to_string();
    }
    let magnitude = nanos.unsigned_abs();
    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }

    if magnitude < NANOS_PER_SEC {
        let (precision, unit) = if magnitude < NANOS_PER_MICRO {
            (0, "ns")
        } else if magnitude < NANOS_PER_MILLI {
            (3, "\u{b5}s")
        } else {
            (6, "ms")
        };
        out.push_str(&with_fraction(magnitude, precision));
        out.push_str(unit);
        return out;
    }

    let hours = magnitude / NANOS_PER_HOUR;
    let minutes = magnitude % NANOS_PER_HOUR / NANOS_PER_MIN;
    let seconds = magnitude % NANOS_PER_MIN;
    if hours > 0 {
        out.push_str(&format!("{hours}h{minutes}m"));
    } else if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&with_fraction(seconds, 9));
    out.push('s');
    out
}

/// `value / 10^precision` with trailing fraction zeros (and a bare point) removed.
fn with_fraction(value: u64, precision: u32) -> String {
    let scale = 10u64.pow(precision);
    let (whole, frac) = (value / scale, value % scale);
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:0width$}", width = precision as usize);
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
