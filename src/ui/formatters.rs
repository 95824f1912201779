//! Shared formatting utilities for UI components.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::digitizer::Point;

/// Format a data value with smart precision.
pub fn format_value(val: f64) -> String {
    if !val.is_finite() {
        return if val.is_nan() {
            "NaN".to_string()
        } else if val.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-3..1e7).contains(&abs_val) {
        format!("{:.3e}", val)
    } else {
        let s = format!("{:.4}", val);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Format a value pair as `(x, y)`.
pub fn format_pair(p: Point) -> String {
    format!("({}, {})", format_value(p.x), format_value(p.y))
}

/// Truncate `s` to at most `width` terminal columns, marking the cut with `…`.
pub fn fit_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_drop_trailing_zeros() {
        assert_eq!(format_value(5.0), "5");
        assert_eq!(format_value(-0.25), "-0.25");
        assert_eq!(format_value(1.23456), "1.2346");
        assert_eq!(format_value(2.5e9), "2.500e9");
        assert_eq!(format_value(f64::NAN), "NaN");
    }

    #[test]
    fn fit_width_counts_columns() {
        assert_eq!(fit_width("Curve1", 10), "Curve1");
        assert_eq!(fit_width("Pressure drop", 6), "Press…");
        assert_eq!(fit_width("日本語", 5), "日本…");
    }
}
