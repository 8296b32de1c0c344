//! Pure renderers turning backend responses into fragments.
//!
//! Number formatting is locale-independent: `.` as decimal separator, no grouping.

mod batch;
mod single;

pub use batch::render_batch;
pub use single::{SingleFragments, render_single};

use crate::dom::{Element, Node};

/// Server label with only its first character uppercased.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A `[0, 1]` ratio as a percentage with one fractional digit.
pub fn format_percent(ratio: f64) -> String {
    format!("{}%", to_fixed(ratio * 100.0, 1))
}

/// Compound score with three fractional digits; negative values keep their sign.
pub fn format_compound(score: f64) -> String {
    to_fixed(score, 3)
}

/// Fixed-point text with exact halves rounded away from zero, the way browsers format
/// with `toFixed`. `{:.N}` would round those halves to even.
fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    // Every finite f64 has a terminating expansion within 1074 fractional digits.
    let exact = format!("{:.1074}", value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut kept: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(digits))
        .collect();
    if fraction.as_bytes().get(digits).is_some_and(|digit| *digit >= b'5') {
        round_up(&mut kept);
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(kept[..split].iter().map(|digit| char::from(*digit)));
    if digits > 0 {
        out.push('.');
        out.extend(kept[split..].iter().map(|digit| char::from(*digit)));
    }
    out
}

fn round_up(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Inline style for a confidence bar fill.
pub fn bar_width_style(confidence: f64) -> String {
    format!("width: {}%", confidence * 100.0)
}

/// Placeholder shown while a request is in flight.
pub fn loading_marker(text: &str) -> Node {
    Element::div().class("loading").child(text).into()
}

/// Inline error shown in place of a result.
pub fn error_marker(message: &str) -> Node {
    Element::div()
        .class("error")
        .child(format!("Error: {message}"))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_touches_only_first_character() {
        assert_eq!(capitalize("positive"), "Positive");
        assert_eq!(capitalize("nEUTRAL"), "NEUTRAL");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("émotion"), "Émotion");
    }

    #[test]
    fn percentages_use_one_fractional_digit() {
        assert_eq!(format_percent(0.92), "92.0%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(0.12345), "12.3%");
    }

    #[test]
    fn compound_uses_three_fractional_digits_and_sign() {
        assert_eq!(format_compound(0.876), "0.876");
        assert_eq!(format_compound(-0.5), "-0.500");
        assert_eq!(format_compound(1.0), "1.000");
        assert_eq!(format_compound(-0.0001), "-0.000");
    }

    #[test]
    fn exact_halves_round_away_from_zero() {
        assert_eq!(format_compound(0.0625), "0.063");
        assert_eq!(format_compound(-0.5625), "-0.563");
        assert_eq!(format_compound(0.9995), "1.000");
        assert_eq!(format_percent(0.0625), "6.3%");
        assert_eq!(format_percent(0.99995), "100.0%");
        assert_eq!(to_fixed(9.5, 0), "10");
        assert_eq!(to_fixed(0.125, 2), "0.13");
    }

    #[test]
    fn bar_width_tracks_confidence() {
        assert_eq!(bar_width_style(0.92), "width: 92%");
        assert_eq!(bar_width_style(0.5), "width: 50%");
        assert_eq!(bar_width_style(1.0), "width: 100%");
    }

    #[test]
    fn markers_carry_their_classes() {
        let loading = loading_marker("Analyzing sentiment...");
        assert!(loading.as_element().unwrap().has_class("loading"));
        let error = error_marker("boom");
        assert!(error.as_element().unwrap().has_class("error"));
        assert_eq!(error.text_content(), "Error: boom");
    }
}
