// SPDX-License-Identifier: GPL-3.0-only

//! Key colour rules.
//!
//! A key is either *empty* (no colour assigned) or *used*. Its border and
//! label stroke follow from that state alone:
//!
//! - empty: fill `#000`, border and label stroke `#404040`
//! - used: the assigned fill, border `#808080`, label stroke white or black
//!   depending on the fill's luminance
//!
//! Both `#000` and `#000000` are the empty sentinel.

use crate::app_settings::{
    DARK_TEXT_STROKE, EMPTY_KEY_BORDER, EMPTY_KEY_FILL, LIGHT_TEXT_STROKE, LUMINANCE_THRESHOLD,
    USED_KEY_BORDER,
};

/// Returns true for the colour values that mean "no colour assigned".
#[must_use]
pub fn is_empty_sentinel(color: &str) -> bool {
    matches!(color.trim(), "#000" | "#000000")
}

/// Relative luminance of an RGB colour on the 0-255 scale, times 1000.
///
/// `L = 0.299R + 0.587G + 0.114B`. Integer weights keep the comparison
/// against the threshold exact: grey `(128, 128, 128)` has a luminance of
/// exactly 128 and therefore counts as light.
#[must_use]
pub fn luminance_milli(r: u8, g: u8, b: u8) -> u32 {
    299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)
}

/// Returns the label stroke that contrasts with `color`.
///
/// Colours `csscolorparser` cannot read are treated as dark.
#[must_use]
pub fn text_stroke_for(color: &str) -> &'static str {
    match csscolorparser::parse(color.trim()) {
        Ok(parsed) => {
            let [r, g, b, _] = parsed.to_rgba8();
            if luminance_milli(r, g, b) < LUMINANCE_THRESHOLD * 1000 {
                LIGHT_TEXT_STROKE
            } else {
                DARK_TEXT_STROKE
            }
        }
        Err(e) => {
            tracing::debug!("Cannot read colour '{}' for contrast: {}", color, e);
            LIGHT_TEXT_STROKE
        }
    }
}

/// Visual state applied to the shapes and labels of one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStyle {
    /// Fill of the key shapes
    pub fill: String,
    /// Stroke of the key shapes
    pub border: &'static str,
    /// Stroke of the key labels
    pub text_stroke: &'static str,
}

impl KeyStyle {
    /// The style of a key with no colour assigned.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            fill: EMPTY_KEY_FILL.to_string(),
            border: EMPTY_KEY_BORDER,
            text_stroke: EMPTY_KEY_BORDER,
        }
    }

    /// The style of a key showing `color`.
    #[must_use]
    pub fn for_color(color: &str) -> Self {
        if is_empty_sentinel(color) {
            return Self::empty();
        }
        Self {
            fill: color.trim().to_string(),
            border: USED_KEY_BORDER,
            text_stroke: text_stroke_for(color),
        }
    }

    /// Returns true if this is the empty style.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_empty_sentinel(&self.fill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_forms_are_equivalent() {
        assert!(is_empty_sentinel("#000"));
        assert!(is_empty_sentinel("#000000"));
        assert!(!is_empty_sentinel("#000001"));
        assert_eq!(KeyStyle::for_color("#000"), KeyStyle::for_color("#000000"));
        assert_eq!(KeyStyle::for_color("#000"), KeyStyle::empty());
    }

    #[test]
    fn test_black_fill_gets_white_text() {
        // Not the sentinel, but the same colour written another way.
        assert_eq!(text_stroke_for("rgb(0, 0, 0)"), LIGHT_TEXT_STROKE);
    }

    #[test]
    fn test_white_fill_gets_black_text() {
        assert_eq!(text_stroke_for("#ffffff"), DARK_TEXT_STROKE);
        assert_eq!(text_stroke_for("#fff"), DARK_TEXT_STROKE);
    }

    #[test]
    fn test_luminance_boundary() {
        assert_eq!(luminance_milli(128, 128, 128), 128_000);
        assert_eq!(text_stroke_for("#808080"), DARK_TEXT_STROKE);
        assert_eq!(text_stroke_for("#7f7f7f"), LIGHT_TEXT_STROKE);
    }

    #[test]
    fn test_channel_weights() {
        // Pure green is light, pure blue and pure red are dark.
        assert_eq!(text_stroke_for("#00ff00"), DARK_TEXT_STROKE);
        assert_eq!(text_stroke_for("#0000ff"), LIGHT_TEXT_STROKE);
        assert_eq!(text_stroke_for("#ff0000"), LIGHT_TEXT_STROKE);
    }

    #[test]
    fn test_used_style() {
        let style = KeyStyle::for_color("#ffff00");
        assert_eq!(style.fill, "#ffff00");
        assert_eq!(style.border, USED_KEY_BORDER);
        assert_eq!(style.text_stroke, DARK_TEXT_STROKE);
        assert!(!style.is_empty());
    }

    #[test]
    fn test_unreadable_colour_is_treated_as_dark() {
        let style = KeyStyle::for_color("not-a-colour");
        assert_eq!(style.fill, "not-a-colour");
        assert_eq!(style.text_stroke, LIGHT_TEXT_STROKE);
    }
}
