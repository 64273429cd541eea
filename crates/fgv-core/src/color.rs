#![forbid(unsafe_code)]

//! Gradient color tables.
//!
//! Nodes that do not supply explicit colors get one derived from their
//! weight relative to the root: the ratio indexes a fixed-size table with
//! `round(ratio * (len - 1))`. Hotter (heavier) nodes land on the
//! saturated end.

/// Fill colors, coolest to hottest.
pub const BACKGROUND_GRADIENT: [&str; 10] = [
    "#fff3e0", "#ffe0b2", "#ffcc80", "#ffb74d", "#ffa726", "#ff9800", "#fb8c00", "#f57c00",
    "#ef6c00", "#e65100",
];

/// Label colors paired with [`BACKGROUND_GRADIENT`]: dark text on the pale
/// end, light text once the fill gets saturated.
pub const TEXT_GRADIENT: [&str; 10] = [
    "#3e2723", "#3e2723", "#3e2723", "#4e342e", "#4e342e", "#4e342e", "#fbe9e7", "#fbe9e7",
    "#fff3ee", "#ffffff",
];

fn gradient_index(value: f64, max_value: f64, len: usize) -> usize {
    let ratio = (value / max_value).clamp(0.0, 1.0);
    (ratio * (len - 1) as f64).round() as usize
}

/// Fill color for a node of weight `value` under a root of weight `max_value`.
#[must_use]
pub fn background_color_for(value: f64, max_value: f64) -> &'static str {
    BACKGROUND_GRADIENT[gradient_index(value, max_value, BACKGROUND_GRADIENT.len())]
}

/// Label color for a node of weight `value` under a root of weight `max_value`.
#[must_use]
pub fn text_color_for(value: f64, max_value: f64) -> &'static str {
    TEXT_GRADIENT[gradient_index(value, max_value, TEXT_GRADIENT.len())]
}
