//! Active-index derivation.
//!
//! Rounding uses [`f64::round`]: ties go away from zero, so an offset of
//! exactly one and a half cards selects the later card.

/// Index of the card currently centered, or `None` when there is nothing to select.
///
/// The rounded value is clamped to the list bounds so momentum overshoot past
/// either end still names a real card.
pub fn active_index(scroll_x: f64, card_width: f64, item_count: usize) -> Option<usize> {
    if item_count == 0 || !(card_width.is_finite() && card_width > 0.0) || !scroll_x.is_finite() {
        return None;
    }

    let raw = (scroll_x / card_width).round();
    let last = (item_count - 1) as f64;
    Some(raw.clamp(0.0, last) as usize)
}
