//! # Carousel Card Transform
//!
//! Every card derives its look from one number: how far it sits from the
//! center of the carousel, measured in card widths. The function is pure so
//! it can run on every frame without touching any other state.

use super::interpolate::{interpolate, Extrapolation};

/// Control points shared by every channel: one card left, centered, one card right.
const INPUT_RANGE: [f64; 3] = [-1.0, 0.0, 1.0];

const SCALE: [f64; 3] = [0.5, 1.1, 0.5];
const OPACITY: [f64; 3] = [0.5, 1.0, 0.5];

/// Horizontal and vertical offsets, as a fraction of the card width.
const SHIFT: f64 = 0.6;

/// Visual transform for one card, in the order it is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub scale: f64,
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl CardTransform {
    /// The transform of a card sitting exactly at the center.
    pub const CENTERED: Self = Self {
        scale: 1.1,
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Displacement on screen after composing `scale`, `translateX`,
    /// `translateY` in list order. Translations live in the scaled space, so
    /// they shrink along with the card.
    pub fn displacement(&self) -> (f64, f64) {
        (self.scale * self.translate_x, self.scale * self.translate_y)
    }
}

/// Normalized distance from the center: 0 when centered, ±1 one card away.
///
/// Returns `None` when the card width cannot be divided by.
pub fn normalized_position(index: usize, scroll_x: f64, card_width: f64) -> Option<f64> {
    if !(card_width.is_finite() && card_width > 0.0) {
        return None;
    }
    Some((scroll_x - index as f64 * card_width) / card_width)
}

/// Transform for the card at `index` given the current scroll offset.
pub fn card_transform(index: usize, scroll_x: f64, card_width: f64) -> CardTransform {
    match normalized_position(index, scroll_x, card_width) {
        Some(position) => transform_at(position, card_width),
        None => CardTransform::CENTERED,
    }
}

/// Transform for an already-normalized position.
pub fn transform_at(position: f64, card_width: f64) -> CardTransform {
    let shift = card_width * SHIFT;
    let clamp = Extrapolation::Clamp;

    CardTransform {
        scale: interpolate(position, &INPUT_RANGE, &SCALE, clamp),
        opacity: interpolate(position, &INPUT_RANGE, &OPACITY, clamp),
        translate_x: interpolate(position, &INPUT_RANGE, &[-shift, 0.0, shift], clamp),
        // Both neighbours rise; the vertical channel is not mirrored.
        translate_y: interpolate(position, &INPUT_RANGE, &[-shift, 0.0, -shift], clamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN_WIDTH: f64 = 100.0;
    const CARD_WIDTH: f64 = SCREEN_WIDTH * 0.7;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_centered_card_is_exact() {
        for index in 0..3 {
            let scroll = index as f64 * CARD_WIDTH;
            assert_eq!(
                card_transform(index, scroll, CARD_WIDTH),
                CardTransform::CENTERED
            );
        }
    }

    #[test]
    fn test_one_card_off_center() {
        // Card 0 while card 1 is centered: position = +1.
        let t = card_transform(0, CARD_WIDTH, CARD_WIDTH);
        assert_eq!(t.scale, 0.5);
        assert_eq!(t.opacity, 0.5);
        assert!(approx(t.translate_x, 0.6 * CARD_WIDTH));
        assert!(approx(t.translate_y, -0.6 * CARD_WIDTH));

        // Card 2 while card 1 is centered: position = -1.
        let t = card_transform(2, CARD_WIDTH, CARD_WIDTH);
        assert_eq!(t.scale, 0.5);
        assert_eq!(t.opacity, 0.5);
        assert!(approx(t.translate_x, -0.6 * CARD_WIDTH));
        assert!(approx(t.translate_y, -0.6 * CARD_WIDTH));
    }

    #[test]
    fn test_far_cards_saturate() {
        let near = transform_at(1.0, CARD_WIDTH);
        let far = transform_at(4.5, CARD_WIDTH);
        assert_eq!(near, far);

        let near = transform_at(-1.0, CARD_WIDTH);
        let far = transform_at(-12.0, CARD_WIDTH);
        assert_eq!(near, far);
    }

    #[test]
    fn test_halfway_is_between_endpoints() {
        let t = transform_at(0.5, CARD_WIDTH);
        assert!(approx(t.scale, 0.8));
        assert!(approx(t.opacity, 0.75));
        assert!(approx(t.translate_x, 0.3 * CARD_WIDTH));
        assert!(approx(t.translate_y, -0.3 * CARD_WIDTH));
    }

    #[test]
    fn test_zero_width_does_not_divide() {
        assert_eq!(normalized_position(1, 10.0, 0.0), None);
        assert_eq!(normalized_position(1, 10.0, f64::NAN), None);
        assert_eq!(card_transform(2, 10.0, 0.0), CardTransform::CENTERED);
    }

    #[test]
    fn test_displacement_scales_translation() {
        let t = transform_at(1.0, CARD_WIDTH);
        let (dx, dy) = t.displacement();
        assert!(approx(dx, 0.5 * 0.6 * CARD_WIDTH));
        assert!(approx(dy, -0.5 * 0.6 * CARD_WIDTH));
    }
}
