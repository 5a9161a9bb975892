//! # Snap Scroller
//!
//! Horizontal scroll physics for the carousel. A release decelerates quickly
//! and then eases onto the nearest multiple of the card width, so the offset
//! at rest always centers exactly one card.
//!
//! Phases:
//!
//! ```text
//! Idle ──begin_drag──▶ Dragging ──release──▶ Decelerating ──slow──▶ Snapping ──▶ Idle
//!                                    └────────────(slow / out of bounds)──────────┘
//! ```

use super::easing::ease_out_cubic;
use super::index::active_index;
use std::time::{Duration, Instant};

/// Per-millisecond velocity retention after release ("fast" deceleration).
const DECELERATION_PER_MS: f64 = 0.99;

/// Below this speed (card widths per second) momentum hands over to the snap.
const SNAP_SPEED_CARDS: f64 = 1.5;

/// Duration of the final ease onto a card boundary, in seconds.
const SNAP_DURATION: f64 = 0.3;

/// Only pointer samples this recent count towards release velocity.
const SAMPLE_WINDOW: Duration = Duration::from_millis(100);

/// Resistance applied when dragging past either end.
const RUBBER_BAND: f64 = 0.55;

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Dragging {
        pointer_start: f64,
        offset_start: f64,
        samples: Vec<(f64, Instant)>,
    },
    Decelerating {
        velocity: f64,
    },
    Snapping {
        from: f64,
        to: f64,
        elapsed: f64,
    },
}

#[derive(Debug, Clone)]
pub struct SnapScroller {
    offset: f64,
    interval: f64,
    item_count: usize,
    phase: Phase,
    /// Card to restore when the width comes back from zero.
    resting_index: usize,
}

impl SnapScroller {
    pub fn new(interval: f64, item_count: usize) -> Self {
        Self {
            offset: 0.0,
            interval: interval.max(0.0),
            item_count,
            phase: Phase::Idle,
            resting_index: 0,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Largest resting offset: the last card centered.
    pub fn max_offset(&self) -> f64 {
        self.item_count.saturating_sub(1) as f64 * self.interval
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Card the scroller is heading to: the snap target while snapping,
    /// otherwise the nearest card.
    pub fn target_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Snapping { to, .. } => active_index(to, self.interval, self.item_count),
            _ => active_index(self.offset, self.interval, self.item_count),
        }
    }

    pub fn begin_drag(&mut self, pointer_x: f64, at: Instant) {
        self.phase = Phase::Dragging {
            pointer_start: pointer_x,
            offset_start: self.offset,
            samples: vec![(pointer_x, at)],
        };
    }

    /// Follow the pointer. Dragging left scrolls forward through the list.
    pub fn drag_to(&mut self, pointer_x: f64, at: Instant) -> bool {
        let before = self.offset;
        let max = self.max_offset();
        let dimension = self.interval.max(1.0);

        let Phase::Dragging {
            pointer_start,
            offset_start,
            samples,
        } = &mut self.phase
        else {
            return false;
        };

        let raw = *offset_start + (*pointer_start - pointer_x);
        self.offset = if raw < 0.0 {
            -rubber_band(-raw, dimension)
        } else if raw > max {
            max + rubber_band(raw - max, dimension)
        } else {
            raw
        };

        samples.push((pointer_x, at));
        samples.retain(|(_, t)| at.saturating_duration_since(*t) <= SAMPLE_WINDOW);

        self.offset != before
    }

    /// Let go of the pointer and hand over to momentum or the snap.
    pub fn release(&mut self, at: Instant) {
        let Phase::Dragging { samples, .. } = &self.phase else {
            return;
        };
        let velocity = release_velocity(samples, at);

        if self.offset < 0.0 || self.offset > self.max_offset() {
            self.snap_to_nearest();
        } else if velocity.abs() > self.snap_speed() {
            self.phase = Phase::Decelerating { velocity };
        } else {
            self.snap_to_nearest();
        }
    }

    /// Animate by `delta` cards from the current target.
    pub fn step(&mut self, delta: isize) {
        let Some(current) = self.target_index() else {
            return;
        };
        let target = current.saturating_add_signed(delta);
        self.jump_to(target);
    }

    /// Animate to card `index` (clamped to the list).
    pub fn jump_to(&mut self, index: usize) {
        if self.item_count == 0 {
            return;
        }
        let index = index.min(self.item_count - 1);
        if self.interval == 0.0 {
            self.resting_index = index;
        }
        self.start_snap(index as f64 * self.interval);
    }

    /// Change the card width, keeping the same card centered. A zero width
    /// parks the offset at 0 but remembers the card.
    pub fn set_interval(&mut self, interval: f64) {
        let interval = interval.max(0.0);
        if interval == self.interval {
            return;
        }
        let index = self.target_index().unwrap_or(self.resting_index);
        self.resting_index = index;
        self.interval = interval;
        self.offset = index as f64 * interval;
        self.phase = Phase::Idle;
    }

    /// Advance animations by `dt` seconds. Returns whether the offset moved.
    pub fn tick(&mut self, dt: f64) -> bool {
        let before = self.offset;
        let dt = dt.max(0.0);

        match self.phase {
            Phase::Idle | Phase::Dragging { .. } => {}
            Phase::Decelerating { velocity } => {
                let velocity = velocity * DECELERATION_PER_MS.powf(dt * 1000.0);
                self.offset += velocity * dt;

                let max = self.max_offset();
                if self.offset <= 0.0 || self.offset >= max {
                    self.offset = self.offset.clamp(0.0, max);
                    self.snap_to_nearest();
                } else if velocity.abs() < self.snap_speed() {
                    self.snap_to_nearest();
                } else {
                    self.phase = Phase::Decelerating { velocity };
                }
            }
            Phase::Snapping { from, to, elapsed } => {
                let elapsed = elapsed + dt;
                let t = (elapsed / SNAP_DURATION).min(1.0);
                if t >= 1.0 {
                    self.offset = to;
                    self.phase = Phase::Idle;
                } else {
                    self.offset = from + (to - from) * ease_out_cubic(t);
                    self.phase = Phase::Snapping { from, to, elapsed };
                }
            }
        }

        self.offset != before
    }

    fn snap_speed(&self) -> f64 {
        self.interval * SNAP_SPEED_CARDS
    }

    fn snap_to_nearest(&mut self) {
        let index = active_index(self.offset, self.interval, self.item_count).unwrap_or(0);
        self.start_snap(index as f64 * self.interval);
    }

    fn start_snap(&mut self, to: f64) {
        if self.offset == to {
            self.phase = Phase::Idle;
        } else {
            self.phase = Phase::Snapping {
                from: self.offset,
                to,
                elapsed: 0.0,
            };
        }
    }
}

/// Content velocity in columns per second. Pointer motion is inverted:
/// moving the pointer left advances the content.
fn release_velocity(samples: &[(f64, Instant)], at: Instant) -> f64 {
    let recent: Vec<&(f64, Instant)> = samples
        .iter()
        .filter(|(_, t)| at.saturating_duration_since(*t) <= SAMPLE_WINDOW)
        .collect();

    let (Some(first), Some(last)) = (recent.first(), recent.last()) else {
        return 0.0;
    };
    let dt = last.1.saturating_duration_since(first.1).as_secs_f64();
    if dt < 0.001 {
        return 0.0;
    }
    (first.0 - last.0) / dt
}

fn rubber_band(overshoot: f64, dimension: f64) -> f64 {
    (1.0 - 1.0 / (overshoot * RUBBER_BAND / dimension + 1.0)) * dimension
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: f64 = 56.0;
    const FRAME: f64 = 1.0 / 60.0;

    fn settle(scroller: &mut SnapScroller) {
        for _ in 0..600 {
            scroller.tick(FRAME);
            if scroller.is_settled() {
                return;
            }
        }
        panic!("scroller never settled");
    }

    fn assert_on_boundary(scroller: &SnapScroller) {
        let cards = scroller.offset() / scroller.interval();
        assert_eq!(cards, cards.round(), "offset {} not aligned", scroller.offset());
    }

    #[test]
    fn test_slow_drag_snaps_back_to_nearest() {
        let mut s = SnapScroller::new(CARD, 3);
        let t0 = Instant::now();
        s.begin_drag(100.0, t0);
        s.drag_to(90.0, t0 + Duration::from_millis(200));
        // Held still long enough that the sample window forgets the motion.
        s.release(t0 + Duration::from_millis(500));
        settle(&mut s);
        assert_eq!(s.offset(), 0.0);
    }

    #[test]
    fn test_drag_past_half_card_snaps_forward() {
        let mut s = SnapScroller::new(CARD, 3);
        let t0 = Instant::now();
        s.begin_drag(100.0, t0);
        s.drag_to(100.0 - CARD * 0.7, t0 + Duration::from_millis(300));
        s.release(t0 + Duration::from_millis(600));
        settle(&mut s);
        assert_eq!(s.offset(), CARD);
        assert_eq!(s.target_index(), Some(1));
    }

    #[test]
    fn test_fling_decelerates_then_snaps() {
        let mut s = SnapScroller::new(CARD, 3);
        let t0 = Instant::now();
        s.begin_drag(100.0, t0);
        s.drag_to(80.0, t0 + Duration::from_millis(40));
        s.release(t0 + Duration::from_millis(40));
        assert!(!s.is_settled());
        settle(&mut s);
        assert_on_boundary(&s);
        assert!(s.offset() > 0.0);
        assert!(s.offset() <= s.max_offset());
    }

    #[test]
    fn test_overscroll_is_rubber_banded_and_returns() {
        let mut s = SnapScroller::new(CARD, 3);
        let t0 = Instant::now();
        s.begin_drag(10.0, t0);
        s.drag_to(10.0 + CARD, t0 + Duration::from_millis(50));
        assert!(s.offset() < 0.0);
        assert!(s.offset() > -CARD, "rubber band should resist the drag");
        s.release(t0 + Duration::from_millis(60));
        settle(&mut s);
        assert_eq!(s.offset(), 0.0);
    }

    #[test]
    fn test_step_and_jump() {
        let mut s = SnapScroller::new(CARD, 3);
        s.step(1);
        settle(&mut s);
        assert_eq!(s.offset(), CARD);

        s.step(5);
        settle(&mut s);
        assert_eq!(s.offset(), 2.0 * CARD);

        s.step(-10);
        settle(&mut s);
        assert_eq!(s.offset(), 0.0);

        s.jump_to(2);
        settle(&mut s);
        assert_eq!(s.offset(), 2.0 * CARD);
    }

    #[test]
    fn test_consecutive_steps_accumulate_while_snapping() {
        let mut s = SnapScroller::new(CARD, 3);
        s.step(1);
        s.tick(FRAME);
        s.step(1);
        settle(&mut s);
        assert_eq!(s.target_index(), Some(2));
    }

    #[test]
    fn test_resize_keeps_card_centered() {
        let mut s = SnapScroller::new(CARD, 3);
        s.jump_to(1);
        settle(&mut s);
        s.set_interval(70.0);
        assert_eq!(s.offset(), 70.0);
        assert!(s.is_settled());
    }

    #[test]
    fn test_zero_width_remembers_centered_card() {
        let mut s = SnapScroller::new(CARD, 3);
        s.jump_to(2);
        settle(&mut s);

        s.set_interval(0.0);
        assert_eq!(s.offset(), 0.0);
        assert_eq!(s.target_index(), None);

        s.set_interval(CARD);
        assert_eq!(s.offset(), 2.0 * CARD);
        assert_eq!(s.target_index(), Some(2));
    }

    #[test]
    fn test_jump_while_zero_width_applies_after_resize() {
        let mut s = SnapScroller::new(0.0, 3);
        s.jump_to(1);
        s.set_interval(CARD);
        assert_eq!(s.offset(), CARD);
    }

    #[test]
    fn test_empty_list_stays_put() {
        let mut s = SnapScroller::new(CARD, 0);
        s.step(1);
        s.jump_to(3);
        assert!(!s.tick(FRAME));
        assert_eq!(s.offset(), 0.0);
        assert_eq!(s.target_index(), None);

        let t0 = Instant::now();
        s.begin_drag(50.0, t0);
        s.drag_to(20.0, t0 + Duration::from_millis(30));
        s.release(t0 + Duration::from_millis(30));
        settle(&mut s);
        assert_eq!(s.offset(), 0.0);
    }
}
