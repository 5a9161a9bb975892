//! # Motion Thread
//!
//! The carousel's scroll physics run on a dedicated thread that ticks at the
//! frame cadence. It is the only writer of the scroll-position signal. After
//! every scroll event it derives the active index and posts it to the UI
//! thread over a `watch` channel: rapid changes coalesce, and the receiver
//! always sees the latest value.
//!
//! ```text
//!  UI thread ──Gesture (mpsc)──▶ motion thread ──f64 (atomic)──▶ card transforms
//!      ▲                              │
//!      └────active index (watch)──────┘
//! ```

use super::index::active_index;
use super::signal::{scroll_signal, ScrollReader, ScrollWriter};
use super::snap::SnapScroller;
use anyhow::{Context, Result};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Input forwarded from the UI thread to the motion thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Pointer pressed on the carousel at column `x`.
    Press { x: f64, at: Instant },
    /// Pointer dragged to column `x`.
    Move { x: f64, at: Instant },
    Release { at: Instant },
    /// Move by this many cards.
    Step(isize),
    /// Go to a specific card.
    Jump(usize),
    /// The carousel's card width changed (terminal resize).
    Resize { card_width: f64 },
}

/// Scroll state machine plus the writing end of the signal.
///
/// This is everything the motion thread does, minus the thread, so it can be
/// driven directly in tests.
#[derive(Debug)]
pub struct MotionDriver {
    scroller: SnapScroller,
    writer: ScrollWriter,
    index_tx: watch::Sender<Option<usize>>,
}

impl MotionDriver {
    /// Build a driver for `item_count` cards of `card_width` columns.
    ///
    /// Returns the driver, a reader for the scroll signal, and the receiving
    /// end of the active-index channel.
    pub fn new(
        card_width: f64,
        item_count: usize,
    ) -> (Self, ScrollReader, watch::Receiver<Option<usize>>) {
        let (writer, reader) = scroll_signal(0.0);
        let initial = active_index(0.0, card_width, item_count);
        let (index_tx, index_rx) = watch::channel(initial);
        let driver = Self {
            scroller: SnapScroller::new(card_width, item_count),
            writer,
            index_tx,
        };
        (driver, reader, index_rx)
    }

    pub fn offset(&self) -> f64 {
        self.scroller.offset()
    }

    pub fn is_settled(&self) -> bool {
        self.scroller.is_settled()
    }

    pub fn apply(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Press { x, at } => self.scroller.begin_drag(x, at),
            Gesture::Move { x, at } => {
                if self.scroller.drag_to(x, at) {
                    self.emit();
                }
            }
            Gesture::Release { at } => self.scroller.release(at),
            Gesture::Step(delta) => self.scroller.step(delta),
            Gesture::Jump(index) => self.scroller.jump_to(index),
            Gesture::Resize { card_width } => {
                self.scroller.set_interval(card_width);
                self.emit();
            }
        }
    }

    /// Advance physics by `dt` seconds, emitting a scroll event if the
    /// offset moved.
    pub fn tick(&mut self, dt: f64) {
        if self.scroller.tick(dt) {
            self.emit();
        }
    }

    /// One scroll event: publish the offset, then the derived index if it changed.
    fn emit(&mut self) {
        let offset = self.scroller.offset();
        self.writer.set(offset);

        let index = active_index(offset, self.scroller.interval(), self.scroller.item_count());
        self.index_tx.send_if_modified(|current| {
            if *current == index {
                false
            } else {
                *current = index;
                true
            }
        });
    }
}

/// Handle to the running motion thread. Dropping it stops the thread.
#[derive(Debug)]
pub struct MotionThread {
    gestures: Option<Sender<Gesture>>,
    handle: Option<JoinHandle<()>>,
}

impl MotionThread {
    /// Move `driver` onto its own thread, ticking every `frame`.
    pub fn spawn(mut driver: MotionDriver, frame: Duration) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let frame = frame.max(Duration::from_millis(1));

        let handle = std::thread::Builder::new()
            .name("drinkdeck-motion".to_string())
            .spawn(move || run(&mut driver, &rx, frame))
            .context("Failed to spawn motion thread")?;

        Ok(Self {
            gestures: Some(tx),
            handle: Some(handle),
        })
    }

    /// Forward a gesture. Returns `false` if the thread has already stopped.
    pub fn send(&self, gesture: Gesture) -> bool {
        self.gestures
            .as_ref()
            .is_some_and(|tx| tx.send(gesture).is_ok())
    }
}

impl Drop for MotionThread {
    fn drop(&mut self) {
        // Disconnecting the channel is the stop signal.
        self.gestures.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Motion thread panicked");
            }
        }
    }
}

fn run(driver: &mut MotionDriver, gestures: &Receiver<Gesture>, frame: Duration) {
    log::debug!("Motion thread started ({} ms frames)", frame.as_millis());
    let mut last = Instant::now();
    let mut deadline = last + frame;

    loop {
        // Sleep until the next frame unless input arrives first.
        let wait = deadline.saturating_duration_since(Instant::now());
        match gestures.recv_timeout(wait) {
            Ok(gesture) => {
                driver.apply(gesture);
                while let Ok(gesture) = gestures.try_recv() {
                    driver.apply(gesture);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        let now = Instant::now();
        if now >= deadline {
            driver.tick(now.duration_since(last).as_secs_f64());
            last = now;
            deadline = now + frame;
        }
    }

    log::debug!("Motion thread stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: f64 = 56.0;
    const FRAME: f64 = 1.0 / 60.0;

    fn settle(driver: &mut MotionDriver) {
        for _ in 0..600 {
            driver.tick(FRAME);
            if driver.is_settled() {
                return;
            }
        }
        panic!("driver never settled");
    }

    #[test]
    fn test_initial_index_is_first_card() {
        let (_driver, reader, rx) = MotionDriver::new(CARD, 3);
        assert_eq!(*rx.borrow(), Some(0));
        assert_eq!(reader.get(), 0.0);
    }

    #[test]
    fn test_initial_index_for_empty_list() {
        let (_driver, _reader, rx) = MotionDriver::new(CARD, 0);
        assert_eq!(*rx.borrow(), None);
    }

    #[test]
    fn test_step_publishes_offset_and_index() {
        let (mut driver, reader, mut rx) = MotionDriver::new(CARD, 3);
        driver.apply(Gesture::Step(1));
        settle(&mut driver);

        assert_eq!(reader.get(), CARD);
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(*rx.borrow_and_update(), Some(1));
    }

    #[test]
    fn test_index_changes_coalesce() {
        let (mut driver, _reader, mut rx) = MotionDriver::new(CARD, 3);
        driver.apply(Gesture::Jump(2));
        settle(&mut driver);

        // Passed through index 1 on the way; only the latest value is kept.
        assert_eq!(*rx.borrow_and_update(), Some(2));
        assert!(!rx.has_changed().expect("sender alive"));
    }

    #[test]
    fn test_unchanged_index_does_not_notify() {
        let (mut driver, reader, mut rx) = MotionDriver::new(CARD, 3);
        rx.borrow_and_update();

        let t0 = Instant::now();
        driver.apply(Gesture::Press { x: 100.0, at: t0 });
        driver.apply(Gesture::Move {
            x: 90.0,
            at: t0 + Duration::from_millis(200),
        });
        assert_eq!(reader.get(), 10.0);
        assert!(!rx.has_changed().expect("sender alive"));
    }

    #[test]
    fn test_resize_rescales_offset() {
        let (mut driver, reader, _rx) = MotionDriver::new(CARD, 3);
        driver.apply(Gesture::Jump(1));
        settle(&mut driver);
        driver.apply(Gesture::Resize { card_width: 70.0 });
        assert_eq!(reader.get(), 70.0);
    }

    #[test]
    fn test_thread_applies_gestures_and_stops_on_drop() {
        let (driver, reader, rx) = MotionDriver::new(CARD, 3);
        let thread = MotionThread::spawn(driver, Duration::from_millis(4)).expect("spawn");

        assert!(thread.send(Gesture::Jump(2)));
        let started = Instant::now();
        while reader.get() != 2.0 * CARD {
            assert!(
                started.elapsed() < Duration::from_secs(5),
                "motion thread did not settle"
            );
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(*rx.borrow(), Some(2));

        // Joins the thread; must not hang.
        drop(thread);
        assert!(rx.has_changed().is_err(), "sender should be gone");
    }
}
