//! # Entrance Animations
//!
//! One-shot animations played when the main screen first mounts. Each one is
//! an independent timed task with its own delay and duration; none waits on
//! another, and none ever replays. Dropping [`MountedEntrances`] aborts any
//! task still running.

use super::easing::ease_in_out_quad;
use super::signal::SharedScalar;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// How an element arrives on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntranceKind {
    /// Slides down into place from above the top edge.
    SlideInUp,
    /// Slides up into place from below the bottom edge.
    SlideInDown,
    FadeIn,
}

/// Screen element an entrance animation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntranceTarget {
    Logo,
    DetailCard,
    Carousel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entrance {
    pub kind: EntranceKind,
    pub duration: Duration,
    pub delay: Duration,
}

impl Entrance {
    pub const fn new(kind: EntranceKind, duration: Duration, delay: Duration) -> Self {
        Self {
            kind,
            duration,
            delay,
        }
    }

    /// Eased progress `elapsed` after the delay has run out.
    pub fn progress_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let raw = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        ease_in_out_quad(raw.min(1.0))
    }
}

/// The three entrances of the promo screen.
pub const SCREEN_ENTRANCES: [(EntranceTarget, Entrance); 3] = [
    (
        EntranceTarget::Logo,
        Entrance::new(
            EntranceKind::SlideInUp,
            Duration::from_millis(1000),
            Duration::from_millis(300),
        ),
    ),
    (
        EntranceTarget::DetailCard,
        Entrance::new(
            EntranceKind::SlideInDown,
            Duration::from_millis(1000),
            Duration::from_millis(300),
        ),
    ),
    (
        EntranceTarget::Carousel,
        Entrance::new(
            EntranceKind::FadeIn,
            Duration::from_millis(1000),
            Duration::from_millis(1000),
        ),
    ),
];

/// Where an element should be drawn at a given progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    /// Fraction of the travel distance still to cover. Negative is above the
    /// resting place, positive below.
    pub shift: f64,
    pub opacity: f64,
}

impl Reveal {
    pub const SETTLED: Self = Self {
        shift: 0.0,
        opacity: 1.0,
    };

    pub fn at(kind: EntranceKind, progress: f64) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        match kind {
            EntranceKind::SlideInUp => Self {
                shift: -(1.0 - progress),
                opacity: 1.0,
            },
            EntranceKind::SlideInDown => Self {
                shift: 1.0 - progress,
                opacity: 1.0,
            },
            EntranceKind::FadeIn => Self {
                shift: 0.0,
                opacity: progress,
            },
        }
    }
}

struct Track {
    target: EntranceTarget,
    kind: EntranceKind,
    progress: Arc<SharedScalar>,
    task: Option<JoinHandle<()>>,
}

/// The running (or finished) entrance animations of one mount.
pub struct MountedEntrances {
    tracks: Vec<Track>,
}

impl MountedEntrances {
    /// Spawn one task per entrance. Must be called inside a tokio runtime.
    pub fn mount(plan: &[(EntranceTarget, Entrance)], frame: Duration) -> Self {
        let frame = frame.max(Duration::from_millis(1));
        let tracks = plan
            .iter()
            .map(|&(target, entrance)| {
                let progress = Arc::new(SharedScalar::new(0.0));
                let task = tokio::spawn(run_entrance(entrance, frame, Arc::clone(&progress)));
                Track {
                    target,
                    kind: entrance.kind,
                    progress,
                    task: Some(task),
                }
            })
            .collect();

        log::debug!("Mounted {} entrance animations", plan.len());
        Self { tracks }
    }

    /// Entrances already at their end state, for when animations are off.
    pub fn completed(plan: &[(EntranceTarget, Entrance)]) -> Self {
        let tracks = plan
            .iter()
            .map(|&(target, entrance)| Track {
                target,
                kind: entrance.kind,
                progress: Arc::new(SharedScalar::new(1.0)),
                task: None,
            })
            .collect();
        Self { tracks }
    }

    pub fn progress(&self, target: EntranceTarget) -> f64 {
        self.track(target).map_or(1.0, |t| t.progress.load())
    }

    pub fn reveal(&self, target: EntranceTarget) -> Reveal {
        self.track(target)
            .map_or(Reveal::SETTLED, |t| Reveal::at(t.kind, t.progress.load()))
    }

    pub fn is_finished(&self) -> bool {
        self.tracks.iter().all(|t| t.progress.load() >= 1.0)
    }

    fn track(&self, target: EntranceTarget) -> Option<&Track> {
        self.tracks.iter().find(|t| t.target == target)
    }
}

impl Drop for MountedEntrances {
    fn drop(&mut self) {
        for track in &mut self.tracks {
            if let Some(task) = track.task.take() {
                task.abort();
            }
        }
    }
}

impl std::fmt::Debug for MountedEntrances {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tracks.iter().map(|t| (t.target, t.progress.load())))
            .finish()
    }
}

async fn run_entrance(entrance: Entrance, frame: Duration, progress: Arc<SharedScalar>) {
    tokio::time::sleep(entrance.delay).await;

    let start = tokio::time::Instant::now();
    let mut ticker = tokio::time::interval(frame);
    loop {
        ticker.tick().await;
        let value = entrance.progress_at(start.elapsed());
        progress.store(value);
        if value >= 1.0 {
            break;
        }
    }
}
