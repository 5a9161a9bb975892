use crate::assets::{self, AssetError, FontSet, Lifecycle, Splash};
use crate::catalog::{Catalog, Product};
use crate::motion::{
    card_transform, CardTransform, EntranceTarget, Gesture, MountedEntrances, Reveal,
    ScrollReader, SCREEN_ENTRANCES,
};
use crate::ui::config::Config;
use crate::ui::input::{Action, HitRegions};
use crate::ui::pager::{DetailPager, ScrollCommand};
use crate::ui::render::{screen_layout, ScreenLayout};
use crate::ui::theme::Theme;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How long the button shows its pressed state.
const CTA_FEEDBACK: Duration = Duration::from_millis(150);

/// State of the promo screen, owned by the UI thread.
pub struct App {
    pub catalog: Catalog,
    pub config: Config,
    pub theme: Theme,
    pub lifecycle: Lifecycle,
    pub splash: Splash,
    pub fonts: FontSet,
    /// Latest active index received from the motion thread.
    pub active_index: Option<usize>,
    pub pager: DetailPager,
    /// Last scroll command issued to the pager.
    pub last_command: Option<ScrollCommand>,
    pub entrances: Option<MountedEntrances>,
    pub layout: ScreenLayout,
    pub cta_pressed_at: Option<Instant>,
    pub should_quit: bool,
    regions: HitRegions,
    scroll: ScrollReader,
    index_rx: watch::Receiver<Option<usize>>,
    pending_fonts: Option<JoinHandle<Result<FontSet, AssetError>>>,
    card_width: f64,
    last_tick: Instant,
}

impl App {
    pub fn new(
        catalog: Catalog,
        config: Config,
        theme: Theme,
        scroll: ScrollReader,
        index_rx: watch::Receiver<Option<usize>>,
    ) -> Self {
        let active_index = *index_rx.borrow();
        let pager = DetailPager::new(0.0, catalog.len());
        Self {
            catalog,
            config,
            theme,
            lifecycle: Lifecycle::Loading,
            splash: Splash::default(),
            fonts: FontSet::default(),
            active_index,
            pager,
            last_command: None,
            entrances: None,
            layout: ScreenLayout::default(),
            cta_pressed_at: None,
            should_quit: false,
            regions: HitRegions::default(),
            scroll,
            index_rx,
            pending_fonts: None,
            card_width: 0.0,
            last_tick: Instant::now(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    /// Kick off the typeface load. Must be called inside a tokio runtime.
    pub fn start_loading(&mut self) {
        if self.pending_fonts.is_none() && !self.is_ready() {
            self.pending_fonts = Some(assets::spawn_font_loader());
        }
    }

    /// Collect the typeface load if it has finished. Never blocks.
    ///
    /// A failed load is logged and the splash stays up.
    pub async fn poll_assets(&mut self) {
        let finished = self
            .pending_fonts
            .as_ref()
            .is_some_and(JoinHandle::is_finished);
        if !finished {
            return;
        }
        let Some(handle) = self.pending_fonts.take() else {
            return;
        };

        match handle.await {
            Ok(Ok(fonts)) => {
                self.on_fonts_loaded(fonts);
            }
            Ok(Err(e)) => log::error!("Failed to load typefaces, staying on splash: {e}"),
            Err(e) => log::error!("{}: {e}", AssetError::Interrupted),
        }
    }

    /// `Loading -> Ready`: hide the splash and mount the screen. Only the
    /// first call has any effect.
    ///
    /// Must be called inside a tokio runtime when `config.animations` is on.
    pub fn on_fonts_loaded(&mut self, fonts: FontSet) -> bool {
        if self.is_ready() {
            return false;
        }
        self.fonts = fonts;
        self.lifecycle = Lifecycle::Ready;
        if self.splash.release() {
            log::info!("Assets ready, splash released");
        }

        self.entrances = Some(if self.config.animations {
            MountedEntrances::mount(&SCREEN_ENTRANCES, self.config.frame_interval())
        } else {
            MountedEntrances::completed(&SCREEN_ENTRANCES)
        });

        self.sync_active_index();
        true
    }

    /// Pull the latest active index from the motion thread and mirror it in
    /// the detail pager. Returns the scroll command if one was issued.
    pub fn sync_active_index(&mut self) -> Option<ScrollCommand> {
        // An error means the motion thread is gone; keep the last index.
        if self.index_rx.has_changed().unwrap_or(false) {
            self.active_index = *self.index_rx.borrow_and_update();
        }
        if !self.is_ready() {
            return None;
        }

        let command = self.pager.show(self.active_index);
        if command.is_some() {
            self.last_command = command;
        }
        command
    }

    /// Per-frame update on the UI thread.
    pub fn tick(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;

        self.sync_active_index();
        if self.is_ready() {
            self.pager.tick(dt);
        }
    }

    /// Re-layout for a new terminal size. Returns the new card width if it
    /// changed, so the motion thread can be told.
    pub fn set_screen_size(&mut self, width: u16, height: u16) -> Option<f64> {
        self.layout = screen_layout(Rect::new(0, 0, width, height));
        self.regions = HitRegions {
            carousel: self.layout.carousel,
            button: self.layout.button,
        };
        self.pager
            .set_page_height(f64::from(self.layout.pager.height));

        let card_width = f64::from(width) * self.config.card_width_ratio;
        if card_width == self.card_width {
            return None;
        }
        self.card_width = card_width;
        Some(card_width)
    }

    /// Regions that currently take mouse presses. The button stays inert
    /// until the details card has finished sliding in.
    pub fn hit_regions(&self) -> HitRegions {
        let card_in_place = self
            .entrances
            .as_ref()
            .is_none_or(|e| e.reveal(EntranceTarget::DetailCard) == Reveal::SETTLED);
        if card_in_place {
            self.regions
        } else {
            HitRegions {
                button: Rect::default(),
                ..self.regions
            }
        }
    }

    pub fn card_width(&self) -> f64 {
        self.card_width
    }

    /// Current horizontal scroll offset.
    pub fn scroll_x(&self) -> f64 {
        self.scroll.get()
    }

    /// Transform of every card for the current scroll offset.
    pub fn card_transforms(&self) -> Vec<CardTransform> {
        let scroll_x = self.scroll_x();
        (0..self.catalog.len())
            .map(|i| card_transform(i, scroll_x, self.card_width))
            .collect()
    }

    pub fn current_product(&self) -> Option<&Product> {
        self.active_index.and_then(|i| self.catalog.get(i))
    }

    /// Activate "Get it". Only gives visual feedback.
    pub fn press_cta(&mut self, now: Instant) -> bool {
        if !self.is_ready() {
            return false;
        }
        match self.current_product() {
            Some(product) => log::info!("\"Get it\" pressed for {}", product.name),
            None => log::info!("\"Get it\" pressed with no drink selected"),
        }
        self.cta_pressed_at = Some(now);
        true
    }

    pub fn is_cta_pressed(&self, now: Instant) -> bool {
        self.cta_pressed_at
            .is_some_and(|at| now.saturating_duration_since(at) < CTA_FEEDBACK)
    }

    /// Apply an input action. Returns the gesture to forward to the motion
    /// thread, if any.
    pub fn handle_action(&mut self, action: Action, now: Instant) -> Option<Gesture> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::PressCta => {
                self.press_cta(now);
                None
            }
            Action::Resize { width, height } => self
                .set_screen_size(width, height)
                .map(|card_width| Gesture::Resize { card_width }),
            // The carousel is not mounted behind the splash.
            Action::Gesture(gesture) if self.is_ready() => Some(gesture),
            Action::Gesture(_) => None,
        }
    }
}
