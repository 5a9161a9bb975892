//! # Drinkdeck CLI Entry Point
//!
//! This is the main entry point for the Drinkdeck TUI application.
//!
//! ## Overview
//!
//! Drinkdeck shows a horizontally swipeable carousel of drinks with a details
//! card underneath. Scrolling the carousel scales, fades and lifts the cards
//! around the centre one, and the details card pages to whichever drink is
//! centred.
//!
//! ## Usage
//!
//! ```bash
//! # Built-in drinks, default config
//! drinkdeck
//!
//! # Custom catalog and config
//! drinkdeck --catalog ./drinks.json --config ./drinkdeck.json
//!
//! # Log to a file (the terminal belongs to the UI)
//! RUST_LOG=debug drinkdeck --log-file /tmp/drinkdeck.log
//!
//! # Debug mode - print the catalog and layout metrics and exit
//! drinkdeck --debug
//! ```
//!
//! ## Architecture
//!
//! 1. **Splash**: typefaces load on a blocking task while the splash shows
//! 2. **Motion thread**: owns the carousel scroll physics and is the only
//!    writer of the scroll offset; it reports the active drink over a watch
//!    channel
//! 3. **UI loop**: polls input, forwards gestures, pages the details card and
//!    draws every frame
//!
//! ## Key Bindings
//!
//! - `q` / `Esc` / `Ctrl+c` - Quit
//! - `h` / `l` / `Left` / `Right` / mouse wheel - Previous / next drink
//! - `Home` / `End` / `1`-`9` - Jump to a drink
//! - `Enter` / `Space` / click - "Get it"
//! - Mouse drag on the carousel - Swipe

use drinkdeck::assets;
use drinkdeck::catalog::Catalog;
use drinkdeck::motion::{MotionDriver, MotionThread};
use drinkdeck::ui::config::Config;
use drinkdeck::ui::input;
use drinkdeck::ui::render::screen_layout;
use drinkdeck::ui::theme::Theme;
use drinkdeck::ui::{self, App};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::{Builder, Target};
use log::LevelFilter;
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Events drained per frame at most, so a flood of mouse moves cannot starve
/// drawing.
const MAX_EVENTS_PER_FRAME: usize = 64;

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(event::read().context("Failed to read terminal event")?))
        } else {
            Ok(None)
        }
    }
}

/// Drinkdeck - a promotional drink carousel for the terminal
#[derive(Parser, Debug)]
#[command(name = "drinkdeck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A swipeable drink carousel with a synchronized details card", long_about = None)]
struct Args {
    /// Path to the config file (defaults to the user config directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON file with the drinks to show instead of the built-in ones
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Start with the entrance animations already finished
    #[arg(long)]
    no_animations: bool,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the catalog and layout metrics and exit
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = init_logger(args.log_file.as_deref()) {
        eprintln!("Warning: Could not initialize logging: {e:#}");
    }

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_application(args).await;

    // Restore panic hook
    let _ = panic::take_hook();

    result
}

/// Route `log` output to `log_file`, or to stderr when there is none.
///
/// The terminal is owned by the UI, so without a log file only warnings and
/// errors are shown by default. `RUST_LOG` overrides the level either way.
fn init_logger(log_file: Option<&Path>) -> Result<()> {
    let mut builder = Builder::new();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            builder
                .filter_level(LevelFilter::Info)
                .target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(LevelFilter::Warn).target(Target::Stderr);
        }
    }
    builder.parse_default_env();
    builder.try_init().context("Logger already initialized")?;
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if args.no_animations {
        config.animations = false;
    }
    Ok(config)
}

fn load_catalog(args: &Args) -> Result<Catalog> {
    match &args.catalog {
        Some(path) => Catalog::load_from(path),
        None => Ok(Catalog::builtin()),
    }
}

fn resolve_theme(config: &Config) -> Theme {
    match Theme::by_name(&config.theme) {
        Some(theme) => theme.clone(),
        None => {
            log::warn!(
                "Unknown theme {:?}, falling back to {}",
                config.theme,
                Theme::default_theme().name
            );
            Theme::default_theme().clone()
        }
    }
}

async fn run_application(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let catalog = load_catalog(&args)?;
    let theme = resolve_theme(&config);

    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));

    if args.debug {
        print_debug(&config, &theme, &catalog, width, height);
        return Ok(());
    }

    log::info!(
        "Starting with {} drinks, theme {}, {} fps",
        catalog.len(),
        theme.name,
        config.frame_rate
    );

    // Spawned before raw mode so a failure leaves the terminal untouched.
    let card_width = f64::from(width) * config.card_width_ratio;
    let (driver, scroll, index_rx) = MotionDriver::new(card_width, catalog.len());
    let motion = MotionThread::spawn(driver, config.frame_interval())?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(catalog, config, theme, scroll, index_rx);
    app.set_screen_size(width, height);
    app.start_loading();

    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &motion, &mut event_reader).await;

    // Unmount: entrance tasks are aborted and the motion thread joined
    // before the terminal is handed back.
    drop(app);
    drop(motion);

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    run_result?;
    cleanup_result?;

    Ok(())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

fn print_debug(config: &Config, theme: &Theme, catalog: &Catalog, width: u16, height: u16) {
    println!("=== DRINKDECK DEBUG ===");
    println!("Theme: {}", theme.name);
    println!(
        "Card width ratio: {}  Frame rate: {} fps  Animations: {}",
        config.card_width_ratio, config.frame_rate, config.animations
    );
    println!();

    println!("Catalog ({} drinks):", catalog.len());
    for (index, product) in catalog.products().iter().enumerate() {
        println!(
            "  [{index}] #{} {} - ${} ({}) image={}",
            product.id,
            product.name,
            product.price_label(),
            product.size,
            product.image
        );
    }
    println!();

    let manifest = assets::manifest();
    println!(
        "Assets: {} background, {} logo, {} product images, {} typefaces",
        manifest.backgrounds, manifest.logos, manifest.product_images, manifest.typefaces
    );
    println!();

    let layout = screen_layout(Rect::new(0, 0, width, height));
    println!("Terminal: {width}x{height}");
    println!(
        "Card width: {:.1} cells",
        f64::from(width) * config.card_width_ratio
    );
    println!("Logo:     {:?}", layout.logo);
    println!("Carousel: {:?}", layout.carousel);
    println!("Card:     {:?}", layout.card);
    println!("Pager:    {:?} (page height {})", layout.pager, layout.pager.height);
    println!("Button:   {:?}", layout.button);
}

/// Apply every pending event, forwarding gestures to the motion thread.
fn handle_events(
    app: &mut App,
    motion: &MotionThread,
    event_reader: &mut dyn EventReader,
    timeout: Duration,
) -> Result<()> {
    let mut timeout = timeout;
    for _ in 0..MAX_EVENTS_PER_FRAME {
        let Some(event) = event_reader.read_event(timeout)? else {
            break;
        };
        // Only the first read waits; the rest drain what is queued.
        timeout = Duration::ZERO;

        let now = Instant::now();
        let Some(action) = input::action_for(&event, &app.hit_regions(), now) else {
            continue;
        };
        if let Some(gesture) = app.handle_action(action, now) {
            if !motion.send(gesture) {
                log::warn!("Motion thread stopped, dropping {gesture:?}");
            }
        }
        if app.should_quit {
            break;
        }
    }
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    motion: &MotionThread,
    event_reader: &mut dyn EventReader,
) -> Result<()> {
    let frame = app.config.frame_interval();

    loop {
        app.poll_assets().await;
        app.tick(Instant::now());

        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        handle_events(app, motion, event_reader, frame)?;
        if app.should_quit {
            log::info!("Quit requested");
            return Ok(());
        }

        // Let the entrance and loader tasks make progress between frames.
        tokio::task::yield_now().await;
    }
}
