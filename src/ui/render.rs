use crate::assets::{self, typography};
use crate::catalog::Product;
use crate::motion::card::normalized_position;
use crate::motion::{EntranceTarget, Reveal};
use crate::ui::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Margin, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
    Frame,
};
use std::time::Instant;

/// Terminal cells are about twice as tall as they are wide.
pub const CELL_ASPECT: f64 = 2.0;

/// Height of the details card, as a share of the screen.
const CARD_HEIGHT_PERCENT: u32 = 40;
const CARD_MIN_HEIGHT: u32 = 12;
const BUTTON_HEIGHT: u16 = 3;
/// Artwork width relative to the card slot.
const ART_FILL: f64 = 0.8;
/// Largest scale a card reaches (the centred one).
const MAX_SCALE: f64 = 1.1;

/// Where each part of the promo screen goes for a given terminal size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub logo: Rect,
    pub carousel: Rect,
    /// The details card, border included.
    pub card: Rect,
    /// Viewport of the detail pages inside the card.
    pub pager: Rect,
    pub button: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let logo_height = (assets::logo().height() as u16 + 2).min(area.height / 4);
    let card_height =
        (u32::from(area.height) * CARD_HEIGHT_PERCENT / 100).max(CARD_MIN_HEIGHT) as u16;

    let [logo, carousel, card_row, _margin] = Layout::vertical([
        Constraint::Length(logo_height),
        Constraint::Min(0),
        Constraint::Length(card_height),
        Constraint::Length(1),
    ])
    .areas(area);

    let [card] = Layout::horizontal([Constraint::Percentage(86)])
        .flex(Flex::Center)
        .areas(card_row);

    let inner = card.inner(Margin::new(2, 1));
    let [pager, button] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(BUTTON_HEIGHT)]).areas(inner);

    ScreenLayout {
        logo,
        carousel,
        card,
        pager,
        button,
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    if !app.is_ready() {
        render_splash(frame, app, area);
        return;
    }

    let layout = screen_layout(area);
    let reveal = |target| {
        app.entrances
            .as_ref()
            .map_or(Reveal::SETTLED, |e| e.reveal(target))
    };

    render_backdrop(frame, app, area);
    render_logo(frame, app, layout.logo, reveal(EntranceTarget::Logo));
    render_carousel(frame, app, layout.carousel, reveal(EntranceTarget::Carousel).opacity);
    render_detail_card(frame, app, &layout, reveal(EntranceTarget::DetailCard));
}

fn render_splash(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    frame.render_widget(Block::default().style(Style::default().bg(theme.backdrop)), area);

    let logo = assets::logo();
    let lines = logo.sample(logo.width(), logo.height());
    let x = centered(area.x, area.width, logo.width());
    let y = centered(area.y, area.height, logo.height());
    draw_lines(
        frame.buffer_mut(),
        area,
        x,
        y,
        &lines,
        Style::default().fg(theme.accent),
    );
}

fn render_backdrop(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let pattern: Vec<Line> = assets::background()
        .tile(usize::from(area.width), usize::from(area.height))
        .into_iter()
        .map(Line::from)
        .collect();

    let backdrop =
        Paragraph::new(pattern).style(Style::default().fg(theme.pattern).bg(theme.backdrop));
    frame.render_widget(backdrop, area);
}

fn render_logo(frame: &mut Frame, app: &App, area: Rect, reveal: Reveal) {
    let logo = assets::logo();
    if area.height == 0 {
        return;
    }
    let lines = logo.sample(logo.width(), logo.height());

    // Slides in from above the screen edge.
    let travel = f64::from(area.bottom());
    let x = centered(area.x, area.width, logo.width());
    let y = centered(area.y, area.height, logo.height()) + (reveal.shift * travel).round() as i32;

    let color = app.theme.fade(app.theme.accent, reveal.opacity);
    let screen = frame.area();
    draw_lines(frame.buffer_mut(), screen, x, y, &lines, Style::default().fg(color));
}

fn render_carousel(frame: &mut Frame, app: &App, area: Rect, fade: f64) {
    let card_width = app.card_width();
    if card_width <= 0.0 || area.is_empty() || app.catalog.is_empty() {
        return;
    }

    let scroll_x = app.scroll_x();
    let transforms = app.card_transforms();
    let base_width = card_width * ART_FILL;
    let base_height = (f64::from(area.height) / MAX_SCALE).min(base_width / CELL_ASPECT);

    // Cards further from the centre are drawn first so the centre one is on top.
    let mut order: Vec<usize> = (0..transforms.len()).collect();
    order.sort_by(|&a, &b| {
        let distance = |i| normalized_position(i, scroll_x, card_width).map_or(0.0, f64::abs);
        distance(b).total_cmp(&distance(a))
    });

    let mid_x = f64::from(area.x) + f64::from(area.width) / 2.0;
    let mid_y = f64::from(area.y) + f64::from(area.height) / 2.0;

    for index in order {
        let (Some(product), Some(transform)) = (app.catalog.get(index), transforms.get(index))
        else {
            continue;
        };
        let width = (base_width * transform.scale).round().max(0.0) as usize;
        let height = (base_height * transform.scale).round().max(0.0) as usize;
        if width == 0 || height == 0 {
            continue;
        }

        let (dx, dy) = transform.displacement();
        let center_x = mid_x + index as f64 * card_width - scroll_x + dx;
        let center_y = mid_y + dy / CELL_ASPECT;
        let x = (center_x - width as f64 / 2.0).round() as i32;
        let y = (center_y - height as f64 / 2.0).round() as i32;

        let art = assets::product_art(&product.image).sample(width, height);
        let color = app.theme.fade(app.theme.art, transform.opacity * fade);
        draw_lines(frame.buffer_mut(), area, x, y, &art, Style::default().fg(color));
    }
}

fn render_detail_card(frame: &mut Frame, app: &App, layout: &ScreenLayout, reveal: Reveal) {
    if layout.card.is_empty() {
        return;
    }
    let theme = &app.theme;
    let mut card = Buffer::empty(layout.card);

    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.card_border))
        .style(Style::default().bg(theme.card_bg).fg(theme.text))
        .render(layout.card, &mut card);

    render_pages(app, layout.pager, &mut card);
    render_button(app, layout.button, &mut card);

    // Slides in from below the screen edge.
    let screen = frame.area();
    let travel = f64::from(screen.bottom().saturating_sub(layout.card.y));
    let dy = (reveal.shift * travel).round() as i32;
    blit(&card, frame.buffer_mut(), dy, screen);
}

fn render_pages(app: &App, viewport: Rect, buf: &mut Buffer) {
    if viewport.is_empty() {
        return;
    }
    if app.catalog.is_empty() {
        Paragraph::new("No drinks on the menu today")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.text_muted))
            .render(viewport, buf);
        return;
    }

    let page_height = i32::from(viewport.height);
    let offset = app.pager.offset().round() as i32;

    for (index, product) in app.catalog.products().iter().enumerate() {
        let top = index as i32 * page_height - offset;
        if top >= page_height || top + page_height <= 0 {
            continue;
        }
        let mut page = Buffer::empty(viewport);
        render_detail_page(app, product, viewport, &mut page);
        blit(&page, buf, top, viewport);
    }
}

/// One page of the details card: price and size on top, then the name and
/// description.
pub fn render_detail_page(app: &App, product: &Product, area: Rect, buf: &mut Buffer) {
    let theme = &app.theme;
    let fonts = &app.fonts;
    let base = Style::default().bg(theme.card_bg);

    let pill_width = (product.size.chars().count() as u16 + 4).min(area.width);
    let [header, body] = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
    let [price_area, pill_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(pill_width)]).areas(header);

    let price = Line::from(vec![
        Span::styled(
            "$",
            base.fg(theme.text).add_modifier(fonts.modifier(typography::CAPTION)),
        ),
        Span::styled(
            product.price_label(),
            base.fg(theme.text).add_modifier(fonts.modifier(typography::H2)),
        ),
    ]);
    let [_, price_row, _] = Layout::vertical([Constraint::Length(1); 3]).areas(price_area);
    Paragraph::new(price).style(base).render(price_row, buf);

    Paragraph::new(product.size.as_str())
        .alignment(Alignment::Center)
        .style(base.fg(theme.pill_text).add_modifier(fonts.modifier(typography::CAPTION)))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(base.fg(theme.pill_border)),
        )
        .render(pill_area, buf);

    let text = Text::from(vec![
        Line::from(""),
        Line::styled(
            product.name.as_str(),
            base.fg(theme.text).add_modifier(fonts.modifier(typography::H4)),
        ),
        Line::from(""),
        Line::styled(
            product.description.as_str(),
            base.fg(theme.text_muted)
                .add_modifier(fonts.modifier(typography::BODY2)),
        ),
    ]);
    Paragraph::new(text)
        .style(base)
        .wrap(Wrap { trim: true })
        .render(body, buf);
}

fn render_button(app: &App, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let theme = &app.theme;
    let bg = if app.is_cta_pressed(Instant::now()) {
        theme.button_pressed
    } else {
        theme.button_bg
    };

    let [_, label_row, _] = Layout::vertical([Constraint::Length(1); 3]).areas(area);
    Block::default()
        .style(Style::default().bg(bg))
        .render(area, buf);
    Paragraph::new("Get it")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .bg(bg)
                .fg(theme.button_text)
                .add_modifier(app.fonts.modifier(typography::SUBTITLE1) | Modifier::BOLD),
        )
        .render(label_row, buf);
}

/// Left (or top) coordinate that centres `size` cells in a span.
fn centered(start: u16, span: u16, size: usize) -> i32 {
    i32::from(start) + (i32::from(span) - size as i32) / 2
}

/// Draw character rows at a possibly off-screen origin. Spaces are
/// transparent and anything outside `clip` is dropped.
fn draw_lines(buf: &mut Buffer, clip: Rect, x: i32, y: i32, lines: &[String], style: Style) {
    for (row, line) in lines.iter().enumerate() {
        let Ok(cy) = u16::try_from(y + row as i32) else {
            continue;
        };
        for (col, ch) in line.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let Ok(cx) = u16::try_from(x + col as i32) else {
                continue;
            };
            let pos = Position::new(cx, cy);
            if !clip.contains(pos) {
                continue;
            }
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char(ch).set_style(style);
            }
        }
    }
}

/// Copy `src` into `dst`, moved down by `dy` rows and clipped to `clip`.
fn blit(src: &Buffer, dst: &mut Buffer, dy: i32, clip: Rect) {
    let area = src.area;
    for y in area.top()..area.bottom() {
        let Ok(ty) = u16::try_from(i32::from(y) + dy) else {
            continue;
        };
        for x in area.left()..area.right() {
            let pos = Position::new(x, ty);
            if !clip.contains(pos) {
                continue;
            }
            if let (Some(cell), Some(target)) = (src.cell((x, y)), dst.cell_mut(pos)) {
                *target = cell.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::FontSet;
    use crate::catalog::Catalog;
    use crate::motion::MotionDriver;
    use crate::ui::config::Config;
    use crate::ui::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};

    fn ready_app(catalog: Catalog, width: u16, height: u16) -> (App, MotionDriver) {
        let (driver, reader, rx) = MotionDriver::new(0.0, catalog.len());
        let config = Config {
            animations: false,
            ..Config::default()
        };
        let mut app = App::new(catalog, config, Theme::default_theme().clone(), reader, rx);
        app.set_screen_size(width, height);
        app.on_fonts_loaded(FontSet::default());
        (app, driver)
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|f| render(f, app)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_layout_stacks_sections() {
        let layout = screen_layout(Rect::new(0, 0, 80, 40));
        assert!(layout.logo.bottom() <= layout.carousel.y);
        assert!(layout.carousel.bottom() <= layout.card.y);
        assert!(layout.card.contains(layout.pager.as_position()));
        assert_eq!(layout.pager.bottom(), layout.button.y);
        assert_eq!(layout.button.height, BUTTON_HEIGHT);
        assert!(layout.card.bottom() < 40);
    }

    #[test]
    fn test_splash_while_loading() {
        let (driver, reader, rx) = MotionDriver::new(56.0, 3);
        drop(driver);
        let app = App::new(
            Catalog::builtin(),
            Config::default(),
            Theme::default_theme().clone(),
            reader,
            rx,
        );
        let screen = draw(&app, 60, 20);
        assert!(screen.contains("( ** )"));
        assert!(!screen.contains("Get it"));
    }

    #[test]
    fn test_ready_screen_shows_first_drink() {
        let (app, _driver) = ready_app(Catalog::builtin(), 80, 40);
        let screen = draw(&app, 80, 40);
        assert!(screen.contains("Get it"));
        assert!(screen.contains("$28"));
        assert!(screen.contains("420ml"));
        assert!(screen.contains("Strawberry Cheesecake Frappuccino"));
        assert!(!screen.contains("Matcha"));
    }

    #[test]
    fn test_empty_catalog_renders() {
        let catalog = Catalog::new(Vec::new()).expect("empty catalog");
        let (app, _driver) = ready_app(catalog, 80, 40);
        let screen = draw(&app, 80, 40);
        assert!(screen.contains("No drinks on the menu today"));
        assert!(screen.contains("Get it"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        for (w, h) in [(1, 1), (5, 3), (20, 8), (200, 4)] {
            let (app, _driver) = ready_app(Catalog::builtin(), w, h);
            draw(&app, w, h);
        }
    }

    #[test]
    fn test_draw_lines_clips_and_skips_spaces() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 2));
        let lines = vec!["ab c".to_string(), "defg".to_string()];
        draw_lines(&mut buf, Rect::new(0, 0, 4, 2), -1, 1, &lines, Style::default());
        assert_eq!(buf.cell((0, 0)).map(|c| c.symbol()), Some(" "));
        assert_eq!(buf.cell((0, 1)).map(|c| c.symbol()), Some("b"));
        assert_eq!(buf.cell((1, 1)).map(|c| c.symbol()), Some(" "));
        assert_eq!(buf.cell((2, 1)).map(|c| c.symbol()), Some("c"));
    }
}
