//! # Input Mapping
//!
//! Translates terminal events into screen actions. The mapping is pure:
//! hit-testing uses the regions recorded by the last draw, and timestamps are
//! passed in, so every binding can be checked without a terminal.
//!
//! ## Bindings
//!
//! - `q` / `Q` / `Esc` / `Ctrl+c` - Quit
//! - `h` / `Left`, `l` / `Right`, mouse wheel - Previous / next drink
//! - `Home` / `End`, `1`-`9` - Jump to a drink
//! - `Enter` / `Space`, click on the button - "Get it"
//! - Drag on the carousel - Scroll with momentum

use crate::motion::Gesture;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    Gesture(Gesture),
    /// The call-to-action button was activated.
    PressCta,
    Resize { width: u16, height: u16 },
}

/// Screen areas that react to the mouse, as laid out by the last draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitRegions {
    pub carousel: Rect,
    pub button: Rect,
}

pub fn action_for(event: &Event, regions: &HitRegions, now: Instant) -> Option<Action> {
    match event {
        Event::Key(key) => key_action(key),
        Event::Mouse(mouse) => mouse_action(mouse, regions, now),
        Event::Resize(width, height) => Some(Action::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

fn key_action(key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Left | KeyCode::Char('h') => Action::Gesture(Gesture::Step(-1)),
        KeyCode::Right | KeyCode::Char('l') => Action::Gesture(Gesture::Step(1)),
        KeyCode::Home => Action::Gesture(Gesture::Jump(0)),
        KeyCode::End => Action::Gesture(Gesture::Jump(usize::MAX)),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10).map_or(0, |d| d as usize - 1);
            Action::Gesture(Gesture::Jump(index))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Action::PressCta,
        _ => return None,
    };
    Some(action)
}

fn mouse_action(mouse: &MouseEvent, regions: &HitRegions, now: Instant) -> Option<Action> {
    let at = Position::new(mouse.column, mouse.row);
    let x = f64::from(mouse.column);

    let action = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if regions.button.contains(at) => Action::PressCta,
        MouseEventKind::Down(MouseButton::Left) if regions.carousel.contains(at) => {
            Action::Gesture(Gesture::Press { x, at: now })
        }
        MouseEventKind::Drag(MouseButton::Left) => Action::Gesture(Gesture::Move { x, at: now }),
        MouseEventKind::Up(MouseButton::Left) => Action::Gesture(Gesture::Release { at: now }),
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
            Action::Gesture(Gesture::Step(1))
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => Action::Gesture(Gesture::Step(-1)),
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        })
    }

    fn regions() -> HitRegions {
        HitRegions {
            carousel: Rect::new(0, 5, 80, 15),
            button: Rect::new(20, 36, 40, 3),
        }
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(
            action_for(&event, &regions(), Instant::now()),
            Some(Action::Quit)
        );
        // Plain 'c' does nothing.
        assert_eq!(
            action_for(&key(KeyCode::Char('c')), &regions(), Instant::now()),
            None
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut event = KeyEvent::new(KeyCode::Right, KeyModifiers::empty());
        event.kind = KeyEventKind::Release;
        assert_eq!(
            action_for(&Event::Key(event), &regions(), Instant::now()),
            None
        );
    }

    #[test]
    fn test_press_outside_regions_is_ignored() {
        let event = mouse(MouseEventKind::Down(MouseButton::Left), 2, 30);
        assert_eq!(action_for(&event, &regions(), Instant::now()), None);
    }

    #[test]
    fn test_drag_sequence() {
        let now = Instant::now();
        let r = regions();
        assert_eq!(
            action_for(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 10), &r, now),
            Some(Action::Gesture(Gesture::Press { x: 40.0, at: now }))
        );
        assert_eq!(
            action_for(&mouse(MouseEventKind::Drag(MouseButton::Left), 31, 10), &r, now),
            Some(Action::Gesture(Gesture::Move { x: 31.0, at: now }))
        );
        assert_eq!(
            action_for(&mouse(MouseEventKind::Up(MouseButton::Left), 31, 10), &r, now),
            Some(Action::Gesture(Gesture::Release { at: now }))
        );
    }

    #[test]
    fn test_resize() {
        assert_eq!(
            action_for(&Event::Resize(120, 50), &regions(), Instant::now()),
            Some(Action::Resize {
                width: 120,
                height: 50
            })
        );
    }
}
