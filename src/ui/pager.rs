//! # Detail Pager
//!
//! The details card is a vertical stack of fixed-height pages, one per
//! product. The pager mirrors the carousel: whenever the active index
//! changes it issues a scroll command to `index * page_height` and eases the
//! visible offset there. Repeating the current index is a no-op.

use crate::motion::easing::ease_out_cubic;

/// Duration of a page transition, in seconds.
const SCROLL_DURATION: f64 = 0.3;

/// A programmatic scroll of the pager's container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    /// Target offset from the top of the first page, in rows.
    pub y: f64,
    pub animated: bool,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: f64,
    to: f64,
    elapsed: f64,
}

#[derive(Debug, Clone)]
pub struct DetailPager {
    page_height: f64,
    page_count: usize,
    active: Option<usize>,
    offset: f64,
    transition: Option<Transition>,
}

impl DetailPager {
    pub fn new(page_height: f64, page_count: usize) -> Self {
        Self {
            page_height: page_height.max(0.0),
            page_count,
            active: None,
            offset: 0.0,
            transition: None,
        }
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Index of the page being shown (or scrolled to).
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Current visible offset in rows.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_scrolling(&self) -> bool {
        self.transition.is_some()
    }

    /// Show page `index`. Emits a command only when the index changes.
    pub fn show(&mut self, index: Option<usize>) -> Option<ScrollCommand> {
        let index = index.filter(|&i| i < self.page_count)?;
        if self.active == Some(index) {
            return None;
        }
        self.active = Some(index);

        let command = ScrollCommand {
            y: index as f64 * self.page_height,
            animated: true,
        };
        self.scroll_to(command);
        log::debug!("Detail pager -> page {index} (y = {})", command.y);
        Some(command)
    }

    fn scroll_to(&mut self, command: ScrollCommand) {
        if !command.animated || self.offset == command.y {
            self.offset = command.y;
            self.transition = None;
            return;
        }
        self.transition = Some(Transition {
            from: self.offset,
            to: command.y,
            elapsed: 0.0,
        });
    }

    /// Advance the page transition by `dt` seconds. Returns whether the offset moved.
    pub fn tick(&mut self, dt: f64) -> bool {
        let Some(mut transition) = self.transition else {
            return false;
        };
        let before = self.offset;

        transition.elapsed += dt.max(0.0);
        let t = (transition.elapsed / SCROLL_DURATION).min(1.0);
        if t >= 1.0 {
            self.offset = transition.to;
            self.transition = None;
        } else {
            self.offset = transition.from + (transition.to - transition.from) * ease_out_cubic(t);
            self.transition = Some(transition);
        }

        self.offset != before
    }

    /// Change the page height (terminal resize). The active page stays in view
    /// without animating.
    pub fn set_page_height(&mut self, page_height: f64) {
        let page_height = page_height.max(0.0);
        if page_height == self.page_height {
            return;
        }
        self.page_height = page_height;
        self.offset = self.active.unwrap_or(0) as f64 * page_height;
        self.transition = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish(pager: &mut DetailPager) {
        for _ in 0..120 {
            pager.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn test_first_show_emits_command() {
        let mut pager = DetailPager::new(300.0, 3);
        assert_eq!(
            pager.show(Some(0)),
            Some(ScrollCommand {
                y: 0.0,
                animated: true
            })
        );
        assert_eq!(pager.active(), Some(0));
        assert!(!pager.is_scrolling());
    }

    #[test]
    fn test_transition_scrolls_to_page() {
        let mut pager = DetailPager::new(300.0, 3);
        pager.show(Some(0));
        let command = pager.show(Some(1)).expect("index changed");
        assert_eq!(command.y, 300.0);
        assert!(pager.is_scrolling());

        pager.tick(0.1);
        assert!(pager.offset() > 0.0 && pager.offset() < 300.0);

        finish(&mut pager);
        assert_eq!(pager.offset(), 300.0);
        assert!(!pager.is_scrolling());
    }

    #[test]
    fn test_same_index_is_idempotent() {
        let mut pager = DetailPager::new(300.0, 3);
        assert!(pager.show(Some(2)).is_some());
        assert!(pager.show(Some(2)).is_none());
        assert!(pager.show(Some(2)).is_none());
    }

    #[test]
    fn test_out_of_range_and_none_ignored() {
        let mut pager = DetailPager::new(10.0, 3);
        assert!(pager.show(Some(3)).is_none());
        assert!(pager.show(None).is_none());
        assert_eq!(pager.active(), None);

        let mut empty = DetailPager::new(10.0, 0);
        assert!(empty.show(Some(0)).is_none());
        assert!(!empty.tick(0.5));
    }

    #[test]
    fn test_retarget_mid_transition() {
        let mut pager = DetailPager::new(100.0, 3);
        pager.show(Some(0));
        pager.show(Some(2));
        pager.tick(0.05);
        let mid = pager.offset();
        pager.show(Some(1));
        finish(&mut pager);
        assert!(mid > 0.0);
        assert_eq!(pager.offset(), 100.0);
    }

    #[test]
    fn test_resize_realigns_active_page() {
        let mut pager = DetailPager::new(10.0, 3);
        pager.show(Some(2));
        pager.tick(0.05);
        pager.set_page_height(12.0);
        assert_eq!(pager.offset(), 24.0);
        assert!(!pager.is_scrolling());
    }
}
