//! Mobile navigation menu state.
//!
//! The menu is either open or closed. Page events are mapped onto
//! [`MenuEvent`] values and folded through [`MenuState::apply`]; the caller
//! mirrors the resulting [`MenuPresentation`] onto the page.
//!
//! Resize events are debounced by [`ResizeDebouncer`]: bursts collapse into
//! a single [`MenuEvent::ResizeSettled`] emitted [`RESIZE_DEBOUNCE`] after the
//! last raw resize. Timestamps are monotonic offsets from page start.

use std::time::Duration;

/// Viewports wider than this are desktop layouts, where the menu must close.
pub const MOBILE_MAX_WIDTH: u32 = 768;
/// Quiet period after the last resize before the width is evaluated.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);
/// Key that dismisses an open menu.
pub const DISMISS_KEY: &str = "Escape";

/// Where a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The hamburger toggler.
    Toggler,
    /// A navigation link inside the menu.
    NavLink,
    /// Inside the menu but not on a link.
    Menu,
    /// Anywhere outside both the menu and the toggler.
    Outside,
}

/// Page events the menu reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// Pointer click.
    Click(ClickTarget),
    /// Key press, by key name.
    KeyDown(String),
    /// Debounced resize carrying the final viewport width.
    ResizeSettled {
        /// Viewport width in CSS pixels.
        width: u32,
    },
}

/// Open/closed menu state. Starts closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    /// Closed menu.
    pub const fn closed() -> Self {
        Self { open: false }
    }

    /// Whether the menu is open.
    pub const fn is_open(self) -> bool {
        self.open
    }

    /// Fold one event into the state.
    ///
    /// # Examples
    /// ```
    /// use coursework::domain::menu::{ClickTarget, MenuEvent, MenuState};
    ///
    /// let open = MenuState::closed().apply(&MenuEvent::Click(ClickTarget::Toggler));
    /// assert!(open.is_open());
    /// let closed = open.apply(&MenuEvent::KeyDown("Escape".into()));
    /// assert!(!closed.is_open());
    /// ```
    #[must_use]
    pub fn apply(self, event: &MenuEvent) -> Self {
        match event {
            MenuEvent::Click(ClickTarget::Toggler) => Self { open: !self.open },
            MenuEvent::Click(ClickTarget::NavLink | ClickTarget::Outside) => Self::closed(),
            MenuEvent::Click(ClickTarget::Menu) => self,
            MenuEvent::KeyDown(key) if key == DISMISS_KEY => Self::closed(),
            MenuEvent::KeyDown(_) => self,
            MenuEvent::ResizeSettled { width } if *width > MOBILE_MAX_WIDTH => Self::closed(),
            MenuEvent::ResizeSettled { .. } => self,
        }
    }

    /// Page presentation mirrored from the state.
    pub const fn presentation(self) -> MenuPresentation {
        MenuPresentation {
            active: self.open,
            aria_expanded: self.open,
            scroll_locked: self.open,
        }
    }
}

/// Page attributes that follow the menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuPresentation {
    /// `active` class on the toggler and the menu.
    pub active: bool,
    /// `aria-expanded` on the toggler.
    pub aria_expanded: bool,
    /// Body scrolling disabled while the menu covers the page.
    pub scroll_locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingResize {
    due: Duration,
    width: u32,
}

/// Collapses bursts of resize events into one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeDebouncer {
    pending: Option<PendingResize>,
}

impl ResizeDebouncer {
    /// Debouncer with no pending resize.
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Record a raw resize at `at`, restarting the quiet period.
    pub fn record(&mut self, at: Duration, width: u32) {
        self.pending = Some(PendingResize {
            due: at.saturating_add(RESIZE_DEBOUNCE),
            width,
        });
    }

    /// When the pending resize settles, if one is pending.
    pub fn due_at(&self) -> Option<Duration> {
        self.pending.map(|pending| pending.due)
    }

    /// Emit the settled resize once `now` reaches the deadline.
    pub fn poll(&mut self, now: Duration) -> Option<MenuEvent> {
        let pending = self.pending.filter(|pending| now >= pending.due)?;
        self.pending = None;
        Some(MenuEvent::ResizeSettled {
            width: pending.width,
        })
    }

    /// Emit any pending resize regardless of time.
    pub fn flush(&mut self) -> Option<MenuEvent> {
        self.pending
            .take()
            .map(|pending| MenuEvent::ResizeSettled {
                width: pending.width,
            })
    }
}

/// Scroll position for an in-page anchor link, leaving room for the header.
///
/// Returns `None` (default link behaviour) for hrefs that are not fragments,
/// for the bare `#`, and when the target element does not exist.
pub fn anchor_scroll_target(href: &str, target_top: Option<u32>, header_height: u32) -> Option<u32> {
    if !href.starts_with('#') || href == "#" {
        return None;
    }
    target_top.map(|top| top.saturating_sub(header_height))
}
