//! Mobile navigation menu state.
//!
//! A single open/closed flag. Picking a link or tapping the dimmed backdrop
//! closes the overlay; there is no routing, every link is an in-page anchor.

use crate::types::MenuItem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Hamburger button.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Backdrop click.
    pub fn dismiss(&mut self) {
        self.close();
    }

    /// Follow a menu link: closes the overlay and returns the anchor to scroll to.
    pub fn select<'a>(&mut self, item: &'a MenuItem) -> &'a str {
        self.close();
        &item.href
    }
}
