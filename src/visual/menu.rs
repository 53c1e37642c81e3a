//! Navbar mobile menu.
//!
//! The hamburger toggles the menu, following a link closes it, and growing
//! the window past the breakpoint closes it too. While open, the page body
//! must not scroll.

/// Widths above this get the desktop navbar.
pub const MOBILE_MENU_BREAKPOINT: f64 = 768.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hamburger pressed. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn on_link_click(&mut self) {
        self.open = false;
    }

    /// Returns true if the resize closed an open menu.
    pub fn on_resize(&mut self, width: f64) -> bool {
        if self.open && width > MOBILE_MENU_BREAKPOINT {
            self.open = false;
            return true;
        }
        false
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn locks_scroll(&self) -> bool {
        self.open
    }

    /// Value for the body's `overflow` style. Empty restores the default.
    pub fn body_overflow(&self) -> &'static str {
        if self.locks_scroll() {
            "hidden"
        } else {
            ""
        }
    }
}
