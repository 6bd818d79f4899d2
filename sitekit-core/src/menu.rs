//! Open/closed state of the mobile navigation menu.

/// Events the menu reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The menu button was clicked.
    Toggle,
    /// A click landed inside the menu or on its button.
    ClickInside,
    /// A click landed anywhere else on the page.
    ClickOutside,
    /// The Escape key was pressed.
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    #[must_use]
    pub const fn new(open: bool) -> Self {
        Self { open }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        self.open
    }

    /// Apply `event`; returns whether the open state changed.
    pub fn handle(&mut self, event: MenuEvent) -> bool {
        let next = match event {
            MenuEvent::Toggle => !self.open,
            MenuEvent::ClickInside => self.open,
            MenuEvent::ClickOutside | MenuEvent::Escape => false,
        };
        let changed = next != self.open;
        self.open = next;
        changed
    }
}
