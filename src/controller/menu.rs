// Mobile navigation menu - open/close with outside-click dismissal
//
// The open flag lives on the page itself (the `active` class on the nav
// container), mirrored into the button's `aria-expanded` attribute. The
// button handler stops propagation so the document-level close handler,
// which runs after it on the same click, never sees the toggle click and
// cannot immediately undo it.

use crate::events::ClickEvent;
use crate::page::{ElementId, Page};

/// Menu behavior: requires both the toggle button and the nav container
#[derive(Debug)]
pub struct MobileMenu {
    button: ElementId,
    menu: ElementId,
}

impl MobileMenu {
    pub fn mount(page: &Page) -> Option<Self> {
        let button = page.find_id("mobile-menu-button")?;
        let menu = page.find_class("header-nav")?;
        Some(Self { button, menu })
    }

    /// Button toggle plus the document-level outside-click close
    pub fn on_click(&mut self, page: &mut Page, click: &mut ClickEvent) {
        if click.target == Some(self.button) {
            click.stop_propagation();
            let open = page.element_mut(self.menu).toggle_class("active");
            self.sync_expanded(page, open);
            return;
        }

        // Document-level close handler
        if click.propagation_stopped() {
            return;
        }
        let inside = click
            .target
            .is_some_and(|t| page.is_within(t, self.menu));
        if self.is_open(page) && !inside && click.target != Some(self.button) {
            self.close(page);
        }
    }

    pub fn is_open(&self, page: &Page) -> bool {
        page.element(self.menu).has_class("active")
    }

    /// Close unconditionally (also used by anchor navigation)
    pub fn close(&self, page: &mut Page) {
        page.element_mut(self.menu).remove_class("active");
        self.sync_expanded(page, false);
    }

    fn sync_expanded(&self, page: &mut Page, open: bool) {
        page.element_mut(self.button)
            .set_attr("aria-expanded", if open { "true" } else { "false" });
    }
}
