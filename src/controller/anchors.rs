// In-page anchor navigation
//
// Clicks on links whose href starts with `#` are intercepted instead of
// jumping: the mobile menu (if open) closes first, then the viewport scrolls
// to the target's offset compensated for the header height plus a fixed
// margin. An href that matches nothing resolves to a silent no-op.

use crate::config::AnchorConfig;
use crate::controller::menu::MobileMenu;
use crate::events::ClickEvent;
use crate::page::{ElementId, Page};

/// Anchor interception state
#[derive(Debug)]
pub struct AnchorNav {
    links: Vec<ElementId>,
    header: Option<ElementId>,
    margin_px: f64,
}

impl AnchorNav {
    /// Collect the in-page links; returns None when the page has none
    pub fn mount(page: &Page, config: &AnchorConfig) -> Option<Self> {
        let links = page.anchors();
        if links.is_empty() {
            return None;
        }
        Some(Self {
            links,
            header: page.find_class("main-header"),
            margin_px: config.margin_px,
        })
    }

    /// Handle a click; returns true when the viewport actually moved
    pub fn on_click(
        &self,
        page: &mut Page,
        menu: Option<&MobileMenu>,
        click: &ClickEvent,
    ) -> bool {
        let Some(target) = click.target else {
            return false;
        };
        if !self.links.contains(&target) {
            return false;
        }
        let href = page
            .element(target)
            .attr("href")
            .map(str::to_string)
            .unwrap_or_default();

        if let Some(menu) = menu {
            if menu.is_open(page) {
                menu.close(page);
            }
        }

        let dest = page.find_id(href.trim_start_matches('#'));
        let (Some(dest), Some(header)) = (dest, self.header) else {
            return false;
        };
        let offset = page.element(dest).top - page.element(header).height - self.margin_px;
        page.scroll_to(offset);
        tracing::debug!("Anchor scroll to {href} ({offset}px)");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Element;

    fn setup() -> (Page, AnchorNav) {
        let mut page = Page::new(600.0, 3000.0);
        page.insert(Element::new().with_class("main-header").at(0.0, 64.0));
        page.insert(Element::new().with_attr("href", "#contact"));
        page.insert(Element::new().with_attr("href", "#missing"));
        page.insert(Element::new().with_id("contact").at(1500.0, 400.0));
        let nav = AnchorNav::mount(&page, &AnchorConfig::default()).unwrap();
        (page, nav)
    }

    #[test]
    fn test_scrolls_to_target_minus_header_and_margin() {
        let (mut page, nav) = setup();
        let link = page.anchors()[0];

        assert!(nav.on_click(&mut page, None, &ClickEvent::on(link)));
        // 1500 - 64 (header) - 20 (margin)
        assert_eq!(page.scroll_y(), 1416.0);
    }

    #[test]
    fn test_missing_target_is_a_silent_noop() {
        let (mut page, nav) = setup();
        let dead_link = page.anchors()[1];

        assert!(!nav.on_click(&mut page, None, &ClickEvent::on(dead_link)));
        assert_eq!(page.scroll_y(), 0.0);
    }

    #[test]
    fn test_non_anchor_clicks_are_ignored() {
        let (mut page, nav) = setup();
        let plain = page.insert(Element::new());

        assert!(!nav.on_click(&mut page, None, &ClickEvent::on(plain)));
        assert!(!nav.on_click(&mut page, None, &ClickEvent::outside()));
    }

    #[test]
    fn test_closes_the_open_menu_before_scrolling() {
        let (mut page, _) = setup();
        page.insert(Element::new().with_id("mobile-menu-button"));
        let menu_el = page.insert(Element::new().with_class("header-nav"));
        page.element_mut(menu_el).add_class("active");
        // Re-mount so the link set is final either way
        let nav = AnchorNav::mount(&page, &AnchorConfig::default()).unwrap();
        let menu = MobileMenu::mount(&page).unwrap();
        let link = page.anchors()[0];

        assert!(menu.is_open(&page));
        nav.on_click(&mut page, Some(&menu), &ClickEvent::on(link));
        assert!(!menu.is_open(&page));
        assert_eq!(page.scroll_y(), 1416.0);
    }

    #[test]
    fn test_target_above_header_clamps_to_top() {
        let mut page = Page::new(600.0, 3000.0);
        page.insert(Element::new().with_class("main-header").at(0.0, 64.0));
        page.insert(Element::new().with_attr("href", "#top"));
        page.insert(Element::new().with_id("top").at(30.0, 100.0));
        let nav = AnchorNav::mount(&page, &AnchorConfig::default()).unwrap();
        let link = page.anchors()[0];

        page.scroll_to(500.0);
        assert!(nav.on_click(&mut page, None, &ClickEvent::on(link)));
        assert_eq!(page.scroll_y(), 0.0);
    }

    #[test]
    fn test_mount_without_links_is_skipped() {
        let page = Page::new(600.0, 3000.0);
        assert!(AnchorNav::mount(&page, &AnchorConfig::default()).is_none());
    }
}
