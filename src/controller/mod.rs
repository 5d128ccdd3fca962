// Page interaction controller
//
// Owns every behavior the page gets: scroll visuals, reveal-on-scroll, the
// theme toggle, the mobile menu, anchor navigation and the typewriter. All
// behavior state is built once at mount and lives here, not in closures.
//
// Wiring is an explicit registration table: mounting queries the page for
// the elements each behavior needs and records an (event kind, behavior)
// binding only for behaviors that found theirs. A missing element means no
// binding - the behavior is skipped silently, never an error. Dispatch
// walks the table in registration order, which is also what gives the
// menu's stop-propagation its meaning: the button handler runs before the
// document-level close handler on the same click.

pub mod anchors;
pub mod menu;
pub mod reveal;
pub mod scroll;
pub mod theme;
pub mod typewriter;

use crate::config::Config;
use crate::events::{EventKind, PageEvent, TimerTask};
use crate::page::Page;
use crate::prefs::PrefStore;
use crate::scheduler::{Scheduler, TimerId};
use anchors::AnchorNav;
use menu::MobileMenu;
use reveal::RevealObserver;
use scroll::ScrollVisuals;
use std::time::Duration;
use theme::{ThemeMode, ThemeToggle};
use typewriter::Typewriter;

/// Every behavior the controller can wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    ScrollVisuals,
    Reveal,
    ThemeToggle,
    MobileMenu,
    AnchorNav,
    Typewriter,
}

impl Behavior {
    pub const ALL: [Behavior; 6] = [
        Behavior::ScrollVisuals,
        Behavior::Reveal,
        Behavior::ThemeToggle,
        Behavior::MobileMenu,
        Behavior::AnchorNav,
        Behavior::Typewriter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Behavior::ScrollVisuals => "scroll",
            Behavior::Reveal => "reveal",
            Behavior::ThemeToggle => "theme",
            Behavior::MobileMenu => "menu",
            Behavior::AnchorNav => "anchors",
            Behavior::Typewriter => "typewriter",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Behavior::ScrollVisuals => "Progress bar + header visibility",
            Behavior::Reveal => "Reveal-on-scroll animations",
            Behavior::ThemeToggle => "Dark/light theme switch",
            Behavior::MobileMenu => "Mobile navigation menu",
            Behavior::AnchorNav => "Smooth in-page anchors",
            Behavior::Typewriter => "Typewriter text loop",
        }
    }
}

/// One registration-table entry
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub event: EventKind,
    pub behavior: Behavior,
}

/// The mounted controller: behavior state plus the registration table
pub struct Controller {
    bindings: Vec<Binding>,
    scroll: ScrollVisuals,
    reveal: Option<RevealObserver>,
    theme: ThemeToggle,
    menu: Option<MobileMenu>,
    anchors: Option<AnchorNav>,
    typewriter: Option<Typewriter>,
    typewriter_timer: Option<TimerId>,
    prefs: PrefStore,
}

impl Controller {
    /// Query the page, build each behavior that finds its elements, and
    /// record the registration table. The typewriter's first step is
    /// scheduled immediately.
    pub fn mount(
        page: &mut Page,
        config: &Config,
        prefs: PrefStore,
        system: Option<ThemeMode>,
        scheduler: &mut Scheduler,
    ) -> Self {
        let mut bindings = Vec::new();
        let mut bind = |event, behavior| bindings.push(Binding { event, behavior });

        // Scroll visuals always mount: the progress bar is inserted, the
        // header part degrades gracefully when absent
        let scroll = ScrollVisuals::mount(page, &config.scroll);
        bind(EventKind::Scroll, Behavior::ScrollVisuals);
        bind(EventKind::Frame, Behavior::ScrollVisuals);

        let reveal = RevealObserver::mount(page, &config.reveal);
        if reveal.is_some() {
            bind(EventKind::Frame, Behavior::Reveal);
            bind(EventKind::Timer, Behavior::Reveal);
        }

        // The theme applies at startup even without a button to click
        let theme = ThemeToggle::mount(page, config.theme.clone(), &prefs, system);
        if theme.button().is_some() {
            bind(EventKind::Click, Behavior::ThemeToggle);
        }

        let menu = MobileMenu::mount(page);
        if menu.is_some() {
            bind(EventKind::Click, Behavior::MobileMenu);
        }

        let anchors = AnchorNav::mount(page, &config.anchor);
        if anchors.is_some() {
            bind(EventKind::Click, Behavior::AnchorNav);
        }

        let typewriter = Typewriter::mount(page, &config.typing);
        let typewriter_timer = typewriter.as_ref().map(|_| {
            bind(EventKind::Timer, Behavior::Typewriter);
            scheduler.schedule(Duration::ZERO, TimerTask::TypewriterStep)
        });

        let controller = Self {
            bindings,
            scroll,
            reveal,
            theme,
            menu,
            anchors,
            typewriter,
            typewriter_timer,
            prefs,
        };
        for behavior in Behavior::ALL {
            if !controller.is_wired(behavior) {
                tracing::debug!("{} not wired: required elements missing", behavior.name());
            }
        }
        controller
    }

    /// The registration table, in dispatch order
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Whether a behavior got at least one binding at mount
    pub fn is_wired(&self, behavior: Behavior) -> bool {
        self.bindings.iter().any(|b| b.behavior == behavior)
    }

    /// Route an event to every behavior bound to its kind, in table order
    pub fn dispatch(&mut self, page: &mut Page, scheduler: &mut Scheduler, event: PageEvent) {
        let kind = event.kind();
        let mut event = event;
        let order: Vec<Behavior> = self
            .bindings
            .iter()
            .filter(|b| b.event == kind)
            .map(|b| b.behavior)
            .collect();
        for behavior in order {
            self.deliver(behavior, page, scheduler, &mut event);
        }
    }

    fn deliver(
        &mut self,
        behavior: Behavior,
        page: &mut Page,
        scheduler: &mut Scheduler,
        event: &mut PageEvent,
    ) {
        match (behavior, &mut *event) {
            (Behavior::ScrollVisuals, PageEvent::Scroll { .. }) => self.scroll.on_scroll(),
            (Behavior::ScrollVisuals, PageEvent::Frame) => self.scroll.on_frame(page),
            (Behavior::Reveal, PageEvent::Frame) => {
                if let Some(reveal) = self.reveal.as_mut() {
                    reveal.check(page, scheduler);
                }
            }
            (Behavior::Reveal, PageEvent::Timer(TimerTask::SkillFill { bar, percent })) => {
                reveal::fill_bar(page, *bar, *percent);
            }
            (Behavior::ThemeToggle, PageEvent::Click(click)) => {
                if click.target.is_some() && click.target == self.theme.button() {
                    self.theme.toggle(page, &self.prefs);
                }
            }
            (Behavior::MobileMenu, PageEvent::Click(click)) => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.on_click(page, click);
                }
            }
            (Behavior::AnchorNav, PageEvent::Click(click)) => {
                if let Some(anchors) = self.anchors.as_ref() {
                    // An anchor scroll feeds back into the scroll visuals,
                    // picked up on the next frame
                    if anchors.on_click(page, self.menu.as_ref(), click) {
                        self.scroll.on_scroll();
                    }
                }
            }
            (Behavior::Typewriter, PageEvent::Timer(TimerTask::TypewriterStep)) => {
                if let Some(tw) = self.typewriter.as_mut() {
                    let delay = tw.step(page);
                    self.typewriter_timer =
                        Some(scheduler.schedule(delay, TimerTask::TypewriterStep));
                }
            }
            _ => {}
        }
    }

    /// Cancel the typewriter's pending step; the loop never resumes
    pub fn stop_typewriter(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.typewriter_timer.take() {
            scheduler.cancel(id);
            tracing::info!("Typewriter loop stopped");
        }
    }

    pub fn typewriter_running(&self) -> bool {
        self.typewriter_timer.is_some()
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.mode()
    }

    pub fn scroll_fraction(&self) -> f64 {
        self.scroll.fraction()
    }

    pub fn header_hidden(&self, page: &Page) -> bool {
        self.scroll.header_hidden(page)
    }

    pub fn menu_open(&self, page: &Page) -> bool {
        self.menu.as_ref().is_some_and(|m| m.is_open(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ClickEvent;
    use crate::page::Element;

    fn full_page() -> Page {
        let mut page = Page::new(600.0, 2600.0).with_meta_theme_color("#f8fafc");
        let header = page.insert(Element::new().with_class("main-header").at(0.0, 64.0));
        page.insert_child(header, Element::new().with_id("dark-mode-toggle"));
        page.insert_child(header, Element::new().with_id("mobile-menu-button"));
        let nav = page.insert_child(header, Element::new().with_class("header-nav"));
        page.insert_child(
            nav,
            Element::new().with_class("nav-link").with_attr("href", "#about"),
        );
        page.insert(Element::new().with_id("typing-text").at(200.0, 40.0));
        page.insert(
            Element::new()
                .with_id("about")
                .with_class("reveal-element")
                .at(900.0, 300.0),
        );
        page
    }

    fn mounted(page: &mut Page) -> (Controller, Scheduler, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let prefs = PrefStore::at(dir.path().join("prefs.toml"));
        let mut scheduler = Scheduler::new();
        let controller = Controller::mount(page, &Config::default(), prefs, None, &mut scheduler);
        (controller, scheduler, dir)
    }

    #[test]
    fn test_full_page_wires_everything() {
        let mut page = full_page();
        let (controller, _, _dir) = mounted(&mut page);
        for behavior in Behavior::ALL {
            assert!(controller.is_wired(behavior), "{} unwired", behavior.name());
        }
        // Progress indicator got inserted at mount
        assert!(page.find_id("scroll-progress").is_some());
    }

    #[test]
    fn test_empty_page_skips_optional_behaviors() {
        let mut page = Page::new(600.0, 400.0);
        let (controller, mut scheduler, _dir) = mounted(&mut page);

        assert!(controller.is_wired(Behavior::ScrollVisuals));
        assert!(!controller.is_wired(Behavior::Reveal));
        assert!(!controller.is_wired(Behavior::ThemeToggle));
        assert!(!controller.is_wired(Behavior::MobileMenu));
        assert!(!controller.is_wired(Behavior::AnchorNav));
        assert!(!controller.is_wired(Behavior::Typewriter));

        // And dispatch on such a page must stay inert
        let mut controller = controller;
        controller.dispatch(&mut page, &mut scheduler, PageEvent::Click(ClickEvent::outside()));
        controller.dispatch(&mut page, &mut scheduler, PageEvent::Frame);
    }

    #[test]
    fn test_menu_click_through_dispatch_does_not_double_toggle() {
        let mut page = full_page();
        let (mut controller, mut scheduler, _dir) = mounted(&mut page);
        let button = page.find_id("mobile-menu-button").unwrap();

        controller.dispatch(
            &mut page,
            &mut scheduler,
            PageEvent::Click(ClickEvent::on(button)),
        );
        assert!(controller.menu_open(&page));

        // Clicking elsewhere closes it
        let body = page.body();
        controller.dispatch(
            &mut page,
            &mut scheduler,
            PageEvent::Click(ClickEvent::on(body)),
        );
        assert!(!controller.menu_open(&page));
    }

    #[test]
    fn test_theme_button_click_closes_menu_too() {
        let mut page = full_page();
        let (mut controller, mut scheduler, _dir) = mounted(&mut page);
        let menu_btn = page.find_id("mobile-menu-button").unwrap();
        let theme_btn = page.find_id("dark-mode-toggle").unwrap();

        controller.dispatch(&mut page, &mut scheduler, PageEvent::Click(ClickEvent::on(menu_btn)));
        controller.dispatch(&mut page, &mut scheduler, PageEvent::Click(ClickEvent::on(theme_btn)));

        assert_eq!(controller.theme_mode(), ThemeMode::Dark);
        assert!(!controller.menu_open(&page));
    }

    #[test]
    fn test_anchor_click_scrolls_and_updates_progress_next_frame() {
        let mut page = full_page();
        let (mut controller, mut scheduler, _dir) = mounted(&mut page);
        let link = page.find_class("nav-link").unwrap();

        controller.dispatch(&mut page, &mut scheduler, PageEvent::Click(ClickEvent::on(link)));
        // 900 - 64 - 20
        assert_eq!(page.scroll_y(), 816.0);
        assert_eq!(controller.scroll_fraction(), 0.0);

        controller.dispatch(&mut page, &mut scheduler, PageEvent::Frame);
        assert_eq!(controller.scroll_fraction(), 816.0 / 2000.0);
    }

    #[test]
    fn test_typewriter_runs_and_can_be_stopped() {
        let mut page = full_page();
        let (mut controller, mut scheduler, _dir) = mounted(&mut page);
        let target = page.find_id("typing-text").unwrap();

        // First step was scheduled at mount with no delay
        for (_, task) in scheduler.advance(Duration::ZERO) {
            controller.dispatch(&mut page, &mut scheduler, PageEvent::Timer(task));
        }
        // Walk a few 100ms type steps
        for _ in 0..3 {
            for (_, task) in scheduler.advance(Duration::from_millis(100)) {
                controller.dispatch(&mut page, &mut scheduler, PageEvent::Timer(task));
            }
        }
        assert!(!page.element(target).text.is_empty());
        assert!(controller.typewriter_running());

        controller.stop_typewriter(&mut scheduler);
        assert!(!controller.typewriter_running());
        assert!(scheduler.advance(Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_skill_fill_round_trip_through_dispatch() {
        let mut page = Page::new(600.0, 2000.0);
        let item = page.insert(Element::new().with_class("skill-item").at(100.0, 80.0));
        let bar = page.insert_child(
            item,
            Element::new()
                .with_class("skill-bar-fill")
                .with_attr("data-percentage", "70"),
        );
        let (mut controller, mut scheduler, _dir) = mounted(&mut page);

        controller.dispatch(&mut page, &mut scheduler, PageEvent::Frame);
        for (_, task) in scheduler.advance(Duration::from_millis(200)) {
            controller.dispatch(&mut page, &mut scheduler, PageEvent::Timer(task));
        }
        assert_eq!(page.element(bar).style("width"), Some("70%"));
    }
}
