// Reveal-on-scroll - one-way visibility transitions
//
// Elements marked `reveal-element` or `skill-item` sit in an observed set.
// Each frame, every still-observed element is checked against the viewport
// shrunk by a bottom margin; once enough of it is visible it gains the
// `is-revealed` class and leaves the set, so the transition fires at most
// once per element and revealed elements are never re-hidden.
//
// Skill items additionally get a delayed width animation: a timer set at
// reveal time writes the bar's declared percentage into its width style.

use crate::config::RevealConfig;
use crate::events::TimerTask;
use crate::page::{ElementId, Page};
use crate::scheduler::Scheduler;
use std::time::Duration;

/// Observed-element set plus the visibility parameters
#[derive(Debug)]
pub struct RevealObserver {
    observed: Vec<ElementId>,
    visible_fraction: f64,
    bottom_margin_px: f64,
    fill_delay: Duration,
}

impl RevealObserver {
    /// Collect the observed set; returns None when the page has nothing to watch
    pub fn mount(page: &Page, config: &RevealConfig) -> Option<Self> {
        let mut observed = page.all_with_class("reveal-element");
        for id in page.all_with_class("skill-item") {
            if !observed.contains(&id) {
                observed.push(id);
            }
        }
        if observed.is_empty() {
            return None;
        }
        Some(Self {
            observed,
            visible_fraction: config.visible_fraction,
            bottom_margin_px: config.bottom_margin_px,
            fill_delay: Duration::from_millis(config.fill_delay_ms),
        })
    }

    /// Per-frame visibility pass over the remaining observed elements
    pub fn check(&mut self, page: &mut Page, scheduler: &mut Scheduler) {
        let view_top = page.scroll_y();
        let view_bottom = view_top + page.viewport_height() - self.bottom_margin_px;

        let due: Vec<ElementId> = self
            .observed
            .iter()
            .copied()
            .filter(|&id| {
                let el = page.element(id);
                visible_fraction(el.top, el.height, view_top, view_bottom) >= self.visible_fraction
            })
            .collect();

        for id in due {
            self.observed.retain(|&o| o != id);
            page.element_mut(id).add_class("is-revealed");
            tracing::debug!("Revealed element {:?}", page.element(id).id);

            if page.element(id).has_class("skill-item") {
                self.schedule_fill(page, id, scheduler);
            }
        }
    }

    /// Queue the delayed bar-fill for a revealed skill item, when it carries
    /// a usable percentage
    fn schedule_fill(&self, page: &Page, item: ElementId, scheduler: &mut Scheduler) {
        let Some(bar) = page.descendant_with_class(item, "skill-bar-fill") else {
            return;
        };
        let Some(percent) = page
            .element(bar)
            .attr("data-percentage")
            .and_then(|p| p.parse::<f64>().ok())
        else {
            return;
        };
        scheduler.schedule(self.fill_delay, TimerTask::SkillFill { bar, percent });
    }

    /// Elements still waiting to be revealed
    pub fn observed(&self) -> &[ElementId] {
        &self.observed
    }
}

/// Apply a fired bar-fill timer
pub fn fill_bar(page: &mut Page, bar: ElementId, percent: f64) {
    page.element_mut(bar).set_style("width", format!("{percent}%"));
}

/// Fraction of an element lying inside the (margin-shrunk) viewport.
/// Zero-height elements count as fully visible while their top is inside.
fn visible_fraction(top: f64, height: f64, view_top: f64, view_bottom: f64) -> f64 {
    if height <= 0.0 {
        return if top >= view_top && top <= view_bottom {
            1.0
        } else {
            0.0
        };
    }
    let overlap = (top + height).min(view_bottom) - top.max(view_top);
    (overlap / height).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Element;

    fn setup() -> (Page, RevealObserver, Scheduler) {
        // 600px viewport over a 2000px document; section sits below the fold
        let mut page = Page::new(600.0, 2000.0);
        page.insert(Element::new().with_class("reveal-element").at(700.0, 200.0));
        let item = page.insert(Element::new().with_class("skill-item").at(1200.0, 100.0));
        page.insert_child(
            item,
            Element::new()
                .with_class("skill-bar-fill")
                .with_attr("data-percentage", "85"),
        );
        let observer = RevealObserver::mount(&page, &RevealConfig::default()).unwrap();
        (page, observer, Scheduler::new())
    }

    #[test]
    fn test_mount_skips_empty_page() {
        let page = Page::new(600.0, 2000.0);
        assert!(RevealObserver::mount(&page, &RevealConfig::default()).is_none());
    }

    #[test]
    fn test_element_reveals_when_enough_is_visible() {
        let (mut page, mut observer, mut sched) = setup();
        let section = page.find_class("reveal-element").unwrap();

        // Top of the section barely inside the margin-shrunk viewport: under 15%
        page.scroll_to(170.0);
        observer.check(&mut page, &mut sched);
        assert!(!page.element(section).has_class("is-revealed"));

        // 30 of 200px visible (15%) once the margin is accounted for
        page.scroll_to(180.0);
        observer.check(&mut page, &mut sched);
        assert!(page.element(section).has_class("is-revealed"));
    }

    #[test]
    fn test_reveal_fires_at_most_once_and_sticks() {
        let (mut page, mut observer, mut sched) = setup();
        let section = page.find_class("reveal-element").unwrap();

        page.scroll_to(400.0);
        observer.check(&mut page, &mut sched);
        assert!(page.element(section).has_class("is-revealed"));
        assert!(!observer.observed().contains(&section));

        // Scroll away and back: still revealed, still unobserved
        page.scroll_to(0.0);
        observer.check(&mut page, &mut sched);
        page.scroll_to(400.0);
        observer.check(&mut page, &mut sched);
        assert!(page.element(section).has_class("is-revealed"));
    }

    #[test]
    fn test_skill_reveal_schedules_delayed_fill() {
        let (mut page, mut observer, mut sched) = setup();
        let bar = page.find_class("skill-bar-fill").unwrap();

        page.scroll_to(900.0);
        observer.check(&mut page, &mut sched);
        assert_eq!(page.element(bar).style("width"), None);

        let due = sched.advance(Duration::from_millis(200));
        assert_eq!(due.len(), 1);
        let (_, TimerTask::SkillFill { bar, percent }) = due.into_iter().next().unwrap() else {
            panic!("expected a skill fill task");
        };
        fill_bar(&mut page, bar, percent);
        assert_eq!(page.element(bar).style("width"), Some("85%"));
    }

    #[test]
    fn test_bar_without_percentage_is_skipped() {
        let mut page = Page::new(600.0, 2000.0);
        let item = page.insert(Element::new().with_class("skill-item").at(100.0, 100.0));
        page.insert_child(item, Element::new().with_class("skill-bar-fill"));
        let mut observer = RevealObserver::mount(&page, &RevealConfig::default()).unwrap();
        let mut sched = Scheduler::new();

        observer.check(&mut page, &mut sched);
        assert!(page.element(item).has_class("is-revealed"));
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_visible_fraction_math() {
        // Fully inside
        assert_eq!(visible_fraction(100.0, 50.0, 0.0, 600.0), 1.0);
        // Fully outside
        assert_eq!(visible_fraction(700.0, 50.0, 0.0, 600.0), 0.0);
        // Half straddling the bottom edge
        assert_eq!(visible_fraction(575.0, 50.0, 0.0, 600.0), 0.5);
        // Zero-height marker
        assert_eq!(visible_fraction(300.0, 0.0, 0.0, 600.0), 1.0);
        assert_eq!(visible_fraction(900.0, 0.0, 0.0, 600.0), 0.0);
    }
}
