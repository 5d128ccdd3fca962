// Scroll visuals - progress indicator and header visibility
//
// Scroll events only raise a per-frame guard; the actual class/style work
// runs once per frame, reading the page's current offset. This coalesces
// bursts of scroll events into a single visual update, exactly one per
// rendered frame.
//
// Mounting inserts the progress-indicator element into the page; the header
// is optional and its class/transform handling is skipped when absent.

use crate::config::ScrollConfig;
use crate::page::{Element, ElementId, Page};

/// Frame-coalesced scroll state
#[derive(Debug)]
pub struct ScrollVisuals {
    header: Option<ElementId>,
    progress: ElementId,
    /// Offset as of the last applied frame, for direction detection
    last_y: f64,
    /// Raised by scroll events, cleared when a frame applies the update
    pending: bool,
    fraction: f64,
    scrolled_px: f64,
    hide_px: f64,
}

impl ScrollVisuals {
    /// Wire up against the page: find the header, insert the progress bar
    pub fn mount(page: &mut Page, config: &ScrollConfig) -> Self {
        let header = page.find_class("main-header");
        let progress = page.insert(
            Element::new()
                .with_id("scroll-progress")
                .with_class("scroll-progress"),
        );
        page.element_mut(progress)
            .set_style("transform", "scaleX(0.0000)");
        Self {
            header,
            progress,
            last_y: page.scroll_y(),
            pending: false,
            fraction: 0.0,
            scrolled_px: config.scrolled_px,
            hide_px: config.hide_px,
        }
    }

    /// A scroll happened; the visual update waits for the next frame
    pub fn on_scroll(&mut self) {
        self.pending = true;
    }

    /// Apply the coalesced update, if one is pending
    pub fn on_frame(&mut self, page: &mut Page) {
        if !self.pending {
            return;
        }
        let y = page.scroll_y();

        if let Some(header) = self.header {
            let el = page.element_mut(header);
            el.set_class("scrolled", y > self.scrolled_px);
            let hidden = y > self.last_y && y > self.hide_px;
            el.set_style(
                "transform",
                if hidden {
                    "translateY(-100%)"
                } else {
                    "translateY(0)"
                },
            );
        }

        let max = page.max_scroll();
        self.fraction = if max > 0.0 {
            (y / max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        page.element_mut(self.progress)
            .set_style("transform", format!("scaleX({:.4})", self.fraction));

        self.last_y = y;
        self.pending = false;
    }

    /// Progress fraction as of the last applied frame
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn progress_element(&self) -> ElementId {
        self.progress
    }

    /// Whether the header is currently translated off-screen
    pub fn header_hidden(&self, page: &Page) -> bool {
        self.header
            .is_some_and(|h| page.element(h).style("transform") == Some("translateY(-100%)"))
    }
}
