// Events that flow from the input surface into the page controller
//
// The controller is driven entirely by these discrete events: scroll
// notifications, per-frame ticks, clicks and timer expirations. Using an
// enum keeps dispatch a pattern match and lets tests feed the controller
// a scripted sequence without any terminal attached.

use crate::page::ElementId;

/// An input event delivered to the controller
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// The viewport scrolled to a new absolute offset
    Scroll { y: f64 },
    /// One rendered frame elapsed; coalesced scroll work runs here
    Frame,
    /// A pointer click somewhere on the page
    Click(ClickEvent),
    /// A scheduled timer fired
    Timer(TimerTask),
}

impl PageEvent {
    /// Coarse kind, used to match events against registration-table bindings
    pub fn kind(&self) -> EventKind {
        match self {
            PageEvent::Scroll { .. } => EventKind::Scroll,
            PageEvent::Frame => EventKind::Frame,
            PageEvent::Click(_) => EventKind::Click,
            PageEvent::Timer(_) => EventKind::Timer,
        }
    }
}

/// Event classes a behavior can bind to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Scroll,
    Frame,
    Click,
    Timer,
}

/// A click with browser-like propagation semantics.
///
/// Handlers run in registration order; a handler that calls
/// [`ClickEvent::stop_propagation`] prevents later document-level handlers
/// (the menu's outside-click close) from acting on the same click.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    /// The clicked element, or `None` for a click on bare document space
    pub target: Option<ElementId>,
    propagation_stopped: bool,
}

impl ClickEvent {
    pub fn on(target: ElementId) -> Self {
        Self {
            target: Some(target),
            propagation_stopped: false,
        }
    }

    /// A click that hits no element at all
    pub fn outside() -> Self {
        Self {
            target: None,
            propagation_stopped: false,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Work items carried by scheduler timers
#[derive(Debug, Clone, PartialEq)]
pub enum TimerTask {
    /// Advance the typewriter one step
    TypewriterStep,
    /// Animate a skill bar's width to its declared percentage
    SkillFill { bar: ElementId, percent: f64 },
}
