// Typewriter - phrase cycling as an explicit state machine
//
// The original implementation was a self-rescheduling timeout closure. Here
// the state (phrase index, character count, deleting flag) is a struct and
// `step()` is the transition function: it renders the current prefix into
// the target element and returns the delay until the next step. The
// scheduler owns the rescheduling, which is what makes the loop cancellable
// (see Controller::stop_typewriter).

use crate::config::TypingConfig;
use crate::page::{ElementId, Page};
use std::time::Duration;

/// Typewriter state over a fixed phrase list
#[derive(Debug)]
pub struct Typewriter {
    target: ElementId,
    phrases: Vec<String>,
    phrase: usize,
    chars: usize,
    deleting: bool,
    type_delay: Duration,
    delete_delay: Duration,
    hold_delay: Duration,
    rest_delay: Duration,
}

impl Typewriter {
    /// Bind to the typing target; skipped when the element or phrases are absent
    pub fn mount(page: &Page, config: &TypingConfig) -> Option<Self> {
        let target = page.find_id("typing-text")?;
        if config.phrases.is_empty() {
            return None;
        }
        Some(Self {
            target,
            phrases: config.phrases.clone(),
            phrase: 0,
            chars: 0,
            deleting: false,
            type_delay: Duration::from_millis(config.type_ms),
            delete_delay: Duration::from_millis(config.delete_ms),
            hold_delay: Duration::from_millis(config.hold_ms),
            rest_delay: Duration::from_millis(config.rest_ms),
        })
    }

    /// Render the current prefix, advance the machine, return the next delay.
    ///
    /// Boundaries flip the deleting flag: a fully-typed phrase holds before
    /// deletion starts, a fully-deleted one rests before the next phrase
    /// (advancing cyclically) starts typing.
    pub fn step(&mut self, page: &mut Page) -> Duration {
        let phrase = &self.phrases[self.phrase];
        let len = phrase.chars().count();
        page.element_mut(self.target).text = phrase.chars().take(self.chars).collect();

        if !self.deleting && self.chars < len {
            self.chars += 1;
            self.type_delay
        } else if self.deleting && self.chars > 0 {
            self.chars -= 1;
            self.delete_delay
        } else {
            self.deleting = !self.deleting;
            if !self.deleting {
                self.phrase = (self.phrase + 1) % self.phrases.len();
            }
            if self.deleting {
                self.hold_delay
            } else {
                self.rest_delay
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Element;
    use pretty_assertions::assert_eq;

    fn setup(phrases: &[&str]) -> (Page, Typewriter) {
        let mut page = Page::new(600.0, 2000.0);
        page.insert(Element::new().with_id("typing-text"));
        let config = TypingConfig {
            phrases: phrases.iter().map(|s| s.to_string()).collect(),
            ..TypingConfig::default()
        };
        let tw = Typewriter::mount(&page, &config).unwrap();
        (page, tw)
    }

    fn run(page: &mut Page, tw: &mut Typewriter, steps: usize) -> Vec<(String, u64)> {
        (0..steps)
            .map(|_| {
                let delay = tw.step(page);
                let text = page.element(page.find_id("typing-text").unwrap()).text.clone();
                (text, delay.as_millis() as u64)
            })
            .collect()
    }

    #[test]
    fn test_exact_two_phrase_cycle() {
        let (mut page, mut tw) = setup(&["A.", "B."]);
        let trace = run(&mut page, &mut tw, 14);

        let expected: Vec<(String, u64)> = [
            ("", 100),   // start typing "A."
            ("A", 100),
            ("A.", 1500), // fully typed: hold
            ("A.", 50),   // start deleting
            ("A", 50),
            ("", 500),   // fully deleted: rest, advance to "B."
            ("", 100),
            ("B", 100),
            ("B.", 1500),
            ("B.", 50),
            ("B", 50),
            ("", 500),   // wrap back to "A."
            ("", 100),
            ("A", 100),
        ]
        .into_iter()
        .map(|(s, d)| (s.to_string(), d))
        .collect();

        assert_eq!(trace, expected);
    }

    #[test]
    fn test_single_phrase_loops_forever() {
        let (mut page, mut tw) = setup(&["Hi"]);
        // Two full cycles: 2 typing + hold + 2 deleting + rest = 6 steps each
        let trace = run(&mut page, &mut tw, 12);
        assert_eq!(trace[2], ("Hi".to_string(), 1500));
        assert_eq!(trace[8], ("Hi".to_string(), 1500));
    }

    #[test]
    fn test_multibyte_phrases_step_by_character() {
        let (mut page, mut tw) = setup(&["Café ☕"]);
        let trace = run(&mut page, &mut tw, 7);

        assert_eq!(trace[3].0, "Caf");
        assert_eq!(trace[4].0, "Café");
        assert_eq!(trace[6].0, "Café ☕");
        assert_eq!(trace[6].1, 1500);
    }

    #[test]
    fn test_mount_skipped_without_target_or_phrases() {
        let page = Page::new(600.0, 2000.0);
        assert!(Typewriter::mount(&page, &TypingConfig::default()).is_none());

        let (page, _) = setup(&["x"]);
        let empty = TypingConfig {
            phrases: vec![],
            ..TypingConfig::default()
        };
        assert!(Typewriter::mount(&page, &empty).is_none());
    }
}
