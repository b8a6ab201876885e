//! Startup animation: the title appears line by line, then the controls are
//! flashed one hint at a time.

use std::time::{Duration, Instant};

pub const TITLE: [&str; 4] = [
    " ___ ___ ___ ___ ",
    "|_  |   | | | . |",
    "|  _| | |_  | . |",
    "|___|___| |_|___|",
];

const LINE_DELAY: Duration = Duration::from_millis(200);

/// (text, how long it stays up). Blank text is a pause.
const HINTS: [(&str, Duration); 3] = [
    ("Press ◀ ▲ ▼ ▶ to move.", Duration::from_millis(1500)),
    ("", Duration::from_millis(500)),
    ("Press 'q' to quit.", Duration::from_millis(1500)),
];

#[derive(Debug, Clone, Copy)]
pub struct Intro {
    started: Instant,
    elapsed: Duration,
}

impl Intro {
    pub fn start(now: Instant) -> Self {
        Intro {
            started: now,
            elapsed: Duration::ZERO,
        }
    }

    pub fn update(&mut self, now: Instant) {
        self.elapsed = now.saturating_duration_since(self.started);
    }

    /// Number of title lines currently shown
    pub fn title_rows(&self) -> usize {
        let shown = (self.elapsed.as_millis() / LINE_DELAY.as_millis()) as usize + 1;
        shown.min(TITLE.len())
    }

    /// Hint currently on screen, if any.
    pub fn hint(&self) -> Option<&'static str> {
        let mut at = title_duration();
        for (text, length) in HINTS {
            if self.elapsed >= at && self.elapsed < at + length {
                return (!text.is_empty()).then_some(text);
            }
            at += length;
        }
        None
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= total_duration()
    }
}

fn title_duration() -> Duration {
    LINE_DELAY * TITLE.len() as u32
}

fn total_duration() -> Duration {
    HINTS.iter().fold(title_duration(), |acc, (_, length)| acc + *length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Intro {
        let start = Instant::now();
        let mut intro = Intro::start(start);
        intro.update(start + Duration::from_millis(ms));
        intro
    }

    #[test]
    fn test_title_revealed_line_by_line() {
        assert_eq!(at(0).title_rows(), 1);
        assert_eq!(at(199).title_rows(), 1);
        assert_eq!(at(200).title_rows(), 2);
        assert_eq!(at(650).title_rows(), 4);
        assert_eq!(at(5000).title_rows(), 4);
    }

    #[test]
    fn test_hints_follow_title() {
        assert_eq!(at(500).hint(), None);
        assert_eq!(at(800).hint(), Some("Press ◀ ▲ ▼ ▶ to move."));
        assert_eq!(at(2400).hint(), None);
        assert_eq!(at(2900).hint(), Some("Press 'q' to quit."));
        assert_eq!(at(4400).hint(), None);
    }

    #[test]
    fn test_finishes_after_last_hint() {
        assert!(!at(4299).is_finished());
        assert!(at(4300).is_finished());
    }
}
