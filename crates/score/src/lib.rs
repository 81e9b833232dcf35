//! Score tracking module - accumulator with persisted high score
//!
//! [`ScoreTracker`] accumulates the current score and keeps the high score
//! monotonically non-decreasing, persisting it through a [`ScoreStore`]
//! whenever the current score surpasses it. The board reaches the tracker
//! through the core's `ScoreSink` port; a display collaborator, when bound,
//! receives formatted readouts after every change.

pub mod store;

pub use store::{JsonFileStore, MemoryStore, ScoreStore, HIGH_SCORE_KEY};

use blockfall_core::board::ScoreSink;

/// Display collaborator port. Receives ready-to-draw readout lines after
/// any score change; absence is tolerated, not an error.
pub trait ScoreDisplay {
    fn show(&mut self, score: &str, high_score: &str);
}

/// Shared single-threaded handles can stand in for the display itself.
impl<T: ScoreDisplay> ScoreDisplay for std::rc::Rc<std::cell::RefCell<T>> {
    fn show(&mut self, score: &str, high_score: &str) {
        self.borrow_mut().show(score, high_score);
    }
}

/// Current score plus persisted high score.
pub struct ScoreTracker {
    score: u64,
    high_score: u64,
    store: Box<dyn ScoreStore>,
    display: Option<Box<dyn ScoreDisplay>>,
}

impl ScoreTracker {
    /// Read the persisted high score (default 0) and start at zero.
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        let high_score = store.get(HIGH_SCORE_KEY, 0);
        Self {
            score: 0,
            high_score,
            store,
            display: None,
        }
    }

    /// Bind a display collaborator and push the initial readout.
    pub fn with_display(mut self, display: Box<dyn ScoreDisplay>) -> Self {
        self.display = Some(display);
        self.push_display();
        self
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Add points; persist the high score when the current score passes it.
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
        if self.score > self.store.get(HIGH_SCORE_KEY, 0) {
            self.high_score = self.score;
            self.store.set(HIGH_SCORE_KEY, self.score);
        }
        self.push_display();
    }

    /// Zero the current score. The high score and its stored value are
    /// untouched.
    pub fn reset_score(&mut self) {
        self.score = 0;
        self.push_display();
    }

    fn push_display(&mut self) {
        if let Some(display) = &mut self.display {
            display.show(
                &format!("Score: {}", self.score),
                &format!("High Score: {}", self.high_score),
            );
        }
    }
}

impl ScoreSink for ScoreTracker {
    fn add_score(&mut self, points: u64) {
        ScoreTracker::add_score(self, points);
    }

    fn reset_score(&mut self) {
        ScoreTracker::reset_score(self);
    }
}
