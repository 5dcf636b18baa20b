/// Undo/redo buffer behind the composer's text input.
///
/// Every distinct value passed to [`TextHistory::set`] becomes its own undo
/// step. The buffer is decoupled from any input widget so the logic stays
/// isolated and easy to test.
#[derive(Debug, Clone)]
pub struct TextHistory {
    entries: Vec<String>,

    /// Index of the present value within `entries`. Everything after it is
    /// the redo tail.
    cursor: usize,

    max_entries: usize,
}

pub const DEFAULT_MAX_ENTRIES: usize = 500;

impl Default for TextHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl TextHistory {
    /// `max_entries` bounds the number of retained states, present included.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: vec![String::new()],
            cursor: 0,
            max_entries: max_entries.max(1),
        }
    }

    pub fn current(&self) -> &str {
        self.entries
            .get(self.cursor)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Make `text` the present value. Discards the redo tail.
    pub fn set(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.current() == text {
            return;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(text);
        if self.entries.len() > self.max_entries {
            let drop_count = self.entries.len() - self.max_entries;
            self.entries.drain(0..drop_count);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one state. Returns false at the oldest state.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one state. Returns false at the newest state.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Reset to empty text and forget all history.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.entries.push(String::new());
        self.cursor = 0;
    }

    /// Number of steps [`TextHistory::undo`] can currently take.
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn undo_and_redo_are_noops_at_boundaries() {
        let mut history = TextHistory::default();
        assert!(!history.can_undo());
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(history.current(), "");

        history.set("a");
        assert!(history.undo());
        assert!(!history.undo());
        assert_eq!(history.current(), "");
        assert!(history.redo());
        assert!(!history.redo());
        assert_eq!(history.current(), "a");
    }

    #[test]
    fn each_keystroke_is_a_step() {
        let mut history = TextHistory::default();
        for text in ["H", "Hi", "Hi!"] {
            history.set(text);
        }
        assert_eq!(history.undo_depth(), 3);
        history.undo();
        assert_eq!(history.current(), "Hi");
        history.undo();
        assert_eq!(history.current(), "H");
    }

    #[test]
    fn setting_identical_value_is_ignored() {
        let mut history = TextHistory::default();
        history.set("same");
        history.set("same");
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn set_after_undo_discards_redo_tail() {
        let mut history = TextHistory::default();
        history.set("one");
        history.set("two");
        history.undo();
        history.set("three");
        assert!(!history.can_redo());
        history.undo();
        assert_eq!(history.current(), "one");
    }

    #[test]
    fn clear_discards_history() {
        let mut history = TextHistory::default();
        history.set("draft");
        history.set("draft 2");
        history.undo();
        history.clear();
        assert_eq!(history.current(), "");
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn oldest_states_are_dropped_past_the_bound() {
        let mut history = TextHistory::new(3);
        for idx in 0..10 {
            history.set(format!("v{idx}"));
        }
        assert_eq!(history.undo_depth(), 2);
        while history.undo() {}
        assert_eq!(history.current(), "v7");
    }

    #[test]
    fn undo_then_redo_k_times_restores_text() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let mut history = TextHistory::default();
            let mut text = String::new();
            for _ in 0..rng.random_range(1..30) {
                text.push(rng.random_range('a'..='z'));
                history.set(text.clone());
            }
            let before = history.current().to_string();
            let k = rng.random_range(0..=history.undo_depth());
            for _ in 0..k {
                assert!(history.undo());
            }
            for _ in 0..k {
                assert!(history.redo());
            }
            assert_eq!(history.current(), before);
        }
    }
}
