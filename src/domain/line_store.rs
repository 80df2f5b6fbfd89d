//! In-memory state for a single line resource.
//!
//! A `LineStore` owns the ordered lines of one resource and the cursor
//! pointing at the next line to hand out. It performs no I/O; the
//! registry decides when cursor changes are persisted.

use rand::Rng;

/// Lines of one resource plus its read position.
///
/// Invariant: `cursor <= lines.len()`. The cursor equals `lines.len()` only
/// in the exhausted state, which is reachable under the stop policy alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStore {
    lines: Vec<String>,
    cursor: usize,
}

impl LineStore {
    /// Create a store positioned at the first line.
    #[must_use]
    pub const fn new(lines: Vec<String>) -> Self {
        Self { lines, cursor: 0 }
    }

    /// Number of lines.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.lines.len()
    }

    /// Index of the next line to be returned.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current line order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether the cursor sits past the last line.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.cursor == self.lines.len()
    }

    /// Return the line under the cursor and move past it.
    ///
    /// With `wrap`, reaching the end folds the cursor back to 0 within the
    /// same call. Without it, the cursor stops at `count()` and every later
    /// call returns `None` until [`reset`](Self::reset).
    pub fn advance(&mut self, wrap: bool) -> Option<String> {
        if self.lines.is_empty() {
            return None;
        }

        if self.is_exhausted() {
            if !wrap {
                return None;
            }
            self.cursor = 0;
        }

        let line = self.lines[self.cursor].clone();
        self.cursor += 1;

        if wrap && self.cursor == self.lines.len() {
            self.cursor = 0;
        }

        Some(line)
    }

    /// Place the cursor at `cursor`, which may equal `count()`.
    ///
    /// Returns `false` and leaves the cursor alone if it is out of range.
    pub fn seek(&mut self, cursor: usize) -> bool {
        if cursor > self.lines.len() {
            return false;
        }
        self.cursor = cursor;
        true
    }

    /// Move the cursor back to the first line.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Fisher-Yates shuffle of the lines. The cursor is a position and is
    /// left where it is.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.lines.len()).rev() {
            let j = rng.gen_range(0..=i);
            self.lines.swap(i, j);
        }
    }

    /// Reverse the line order in place. The cursor is left where it is.
    pub fn reverse(&mut self) {
        self.lines.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn colors() -> LineStore {
        LineStore::new(vec!["red".into(), "green".into(), "blue".into()])
    }

    #[test]
    fn test_wrap_cycles_back_to_start() {
        let mut store = colors();
        let got: Vec<_> = (0..4).filter_map(|_| store.advance(true)).collect();

        assert_eq!(got, ["red", "green", "blue", "red"]);
        assert_eq!(store.cursor(), 1);
    }

    #[test]
    fn test_stop_policy_exhausts() {
        let mut store = colors();
        assert_eq!(store.advance(false).as_deref(), Some("red"));
        assert_eq!(store.advance(false).as_deref(), Some("green"));
        assert_eq!(store.advance(false).as_deref(), Some("blue"));
        assert!(store.is_exhausted());

        assert_eq!(store.advance(false), None);
        assert_eq!(store.cursor(), 3);
    }

    #[test]
    fn test_reset_leaves_exhausted_state() {
        let mut store = colors();
        for _ in 0..4 {
            store.advance(false);
        }
        store.reset();

        assert_eq!(store.advance(false).as_deref(), Some("red"));
    }

    #[test]
    fn test_wrap_from_exhausted_position_reads_first_line() {
        let mut store = LineStore::new(vec!["a".into(), "b".into()]);
        assert!(store.seek(2));

        assert_eq!(store.advance(true).as_deref(), Some("a"));
        assert_eq!(store.cursor(), 1);
    }

    #[test]
    fn test_empty_store_never_yields() {
        let mut store = LineStore::new(Vec::new());

        assert_eq!(store.count(), 0);
        assert_eq!(store.advance(true), None);
        assert_eq!(store.advance(false), None);
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn test_seek_rejects_out_of_range() {
        let mut store = LineStore::new(vec!["a".into()]);
        store.advance(false);

        assert!(!store.seek(2));
        assert_eq!(store.cursor(), 1);
        assert!(store.seek(0));
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn test_reverse_twice_is_identity() {
        let mut store = colors();
        store.reverse();
        assert_eq!(store.lines(), ["blue", "green", "red"]);

        store.reverse();
        assert_eq!(store.lines(), colors().lines());
    }

    #[test]
    fn test_shuffle_keeps_lines_and_cursor() {
        let mut store = LineStore::new((0..50).map(|i| i.to_string()).collect());
        store.advance(true);
        let mut rng = StdRng::seed_from_u64(7);

        store.shuffle(&mut rng);

        let mut sorted = store.lines().to_vec();
        sorted.sort_by_key(|s| s.parse::<u32>().unwrap());
        let expected: Vec<String> = (0..50).map(|i| i.to_string()).collect();
        assert_eq!(sorted, expected);
        assert_eq!(store.cursor(), 1);
    }

    #[test]
    fn test_shuffle_is_deterministic_for_a_seed() {
        let mut a = LineStore::new((0..20).map(|i| i.to_string()).collect());
        let mut b = a.clone();

        a.shuffle(&mut StdRng::seed_from_u64(42));
        b.shuffle(&mut StdRng::seed_from_u64(42));

        assert_eq!(a, b);
    }
}
