//! The per-destination-index match memo.
//!
//! The range partition revisits destination indices across nested
//! sub-ranges with ever narrower source windows.  This cache remembers the
//! outcome of the last search per index together with the window it is
//! valid for, so a revisit only recomputes when the narrower request could
//! actually change the answer.  It is purely a performance optimization;
//! dropping every entry would slow the search down but never change the
//! report.

use std::ops::Range;

/// The memoized search outcome for one destination index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MatchState {
    /// No search has touched this index yet.
    Unknown,
    /// No run of any length exists for this index anywhere in `window`.
    NoMatch { window: Range<usize> },
    /// The best run found, plus the destination-length bound in force
    /// when it was recorded.
    Matched {
        source_index: usize,
        len: usize,
        max_len: usize,
    },
}

pub(crate) struct MatchCache {
    states: Vec<MatchState>,
}

impl MatchCache {
    /// Creates a cache with one `Unknown` state per destination index.
    pub(crate) fn new(dest_len: usize) -> MatchCache {
        MatchCache {
            states: vec![MatchState::Unknown; dest_len],
        }
    }

    /// Looks up a memoized result for `dest_index` under the given source
    /// window and destination-length bound.
    ///
    /// Returns `None` when the entry is absent or not reusable for this
    /// request, `Some(None)` for a reusable no-match and
    /// `Some(Some((source_index, len)))` for a reusable match.
    pub(crate) fn lookup(
        &self,
        dest_index: usize,
        window: &Range<usize>,
        max_len: usize,
    ) -> Option<Option<(usize, usize)>> {
        match &self.states[dest_index] {
            MatchState::Unknown => None,
            // a narrower window cannot contain a run the wider one lacked
            MatchState::NoMatch { window: recorded } => {
                if window.start >= recorded.start && window.end <= recorded.end {
                    Some(None)
                } else {
                    None
                }
            }
            // the recorded run must lie inside the requested window and
            // the bound it was computed under must still be in force
            MatchState::Matched {
                source_index,
                len,
                max_len: recorded_max,
            } => {
                if *source_index >= window.start
                    && source_index + len <= window.end
                    && max_len >= *recorded_max
                {
                    Some(Some((*source_index, *len)))
                } else {
                    None
                }
            }
        }
    }

    pub(crate) fn record_match(
        &mut self,
        dest_index: usize,
        source_index: usize,
        len: usize,
        max_len: usize,
    ) {
        self.states[dest_index] = MatchState::Matched {
            source_index,
            len,
            max_len,
        };
    }

    pub(crate) fn record_no_match(&mut self, dest_index: usize, window: Range<usize>) {
        self.states[dest_index] = MatchState::NoMatch { window };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_is_never_reused() {
        let cache = MatchCache::new(4);
        assert_eq!(cache.lookup(0, &(0..10), 5), None);
    }

    #[test]
    fn test_no_match_window_containment() {
        let mut cache = MatchCache::new(1);
        cache.record_no_match(0, 2..8);
        assert_eq!(cache.lookup(0, &(2..8), 5), Some(None));
        assert_eq!(cache.lookup(0, &(3..7), 1), Some(None));
        // wider or shifted windows could contain a run we never saw
        assert_eq!(cache.lookup(0, &(1..8), 5), None);
        assert_eq!(cache.lookup(0, &(2..9), 5), None);
    }

    #[test]
    fn test_match_reuse_requires_containment_and_bound() {
        let mut cache = MatchCache::new(1);
        cache.record_match(0, 4, 3, 6);
        assert_eq!(cache.lookup(0, &(0..10), 6), Some(Some((4, 3))));
        assert_eq!(cache.lookup(0, &(4..7), 8), Some(Some((4, 3))));
        // run sticks out of the requested window
        assert_eq!(cache.lookup(0, &(5..10), 6), None);
        assert_eq!(cache.lookup(0, &(0..6), 6), None);
        // tighter destination bound than at memo time
        assert_eq!(cache.lookup(0, &(0..10), 5), None);
    }
}
