//! The diff engine.
//!
//! The engine partitions the destination index space with a recursive
//! longest-common-span search and hands the raw matches to the report
//! assembler.  It is a tunable heuristic: [`MatchLevel`] trades scan
//! thoroughness for speed, but every level produces a structurally valid
//! (gapless, non-overlapping) edit script.
//!
//! The two-phase surface mirrors how a run is consumed: [`DiffEngine::process`]
//! executes the algorithm and returns the elapsed wall-clock time as a
//! diagnostic, [`DiffEngine::report`] hands out the edit script afterwards.
//! For one-shot use there is [`diff_spans`].
//!
//! ```
//! use spandiff::{diff_spans, CharSequence, MatchLevel};
//!
//! let source = CharSequence::new("ABCABBA");
//! let dest = CharSequence::new("CBABAC");
//! for span in diff_spans(&source, &dest, MatchLevel::default()) {
//!     println!("{:?}", span);
//! }
//! ```

pub(crate) mod cache;
pub(crate) mod search;

use std::time::{Duration, Instant};

use crate::report::{assemble, EditSpan};
use crate::seq::Sequence;
use crate::DiffError;

/// The scan thoroughness of the span search.
///
/// The level decides which match is chosen when multiple candidates exist
/// in a range and how much of the index space is re-examined, not whether
/// the result is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchLevel {
    /// Skip the destination scan past every match found, improving or not.
    /// Cheapest, coarsest.
    FastImperfect,
    /// Skip past a match only when it improves on the best seen so far.
    Medium,
    /// Consider every destination index.  Most thorough, most expensive.
    SlowPerfect,
}

impl Default for MatchLevel {
    /// Returns the default level ([`MatchLevel::SlowPerfect`]).
    fn default() -> MatchLevel {
        MatchLevel::SlowPerfect
    }
}

struct RunOutcome {
    spans: Vec<EditSpan>,
    elapsed: Duration,
}

/// A reusable, two-phase diff runner.
///
/// Construct it, optionally set a [`timeout`](DiffEngine::timeout), call
/// [`process`](DiffEngine::process) and then read the
/// [`report`](DiffEngine::report).  Requesting the report before a run has
/// completed fails with [`DiffError::NotReady`].
pub struct DiffEngine {
    level: MatchLevel,
    timeout: Option<Duration>,
    outcome: Option<RunOutcome>,
}

impl Default for DiffEngine {
    fn default() -> DiffEngine {
        DiffEngine::new()
    }
}

impl DiffEngine {
    /// Creates an engine with the default [`MatchLevel`].
    pub fn new() -> DiffEngine {
        DiffEngine::with_level(MatchLevel::default())
    }

    /// Creates an engine with an explicit [`MatchLevel`].
    pub fn with_level(level: MatchLevel) -> DiffEngine {
        DiffEngine {
            level,
            timeout: None,
            outcome: None,
        }
    }

    /// Returns the configured level.
    pub fn level(&self) -> MatchLevel {
        self.level
    }

    /// Bounds the wall-clock time of a run.
    ///
    /// When the deadline expires the search abandons its remaining ranges
    /// and the uncovered area is reported as coarse Replace/Insert/Delete
    /// spans.  The report stays structurally valid, it just resolves fewer
    /// unchanged runs.
    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    /// Runs the algorithm and stores the report.
    ///
    /// Returns the elapsed wall-clock time, which is a diagnostic and has
    /// no bearing on the result.  A previous report held by the engine is
    /// replaced.
    pub fn process<S, D>(&mut self, source: &S, dest: &D) -> Duration
    where
        S: Sequence + ?Sized,
        D: Sequence<Item = S::Item> + ?Sized,
    {
        let start = Instant::now();
        let deadline = self.timeout.and_then(|t| start.checked_add(t));
        let spans = run(source, dest, self.level, deadline);
        let elapsed = start.elapsed();
        tracing::debug!(
            source_len = source.len(),
            dest_len = dest.len(),
            level = ?self.level,
            spans = spans.len(),
            ?elapsed,
            "diff run complete"
        );
        self.outcome = Some(RunOutcome { spans, elapsed });
        elapsed
    }

    /// Returns the edit script of the last completed run.
    pub fn report(&self) -> Result<&[EditSpan], DiffError> {
        match &self.outcome {
            Some(outcome) => Ok(&outcome.spans),
            None => Err(DiffError::NotReady),
        }
    }

    /// Consumes the engine and returns the edit script of the last
    /// completed run.
    pub fn into_report(self) -> Result<Vec<EditSpan>, DiffError> {
        match self.outcome {
            Some(outcome) => Ok(outcome.spans),
            None => Err(DiffError::NotReady),
        }
    }

    /// Returns the elapsed time of the last completed run.
    pub fn elapsed(&self) -> Option<Duration> {
        self.outcome.as_ref().map(|outcome| outcome.elapsed)
    }
}

/// Computes the edit script transforming `source` into `dest` in one call.
pub fn diff_spans<S, D>(source: &S, dest: &D, level: MatchLevel) -> Vec<EditSpan>
where
    S: Sequence + ?Sized,
    D: Sequence<Item = S::Item> + ?Sized,
{
    run(source, dest, level, None)
}

fn run<S, D>(
    source: &S,
    dest: &D,
    level: MatchLevel,
    deadline: Option<Instant>,
) -> Vec<EditSpan>
where
    S: Sequence + ?Sized,
    D: Sequence<Item = S::Item> + ?Sized,
{
    let matches = search::collect_spans(source, dest, level, deadline);
    assemble(matches, source.len(), dest.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::{CharSequence, LineSequence};

    const ALL_LEVELS: [MatchLevel; 3] = [
        MatchLevel::FastImperfect,
        MatchLevel::Medium,
        MatchLevel::SlowPerfect,
    ];

    fn reconstruct(source: &CharSequence, dest: &CharSequence, spans: &[EditSpan]) -> String {
        let mut rv = String::new();
        for span in spans {
            match *span {
                EditSpan::Unchanged {
                    source_index, len, ..
                } => rv.extend(&source.as_slice()[source_index..source_index + len]),
                EditSpan::Replace {
                    dest_index, len, ..
                }
                | EditSpan::Insert { dest_index, len } => {
                    rv.extend(&dest.as_slice()[dest_index..dest_index + len])
                }
                EditSpan::Delete { .. } => {}
            }
        }
        rv
    }

    fn assert_coverage(spans: &[EditSpan], source_len: usize, dest_len: usize) {
        let mut cur_dest = 0;
        let mut cur_source = 0;
        for span in spans {
            match *span {
                EditSpan::Unchanged {
                    dest_index,
                    source_index,
                    len,
                }
                | EditSpan::Replace {
                    dest_index,
                    source_index,
                    len,
                } => {
                    assert_eq!(dest_index, cur_dest);
                    assert_eq!(source_index, cur_source);
                    cur_dest += len;
                    cur_source += len;
                }
                EditSpan::Insert { dest_index, len } => {
                    assert_eq!(dest_index, cur_dest);
                    cur_dest += len;
                }
                EditSpan::Delete { source_index, len } => {
                    assert_eq!(source_index, cur_source);
                    cur_source += len;
                }
            }
        }
        assert_eq!(cur_dest, dest_len);
        assert_eq!(cur_source, source_len);
    }

    #[test]
    fn test_identity() {
        for level in ALL_LEVELS {
            let seq = CharSequence::new("same text on both sides");
            let spans = diff_spans(&seq, &seq, level);
            assert_eq!(
                spans,
                vec![EditSpan::Unchanged {
                    dest_index: 0,
                    source_index: 0,
                    len: seq.len()
                }]
            );
        }
    }

    #[test]
    fn test_empty_inputs() {
        let empty = CharSequence::new("");
        let full = CharSequence::new("abcd");
        for level in ALL_LEVELS {
            assert_eq!(
                diff_spans(&empty, &full, level),
                vec![EditSpan::Insert {
                    dest_index: 0,
                    len: 4
                }]
            );
            assert_eq!(
                diff_spans(&full, &empty, level),
                vec![EditSpan::Delete {
                    source_index: 0,
                    len: 4
                }]
            );
            assert_eq!(diff_spans(&empty, &empty, level), vec![]);
        }
    }

    #[test]
    fn test_char_scenario() {
        let source = CharSequence::new("ABCABBA");
        let dest = CharSequence::new("CBABAC");
        for level in ALL_LEVELS {
            let spans = diff_spans(&source, &dest, level);
            assert_coverage(&spans, source.len(), dest.len());
            assert_eq!(reconstruct(&source, &dest, &spans), "CBABAC");
            // the shared "BA" run must survive as an unchanged span
            assert!(spans.contains(&EditSpan::Unchanged {
                dest_index: 1,
                source_index: 5,
                len: 2
            }));
        }
    }

    #[test]
    fn test_char_scenario_exact_spans() {
        let source = CharSequence::new("ABCABBA");
        let dest = CharSequence::new("CBABAC");
        let spans = diff_spans(&source, &dest, MatchLevel::SlowPerfect);
        assert_eq!(
            spans,
            vec![
                EditSpan::Delete {
                    source_index: 0,
                    len: 2
                },
                EditSpan::Unchanged {
                    dest_index: 0,
                    source_index: 2,
                    len: 1
                },
                EditSpan::Delete {
                    source_index: 3,
                    len: 2
                },
                EditSpan::Unchanged {
                    dest_index: 1,
                    source_index: 5,
                    len: 2
                },
                EditSpan::Insert {
                    dest_index: 3,
                    len: 3
                },
            ]
        );
    }

    #[test]
    fn test_line_scenario() {
        let source = LineSequence::from_text("one\ntwo\nthree").unwrap();
        let dest = LineSequence::from_text("one\nthree\nfour").unwrap();
        for level in ALL_LEVELS {
            let spans = diff_spans(&source, &dest, level);
            assert_eq!(
                spans,
                vec![
                    EditSpan::Unchanged {
                        dest_index: 0,
                        source_index: 0,
                        len: 1
                    },
                    EditSpan::Delete {
                        source_index: 1,
                        len: 1
                    },
                    EditSpan::Unchanged {
                        dest_index: 1,
                        source_index: 2,
                        len: 1
                    },
                    EditSpan::Insert {
                        dest_index: 2,
                        len: 1
                    },
                ]
            );
        }
    }

    #[test]
    fn test_token_slices() {
        let source = vec!["fn", "main", "(", ")"];
        let dest = vec!["fn", "run", "(", ")"];
        let spans = diff_spans(&source, &dest, MatchLevel::default());
        assert_eq!(
            spans,
            vec![
                EditSpan::Unchanged {
                    dest_index: 0,
                    source_index: 0,
                    len: 1
                },
                EditSpan::Replace {
                    dest_index: 1,
                    source_index: 1,
                    len: 1
                },
                EditSpan::Unchanged {
                    dest_index: 2,
                    source_index: 2,
                    len: 2
                },
            ]
        );
    }

    #[test]
    fn test_report_before_process() {
        let engine = DiffEngine::new();
        assert!(matches!(engine.report(), Err(DiffError::NotReady)));
        assert!(engine.elapsed().is_none());
    }

    #[test]
    fn test_two_phase_run() {
        let source = CharSequence::new("abcdef");
        let dest = CharSequence::new("abXdef");
        let mut engine = DiffEngine::with_level(MatchLevel::Medium);
        let elapsed = engine.process(&source, &dest);
        assert_eq!(engine.elapsed(), Some(elapsed));
        let spans = engine.report().unwrap();
        assert_coverage(spans, source.len(), dest.len());
        assert_eq!(reconstruct(&source, &dest, spans), "abXdef");
    }

    #[test]
    fn test_zero_timeout_still_covers() {
        let source = CharSequence::new("the quick brown fox");
        let dest = CharSequence::new("the quick red fox");
        let mut engine = DiffEngine::new();
        engine.timeout(Duration::from_secs(0));
        engine.process(&source, &dest);
        let spans = engine.report().unwrap();
        assert_coverage(spans, source.len(), dest.len());
        assert_eq!(reconstruct(&source, &dest, spans), "the quick red fox");
    }
}
