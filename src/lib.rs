//! This crate implements a heuristic sequence difference engine.  Given
//! two ordered sequences of comparable elements it computes a set of edit
//! operations (unchanged spans, replacements, insertions, deletions) that
//! transforms the source sequence into the destination sequence.
//!
//! The crate is split into three levels:
//!
//! * [`seq`]: sequence abstractions.  The [`Sequence`] trait exposes any
//!   indexable collection of comparable elements to the engine; slices and
//!   vectors implement it directly and [`CharSequence`] / [`LineSequence`]
//!   adapt strings and files.
//! * [`engine`]: the span search itself.  A divide-and-conquer
//!   longest-common-span partition with a per-index memo cache, tunable
//!   via [`MatchLevel`].
//! * [`report`]: the [`EditSpan`] edit script and the assembler that
//!   reconciles raw matches into it.
//!
//! The algorithm trades optimality for speed: it is a longest-common-span
//! matcher, not a minimum-edit-distance diff, and the three match levels
//! dial thoroughness against cost.  Every level produces an edit script
//! that covers both sequences completely, in order, with no gaps and no
//! overlaps.
//!
//! # Examples
//!
//! One-shot diffing of two strings by line:
//!
//! ```
//! use spandiff::{diff_spans, LineSequence, MatchLevel};
//!
//! let source = LineSequence::from_text("one\ntwo\nthree")?;
//! let dest = LineSequence::from_text("one\nthree\nfour")?;
//! for span in diff_spans(&source, &dest, MatchLevel::default()) {
//!     println!("{:?}", span);
//! }
//! # Ok::<(), spandiff::DiffError>(())
//! ```
//!
//! The two-phase [`DiffEngine`] keeps the report around and exposes the
//! elapsed wall-clock time of a run:
//!
//! ```
//! use spandiff::{CharSequence, DiffEngine, MatchLevel};
//!
//! let source = CharSequence::new("ABCABBA");
//! let dest = CharSequence::new("CBABAC");
//! let mut engine = DiffEngine::with_level(MatchLevel::Medium);
//! let elapsed = engine.process(&source, &dest);
//! let report = engine.report()?;
//! # let _ = (elapsed, report);
//! # Ok::<(), spandiff::DiffError>(())
//! ```

pub mod engine;
mod error;
pub mod report;
pub mod seq;

pub use crate::engine::{diff_spans, DiffEngine, MatchLevel};
pub use crate::error::DiffError;
pub use crate::report::{EditSpan, EditTag};
pub use crate::seq::{CharSequence, Line, LineOptions, LineSequence, Sequence};
