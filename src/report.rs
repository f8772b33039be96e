//! The edit script result type and the report assembler.
//!
//! The span engine produces an unordered bag of raw match spans.  The
//! assembler in this module reconciles them into the final edit script: an
//! ordered list of [`EditSpan`]s that covers both sequences completely,
//! with adjacent same-kind spans merged back into maximal runs.

use std::ops::Range;

use crate::engine::search::MatchSpan;

/// A single operation of an edit script.
///
/// The ordered sequence of spans produced by a run covers
/// `[0, dest_len)` and `[0, source_len)` per side with no gaps and no
/// overlaps.  Applying the operations in order to the source sequence
/// reconstructs the destination sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditSpan {
    /// `len` elements are equal in both sequences.
    Unchanged {
        dest_index: usize,
        source_index: usize,
        len: usize,
    },
    /// `len` elements of the source are replaced by `len` elements of the
    /// destination.
    Replace {
        dest_index: usize,
        source_index: usize,
        len: usize,
    },
    /// The destination contains `len` extra elements absent from the
    /// source.
    Insert { dest_index: usize, len: usize },
    /// `len` elements of the source are absent from the destination.
    Delete { source_index: usize, len: usize },
}

/// The kind of an [`EditSpan`], without its indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditTag {
    Unchanged,
    Replace,
    Insert,
    Delete,
}

impl EditSpan {
    /// Returns the tag of the span.
    pub fn tag(&self) -> EditTag {
        match self {
            EditSpan::Unchanged { .. } => EditTag::Unchanged,
            EditSpan::Replace { .. } => EditTag::Replace,
            EditSpan::Insert { .. } => EditTag::Insert,
            EditSpan::Delete { .. } => EditTag::Delete,
        }
    }

    /// Returns the number of destination elements the span covers.
    pub fn dest_len(&self) -> usize {
        match *self {
            EditSpan::Unchanged { len, .. }
            | EditSpan::Replace { len, .. }
            | EditSpan::Insert { len, .. } => len,
            EditSpan::Delete { .. } => 0,
        }
    }

    /// Returns the number of source elements the span covers.
    pub fn source_len(&self) -> usize {
        match *self {
            EditSpan::Unchanged { len, .. }
            | EditSpan::Replace { len, .. }
            | EditSpan::Delete { len, .. } => len,
            EditSpan::Insert { .. } => 0,
        }
    }

    /// Returns the destination index range the span covers.
    ///
    /// Empty for deletions, which occupy no destination elements.
    pub fn dest_range(&self) -> Range<usize> {
        match *self {
            EditSpan::Unchanged {
                dest_index, len, ..
            }
            | EditSpan::Replace {
                dest_index, len, ..
            }
            | EditSpan::Insert { dest_index, len } => dest_index..dest_index + len,
            EditSpan::Delete { .. } => 0..0,
        }
    }

    /// Returns the source index range the span covers.
    ///
    /// Empty for insertions, which occupy no source elements.
    pub fn source_range(&self) -> Range<usize> {
        match *self {
            EditSpan::Unchanged {
                source_index, len, ..
            }
            | EditSpan::Replace {
                source_index, len, ..
            }
            | EditSpan::Delete { source_index, len } => source_index..source_index + len,
            EditSpan::Insert { .. } => 0..0,
        }
    }
}

/// Converts the raw match spans of a run into the final edit script.
///
/// Matches are sorted by destination index; by construction of the range
/// partition they are then also sorted and non-overlapping on the source
/// side.  Gaps between consecutive matches become Replace spans over the
/// shorter side plus an Insert or Delete for the longer remainder; a match
/// contiguous with the previous output extends the prior Unchanged span
/// instead of starting a new one.
pub(crate) fn assemble(
    mut matches: Vec<MatchSpan>,
    source_len: usize,
    dest_len: usize,
) -> Vec<EditSpan> {
    matches.sort_by_key(|m| m.dest_index);

    let mut rv = Vec::new();
    let mut cur_dest = 0;
    let mut cur_source = 0;

    for m in matches {
        let emitted = close_gap(
            &mut rv,
            cur_dest,
            cur_source,
            m.dest_index - cur_dest,
            m.source_index - cur_source,
        );
        match rv.last_mut() {
            Some(EditSpan::Unchanged { len, .. }) if !emitted => *len += m.len,
            _ => rv.push(EditSpan::Unchanged {
                dest_index: m.dest_index,
                source_index: m.source_index,
                len: m.len,
            }),
        }
        cur_dest = m.dest_index + m.len;
        cur_source = m.source_index + m.len;
    }

    close_gap(
        &mut rv,
        cur_dest,
        cur_source,
        dest_len - cur_dest,
        source_len - cur_source,
    );
    rv
}

fn close_gap(
    rv: &mut Vec<EditSpan>,
    cur_dest: usize,
    cur_source: usize,
    dest_gap: usize,
    source_gap: usize,
) -> bool {
    if dest_gap > 0 && source_gap > 0 {
        let len = dest_gap.min(source_gap);
        rv.push(EditSpan::Replace {
            dest_index: cur_dest,
            source_index: cur_source,
            len,
        });
        if dest_gap > len {
            rv.push(EditSpan::Insert {
                dest_index: cur_dest + len,
                len: dest_gap - len,
            });
        } else if source_gap > len {
            rv.push(EditSpan::Delete {
                source_index: cur_source + len,
                len: source_gap - len,
            });
        }
        true
    } else if dest_gap > 0 {
        rv.push(EditSpan::Insert {
            dest_index: cur_dest,
            len: dest_gap,
        });
        true
    } else if source_gap > 0 {
        rv.push(EditSpan::Delete {
            source_index: cur_source,
            len: source_gap,
        });
        true
    } else {
        false
    }
}
