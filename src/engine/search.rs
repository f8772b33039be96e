//! The span search: longest-match-at-index plus the range partition.
//!
//! The partition works through an explicit worklist of
//! `(dest_range, source_range)` pairs instead of recursing, which bounds
//! stack depth by the worklist and gives a natural point to check the
//! deadline.  Each popped range contributes at most one match span and at
//! most two narrower sub-ranges, so the loop terminates after at most
//! `min(source_len, dest_len)` matches.

use std::ops::Range;
use std::time::Instant;

use crate::engine::cache::MatchCache;
use crate::engine::MatchLevel;
use crate::seq::Sequence;

/// A contiguous equal-valued run in both sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MatchSpan {
    pub(crate) dest_index: usize,
    pub(crate) source_index: usize,
    pub(crate) len: usize,
}

/// Runs the full search and returns the unordered bag of match spans.
pub(crate) fn collect_spans<S, D>(
    source: &S,
    dest: &D,
    level: MatchLevel,
    deadline: Option<Instant>,
) -> Vec<MatchSpan>
where
    S: Sequence + ?Sized,
    D: Sequence<Item = S::Item> + ?Sized,
{
    let mut cache = MatchCache::new(dest.len());
    let mut spans = Vec::new();
    let mut worklist = Vec::new();
    if !source.is_empty() && !dest.is_empty() {
        worklist.push((0..dest.len(), 0..source.len()));
    }

    while let Some((dest_range, source_range)) = worklist.pop() {
        if deadline_exceeded(deadline) {
            tracing::debug!(
                pending = worklist.len() + 1,
                "deadline exceeded, abandoning remaining ranges"
            );
            break;
        }
        let best = match best_match_in_range(source, dest, &dest_range, &source_range, level, &mut cache)
        {
            Some(best) => best,
            None => continue,
        };
        let before_dest = dest_range.start..best.dest_index;
        let before_source = source_range.start..best.source_index;
        let after_dest = best.dest_index + best.len..dest_range.end;
        let after_source = best.source_index + best.len..source_range.end;
        spans.push(best);
        if !before_dest.is_empty() && !before_source.is_empty() {
            worklist.push((before_dest, before_source));
        }
        if !after_dest.is_empty() && !after_source.is_empty() {
            worklist.push((after_dest, after_source));
        }
    }
    spans
}

/// Picks the best match among all destination indices of a range.
///
/// Equal-length candidates are won by the first one encountered in scan
/// order, so the output is deterministic for every level.  The level only
/// controls how much of the index space is re-examined after a find.
fn best_match_in_range<S, D>(
    source: &S,
    dest: &D,
    dest_range: &Range<usize>,
    source_range: &Range<usize>,
    level: MatchLevel,
    cache: &mut MatchCache,
) -> Option<MatchSpan>
where
    S: Sequence + ?Sized,
    D: Sequence<Item = S::Item> + ?Sized,
{
    let mut best: Option<MatchSpan> = None;
    let mut i = dest_range.start;
    while i < dest_range.end {
        let best_len = best.as_ref().map_or(0, |b| b.len);
        // no remaining destination span can exceed the current best
        if dest_range.end - i <= best_len {
            break;
        }
        match longest_match_from(source, dest, i, dest_range.end, source_range, cache) {
            Some((source_index, len)) => {
                let improves = len > best_len;
                if improves {
                    best = Some(MatchSpan {
                        dest_index: i,
                        source_index,
                        len,
                    });
                }
                i += match level {
                    MatchLevel::FastImperfect => len,
                    MatchLevel::Medium if improves => len,
                    _ => 1,
                };
            }
            None => i += 1,
        }
    }
    best
}

/// Finds the longest run of consecutive equal elements starting at
/// `dest_index` against any source start inside the window.
///
/// Candidate starts are scanned left to right; the scan stops once the
/// remaining source window cannot beat the best run seen, and after a
/// non-empty run the scan pointer skips past it.  The outcome is recorded
/// in the cache either way.
fn longest_match_from<S, D>(
    source: &S,
    dest: &D,
    dest_index: usize,
    dest_end: usize,
    source_range: &Range<usize>,
    cache: &mut MatchCache,
) -> Option<(usize, usize)>
where
    S: Sequence + ?Sized,
    D: Sequence<Item = S::Item> + ?Sized,
{
    let max_len = dest_end - dest_index;
    if let Some(cached) = cache.lookup(dest_index, source_range, max_len) {
        return cached;
    }

    let mut best_len = 0;
    let mut best_source = 0;
    let mut s = source_range.start;
    while s < source_range.end {
        if source_range.end - s <= best_len {
            break;
        }
        let mut len = 0;
        while dest_index + len < dest_end
            && s + len < source_range.end
            && eq_at(source, dest, s + len, dest_index + len)
        {
            len += 1;
        }
        if len > best_len {
            best_len = len;
            best_source = s;
        }
        s += len.max(1);
    }

    if best_len > 0 {
        cache.record_match(dest_index, best_source, best_len, max_len);
        Some((best_source, best_len))
    } else {
        cache.record_no_match(dest_index, source_range.clone());
        None
    }
}

#[inline]
fn eq_at<S, D>(source: &S, dest: &D, source_index: usize, dest_index: usize) -> bool
where
    S: Sequence + ?Sized,
    D: Sequence<Item = S::Item> + ?Sized,
{
    match (source.get(source_index), dest.get(dest_index)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn deadline_exceeded(deadline: Option<Instant>) -> bool {
    match deadline {
        Some(deadline) => Instant::now() > deadline,
        None => false,
    }
}
