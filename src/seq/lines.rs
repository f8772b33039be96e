use std::fmt;
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::seq::Sequence;
use crate::DiffError;

/// Configuration for constructing a [`LineSequence`].
///
/// Both values bound the adapter, not the algorithm: the length ceiling is
/// a defensive limit against pathological input and the tab width only
/// affects how lines compare, never how the engine matches them.
#[derive(Debug, Clone)]
pub struct LineOptions {
    /// Maximum accepted line length in characters.
    pub max_line_len: usize,
    /// Number of spaces a tab character expands to.
    pub tab_width: usize,
}

impl Default for LineOptions {
    fn default() -> LineOptions {
        LineOptions {
            max_line_len: 2048,
            tab_width: 4,
        }
    }
}

/// A single line of text prepared for fast comparison.
///
/// The stored text has tabs expanded to spaces so that visually identical
/// lines compare equal.  A 64-bit hash of the expanded text is cached at
/// construction time; equality checks the hash first and falls back to a
/// full text comparison on hash match, so a hash collision can never make
/// two distinct lines compare equal.
#[derive(Clone)]
pub struct Line {
    text: String,
    hash: u64,
}

impl Line {
    fn new(raw: &str, tab: &str) -> Line {
        let text = if raw.contains('\t') {
            raw.replace('\t', tab)
        } else {
            raw.to_string()
        };
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        text.hash(&mut hasher);
        Line {
            hash: hasher.finish(),
            text,
        }
    }

    /// Returns the line text with tabs expanded.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the cached hash of the line text.
    pub fn cached_hash(&self) -> u64 {
        self.hash
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Line) -> bool {
        // hash mismatch proves inequality, hash match still verifies the
        // actual text to rule out collisions
        self.hash == other.hash && self.text == other.text
    }
}

impl Eq for Line {}

impl Hash for Line {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Line").field(&self.text).finish()
    }
}

/// A [`Sequence`] over the lines of a text, string or file.
///
/// Lines are split on `\n` with a trailing `\r` stripped, so both Unix and
/// Windows line endings are handled.  Construction fails with
/// [`DiffError::LineTooLong`] if any raw line exceeds the configured
/// ceiling and with [`DiffError::Io`] when a file cannot be read; no
/// partially constructed sequence is ever observable.
#[derive(Debug, Clone)]
pub struct LineSequence {
    lines: Vec<Line>,
}

impl LineSequence {
    /// Creates a line sequence from an in-memory string with default
    /// [`LineOptions`].
    pub fn from_text(text: &str) -> Result<LineSequence, DiffError> {
        LineSequence::from_text_with(text, &LineOptions::default())
    }

    /// Creates a line sequence from an in-memory string.
    pub fn from_text_with(text: &str, options: &LineOptions) -> Result<LineSequence, DiffError> {
        let tab = " ".repeat(options.tab_width);
        let mut lines = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            lines.push(make_line(raw, idx, &tab, options)?);
        }
        Ok(LineSequence { lines })
    }

    /// Creates a line sequence from a file with default [`LineOptions`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<LineSequence, DiffError> {
        LineSequence::from_file_with(path, &LineOptions::default())
    }

    /// Creates a line sequence from a file.
    pub fn from_file_with<P: AsRef<Path>>(
        path: P,
        options: &LineOptions,
    ) -> Result<LineSequence, DiffError> {
        let file = File::open(path)?;
        LineSequence::from_reader_with(BufReader::new(file), options)
    }

    /// Creates a line sequence from any buffered reader.
    pub fn from_reader_with<R: BufRead>(
        reader: R,
        options: &LineOptions,
    ) -> Result<LineSequence, DiffError> {
        let tab = " ".repeat(options.tab_width);
        let mut lines = Vec::new();
        for (idx, raw) in reader.lines().enumerate() {
            let mut raw = raw?;
            if raw.ends_with('\r') {
                raw.pop();
            }
            lines.push(make_line(&raw, idx, &tab, options)?);
        }
        Ok(LineSequence { lines })
    }

    /// Returns the lines as a slice.
    pub fn as_slice(&self) -> &[Line] {
        &self.lines
    }
}

fn make_line(raw: &str, idx: usize, tab: &str, options: &LineOptions) -> Result<Line, DiffError> {
    let len = raw.chars().count();
    if len > options.max_line_len {
        return Err(DiffError::LineTooLong {
            line: idx + 1,
            len,
            max: options.max_line_len,
        });
    }
    Ok(Line::new(raw, tab))
}

impl Sequence for LineSequence {
    type Item = Line;

    fn len(&self) -> usize {
        self.lines.len()
    }

    fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }
}
