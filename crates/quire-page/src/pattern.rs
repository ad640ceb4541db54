//! Compiled pattern cache and whole-document match helpers.
//!
//! Every rewrite pass works on the full text of a page with a handful of
//! fixed patterns. The cache compiles each pattern once per run and hands
//! out cheap clones of the compiled matcher afterwards.

use std::cell::RefCell;
use std::collections::HashMap;

use regex::{Captures, Regex};

/// Errors that can occur when compiling a pattern.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("Invalid pattern {pattern:?}: {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result of a first-match search.
///
/// Group 0 is the whole match; groups that did not participate are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submatches {
    /// Whether the pattern matched at all
    pub matched: bool,

    /// Captured groups in pattern order
    pub groups: Vec<Option<String>>,
}

impl Submatches {
    fn from_captures(caps: &Captures<'_>) -> Self {
        Self {
            matched: true,
            groups: caps
                .iter()
                .map(|g| g.map(|m| m.as_str().to_string()))
                .collect(),
        }
    }

    /// Get a captured group by index.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|g| g.as_deref())
    }
}

/// Cache of compiled patterns keyed by pattern text.
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: RefCell<HashMap<String, Regex>>,
}

impl PatternCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a pattern, reusing an earlier compilation of the same text.
    pub fn compile(&self, pattern: &str) -> Result<Regex, PatternError> {
        if let Some(rx) = self.compiled.borrow().get(pattern) {
            return Ok(rx.clone());
        }

        let rx = Regex::new(pattern).map_err(|source| PatternError::Invalid {
            pattern: pattern.to_string(),
            source,
        })?;
        self.compiled
            .borrow_mut()
            .insert(pattern.to_string(), rx.clone());
        Ok(rx)
    }

    /// Number of distinct patterns compiled so far.
    pub fn len(&self) -> usize {
        self.compiled.borrow().len()
    }

    /// Check whether nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.compiled.borrow().is_empty()
    }

    /// Check whether the pattern matches anywhere in `text`.
    pub fn is_match(&self, pattern: &str, text: &str) -> Result<bool, PatternError> {
        Ok(self.compile(pattern)?.is_match(text))
    }

    /// Capture groups of the first match in `text`.
    pub fn submatches(&self, pattern: &str, text: &str) -> Result<Submatches, PatternError> {
        let rx = self.compile(pattern)?;
        Ok(rx
            .captures(text)
            .map(|caps| Submatches::from_captures(&caps))
            .unwrap_or_default())
    }

    /// Capture groups of every match in `text`, in document order.
    pub fn find_all(&self, pattern: &str, text: &str) -> Result<Vec<Submatches>, PatternError> {
        let rx = self.compile(pattern)?;
        Ok(rx
            .captures_iter(text)
            .map(|caps| Submatches::from_captures(&caps))
            .collect())
    }

    /// Replace every match using a `${n}` replacement template.
    pub fn replace_all(
        &self,
        pattern: &str,
        text: &str,
        replacement: &str,
    ) -> Result<String, PatternError> {
        let rx = self.compile(pattern)?;
        Ok(rx.replace_all(text, replacement).into_owned())
    }

    /// Replace every match with the output of a fallible closure.
    ///
    /// The first error aborts the replacement and is returned as is.
    pub fn try_replace_all<E, F>(&self, pattern: &str, text: &str, mut f: F) -> Result<String, E>
    where
        E: From<PatternError>,
        F: FnMut(&Captures<'_>) -> Result<String, E>,
    {
        let rx = self.compile(pattern)?;

        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        for caps in rx.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            output.push_str(&text[last..whole.start()]);
            output.push_str(&f(&caps)?);
            last = whole.end();
        }
        output.push_str(&text[last..]);

        Ok(output)
    }
}
