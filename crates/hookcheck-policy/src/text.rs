//! Accent-insensitive text folding and term matching
//!
//! Matching runs over a *folded* copy of the text (lowercased, diacritics
//! stripped) so that "Explotarán", "explotaran" and "EXPLOTARÁN" are the same
//! term. Folding is for matching only: every match is mapped back to a byte
//! range of the original text, and rewrites are applied to the original.

use crate::error::{PolicyError, PolicyResult};
use regex::Regex;
use std::ops::Range;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold a string for matching: lowercase, NFD, drop combining marks
#[must_use]
pub fn fold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        fold_char(c, &mut out);
    }
    out
}

fn fold_char(c: char, out: &mut String) {
    for lower in c.to_lowercase() {
        for d in std::iter::once(lower).nfd() {
            if !is_combining_mark(d) {
                out.push(d);
            }
        }
    }
}

/// One folded character and the original character it came from
#[derive(Debug, Clone)]
struct Span {
    folded: usize,
    original: Range<usize>,
}

/// Folded view of a text that remembers where each folded char came from
#[derive(Debug, Clone)]
pub struct FoldedText<'a> {
    original: &'a str,
    folded: String,
    spans: Vec<Span>,
}

impl<'a> FoldedText<'a> {
    /// Fold `original`, recording offsets
    #[must_use]
    pub fn new(original: &'a str) -> Self {
        let mut folded = String::with_capacity(original.len());
        let mut spans = Vec::with_capacity(original.len());

        for (start, c) in original.char_indices() {
            let before = folded.len();
            fold_char(c, &mut folded);
            let range = start..start + c.len_utf8();
            for (offset, _) in folded[before..].char_indices() {
                spans.push(Span {
                    folded: before + offset,
                    original: range.clone(),
                });
            }
        }

        Self {
            original,
            folded,
            spans,
        }
    }

    /// The original text
    #[inline]
    #[must_use]
    pub fn original(&self) -> &'a str {
        self.original
    }

    /// The folded text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// Map a byte range of the folded text back onto the original text.
    ///
    /// Combining marks that trail the match in the original (decomposed
    /// input) are included so a rewrite does not leave them dangling.
    #[must_use]
    pub fn original_range(&self, folded: Range<usize>) -> Range<usize> {
        if folded.is_empty() {
            return self.original.len()..self.original.len();
        }
        let first = self.spans.partition_point(|s| s.folded < folded.start);
        let last = self.spans.partition_point(|s| s.folded < folded.end);
        let start = self
            .spans
            .get(first)
            .map_or(self.original.len(), |s| s.original.start);
        let mut end = self
            .spans
            .get(last.saturating_sub(1))
            .map_or(self.original.len(), |s| s.original.end);

        end += self.original[end..]
            .chars()
            .take_while(|c| is_combining_mark(*c))
            .map(char::len_utf8)
            .sum::<usize>();
        start..end
    }
}

/// How a [`TermMatcher`] delimits its matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Term must not be part of a longer word
    WholeWord,
    /// Term may appear anywhere, including inside words
    Substring,
}

/// Compiled matcher for one policy term or phrase
#[derive(Debug, Clone)]
pub struct TermMatcher {
    term: String,
    folded: String,
    mode: MatchMode,
    regex: Regex,
}

impl TermMatcher {
    /// Compile a matcher.
    ///
    /// Internal whitespace in a phrase matches any run of whitespace.
    ///
    /// # Errors
    /// `PolicyError::EmptyTerm` if the term folds to nothing.
    pub fn new(term: &str, mode: MatchMode, field: &'static str) -> PolicyResult<Self> {
        let folded = fold(term.trim());
        let words: Vec<&str> = folded.split_whitespace().collect();
        if words.is_empty() {
            return Err(PolicyError::EmptyTerm { field });
        }
        let folded = words.join(" ");

        let body = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join(r"\s+");
        let pattern = match mode {
            MatchMode::WholeWord => {
                let lead = if starts_with_word_char(&folded) { r"\b" } else { "" };
                let tail = if ends_with_word_char(&folded) { r"\b" } else { "" };
                format!("{lead}{body}{tail}")
            }
            MatchMode::Substring => body,
        };

        Ok(Self {
            term: term.trim().to_string(),
            folded,
            mode,
            regex: Regex::new(&pattern)?,
        })
    }

    /// Whole-word matcher
    ///
    /// # Errors
    /// See [`TermMatcher::new`].
    pub fn whole_word(term: &str, field: &'static str) -> PolicyResult<Self> {
        Self::new(term, MatchMode::WholeWord, field)
    }

    /// Substring matcher
    ///
    /// # Errors
    /// See [`TermMatcher::new`].
    pub fn substring(term: &str, field: &'static str) -> PolicyResult<Self> {
        Self::new(term, MatchMode::Substring, field)
    }

    /// The term as written in the policy
    #[inline]
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The folded term
    #[inline]
    #[must_use]
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Match mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether the term occurs in the text
    #[inline]
    #[must_use]
    pub fn is_match(&self, text: &FoldedText<'_>) -> bool {
        self.regex.is_match(text.as_str())
    }

    /// Byte ranges of every match, in the original text
    #[must_use]
    pub fn find_ranges(&self, text: &FoldedText<'_>) -> Vec<Range<usize>> {
        self.regex
            .find_iter(text.as_str())
            .map(|m| text.original_range(m.range()))
            .collect()
    }

    /// Replace every match in `text` with `replacement`.
    ///
    /// A match that begins with an uppercase letter gets its replacement
    /// capitalized, so sentence-initial terms stay sentence-initial.
    #[must_use]
    pub fn replace_all(&self, text: &str, replacement: &str) -> String {
        let folded = FoldedText::new(text);
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for range in self.find_ranges(&folded) {
            if range.start < last {
                continue;
            }
            out.push_str(&text[last..range.start]);
            out.push_str(&match_case(&text[range.clone()], replacement));
            last = range.end;
        }
        out.push_str(&text[last..]);
        out
    }
}

fn starts_with_word_char(s: &str) -> bool {
    s.chars().next().is_some_and(is_word_char)
}

fn ends_with_word_char(s: &str) -> bool {
    s.chars().next_back().is_some_and(is_word_char)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn match_case(matched: &str, replacement: &str) -> String {
    let leading_upper = matched.chars().next().is_some_and(char::is_uppercase);
    if !leading_upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whitespace-delimited token count
#[inline]
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
