//! Recursive-descent scanner turning text into [`Segment`]s.
//!
//! The scanner makes one pass per nesting level:
//!
//! 1. Find the next prefix. Without one, the rest is literal text (or, inside a
//!    placeholder, the whole inner text is a simple placeholder).
//! 2. Find the matching suffix by counting nested opens. Without one the prefix
//!    is literal text and scanning resumes right after it.
//! 3. An escaped prefix is literal text; the escape character is dropped.
//! 4. Otherwise the inner text is scanned recursively and folded into a single
//!    placeholder segment, split into key and fallback at the first unescaped
//!    separator.
//!
//! Recursion stops at [`MAX_NESTING_DEPTH`]: below that, a prefix is plain text
//! just like an unterminated one.

use super::delimiters::Delimiters;
use super::segment::{Segment, push_literal};

/// Deepest placeholder nesting that is scanned as structure.
pub(crate) const MAX_NESTING_DEPTH: usize = 64;

/// Scanner bound to one delimiter configuration.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scanner<'d> {
    delimiters: &'d Delimiters,
}

impl<'d> Scanner<'d> {
    pub(crate) const fn new(delimiters: &'d Delimiters) -> Self {
        Self {
            delimiters,
        }
    }

    /// Scan `text` into segments.
    ///
    /// With `inside_placeholder` set, `text` is the inner text of a placeholder
    /// and the result is always exactly one placeholder segment.
    pub(crate) fn scan(&self, text: &str, inside_placeholder: bool) -> Vec<Segment> {
        self.scan_at(text, inside_placeholder, 0)
    }

    fn scan_at(&self, text: &str, inside_placeholder: bool, depth: usize) -> Vec<Segment> {
        let prefix = self.delimiters.prefix();
        let suffix = self.delimiters.suffix();

        let Some(mut start) = text.find(prefix) else {
            if inside_placeholder {
                return vec![self.simple_placeholder(text, text)];
            }
            let mut segments = Vec::new();
            push_literal(&mut segments, text);
            return segments;
        };

        let mut segments = Vec::new();
        let mut position = 0;

        loop {
            let after_prefix = start + prefix.len();
            let escape_at = self.delimiters.escape_before(text, start, position);
            let closing = if depth < MAX_NESTING_DEPTH {
                self.matching_suffix(text, start)
            } else {
                None
            };
            match (closing, escape_at) {
                (None, _) => {
                    // Unterminated or too deep: the prefix is plain text
                    push_literal(&mut segments, &text[position..after_prefix]);
                    position = after_prefix;
                }
                (Some(_), Some(escape_at)) => {
                    push_literal(&mut segments, &text[position..escape_at]);
                    push_literal(&mut segments, prefix);
                    position = after_prefix;
                }
                (Some(end), None) => {
                    push_literal(&mut segments, &text[position..start]);
                    segments.extend(self.scan_at(&text[after_prefix..end], true, depth + 1));
                    position = end + suffix.len();
                }
            }

            match text[position..].find(prefix) {
                Some(offset) => start = position + offset,
                None => break,
            }
        }

        push_literal(&mut segments, &text[position..]);

        if inside_placeholder {
            vec![self.placeholder(text, segments)]
        } else {
            segments
        }
    }

    /// Byte offset of the suffix closing the prefix found at `start`.
    fn matching_suffix(&self, text: &str, start: usize) -> Option<usize> {
        let prefix = self.delimiters.prefix();
        let suffix = self.delimiters.suffix();
        let simple_prefix = self.delimiters.simple_prefix();

        let mut index = start + prefix.len();
        let mut depth = 0usize;

        while index < text.len() {
            let rest = &text[index..];
            if rest.starts_with(suffix) {
                if depth == 0 {
                    return Some(index);
                }
                depth -= 1;
                index += suffix.len();
            } else if rest.starts_with(prefix) {
                depth += 1;
                index += prefix.len();
            } else if rest.starts_with(simple_prefix) {
                depth += 1;
                index += simple_prefix.len();
            } else {
                index += rest.chars().next().map_or(1, char::len_utf8);
            }
        }

        None
    }

    /// Fold the scanned inner text of a placeholder into one segment.
    fn placeholder(&self, raw: &str, segments: Vec<Segment>) -> Segment {
        if let [Segment::Literal {
            text,
        }] = segments.as_slice()
        {
            return self.simple_placeholder(raw, text);
        }
        if segments.is_empty() {
            return self.simple_placeholder(raw, "");
        }
        self.nested_placeholder(raw, segments)
    }

    fn simple_placeholder(&self, raw: &str, literal: &str) -> Segment {
        let (key, fallback) = self.split_section(literal);
        Segment::Simple {
            text: raw.to_owned(),
            key,
            fallback,
        }
    }

    fn nested_placeholder(&self, raw: &str, segments: Vec<Segment>) -> Segment {
        if self.delimiters.separator().is_none() {
            return Segment::Nested {
                text: raw.to_owned(),
                key: segments,
                fallback: None,
            };
        }

        let mut key = Vec::with_capacity(segments.len());
        let mut remaining = segments.into_iter();

        while let Some(segment) = remaining.next() {
            let Segment::Literal {
                text,
            } = segment
            else {
                key.push(segment);
                continue;
            };

            let (key_part, fallback) = self.split_section(&text);
            push_literal(&mut key, &key_part);

            if let Some(fallback) = fallback {
                let mut fallback_segments = Vec::new();
                push_literal(&mut fallback_segments, &fallback);
                fallback_segments.extend(remaining);
                return Segment::Nested {
                    text: raw.to_owned(),
                    key,
                    fallback: Some(fallback_segments),
                };
            }
        }

        Segment::Nested {
            text: raw.to_owned(),
            key,
            fallback: None,
        }
    }

    /// Split at the first unescaped separator.
    ///
    /// Escaped separators are kept as literal separators in the key with the
    /// escape character removed. The fallback is returned verbatim.
    pub(crate) fn split_section(&self, text: &str) -> (String, Option<String>) {
        let Some(separator) = self.delimiters.separator() else {
            return (text.to_owned(), None);
        };

        let mut key = String::with_capacity(text.len());
        let mut position = 0;

        while let Some(offset) = text[position..].find(separator) {
            let index = position + offset;
            match self.delimiters.escape_before(text, index, position) {
                Some(escape_at) => {
                    key.push_str(&text[position..escape_at]);
                    key.push_str(separator);
                    position = index + separator.len();
                }
                None => {
                    key.push_str(&text[position..index]);
                    return (key, Some(text[index + separator.len()..].to_owned()));
                }
            }
        }

        key.push_str(&text[position..]);
        (key, None)
    }
}
