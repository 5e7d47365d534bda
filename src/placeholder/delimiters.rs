//! Delimiter configuration shared by the scanner and the resolution context.

use super::error::DelimiterError;

/// Closing brackets whose matching opener is enough to detect a nested open.
const WELL_KNOWN_SIMPLE_PREFIXES: [(&str, &str); 3] = [("}", "{"), ("]", "["), (")", "(")];

/// Prefix used by the system-property convention.
pub const SYSTEM_PREFIX: &str = "#{";
/// Suffix used by the system-property convention.
pub const SYSTEM_SUFFIX: &str = "}";
/// Separator used by the system-property convention.
pub const SYSTEM_SEPARATOR: &str = ":";
/// Escape character used by the system-property convention.
pub const SYSTEM_ESCAPE: char = '\\';

/// Immutable placeholder syntax and policy.
///
/// # Simple prefix
///
/// When the suffix is a closing bracket and the prefix ends with the matching
/// opener (`#{` / `}`), a bare opener inside a placeholder counts as a nested
/// open. This keeps `#{map{a}}` balanced even though `{a}` is not itself a
/// placeholder. Otherwise the simple prefix is the full prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    prefix: String,
    suffix: String,
    simple_prefix: String,
    separator: Option<String>,
    escape: Option<char>,
    ignore_unresolvable: bool,
}

impl Delimiters {
    /// Validate and build a delimiter configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`DelimiterError`] when the prefix or suffix is empty, when
    /// they are identical, or when a separator is configured but empty.
    pub fn new(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        separator: Option<&str>,
        escape: Option<char>,
        ignore_unresolvable: bool,
    ) -> Result<Self, DelimiterError> {
        let prefix = prefix.into();
        let suffix = suffix.into();

        if prefix.is_empty() {
            return Err(DelimiterError::EmptyPrefix);
        }
        if suffix.is_empty() {
            return Err(DelimiterError::EmptySuffix);
        }
        if prefix == suffix {
            return Err(DelimiterError::PrefixEqualsSuffix {
                delimiter: prefix,
            });
        }
        if separator.is_some_and(str::is_empty) {
            return Err(DelimiterError::EmptySeparator);
        }

        let simple_prefix = simple_prefix_for(&prefix, &suffix);
        Ok(Self {
            prefix,
            suffix,
            simple_prefix,
            separator: separator.map(str::to_owned),
            escape,
            ignore_unresolvable,
        })
    }

    /// The `#{`, `}`, `:`, `\` convention used for system properties.
    pub fn system(ignore_unresolvable: bool) -> Self {
        Self {
            prefix: SYSTEM_PREFIX.to_owned(),
            suffix: SYSTEM_SUFFIX.to_owned(),
            simple_prefix: simple_prefix_for(SYSTEM_PREFIX, SYSTEM_SUFFIX),
            separator: Some(SYSTEM_SEPARATOR.to_owned()),
            escape: Some(SYSTEM_ESCAPE),
            ignore_unresolvable,
        }
    }

    /// Same syntax, different unresolvable policy.
    #[must_use]
    pub fn with_ignore_unresolvable(mut self, ignore_unresolvable: bool) -> Self {
        self.ignore_unresolvable = ignore_unresolvable;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn simple_prefix(&self) -> &str {
        &self.simple_prefix
    }

    pub fn separator(&self) -> Option<&str> {
        self.separator.as_deref()
    }

    pub const fn escape(&self) -> Option<char> {
        self.escape
    }

    pub const fn ignore_unresolvable(&self) -> bool {
        self.ignore_unresolvable
    }

    /// `prefix + key + suffix`.
    pub fn placeholder_text(&self, key: &str) -> String {
        let mut text = String::with_capacity(self.prefix.len() + key.len() + self.suffix.len());
        text.push_str(&self.prefix);
        text.push_str(key);
        text.push_str(&self.suffix);
        text
    }

    /// Byte offset of the escape character guarding the token at `index`.
    ///
    /// Returns `None` when no escape is configured, when the character before
    /// `index` is not the escape, or when that character lies before `floor`
    /// (it was already consumed by an earlier token).
    pub(crate) fn escape_before(&self, text: &str, index: usize, floor: usize) -> Option<usize> {
        let escape = self.escape?;
        let start = index.checked_sub(escape.len_utf8())?;
        if start < floor || !text[..index].ends_with(escape) {
            return None;
        }
        Some(start)
    }
}

fn simple_prefix_for(prefix: &str, suffix: &str) -> String {
    WELL_KNOWN_SIMPLE_PREFIXES
        .iter()
        .find(|(closing, opening)| *closing == suffix && prefix.ends_with(opening))
        .map_or_else(|| prefix.to_owned(), |(_, opening)| (*opening).to_owned())
}
