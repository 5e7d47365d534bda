//! The segment tree produced by scanning.

use serde::Serialize;

use super::context::ResolutionContext;
use super::engine::PlaceholderEngine;
use super::error::ResolutionError;
use super::resolve::resolve_all;
use super::resolver::PlaceholderResolver;

/// One node of a scanned value.
///
/// Placeholder variants keep the raw inner text they were scanned from
/// (`text`), which is used in error messages and for the raw-text lookup
/// performed before the key lookup of a [`Segment::Simple`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Verbatim text, escapes already removed.
    Literal {
        text: String,
    },

    /// A placeholder whose key and fallback are plain text.
    Simple {
        text: String,
        key: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback: Option<String>,
    },

    /// A placeholder whose key or fallback contains further placeholders.
    Nested {
        text: String,
        key: Vec<Segment>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback: Option<Vec<Segment>>,
    },
}

impl Segment {
    pub(crate) fn literal(text: impl Into<String>) -> Self {
        Self::Literal {
            text: text.into(),
        }
    }

    /// Raw text this segment was derived from.
    pub fn text(&self) -> &str {
        match self {
            Self::Literal {
                text,
            }
            | Self::Simple {
                text,
                ..
            }
            | Self::Nested {
                text,
                ..
            } => text,
        }
    }

    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal { .. })
    }
}

/// Append literal text, merging with a trailing literal when there is one.
pub(crate) fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Literal {
        text: last,
    }) = segments.last_mut()
    {
        last.push_str(text);
    } else {
        segments.push(Segment::literal(text));
    }
}

/// Concatenated text of a literal-only segment list.
pub(crate) fn literal_text(segments: &[Segment]) -> Option<String> {
    segments.iter().try_fold(String::new(), |mut acc, segment| match segment {
        Segment::Literal {
            text,
        } => {
            acc.push_str(text);
            Some(acc)
        }
        _ => None,
    })
}

/// A scanned value ready to be resolved, possibly more than once.
///
/// ```
/// use cfgplate::placeholder::PlaceholderEngine;
///
/// let engine = PlaceholderEngine::new("#{", "}", Some(":"), None, false)?;
/// let parsed = engine.parse("Hello #{name:Guest}!");
///
/// assert_eq!(parsed.placeholder_keys(), vec!["name".to_string()]);
/// let nothing = |_: &str| -> Option<String> { None };
/// assert_eq!(parsed.resolve(&engine, &nothing)?, "Hello Guest!");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedValue {
    text: String,
    segments: Vec<Segment>,
}

impl ParsedValue {
    pub(crate) fn new(text: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            text: text.into(),
            segments,
        }
    }

    /// The original input.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the input contains no placeholder at all.
    pub fn is_literal_only(&self) -> bool {
        self.segments.iter().all(Segment::is_literal)
    }

    /// Keys that are known without resolving anything, in order of appearance.
    ///
    /// Dynamic keys (built from nested placeholders) are skipped, but their
    /// inner placeholders are reported.
    pub fn placeholder_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.segments, &mut keys);
        keys
    }

    /// Resolve with a fresh context bound to `engine`'s delimiters.
    ///
    /// # Errors
    ///
    /// See [`PlaceholderEngine::resolve`].
    pub fn resolve(
        &self,
        engine: &PlaceholderEngine,
        resolver: &dyn PlaceholderResolver,
    ) -> Result<String, ResolutionError> {
        let mut context = ResolutionContext::new(engine.delimiters(), resolver);
        self.resolve_in(&mut context)
    }

    /// Resolve within an existing context.
    ///
    /// On failure the original input is appended to the error's value chain.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolutionError`] for unresolvable or circular placeholders.
    pub fn resolve_in(&self, context: &mut ResolutionContext<'_>) -> Result<String, ResolutionError> {
        resolve_all(&self.segments, context).map_err(|error| error.with_value(self.text.as_str()))
    }
}

fn collect_keys(segments: &[Segment], keys: &mut Vec<String>) {
    for segment in segments {
        match segment {
            Segment::Literal {
                ..
            } => {}
            Segment::Simple {
                key,
                ..
            } => keys.push(key.clone()),
            Segment::Nested {
                key,
                fallback,
                ..
            } => {
                match literal_text(key) {
                    Some(static_key) => keys.push(static_key),
                    None => collect_keys(key, keys),
                }
                if let Some(fallback) = fallback {
                    collect_keys(fallback, keys);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_literal_coalesces() {
        let mut segments = Vec::new();
        push_literal(&mut segments, "Hello");
        push_literal(&mut segments, "");
        push_literal(&mut segments, ", world");
        assert_eq!(segments, vec![Segment::literal("Hello, world")]);
    }

    #[test]
    fn test_push_literal_after_placeholder() {
        let mut segments = vec![Segment::Simple {
            text: "a".to_string(),
            key: "a".to_string(),
            fallback: None,
        }];
        push_literal(&mut segments, "!");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].text(), "!");
    }

    #[test]
    fn test_literal_text() {
        let literals = vec![Segment::literal("a"), Segment::literal("b")];
        assert_eq!(literal_text(&literals), Some("ab".to_string()));
        assert_eq!(literal_text(&[]), Some(String::new()));

        let mixed = vec![
            Segment::literal("a"),
            Segment::Simple {
                text: "b".to_string(),
                key: "b".to_string(),
                fallback: None,
            },
        ];
        assert_eq!(literal_text(&mixed), None);
    }

    #[test]
    fn test_serialized_shape() {
        let segment = Segment::Simple {
            text: "name:Guest".to_string(),
            key: "name".to_string(),
            fallback: Some("Guest".to_string()),
        };
        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(json["kind"], "simple");
        assert_eq!(json["key"], "name");
        assert_eq!(json["fallback"], "Guest");
    }
}
