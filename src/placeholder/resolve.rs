//! Walks a segment tree and produces the substituted string.

use super::context::ResolutionContext;
use super::error::ResolutionError;
use super::segment::{Segment, literal_text};

/// Resolve every segment in order and concatenate the results.
pub(crate) fn resolve_all(
    segments: &[Segment],
    context: &mut ResolutionContext<'_>,
) -> Result<String, ResolutionError> {
    let mut resolved = String::new();
    for segment in segments {
        resolved.push_str(&resolve_segment(segment, context)?);
    }
    Ok(resolved)
}

fn resolve_segment(
    segment: &Segment,
    context: &mut ResolutionContext<'_>,
) -> Result<String, ResolutionError> {
    match segment {
        Segment::Literal {
            text,
        } => Ok(text.clone()),

        Segment::Simple {
            text,
            key,
            fallback,
        } => {
            // The raw text differs from the key when a fallback was split off or
            // escapes were removed; look it up verbatim first. An empty key is
            // never looked up in any form.
            if !key.is_empty() && text != key {
                if let Some(value) = resolve_recursively(context, text)? {
                    return Ok(value);
                }
            }
            if let Some(value) = resolve_recursively(context, key)? {
                return Ok(value);
            }
            match fallback {
                Some(fallback) => Ok(fallback.clone()),
                None => context.handle_unresolvable(key, text),
            }
        }

        Segment::Nested {
            text,
            key,
            fallback,
        } => {
            context.descend(text)?;
            let resolved = resolve_nested(text, key, fallback.as_deref(), context);
            context.ascend();
            resolved
        }
    }
}

fn resolve_nested(
    text: &str,
    key: &[Segment],
    fallback: Option<&[Segment]>,
    context: &mut ResolutionContext<'_>,
) -> Result<String, ResolutionError> {
    let key = resolve_all(key, context)?;
    match resolve_recursively(context, &key)? {
        Some(value) => Ok(value),
        None => match fallback {
            Some(fallback) => resolve_all(fallback, context),
            None => context.handle_unresolvable(&key, text),
        },
    }
}

/// Look up `key` and expand any placeholders in its value.
///
/// Returns `Ok(None)` when the resolver has no value for `key`.
pub(crate) fn resolve_recursively(
    context: &mut ResolutionContext<'_>,
    key: &str,
) -> Result<Option<String>, ResolutionError> {
    let Some(value) = context.resolve(key) else {
        return Ok(None);
    };

    context.mark_visited(key)?;
    if let Err(error) = context.descend(key) {
        context.unmark(key);
        return Err(error);
    }

    let segments = context.reparse(&value);
    let resolved = match literal_text(&segments) {
        Some(text) => Ok(text),
        None => {
            tracing::trace!("Expanding placeholders in value of '{}'", key);
            resolve_all(&segments, context).map_err(|error| error.with_value(value.as_str()))
        }
    };

    context.ascend();
    context.unmark(key);
    resolved.map(Some)
}
