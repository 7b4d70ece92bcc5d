//! Qualified symbol names.
//!
//! A qualified name is the containment path of a symbol, outermost first,
//! excluding the root container (the project or source file). Parts are
//! joined with `.`; a part written as a computed key (`[iterator]`) is a
//! JS Symbol-keyed member and is rewritten to `@@iterator` for lookups
//! against compatibility data that uses that convention.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedName {
    parts: Vec<String>,
}

impl QualifiedName {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a dotted name into parts. Dots inside `[...]` do not split, so
    /// `Array.[Symbol.iterator]` has two parts.
    pub fn parse(dotted: &str) -> Self {
        let mut parts = Vec::new();
        let mut depth = 0usize;
        let mut start = 0usize;
        for (i, ch) in dotted.char_indices() {
            match ch {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '.' if depth == 0 => {
                    parts.push(dotted[start..i].to_string());
                    start = i + 1;
                }
                _ => {}
            }
        }
        if !dotted.is_empty() {
            parts.push(dotted[start..].to_string());
        }
        Self { parts }
    }

    /// Name of a child declared inside this container.
    pub fn child(&self, name: &str) -> Self {
        let mut parts = self.parts.clone();
        parts.push(name.to_string());
        Self { parts }
    }

    pub fn parent(&self) -> Option<Self> {
        if self.parts.len() < 2 {
            return None;
        }
        Some(Self {
            parts: self.parts[..self.parts.len() - 1].to_vec(),
        })
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn last(&self) -> Option<&str> {
        self.parts.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// True when any part is a computed Symbol key.
    pub fn is_symbol(&self) -> bool {
        self.parts
            .iter()
            .any(|part| normalize_symbol_part(part).is_some())
    }

    /// Parts with Symbol keys rewritten to the `@@inner` convention.
    pub fn compat_parts(&self) -> Vec<String> {
        self.parts
            .iter()
            .map(|part| normalize_symbol_part(part).unwrap_or_else(|| part.clone()))
            .collect()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}

/// Rewrite the bracketed portion of a name part (`[inner]`) to `@@inner`.
///
/// Returns `None` when the part carries no computed key. The match is greedy
/// from the first `[` to the last `]`, with text around it kept in place.
pub fn normalize_symbol_part(part: &str) -> Option<String> {
    let open = part.find('[')?;
    let close = part.rfind(']')?;
    if close <= open {
        return None;
    }
    let inner = &part[open + 1..close];
    Some(format!("{}@@{}{}", &part[..open], inner, &part[close + 1..]))
}
