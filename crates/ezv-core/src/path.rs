//! # Field Paths
//!
//! A [`FieldPath`] locates a value inside the document under validation.
//! Object keys contribute string segments and array positions contribute
//! numeric segments. Paths only ever grow: descending into a field or an
//! element returns a new path with one more segment appended.
//!
//! ## Invariant
//!
//! The dotted form of a path, split on `.`, reconstructs the traversal from
//! the validation root to the failing value. Field names containing `.` are
//! rejected by the engine for this reason.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of a traversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    /// Array element position.
    Index(usize),
    /// Object field name.
    Key(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(i) => write!(f, "{i}"),
            Segment::Key(k) => f.write_str(k),
        }
    }
}

/// Location of a value relative to the validation root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The empty path addressing the validation root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted prefix such as `friends.3.address`.
    ///
    /// Segments made only of ASCII digits become indices; everything else is
    /// a key. Empty segments are skipped, so `""` parses to the root path.
    pub fn parse(dotted: &str) -> Self {
        let segments = dotted
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| match s.parse::<usize>() {
                Ok(i) if s.bytes().all(|b| b.is_ascii_digit()) => Segment::Index(i),
                _ => Segment::Key(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Path of the named field below this one.
    pub fn key(&self, name: &str) -> Self {
        self.push(Segment::Key(name.to_string()))
    }

    /// Path of the element at `index` below this one.
    pub fn index(&self, index: usize) -> Self {
        self.push(Segment::Index(index))
    }

    fn push(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }

    /// Returns true for the validation root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<&str> for FieldPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_empty() {
        assert_eq!(FieldPath::root().to_string(), "");
        assert!(FieldPath::root().is_root());
    }

    #[test]
    fn keys_and_indices_join_with_dots() {
        let path = FieldPath::root().key("friends").index(3).key("name");
        assert_eq!(path.to_string(), "friends.3.name");
        assert_eq!(path.depth(), 3);
    }

    #[test]
    fn index_at_root_has_no_leading_dot() {
        let path = FieldPath::root().index(1).key("name");
        assert_eq!(path.to_string(), "1.name");
    }

    #[test]
    fn descending_does_not_modify_parent() {
        let parent = FieldPath::root().key("a");
        let _child = parent.key("b");
        assert_eq!(parent.to_string(), "a");
    }

    #[test]
    fn parse_splits_indices_and_keys() {
        let path = FieldPath::parse("friends.10.name");
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("friends".into()),
                Segment::Index(10),
                Segment::Key("name".into()),
            ]
        );
        assert_eq!(path.to_string(), "friends.10.name");
    }

    #[test]
    fn parse_keeps_signed_numbers_as_keys() {
        let path = FieldPath::parse("+1");
        assert_eq!(path.segments(), &[Segment::Key("+1".into())]);
    }

    #[test]
    fn parse_empty_is_root() {
        assert!(FieldPath::parse("").is_root());
    }
}
