//! Paths locating validation failures in nested structures.
//!
//! This module provides [`IssuePath`] and [`PathSegment`] for describing
//! where inside a nested value a failure occurred (e.g. `users[0].email`).
//! Issues are created with an empty path at the failing value and prefixed
//! as they propagate up through enclosing object and array schemas.

use std::fmt::{self, Display};

/// A segment of an issue path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key access (e.g. `user`, `email`)
    Field(String),
    /// An array index access (e.g. `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A path to a value in a nested structure.
///
/// An empty path refers to the root value that validation started from.
/// Paths grow from the front: when an object schema hoists issues out of a
/// field, it prefixes the field segment onto each child issue's path, so a
/// path is complete exactly when the issue reaches the top of the run.
///
/// # Example
///
/// ```rust
/// use gauntlet::{IssuePath, PathSegment};
///
/// let path = IssuePath::root()
///     .push(PathSegment::field("users"))
///     .push(PathSegment::index(0))
///     .push(PathSegment::field("email"));
///
/// assert_eq!(path.to_string(), "users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IssuePath {
    segments: Vec<PathSegment>,
}

impl IssuePath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single segment.
    pub fn from_segment(segment: PathSegment) -> Self {
        Self {
            segments: vec![segment],
        }
    }

    /// Returns a new path with a segment appended at the end.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Prefixes a segment onto the front of this path in place.
    ///
    /// Used when issues propagate upward out of a nested schema: the parent
    /// knows the segment, the child produced the rest of the path.
    pub fn prepend(&mut self, segment: PathSegment) {
        self.segments.insert(0, segment);
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the first segment, or None if this is root.
    pub fn first(&self) -> Option<&PathSegment> {
        self.segments.first()
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for IssuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        let path = IssuePath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_single_field() {
        let path = IssuePath::root().push(PathSegment::field("user"));
        assert_eq!(path.to_string(), "user");
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_single_index() {
        let path = IssuePath::root().push(PathSegment::index(0));
        assert_eq!(path.to_string(), "[0]");
    }

    #[test]
    fn test_nested_fields() {
        let path = IssuePath::root()
            .push(PathSegment::field("user"))
            .push(PathSegment::field("email"));
        assert_eq!(path.to_string(), "user.email");
    }

    #[test]
    fn test_field_with_index() {
        let path = IssuePath::root()
            .push(PathSegment::field("users"))
            .push(PathSegment::index(0));
        assert_eq!(path.to_string(), "users[0]");
    }

    #[test]
    fn test_prepend_builds_from_front() {
        let mut path = IssuePath::from_segment(PathSegment::field("email"));
        path.prepend(PathSegment::index(0));
        path.prepend(PathSegment::field("users"));
        assert_eq!(path.to_string(), "users[0].email");
        assert_eq!(path.first(), Some(&PathSegment::Field("users".to_string())));
        assert_eq!(path.last(), Some(&PathSegment::Field("email".to_string())));
    }

    #[test]
    fn test_push_immutability() {
        let base = IssuePath::root().push(PathSegment::field("users"));
        let path_a = base.push(PathSegment::index(0));
        let path_b = base.push(PathSegment::index(1));

        assert_eq!(base.to_string(), "users");
        assert_eq!(path_a.to_string(), "users[0]");
        assert_eq!(path_b.to_string(), "users[1]");
    }

    #[test]
    fn test_deeply_nested() {
        let path = IssuePath::root()
            .push(PathSegment::field("body"))
            .push(PathSegment::field("data"))
            .push(PathSegment::index(42))
            .push(PathSegment::field("items"))
            .push(PathSegment::index(0))
            .push(PathSegment::field("name"));
        assert_eq!(path.to_string(), "body.data[42].items[0].name");
    }

    #[test]
    fn test_segments_iterator() {
        let path = IssuePath::root()
            .push(PathSegment::field("a"))
            .push(PathSegment::index(1))
            .push(PathSegment::field("b"));

        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], &PathSegment::Field("a".to_string()));
        assert_eq!(segments[1], &PathSegment::Index(1));
        assert_eq!(segments[2], &PathSegment::Field("b".to_string()));
    }

    #[test]
    fn test_equality() {
        let path1 = IssuePath::root()
            .push(PathSegment::field("a"))
            .push(PathSegment::index(0));
        let path2 = IssuePath::root()
            .push(PathSegment::field("a"))
            .push(PathSegment::index(0));
        let path3 = IssuePath::root()
            .push(PathSegment::field("a"))
            .push(PathSegment::index(1));

        assert_eq!(path1, path2);
        assert_ne!(path1, path3);
    }
}
