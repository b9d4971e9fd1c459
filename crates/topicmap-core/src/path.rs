//! Topic path strings.
//!
//! A path is a `/`-separated list of segments. Leading, trailing and
//! doubled separators are tolerated because empty segments are ignored.
//! Matching is case-sensitive.

use itertools::Itertools;
use std::fmt;

pub const SEPARATOR: char = '/';

/// Split a path string into its non-empty segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|seg| !seg.is_empty())
}

/// Strip the `<root>/` prefix from a full path. Paths that do not start
/// with the prefix are returned unchanged.
pub fn strip_root<'a>(path: &'a str, root: &str) -> &'a str {
    path.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix(SEPARATOR))
        .unwrap_or(path)
}

/// A topic path rooted at a type name, e.g. `RosRoot/test/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicPath {
    root: String,
    segments: Vec<String>,
}

impl TopicPath {
    pub fn new<I, S>(root: impl Into<String>, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The first segment below the root.
    pub fn first(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// The last segment, or the root when there are no segments.
    pub fn name(&self) -> &str {
        self.segments.last().unwrap_or(&self.root)
    }

    /// The path without the root prefix, e.g. `test/name`.
    pub fn relative(&self) -> String {
        self.segments.iter().join("/")
    }
}

impl fmt::Display for TopicPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for seg in &self.segments {
            write!(f, "{SEPARATOR}{seg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_skip_empty() {
        let segs: Vec<_> = segments("//test///who_I_am/").collect();
        assert_eq!(segs, ["test", "who_I_am"]);
        assert_eq!(segments("").count(), 0);
        assert_eq!(segments("///").count(), 0);
    }

    #[test]
    fn test_strip_root() {
        assert_eq!(strip_root("RosRoot/test/name", "RosRoot"), "test/name");
        assert_eq!(strip_root("Other/test/name", "RosRoot"), "Other/test/name");
        assert_eq!(strip_root("RosRootX/a", "RosRoot"), "RosRootX/a");
    }

    #[test]
    fn test_topic_path_display() {
        let path = TopicPath::new("RosRoot", ["test", "name"]);
        assert_eq!(path.to_string(), "RosRoot/test/name");
        assert_eq!(path.relative(), "test/name");
        assert_eq!(path.first(), Some("test"));
        assert_eq!(path.name(), "name");
    }
}
