//! Naming-convention rules that decide how a member is exposed.
//!
//! - A name containing `__` is private. It is never listed and never
//!   traversed.
//! - A name with a single leading `_` is a subscribe endpoint. It is
//!   addressed by the name without the underscore.
//! - Everything else is public.

/// The marker that makes a name private wherever it appears.
pub const PRIVATE_MARKER: &str = "__";

/// The prefix that marks a subscribe-only name.
pub const SUBSCRIBE_PREFIX: char = '_';

/// How a member is exposed in the topic namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Readable data, listed as a publish topic.
    #[default]
    Public,
    /// Write-only data, listed as a subscribe topic.
    Subscribe,
    /// Hidden from listings and from traversal.
    Private,
}

impl Visibility {
    /// Classify a declared member name by convention.
    ///
    /// Returns the visibility together with the segment name the member
    /// is addressed by. Subscribe names lose their leading underscore;
    /// private and public names are returned unchanged.
    ///
    /// ```
    /// use topicmap_core::Visibility;
    ///
    /// assert_eq!(Visibility::classify("name"), (Visibility::Public, "name"));
    /// assert_eq!(Visibility::classify("_weather"), (Visibility::Subscribe, "weather"));
    /// assert_eq!(Visibility::classify("__empty"), (Visibility::Private, "__empty"));
    /// ```
    pub fn classify(name: &str) -> (Self, &str) {
        if is_private(name) {
            return (Self::Private, name);
        }

        match name.strip_prefix(SUBSCRIBE_PREFIX) {
            Some(stripped) if !stripped.is_empty() => (Self::Subscribe, stripped),
            _ => (Self::Public, name),
        }
    }

    /// Combine the visibility inherited from an ancestor with the one
    /// declared on a child. Private wins over subscribe, which wins over
    /// public.
    pub fn inherit(self, child: Self) -> Self {
        use Visibility::*;

        match (self, child) {
            (Private, _) | (_, Private) => Private,
            (Subscribe, _) | (_, Subscribe) => Subscribe,
            (Public, Public) => Public,
        }
    }

    /// The declared name that round-trips through [classify](Self::classify)
    /// back to `(self, name)`.
    pub fn declared_name(self, name: &str) -> String {
        match self {
            Self::Subscribe => format!("{SUBSCRIBE_PREFIX}{name}"),
            Self::Public | Self::Private => name.to_string(),
        }
    }
}

/// Returns true if the name or path carries the private marker, either as
/// a prefix or right after a separator.
pub fn is_private(name: &str) -> bool {
    name.contains(PRIVATE_MARKER)
}

/// Returns true if the path string has a segment written with the
/// subscribe prefix.
pub fn is_subscribe_path(path: &str) -> bool {
    path.starts_with(SUBSCRIBE_PREFIX) || path.contains("/_")
}
