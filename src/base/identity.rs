//! Namespaced resource identities.
//!
//! Every identifier tracked by the cache is a resource location of the form
//! `<namespace>:<path>`, e.g. `minecraft:say_hello` or `mypack:foo/bar`.
//! When the namespace is omitted in source text, the default namespace
//! applies.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

/// The namespace assumed when an identifier omits one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A namespaced identity: `<namespace>:<path>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceLocation {
    namespace: SmolStr,
    path: SmolStr,
}

impl ResourceLocation {
    /// Create an identity from explicit namespace and path parts.
    pub fn new(namespace: impl Into<SmolStr>, path: impl Into<SmolStr>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Create an identity in the default namespace.
    pub fn with_default_namespace(path: impl Into<SmolStr>) -> Self {
        Self::new(DEFAULT_NAMESPACE, path)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_default_namespace(&self) -> bool {
        self.namespace == DEFAULT_NAMESPACE
    }

    /// Canonical full form, always including the namespace.
    ///
    /// This is the string form used as a cache key and as the input to
    /// visibility pattern matching.
    pub fn to_full_string(&self) -> String {
        format!("{}:{}", self.namespace, self.path)
    }

    /// Shortest form: the namespace is omitted when it is the default.
    /// Used for user-facing labels, never as a cache key.
    pub fn to_shortest_string(&self) -> String {
        if self.is_default_namespace() {
            self.path.to_string()
        } else {
            self.to_full_string()
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for ResourceLocation {
    type Err = std::convert::Infallible;

    /// Parsing is total: a string without `:` is a path in the default
    /// namespace. Only the first `:` separates; the path may contain `/`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::with_default_namespace(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_namespace() {
        let id: ResourceLocation = "mypack:foo/bar".parse().unwrap();
        assert_eq!(id.namespace(), "mypack");
        assert_eq!(id.path(), "foo/bar");
        assert_eq!(id.to_full_string(), "mypack:foo/bar");
    }

    #[test]
    fn test_parse_without_namespace() {
        let id: ResourceLocation = "say_hello".parse().unwrap();
        assert_eq!(id.namespace(), DEFAULT_NAMESPACE);
        assert_eq!(id.to_full_string(), "minecraft:say_hello");
    }

    #[test]
    fn test_shortest_string() {
        let default_ns = ResourceLocation::with_default_namespace("foo");
        assert_eq!(default_ns.to_shortest_string(), "foo");

        let custom = ResourceLocation::new("mypack", "foo");
        assert_eq!(custom.to_shortest_string(), "mypack:foo");
    }

    #[test]
    fn test_empty_namespace_is_literal() {
        let id: ResourceLocation = ":foo".parse().unwrap();
        assert_eq!(id.namespace(), "");
        assert_eq!(id.path(), "foo");
    }
}
