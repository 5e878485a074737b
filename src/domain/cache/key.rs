//! Cache key construction

use std::fmt::{self, Debug, Display};

/// Trait for types that can be used as cache keys
pub trait CacheKey: Send + Sync + Debug + Clone {
    /// Returns the string representation of the key
    fn as_str(&self) -> &str;
}

impl CacheKey for String {
    fn as_str(&self) -> &str {
        self
    }
}

/// Key of the form `{namespace}:{raw}`
///
/// The raw part is used verbatim: no escaping, no hashing. A raw value that
/// itself contains `namespace:` can collide with another key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespacedKey {
    key: String,
    namespace_len: usize,
}

impl NamespacedKey {
    pub fn new(namespace: &str, raw: &str) -> Self {
        Self {
            key: format!("{}:{}", namespace, raw),
            namespace_len: namespace.len(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.key[..self.namespace_len]
    }

    pub fn raw(&self) -> &str {
        &self.key[self.namespace_len + 1..]
    }
}

impl CacheKey for NamespacedKey {
    fn as_str(&self) -> &str {
        &self.key
    }
}

impl Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}
