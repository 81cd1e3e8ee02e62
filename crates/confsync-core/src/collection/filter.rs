//! Collection exclusion filter
//!
//! Decides which configuration collections are visible to changelist,
//! export, and import operations. Patterns use shell-glob syntax and are
//! matched against the full collection name; `*` matches across the `.`
//! segment delimiter, so `language.*` excludes `language.entity.en` as
//! well as `language.types`.

use glob::Pattern;
use thiserror::Error;

use super::DEFAULT_COLLECTION;

/// Exclusion patterns applied when no explicit list is given.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["language.*"];

/// Errors during filter construction
#[derive(Error, Debug)]
pub enum FilterError {
    /// A configured glob pattern failed to parse
    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
}

/// Filters collection names against a fixed set of glob exclusion patterns.
///
/// Patterns are validated once at construction; filtering itself cannot
/// fail. The filter holds no other state and may be shared freely across
/// threads.
#[derive(Debug, Clone)]
pub struct CollectionFilter {
    patterns: Vec<Pattern>,
}

impl CollectionFilter {
    /// Create a filter from a list of glob exclusion patterns
    ///
    /// # Errors
    /// Returns an error if any pattern is not valid glob syntax.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, FilterError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|source| FilterError::InvalidPattern {
                    pattern: p.as_ref().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Whether a collection name matches any exclusion pattern
    ///
    /// Matching is case-sensitive and `*` crosses segment delimiters.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    /// Restrict a set of collection names to those visible to sync operations
    ///
    /// Names matching an exclusion pattern are dropped. When
    /// `include_default` is set, the default collection is unconditionally
    /// placed first in the result, whether or not it appeared in the input
    /// and even if it would otherwise be excluded. The result contains no
    /// duplicates; ordering beyond "default first" follows the input but is
    /// not contractual.
    #[must_use]
    pub fn filter(&self, all_collections: &[String], include_default: bool) -> Vec<String> {
        let mut result = Vec::with_capacity(all_collections.len() + 1);

        if include_default {
            result.push(DEFAULT_COLLECTION.to_string());
        }

        for name in all_collections {
            if result.iter().any(|kept| kept == name) {
                continue;
            }
            if self.is_excluded(name) {
                continue;
            }
            result.push(name.clone());
        }

        result
    }

    /// The configured exclusion patterns, as written
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        self.patterns.iter().map(Pattern::as_str).collect()
    }
}

impl Default for CollectionFilter {
    /// Filter with the built-in `language.*` exclusion
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDE_PATTERNS).expect("built-in patterns are valid globs")
    }
}
