//! Token categories
//!
//! A category is an opaque, case-sensitive label. The built-in labels are
//! only the starting vocabulary: new categories can be created at any time
//! through the resolver.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const ARTICLE: &str = "ARTICLE";
pub const NOUN: &str = "NOUN";
pub const VERB: &str = "VERB";
pub const ADJECTIVE: &str = "ADJECTIVE";
pub const ADVERB: &str = "ADVERB";
pub const OTHER: &str = "OTHER";
pub const LEXICAL_ERROR: &str = "LEXICAL_ERROR";

/// Built-in labels offered on every prompt, in menu order. The
/// [`LEXICAL_ERROR`] sentinel is not part of this list; it always comes last.
pub const BUILTIN: &[&str] = &[ARTICLE, NOUN, VERB, ADJECTIVE, ADVERB, OTHER];

/// Grammatical class label assigned to a lexeme
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(label: impl Into<String>) -> Self {
        Category(label.into())
    }

    pub fn lexical_error() -> Self {
        Category::new(LEXICAL_ERROR)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_lexical_error(&self) -> bool {
        self.0 == LEXICAL_ERROR
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::new(label)
    }
}

impl PartialEq<str> for Category {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Category {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Options offered when a lexeme is unknown.
///
/// Built-in labels first, then the categories `known` adds (in the order they
/// were registered), then the lexical-error sentinel.
pub fn menu_options(known: &[Category]) -> Vec<Category> {
    let mut options: Vec<Category> = BUILTIN.iter().map(|label| Category::new(*label)).collect();
    for category in known {
        if !category.is_lexical_error() && !options.contains(category) {
            options.push(category.clone());
        }
    }
    options.push(Category::lexical_error());
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_starts_with_builtins_and_ends_with_sentinel() {
        let options = menu_options(&[]);
        assert_eq!(options.len(), BUILTIN.len() + 1);
        assert_eq!(options[0], ARTICLE);
        assert_eq!(options.last().unwrap(), &Category::lexical_error());
    }

    #[test]
    fn menu_appends_learned_categories_in_registration_order() {
        let known = vec![
            Category::new(NOUN),
            Category::new("PRONOUN"),
            Category::lexical_error(),
            Category::new("NUMBER"),
        ];
        let options = menu_options(&known);
        let labels: Vec<&str> = options.iter().map(Category::as_str).collect();
        assert_eq!(
            labels,
            vec![
                ARTICLE,
                NOUN,
                VERB,
                ADJECTIVE,
                ADVERB,
                OTHER,
                "PRONOUN",
                "NUMBER",
                LEXICAL_ERROR
            ]
        );
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert_ne!(Category::new("noun"), Category::new(NOUN));
    }
}
