//! Category tables
//!
//! [`Lexicon`] is the contract the classifier works against. Two shapes
//! implement it:
//!
//! - [`MembershipTable`]: category -> lexeme -> occurrence positions, exact
//!   lookup. This is the shape the persisted dictionary uses.
//! - [`PatternTable`](super::pattern::PatternTable): category -> regex
//!   alternation, case-insensitive prefix match.
//!
//! Both keep categories in registration order and resolve lookups by the
//! first category that accepts the lexeme. A lexeme is never bound to two
//! categories: registering it under a second one keeps the first binding.

use super::category::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shared contract of the category tables
pub trait Lexicon {
    /// Categories in the order they were first created
    fn categories(&self) -> &[Category];

    /// The category whose rule accepts `lexeme`, first match wins.
    fn lookup(&self, lexeme: &str) -> Option<&Category>;

    /// Create `category` if absent. Returns true when it was created.
    fn ensure_category(&mut self, category: &Category) -> bool;

    /// Bind `lexeme` to `category` and record `position` when given.
    ///
    /// Idempotent for membership. If `lexeme` already belongs to another
    /// category, that binding is kept and the position is recorded there.
    /// Returns the category the lexeme ends up bound to.
    fn register(&mut self, category: &Category, lexeme: &str, position: Option<&str>) -> Category;

    /// Lexemes known under `category`
    fn lexemes(&self, category: &Category) -> Vec<&str>;

    fn lexeme_count(&self, category: &Category) -> usize {
        self.lexemes(category).len()
    }
}

/// Membership form: category -> lexeme -> positions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipTable {
    categories: Vec<Category>,
    lexemes: BTreeMap<Category, BTreeMap<String, Vec<String>>>,
}

impl MembershipTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions recorded for `lexeme` under `category`, oldest first
    pub fn positions(&self, category: &Category, lexeme: &str) -> Option<&[String]> {
        self.lexemes
            .get(category)
            .and_then(|bucket| bucket.get(lexeme))
            .map(Vec::as_slice)
    }

    /// The lexeme -> positions bucket of `category`
    pub fn bucket(&self, category: &Category) -> Option<&BTreeMap<String, Vec<String>>> {
        self.lexemes.get(category)
    }

    /// Rebuild a table from persisted parts.
    ///
    /// Buckets whose category is missing from `categories` are appended in
    /// key order. A lexeme present in several buckets stays where it is;
    /// lookups resolve it by registration order.
    pub fn from_parts(
        categories: Vec<Category>,
        mut lexemes: BTreeMap<Category, BTreeMap<String, Vec<String>>>,
    ) -> Self {
        let mut ordered: Vec<Category> = Vec::with_capacity(categories.len());
        for category in categories {
            if !ordered.contains(&category) {
                ordered.push(category);
            }
        }
        for category in lexemes.keys() {
            if !ordered.contains(category) {
                ordered.push(category.clone());
            }
        }
        for category in &ordered {
            lexemes.entry(category.clone()).or_default();
        }
        MembershipTable {
            categories: ordered,
            lexemes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Lexicon for MembershipTable {
    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn lookup(&self, lexeme: &str) -> Option<&Category> {
        self.categories.iter().find(|category| {
            self.lexemes
                .get(*category)
                .is_some_and(|bucket| bucket.contains_key(lexeme))
        })
    }

    fn ensure_category(&mut self, category: &Category) -> bool {
        if self.categories.contains(category) {
            return false;
        }
        self.categories.push(category.clone());
        self.lexemes.entry(category.clone()).or_default();
        true
    }

    fn register(&mut self, category: &Category, lexeme: &str, position: Option<&str>) -> Category {
        let bound = match self.lookup(lexeme) {
            Some(existing) => existing.clone(),
            None => {
                self.ensure_category(category);
                category.clone()
            }
        };
        let entry = self
            .lexemes
            .entry(bound.clone())
            .or_default()
            .entry(lexeme.to_string())
            .or_default();
        if let Some(position) = position {
            entry.push(position.to_string());
        }
        bound
    }

    fn lexemes(&self, category: &Category) -> Vec<&str> {
        self.lexemes
            .get(category)
            .map(|bucket| bucket.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn lexeme_count(&self, category: &Category) -> usize {
        self.lexemes.get(category).map_or(0, BTreeMap::len)
    }
}
