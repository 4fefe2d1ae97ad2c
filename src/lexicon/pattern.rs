//! Pattern form of the category table
//!
//! Each category owns a regex alternation of its known lexemes,
//! `(?i)^(?:a|b|c)(?:\b|$)`: anchored at the start of the lexeme,
//! case-insensitive, ending on a word boundary. Alternatives are escaped, so
//! lexemes such as `c++` or `3.14` stay literal.
//!
//! The pattern is always derived from the category's lexeme list, which keeps
//! the list and the matching rule consistent. A lexeme already listed under a
//! category resolves there before any pattern is tried. Positions are not
//! tracked.

use super::category::Category;
use super::table::Lexicon;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "PatternParts", into = "PatternParts")]
pub struct PatternTable {
    categories: Vec<Category>,
    lexemes: BTreeMap<Category, Vec<String>>,
    // Parallel to `categories`. `None` when the category has no lexemes yet
    // or its pattern failed to compile.
    compiled: Vec<Option<Regex>>,
}

/// Persisted shape: patterns are rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PatternParts {
    categories: Vec<Category>,
    lexemes: BTreeMap<Category, Vec<String>>,
}

impl PatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current source of the pattern for `category`
    pub fn pattern(&self, category: &Category) -> Option<String> {
        self.lexemes
            .get(category)
            .filter(|lexemes| !lexemes.is_empty())
            .map(|lexemes| build_pattern(lexemes))
    }

    fn index_of(&self, category: &Category) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    fn recompile(&mut self, index: usize) {
        let category = &self.categories[index];
        let compiled = self.pattern(category).and_then(|source| {
            Regex::new(&source)
                .map_err(|e| log::warn!("pattern for {} did not compile: {}", category, e))
                .ok()
        });
        self.compiled[index] = compiled;
    }

    fn accepts(&self, index: usize, lexeme: &str) -> bool {
        match &self.compiled[index] {
            Some(regex) => regex.is_match(lexeme),
            None => {
                let folded = lexeme.to_lowercase();
                self.lexemes
                    .get(&self.categories[index])
                    .is_some_and(|known| known.iter().any(|k| k.to_lowercase() == folded))
            }
        }
    }
}

fn build_pattern(lexemes: &[String]) -> String {
    let alternatives: Vec<String> = lexemes.iter().map(|l| regex::escape(l)).collect();
    format!(r"(?i)^(?:{})(?:\b|$)", alternatives.join("|"))
}

impl Lexicon for PatternTable {
    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn lookup(&self, lexeme: &str) -> Option<&Category> {
        // A listed lexeme stays with its category even when an earlier
        // category later learns one of its prefixes.
        let folded = lexeme.to_lowercase();
        self.categories
            .iter()
            .find(|category| {
                self.lexemes
                    .get(*category)
                    .is_some_and(|known| known.iter().any(|k| k.to_lowercase() == folded))
            })
            .or_else(|| {
                (0..self.categories.len())
                    .find(|&index| self.accepts(index, lexeme))
                    .map(|index| &self.categories[index])
            })
    }

    fn ensure_category(&mut self, category: &Category) -> bool {
        if self.index_of(category).is_some() {
            return false;
        }
        self.categories.push(category.clone());
        self.lexemes.entry(category.clone()).or_default();
        self.compiled.push(None);
        true
    }

    fn register(&mut self, category: &Category, lexeme: &str, _position: Option<&str>) -> Category {
        let bound = match self.lookup(lexeme) {
            Some(existing) => existing.clone(),
            None => {
                self.ensure_category(category);
                category.clone()
            }
        };
        let known = self.lexemes.entry(bound.clone()).or_default();
        if !known.iter().any(|k| k == lexeme) {
            known.push(lexeme.to_string());
            if let Some(index) = self.index_of(&bound) {
                self.recompile(index);
            }
        }
        bound
    }

    fn lexemes(&self, category: &Category) -> Vec<&str> {
        self.lexemes
            .get(category)
            .map(|known| known.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl From<PatternParts> for PatternTable {
    fn from(parts: PatternParts) -> Self {
        let mut table = PatternTable::new();
        for category in parts.categories.iter().chain(parts.lexemes.keys()) {
            table.ensure_category(category);
        }
        table.lexemes.extend(parts.lexemes);
        for index in 0..table.categories.len() {
            table.recompile(index);
        }
        table
    }
}

impl From<PatternTable> for PatternParts {
    fn from(table: PatternTable) -> Self {
        PatternParts {
            categories: table.categories,
            lexemes: table.lexemes,
        }
    }
}
