//! Lexeme classifier
//!
//! For every candidate lexeme, in document order:
//!
//! 1. normalize it (skip if that leaves nothing),
//! 2. look it up in the [`Lexicon`]; the first category in registration
//!    order that accepts it wins,
//! 3. otherwise ask the [`Resolver`], creating the chosen category if needed,
//! 4. register the occurrence position under the bound category.
//!
//! Once a lexeme is bound to a category every later occurrence reuses that
//! binding, in this document and in the following ones. Rebinding requires
//! editing the dictionary by hand.

use super::category::{menu_options, Category};
use super::error::ResolveError;
use super::normalize::Normalization;
use super::resolver::Resolver;
use super::splitter::Lexeme;
use super::stats::Statistics;
use super::table::Lexicon;
use std::collections::BTreeSet;
use std::fmt;

/// Sequential id of an ingested document, rendered `TXT<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u32);

impl DocumentId {
    pub fn new(number: u32) -> Self {
        DocumentId(number)
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// Position string stored in the dictionary, e.g. `TXT2-14`
    pub fn position_key(self, position: usize) -> String {
        format!("{}-{}", self, position)
    }

    /// Whether a stored position string belongs to this document
    pub fn owns(self, key: &str) -> bool {
        key.strip_prefix(&format!("{}-", self))
            .is_some_and(|rest| rest.parse::<usize>().is_ok())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TXT{}", self.0)
    }
}

/// One classified lexeme of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub document: DocumentId,
    pub position: usize,
    /// Normalized lexeme
    pub lexeme: String,
    pub category: Category,
}

impl Occurrence {
    pub fn position_key(&self) -> String {
        self.document.position_key(self.position)
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position_key(), self.category)
    }
}

/// Result of classifying one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPass {
    pub document: DocumentId,
    /// In document order, one per non-empty lexeme
    pub occurrences: Vec<Occurrence>,
    /// Distinct normalized lexemes seen
    pub found: BTreeSet<String>,
    /// The subset of `found` that had to be resolved
    pub learned: BTreeSet<String>,
}

impl ClassifiedPass {
    fn new(document: DocumentId) -> Self {
        ClassifiedPass {
            document,
            occurrences: Vec::new(),
            found: BTreeSet::new(),
            learned: BTreeSet::new(),
        }
    }

    pub fn statistics(&self, lexicon: &impl Lexicon) -> Statistics {
        Statistics::new(self.found.len(), self.learned.len(), lexicon)
    }
}

pub struct Classifier<R> {
    resolver: R,
    normalization: Normalization,
}

impl<R: Resolver> Classifier<R> {
    pub fn new(resolver: R, normalization: Normalization) -> Self {
        Classifier {
            resolver,
            normalization,
        }
    }

    pub fn into_resolver(self) -> R {
        self.resolver
    }

    /// Classify `lexemes` of `document`, updating `lexicon` as knowledge grows.
    ///
    /// Fails only when the resolver cannot answer; the lexicon then holds
    /// whatever was learned before the failure.
    pub fn classify<L: Lexicon>(
        &mut self,
        lexicon: &mut L,
        document: DocumentId,
        lexemes: &[Lexeme],
    ) -> Result<ClassifiedPass, ResolveError> {
        let mut pass = ClassifiedPass::new(document);
        for candidate in lexemes {
            self.classify_one(lexicon, candidate, &mut pass)?;
        }
        log::info!(
            "{}: {} lexemes classified, {} learned",
            document,
            pass.occurrences.len(),
            pass.learned.len()
        );
        Ok(pass)
    }

    fn classify_one<L: Lexicon>(
        &mut self,
        lexicon: &mut L,
        candidate: &Lexeme,
        pass: &mut ClassifiedPass,
    ) -> Result<(), ResolveError> {
        let lexeme = self.normalization.apply(&candidate.text);
        if lexeme.is_empty() {
            return Ok(());
        }
        pass.found.insert(lexeme.clone());
        let key = pass.document.position_key(candidate.position);

        let category = match lexicon.lookup(&lexeme).cloned() {
            Some(known) => {
                log::debug!("'{}' matched {}", lexeme, known);
                lexicon.register(&known, &lexeme, Some(&key))
            }
            None => {
                log::debug!("'{}' unknown at bytes {:?}", lexeme, candidate.span);
                let options = menu_options(lexicon.categories());
                let chosen = self.resolver.resolve(&lexeme, &options)?;
                if chosen.is_lexical_error() {
                    log::info!("'{}' identified as lexical error", lexeme);
                }
                if lexicon.ensure_category(&chosen) {
                    log::info!("created category {}", chosen);
                }
                pass.learned.insert(lexeme.clone());
                lexicon.register(&chosen, &lexeme, Some(&key))
            }
        };

        pass.occurrences.push(Occurrence {
            document: pass.document,
            position: candidate.position,
            lexeme,
            category,
        });
        Ok(())
    }
}
