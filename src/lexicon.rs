//! Lexeme classification and knowledge accumulation
//!
//! Components, leaves first:
//!
//! - [`splitter`]: raw text to positioned candidate lexemes
//! - [`table`] / [`pattern`]: the two shapes of category tables, both behind
//!   the [`table::Lexicon`] trait
//! - [`dictionary`]: the persisted aggregate (table + counters + seed flag)
//! - [`classifier`]: per-lexeme lookup with a [`resolver::Resolver`] fallback
//! - [`session`]: one ingestion pass over one document

pub mod category;
pub mod classifier;
pub mod dictionary;
pub mod error;
pub mod normalize;
pub mod output;
pub mod pattern;
pub mod resolver;
pub mod seed;
pub mod session;
pub mod splitter;
pub mod stats;
pub mod table;

pub use category::Category;
pub use classifier::{ClassifiedPass, Classifier, Occurrence};
pub use dictionary::{Dictionary, LoadStatus, SeedOutcome};
pub use normalize::Normalization;
pub use resolver::{FallbackResolver, PromptResolver, Resolver, ScriptedResolver};
pub use session::{Session, SessionReport, SessionSettings};
pub use splitter::{split, Lexeme};
pub use table::{Lexicon, MembershipTable};
