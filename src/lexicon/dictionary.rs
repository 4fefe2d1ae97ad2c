//! Classification dictionary
//!
//! The persisted aggregate: a [`MembershipTable`] plus the document counter,
//! the one-time seed flag and the normalization policy the table was built
//! under. The on-disk artifact is pretty-printed JSON:
//!
//! ```json
//! {
//!   "categories": ["ARTICLE", "NOUN"],
//!   "lexemes": { "NOUN": { "libro": ["TXT1-2", "TXT3-9"] } },
//!   "documents_processed": 3,
//!   "predefined_seed_used": true,
//!   "normalization": "lowercase"
//! }
//! ```
//!
//! Loading is forgiving: a missing file or missing fields degrade to an empty
//! or partial dictionary and are reported through [`LoadStatus`].

use super::category::Category;
use super::classifier::DocumentId;
use super::error::PersistError;
use super::normalize::Normalization;
use super::seed::SEED_VOCABULARY;
use super::table::{Lexicon, MembershipTable};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

type Bucket = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    table: MembershipTable,
    documents_processed: u32,
    predefined_seed_used: bool,
    normalization: Normalization,
}

/// How a load attempt went. None of these abort a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    /// No file at the path; starting fresh
    NotFound,
    /// Some fields were missing or malformed; the rest was kept
    Partial { fields: Vec<String> },
    /// The file could not be read or is not a JSON object; starting fresh
    Unreadable(String),
}

impl LoadStatus {
    pub fn is_fresh(&self) -> bool {
        matches!(self, LoadStatus::NotFound | LoadStatus::Unreadable(_))
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStatus::Loaded => write!(f, "dictionary loaded"),
            LoadStatus::NotFound => write!(f, "dictionary file not found, starting with a new one"),
            LoadStatus::Partial { fields } => write!(
                f,
                "dictionary loaded partially, missing or malformed: {}",
                fields.join(", ")
            ),
            LoadStatus::Unreadable(reason) => {
                write!(f, "dictionary unreadable ({}), starting with a new one", reason)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Seed lexemes were inserted; `added` counts the ones not already known
    Seeded { added: usize },
    /// The dictionary was seeded before and has processed documents since
    Skipped,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    categories: &'a [Category],
    lexemes: BTreeMap<&'a Category, &'a Bucket>,
    documents_processed: u32,
    predefined_seed_used: bool,
    normalization: Normalization,
}

impl Dictionary {
    pub fn new(normalization: Normalization) -> Self {
        Dictionary {
            normalization,
            ..Default::default()
        }
    }

    /// Read the dictionary at `path`, degrading to an empty one on failure.
    pub fn load(path: impl AsRef<Path>) -> (Dictionary, LoadStatus) {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(source) => Dictionary::from_json_str(&source),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                (Dictionary::default(), LoadStatus::NotFound)
            }
            Err(err) => (Dictionary::default(), LoadStatus::Unreadable(err.to_string())),
        }
    }

    /// Parse a persisted dictionary, keeping every field that makes sense.
    pub fn from_json_str(source: &str) -> (Dictionary, LoadStatus) {
        match serde_json::from_str::<Value>(source) {
            Ok(value) if value.is_object() => Dictionary::from_value(&value),
            Ok(_) => (
                Dictionary::default(),
                LoadStatus::Unreadable("top-level value is not an object".to_string()),
            ),
            Err(err) => (Dictionary::default(), LoadStatus::Unreadable(err.to_string())),
        }
    }

    fn from_value(value: &Value) -> (Dictionary, LoadStatus) {
        let mut bad = Vec::new();

        let categories: Vec<Category> = field(value, "categories", &mut bad).unwrap_or_default();

        let mut lexemes: BTreeMap<Category, Bucket> = BTreeMap::new();
        match value.get("lexemes").and_then(Value::as_object) {
            Some(buckets) => {
                for (label, bucket) in buckets {
                    match serde_json::from_value::<Bucket>(bucket.clone()) {
                        Ok(bucket) => {
                            lexemes.insert(Category::new(label.as_str()), bucket);
                        }
                        Err(_) => bad.push(format!("lexemes.{}", label)),
                    }
                }
            }
            None => bad.push("lexemes".to_string()),
        }

        let dictionary = Dictionary {
            table: MembershipTable::from_parts(categories, lexemes),
            documents_processed: field(value, "documents_processed", &mut bad).unwrap_or(0),
            predefined_seed_used: field(value, "predefined_seed_used", &mut bad).unwrap_or(false),
            normalization: field(value, "normalization", &mut bad).unwrap_or_default(),
        };

        let status = if bad.is_empty() {
            LoadStatus::Loaded
        } else {
            LoadStatus::Partial { fields: bad }
        };
        (dictionary, status)
    }

    /// Write the full state to `path`, replacing any previous content.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| PersistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("dictionary saved to {}", path.display());
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        let categories = self.table.categories();
        let snapshot = Snapshot {
            categories,
            lexemes: categories
                .iter()
                .filter_map(|category| self.table.bucket(category).map(|b| (category, b)))
                .collect(),
            documents_processed: self.documents_processed,
            predefined_seed_used: self.predefined_seed_used,
            normalization: self.normalization,
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Insert the predefined vocabulary, at most once per dictionary life.
    ///
    /// Skipped when the seed was used before and documents have been
    /// processed since. Seed lexemes go through the dictionary's
    /// normalization and never rebind a lexeme that is already known.
    pub fn seed(&mut self) -> SeedOutcome {
        if self.predefined_seed_used && self.documents_processed > 0 {
            return SeedOutcome::Skipped;
        }

        let mut added = 0;
        for (label, lexemes) in SEED_VOCABULARY {
            let category = Category::new(*label);
            self.table.ensure_category(&category);
            for raw in lexemes.iter() {
                let lexeme = self.normalization.apply(raw);
                if self.table.lookup(&lexeme).is_none() {
                    self.table.register(&category, &lexeme, None);
                    added += 1;
                }
            }
        }
        self.predefined_seed_used = true;
        SeedOutcome::Seeded { added }
    }

    pub fn documents_processed(&self) -> u32 {
        self.documents_processed
    }

    pub fn predefined_seed_used(&self) -> bool {
        self.predefined_seed_used
    }

    /// Id of the document the next pass will ingest
    pub fn next_document(&self) -> DocumentId {
        DocumentId::new(self.documents_processed + 1)
    }

    /// Advance the counter past `document`. Never moves it backwards.
    pub fn mark_processed(&mut self, document: DocumentId) {
        self.documents_processed = self.documents_processed.max(document.number());
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Settle the normalization policy against the configured one.
    ///
    /// A dictionary that holds no knowledge yet takes `configured`; otherwise
    /// its persisted policy is kept so lexemes stay comparable across
    /// documents. Returns the policy in effect.
    pub fn adopt_normalization(&mut self, configured: Normalization) -> Normalization {
        if self.table.is_empty() && self.documents_processed == 0 {
            self.normalization = configured;
        } else if self.normalization != configured {
            log::warn!(
                "dictionary was built with {:?} normalization, ignoring configured {:?}",
                self.normalization,
                configured
            );
        }
        self.normalization
    }

    pub fn table(&self) -> &MembershipTable {
        &self.table
    }

    /// Positions of `lexeme` under `category`, oldest first
    pub fn positions(&self, category: &Category, lexeme: &str) -> Option<&[String]> {
        self.table.positions(category, lexeme)
    }
}

fn field<T: serde::de::DeserializeOwned>(
    value: &Value,
    name: &str,
    bad: &mut Vec<String>,
) -> Option<T> {
    let parsed = value
        .get(name)
        .and_then(|v| serde_json::from_value(v.clone()).ok());
    if parsed.is_none() {
        bad.push(name.to_string());
    }
    parsed
}

impl Lexicon for Dictionary {
    fn categories(&self) -> &[Category] {
        self.table.categories()
    }

    fn lookup(&self, lexeme: &str) -> Option<&Category> {
        self.table.lookup(lexeme)
    }

    fn ensure_category(&mut self, category: &Category) -> bool {
        self.table.ensure_category(category)
    }

    fn register(&mut self, category: &Category, lexeme: &str, position: Option<&str>) -> Category {
        self.table.register(category, lexeme, position)
    }

    fn lexemes(&self, category: &Category) -> Vec<&str> {
        self.table.lexemes(category)
    }

    fn lexeme_count(&self, category: &Category) -> usize {
        self.table.lexeme_count(category)
    }
}
