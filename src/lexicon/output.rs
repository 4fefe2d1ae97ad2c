//! Output artifacts for the downstream parser
//!
//! Two renderings of the same pass:
//!
//! - [`OutputFormat::Lines`]: `TXT<n>-<pos>: <CATEGORY>`, one line per
//!   occurrence in document order (`output<n>.txt`)
//! - [`OutputFormat::Json`]: the dictionary restricted to the current
//!   document, category -> lexeme -> positions (`output<n>.json`). Every
//!   category is listed; lexemes that did not occur are left out.

use super::category::Category;
use super::classifier::{ClassifiedPass, DocumentId, Occurrence};
use super::error::PersistError;
use super::table::{Lexicon, MembershipTable};
use lexitok_config::OutputFormatConfig;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Lines,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Lines => "txt",
        }
    }

    pub fn file_name(self, document: DocumentId) -> String {
        format!("output{}.{}", document.number(), self.extension())
    }
}

impl From<OutputFormatConfig> for OutputFormat {
    fn from(format: OutputFormatConfig) -> Self {
        match format {
            OutputFormatConfig::Json => OutputFormat::Json,
            OutputFormatConfig::Lines => OutputFormat::Lines,
        }
    }
}

pub type DocumentView = BTreeMap<Category, BTreeMap<String, Vec<String>>>;

/// Positions of `document` only, for every category of `table`
pub fn document_view(table: &MembershipTable, document: DocumentId) -> DocumentView {
    table
        .categories()
        .iter()
        .map(|category| {
            let lexemes = table
                .bucket(category)
                .into_iter()
                .flatten()
                .filter_map(|(lexeme, positions)| {
                    let own: Vec<String> = positions
                        .iter()
                        .filter(|key| document.owns(key))
                        .cloned()
                        .collect();
                    (!own.is_empty()).then(|| (lexeme.clone(), own))
                })
                .collect();
            (category.clone(), lexemes)
        })
        .collect()
}

pub fn render_lines(occurrences: &[Occurrence]) -> String {
    occurrences
        .iter()
        .map(|occurrence| format!("{}\n", occurrence))
        .collect()
}

pub fn render_json(table: &MembershipTable, document: DocumentId) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(&document_view(table, document))?)
}

pub fn render(
    format: OutputFormat,
    table: &MembershipTable,
    pass: &ClassifiedPass,
) -> Result<String, PersistError> {
    match format {
        OutputFormat::Json => render_json(table, pass.document),
        OutputFormat::Lines => Ok(render_lines(&pass.occurrences)),
    }
}

/// Write the artifact for `pass` into `directory`, returning its path.
pub fn write(
    directory: &Path,
    format: OutputFormat,
    table: &MembershipTable,
    pass: &ClassifiedPass,
) -> Result<PathBuf, PersistError> {
    let path = directory.join(format.file_name(pass.document));
    let contents = render(format, table, pass)?;
    fs::write(&path, contents).map_err(|source| PersistError::Io {
        path: path.clone(),
        source,
    })?;
    log::info!("output written to {}", path.display());
    Ok(path)
}
