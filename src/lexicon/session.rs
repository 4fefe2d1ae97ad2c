//! Session orchestrator: one ingestion pass over one document
//!
//! ```text
//! LOAD_OR_INIT -> SEED (optional, once) -> SPLIT -> CLASSIFY
//!     -> PERSIST -> EMIT_OUTPUT -> REPORT_STATS -> PERSIST (counter)
//! ```
//!
//! The dictionary is saved right after classification and again once the
//! document counter has moved, so a crash between the two loses the counter
//! increment but none of the learned lexemes. A failing load starts fresh; a
//! missing input document aborts before anything is written.

use super::classifier::{Classifier, DocumentId, Occurrence};
use super::dictionary::{Dictionary, LoadStatus, SeedOutcome};
use super::error::SessionError;
use super::normalize::Normalization;
use super::output::{self, OutputFormat};
use super::resolver::Resolver;
use super::splitter::split;
use super::stats::Statistics;
use lexitok_config::LexitokConfig;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub dictionary_path: PathBuf,
    pub seed: bool,
    pub normalization: Normalization,
    pub output_directory: PathBuf,
    pub output_format: OutputFormat,
}

impl From<&LexitokConfig> for SessionSettings {
    fn from(config: &LexitokConfig) -> Self {
        SessionSettings {
            dictionary_path: config.dictionary.path.clone(),
            seed: config.dictionary.seed,
            normalization: config.dictionary.case.into(),
            output_directory: config.output.directory.clone(),
            output_format: config.output.format.into(),
        }
    }
}

/// Everything a finished pass reports back
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub document: DocumentId,
    pub load_status: LoadStatus,
    /// `None` when seeding was not requested
    pub seed: Option<SeedOutcome>,
    pub normalization: Normalization,
    pub occurrences: Vec<Occurrence>,
    pub statistics: Statistics,
    pub output_path: PathBuf,
}

pub struct Session {
    settings: SessionSettings,
}

impl Session {
    pub fn new(settings: SessionSettings) -> Self {
        Session { settings }
    }

    /// Ingest the document at `input`, resolving unknown lexemes with `resolver`.
    pub fn run<R: Resolver>(
        &self,
        input: impl AsRef<Path>,
        resolver: R,
    ) -> Result<SessionReport, SessionError> {
        let settings = &self.settings;

        let (mut dictionary, load_status) = Dictionary::load(&settings.dictionary_path);
        match &load_status {
            LoadStatus::Loaded => log::info!(
                "{} from {}",
                load_status,
                settings.dictionary_path.display()
            ),
            _ => log::warn!("{}", load_status),
        }
        let normalization = dictionary.adopt_normalization(settings.normalization);

        let seed = settings.seed.then(|| dictionary.seed());
        match seed {
            Some(SeedOutcome::Seeded { added }) => {
                log::info!("predefined vocabulary loaded ({} new lexemes)", added)
            }
            Some(SeedOutcome::Skipped) => {
                log::info!("predefined vocabulary already used, not reloading")
            }
            None => {}
        }

        let text = read_input(input.as_ref())?;
        let lexemes = split(&text);
        let document = dictionary.next_document();
        log::info!("{}: {} candidate lexemes", document, lexemes.len());

        let mut classifier = Classifier::new(resolver, normalization);
        let pass = classifier.classify(&mut dictionary, document, &lexemes)?;

        dictionary
            .save(&settings.dictionary_path)
            .map_err(SessionError::Dictionary)?;

        let output_path = output::write(
            &settings.output_directory,
            settings.output_format,
            dictionary.table(),
            &pass,
        )
        .map_err(SessionError::Output)?;

        let statistics = pass.statistics(&dictionary);

        dictionary.mark_processed(document);
        dictionary
            .save(&settings.dictionary_path)
            .map_err(SessionError::Dictionary)?;

        Ok(SessionReport {
            document,
            load_status,
            seed,
            normalization,
            occurrences: pass.occurrences,
            statistics,
            output_path,
        })
    }
}

fn read_input(path: &Path) -> Result<String, SessionError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            SessionError::InputNotFound(path.to_path_buf())
        } else {
            SessionError::InputUnreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
