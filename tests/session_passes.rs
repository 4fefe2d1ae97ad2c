//! Multi-document behaviour of the session orchestrator
//!
//! Every test runs real passes against a dictionary file in a temporary
//! directory, resolving unknown lexemes with a scripted resolver.

use lexitok::lexicon::classifier::DocumentId;
use lexitok::lexicon::dictionary::{Dictionary, LoadStatus, SeedOutcome};
use lexitok::lexicon::output::OutputFormat;
use lexitok::lexicon::{Category, Lexicon, Normalization, ScriptedResolver, Session, SessionSettings};
use rstest::rstest;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
    session: Session,
}

impl Workspace {
    fn new(format: OutputFormat) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(SessionSettings {
            dictionary_path: dir.path().join("data_dict.json"),
            seed: true,
            normalization: Normalization::Lowercase,
            output_directory: dir.path().to_path_buf(),
            output_format: format,
        });
        Workspace { dir, session }
    }

    fn document(&self, name: &str, text: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn dictionary(&self) -> Dictionary {
        let (dictionary, status) = Dictionary::load(self.dir.path().join("data_dict.json"));
        assert_eq!(status, LoadStatus::Loaded);
        dictionary
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }
}

#[test]
fn document_ids_continue_across_runs() {
    let ws = Workspace::new(OutputFormat::Lines);
    let texts = ["el libro", "la persona", "un mundo"];

    let ids: Vec<DocumentId> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let input = ws.document(&format!("doc{}.txt", i), text);
            ws.session
                .run(&input, ScriptedResolver::default())
                .unwrap()
                .document
        })
        .collect();

    assert_eq!(
        ids,
        vec![DocumentId::new(1), DocumentId::new(2), DocumentId::new(3)]
    );
    assert_eq!(ws.dictionary().documents_processed(), 3);
    for n in 1..=3 {
        assert!(ws.path().join(format!("output{}.txt", n)).exists());
    }
    assert_eq!(
        fs::read_to_string(ws.path().join("output3.txt")).unwrap(),
        "TXT3-1: ARTICLE\nTXT3-2: NOUN\n"
    );
}

#[test]
fn first_binding_survives_later_documents() {
    let ws = Workspace::new(OutputFormat::Lines);

    let first = ws.document("a.txt", "Ella escribe.");
    let mut resolver = ScriptedResolver::new(["NOUN", "VERB"]);
    ws.session.run(&first, &mut resolver).unwrap();
    assert_eq!(resolver.asked(), &["ella", "escribe"]);

    // A human would now call "ella" a pronoun; the dictionary does not ask.
    let second = ws.document("b.txt", "ELLA escribe");
    let mut resolver = ScriptedResolver::new(["PRONOUN"]);
    let report = ws.session.run(&second, &mut resolver).unwrap();

    assert!(resolver.asked().is_empty());
    assert_eq!(resolver.remaining(), 1);
    assert_eq!(report.occurrences[0].category, Category::new("NOUN"));
    assert_eq!(report.statistics.learned, 0);
}

#[test]
fn positions_accumulate_per_document() {
    let ws = Workspace::new(OutputFormat::Json);
    let noun = Category::new("NOUN");

    let one = ws.document("1.txt", "libro, libro y libro");
    ws.session.run(&one, ScriptedResolver::default()).unwrap();
    let after_one = ws.dictionary().positions(&noun, "libro").unwrap().to_vec();
    assert_eq!(after_one, vec!["TXT1-1", "TXT1-2", "TXT1-4"]);

    let two = ws.document("2.txt", "el libro");
    ws.session.run(&two, ScriptedResolver::default()).unwrap();
    let after_two = ws.dictionary().positions(&noun, "libro").unwrap().to_vec();

    assert_eq!(after_two.len(), after_one.len() + 1);
    assert_eq!(&after_two[..3], after_one.as_slice());
    assert_eq!(after_two[3], "TXT2-2");
}

#[test]
fn json_output_is_restricted_to_the_current_document() {
    let ws = Workspace::new(OutputFormat::Json);
    let one = ws.document("1.txt", "el libro");
    ws.session.run(&one, ScriptedResolver::default()).unwrap();
    let two = ws.document("2.txt", "el mundo");
    let report = ws.session.run(&two, ScriptedResolver::default()).unwrap();

    assert_eq!(report.output_path, ws.path().join("output2.json"));
    let json = fs::read_to_string(&report.output_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["ARTICLE"]["el"], serde_json::json!(["TXT2-1"]));
    assert_eq!(value["NOUN"]["mundo"], serde_json::json!(["TXT2-2"]));
    assert!(value["NOUN"].get("libro").is_none());
    assert!(value["LEXICAL_ERROR"].as_object().unwrap().is_empty());
}

#[test]
fn empty_document_yields_zero_statistics() {
    let ws = Workspace::new(OutputFormat::Lines);
    let input = ws.document("empty.txt", " ,.;  \n ");
    let report = ws.session.run(&input, ScriptedResolver::default()).unwrap();

    assert!(report.occurrences.is_empty());
    assert_eq!(report.statistics.total, 0);
    let printed = report.statistics.to_string();
    assert!(printed.contains("Processed lexemes: 0 (0.00%)"));
    assert!(printed.contains("Unprocessed lexemes: 0 (0.00%)"));
    assert_eq!(fs::read_to_string(&report.output_path).unwrap(), "");
}

#[test]
fn seed_is_used_only_once() {
    let ws = Workspace::new(OutputFormat::Lines);
    let input = ws.document("1.txt", "el libro");
    let first = ws.session.run(&input, ScriptedResolver::default()).unwrap();
    assert!(matches!(first.seed, Some(SeedOutcome::Seeded { .. })));

    let before = ws.dictionary();
    let second = ws.session.run(&input, ScriptedResolver::default()).unwrap();
    assert_eq!(second.seed, Some(SeedOutcome::Skipped));

    let after = ws.dictionary();
    for category in before.categories() {
        assert_eq!(before.lexemes(category), after.lexemes(category));
    }
}

#[rstest]
#[case("{ broken json")]
#[case(r#"{ "categories": ["NOUN"] }"#)]
fn damaged_dictionary_does_not_abort_the_pass(#[case] contents: &str) {
    let ws = Workspace::new(OutputFormat::Lines);
    fs::write(ws.path().join("data_dict.json"), contents).unwrap();
    let input = ws.document("1.txt", "el libro");

    let report = ws.session.run(&input, ScriptedResolver::default()).unwrap();
    assert_ne!(report.load_status, LoadStatus::Loaded);
    assert_eq!(report.occurrences.len(), 2);
    assert_eq!(ws.dictionary().documents_processed(), 1);
}

#[test]
fn unseeded_dictionary_learns_everything() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::new(SessionSettings {
        dictionary_path: dir.path().join("dict.json"),
        seed: false,
        normalization: Normalization::Preserve,
        output_directory: dir.path().to_path_buf(),
        output_format: OutputFormat::Lines,
    });
    let input = dir.path().join("in.txt");
    fs::write(&input, "Roma es Roma").unwrap();

    let mut resolver = ScriptedResolver::new(["NOUN", "VERB"]);
    let report = session.run(&input, &mut resolver).unwrap();

    assert_eq!(report.seed, None);
    assert_eq!(resolver.asked(), &["Roma", "es"]);
    assert_eq!(report.statistics.total, 2);
    assert_eq!(report.statistics.learned, 2);
    assert_eq!(report.normalization, Normalization::Preserve);
}
