//! Command-line interface for lexitok
//!
//! Classifies the lexemes of one text file against the persistent dictionary,
//! asking for every lexeme it does not know yet, then writes the output
//! artifact and prints the statistics of the pass.
//!
//! Usage:
//!   lexitok `<input>` [--config `<file>`] [--dictionary `<file>`] [--output-dir `<dir>`]
//!           [--format json|lines] [--seed | --no-seed] [--preserve-case] [--non-interactive]

use clap::{Arg, ArgAction, ArgMatches, Command};
use lexitok::lexicon::{Category, FallbackResolver, PromptResolver, Resolver, Session};
use lexitok::lexicon::{SessionReport, SessionSettings};
use lexitok_config::{LexitokConfig, Loader};

/// Picked up from the working directory when present
const LOCAL_CONFIG: &str = "lexitok.toml";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = Command::new("lexitok")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive lexical tokenizer that learns token categories across documents")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Path to the text file to classify")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("dictionary")
                .long("dictionary")
                .short('d')
                .help("Dictionary file (default: data_dict.json)"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .help("Directory for the output<N> artifact"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["json", "lines"]),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Load the predefined vocabulary (once per dictionary)")
                .action(ArgAction::SetTrue)
                .conflicts_with("no-seed"),
        )
        .arg(
            Arg::new("no-seed")
                .long("no-seed")
                .help("Do not load the predefined vocabulary")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("preserve-case")
                .long("preserve-case")
                .help("Keep lexeme case for new dictionaries instead of lowercasing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("non-interactive")
                .long("non-interactive")
                .help("Assign the fallback category to unknown lexemes instead of asking")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let input = matches
        .get_one::<String>("input")
        .expect("input is a required argument");

    let resolver: Box<dyn Resolver> = if config.prompt.interactive {
        Box::new(PromptResolver::stdio())
    } else {
        Box::new(FallbackResolver::new(Category::new(
            config.prompt.fallback.as_str(),
        )))
    };

    println!("**----------------------------------------------------**");
    println!("lexitok {}", env!("CARGO_PKG_VERSION"));
    println!("**----------------------------------------------------**");

    let session = Session::new(SessionSettings::from(&config));
    match session.run(input, resolver) {
        Ok(report) => print_report(&report),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_config(matches: &ArgMatches) -> Result<LexitokConfig, lexitok_config::Error> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(path) = matches.get_one::<String>("dictionary") {
        loader = loader.set_override("dictionary.path", path.as_str())?;
    }
    if let Some(dir) = matches.get_one::<String>("output-dir") {
        loader = loader.set_override("output.directory", dir.as_str())?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("seed") {
        loader = loader.set_override("dictionary.seed", true)?;
    }
    if matches.get_flag("no-seed") {
        loader = loader.set_override("dictionary.seed", false)?;
    }
    if matches.get_flag("preserve-case") {
        loader = loader.set_override("dictionary.case", "preserve")?;
    }
    if matches.get_flag("non-interactive") {
        loader = loader.set_override("prompt.interactive", false)?;
    }
    loader.build()
}

fn print_report(report: &SessionReport) {
    println!("{}", report.load_status);
    println!(
        "{} classified: {} lexemes, output written to {}",
        report.document,
        report.occurrences.len(),
        report.output_path.display()
    );
    print!("{}", report.statistics);
}
