//! metex - Methods-section extractor for JATS article XML

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use metex::{Outcome, TextReport, extract_methods, parse_file};

#[derive(Parser)]
#[command(name = "metex")]
#[command(version, about = "Extract the methods section from JATS article XML", long_about = None)]
#[command(after_help = "EXIT CODES:
    0    Methods text extracted
    1    Unreadable or malformed XML
    2    No methods section found
    3    Methods are online-only (every candidate is a stub)
    4    Methods are in a supplementary file

EXAMPLES:
    metex article.xml                   Print methods text to stdout
    metex article.xml -o methods.txt    Write methods text to a file
    metex article.xml --check           Also verify the text is clean")]
struct Cli {
    /// Input JATS XML file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output text file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Run cleanliness checks on the extracted text (JSON report on stderr)
    #[arg(long)]
    check: bool,

    /// Suppress status messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let doc = match parse_file(&cli.input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match extract_methods(&doc) {
        Outcome::Methods(text) => emit(&cli, &text),
        Outcome::NotFound => {
            eprintln!("No methods section found in the XML file.");
            ExitCode::from(2)
        }
        Outcome::OnlineOnly => {
            eprintln!("Methods are only available online (not extracted).");
            ExitCode::from(3)
        }
        Outcome::Supplementary { message, .. } => {
            eprintln!("{message}");
            ExitCode::from(4)
        }
    }
}

fn emit(cli: &Cli, text: &str) -> ExitCode {
    if let Some(ref path) = cli.output {
        if let Err(e) = std::fs::write(path, text) {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
        if !cli.quiet {
            eprintln!("Methods section extracted to: {}", path.display());
        }
    } else {
        println!("{text}");
    }

    if cli.check {
        let report = TextReport::analyze(text);
        match serde_json::to_string_pretty(&report) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => eprintln!("error: {e}"),
        }
        if !report.is_clean() {
            for issue in report.issues() {
                eprintln!("issue: {issue}");
            }
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
