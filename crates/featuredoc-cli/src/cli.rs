//! Command dispatch for the `featuredoc` entrypoint.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result, bail};
use featuredoc_extract::{ScenarioExtractor, ScenarioRecord};
use featuredoc_render::{DocumentTitle, json, render};

use crate::output::{write_records, write_summary};

const BOM: char = '\u{feff}';

/// Convert Gherkin feature files into scenario tables.
#[derive(Parser)]
#[command(author, version, about)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Supported commands.
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Write the scenarios of a feature file to a DOCX document.
    Convert(ConvertArgs),
    /// Print the scenarios of a feature file.
    List(ListArgs),
}

#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Feature file to read.
    pub file: Utf8PathBuf,
    /// Destination of the document. Defaults to `<stem>.docx`.
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,
    /// Document title. Defaults to the feature file's stem.
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Args)]
pub(crate) struct ListArgs {
    /// Feature file to read.
    pub file: Utf8PathBuf,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,
}

pub(crate) fn run() -> Result<()> {
    match Cli::parse().command {
        Commands::Convert(args) => handle_convert(&args),
        Commands::List(args) => handle_list(&args),
    }
}

fn handle_convert(args: &ConvertArgs) -> Result<()> {
    let records = read_records(&args.file)?;
    let title = args.title.as_ref().map_or_else(
        || DocumentTitle::from_filename(args.file.as_str()),
        DocumentTitle::new,
    );
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.file));

    let bytes = render(&records, &title)
        .wrap_err_with(|| format!("failed to render {}", args.file))?;
    fs::write(&output, bytes).wrap_err_with(|| format!("failed to write {output}"))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_summary(&mut handle, records.len(), &output)
}

fn handle_list(args: &ListArgs) -> Result<()> {
    let records = read_records(&args.file)?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if args.json {
        let title = DocumentTitle::from_filename(args.file.as_str());
        json::write(&mut handle, &title, &records).wrap_err("failed to write JSON")?;
        writeln!(handle).wrap_err("failed to terminate JSON output")?;
        return Ok(());
    }
    write_records(&mut handle, &records)
}

/// `<stem>.docx` in the working directory, whatever title is chosen.
fn default_output(input: &Utf8Path) -> Utf8PathBuf {
    Utf8PathBuf::from(DocumentTitle::from_filename(input.as_str()).docx_filename())
}

/// Stream a feature file through the extractor one line at a time.
fn read_records(path: &Utf8Path) -> Result<Vec<ScenarioRecord>> {
    let file = File::open(path).wrap_err_with(|| format!("failed to open {path}"))?;
    let records = extract_from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("failed to read {path}"))?;
    if records.is_empty() {
        bail!("No scenarios found in the feature file");
    }
    Ok(records)
}

fn extract_from_reader(reader: impl BufRead) -> io::Result<Vec<ScenarioRecord>> {
    let mut extractor = ScenarioExtractor::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if index == 0 {
            extractor.push_line(line.strip_prefix(BOM).unwrap_or(&line));
        } else {
            extractor.push_line(&line);
        }
    }
    Ok(extractor.finish())
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_output_follows_the_input_stem() {
        assert_eq!(default_output(Utf8Path::new("specs/login.feature")), "login.docx");
        assert_eq!(default_output(Utf8Path::new("release.v2.feature")), "release.v2.docx");
    }

    #[test]
    fn reader_extraction_strips_leading_bom() {
        let input = "\u{feff}@smoke\nScenario: Login\n  Given a user\n";
        let records = extract_from_reader(input.as_bytes()).expect("in-memory read");
        let [record] = records.as_slice() else {
            panic!("expected one record, got {records:?}");
        };
        assert_eq!(record.tags(), "@smoke");
        assert_eq!(record.name(), "Login");
    }

    #[test]
    fn reader_extraction_reports_invalid_utf8() {
        let input: &[u8] = b"Scenario: A\n  \xff\n";
        let error = extract_from_reader(input).expect_err("invalid UTF-8 fails");
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn convert_accepts_output_and_title_flags() {
        let cli = Cli::try_parse_from([
            "featuredoc",
            "convert",
            "login.feature",
            "-o",
            "out/report.docx",
            "--title",
            "Login flows",
        ])
        .expect("arguments parse");
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert command");
        };
        assert_eq!(args.file, "login.feature");
        assert_eq!(args.output.as_deref(), Some(Utf8Path::new("out/report.docx")));
        assert_eq!(args.title.as_deref(), Some("Login flows"));
    }
}
