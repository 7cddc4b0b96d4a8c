//! Offline converter from feature files to DOCX scenario tables.

mod cli;
mod output;

fn main() -> eyre::Result<()> {
    cli::run()
}
