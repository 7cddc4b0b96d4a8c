//! DOCX rendering of scenario records.
//!
//! The document consists of a bold title, a one-line summary, and a table
//! with the columns `#`, `Tags`, `Scenario`, and `Steps`. Steps share a single
//! cell and are separated by line breaks.

use std::io::Cursor;

use docx_rs::{BreakType, Docx, Paragraph, Run, Table, TableCell, TableRow};

use crate::error::RenderError;
use crate::title::DocumentTitle;
use featuredoc_extract::ScenarioRecord;

/// MIME type of the rendered document.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const COLUMN_HEADINGS: [&str; 4] = ["#", "Tags", "Scenario", "Steps"];

/// Column widths in twentieths of a point.
const COLUMN_WIDTHS: [usize; 4] = [600, 2200, 2800, 4400];

/// Title size in half-points.
const TITLE_SIZE: usize = 32;

/// Render scenario records as a DOCX document.
///
/// Rows are numbered from 1 in the order the records are supplied.
///
/// # Examples
/// ```
/// use featuredoc_render::{DocumentTitle, ScenarioRecord, render};
///
/// let records = vec![ScenarioRecord::new("@smoke", "Login", vec!["Given a user".into()])];
/// let bytes = render(&records, &DocumentTitle::new("login")).unwrap();
/// assert!(bytes.starts_with(b"PK"));
/// ```
///
/// # Errors
/// Returns [`RenderError::NoScenarios`] when `records` is empty and
/// [`RenderError::Package`] when the document cannot be packaged.
pub fn render(records: &[ScenarioRecord], title: &DocumentTitle) -> Result<Vec<u8>, RenderError> {
    if records.is_empty() {
        return Err(RenderError::NoScenarios);
    }

    let rows = std::iter::once(heading_row())
        .chain(
            records
                .iter()
                .zip(1_usize..)
                .map(|(record, number)| record_row(number, record)),
        )
        .collect();
    let table = Table::new(rows).set_grid(COLUMN_WIDTHS.to_vec());

    let document = Docx::new()
        .add_paragraph(title_paragraph(title))
        .add_paragraph(summary_paragraph(records.len()))
        .add_table(table);

    let mut buffer = Cursor::new(Vec::new());
    document
        .build()
        .pack(&mut buffer)
        .map_err(|err| RenderError::Package(err.to_string()))?;
    Ok(buffer.into_inner())
}

fn title_paragraph(title: &DocumentTitle) -> Paragraph {
    Paragraph::new().add_run(
        Run::new()
            .add_text(xml_text(title.as_str()))
            .bold()
            .size(TITLE_SIZE),
    )
}

fn summary_paragraph(count: usize) -> Paragraph {
    let noun = if count == 1 { "scenario" } else { "scenarios" };
    Paragraph::new().add_run(Run::new().add_text(format!("{count} {noun}")))
}

fn heading_row() -> TableRow {
    TableRow::new(
        COLUMN_HEADINGS
            .iter()
            .map(|heading| cell(Run::new().add_text(*heading).bold()))
            .collect(),
    )
}

fn record_row(number: usize, record: &ScenarioRecord) -> TableRow {
    TableRow::new(vec![
        cell(Run::new().add_text(number.to_string())),
        cell(Run::new().add_text(xml_text(record.tags()))),
        cell(Run::new().add_text(xml_text(record.name()))),
        cell(steps_run(record.steps())),
    ])
}

fn steps_run(steps: &[String]) -> Run {
    let mut run = Run::new();
    for (index, step) in steps.iter().enumerate() {
        if index > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(xml_text(step));
    }
    run
}

/// Drop characters XML 1.0 cannot represent, such as most C0 controls.
fn xml_text(text: &str) -> String {
    text.chars().filter(|&c| is_xml_char(c)).collect()
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{fffd}' | '\u{10000}'..)
}

fn cell(run: Run) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(run))
}
