//! Helpers for rendering command output.

use std::io::Write;

use camino::Utf8Path;
use eyre::{Context, Result};
use featuredoc_extract::ScenarioRecord;

/// Write each record as a numbered heading followed by its indented steps.
pub(crate) fn write_records(writer: &mut dyn Write, records: &[ScenarioRecord]) -> Result<()> {
    for (record, number) in records.iter().zip(1_usize..) {
        write_record(writer, number, record)?;
    }
    Ok(())
}

fn write_record(writer: &mut dyn Write, number: usize, record: &ScenarioRecord) -> Result<()> {
    let heading = if record.tags().is_empty() {
        format!("{number}. {}", record.name())
    } else {
        format!("{number}. {} [{}]", record.name(), record.tags())
    };
    writeln!(writer, "{heading}")
        .wrap_err_with(|| format!("failed to write scenario {}", record.name()))?;
    for step in record.steps() {
        writeln!(writer, "   {step}")
            .wrap_err_with(|| format!("failed to write a step of {}", record.name()))?;
    }
    Ok(())
}

pub(crate) fn write_summary(writer: &mut dyn Write, count: usize, output: &Utf8Path) -> Result<()> {
    let noun = if count == 1 { "scenario" } else { "scenarios" };
    writeln!(writer, "wrote {count} {noun} to {output}").wrap_err("failed to write summary")
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn written(f: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).expect("write to buffer");
        String::from_utf8(buffer).expect("utf8 output")
    }

    #[test]
    fn records_are_numbered_with_indented_steps() {
        let records = vec![
            ScenarioRecord::new("@smoke @ui", "Login", vec!["Given a user".into(), "Then ok".into()]),
            ScenarioRecord::new("", "Logout", vec!["When they leave".into()]),
        ];
        let output = written(|w| write_records(w, &records));
        assert_eq!(
            output,
            "1. Login [@smoke @ui]\n   Given a user\n   Then ok\n2. Logout\n   When they leave\n"
        );
    }

    #[rstest]
    #[case(1, "wrote 1 scenario to out.docx\n")]
    #[case(3, "wrote 3 scenarios to out.docx\n")]
    fn summary_pluralises(#[case] count: usize, #[case] expected: &str) {
        let output = written(|w| write_summary(w, count, Utf8Path::new("out.docx")));
        assert_eq!(output, expected);
    }
}
