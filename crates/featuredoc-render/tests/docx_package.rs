//! Behavioural tests inspecting the generated DOCX package.

#![expect(clippy::expect_used, reason = "tests fail loudly on setup errors")]

use std::io::{Cursor, Read};

use featuredoc_extract::extract;
use featuredoc_render::{DocumentTitle, RenderError, ScenarioRecord, render};
use rstest::{fixture, rstest};

#[fixture]
fn records() -> Vec<ScenarioRecord> {
    extract(concat!(
        "Feature: Search\n",
        "  @smoke\n",
        "  Scenario: Search by keyword\n",
        "    Given the catalogue is loaded\n",
        "    When I search for \"boots & socks\"\n",
        "    Then I see <3> results\n",
        "  Scenario: Empty search\n",
        "    When I search for nothing\n",
    ))
}

fn document_xml(bytes: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip package");
    let mut entry = archive
        .by_name("word/document.xml")
        .expect("document part present");
    let mut xml = String::new();
    entry.read_to_string(&mut xml).expect("utf-8 document part");
    xml
}

#[rstest]
fn renders_one_row_per_record_plus_heading(records: Vec<ScenarioRecord>) {
    assert_eq!(records.len(), 2);
    let bytes = render(&records, &DocumentTitle::from_filename("search.feature"))
        .expect("document renders");
    let xml = document_xml(&bytes);

    assert_eq!(xml.matches("</w:tr>").count(), 3);
    assert!(xml.contains(">search<"));
    assert!(xml.contains("Search by keyword"));
    assert!(xml.contains("Empty search"));
    assert!(xml.contains("@smoke"));
    assert!(xml.contains("Given the catalogue is loaded"));
}

#[rstest]
fn escapes_markup_in_step_text(records: Vec<ScenarioRecord>) {
    let bytes = render(&records, &DocumentTitle::new("search")).expect("document renders");
    let xml = document_xml(&bytes);
    assert!(xml.contains("boots &amp; socks"));
    assert!(xml.contains("&lt;3"));
}

#[rstest]
fn keeps_steps_in_order_within_one_cell(records: Vec<ScenarioRecord>) {
    let bytes = render(&records, &DocumentTitle::new("search")).expect("document renders");
    let xml = document_xml(&bytes);

    let given = xml.find("Given the catalogue").expect("first step");
    let when = xml.find("When I search for").expect("second step");
    let then = xml.find("Then I see").expect("third step");
    assert!(given < when && when < then);
    // Two breaks between three steps; the single-step scenario adds none.
    assert_eq!(xml.matches("<w:br").count(), 2);
}

#[test]
fn empty_input_is_rejected() {
    let result = render(&extract("Feature: nothing"), &DocumentTitle::new("nothing"));
    let Err(err) = result else {
        panic!("expected rendering to fail without scenarios");
    };
    assert!(matches!(err, RenderError::NoScenarios));
    assert_eq!(err.to_string(), "No scenarios found in the feature file");
}

#[test]
fn control_characters_never_reach_the_package() {
    let records = extract("@ui\u{7}\nScenario: Form\u{c}feed\n  Given a\u{1}b\n  When tab\u{b}bed\n");
    let bytes = render(&records, &DocumentTitle::new("bell\u{7}")).expect("document renders");
    let xml = document_xml(&bytes);

    let illegal: Vec<char> = xml
        .chars()
        .filter(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
        .collect();
    assert!(illegal.is_empty(), "illegal XML characters: {illegal:?}");
    assert!(xml.contains("Formfeed"));
    assert!(xml.contains("Given ab"));
    assert!(xml.contains("When tabbed"));
}
