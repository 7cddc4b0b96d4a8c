//! Classification of individual feature-file lines.

/// Header prefixes, compared ASCII case-insensitively.
const SCENARIO_PREFIXES: [&str; 2] = ["scenario:", "scenario outline:"];

/// The role a single line plays during extraction.
///
/// Every variant carries text that has already been trimmed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// Blank lines and `#` comments.
    Ignored,
    /// A tag line such as `@smoke @regression`.
    Tags(&'a str),
    /// A `Scenario:` or `Scenario Outline:` header, carrying the scenario name.
    Header(&'a str),
    /// Anything else.
    Text(&'a str),
}

impl<'a> LineKind<'a> {
    pub(crate) fn classify(line: &'a str) -> Self {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            return Self::Ignored;
        }
        if stripped.starts_with('@') {
            return Self::Tags(stripped);
        }
        if is_scenario_header(stripped) {
            return Self::Header(header_name(stripped));
        }
        Self::Text(stripped)
    }
}

fn is_scenario_header(stripped: &str) -> bool {
    SCENARIO_PREFIXES.iter().any(|prefix| {
        stripped
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

fn header_name(stripped: &str) -> &str {
    stripped
        .split_once(':')
        .map_or("", |(_, rest)| rest.trim())
}
