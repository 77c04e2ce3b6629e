//! Parsing of dataset description lines into variable names and descriptions

use crate::errors::{StatsError, StatsResult};

/// Length of the bullet prefix (`"- "`) that precedes every attribute line
const PREFIX_LEN: usize = 2;

/// Name and description of one variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableMetadata {
    pub name: String,
    pub desc: String,
}

/// Parse a description line of the form `"- NAME  free-text description"`.
///
/// Surrounding whitespace is trimmed, the two-character prefix is dropped, the
/// first whitespace-separated token becomes the name and the remaining tokens,
/// joined by single spaces, become the description.
///
/// # Errors
/// * `MalformedMetadata` if the line is shorter than the prefix or has no
///   token after it
pub fn parse_metadata_line(line: &str) -> StatsResult<VariableMetadata> {
    let trimmed = line.trim();
    let rest = trimmed
        .char_indices()
        .nth(PREFIX_LEN)
        .map(|(offset, _)| &trimmed[offset..])
        .ok_or_else(|| StatsError::MalformedMetadata(line.to_string()))?;

    let mut tokens = rest.split_whitespace();
    let name = tokens
        .next()
        .ok_or_else(|| StatsError::MalformedMetadata(line.to_string()))?;
    let desc = tokens.collect::<Vec<_>>().join(" ");

    Ok(VariableMetadata {
        name: name.to_string(),
        desc,
    })
}
