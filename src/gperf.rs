//! Upstream dictionary-file reader: the `gperf`-flavored input format the
//! original tool accepts, preamble and all.
//!
//! A complete file looks like:
//!
//! ```text
//! %{
//! // anything here, and anything before the first %% line, is ignored
//! %}
//! %%
//! google.com, 1
//! example.com, 2
//! %%
//! // trailing material is ignored too
//! ```
//!
//! Only the lines strictly between the first and second `%%` markers matter;
//! each must be `<name>, <digit>` with exactly one space after the comma and
//! a single decimal digit 0-7 as the last character.

use crate::Error;

/// Parses a gperf-format dictionary file into the `<name><digit>` strings
/// [`crate::graph::build`] expects. With `reverse` set, each name is
/// reversed character-by-character before the digit is reattached, so a
/// downstream matcher can walk the string right-to-left (the upstream tool's
/// `--reverse` mode, for suffix dictionaries like public-suffix lists).
pub fn parse(input: &str, reverse: bool) -> Result<Vec<String>, Error> {
    let mut lines = input.lines();
    lines
        .by_ref()
        .position(|line| line.trim() == "%%")
        .ok_or_else(|| Error::InputMalformed("missing opening %% marker".into()))?;

    let mut words = Vec::new();
    for line in lines.by_ref() {
        if line.trim() == "%%" {
            log::debug!("gperf: parsed {} words", words.len());
            return Ok(words);
        }
        words.push(parse_body_line(line.trim(), reverse)?);
    }
    Err(Error::InputMalformed("missing closing %% marker".into()))
}

fn parse_body_line(line: &str, reverse: bool) -> Result<String, Error> {
    let (name, digit) = line
        .rsplit_once(", ")
        .ok_or_else(|| Error::InputMalformed(format!("line {line:?} is missing a ', <digit>' suffix")))?;
    if digit.len() != 1 {
        return Err(Error::InputMalformed(format!(
            "line {line:?} must end in exactly one digit"
        )));
    }
    let digit_byte = digit.as_bytes()[0];
    if !digit_byte.is_ascii_digit() || digit_byte - b'0' > 7 {
        return Err(Error::InputMalformed(format!(
            "digit {digit:?} in {line:?} is outside 0-7"
        )));
    }
    if name.is_empty() {
        return Err(Error::InputMalformed(format!("line {line:?} has an empty name")));
    }
    let name: String = if reverse { name.chars().rev().collect() } else { name.to_string() };
    Ok(format!("{name}{digit}"))
}
