//! Consumer side of the protocol: find the framed payload in noisy output and read it back.

use crate::srp_emit::{BEGIN_MARKER, END_MARKER};
use crate::srp_report::Report;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

static FRAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?s){}\s*(?P<payload>.*?)\s*{}",
        regex::escape(BEGIN_MARKER),
        regex::escape(END_MARKER)
    ))
    .expect("sentinel pattern is valid")
});

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no __SRP_BEGIN__ marker in output")]
    MissingBegin,
    #[error("no __SRP_END__ marker after __SRP_BEGIN__")]
    MissingEnd,
    #[error("SRP payload does not contain a JSON object")]
    NoObject,
    #[error("SRP payload is not a valid report: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Returns the trimmed text between the first begin marker and the end marker following it.
///
/// ```
/// use srp_runner::srp_extract::extract_payload;
///
/// let out = "noise\n__SRP_BEGIN__\n{\"a\": 1}\n__SRP_END__\nmore noise\n";
/// assert_eq!(extract_payload(out), Some("{\"a\": 1}"));
/// assert_eq!(extract_payload("no frame here"), None);
/// ```
pub fn extract_payload(output: &str) -> Option<&str> {
    FRAME
        .captures(output)
        .and_then(|caps| caps.name("payload"))
        .map(|m| m.as_str())
}

/// Extracts and deserializes the report framed in `output`.
///
/// Output with no begin marker at all is read as a bare report: the span from its first `{`
/// to its last `}`. `MissingBegin` means there was no such span either.
pub fn parse_report(output: &str) -> Result<Report, ExtractError> {
    let object = match extract_payload(output) {
        Some(payload) => json_object(payload).ok_or(ExtractError::NoObject)?,
        None if output.contains(BEGIN_MARKER) => return Err(ExtractError::MissingEnd),
        None => {
            debug!("no SRP frame in output; looking for a bare JSON object");
            json_object(output).ok_or(ExtractError::MissingBegin)?
        }
    };
    Ok(serde_json::from_str(object)?)
}

/// Narrows `text` to the span from its first `{` to its last `}`.
fn json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
