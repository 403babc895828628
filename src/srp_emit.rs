use crate::srp_report::Report;
use anyhow::{Context, Result};
use std::io::Write;

pub const BEGIN_MARKER: &str = "__SRP_BEGIN__";
pub const END_MARKER: &str = "__SRP_END__";

/// Writes `report` as indented JSON between the sentinel lines.
pub fn write_framed<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    let json = report
        .to_pretty_json()
        .context("Failed to serialize SRP payload")?;
    writeln!(out, "{}", BEGIN_MARKER)?;
    writeln!(out, "{}", json)?;
    writeln!(out, "{}", END_MARKER)?;
    out.flush().context("Failed to flush SRP payload")?;
    Ok(())
}

/// The framed payload as a string.
pub fn frame(report: &Report) -> Result<String> {
    let mut buf = Vec::new();
    write_framed(&mut buf, report)?;
    Ok(String::from_utf8(buf)?)
}
