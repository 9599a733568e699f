//! File and stream helpers shared by the commands.
//!
//! - **Input**: whole-file reads decoded through `encoding_rs` (UTF-8 by
//!   default); the `-` path reads stdin.
//! - **Fallback inputs**: [`first_existing()`] picks the first present file
//!   from an ordered candidate list.
//! - **Output**: CSV writers quote every field; text and JSON writers target a
//!   file or stdout.

use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use csv::{QuoteStyle, Terminator};
use encoding_rs::{Encoding, UTF_8};
use serde::Serialize;

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

/// Reads the whole input into memory and decodes it.
pub fn read_text(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let mut bytes = Vec::new();
    if is_dash(path) {
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Reading stdin")?;
    } else {
        File::open(path)
            .with_context(|| format!("Opening input file {path:?}"))?
            .read_to_end(&mut bytes)
            .with_context(|| format!("Reading input file {path:?}"))?;
    }
    decode_bytes(&bytes, encoding).with_context(|| format!("Decoding {path:?}"))
}

/// First candidate that is `-` or exists on disk.
pub fn first_existing(candidates: &[PathBuf]) -> Option<&Path> {
    candidates
        .iter()
        .map(PathBuf::as_path)
        .find(|path| is_dash(path) || path.exists())
}

pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) if !is_dash(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        )),
        _ => Box::new(io::stdout()),
    })
}

pub fn open_csv_writer(path: Option<&Path>) -> Result<csv::Writer<Box<dyn Write>>> {
    let mut builder = csv::WriterBuilder::new();
    builder
        .quote_style(QuoteStyle::Always)
        .double_quote(true)
        .terminator(Terminator::Any(b'\n'));
    Ok(builder.from_writer(open_output(path)?))
}

pub fn write_json<T: Serialize + ?Sized>(path: Option<&Path>, value: &T) -> Result<()> {
    let mut writer = open_output(path)?;
    serde_json::to_writer_pretty(&mut writer, value).context("Serializing JSON output")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::WINDOWS_1252;

    #[test]
    fn resolve_encoding_defaults_to_utf8() {
        assert_eq!(resolve_encoding(None).unwrap(), UTF_8);
        assert_eq!(resolve_encoding(Some(" latin1 ")).unwrap(), WINDOWS_1252);
        assert!(resolve_encoding(Some("not-a-charset")).is_err());
    }

    #[test]
    fn decode_bytes_reports_invalid_utf8() {
        assert!(decode_bytes(&[0x66, 0xff], UTF_8).is_err());
        assert_eq!(decode_bytes(&[0x63, 0x61, 0x66, 0xe9], WINDOWS_1252).unwrap(), "café");
    }

    #[test]
    fn first_existing_skips_missing_candidates() {
        let dir = tempfile::tempdir().expect("temp dir");
        let present = dir.path().join("present.csv");
        std::fs::write(&present, "a\n").expect("write");
        let candidates = vec![dir.path().join("missing.csv"), present.clone()];
        assert_eq!(first_existing(&candidates), Some(present.as_path()));
        assert_eq!(first_existing(&candidates[..1]), None);
    }
}
