//! Delimited-text adapter with encoding and delimiter auto-detection.
//!
//! Bulk lead files come from wherever an agent last opened them - Excel
//! exports in Windows-1252, MLS dumps in Latin-1, semicolon-delimited
//! European spreadsheets. Decode therefore sniffs the encoding and the
//! delimiter before parsing. Encode always writes comma-delimited UTF-8
//! with RFC 4180 quoting.

use csv::{ReaderBuilder, Trim, WriterBuilder};

use super::{record_cells, FormatAdapter, EXPORT_COLUMNS};
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::models::{RawRow, StoredLead};

/// Delimited-text (`csv`) format adapter.
pub struct CsvAdapter;

impl FormatAdapter for CsvAdapter {
    fn decode(&self, payload: &[u8]) -> DecodeResult<Vec<RawRow>> {
        let content = decode_text(payload)?;
        let content = content.trim_start_matches(['\r', '\n']);
        if content.trim().is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        let delimiter = detect_delimiter(content);
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter as u8)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| DecodeError::ParseError(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(DecodeError::NoHeaders);
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DecodeError::ParseError(e.to_string()))?;
            // whitespace-only lines decode as a single empty cell; drop
            // them. A line of bare delimiters is a real (empty) data row
            // and stays in for validation to reject.
            if record.len() == 1 && record.get(0).is_some_and(|c| c.is_empty()) {
                continue;
            }

            let mut row = RawRow::default();
            for (i, header) in headers.iter().enumerate() {
                // short records simply leave trailing slots absent;
                // validation decides whether that matters
                if let Some(cell) = record.get(i) {
                    row.set(header, cell);
                }
            }
            rows.push(row);
        }

        Ok(rows)
    }

    fn encode(&self, leads: &[StoredLead]) -> EncodeResult<Vec<u8>> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());

        writer
            .write_record(EXPORT_COLUMNS)
            .map_err(|e| EncodeError::CsvError(e.to_string()))?;
        for lead in leads {
            writer
                .write_record(record_cells(lead))
                .map_err(|e| EncodeError::CsvError(e.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| EncodeError::CsvError(e.to_string()))
    }
}

/// Detect the text encoding of raw bytes and decode them.
///
/// UTF-8 (and plain ASCII) pass through; Latin-1 and Windows-1252 are
/// decoded via their code pages; anything else falls back to lossy UTF-8.
pub fn decode_text(payload: &[u8]) -> DecodeResult<String> {
    if payload.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let (charset, _, _) = chardet::detect(payload);
    let decoded = match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => String::from_utf8_lossy(payload).into_owned(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(payload).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(payload).0.into_owned(),
        _ => String::from_utf8_lossy(payload).into_owned(),
    };
    Ok(decoded)
}

/// Detect the delimiter by counting candidates in the header line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}
