//! Excel workbook adapter.
//!
//! Decode reads the first worksheet by position - not by name, since agents
//! rename tabs freely - and uses its first row as the header. A payload
//! that is not a well-formed workbook fails fast with a distinct error
//! rather than quietly yielding zero rows. Encode builds a single "Leads"
//! worksheet and serializes the workbook to an in-memory buffer.
//!
//! All cells are treated as text on both sides: decode renders numeric and
//! date cells through their display form, and the numeric coercion
//! downstream decides what is actually a number.

use std::io::Cursor;

use calamine::{DataType, Reader, Xlsx};
use rust_xlsxwriter::Workbook;

use super::{record_cells, FormatAdapter, EXPORT_COLUMNS};
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::models::{RawRow, StoredLead};

/// Worksheet name used for exports.
const EXPORT_SHEET: &str = "Leads";

/// Excel (`.xlsx`) format adapter.
pub struct ExcelAdapter;

impl FormatAdapter for ExcelAdapter {
    fn decode(&self, payload: &[u8]) -> DecodeResult<Vec<RawRow>> {
        if payload.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(payload))
            .map_err(|e| DecodeError::InvalidWorkbook(e.to_string()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or(DecodeError::NoWorksheet)?
            .map_err(|e| DecodeError::InvalidWorkbook(e.to_string()))?;

        let mut row_iter = range.rows();
        let headers: Vec<String> = match row_iter.next() {
            Some(header_row) => header_row.iter().map(|c| cell_text(c).trim().to_string()).collect(),
            None => return Err(DecodeError::NoHeaders),
        };
        if headers.iter().all(|h| h.is_empty()) {
            return Err(DecodeError::NoHeaders);
        }

        let mut rows = Vec::new();
        for sheet_row in row_iter {
            let cells: Vec<String> = sheet_row
                .iter()
                .map(|c| cell_text(c).trim().to_string())
                .collect();
            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }

            let mut row = RawRow::default();
            for (i, header) in headers.iter().enumerate() {
                if let Some(cell) = cells.get(i) {
                    row.set(header, cell);
                }
            }
            rows.push(row);
        }

        Ok(rows)
    }

    fn encode(&self, leads: &[StoredLead]) -> EncodeResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(EXPORT_SHEET)
            .map_err(|e| EncodeError::WorkbookError(e.to_string()))?;

        for (col, name) in EXPORT_COLUMNS.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, *name)
                .map_err(|e| EncodeError::WorkbookError(e.to_string()))?;
        }
        for (row, lead) in leads.iter().enumerate() {
            for (col, cell) in record_cells(lead).iter().enumerate() {
                worksheet
                    .write_string((row + 1) as u32, col as u16, cell)
                    .map_err(|e| EncodeError::WorkbookError(e.to_string()))?;
            }
        }

        workbook
            .save_to_buffer()
            .map_err(|e| EncodeError::WorkbookError(e.to_string()))
    }
}

/// Render a cell as text, falling back to the display form for numeric
/// and date cells.
fn cell_text(cell: &calamine::Data) -> String {
    cell.as_string()
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("{}", cell))
}
