//! CSV to XLSX transform.
//!
//! The upload is decoded as UTF-8 with a Latin-1-style single-byte fallback,
//! parsed as comma-delimited rows, and written row by row into a single
//! worksheet. Every cell is written as a string, mirroring what a CSV reader
//! yields.

use rust_xlsxwriter::Workbook;

use super::TransformError;

/// Convert CSV bytes into a one-sheet XLSX workbook.
pub fn csv_to_xlsx(bytes: &[u8]) -> Result<Vec<Vec<u8>>, TransformError> {
    let text = decode_text(bytes)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (row, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| TransformError::Invalid(format!("invalid CSV: {e}")))?;
        let row = u32::try_from(row)
            .map_err(|_| TransformError::Invalid("too many rows for a worksheet".into()))?;
        for (col, cell) in record.iter().enumerate() {
            let col = u16::try_from(col)
                .map_err(|_| TransformError::Invalid("too many columns for a worksheet".into()))?;
            worksheet
                .write_string(row, col, cell)
                .map_err(|e| TransformError::Invalid(format!("cannot write cell: {e}")))?;
        }
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| TransformError::Internal(format!("failed to serialize workbook: {e}")))?;

    Ok(vec![buffer])
}

/// Decode bytes as UTF-8, falling back to windows-1252 (the web's latin1).
fn decode_text(bytes: &[u8]) -> Result<String, TransformError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_owned()),
        Err(_) => {
            let (text, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
            if had_errors {
                Err(TransformError::Decode)
            } else {
                Ok(text.into_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Reader, Xlsx};
    use std::io::Cursor;

    fn sheet_rows(xlsx: &[u8]) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(xlsx.to_vec())).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn rows_and_cells_survive_in_order() {
        let outputs = csv_to_xlsx(b"a,b,c\n1,2,3\nfoo,bar,baz\n").unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(&outputs[0][..2], b"PK");

        let rows = sheet_rows(&outputs[0]);
        assert_eq!(
            rows,
            vec![
                vec!["a", "b", "c"],
                vec!["1", "2", "3"],
                vec!["foo", "bar", "baz"],
            ]
        );
    }

    #[test]
    fn ragged_rows_are_accepted() {
        let outputs = csv_to_xlsx(b"a,b\nc\nd,e,f\n").unwrap();
        let rows = sheet_rows(&outputs[0]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][0], "c");
        assert_eq!(rows[2], vec!["d", "e", "f"]);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let outputs = csv_to_xlsx(b"\"x,y\",z\n").unwrap();
        let rows = sheet_rows(&outputs[0]);
        assert_eq!(rows[0], vec!["x,y", "z"]);
    }

    #[test]
    fn empty_input_yields_empty_sheet() {
        let outputs = csv_to_xlsx(b"").unwrap();
        assert_eq!(&outputs[0][..2], b"PK");
    }

    #[test]
    fn decode_prefers_utf8() {
        assert_eq!(decode_text("héllo".as_bytes()).unwrap(), "héllo");
    }

    #[test]
    fn decode_falls_back_to_single_byte() {
        // 0xE9 is not valid UTF-8 on its own but is 'é' in latin1.
        let text = decode_text(b"caf\xE9,1\n").unwrap();
        assert_eq!(text, "café,1\n");
    }

    #[test]
    fn latin1_csv_converts_end_to_end() {
        let outputs = csv_to_xlsx(b"caf\xE9,ol\xE9\n").unwrap();
        let rows = sheet_rows(&outputs[0]);
        assert_eq!(rows[0], vec!["café", "olé"]);
    }
}
