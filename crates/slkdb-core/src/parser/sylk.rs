//! SYLK spreadsheet tables.
//!
//! Only the records needed to recover cell contents are interpreted:
//!
//! - `ID` must open the file
//! - `C;X<col>;Y<row>;K<value>` sets a cell
//! - `F;X<col>;Y<row>;...` moves the cursor without setting a cell
//! - `E` ends the file
//!
//! `X` and `Y` are sticky: an omitted coordinate keeps its previous value.
//! A literal `;` inside a field is written as `;;`.
//!
//! Cells are kept as raw bytes. Tables written by localized editors are
//! often not UTF-8, and their text must reach scripts unchanged.

use std::collections::BTreeMap;

use super::{lines, text_value};
use crate::error::Error;
use crate::identifier::ObjectId;
use crate::manager::StringInterner;
use crate::record::RecordSet;
use crate::value::Value;

/// Parsed cells, row -> column -> bytes.
#[derive(Debug, Default)]
pub(crate) struct Sheet {
    cells: BTreeMap<u32, BTreeMap<u32, Vec<u8>>>,
}

impl Sheet {
    /// Parse SYLK data.
    pub(crate) fn parse(path: &str, data: &[u8]) -> Result<Self, Error> {
        let mut sheet = Sheet::default();
        let mut col = 1u32;
        let mut row = 1u32;
        let mut seen_id = false;

        for (index, line) in lines(data).enumerate() {
            let line_no = index + 1;
            if line.is_empty() {
                continue;
            }

            let fields = split_fields(line);
            let kind = fields[0].as_slice();

            if !seen_id {
                if kind != b"ID" {
                    return Err(Error::parse(path, line_no, "missing ID record"));
                }
                seen_id = true;
                continue;
            }

            match kind {
                b"C" | b"F" => {
                    let mut value = None;
                    for field in &fields[1..] {
                        let Some((tag, rest)) = field.split_first() else {
                            continue;
                        };
                        match *tag {
                            b'X' => col = coordinate(path, line_no, rest)?,
                            b'Y' => row = coordinate(path, line_no, rest)?,
                            b'K' if kind == b"C" => value = Some(unquote(rest)),
                            _ => {}
                        }
                    }
                    if let Some(value) = value {
                        sheet.cells.entry(row).or_default().insert(col, value);
                    }
                }
                b"E" => break,
                _ => {}
            }
        }

        if !seen_id {
            return Err(Error::parse(path, 1, "missing ID record"));
        }

        Ok(sheet)
    }

    /// Header row (row 1), column -> name.
    fn header(&self) -> Option<&BTreeMap<u32, Vec<u8>>> {
        self.cells.get(&1)
    }

    /// Data rows in row order.
    fn rows(&self) -> impl Iterator<Item = &BTreeMap<u32, Vec<u8>>> {
        self.cells.range(2..).map(|(_, cols)| cols)
    }
}

fn split_fields(line: &[u8]) -> Vec<Vec<u8>> {
    let mut fields = vec![Vec::new()];
    let mut bytes = line.iter().copied().peekable();

    while let Some(b) = bytes.next() {
        if b == b';' {
            if bytes.peek() == Some(&b';') {
                bytes.next();
                if let Some(last) = fields.last_mut() {
                    last.push(b';');
                }
            } else {
                fields.push(Vec::new());
            }
        } else if let Some(last) = fields.last_mut() {
            last.push(b);
        }
    }

    fields
}

fn coordinate(path: &str, line: usize, text: &[u8]) -> Result<u32, Error> {
    let parsed = std::str::from_utf8(text).ok().and_then(|s| s.parse::<u32>().ok());
    match parsed {
        Some(n) if n > 0 => Ok(n),
        _ => Err(Error::parse(
            path,
            line,
            format!("invalid coordinate '{}'", String::from_utf8_lossy(text)),
        )),
    }
}

fn unquote(text: &[u8]) -> Vec<u8> {
    match text.strip_prefix(b"\"") {
        Some(inner) => inner.strip_suffix(b"\"").unwrap_or(inner).to_vec(),
        None => text.to_vec(),
    }
}

/// Merge a SYLK table into `set`.
///
/// Column 1 holds the record id and is kept as an identifier-valued field;
/// other non-empty cells under a named header become text fields.
pub(crate) fn merge(
    path: &str,
    data: &[u8],
    new_records: bool,
    set: &mut RecordSet,
    strings: &mut StringInterner,
) -> Result<(), Error> {
    let sheet = Sheet::parse(path, data)?;
    let Some(header) = sheet.header() else {
        return Ok(());
    };

    for cols in sheet.rows() {
        let Some(id) = cols.get(&1).filter(|id| !id.is_empty()) else {
            continue;
        };
        let id = ObjectId::alias(String::from_utf8_lossy(id));
        if !new_records && !set.contains(&id) {
            continue;
        }

        let record = set.entry(id.clone());
        for (col, text) in cols {
            let Some(name) = header.get(col) else {
                continue;
            };
            let value = if *col == 1 {
                Value::ObjectId(id.clone())
            } else if text.is_empty() {
                continue;
            } else {
                text_value(text, strings)
            };
            record.insert(strings.intern(&String::from_utf8_lossy(name)), value);
        }
    }

    Ok(())
}
