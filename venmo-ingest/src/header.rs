//! Read the column names of a statement.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::dialect::Dialect;
use crate::error::{IngestError, IngestResult};
use crate::types::FieldNames;

/// Skip the dialect's preamble and split the header line on the delimiter.
///
/// The header line is split literally; Venmo never quotes its column names.
pub fn read_field_names(path: &Path, dialect: &Dialect) -> IngestResult<FieldNames> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let reader = BufReader::new(file);

    let line = match reader.lines().nth(dialect.preamble_lines) {
        Some(line) => line.map_err(|e| IngestError::io(path, e))?,
        None => {
            return Err(IngestError::MalformedHeader {
                path: path.to_path_buf(),
                reason: format!(
                    "expected header on line {}, file is shorter",
                    dialect.header_line()
                ),
            });
        }
    };

    if line.trim().is_empty() {
        return Err(IngestError::MalformedHeader {
            path: path.to_path_buf(),
            reason: format!("line {} is empty", dialect.header_line()),
        });
    }

    let delimiter = char::from(dialect.delimiter);
    let names = line
        .trim_end_matches(['\r', '\n'])
        .split(delimiter)
        .map(String::from)
        .collect();

    Ok(FieldNames::new(names, path))
}
