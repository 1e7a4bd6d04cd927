//! Pull a participant's transactions out of statement files.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::dialect::Dialect;
use crate::error::{IngestError, IngestResult};
use crate::header::read_field_names;
use crate::types::{FieldNames, StatementRow};

/// Header of the first statement plus every kept row, in encounter order.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub fields: FieldNames,
    pub rows: Vec<StatementRow>,
}

impl Extraction {
    /// The header row followed by every transaction row.
    pub fn all_rows(&self) -> impl Iterator<Item = StatementRow> + '_ {
        std::iter::once(self.fields.header_row()).chain(self.rows.iter().cloned())
    }
}

/// Read the header from the first file, then keep every record in every file
/// that has a field exactly equal to `participant`.
///
/// Files are read in the order given, one at a time.
pub fn extract_statements(
    files: &[PathBuf],
    participant: &str,
    dialect: &Dialect,
) -> IngestResult<Extraction> {
    check_participant(participant)?;
    let first = files.first().ok_or(IngestError::NoStatementsGiven)?;
    let fields = read_field_names(first, dialect)?;

    let mut rows = Vec::new();
    for path in files {
        let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
        let mut rdr = dialect.reader_builder().from_reader(file);
        let kept = extract_rows(&mut rdr, path, participant, dialect, fields.len())?;
        log::info!("{}: kept {} row(s)", path.display(), kept.len());
        rows.extend(kept);
    }

    Ok(Extraction { fields, rows })
}

/// Filter one statement's records down to those mentioning `participant`.
///
/// The preamble and header records are never considered. Under a strict
/// dialect a kept record must be exactly `width` fields wide.
pub fn extract_rows<R: Read>(
    rdr: &mut csv::Reader<R>,
    path: &Path,
    participant: &str,
    dialect: &Dialect,
    width: usize,
) -> IngestResult<Vec<StatementRow>> {
    check_participant(participant)?;
    let mut out = Vec::new();

    // Skip by record index: with CRLF terminators the reader's own line
    // numbers run one behind.
    let skip = dialect.preamble_lines + 1;
    for (index, result) in rdr.records().enumerate() {
        let line = index as u64 + 1;
        let record = result.map_err(|e| record_error(path, line, e))?;
        if index < skip {
            continue;
        }

        let row = StatementRow::transaction(record.iter().map(String::from).collect());
        if !row.mentions(participant) {
            continue;
        }

        if dialect.strict && row.fields.len() != width {
            return Err(IngestError::RecordWidth {
                path: path.to_path_buf(),
                line,
                expected: width,
                found: row.fields.len(),
            });
        }

        log::debug!("{}:{}: {:?}", path.display(), line, row.fields);
        out.push(row);
    }

    Ok(out)
}

fn check_participant(participant: &str) -> IngestResult<()> {
    if participant.is_empty() {
        return Err(IngestError::EmptyParticipant);
    }
    Ok(())
}

fn record_error(path: &Path, line: u64, err: csv::Error) -> IngestError {
    IngestError::MalformedRecord {
        path: path.to_path_buf(),
        line,
        source: err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowKind;
    use std::fs;

    const PREAMBLE: &str = "Account Statement - (@Peter-Grace-16) ,,,,,\r\n\
                            Account Activity,,,,,\r\n\
                            ,ID,Datetime,Note,From,To\r\n";

    fn rows_from(data: &str, participant: &str) -> IngestResult<Vec<StatementRow>> {
        let dialect = Dialect::venmo();
        let mut rdr = dialect.reader_builder().from_reader(data.as_bytes());
        extract_rows(&mut rdr, Path::new("test.csv"), participant, &dialect, 6)
    }

    #[test]
    fn test_keeps_rows_naming_participant() {
        let data = format!(
            "{PREAMBLE}\
             ,1,2023-02-15T10:00:00,\"Rent for Feb\",\"Amanda Ruiz\",\"Peter Grace\"\r\n\
             ,2,2023-02-16T10:00:00,\"Coffee\",\"Peter Grace\",\"Jordan Lee\"\r\n\
             ,3,2023-02-17T10:00:00,\"Lunch\",\"Peter Grace\",\"Amanda Ruiz\"\r\n"
        );
        let rows = rows_from(&data, "Amanda Ruiz").unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.field(1)).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(rows.iter().all(|r| r.kind == RowKind::Transaction));
    }

    #[test]
    fn test_substring_of_a_field_does_not_match() {
        let data = format!(
            "{PREAMBLE},1,2023-02-15T10:00:00,\"Paid Amanda Ruiz back\",\"Peter Grace\",\"Jordan Lee\"\r\n"
        );
        assert!(rows_from(&data, "Amanda Ruiz").unwrap().is_empty());
    }

    #[test]
    fn test_header_line_is_never_kept() {
        // A participant named like a column must not pull the header in.
        let data = format!("{PREAMBLE},1,2023-02-15T10:00:00,x,From,To\r\n");
        let rows = rows_from(&data, "From").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field(1), "1");
    }

    #[test]
    fn test_strict_width_mismatch_is_fatal() {
        let data = format!("{PREAMBLE},1,2023-02-15T10:00:00,\"Amanda Ruiz\"\r\n");
        let err = rows_from(&data, "Amanda Ruiz").unwrap_err();
        match err {
            IngestError::RecordWidth {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!((line, expected, found), (4, 6, 4));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lenient_dialect_keeps_short_rows() {
        let dialect = Dialect {
            strict: false,
            ..Dialect::venmo()
        };
        let data = format!("{PREAMBLE},1,2023-02-15T10:00:00,\"Amanda Ruiz\"\r\n");
        let mut rdr = dialect.reader_builder().from_reader(data.as_bytes());
        let rows =
            extract_rows(&mut rdr, Path::new("test.csv"), "Amanda Ruiz", &dialect, 6).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field(5), "");
    }

    #[test]
    fn test_files_are_read_in_given_order() {
        let dir = tempfile::tempdir().unwrap();
        let feb = dir.path().join("VenmoStatement_Feb_2023.csv");
        let mar = dir.path().join("VenmoStatement_Mar_2023.csv");
        fs::write(
            &feb,
            format!("{PREAMBLE},1,2023-02-01T10:00:00,a,\"Amanda Ruiz\",\"Peter Grace\"\r\n"),
        )
        .unwrap();
        fs::write(
            &mar,
            format!(
                "{PREAMBLE},2,2023-03-01T10:00:00,b,\"Amanda Ruiz\",\"Peter Grace\"\r\n\
                 ,3,2023-03-02T10:00:00,c,\"Peter Grace\",\"Amanda Ruiz\"\r\n"
            ),
        )
        .unwrap();

        let extraction =
            extract_statements(&[feb.clone(), mar], "Amanda Ruiz", &Dialect::venmo()).unwrap();
        assert_eq!(extraction.fields.source(), feb.as_path());
        let ids: Vec<&str> = extraction.rows.iter().map(|r| r.field(1)).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        let all: Vec<StatementRow> = extraction.all_rows().collect();
        assert_eq!(all.len(), 4);
        assert!(all[0].is_header());
    }

    #[test]
    fn test_invalid_utf8_is_malformed_record() {
        let mut data = PREAMBLE.as_bytes().to_vec();
        data.extend_from_slice(b",1,\xff\xfe,x,\"Amanda Ruiz\",y\r\n");
        let dialect = Dialect::venmo();
        let mut rdr = dialect.reader_builder().from_reader(data.as_slice());
        let err = extract_rows(&mut rdr, Path::new("bad.csv"), "Amanda Ruiz", &dialect, 6)
            .unwrap_err();
        match err {
            IngestError::MalformedRecord { path, line, .. } => {
                assert_eq!(path, PathBuf::from("bad.csv"));
                assert_eq!(line, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_first_row_after_header_is_kept_for_both_line_endings() {
        let crlf = format!(
            "{PREAMBLE},1,2023-02-15T10:00:00,a,\"Amanda Ruiz\",y\r\n\
             ,2,2023-02-16T10:00:00,b,\"Amanda Ruiz\",y\r\n"
        );
        let lf = crlf.replace("\r\n", "\n");
        for data in [crlf, lf] {
            let rows = rows_from(&data, "Amanda Ruiz").unwrap();
            let ids: Vec<&str> = rows.iter().map(|r| r.field(1)).collect();
            assert_eq!(ids, vec!["1", "2"], "input {data:?}");
        }
    }

    #[test]
    fn test_empty_participant_is_rejected() {
        let data = format!("{PREAMBLE},1,2023-02-15T10:00:00,,\"Amanda Ruiz\",y\r\n");
        let err = rows_from(&data, "").unwrap_err();
        assert!(matches!(err, IngestError::EmptyParticipant));

        let err = extract_statements(&[PathBuf::from("unread.csv")], "", &Dialect::venmo())
            .unwrap_err();
        assert!(matches!(err, IngestError::EmptyParticipant));
    }

    #[test]
    fn test_no_files_given() {
        let err = extract_statements(&[], "Amanda Ruiz", &Dialect::venmo()).unwrap_err();
        assert!(matches!(err, IngestError::NoStatementsGiven));
        assert_eq!(err.to_string(), "no statement files to read");
    }
}
