use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{IngestError, IngestResult};

/// Column names read from the header line of the first statement.
///
/// Every statement in a run is assumed to share this column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    names: Vec<String>,
    /// Statement the header was read from
    source: PathBuf,
}

impl FieldNames {
    pub fn new(names: Vec<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            names,
            source: source.into(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.names.iter().position(|n| n == field)
    }

    /// The header as a row, so it renders through the same formatter as data.
    pub fn header_row(&self) -> StatementRow {
        StatementRow::header(self.names.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    Header,
    Transaction,
}

/// One CSV record, tagged with whether it is the header or a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRow {
    pub kind: RowKind,
    pub fields: Vec<String>,
}

impl StatementRow {
    pub fn header(fields: Vec<String>) -> Self {
        Self {
            kind: RowKind::Header,
            fields,
        }
    }

    pub fn transaction(fields: Vec<String>) -> Self {
        Self {
            kind: RowKind::Transaction,
            fields,
        }
    }

    pub fn is_header(&self) -> bool {
        self.kind == RowKind::Header
    }

    /// Field at `index`, or `""` when the record is too short.
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    /// Exact match of `name` against any single field.
    pub fn mentions(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }
}

/// Column indices chosen for the report, resolved once per run.
///
/// The first index is the date slot and the last is the note slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    indices: Vec<usize>,
    amount: usize,
}

impl ColumnSelection {
    /// Look up each wanted field (and the amount field) in `fields`.
    pub fn resolve<S: AsRef<str>>(
        fields: &FieldNames,
        wanted: &[S],
        amount_field: &str,
    ) -> IngestResult<Self> {
        if wanted.is_empty() {
            return Err(IngestError::MalformedHeader {
                path: fields.source().to_path_buf(),
                reason: "no output fields selected".to_string(),
            });
        }

        let lookup = |field: &str| {
            fields
                .index_of(field)
                .ok_or_else(|| IngestError::MissingField {
                    field: field.to_string(),
                    path: fields.source().to_path_buf(),
                })
        };

        let indices = wanted
            .iter()
            .map(|w| lookup(w.as_ref()))
            .collect::<IngestResult<Vec<_>>>()?;
        let amount = lookup(amount_field)?;

        Ok(Self { indices, amount })
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn date(&self) -> usize {
        self.indices[0]
    }

    pub fn note(&self) -> usize {
        self.indices[self.indices.len() - 1]
    }

    pub fn amount(&self) -> usize {
        self.amount
    }
}
