//! venmo-ingest: statement discovery, the Venmo CSV dialect, header acquisition
//! and participant row extraction.

pub mod dialect;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod header;
pub mod types;

pub use dialect::Dialect;
pub use discovery::discover_statements;
pub use error::{IngestError, IngestResult};
pub use extract::{Extraction, extract_rows, extract_statements};
pub use header::read_field_names;
pub use types::{ColumnSelection, FieldNames, RowKind, StatementRow};
