//! venmo-report: render extracted Venmo rows as a plain-text report with a
//! running balance of non-rent transactions.

pub mod amount;
pub mod date;
pub mod format;
pub mod report;

pub use amount::{format_signed_amount, parse_signed_amount};
pub use date::{format_statement_date, parse_iso_date};
pub use format::{FormattedLine, LineStyle, RowFormatter};
pub use report::{Banner, Report, ReportOptions, build_report, write_report};
