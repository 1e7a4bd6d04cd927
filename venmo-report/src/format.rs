//! Render one statement row as a report line.
//!
//! Formatting is pure: each call returns the line together with the amount it
//! adds to the running balance, and the caller does the folding.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use venmo_ingest::{ColumnSelection, RowKind, StatementRow};

use crate::amount::parse_signed_amount;
use crate::date::{format_statement_date, parse_iso_date};

/// Minimum cell width in [`LineStyle::Table`].
pub const TABLE_CELL_WIDTH: usize = 11;
/// Rule width in [`LineStyle::Comma`].
pub const COMMA_RULE_WIDTH: usize = 64;

const RENT_MARKER: &str = "* ";
const BLANK_MARKER: &str = "  ";

/// How the selected fields of a row are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// `Feb 15 2023, Amanda Ruiz, Peter Grace, + $65.00, Rent for Feb`
    #[default]
    Comma,
    /// Cells padded to 11 characters, separated by ` | `.
    Table,
}

impl LineStyle {
    pub fn join(&self, cells: &[String]) -> String {
        match self {
            LineStyle::Comma => cells.join(", "),
            LineStyle::Table => cells
                .iter()
                .map(|c| format!("{:<width$}", c, width = TABLE_CELL_WIDTH))
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }

    /// Horizontal rule placed under the rendered header line.
    pub fn rule(&self, header_line: &str) -> String {
        let width = match self {
            LineStyle::Comma => COMMA_RULE_WIDTH,
            LineStyle::Table => header_line.trim_end_matches('\n').chars().count(),
        };
        "-".repeat(width)
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineStyle::Comma => f.write_str("comma"),
            LineStyle::Table => f.write_str("table"),
        }
    }
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comma" => Ok(LineStyle::Comma),
            "table" => Ok(LineStyle::Table),
            other => Err(format!("unknown line style {other:?} (expected comma or table)")),
        }
    }
}

/// A rendered line and what it contributes to the running balance.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedLine {
    /// Marker, cells and trailing newline.
    pub text: String,
    pub rent: bool,
    /// Signed amount added to the balance; `0.0` for rent and header rows.
    pub contribution: f64,
    /// Parsed transaction date, if any.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct RowFormatter {
    selection: ColumnSelection,
    style: LineStyle,
    /// Lowercased; empty never matches.
    rent_keyword: String,
}

impl RowFormatter {
    pub fn new(selection: ColumnSelection, style: LineStyle, rent_keyword: &str) -> Self {
        Self {
            selection,
            style,
            rent_keyword: rent_keyword.to_lowercase(),
        }
    }

    pub fn style(&self) -> LineStyle {
        self.style
    }

    /// Case-insensitive keyword test on the note field.
    pub fn is_rent(&self, note: &str) -> bool {
        !self.rent_keyword.is_empty() && note.to_lowercase().contains(&self.rent_keyword)
    }

    pub fn format(&self, row: &StatementRow) -> FormattedLine {
        let raw_date = row.field(self.selection.date());
        let date = match row.kind {
            RowKind::Header => None,
            RowKind::Transaction => {
                let parsed = parse_iso_date(raw_date);
                if parsed.is_none() {
                    log::warn!("unparseable date {raw_date:?}; keeping it verbatim");
                }
                parsed
            }
        };

        let mut cells = Vec::with_capacity(self.selection.indices().len());
        cells.push(match date {
            Some(d) => format_statement_date(d),
            None => raw_date.to_string(),
        });
        cells.extend(
            self.selection.indices()[1..]
                .iter()
                .map(|&i| row.field(i).to_string()),
        );

        let rent = self.is_rent(row.field(self.selection.note()));
        let contribution = if row.is_header() || rent {
            0.0
        } else {
            self.amount_of(row)
        };

        let marker = if rent { RENT_MARKER } else { BLANK_MARKER };
        let text = format!("{}{}\n", marker, self.style.join(&cells));

        FormattedLine {
            text,
            rent,
            contribution,
            date,
        }
    }

    fn amount_of(&self, row: &StatementRow) -> f64 {
        let raw = row.field(self.selection.amount());
        match parse_signed_amount(raw) {
            Some(v) => v,
            None => {
                // Counted as zero, which undercounts the balance if the data is bad.
                log::warn!("unparseable amount {raw:?}; counting it as 0.00");
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venmo_ingest::FieldNames;

    const HEADER: &str = ",ID,Datetime,Type,Status,Note,From,To,Amount (total),Amount (tip)";

    fn split(line: &str) -> Vec<String> {
        line.split(',').map(String::from).collect()
    }

    fn formatter(style: LineStyle) -> RowFormatter {
        let fields = FieldNames::new(split(HEADER), "VenmoStatement_Feb_2023.csv");
        let sel = ColumnSelection::resolve(
            &fields,
            &["Datetime", "From", "To", "Amount (total)", "Note"],
            "Amount (total)",
        )
        .unwrap();
        RowFormatter::new(sel, style, "rent")
    }

    fn txn(line: &str) -> StatementRow {
        StatementRow::transaction(split(line))
    }

    #[test]
    fn test_rent_row_is_marked_and_not_counted() {
        let row = txn(",1,2023-02-15T10:00:00,Payment,Complete,Rent for Feb,Amanda Ruiz,Peter Grace,+ $65.00,");
        let line = formatter(LineStyle::Comma).format(&row);
        assert_eq!(
            line.text,
            "* Feb 15 2023, Amanda Ruiz, Peter Grace, + $65.00, Rent for Feb\n"
        );
        assert!(line.rent);
        assert_eq!(line.contribution, 0.0);
        assert_eq!(line.date, NaiveDate::from_ymd_opt(2023, 2, 15));
    }

    #[test]
    fn test_rent_match_is_case_insensitive_substring() {
        let f = formatter(LineStyle::Comma);
        assert!(f.is_rent("March RENT"));
        assert!(f.is_rent("parent's gift"));
        assert!(!f.is_rent("Groceries"));
        assert!(!f.is_rent("Note"));
    }

    #[test]
    fn test_plain_row_contributes_signed_amount() {
        let row = txn(",2,2023-02-03T18:22:10,Payment,Complete,Dinner,Peter Grace,Amanda Ruiz,- $12.34,");
        let line = formatter(LineStyle::Comma).format(&row);
        assert!(line.text.starts_with("  Feb 03 2023, "));
        assert!(!line.rent);
        assert_eq!(line.contribution, -12.34);
    }

    #[test]
    fn test_garbage_amount_contributes_zero() {
        let row = txn(",3,2023-02-03T18:22:10,Payment,Complete,Dinner,Peter Grace,Amanda Ruiz,garbage,");
        let line = formatter(LineStyle::Comma).format(&row);
        assert_eq!(line.contribution, 0.0);
        assert!(line.text.contains(", garbage, "));
    }

    #[test]
    fn test_header_row_renders_field_names() {
        let header = StatementRow::header(split(HEADER));
        let line = formatter(LineStyle::Comma).format(&header);
        assert_eq!(line.text, "  Datetime, From, To, Amount (total), Note\n");
        assert!(!line.rent);
        assert_eq!(line.contribution, 0.0);
        assert_eq!(line.date, None);
    }

    #[test]
    fn test_bad_date_in_transaction_is_kept_verbatim() {
        let row = txn(",4,yesterday,Payment,Complete,Dinner,Peter Grace,Amanda Ruiz,+ $1.00,");
        let line = formatter(LineStyle::Comma).format(&row);
        assert!(line.text.starts_with("  yesterday, Peter Grace"));
        assert_eq!(line.date, None);
        assert_eq!(line.contribution, 1.0);
    }

    #[test]
    fn test_table_style_pads_cells() {
        let header = StatementRow::header(split(HEADER));
        let f = formatter(LineStyle::Table);
        assert_eq!(
            f.format(&header).text,
            "  Datetime    | From        | To          | Amount (total) | Note       \n"
        );

        let row = txn(",1,2023-02-15T10:00:00,Payment,Complete,Rent,Amanda Ruiz,Peter Grace,+ $65.00,");
        assert_eq!(
            f.format(&row).text,
            "* Feb 15 2023 | Amanda Ruiz | Peter Grace | + $65.00    | Rent       \n"
        );
    }

    #[test]
    fn test_rule_widths() {
        assert_eq!(LineStyle::Comma.rule("  anything\n").len(), 64);
        assert_eq!(LineStyle::Table.rule("  Datetime    | From\n"), "-".repeat(20));
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        let fields = FieldNames::new(split(HEADER), "x.csv");
        let sel = ColumnSelection::resolve(&fields, &["Datetime", "Note"], "Amount (total)").unwrap();
        let f = RowFormatter::new(sel, LineStyle::Comma, "");
        assert!(!f.is_rent("Rent for Feb"));
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("Table".parse::<LineStyle>(), Ok(LineStyle::Table));
        assert_eq!("comma".parse::<LineStyle>(), Ok(LineStyle::Comma));
        assert!("pipes".parse::<LineStyle>().is_err());
    }
}
