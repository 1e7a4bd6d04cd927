//! Assemble and write the transaction report.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use venmo_ingest::{ColumnSelection, Extraction};

use crate::amount::format_signed_amount;
use crate::format::{FormattedLine, LineStyle, RowFormatter};

/// Lines printed above the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    pub title: Vec<String>,
    /// Derived from the transaction dates when `None`.
    pub period: Option<String>,
    pub source_url: Option<String>,
}

impl Banner {
    fn render(&self, lines: &[FormattedLine]) -> String {
        let mut s = String::new();
        for t in &self.title {
            s.push_str(t);
            s.push('\n');
        }

        let period = self.period.clone().or_else(|| derive_period(lines));
        if let Some(p) = &period {
            s.push_str(p);
            s.push('\n');
        }
        if !s.is_empty() {
            s.push('\n');
        }

        if let Some(url) = &self.source_url {
            s.push_str("(The source code and data of the following report can be found here:\n");
            s.push_str(&format!("{})\n\n", url));
        }
        s
    }
}

/// `FROM FEBRUARY 2023 TO NOVEMBER 2024`, spanning the dated lines.
fn derive_period(lines: &[FormattedLine]) -> Option<String> {
    let dates: Vec<NaiveDate> = lines.iter().filter_map(|l| l.date).collect();
    let first = dates.iter().min()?;
    let last = dates.iter().max()?;
    Some(format!(
        "FROM {} TO {}",
        first.format("%B %Y").to_string().to_uppercase(),
        last.format("%B %Y").to_string().to_uppercase()
    ))
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub style: LineStyle,
    /// Append a closing rule and the final balance.
    pub include_balance: bool,
    pub rent_keyword: String,
    pub banner: Banner,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            style: LineStyle::Comma,
            include_balance: true,
            rent_keyword: "rent".to_string(),
            banner: Banner::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub text: String,
    /// Sum of signed amounts over non-rent transactions.
    pub balance: f64,
    pub transactions: usize,
    pub rent_rows: usize,
}

/// Render the header and every extracted row, folding the running balance.
pub fn build_report(
    extraction: &Extraction,
    selection: ColumnSelection,
    options: &ReportOptions,
) -> Report {
    let formatter = RowFormatter::new(selection, options.style, &options.rent_keyword);

    let header = formatter.format(&extraction.fields.header_row());
    let lines: Vec<FormattedLine> = extraction.rows.iter().map(|r| formatter.format(r)).collect();
    let balance = lines.iter().fold(0.0, |acc, l| acc + l.contribution);
    let rule = options.style.rule(&header.text);

    let mut text = options.banner.render(&lines);
    text.push_str(&header.text);
    text.push_str(&rule);
    text.push('\n');
    for line in &lines {
        text.push_str(&line.text);
    }
    if options.include_balance {
        text.push_str(&rule);
        text.push('\n');
        text.push_str(&format!("  Balance: {}\n", format_signed_amount(balance)));
    }

    Report {
        text,
        balance,
        transactions: lines.len(),
        rent_rows: lines.iter().filter(|l| l.rent).count(),
    }
}

/// Replace `path` with the report text.
///
/// The text goes to a sibling `.tmp` file first and is renamed into place, so
/// an interrupted run leaves any previous report intact.
pub fn write_report(path: &Path, report: &Report) -> Result<()> {
    let Some(name) = path.file_name() else {
        bail!("output path {} has no file name", path.display());
    };
    let mut tmp_name = name.to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    if let Err(e) = fs::write(&tmp, &report.text) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("write {}", tmp.display()));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e)
            .with_context(|| format!("rename {} to {}", tmp.display(), path.display()));
    }

    log::info!("wrote {} ({} bytes)", path.display(), report.text.len());
    Ok(())
}
