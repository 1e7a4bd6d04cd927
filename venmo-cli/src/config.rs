use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use venmo_report::{Banner, LineStyle, ReportOptions};

pub const DEFAULT_CONFIG_FILE: &str = "venmo-extract.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputSection,
    pub filter: FilterSection,
    pub columns: ColumnsSection,
    pub output: OutputSection,
    pub banner: BannerSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Directory holding the statement exports
    pub dir: PathBuf,
    /// File-name glob, e.g. `VenmoStatement*.csv`
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSection {
    /// Rows are kept when one field equals this exactly
    pub participant: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsSection {
    /// Output columns; the first must be the date and the last the note
    pub fields: Vec<String>,
    /// Column summed into the balance
    pub amount: String,
    pub rent_keyword: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub path: PathBuf,
    pub style: LineStyle,
    pub balance: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerSection {
    pub title: Vec<String>,
    pub period: Option<String>,
    pub source_url: Option<String>,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./csv"),
            pattern: "VenmoStatement*.csv".to_string(),
        }
    }
}

impl Default for FilterSection {
    fn default() -> Self {
        Self {
            participant: "Amanda Ruiz".to_string(),
        }
    }
}

impl Default for ColumnsSection {
    fn default() -> Self {
        Self {
            fields: ["Datetime", "From", "To", "Amount (total)", "Note"]
                .into_iter()
                .map(String::from)
                .collect(),
            amount: "Amount (total)".to_string(),
            rent_keyword: "rent".to_string(),
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Venmo_transactions.txt"),
            style: LineStyle::Comma,
            balance: true,
        }
    }
}

impl Default for BannerSection {
    fn default() -> Self {
        Self {
            title: vec!["VENMO TRANSACTIONS BETWEEN @PETER-GRACE-16 AND @AMANDA-RUIZ-139".to_string()],
            period: None,
            source_url: Some("https://github.com/petergrace1618/venmo-data-extractor.git".to_string()),
        }
    }
}

impl Config {
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            style: self.output.style,
            include_balance: self.output.balance,
            rent_keyword: self.columns.rent_keyword.clone(),
            banner: Banner {
                title: self.banner.title.clone(),
                period: self.banner.period.clone(),
                source_url: self.banner.source_url.clone(),
            },
        }
    }
}

pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load the config file. A missing default file means built-in defaults; a
/// missing file named with `--config` is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = config_path(explicit);
    if !p.exists() {
        if explicit.is_some() {
            bail!("config not found: {}", p.display());
        }
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let cfg = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    log::info!("loaded config from {}", p.display());
    Ok(cfg)
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(explicit: Option<&Path>) -> Result<()> {
    let p = config_path(explicit);
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
