use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use venmo_ingest::{ColumnSelection, Dialect, discover_statements, extract_statements, read_field_names};
use venmo_report::{LineStyle, build_report, format_signed_amount, write_report};

mod config;

use config::{Config, load_config};

#[derive(Parser, Debug)]
#[command(
    name = "venmo-extract",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VENMO_EXTRACT_BUILD_SHA"), ")"),
    about = "Extract one participant's Venmo transactions into a plain-text report"
)]
struct Cli {
    /// Config file (default: ./venmo-extract.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the report from every matching statement
    Report(ReportArgs),

    /// Print the column names of the first matching statement
    Fields(InputArgs),

    /// Write the default config file (never overwrites)
    InitConfig,
}

#[derive(Args, Debug, Default)]
struct InputArgs {
    /// Directory holding the statement exports
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Statement file-name glob
    #[arg(long)]
    pattern: Option<String>,
}

#[derive(Args, Debug, Default)]
struct ReportArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Participant whose transactions are kept
    #[arg(long)]
    name: Option<String>,

    /// Report file to (over)write
    #[arg(long)]
    output: Option<PathBuf>,

    /// Line layout: comma or table
    #[arg(long)]
    style: Option<LineStyle>,

    /// Leave out the closing balance line
    #[arg(long)]
    no_balance: bool,

    /// Print the report instead of writing it
    #[arg(long)]
    stdout: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Report(args) => {
            let cfg = load_config(cli.config.as_deref())?;
            run_report(cfg, args)?;
        }

        Command::Fields(args) => {
            let mut cfg = load_config(cli.config.as_deref())?;
            apply_input(&mut cfg, args);
            list_fields(&cfg)?;
        }

        Command::InitConfig => {
            config::init_config(cli.config.as_deref())?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn apply_input(cfg: &mut Config, args: InputArgs) {
    if let Some(dir) = args.dir {
        cfg.input.dir = dir;
    }
    if let Some(pattern) = args.pattern {
        cfg.input.pattern = pattern;
    }
}

fn run_report(mut cfg: Config, args: ReportArgs) -> Result<()> {
    apply_input(&mut cfg, args.input);
    if let Some(name) = args.name {
        cfg.filter.participant = name;
    }
    if let Some(output) = args.output {
        cfg.output.path = output;
    }
    if let Some(style) = args.style {
        cfg.output.style = style;
    }
    if args.no_balance {
        cfg.output.balance = false;
    }

    let dialect = Dialect::venmo();
    let files = discover_statements(&cfg.input.dir, &cfg.input.pattern)?;
    let extraction = extract_statements(&files, &cfg.filter.participant, &dialect)?;
    let selection =
        ColumnSelection::resolve(&extraction.fields, &cfg.columns.fields, &cfg.columns.amount)?;
    let report = build_report(&extraction, selection, &cfg.report_options());

    if args.stdout {
        print!("{}", report.text);
        return Ok(());
    }

    write_report(&cfg.output.path, &report)?;
    println!(
        "Wrote {} ({} transactions, {} rent, balance {})",
        cfg.output.path.display(),
        report.transactions,
        report.rent_rows,
        format_signed_amount(report.balance)
    );
    Ok(())
}

fn list_fields(cfg: &Config) -> Result<()> {
    let files = discover_statements(&cfg.input.dir, &cfg.input.pattern)?;
    let first = files.first().context("no statements found")?;
    let fields = read_field_names(first, &Dialect::venmo())?;

    println!("{}", first.display());
    for (i, name) in fields.names().iter().enumerate() {
        println!("{:>3}  {}", i, name);
    }
    Ok(())
}
