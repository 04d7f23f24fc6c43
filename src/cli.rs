//! CLI definition and dispatch.
//!
//! Orchestration is explicit: config → data source → modifier source →
//! signals → simulator → report adapters.

use chrono::{Duration, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvSeriesAdapter;
use crate::adapters::fallback_adapter::FallbackDataAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::modifier_adapter::FixedModifier;
use crate::adapters::svg_report_adapter::SvgChartAdapter;
use crate::domain::backtest::{self as backtest_engine, BacktestConfig, DEFAULT_STARTING_CASH};
use crate::domain::config_validation::{self, validate_backtest_config, validate_strategy_config};
use crate::domain::error::StartraderError;
use crate::domain::modifier::Modifier;
use crate::domain::natal_chart::{DEFAULT_BIRTH_YEAR, NatalChart};
use crate::domain::portfolio::FillKind;
use crate::domain::report::ReportData;
use crate::domain::signal::{self, Signal};
use crate::domain::trading_day::{TradingDay, validate_series};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::modifier_port::ModifierPort;
use crate::ports::report_port::ReportPort;

/// Length of the default backtest window ending at `end_date`.
pub const DEFAULT_WINDOW_DAYS: i64 = 365;

#[derive(Parser, Debug)]
#[command(name = "startrader", about = "Star-transformation strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Command-line values that take precedence over the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct RunOverrides {
    #[arg(long)]
    pub symbol: Option<String>,
    #[arg(long)]
    pub birth_year: Option<i32>,
    /// prosperity, authority, status, taboo or none
    #[arg(long)]
    pub modifier: Option<String>,
    #[arg(long)]
    pub starting_cash: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest and write reports
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[command(flatten)]
        overrides: RunOverrides,
        /// SVG chart path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Annotated series CSV path
        #[arg(long)]
        series: Option<PathBuf>,
    },
    /// Print the per-day signal series without simulating
    Signals {
        #[arg(short, long)]
        config: PathBuf,
        #[command(flatten)]
        overrides: RunOverrides,
    },
    /// Show the modifier a birth year resolves to
    Modifier {
        #[arg(long, default_value_t = DEFAULT_BIRTH_YEAR)]
        birth_year: i32,
    },
    /// List the symbols available in the configured data directories
    Symbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            overrides,
            output,
            series,
        } => run_backtest(&config, &overrides, output.as_deref(), series.as_deref()),
        Command::Signals { config, overrides } => run_signals(&config, &overrides),
        Command::Modifier { birth_year } => run_modifier(birth_year),
        Command::Symbols { config } => run_symbols(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

fn fail(err: StartraderError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    tracing::info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path).map_err(fail)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn build_backtest_config(
    config: &dyn ConfigPort,
    overrides: &RunOverrides,
    today: NaiveDate,
) -> Result<BacktestConfig, StartraderError> {
    let symbol = overrides
        .symbol
        .clone()
        .or_else(|| config.get_string("backtest", "symbol"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| StartraderError::ConfigMissing {
            section: "backtest".into(),
            key: "symbol".into(),
        })?;

    let end_date = config.get_date("backtest", "end_date")?.unwrap_or(today);
    let start_date = match config.get_date("backtest", "start_date")? {
        Some(date) => date,
        None => end_date
            .checked_sub_signed(Duration::days(DEFAULT_WINDOW_DAYS))
            .ok_or_else(|| {
                StartraderError::config_invalid(
                    "backtest",
                    "end_date",
                    format!("no {DEFAULT_WINDOW_DAYS}-day window fits before {end_date}"),
                )
            })?,
    };
    if start_date >= end_date {
        return Err(StartraderError::config_invalid(
            "backtest",
            "start_date",
            "start_date must be before end_date",
        ));
    }

    let starting_cash = match overrides.starting_cash {
        Some(cash) => cash,
        None => config
            .get_double("backtest", "starting_cash")?
            .unwrap_or(DEFAULT_STARTING_CASH),
    };
    if !(starting_cash.is_finite() && starting_cash > 0.0) {
        return Err(StartraderError::config_invalid(
            "backtest",
            "starting_cash",
            "starting_cash must be positive",
        ));
    }

    Ok(BacktestConfig {
        symbol,
        start_date,
        end_date,
        starting_cash,
    })
}

/// Resolve the modifier source. Command-line values beat the file, and
/// within each a fixed modifier beats a birth year:
/// `--modifier`, `--birth-year`, `[strategy] modifier`,
/// `[strategy] birth_year`, then the default birth year.
pub fn build_modifier_source(
    config: &dyn ConfigPort,
    overrides: &RunOverrides,
) -> Result<Box<dyn ModifierPort>, StartraderError> {
    if let Some(raw) = &overrides.modifier {
        return fixed_modifier(raw);
    }
    if let Some(year) = overrides.birth_year {
        return Ok(Box::new(NatalChart::new(year)));
    }
    if let Some(raw) = config.get_string("strategy", "modifier") {
        return fixed_modifier(&raw);
    }
    let year = config_validation::birth_year(config)?.unwrap_or(DEFAULT_BIRTH_YEAR);
    Ok(Box::new(NatalChart::new(year)))
}

fn fixed_modifier(raw: &str) -> Result<Box<dyn ModifierPort>, StartraderError> {
    let modifier: Modifier = raw.parse()?;
    Ok(Box::new(FixedModifier(modifier)))
}

pub fn build_data_port(config: &dyn ConfigPort) -> Result<Box<dyn DataPort>, StartraderError> {
    let path = data_dir(config, "path").ok_or_else(|| StartraderError::ConfigMissing {
        section: "data".into(),
        key: "path".into(),
    })?;
    let primary: Box<dyn DataPort> = Box::new(CsvAdapter::new(path));

    match data_dir(config, "fallback_path") {
        Some(fallback) => Ok(Box::new(FallbackDataAdapter::new(
            primary,
            Box::new(CsvAdapter::new(fallback)),
        ))),
        None => Ok(primary),
    }
}

/// Fetch, score, simulate and shape the result for reporting.
pub fn run_pipeline(
    data_port: &dyn DataPort,
    modifier_port: &dyn ModifierPort,
    bt_config: &BacktestConfig,
) -> Result<ReportData, StartraderError> {
    let days = data_port.fetch_daily_series(
        &bt_config.symbol,
        bt_config.start_date,
        bt_config.end_date,
    )?;
    if days.is_empty() {
        return Err(StartraderError::NoData {
            symbol: bt_config.symbol.clone(),
            start: bt_config.start_date,
            end: bt_config.end_date,
        });
    }

    let modifier = modifier_port.modifier();
    tracing::info!(
        symbol = %bt_config.symbol,
        days = days.len(),
        %modifier,
        "running backtest"
    );

    let signals = signal::build_signals(&days, modifier);
    let result = backtest_engine::run_backtest(&days, &signals, bt_config.starting_cash)?;

    Ok(ReportData {
        symbol: bt_config.symbol.clone(),
        birth_year: modifier_port.birth_year(),
        modifier,
        start_date: bt_config.start_date,
        end_date: bt_config.end_date,
        result,
    })
}

pub fn print_summary(report: &ReportData) {
    let result = &report.result;
    eprintln!("\n=== {} ===", report.title());
    eprintln!("Window:         {} to {}", report.start_date, report.end_date);
    match report.birth_year {
        Some(year) => eprintln!("Modifier:       {} (birth year {})", report.modifier, year),
        None => eprintln!("Modifier:       {}", report.modifier),
    }
    eprintln!("Trading days:   {}", result.series.len());
    eprintln!(
        "Signals:        {} buy, {} sell, {} hold",
        result.signal_count(Signal::Buy),
        result.signal_count(Signal::Sell),
        result.signal_count(Signal::Hold)
    );
    eprintln!("Fills:          {}", result.fills.len());
    for fill in &result.fills {
        let kind = match fill.kind {
            FillKind::Buy => "BUY ",
            FillKind::Sell => "SELL",
            FillKind::Liquidation => "LIQ ",
        };
        eprintln!(
            "  {} {} {} @ {:.2}  cash {:.2}",
            fill.date, kind, fill.shares, fill.price, fill.cash_after
        );
    }
    eprintln!("Starting cash:  {:.2}", result.starting_cash);
    eprintln!("Final cash:     {:.2}", result.final_cash);
    eprintln!("ROI:            {:.2}%", result.roi);
}

pub fn write_reports(
    report: &ReportData,
    chart_path: &Path,
    series_path: Option<&Path>,
) -> Result<(), StartraderError> {
    SvgChartAdapter::new().write(report, chart_path)?;
    tracing::info!(path = %chart_path.display(), "chart written");
    if let Some(path) = series_path {
        CsvSeriesAdapter::new().write(report, path)?;
        tracing::info!(path = %path.display(), "series written");
    }
    Ok(())
}

fn run_backtest(
    config_path: &Path,
    overrides: &RunOverrides,
    output_path: Option<&Path>,
    series_path: Option<&Path>,
) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let report = match prepare(&adapter, overrides)
        .and_then(|(data, modifier, bt)| run_pipeline(data.as_ref(), modifier.as_ref(), &bt))
    {
        Ok(r) => r,
        Err(e) => return fail(e),
    };

    print_summary(&report);

    let chart_path = output_path.map(Path::to_path_buf).unwrap_or_else(|| {
        PathBuf::from(
            adapter
                .get_string("report", "chart_path")
                .unwrap_or_else(|| "report.svg".to_string()),
        )
    });
    let series_path = series_path
        .map(Path::to_path_buf)
        .or_else(|| adapter.get_string("report", "series_path").map(PathBuf::from));

    match write_reports(&report, &chart_path, series_path.as_deref()) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", chart_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

type Prepared = (Box<dyn DataPort>, Box<dyn ModifierPort>, BacktestConfig);

fn prepare(adapter: &FileConfigAdapter, overrides: &RunOverrides) -> Result<Prepared, StartraderError> {
    validate_strategy_config(adapter)?;
    let bt_config = build_backtest_config(adapter, overrides, today())?;
    let modifier = build_modifier_source(adapter, overrides)?;
    let data_port = build_data_port(adapter)?;
    Ok((data_port, modifier, bt_config))
}

fn run_signals(config_path: &Path, overrides: &RunOverrides) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let result = prepare(&adapter, overrides).and_then(|(data_port, modifier_port, bt_config)| {
        let days = data_port.fetch_daily_series(
            &bt_config.symbol,
            bt_config.start_date,
            bt_config.end_date,
        )?;
        validate_series(&days)?;
        let modifier = modifier_port.modifier();
        eprintln!("Modifier: {} ({} days)", modifier, days.len());
        write_signal_table(&mut std::io::stdout().lock(), &days, modifier)?;
        Ok(())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

/// `date,open,close,score,signal` rows, one per day.
pub fn write_signal_table<W: Write>(
    out: &mut W,
    days: &[TradingDay],
    modifier: Modifier,
) -> std::io::Result<()> {
    writeln!(out, "date,open,close,score,signal")?;
    for day in days {
        writeln!(
            out,
            "{},{},{},{},{}",
            day.date,
            day.open,
            day.close,
            signal::total_score(day.date, modifier),
            signal::score(day.date, modifier)
        )?;
    }
    Ok(())
}

/// Symbols available under `[data] path` and `[data] fallback_path`.
pub fn list_symbols(config: &dyn ConfigPort) -> Result<Vec<String>, StartraderError> {
    let primary = data_dir(config, "path").ok_or_else(|| StartraderError::ConfigMissing {
        section: "data".into(),
        key: "path".into(),
    })?;
    let mut symbols = CsvAdapter::new(primary).list_symbols()?;
    if let Some(fallback) = data_dir(config, "fallback_path") {
        symbols.extend(CsvAdapter::new(fallback).list_symbols()?);
    }
    symbols.sort();
    symbols.dedup();
    Ok(symbols)
}

fn data_dir(config: &dyn ConfigPort, key: &str) -> Option<PathBuf> {
    config
        .get_string("data", key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

fn run_symbols(config_path: &Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match list_symbols(&adapter) {
        Ok(symbols) => {
            for symbol in &symbols {
                println!("{symbol}");
            }
            eprintln!("{} symbols", symbols.len());
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_modifier(birth_year: i32) -> ExitCode {
    let chart = NatalChart::new(birth_year);
    println!("birth year:      {}", birth_year);
    println!("heavenly stem:   {}", chart.stem());
    println!("finance star:    {}", chart.finance_star());
    match chart.finance_transformation() {
        Some(t) => println!("transformation:  {}", t),
        None => println!("transformation:  -"),
    }
    println!("modifier:        {}", chart.modifier());
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        return fail(e);
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        return fail(e);
    }

    let overrides = RunOverrides::default();
    let bt_config = match build_backtest_config(&adapter, &overrides, today()) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };
    let modifier = match build_modifier_source(&adapter, &overrides) {
        Ok(m) => m,
        Err(e) => return fail(e),
    };

    eprintln!("\nSymbol:         {}", bt_config.symbol);
    eprintln!(
        "Window:         {} to {}",
        bt_config.start_date, bt_config.end_date
    );
    eprintln!("Starting cash:  {:.2}", bt_config.starting_cash);
    match modifier.birth_year() {
        Some(year) => eprintln!("Modifier:       {} (birth year {})", modifier.modifier(), year),
        None => eprintln!("Modifier:       {}", modifier.modifier()),
    }
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
