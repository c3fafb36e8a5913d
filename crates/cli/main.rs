use births::{clean_lazy, filter_by_date, load_df_from_csv, rename_columns, FilterOptions};
use config::{Config, DEFAULT_CONFIG_FILE};

use chrono::NaiveDate;
use clap::builder::PossibleValuesParser;
use clap::Parser;
use env_logger::Env;
use polars::prelude::*;
use std::error::Error;
use std::fs::File;
use std::time;

use log::{debug, error, info};

enum OutputType {
    CSV,
    TABLE,
    POLAR,
}

impl OutputType {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "csv" => Some(OutputType::CSV),
            "table" => Some(OutputType::TABLE),
            "polar" => Some(OutputType::POLAR),
            _ => None,
        }
    }
}

trait Output {
    fn output(&self) -> Result<(), Box<dyn Error>>;
}

struct PolarOutput {
    df: DataFrame,
}

impl PolarOutput {
    fn new(df: DataFrame) -> Self {
        PolarOutput { df }
    }
}

impl Output for PolarOutput {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        println!("{}", self.df);
        Ok(())
    }
}

struct CsvOutput {
    filename: String,
    df: DataFrame,
}

impl CsvOutput {
    fn new(filename: String, df: DataFrame) -> Self {
        CsvOutput { filename, df }
    }
}

impl Output for CsvOutput {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        let mut file = File::create(&self.filename)?;
        let mut m_df = self.df.clone();
        CsvWriter::new(&mut file).finish(&mut m_df)?;
        info!("CSV file written successfully: {}", self.filename);
        Ok(())
    }
}

struct TableOutput {
    df: DataFrame,
}

impl TableOutput {
    fn new(df: DataFrame) -> Self {
        TableOutput { df }
    }
}

impl Output for TableOutput {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        let rows = ui::data::rows_from_df(&self.df)?;
        ui::tui::run(rows)
    }
}

fn get_output(output_type: OutputType, report: String, df: DataFrame) -> Box<dyn Output> {
    match output_type {
        OutputType::TABLE => Box::new(TableOutput::new(df)),
        OutputType::CSV => Box::new(CsvOutput::new(report, df)),
        OutputType::POLAR => Box::new(PolarOutput::new(df)),
    }
}

/// Aggregate a birthdays CSV by day
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(
        short = 'F',
        long = "format",
        value_parser = PossibleValuesParser::new(["csv", "table", "polar"]),
        help = "output format, defaults to the config value or polar"
    )]
    format: Option<String>,

    #[arg(long = "source", help = "birthdays csv file, overrides config source")]
    source: Option<String>,

    #[arg(long = "report", help = "csv file written by --format csv")]
    report: Option<String>,

    #[arg(long = "config", default_value = DEFAULT_CONFIG_FILE, help = "config file")]
    config: String,

    /// since date
    #[arg(long = "since", value_parser = parse_date, help = "since date, 2020-01-01")]
    since: Option<NaiveDate>,

    /// until date
    #[arg(long = "until", value_parser = parse_date, help = "until date, 2020-12-31")]
    until: Option<NaiveDate>,
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        error!("parse date err: {}", e);
        e
    })
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let conf = Config::load_or_default(&args.config)?;
    debug!("config: {:?}", conf);

    let source = match args.source.as_deref().or(conf.source()) {
        Some(source) => source.to_string(),
        None => return Err("no source csv, use --source or set `source` in config".into()),
    };
    let format = args.format.unwrap_or(conf.output.clone());
    let out_type = OutputType::from_str(&format)
        .ok_or_else(|| format!("unknown output format: {}", format))?;
    let report = args.report.unwrap_or(conf.report.clone());

    let start = time::Instant::now();
    let mut df = load_df_from_csv(&source)?;
    rename_columns(&mut df, &conf.columns)?;

    let filter_options = FilterOptions {
        since: args.since,
        until: args.until,
    };
    debug!("filter options: {:?}", filter_options);
    let daily = clean_lazy(filter_by_date(df.lazy(), &filter_options)).collect()?;
    info!(
        "aggregated {} days from {}, cost {}ms",
        daily.height(),
        source,
        start.elapsed().as_millis()
    );

    get_output(out_type, report, daily).output()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run(args).map_err(|e| {
        error!("birthdays failed: {}", e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2020-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()
        );
        assert!(parse_date("2020/02/29").is_err());
    }

    #[test]
    fn test_args() {
        let args = Args::parse_from([
            "birthdays",
            "-F",
            "csv",
            "--source",
            "births.csv",
            "--since",
            "2020-01-01",
        ]);
        assert_eq!(args.format.as_deref(), Some("csv"));
        assert_eq!(args.source.as_deref(), Some("births.csv"));
        assert_eq!(args.config, DEFAULT_CONFIG_FILE);
        assert_eq!(args.since, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(args.until, None);
        assert!(Args::try_parse_from(["birthdays", "-F", "xml"]).is_err());
    }

    #[test]
    fn test_output_type() {
        assert!(matches!(OutputType::from_str("csv"), Some(OutputType::CSV)));
        assert!(matches!(OutputType::from_str("table"), Some(OutputType::TABLE)));
        assert!(matches!(OutputType::from_str("polar"), Some(OutputType::POLAR)));
        assert!(OutputType::from_str("json").is_none());
    }

    #[test]
    fn test_run_writes_csv_report() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("births.csv");
        let conf = dir.path().join("birthdays.yml");
        let report = dir.path().join("daily.csv");
        std::fs::write(
            &source,
            "Date,wday,month,births
2020-01-01,Wed,Jan,3
2020-01-02,Thu,Jan,4
2020-01-01,Wed,January,5
2020-02-01,Sat,Feb,1
",
        )
        .unwrap();
        std::fs::write(
            &conf,
            format!(
                "source: {}\noutput: polar\ncolumns:\n  Date: date\n",
                source.display()
            ),
        )
        .unwrap();

        let args = Args::parse_from([
            "birthdays".to_string(),
            "--config".to_string(),
            conf.display().to_string(),
            "-F".to_string(),
            "csv".to_string(),
            "--report".to_string(),
            report.display().to_string(),
            "--until".to_string(),
            "2020-01-31".to_string(),
        ]);
        run(args).unwrap();

        let content = std::fs::read_to_string(&report).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "date,wday,day_of_year,births,month",
                "2020-01-01,Wed,1,8,Jan",
                "2020-01-02,Thu,2,4,Jan",
            ]
        );
    }

    #[test]
    fn test_run_without_source() {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("missing.yml");
        let args = Args::parse_from([
            "birthdays".to_string(),
            "--config".to_string(),
            conf.display().to_string(),
        ]);
        assert!(run(args).is_err());
    }
}
