use std::env;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::{ArgGroup, Parser};
use log::{info, LevelFilter};
use rust_decimal::Decimal;

use cocktailsum::labels::{MASS_TITLES, LMR_INDEX};
use cocktailsum::text::{histogram_from_file, sums_to_file, sums_to_writer};
use cocktailsum::{default_boundaries, summarize_ranges, RangeMode, WorkDirs};

/// Sum a cocktail table over mass ranges
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").args(["lmr", "single", "syst"]).multiple(false)))]
struct Cli {
    /// Cocktail table: center, value, half-width, stat. error, syst. error per row
    table: PathBuf,
    /// Only sum the low mass range
    #[arg(long)]
    lmr: bool,
    /// Only sum the range with this index
    #[arg(long, value_name = "INDEX")]
    single: Option<usize>,
    /// Sweep the low mass range boundaries for a systematic study
    #[arg(long)]
    syst: bool,
    /// Comma separated range boundaries, replacing the default mass ranges
    #[arg(long, value_name = "EDGES", value_delimiter = ',', value_parser = parse_decimal)]
    ranges: Option<Vec<Decimal>>,
    /// Appended to every label
    #[arg(long, default_value = "")]
    suffix: String,
    /// Read the table from this directory
    #[arg(long, value_name = "DIR", requires = "output_dir")]
    input_dir: Option<PathBuf>,
    /// Write the sums to this directory instead of stdout
    #[arg(long, value_name = "DIR", requires = "input_dir")]
    output_dir: Option<PathBuf>,
    /// Show debug log output
    #[arg(long)]
    log: bool,
}

fn parse_decimal(text: &str) -> Result<Decimal, rust_decimal::Error> {
    Decimal::from_str(text.trim())
}

impl Cli {
    fn mode(&self) -> RangeMode {
        if self.lmr {
            RangeMode::lmr_only()
        } else if self.syst {
            RangeMode::lmr_sweep()
        } else if let Some(index) = self.single {
            RangeMode::SingleRange(index)
        } else {
            RangeMode::AllRanges
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mode = cli.mode();
    let dirs = match (&cli.input_dir, &cli.output_dir) {
        (Some(input), Some(output)) => Some(WorkDirs::new(input, output)?),
        _ => None,
    };
    let table_path = match &dirs {
        Some(dirs) => dirs.input_path(&cli.table),
        None => cli.table.clone(),
    };

    info!("Reading {}", table_path.display());
    let histogram = histogram_from_file(&table_path)?;
    info!(
        "Loaded {} bins over [{}, {}]",
        histogram.len(),
        histogram.first_edge(),
        histogram.last_edge()
    );

    let boundaries = cli.ranges.unwrap_or_else(default_boundaries);
    let sums = summarize_ranges(&histogram, &boundaries, &mode, &cli.suffix)?;

    let single_label = match mode {
        RangeMode::SingleRange(index) => MASS_TITLES.get(index).copied().unwrap_or("range"),
        _ => MASS_TITLES[LMR_INDEX],
    };
    let single_label = format!("{single_label}{}", cli.suffix);

    match dirs {
        Some(dirs) => {
            let stem = cli
                .table
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "cocktail".to_string());
            let out = dirs.output_path(format!("{stem}_sums.txt"));
            sums_to_file(&sums, &single_label, &out)?;
            info!("Wrote {} sums to {}", sums.len(), out.display());
        }
        None => sums_to_writer(&sums, &single_label, &mut io::stdout().lock())?,
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log);
    if let Err(err) = run(cli) {
        log::error!("{err}");
        eprintln!("{err}");
        process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("cocktailsum").chain(args.iter().copied()))
    }

    #[test]
    fn test_command() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_modes_are_exclusive() {
        let err = parse(&["cocktail.dat", "--lmr", "--syst"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
        assert!(parse(&["cocktail.dat", "--single", "2", "--lmr"]).is_err());
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(parse(&["cocktail.dat"]).unwrap().mode(), RangeMode::AllRanges);
        assert_eq!(parse(&["cocktail.dat", "--lmr"]).unwrap().mode(), RangeMode::lmr_only());
        assert_eq!(parse(&["cocktail.dat", "--syst"]).unwrap().mode(), RangeMode::lmr_sweep());
        assert_eq!(
            parse(&["cocktail.dat", "--single", "3"]).unwrap().mode(),
            RangeMode::SingleRange(3)
        );
    }

    #[test]
    fn test_ranges_and_dirs() {
        let cli = parse(&["cocktail.dat", "--ranges", "0,0.2, 1.5", "--suffix", "_39"]).unwrap();
        let expected: Vec<Decimal> = ["0", "0.2", "1.5"]
            .iter()
            .map(|s| Decimal::from_str(s).unwrap())
            .collect();
        assert_eq!(cli.ranges, Some(expected));
        assert_eq!(cli.suffix, "_39");

        assert!(parse(&["cocktail.dat", "--ranges", "0,x"]).is_err());
        assert!(parse(&["cocktail.dat", "--input-dir", "in"]).is_err());
        let cli = parse(&["cocktail.dat", "--input-dir", "in", "--output-dir", "out"]).unwrap();
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
    }
}
