//! Reading whitespace-delimited cocktail tables and writing range sums.
use std::fs;
use std::io;
use std::io::prelude::*;
use std::path;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::TableError;
use crate::histogram::{CocktailRow, Histogram};
use crate::ranges::RangeSums;

/// Columns required per row: center, value, half-width, stat. error, syst. error
pub const REQUIRED_COLUMNS: usize = 5;

fn parse_float(token: &str, line: usize) -> Result<f64, TableError> {
    token.parse::<f64>().map_err(|_| TableError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

fn parse_decimal(token: &str, line: usize) -> Result<Decimal, TableError> {
    Decimal::from_str(token)
        .or_else(|_| Decimal::from_scientific(token))
        .map_err(|source| TableError::InvalidDecimal { line, source })
}

/// Parse one line of a table, returning `None` for blank and comment lines.
/// Columns past the fifth are ignored.
pub fn parse_row(text: &str, line: usize) -> Result<Option<CocktailRow>, TableError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < REQUIRED_COLUMNS {
        return Err(TableError::MissingColumns {
            line,
            expected: REQUIRED_COLUMNS,
            found: tokens.len(),
        });
    }
    Ok(Some(CocktailRow::new(
        parse_decimal(tokens[0], line)?,
        parse_float(tokens[1], line)?,
        parse_decimal(tokens[2], line)?,
        parse_float(tokens[3], line)?,
        parse_float(tokens[4], line)?,
    )))
}

pub fn rows_from_reader<R: io::Read>(reader: R) -> Result<Vec<CocktailRow>, TableError> {
    let reader = io::BufReader::new(reader);
    let mut rows = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(row) = parse_row(&line, i + 1)? {
            rows.push(row);
        }
    }
    Ok(rows)
}

pub fn rows_from_file<P: AsRef<path::Path>>(path: P) -> Result<Vec<CocktailRow>, TableError> {
    let file = fs::File::open(path)?;
    rows_from_reader(file)
}

/// Read a cocktail table and build its [`Histogram`], combining the statistical and
/// systematic uncertainties of each row.
pub fn histogram_from_reader<R: io::Read>(reader: R) -> Result<Histogram, TableError> {
    let rows = rows_from_reader(reader)?;
    Ok(Histogram::from_rows(&rows)?)
}

pub fn histogram_from_file<P: AsRef<path::Path>>(path: P) -> Result<Histogram, TableError> {
    let rows = rows_from_file(path)?;
    Ok(Histogram::from_rows(&rows)?)
}

/// Write `sums` as tab separated `label value uncertainty` lines. A single
/// unlabeled sum is written under `single_label`.
pub fn sums_to_writer<W: io::Write>(
    sums: &RangeSums,
    single_label: &str,
    writer: &mut W,
) -> io::Result<()> {
    match sums {
        RangeSums::Single(sum) => {
            writer.write_all(format!("{}\t{}\t{}\n", single_label, sum.value, sum.uncertainty).as_bytes())?;
        }
        RangeSums::Labeled(entries) => {
            for (label, sum) in entries.iter() {
                writer.write_all(format!("{}\t{}\t{}\n", label, sum.value, sum.uncertainty).as_bytes())?;
            }
        }
    }
    Ok(())
}

pub fn sums_to_file<P: AsRef<path::Path>>(
    sums: &RangeSums,
    single_label: &str,
    path: P,
) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    sums_to_writer(sums, single_label, &mut writer)?;
    writer.flush()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::measurement::Measurement;

    const TABLE: &str = "# center value halfwidth stat syst
0.05 10 0.05 0.3 0.4
0.15 20 0.05 0.6 0.8 ignored

0.25 30 0.05 0 0
";

    #[test]
    fn test_parse_table() {
        let rows = rows_from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].center, Decimal::from_str("0.15").unwrap());
        assert_eq!(rows[1].syst_error, 0.8);

        let hist = histogram_from_reader(TABLE.as_bytes()).unwrap();
        let edges: Vec<String> = hist.edges().iter().map(|e| e.normalize().to_string()).collect();
        assert_eq!(edges, vec!["0", "0.1", "0.2", "0.3"]);
        let bin = hist.bin(1).unwrap();
        assert!((bin.value - 2.0).abs() < 1e-12);
        assert!((bin.uncertainty - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_scientific_notation() {
        let row = parse_row("5e-2 1.5e1 5e-2 0 0", 1).unwrap().unwrap();
        assert_eq!(row.center, Decimal::from_str("0.05").unwrap());
        assert_eq!(row.value, 15.0);
    }

    #[test]
    fn test_bad_rows() {
        assert!(matches!(
            parse_row("0.05 10 0.05 0.3", 7),
            Err(TableError::MissingColumns { line: 7, expected: 5, found: 4 })
        ));
        assert!(matches!(
            parse_row("0.05 ten 0.05 0.3 0.1", 2),
            Err(TableError::InvalidNumber { line: 2, .. })
        ));
        assert!(matches!(
            parse_row("x 1 0.05 0.3 0.1", 3),
            Err(TableError::InvalidDecimal { line: 3, .. })
        ));
        assert!(matches!(
            histogram_from_reader("# nothing here\n".as_bytes()),
            Err(TableError::InvalidHistogram(_))
        ));
    }

    #[test]
    fn test_write_sums() -> io::Result<()> {
        let sums = RangeSums::Labeled(vec![
            ("pi0".to_string(), Measurement::new(1.5, 0.5)),
            ("LMR".to_string(), Measurement::new(2.0, 0.25)),
        ]);
        let mut buf = Vec::new();
        sums_to_writer(&sums, "sum", &mut buf)?;
        assert_eq!(String::from_utf8(buf).unwrap(), "pi0\t1.5\t0.5\nLMR\t2\t0.25\n");

        let mut buf = Vec::new();
        sums_to_writer(&RangeSums::Single(Measurement::exact(3.0)), "LMR", &mut buf)?;
        assert_eq!(String::from_utf8(buf).unwrap(), "LMR\t3\t0\n");
        Ok(())
    }
}
