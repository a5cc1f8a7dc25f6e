//! CSV report of analysed sets and per-year averages

use brick_common::{round_to, BrickResult, CatalogYear, SetRecord};
use csv::WriterBuilder;
use std::io::Write;
use std::path::{Path, PathBuf};

const SET_HEADERS: [&str; 9] = [
    "Year", "Set ID", "Name", "MSRP", "Price", "Pieces", "Grams", "per/gram", "per/piece",
];
const SUMMARY_HEADERS: [&str; 3] = ["Year", "Avg per/gram", "Avg per/piece"];

/// Averages of the positive per-gram and per-piece prices of one year
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: CatalogYear,
    pub avg_per_gram: f64,
    pub avg_per_piece: f64,
}

pub fn summarize(years: &[Vec<SetRecord>]) -> Vec<YearSummary> {
    years
        .iter()
        .filter_map(|sets| {
            let year = sets.first()?.year;
            Some(YearSummary {
                year,
                avg_per_gram: positive_mean(sets.iter().map(SetRecord::price_per_gram)),
                avg_per_piece: positive_mean(sets.iter().map(SetRecord::price_per_piece)),
            })
        })
        .collect()
}

/// Mean of the values above zero, one decimal; zero if there are none
fn positive_mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .filter(|v| *v > 0.0)
        .fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        round_to(sum / count as f64, 1)
    }
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// One row per set, years in order
pub fn write_sets<W: Write>(writer: W, years: &[Vec<SetRecord>]) -> BrickResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    wtr.write_record(SET_HEADERS)?;

    for set in years.iter().flatten() {
        wtr.write_record([
            set.year.to_string(),
            set.set_id.clone(),
            set.name.clone(),
            optional(set.msrp),
            optional(set.price),
            set.pieces.to_string(),
            set.weight.to_string(),
            set.price_per_gram().to_string(),
            set.price_per_piece().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_summary<W: Write>(writer: W, years: &[Vec<SetRecord>]) -> BrickResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    wtr.write_record(SUMMARY_HEADERS)?;

    for summary in summarize(years) {
        wtr.write_record([
            summary.year.to_string(),
            summary.avg_per_gram.to_string(),
            summary.avg_per_piece.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// `sets.csv` -> `sets_summary.csv`
pub fn summary_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "report".to_string());
    output.with_file_name(format!("{}_summary.csv", stem))
}

/// Write the set report to `output` and the yearly summary next to it
pub fn write_report(output: &Path, years: &[Vec<SetRecord>]) -> BrickResult<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    write_sets(std::fs::File::create(output)?, years)?;
    let summary = summary_path(output);
    write_summary(std::fs::File::create(&summary)?, years)?;

    log::info!(
        "Report saved to {} ({} sets), summary to {}",
        output.display(),
        years.iter().map(Vec::len).sum::<usize>(),
        summary.display()
    );
    Ok(())
}
