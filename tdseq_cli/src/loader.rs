use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tdseq_core::common::{enums::DataField, time::Time};
use tdseq_core::{BarList, ErrCode, PriceBar, TdException};
use tracing::{debug, warn};

/// CSV files to process: the file itself, or every `.csv` directly under a directory
pub fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(input).with_context(|| format!("reading {}", input.display()))? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }
    if files.is_empty() {
        let msg = format!("no csv files in {}", input.display());
        return Err(TdException::new(msg, ErrCode::CommonError).into());
    }
    files.sort();
    Ok(files)
}

pub fn load_csv_file(path: &Path, required: &[DataField]) -> Result<BarList> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    load_csv(file, required).with_context(|| format!("loading {}", path.display()))
}

/// Read OHLCV rows, sorted by time.
///
/// Headers are matched case-insensitively and unknown columns are ignored.
/// Empty cells load as NaN.
pub fn load_csv<R: Read>(reader: R, required: &[DataField]) -> Result<BarList> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let fields: Vec<Option<DataField>> =
        rdr.headers()?.iter().map(DataField::from_header).collect();

    let mut columns: HashMap<DataField, usize> = HashMap::new();
    for (idx, field) in fields.iter().enumerate() {
        if let Some(field) = field {
            columns.entry(*field).or_insert(idx);
        }
    }
    let time_idx = *columns
        .get(&DataField::Time)
        .ok_or_else(|| TdException::new("missing time column", ErrCode::SrcDataNotFound))?;
    for (header, field) in rdr.headers()?.iter().zip(&fields) {
        if field.is_none() {
            debug!(header, "ignoring column");
        }
    }

    let mut bars = Vec::new();
    let mut row = HashMap::with_capacity(columns.len());
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let time: Time = record.get(time_idx).unwrap_or_default().parse()?;
        row.clear();
        for (field, idx) in &columns {
            if *field == DataField::Time {
                continue;
            }
            let raw = record.get(*idx).unwrap_or_default();
            // a blank cell in an existing column is a missing value, not a missing series
            let value = if raw.is_empty() {
                f64::NAN
            } else {
                raw.parse().map_err(|_| {
                    TdException::new(
                        format!("row {}: {}={} is not a number", line + 1, field, raw),
                        ErrCode::SrcDataTypeErr,
                    )
                })?
            };
            row.insert(*field, value);
        }
        bars.push(PriceBar::from_dict(time, &row, required)?);
    }

    if bars.is_empty() {
        return Err(TdException::new("no rows", ErrCode::NoData).into());
    }
    if bars.windows(2).any(|w| w[0].time > w[1].time) {
        warn!("rows not in time order, sorting");
        bars.sort_by_key(|b| b.time);
    }
    Ok(BarList::from_bars(bars)?)
}
