use std::collections::HashMap;
use std::ops::Index;

use crate::bar::price_bar::PriceBar;
use crate::common::{
    enums::DataField,
    td_exception::{ErrCode, TdException},
    time::Time,
};

/// Ordered bar series, timestamps strictly increasing
#[derive(Debug, Clone, Default)]
pub struct BarList {
    lst: Vec<PriceBar>,
}

impl BarList {
    pub fn new() -> Self {
        Self { lst: Vec::new() }
    }

    pub fn from_bars(bars: Vec<PriceBar>) -> Result<Self, TdException> {
        let mut list = Self {
            lst: Vec::with_capacity(bars.len()),
        };
        for bar in bars {
            list.add_bar(bar)?;
        }
        Ok(list)
    }

    /// Build from columns, e.g. a loaded DataFrame.
    ///
    /// Every field in `required` (and `close`) must be present, and every column
    /// must be as long as `times`.
    pub fn from_columns(
        times: &[Time],
        columns: &HashMap<DataField, Vec<f64>>,
        required: &[DataField],
    ) -> Result<Self, TdException> {
        for (field, col) in columns {
            if col.len() != times.len() {
                return Err(TdException::new(
                    format!("series {} has {} rows, expected {}", field, col.len(), times.len()),
                    ErrCode::KlDataNotAlign,
                ));
            }
        }

        let mut list = Self {
            lst: Vec::with_capacity(times.len()),
        };
        let mut row = HashMap::with_capacity(columns.len());
        for (i, time) in times.iter().enumerate() {
            row.clear();
            for (field, col) in columns {
                row.insert(*field, col[i]);
            }
            list.add_bar(PriceBar::from_dict(*time, &row, required)?)?;
        }

        // an empty series still has to name its required columns
        if times.is_empty() {
            for field in std::iter::once(&DataField::Close).chain(required.iter()) {
                if *field != DataField::Time && !columns.contains_key(field) {
                    return Err(TdException::new(
                        format!("missing required series: {}", field),
                        ErrCode::SrcDataNotFound,
                    ));
                }
            }
        }
        Ok(list)
    }

    /// Append one bar; it must come strictly after the last one
    pub fn add_bar(&mut self, bar: PriceBar) -> Result<(), TdException> {
        if let Some(last) = self.lst.last() {
            if bar.time <= last.time {
                return Err(TdException::new(
                    format!("kline time err, cur={}, last={}", bar.time, last.time),
                    ErrCode::KlNotMonotonous,
                ));
            }
        }
        self.lst.push(bar);
        Ok(())
    }

    /// Run the OHLC consistency check over every bar
    pub fn check(&mut self, autofix: bool) -> Result<(), TdException> {
        for bar in self.lst.iter_mut() {
            bar.check(autofix)?;
        }
        Ok(())
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.lst
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceBar> {
        self.lst.iter()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.lst.last()
    }

    pub fn len(&self) -> usize {
        self.lst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lst.is_empty()
    }

    /// First `len` bars as a new list
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            lst: self.lst[..len.min(self.lst.len())].to_vec(),
        }
    }

    pub fn closes(&self) -> Vec<f64> {
        self.lst.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.lst.iter().map(|b| b.volume).collect()
    }
}

impl Index<usize> for BarList {
    type Output = PriceBar;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lst[index]
    }
}

impl<'a> IntoIterator for &'a BarList {
    type Item = &'a PriceBar;
    type IntoIter = std::slice::Iter<'a, PriceBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.lst.iter()
    }
}
