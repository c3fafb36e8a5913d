use crate::DATE;
use chrono::NaiveDate;
use log::{debug, info};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Load a birthdays CSV (header row, dates parsed) into a dataframe.
pub fn load_df_from_csv<P: AsRef<Path>>(filename: P) -> PolarsResult<DataFrame> {
    info!("load csv: {:?}", filename.as_ref());
    let df = LazyCsvReader::new(filename.as_ref())
        .with_try_parse_dates(true)
        .with_has_header(true)
        .finish()?
        .collect()?;
    debug!("loaded {} rows, schema {:?}", df.height(), df.schema());
    Ok(df)
}

/// Rename source headers to their canonical names in one pass, so swaps
/// resolve the same way whatever the alias order. Aliases for headers that
/// are not in the frame are skipped; a rename that collides with another
/// column is a `Duplicate` error.
pub fn rename_columns(
    df: &mut DataFrame,
    aliases: &HashMap<String, String>,
) -> PolarsResult<()> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| match aliases.get(name) {
            Some(to) => {
                debug!("rename column: {} -> {}", name, to);
                to.clone()
            }
            None => name.to_string(),
        })
        .collect();
    df.set_column_names(&names)
}

#[derive(Debug, Default, Clone)]
pub struct FilterOptions {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl FilterOptions {
    pub fn is_empty(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }
}

/// Keep rows whose calendar day is within `since..=until`; unset bounds are
/// open. Datetime columns compare on their date part.
pub fn filter_by_date(frame: LazyFrame, options: &FilterOptions) -> LazyFrame {
    if options.is_empty() {
        return frame;
    }
    let day = col(DATE).cast(DataType::Date);
    let mut filter_expr = lit(true);
    if let Some(since) = options.since {
        filter_expr = filter_expr.and(day.clone().gt_eq(lit(since).cast(DataType::Date)));
    }
    if let Some(until) = options.until {
        filter_expr = filter_expr.and(day.lt_eq(lit(until).cast(DataType::Date)));
    }
    frame.filter(filter_expr)
}
