use crate::{BIRTHS, DATE, DAY_OF_YEAR, MONTH, WDAY};
use log::{debug, info};
use polars::prelude::*;

/// Aggregate the birthdays table by day.
///
/// Rows are grouped by `(date, wday, day_of_year)`, where `day_of_year` is
/// derived from `date`. Births are summed per group and `month` is the first
/// non-null month seen in input order. The result is sorted by the group key
/// and has the columns `date, wday, day_of_year, births, month`.
///
/// Rows with a null `date` or `wday` are dropped. Missing columns or a
/// non-temporal `date` column surface as the polars error at collect time.
pub fn clean_lazy(frame: LazyFrame) -> LazyFrame {
    frame
        .filter(col(DATE).is_not_null().and(col(WDAY).is_not_null()))
        .with_column(
            col(DATE)
                .dt()
                .ordinal_day()
                .cast(DataType::Int32)
                .alias(DAY_OF_YEAR),
        )
        .group_by([col(DATE), col(WDAY), col(DAY_OF_YEAR)])
        .agg([
            col(BIRTHS).cast(DataType::Int64).sum(),
            col(MONTH).drop_nulls().first(),
        ])
        .sort([DATE, WDAY, DAY_OF_YEAR], SortMultipleOptions::default())
        .select([
            col(DATE),
            col(WDAY),
            col(DAY_OF_YEAR),
            col(BIRTHS),
            col(MONTH),
        ])
}

/// Eager form of [`clean_lazy`].
pub fn clean_dataset(frame: DataFrame) -> PolarsResult<DataFrame> {
    let input_rows = frame.height();
    debug!("clean_dataset input rows: {}", input_rows);
    let df = clean_lazy(frame.lazy()).collect()?;
    info!(
        "clean_dataset done, {} rows -> {} days",
        input_rows,
        df.height()
    );
    Ok(df)
}
