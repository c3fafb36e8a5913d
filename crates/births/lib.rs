pub mod clean;
pub mod record;
pub mod source;

pub use clean::{clean_dataset, clean_lazy};
pub use record::{read_records, BirthRecord, BirthRecordVec, DailyBirths};
pub use source::{filter_by_date, load_df_from_csv, rename_columns, FilterOptions};

pub const DATE: &str = "date";
pub const WDAY: &str = "wday";
pub const MONTH: &str = "month";
pub const BIRTHS: &str = "births";
pub const DAY_OF_YEAR: &str = "day_of_year";
