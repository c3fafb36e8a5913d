use crate::{BIRTHS, DATE, MONTH, WDAY};
use chrono::{Datelike, NaiveDate};
use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One row of the birthdays dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthRecord {
    pub date: NaiveDate,
    pub wday: String,
    pub month: String,
    pub births: i64,
}

impl BirthRecord {
    pub fn new(date: NaiveDate, wday: &str, month: &str, births: i64) -> Self {
        BirthRecord {
            date,
            wday: wday.to_string(),
            month: month.to_string(),
            births,
        }
    }

    pub fn day_of_year(&self) -> u32 {
        self.date.ordinal()
    }
}

/// One aggregated day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBirths {
    pub date: NaiveDate,
    pub wday: String,
    pub day_of_year: u32,
    pub births: i64,
    pub month: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BirthRecordVec {
    pub records: Vec<BirthRecord>,
}

impl BirthRecordVec {
    pub fn new(records: Vec<BirthRecord>) -> Self {
        BirthRecordVec { records }
    }

    /// Group by `(date, wday, day_of_year)`, summing births and keeping the
    /// month of the first record of each group. Sorted by the group key.
    /// Sums saturate at `i64::MAX` / `i64::MIN`.
    pub fn summarize(&self) -> Vec<DailyBirths> {
        let mut index: HashMap<(NaiveDate, &str, u32), usize> = HashMap::new();
        let mut days: Vec<DailyBirths> = Vec::new();

        for record in &self.records {
            let key = (record.date, record.wday.as_str(), record.day_of_year());
            match index.get(&key) {
                Some(&i) => days[i].births = days[i].births.saturating_add(record.births),
                None => {
                    index.insert(key, days.len());
                    days.push(DailyBirths {
                        date: record.date,
                        wday: record.wday.clone(),
                        day_of_year: record.day_of_year(),
                        births: record.births,
                        month: Some(record.month.clone()),
                    });
                }
            }
        }
        debug!("summarize {} records into {} days", self.records.len(), days.len());

        days.sort_by(|a, b| {
            (a.date, &a.wday, a.day_of_year).cmp(&(b.date, &b.wday, b.day_of_year))
        });
        days
    }

    /// Build the dataframe `clean_dataset` expects from these records.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let dates: Vec<NaiveDate> = self.records.iter().map(|r| r.date).collect();
        let wdays: Vec<&str> = self.records.iter().map(|r| r.wday.as_str()).collect();
        let months: Vec<&str> = self.records.iter().map(|r| r.month.as_str()).collect();
        let births: Vec<i64> = self.records.iter().map(|r| r.births).collect();
        df!(
            DATE => dates,
            WDAY => wdays,
            MONTH => months,
            BIRTHS => births
        )
    }
}

/// Read `date,wday,month,births` rows from a CSV file with a header.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<BirthRecord>, csv::Error> {
    let mut rdr = csv::Reader::from_path(path)?;
    rdr.deserialize().collect()
}
