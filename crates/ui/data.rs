use births::{BIRTHS, DATE, DAY_OF_YEAR, MONTH, WDAY};
use polars::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;

fn deserialize_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        _ => Err(serde::de::Error::custom("Expected string|number|null")),
    }
}

/// One aggregated day, every field ready for display.
#[derive(Debug, Serialize, Deserialize)]
pub struct DailyRow {
    #[serde(deserialize_with = "deserialize_string")]
    pub date: String,
    #[serde(deserialize_with = "deserialize_string")]
    pub wday: String,
    #[serde(deserialize_with = "deserialize_string")]
    pub day_of_year: String,
    #[serde(deserialize_with = "deserialize_string")]
    pub births: String,
    #[serde(default, deserialize_with = "deserialize_string")]
    pub month: String,
}

impl DailyRow {
    pub const fn ref_array(&self) -> [&String; 5] {
        [
            &self.date,
            &self.wday,
            &self.day_of_year,
            &self.births,
            &self.month,
        ]
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn wday(&self) -> &str {
        &self.wday
    }

    pub fn day_of_year(&self) -> &str {
        &self.day_of_year
    }

    pub fn births(&self) -> &str {
        &self.births
    }

    pub fn month(&self) -> &str {
        &self.month
    }
}

/// Convert the aggregated frame into display rows through the polars JSON writer.
pub fn rows_from_df(df: &DataFrame) -> Result<Vec<DailyRow>, Box<dyn Error>> {
    let mut d = df
        .clone()
        .lazy()
        .select([
            col(DATE).cast(DataType::String),
            col(WDAY),
            col(DAY_OF_YEAR),
            col(BIRTHS),
            col(MONTH),
        ])
        .collect()?;

    let mut j = Vec::<u8>::new();
    JsonWriter::new(&mut j)
        .with_json_format(JsonFormat::Json)
        .finish(&mut d)?;
    let rows = serde_json::from_slice::<Vec<DailyRow>>(&j)?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numbers_and_null() {
        let content = r#"[{"date":"2020-01-01","wday":"Wed","day_of_year":1,"births":8,"month":null}]"#;
        let rows: Vec<DailyRow> = serde_json::from_str(content).unwrap();
        assert_eq!(rows[0].date(), "2020-01-01");
        assert_eq!(rows[0].day_of_year(), "1");
        assert_eq!(rows[0].births(), "8");
        assert_eq!(rows[0].month(), "");
    }

    #[test]
    fn test_rows_from_df() {
        let date = chrono::NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
        let df = df!(
            DATE => [date],
            WDAY => ["Sat"],
            DAY_OF_YEAR => [60i32],
            BIRTHS => [12i64],
            MONTH => ["Feb"]
        )
        .unwrap();

        let rows = rows_from_df(&df).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].ref_array(),
            [
                &"2020-02-29".to_string(),
                &"Sat".to_string(),
                &"60".to_string(),
                &"12".to_string(),
                &"Feb".to_string(),
            ]
        );
    }
}
