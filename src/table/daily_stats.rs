// daily_stats.rs

//! Daily temperature statistics derived from a [`ForecastTable`].

use crate::table::error::TableError;
use crate::table::forecast_table::ForecastTable;
use chrono::{NaiveDate, TimeDelta};
use log::debug;
use polars::prelude::*;

/// One row of a [`DailyStatsTable`].
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub min_temp: f64,
    pub max_temp: f64,
    pub mean_temp: f64,
}

/// A wrapper around a Polars `DataFrame` with columns `date` (`Date`), `min_temp`,
/// `max_temp` and `mean_temp` (`f64`), one row per calendar day in ascending order.
#[derive(Debug, Clone)]
pub struct DailyStatsTable {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

/// Groups forecast rows by their calendar date in the table's local time (see
/// [`ForecastTable::utc_offset`]) and computes the minimum, maximum and mean
/// temperature of each day.
///
/// # Examples
///
/// ```rust
/// use weather_dashboard::{aggregate_daily, DemoSynthesizer, ForecastTable};
/// use chrono::{TimeZone, Utc};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let series = DemoSynthesizer::new(StdRng::seed_from_u64(1)).synthesize_forecast(start);
/// let table = ForecastTable::from_series(&series).unwrap();
///
/// let daily = aggregate_daily(&table).unwrap();
/// assert_eq!(daily.height(), 5); // 40 points * 3h = 5 whole days
/// ```
pub fn aggregate_daily(table: &ForecastTable) -> Result<DailyStatsTable, TableError> {
    let offset_ms = i64::from(table.utc_offset().local_minus_utc()) * 1000;
    let local = (col("datetime").dt().timestamp(TimeUnit::Milliseconds) + lit(offset_ms))
        .cast(DataType::Datetime(TimeUnit::Milliseconds, None));

    let frame = table
        .frame
        .clone()
        .lazy()
        .with_column(local.dt().date().alias("date"))
        .group_by([col("date")])
        .agg([
            col("temperature").min().alias("min_temp"),
            col("temperature").max().alias("max_temp"),
            col("temperature").mean().alias("mean_temp"),
        ])
        .sort(["date"], SortMultipleOptions::default())
        .collect()?;
    debug!("Aggregated {} forecast rows into {} days", table.height(), frame.height());

    Ok(DailyStatsTable { frame })
}

impl DailyStatsTable {
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Groups the table by `date` again, combining rows of the same day.
    ///
    /// Since every day already has a single row, this returns an identical table.
    pub fn regroup(&self) -> Result<DailyStatsTable, TableError> {
        let frame = self
            .frame
            .clone()
            .lazy()
            .group_by([col("date")])
            .agg([
                col("min_temp").min(),
                col("max_temp").max(),
                col("mean_temp").mean(),
            ])
            .sort(["date"], SortMultipleOptions::default())
            .collect()?;
        Ok(DailyStatsTable { frame })
    }

    /// Collects the frame into typed rows.
    pub fn rows(&self) -> Result<Vec<DailyStats>, TableError> {
        let days = self
            .frame
            .column("date")
            .map_err(|e| TableError::ColumnNotFound("date", e))?
            .cast(&DataType::Int32)?;
        let days = days.i32()?;
        let min = self.frame.column("min_temp")?.f64()?;
        let max = self.frame.column("max_temp")?.f64()?;
        let mean = self.frame.column("mean_temp")?.f64()?;

        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
        Ok((0..self.frame.height())
            .filter_map(|i| {
                Some(DailyStats {
                    date: epoch + TimeDelta::days(days.get(i)? as i64),
                    min_temp: min.get(i)?,
                    max_temp: max.get(i)?,
                    mean_temp: mean.get(i)?,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::snapshot::{ForecastPoint, ForecastSeries, WeatherSnapshot};
    use crate::types::weather_condition::WeatherCondition;
    use crate::weather_data::demo::DemoSynthesizer;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn table(readings: &[(DateTime<Utc>, f64)]) -> ForecastTable {
        let points = readings
            .iter()
            .map(|&(timestamp, temperature)| ForecastPoint {
                timestamp,
                snapshot: WeatherSnapshot {
                    temperature,
                    feels_like: temperature,
                    humidity: 60,
                    pressure: 1010,
                    wind_speed: 1.0,
                    condition: WeatherCondition::Clear,
                    description: "clear sky".to_string(),
                },
            })
            .collect();
        ForecastTable::from_series(&ForecastSeries::new(points)).unwrap()
    }

    #[test]
    fn test_groups_by_calendar_date() -> Result<(), TableError> {
        let daily = aggregate_daily(&table(&[
            (at(2024, 1, 2, 3), 5.0),
            (at(2024, 1, 1, 21), 8.0),
            (at(2024, 1, 2, 0), 1.0),
            (at(2024, 1, 1, 18), 10.0),
            (at(2024, 1, 2, 6), 6.0),
        ]))?;

        let rows = daily.rows()?;
        assert_eq!(
            rows,
            vec![
                DailyStats {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    min_temp: 8.0,
                    max_temp: 10.0,
                    mean_temp: 9.0,
                },
                DailyStats {
                    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                    min_temp: 1.0,
                    max_temp: 6.0,
                    mean_temp: 4.0,
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_min_mean_max_ordering_holds_for_every_day() -> Result<(), TableError> {
        let series =
            DemoSynthesizer::new(StdRng::seed_from_u64(9)).synthesize_forecast(at(2024, 3, 1, 12));
        let daily = aggregate_daily(&ForecastTable::from_series(&series)?)?;

        let rows = daily.rows()?;
        // 40 points from noon span six calendar dates.
        assert_eq!(rows.len(), 6);
        for row in &rows {
            assert!(row.min_temp <= row.mean_temp && row.mean_temp <= row.max_temp);
        }
        assert!(rows.windows(2).all(|pair| pair[0].date < pair[1].date));
        Ok(())
    }

    #[test]
    fn test_single_day_statistics() -> Result<(), TableError> {
        let daily = aggregate_daily(&table(&[(at(2024, 6, 1, 9), 21.5)]))?;
        let rows = daily.rows()?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].min_temp, 21.5);
        assert_eq!(rows[0].mean_temp, 21.5);
        assert_eq!(rows[0].max_temp, 21.5);
        Ok(())
    }

    #[test]
    fn test_regrouping_is_idempotent() -> Result<(), TableError> {
        let series =
            DemoSynthesizer::new(StdRng::seed_from_u64(10)).synthesize_forecast(at(2024, 1, 1, 0));
        let daily = aggregate_daily(&ForecastTable::from_series(&series)?)?;
        let regrouped = daily.regroup()?;

        assert_eq!(regrouped.rows()?, daily.rows()?);
        assert!(regrouped.frame.equals(&daily.frame));
        Ok(())
    }

    #[test]
    fn test_days_follow_local_offset() -> Result<(), TableError> {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let readings = [
            (at(2024, 1, 1, 10), 30.0), // 15:30 on Jan 1 in UTC+5:30
            (at(2024, 1, 1, 20), 20.0), // 01:30 on Jan 2
            (at(2024, 1, 1, 21), 22.0), // 02:30 on Jan 2
        ];

        let utc_days = aggregate_daily(&table(&readings))?.rows()?;
        assert_eq!(utc_days.len(), 1);

        let local_days = aggregate_daily(&table(&readings).with_utc_offset(ist))?.rows()?;
        assert_eq!(local_days.len(), 2);
        assert_eq!(local_days[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(local_days[0].max_temp, 30.0);
        assert_eq!(local_days[1].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(local_days[1].min_temp, 20.0);
        assert_eq!(local_days[1].mean_temp, 21.0);
        Ok(())
    }

    #[test]
    fn test_negative_offset_moves_early_hours_back() -> Result<(), TableError> {
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        let daily = aggregate_daily(&table(&[(at(2024, 1, 2, 3), 1.0)]).with_utc_offset(new_york))?;
        assert_eq!(daily.rows()?[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        Ok(())
    }

    #[test]
    fn test_schema() -> Result<(), TableError> {
        let daily = aggregate_daily(&table(&[(at(2024, 1, 1, 0), 1.0)]))?;
        assert_eq!(daily.frame.column("date")?.dtype(), &DataType::Date);
        assert_eq!(daily.frame.column("mean_temp")?.dtype(), &DataType::Float64);
        Ok(())
    }
}
