//! Aggregate statistics over one station's observation history.

use crate::types::observation::Observation;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::frame::{
    first_float, ObservationFrame, COL_PRESSURE, COL_TEMPERATURE, COL_WIND_SPEED,
};
use polars::prelude::*;

const AGG_CURRENT_TEMP: &str = "current_temp";
const AGG_AVG_TEMP: &str = "avg_temp";
const AGG_MIN_TEMP: &str = "min_temp";
const AGG_MAX_TEMP: &str = "max_temp";
const AGG_AVG_PRESSURE: &str = "avg_pressure";
const AGG_AVG_WIND_SPEED: &str = "avg_wind_speed";

/// Summary statistics for the selected station. Recomputed on every selection.
///
/// Temperature and pressure aggregates skip missing readings per field and are
/// `None` when a field has no readings at all. Average wind speed instead falls
/// back to `0.0` when no observation carries both wind components.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSummary {
    /// Temperature of the last observation, `None` if that reading is missing.
    pub current_temp: Option<f64>,
    pub avg_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    /// `max_temp - min_temp`, never negative.
    pub temp_range: Option<f64>,
    pub avg_pressure: Option<f64>,
    pub avg_wind_speed: f64,
    /// Number of observations, including ones with missing fields.
    pub count: usize,
}

/// Summarizes `observations` for `station`.
///
/// # Errors
///
/// [`WeatherDataError::NoData`] for an empty sequence; no statistics are computed.
pub fn summarize(
    station: &str,
    observations: &[Observation],
) -> Result<StationSummary, WeatherDataError> {
    let frame = ObservationFrame::new(station, observations)?;
    summarize_frame(&frame)
}

/// Summarizes an already built frame.
pub fn summarize_frame(frame: &ObservationFrame) -> Result<StationSummary, WeatherDataError> {
    let aggregates = frame
        .frame
        .clone()
        .select([
            col(COL_TEMPERATURE).last().alias(AGG_CURRENT_TEMP),
            col(COL_TEMPERATURE).mean().alias(AGG_AVG_TEMP),
            col(COL_TEMPERATURE).min().alias(AGG_MIN_TEMP),
            col(COL_TEMPERATURE).max().alias(AGG_MAX_TEMP),
            col(COL_PRESSURE).mean().alias(AGG_AVG_PRESSURE),
            col(COL_WIND_SPEED)
                .mean()
                .fill_null(lit(0.0f64))
                .alias(AGG_AVG_WIND_SPEED),
        ])
        .collect()?;

    let min_temp = first_float(&aggregates, AGG_MIN_TEMP)?;
    let max_temp = first_float(&aggregates, AGG_MAX_TEMP)?;

    Ok(StationSummary {
        current_temp: first_float(&aggregates, AGG_CURRENT_TEMP)?,
        avg_temp: first_float(&aggregates, AGG_AVG_TEMP)?,
        min_temp,
        max_temp,
        temp_range: min_temp.zip(max_temp).map(|(min, max)| max - min),
        avg_pressure: first_float(&aggregates, AGG_AVG_PRESSURE)?,
        avg_wind_speed: first_float(&aggregates, AGG_AVG_WIND_SPEED)?.unwrap_or(0.0),
        count: frame.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn series(rows: &[(Option<f64>, Option<f64>, Option<f64>, Option<f64>)]) -> Vec<Observation> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        rows.iter()
            .enumerate()
            .map(|(i, &(temperature, pressure, wind_x, wind_y))| Observation {
                temperature,
                pressure,
                wind_x,
                wind_y,
                ..Observation::empty(start + Duration::hours(i as i64))
            })
            .collect()
    }

    #[test]
    fn test_documented_example() -> Result<(), WeatherDataError> {
        let observations = series(&[
            (Some(10.0), None, Some(3.0), Some(4.0)),
            (Some(20.0), None, None, None),
        ]);
        let summary = summarize("KTEST", &observations)?;
        assert_eq!(summary.avg_temp, Some(15.0));
        assert_eq!(summary.avg_wind_speed, 5.0);
        assert_eq!(summary.temp_range, Some(10.0));
        assert_eq!(summary.current_temp, Some(20.0));
        assert_eq!(summary.count, 2);
        Ok(())
    }

    #[test]
    fn test_empty_is_no_data() {
        assert!(matches!(
            summarize("KTEST", &[]),
            Err(WeatherDataError::NoData { .. })
        ));
    }

    #[test]
    fn test_current_temp_passes_null_through() -> Result<(), WeatherDataError> {
        let observations = series(&[(Some(12.0), None, None, None), (None, None, None, None)]);
        let summary = summarize("KTEST", &observations)?;
        assert_eq!(summary.current_temp, None);
        assert_eq!(summary.avg_temp, Some(12.0));
        Ok(())
    }

    #[test]
    fn test_fields_are_aggregated_independently() -> Result<(), WeatherDataError> {
        let observations = series(&[
            (Some(5.0), None, None, None),
            (None, Some(1000.0), None, None),
            (Some(7.0), Some(1010.0), None, None),
        ]);
        let summary = summarize("KTEST", &observations)?;
        assert_eq!(summary.avg_temp, Some(6.0));
        assert_eq!(summary.avg_pressure, Some(1005.0));
        assert_eq!(summary.count, 3);
        Ok(())
    }

    #[test]
    fn test_all_null_fields_are_none_but_wind_is_zero() -> Result<(), WeatherDataError> {
        let observations = series(&[(None, None, Some(1.0), None), (None, None, None, Some(2.0))]);
        let summary = summarize("KTEST", &observations)?;
        assert_eq!(summary.avg_temp, None);
        assert_eq!(summary.temp_range, None);
        assert_eq!(summary.avg_pressure, None);
        assert_eq!(summary.current_temp, None);
        assert_eq!(summary.avg_wind_speed, 0.0);
        assert!(!summary.avg_wind_speed.is_nan());
        Ok(())
    }

    #[test]
    fn test_avg_within_range_and_range_non_negative() -> Result<(), WeatherDataError> {
        // Deterministic pseudo-random temperatures with gaps.
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        for len in 1..40 {
            let rows: Vec<_> = (0..len)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    let temperature = (state % 5 != 0).then(|| (state % 800) as f64 / 10.0 - 40.0);
                    (temperature, None, None, None)
                })
                .collect();
            let summary = summarize("KTEST", &series(&rows))?;
            if let (Some(avg), Some(min), Some(max)) =
                (summary.avg_temp, summary.min_temp, summary.max_temp)
            {
                assert!(min <= avg + 1e-9 && avg <= max + 1e-9, "{min} <= {avg} <= {max}");
                assert!(summary.temp_range.unwrap() >= 0.0);
            } else {
                assert!(summary.temp_range.is_none());
            }
        }
        Ok(())
    }
}
