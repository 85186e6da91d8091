//! Turns an observation history into the three label-aligned series the charts show.
//!
//! Null handling differs per series: temperature, dewpoint, wind speed and pressure
//! keep missing readings as gaps, while missing precipitation is read as "no rain"
//! and becomes `0.0`.

use crate::types::observation::Observation;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::frame::{
    float_values, get_column, ObservationFrame, COL_DEWPOINT, COL_PRECIP, COL_PRESSURE,
    COL_TEMPERATURE, COL_TIMESTAMP, COL_WIND_SPEED,
};
use chrono::{DateTime, Utc};
use polars::prelude::*;

/// Short month and day, e.g. "Jan 5". Independent of the process locale.
pub fn format_label(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d").to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemperaturePoint {
    pub label: String,
    pub temperature: Option<f64>,
    pub dewpoint: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindPressurePoint {
    pub label: String,
    /// `None` when either wind component is missing.
    pub wind_speed: Option<f64>,
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationPoint {
    pub label: String,
    pub precip: f64,
}

/// The three parallel series, one entry per observation, in observation order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub temperature: Vec<TemperaturePoint>,
    pub wind_pressure: Vec<WindPressurePoint>,
    pub precipitation: Vec<PrecipitationPoint>,
}

/// Which chart a [`ChartSpec`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Temperature,
    WindPressure,
    Precipitation,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::Temperature,
        ChartKind::WindPressure,
        ChartKind::Precipitation,
    ];

    /// Line charts leave gaps for missing values; the precipitation chart is a bar chart.
    pub fn is_bar(&self) -> bool {
        matches!(self, ChartKind::Precipitation)
    }
}

/// One named value sequence of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: &'static str,
    pub values: Vec<Option<f64>>,
}

/// Everything a chart adapter needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.temperature.iter().map(|p| p.label.clone()).collect()
    }

    /// Adapter-facing description of one of the charts.
    pub fn spec(&self, kind: ChartKind) -> ChartSpec {
        let datasets = match kind {
            ChartKind::Temperature => vec![
                Dataset {
                    name: "Temperature",
                    values: self.temperature.iter().map(|p| p.temperature).collect(),
                },
                Dataset {
                    name: "Dewpoint",
                    values: self.temperature.iter().map(|p| p.dewpoint).collect(),
                },
            ],
            ChartKind::WindPressure => vec![
                Dataset {
                    name: "Wind speed",
                    values: self.wind_pressure.iter().map(|p| p.wind_speed).collect(),
                },
                Dataset {
                    name: "Pressure",
                    values: self.wind_pressure.iter().map(|p| p.pressure).collect(),
                },
            ],
            ChartKind::Precipitation => vec![Dataset {
                name: "Precipitation",
                values: self.precipitation.iter().map(|p| Some(p.precip)).collect(),
            }],
        };
        ChartSpec {
            kind,
            labels: self.labels(),
            datasets,
        }
    }
}

/// Builds chart series for `station` from its observations.
///
/// # Errors
///
/// [`WeatherDataError::NoData`] for an empty sequence.
pub fn prepare(station: &str, observations: &[Observation]) -> Result<ChartData, WeatherDataError> {
    let frame = ObservationFrame::new(station, observations)?;
    prepare_frame(&frame)
}

/// Builds chart series from an already built frame.
pub fn prepare_frame(frame: &ObservationFrame) -> Result<ChartData, WeatherDataError> {
    let df = frame
        .frame
        .clone()
        .select([
            col(COL_TIMESTAMP),
            col(COL_TEMPERATURE),
            col(COL_DEWPOINT),
            col(COL_WIND_SPEED),
            col(COL_PRESSURE),
            col(COL_PRECIP).fill_null(lit(0.0f64)),
        ])
        .collect()?;

    let labels = get_column(&df, COL_TIMESTAMP)?
        .i64()?
        .into_iter()
        .map(|millis| {
            let millis = millis.unwrap_or_default();
            DateTime::from_timestamp_millis(millis)
                .map(|ts| format_label(&ts))
                .ok_or(WeatherDataError::InvalidTimestamp(millis))
        })
        .collect::<Result<Vec<String>, _>>()?;

    let temperature = float_values(&df, COL_TEMPERATURE)?;
    let dewpoint = float_values(&df, COL_DEWPOINT)?;
    let wind_speed = float_values(&df, COL_WIND_SPEED)?;
    let pressure = float_values(&df, COL_PRESSURE)?;
    let precip = float_values(&df, COL_PRECIP)?;

    let mut data = ChartData::default();
    for (i, label) in labels.into_iter().enumerate() {
        data.temperature.push(TemperaturePoint {
            label: label.clone(),
            temperature: temperature[i],
            dewpoint: dewpoint[i],
        });
        data.wind_pressure.push(WindPressurePoint {
            label: label.clone(),
            wind_speed: wind_speed[i],
            pressure: pressure[i],
        });
        data.precipitation.push(PrecipitationPoint {
            label,
            precip: precip[i].unwrap_or(0.0),
        });
    }
    Ok(data)
}
