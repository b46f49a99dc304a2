//! Core data types for videoteca
//!
//! This module defines the entities exchanged with the REST API
//! and the enumerations offered by the forms.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Date format used on the wire and in forms
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A category that organizes videos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tematica {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub descripcion: String,
    #[serde(default, with = "api_number")]
    pub popularidad: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activo: bool,
    #[serde(default, with = "api_date", skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<NaiveDate>,
}

impl Tematica {
    /// Format the creation date for display
    pub fn formatted_date(&self) -> String {
        format_date(self.fecha_creacion)
    }
}

/// A video, always attached to exactly one temática
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub titulo: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub autor: String,
    /// Seconds
    #[serde(default, with = "api_number")]
    pub duracion: f64,
    pub calidad: Calidad,
    pub clasificacion: Clasificacion,
    #[serde(default, with = "api_date", skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<NaiveDate>,
    pub tematica_id: u64,
}

impl Video {
    /// Format the duration for display
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duracion.max(0.0).round() as u32)
    }

    /// Format the creation date for display
    pub fn formatted_date(&self) -> String {
        format_date(self.fecha_creacion)
    }
}

/// Video resolution.
///
/// Values the forms do not offer are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Calidad {
    #[serde(rename = "360p")]
    P360,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "4K")]
    Uhd4k,
    #[serde(untagged)]
    Other(String),
}

impl Calidad {
    /// Options offered by the form
    pub fn all() -> [Calidad; 5] {
        [
            Calidad::P360,
            Calidad::P480,
            Calidad::P720,
            Calidad::P1080,
            Calidad::Uhd4k,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Calidad::P360 => "360p",
            Calidad::P480 => "480p",
            Calidad::P720 => "720p",
            Calidad::P1080 => "1080p",
            Calidad::Uhd4k => "4K",
            Calidad::Other(value) => value.as_str(),
        }
    }

    /// Known option for `value`
    pub fn parse(value: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.as_str() == value)
    }

    /// Any non-empty value, falling back to `Other`
    pub fn from_value(value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        Some(Self::parse(value).unwrap_or_else(|| Calidad::Other(value.to_string())))
    }
}

/// Age rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Clasificacion {
    #[serde(rename = "TP")]
    TodosLosPublicos,
    #[serde(rename = "7")]
    Mayores7,
    #[serde(rename = "12")]
    Mayores12,
    #[serde(rename = "16")]
    Mayores16,
    #[serde(rename = "18")]
    Mayores18,
    #[serde(untagged)]
    Other(String),
}

impl Clasificacion {
    /// Options offered by the form
    pub fn all() -> [Clasificacion; 5] {
        [
            Clasificacion::TodosLosPublicos,
            Clasificacion::Mayores7,
            Clasificacion::Mayores12,
            Clasificacion::Mayores16,
            Clasificacion::Mayores18,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Clasificacion::TodosLosPublicos => "TP",
            Clasificacion::Mayores7 => "7",
            Clasificacion::Mayores12 => "12",
            Clasificacion::Mayores16 => "16",
            Clasificacion::Mayores18 => "18",
            Clasificacion::Other(value) => value.as_str(),
        }
    }

    /// Human-readable label for selects
    pub fn label(&self) -> &str {
        match self {
            Clasificacion::TodosLosPublicos => "Todos los públicos",
            Clasificacion::Mayores7 => "+7",
            Clasificacion::Mayores12 => "+12",
            Clasificacion::Mayores16 => "+16",
            Clasificacion::Mayores18 => "+18",
            Clasificacion::Other(value) => value.as_str(),
        }
    }

    /// Known option for `value`
    pub fn parse(value: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.as_str() == value)
    }

    /// Any non-empty value, falling back to `Other`
    pub fn from_value(value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        Some(Self::parse(value).unwrap_or_else(|| Clasificacion::Other(value.to_string())))
    }
}

// Helper functions

/// Parse a date coming from the API or a form.
///
/// Accepts `YYYY-MM-DD` and full ISO-8601 timestamps, keeping only the date.
pub fn parse_api_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
}

/// Format an optional date, `-` when missing
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".into())
}

/// Format a number without a trailing `.0` when it is whole
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Format seconds as `m:ss` or `h:mm:ss`
pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// `null` reads as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numbers that may arrive as integers, floats, numeric strings or `null`.
/// Whole values are written back as integers.
mod api_number {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(0.0),
            Some(Raw::Number(n)) => Ok(n),
            Some(Raw::Text(s)) if s.trim().is_empty() => Ok(0.0),
            Some(Raw::Text(s)) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}

mod api_date {
    use super::{parse_api_date, DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(s) if !s.trim().is_empty() => parse_api_date(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
