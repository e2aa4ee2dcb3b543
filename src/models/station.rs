// Station model representing a candidate charging location

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::InputError;
use crate::models::{Location, StationId};

const KM_PER_MILE: f64 = 1.609_344;

/// Longest accepted distance hint, a little over twice around the equator
pub const MAX_DISTANCE_HINT_KM: f64 = 100_000.0;

/// Optional quality signals reported by the upstream station lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationAttributes {
    /// User rating on a 0-5 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Price per kWh in the local currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Number of charging connectors on site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_count: Option<u32>,

    /// Connector standard, e.g. "CCS" or "Type 2"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_type: Option<String>,
}

impl StationAttributes {
    pub fn validate(&self) -> Result<(), InputError> {
        if let Some(rating) = self.rating {
            if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
                return Err(InputError::RatingOutOfRange(rating));
            }
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(InputError::InvalidPrice(price));
            }
        }
        Ok(())
    }
}

/// A charging station candidate, created fresh for every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Identifier, unique within one request
    pub id: StationId,

    pub name: String,

    #[serde(default)]
    pub address: String,

    pub location: Location,

    /// Caller-supplied road or straight-line distance in kilometres
    #[serde(
        default,
        alias = "distance",
        deserialize_with = "deserialize_distance_hint"
    )]
    pub distance_hint: f64,

    #[serde(default)]
    pub attributes: StationAttributes,
}

impl Station {
    /// Creates a station without a distance hint or attributes
    pub fn new<S: Into<String>>(id: S, name: S, location: Location) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            location,
            distance_hint: 0.0,
            attributes: StationAttributes::default(),
        }
    }

    pub fn with_address<S: Into<String>>(mut self, address: S) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_distance_hint(mut self, distance_km: f64) -> Self {
        self.distance_hint = distance_km;
        self
    }

    pub fn with_attributes(mut self, attributes: StationAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Checks id, coordinates, distance hint and attributes of this station
    pub fn validate(&self) -> Result<(), InputError> {
        if self.id.trim().is_empty() {
            return Err(InputError::EmptyStationId);
        }
        self.location.validate()?;
        if !(0.0..=MAX_DISTANCE_HINT_KM).contains(&self.distance_hint) {
            return Err(InputError::InvalidDistanceHint {
                station_id: self.id.clone(),
                value: self.distance_hint,
            });
        }
        self.attributes.validate()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDistance {
    Number(f64),
    Text(String),
}

// Upstream lookups report distance either as a number of kilometres or as a
// display string such as "3.2 km" or "2 mi".
fn deserialize_distance_hint<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawDistance>::deserialize(deserializer)?;
    match raw {
        None => Ok(0.0),
        Some(RawDistance::Number(km)) => Ok(km),
        Some(RawDistance::Text(text)) => {
            parse_distance_text(&text).map_err(serde::de::Error::custom)
        }
    }
}

pub(crate) fn parse_distance_text(text: &str) -> Result<f64, String> {
    let trimmed = text.trim().to_ascii_lowercase();
    let (number, factor) = if let Some(value) = trimmed.strip_suffix("km") {
        (value, 1.0)
    } else if let Some(value) = trimmed
        .strip_suffix("miles")
        .or_else(|| trimmed.strip_suffix("mi"))
    {
        (value, KM_PER_MILE)
    } else {
        (trimmed.as_str(), 1.0)
    };

    number
        .trim()
        .parse::<f64>()
        .map(|value| value * factor)
        .map_err(|_| format!("unrecognised distance '{}'", text))
}
