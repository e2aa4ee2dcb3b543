// Feature normalizer: raw station records -> comparable feature vectors

use std::collections::{BTreeMap, HashSet};

use crate::config::NormalizerConfig;
use crate::error::InputError;
use crate::models::{FeatureSet, FeatureVector, Location, Station};

const NEUTRAL_PENALTY_SIGNAL: f64 = 0.5;
const MAX_RATING: f64 = 5.0;

/// Converts a request's stations into a [`FeatureSet`]
#[derive(Debug, Clone, Default)]
pub struct FeatureNormalizer {
    config: NormalizerConfig,
}

impl FeatureNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Validates the request and computes one feature vector per station.
    ///
    /// `cost` and `heuristic` share one scale (the largest raw cost in the
    /// batch), so `heuristic <= cost` holds for every station.
    pub fn normalize(
        &self,
        user: &Location,
        stations: &[Station],
    ) -> Result<FeatureSet, InputError> {
        self.validate(user, stations)?;

        let max_price = stations
            .iter()
            .filter_map(|s| s.attributes.price)
            .fold(0.0_f64, f64::max);
        let max_connectors = stations
            .iter()
            .filter_map(|s| s.attributes.connector_count)
            .max()
            .unwrap_or(0);

        // Raw cost in kilometres, inflated by price and connector scarcity
        let mut raw: Vec<(f64, f64)> = Vec::with_capacity(stations.len());
        for station in stations {
            let great_circle = user.distance_to(&station.location);
            let road = station.distance_hint.max(great_circle);
            let penalty = self.config.price_weight * price_signal(station, max_price)
                + self.config.availability_weight * scarcity_signal(station);
            let raw_cost = road * (1.0 + penalty);
            if !raw_cost.is_finite() {
                return Err(InputError::UnboundedCost(station.id.clone()));
            }
            raw.push((great_circle, raw_cost));
        }

        let scale = raw.iter().map(|(_, cost)| *cost).fold(0.0_f64, f64::max);

        let features: BTreeMap<_, _> = stations
            .iter()
            .zip(raw)
            .map(|(station, (great_circle, raw_cost))| {
                let (cost, heuristic) = if scale > 0.0 {
                    (raw_cost / scale, great_circle / scale)
                } else {
                    (0.0, 0.0)
                };
                let vector = FeatureVector {
                    cost,
                    heuristic,
                    quality: self.quality(station, max_connectors),
                    distance_km: great_circle,
                };
                (station.id.clone(), vector)
            })
            .collect();

        log::debug!(
            "normalized {} stations (cost scale {:.3} km)",
            features.len(),
            scale
        );

        Ok(FeatureSet::new(*user, features))
    }

    fn validate(&self, user: &Location, stations: &[Station]) -> Result<(), InputError> {
        user.validate()?;
        if stations.is_empty() {
            return Err(InputError::EmptyCandidates);
        }
        if stations.len() > self.config.max_candidates {
            return Err(InputError::TooManyCandidates {
                count: stations.len(),
                max: self.config.max_candidates,
            });
        }

        let mut seen = HashSet::with_capacity(stations.len());
        for station in stations {
            station.validate()?;
            if !seen.insert(station.id.as_str()) {
                return Err(InputError::DuplicateStationId(station.id.clone()));
            }
        }
        Ok(())
    }

    /// Mean of the available rating and connector signals
    fn quality(&self, station: &Station, max_connectors: u32) -> f64 {
        let rating = station.attributes.rating.map(|r| r / MAX_RATING);
        let connectors = station
            .attributes
            .connector_count
            .filter(|_| max_connectors > 0)
            .map(|count| f64::from(count) / f64::from(max_connectors));

        let signals: Vec<f64> = rating.into_iter().chain(connectors).collect();
        if signals.is_empty() {
            self.config.neutral_quality
        } else {
            (signals.iter().sum::<f64>() / signals.len() as f64).clamp(0.0, 1.0)
        }
    }
}

fn price_signal(station: &Station, max_price: f64) -> f64 {
    match station.attributes.price {
        Some(price) if max_price > 0.0 => price / max_price,
        Some(_) => 0.0,
        None => NEUTRAL_PENALTY_SIGNAL,
    }
}

fn scarcity_signal(station: &Station) -> f64 {
    station
        .attributes
        .connector_count
        .map(|count| 1.0 / (1.0 + f64::from(count)))
        .unwrap_or(NEUTRAL_PENALTY_SIGNAL)
}
