// Request-derived seed for the stochastic selectors

use crate::models::{FeatureSet, Location};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a, stable across platforms and compiler versions
#[derive(Debug, Clone, Copy)]
struct Fnv1a(u64);

impl Fnv1a {
    fn new() -> Self {
        Self(FNV_OFFSET)
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 ^= u64::from(*byte);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    fn write_f64(&mut self, value: f64) {
        self.write(&value.to_bits().to_le_bytes());
    }

    fn write_location(&mut self, location: &Location) {
        self.write_f64(location.lat);
        self.write_f64(location.lng);
    }
}

/// Derives a seed from the user location and the candidate set.
///
/// Identical requests always yield the same seed; the salt lets operators
/// vary it without touching the inputs.
pub fn request_seed(features: &FeatureSet, salt: u64) -> u64 {
    let mut hasher = Fnv1a::new();
    hasher.write_location(&features.user_location());
    for (id, vector) in features.iter() {
        hasher.write(id.as_bytes());
        // separator so ("ab", "c") and ("a", "bc") differ
        hasher.write(&[0xff]);
        hasher.write_f64(vector.cost);
        hasher.write_f64(vector.heuristic);
        hasher.write_f64(vector.quality);
    }
    hasher.0 ^ salt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeatureVector;

    fn features(user: Location, ids: &[&str]) -> FeatureSet {
        FeatureSet::from_vectors(
            user,
            ids.iter().map(|id| {
                (
                    *id,
                    FeatureVector {
                        cost: 0.5,
                        heuristic: 0.25,
                        quality: 0.5,
                        distance_km: 2.0,
                    },
                )
            }),
        )
    }

    #[test]
    fn test_seed_is_stable() {
        let user = Location::new(10.0, 20.0);
        assert_eq!(
            request_seed(&features(user, &["a", "b"]), 0),
            request_seed(&features(user, &["b", "a"]), 0)
        );
    }

    #[test]
    fn test_seed_depends_on_inputs() {
        let user = Location::new(10.0, 20.0);
        let base = request_seed(&features(user, &["a", "b"]), 0);

        assert_ne!(base, request_seed(&features(user, &["a", "c"]), 0));
        assert_ne!(
            base,
            request_seed(&features(Location::new(10.0, 20.5), &["a", "b"]), 0)
        );
        assert_ne!(base, request_seed(&features(user, &["a", "b"]), 7));
    }

    #[test]
    fn test_fnv_reference_value() {
        let mut hasher = Fnv1a::new();
        hasher.write(b"a");
        assert_eq!(hasher.0, 0xaf63_dc4c_8601_ec8c);
    }
}
