// Distance calculation utilities

use geo::{HaversineDistance, Point};

use crate::models::Location;

const METRES_PER_KM: f64 = 1000.0;

/// Convert a location into a `geo` point (x = longitude, y = latitude)
pub fn to_point(location: &Location) -> Point<f64> {
    Point::new(location.lng, location.lat)
}

/// Calculate the great-circle distance between two locations in kilometres
pub fn haversine_km(p1: &Location, p2: &Location) -> f64 {
    to_point(p1).haversine_distance(&to_point(p2)) / METRES_PER_KM
}
