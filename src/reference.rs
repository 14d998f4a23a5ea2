use geo::{Distance, Geodesic, Point};

use crate::geometry::GeometryPayload;
use crate::point::GeoPoint;

/// Path length on the WGS84 ellipsoid in kilometers, as computed by the geo
/// crate. Used to cross-check the spherical lengths.
pub fn geodesic_length(points: &[GeoPoint]) -> f64 {
    let meters: f64 = points
        .windows(2)
        .map(|w| {
            Geodesic.distance(
                Point::new(w[0].lng, w[0].lat),
                Point::new(w[1].lng, w[1].lat),
            )
        })
        .sum();
    meters / 1000.0
}

pub fn geodesic_payload_length(payload: &GeometryPayload) -> f64 {
    match payload {
        GeometryPayload::Point(_) => 0.0,
        GeometryPayload::Line(points) | GeometryPayload::Polygon(points) => geodesic_length(points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::path_length;

    #[test]
    fn test_close_to_haversine() {
        let points = vec![
            GeoPoint::new(52.52, 13.405),
            GeoPoint::new(50.11, 8.68),
            GeoPoint::new(48.8566, 2.3522),
        ];
        let spherical = path_length(&points);
        let ellipsoidal = geodesic_length(&points);
        assert!((spherical / ellipsoidal - 1.0).abs() < 0.005);
    }

    #[test]
    fn test_short() {
        assert_eq!(geodesic_length(&[]), 0.0);
        assert_eq!(geodesic_length(&[GeoPoint::new(1.0, 1.0)]), 0.0);
    }
}
