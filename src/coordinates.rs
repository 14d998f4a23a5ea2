use crate::point::GeoPoint;

/// Parses a KML `<coordinates>` body: whitespace separated `lon,lat[,alt]`
/// tuples. Altitude is dropped, fields that are not numbers become NaN and
/// stay in the output.
pub fn parse_coordinates(text: &str) -> Vec<GeoPoint> {
    text.split_whitespace().map(parse_tuple).collect()
}

fn parse_tuple(token: &str) -> GeoPoint {
    let mut fields = token.split(',');
    let lng = parse_field(fields.next());
    let lat = parse_field(fields.next());
    GeoPoint { lat, lng }
}

fn parse_field(field: Option<&str>) -> f64 {
    field
        .and_then(|f| f.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swaps_to_lat_first() {
        let points = parse_coordinates("-122.4,37.8");
        assert_eq!(points, vec![GeoPoint::new(37.8, -122.4)]);
    }

    #[test]
    fn test_altitude_dropped() {
        let points = parse_coordinates("13.4,52.5,34.0 2.35,48.85,0");
        assert_eq!(
            points,
            vec![GeoPoint::new(52.5, 13.4), GeoPoint::new(48.85, 2.35)]
        );
    }

    #[test]
    fn test_any_whitespace_run() {
        let points = parse_coordinates("\n\t  0,0 \n\n  0,1\t0,2\r\n  ");
        assert_eq!(points.len(), 3);
        assert_eq!(
            points.iter().map(|p| p.lat).collect::<Vec<_>>(),
            vec![0.0, 1.0, 2.0]
        );
    }

    #[test]
    fn test_empty() {
        assert!(parse_coordinates("").is_empty());
        assert!(parse_coordinates("   \n\t ").is_empty());
    }

    #[test]
    fn test_malformed_kept_as_nan() {
        let points = parse_coordinates("abc,def 1,2");
        assert_eq!(points.len(), 2);
        assert!(points[0].lat.is_nan());
        assert!(points[0].lng.is_nan());
        assert_eq!(points[1], GeoPoint::new(2.0, 1.0));
    }

    #[test]
    fn test_missing_latitude() {
        let points = parse_coordinates("7.5");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].lng, 7.5);
        assert!(points[0].lat.is_nan());
    }
}
