use core::fmt;

/// WGS84 position, latitude first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wgs(lat: {:.5}, lng: {:.5})", self.lat, self.lng)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

impl BoundingBox {
    pub fn from(p1: &GeoPoint, p2: &GeoPoint) -> Self {
        let min = GeoPoint {
            lat: p1.lat.min(p2.lat),
            lng: p1.lng.min(p2.lng),
        };
        let max = GeoPoint {
            lat: p1.lat.max(p2.lat),
            lng: p1.lng.max(p2.lng),
        };
        Self { min, max }
    }

    /// Smallest box enclosing every finite point. NaN coordinates are
    /// skipped, so a set without any finite point has no box.
    pub fn enclosing(points: &[GeoPoint]) -> Option<Self> {
        let mut finite = points.iter().filter(|p| p.is_finite());
        let first = finite.next()?;
        Some(finite.fold(BoundingBox::from(first, first), |bbox, curr| {
            BoundingBox {
                min: GeoPoint {
                    lat: bbox.min.lat.min(curr.lat),
                    lng: bbox.min.lng.min(curr.lng),
                },
                max: GeoPoint {
                    lat: bbox.max.lat.max(curr.lat),
                    lng: bbox.max.lng.max(curr.lng),
                },
            }
        }))
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: (self.min.lat + self.max.lat) / 2.0,
            lng: (self.min.lng + self.max.lng) / 2.0,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wgsbbox(min: {}, max: {})", self.min, self.max)
    }
}

/// Projected position in Web Mercator meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MercatorPoint {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for MercatorPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mercator(x: {:.5}, y: {:.5})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MercatorBoundingBox {
    pub min: MercatorPoint,
    pub max: MercatorPoint,
}

impl MercatorBoundingBox {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

impl fmt::Display for MercatorBoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mercatorbbox(min: {}, max: {})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enclosing_box() {
        let points = vec![
            GeoPoint::new(10.0, -5.0),
            GeoPoint::new(-3.0, 7.5),
            GeoPoint::new(4.0, 0.0),
        ];
        let bbox = BoundingBox::enclosing(&points).unwrap();
        assert_eq!(bbox.min, GeoPoint::new(-3.0, -5.0));
        assert_eq!(bbox.max, GeoPoint::new(10.0, 7.5));
        assert_eq!(bbox.center(), GeoPoint::new(3.5, 1.25));
    }

    #[test]
    fn test_enclosing_skips_nan() {
        let points = vec![
            GeoPoint::new(f64::NAN, f64::NAN),
            GeoPoint::new(1.0, 2.0),
            GeoPoint::new(f64::NAN, 3.0),
        ];
        let bbox = BoundingBox::enclosing(&points).unwrap();
        assert_eq!(bbox.min, GeoPoint::new(1.0, 2.0));
        assert_eq!(bbox.max, GeoPoint::new(1.0, 2.0));
    }

    #[test]
    fn test_enclosing_empty() {
        assert!(BoundingBox::enclosing(&[]).is_none());
        assert!(BoundingBox::enclosing(&[GeoPoint::new(f64::NAN, 0.0)]).is_none());
    }
}
