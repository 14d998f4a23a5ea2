use core::fmt;

use crate::distance::path_length;
use crate::point::GeoPoint;

/// Geometry category of a placemark, in classification precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiGeometry,
    Other,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 5] = [
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::Polygon,
        GeometryKind::MultiGeometry,
        GeometryKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiGeometry => "MultiGeometry",
            GeometryKind::Other => "Other",
        }
    }

    /// KML element that marks this kind, `None` for `Other`.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            GeometryKind::Other => None,
            kind => Some(kind.as_str()),
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GeometryPayload {
    Point(GeoPoint),
    Line(Vec<GeoPoint>),
    /// Outer boundary ring only.
    Polygon(Vec<GeoPoint>),
}

impl GeometryPayload {
    pub fn points(&self) -> &[GeoPoint] {
        match self {
            GeometryPayload::Point(p) => std::slice::from_ref(p),
            GeometryPayload::Line(points) | GeometryPayload::Polygon(points) => points,
        }
    }

    /// Path length for lines, perimeter for polygon rings, zero for points.
    pub fn length(&self) -> f64 {
        match self {
            GeometryPayload::Point(_) => 0.0,
            GeometryPayload::Line(points) | GeometryPayload::Polygon(points) => {
                path_length(points)
            }
        }
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            GeometryPayload::Point(_) => "point",
            GeometryPayload::Line(_) => "line",
            GeometryPayload::Polygon(_) => "polygon",
        }
    }
}

/// How a renderer should draw a shape. The green and purple variants mark
/// members of a MultiGeometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleHint {
    Default,
    BlueLine,
    RedFill,
    GreenLine,
    PurpleFill,
}

impl StyleHint {
    pub fn for_payload(payload: &GeometryPayload, in_multi_geometry: bool) -> Self {
        match (payload, in_multi_geometry) {
            (GeometryPayload::Point(_), _) => StyleHint::Default,
            (GeometryPayload::Line(_), false) => StyleHint::BlueLine,
            (GeometryPayload::Line(_), true) => StyleHint::GreenLine,
            (GeometryPayload::Polygon(_), false) => StyleHint::RedFill,
            (GeometryPayload::Polygon(_), true) => StyleHint::PurpleFill,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StyleHint::Default => "#2a81cb",
            StyleHint::BlueLine => "blue",
            StyleHint::RedFill => "red",
            StyleHint::GreenLine => "green",
            StyleHint::PurpleFill => "purple",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleHint::Default => "default",
            StyleHint::BlueLine => "blue-line",
            StyleHint::RedFill => "red-fill",
            StyleHint::GreenLine => "green-line",
            StyleHint::PurpleFill => "purple-fill",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Placemark {
    pub name: String,
    pub kind: GeometryKind,
    pub geometries: Vec<GeometryPayload>,
}

/// One renderable geometry, labelled with its placemark name.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub label: String,
    pub payload: GeometryPayload,
    pub style: StyleHint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_order() {
        let mut kinds = GeometryKind::ALL.to_vec();
        kinds.sort();
        assert_eq!(kinds, GeometryKind::ALL.to_vec());
        assert_eq!(GeometryKind::MultiGeometry.tag(), Some("MultiGeometry"));
        assert_eq!(GeometryKind::Other.tag(), None);
    }

    #[test]
    fn test_payload_length() {
        let p = GeoPoint::new(1.0, 2.0);
        assert_eq!(GeometryPayload::Point(p).length(), 0.0);
        assert_eq!(GeometryPayload::Point(p).points(), &[p]);
        let line = GeometryPayload::Line(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)]);
        assert!((line.length() - 111.19).abs() < 0.5);
    }

    #[test]
    fn test_style_hint() {
        let line = GeometryPayload::Line(vec![]);
        let polygon = GeometryPayload::Polygon(vec![]);
        assert_eq!(StyleHint::for_payload(&line, false), StyleHint::BlueLine);
        assert_eq!(StyleHint::for_payload(&line, true), StyleHint::GreenLine);
        assert_eq!(StyleHint::for_payload(&polygon, false), StyleHint::RedFill);
        assert_eq!(StyleHint::for_payload(&polygon, true), StyleHint::PurpleFill);
        assert_eq!(
            StyleHint::for_payload(&GeometryPayload::Point(GeoPoint::new(0.0, 0.0)), true),
            StyleHint::Default
        );
    }
}
