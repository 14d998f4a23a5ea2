//! GeoJSON output of the renderable shapes.

use geo::{Coord, LineString, Point, Polygon};
use geojson::{Feature, FeatureCollection, GeoJson};

use crate::extract::Extraction;
use crate::geometry::{GeometryPayload, Shape};
use crate::point::GeoPoint;

fn coord(p: &GeoPoint) -> Coord<f64> {
    Coord { x: p.lng, y: p.lat }
}

pub fn to_geo(payload: &GeometryPayload) -> geo::Geometry<f64> {
    match payload {
        GeometryPayload::Point(p) => Point::from(coord(p)).into(),
        GeometryPayload::Line(points) => {
            LineString::from(points.iter().map(coord).collect::<Vec<_>>()).into()
        }
        GeometryPayload::Polygon(points) => {
            let ring = LineString::from(points.iter().map(coord).collect::<Vec<_>>());
            Polygon::new(ring, vec![]).into()
        }
    }
}

fn feature(shape: &Shape) -> Feature {
    let geometry = geojson::Geometry::new(geojson::Value::from(&to_geo(&shape.payload)));
    let mut feature = Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: None,
        foreign_members: None,
    };
    feature.set_property("name", shape.label.clone());
    feature.set_property("kind", shape.payload.shape_name());
    feature.set_property("style", shape.style.as_str());
    feature
}

pub fn feature_collection(extraction: &Extraction) -> FeatureCollection {
    let bbox = extraction
        .bbox()
        .map(|b| vec![b.min.lng, b.min.lat, b.max.lng, b.max.lat]);
    FeatureCollection {
        bbox,
        features: extraction.shapes.iter().map(feature).collect(),
        foreign_members: None,
    }
}

pub fn to_geojson_string(extraction: &Extraction) -> String {
    GeoJson::from(feature_collection(extraction)).to_string()
}
