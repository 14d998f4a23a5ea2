//! Placemark classification, coordinate extraction and measurement.

use std::ops::Index;

use roxmltree::{Document, Node};

use crate::coordinates::parse_coordinates;
use crate::geometry::{GeometryKind, GeometryPayload, Placemark, Shape, StyleHint};
use crate::point::{BoundingBox, GeoPoint};
use crate::xml::{
    descendants_by_tag, descendants_outside, find_path, first_child_by_tag,
    first_descendant_by_tag, text_content,
};

const PLACEMARK: &str = "Placemark";
const NAME: &str = "name";
const POINT: &str = "Point";
const LINE_STRING: &str = "LineString";
const POLYGON: &str = "Polygon";
const MULTI_GEOMETRY: &str = "MultiGeometry";
const COORDINATES: &str = "coordinates";
const OUTER_RING: [&str; 3] = ["outerBoundaryIs", "LinearRing", COORDINATES];

pub const NOT_APPLICABLE: &str = "N/A";

/// Kinds tried in order when classifying, the first one present wins.
const PRECEDENCE: [GeometryKind; 4] = [
    GeometryKind::Point,
    GeometryKind::LineString,
    GeometryKind::Polygon,
    GeometryKind::MultiGeometry,
];

/// Number of placemarks per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SummaryCounts {
    counts: [usize; GeometryKind::ALL.len()],
}

impl SummaryCounts {
    pub fn get(&self, kind: GeometryKind) -> usize {
        self.counts[kind as usize]
    }
    pub fn increment(&mut self, kind: GeometryKind) {
        self.counts[kind as usize] += 1;
    }
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
    /// All five kinds, declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (GeometryKind, usize)> + '_ {
        GeometryKind::ALL.iter().map(|kind| (*kind, self.get(*kind)))
    }
}

impl Index<GeometryKind> for SummaryCounts {
    type Output = usize;
    fn index(&self, kind: GeometryKind) -> &usize {
        &self.counts[kind as usize]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailRow {
    pub name: String,
    pub kind: GeometryKind,
    pub length_label: String,
}

/// Everything derived from one KML document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    pub summary: SummaryCounts,
    pub details: Vec<DetailRow>,
    pub placemarks: Vec<Placemark>,
    pub shapes: Vec<Shape>,
    /// Every coordinate of every shape, for viewport fitting.
    pub bounds: Vec<GeoPoint>,
}

impl Extraction {
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::enclosing(&self.bounds)
    }

    pub fn is_empty(&self) -> bool {
        self.placemarks.is_empty()
    }

    fn push(&mut self, placemark: Placemark, length_label: String) {
        log::trace!(
            "placemark '{}': {} ({} geometries, length {})",
            placemark.name,
            placemark.kind,
            placemark.geometries.len(),
            length_label
        );
        self.summary.increment(placemark.kind);
        self.details.push(DetailRow {
            name: placemark.name.clone(),
            kind: placemark.kind,
            length_label,
        });
        let in_multi_geometry = placemark.kind == GeometryKind::MultiGeometry;
        for payload in &placemark.geometries {
            self.bounds.extend_from_slice(payload.points());
            self.shapes.push(Shape {
                label: placemark.name.clone(),
                payload: payload.clone(),
                style: StyleHint::for_payload(payload, in_multi_geometry),
            });
        }
        self.placemarks.push(placemark);
    }
}

/// Walks every `Placemark` of `document` in document order. The document is
/// only read, so the same tree always gives the same result.
pub fn extract(document: &Document) -> Extraction {
    let mut extraction = Extraction::default();
    for (index, node) in descendants_by_tag(document.root(), PLACEMARK).enumerate() {
        let (placemark, length_label) = read_placemark(node, index);
        extraction.push(placemark, length_label);
    }
    log::debug!(
        "extracted {} placemarks, {} shapes, {} coordinates",
        extraction.placemarks.len(),
        extraction.shapes.len(),
        extraction.bounds.len()
    );
    extraction
}

fn read_placemark(node: Node, index: usize) -> (Placemark, String) {
    let name = first_child_by_tag(node, NAME)
        .map(text_content)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("Element {}", index + 1));
    let kind = classify(node);
    let (geometries, length_label) = match kind {
        GeometryKind::Point => {
            let geometries: Vec<_> = scoped(node, POINT)
                .next()
                .and_then(read_point)
                .into_iter()
                .collect();
            (geometries, NOT_APPLICABLE.to_string())
        }
        GeometryKind::LineString => {
            let lines: Vec<Option<GeometryPayload>> =
                scoped(node, LINE_STRING).map(read_line).collect();
            // a last line without coordinates measures 0
            let last = lines
                .last()
                .and_then(Option::as_ref)
                .map_or(0.0, GeometryPayload::length);
            (lines.into_iter().flatten().collect(), last.to_string())
        }
        GeometryKind::Polygon => {
            let geometries: Vec<_> = scoped(node, POLYGON).filter_map(read_polygon).collect();
            let perimeter = geometries.iter().map(GeometryPayload::length).sum();
            (geometries, kilometers(perimeter))
        }
        GeometryKind::MultiGeometry => {
            let multis: Vec<Node> = scoped(node, MULTI_GEOMETRY).collect();
            let has_lines = multis
                .iter()
                .any(|m| first_descendant_by_tag(*m, LINE_STRING).is_some());
            let geometries = multi_geometry_members(&multis);
            let label = if has_lines {
                let total = geometries
                    .iter()
                    .filter(|g| matches!(g, GeometryPayload::Line(_)))
                    .map(GeometryPayload::length)
                    .sum();
                kilometers(total)
            } else {
                NOT_APPLICABLE.to_string()
            };
            (geometries, label)
        }
        GeometryKind::Other => (Vec::new(), NOT_APPLICABLE.to_string()),
    };
    let placemark = Placemark {
        name,
        kind,
        geometries,
    };
    (placemark, length_label)
}

fn classify(node: Node) -> GeometryKind {
    PRECEDENCE
        .iter()
        .copied()
        .find(|kind| {
            kind.tag()
                .is_some_and(|tag| scoped(node, tag).next().is_some())
        })
        .unwrap_or(GeometryKind::Other)
}

/// Geometry elements of a placemark that do not belong to a MultiGeometry.
fn scoped<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    descendants_outside(node, tag, MULTI_GEOMETRY)
}

/// Points first, then lines, then polygons.
fn multi_geometry_members(multis: &[Node]) -> Vec<GeometryPayload> {
    let points = multis
        .iter()
        .flat_map(|m| descendants_by_tag(*m, POINT))
        .filter_map(read_point);
    let lines = multis
        .iter()
        .flat_map(|m| descendants_by_tag(*m, LINE_STRING))
        .filter_map(read_line);
    let polygons = multis
        .iter()
        .flat_map(|m| descendants_by_tag(*m, POLYGON))
        .filter_map(read_polygon);
    points.chain(lines).chain(polygons).collect()
}

fn coordinates_of(node: Option<Node>) -> Option<Vec<GeoPoint>> {
    let points = parse_coordinates(&text_content(node?));
    if points.is_empty() { None } else { Some(points) }
}

fn read_point(point: Node) -> Option<GeometryPayload> {
    let points = coordinates_of(first_descendant_by_tag(point, COORDINATES))?;
    points.first().copied().map(GeometryPayload::Point)
}

fn read_line(line: Node) -> Option<GeometryPayload> {
    coordinates_of(first_descendant_by_tag(line, COORDINATES)).map(GeometryPayload::Line)
}

fn read_polygon(polygon: Node) -> Option<GeometryPayload> {
    coordinates_of(find_path(polygon, &OUTER_RING)).map(GeometryPayload::Polygon)
}

fn kilometers(value: f64) -> String {
    format!("{:.2} km", value)
}
