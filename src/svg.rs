use crate::error::Result;
use crate::extract::Extraction;
use crate::geometry::{GeometryPayload, Shape};
use crate::mercator::WebMercatorProjection;
use crate::point::{GeoPoint, MercatorBoundingBox, MercatorPoint};

const SIZE: f64 = 500.0;
/// Smallest viewport edge in meters, so a lone marker still gets a map.
const MIN_EXTENT: f64 = 1000.0;

/// Map layer rendered to SVG. Each `draw` replaces what was drawn before.
pub struct MapCanvas {
    projection: WebMercatorProjection,
    mercator_bbox: MercatorBoundingBox,
    padding: f64,
    elements: Vec<String>,
}

impl MapCanvas {
    pub fn init() -> Result<Self> {
        let origin = MercatorPoint { x: 0.0, y: 0.0 };
        Ok(Self {
            projection: WebMercatorProjection::make()?,
            mercator_bbox: MercatorBoundingBox {
                min: origin,
                max: origin,
            },
            padding: 0.1,
            elements: Vec::new(),
        })
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn draw(&mut self, extraction: &Extraction) {
        self.clear();
        if let Some(bbox) = extraction.bbox() {
            log::debug!("canvas: centered on {}", bbox.center());
        }
        self.fit_bounds(&extraction.bounds);
        for shape in &extraction.shapes {
            self.draw_shape(shape);
        }
        log::debug!("canvas: {} elements, {}", self.len(), self.mercator_bbox);
    }

    fn fit_bounds(&mut self, bounds: &[GeoPoint]) {
        let projected: Vec<MercatorPoint> = bounds
            .iter()
            .filter_map(|p| self.projection.project(p))
            .collect();
        let Some(first) = projected.first() else {
            return;
        };
        let (mut min, mut max) = projected.iter().fold((*first, *first), |(min, max), curr| {
            (
                MercatorPoint {
                    x: min.x.min(curr.x),
                    y: min.y.min(curr.y),
                },
                MercatorPoint {
                    x: max.x.max(curr.x),
                    y: max.y.max(curr.y),
                },
            )
        });
        let grow_x = (MIN_EXTENT - (max.x - min.x)).max(0.0) / 2.0;
        let grow_y = (MIN_EXTENT - (max.y - min.y)).max(0.0) / 2.0;
        min.x -= grow_x;
        max.x += grow_x;
        min.y -= grow_y;
        max.y += grow_y;
        self.mercator_bbox = MercatorBoundingBox { min, max };
    }

    fn draw_shape(&mut self, shape: &Shape) {
        let color = shape.style.color();
        let title = format!("<title>{}</title>", escape(&shape.label));
        let element = match &shape.payload {
            GeometryPayload::Point(p) => {
                let Some(m) = self.projection.project(p) else {
                    return;
                };
                let (x, y) = self.transform(&m);
                format!(
                    r#"  <circle cx="{:.2}" cy="{:.2}" r="6" fill="{}" stroke="white" stroke-width="2">{}</circle>"#,
                    x, y, color, title
                )
            }
            GeometryPayload::Line(points) => {
                let Some(s) = self.points_attribute(points) else {
                    return;
                };
                format!(
                    r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="3">{}</polyline>"#,
                    s, color, title
                )
            }
            GeometryPayload::Polygon(points) => {
                let Some(s) = self.points_attribute(points) else {
                    return;
                };
                format!(
                    r#"  <polygon points="{}" fill="{}" fill-opacity="0.2" stroke="{}" stroke-width="3">{}</polygon>"#,
                    s, color, color, title
                )
            }
        };
        self.elements.push(element);
    }

    fn points_attribute(&self, points: &[GeoPoint]) -> Option<String> {
        let s = points
            .iter()
            .filter_map(|p| self.projection.project(p))
            .map(|m| {
                let (x, y) = self.transform(&m);
                format!("{:.2},{:.2}", x, y)
            })
            .collect::<Vec<String>>()
            .join(" ");
        if s.is_empty() { None } else { Some(s) }
    }

    pub fn render(&self) -> String {
        let mut svg = format!(
            r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
            SIZE, SIZE
        );
        svg.push('\n');
        for e in &self.elements {
            svg.push_str(e);
            svg.push('\n');
        }
        svg.push_str("</svg>");
        svg
    }

    fn scale(&self) -> f64 {
        let padded_width = self.mercator_bbox.width() * (1.0 + 2.0 * self.padding);
        let padded_height = self.mercator_bbox.height() * (1.0 + 2.0 * self.padding);
        SIZE / padded_width.max(padded_height).max(MIN_EXTENT)
    }

    fn transform(&self, m: &MercatorPoint) -> (f64, f64) {
        let b = &self.mercator_bbox;
        let svg_x = (m.x - b.min.x + b.width() * self.padding) * self.scale();
        let svg_y = SIZE - (m.y - b.min.y + b.height() * self.padding) * self.scale();
        (svg_x, svg_y)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_kml::read_str;

    const KML: &str = r#"<kml>
  <Placemark><name>A &amp; B</name><Point><coordinates>13.40,52.52</coordinates></Point></Placemark>
  <Placemark><LineString><coordinates>13.40,52.52 13.45,52.50</coordinates></LineString></Placemark>
  <Placemark><Polygon><outerBoundaryIs><LinearRing>
    <coordinates>13.3,52.4 13.5,52.4 13.5,52.6 13.3,52.4</coordinates>
  </LinearRing></outerBoundaryIs></Polygon></Placemark>
</kml>"#;

    #[test]
    fn test_draw_replaces() {
        let extraction = read_str(KML).unwrap();
        let mut canvas = MapCanvas::init().unwrap();
        canvas.draw(&extraction);
        assert_eq!(canvas.len(), 3);
        canvas.draw(&extraction);
        assert_eq!(canvas.len(), 3);
        canvas.draw(&read_str("<kml/>").unwrap());
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_render() {
        let extraction = read_str(KML).unwrap();
        let mut canvas = MapCanvas::init().unwrap();
        canvas.draw(&extraction);
        let svg = canvas.render();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("<circle"));
        assert!(svg.contains(r#"stroke="blue""#));
        assert!(svg.contains(r#"fill="red""#));
        assert!(svg.contains("<title>A &amp; B</title>"));
        assert!(svg.contains("<title>Element 2</title>"));
    }

    #[test]
    fn test_inside_viewport() {
        let extraction = read_str(KML).unwrap();
        let mut canvas = MapCanvas::init().unwrap();
        canvas.draw(&extraction);
        for p in &extraction.bounds {
            let (x, y) = canvas.transform(&canvas.projection.project(p).unwrap());
            assert!((0.0..=SIZE).contains(&x), "{}", x);
            assert!((0.0..=SIZE).contains(&y), "{}", y);
        }
    }

    #[test]
    fn test_nan_point_skipped() {
        let extraction =
            read_str("<kml><Placemark><Point><coordinates>abc,def</coordinates></Point></Placemark></kml>")
                .unwrap();
        let mut canvas = MapCanvas::init().unwrap();
        canvas.draw(&extraction);
        assert!(canvas.is_empty());
    }
}
