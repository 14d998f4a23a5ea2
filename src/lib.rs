//! KML placemark analytics: geometry classification, coordinate extraction
//! and great-circle measurement, plus SVG, GeoJSON and table output.

pub mod coordinates;
pub mod distance;
pub mod error;
pub mod export;
pub mod extract;
pub mod geometry;
pub mod mercator;
pub mod point;
pub mod read_kml;
pub mod reference;
pub mod report;
pub mod svg;
pub mod xml;

pub use error::{KmlError, Result};
pub use extract::{extract, DetailRow, Extraction, SummaryCounts};
pub use geometry::{GeometryKind, GeometryPayload, Placemark, Shape, StyleHint};
pub use point::{BoundingBox, GeoPoint};
pub use read_kml::{read_file, read_str};
