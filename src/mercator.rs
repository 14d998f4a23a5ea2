use proj4rs::proj::Proj;

use crate::error::{KmlError, Result};
use crate::point::{GeoPoint, MercatorPoint};

/// Latitude limit of the square Web Mercator world.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

pub struct WebMercatorProjection {
    wgs84_spec: Proj,
    dst_spec: Proj,
}

impl WebMercatorProjection {
    pub fn make() -> Result<WebMercatorProjection> {
        // EPSG:3857, spherical mercator on the WGS84 semi-major axis.
        let spec = "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs";
        let dst_spec = Proj::from_proj_string(spec).map_err(projection_error)?;

        let spec = "+proj=longlat +ellps=WGS84 +datum=WGS84 +no_defs";
        let wgs84_spec = Proj::from_proj_string(spec).map_err(projection_error)?;
        Ok(WebMercatorProjection {
            wgs84_spec,
            dst_spec,
        })
    }

    /// Projects `wgs`, clamping the latitude to the mercator limit.
    /// Points with NaN coordinates cannot be placed and give `None`.
    pub fn project(&self, wgs: &GeoPoint) -> Option<MercatorPoint> {
        if !wgs.is_finite() {
            log::warn!("cannot project {}", wgs);
            return None;
        }
        let lat = wgs.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let mut p = (wgs.lng.to_radians(), lat.to_radians());
        match proj4rs::transform::transform(&self.wgs84_spec, &self.dst_spec, &mut p) {
            Ok(()) => Some(MercatorPoint { x: p.0, y: p.1 }),
            Err(e) => {
                log::warn!("cannot project {}: {:?}", wgs, e);
                None
            }
        }
    }
}

fn projection_error<E: std::fmt::Debug>(e: E) -> KmlError {
    KmlError::Projection(format!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let proj = WebMercatorProjection::make().unwrap();
        let m = proj.project(&GeoPoint::new(0.0, 0.0)).unwrap();
        assert!(m.x.abs() < 1e-6);
        assert!(m.y.abs() < 1e-6);
    }

    #[test]
    fn test_quarter_turn_east() {
        let proj = WebMercatorProjection::make().unwrap();
        let m = proj.project(&GeoPoint::new(0.0, 90.0)).unwrap();
        assert!((m.x - 10_018_754.17).abs() < 1.0, "{}", m);
    }

    #[test]
    fn test_north_is_up() {
        let proj = WebMercatorProjection::make().unwrap();
        let south = proj.project(&GeoPoint::new(-10.0, 5.0)).unwrap();
        let north = proj.project(&GeoPoint::new(40.0, 5.0)).unwrap();
        assert!(north.y > south.y);
        assert!((north.x - south.x).abs() < 1e-6);
    }

    #[test]
    fn test_nan_not_projected() {
        let proj = WebMercatorProjection::make().unwrap();
        assert!(proj.project(&GeoPoint::new(f64::NAN, 1.0)).is_none());
    }
}
