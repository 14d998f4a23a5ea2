use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::extract::{extract, Extraction};
use crate::xml::parse_document;

/// Parses `content` and extracts it. Text that is not well-formed XML is
/// rejected as a whole, nothing is extracted from it.
pub fn read_str(content: &str) -> Result<Extraction> {
    let document = parse_document(content)?;
    Ok(extract(&document))
}

/// Reads the whole file before parsing it.
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<Extraction> {
    let filename = filename.as_ref();
    let mut file = File::open(filename)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    log::debug!("{}: read {} bytes", filename.display(), content.len());
    read_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KmlError;
    use crate::geometry::GeometryKind;

    #[test]
    fn test_rejects_broken_xml() {
        let result = read_str("<kml><Placemark><name>x</Placemark></kml>");
        assert!(matches!(result, Err(KmlError::Xml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = read_file("/nonexistent/dir/file.kml");
        assert!(matches!(result, Err(KmlError::Io(_))));
    }

    #[test]
    fn test_nested_folders() {
        let e = read_str(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Style id="s"><LineStyle><width>2</width></LineStyle></Style>
    <Folder><name>outer</name>
      <Folder>
        <Placemark><name>deep</name><Point><coordinates>8.5,47.3</coordinates></Point></Placemark>
      </Folder>
    </Folder>
    <Placemark><name>top</name></Placemark>
  </Document>
</kml>"#,
        )
        .unwrap();
        assert_eq!(e.details.len(), 2);
        assert_eq!(e.details[0].name, "deep");
        assert_eq!(e.details[0].kind, GeometryKind::Point);
        assert_eq!(e.details[1].kind, GeometryKind::Other);
    }
}
