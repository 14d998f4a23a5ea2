use clap::Parser;
use kml_analytics::extract::Extraction;
use kml_analytics::geometry::GeometryKind;
use kml_analytics::svg::MapCanvas;
use kml_analytics::{error::Result, export, read_kml, reference, report};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(about = "Summarize and measure the placemarks of KML files")]
struct Cli {
    /// KML files, or directories searched for *.kml
    #[arg(required = true)]
    paths: Vec<PathBuf>,
    /// Write <name>.svg and <name>.geojson per input into this directory
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Write a Typst report covering all inputs
    #[arg(long)]
    typst: Option<PathBuf>,
    /// Do not print the tables
    #[arg(long, short)]
    quiet: bool,
}

fn is_kml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("kml"))
}

fn inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut ret = Vec::new();
    for path in paths {
        if !path.is_dir() {
            ret.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).sort_by_file_name() {
            match entry {
                Ok(e) if e.file_type().is_file() && is_kml(e.path()) => {
                    ret.push(e.path().to_path_buf())
                }
                Ok(_) => {}
                Err(e) => log::warn!("{}: {}", path.display(), e),
            }
        }
    }
    ret
}

fn log_reference(extraction: &Extraction) {
    for placemark in &extraction.placemarks {
        if matches!(placemark.kind, GeometryKind::Point | GeometryKind::Other) {
            continue;
        }
        let geodesic: f64 = placemark
            .geometries
            .iter()
            .map(reference::geodesic_payload_length)
            .sum();
        log::debug!(
            "{}: geodesic {:.2} km (geo crate)",
            placemark.name,
            geodesic
        );
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

/// Output base name for `path`; a stem seen before gets a `-2`, `-3`, ...
/// suffix so outputs of equally named inputs do not overwrite each other.
fn unique_name(seen: &mut HashMap<String, usize>, path: &Path) -> String {
    let name = stem(path);
    let count = seen.entry(name.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        return name;
    }
    let renamed = format!("{}-{}", name, count);
    log::warn!("{}: output name {} taken, using {}", path.display(), name, renamed);
    renamed
}

fn run(cli: &Cli) -> Result<bool> {
    let mut canvas = MapCanvas::init()?;
    let mut pages = Vec::new();
    let mut all_ok = true;
    let mut seen = HashMap::new();

    if let Some(dir) = &cli.out_dir {
        std::fs::create_dir_all(dir)?;
    }

    for path in inputs(&cli.paths) {
        log::info!("reading {}", path.display());
        let extraction = match read_kml::read_file(&path) {
            Ok(e) => e,
            Err(e) => {
                eprintln!("failed to parse {}: {}", path.display(), e);
                all_ok = false;
                continue;
            }
        };
        log::info!(
            "{}: {} placemarks, {} shapes",
            path.display(),
            extraction.placemarks.len(),
            extraction.shapes.len()
        );
        if let Some(bbox) = extraction.bbox() {
            log::info!("{}: {}", path.display(), bbox);
        }
        log_reference(&extraction);

        canvas.draw(&extraction);
        let svg = canvas.render();

        if !cli.quiet {
            println!("{}", path.display());
            println!();
            print!("{}", report::summary_table(&extraction.summary));
            println!();
            print!("{}", report::details_table(&extraction.details));
            println!();
        }

        if let Some(dir) = &cli.out_dir {
            let name = unique_name(&mut seen, &path);
            let svg_path = dir.join(format!("{}.svg", name));
            std::fs::write(&svg_path, &svg)?;
            let geojson_path = dir.join(format!("{}.geojson", name));
            std::fs::write(&geojson_path, export::to_geojson_string(&extraction))?;
            log::info!("wrote {} and {}", svg_path.display(), geojson_path.display());
        }

        pages.push(report::Data {
            name: stem(&path),
            summary: extraction.summary,
            details: extraction.details,
            svg,
        });
    }

    if let Some(typst) = &cli.typst {
        std::fs::write(typst, report::make_typst_document(&pages))?;
        log::info!("wrote {}", typst.display());
    }
    Ok(all_ok)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_name() {
        let mut seen = HashMap::new();
        assert_eq!(unique_name(&mut seen, Path::new("a/x.kml")), "x");
        assert_eq!(unique_name(&mut seen, Path::new("b/x.kml")), "x-2");
        assert_eq!(unique_name(&mut seen, Path::new("c/y.KML")), "y");
        assert_eq!(unique_name(&mut seen, Path::new("c/d/x.kml")), "x-3");
    }
}
