//! SVG scene to PNG.
//!
//! Figures are built as SVG and rasterized with resvg at their own canvas
//! size. Text is shaped with the system fonts; the generic `sans-serif` and
//! `monospace` families are pointed at installed faces when the platform
//! defaults are missing.

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use super::svg;
use crate::error::{EdaError, Result};

/// System font database, scanned once per process.
fn font_database() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            resolve_generic_families(&mut db);
            Arc::new(db)
        })
        .clone()
}

fn has_family(db: &fontdb::Database, name: &str) -> bool {
    db.faces()
        .any(|face| face.families.iter().any(|(family, _)| family == name))
}

fn resolve_generic_families(db: &mut fontdb::Database) {
    let mono = db
        .faces()
        .find(|face| face.monospaced)
        .and_then(|face| face.families.first())
        .map(|(family, _)| family.clone());
    let any = db
        .faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(family, _)| family.clone());

    if !has_family(db, "Arial")
        && let Some(family) = any.clone()
    {
        db.set_sans_serif_family(family);
    }
    if !has_family(db, "Courier New")
        && let Some(family) = mono.or(any)
    {
        db.set_monospace_family(family);
    }
}

/// Rasterize an SVG document to PNG bytes.
pub fn rasterize(svg: &str) -> Result<Vec<u8>> {
    let options = usvg::Options {
        fontdb: font_database(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| EdaError::Render {
        message: format!("invalid SVG scene: {}", e),
    })?;

    let size = tree.size().to_int_size();
    let mut pixmap =
        Pixmap::new(size.width(), size.height()).ok_or_else(|| EdaError::Render {
            message: format!("cannot allocate a {}x{} canvas", size.width(), size.height()),
        })?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| EdaError::Render {
        message: format!("PNG encoding failed: {}", e),
    })
}

/// Write a figure to `path`: the SVG scene as-is for `.svg`, PNG otherwise.
pub fn write_figure(svg_scene: &str, path: &Path) -> Result<()> {
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        return svg::save(svg_scene, path);
    }

    let png = rasterize(svg_scene)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, png)?;
    Ok(())
}

/// Width and height from a PNG header, `None` when `bytes` is not a PNG.
pub fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    const SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
    if bytes.len() < 24 || &bytes[..8] != SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    Some((width, height))
}
