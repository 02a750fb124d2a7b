//! Font database shared by raster surfaces.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use usvg::fontdb::{Database, Family, Query};

use crate::error::{RenderError, RenderResult};

static SYSTEM_FONTS: OnceLock<Arc<Database>> = OnceLock::new();

/// System fonts, loaded once per process.
///
/// If the platform has no face for the generic `sans-serif` family, the
/// first available face is mapped to it so labels still render.
#[must_use]
pub fn system_fonts() -> Arc<Database> {
    Arc::clone(SYSTEM_FONTS.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        map_sans_serif(&mut db);
        tracing::debug!("Loaded {} system font faces", db.len());
        Arc::new(db)
    }))
}

/// System fonts plus one extra font file, which becomes `sans-serif`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains no faces.
pub fn with_font_file(path: &Path) -> RenderResult<Arc<Database>> {
    let mut db = (*system_fonts()).clone();
    let before = db.len();
    db.load_font_file(path)
        .map_err(|e| RenderError::Font(format!("{}: {e}", path.display())))?;

    let added = db.faces().skip(before).find_map(|face| face.families.first());
    let Some((name, _)) = added else {
        return Err(RenderError::Font(format!(
            "{}: no usable font faces",
            path.display()
        )));
    };
    let name = name.clone();
    db.set_sans_serif_family(name);
    Ok(Arc::new(db))
}

fn map_sans_serif(db: &mut Database) {
    let query = Query {
        families: &[Family::SansSerif],
        ..Query::default()
    };
    if db.query(&query).is_some() {
        return;
    }

    let fallback = db
        .faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone());
    match fallback {
        Some(name) => db.set_sans_serif_family(name),
        None => tracing::warn!("No system fonts found; text labels will not render"),
    }
}
