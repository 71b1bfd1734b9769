//! Tray icon sources: the built-in relay glyph or a user-supplied PNG.

use crate::{AppError, AppResult};

use std::{fs, panic::Location, path::Path};

use error_location::ErrorLocation;
use image::{Rgba, RgbaImage};
use tracing::{debug, instrument};

/// Edge length of the built-in glyph in pixels.
pub const GLYPH_SIZE: u32 = 22;

const CENTER_Y: f64 = 11.0;
const HUB_X: f64 = 11.0;
const HUB_RADIUS: f64 = 4.0;
const HUB_FEATHER: f64 = 0.8;
const NODE_XS: [f64; 2] = [3.0, 19.0];
const NODE_RADIUS: f64 = 2.0;
const NODE_FEATHER: f64 = 0.6;
const BARS: [(f64, f64); 2] = [(5.0, 7.0), (15.0, 17.0)];

/// Coverage of a filled disc at distance `d` from its centre, with a linear
/// antialiasing ramp of width `feather` outside the radius.
fn disc_coverage(d: f64, radius: f64, feather: f64) -> f64 {
    if d <= radius {
        1.0
    } else if d <= radius + feather {
        (radius + feather - d) / feather
    } else {
        0.0
    }
}

fn glyph_coverage(x: f64, y: f64) -> f64 {
    let dy = y - CENTER_Y;
    let mut alpha = disc_coverage(((x - HUB_X).powi(2) + dy * dy).sqrt(), HUB_RADIUS, HUB_FEATHER);

    for node_x in NODE_XS {
        let d = ((x - node_x).powi(2) + dy * dy).sqrt();
        alpha = alpha.max(disc_coverage(d, NODE_RADIUS, NODE_FEATHER));
    }

    let on_bar = BARS
        .iter()
        .any(|&(x0, x1)| x >= x0 && x <= x1 && (CENTER_Y - 1.0..=CENTER_Y + 1.0).contains(&y));
    if on_bar {
        alpha = 1.0;
    }

    alpha.min(1.0)
}

/// Relay glyph: small node, bar, hub, bar, small node. White on transparent.
pub fn relay_glyph() -> RgbaImage {
    RgbaImage::from_fn(GLYPH_SIZE, GLYPH_SIZE, |x, y| {
        let alpha = glyph_coverage(f64::from(x) + 0.5, f64::from(y) + 0.5);
        if alpha > 0.0 {
            Rgba([255, 255, 255, (alpha * 255.0) as u8])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Decode the PNG at `path` into RGBA8.
#[track_caller]
#[instrument]
pub fn load_png(path: &Path) -> AppResult<RgbaImage> {
    let bytes = fs::read(path).map_err(|e| AppError::IconError {
        reason: format!("Failed to read icon {}: {}", path.display(), e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let img = image::load_from_memory(&bytes).map_err(|e| AppError::IconError {
        reason: format!("Failed to decode icon {}: {}", path.display(), e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let rgba = img.into_rgba8();
    debug!(width = rgba.width(), height = rgba.height(), "Icon decoded");
    Ok(rgba)
}

/// The configured icon, falling back to the glyph when none is set.
#[track_caller]
pub fn tray_icon(path: Option<&Path>) -> AppResult<RgbaImage> {
    match path {
        Some(path) => load_png(path),
        None => Ok(relay_glyph()),
    }
}
