use crate::{BridgeError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Bytes per pixel in the RGBA8 icon format.
pub const BYTES_PER_PIXEL: usize = 4;

/// Validated tray icon: raw RGBA8, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconBitmap {
    rgba: Vec<u8>,
    width: u32,
    height: u32,
}

impl IconBitmap {
    /// Validate and take ownership of a pixel buffer.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when either dimension is zero or the buffer length
    /// is not `width * height * 4`.
    #[track_caller]
    pub fn new(rgba: Vec<u8>, width: u32, height: u32) -> CoreResult<Self> {
        if width == 0 || height == 0 {
            return Err(BridgeError::InvalidArgument {
                reason: format!("icon dimensions must be positive, got {}x{}", width, height),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| BridgeError::InvalidArgument {
                reason: format!("icon dimensions {}x{} overflow", width, height),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if rgba.len() != expected {
            return Err(BridgeError::InvalidArgument {
                reason: format!(
                    "icon buffer is {} bytes, expected {} for {}x{} RGBA",
                    rgba.len(),
                    expected,
                    width,
                    height
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            rgba,
            width,
            height,
        })
    }

    /// Pixel data.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Consume into `(rgba, width, height)`.
    pub fn into_parts(self) -> (Vec<u8>, u32, u32) {
        (self.rgba, self.width, self.height)
    }
}
