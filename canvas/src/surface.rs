//! Raster surfaces: owned RGBA pixmaps with alpha sampling and PNG snapshots.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use tiny_skia::{Color, Pixmap};

/// Errors raised by surface allocation and PNG conversion.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("png encode failed: {0}")]
    Encode(String),
    #[error("png decode failed: {0}")]
    Decode(String),
}

/// A premultiplied RGBA raster the renderer paints into.
#[derive(Clone)]
pub struct Surface {
    pixmap: Pixmap,
}

impl PartialEq for Surface {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width() && self.height() == other.height() && self.pixmap.data() == other.pixmap.data()
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface").field("width", &self.width()).field("height", &self.height()).finish()
    }
}

impl Surface {
    /// Allocate a transparent surface.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::InvalidSize`] for a zero or oversized dimension.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap }).ok_or(SurfaceError::InvalidSize { width, height })
    }

    #[must_use]
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    /// Alpha of the pixel nearest `(x, y)`. Points outside the surface read as `0`.
    #[must_use]
    pub fn alpha_at(&self, x: f64, y: f64) -> u8 {
        let (px, py) = (x.round(), y.round());
        if !px.is_finite() || !py.is_finite() || px < 0.0 || py < 0.0 {
            return 0;
        }
        self.pixmap.pixel(px as u32, py as u32).map_or(0, |c| c.alpha())
    }

    /// Whether every pixel is fully transparent.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|c| c.alpha() == 0)
    }

    /// Encode the surface as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Encode`] if the encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.pixmap.encode_png().map_err(|e| SurfaceError::Encode(e.to_string()))
    }

    /// Decode PNG bytes into a surface.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Decode`] for anything that is not a readable PNG.
    pub fn decode_png(bytes: &[u8]) -> Result<Self, SurfaceError> {
        Pixmap::decode_png(bytes).map(Self::from_pixmap).map_err(|e| SurfaceError::Decode(e.to_string()))
    }
}
