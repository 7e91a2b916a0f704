use crate::foundation::error::{TexelaError, TexelaResult};

/// Allocated size of a pixel plane or texture, in pixels.
///
/// For decoded video this is frequently larger than the visible picture:
/// codecs pad planes out to block-aligned dimensions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PlaneSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PlaneSize {
    /// Create a validated, non-degenerate size.
    pub fn new(width: u32, height: u32) -> TexelaResult<Self> {
        if width == 0 || height == 0 {
            return Err(TexelaError::validation("PlaneSize must be non-zero"));
        }
        Ok(Self { width, height })
    }

    /// Pixel count as `usize`, saturating on overflow.
    pub fn pixels(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

/// Visible sub-rectangle of a planar frame, in luma-plane pixel coordinates.
///
/// `x`/`y` offset plus `width`/`height` extent inside the *allocated* plane.
/// Construction does not check containment; [`VisibleRect::normalized_in`]
/// validates against the allocated size when the rect is consumed.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
pub struct VisibleRect {
    /// Horizontal offset of the visible region.
    pub x: u32,
    /// Vertical offset of the visible region.
    pub y: u32,
    /// Visible width in pixels.
    pub width: u32,
    /// Visible height in pixels.
    pub height: u32,
}

impl VisibleRect {
    /// Rect covering an entire allocation.
    pub fn full(size: PlaneSize) -> Self {
        Self {
            x: 0,
            y: 0,
            width: size.width,
            height: size.height,
        }
    }

    /// Return `true` when the rect has no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Normalize against an allocated plane size into texture coordinates.
    ///
    /// Computed as `(x/aw, y/ah, width/aw, height/ah)`. The rect must fit
    /// inside the allocation.
    pub fn normalized_in(self, alloc: PlaneSize) -> TexelaResult<TexRect> {
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        let fits = matches!((right, bottom), (Some(r), Some(b)) if r <= alloc.width && b <= alloc.height);
        if !fits {
            return Err(TexelaError::validation(
                "visible rect exceeds allocated plane size",
            ));
        }
        let aw = alloc.width as f32;
        let ah = alloc.height as f32;
        Ok(TexRect {
            x: self.x as f32 / aw,
            y: self.y as f32 / ah,
            width: self.width as f32 / aw,
            height: self.height as f32 / ah,
        })
    }
}

/// Normalized texture-coordinate rectangle in `[0, 1]` space.
///
/// Consumed by the renderer as shader constants so a padded plane samples
/// only its visible picture region.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TexRect {
    /// Normalized horizontal offset.
    pub x: f32,
    /// Normalized vertical offset.
    pub y: f32,
    /// Normalized width.
    pub width: f32,
    /// Normalized height.
    pub height: f32,
}

impl TexRect {
    /// The identity rect covering the whole texture.
    pub fn full() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
