use std::cell::RefCell;
use std::sync::Arc;

use crate::cache::BackendCacheSlot;
use crate::device::{ShareHandle, TextureDesc, TextureFormat};
use crate::foundation::core::{PlaneSize, VisibleRect};
use crate::foundation::error::{TexelaError, TexelaResult};

/// Pixel layout of a packed surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PackedFormat {
    /// 8-bit alpha-only.
    A8,
    /// 32-bit BGRA with alpha.
    Bgra8,
    /// 32-bit BGRX, alpha byte ignored.
    Bgrx8,
}

impl PackedFormat {
    /// Bytes per pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::A8 => 1,
            Self::Bgra8 | Self::Bgrx8 => 4,
        }
    }

    /// Whether content in this format carries translucency.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::A8 | Self::Bgra8)
    }

    /// Texture format the upload path allocates for this surface format.
    pub fn texture_format(self) -> TextureFormat {
        match self {
            Self::A8 => TextureFormat::A8,
            Self::Bgra8 => TextureFormat::Bgra8,
            Self::Bgrx8 => TextureFormat::Bgrx8,
        }
    }
}

fn check_plane(len: usize, stride: usize, size: PlaneSize, bpp: usize) -> TexelaResult<()> {
    if size.width == 0 || size.height == 0 {
        return Err(TexelaError::validation("plane size must be non-zero"));
    }
    let row_bytes = (size.width as usize).saturating_mul(bpp);
    if stride < row_bytes {
        return Err(TexelaError::validation("plane stride narrower than a row"));
    }
    let required = stride
        .checked_mul(size.height as usize - 1)
        .and_then(|v| v.checked_add(row_bytes))
        .ok_or_else(|| TexelaError::validation("plane size overflow"))?;
    if len < required {
        return Err(TexelaError::validation("plane buffer shorter than geometry"));
    }
    Ok(())
}

/// Packed pixel surface: interleaved channels in a single immutable buffer.
#[derive(Clone, Debug)]
pub struct PackedSurface {
    size: PlaneSize,
    stride: usize,
    format: PackedFormat,
    data: Arc<[u8]>,
}

impl PackedSurface {
    /// Create a validated surface over an immutable byte buffer.
    ///
    /// `stride` is the byte distance between rows; it must cover at least
    /// one packed row and the buffer must cover `stride * (height - 1)` plus
    /// a final row.
    pub fn new(
        size: PlaneSize,
        stride: usize,
        format: PackedFormat,
        data: impl Into<Arc<[u8]>>,
    ) -> TexelaResult<Self> {
        let data = data.into();
        check_plane(data.len(), stride, size, format.bytes_per_pixel())?;
        Ok(Self {
            size,
            stride,
            format,
            data,
        })
    }

    /// Surface dimensions in pixels.
    pub fn size(&self) -> PlaneSize {
        self.size
    }

    /// Byte distance between rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel layout.
    pub fn format(&self) -> PackedFormat {
        self.format
    }

    /// Raw pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// One plane of a planar frame: an immutable buffer plus its row stride.
#[derive(Clone, Debug)]
pub struct Plane {
    /// Plane bytes, one byte per sample.
    pub data: Arc<[u8]>,
    /// Byte distance between rows, at least the plane width.
    pub stride: usize,
}

impl Plane {
    /// Create a plane over an immutable byte buffer.
    pub fn new(data: impl Into<Arc<[u8]>>, stride: usize) -> Self {
        Self {
            data: data.into(),
            stride,
        }
    }
}

/// Planar chroma-subsampled video frame (YCbCr 4:2:0).
///
/// The luma plane and the two chroma planes are independently strided; both
/// chroma planes share one allocated size. The visible sub-rectangle names
/// the picture region inside the (typically block-padded) luma allocation;
/// it is never baked into uploaded textures.
#[derive(Clone, Debug)]
pub struct PlanarYCbCr {
    y: Plane,
    cb: Plane,
    cr: Plane,
    y_size: PlaneSize,
    chroma_size: PlaneSize,
    visible: VisibleRect,
}

impl PlanarYCbCr {
    /// Create a validated planar frame.
    ///
    /// Each plane buffer must cover its declared geometry, and `visible`
    /// must fit inside the allocated luma size. An empty `visible` rect is
    /// accepted here and rejected at classification time.
    pub fn new(
        y: Plane,
        cb: Plane,
        cr: Plane,
        y_size: PlaneSize,
        chroma_size: PlaneSize,
        visible: VisibleRect,
    ) -> TexelaResult<Self> {
        check_plane(y.data.len(), y.stride, y_size, 1)?;
        check_plane(cb.data.len(), cb.stride, chroma_size, 1)?;
        check_plane(cr.data.len(), cr.stride, chroma_size, 1)?;
        if !visible.is_empty() {
            // Containment check; the normalized value is recomputed on demand.
            visible.normalized_in(y_size)?;
        }
        Ok(Self {
            y,
            cb,
            cr,
            y_size,
            chroma_size,
            visible,
        })
    }

    /// Luma plane.
    pub fn y(&self) -> &Plane {
        &self.y
    }

    /// Blue-difference chroma plane.
    pub fn cb(&self) -> &Plane {
        &self.cb
    }

    /// Red-difference chroma plane.
    pub fn cr(&self) -> &Plane {
        &self.cr
    }

    /// Allocated luma plane size.
    pub fn y_size(&self) -> PlaneSize {
        self.y_size
    }

    /// Allocated size shared by both chroma planes.
    pub fn chroma_size(&self) -> PlaneSize {
        self.chroma_size
    }

    /// Visible picture region inside the luma allocation.
    pub fn visible(&self) -> VisibleRect {
        self.visible
    }

    /// Whether the frame has renderable content.
    pub fn is_valid(&self) -> bool {
        !self.visible.is_empty()
    }
}

/// Descriptor of a GPU surface produced by a foreign device.
///
/// Carries no pixel access; the surface is reachable only by redeeming the
/// share handle on the compositor's device. The producer must export a
/// 32-bit RGB surface without alpha.
#[derive(Clone, Copy, Debug)]
pub struct ExternalSurface {
    /// Format and dimensions of the foreign surface.
    pub desc: TextureDesc,
    /// Cross-device sharing token exported by the producer.
    pub handle: ShareHandle,
}

impl ExternalSurface {
    /// Create a descriptor for a foreign surface.
    pub fn new(desc: TextureDesc, handle: ShareHandle) -> Self {
        Self { desc, handle }
    }
}

/// The pixel source backing a [`Frame`].
#[derive(Clone, Debug)]
pub enum FrameSource {
    /// Packed interleaved pixels in CPU memory.
    Packed(PackedSurface),
    /// Planar YCbCr planes in CPU memory.
    PlanarYCbCr(PlanarYCbCr),
    /// GPU surface owned by a foreign decoding device.
    ExternalGpu(ExternalSurface),
}

/// Upload path selected for a frame by [`FrameSource::classify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadClass {
    /// Packed pixel upload; `has_alpha` reports translucency of the content.
    Packed {
        /// Whether the packed format carries an alpha channel.
        has_alpha: bool,
    },
    /// Three-plane luma/chroma upload.
    Planar,
    /// Zero-copy open of a foreign shared surface.
    ExternalShared,
}

impl FrameSource {
    /// Map this source to its upload path.
    ///
    /// A planar frame without renderable content is a hard error; the caller
    /// is expected to skip the frame and log, not crash.
    pub fn classify(&self) -> TexelaResult<UploadClass> {
        match self {
            Self::Packed(surface) => Ok(UploadClass::Packed {
                has_alpha: surface.format().has_alpha(),
            }),
            Self::PlanarYCbCr(planar) => {
                if planar.is_valid() {
                    Ok(UploadClass::Planar)
                } else {
                    Err(TexelaError::unsupported_frame(
                        "planar frame has no visible pixels",
                    ))
                }
            }
            Self::ExternalGpu(_) => Ok(UploadClass::ExternalShared),
        }
    }
}

/// A frame handed to the compositor, with its lazily populated texture cache.
///
/// Pixel content is immutable once the frame is observable; only the backend
/// cache cell mutates, and only on the device thread. Frames move between
/// threads by value (`Send`), but a frame is not shared concurrently
/// (`!Sync`): the producer hands it off once, before first materialization.
#[derive(Debug)]
pub struct Frame {
    source: FrameSource,
    cache: RefCell<Option<BackendCacheSlot>>,
}

impl Frame {
    /// Wrap a pixel source into a cacheable frame.
    pub fn new(source: FrameSource) -> Self {
        Self {
            source,
            cache: RefCell::new(None),
        }
    }

    /// The frame's pixel source.
    pub fn source(&self) -> &FrameSource {
        &self.source
    }

    pub(crate) fn cache_cell(&self) -> &RefCell<Option<BackendCacheSlot>> {
        &self.cache
    }
}

impl From<PackedSurface> for Frame {
    fn from(surface: PackedSurface) -> Self {
        Self::new(FrameSource::Packed(surface))
    }
}

impl From<PlanarYCbCr> for Frame {
    fn from(planar: PlanarYCbCr) -> Self {
        Self::new(FrameSource::PlanarYCbCr(planar))
    }
}

impl From<ExternalSurface> for Frame {
    fn from(external: ExternalSurface) -> Self {
        Self::new(FrameSource::ExternalGpu(external))
    }
}

#[cfg(test)]
#[path = "../tests/unit/frame.rs"]
mod tests;
