use crate::cache::{BackendCacheSlot, CachedTextures};
use crate::device::{GpuDevice, TextureHandle};
use crate::foundation::core::TexRect;
use crate::foundation::error::{TexelaError, TexelaResult};
use crate::frame::{Frame, FrameSource, UploadClass};
use crate::upload::packed::upload_packed;
use crate::upload::planar::upload_planar;
use crate::upload::shared::open_shared;

/// Bindable textures for one materialized frame.
#[derive(Clone)]
pub enum TextureSet {
    /// One texture: packed uploads and shared-surface opens.
    Single(TextureHandle),
    /// Three single-channel textures for a planar frame.
    Planar {
        /// Luma texture, allocated-luma sized.
        y: TextureHandle,
        /// Blue-difference chroma texture.
        cb: TextureHandle,
        /// Red-difference chroma texture, same size as `cb`.
        cr: TextureHandle,
    },
}

impl std::fmt::Debug for TextureSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureSet::Single(tex) => f.debug_tuple("Single").field(&tex.desc()).finish(),
            TextureSet::Planar { y, cb, cr } => f
                .debug_struct("Planar")
                .field("y", &y.desc())
                .field("cb", &cb.desc())
                .field("cr", &cr.desc())
                .finish(),
        }
    }
}

/// Result of materializing a frame on a device.
#[derive(Clone, Debug)]
pub struct MaterializedFrame {
    /// Textures ready to bind on the requesting device.
    pub textures: TextureSet,
    /// Whether the content carries translucency.
    pub has_alpha: bool,
    /// For planar frames, the visible picture region normalized against the
    /// allocated luma size, for use as texture coordinates.
    pub visible_rect: Option<TexRect>,
}

fn convert(source: &FrameSource, device: &dyn GpuDevice) -> TexelaResult<CachedTextures> {
    match source {
        FrameSource::Packed(surface) => {
            upload_packed(device, surface).map(CachedTextures::Single)
        }
        FrameSource::PlanarYCbCr(planar) => {
            upload_planar(device, planar).map(CachedTextures::Planar)
        }
        FrameSource::ExternalGpu(external) => {
            open_shared(device, external).map(CachedTextures::Single)
        }
    }
}

/// Produce a bindable texture set for `frame` on `device`.
///
/// The first request for a given `(frame, device)` pair performs the upload
/// (or shared open) and stores the result in the frame's cache slot;
/// subsequent requests return the identical cached handles with zero device
/// work. A slot built on a different device is stale: it is discarded and
/// the frame reconverted. Frame pixel content is never mutated.
///
/// Any failure is terminal for this frame's render attempt only; nothing
/// partial is cached and the caller simply renders nothing for this frame.
#[tracing::instrument(skip_all)]
pub fn ensure_texture(frame: &Frame, device: &dyn GpuDevice) -> TexelaResult<MaterializedFrame> {
    let class = frame.source().classify()?;

    let mut cache = frame.cache_cell().borrow_mut();
    let needs_build = match cache.as_ref() {
        Some(slot) if slot.is_valid_for(device.id()) => false,
        Some(_) => {
            tracing::debug!("cached textures belong to a different device; rebuilding");
            true
        }
        None => true,
    };

    if needs_build {
        // Discard any stale slot before converting so a failed rebuild
        // leaves the slot empty rather than stale.
        *cache = None;
        let textures = convert(frame.source(), device).inspect_err(|err| {
            tracing::warn!(%err, "frame materialization failed; frame will not render this tick");
        })?;
        *cache = Some(BackendCacheSlot::new(device.id(), textures));
    }

    let slot = cache
        .as_ref()
        .ok_or_else(|| TexelaError::validation("cache slot missing after conversion"))?;

    let visible_rect = match frame.source() {
        FrameSource::PlanarYCbCr(planar) => {
            Some(planar.visible().normalized_in(planar.y_size())?)
        }
        _ => None,
    };

    Ok(MaterializedFrame {
        textures: slot.texture_set(),
        has_alpha: matches!(class, UploadClass::Packed { has_alpha: true }),
        visible_rect,
    })
}

#[cfg(test)]
#[path = "../tests/unit/materialize.rs"]
mod tests;
