use crate::device::{DeviceId, TextureHandle};
use crate::materialize::TextureSet;
use crate::upload::planar::PlanarTextures;

/// Textures held by a cache slot.
#[derive(Clone)]
pub(crate) enum CachedTextures {
    /// One texture (packed upload or shared open).
    Single(TextureHandle),
    /// Luma plus two chroma textures.
    Planar(PlanarTextures),
}

/// Per-frame cache of produced GPU objects, tagged with the device that
/// produced them.
///
/// A slot's textures are valid to bind only while the recorded device
/// identity equals the compositor's current device; a stale slot is
/// discarded and rebuilt whole, never patched in place. The slot owns the
/// textures it holds (for a shared open, it owns the view, not the foreign
/// backing) and releases them when replaced or when its frame is dropped.
#[derive(Clone)]
pub(crate) struct BackendCacheSlot {
    device: DeviceId,
    textures: CachedTextures,
}

impl BackendCacheSlot {
    pub(crate) fn new(device: DeviceId, textures: CachedTextures) -> Self {
        Self { device, textures }
    }

    /// Identity comparison against the active device. Capability class is
    /// irrelevant here: two devices of the same class are distinct caches.
    pub(crate) fn is_valid_for(&self, device: DeviceId) -> bool {
        self.device == device
    }

    pub(crate) fn texture_set(&self) -> TextureSet {
        match &self.textures {
            CachedTextures::Single(texture) => TextureSet::Single(texture.clone()),
            CachedTextures::Planar(planes) => TextureSet::Planar {
                y: planes.y.clone(),
                cb: planes.cb.clone(),
                cr: planes.cr.clone(),
            },
        }
    }
}

impl std::fmt::Debug for BackendCacheSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.textures {
            CachedTextures::Single(_) => "single",
            CachedTextures::Planar(_) => "planar",
        };
        f.debug_struct("BackendCacheSlot")
            .field("device", &self.device)
            .field("textures", &kind)
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/unit/cache.rs"]
mod tests;
