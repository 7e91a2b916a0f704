use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};

use crate::device::{
    DeviceCapability, DeviceId, GpuDevice, GpuTexture, MemoryPool, ShareHandle, TextureDesc,
    TextureHandle, TextureLock,
};
use crate::foundation::error::{TexelaError, TexelaResult};

/// Configuration for a [`SoftwareDevice`].
#[derive(Debug, Clone, Copy)]
pub struct SoftwareDeviceOpts {
    /// Simulated driver row-pitch alignment in bytes.
    ///
    /// Locked rows are padded out to this alignment, so a texture's pitch is
    /// usually wider than its packed row width. Upload paths must never
    /// assume the two are equal.
    pub pitch_alignment: usize,
}

impl Default for SoftwareDeviceOpts {
    fn default() -> Self {
        Self {
            pitch_alignment: 64,
        }
    }
}

/// Counters of device work performed, for cache-behavior assertions.
#[derive(Debug, Default, Clone)]
pub struct DeviceStats {
    /// Textures allocated across all pools.
    pub textures_created: u64,
    /// Lock acquisitions.
    pub locks: u64,
    /// Staging-to-default surface updates.
    pub surface_updates: u64,
    /// Shared-surface opens.
    pub shared_opens: u64,
}

impl DeviceStats {
    /// Total device calls performed.
    pub fn total_calls(&self) -> u64 {
        self.textures_created + self.locks + self.surface_updates + self.shared_opens
    }
}

struct SharedEntry {
    desc: TextureDesc,
    pitch: usize,
    bytes: Arc<Mutex<Vec<u8>>>,
}

// Simulated driver-wide namespace for shared resources, so one software
// device can open what another exported.
static SHARED_REGISTRY: LazyLock<Mutex<HashMap<u64, SharedEntry>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

static NEXT_SHARE_HANDLE: AtomicU64 = AtomicU64::new(1);

fn lock_unpoisoned<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    match m.lock() {
        Ok(g) => g,
        Err(poisoned) => poisoned.into_inner(),
    }
}

struct SoftwareTexture {
    desc: TextureDesc,
    pool: MemoryPool,
    pitch: usize,
    device: DeviceId,
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl GpuTexture for SoftwareTexture {
    fn desc(&self) -> TextureDesc {
        self.desc
    }

    fn device(&self) -> DeviceId {
        self.device
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

struct SoftwareLockGuard<'a> {
    pitch: usize,
    bytes: MutexGuard<'a, Vec<u8>>,
}

impl TextureLock for SoftwareLockGuard<'_> {
    fn pitch(&self) -> usize {
        self.pitch
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

/// In-memory reference implementation of [`GpuDevice`].
///
/// Textures are plain byte buffers with a simulated row pitch. Both
/// capability classes are available, so the same tests exercise the direct
/// lock and the stage-and-copy upload paths deterministically. Intended for
/// tests and headless validation, not for presenting anything.
pub struct SoftwareDevice {
    id: DeviceId,
    capability: DeviceCapability,
    opts: SoftwareDeviceOpts,
    stats: Mutex<DeviceStats>,
}

impl SoftwareDevice {
    /// Create a device of the given capability class with default options.
    pub fn new(capability: DeviceCapability) -> Self {
        Self::with_opts(capability, SoftwareDeviceOpts::default())
    }

    /// Create a device with explicit options.
    pub fn with_opts(capability: DeviceCapability, opts: SoftwareDeviceOpts) -> Self {
        Self {
            id: DeviceId::fresh(),
            capability,
            opts,
            stats: Mutex::new(DeviceStats::default()),
        }
    }

    /// Snapshot of the device-call counters.
    pub fn stats(&self) -> DeviceStats {
        lock_unpoisoned(&self.stats).clone()
    }

    fn pitch_for(&self, desc: TextureDesc) -> usize {
        let align = self.opts.pitch_alignment.max(1);
        desc.row_bytes().div_ceil(align) * align
    }

    fn downcast<'a>(&self, texture: &'a TextureHandle) -> TexelaResult<&'a SoftwareTexture> {
        let tex = texture
            .as_any()
            .downcast_ref::<SoftwareTexture>()
            .ok_or_else(|| TexelaError::validation("texture is not a software texture"))?;
        if tex.device != self.id {
            return Err(TexelaError::validation(
                "texture belongs to a different device",
            ));
        }
        Ok(tex)
    }

    /// Export a texture's backing into the shared-resource namespace.
    ///
    /// The returned handle can be redeemed via [`GpuDevice::open_shared`] on
    /// any software device. The backing stays owned by this device's
    /// texture; views alias it.
    pub fn export_shared(&self, texture: &TextureHandle) -> TexelaResult<ShareHandle> {
        let tex = self.downcast(texture)?;
        let handle = NEXT_SHARE_HANDLE.fetch_add(1, Ordering::Relaxed);
        lock_unpoisoned(&SHARED_REGISTRY).insert(
            handle,
            SharedEntry {
                desc: tex.desc,
                pitch: tex.pitch,
                bytes: Arc::clone(&tex.bytes),
            },
        );
        Ok(ShareHandle(handle))
    }

    /// Read back a texture's content as tightly packed rows.
    pub fn read_back(&self, texture: &TextureHandle) -> TexelaResult<Vec<u8>> {
        let tex = self.downcast(texture)?;
        let bytes = lock_unpoisoned(&tex.bytes);
        let row = tex.desc.row_bytes();
        let mut out = Vec::with_capacity(row * tex.desc.height as usize);
        for y in 0..tex.desc.height as usize {
            let start = y * tex.pitch;
            out.extend_from_slice(&bytes[start..start + row]);
        }
        Ok(out)
    }
}

impl GpuDevice for SoftwareDevice {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn capability(&self) -> DeviceCapability {
        self.capability
    }

    fn create_texture(&self, desc: TextureDesc, pool: MemoryPool) -> TexelaResult<TextureHandle> {
        if desc.width == 0 || desc.height == 0 {
            return Err(TexelaError::allocation("zero-sized texture"));
        }
        if pool == MemoryPool::Managed && self.capability == DeviceCapability::Extended {
            return Err(TexelaError::allocation(
                "managed pool unavailable on extended-class devices",
            ));
        }
        let pitch = self.pitch_for(desc);
        let len = pitch
            .checked_mul(desc.height as usize)
            .ok_or_else(|| TexelaError::allocation("texture size overflow"))?;
        lock_unpoisoned(&self.stats).textures_created += 1;
        Ok(Arc::new(SoftwareTexture {
            desc,
            pool,
            pitch,
            device: self.id,
            bytes: Arc::new(Mutex::new(vec![0; len])),
        }))
    }

    fn lock<'a>(&'a self, texture: &'a TextureHandle) -> TexelaResult<Box<dyn TextureLock + 'a>> {
        let tex = self.downcast(texture)?;
        if tex.pool == MemoryPool::Default {
            return Err(TexelaError::lock("default-pool textures are not lockable"));
        }
        lock_unpoisoned(&self.stats).locks += 1;
        Ok(Box::new(SoftwareLockGuard {
            pitch: tex.pitch,
            bytes: lock_unpoisoned(&tex.bytes),
        }))
    }

    fn update_surface(&self, src: &TextureHandle, dst: &TextureHandle) -> TexelaResult<()> {
        let src = self.downcast(src)?;
        let dst = self.downcast(dst)?;
        if src.pool != MemoryPool::Staging || dst.pool != MemoryPool::Default {
            return Err(TexelaError::validation(
                "update_surface requires a staging source and a default-pool destination",
            ));
        }
        if src.desc != dst.desc {
            return Err(TexelaError::validation(
                "update_surface requires matching descriptions",
            ));
        }
        let row = src.desc.row_bytes();
        let src_bytes = lock_unpoisoned(&src.bytes);
        let mut dst_bytes = lock_unpoisoned(&dst.bytes);
        for y in 0..src.desc.height as usize {
            let s = y * src.pitch;
            let d = y * dst.pitch;
            dst_bytes[d..d + row].copy_from_slice(&src_bytes[s..s + row]);
        }
        lock_unpoisoned(&self.stats).surface_updates += 1;
        Ok(())
    }

    fn open_shared(&self, desc: TextureDesc, handle: ShareHandle) -> TexelaResult<TextureHandle> {
        let registry = lock_unpoisoned(&SHARED_REGISTRY);
        let entry = registry
            .get(&handle.0)
            .ok_or_else(|| TexelaError::allocation("share handle rejected: unknown resource"))?;
        if entry.desc != desc {
            return Err(TexelaError::allocation(
                "share handle rejected: descriptor does not match exported surface",
            ));
        }
        lock_unpoisoned(&self.stats).shared_opens += 1;
        // A view on the producer's backing: same bytes, this device's identity.
        Ok(Arc::new(SoftwareTexture {
            desc: entry.desc,
            pool: MemoryPool::Default,
            pitch: entry.pitch,
            device: self.id,
            bytes: Arc::clone(&entry.bytes),
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/device_software.rs"]
mod tests;
