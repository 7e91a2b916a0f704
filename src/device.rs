use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::error::TexelaResult;

pub(crate) mod software;

/// Identity token for a rendering device *instance*.
///
/// Cache affinity is compared by identity, never by capability class: two
/// devices of the same class are still distinct caches. Holding a `DeviceId`
/// does not keep the device alive; it is only comparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeviceId(u64);

impl DeviceId {
    /// Allocate a process-unique device identity.
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Device capability class, probed once per device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceCapability {
    /// Supports managed-pool textures: the driver keeps them resident and
    /// re-uploads transparently, and they are directly CPU-lockable.
    Standard,
    /// No managed pool. Uploads require a CPU-visible staging texture plus an
    /// explicit device-level copy into the destination.
    Extended,
}

/// Named GPU memory pools with distinct update semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryPool {
    /// Driver-managed, CPU-lockable (standard-class devices only).
    Managed,
    /// Device-local, not CPU-accessible; written via surface updates.
    Default,
    /// CPU-visible scratch used as the source of a surface update.
    Staging,
}

/// Texture pixel formats used by the upload paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TextureFormat {
    /// 8-bit alpha-only.
    A8,
    /// 8-bit single-channel luminance (YCbCr planes).
    L8,
    /// 32-bit BGRA.
    Bgra8,
    /// 32-bit BGRX; the X byte is ignored (no alpha).
    Bgrx8,
}

impl TextureFormat {
    /// Bytes per pixel for this format.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::A8 | Self::L8 => 1,
            Self::Bgra8 | Self::Bgrx8 => 4,
        }
    }
}

/// Immutable description of a texture allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextureDesc {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel format.
    pub format: TextureFormat,
}

impl TextureDesc {
    /// Bytes in one tightly packed row.
    pub fn row_bytes(self) -> usize {
        (self.width as usize).saturating_mul(self.format.bytes_per_pixel())
    }
}

/// Opaque cross-device resource-sharing token.
///
/// Exported by a foreign device (typically a hardware video decoder) and
/// redeemed on the compositor's device to open a view onto the same GPU
/// memory. The token carries no lifetime guarantee of its own; the backing
/// allocation remains owned by the producer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ShareHandle(pub u64);

/// A texture living on some device.
///
/// Handles are reference counted; a handle produced by an upload path owns
/// its backing allocation, while a handle produced by a shared open is a
/// *view* whose backing memory stays owned by the foreign producer.
pub trait GpuTexture: Send + Sync {
    /// Allocation description.
    fn desc(&self) -> TextureDesc;

    /// Identity of the device this texture belongs to.
    fn device(&self) -> DeviceId;

    /// Downcast support for device implementations.
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Shared handle to a device texture.
pub type TextureHandle = Arc<dyn GpuTexture>;

/// Scoped CPU mapping of a locked texture.
///
/// The guard unlocks on drop, on every exit path. `pitch` is the
/// device-reported destination row stride and may exceed the tightly packed
/// row width; callers must copy row by row honoring it.
pub trait TextureLock {
    /// Device-reported row pitch in bytes.
    fn pitch(&self) -> usize;

    /// Writable mapped bytes, `pitch * height` long.
    fn bytes_mut(&mut self) -> &mut [u8];
}

/// The rendering device boundary consumed by the upload paths.
///
/// All methods are synchronous driver calls and must be invoked from the one
/// thread that owns the device context. A failure is terminal for the
/// current frame's render attempt; nothing at this layer retries.
pub trait GpuDevice {
    /// Identity of this device instance.
    fn id(&self) -> DeviceId;

    /// Capability class of this device.
    fn capability(&self) -> DeviceCapability;

    /// Allocate a texture in the given memory pool.
    fn create_texture(&self, desc: TextureDesc, pool: MemoryPool) -> TexelaResult<TextureHandle>;

    /// Lock a CPU-lockable texture for direct writes.
    ///
    /// Only `Managed` and `Staging` pool textures are lockable.
    fn lock<'a>(&'a self, texture: &'a TextureHandle) -> TexelaResult<Box<dyn TextureLock + 'a>>;

    /// Device-level copy of `src`'s content into `dst`.
    ///
    /// `src` must live in the staging pool, `dst` in the default pool, with
    /// identical dimensions and format.
    fn update_surface(&self, src: &TextureHandle, dst: &TextureHandle) -> TexelaResult<()>;

    /// Open a view onto a foreign device's surface via its share handle.
    ///
    /// No pixel copy occurs; failure means the driver rejected the handle.
    fn open_shared(&self, desc: TextureDesc, handle: ShareHandle) -> TexelaResult<TextureHandle>;
}
