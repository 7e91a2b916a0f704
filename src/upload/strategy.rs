use crate::device::{
    DeviceCapability, GpuDevice, MemoryPool, TextureDesc, TextureHandle, TextureLock,
};
use crate::foundation::error::{TexelaError, TexelaResult};

/// Borrowed view of one source plane for an upload.
#[derive(Clone, Copy)]
pub(crate) struct PlaneSource<'a> {
    /// Source bytes.
    pub(crate) bytes: &'a [u8],
    /// Byte distance between source rows.
    pub(crate) stride: usize,
    /// Bytes per packed row actually copied.
    pub(crate) row_bytes: usize,
    /// Number of rows.
    pub(crate) rows: u32,
}

/// One capability-specific way of getting CPU bytes into a device texture.
///
/// Selected once per device and reused across all frame kinds, so the
/// capability branch lives in exactly one place.
pub(crate) trait UploadStrategy {
    /// Allocate a texture for `desc` and fill it with `src`.
    fn upload(
        &self,
        device: &dyn GpuDevice,
        desc: TextureDesc,
        src: PlaneSource<'_>,
    ) -> TexelaResult<TextureHandle>;
}

/// Pick the upload strategy for a device's capability class.
pub(crate) fn strategy_for(capability: DeviceCapability) -> &'static dyn UploadStrategy {
    match capability {
        DeviceCapability::Standard => &DirectLock,
        DeviceCapability::Extended => &StageAndCopy,
    }
}

/// Copy `src` rows into a locked destination, honoring the destination's
/// device-reported pitch. Source and destination strides are never assumed
/// equal.
fn copy_rows(dst: &mut dyn TextureLock, src: PlaneSource<'_>) -> TexelaResult<()> {
    let pitch = dst.pitch();
    if pitch < src.row_bytes {
        return Err(TexelaError::lock("destination pitch narrower than a row"));
    }
    let bytes = dst.bytes_mut();
    let required = (src.rows as usize)
        .checked_mul(pitch)
        .ok_or_else(|| TexelaError::lock("destination size overflow"))?;
    if bytes.len() < required {
        return Err(TexelaError::lock(
            "locked region shorter than pitch times rows",
        ));
    }
    for y in 0..src.rows as usize {
        let s = y * src.stride;
        let d = y * pitch;
        bytes[d..d + src.row_bytes].copy_from_slice(&src.bytes[s..s + src.row_bytes]);
    }
    Ok(())
}

/// Standard-class path: allocate in the driver-managed pool and write the
/// whole texture through a direct CPU lock.
pub(crate) struct DirectLock;

impl UploadStrategy for DirectLock {
    fn upload(
        &self,
        device: &dyn GpuDevice,
        desc: TextureDesc,
        src: PlaneSource<'_>,
    ) -> TexelaResult<TextureHandle> {
        let texture = device.create_texture(desc, MemoryPool::Managed)?;
        let mut lock = device.lock(&texture)?;
        copy_rows(lock.as_mut(), src)?;
        drop(lock);
        Ok(texture)
    }
}

/// Extended-class path: the destination lives in the non-CPU-accessible
/// default pool, so writes go through a CPU-visible staging texture followed
/// by a device-level surface update. The staging texture is released as soon
/// as the update is issued.
pub(crate) struct StageAndCopy;

impl UploadStrategy for StageAndCopy {
    fn upload(
        &self,
        device: &dyn GpuDevice,
        desc: TextureDesc,
        src: PlaneSource<'_>,
    ) -> TexelaResult<TextureHandle> {
        let texture = device.create_texture(desc, MemoryPool::Default)?;
        let staging = device.create_texture(desc, MemoryPool::Staging)?;
        {
            let mut lock = device.lock(&staging)?;
            copy_rows(lock.as_mut(), src)?;
        }
        device.update_surface(&staging, &texture)?;
        Ok(texture)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/upload/strategy.rs"]
mod tests;
