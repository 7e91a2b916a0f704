use crate::device::{GpuDevice, TextureDesc, TextureFormat, TextureHandle};
use crate::foundation::core::PlaneSize;
use crate::foundation::error::TexelaResult;
use crate::frame::{Plane, PlanarYCbCr};
use crate::upload::strategy::{PlaneSource, UploadStrategy, strategy_for};

/// The three single-channel textures of an uploaded planar frame.
#[derive(Clone)]
pub(crate) struct PlanarTextures {
    pub(crate) y: TextureHandle,
    pub(crate) cb: TextureHandle,
    pub(crate) cr: TextureHandle,
}

impl std::fmt::Debug for PlanarTextures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanarTextures")
            .field("y", &self.y.desc())
            .field("cb", &self.cb.desc())
            .field("cr", &self.cr.desc())
            .finish()
    }
}

fn upload_plane(
    strategy: &dyn UploadStrategy,
    device: &dyn GpuDevice,
    plane: &Plane,
    size: PlaneSize,
) -> TexelaResult<TextureHandle> {
    let desc = TextureDesc {
        width: size.width,
        height: size.height,
        format: TextureFormat::L8,
    };
    let src = PlaneSource {
        bytes: &plane.data,
        stride: plane.stride,
        row_bytes: desc.row_bytes(),
        rows: size.height,
    };
    strategy.upload(device, desc, src)
}

/// Upload a planar frame as three L8 textures, luma then Cb then Cr.
///
/// All three textures are produced or the whole operation fails; a partial
/// set is never returned. Each plane is copied with its own stride, so
/// corrupting one plane's source cannot leak into the others.
pub(crate) fn upload_planar(
    device: &dyn GpuDevice,
    frame: &PlanarYCbCr,
) -> TexelaResult<PlanarTextures> {
    let strategy = strategy_for(device.capability());
    let y = upload_plane(strategy, device, frame.y(), frame.y_size())?;
    let cb = upload_plane(strategy, device, frame.cb(), frame.chroma_size())?;
    let cr = upload_plane(strategy, device, frame.cr(), frame.chroma_size())?;
    Ok(PlanarTextures { y, cb, cr })
}

#[cfg(test)]
#[path = "../../tests/unit/upload/planar.rs"]
mod tests;
