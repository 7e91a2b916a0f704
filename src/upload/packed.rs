use crate::device::{GpuDevice, TextureDesc, TextureHandle};
use crate::foundation::error::TexelaResult;
use crate::frame::PackedSurface;
use crate::upload::strategy::{PlaneSource, strategy_for};

/// Upload a packed surface into a single texture.
///
/// The texture format follows the surface format (8-bit for alpha-only,
/// 32-bit otherwise). Content is a byte-exact copy of every covered row;
/// padding beyond the packed width is left unspecified.
pub(crate) fn upload_packed(
    device: &dyn GpuDevice,
    surface: &PackedSurface,
) -> TexelaResult<TextureHandle> {
    let size = surface.size();
    let desc = TextureDesc {
        width: size.width,
        height: size.height,
        format: surface.format().texture_format(),
    };
    let src = PlaneSource {
        bytes: surface.data(),
        stride: surface.stride(),
        row_bytes: desc.row_bytes(),
        rows: size.height,
    };
    strategy_for(device.capability()).upload(device, desc, src)
}
