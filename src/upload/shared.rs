use crate::device::{GpuDevice, TextureFormat, TextureHandle};
use crate::foundation::error::TexelaResult;
use crate::frame::ExternalSurface;

/// Open a texture aliasing a foreign device's surface. No pixels are copied.
///
/// The producer contract requires a 32-bit RGB surface without alpha; any
/// other format is a producer bug, asserted before the device is touched.
/// A driver rejecting the handle is recoverable and yields no texture.
pub(crate) fn open_shared(
    device: &dyn GpuDevice,
    external: &ExternalSurface,
) -> TexelaResult<TextureHandle> {
    assert!(
        external.desc.format == TextureFormat::Bgrx8,
        "shared surfaces must be 32-bit RGB without alpha, got {:?}",
        external.desc.format
    );
    device.open_shared(external.desc, external.handle)
}
