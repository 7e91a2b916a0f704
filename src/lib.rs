//! Texela turns frames into renderable GPU textures and caches the result.
//!
//! It is the materialization layer beneath a frame compositor: given a frame
//! (packed RGB/alpha pixels, planar YCbCr 4:2:0 planes, or a GPU surface
//! exported by a separate decoding device) and the active rendering device,
//! it answers one question, "produce a usable texture set for this frame on
//! this device", and remembers the answer on the frame itself.
//!
//! # Pipeline overview
//!
//! 1. **Classify**: `FrameSource -> UploadClass` (which upload path, alpha?)
//! 2. **Upload**: packed pixels or chroma planes are copied into textures via
//!    a capability-selected strategy (direct lock on standard devices,
//!    stage-and-copy on extended ones); shared decoder surfaces are opened
//!    as zero-copy views
//! 3. **Cache**: the produced textures live in a per-frame slot tagged with
//!    the producing device's identity
//! 4. **Validate**: every request checks slot/device affinity; a stale slot
//!    is discarded and rebuilt, a valid one costs nothing
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate; plane buffers are
//!   owned byte buffers, device locks are scoped guards.
//! - **Frames are immutable**: pixel content never changes once a frame is
//!   observable, which is what makes per-frame caching sound.
//! - **Single-threaded device use**: all texture creation, locking, and
//!   copies happen on the thread owning the device context.
//! - **Failures stay per-frame**: an allocation or lock failure means "render
//!   nothing for this frame"; it never escalates past [`ensure_texture`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cache;
mod device;
mod foundation;
mod frame;
mod materialize;
mod upload;

pub use crate::device::software::{DeviceStats, SoftwareDevice, SoftwareDeviceOpts};
pub use crate::device::{
    DeviceCapability, DeviceId, GpuDevice, GpuTexture, MemoryPool, ShareHandle, TextureDesc,
    TextureFormat, TextureHandle, TextureLock,
};
pub use crate::foundation::core::{PlaneSize, TexRect, VisibleRect};
pub use crate::foundation::error::{TexelaError, TexelaResult};
pub use crate::frame::{
    ExternalSurface, Frame, FrameSource, PackedFormat, PackedSurface, Plane, PlanarYCbCr,
    UploadClass,
};
pub use crate::materialize::{MaterializedFrame, TextureSet, ensure_texture};
