use super::*;
use crate::device::software::{SoftwareDevice, SoftwareDeviceOpts};
use crate::device::{DeviceCapability, TextureFormat};
use crate::foundation::error::TexelaError;

fn desc_4x4_bgra() -> TextureDesc {
    TextureDesc {
        width: 4,
        height: 4,
        format: TextureFormat::Bgra8,
    }
}

/// 4x4 BGRA rows at stride 20: four padding bytes per row.
fn padded_source() -> Vec<u8> {
    let mut bytes = vec![0xee_u8; 20 * 4];
    for (row, chunk) in bytes.chunks_mut(20).enumerate() {
        for (i, b) in chunk[..16].iter_mut().enumerate() {
            *b = (row * 16 + i) as u8;
        }
    }
    bytes
}

fn tight_rows(padded: &[u8]) -> Vec<u8> {
    padded.chunks(20).flat_map(|row| &row[..16]).copied().collect()
}

#[test]
fn direct_lock_honors_destination_pitch() {
    let device = SoftwareDevice::with_opts(
        DeviceCapability::Standard,
        SoftwareDeviceOpts {
            pitch_alignment: 64,
        },
    );
    let bytes = padded_source();
    let src = PlaneSource {
        bytes: &bytes,
        stride: 20,
        row_bytes: 16,
        rows: 4,
    };

    let texture = strategy_for(device.capability())
        .upload(&device, desc_4x4_bgra(), src)
        .unwrap();

    assert_eq!(device.read_back(&texture).unwrap(), tight_rows(&bytes));
    let stats = device.stats();
    assert_eq!(stats.textures_created, 1);
    assert_eq!(stats.locks, 1);
    assert_eq!(stats.surface_updates, 0);
}

#[test]
fn stage_and_copy_fills_default_pool_texture() {
    let device = SoftwareDevice::new(DeviceCapability::Extended);
    let bytes = padded_source();
    let src = PlaneSource {
        bytes: &bytes,
        stride: 20,
        row_bytes: 16,
        rows: 4,
    };

    let texture = strategy_for(device.capability())
        .upload(&device, desc_4x4_bgra(), src)
        .unwrap();

    assert_eq!(device.read_back(&texture).unwrap(), tight_rows(&bytes));
    let stats = device.stats();
    // Destination plus staging, one lock of the staging surface, one update.
    assert_eq!(stats.textures_created, 2);
    assert_eq!(stats.locks, 1);
    assert_eq!(stats.surface_updates, 1);
}

#[test]
fn copy_rows_rejects_narrow_pitch() {
    struct NarrowLock {
        bytes: Vec<u8>,
    }

    impl TextureLock for NarrowLock {
        fn pitch(&self) -> usize {
            8
        }

        fn bytes_mut(&mut self) -> &mut [u8] {
            &mut self.bytes
        }
    }

    let bytes = vec![0u8; 64];
    let src = PlaneSource {
        bytes: &bytes,
        stride: 16,
        row_bytes: 16,
        rows: 4,
    };
    let mut lock = NarrowLock {
        bytes: vec![0; 32],
    };
    assert!(matches!(
        copy_rows(&mut lock, src),
        Err(TexelaError::Lock(_))
    ));
}

#[test]
fn copy_rows_rejects_short_locked_region() {
    struct ShortLock {
        bytes: Vec<u8>,
    }

    impl TextureLock for ShortLock {
        fn pitch(&self) -> usize {
            16
        }

        fn bytes_mut(&mut self) -> &mut [u8] {
            &mut self.bytes
        }
    }

    let bytes = vec![0u8; 64];
    let src = PlaneSource {
        bytes: &bytes,
        stride: 16,
        row_bytes: 16,
        rows: 4,
    };
    // Pitch is wide enough, but the mapped region covers only two rows.
    let mut lock = ShortLock {
        bytes: vec![0; 32],
    };
    assert!(matches!(
        copy_rows(&mut lock, src),
        Err(TexelaError::Lock(_))
    ));
}
