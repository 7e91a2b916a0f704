use super::*;

fn bgra(w: u32, h: u32) -> TextureDesc {
    TextureDesc {
        width: w,
        height: h,
        format: crate::device::TextureFormat::Bgra8,
    }
}

#[test]
fn pitch_is_aligned_up_from_row_width() {
    let device = SoftwareDevice::with_opts(
        DeviceCapability::Standard,
        SoftwareDeviceOpts {
            pitch_alignment: 64,
        },
    );
    let texture = device
        .create_texture(bgra(4, 4), MemoryPool::Managed)
        .unwrap();
    let lock = device.lock(&texture).unwrap();
    assert_eq!(lock.pitch(), 64);
}

#[test]
fn managed_pool_rejected_on_extended_class() {
    let device = SoftwareDevice::new(DeviceCapability::Extended);
    assert!(matches!(
        device.create_texture(bgra(4, 4), MemoryPool::Managed),
        Err(TexelaError::Allocation(_))
    ));
}

#[test]
fn default_pool_is_not_lockable() {
    let device = SoftwareDevice::new(DeviceCapability::Extended);
    let texture = device
        .create_texture(bgra(4, 4), MemoryPool::Default)
        .unwrap();
    assert!(matches!(
        device.lock(&texture),
        Err(TexelaError::Lock(_))
    ));
}

#[test]
fn update_surface_validates_pools_and_descs() {
    let device = SoftwareDevice::new(DeviceCapability::Extended);
    let staging = device
        .create_texture(bgra(4, 4), MemoryPool::Staging)
        .unwrap();
    let dest = device
        .create_texture(bgra(4, 4), MemoryPool::Default)
        .unwrap();
    let mismatched = device
        .create_texture(bgra(8, 4), MemoryPool::Default)
        .unwrap();

    assert!(device.update_surface(&staging, &dest).is_ok());
    assert!(device.update_surface(&dest, &staging).is_err());
    assert!(device.update_surface(&staging, &mismatched).is_err());
}

#[test]
fn textures_are_rejected_on_a_foreign_device() {
    let device_a = SoftwareDevice::new(DeviceCapability::Standard);
    let device_b = SoftwareDevice::new(DeviceCapability::Standard);
    let texture = device_a
        .create_texture(bgra(4, 4), MemoryPool::Managed)
        .unwrap();
    assert!(device_b.lock(&texture).is_err());
    assert!(device_b.read_back(&texture).is_err());
}

#[test]
fn shared_export_and_open_alias_the_same_bytes() {
    let producer = SoftwareDevice::new(DeviceCapability::Extended);
    let consumer = SoftwareDevice::new(DeviceCapability::Standard);

    let desc = TextureDesc {
        width: 4,
        height: 2,
        format: crate::device::TextureFormat::Bgrx8,
    };
    let surface = producer.create_texture(desc, MemoryPool::Staging).unwrap();
    {
        let mut lock = producer.lock(&surface).unwrap();
        lock.bytes_mut()[0] = 0xab;
    }

    let handle = producer.export_shared(&surface).unwrap();
    let view = consumer.open_shared(desc, handle).unwrap();
    assert_eq!(view.device(), consumer.id());
    assert_eq!(consumer.read_back(&view).unwrap()[0], 0xab);

    // Writes by the producer after the open remain visible: no copy happened.
    {
        let mut lock = producer.lock(&surface).unwrap();
        lock.bytes_mut()[1] = 0xcd;
    }
    assert_eq!(consumer.read_back(&view).unwrap()[1], 0xcd);
}

#[test]
fn open_shared_rejects_unknown_or_mismatched_handles() {
    let device = SoftwareDevice::new(DeviceCapability::Standard);
    assert!(matches!(
        device.open_shared(bgra(4, 4), ShareHandle(u64::MAX)),
        Err(TexelaError::Allocation(_))
    ));

    let producer = SoftwareDevice::new(DeviceCapability::Standard);
    let surface = producer
        .create_texture(bgra(4, 4), MemoryPool::Staging)
        .unwrap();
    let handle = producer.export_shared(&surface).unwrap();
    assert!(matches!(
        device.open_shared(bgra(8, 8), handle),
        Err(TexelaError::Allocation(_))
    ));
}
