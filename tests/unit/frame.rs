use super::*;
use crate::foundation::core::{PlaneSize, VisibleRect};

fn size(w: u32, h: u32) -> PlaneSize {
    PlaneSize::new(w, h).unwrap()
}

fn gray_plane(sz: PlaneSize, stride: usize, value: u8) -> Plane {
    Plane::new(vec![value; stride * sz.height as usize], stride)
}

fn planar(visible: VisibleRect) -> PlanarYCbCr {
    let y_size = size(16, 16);
    let c_size = size(8, 8);
    PlanarYCbCr::new(
        gray_plane(y_size, 16, 0x80),
        gray_plane(c_size, 8, 0x40),
        gray_plane(c_size, 8, 0xc0),
        y_size,
        c_size,
        visible,
    )
    .unwrap()
}

#[test]
fn packed_surface_validates_stride_and_length() {
    let sz = size(4, 4);
    // Stride narrower than a packed row.
    assert!(PackedSurface::new(sz, 8, PackedFormat::Bgra8, vec![0u8; 64]).is_err());
    // Buffer shorter than geometry.
    assert!(PackedSurface::new(sz, 20, PackedFormat::Bgra8, vec![0u8; 64]).is_err());
    // Padded stride with a final unpadded row is enough.
    assert!(PackedSurface::new(sz, 20, PackedFormat::Bgra8, vec![0u8; 20 * 3 + 16]).is_ok());
    // A8 rows are one byte per pixel.
    assert!(PackedSurface::new(sz, 4, PackedFormat::A8, vec![0u8; 16]).is_ok());
}

#[test]
fn planar_validates_each_plane() {
    let y_size = size(16, 16);
    let c_size = size(8, 8);
    let visible = VisibleRect::full(y_size);
    let bad_cb = Plane::new(vec![0u8; 8 * 4], 8); // half the rows missing
    assert!(
        PlanarYCbCr::new(
            gray_plane(y_size, 16, 0),
            bad_cb,
            gray_plane(c_size, 8, 0),
            y_size,
            c_size,
            visible,
        )
        .is_err()
    );
}

#[test]
fn planar_rejects_visible_rect_outside_luma() {
    let y_size = size(16, 16);
    let c_size = size(8, 8);
    let visible = VisibleRect {
        x: 12,
        y: 0,
        width: 8,
        height: 8,
    };
    assert!(
        PlanarYCbCr::new(
            gray_plane(y_size, 16, 0),
            gray_plane(c_size, 8, 0),
            gray_plane(c_size, 8, 0),
            y_size,
            c_size,
            visible,
        )
        .is_err()
    );
}

#[test]
fn classify_reports_alpha_per_packed_format() {
    for (format, has_alpha) in [
        (PackedFormat::A8, true),
        (PackedFormat::Bgra8, true),
        (PackedFormat::Bgrx8, false),
    ] {
        let sz = size(2, 2);
        let bpp = format.bytes_per_pixel();
        let surface = PackedSurface::new(sz, 2 * bpp, format, vec![0u8; 4 * bpp]).unwrap();
        let class = FrameSource::Packed(surface).classify().unwrap();
        assert_eq!(class, UploadClass::Packed { has_alpha });
    }
}

#[test]
fn classify_accepts_valid_planar_and_external() {
    let frame = FrameSource::PlanarYCbCr(planar(VisibleRect::full(size(16, 16))));
    assert_eq!(frame.classify().unwrap(), UploadClass::Planar);

    let external = FrameSource::ExternalGpu(ExternalSurface::new(
        TextureDesc {
            width: 4,
            height: 4,
            format: TextureFormat::Bgrx8,
        },
        ShareHandle(7),
    ));
    assert_eq!(external.classify().unwrap(), UploadClass::ExternalShared);
}

#[test]
fn classify_rejects_planar_without_visible_pixels() {
    let empty = VisibleRect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };
    let frame = FrameSource::PlanarYCbCr(planar(empty));
    assert!(matches!(
        frame.classify(),
        Err(crate::foundation::error::TexelaError::UnsupportedFrame(_))
    ));
}
