mod common;

use vfade_core::frame::PixelFormat;
use vfade_core::io::image_io::{save_frame_image, to_rgb_image};

use common::{solid_frame, temp_path};

#[test]
fn test_black_studio_yuv_is_black_rgb() {
    let frame = solid_frame(PixelFormat::Yuv420p, 4, 4, &[16, 128, 128]);
    let img = to_rgb_image(&frame);
    assert!(img.pixels().all(|p| p.0 == [0, 0, 0]));
}

#[test]
fn test_white_full_range_yuv_is_white_rgb() {
    let frame = solid_frame(PixelFormat::Yuvj444p, 3, 2, &[255, 128, 128]);
    let img = to_rgb_image(&frame);
    assert!(img.pixels().all(|p| p.0 == [255, 255, 255]));
}

#[test]
fn test_bgr_channels_swapped() {
    let mut frame = solid_frame(PixelFormat::Bgr24, 2, 1, &[0]);
    frame.data_mut().copy_from_slice(&[10, 20, 30, 40, 50, 60]);
    let img = to_rgb_image(&frame);
    assert_eq!(img.get_pixel(0, 0).0, [30, 20, 10]);
    assert_eq!(img.get_pixel(1, 0).0, [60, 50, 40]);
}

#[test]
fn test_save_png_reads_back() {
    let frame = solid_frame(PixelFormat::Rgb24, 5, 3, &[77]);
    let (_dir, path) = temp_path("frame.png");
    save_frame_image(&frame, &path).unwrap();
    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (5, 3));
    assert!(img.pixels().all(|p| p.0 == [77, 77, 77]));
}
