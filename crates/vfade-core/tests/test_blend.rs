mod common;

use vfade_core::blend::{addressed_rows, blend, blend_par, scale_chroma_sample, scale_luma_sample};
use vfade_core::consts::FACTOR_ONE;
use vfade_core::error::FadeError;
use vfade_core::frame::{PixelFormat, PlaneMut};

use common::{ramp_frame, solid_frame};

// ---------------------------------------------------------------------------
// Per-sample arithmetic
// ---------------------------------------------------------------------------

#[test]
fn test_luma_rails() {
    for s in 0..=255u8 {
        assert_eq!(scale_luma_sample(s, 0), 0);
        assert_eq!(scale_luma_sample(s, FACTOR_ONE), s);
    }
}

#[test]
fn test_chroma_rails() {
    for s in 0..=255u8 {
        assert_eq!(scale_chroma_sample(s, 0), 128);
        assert_eq!(scale_chroma_sample(s, FACTOR_ONE), s);
    }
}

#[test]
fn test_luma_half_factor_rounds() {
    assert_eq!(scale_luma_sample(200, 32768), 100);
    assert_eq!(scale_luma_sample(255, 32768), 128);
    assert_eq!(scale_luma_sample(1, 32768), 1);
}

#[test]
fn test_neutral_chroma_is_fixed_point() {
    for factor in (0..=FACTOR_ONE).step_by(997) {
        assert_eq!(scale_chroma_sample(128, factor), 128);
    }
}

#[test]
fn test_chroma_moves_toward_neutral() {
    for factor in [1, 1000, 32768, 65000] {
        for s in [0u8, 16, 100, 160, 240, 255] {
            let out = scale_chroma_sample(s, factor) as i32;
            assert!((out - 128).abs() <= (s as i32 - 128).abs(), "s={s} f={factor}");
        }
    }
}

// ---------------------------------------------------------------------------
// Whole-frame blending
// ---------------------------------------------------------------------------

#[test]
fn test_factor_zero_gives_black_yuv() {
    let mut frame = ramp_frame(PixelFormat::Yuv420p, 16, 8);
    let height = frame.height();
    blend(0, &mut frame.planes_mut(), 0, height).unwrap();
    assert!(frame.plane(0).iter().all(|&b| b == 0));
    assert!(frame.plane(1).iter().all(|&b| b == 128));
    assert!(frame.plane(2).iter().all(|&b| b == 128));
}

#[test]
fn test_factor_one_leaves_frame_untouched() {
    let mut frame = ramp_frame(PixelFormat::Yuv422p, 9, 5);
    let before = frame.clone();
    let height = frame.height();
    blend(FACTOR_ONE, &mut frame.planes_mut(), 0, height).unwrap();
    assert_eq!(frame, before);
}

#[test]
fn test_rgb24_scales_every_byte_uniformly() {
    let mut frame = solid_frame(PixelFormat::Rgb24, 4, 3, &[200]);
    blend(32768, &mut frame.planes_mut(), 0, 3).unwrap();
    assert!(frame.data().iter().all(|&b| b == 100));
}

#[test]
fn test_bgr24_black_at_zero() {
    let mut frame = ramp_frame(PixelFormat::Bgr24, 5, 5);
    blend(0, &mut frame.planes_mut(), 0, 5).unwrap();
    assert!(frame.data().iter().all(|&b| b == 0));
}

#[test]
fn test_region_only_touches_its_rows() {
    let mut frame = solid_frame(PixelFormat::Yuv444p, 4, 6, &[200, 60, 200]);
    blend(0, &mut frame.planes_mut(), 2, 2).unwrap();
    let luma = frame.plane(0);
    for row in 0..6 {
        let expected = if (2..4).contains(&row) { 0 } else { 200 };
        assert!(luma[row * 4..row * 4 + 4].iter().all(|&b| b == expected), "row {row}");
    }
    let cb = frame.plane(1);
    assert!(cb[..8].iter().all(|&b| b == 60));
    assert!(cb[8..16].iter().all(|&b| b == 128));
    assert!(cb[16..].iter().all(|&b| b == 60));
}

#[test]
fn test_stride_padding_is_untouched() {
    // 3 samples per row, 5 bytes per row.
    let mut data = vec![200u8; 5 * 4];
    let mut planes = [PlaneMut::luma(&mut data, 5, 3, 4, 1)];
    blend(0, &mut planes, 0, 4).unwrap();
    for row in data.chunks(5) {
        assert_eq!(row, &[0, 0, 0, 200, 200]);
    }
}

#[test]
fn test_zero_height_region_is_noop() {
    let mut frame = ramp_frame(PixelFormat::Yuv420p, 8, 8);
    let before = frame.clone();
    blend(0, &mut frame.planes_mut(), 8, 0).unwrap();
    assert_eq!(frame, before);
}

// ---------------------------------------------------------------------------
// Slicing and parallelism
// ---------------------------------------------------------------------------

fn blend_in_slices(format: PixelFormat, w: usize, h: usize, slice: usize, factor: i32) -> Vec<u8> {
    let mut frame = ramp_frame(format, w, h);
    let mut top = 0;
    while top < h {
        let rows = slice.min(h - top);
        blend(factor, &mut frame.planes_mut(), top, rows).unwrap();
        top += rows;
    }
    frame.into_bytes()
}

fn blend_whole(format: PixelFormat, w: usize, h: usize, factor: i32) -> Vec<u8> {
    let mut frame = ramp_frame(format, w, h);
    blend(factor, &mut frame.planes_mut(), 0, h).unwrap();
    frame.into_bytes()
}

#[test]
fn test_slices_match_whole_frame() {
    let factor = 20_000;
    for format in PixelFormat::ALL {
        for (w, h) in [(8, 8), (7, 5), (13, 9), (1, 1)] {
            let whole = blend_whole(format, w, h, factor);
            for slice in [1, 2, 3, 4, 16] {
                assert_eq!(
                    blend_in_slices(format, w, h, slice, factor),
                    whole,
                    "{format} {w}x{h} slice {slice}"
                );
            }
        }
    }
}

#[test]
fn test_parallel_matches_serial() {
    for format in [PixelFormat::Yuv420p, PixelFormat::Rgb24, PixelFormat::Yuv444p] {
        let mut serial = ramp_frame(format, 640, 480);
        let mut parallel = serial.clone();
        blend(12_345, &mut serial.planes_mut(), 0, 480).unwrap();
        blend_par(12_345, &mut parallel.planes_mut(), 0, 480).unwrap();
        assert_eq!(serial, parallel, "{format}");
    }
}

#[test]
fn test_odd_frame_edges_fully_faded() {
    for format in [PixelFormat::Yuv420p, PixelFormat::Yuv411p, PixelFormat::Yuv410p] {
        let mut frame = ramp_frame(format, 7, 5);
        blend(0, &mut frame.planes_mut(), 0, 5).unwrap();
        assert!(frame.plane(1).iter().all(|&b| b == 128), "{format}");
        assert!(frame.plane(2).iter().all(|&b| b == 128), "{format}");
    }
}

#[test]
fn test_addressed_rows_for_odd_height() {
    let mut frame = ramp_frame(PixelFormat::Yuv420p, 4, 5);
    let planes = frame.planes_mut();
    let chroma = &planes[1];
    assert_eq!(chroma.height, 3);
    assert_eq!(addressed_rows(chroma, 5, 0, 2), 0..1);
    assert_eq!(addressed_rows(chroma, 5, 2, 2), 1..2);
    assert_eq!(addressed_rows(chroma, 5, 4, 1), 2..3);
    assert_eq!(addressed_rows(chroma, 5, 0, 5), 0..3);
    assert_eq!(addressed_rows(&planes[0], 5, 1, 3), 1..4);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn assert_rejected(result: vfade_core::error::Result<()>) {
    assert!(
        matches!(result, Err(FadeError::InvalidRegion(_))),
        "expected InvalidRegion, got {result:?}"
    );
}

#[test]
fn test_region_past_bottom_rejected_without_writes() {
    let mut frame = ramp_frame(PixelFormat::Yuv420p, 8, 8);
    let before = frame.clone();
    assert_rejected(blend(0, &mut frame.planes_mut(), 6, 3));
    assert_rejected(blend(0, &mut frame.planes_mut(), usize::MAX, 2));
    assert_eq!(frame, before);
}

#[test]
fn test_factor_out_of_range_rejected() {
    let mut frame = ramp_frame(PixelFormat::Rgb24, 2, 2);
    assert_rejected(blend(-1, &mut frame.planes_mut(), 0, 2));
    assert_rejected(blend(FACTOR_ONE + 1, &mut frame.planes_mut(), 0, 2));
}

#[test]
fn test_two_planes_rejected() {
    let mut frame = ramp_frame(PixelFormat::Yuv444p, 4, 4);
    let before = frame.clone();
    let mut planes = frame.planes_mut();
    planes.truncate(2);
    assert_rejected(blend(0, &mut planes, 0, 4));
    drop(planes);
    assert_eq!(frame, before);
}

#[test]
fn test_stride_smaller_than_row_rejected() {
    let mut data = vec![100u8; 64];
    let mut planes = [PlaneMut::luma(&mut data, 3, 4, 4, 1)];
    assert_rejected(blend(0, &mut planes, 0, 4));
    assert!(data.iter().all(|&b| b == 100));
}

#[test]
fn test_short_buffer_rejected() {
    let mut data = vec![100u8; 15];
    let mut planes = [PlaneMut::luma(&mut data, 4, 4, 4, 1)];
    assert_rejected(blend(0, &mut planes, 0, 1));
    assert!(data.iter().all(|&b| b == 100));
}

#[test]
fn test_oversized_chroma_rejected() {
    let mut y = vec![50u8; 16];
    let mut u = vec![50u8; 16];
    let mut v = vec![50u8; 16];
    // 4x4 luma with 4:2:0 shifts cannot carry 4x4 chroma.
    let mut planes = [
        PlaneMut::luma(&mut y, 4, 4, 4, 1),
        PlaneMut::chroma(&mut u, 4, 4, 4, 1, 1),
        PlaneMut::chroma(&mut v, 4, 4, 4, 1, 1),
    ];
    assert_rejected(blend(0, &mut planes, 0, 4));
    assert!(y.iter().all(|&b| b == 50));
}

#[test]
fn test_undersized_chroma_rejected() {
    let mut y = vec![200u8; 64];
    let mut u = vec![60u8; 8];
    let mut v = vec![60u8; 8];
    // 8x8 luma at 4:2:0 needs 4x4 chroma; these planes only carry 4x2.
    let mut planes = [
        PlaneMut::luma(&mut y, 8, 8, 8, 1),
        PlaneMut::chroma(&mut u, 4, 4, 2, 1, 1),
        PlaneMut::chroma(&mut v, 4, 4, 2, 1, 1),
    ];
    assert_rejected(blend(0, &mut planes, 0, 6));
    assert_rejected(blend(0, &mut planes, 6, 2));
    assert!(y.iter().all(|&b| b == 200));
    assert!(u.iter().all(|&b| b == 60));
}

#[test]
fn test_narrow_chroma_rejected() {
    let mut y = vec![200u8; 25];
    let mut u = vec![60u8; 6];
    let mut v = vec![60u8; 6];
    // 5 luma columns round up to 3 chroma columns, not 2.
    let mut planes = [
        PlaneMut::luma(&mut y, 5, 5, 5, 1),
        PlaneMut::chroma(&mut u, 2, 2, 3, 1, 1),
        PlaneMut::chroma(&mut v, 2, 2, 3, 1, 1),
    ];
    assert_rejected(blend(0, &mut planes, 0, 5));
    assert!(y.iter().all(|&b| b == 200));
}

#[test]
fn test_packed_group_with_chroma_rejected() {
    let mut y = vec![50u8; 48];
    let mut u = vec![50u8; 16];
    let mut v = vec![50u8; 16];
    let mut planes = [
        PlaneMut::luma(&mut y, 12, 4, 4, 3),
        PlaneMut::chroma(&mut u, 4, 4, 4, 0, 0),
        PlaneMut::chroma(&mut v, 4, 4, 4, 0, 0),
    ];
    assert_rejected(blend(0, &mut planes, 0, 4));
}
