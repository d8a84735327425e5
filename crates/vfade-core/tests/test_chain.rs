mod common;

use vfade_core::chain::{FadeChain, FadeFilter};
use vfade_core::consts::FACTOR_ONE;
use vfade_core::error::FadeError;
use vfade_core::frame::PixelFormat;
use vfade_core::transition::{FadeDirection, TransitionConfig};

use common::{ramp_frame, solid_frame};

#[test]
fn test_filter_frame_sequence() {
    let mut filter = FadeFilter::new(TransitionConfig::new(FadeDirection::In, 0, 2));
    let mut outputs = Vec::new();
    for _ in 0..3 {
        let mut frame = solid_frame(PixelFormat::Yuv420p, 4, 4, &[200, 60, 200]);
        filter.process_frame(&mut frame).unwrap();
        outputs.push((frame.plane(0)[0], frame.plane(1)[0]));
    }
    assert_eq!(outputs, vec![(0, 128), (100, 94), (200, 60)]);
}

#[test]
fn test_slices_do_not_advance_until_end_of_frame() {
    let mut filter = FadeFilter::new(TransitionConfig::new(FadeDirection::In, 0, 4));
    let mut frame = solid_frame(PixelFormat::Yuv444p, 4, 8, &[200, 128, 128]);
    filter.draw_slice(&mut frame, 0, 4).unwrap();
    filter.draw_slice(&mut frame, 4, 4).unwrap();
    assert_eq!(filter.current_factor(), 0);
    assert!(frame.plane(0).iter().all(|&b| b == 0));
    filter.end_frame();
    assert_eq!(filter.current_factor(), FACTOR_ONE / 4);
}

#[test]
fn test_process_slices_matches_process_frame() {
    let config = TransitionConfig::new(FadeDirection::Out, 1, 5);
    let mut whole = FadeFilter::new(config);
    let mut sliced = FadeFilter::new(config);
    for _ in 0..8 {
        let mut a = ramp_frame(PixelFormat::Yuv420p, 11, 7);
        let mut b = a.clone();
        whole.process_frame(&mut a).unwrap();
        sliced.process_slices(&mut b, 3).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_zero_slice_height_rejected() {
    let mut filter = FadeFilter::new(TransitionConfig::new(FadeDirection::In, 0, 4));
    let mut frame = ramp_frame(PixelFormat::Rgb24, 2, 2);
    assert!(matches!(
        filter.process_slices(&mut frame, 0),
        Err(FadeError::InvalidRegion(_))
    ));
    assert_eq!(filter.current_factor(), 0);
}

#[test]
fn test_chain_parse() {
    let chain = FadeChain::parse("in:0:25, out:975:25").unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.factors(), vec![0, FACTOR_ONE]);
    assert!(chain.will_modify());

    assert!(FadeChain::parse("").unwrap().is_empty());
    assert!(FadeChain::parse("in:0:25,down:1:1").is_err());
}

#[test]
fn test_chain_in_then_out() {
    let mut chain = FadeChain::parse("in:0:2,out:4:2").unwrap().with_parallel(true);
    let mut lumas = Vec::new();
    let mut modified = Vec::new();
    for _ in 0..8 {
        modified.push(chain.will_modify());
        let mut frame = solid_frame(PixelFormat::Yuv420p, 4, 2, &[200, 128, 128]);
        chain.process_frame(&mut frame, Some(1)).unwrap();
        lumas.push(frame.plane(0)[0]);
    }
    assert_eq!(lumas, vec![0, 100, 200, 200, 200, 100, 0, 0]);
    assert_eq!(
        modified,
        vec![true, true, false, false, false, true, true, true]
    );
}

#[test]
fn test_empty_chain_passes_through() {
    let mut chain = FadeChain::default();
    let mut frame = ramp_frame(PixelFormat::Yuv444p, 3, 3);
    let before = frame.clone();
    chain.process_frame(&mut frame, None).unwrap();
    assert_eq!(frame, before);
    assert!(!chain.will_modify());
}
