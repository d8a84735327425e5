#![allow(dead_code)]

use std::path::PathBuf;

use vfade_core::frame::{PixelFormat, VideoFrame};

/// A frame whose planes are each filled with a constant.
///
/// `values` holds one byte per plane (one entry for packed RGB).
pub fn solid_frame(format: PixelFormat, width: usize, height: usize, values: &[u8]) -> VideoFrame {
    let mut frame = VideoFrame::new(format, width, height).expect("valid dimensions");
    for (i, &v) in values.iter().enumerate() {
        frame.fill_plane(i, v);
    }
    frame
}

/// A frame whose bytes cycle through every value 0..=255.
pub fn ramp_frame(format: PixelFormat, width: usize, height: usize) -> VideoFrame {
    let size = format.frame_byte_size(width, height);
    let data = (0..size).map(|i| (i % 256) as u8).collect();
    VideoFrame::from_bytes(format, width, height, data).expect("sized to fit")
}

/// Bytes of a complete YUV4MPEG2 stream holding `frames`.
pub fn build_y4m(header: &str, frames: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(header.as_bytes());
    buf.push(b'\n');
    for frame in frames {
        buf.extend_from_slice(b"FRAME\n");
        buf.extend_from_slice(frame);
    }
    buf
}

/// `count` luma-ramp 4:2:0 frames, each with its own luma offset so frames
/// are distinguishable after a round trip.
pub fn yuv420_frames(width: usize, height: usize, count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|n| {
            let mut frame = VideoFrame::new(PixelFormat::Yuv420p, width, height).unwrap();
            let luma = width * height;
            for (i, b) in frame.data_mut()[..luma].iter_mut().enumerate() {
                *b = ((i + n * 7) % 200 + 20) as u8;
            }
            frame.fill_plane(1, 90);
            frame.fill_plane(2, 170);
            frame.into_bytes()
        })
        .collect()
}

/// Temp directory plus a path inside it with the given file name.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn temp_path(name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    (dir, path)
}

/// Write `data` to `name` inside a fresh temp directory.
pub fn write_temp_file(name: &str, data: &[u8]) -> (tempfile::TempDir, PathBuf) {
    let (dir, path) = temp_path(name);
    std::fs::write(&path, data).expect("write test file");
    (dir, path)
}
