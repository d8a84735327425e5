use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use crate::consts::{BT601_CB_TO_B, BT601_CB_TO_G, BT601_CR_TO_G, BT601_CR_TO_R};
use crate::error::Result;
use crate::frame::{PixelFormat, VideoFrame};

/// Convert any supported frame to 8-bit RGB.
///
/// YUV is decoded with BT.601 coefficients, studio swing for `yuv*` and full
/// swing for `yuvj*`. Chroma is sampled nearest-neighbour.
pub fn to_rgb_image(frame: &VideoFrame) -> RgbImage {
    let w = frame.width();
    let h = frame.height();
    let mut img = RgbImage::new(w as u32, h as u32);

    match frame.format() {
        PixelFormat::Rgb24 | PixelFormat::Bgr24 => {
            let swap = frame.format() == PixelFormat::Bgr24;
            let data = frame.plane(0);
            for (i, px) in data.chunks_exact(3).enumerate() {
                let rgb = if swap {
                    [px[2], px[1], px[0]]
                } else {
                    [px[0], px[1], px[2]]
                };
                img.put_pixel((i % w) as u32, (i / w) as u32, Rgb(rgb));
            }
        }
        format => {
            let layouts = frame.layouts();
            let (y_plane, cb_plane, cr_plane) = (frame.plane(0), frame.plane(1), frame.plane(2));
            let chroma = layouts[1];
            let full_range = format.is_full_range();
            for row in 0..h {
                let crow = (row >> chroma.vshift) * chroma.stride;
                for col in 0..w {
                    let ccol = col >> chroma.hshift;
                    let y = y_plane[row * layouts[0].stride + col];
                    let cb = cb_plane[crow + ccol];
                    let cr = cr_plane[crow + ccol];
                    img.put_pixel(col as u32, row as u32, Rgb(ycbcr_to_rgb(y, cb, cr, full_range)));
                }
            }
        }
    }

    img
}

fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8, full_range: bool) -> [u8; 3] {
    let (y, cb, cr) = if full_range {
        (y as f32, cb as f32 - 128.0, cr as f32 - 128.0)
    } else {
        (
            (y as f32 - 16.0) * 255.0 / 219.0,
            (cb as f32 - 128.0) * 255.0 / 224.0,
            (cr as f32 - 128.0) * 255.0 / 224.0,
        )
    };
    let r = y + BT601_CR_TO_R * cr;
    let g = y - BT601_CB_TO_G * cb - BT601_CR_TO_G * cr;
    let b = y + BT601_CB_TO_B * cb;
    [to_u8(r), to_u8(g), to_u8(b)]
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Save a frame as 8-bit RGB PNG.
pub fn save_frame_png(frame: &VideoFrame, path: &Path) -> Result<()> {
    to_rgb_image(frame).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a frame, choosing the image format from the file extension.
pub fn save_frame_image(frame: &VideoFrame, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") | None => save_frame_png(frame, path),
        _ => {
            to_rgb_image(frame).save(path)?;
            Ok(())
        }
    }
}
