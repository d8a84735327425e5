use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DIMENSION, NEUTRAL_CHROMA};
use crate::error::{FadeError, Result};

/// Pixel layouts the fade accepts.
///
/// Planar YUV formats carry one luma plane followed by two chroma planes; the
/// `yuvj*` variants are the full-range (JPEG) flavours. `Rgb24`/`Bgr24` are a
/// single interleaved plane with three bytes per pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    Yuv444p,
    Yuv422p,
    Yuv420p,
    Yuv411p,
    Yuv410p,
    Yuvj444p,
    Yuvj422p,
    Yuvj420p,
    Yuv440p,
    Yuvj440p,
    Rgb24,
    Bgr24,
}

/// Layout facts negotiated once per stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatInfo {
    /// log2 of the horizontal chroma subsampling factor.
    pub hsub: u8,
    /// log2 of the vertical chroma subsampling factor.
    pub vsub: u8,
    /// Bytes per sample group in the first plane (1 planar, 3 packed RGB).
    pub group_size: usize,
}

/// Whether a plane scales toward zero or toward the chroma midpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaneKind {
    /// Luma or packed RGB: black is 0.
    Luma,
    /// Cb/Cr: neutral is 128.
    Chroma,
}

/// Geometry of one plane inside a tightly packed frame buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneLayout {
    pub kind: PlaneKind,
    pub offset: usize,
    pub stride: usize,
    pub width: usize,
    pub height: usize,
    pub hshift: u8,
    pub vshift: u8,
}

impl PlaneLayout {
    pub fn byte_size(&self) -> usize {
        self.stride * self.height
    }
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 12] = [
        Self::Yuv444p,
        Self::Yuv422p,
        Self::Yuv420p,
        Self::Yuv411p,
        Self::Yuv410p,
        Self::Yuvj444p,
        Self::Yuvj422p,
        Self::Yuvj420p,
        Self::Yuv440p,
        Self::Yuvj440p,
        Self::Rgb24,
        Self::Bgr24,
    ];

    pub fn info(self) -> FormatInfo {
        let (hsub, vsub, group_size) = match self {
            Self::Yuv444p | Self::Yuvj444p => (0, 0, 1),
            Self::Yuv422p | Self::Yuvj422p => (1, 0, 1),
            Self::Yuv420p | Self::Yuvj420p => (1, 1, 1),
            Self::Yuv411p => (2, 0, 1),
            Self::Yuv410p => (2, 2, 1),
            Self::Yuv440p | Self::Yuvj440p => (0, 1, 1),
            Self::Rgb24 | Self::Bgr24 => (0, 0, 3),
        };
        FormatInfo {
            hsub,
            vsub,
            group_size,
        }
    }

    /// True for the planar YUV layouts (luma plus two chroma planes).
    pub fn is_planar(self) -> bool {
        !matches!(self, Self::Rgb24 | Self::Bgr24)
    }

    /// True when samples span the full 0..=255 range rather than studio swing.
    pub fn is_full_range(self) -> bool {
        matches!(
            self,
            Self::Yuvj444p
                | Self::Yuvj422p
                | Self::Yuvj420p
                | Self::Yuvj440p
                | Self::Rgb24
                | Self::Bgr24
        )
    }

    pub fn plane_count(self) -> usize {
        if self.is_planar() { 3 } else { 1 }
    }

    /// Per-plane geometry for a `width` x `height` frame with no row padding.
    ///
    /// Chroma dimensions round up so odd-sized frames keep their last
    /// partial chroma column and row.
    pub fn plane_layouts(self, width: usize, height: usize) -> Vec<PlaneLayout> {
        let info = self.info();
        let luma = PlaneLayout {
            kind: PlaneKind::Luma,
            offset: 0,
            stride: width * info.group_size,
            width,
            height,
            hshift: 0,
            vshift: 0,
        };
        if !self.is_planar() {
            return vec![luma];
        }

        let cw = ceil_rshift(width, info.hsub);
        let ch = ceil_rshift(height, info.vsub);
        let mut layouts = vec![luma];
        let mut offset = luma.byte_size();
        for _ in 0..2 {
            let plane = PlaneLayout {
                kind: PlaneKind::Chroma,
                offset,
                stride: cw,
                width: cw,
                height: ch,
                hshift: info.hsub,
                vshift: info.vsub,
            };
            offset += plane.byte_size();
            layouts.push(plane);
        }
        layouts
    }

    /// Validate a frame geometry and return its packed size in bytes.
    ///
    /// Zero dimensions, dimensions above `MAX_FRAME_DIMENSION` and sizes that
    /// overflow `usize` are all `InvalidDimensions`.
    pub fn checked_frame_byte_size(self, width: usize, height: usize) -> Result<usize> {
        let invalid = || FadeError::InvalidDimensions { width, height };
        if width == 0 || height == 0 || width.max(height) > MAX_FRAME_DIMENSION {
            return Err(invalid());
        }
        let info = self.info();
        let luma = width
            .checked_mul(info.group_size)
            .and_then(|row| row.checked_mul(height))
            .ok_or_else(invalid)?;
        if !self.is_planar() {
            return Ok(luma);
        }
        let chroma = ceil_rshift(width, info.hsub)
            .checked_mul(ceil_rshift(height, info.vsub))
            .ok_or_else(invalid)?;
        chroma
            .checked_mul(2)
            .and_then(|c| c.checked_add(luma))
            .ok_or_else(invalid)
    }

    /// Bytes needed for one tightly packed frame of an already validated size.
    pub fn frame_byte_size(self, width: usize, height: usize) -> usize {
        self.plane_layouts(width, height)
            .iter()
            .map(PlaneLayout::byte_size)
            .sum()
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Yuv444p => "yuv444p",
            Self::Yuv422p => "yuv422p",
            Self::Yuv420p => "yuv420p",
            Self::Yuv411p => "yuv411p",
            Self::Yuv410p => "yuv410p",
            Self::Yuvj444p => "yuvj444p",
            Self::Yuvj422p => "yuvj422p",
            Self::Yuvj420p => "yuvj420p",
            Self::Yuv440p => "yuv440p",
            Self::Yuvj440p => "yuvj440p",
            Self::Rgb24 => "rgb24",
            Self::Bgr24 => "bgr24",
        };
        f.write_str(name)
    }
}

impl FromStr for PixelFormat {
    type Err = FadeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|fmt| fmt.to_string() == wanted)
            .ok_or_else(|| FadeError::UnsupportedFormat(s.to_string()))
    }
}

/// `ceil(value / 2^shift)`, the size of a subsampled dimension.
pub fn ceil_rshift(value: usize, shift: u8) -> usize {
    let mask = (1usize << shift) - 1;
    (value >> shift) + usize::from(value & mask != 0)
}

/// Borrowed view of one plane, handed to the blender for a single call.
///
/// The blender never retains or frees `data`.
#[derive(Debug)]
pub struct PlaneMut<'a> {
    pub data: &'a mut [u8],
    /// Distance in bytes between the starts of consecutive rows.
    pub stride: usize,
    /// Samples per row in this plane (already subsampled for chroma).
    pub width: usize,
    /// Rows in this plane (already subsampled for chroma).
    pub height: usize,
    pub group_size: usize,
    pub hshift: u8,
    pub vshift: u8,
    pub kind: PlaneKind,
}

impl<'a> PlaneMut<'a> {
    /// Luma plane, or the single interleaved plane of a packed RGB frame.
    pub fn luma(
        data: &'a mut [u8],
        stride: usize,
        width: usize,
        height: usize,
        group_size: usize,
    ) -> Self {
        Self {
            data,
            stride,
            width,
            height,
            group_size,
            hshift: 0,
            vshift: 0,
            kind: PlaneKind::Luma,
        }
    }

    pub fn chroma(
        data: &'a mut [u8],
        stride: usize,
        width: usize,
        height: usize,
        hshift: u8,
        vshift: u8,
    ) -> Self {
        Self {
            data,
            stride,
            width,
            height,
            group_size: 1,
            hshift,
            vshift,
            kind: PlaneKind::Chroma,
        }
    }

    /// Bytes of sample data in each row, excluding stride padding.
    pub fn row_bytes(&self) -> usize {
        self.width * self.group_size
    }
}

/// An owned, tightly packed 8-bit frame as carried between pipeline stages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFrame {
    format: PixelFormat,
    width: usize,
    height: usize,
    data: Vec<u8>,
    /// Position of this frame in its source stream.
    pub index: u64,
}

impl VideoFrame {
    /// A black frame: luma zero, chroma neutral.
    pub fn new(format: PixelFormat, width: usize, height: usize) -> Result<Self> {
        let size = format.checked_frame_byte_size(width, height)?;
        let mut frame = Self {
            format,
            width,
            height,
            data: vec![0u8; size],
            index: 0,
        };
        if format.is_planar() {
            frame.fill_plane(1, NEUTRAL_CHROMA);
            frame.fill_plane(2, NEUTRAL_CHROMA);
        }
        Ok(frame)
    }

    /// Wrap an existing buffer laid out as `format.plane_layouts(width, height)`.
    pub fn from_bytes(
        format: PixelFormat,
        width: usize,
        height: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        let expected = format.checked_frame_byte_size(width, height)?;
        if data.len() != expected {
            return Err(FadeError::FrameSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            format,
            width,
            height,
            data,
            index: 0,
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn layouts(&self) -> Vec<PlaneLayout> {
        self.format.plane_layouts(self.width, self.height)
    }

    /// Raw bytes of plane `index`. Panics if the format has fewer planes.
    pub fn plane(&self, index: usize) -> &[u8] {
        let layout = self.layouts()[index];
        &self.data[layout.offset..layout.offset + layout.byte_size()]
    }

    pub fn fill_plane(&mut self, index: usize, value: u8) {
        let layout = self.layouts()[index];
        self.data[layout.offset..layout.offset + layout.byte_size()].fill(value);
    }

    /// Split the buffer into per-plane descriptors, luma first.
    pub fn planes_mut(&mut self) -> Vec<PlaneMut<'_>> {
        let group_size = self.format.info().group_size;
        let layouts = self.layouts();
        let mut planes = Vec::with_capacity(layouts.len());
        let mut rest: &mut [u8] = &mut self.data;
        for layout in layouts {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(layout.byte_size());
            rest = tail;
            let plane = match layout.kind {
                PlaneKind::Luma => {
                    PlaneMut::luma(head, layout.stride, layout.width, layout.height, group_size)
                }
                PlaneKind::Chroma => PlaneMut::chroma(
                    head,
                    layout.stride,
                    layout.width,
                    layout.height,
                    layout.hshift,
                    layout.vshift,
                ),
            };
            planes.push(plane);
        }
        planes
    }
}
