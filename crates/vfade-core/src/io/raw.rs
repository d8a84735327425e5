use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use memmap2::Mmap;
use tracing::{debug, warn};

use crate::error::{FadeError, Result};
use crate::frame::{PixelFormat, VideoFrame};

/// Memory-mapped reader for headerless raw video (`-f rawvideo`).
///
/// Frames are stored back to back, each laid out as
/// `format.plane_layouts(width, height)`.
pub struct RawVideoReader {
    mmap: Mmap,
    format: PixelFormat,
    width: usize,
    height: usize,
    frame_size: usize,
    frame_count: usize,
}

impl RawVideoReader {
    pub fn open(path: &Path, format: PixelFormat, width: usize, height: usize) -> Result<Self> {
        let frame_size = format.checked_frame_byte_size(width, height)?;
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        let frame_count = mmap.len() / frame_size;
        let trailing = mmap.len() % frame_size;
        if trailing != 0 {
            warn!(
                path = %path.display(),
                trailing_bytes = trailing,
                "Ignoring partial frame at end of raw video"
            );
        }
        debug!(%format, width, height, frame_count, "Opened raw video");

        Ok(Self {
            mmap,
            format,
            width,
            height,
            frame_size,
            frame_count,
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

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn frame_byte_size(&self) -> usize {
        self.frame_size
    }

    /// Get the raw bytes for a single frame (zero-copy from mmap).
    pub fn frame_raw(&self, index: usize) -> Result<&[u8]> {
        if index >= self.frame_count {
            return Err(FadeError::FrameIndexOutOfRange {
                index,
                total: self.frame_count,
            });
        }
        let offset = index * self.frame_size;
        Ok(&self.mmap[offset..offset + self.frame_size])
    }

    /// Copy one frame out of the mapping into an owned, writable frame.
    pub fn read_frame(&self, index: usize) -> Result<VideoFrame> {
        let raw = self.frame_raw(index)?;
        let mut frame = VideoFrame::from_bytes(self.format, self.width, self.height, raw.to_vec())?;
        frame.index = index as u64;
        Ok(frame)
    }

    /// Iterator over all frames in order.
    pub fn frames(&self) -> impl Iterator<Item = Result<VideoFrame>> + '_ {
        (0..self.frame_count).map(move |i| self.read_frame(i))
    }
}

/// Writes headerless raw video; the first frame fixes the geometry.
pub struct RawVideoWriter {
    writer: BufWriter<File>,
    geometry: Option<(PixelFormat, usize, usize)>,
    frames_written: u64,
}

impl RawVideoWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            geometry: None,
            frames_written: 0,
        })
    }

    pub fn write_frame(&mut self, frame: &VideoFrame) -> Result<()> {
        let geometry = (frame.format(), frame.width(), frame.height());
        match self.geometry {
            None => self.geometry = Some(geometry),
            Some((format, width, height)) if geometry != (format, width, height) => {
                return Err(FadeError::FrameSizeMismatch {
                    expected: format.frame_byte_size(width, height),
                    actual: frame.data().len(),
                });
            }
            Some(_) => {}
        }
        self.writer.write_all(frame.data())?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Flush and finalize the file.
    pub fn finalize(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
