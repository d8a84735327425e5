use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FadeError, Result};
use crate::frame::{PixelFormat, VideoFrame};

use super::raw::{RawVideoReader, RawVideoWriter};
use super::y4m::{Y4mHeader, Y4mReader, Y4mWriter};

/// On-disk frame container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Container {
    /// Headerless frames; geometry comes from configuration.
    Raw,
    /// YUV4MPEG2 with a self-describing header.
    Y4m,
}

impl Container {
    /// `.y4m` selects YUV4MPEG2; anything else is raw video.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("y4m") => Self::Y4m,
            _ => Self::Raw,
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => write!(f, "Raw video"),
            Self::Y4m => write!(f, "YUV4MPEG2"),
        }
    }
}

/// Geometry for headerless raw input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParams {
    pub format: PixelFormat,
    pub width: usize,
    pub height: usize,
}

/// What a source knows about its stream before any frame is read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamInfo {
    pub container: Container,
    pub format: PixelFormat,
    pub width: usize,
    pub height: usize,
    /// Known up front for raw video only.
    pub frame_count: Option<usize>,
    pub frame_rate: Option<(u32, u32)>,
}

/// Supplies writable frames in stream order.
pub enum FrameSource {
    Raw { reader: RawVideoReader, next: usize },
    Y4m(Y4mReader<BufReader<File>>),
}

impl FrameSource {
    pub fn open(path: &Path, raw: Option<&RawParams>) -> Result<Self> {
        match Container::from_path(path) {
            Container::Y4m => Ok(Self::Y4m(Y4mReader::open(path)?)),
            Container::Raw => {
                let params = raw.ok_or_else(|| {
                    FadeError::UnsupportedFormat(format!(
                        "{} is raw video; pixel format and size are required",
                        path.display()
                    ))
                })?;
                let reader =
                    RawVideoReader::open(path, params.format, params.width, params.height)?;
                Ok(Self::Raw { reader, next: 0 })
            }
        }
    }

    pub fn info(&self) -> StreamInfo {
        match self {
            Self::Raw { reader, .. } => StreamInfo {
                container: Container::Raw,
                format: reader.format(),
                width: reader.width(),
                height: reader.height(),
                frame_count: Some(reader.frame_count()),
                frame_rate: None,
            },
            Self::Y4m(reader) => {
                let header = reader.header();
                StreamInfo {
                    container: Container::Y4m,
                    format: header.format,
                    width: header.width,
                    height: header.height,
                    frame_count: None,
                    frame_rate: header.frame_rate,
                }
            }
        }
    }

    /// Next frame, or `None` at end of stream.
    pub fn next_frame(&mut self) -> Result<Option<VideoFrame>> {
        match self {
            Self::Raw { reader, next } => {
                if *next >= reader.frame_count() {
                    return Ok(None);
                }
                let frame = reader.read_frame(*next)?;
                *next += 1;
                Ok(Some(frame))
            }
            Self::Y4m(reader) => reader.read_frame(),
        }
    }
}

/// Accepts processed frames and forwards them to disk.
pub enum FrameSink {
    Raw(RawVideoWriter),
    Y4m(Y4mWriter<BufWriter<File>>),
}

impl FrameSink {
    /// Create the output container picked by `path`'s extension.
    ///
    /// A YUV4MPEG2 output reuses the input header when the input is
    /// YUV4MPEG2 too, so frame rate and aspect survive.
    pub fn create(path: &Path, source: &FrameSource) -> Result<Self> {
        match Container::from_path(path) {
            Container::Raw => Ok(Self::Raw(RawVideoWriter::create(path)?)),
            Container::Y4m => {
                let header = match source {
                    FrameSource::Y4m(reader) => reader.header().clone(),
                    FrameSource::Raw { reader, .. } => {
                        Y4mHeader::new(reader.format(), reader.width(), reader.height())?
                    }
                };
                Ok(Self::Y4m(Y4mWriter::create(path, &header)?))
            }
        }
    }

    pub fn write_frame(&mut self, frame: &VideoFrame) -> Result<()> {
        match self {
            Self::Raw(writer) => writer.write_frame(frame),
            Self::Y4m(writer) => writer.write_frame(frame),
        }
    }

    pub fn finish(self) -> Result<()> {
        match self {
            Self::Raw(writer) => writer.finalize(),
            Self::Y4m(writer) => writer.finish().map(drop),
        }
    }
}
