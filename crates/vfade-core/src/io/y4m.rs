//! YUV4MPEG2 streams: a text header line, then `FRAME` markers each
//! followed by one tightly packed planar frame.

use std::fs::File;
use std::io::{BufRead, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::consts::{Y4M_FRAME_MAGIC, Y4M_MAGIC, Y4M_MAX_LINE};
use crate::error::{FadeError, Result};
use crate::frame::{PixelFormat, VideoFrame};

const FULL_RANGE_TAG: &str = "COLORRANGE=FULL";

/// Parsed stream header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Y4mHeader {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    /// `F` parameter as numerator/denominator.
    pub frame_rate: Option<(u32, u32)>,
    /// `I` parameter: `p`, `t`, `b` or `m`.
    pub interlace: Option<char>,
    /// `A` parameter as numerator/denominator.
    pub pixel_aspect: Option<(u32, u32)>,
    /// `X` parameters, without the leading `X`.
    pub extensions: Vec<String>,
}

impl Y4mHeader {
    /// Progressive 25 fps header for a format YUV4MPEG2 can carry.
    pub fn new(format: PixelFormat, width: usize, height: usize) -> Result<Self> {
        colorspace_tag(format)?;
        format.checked_frame_byte_size(width, height)?;
        let extensions = if format.is_full_range() {
            vec![FULL_RANGE_TAG.to_string()]
        } else {
            Vec::new()
        };
        Ok(Self {
            width,
            height,
            format,
            frame_rate: Some((25, 1)),
            interlace: Some('p'),
            pixel_aspect: Some((1, 1)),
            extensions,
        })
    }

    pub fn parse(line: &str) -> Result<Self> {
        let mut tokens = line.split_ascii_whitespace();
        if tokens.next() != Some(Y4M_MAGIC) {
            return Err(FadeError::InvalidY4m(format!("missing {Y4M_MAGIC} magic")));
        }

        let mut width = None;
        let mut height = None;
        let mut colorspace = None;
        let mut frame_rate = None;
        let mut interlace = None;
        let mut pixel_aspect = None;
        let mut extensions = Vec::new();

        for token in tokens {
            let mut chars = token.chars();
            let tag = chars.next();
            let value = chars.as_str();
            match tag {
                Some('W') => width = Some(parse_number(token, value)?),
                Some('H') => height = Some(parse_number(token, value)?),
                Some('C') => colorspace = Some(value.to_string()),
                Some('F') => frame_rate = Some(parse_ratio(token, value)?),
                Some('A') => pixel_aspect = Some(parse_ratio(token, value)?),
                Some('I') => interlace = value.chars().next(),
                Some('X') => extensions.push(value.to_string()),
                _ => {
                    return Err(FadeError::InvalidY4m(format!(
                        "unknown header parameter '{token}'"
                    )));
                }
            }
        }

        let (Some(width), Some(height)) = (width, height) else {
            return Err(FadeError::InvalidY4m("header lacks W or H".into()));
        };
        let full_range = extensions
            .iter()
            .any(|x| x.eq_ignore_ascii_case(FULL_RANGE_TAG));
        let format = format_from_colorspace(colorspace.as_deref(), full_range)?;
        format.checked_frame_byte_size(width, height)?;

        Ok(Self {
            width,
            height,
            format,
            frame_rate,
            interlace,
            pixel_aspect,
            extensions,
        })
    }

    /// Header line including the trailing newline.
    pub fn to_line(&self) -> Result<String> {
        let mut line = format!("{Y4M_MAGIC} W{} H{}", self.width, self.height);
        if let Some((num, den)) = self.frame_rate {
            line.push_str(&format!(" F{num}:{den}"));
        }
        if let Some(mode) = self.interlace {
            line.push_str(&format!(" I{mode}"));
        }
        if let Some((num, den)) = self.pixel_aspect {
            line.push_str(&format!(" A{num}:{den}"));
        }
        line.push_str(&format!(" C{}", colorspace_tag(self.format)?));
        for ext in &self.extensions {
            line.push_str(&format!(" X{ext}"));
        }
        line.push('\n');
        Ok(line)
    }

    pub fn frame_byte_size(&self) -> usize {
        self.format.frame_byte_size(self.width, self.height)
    }
}

fn parse_number(token: &str, value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| FadeError::InvalidY4m(format!("bad header parameter '{token}'")))
}

fn parse_ratio(token: &str, value: &str) -> Result<(u32, u32)> {
    let bad = || FadeError::InvalidY4m(format!("bad header parameter '{token}'"));
    let (num, den) = value.split_once(':').ok_or_else(bad)?;
    Ok((num.parse().map_err(|_| bad())?, den.parse().map_err(|_| bad())?))
}

fn format_from_colorspace(tag: Option<&str>, full_range: bool) -> Result<PixelFormat> {
    let format = match (tag.unwrap_or("420jpeg"), full_range) {
        ("420jpeg" | "420paldv" | "420mpeg2" | "420", false) => PixelFormat::Yuv420p,
        ("420jpeg" | "420paldv" | "420mpeg2" | "420", true) => PixelFormat::Yuvj420p,
        ("422", false) => PixelFormat::Yuv422p,
        ("422", true) => PixelFormat::Yuvj422p,
        ("444", false) => PixelFormat::Yuv444p,
        ("444", true) => PixelFormat::Yuvj444p,
        ("440", false) => PixelFormat::Yuv440p,
        ("440", true) => PixelFormat::Yuvj440p,
        ("411", _) => PixelFormat::Yuv411p,
        (other, _) => {
            return Err(FadeError::UnsupportedFormat(format!(
                "YUV4MPEG2 colorspace '{other}'"
            )));
        }
    };
    Ok(format)
}

fn colorspace_tag(format: PixelFormat) -> Result<&'static str> {
    match format {
        PixelFormat::Yuv420p | PixelFormat::Yuvj420p => Ok("420jpeg"),
        PixelFormat::Yuv422p | PixelFormat::Yuvj422p => Ok("422"),
        PixelFormat::Yuv444p | PixelFormat::Yuvj444p => Ok("444"),
        PixelFormat::Yuv440p | PixelFormat::Yuvj440p => Ok("440"),
        PixelFormat::Yuv411p => Ok("411"),
        PixelFormat::Yuv410p | PixelFormat::Rgb24 | PixelFormat::Bgr24 => Err(
            FadeError::UnsupportedFormat(format!("{format} cannot be stored in YUV4MPEG2")),
        ),
    }
}

/// Read one `\n`-terminated line of at most `Y4M_MAX_LINE` bytes.
///
/// Returns `None` at a clean end of stream.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let n = reader
        .by_ref()
        .take(Y4M_MAX_LINE as u64)
        .read_until(b'\n', &mut buf)?;
    if n == 0 {
        return Ok(None);
    }
    if buf.last() != Some(&b'\n') {
        return Err(FadeError::InvalidY4m("unterminated header line".into()));
    }
    buf.pop();
    String::from_utf8(buf)
        .map(Some)
        .map_err(|_| FadeError::InvalidY4m("header line is not UTF-8".into()))
}

/// Streaming reader; frames come out in stream order.
pub struct Y4mReader<R> {
    reader: R,
    header: Y4mHeader,
    frames_read: u64,
}

impl Y4mReader<std::io::BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(std::io::BufReader::new(file))
    }
}

impl<R: BufRead> Y4mReader<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        let line = read_line(&mut reader)?
            .ok_or_else(|| FadeError::InvalidY4m("empty stream".into()))?;
        let header = Y4mHeader::parse(&line)?;
        debug!(
            width = header.width,
            height = header.height,
            format = %header.format,
            "Opened YUV4MPEG2 stream"
        );
        Ok(Self {
            reader,
            header,
            frames_read: 0,
        })
    }

    pub fn header(&self) -> &Y4mHeader {
        &self.header
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Next frame, or `None` once the stream ends cleanly.
    pub fn read_frame(&mut self) -> Result<Option<VideoFrame>> {
        let Some(marker) = read_line(&mut self.reader)? else {
            return Ok(None);
        };
        let is_frame = marker == Y4M_FRAME_MAGIC
            || marker
                .strip_prefix(Y4M_FRAME_MAGIC)
                .is_some_and(|rest| rest.starts_with(' '));
        if !is_frame {
            return Err(FadeError::InvalidY4m(format!(
                "expected FRAME marker before frame {}",
                self.frames_read
            )));
        }

        let mut data = vec![0u8; self.header.frame_byte_size()];
        self.reader.read_exact(&mut data).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => {
                FadeError::InvalidY4m(format!("frame {} is truncated", self.frames_read))
            }
            _ => FadeError::Io(e),
        })?;

        let mut frame =
            VideoFrame::from_bytes(self.header.format, self.header.width, self.header.height, data)?;
        frame.index = self.frames_read;
        self.frames_read += 1;
        Ok(Some(frame))
    }
}

impl<R: BufRead> Iterator for Y4mReader<R> {
    type Item = Result<VideoFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_frame().transpose()
    }
}

/// Streaming writer; the header goes out on construction.
pub struct Y4mWriter<W: Write> {
    writer: W,
    header: Y4mHeader,
    frames_written: u64,
}

impl Y4mWriter<BufWriter<File>> {
    pub fn create(path: &Path, header: &Y4mHeader) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), header)
    }
}

impl<W: Write> Y4mWriter<W> {
    pub fn new(mut writer: W, header: &Y4mHeader) -> Result<Self> {
        writer.write_all(header.to_line()?.as_bytes())?;
        Ok(Self {
            writer,
            header: header.clone(),
            frames_written: 0,
        })
    }

    pub fn write_frame(&mut self, frame: &VideoFrame) -> Result<()> {
        if frame.format() != self.header.format {
            return Err(FadeError::UnsupportedFormat(format!(
                "{} frame in a {} stream",
                frame.format(),
                self.header.format
            )));
        }
        if frame.width() != self.header.width || frame.height() != self.header.height {
            return Err(FadeError::FrameSizeMismatch {
                expected: self.header.frame_byte_size(),
                actual: frame.data().len(),
            });
        }
        self.writer.write_all(Y4M_FRAME_MAGIC.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.write_all(frame.data())?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
