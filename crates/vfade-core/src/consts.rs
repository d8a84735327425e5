/// Fixed-point representation of 1.0 for blend factors (16 fractional bits).
pub const FACTOR_ONE: i32 = 1 << 16;

/// Half of `FACTOR_ONE`, added before the shift so luma rounds to nearest.
pub const LUMA_ROUND_BIAS: u32 = 1 << 15;

/// Neutral chroma sample: no color, the chroma analogue of black.
pub const NEUTRAL_CHROMA: u8 = 128;

/// 128.5 in 16.16 fixed point, less a few units so the result stays below 256.
/// With `factor == 0` every chroma sample collapses to exactly 128.
pub const CHROMA_ROUND_BIAS: i32 = 8_421_367;

/// Minimum addressed byte count to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Largest accepted frame width or height, in pixels.
pub const MAX_FRAME_DIMENSION: usize = 16_384;

/// Default number of frames in a fade when the duration is omitted or zero.
pub const MIN_FADE_FRAMES: u64 = 1;

/// ITU-R BT.601 red contribution of Cr.
pub const BT601_CR_TO_R: f32 = 1.402;

/// ITU-R BT.601 green contribution of Cb.
pub const BT601_CB_TO_G: f32 = 0.344_136;

/// ITU-R BT.601 green contribution of Cr.
pub const BT601_CR_TO_G: f32 = 0.714_136;

/// ITU-R BT.601 blue contribution of Cb.
pub const BT601_CB_TO_B: f32 = 1.772;

/// Magic that opens every YUV4MPEG2 stream header.
pub const Y4M_MAGIC: &str = "YUV4MPEG2";

/// Marker that opens every YUV4MPEG2 frame.
pub const Y4M_FRAME_MAGIC: &str = "FRAME";

/// Upper bound on a YUV4MPEG2 header or frame-marker line.
pub const Y4M_MAX_LINE: usize = 4096;
