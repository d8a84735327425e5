//! In-place fixed-point scaling of frame planes toward black.
//!
//! Luma and packed RGB samples scale toward 0:
//! `s' = (s * factor + 32768) >> 16`.
//! Chroma samples scale toward the neutral value 128:
//! `s' = ((s - 128) * factor + 8421367) >> 16`.
//! Both round to nearest, leave samples untouched at `factor == 65536`, and
//! hit black (0 / 128) exactly at `factor == 0`.

use std::ops::Range;

use rayon::prelude::*;

use crate::consts::{CHROMA_ROUND_BIAS, FACTOR_ONE, LUMA_ROUND_BIAS, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{FadeError, Result};
use crate::frame::{ceil_rshift, PlaneKind, PlaneMut};

/// Scale the rows `[region_top, region_top + region_height)` of a frame.
///
/// `planes` is either a single luma/RGB plane or a luma plane followed by two
/// chroma planes. The region is given in luma rows; chroma planes process the
/// matching subsampled rows. Every descriptor is validated before any byte is
/// written.
pub fn blend(
    factor: i32,
    planes: &mut [PlaneMut<'_>],
    region_top: usize,
    region_height: usize,
) -> Result<()> {
    blend_impl(factor, planes, region_top, region_height, false)
}

/// Same as [`blend`], splitting the rows of large planes across the Rayon pool.
pub fn blend_par(
    factor: i32,
    planes: &mut [PlaneMut<'_>],
    region_top: usize,
    region_height: usize,
) -> Result<()> {
    blend_impl(factor, planes, region_top, region_height, true)
}

/// Luma/RGB update for a single sample.
#[inline]
pub fn scale_luma_sample(sample: u8, factor: i32) -> u8 {
    ((sample as u32 * factor as u32 + LUMA_ROUND_BIAS) >> 16) as u8
}

/// Chroma update for a single sample.
#[inline]
pub fn scale_chroma_sample(sample: u8, factor: i32) -> u8 {
    (((sample as i32 - 128) * factor + CHROMA_ROUND_BIAS) >> 16) as u8
}

/// Rows of `plane` covered by the luma region `[top, top + height)`.
///
/// Interior boundaries round down, so consecutive slices map to disjoint
/// chroma rows. A region that reaches the bottom of the luma plane also takes
/// the last partial chroma row, and every row spans the full rounded-up
/// chroma width. On odd-sized frames this fades one more chroma row and
/// column than `(top + height) >> vshift` and `width >> hshift` would, so no
/// edge is left unfaded.
pub fn addressed_rows(
    plane: &PlaneMut<'_>,
    luma_height: usize,
    top: usize,
    height: usize,
) -> Range<usize> {
    if height == 0 {
        return top..top;
    }
    let bottom = top.saturating_add(height);
    match plane.kind {
        PlaneKind::Luma => top..bottom,
        PlaneKind::Chroma => {
            let start = top >> plane.vshift;
            let end = if bottom == luma_height {
                plane.height
            } else {
                bottom >> plane.vshift
            };
            start..end.max(start)
        }
    }
}

fn blend_impl(
    factor: i32,
    planes: &mut [PlaneMut<'_>],
    region_top: usize,
    region_height: usize,
    parallel: bool,
) -> Result<()> {
    validate(factor, planes, region_top, region_height)?;
    if factor == FACTOR_ONE {
        return Ok(());
    }

    let luma_height = planes[0].height;
    for plane in planes.iter_mut() {
        let rows = addressed_rows(plane, luma_height, region_top, region_height);
        if rows.is_empty() {
            continue;
        }
        let stride = plane.stride;
        let row_bytes = plane.row_bytes();
        let kind = plane.kind;
        let region = &mut plane.data[rows.start * stride..];

        if parallel && rows.len() * row_bytes >= PARALLEL_PIXEL_THRESHOLD {
            region
                .par_chunks_mut(stride)
                .take(rows.len())
                .for_each(|row| scale_row(&mut row[..row_bytes], kind, factor));
        } else {
            region
                .chunks_mut(stride)
                .take(rows.len())
                .for_each(|row| scale_row(&mut row[..row_bytes], kind, factor));
        }
    }
    Ok(())
}

#[inline]
fn scale_row(row: &mut [u8], kind: PlaneKind, factor: i32) {
    match kind {
        PlaneKind::Luma => {
            for s in row.iter_mut() {
                *s = scale_luma_sample(*s, factor);
            }
        }
        PlaneKind::Chroma => {
            for s in row.iter_mut() {
                *s = scale_chroma_sample(*s, factor);
            }
        }
    }
}

fn validate(
    factor: i32,
    planes: &[PlaneMut<'_>],
    region_top: usize,
    region_height: usize,
) -> Result<()> {
    if !(0..=FACTOR_ONE).contains(&factor) {
        return Err(FadeError::InvalidRegion(format!(
            "factor {factor} outside [0, {FACTOR_ONE}]"
        )));
    }

    let Some((first, chroma)) = planes.split_first() else {
        return Err(FadeError::InvalidRegion("no planes supplied".into()));
    };
    if !(chroma.is_empty() || chroma.len() == 2) {
        return Err(FadeError::InvalidRegion(format!(
            "expected 1 or 3 planes, got {}",
            planes.len()
        )));
    }
    if first.kind != PlaneKind::Luma {
        return Err(FadeError::InvalidRegion(
            "first plane must be luma or packed RGB".into(),
        ));
    }
    if first.group_size == 0 || (!chroma.is_empty() && first.group_size != 1) {
        return Err(FadeError::InvalidRegion(format!(
            "sample group size {} not valid for {} plane(s)",
            first.group_size,
            planes.len()
        )));
    }
    if chroma.iter().any(|p| p.kind != PlaneKind::Chroma) {
        return Err(FadeError::InvalidRegion(
            "planes after the first must be chroma".into(),
        ));
    }

    let in_bounds = region_top
        .checked_add(region_height)
        .is_some_and(|bottom| bottom <= first.height);
    if !in_bounds {
        return Err(FadeError::InvalidRegion(format!(
            "rows {region_top}+{region_height} exceed plane height {}",
            first.height
        )));
    }

    for (index, plane) in planes.iter().enumerate() {
        check_plane_storage(index, plane)?;
        if plane.kind == PlaneKind::Chroma {
            let want_height = ceil_rshift(first.height, plane.vshift);
            let want_width = ceil_rshift(first.width, plane.hshift);
            if plane.height != want_height || plane.width != want_width {
                return Err(FadeError::InvalidRegion(format!(
                    "chroma plane {index} is {}x{}, subsampled luma needs {want_width}x{want_height}",
                    plane.width, plane.height
                )));
            }
        }
    }
    Ok(())
}

fn check_plane_storage(index: usize, plane: &PlaneMut<'_>) -> Result<()> {
    let row_bytes = plane.row_bytes();
    if row_bytes == 0 {
        return Err(FadeError::InvalidRegion(format!("plane {index} has zero width")));
    }
    if plane.stride < row_bytes {
        return Err(FadeError::InvalidRegion(format!(
            "plane {index} stride {} smaller than row of {row_bytes} bytes",
            plane.stride
        )));
    }
    if plane.height > 0 {
        let needed = (plane.height - 1)
            .checked_mul(plane.stride)
            .and_then(|b| b.checked_add(row_bytes));
        match needed {
            Some(needed) if needed <= plane.data.len() => {}
            _ => {
                return Err(FadeError::InvalidRegion(format!(
                    "plane {index} buffer of {} bytes too short for {} rows of stride {}",
                    plane.data.len(),
                    plane.height,
                    plane.stride
                )));
            }
        }
    }
    Ok(())
}
