use crate::foundation::error::{SplineCamError, SplineCamResult};
use crate::render::frame::FrameRgb;

/// Box-filter an opaque RGBA8 buffer down by an integer `factor` into RGB8.
///
/// `width` and `height` describe the source and must both be multiples of `factor`. Alpha is
/// dropped; the source is expected to be fully opaque so premultiplied and straight values agree.
pub(crate) fn downsample_rgba_to_rgb(
    src: &[u8],
    width: u32,
    height: u32,
    factor: u32,
) -> SplineCamResult<FrameRgb> {
    if factor == 0 || width % factor != 0 || height % factor != 0 {
        return Err(SplineCamError::evaluation(format!(
            "cannot downsample {width}x{height} by {factor}"
        )));
    }
    let (sw, sh) = (width as usize, height as usize);
    if src.len() != sw * sh * 4 {
        return Err(SplineCamError::evaluation("downsample source byte len mismatch"));
    }

    let f = factor as usize;
    let (dw, dh) = (sw / f, sh / f);
    let n = (f as u64) * (f as u64);
    let mut data = Vec::with_capacity(dw * dh * 3);
    for dy in 0..dh {
        for dx in 0..dw {
            let mut acc = [0u64; 3];
            for sy in dy * f..(dy + 1) * f {
                let row = sy * sw * 4;
                for sx in dx * f..(dx + 1) * f {
                    let px = &src[row + sx * 4..row + sx * 4 + 3];
                    acc[0] += u64::from(px[0]);
                    acc[1] += u64::from(px[1]);
                    acc[2] += u64::from(px[2]);
                }
            }
            data.extend(acc.iter().map(|&c| ((c + n / 2) / n) as u8));
        }
    }

    Ok(FrameRgb {
        width: dw as u32,
        height: dh as u32,
        data,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/downsample.rs"]
mod tests;
