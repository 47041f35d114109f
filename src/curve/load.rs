//! Reader for the spline-chain text format.
//!
//! Row 0 is a control point `x y`. After that rows alternate between segment coefficients
//! `a b c d` and the next control point `x y`, so the file always ends on a control point.

use crate::curve::model::{Coefficients, CurveModel};
use crate::foundation::core::Point;
use crate::foundation::error::{SplineCamError, SplineCamResult};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

impl CurveModel {
    /// Parse a spline chain from its text form.
    #[tracing::instrument(skip(text), fields(bytes = text.len()))]
    pub fn from_text(text: &str) -> SplineCamResult<Self> {
        let rows: Vec<&str> = text.lines().collect();
        let used = rows
            .iter()
            .rposition(|r| !r.trim().is_empty())
            .map(|i| i + 1)
            .ok_or_else(|| SplineCamError::parse(1, "input is empty"))?;

        let mut points: Vec<Point> = Vec::with_capacity(used / 2 + 1);
        let mut segments = Vec::with_capacity(used / 2);
        for (i, row) in rows[..used].iter().enumerate() {
            let line = i + 1;
            if i % 2 == 0 {
                let [x, y] = parse_fields::<2>(row, line)?;
                if let Some(prev) = points.last() {
                    if x <= prev.x {
                        return Err(SplineCamError::parse(
                            line,
                            format!("control point x {x} must exceed previous x {}", prev.x),
                        ));
                    }
                }
                points.push(Point::new(x, y));
            } else {
                let [a, b, c, d] = parse_fields::<4>(row, line)?;
                segments.push(Coefficients::new(a, b, c, d));
            }
        }

        if used % 2 == 0 {
            return Err(SplineCamError::parse(
                used,
                "input ends with segment coefficients; expected a closing control point",
            ));
        }
        if points.len() < 2 {
            return Err(SplineCamError::parse(
                used,
                "input needs at least two control points",
            ));
        }

        let curve = CurveModel::new(points, segments)
            .map_err(|e| SplineCamError::parse(used, e.to_string()))?;
        tracing::debug!(
            control_points = curve.control_points().len(),
            segments = curve.segment_count(),
            "loaded spline chain"
        );
        Ok(curve)
    }

    /// Parse a spline chain from a reader.
    pub fn from_reader<R: Read>(mut r: R) -> SplineCamResult<Self> {
        let mut text = String::new();
        r.read_to_string(&mut text)
            .map_err(|e| SplineCamError::parse(1, format!("read spline input: {e}")))?;
        Self::from_text(&text)
    }

    /// Parse a spline chain from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SplineCamResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SplineCamError::Other(anyhow::anyhow!(
                "open spline input '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

fn parse_fields<const N: usize>(row: &str, line: usize) -> SplineCamResult<[f64; N]> {
    let fields: Vec<&str> = row.split_whitespace().collect();
    if fields.len() != N {
        return Err(SplineCamError::parse(
            line,
            format!("expected {N} fields, found {}", fields.len()),
        ));
    }
    let mut out = [0.0; N];
    for (slot, field) in out.iter_mut().zip(fields) {
        let v: f64 = field
            .parse()
            .map_err(|_| SplineCamError::parse(line, format!("'{field}' is not a number")))?;
        if !v.is_finite() {
            return Err(SplineCamError::parse(
                line,
                format!("'{field}' is not finite"),
            ));
        }
        *slot = v;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/curve/load.rs"]
mod tests;
