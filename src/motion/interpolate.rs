//! # Piecewise-Linear Interpolation
//!
//! Maps a value through a list of control points. Input ranges must be
//! monotonically increasing; output ranges may go in any direction.

/// What happens to values that fall outside the input range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Saturate at the nearest endpoint of the output range.
    #[default]
    Clamp,
    /// Continue the slope of the outermost segment.
    Extend,
    /// Return the input value untouched.
    Identity,
}

/// Interpolate `value` from `input` to `output`.
///
/// Both slices must have the same length (at least two points). Mismatched or
/// degenerate ranges fall back to the first output value so callers never
/// panic inside a frame.
pub fn interpolate(value: f64, input: &[f64], output: &[f64], extrapolation: Extrapolation) -> f64 {
    debug_assert_eq!(input.len(), output.len(), "control point count mismatch");
    let len = input.len().min(output.len());
    if len < 2 {
        return output.first().copied().unwrap_or(value);
    }

    let first = input[0];
    let last = input[len - 1];

    if value < first || value > last {
        match extrapolation {
            Extrapolation::Clamp => {
                return if value < first {
                    output[0]
                } else {
                    output[len - 1]
                };
            }
            Extrapolation::Identity => return value,
            Extrapolation::Extend => {}
        }
    }

    // Segment whose right edge is the first control point >= value.
    let segment = input[1..len]
        .iter()
        .position(|&edge| value <= edge)
        .unwrap_or(len - 2);

    lerp_segment(
        value,
        (input[segment], input[segment + 1]),
        (output[segment], output[segment + 1]),
    )
}

fn lerp_segment(value: f64, (in_lo, in_hi): (f64, f64), (out_lo, out_hi): (f64, f64)) -> f64 {
    let span = in_hi - in_lo;
    if span == 0.0 {
        return out_lo;
    }
    let t = (value - in_lo) / span;
    // Weighted form keeps both endpoints exact.
    out_lo * (1.0 - t) + out_hi * t
}
