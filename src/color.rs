//! sRGB to xy conversion for wide-gamut Hue lights.

use crate::types::XY;

/// Linear sRGB to XYZ, wide gamut, D65 white point.
const WIDE_GAMUT_D65: [[f64; 3]; 3] = [
    [0.664_511, 0.154_324, 0.162_028],
    [0.283_881, 0.668_433, 0.047_685],
    [0.000_088, 0.072_310, 0.986_039],
];

/// Significant digits kept in each coordinate
const PRECISION: usize = 4;

/// Undo sRGB companding for a single channel.
#[must_use]
pub fn gamma_expand(c: f64) -> f64 {
    if c > 0.040_45 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

/// Round to [`PRECISION`] significant digits.
fn round_significant(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }

    format!("{:.*e}", PRECISION - 1, value)
        .parse()
        .unwrap_or(value)
}

/// Convert normalized (`[0, 1]`) sRGB channels to chromaticity coordinates.
///
/// Black (or anything else where `X + Y + Z` is zero) maps to `(0, 0)`.
#[must_use]
pub fn to_xy(red: f64, green: f64, blue: f64) -> XY {
    let rgb = [red, green, blue].map(gamma_expand);

    let [x, y, z] =
        WIDE_GAMUT_D65.map(|row| row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]);

    let sum = x + y + z;
    let fx = x / sum;
    let fy = y / sum;

    XY::new(
        round_significant(if fx.is_finite() { fx } else { 0.0 }),
        round_significant(if fy.is_finite() { fy } else { 0.0 }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn significant_digits(value: f64) -> usize {
        let text = format!("{value}");
        text.trim_start_matches(['0', '.'])
            .chars()
            .filter(char::is_ascii_digit)
            .count()
    }

    #[test]
    fn black_is_zero() {
        assert_eq!(to_xy(0.0, 0.0, 0.0), XY::ZERO);
    }

    #[test]
    fn primaries() {
        assert_eq!(to_xy(1.0, 0.0, 0.0), XY::new(0.7006, 0.2993));
        assert_eq!(to_xy(0.0, 1.0, 0.0), XY::new(0.1724, 0.7468));
        assert_eq!(to_xy(0.0, 0.0, 1.0), XY::new(0.1355, 0.03988));
    }

    #[test]
    fn neutral_white() {
        assert_eq!(to_xy(1.0, 1.0, 1.0), XY::new(0.3227, 0.329));
        /* equal channels always land on the white point */
        assert_eq!(to_xy(0.5, 0.5, 0.5), to_xy(1.0, 1.0, 1.0));
    }

    #[test]
    fn linear_segment_below_threshold() {
        assert!((gamma_expand(0.04) - 0.04 / 12.92).abs() < f64::EPSILON);
        assert_eq!(to_xy(0.02, 0.01, 0.0), XY::new(0.5313, 0.4428));
    }

    #[test]
    fn stays_in_unit_range() {
        let steps = [0.0, 0.01, 0.04045, 0.2, 0.5, 0.8, 1.0];
        for r in steps {
            for g in steps {
                for b in steps {
                    let xy = to_xy(r, g, b);
                    assert!((0.0..=1.0).contains(&xy.x), "{r} {g} {b} -> {xy:?}");
                    assert!((0.0..=1.0).contains(&xy.y), "{r} {g} {b} -> {xy:?}");
                    assert!(significant_digits(xy.x) <= 4, "{xy:?}");
                    assert!(significant_digits(xy.y) <= 4, "{xy:?}");
                }
            }
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(to_xy(1.0, 0.5, 0.0), to_xy(1.0, 0.5, 0.0));
        assert_eq!(to_xy(1.0, 0.5, 0.0), XY::new(0.6118, 0.3745));
    }

    #[test]
    fn rounding() {
        assert_eq!(round_significant(0.700_606_2), 0.7006);
        assert_eq!(round_significant(0.039_878_67), 0.039_88);
        assert_eq!(round_significant(0.0), 0.0);
    }
}
