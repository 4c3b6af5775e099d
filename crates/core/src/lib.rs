//! Core units, constants, and shared primitives for the aerobraking calculator workspace.

pub mod body;

pub use body::{Planet, PlanetError};

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Empirical drag constant. Folds the pressure-to-density conversion of the
    /// atmosphere model into the drag equation (atm to kg/m³, times 0.008).
    pub const DRAG_CONSTANT: f64 = 1.223_094_855_487_4 * 0.008;
    /// Metres per kilometre.
    pub const METRES_PER_KM: f64 = 1_000.0;
    /// Metres per megametre.
    pub const METRES_PER_MM: f64 = 1_000_000.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use thiserror::Error;

    use super::constants::{METRES_PER_KM, METRES_PER_MM};

    /// Raised when a distance field has no leading number.
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[error("'{0}' does not start with a number")]
    pub struct UnitParseError(pub String);

    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * METRES_PER_KM
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / METRES_PER_KM
    }

    /// Parse a distance in metres, allowing an optional `km` or `mm` (megametre) suffix.
    ///
    /// Matching is case-insensitive and works on substrings, so `"1.5 Mm"` and
    /// `"70KM"` are both accepted. Trailing text after the number is ignored.
    pub fn parse_unit_float(input: &str) -> Result<f64, UnitParseError> {
        let lowered = input.to_lowercase();
        let value = parse_leading_float(&lowered).ok_or_else(|| UnitParseError(input.to_string()))?;
        if lowered.contains("mm") {
            Ok(value * METRES_PER_MM)
        } else if lowered.contains("km") {
            Ok(km_to_m(value))
        } else {
            Ok(value)
        }
    }

    /// Longest numeric prefix of `text`, after leading whitespace.
    fn parse_leading_float(text: &str) -> Option<f64> {
        let trimmed = text.trim_start();
        let bytes = trimmed.as_bytes();
        let mut end = 0;

        if matches!(bytes.first(), Some(b'+' | b'-')) {
            end += 1;
        }
        if trimmed[end..].starts_with("infinity") {
            let magnitude = f64::INFINITY;
            return Some(if bytes[0] == b'-' { -magnitude } else { magnitude });
        }

        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        let mut mantissa_digits = end - digits_start;
        if end < bytes.len() && bytes[end] == b'.' {
            let fraction_start = end + 1;
            let mut fraction_end = fraction_start;
            while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
                fraction_end += 1;
            }
            mantissa_digits += fraction_end - fraction_start;
            if mantissa_digits > 0 {
                end = fraction_end;
            }
        }
        if mantissa_digits == 0 {
            return None;
        }

        if end < bytes.len() && bytes[end] == b'e' {
            let mut exponent_end = end + 1;
            if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
                exponent_end += 1;
            }
            let exponent_digits_start = exponent_end;
            while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
                exponent_end += 1;
            }
            if exponent_end > exponent_digits_start {
                end = exponent_end;
            }
        }

        trimmed[..end].parse().ok()
    }

}

/// Planar vector helpers used in the orbital plane.
pub mod vector {
    /// Position (m) or velocity (m/s) in the orbital plane.
    pub type Vector2 = [f64; 2];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector2) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector2, b: &Vector2) -> f64 {
        a[0] * b[0] + a[1] * b[1]
    }

    /// Z component of `[a, 0] x [b, 0]`.
    #[inline]
    pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
        a[0] * b[1] - a[1] * b[0]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector2, b: &Vector2) -> Vector2 {
        [a[0] + b[0], a[1] + b[1]]
    }

    /// Element-wise sum of any number of vectors.
    #[inline]
    pub fn sum(vectors: &[Vector2]) -> Vector2 {
        vectors
            .iter()
            .fold([0.0, 0.0], |acc, v| [acc[0] + v[0], acc[1] + v[1]])
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector2, b: &Vector2) -> Vector2 {
        [a[0] - b[0], a[1] - b[1]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector2, s: f64) -> Vector2 {
        [v[0] * s, v[1] * s]
    }

    /// -1, 0 or 1. NaN maps to 0.
    #[inline]
    pub fn sign(x: f64) -> i8 {
        if x > 0.0 {
            1
        } else if x < 0.0 {
            -1
        } else {
            0
        }
    }

}
