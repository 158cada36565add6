//! IEEE-754 half-precision (binary16) encoding
//!
//! The embedded advanced-feature memory stores the SFLP gyroscope bias and the
//! FSM/MLC bio sensitivity as binary16 values (1 sign bit, 5 exponent bits,
//! 10 fraction bits). SFLP vectors in the FIFO use the same encoding.

const F32_SIGN: u32 = 0x8000_0000;
const F32_EXP: u32 = 0x7F80_0000;
const F32_SIG: u32 = 0x007F_FFFF;

/// Smallest f32 exponent field that no longer fits a finite half (2^16)
const HALF_OVERFLOW_EXP: u32 = 0x4780_0000;
/// Largest f32 exponent field that maps to a half subnormal (2^-15)
const HALF_SUBNORMAL_EXP: u32 = 0x3800_0000;
/// Below 2^-25 everything rounds to zero
const HALF_UNDERFLOW_EXP: u32 = 0x3300_0000;

const HALF_INFINITY: u16 = 0x7C00;

/// Convert a single-precision float to its half-precision bit pattern
///
/// Rounds to nearest, ties to even. Values too large for binary16 become a
/// signed infinity, values too small become a signed zero or subnormal. NaN
/// payloads are truncated but always stay NaN.
///
/// # Example
///
/// ```
/// use st1vafe6ax::half::float_to_half;
///
/// assert_eq!(float_to_half(1.0), 0x3C00);
/// assert_eq!(float_to_half(-0.0), 0x8000);
/// assert_eq!(float_to_half(65504.0), 0x7BFF);
/// assert_eq!(float_to_half(1.0e6), 0x7C00);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn float_to_half(value: f32) -> u16 {
    let bits = value.to_bits();
    let sign = ((bits & F32_SIGN) >> 16) as u16;
    let exp = bits & F32_EXP;

    if exp >= HALF_OVERFLOW_EXP {
        if exp == F32_EXP {
            let sig = bits & F32_SIG;
            if sig != 0 {
                // NaN: keep the top payload bits, but never collapse to infinity
                let mut nan = HALF_INFINITY + (sig >> 13) as u16;
                if nan == HALF_INFINITY {
                    nan += 1;
                }
                return sign + nan;
            }
        }
        return sign + HALF_INFINITY;
    }

    if exp <= HALF_SUBNORMAL_EXP {
        if exp < HALF_UNDERFLOW_EXP {
            return sign;
        }
        let exp = exp >> 23;
        let mut sig = 0x0080_0000 + (bits & F32_SIG);
        sig >>= 113 - exp;
        // Ties to even: skip the rounding bump when exactly halfway and the kept LSB is 0.
        // The bits shifted out above are recovered from the low bits of the input.
        if (sig & 0x3FFF) != 0x1000 || (bits & 0x07FF) != 0 {
            sig += 0x1000;
        }
        return sign + (sig >> 13) as u16;
    }

    let half_exp = ((exp - HALF_SUBNORMAL_EXP) >> 13) as u16;
    let mut sig = bits & F32_SIG;
    if (sig & 0x3FFF) != 0x1000 {
        sig += 0x1000;
    }
    // A carry out of the significand bumps the exponent, possibly up to infinity
    sign + half_exp + (sig >> 13) as u16
}

/// Convert a half-precision bit pattern back to single precision
///
/// Exact for every binary16 value, including subnormals, infinities and NaN.
#[must_use]
pub fn half_to_float(half: u16) -> f32 {
    let sign = u32::from(half & 0x8000) << 16;
    let exp = u32::from(half & 0x7C00);
    let sig = u32::from(half & 0x03FF);

    let bits = match (exp, sig) {
        (0, 0) => sign,
        (0, _) => {
            // Subnormal: normalise the significand
            let shift = sig.leading_zeros() - 21;
            let sig = (sig << shift) & 0x03FF;
            let exp = 113 - shift;
            sign | (exp << 23) | (sig << 13)
        }
        (0x7C00, _) => sign | F32_EXP | (sig << 13),
        _ => sign | ((exp + 0x1_C000) << 13) | (sig << 13),
    };
    f32::from_bits(bits)
}
