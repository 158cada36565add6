//! Raw-to-engineering-unit conversions
//!
//! Sensitivities are the typical datasheet values. Each function takes the raw
//! two's-complement sample for one axis.

/// SFLP gravity vector to milli-g (same sensitivity as ±2 g)
#[must_use]
pub fn from_sflp_to_mg(lsb: i16) -> f32 {
    from_fs2_to_mg(lsb)
}

/// ±2 g accelerometer sample to milli-g
#[must_use]
pub fn from_fs2_to_mg(lsb: i16) -> f32 {
    f32::from(lsb) * 0.061
}

/// ±4 g accelerometer sample to milli-g
#[must_use]
pub fn from_fs4_to_mg(lsb: i16) -> f32 {
    f32::from(lsb) * 0.122
}

/// ±8 g accelerometer sample to milli-g
#[must_use]
pub fn from_fs8_to_mg(lsb: i16) -> f32 {
    f32::from(lsb) * 0.244
}

/// ±16 g accelerometer sample to milli-g
#[must_use]
pub fn from_fs16_to_mg(lsb: i16) -> f32 {
    f32::from(lsb) * 0.488
}

/// ±125 dps gyroscope sample to milli-degrees per second
#[must_use]
pub fn from_fs125_to_mdps(lsb: i16) -> f32 {
    f32::from(lsb) * 4.375
}

/// ±250 dps gyroscope sample to milli-degrees per second
#[must_use]
pub fn from_fs250_to_mdps(lsb: i16) -> f32 {
    f32::from(lsb) * 8.75
}

/// ±500 dps gyroscope sample to milli-degrees per second
#[must_use]
pub fn from_fs500_to_mdps(lsb: i16) -> f32 {
    f32::from(lsb) * 17.5
}

/// ±1000 dps gyroscope sample to milli-degrees per second
#[must_use]
pub fn from_fs1000_to_mdps(lsb: i16) -> f32 {
    f32::from(lsb) * 35.0
}

/// ±2000 dps gyroscope sample to milli-degrees per second
#[must_use]
pub fn from_fs2000_to_mdps(lsb: i16) -> f32 {
    f32::from(lsb) * 70.0
}

/// ±4000 dps gyroscope sample to milli-degrees per second
#[must_use]
pub fn from_fs4000_to_mdps(lsb: i16) -> f32 {
    f32::from(lsb) * 140.0
}

/// Temperature sample to degrees Celsius (256 LSB/°C, 0 LSB = 25 °C)
#[must_use]
pub fn from_lsb_to_celsius(lsb: i16) -> f32 {
    f32::from(lsb) / 256.0 + 25.0
}

/// Timestamp counter to nanoseconds (21.75 µs per LSB)
#[must_use]
pub fn from_lsb_to_nsec(lsb: u32) -> u64 {
    u64::from(lsb) * 21_750
}

/// Bio channel sample to millivolts
#[must_use]
pub fn from_lsb_to_mv(lsb: i16) -> f32 {
    f32::from(lsb) / 78.0
}
