//! Sensor fusion low-power (SFLP) types
//!
//! The SFLP engine computes a game rotation vector, a gravity vector and a
//! gyroscope bias estimate. Its bias can be seeded through
//! [`St1vafe6axDriver::set_sflp_gyro_bias`](crate::St1vafe6axDriver::set_sflp_gyro_bias),
//! which stores the bias in the advanced-feature memory as binary16 values
//! scaled by the SFLP output rate.

use core::f32::consts::PI;

use crate::half::float_to_half;

/// SFLP game vector output rate (`SFLP_ODR.SFLP_GAME_ODR`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SflpDataRate {
    /// 15 Hz
    #[default]
    Hz15 = 0,
    /// 30 Hz
    Hz30 = 1,
    /// 60 Hz
    Hz60 = 2,
    /// 120 Hz
    Hz120 = 3,
    /// 240 Hz
    Hz240 = 4,
    /// 480 Hz
    Hz480 = 5,
}

impl SflpDataRate {
    /// Decode the 3-bit field; reserved encodings read as 15 Hz
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x07 {
            1 => Self::Hz30,
            2 => Self::Hz60,
            3 => Self::Hz120,
            4 => Self::Hz240,
            5 => Self::Hz480,
            _ => Self::Hz15,
        }
    }

    /// Sample period in seconds, the divisor applied to the bias before encoding
    #[must_use]
    pub const fn bias_scale(self) -> f32 {
        match self {
            Self::Hz15 => 0.04,
            Self::Hz30 => 0.02,
            Self::Hz60 => 0.01,
            Self::Hz120 => 0.005,
            Self::Hz240 => 0.0025,
            Self::Hz480 => 0.001_25,
        }
    }

    /// Nominal rate in Hz
    #[must_use]
    pub const fn hz(self) -> u16 {
        match self {
            Self::Hz15 => 15,
            Self::Hz30 => 30,
            Self::Hz60 => 60,
            Self::Hz120 => 120,
            Self::Hz240 => 240,
            Self::Hz480 => 480,
        }
    }
}

/// Gyroscope bias in degrees per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroBias {
    /// X-axis bias in dps
    pub x: f32,
    /// Y-axis bias in dps
    pub y: f32,
    /// Z-axis bias in dps
    pub z: f32,
}

impl GyroBias {
    /// Create a bias from its three components in dps
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Encode the bias for the given SFLP rate
    ///
    /// Each component is converted to rad/s, divided by the rate's
    /// [`bias_scale`](SflpDataRate::bias_scale) and stored as binary16.
    #[must_use]
    pub fn to_half(&self, rate: SflpDataRate) -> [u16; 3] {
        let k = rate.bias_scale();
        [self.x, self.y, self.z].map(|dps| float_to_half(dps * (PI / 180.0) / k))
    }

    /// Little-endian byte image of [`to_half`](Self::to_half), as stored in memory
    #[must_use]
    pub fn to_le_bytes(&self, rate: SflpDataRate) -> [u8; 6] {
        let [x, y, z] = self.to_half(rate);
        let [x0, x1] = x.to_le_bytes();
        let [y0, y1] = y.to_le_bytes();
        let [z0, z1] = z.to_le_bytes();
        [x0, x1, y0, y1, z0, z1]
    }
}
