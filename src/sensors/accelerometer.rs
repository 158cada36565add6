//! Accelerometer sensor types and configuration
//!
//! Provides types, enums, and utility functions for the ST1VAFE6AX's 3-axis accelerometer.

use super::conversion;

/// Accelerometer full-scale range (`CTRL8.FS_XL`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AccelFullScale {
    /// ±2g range (most sensitive, least range)
    #[default]
    G2 = 0,
    /// ±4g range
    G4 = 1,
    /// ±8g range
    G8 = 2,
}

impl AccelFullScale {
    /// Decode the 2-bit field; the reserved encoding reads as ±2g
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x03 {
            1 => Self::G4,
            2 => Self::G8,
            _ => Self::G2,
        }
    }

    /// Convert a raw sample to milli-g for this range
    #[must_use]
    pub fn to_mg(self, lsb: i16) -> f32 {
        match self {
            Self::G2 => conversion::from_fs2_to_mg(lsb),
            Self::G4 => conversion::from_fs4_to_mg(lsb),
            Self::G8 => conversion::from_fs8_to_mg(lsb),
        }
    }

    /// Get the maximum value in g
    #[must_use]
    pub const fn max_value(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
        }
    }
}

/// Accelerometer output data rate (`CTRL1.ODR_XL`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AccelDataRate {
    /// Power-down
    #[default]
    Off = 0,
    /// 1.875 Hz (low-power modes only)
    Hz1_875 = 1,
    /// 7.5 Hz
    Hz7_5 = 2,
    /// 15 Hz
    Hz15 = 3,
    /// 30 Hz
    Hz30 = 4,
    /// 60 Hz
    Hz60 = 5,
    /// 120 Hz
    Hz120 = 6,
    /// 240 Hz
    Hz240 = 7,
    /// 480 Hz
    Hz480 = 8,
    /// 960 Hz
    Hz960 = 9,
    /// 1.92 kHz
    Hz1920 = 10,
    /// 3.84 kHz
    Hz3840 = 11,
}

impl AccelDataRate {
    /// Decode the 4-bit field; reserved encodings read as power-down
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x0F {
            1 => Self::Hz1_875,
            2 => Self::Hz7_5,
            3 => Self::Hz15,
            4 => Self::Hz30,
            5 => Self::Hz60,
            6 => Self::Hz120,
            7 => Self::Hz240,
            8 => Self::Hz480,
            9 => Self::Hz960,
            10 => Self::Hz1920,
            11 => Self::Hz3840,
            _ => Self::Off,
        }
    }

    /// Nominal rate in Hz
    #[must_use]
    pub const fn hz(self) -> f32 {
        match self {
            Self::Off => 0.0,
            Self::Hz1_875 => 1.875,
            Self::Hz7_5 => 7.5,
            Self::Hz15 => 15.0,
            Self::Hz30 => 30.0,
            Self::Hz60 => 60.0,
            Self::Hz120 => 120.0,
            Self::Hz240 => 240.0,
            Self::Hz480 => 480.0,
            Self::Hz960 => 960.0,
            Self::Hz1920 => 1920.0,
            Self::Hz3840 => 3840.0,
        }
    }
}

/// Accelerometer operating mode (`CTRL1.OP_MODE_XL`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AccelMode {
    /// High-performance
    #[default]
    HighPerformance = 0,
    /// High-performance, alternate filtering
    HighPerformance2 = 1,
    /// Low-power, 2-sample averaging
    LowPower2 = 4,
    /// Low-power, 4-sample averaging
    LowPower4 = 5,
    /// Low-power, 8-sample averaging
    LowPower8 = 6,
}

impl AccelMode {
    /// Decode the 3-bit field; reserved encodings read as high-performance
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x07 {
            1 => Self::HighPerformance2,
            4 => Self::LowPower2,
            5 => Self::LowPower4,
            6 => Self::LowPower8,
            _ => Self::HighPerformance,
        }
    }
}

/// Accelerometer self-test excitation (`CTRL10.ST_XL`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AccelSelfTest {
    /// Normal operation
    #[default]
    Disabled = 0,
    /// Positive excitation
    Positive = 1,
    /// Negative excitation
    Negative = 2,
}

impl AccelSelfTest {
    /// Decode the 2-bit field; the reserved encoding reads as disabled
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x03 {
            1 => Self::Positive,
            2 => Self::Negative,
            _ => Self::Disabled,
        }
    }
}

/// Accelerometer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelConfig {
    /// Output data rate
    pub data_rate: AccelDataRate,
    /// Operating mode
    pub mode: AccelMode,
    /// Full-scale range
    pub full_scale: AccelFullScale,
}

/// Accelerometer data in milli-g
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataMg {
    /// X-axis acceleration in mg
    pub x: f32,
    /// Y-axis acceleration in mg
    pub y: f32,
    /// Z-axis acceleration in mg
    pub z: f32,
}

impl AccelDataMg {
    /// Create from raw sensor values
    ///
    /// # Arguments
    ///
    /// * `raw` - Raw X, Y, Z samples
    /// * `full_scale` - Range the samples were taken with
    #[must_use]
    pub fn from_raw(raw: [i16; 3], full_scale: AccelFullScale) -> Self {
        let [x, y, z] = raw.map(|lsb| full_scale.to_mg(lsb));
        Self { x, y, z }
    }

    /// Get the magnitude of the acceleration vector in mg
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
