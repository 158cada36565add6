//! Gyroscope sensor types and configuration
//!
//! Provides types, enums, and utility functions for the ST1VAFE6AX's 3-axis gyroscope.

use super::conversion;

/// Gyroscope full-scale range (`CTRL6.FS_G`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GyroFullScale {
    /// ±125°/s range
    #[default]
    Dps125 = 0x0,
    /// ±250°/s range
    Dps250 = 0x1,
    /// ±500°/s range
    Dps500 = 0x2,
    /// ±1000°/s range
    Dps1000 = 0x3,
    /// ±2000°/s range
    Dps2000 = 0x4,
    /// ±4000°/s range
    Dps4000 = 0xC,
}

impl GyroFullScale {
    /// Decode the 4-bit field; reserved encodings read as ±125°/s
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x0F {
            0x1 => Self::Dps250,
            0x2 => Self::Dps500,
            0x3 => Self::Dps1000,
            0x4 => Self::Dps2000,
            0xC => Self::Dps4000,
            _ => Self::Dps125,
        }
    }

    /// Convert a raw sample to milli-degrees per second for this range
    #[must_use]
    pub fn to_mdps(self, lsb: i16) -> f32 {
        match self {
            Self::Dps125 => conversion::from_fs125_to_mdps(lsb),
            Self::Dps250 => conversion::from_fs250_to_mdps(lsb),
            Self::Dps500 => conversion::from_fs500_to_mdps(lsb),
            Self::Dps1000 => conversion::from_fs1000_to_mdps(lsb),
            Self::Dps2000 => conversion::from_fs2000_to_mdps(lsb),
            Self::Dps4000 => conversion::from_fs4000_to_mdps(lsb),
        }
    }

    /// Get the maximum value in °/s
    #[must_use]
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Dps125 => 125,
            Self::Dps250 => 250,
            Self::Dps500 => 500,
            Self::Dps1000 => 1000,
            Self::Dps2000 => 2000,
            Self::Dps4000 => 4000,
        }
    }
}

/// Gyroscope output data rate (`CTRL2.ODR_G`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GyroDataRate {
    /// Power-down
    #[default]
    Off = 0,
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

impl GyroDataRate {
    /// Decode the 4-bit field; reserved encodings read as power-down
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x0F {
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
}

/// Gyroscope operating mode (`CTRL2.OP_MODE_G`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GyroMode {
    /// High-performance
    #[default]
    HighPerformance = 0,
    /// Sleep (drive on, sense off)
    Sleep = 4,
    /// Low-power
    LowPower = 5,
}

impl GyroMode {
    /// Decode the 3-bit field; reserved encodings read as high-performance
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x07 {
            4 => Self::Sleep,
            5 => Self::LowPower,
            _ => Self::HighPerformance,
        }
    }
}

/// Gyroscope self-test excitation (`CTRL10.ST_G`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GyroSelfTest {
    /// Normal operation
    #[default]
    Disabled = 0,
    /// Positive excitation
    Positive = 1,
    /// Negative excitation
    Negative = 2,
}

/// Gyroscope configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroConfig {
    /// Output data rate
    pub data_rate: GyroDataRate,
    /// Operating mode
    pub mode: GyroMode,
    /// Full-scale range
    pub full_scale: GyroFullScale,
}

/// Gyroscope data in milli-degrees per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataMdps {
    /// X-axis angular rate in mdps
    pub x: f32,
    /// Y-axis angular rate in mdps
    pub y: f32,
    /// Z-axis angular rate in mdps
    pub z: f32,
}

impl GyroDataMdps {
    /// Create from raw sensor values
    #[must_use]
    pub fn from_raw(raw: [i16; 3], full_scale: GyroFullScale) -> Self {
        let [x, y, z] = raw.map(|lsb| full_scale.to_mdps(lsb));
        Self { x, y, z }
    }

    /// Convert to degrees per second
    #[must_use]
    pub fn to_dps(&self) -> [f32; 3] {
        [self.x / 1000.0, self.y / 1000.0, self.z / 1000.0]
    }
}
