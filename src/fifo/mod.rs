//! FIFO (First In First Out) buffer decoding and configuration
//!
//! The ST1VAFE6AX FIFO stores tagged records of a fixed size: one tag byte
//! followed by six payload bytes. The tag identifies which sensor or embedded
//! function produced the payload, so records of different kinds can be
//! interleaved freely.
//!
//! Tag byte layout:
//! - bits 7:3 - sensor code, see [`FifoTag`]
//! - bits 2:0 - tag counter, passed through unmodified
//!
//! # Example
//!
//! ```ignore
//! # use st1vafe6ax::{St1vafe6axDriver, FifoConfig, FifoMode, FifoBatchRate};
//! # let mut sensor: St1vafe6axDriver<_> = todo!();
//! let config = FifoConfig {
//!     watermark: 16,
//!     accel_batch: FifoBatchRate::Hz120,
//!     gyro_batch: FifoBatchRate::Hz120,
//!     mode: FifoMode::Stream,
//! };
//! sensor.fifo_configure(&config)?;
//!
//! // Later, drain whatever the FIFO holds
//! let records = sensor.fifo_drain::<32>()?;
//! for record in &records {
//!     if record.tag == FifoTag::AccelNotCompressed {
//!         let [x, y, z] = record.axes();
//!     }
//! }
//! ```

pub mod parser;

use crate::half::half_to_float;

/// Size of one FIFO record in bytes (tag + payload)
pub const RECORD_SIZE: usize = 7;

/// Size of the payload of one FIFO record in bytes
pub const PAYLOAD_SIZE: usize = 6;

/// Sensor code carried in bits 7:3 of the FIFO tag byte
///
/// Codes that are reserved on this device decode as [`FifoTag::Empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FifoTag {
    /// No data (FIFO empty or reserved code)
    Empty = 0x00,
    /// Gyroscope, uncompressed
    GyroNotCompressed = 0x01,
    /// Accelerometer, uncompressed
    AccelNotCompressed = 0x02,
    /// Temperature
    Temperature = 0x03,
    /// Timestamp
    Timestamp = 0x04,
    /// Configuration change marker
    CfgChange = 0x05,
    /// Accelerometer, uncompressed, sample at time T-2
    AccelNotCompressedT2 = 0x06,
    /// Accelerometer, uncompressed, sample at time T-1
    AccelNotCompressedT1 = 0x07,
    /// Accelerometer, 2x compressed
    AccelCompressed2x = 0x08,
    /// Accelerometer, 3x compressed
    AccelCompressed3x = 0x09,
    /// Gyroscope, uncompressed, sample at time T-2
    GyroNotCompressedT2 = 0x0A,
    /// Gyroscope, uncompressed, sample at time T-1
    GyroNotCompressedT1 = 0x0B,
    /// Gyroscope, 2x compressed
    GyroCompressed2x = 0x0C,
    /// Gyroscope, 3x compressed
    GyroCompressed3x = 0x0D,
    /// Step counter (count and timestamp)
    StepCounter = 0x12,
    /// SFLP game rotation vector (binary16 quaternion x, y, z)
    SflpGameRotationVector = 0x13,
    /// SFLP gyroscope bias (binary16 x, y, z)
    SflpGyroscopeBias = 0x16,
    /// SFLP gravity vector (binary16 x, y, z)
    SflpGravityVector = 0x17,
    /// MLC result
    MlcResult = 0x1A,
    /// MLC filter
    MlcFilter = 0x1B,
    /// MLC feature
    MlcFeature = 0x1C,
    /// Accelerometer dual channel
    AccelDualCore = 0x1D,
    /// Analog hub / bio channel
    BioChannel = 0x1F,
}

impl FifoTag {
    /// Decode a 5-bit sensor code
    ///
    /// Only the low five bits of `code` are considered.
    pub const fn from_raw(code: u8) -> Self {
        match code & 0x1F {
            0x01 => Self::GyroNotCompressed,
            0x02 => Self::AccelNotCompressed,
            0x03 => Self::Temperature,
            0x04 => Self::Timestamp,
            0x05 => Self::CfgChange,
            0x06 => Self::AccelNotCompressedT2,
            0x07 => Self::AccelNotCompressedT1,
            0x08 => Self::AccelCompressed2x,
            0x09 => Self::AccelCompressed3x,
            0x0A => Self::GyroNotCompressedT2,
            0x0B => Self::GyroNotCompressedT1,
            0x0C => Self::GyroCompressed2x,
            0x0D => Self::GyroCompressed3x,
            0x12 => Self::StepCounter,
            0x13 => Self::SflpGameRotationVector,
            0x16 => Self::SflpGyroscopeBias,
            0x17 => Self::SflpGravityVector,
            0x1A => Self::MlcResult,
            0x1B => Self::MlcFilter,
            0x1C => Self::MlcFeature,
            0x1D => Self::AccelDualCore,
            0x1F => Self::BioChannel,
            _ => Self::Empty,
        }
    }

    /// Decode the sensor code of a full tag byte
    pub const fn from_tag_byte(tag: u8) -> Self {
        Self::from_raw(tag >> 3)
    }
}

/// Step counter record payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepCount {
    /// Number of steps
    pub steps: u16,
    /// Timestamp of the last step, in timestamp LSB
    pub timestamp: u32,
}

/// One decoded FIFO record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoRecord {
    /// Sensor that produced this record
    pub tag: FifoTag,
    /// Tag counter (bits 2:0 of the tag byte)
    pub counter: u8,
    /// Raw payload
    pub data: [u8; PAYLOAD_SIZE],
}

impl FifoRecord {
    /// An empty record, as read from an empty FIFO
    pub const EMPTY: Self = Self {
        tag: FifoTag::Empty,
        counter: 0,
        data: [0; PAYLOAD_SIZE],
    };

    /// Decode one record from its seven wire bytes
    pub const fn from_bytes(bytes: &[u8; RECORD_SIZE]) -> Self {
        Self {
            tag: FifoTag::from_tag_byte(bytes[0]),
            counter: bytes[0] & 0x07,
            data: [bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6]],
        }
    }

    /// `true` when the record carries no data
    pub const fn is_empty(&self) -> bool {
        matches!(self.tag, FifoTag::Empty)
    }

    /// Payload as three signed little-endian axes (X, Y, Z)
    pub const fn axes(&self) -> [i16; 3] {
        let d = &self.data;
        [
            i16::from_le_bytes([d[0], d[1]]),
            i16::from_le_bytes([d[2], d[3]]),
            i16::from_le_bytes([d[4], d[5]]),
        ]
    }

    /// Payload as three unsigned little-endian words
    pub const fn words(&self) -> [u16; 3] {
        let d = &self.data;
        [
            u16::from_le_bytes([d[0], d[1]]),
            u16::from_le_bytes([d[2], d[3]]),
            u16::from_le_bytes([d[4], d[5]]),
        ]
    }

    /// Payload as three binary16 values widened to `f32`
    ///
    /// Applies to the SFLP records (game rotation vector, gravity, gyroscope bias).
    pub fn sflp_vector(&self) -> [f32; 3] {
        self.words().map(half_to_float)
    }

    /// Game rotation vector as a unit quaternion `[w, x, y, z]`
    ///
    /// The FIFO only carries the vector part; `w` is recovered from the unit
    /// norm and clamped at zero when rounding pushes the vector norm above one.
    pub fn game_rotation_quaternion(&self) -> [f32; 4] {
        let [x, y, z] = self.sflp_vector();
        let sum = x * x + y * y + z * z;
        let w = if sum < 1.0 { libm::sqrtf(1.0 - sum) } else { 0.0 };
        [w, x, y, z]
    }

    /// Timestamp record value in timestamp LSB
    pub const fn timestamp(&self) -> u32 {
        let d = &self.data;
        u32::from_le_bytes([d[0], d[1], d[2], d[3]])
    }

    /// Temperature record raw value
    pub const fn temperature_raw(&self) -> i16 {
        i16::from_le_bytes([self.data[0], self.data[1]])
    }

    /// Step counter record value
    pub const fn step_count(&self) -> StepCount {
        let d = &self.data;
        StepCount {
            steps: u16::from_le_bytes([d[0], d[1]]),
            timestamp: u32::from_le_bytes([d[2], d[3], d[4], d[5]]),
        }
    }
}

impl Default for FifoRecord {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// FIFO fill level and status flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct FifoStatus {
    /// Number of unread records
    pub level: u16,
    /// Watermark level reached
    pub watermark: bool,
    /// FIFO overrun
    pub overrun: bool,
    /// FIFO will be full at the next sample
    pub full: bool,
    /// Batch counter threshold reached
    pub counter_threshold: bool,
    /// Overrun latched since the last status read
    pub overrun_latched: bool,
}

/// FIFO operating mode (`FIFO_CTRL4.FIFO_MODE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FifoMode {
    /// FIFO disabled and flushed
    #[default]
    Bypass = 0,
    /// Stops collecting when full
    Fifo = 1,
    /// Stream until the watermark, then FIFO mode until full
    StreamWtmToFull = 2,
    /// Stream until a trigger event, then FIFO mode
    StreamToFifo = 3,
    /// Bypass until a trigger event, then stream
    BypassToStream = 4,
    /// Oldest records are overwritten when full
    Stream = 6,
    /// Bypass until a trigger event, then FIFO mode
    BypassToFifo = 7,
}

impl FifoMode {
    /// Decode the 3-bit mode field
    ///
    /// The reserved encoding 5 decodes as [`FifoMode::Bypass`].
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x07 {
            1 => Self::Fifo,
            2 => Self::StreamWtmToFull,
            3 => Self::StreamToFifo,
            4 => Self::BypassToStream,
            6 => Self::Stream,
            7 => Self::BypassToFifo,
            _ => Self::Bypass,
        }
    }
}

/// Batch data rate for accelerometer/gyroscope samples (`FIFO_CTRL3`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FifoBatchRate {
    /// Not batched
    #[default]
    NotBatched = 0,
    /// 1.875 Hz
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

impl FifoBatchRate {
    /// Decode the 4-bit batch rate field; reserved encodings read as not batched
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
            _ => Self::NotBatched,
        }
    }
}

/// Temperature batch data rate (`FIFO_CTRL4.ODR_T_BATCH`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FifoTemperatureBatch {
    /// Not batched
    #[default]
    NotBatched = 0,
    /// 1.875 Hz
    Hz1_875 = 1,
    /// 15 Hz
    Hz15 = 2,
    /// 60 Hz
    Hz60 = 3,
}

impl FifoTemperatureBatch {
    /// Decode the 2-bit field
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x03 {
            1 => Self::Hz1_875,
            2 => Self::Hz15,
            3 => Self::Hz60,
            _ => Self::NotBatched,
        }
    }
}

/// Timestamp batch decimation (`FIFO_CTRL4.DEC_TS_BATCH`)
///
/// A timestamp record is written every 1, 8 or 32 records of the fastest
/// batched accelerometer/gyroscope stream. The timestamp counter itself must
/// be running, see
/// [`set_timestamp_enabled`](crate::St1vafe6axDriver::set_timestamp_enabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FifoTimestampBatch {
    /// Not batched
    #[default]
    NotBatched = 0,
    /// Every batch event
    Decimation1 = 1,
    /// Every 8 batch events
    Decimation8 = 2,
    /// Every 32 batch events
    Decimation32 = 3,
}

impl FifoTimestampBatch {
    /// Decode the 2-bit field
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x03 {
            1 => Self::Decimation1,
            2 => Self::Decimation8,
            3 => Self::Decimation32,
            _ => Self::NotBatched,
        }
    }
}

/// Rate of forced uncompressed records while compression runs
/// (`FIFO_CTRL2.UNCOMPR_RATE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FifoUncompressedRate {
    /// Uncompressed records are not forced
    #[default]
    NotForced = 0,
    /// One uncompressed record every 8 batch events
    Every8 = 1,
    /// One uncompressed record every 16 batch events
    Every16 = 2,
    /// One uncompressed record every 32 batch events
    Every32 = 3,
}

impl FifoUncompressedRate {
    /// Decode the 2-bit field
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x03 {
            1 => Self::Every8,
            2 => Self::Every16,
            3 => Self::Every32,
            _ => Self::NotForced,
        }
    }
}

/// FIFO configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoConfig {
    /// Watermark threshold in records
    pub watermark: u8,
    /// Accelerometer batch rate
    pub accel_batch: FifoBatchRate,
    /// Gyroscope batch rate
    pub gyro_batch: FifoBatchRate,
    /// Operating mode
    pub mode: FifoMode,
}

/// SFLP outputs batched into the FIFO (`EMB_FUNC_FIFO_EN_A`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoSflpBatch {
    /// Game rotation vector
    pub game_rotation: bool,
    /// Gravity vector
    pub gravity: bool,
    /// Gyroscope bias
    pub gyro_bias: bool,
}
