//! Sensor modules for the ST1VAFE6AX
//!
//! This module provides types, enums, and configuration structures for each
//! sensor in the ST1VAFE6AX:
//! - Accelerometer (3-axis)
//! - Gyroscope (3-axis)
//! - Analog hub / bio front end
//! - Raw-to-physical unit conversions, including temperature, timestamp and
//!   the bio channel
//!
//! All sensor operations are performed through methods on `St1vafe6axDriver`.

pub mod accelerometer;
pub mod bio;
pub mod conversion;
pub mod gyroscope;

// Re-export main types
pub use accelerometer::{
    AccelConfig, AccelDataMg, AccelDataRate, AccelFullScale, AccelMode, AccelSelfTest,
};
pub use bio::{BioInputImpedance, BioMode};
pub use gyroscope::{
    GyroConfig, GyroDataMdps, GyroDataRate, GyroFullScale, GyroMode, GyroSelfTest,
};
