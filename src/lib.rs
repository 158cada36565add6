#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod device;
pub mod embedded;
pub mod fifo;
pub mod half;
pub mod interface;
pub mod registers;
pub mod sensors;
pub mod sequence;
pub mod sflp;

// Re-export main types
pub use device::{AccelData, DataReady, GyroData, ResetMode, St1vafe6axDriver};
pub use embedded::{
    FsmDataRate, FsmPermission, FsmPrograms, MlcDataRate, MlcMode, StepCounterMode,
};
pub use fifo::{
    FifoBatchRate, FifoConfig, FifoMode, FifoRecord, FifoSflpBatch, FifoStatus, FifoTag,
    FifoTemperatureBatch, FifoTimestampBatch, FifoUncompressedRate, RECORD_SIZE, StepCount,
};
pub use half::{float_to_half, half_to_float};
pub use interface::{I2cInterface, SpiInterface};
pub use sensors::{
    AccelConfig, AccelDataMg, AccelDataRate, AccelFullScale, AccelMode, AccelSelfTest,
    BioInputImpedance, BioMode, GyroConfig, GyroDataMdps, GyroDataRate, GyroFullScale, GyroMode,
    GyroSelfTest,
};
pub use sequence::Sequence;
pub use sflp::{GyroBias, SflpDataRate};

/// ST1VAFE6AX I2C address when the SDO/SA0 pin is low (default: 0x6A)
///
/// Use [`I2cInterface::default()`] for this configuration.
pub const I2C_ADDRESS_SA0_LOW: u8 = 0x6A;

/// ST1VAFE6AX I2C address when the SDO/SA0 pin is high (alternative: 0x6B)
///
/// Use [`I2cInterface::alternative()`] for this configuration.
pub const I2C_ADDRESS_SA0_HIGH: u8 = 0x6B;

/// Expected value of `WHO_AM_I` register
pub const WHO_AM_I_VALUE: u8 = 0x71;

/// Register bank identifiers
///
/// The bank is selected by the `EMB_FUNC_REG_ACCESS` bit of `FUNC_CFG_ACCESS`.
/// Every register address is interpreted within the active bank until the
/// bank is switched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bank {
    /// Main bank - sensor configuration, outputs and FIFO
    Main = 0,
    /// Embedded function bank - SFLP, pedometer, FSM, MLC and paged memory access
    EmbeddedFunction = 1,
}

/// Bounded polling configuration
///
/// Used for every loop that waits on a device status bit (reset completion,
/// embedded end-of-operation, accelerometer data-ready). When all attempts are
/// exhausted the wait fails with [`Error::Timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollConfig {
    /// Maximum number of status reads before giving up (at least one read is always made)
    pub max_attempts: u32,
    /// Delay between two consecutive status reads, in microseconds
    pub interval_us: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            interval_us: 1_000,
        }
    }
}

/// Driver errors
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid `WHO_AM_I` register value (contains the actual value read)
    InvalidDevice(u8),
    /// Invalid configuration parameter
    InvalidConfig,
    /// A bounded poll ran out of attempts before the device reported completion
    Timeout,
    /// Several steps of a multi-step operation failed
    ///
    /// The operation still ran its restore phase, but the device configuration
    /// is unknown. A full reset is the conservative way back to a known state.
    Indeterminate {
        /// Number of steps that reported an error
        failed_steps: u8,
    },
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
