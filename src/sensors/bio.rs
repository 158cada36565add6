//! Analog hub / bio front-end types
//!
//! Two high-impedance input buffers feed the bio channel read by
//! [`read_bio_channel`](crate::St1vafe6axDriver::read_bio_channel). The chain
//! is enabled whenever at least one buffer is connected.

/// Input buffer selection (`CTRL7.AH_BIO1_EN`, `CTRL7.AH_BIO2_EN`, `CTRL10.AH_BIO_SW`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BioMode {
    /// Connect input 1
    pub input1: bool,
    /// Connect input 2
    pub input2: bool,
    /// Swap the two inputs
    pub swap: bool,
}

impl BioMode {
    /// Whether the chain must be enabled for this selection
    #[must_use]
    pub const fn chain_enabled(self) -> bool {
        self.input1 || self.input2
    }
}

/// Equivalent input impedance of the buffers (`CTRL7.AH_BIO_C_ZIN`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BioInputImpedance {
    /// 2.4 GΩ
    #[default]
    MOhm2400 = 0,
    /// 730 MΩ
    MOhm730 = 1,
    /// 300 MΩ
    MOhm300 = 2,
    /// 255 MΩ
    MOhm255 = 3,
}

impl BioInputImpedance {
    /// Decode the 2-bit field
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x03 {
            1 => Self::MOhm730,
            2 => Self::MOhm300,
            3 => Self::MOhm255,
            _ => Self::MOhm2400,
        }
    }
}
