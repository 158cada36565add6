//! Embedded function types
//!
//! Configuration values for the functions that run inside the device: the
//! pedometer/step counter, the finite state machine (FSM) and the machine
//! learning core (MLC). All of them live in the embedded function bank; the
//! driver switches banks on every access and always returns to the main bank.

/// Step counter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepCounterMode {
    /// Run the pedometer (`EMB_FUNC_EN_A.PEDO_EN`)
    pub enabled: bool,
    /// Reject false steps using the MLC (`PEDO_CMD_REG.FP_REJECTION_EN`)
    ///
    /// Enabling this also schedules the MLC before the FSM, unless both MLC
    /// enables are already set.
    pub false_step_rejection: bool,
}

/// Set of enabled FSM programs, one bit per program (`FSM_ENABLE`)
///
/// Program 1 is bit 0, program 8 is bit 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FsmPrograms(u8);

impl FsmPrograms {
    /// No program enabled
    pub const NONE: Self = Self(0);
    /// All eight programs enabled
    pub const ALL: Self = Self(0xFF);

    /// Create from the raw `FSM_ENABLE` byte
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw `FSM_ENABLE` byte
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Return a copy with program `index` (1-8) enabled or disabled
    ///
    /// Indices outside 1-8 leave the set unchanged.
    #[must_use]
    pub const fn with(self, index: u8, enabled: bool) -> Self {
        if index == 0 || index > 8 {
            return self;
        }
        let mask = 1 << (index - 1);
        if enabled {
            Self(self.0 | mask)
        } else {
            Self(self.0 & !mask)
        }
    }

    /// Whether program `index` (1-8) is enabled
    #[must_use]
    pub const fn is_enabled(self, index: u8) -> bool {
        index >= 1 && index <= 8 && self.0 & (1 << (index - 1)) != 0
    }

    /// Whether any program is enabled
    #[must_use]
    pub const fn any(self) -> bool {
        self.0 != 0
    }
}

/// Who may write the control registers (`FUNC_CFG_ACCESS.FSM_WR_CTRL_EN`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FsmPermission {
    /// Only the host interface writes the control registers
    #[default]
    ProtectCtrlRegs,
    /// The FSM may change some control registers autonomously
    WriteCtrlRegs,
}

/// Output rate shared by the FSM and MLC rate fields
macro_rules! engine_data_rate {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[repr(u8)]
        pub enum $name {
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
            /// 960 Hz
            Hz960 = 6,
        }

        impl $name {
            /// Decode the 3-bit field; the reserved encoding reads as 15 Hz
            #[must_use]
            pub const fn from_raw(raw: u8) -> Self {
                match raw & 0x07 {
                    1 => Self::Hz30,
                    2 => Self::Hz60,
                    3 => Self::Hz120,
                    4 => Self::Hz240,
                    5 => Self::Hz480,
                    6 => Self::Hz960,
                    _ => Self::Hz15,
                }
            }
        }
    };
}

engine_data_rate!(
    /// FSM output rate (`FSM_ODR.FSM_ODR`)
    FsmDataRate
);

engine_data_rate!(
    /// MLC output rate (`MLC_ODR.MLC_ODR`)
    MlcDataRate
);

/// Machine learning core scheduling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MlcMode {
    /// MLC disabled
    #[default]
    Off,
    /// MLC runs after the FSM
    On,
    /// MLC runs before the FSM
    OnBeforeFsm,
}

impl MlcMode {
    /// Decode from the `mlc_before_fsm_en` and `mlc_en` enable bits
    #[must_use]
    pub const fn from_enables(before_fsm: bool, mlc_en: bool) -> Self {
        match (before_fsm, mlc_en) {
            (true, _) => Self::OnBeforeFsm,
            (false, true) => Self::On,
            (false, false) => Self::Off,
        }
    }

    /// Enable bits `(mlc_before_fsm_en, mlc_en)` for this mode
    #[must_use]
    pub const fn enables(self) -> (bool, bool) {
        match self {
            Self::Off => (false, false),
            Self::On => (false, true),
            Self::OnBeforeFsm => (true, false),
        }
    }
}
