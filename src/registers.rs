//! Register definitions for the ST1VAFE6AX
//!
//! The ST1VAFE6AX exposes two register banks over the same 7-bit address space.
//! The active bank is selected by the `EMB_FUNC_REG_ACCESS` bit of
//! `FUNC_CFG_ACCESS` (0x01), which is reachable from both banks.
//!
//! ## Bank Architecture
//! - **Main bank**: sensor configuration, outputs, FIFO
//! - **Embedded function bank**: step counter, SFLP, FSM, MLC and the paging
//!   window into the advanced-feature memory
//!
//! All registers that share addresses across banks use `ALLOW_ADDRESS_OVERLAP = true`.
//!
//! The advanced-feature memory is not register-mapped. Its 12-bit addresses are
//! listed in [`paged`] and reached through
//! [`St1vafe6axDriver::page_read`](crate::St1vafe6axDriver::page_read) and
//! [`St1vafe6axDriver::page_write`](crate::St1vafe6axDriver::page_write).

device_driver::create_device!(
    device_name: St1vafe6ax,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        // ==================== SHARED REGISTER ====================

        /// FUNC_CFG_ACCESS - Bank selection and global controls (both banks, 0x01)
        register FuncCfgAccess {
            const ADDRESS = 0x01;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            reserved_1_0: uint = 0..2,
            /// Global reset (power-on reset routine)
            sw_por: bool = 2,
            /// Allow the FSM to write the control registers
            fsm_wr_ctrl_en: bool = 3,
            reserved_5_4: uint = 4..6,
            /// Access to the SFLP initialisation state registers
            sflp_state_access: bool = 6,
            /// Embedded function bank selected
            emb_func_reg_access: bool = 7,
        },

        // ==================== MAIN BANK ====================

        /// FIFO_CTRL1 - FIFO watermark (Main, 0x07)
        register FifoCtrl1 {
            const ADDRESS = 0x07;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Watermark threshold in FIFO records
            wtm: uint = 0..8,
        },

        /// FIFO_CTRL2 - FIFO compression control (Main, 0x08)
        register FifoCtrl2 {
            const ADDRESS = 0x08;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Batch the dual-channel accelerometer when the FSM enables it
            xl_dualc_batch_from_fsm: bool = 0,
            /// Forced uncompressed record rate while compression runs
            uncompr_rate: uint = 1..3,
            reserved_3: uint = 3..4,
            /// Batch configuration change markers
            odr_chg_en: bool = 4,
            reserved_5: uint = 5..6,
            /// Run-time FIFO compression
            fifo_compr_rt_en: bool = 6,
            /// Limit FIFO depth to the watermark
            stop_on_wtm: bool = 7,
        },

        /// FIFO_CTRL3 - FIFO batch data rates (Main, 0x09)
        register FifoCtrl3 {
            const ADDRESS = 0x09;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Accelerometer batch data rate (same encoding as `odr_xl`)
            bdr_xl: uint = 0..4,
            /// Gyroscope batch data rate (same encoding as `odr_g`)
            bdr_gy: uint = 4..8,
        },

        /// FIFO_CTRL4 - FIFO mode selection (Main, 0x0A)
        register FifoCtrl4 {
            const ADDRESS = 0x0A;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// FIFO mode:
            /// 0 = Bypass, 1 = FIFO, 2 = Stream-WTM-to-full, 3 = Stream-to-FIFO,
            /// 4 = Bypass-to-stream, 6 = Stream, 7 = Bypass-to-FIFO
            fifo_mode: uint = 0..3,
            reserved_3: uint = 3..4,
            /// Temperature batch data rate
            odr_t_batch: uint = 4..6,
            /// Timestamp batch decimation
            dec_ts_batch: uint = 6..8,
        },

        /// COUNTER_BDR_REG1 - Batch counter and bio channel batching (Main, 0x0B)
        register CounterBdrReg1 {
            const ADDRESS = 0x0B;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Batch counter threshold, bits 9:8
            cnt_bdr_th: uint = 0..2,
            reserved_2: uint = 2..3,
            /// Batch the analog hub / bio channel
            ah_bio_batch_en: bool = 3,
            reserved_4: uint = 4..5,
            /// Batch counter trigger
            trig_counter_bdr: uint = 5..7,
            reserved_7: uint = 7..8,
        },

        /// WHO_AM_I - Device ID Register (Main, 0x0F)
        /// Expected value: 0x71
        register WhoAmI {
            const ADDRESS = 0x0F;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Device ID (should read 0x71)
            who_am_i: uint = 0..8,
        },

        /// CTRL1 - Accelerometer data rate and operating mode (Main, 0x10)
        register Ctrl1 {
            const ADDRESS = 0x10;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Accelerometer output data rate (0 = power-down)
            odr_xl: uint = 0..4,
            /// Accelerometer operating mode
            op_mode_xl: uint = 4..7,
            reserved_7: uint = 7..8,
        },

        /// CTRL2 - Gyroscope data rate and operating mode (Main, 0x11)
        register Ctrl2 {
            const ADDRESS = 0x11;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Gyroscope output data rate (0 = power-down)
            odr_g: uint = 0..4,
            /// Gyroscope operating mode
            op_mode_g: uint = 4..7,
            reserved_7: uint = 7..8,
        },

        /// CTRL3 - Interface and reset control (Main, 0x12)
        register Ctrl3 {
            const ADDRESS = 0x12;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Restore control registers to their default values (self-clearing)
            sw_reset: bool = 0,
            reserved_1: uint = 1..2,
            /// Auto-increment the address on multi-byte access
            if_inc: bool = 2,
            reserved_5_3: uint = 3..6,
            /// Block data update
            bdu: bool = 6,
            /// Reload trimming parameters (self-clearing)
            boot: bool = 7,
        },

        /// CTRL6 - Gyroscope full scale (Main, 0x15)
        register Ctrl6 {
            const ADDRESS = 0x15;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Gyroscope full scale
            fs_g: uint = 0..4,
            reserved_7_4: uint = 4..8,
        },

        /// CTRL7 - Analog hub / bio front end (Main, 0x16)
        register Ctrl7 {
            const ADDRESS = 0x16;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Gyroscope digital LPF1
            lpf1_g_en: bool = 0,
            reserved_1: uint = 1..2,
            /// Connect the buffer of input 2
            ah_bio2_en: bool = 2,
            /// Connect the buffer of input 1
            ah_bio1_en: bool = 3,
            /// Equivalent input impedance
            ah_bio_c_zin: uint = 4..6,
            /// Bio data-ready on INT2
            int2_drdy_ah_bio: bool = 6,
            /// Analog hub / bio chain
            ah_bio_en: bool = 7,
        },

        /// CTRL8 - Accelerometer full scale (Main, 0x17)
        register Ctrl8 {
            const ADDRESS = 0x17;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Accelerometer full scale
            fs_xl: uint = 0..2,
            reserved_2: uint = 2..3,
            /// Accelerometer dual-channel output enable
            xl_dualc_en: bool = 3,
            reserved_7_4: uint = 4..8,
        },

        /// CTRL10 - Self test and embedded debug (Main, 0x19)
        register Ctrl10 {
            const ADDRESS = 0x19;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Accelerometer self test (0 = off, 1 = positive, 2 = negative)
            st_xl: uint = 0..2,
            /// Gyroscope self test (0 = off, 1 = positive, 2 = negative)
            st_g: uint = 2..4,
            /// Accelerometer self-test offset selection
            xl_st_offset: bool = 4,
            /// Swap the bio inputs
            ah_bio_sw: bool = 5,
            /// Embedded functions debug mode
            emb_func_debug: bool = 6,
            reserved_7: uint = 7..8,
        },

        /// CTRL_STATUS - FSM write-control status (Main, 0x1A)
        register CtrlStatus {
            const ADDRESS = 0x1A;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            reserved_1_0: uint = 0..2,
            /// The FSM currently controls the control registers
            fsm_wr_ctrl_status: bool = 2,
            reserved_7_3: uint = 3..8,
        },

        /// FIFO_STATUS1/2 - FIFO level and flags (Main, 0x1B-0x1C)
        register FifoStatus {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 16;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Number of unread records
            diff_fifo: uint = 0..11,
            /// Overrun latched until the next read of FIFO_STATUS2
            fifo_ovr_latched: bool = 11,
            /// Batch counter threshold reached
            counter_bdr_ia: bool = 12,
            /// FIFO will be full at the next ODR
            fifo_full_ia: bool = 13,
            /// FIFO overrun
            fifo_ovr_ia: bool = 14,
            /// Watermark level reached
            fifo_wtm_ia: bool = 15,
        },

        /// STATUS_REG - Data ready flags (Main, 0x1E)
        register StatusReg {
            const ADDRESS = 0x1E;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Accelerometer data available
            xlda: bool = 0,
            /// Gyroscope data available
            gda: bool = 1,
            /// Temperature data available
            tda: bool = 2,
            /// Bio channel data available
            ah_bioda: bool = 3,
            reserved_7_4: uint = 4..8,
        },

        /// FUNCTIONS_ENABLE - Timestamp and interrupt enables (Main, 0x50)
        register FunctionsEnable {
            const ADDRESS = 0x50;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Activity/inactivity mode
            inact_en: uint = 0..2,
            reserved_2: uint = 2..3,
            /// Latched interrupts are not reset on status read
            dis_rst_lir_all_int: bool = 3,
            reserved_5_4: uint = 4..6,
            /// Timestamp counter
            timestamp_en: bool = 6,
            /// Basic interrupt functions
            interrupts_enable: bool = 7,
        },

        // ==================== EMBEDDED FUNCTION BANK ====================

        /// PAGE_SEL - Advanced-feature page selection (Embedded, 0x02)
        register PageSel {
            const ADDRESS = 0x02;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Must be written as 1
            not_used: uint = 0..4,
            /// Page number (12-bit address, high nibble)
            page_sel: uint = 4..8,
        },

        /// EMB_FUNC_EN_A - Embedded functions enable A (Embedded, 0x04)
        register EmbFuncEnA {
            const ADDRESS = 0x04;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            reserved_0: uint = 0..1,
            /// SFLP game rotation vector
            sflp_game_en: bool = 1,
            reserved_2: uint = 2..3,
            /// Pedometer and step counter
            pedo_en: bool = 3,
            /// Tilt detection
            tilt_en: bool = 4,
            /// Significant motion detection
            sign_motion_en: bool = 5,
            reserved_6: uint = 6..7,
            /// Run the MLC before the FSM
            mlc_before_fsm_en: bool = 7,
        },

        /// EMB_FUNC_EN_B - Embedded functions enable B (Embedded, 0x05)
        register EmbFuncEnB {
            const ADDRESS = 0x05;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Finite state machine
            fsm_en: bool = 0,
            reserved_2_1: uint = 1..3,
            /// FIFO compression
            fifo_compr_en: bool = 3,
            /// Machine learning core
            mlc_en: bool = 4,
            reserved_7_5: uint = 5..8,
        },

        /// EMB_FUNC_EXEC_STATUS - Embedded execution status (Embedded, 0x07)
        register EmbFuncExecStatus {
            const ADDRESS = 0x07;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// No embedded function is running
            emb_func_endop: bool = 0,
            /// Embedded execution overrun
            emb_func_exec_ovr: bool = 1,
            reserved_7_2: uint = 2..8,
        },

        /// PAGE_ADDRESS - Address inside the selected page (Embedded, 0x08)
        register PageAddress {
            const ADDRESS = 0x08;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// In-page offset (12-bit address, low byte)
            page_addr: uint = 0..8,
        },

        /// PAGE_VALUE - Data window into the selected page (Embedded, 0x09)
        register PageValue {
            const ADDRESS = 0x09;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Byte at the current page address
            page_value: uint = 0..8,
        },

        /// PAGE_RW - Paged access direction latch (Embedded, 0x17)
        register PageRw {
            const ADDRESS = 0x17;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            reserved_4_0: uint = 0..5,
            /// Enable reads through PAGE_VALUE
            page_read: bool = 5,
            /// Enable writes through PAGE_VALUE
            page_write: bool = 6,
            /// Latch embedded-function interrupts
            emb_func_lir: bool = 7,
        },

        /// EMB_FUNC_FIFO_EN_A - Embedded batching enable A (Embedded, 0x44)
        register EmbFuncFifoEnA {
            const ADDRESS = 0x44;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            reserved_0: uint = 0..1,
            /// Batch the SFLP game rotation vector
            sflp_game_fifo_en: bool = 1,
            reserved_3_2: uint = 2..4,
            /// Batch the SFLP gravity vector
            sflp_gravity_fifo_en: bool = 4,
            /// Batch the SFLP gyroscope bias
            sflp_gbias_fifo_en: bool = 5,
            /// Batch the step counter
            step_counter_fifo_en: bool = 6,
            /// Batch the MLC results
            mlc_fifo_en: bool = 7,
        },

        /// EMB_FUNC_FIFO_EN_B - Embedded batching enable B (Embedded, 0x45)
        register EmbFuncFifoEnB {
            const ADDRESS = 0x45;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            reserved_0: uint = 0..1,
            /// Batch the MLC filters and features
            mlc_filter_feature_fifo_en: bool = 1,
            reserved_7_2: uint = 2..8,
        },

        /// FSM_ENABLE - FSM program enables (Embedded, 0x46)
        register FsmEnable {
            const ADDRESS = 0x46;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// One enable bit per program, program 1 in bit 0
            fsm_programs_en: uint = 0..8,
        },

        /// FSM_LONG_COUNTER_L/H - FSM long counter (Embedded, 0x48-0x49)
        register FsmLongCounter {
            const ADDRESS = 0x48;
            const SIZE_BITS = 16;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Long counter value
            fsm_lc: uint = 0..16,
        },

        /// SFLP_ODR - SFLP data rate (Embedded, 0x5E)
        register SflpOdr {
            const ADDRESS = 0x5E;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            reserved_2_0: uint = 0..3,
            /// SFLP game vector output rate (0 = 15 Hz ... 5 = 480 Hz)
            sflp_game_odr: uint = 3..6,
            reserved_7_6: uint = 6..8,
        },

        /// FSM_ODR - FSM data rate (Embedded, 0x5F)
        register FsmOdr {
            const ADDRESS = 0x5F;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            reserved_2_0: uint = 0..3,
            /// FSM output rate (0 = 15 Hz ... 6 = 960 Hz)
            fsm_odr: uint = 3..6,
            reserved_7_6: uint = 6..8,
        },

        /// MLC_ODR - MLC data rate (Embedded, 0x60)
        register MlcOdr {
            const ADDRESS = 0x60;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            reserved_3_0: uint = 0..4,
            /// MLC output rate (0 = 15 Hz ... 6 = 960 Hz)
            mlc_odr: uint = 4..7,
            reserved_7: uint = 7..8,
        },

        /// STEP_COUNTER_L/H - Step count (Embedded, 0x62-0x63)
        register StepCounter {
            const ADDRESS = 0x62;
            const SIZE_BITS = 16;
            const ALLOW_ADDRESS_OVERLAP = true;

            /// Number of detected steps
            step: uint = 0..16,
        },

        /// EMB_FUNC_SRC - Embedded function source (Embedded, 0x64)
        register EmbFuncSrc {
            const ADDRESS = 0x64;
            const SIZE_BITS = 8;
            const ALLOW_ADDRESS_OVERLAP = true;

            reserved_1_0: uint = 0..2,
            /// Step counter is non-zero
            stepcounter_bit_set: bool = 2,
            /// Step counter overflow
            step_overflow: bool = 3,
            /// Step counter delta time elapsed
            step_count_delta_ia: bool = 4,
            /// Step detected
            step_detected: bool = 5,
            reserved_6: uint = 6..7,
            /// Reset the step counter
            pedo_rst_step: bool = 7,
        }
    }
);

/// Raw register addresses used for burst transfers
///
/// Multi-byte outputs are read with a single transaction through the register
/// interface so the bytes of one sample are never torn.
pub mod address {
    /// FUNC_CFG_ACCESS (both banks)
    pub const FUNC_CFG_ACCESS: u8 = 0x01;
    /// CTRL1, first of the CTRL1/CTRL2 pair (Main)
    pub const CTRL1: u8 = 0x10;
    /// OUT_TEMP_L (Main)
    pub const OUT_TEMP_L: u8 = 0x20;
    /// OUTX_L_G, start of the gyroscope X/Y/Z block (Main)
    pub const OUTX_L_G: u8 = 0x22;
    /// OUTZ_L_A, start of the accelerometer Z/Y/X block (Main)
    pub const OUTZ_L_A: u8 = 0x28;
    /// UI_OUTZ_L_A_DUALC, start of the dual-channel Z/Y/X block (Main)
    pub const UI_OUTZ_L_A_DUALC: u8 = 0x34;
    /// AH_BIO_OUT_L (Main)
    pub const AH_BIO_OUT_L: u8 = 0x3A;
    /// TIMESTAMP0 (Main)
    pub const TIMESTAMP0: u8 = 0x40;
    /// FIFO_DATA_OUT_TAG, followed by six payload bytes (Main)
    pub const FIFO_DATA_OUT_TAG: u8 = 0x78;
    /// EMB_FUNC_EN_A, first of the EN_A/EN_B pair (Embedded)
    pub const EMB_FUNC_EN_A: u8 = 0x04;
    /// FSM_OUTS1, first of eight FSM output registers (Embedded)
    pub const FSM_OUTS1: u8 = 0x4C;
    /// MLC1_SRC, first of four MLC output registers (Embedded)
    pub const MLC1_SRC: u8 = 0x70;
    /// First SFLP initialisation state register, visible while
    /// `FUNC_CFG_ACCESS.sflp_state_access` is set
    pub const SFLP_STATE_XL: u8 = 0x02;
    /// First SFLP initialisation register that must be cleared
    pub const SFLP_STATE_CLEAR: u8 = 0x0B;
}

/// 12-bit addresses in the embedded advanced-feature memory
///
/// The high nibble is the page, the low byte the offset inside the page.
pub mod paged {
    /// SFLP game gyroscope bias X/Y/Z, three binary16 values
    pub const SFLP_GAME_GBIASX_L: u16 = 0x06E;
    /// FSM bio sensitivity, binary16
    pub const FSM_BIO_SENSITIVITY_L: u16 = 0x0BA;
    /// SFLP algorithm configuration
    pub const SFLP_CONFIG: u16 = 0x0D2;
    /// Value written to [`SFLP_CONFIG`] by the initial SFLP configuration
    pub const SFLP_CONFIG_VALUE: u8 = 0x50;
    /// FSM long counter timeout, 16-bit
    pub const FSM_LC_TIMEOUT_L: u16 = 0x17A;
    /// Number of FSM programs
    pub const FSM_PROGRAMS: u16 = 0x17C;
    /// FSM start address, 16-bit
    pub const FSM_START_ADD_L: u16 = 0x17E;
    /// Pedometer command register (bit 2: false-positive rejection)
    pub const PEDO_CMD_REG: u16 = 0x183;
    /// Pedometer debounce steps
    pub const PEDO_DEB_STEPS_CONF: u16 = 0x184;
    /// Step counter delta time, 16-bit
    pub const PEDO_SC_DELTAT_L: u16 = 0x1D0;
    /// MLC bio sensitivity, binary16
    pub const MLC_BIO_SENSITIVITY_L: u16 = 0x1E8;

    /// `fp_rejection_en` bit of [`PEDO_CMD_REG`]
    pub const PEDO_FP_REJECTION_EN: u8 = 1 << 2;

    /// Highest valid paged address
    pub const MAX_ADDRESS: u16 = 0x0FFF;
}
