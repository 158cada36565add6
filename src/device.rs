//! High-level driver API for the ST1VAFE6AX
//!
//! This module provides a user-friendly interface to the ST1VAFE6AX sensor,
//! handling register bank switching, paged access to the advanced-feature
//! memory, sensor configuration, FIFO draining and the embedded functions.
//!
//! Every accessor that touches the embedded function bank switches back to the
//! main bank before returning, even when one of its bus transactions failed.

use device_driver::RegisterInterface;

use crate::embedded::{
    FsmDataRate, FsmPermission, FsmPrograms, MlcDataRate, MlcMode, StepCounterMode,
};
use crate::fifo::parser::{FifoParser, MAX_RECORDS};
use crate::fifo::{
    FifoBatchRate, FifoConfig, FifoMode, FifoRecord, FifoSflpBatch, FifoStatus,
    FifoTemperatureBatch, FifoTimestampBatch, FifoUncompressedRate, RECORD_SIZE,
};
use crate::half::{float_to_half, half_to_float};
use crate::registers::St1vafe6ax as RegisterDevice;
use crate::registers::{address, paged};
use crate::sensors::conversion;
use crate::sensors::{
    AccelConfig, AccelDataMg, AccelDataRate, AccelFullScale, AccelMode, AccelSelfTest,
    BioInputImpedance, BioMode, GyroConfig, GyroDataMdps, GyroDataRate, GyroFullScale, GyroMode,
    GyroSelfTest,
};
use crate::sequence::Sequence;
use crate::sflp::{GyroBias, SflpDataRate};
use crate::{Bank, Error, PollConfig, WHO_AM_I_VALUE};

/// `FUNC_CFG_ACCESS` value that exposes the SFLP initialisation state registers
const SFLP_STATE_ACCESS: u8 = 0x40;

/// `sflp_game_en` bit of `EMB_FUNC_EN_A`
const SFLP_GAME_EN: u8 = 0x02;

/// Accelerometer data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelData {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

impl AccelData {
    /// Decode a Z, Y, X register block into X, Y, Z order
    const fn from_zyx(buffer: &[u8; 6]) -> Self {
        Self {
            x: i16::from_le_bytes([buffer[4], buffer[5]]),
            y: i16::from_le_bytes([buffer[2], buffer[3]]),
            z: i16::from_le_bytes([buffer[0], buffer[1]]),
        }
    }
}

/// Gyroscope data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroData {
    /// X-axis rotation (raw)
    pub x: i16,
    /// Y-axis rotation (raw)
    pub y: i16,
    /// Z-axis rotation (raw)
    pub z: i16,
}

/// Data-ready flags from `STATUS_REG`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct DataReady {
    /// New accelerometer sample
    pub accel: bool,
    /// New gyroscope sample
    pub gyro: bool,
    /// New temperature sample
    pub temperature: bool,
    /// New bio channel sample
    pub bio: bool,
}

/// Software reset kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetMode {
    /// Power-on reset routine (`FUNC_CFG_ACCESS.SW_POR`)
    GlobalReset,
    /// Reload the trimming parameters (`CTRL3.BOOT`)
    RestoreCalibration,
    /// Restore the control registers to their defaults (`CTRL3.SW_RESET`)
    RestoreControlRegisters,
}

/// Direction and buffer of one paged transfer
enum PageData<'a> {
    Read(&'a mut [u8]),
    Write(&'a [u8]),
}

impl PageData<'_> {
    const fn len(&self) -> usize {
        match self {
            Self::Read(buffer) => buffer.len(),
            Self::Write(data) => data.len(),
        }
    }
}

/// Main driver for the ST1VAFE6AX
pub struct St1vafe6axDriver<I> {
    device: RegisterDevice<I>,
    current_bank: Option<Bank>,
    poll: PollConfig,
    // Cached ranges used by the converted reads
    accel_full_scale: AccelFullScale,
    gyro_full_scale: GyroFullScale,
}

impl<I> St1vafe6axDriver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new ST1VAFE6AX driver instance
    ///
    /// This selects the main bank, verifies the `WHO_AM_I` register and
    /// reads back both full-scale ranges used by the converted reads, but
    /// does not reset or configure the device. Call `init()` after
    /// construction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `WHO_AM_I` register contains an unexpected value
    pub fn new(interface: I) -> Result<Self, Error<I::Error>> {
        let device = RegisterDevice::new(interface);
        let mut driver = Self {
            device,
            current_bank: None,
            poll: PollConfig::default(),
            accel_full_scale: AccelFullScale::default(),
            gyro_full_scale: GyroFullScale::default(),
        };

        driver.select_bank(Bank::Main)?;
        let who_am_i = driver.read_who_am_i()?;

        if who_am_i != WHO_AM_I_VALUE {
            return Err(Error::InvalidDevice(who_am_i));
        }

        driver.accel_full_scale()?;
        driver.gyro_full_scale()?;

        Ok(driver)
    }

    /// Initialize the device with default settings
    ///
    /// Restores the control registers, waits for the reset bit to clear and
    /// then enables register auto-increment and block data update, which the
    /// burst reads of this driver rely on.
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay provider used between reset status polls
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails, or
    /// [`Error::Timeout`] if the reset does not complete within the
    /// configured [`PollConfig`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut sensor = St1vafe6axDriver::new(I2cInterface::default(i2c))?;
    /// sensor.init(&mut delay)?;
    /// ```
    pub fn init<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.select_bank(Bank::Main)?;

        self.device.ctrl_3().modify(|w| {
            w.set_sw_reset(true);
        })?;

        self.poll_until(delay, |driver| {
            Ok(!driver.device.ctrl_3().read()?.sw_reset())
        })?;

        // The control registers are back at their defaults
        self.current_bank = None;
        self.select_bank(Bank::Main)?;

        self.device.ctrl_3().modify(|w| {
            w.set_if_inc(true);
            w.set_bdu(true);
        })?;

        self.accel_full_scale()?;
        self.gyro_full_scale()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("ST1VAFE6AX initialized");

        Ok(())
    }

    /// Replace the bounds used by every status poll
    pub const fn set_poll_config(&mut self, poll: PollConfig) {
        self.poll = poll;
    }

    /// Bounds used by every status poll
    pub const fn poll_config(&self) -> PollConfig {
        self.poll
    }

    /// Switch the register bank
    ///
    /// Always performs the read-modify-write of
    /// `FUNC_CFG_ACCESS.EMB_FUNC_REG_ACCESS`, regardless of the cached bank.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The cached
    /// bank is then unknown and the next switch is always issued.
    pub fn set_bank(&mut self, bank: Bank) -> Result<(), Error<I::Error>> {
        let result = self.device.func_cfg_access().modify(|w| {
            w.set_emb_func_reg_access(bank == Bank::EmbeddedFunction);
        });

        match result {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Switched to bank {:?}", bank);
                self.current_bank = Some(bank);
                Ok(())
            }
            Err(e) => {
                self.current_bank = None;
                Err(Error::Bus(e))
            }
        }
    }

    /// Read the active register bank from the device
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn bank(&mut self) -> Result<Bank, Error<I::Error>> {
        let reg = self.device.func_cfg_access().read()?;
        let bank = if reg.emb_func_reg_access() {
            Bank::EmbeddedFunction
        } else {
            Bank::Main
        };
        self.current_bank = Some(bank);
        Ok(bank)
    }

    /// Select a register bank, skipping the bus when it is already active
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn select_bank(&mut self, bank: Bank) -> Result<(), Error<I::Error>> {
        if self.current_bank != Some(bank) {
            self.set_bank(bank)?;
        }
        Ok(())
    }

    /// Bank the driver believes is active, `None` after a failed switch
    pub const fn current_bank(&self) -> Option<Bank> {
        self.current_bank
    }

    /// Read the `WHO_AM_I` register
    ///
    /// Should return 0x71 for a valid ST1VAFE6AX
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_who_am_i(&mut self) -> Result<u8, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.who_am_i().read()?;
        Ok(reg.who_am_i())
    }

    /// Start a software reset
    ///
    /// The reset bits clear themselves; poll [`reset_status`](Self::reset_status)
    /// until it returns `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset(&mut self, mode: ResetMode) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;

        self.device.ctrl_3().modify(|w| {
            w.set_boot(mode == ResetMode::RestoreCalibration);
            w.set_sw_reset(mode == ResetMode::RestoreControlRegisters);
        })?;
        self.device.func_cfg_access().modify(|w| {
            w.set_sw_por(mode == ResetMode::GlobalReset);
        })?;

        if mode != ResetMode::RestoreCalibration {
            // The bank bit is back at its default once the reset completes
            self.current_bank = None;
        }

        Ok(())
    }

    /// Reset still in progress, or `None` once the device is ready
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset_status(&mut self) -> Result<Option<ResetMode>, Error<I::Error>> {
        self.select_bank(Bank::Main)?;

        let ctrl3 = self.device.ctrl_3().read()?;
        let func_cfg = self.device.func_cfg_access().read()?;

        let status = if func_cfg.sw_por() {
            Some(ResetMode::GlobalReset)
        } else if ctrl3.sw_reset() {
            Some(ResetMode::RestoreControlRegisters)
        } else if ctrl3.boot() {
            Some(ResetMode::RestoreCalibration)
        } else {
            None
        };

        Ok(status)
    }

    /// Release the interface
    ///
    /// Consumes the driver and returns the underlying interface.
    pub fn release(self) -> I {
        self.device.interface
    }

    /// Get a reference to the underlying device for advanced operations
    pub const fn device(&self) -> &RegisterDevice<I> {
        &self.device
    }

    /// Get a mutable reference to the underlying device for advanced operations
    ///
    /// Switching banks through this handle bypasses the driver's bank cache.
    pub const fn device_mut(&mut self) -> &mut RegisterDevice<I> {
        &mut self.device
    }

    // ==================== Bus helpers ====================

    /// Burst-read consecutive registers of the active bank
    fn read_block(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Error<I::Error>> {
        #[allow(clippy::cast_possible_truncation)]
        let size_bits = (buffer.len() * 8) as u32;
        self.device
            .interface
            .read_register(address, size_bits, buffer)
            .map_err(Error::Bus)
    }

    /// Burst-write consecutive registers of the active bank
    fn write_block(&mut self, address: u8, data: &[u8]) -> Result<(), Error<I::Error>> {
        #[allow(clippy::cast_possible_truncation)]
        let size_bits = (data.len() * 8) as u32;
        self.device
            .interface
            .write_register(address, size_bits, data)
            .map_err(Error::Bus)
    }

    /// Poll `ready` until it reports `true`, at most `max_attempts` times
    fn poll_until<D, F>(&mut self, delay: &mut D, mut ready: F) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
        F: FnMut(&mut Self) -> Result<bool, Error<I::Error>>,
    {
        let attempts = self.poll.max_attempts.max(1);
        for attempt in 1..=attempts {
            if ready(self)? {
                return Ok(());
            }
            if attempt < attempts {
                delay.delay_us(self.poll.interval_us);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("Status poll timed out after {} attempts", attempts);

        Err(Error::Timeout)
    }

    /// Run `op` in the embedded function bank, then return to the main bank
    ///
    /// `op` is skipped when the switch fails; the return to the main bank is
    /// always attempted and its failure is aggregated with the others.
    fn in_embedded_bank<T, F>(&mut self, op: F) -> Result<T, Error<I::Error>>
    where
        F: FnOnce(&mut Self) -> Result<T, Error<I::Error>>,
    {
        let result = self
            .select_bank(Bank::EmbeddedFunction)
            .and_then(|()| op(self));
        let mut seq = Sequence::new();
        seq.step(self.select_bank(Bank::Main));
        seq.finish_result(result)
    }

    /// Wait for `EMB_FUNC_EXEC_STATUS.EMB_FUNC_ENDOP`; embedded bank must be active
    fn wait_embedded_end_of_operation<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.poll_until(delay, |driver| {
            Ok(driver.device.emb_func_exec_status().read()?.emb_func_endop())
        })
    }

    // ==================== Paged memory ====================

    /// Write bytes to the advanced-feature memory
    ///
    /// The 12-bit `address` selects the page (high nibble) and the offset
    /// inside it (low byte). Consecutive bytes cross page boundaries
    /// transparently.
    ///
    /// # Arguments
    ///
    /// * `address` - First paged address (0x000-0xFFF)
    /// * `data` - Bytes to write; an empty slice only latches and releases
    ///   the paging registers
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] if the range leaves the 4 KiB memory; nothing
    ///   is sent to the device in that case.
    /// - A bus error if one step failed, or [`Error::Indeterminate`] if several
    ///   did. The paging registers are released and the main bank restored in
    ///   every case where the bus allows it.
    pub fn page_write(&mut self, address: u16, data: &[u8]) -> Result<(), Error<I::Error>> {
        self.page_access(address, PageData::Write(data))
    }

    /// Read bytes from the advanced-feature memory
    ///
    /// On error the buffer may be partially written.
    ///
    /// # Errors
    ///
    /// Same as [`page_write`](Self::page_write).
    pub fn page_read(&mut self, address: u16, buffer: &mut [u8]) -> Result<(), Error<I::Error>> {
        self.page_access(address, PageData::Read(buffer))
    }

    fn page_access(&mut self, address: u16, data: PageData<'_>) -> Result<(), Error<I::Error>> {
        if address > paged::MAX_ADDRESS
            || usize::from(address) + data.len() > usize::from(paged::MAX_ADDRESS) + 1
        {
            return Err(Error::InvalidConfig);
        }

        let [msb, lsb] = address.to_be_bytes();
        let read = matches!(data, PageData::Read(_));

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "Paged {} of {} bytes at {:#05x}",
            if read { "read" } else { "write" },
            data.len(),
            address
        );

        let mut seq = Sequence::new();

        // The paging registers share addresses with main-bank registers
        if seq.step(self.select_bank(Bank::EmbeddedFunction)).is_some() {
            let page_rw = seq.step(self.device.page_rw().read().map_err(Error::Bus));
            if let Some(value) = page_rw {
                seq.step(
                    self.device
                        .page_rw()
                        .write(|w| {
                            *w = value;
                            w.set_page_read(read);
                            w.set_page_write(!read);
                        })
                        .map_err(Error::Bus),
                );
            }
            seq.step(self.select_page(msb));
            seq.step(
                self.device
                    .page_address()
                    .write(|w| w.set_page_addr(lsb))
                    .map_err(Error::Bus),
            );

            if seq.is_clean() {
                seq.step(self.page_transfer(msb, lsb, data));
            }

            seq.step(
                self.device
                    .page_sel()
                    .write(|w| {
                        w.set_page_sel(0);
                        w.set_not_used(1);
                    })
                    .map_err(Error::Bus),
            );
            // Released even when the read-back fails, from the setup value
            let current = seq
                .step(self.device.page_rw().read().map_err(Error::Bus))
                .or(page_rw);
            seq.step(
                self.device
                    .page_rw()
                    .write(|w| {
                        if let Some(current) = current {
                            *w = current;
                        }
                        w.set_page_read(false);
                        w.set_page_write(false);
                    })
                    .map_err(Error::Bus),
            );
        }

        seq.step(self.select_bank(Bank::Main));
        seq.finish()
    }

    /// Point `PAGE_SEL` at `page`, keeping the low nibble at its required value
    fn select_page(&mut self, page: u8) -> Result<(), Error<I::Error>> {
        self.device
            .page_sel()
            .modify(|w| {
                w.set_page_sel(page);
                w.set_not_used(1);
            })
            .map_err(Error::Bus)
    }

    /// Move every byte through `PAGE_VALUE`, stopping at the first failure
    fn page_transfer(&mut self, msb: u8, lsb: u8, data: PageData<'_>) -> Result<(), Error<I::Error>> {
        let mut page = msb;
        let mut offset = lsb;

        match data {
            PageData::Write(bytes) => {
                for (index, &byte) in bytes.iter().enumerate() {
                    if index > 0 {
                        self.advance_page_cursor(&mut page, &mut offset)?;
                    }
                    self.device.page_value().write(|w| w.set_page_value(byte))?;
                }
            }
            PageData::Read(buffer) => {
                for (index, byte) in buffer.iter_mut().enumerate() {
                    if index > 0 {
                        self.advance_page_cursor(&mut page, &mut offset)?;
                    }
                    *byte = self.device.page_value().read()?.page_value();
                }
            }
        }

        Ok(())
    }

    /// The device auto-increments the offset; only a page change needs a write
    fn advance_page_cursor(&mut self, page: &mut u8, offset: &mut u8) -> Result<(), Error<I::Error>> {
        *offset = offset.wrapping_add(1);
        if *offset == 0 {
            *page += 1;
            self.select_page(*page)?;
        }
        Ok(())
    }

    /// Read a little-endian 16-bit value from the advanced-feature memory
    fn page_read_u16(&mut self, address: u16) -> Result<u16, Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.page_read(address, &mut buffer)?;
        Ok(u16::from_le_bytes(buffer))
    }

    fn page_read_u8(&mut self, address: u16) -> Result<u8, Error<I::Error>> {
        let mut buffer = [0u8; 1];
        self.page_read(address, &mut buffer)?;
        Ok(buffer[0])
    }

    // ==================== Accelerometer ====================

    /// Set the accelerometer output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_data_rate(&mut self, rate: AccelDataRate) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.ctrl_1().modify(|w| w.set_odr_xl(rate as u8))?;
        Ok(())
    }

    /// Get the accelerometer output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn accel_data_rate(&mut self) -> Result<AccelDataRate, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.ctrl_1().read()?;
        Ok(AccelDataRate::from_raw(reg.odr_xl()))
    }

    /// Set the accelerometer operating mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_mode(&mut self, mode: AccelMode) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.ctrl_1().modify(|w| w.set_op_mode_xl(mode as u8))?;
        Ok(())
    }

    /// Get the accelerometer operating mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn accel_mode(&mut self) -> Result<AccelMode, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.ctrl_1().read()?;
        Ok(AccelMode::from_raw(reg.op_mode_xl()))
    }

    /// Set the accelerometer full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_full_scale(&mut self, full_scale: AccelFullScale) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.ctrl_8().modify(|w| w.set_fs_xl(full_scale as u8))?;
        self.accel_full_scale = full_scale;
        Ok(())
    }

    /// Get the accelerometer full-scale range
    ///
    /// Also refreshes the range used by [`read_accelerometer`](Self::read_accelerometer).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn accel_full_scale(&mut self) -> Result<AccelFullScale, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.ctrl_8().read()?;
        self.accel_full_scale = AccelFullScale::from_raw(reg.fs_xl());
        Ok(self.accel_full_scale)
    }

    /// Configure the accelerometer
    ///
    /// # Arguments
    ///
    /// * `config` - Data rate, operating mode and full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    ///
    /// # Example
    ///
    /// ```ignore
    /// sensor.configure_accelerometer(AccelConfig {
    ///     data_rate: AccelDataRate::Hz120,
    ///     mode: AccelMode::HighPerformance,
    ///     full_scale: AccelFullScale::G4,
    /// })?;
    /// ```
    pub fn configure_accelerometer(&mut self, config: AccelConfig) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;

        self.device.ctrl_1().modify(|w| {
            w.set_odr_xl(config.data_rate as u8);
            w.set_op_mode_xl(config.mode as u8);
        })?;
        self.set_accel_full_scale(config.full_scale)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Accelerometer configured: {:?}", config);

        Ok(())
    }

    /// Set the accelerometer self-test excitation
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_self_test(&mut self, self_test: AccelSelfTest) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.ctrl_10().modify(|w| w.set_st_xl(self_test as u8))?;
        Ok(())
    }

    /// Get the accelerometer self-test excitation
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn accel_self_test(&mut self) -> Result<AccelSelfTest, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.ctrl_10().read()?;
        Ok(AccelSelfTest::from_raw(reg.st_xl()))
    }

    /// Enable or disable the accelerometer dual-channel output
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_dual_channel(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.ctrl_8().modify(|w| w.set_xl_dualc_en(enable))?;
        Ok(())
    }

    /// Whether the accelerometer dual-channel output is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn accel_dual_channel(&mut self) -> Result<bool, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        Ok(self.device.ctrl_8().read()?.xl_dualc_en())
    }

    // ==================== Gyroscope ====================

    /// Set the gyroscope output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_data_rate(&mut self, rate: GyroDataRate) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.ctrl_2().modify(|w| w.set_odr_g(rate as u8))?;
        Ok(())
    }

    /// Get the gyroscope output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn gyro_data_rate(&mut self) -> Result<GyroDataRate, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.ctrl_2().read()?;
        Ok(GyroDataRate::from_raw(reg.odr_g()))
    }

    /// Set the gyroscope operating mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_mode(&mut self, mode: GyroMode) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.ctrl_2().modify(|w| w.set_op_mode_g(mode as u8))?;
        Ok(())
    }

    /// Get the gyroscope operating mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn gyro_mode(&mut self) -> Result<GyroMode, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.ctrl_2().read()?;
        Ok(GyroMode::from_raw(reg.op_mode_g()))
    }

    /// Set the gyroscope full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_full_scale(&mut self, full_scale: GyroFullScale) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.ctrl_6().modify(|w| w.set_fs_g(full_scale as u8))?;
        self.gyro_full_scale = full_scale;
        Ok(())
    }

    /// Get the gyroscope full-scale range
    ///
    /// Also refreshes the range used by [`read_gyroscope`](Self::read_gyroscope).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn gyro_full_scale(&mut self) -> Result<GyroFullScale, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.ctrl_6().read()?;
        self.gyro_full_scale = GyroFullScale::from_raw(reg.fs_g());
        Ok(self.gyro_full_scale)
    }

    /// Configure the gyroscope
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_gyroscope(&mut self, config: GyroConfig) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;

        self.device.ctrl_2().modify(|w| {
            w.set_odr_g(config.data_rate as u8);
            w.set_op_mode_g(config.mode as u8);
        })?;
        self.set_gyro_full_scale(config.full_scale)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Gyroscope configured: {:?}", config);

        Ok(())
    }

    /// Set the gyroscope self-test excitation
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_self_test(&mut self, self_test: GyroSelfTest) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.ctrl_10().modify(|w| w.set_st_g(self_test as u8))?;
        Ok(())
    }

    /// Get the gyroscope self-test excitation
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn gyro_self_test(&mut self) -> Result<GyroSelfTest, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.ctrl_10().read()?;
        let self_test = match reg.st_g() {
            1 => GyroSelfTest::Positive,
            2 => GyroSelfTest::Negative,
            _ => GyroSelfTest::Disabled,
        };
        Ok(self_test)
    }

    // ==================== Bio front end ====================

    /// Select the bio input buffers
    ///
    /// The chain itself (`CTRL7.AH_BIO_EN`) is enabled exactly when at least
    /// one input is connected. The accelerometer and gyroscope should be in
    /// power-down before the chain is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_bio_mode(&mut self, mode: BioMode) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.ctrl_7().modify(|w| {
            w.set_ah_bio_en(mode.chain_enabled());
            w.set_ah_bio_1_en(mode.input1);
            w.set_ah_bio_2_en(mode.input2);
        })?;
        self.device.ctrl_10().modify(|w| w.set_ah_bio_sw(mode.swap))?;
        Ok(())
    }

    /// Get the bio input buffer selection
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn bio_mode(&mut self) -> Result<BioMode, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let ctrl7 = self.device.ctrl_7().read()?;
        let ctrl10 = self.device.ctrl_10().read()?;
        Ok(BioMode {
            input1: ctrl7.ah_bio_1_en(),
            input2: ctrl7.ah_bio_2_en(),
            swap: ctrl10.ah_bio_sw(),
        })
    }

    /// Set the equivalent input impedance of the bio buffers
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_bio_input_impedance(
        &mut self,
        impedance: BioInputImpedance,
    ) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device
            .ctrl_7()
            .modify(|w| w.set_ah_bio_c_zin(impedance as u8))?;
        Ok(())
    }

    /// Get the equivalent input impedance of the bio buffers
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn bio_input_impedance(&mut self) -> Result<BioInputImpedance, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.ctrl_7().read()?;
        Ok(BioInputImpedance::from_raw(reg.ah_bio_c_zin()))
    }

    // ==================== Timestamp ====================

    /// Start or stop the timestamp counter (`FUNCTIONS_ENABLE.TIMESTAMP_EN`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_timestamp_enabled(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device
            .functions_enable()
            .modify(|w| w.set_timestamp_en(enable))?;
        Ok(())
    }

    /// Whether the timestamp counter is running
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn timestamp_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        Ok(self.device.functions_enable().read()?.timestamp_en())
    }

    // ==================== Output data ====================

    /// Read the data-ready flags
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn data_ready(&mut self) -> Result<DataReady, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.status_reg().read()?;
        Ok(DataReady {
            accel: reg.xlda(),
            gyro: reg.gda(),
            temperature: reg.tda(),
            bio: reg.ah_bioda(),
        })
    }

    /// Read accelerometer data
    ///
    /// Returns raw 16-bit values for X, Y, Z axes.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel(&mut self) -> Result<AccelData, Error<I::Error>> {
        // The output block starts at Z; read all 6 bytes to prevent torn reads
        let mut buffer = [0u8; 6];
        self.select_bank(Bank::Main)?;
        self.read_block(address::OUTZ_L_A, &mut buffer)?;
        Ok(AccelData::from_zyx(&buffer))
    }

    /// Read gyroscope data
    ///
    /// Returns raw 16-bit values for X, Y, Z axes.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyro(&mut self) -> Result<GyroData, Error<I::Error>> {
        let mut buffer = [0u8; 6];
        self.select_bank(Bank::Main)?;
        self.read_block(address::OUTX_L_G, &mut buffer)?;

        Ok(GyroData {
            x: i16::from_le_bytes([buffer[0], buffer[1]]),
            y: i16::from_le_bytes([buffer[2], buffer[3]]),
            z: i16::from_le_bytes([buffer[4], buffer[5]]),
        })
    }

    /// Read the raw temperature sample
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature(&mut self) -> Result<i16, Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.select_bank(Bank::Main)?;
        self.read_block(address::OUT_TEMP_L, &mut buffer)?;
        Ok(i16::from_le_bytes(buffer))
    }

    /// Read the accelerometer dual-channel output
    ///
    /// Only meaningful while [`set_accel_dual_channel`](Self::set_accel_dual_channel)
    /// is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_dual_accel(&mut self) -> Result<AccelData, Error<I::Error>> {
        let mut buffer = [0u8; 6];
        self.select_bank(Bank::Main)?;
        self.read_block(address::UI_OUTZ_L_A_DUALC, &mut buffer)?;
        Ok(AccelData::from_zyx(&buffer))
    }

    /// Read the raw bio channel sample
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_bio_channel(&mut self) -> Result<i16, Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.select_bank(Bank::Main)?;
        self.read_block(address::AH_BIO_OUT_L, &mut buffer)?;
        Ok(i16::from_le_bytes(buffer))
    }

    /// Read the raw 32-bit timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_timestamp(&mut self) -> Result<u32, Error<I::Error>> {
        let mut buffer = [0u8; 4];
        self.select_bank(Bank::Main)?;
        self.read_block(address::TIMESTAMP0, &mut buffer)?;
        Ok(u32::from_le_bytes(buffer))
    }

    /// Read accelerometer data in milli-g
    ///
    /// Uses the last full-scale range written or read through this driver.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accelerometer(&mut self) -> Result<AccelDataMg, Error<I::Error>> {
        let raw = self.read_accel()?;
        Ok(AccelDataMg::from_raw(
            [raw.x, raw.y, raw.z],
            self.accel_full_scale,
        ))
    }

    /// Read gyroscope data in milli-degrees per second
    ///
    /// Uses the last full-scale range written or read through this driver.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyroscope(&mut self) -> Result<GyroDataMdps, Error<I::Error>> {
        let raw = self.read_gyro()?;
        Ok(GyroDataMdps::from_raw(
            [raw.x, raw.y, raw.z],
            self.gyro_full_scale,
        ))
    }

    /// Read the temperature in degrees Celsius
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature_celsius(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(conversion::from_lsb_to_celsius(self.read_temperature()?))
    }

    /// Read the bio channel in millivolts
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_bio_channel_mv(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(conversion::from_lsb_to_mv(self.read_bio_channel()?))
    }

    /// Read the timestamp in nanoseconds
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_timestamp_ns(&mut self) -> Result<u64, Error<I::Error>> {
        Ok(conversion::from_lsb_to_nsec(self.read_timestamp()?))
    }

    // ==================== FIFO ====================

    /// Set the FIFO watermark, in records
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_watermark(&mut self, watermark: u8) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.fifo_ctrl_1().write(|w| w.set_wtm(watermark))?;
        Ok(())
    }

    /// Get the FIFO watermark, in records
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_watermark(&mut self) -> Result<u8, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        Ok(self.device.fifo_ctrl_1().read()?.wtm())
    }

    /// Set the accelerometer batch data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_accel_batch(&mut self, rate: FifoBatchRate) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.fifo_ctrl_3().modify(|w| w.set_bdr_xl(rate as u8))?;
        Ok(())
    }

    /// Get the accelerometer batch data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_accel_batch(&mut self) -> Result<FifoBatchRate, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.fifo_ctrl_3().read()?;
        Ok(FifoBatchRate::from_raw(reg.bdr_xl()))
    }

    /// Set the gyroscope batch data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_gyro_batch(&mut self, rate: FifoBatchRate) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.fifo_ctrl_3().modify(|w| w.set_bdr_gy(rate as u8))?;
        Ok(())
    }

    /// Get the gyroscope batch data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_gyro_batch(&mut self) -> Result<FifoBatchRate, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.fifo_ctrl_3().read()?;
        Ok(FifoBatchRate::from_raw(reg.bdr_gy()))
    }

    /// Set the FIFO mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_mode(&mut self, mode: FifoMode) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.fifo_ctrl_4().modify(|w| w.set_fifo_mode(mode as u8))?;
        Ok(())
    }

    /// Get the FIFO mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_mode(&mut self) -> Result<FifoMode, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.fifo_ctrl_4().read()?;
        Ok(FifoMode::from_raw(reg.fifo_mode()))
    }

    /// Set the temperature batch data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_temperature_batch(
        &mut self,
        rate: FifoTemperatureBatch,
    ) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device.fifo_ctrl_4().modify(|w| w.set_odr_t_batch(rate as u8))?;
        Ok(())
    }

    /// Get the temperature batch data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_temperature_batch(&mut self) -> Result<FifoTemperatureBatch, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.fifo_ctrl_4().read()?;
        Ok(FifoTemperatureBatch::from_raw(reg.odr_t_batch()))
    }

    /// Set the timestamp batch decimation
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_timestamp_batch(
        &mut self,
        decimation: FifoTimestampBatch,
    ) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device
            .fifo_ctrl_4()
            .modify(|w| w.set_dec_ts_batch(decimation as u8))?;
        Ok(())
    }

    /// Get the timestamp batch decimation
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_timestamp_batch(&mut self) -> Result<FifoTimestampBatch, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.fifo_ctrl_4().read()?;
        Ok(FifoTimestampBatch::from_raw(reg.dec_ts_batch()))
    }

    /// Batch the bio channel in the FIFO (`COUNTER_BDR_REG1.AH_BIO_BATCH_EN`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_bio_batch(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device
            .counter_bdr_reg_1()
            .modify(|w| w.set_ah_bio_batch_en(enable))?;
        Ok(())
    }

    /// Whether the bio channel is batched in the FIFO
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_bio_batch(&mut self) -> Result<bool, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        Ok(self.device.counter_bdr_reg_1().read()?.ah_bio_batch_en())
    }

    /// Enable or disable run-time FIFO compression
    ///
    /// Sets `FIFO_CTRL2.FIFO_COMPR_RT_EN`, then `EMB_FUNC_EN_B.FIFO_COMPR_EN` in
    /// the embedded function bank. With compression running the FIFO also
    /// holds the 2x/3x compressed and T-1/T-2 accelerometer and gyroscope tags.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The embedded
    /// enable is not touched when the main-bank write failed.
    pub fn set_fifo_compression(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device
            .fifo_ctrl_2()
            .modify(|w| w.set_fifo_compr_rt_en(enable))?;
        self.in_embedded_bank(|driver| {
            driver
                .device
                .emb_func_en_b()
                .modify(|w| w.set_fifo_compr_en(enable))?;
            Ok(())
        })
    }

    /// Whether run-time FIFO compression is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_compression(&mut self) -> Result<bool, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        Ok(self.device.fifo_ctrl_2().read()?.fifo_compr_rt_en())
    }

    /// Force an uncompressed record at a fixed rate while compression runs
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_uncompressed_rate(
        &mut self,
        rate: FifoUncompressedRate,
    ) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device
            .fifo_ctrl_2()
            .modify(|w| w.set_uncompr_rate(rate as u8))?;
        Ok(())
    }

    /// Get the forced uncompressed record rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_uncompressed_rate(&mut self) -> Result<FifoUncompressedRate, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.fifo_ctrl_2().read()?;
        Ok(FifoUncompressedRate::from_raw(reg.uncompr_rate()))
    }

    /// Configure the FIFO
    ///
    /// Writes the watermark and batch rates before the mode, so a stream mode
    /// starts with the intended batching.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_configure(&mut self, config: &FifoConfig) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;

        self.set_fifo_watermark(config.watermark)?;
        self.device.fifo_ctrl_3().modify(|w| {
            w.set_bdr_xl(config.accel_batch as u8);
            w.set_bdr_gy(config.gyro_batch as u8);
        })?;
        self.set_fifo_mode(config.mode)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("FIFO configured: {:?}", config);

        Ok(())
    }

    /// Read the FIFO fill level and flags
    ///
    /// The level is the full 11-bit `DIFF_FIFO` field (bits 10:0 across
    /// `FIFO_STATUS1/2`), not only its low 9 bits.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_status(&mut self) -> Result<FifoStatus, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let reg = self.device.fifo_status().read()?;
        Ok(FifoStatus {
            level: reg.diff_fifo(),
            watermark: reg.fifo_wtm_ia(),
            overrun: reg.fifo_ovr_ia(),
            full: reg.fifo_full_ia(),
            counter_threshold: reg.counter_bdr_ia(),
            overrun_latched: reg.fifo_ovr_latched(),
        })
    }

    /// Pop one record from the FIFO
    ///
    /// Reading an empty FIFO yields a record tagged
    /// [`FifoTag::Empty`](crate::FifoTag::Empty), not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_pop_record(&mut self) -> Result<FifoRecord, Error<I::Error>> {
        let mut buffer = [0u8; RECORD_SIZE];
        self.select_bank(Bank::Main)?;
        self.read_block(address::FIFO_DATA_OUT_TAG, &mut buffer)?;
        Ok(FifoRecord::from_bytes(&buffer))
    }

    /// Pop whole records into a byte buffer
    ///
    /// Pops as many records as are stored and fit in `buffer`, and returns
    /// the number of bytes written (a multiple of [`RECORD_SIZE`]). The
    /// result can be decoded with [`fifo_parse`](Self::fifo_parse).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_read_raw(&mut self, buffer: &mut [u8]) -> Result<usize, Error<I::Error>> {
        let level = usize::from(self.fifo_status()?.level);
        let count = level.min(buffer.len() / RECORD_SIZE);

        for chunk in buffer.chunks_exact_mut(RECORD_SIZE).take(count) {
            self.read_block(address::FIFO_DATA_OUT_TAG, chunk)?;
        }

        Ok(count * RECORD_SIZE)
    }

    /// Parse bytes produced by [`fifo_read_raw`](Self::fifo_read_raw)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `data` is not a whole number of records or
    /// holds more than [`MAX_RECORDS`] of them.
    pub fn fifo_parse(&self, data: &[u8]) -> Result<heapless::Vec<FifoRecord, MAX_RECORDS>, Error<I::Error>> {
        FifoParser::new().parse(data)
    }

    /// Pop up to `N` records
    ///
    /// Reads the fill level once and pops `min(level, N)` records.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_drain<const N: usize>(&mut self) -> Result<heapless::Vec<FifoRecord, N>, Error<I::Error>> {
        let level = usize::from(self.fifo_status()?.level);
        let mut records = heapless::Vec::new();

        for _ in 0..level.min(N) {
            let record = self.fifo_pop_record()?;
            if records.push(record).is_err() {
                break;
            }
        }

        Ok(records)
    }

    /// Select which SFLP outputs are batched in the FIFO
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_sflp_batch(&mut self, batch: FifoSflpBatch) -> Result<(), Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            driver.device.emb_func_fifo_en_a().modify(|w| {
                w.set_sflp_game_fifo_en(batch.game_rotation);
                w.set_sflp_gravity_fifo_en(batch.gravity);
                w.set_sflp_gbias_fifo_en(batch.gyro_bias);
            })?;
            Ok(())
        })
    }

    /// SFLP outputs batched in the FIFO
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_sflp_batch(&mut self) -> Result<FifoSflpBatch, Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            let reg = driver.device.emb_func_fifo_en_a().read()?;
            Ok(FifoSflpBatch {
                game_rotation: reg.sflp_game_fifo_en(),
                gravity: reg.sflp_gravity_fifo_en(),
                gyro_bias: reg.sflp_gbias_fifo_en(),
            })
        })
    }

    /// Batch the step counter in the FIFO
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_step_counter_batch(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            driver
                .device
                .emb_func_fifo_en_a()
                .modify(|w| w.set_step_counter_fifo_en(enable))?;
            Ok(())
        })
    }

    /// Whether the step counter is batched in the FIFO
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_step_counter_batch(&mut self) -> Result<bool, Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            Ok(driver.device.emb_func_fifo_en_a().read()?.step_counter_fifo_en())
        })
    }

    /// Batch the MLC results in the FIFO
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_mlc_batch(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            driver
                .device
                .emb_func_fifo_en_a()
                .modify(|w| w.set_mlc_fifo_en(enable))?;
            Ok(())
        })
    }

    /// Whether the MLC results are batched in the FIFO
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_mlc_batch(&mut self) -> Result<bool, Error<I::Error>> {
        self.in_embedded_bank(|driver| Ok(driver.device.emb_func_fifo_en_a().read()?.mlc_fifo_en()))
    }

    /// Batch the MLC filters and features in the FIFO
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_mlc_filter_batch(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            driver
                .device
                .emb_func_fifo_en_b()
                .modify(|w| w.set_mlc_filter_feature_fifo_en(enable))?;
            Ok(())
        })
    }

    /// Whether the MLC filters and features are batched in the FIFO
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_mlc_filter_batch(&mut self) -> Result<bool, Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            Ok(driver
                .device
                .emb_func_fifo_en_b()
                .read()?
                .mlc_filter_feature_fifo_en())
        })
    }

    // ==================== Step counter ====================

    /// Configure the step counter
    ///
    /// False-step rejection relies on the MLC; requesting it schedules the MLC
    /// before the FSM unless both MLC enables are already set.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_step_counter_mode(&mut self, mode: StepCounterMode) -> Result<(), Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            let en_b = driver.device.emb_func_en_b().read()?;
            driver.device.emb_func_en_a().modify(|w| {
                if mode.false_step_rejection && !(w.mlc_before_fsm_en() && en_b.mlc_en()) {
                    w.set_mlc_before_fsm_en(true);
                }
                w.set_pedo_en(mode.enabled);
            })?;
            Ok(())
        })?;

        let mut command = self.page_read_u8(paged::PEDO_CMD_REG)?;
        if mode.false_step_rejection {
            command |= paged::PEDO_FP_REJECTION_EN;
        } else {
            command &= !paged::PEDO_FP_REJECTION_EN;
        }
        self.page_write(paged::PEDO_CMD_REG, &[command])
    }

    /// Get the step counter configuration
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn step_counter_mode(&mut self) -> Result<StepCounterMode, Error<I::Error>> {
        let enabled = self.in_embedded_bank(|driver| Ok(driver.device.emb_func_en_a().read()?.pedo_en()))?;
        let command = self.page_read_u8(paged::PEDO_CMD_REG)?;
        Ok(StepCounterMode {
            enabled,
            false_step_rejection: command & paged::PEDO_FP_REJECTION_EN != 0,
        })
    }

    /// Number of steps counted since the last reset
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn step_count(&mut self) -> Result<u16, Error<I::Error>> {
        self.in_embedded_bank(|driver| Ok(driver.device.step_counter().read()?.step()))
    }

    /// Reset the step counter
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset_step_counter(&mut self) -> Result<(), Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            driver.device.emb_func_src().modify(|w| w.set_pedo_rst_step(true))?;
            Ok(())
        })
    }

    /// Set the number of steps required before the counter starts counting
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_step_counter_debounce(&mut self, steps: u8) -> Result<(), Error<I::Error>> {
        self.page_write(paged::PEDO_DEB_STEPS_CONF, &[steps])
    }

    /// Number of steps required before the counter starts counting
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn step_counter_debounce(&mut self) -> Result<u8, Error<I::Error>> {
        self.page_read_u8(paged::PEDO_DEB_STEPS_CONF)
    }

    /// Set the step counter delta-time window, in timestamp LSB
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_step_counter_period(&mut self, period: u16) -> Result<(), Error<I::Error>> {
        self.page_write(paged::PEDO_SC_DELTAT_L, &period.to_le_bytes())
    }

    /// Step counter delta-time window, in timestamp LSB
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn step_counter_period(&mut self) -> Result<u16, Error<I::Error>> {
        self.page_read_u16(paged::PEDO_SC_DELTAT_L)
    }

    // ==================== Motion functions ====================

    /// Enable or disable significant motion detection
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_significant_motion(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            driver.device.emb_func_en_a().modify(|w| w.set_sign_motion_en(enable))?;
            Ok(())
        })
    }

    /// Whether significant motion detection is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn significant_motion(&mut self) -> Result<bool, Error<I::Error>> {
        self.in_embedded_bank(|driver| Ok(driver.device.emb_func_en_a().read()?.sign_motion_en()))
    }

    /// Enable or disable tilt detection
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_tilt(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            driver.device.emb_func_en_a().modify(|w| w.set_tilt_en(enable))?;
            Ok(())
        })
    }

    /// Whether tilt detection is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn tilt(&mut self) -> Result<bool, Error<I::Error>> {
        self.in_embedded_bank(|driver| Ok(driver.device.emb_func_en_a().read()?.tilt_en()))
    }

    // ==================== SFLP ====================

    /// Enable or disable the SFLP game rotation vector
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sflp_game_rotation(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            driver.device.emb_func_en_a().modify(|w| w.set_sflp_game_en(enable))?;
            Ok(())
        })
    }

    /// Whether the SFLP game rotation vector is enabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn sflp_game_rotation(&mut self) -> Result<bool, Error<I::Error>> {
        self.in_embedded_bank(|driver| Ok(driver.device.emb_func_en_a().read()?.sflp_game_en()))
    }

    /// Set the SFLP output rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sflp_data_rate(&mut self, rate: SflpDataRate) -> Result<(), Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            driver.device.sflp_odr().modify(|w| w.set_sflp_game_odr(rate as u8))?;
            Ok(())
        })
    }

    /// Get the SFLP output rate
    ///
    /// Reserved encodings read as 15 Hz.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn sflp_data_rate(&mut self) -> Result<SflpDataRate, Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            let reg = driver.device.sflp_odr().read()?;
            Ok(SflpDataRate::from_raw(reg.sflp_game_odr()))
        })
    }

    /// Write the initial SFLP algorithm configuration
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn sflp_configure(&mut self) -> Result<(), Error<I::Error>> {
        self.page_write(paged::SFLP_CONFIG, &[paged::SFLP_CONFIG_VALUE])
    }

    /// Seed the SFLP gyroscope bias
    ///
    /// The embedded engines are halted in debug mode, re-initialised from a
    /// fresh accelerometer sample and restarted; the bias is then stored as
    /// binary16 values scaled by the current SFLP output rate. The
    /// accelerometer and gyroscope configuration is restored afterwards.
    ///
    /// No other register access may be interleaved with this call.
    ///
    /// # Arguments
    ///
    /// * `bias` - Gyroscope bias in degrees per second
    /// * `delay` - Delay provider used by the status polls
    ///
    /// # Errors
    ///
    /// If reading the SFLP rate fails nothing has been changed and that error
    /// is returned. After that every phase runs even when an earlier one
    /// failed; a single failure is returned verbatim, several as
    /// [`Error::Indeterminate`]. In either case the device configuration is
    /// unknown and the device should be reset.
    ///
    /// # Example
    ///
    /// ```ignore
    /// sensor.set_sflp_data_rate(SflpDataRate::Hz120)?;
    /// sensor.set_sflp_gyro_bias(GyroBias::new(0.1, -0.2, 0.05), &mut delay)?;
    /// ```
    pub fn set_sflp_gyro_bias<D>(&mut self, bias: GyroBias, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let rate = self.sflp_data_rate()?;
        let encoded = bias.to_le_bytes(rate);

        let mut seq = Sequence::new();

        // Save CTRL1..CTRL2 and force high-performance mode with the accelerometer on
        let mut saved_ctrl = [0u8; 2];
        let mut ctrl_saved = false;
        if seq.step(self.select_bank(Bank::Main)).is_some() {
            ctrl_saved = seq.step(self.read_block(address::CTRL1, &mut saved_ctrl)).is_some();
            seq.step(
                self.device
                    .ctrl_1()
                    .modify(|w| w.set_op_mode_xl(AccelMode::HighPerformance as u8))
                    .map_err(Error::Bus),
            );
            seq.step(
                self.device
                    .ctrl_2()
                    .modify(|w| w.set_op_mode_g(GyroMode::HighPerformance as u8))
                    .map_err(Error::Bus),
            );
            if ctrl_saved && saved_ctrl[0] & 0x0F == AccelDataRate::Off as u8 {
                seq.step(
                    self.device
                        .ctrl_1()
                        .modify(|w| w.set_odr_xl(AccelDataRate::Hz120 as u8))
                        .map_err(Error::Bus),
                );
            }
        }

        // Stop every embedded function
        let mut saved_enables = [0u8; 2];
        let mut enables_saved = false;
        if seq.step(self.select_bank(Bank::EmbeddedFunction)).is_some() {
            enables_saved = seq
                .step(self.read_block(address::EMB_FUNC_EN_A, &mut saved_enables))
                .is_some();
            seq.step(self.write_block(address::EMB_FUNC_EN_A, &[0, 0]));
            seq.step(self.wait_embedded_end_of_operation(delay));
        }
        seq.step(self.select_bank(Bank::Main));

        if self.current_bank == Some(Bank::Main) {
            seq.step(
                self.device
                    .ctrl_10()
                    .modify(|w| w.set_emb_func_debug(true))
                    .map_err(Error::Bus),
            );
        }

        // Restart them with the game rotation vector forced on
        if enables_saved {
            if seq.step(self.select_bank(Bank::EmbeddedFunction)).is_some() {
                saved_enables[0] |= SFLP_GAME_EN;
                seq.step(self.write_block(address::EMB_FUNC_EN_A, &saved_enables));
            }
            seq.step(self.select_bank(Bank::Main));
        }

        // Fresh accelerometer sample and its range
        let mut sample = None;
        if self.current_bank == Some(Bank::Main) {
            let full_scale = seq
                .step(self.device.ctrl_8().read().map_err(Error::Bus))
                .map(|reg| reg.fs_xl());
            let ready = seq.step(self.poll_until(delay, |driver| {
                Ok(driver.device.status_reg().read()?.xlda())
            }));
            if let (Some(full_scale), Some(())) = (full_scale, ready) {
                sample = seq.step(self.read_accel()).map(|accel| (accel, full_scale));
            }
        }

        if let Some((accel, full_scale)) = sample {
            seq.step(self.write_sflp_initial_state(accel, full_scale));
        }

        delay.delay_ms(1);

        if seq.step(self.select_bank(Bank::EmbeddedFunction)).is_some() {
            seq.step(self.wait_embedded_end_of_operation(delay));
        }
        seq.step(self.select_bank(Bank::Main));

        seq.step(self.page_write(paged::SFLP_GAME_GBIASX_L, &encoded));

        // Restore the sensor configuration and leave debug mode
        if seq.step(self.select_bank(Bank::Main)).is_some() {
            if ctrl_saved {
                seq.step(self.write_block(address::CTRL1, &saved_ctrl));
            }
            seq.step(
                self.device
                    .ctrl_10()
                    .modify(|w| w.set_emb_func_debug(false))
                    .map_err(Error::Bus),
            );
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "SFLP gyro bias written ({} failed steps)",
            seq.failed_steps()
        );

        seq.finish()
    }

    /// Load an accelerometer sample into the SFLP initialisation state
    ///
    /// Each axis is shifted by the full-scale code and written as three
    /// little-endian bytes, one register at a time; the second state block is
    /// cleared. `FUNC_CFG_ACCESS` is written back to 0 in every case, which
    /// also selects the main bank.
    fn write_sflp_initial_state(&mut self, accel: AccelData, full_scale: u8) -> Result<(), Error<I::Error>> {
        let mut seq = Sequence::new();

        if seq
            .step(self.write_block(address::FUNC_CFG_ACCESS, &[SFLP_STATE_ACCESS]))
            .is_some()
        {
            for (base, axis) in (address::SFLP_STATE_XL..).step_by(3).zip([accel.x, accel.y, accel.z]) {
                let bytes = (i32::from(axis) << full_scale).to_le_bytes();
                for (register, &byte) in (base..).zip(&bytes[..3]) {
                    seq.step(self.write_block(register, &[byte]));
                }
            }
            for register in address::SFLP_STATE_CLEAR..address::SFLP_STATE_CLEAR + 9 {
                seq.step(self.write_block(register, &[0]));
            }
        }

        let restored = seq.step(self.write_block(address::FUNC_CFG_ACCESS, &[0]));
        self.current_bank = restored.map(|()| Bank::Main);

        seq.finish()
    }

    // ==================== FSM ====================

    /// Allow or forbid the FSM to write the control registers
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fsm_permission(&mut self, permission: FsmPermission) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        self.device
            .func_cfg_access()
            .modify(|w| w.set_fsm_wr_ctrl_en(permission == FsmPermission::WriteCtrlRegs))?;
        Ok(())
    }

    /// Configured FSM write permission
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fsm_permission(&mut self) -> Result<FsmPermission, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        let permission = if self.device.func_cfg_access().read()?.fsm_wr_ctrl_en() {
            FsmPermission::WriteCtrlRegs
        } else {
            FsmPermission::ProtectCtrlRegs
        };
        Ok(permission)
    }

    /// Whether the FSM currently controls the control registers
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fsm_permission_status(&mut self) -> Result<bool, Error<I::Error>> {
        self.select_bank(Bank::Main)?;
        Ok(self.device.ctrl_status().read()?.fsm_wr_ctrl_status())
    }

    /// Enable a set of FSM programs
    ///
    /// The FSM itself runs while at least one program is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fsm_programs(&mut self, programs: FsmPrograms) -> Result<(), Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            driver
                .device
                .fsm_enable()
                .write(|w| w.set_fsm_programs_en(programs.bits()))?;
            driver.device.emb_func_en_b().modify(|w| w.set_fsm_en(programs.any()))?;
            Ok(())
        })
    }

    /// Enabled FSM programs
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fsm_programs(&mut self) -> Result<FsmPrograms, Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            let reg = driver.device.fsm_enable().read()?;
            Ok(FsmPrograms::from_bits(reg.fsm_programs_en()))
        })
    }

    /// Set the FSM long counter
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fsm_long_counter(&mut self, value: u16) -> Result<(), Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            driver.device.fsm_long_counter().write(|w| w.set_fsm_lc(value))?;
            Ok(())
        })
    }

    /// FSM long counter
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fsm_long_counter(&mut self) -> Result<u16, Error<I::Error>> {
        self.in_embedded_bank(|driver| Ok(driver.device.fsm_long_counter().read()?.fsm_lc()))
    }

    /// Outputs of the eight FSM programs, program 1 first
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fsm_outputs(&mut self) -> Result<[u8; 8], Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            let mut outputs = [0u8; 8];
            driver.read_block(address::FSM_OUTS1, &mut outputs)?;
            Ok(outputs)
        })
    }

    /// Set the FSM output rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fsm_data_rate(&mut self, rate: FsmDataRate) -> Result<(), Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            driver.device.fsm_odr().modify(|w| w.set_fsm_odr(rate as u8))?;
            Ok(())
        })
    }

    /// FSM output rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fsm_data_rate(&mut self) -> Result<FsmDataRate, Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            Ok(FsmDataRate::from_raw(driver.device.fsm_odr().read()?.fsm_odr()))
        })
    }

    /// Set the FSM long counter timeout
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fsm_long_counter_timeout(&mut self, timeout: u16) -> Result<(), Error<I::Error>> {
        self.page_write(paged::FSM_LC_TIMEOUT_L, &timeout.to_le_bytes())
    }

    /// FSM long counter timeout
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fsm_long_counter_timeout(&mut self) -> Result<u16, Error<I::Error>> {
        self.page_read_u16(paged::FSM_LC_TIMEOUT_L)
    }

    /// Set the number of FSM programs loaded in memory
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fsm_program_count(&mut self, count: u8) -> Result<(), Error<I::Error>> {
        self.page_write(paged::FSM_PROGRAMS, &[count])
    }

    /// Number of FSM programs loaded in memory
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fsm_program_count(&mut self) -> Result<u8, Error<I::Error>> {
        self.page_read_u8(paged::FSM_PROGRAMS)
    }

    /// Set the start address of the FSM programs
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fsm_start_address(&mut self, start: u16) -> Result<(), Error<I::Error>> {
        self.page_write(paged::FSM_START_ADD_L, &start.to_le_bytes())
    }

    /// Start address of the FSM programs
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fsm_start_address(&mut self) -> Result<u16, Error<I::Error>> {
        self.page_read_u16(paged::FSM_START_ADD_L)
    }

    /// Set the bio channel sensitivity used by the FSM
    ///
    /// Stored as binary16.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fsm_bio_sensitivity(&mut self, sensitivity: f32) -> Result<(), Error<I::Error>> {
        self.page_write(
            paged::FSM_BIO_SENSITIVITY_L,
            &float_to_half(sensitivity).to_le_bytes(),
        )
    }

    /// Bio channel sensitivity used by the FSM
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fsm_bio_sensitivity(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(half_to_float(self.page_read_u16(paged::FSM_BIO_SENSITIVITY_L)?))
    }

    // ==================== MLC ====================

    /// Set the MLC scheduling
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mlc_mode(&mut self, mode: MlcMode) -> Result<(), Error<I::Error>> {
        let (before_fsm, mlc_en) = mode.enables();
        self.in_embedded_bank(|driver| {
            driver
                .device
                .emb_func_en_a()
                .modify(|w| w.set_mlc_before_fsm_en(before_fsm))?;
            driver.device.emb_func_en_b().modify(|w| w.set_mlc_en(mlc_en))?;
            Ok(())
        })
    }

    /// MLC scheduling
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn mlc_mode(&mut self) -> Result<MlcMode, Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            let en_a = driver.device.emb_func_en_a().read()?;
            let en_b = driver.device.emb_func_en_b().read()?;
            Ok(MlcMode::from_enables(en_a.mlc_before_fsm_en(), en_b.mlc_en()))
        })
    }

    /// Set the MLC output rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mlc_data_rate(&mut self, rate: MlcDataRate) -> Result<(), Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            driver.device.mlc_odr().modify(|w| w.set_mlc_odr(rate as u8))?;
            Ok(())
        })
    }

    /// MLC output rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn mlc_data_rate(&mut self) -> Result<MlcDataRate, Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            Ok(MlcDataRate::from_raw(driver.device.mlc_odr().read()?.mlc_odr()))
        })
    }

    /// Outputs of the four MLC decision trees
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn mlc_outputs(&mut self) -> Result<[u8; 4], Error<I::Error>> {
        self.in_embedded_bank(|driver| {
            let mut outputs = [0u8; 4];
            driver.read_block(address::MLC1_SRC, &mut outputs)?;
            Ok(outputs)
        })
    }

    /// Set the bio channel sensitivity used by the MLC
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_mlc_bio_sensitivity(&mut self, sensitivity: f32) -> Result<(), Error<I::Error>> {
        self.page_write(
            paged::MLC_BIO_SENSITIVITY_L,
            &float_to_half(sensitivity).to_le_bytes(),
        )
    }

    /// Bio channel sensitivity used by the MLC
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn mlc_bio_sensitivity(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(half_to_float(self.page_read_u16(paged::MLC_BIO_SENSITIVITY_L)?))
    }
}
