//! Mock interface implementation for testing the ST1VAFE6AX driver
//!
//! The mock keeps one register map per bank and simulates the parts of the
//! device the driver depends on for multi-step protocols:
//! - `FUNC_CFG_ACCESS` (0x01) is shared by both banks and selects the bank
//! - the paging window (`PAGE_SEL`, `PAGE_ADDRESS`, `PAGE_VALUE`, `PAGE_RW`)
//!   into a 4 KiB advanced-feature memory
//! - the FIFO queue behind `FIFO_DATA_OUT_TAG` and `FIFO_STATUS1/2`
//! - the SFLP initialisation registers hidden behind `FUNC_CFG_ACCESS` bit 6
//! - self-clearing reset bits

use device_driver::RegisterInterface;
use st1vafe6ax::Bank;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

const FUNC_CFG_ACCESS: u8 = 0x01;
const CTRL3: u8 = 0x12;
const FIFO_STATUS1: u8 = 0x1B;
const FIFO_STATUS2: u8 = 0x1C;
const FIFO_DATA_OUT_TAG: u8 = 0x78;

const PAGE_SEL: u8 = 0x02;
const EMB_FUNC_EXEC_STATUS: u8 = 0x07;
const PAGE_ADDRESS: u8 = 0x08;
const PAGE_VALUE: u8 = 0x09;
const PAGE_RW: u8 = 0x17;

const PAGE_READ: u8 = 1 << 5;
const PAGE_WRITE: u8 = 1 << 6;
const SFLP_STATE_ACCESS: u8 = 1 << 6;
const EMB_FUNC_REG_ACCESS: u8 = 1 << 7;
const SW_POR: u8 = 1 << 2;
const SW_RESET: u8 = 1 << 0;
const BOOT: u8 = 1 << 7;

/// Size of the simulated advanced-feature memory
pub const PAGED_MEMORY_SIZE: usize = 0x1000;

/// Records operations performed on the mock interface
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Read register operation
    ReadRegister {
        /// Bank where the register was read
        bank: Bank,
        /// Register address
        address: u8,
        /// Value that was returned
        value: u8,
    },
    /// Write register operation
    WriteRegister {
        /// Bank where the register was written
        bank: Bank,
        /// Register address
        address: u8,
        /// Value that was written
        value: u8,
    },
    /// Bank switch through `FUNC_CFG_ACCESS`
    BankSwitch {
        /// Previous bank
        from: Bank,
        /// New bank
        to: Bank,
    },
    /// Write to a hidden SFLP initialisation register
    SflpStateWrite {
        /// Register address
        address: u8,
        /// Value that was written
        value: u8,
    },
}

/// Shared state for mock interface (uses interior mutability)
#[derive(Debug)]
struct MockState {
    /// Simulated register values (bank, address) -> value
    registers: HashMap<(Bank, u8), u8>,

    /// `FUNC_CFG_ACCESS`, visible from both banks
    func_cfg_access: u8,

    /// Hidden SFLP initialisation registers
    sflp_state: HashMap<u8, u8>,

    /// Advanced-feature memory behind the paging window
    paged_memory: Vec<u8>,

    /// Queued FIFO records (tag + payload)
    fifo: VecDeque<[u8; 7]>,

    /// FIFO_STATUS2 flag bits 3..7
    fifo_flags: u8,

    /// Reset bits stay set instead of clearing themselves
    reset_sticky: bool,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Number of bus calls made so far
    calls: usize,

    /// Failure injection flags
    fail_next_read: bool,
    fail_next_write: bool,
    fail_bank_switch: bool,
    fail_on_call: Option<usize>,
}

impl MockState {
    fn new() -> Self {
        let mut state = Self {
            registers: HashMap::new(),
            func_cfg_access: 0,
            sflp_state: HashMap::new(),
            paged_memory: vec![0; PAGED_MEMORY_SIZE],
            fifo: VecDeque::new(),
            fifo_flags: 0,
            reset_sticky: false,
            operations: Vec::new(),
            calls: 0,
            fail_next_read: false,
            fail_next_write: false,
            fail_bank_switch: false,
            fail_on_call: None,
        };

        // WHO_AM_I = 0x71
        state.registers.insert((Bank::Main, 0x0F), 0x71);

        // PAGE_SEL resets with its low nibble at 1
        state.registers.insert((Bank::EmbeddedFunction, PAGE_SEL), 0x01);

        // No embedded function running
        state
            .registers
            .insert((Bank::EmbeddedFunction, EMB_FUNC_EXEC_STATUS), 0x01);

        state
    }

    fn current_bank(&self) -> Bank {
        if self.func_cfg_access & EMB_FUNC_REG_ACCESS != 0 {
            Bank::EmbeddedFunction
        } else {
            Bank::Main
        }
    }

    fn register(&self, bank: Bank, address: u8) -> u8 {
        self.registers.get(&(bank, address)).copied().unwrap_or(0)
    }

    /// Count one bus call and report whether it must fail
    fn take_call_failure(&mut self) -> bool {
        self.calls += 1;
        match self.fail_on_call {
            Some(remaining) if remaining <= 1 => {
                self.fail_on_call = None;
                true
            }
            Some(remaining) => {
                self.fail_on_call = Some(remaining - 1);
                false
            }
            None => false,
        }
    }

    fn sflp_window(&self, address: u8) -> bool {
        self.func_cfg_access & SFLP_STATE_ACCESS != 0 && (0x02..=0x13).contains(&address)
    }

    fn paged_address(&self) -> usize {
        let page = usize::from(self.register(Bank::EmbeddedFunction, PAGE_SEL) >> 4);
        let offset = usize::from(self.register(Bank::EmbeddedFunction, PAGE_ADDRESS));
        (page << 8) | offset
    }

    fn advance_page_address(&mut self) {
        let offset = self.register(Bank::EmbeddedFunction, PAGE_ADDRESS);
        self.registers
            .insert((Bank::EmbeddedFunction, PAGE_ADDRESS), offset.wrapping_add(1));
    }

    fn fifo_status(&self) -> [u8; 2] {
        let level = u16::try_from(self.fifo.len().min(0x7FF)).unwrap_or(0x7FF);
        let [low, high] = level.to_le_bytes();
        [low, (high & 0x07) | (self.fifo_flags & 0xF8)]
    }

    fn read_byte(&mut self, address: u8) -> u8 {
        let bank = self.current_bank();

        if address == FUNC_CFG_ACCESS {
            return self.func_cfg_access;
        }
        if self.sflp_window(address) {
            return self.sflp_state.get(&address).copied().unwrap_or(0);
        }

        match (bank, address) {
            (Bank::Main, FIFO_STATUS1) => self.fifo_status()[0],
            (Bank::Main, FIFO_STATUS2) => self.fifo_status()[1],
            (Bank::EmbeddedFunction, PAGE_VALUE)
                if self.register(bank, PAGE_RW) & PAGE_READ != 0 =>
            {
                let value = self.paged_memory[self.paged_address()];
                self.advance_page_address();
                value
            }
            _ => self.register(bank, address),
        }
    }

    fn write_byte(&mut self, address: u8, value: u8) {
        let bank = self.current_bank();

        if address == FUNC_CFG_ACCESS {
            let value = if self.reset_sticky {
                value
            } else {
                value & !SW_POR
            };
            self.func_cfg_access = value;
            self.operations.push(Operation::WriteRegister {
                bank,
                address,
                value,
            });
            let to = self.current_bank();
            if to != bank {
                self.operations.push(Operation::BankSwitch { from: bank, to });
            }
            return;
        }

        if self.sflp_window(address) {
            self.sflp_state.insert(address, value);
            self.operations
                .push(Operation::SflpStateWrite { address, value });
            return;
        }

        self.operations.push(Operation::WriteRegister {
            bank,
            address,
            value,
        });

        match (bank, address) {
            (Bank::Main, CTRL3) if !self.reset_sticky => {
                self.registers
                    .insert((bank, address), value & !(SW_RESET | BOOT));
            }
            (Bank::EmbeddedFunction, PAGE_VALUE)
                if self.register(bank, PAGE_RW) & PAGE_WRITE != 0 =>
            {
                let paged_address = self.paged_address();
                self.paged_memory[paged_address] = value;
                self.advance_page_address();
            }
            _ => {
                self.registers.insert((bank, address), value);
            }
        }
    }
}

/// Mock interface for testing
#[derive(Clone)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
}

#[allow(dead_code)]
impl MockInterface {
    /// Create a new mock interface with default register values
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new())),
        }
    }

    /// Set a register value
    pub fn set_register(&self, bank: Bank, address: u8, value: u8) {
        self.state
            .borrow_mut()
            .registers
            .insert((bank, address), value);
    }

    /// Get a register value
    pub fn get_register(&self, bank: Bank, address: u8) -> u8 {
        self.state.borrow().register(bank, address)
    }

    /// Current `FUNC_CFG_ACCESS` value
    pub fn func_cfg_access(&self) -> u8 {
        self.state.borrow().func_cfg_access
    }

    /// Preset `FUNC_CFG_ACCESS` without logging an operation
    pub fn set_func_cfg_access(&self, value: u8) {
        self.state.borrow_mut().func_cfg_access = value;
    }

    /// Bank currently selected on the simulated device
    pub fn current_bank(&self) -> Bank {
        self.state.borrow().current_bank()
    }

    /// Set WHO_AM_I register value
    pub fn set_who_am_i(&self, value: u8) {
        self.set_register(Bank::Main, 0x0F, value);
    }

    /// Set accelerometer data; the output registers are laid out Z, Y, X
    pub fn set_accel_data(&self, x: i16, y: i16, z: i16) {
        self.set_block(Bank::Main, 0x28, &[z, y, x]);
    }

    /// Set gyroscope data
    pub fn set_gyro_data(&self, x: i16, y: i16, z: i16) {
        self.set_block(Bank::Main, 0x22, &[x, y, z]);
    }

    /// Set dual-channel accelerometer data, laid out Z, Y, X
    pub fn set_dual_accel_data(&self, x: i16, y: i16, z: i16) {
        self.set_block(Bank::Main, 0x34, &[z, y, x]);
    }

    /// Set temperature data
    pub fn set_temperature_data(&self, raw: i16) {
        self.set_block(Bank::Main, 0x20, &[raw]);
    }

    /// Set bio channel data
    pub fn set_bio_data(&self, raw: i16) {
        self.set_block(Bank::Main, 0x3A, &[raw]);
    }

    /// Set the 32-bit timestamp
    pub fn set_timestamp(&self, ticks: u32) {
        for (offset, byte) in (0u8..).zip(ticks.to_le_bytes()) {
            self.set_register(Bank::Main, 0x40 + offset, byte);
        }
    }

    fn set_block(&self, bank: Bank, start: u8, values: &[i16]) {
        let mut address = start;
        for value in values {
            let [low, high] = value.to_le_bytes();
            self.set_register(bank, address, low);
            self.set_register(bank, address + 1, high);
            address += 2;
        }
    }

    /// Queue one FIFO record
    pub fn push_fifo_record(&self, tag_byte: u8, payload: [u8; 6]) {
        let mut record = [0u8; 7];
        record[0] = tag_byte;
        record[1..].copy_from_slice(&payload);
        self.state.borrow_mut().fifo.push_back(record);
    }

    /// Number of records still queued
    pub fn fifo_len(&self) -> usize {
        self.state.borrow().fifo.len()
    }

    /// Set the FIFO_STATUS2 flag bits (bits 3 to 7)
    pub fn set_fifo_flags(&self, flags: u8) {
        self.state.borrow_mut().fifo_flags = flags;
    }

    /// Read the simulated advanced-feature memory
    pub fn paged_memory(&self, address: usize, len: usize) -> Vec<u8> {
        self.state.borrow().paged_memory[address..address + len].to_vec()
    }

    /// Preset the simulated advanced-feature memory
    pub fn set_paged_memory(&self, address: usize, data: &[u8]) {
        self.state.borrow_mut().paged_memory[address..address + data.len()]
            .copy_from_slice(data);
    }

    /// Value of a hidden SFLP initialisation register, if written
    pub fn sflp_state(&self, address: u8) -> Option<u8> {
        self.state.borrow().sflp_state.get(&address).copied()
    }

    /// Keep the embedded engine busy (`EMB_FUNC_ENDOP` cleared)
    pub fn set_embedded_busy(&self, busy: bool) {
        self.set_register(
            Bank::EmbeddedFunction,
            EMB_FUNC_EXEC_STATUS,
            u8::from(!busy),
        );
    }

    /// Keep reset bits set after they are written
    pub fn set_reset_sticky(&self, sticky: bool) {
        self.state.borrow_mut().reset_sticky = sticky;
    }

    /// Inject a read failure on the next read operation
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Make every write to `FUNC_CFG_ACCESS` fail
    pub fn fail_bank_switch(&self, enable: bool) {
        self.state.borrow_mut().fail_bank_switch = enable;
    }

    /// Fail the `n`-th bus call from now (1 = the next call)
    pub fn fail_on_call(&self, n: usize) {
        self.state.borrow_mut().fail_on_call = Some(n);
    }

    /// Number of bus calls made so far, failed ones included
    pub fn call_count(&self) -> usize {
        self.state.borrow().calls
    }

    /// Get the operations log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// Count bank switch operations
    pub fn bank_switch_count(&self) -> usize {
        self.state
            .borrow()
            .operations
            .iter()
            .filter(|op| matches!(op, Operation::BankSwitch { .. }))
            .count()
    }

    /// Values written to one register, in order
    pub fn writes_to(&self, bank: Bank, address: u8) -> Vec<u8> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::WriteRegister {
                    bank: b,
                    address: a,
                    value,
                } if *b == bank && *a == address => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// Verify a register holds the expected value
    pub fn verify_register(&self, bank: Bank, address: u8, expected: u8) -> bool {
        self.get_register(bank, address) == expected
    }
}

/// Mock error type
#[derive(Debug, Clone, PartialEq)]
pub enum MockError {
    /// Simulated communication error
    Communication,
    /// Simulated bank switch error
    BankSwitch,
}

impl RegisterInterface for MockInterface {
    type Error = MockError;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        // Check for injected failure
        if state.take_call_failure() {
            return Err(MockError::Communication);
        }
        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError::Communication);
        }

        let bank = state.current_bank();

        // One FIFO record per burst
        if bank == Bank::Main && address == FIFO_DATA_OUT_TAG {
            let record = state.fifo.pop_front().unwrap_or([0; 7]);
            for (byte, value) in read_data.iter_mut().zip(record) {
                *byte = value;
            }
            state.operations.push(Operation::ReadRegister {
                bank,
                address,
                value: read_data[0],
            });
            return Ok(());
        }

        for (reg_addr, byte) in (address..).zip(read_data.iter_mut()) {
            *byte = state.read_byte(reg_addr);
            state.operations.push(Operation::ReadRegister {
                bank,
                address: reg_addr,
                value: *byte,
            });
        }

        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        // Check for injected failure
        if state.take_call_failure() {
            return Err(MockError::Communication);
        }
        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Communication);
        }

        if address == FUNC_CFG_ACCESS && state.fail_bank_switch {
            return Err(MockError::BankSwitch);
        }

        for (reg_addr, &byte) in (address..).zip(write_data) {
            state.write_byte(reg_addr, byte);
        }

        Ok(())
    }
}
