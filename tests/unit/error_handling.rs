//! Unit tests for error handling and recovery

use crate::common::{MockDelay, MockError, MockInterface, create_mock_driver, test_utils};
use st1vafe6ax::{Bank, Error, PollConfig, ResetMode, St1vafe6axDriver};

fn fast_poll() -> PollConfig {
    PollConfig {
        max_attempts: 4,
        interval_us: 1,
    }
}

#[test]
fn test_invalid_device_id() {
    let interface = MockInterface::new();
    interface.set_who_am_i(0x6C);

    let result = St1vafe6axDriver::new(interface);

    assert!(matches!(result, Err(Error::InvalidDevice(0x6C))));
}

#[test]
fn test_construction_bus_failure() {
    let interface = MockInterface::new();
    interface.fail_next_read();

    let result = St1vafe6axDriver::new(interface);

    assert!(matches!(
        result,
        Err(Error::Bus(MockError::Communication))
    ));
}

#[test]
fn test_read_failure_recovery() {
    let (mut driver, interface) = create_mock_driver();
    driver.init(&mut test_utils::MockDelay).unwrap();

    interface.fail_next_read();
    assert_eq!(
        driver.read_accel(),
        Err(Error::Bus(MockError::Communication))
    );

    // The failure affected one transfer only
    interface.set_accel_data(100, 200, 300);
    let data = driver.read_accel().unwrap();
    assert_eq!((data.x, data.y, data.z), (100, 200, 300));
}

#[test]
fn test_write_failure() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_next_write();
    let result = driver.set_fifo_watermark(12);

    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
    assert_eq!(interface.get_register(Bank::Main, 0x07), 0);

    driver.set_fifo_watermark(12).unwrap();
    assert_eq!(interface.get_register(Bank::Main, 0x07), 12);
}

#[test]
fn test_init_enables_auto_increment_and_bdu() {
    let (mut driver, interface) = create_mock_driver();

    driver.init(&mut MockDelay).unwrap();

    // IF_INC and BDU, reset bit cleared
    assert_eq!(interface.get_register(Bank::Main, 0x12), 0x44);
    assert_eq!(interface.current_bank(), Bank::Main);
    assert_eq!(driver.current_bank(), Some(Bank::Main));
}

#[test]
fn test_init_times_out_when_reset_never_completes() {
    let (mut driver, interface) = create_mock_driver();
    driver.set_poll_config(fast_poll());
    interface.set_reset_sticky(true);

    let result = driver.init(&mut MockDelay);

    assert_eq!(result, Err(Error::Timeout));
    let status_reads = interface
        .operations()
        .iter()
        .filter(|op| {
            matches!(
                op,
                crate::common::Operation::ReadRegister {
                    bank: Bank::Main,
                    address: 0x12,
                    ..
                }
            )
        })
        .count();
    // One read for the reset modify, then the poll
    assert_eq!(status_reads, 1 + 4);
}

#[test]
fn test_poll_read_error_is_not_retried() {
    let (mut driver, interface) = create_mock_driver();
    driver.set_poll_config(fast_poll());

    // CTRL3 modify is two calls, the first poll read is the third
    let calls = interface.call_count();
    interface.fail_on_call(3);
    let result = driver.init(&mut MockDelay);

    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
    assert_eq!(interface.call_count() - calls, 3);
}

#[test]
fn test_zero_attempts_still_polls_once() {
    let (mut driver, interface) = create_mock_driver();
    driver.set_poll_config(PollConfig {
        max_attempts: 0,
        interval_us: 0,
    });

    driver.init(&mut MockDelay).unwrap();
    assert_eq!(driver.poll_config().max_attempts, 0);
    assert_eq!(interface.get_register(Bank::Main, 0x12), 0x44);
}

#[test]
fn test_reset_bits_and_status() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_reset_sticky(true);

    driver.reset(ResetMode::RestoreControlRegisters).unwrap();
    assert_eq!(interface.get_register(Bank::Main, 0x12) & 0x81, 0x01);
    assert_eq!(driver.current_bank(), None);
    assert_eq!(
        driver.reset_status().unwrap(),
        Some(ResetMode::RestoreControlRegisters)
    );

    driver.reset(ResetMode::RestoreCalibration).unwrap();
    assert_eq!(interface.get_register(Bank::Main, 0x12) & 0x81, 0x80);
    assert_eq!(driver.current_bank(), Some(Bank::Main));
    assert_eq!(
        driver.reset_status().unwrap(),
        Some(ResetMode::RestoreCalibration)
    );

    driver.reset(ResetMode::GlobalReset).unwrap();
    assert_eq!(interface.func_cfg_access() & 0x04, 0x04);
    assert_eq!(driver.reset_status().unwrap(), Some(ResetMode::GlobalReset));
}

#[test]
fn test_reset_status_priority() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_reset_sticky(true);
    interface.set_register(Bank::Main, 0x12, 0x81);
    interface.set_func_cfg_access(0x04);

    assert_eq!(driver.reset_status().unwrap(), Some(ResetMode::GlobalReset));

    interface.set_func_cfg_access(0x00);
    assert_eq!(
        driver.reset_status().unwrap(),
        Some(ResetMode::RestoreControlRegisters)
    );
}

#[test]
fn test_reset_completes() {
    let (mut driver, _interface) = create_mock_driver();

    driver.reset(ResetMode::RestoreControlRegisters).unwrap();

    assert_eq!(driver.reset_status().unwrap(), None);
}

#[test]
fn test_single_failure_inside_embedded_bank_is_returned_verbatim() {
    let (mut driver, interface) = create_mock_driver();

    // Bank switch is two calls; the step counter read is the third
    interface.fail_on_call(3);
    let result = driver.step_count();

    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
    assert_eq!(interface.current_bank(), Bank::Main);
    assert_eq!(driver.current_bank(), Some(Bank::Main));
}

#[test]
fn test_failures_on_both_sides_are_indeterminate() {
    let (mut driver, interface) = create_mock_driver();

    interface.fail_bank_switch(true);
    assert_eq!(
        driver.step_count(),
        Err(Error::Indeterminate { failed_steps: 2 })
    );
    assert_eq!(driver.current_bank(), None);

    // Recovers once the bus does
    interface.fail_bank_switch(false);
    interface.set_register(Bank::EmbeddedFunction, 0x62, 7);
    assert_eq!(driver.step_count().unwrap(), 7);
    assert_eq!(driver.current_bank(), Some(Bank::Main));
}
