//! Unit tests for seeding the SFLP gyroscope bias

use crate::common::{MockDelay, MockError, MockInterface, create_mock_driver};
use st1vafe6ax::{Bank, Error, GyroBias, PollConfig, SflpDataRate, St1vafe6axDriver};

const CTRL1: u8 = 0x10;
const CTRL2: u8 = 0x11;
const CTRL8: u8 = 0x17;
const CTRL10: u8 = 0x19;
const STATUS_REG: u8 = 0x1E;
const EMB_FUNC_EN_A: u8 = 0x04;
const EMB_FUNC_EN_B: u8 = 0x05;
const SFLP_ODR: u8 = 0x5E;
const SFLP_GAME_GBIASX_L: usize = 0x06E;

/// Device with SFLP at 120 Hz, accelerometer at +-4 g and a sample ready
fn prepared_driver() -> (St1vafe6axDriver<MockInterface>, MockInterface) {
    let (mut driver, interface) = create_mock_driver();
    driver.set_poll_config(PollConfig {
        max_attempts: 3,
        interval_us: 10,
    });

    interface.set_register(Bank::EmbeddedFunction, SFLP_ODR, 3 << 3);
    interface.set_register(Bank::EmbeddedFunction, EMB_FUNC_EN_A, 0x08);
    interface.set_register(Bank::EmbeddedFunction, EMB_FUNC_EN_B, 0x01);
    interface.set_register(Bank::Main, CTRL1, 0x14);
    interface.set_register(Bank::Main, CTRL2, 0x25);
    interface.set_register(Bank::Main, CTRL8, 0x01);
    interface.set_register(Bank::Main, STATUS_REG, 0x01);
    interface.set_accel_data(100, -2, 0x4000);

    (driver, interface)
}

#[test]
fn test_gyro_bias_stored_in_paged_memory() {
    let (mut driver, interface) = prepared_driver();
    let bias = GyroBias::new(0.5, -0.25, 1.0);

    driver.set_sflp_gyro_bias(bias, &mut MockDelay).unwrap();

    assert_eq!(
        interface.paged_memory(SFLP_GAME_GBIASX_L, 6),
        bias.to_le_bytes(SflpDataRate::Hz120).to_vec()
    );
    assert_eq!(interface.current_bank(), Bank::Main);
    assert_eq!(driver.current_bank(), Some(Bank::Main));
}

#[test]
fn test_sflp_initial_state_from_accel_sample() {
    let (mut driver, interface) = prepared_driver();

    driver
        .set_sflp_gyro_bias(GyroBias::default(), &mut MockDelay)
        .unwrap();

    // Each axis shifted by the full-scale code (1), three bytes little-endian
    let expected = [
        (0x02, 0xC8),
        (0x03, 0x00),
        (0x04, 0x00),
        (0x05, 0xFC),
        (0x06, 0xFF),
        (0x07, 0xFF),
        (0x08, 0x00),
        (0x09, 0x80),
        (0x0A, 0x00),
    ];
    for (address, value) in expected {
        assert_eq!(interface.sflp_state(address), Some(value), "state {address:#04x}");
    }
    for address in 0x0B..=0x13 {
        assert_eq!(interface.sflp_state(address), Some(0), "state {address:#04x}");
    }

    // State window opened, then FUNC_CFG_ACCESS cleared
    let writes = interface.writes_to(Bank::Main, 0x01);
    let opened = writes.iter().position(|&value| value == 0x40).unwrap();
    assert_eq!(writes[opened + 1], 0x00);
    assert_eq!(interface.func_cfg_access(), 0x00);
}

#[test]
fn test_configuration_restored() {
    let (mut driver, interface) = prepared_driver();

    driver
        .set_sflp_gyro_bias(GyroBias::new(0.1, 0.1, 0.1), &mut MockDelay)
        .unwrap();

    // High-performance mode forced, then the saved value written back
    assert_eq!(interface.writes_to(Bank::Main, CTRL1), vec![0x04, 0x14]);
    assert_eq!(interface.writes_to(Bank::Main, CTRL2), vec![0x05, 0x25]);
    assert_eq!(interface.get_register(Bank::Main, CTRL1), 0x14);
    assert_eq!(interface.get_register(Bank::Main, CTRL2), 0x25);

    // Debug mode entered and left
    assert_eq!(interface.writes_to(Bank::Main, CTRL10), vec![0x40, 0x00]);

    // Embedded functions stopped, then restarted with the game vector on
    assert_eq!(
        interface.writes_to(Bank::EmbeddedFunction, EMB_FUNC_EN_A),
        vec![0x00, 0x0A]
    );
    assert_eq!(
        interface.writes_to(Bank::EmbeddedFunction, EMB_FUNC_EN_B),
        vec![0x00, 0x01]
    );
}

#[test]
fn test_accelerometer_started_when_off() {
    let (mut driver, interface) = prepared_driver();
    interface.set_register(Bank::Main, CTRL1, 0x10);

    driver
        .set_sflp_gyro_bias(GyroBias::default(), &mut MockDelay)
        .unwrap();

    // Mode forced, 120 Hz selected, saved value restored
    assert_eq!(interface.writes_to(Bank::Main, CTRL1), vec![0x00, 0x06, 0x10]);
    assert_eq!(interface.get_register(Bank::Main, CTRL1), 0x10);
}

#[test]
fn test_bias_scaled_by_sflp_rate() {
    let (mut driver, interface) = prepared_driver();
    interface.set_register(Bank::EmbeddedFunction, SFLP_ODR, 0);
    let bias = GyroBias::new(2.0, 0.0, -2.0);

    driver.set_sflp_gyro_bias(bias, &mut MockDelay).unwrap();

    assert_eq!(
        interface.paged_memory(SFLP_GAME_GBIASX_L, 6),
        bias.to_le_bytes(SflpDataRate::Hz15).to_vec()
    );
}

#[test]
fn test_embedded_engine_busy_reports_indeterminate() {
    let (mut driver, interface) = prepared_driver();
    interface.set_embedded_busy(true);

    let result = driver.set_sflp_gyro_bias(GyroBias::new(0.5, 0.5, 0.5), &mut MockDelay);

    // Both end-of-operation polls time out
    assert_eq!(result, Err(Error::Indeterminate { failed_steps: 2 }));

    // The remaining phases still ran
    assert_eq!(
        interface.paged_memory(SFLP_GAME_GBIASX_L, 6),
        GyroBias::new(0.5, 0.5, 0.5)
            .to_le_bytes(SflpDataRate::Hz120)
            .to_vec()
    );
    assert_eq!(interface.get_register(Bank::Main, CTRL1), 0x14);
    assert_eq!(interface.get_register(Bank::Main, CTRL10) & 0x40, 0);
    assert_eq!(interface.current_bank(), Bank::Main);
}

#[test]
fn test_no_accel_sample_skips_initial_state() {
    let (mut driver, interface) = prepared_driver();
    interface.set_register(Bank::Main, STATUS_REG, 0x00);

    let result = driver.set_sflp_gyro_bias(GyroBias::new(0.5, 0.0, 0.0), &mut MockDelay);

    assert_eq!(result, Err(Error::Timeout));
    assert_eq!(interface.sflp_state(0x02), None);
    assert!(!interface.writes_to(Bank::Main, 0x01).contains(&0x40));

    // Bias and restore are not skipped
    assert_eq!(
        interface.paged_memory(SFLP_GAME_GBIASX_L, 6),
        GyroBias::new(0.5, 0.0, 0.0)
            .to_le_bytes(SflpDataRate::Hz120)
            .to_vec()
    );
    assert_eq!(interface.writes_to(Bank::Main, CTRL10), vec![0x40, 0x00]);
}

#[test]
fn test_rate_read_failure_aborts_before_any_change() {
    let (mut driver, interface) = prepared_driver();
    interface.fail_next_read();

    let result = driver.set_sflp_gyro_bias(GyroBias::new(1.0, 1.0, 1.0), &mut MockDelay);

    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
    assert!(interface.writes_to(Bank::Main, CTRL1).is_empty());
    assert!(interface.writes_to(Bank::Main, CTRL10).is_empty());
    assert!(interface.writes_to(Bank::EmbeddedFunction, EMB_FUNC_EN_A).is_empty());
    assert_eq!(interface.paged_memory(SFLP_GAME_GBIASX_L, 6), vec![0; 6]);
}
