//! Unit tests for the embedded functions: step counter, motion, SFLP, FSM and MLC

use crate::common::{assert_float_eq, create_mock_driver};
use st1vafe6ax::{
    Bank, FsmDataRate, FsmPermission, FsmPrograms, MlcDataRate, MlcMode, SflpDataRate,
    StepCounterMode,
};

const EMB_FUNC_EN_A: u8 = 0x04;
const EMB_FUNC_EN_B: u8 = 0x05;

#[test]
fn test_step_counter_with_false_step_rejection() {
    let (mut driver, interface) = create_mock_driver();

    driver
        .set_step_counter_mode(StepCounterMode {
            enabled: true,
            false_step_rejection: true,
        })
        .unwrap();

    // PEDO_EN and MLC_BEFORE_FSM_EN
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, EMB_FUNC_EN_A), 0x88);
    assert_eq!(interface.paged_memory(0x183, 1), vec![0x04]);
    assert_eq!(
        driver.step_counter_mode().unwrap(),
        StepCounterMode {
            enabled: true,
            false_step_rejection: true,
        }
    );
    assert_eq!(interface.current_bank(), Bank::Main);
}

#[test]
fn test_step_counter_keeps_mlc_schedule_when_fully_enabled() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(Bank::EmbeddedFunction, EMB_FUNC_EN_A, 0x80);
    interface.set_register(Bank::EmbeddedFunction, EMB_FUNC_EN_B, 0x10);

    driver
        .set_step_counter_mode(StepCounterMode {
            enabled: true,
            false_step_rejection: true,
        })
        .unwrap();

    assert_eq!(interface.get_register(Bank::EmbeddedFunction, EMB_FUNC_EN_A), 0x88);
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, EMB_FUNC_EN_B), 0x10);
}

#[test]
fn test_step_counter_without_rejection() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_paged_memory(0x183, &[0x05]);

    driver
        .set_step_counter_mode(StepCounterMode {
            enabled: true,
            false_step_rejection: false,
        })
        .unwrap();

    assert_eq!(interface.get_register(Bank::EmbeddedFunction, EMB_FUNC_EN_A), 0x08);
    // Only the rejection bit of the command register changes
    assert_eq!(interface.paged_memory(0x183, 1), vec![0x01]);

    driver.set_step_counter_mode(StepCounterMode::default()).unwrap();
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, EMB_FUNC_EN_A), 0x00);
    assert!(!driver.step_counter_mode().unwrap().enabled);
}

#[test]
fn test_step_count_and_reset() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(Bank::EmbeddedFunction, 0x62, 0x39);
    interface.set_register(Bank::EmbeddedFunction, 0x63, 0x05);

    assert_eq!(driver.step_count().unwrap(), 0x0539);

    driver.reset_step_counter().unwrap();
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, 0x64) & 0x80, 0x80);
    assert_eq!(interface.current_bank(), Bank::Main);
}

#[test]
fn test_step_counter_paged_parameters() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_step_counter_debounce(10).unwrap();
    driver.set_step_counter_period(0x1234).unwrap();

    assert_eq!(interface.paged_memory(0x184, 1), vec![10]);
    assert_eq!(interface.paged_memory(0x1D0, 2), vec![0x34, 0x12]);
    assert_eq!(driver.step_counter_debounce().unwrap(), 10);
    assert_eq!(driver.step_counter_period().unwrap(), 0x1234);
}

#[test]
fn test_motion_function_enables() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_significant_motion(true).unwrap();
    driver.set_tilt(true).unwrap();
    driver.set_sflp_game_rotation(true).unwrap();
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, EMB_FUNC_EN_A), 0x32);
    assert!(driver.significant_motion().unwrap());
    assert!(driver.tilt().unwrap());
    assert!(driver.sflp_game_rotation().unwrap());

    driver.set_tilt(false).unwrap();
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, EMB_FUNC_EN_A), 0x22);
    assert!(!driver.tilt().unwrap());
}

#[test]
fn test_engine_data_rates() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(Bank::EmbeddedFunction, 0x5E, 0x03);

    driver.set_sflp_data_rate(SflpDataRate::Hz480).unwrap();
    driver.set_fsm_data_rate(FsmDataRate::Hz960).unwrap();
    driver.set_mlc_data_rate(MlcDataRate::Hz240).unwrap();

    // Reserved bits of SFLP_ODR preserved
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, 0x5E), 0x2B);
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, 0x5F), 0x30);
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, 0x60), 0x40);

    assert_eq!(driver.sflp_data_rate().unwrap(), SflpDataRate::Hz480);
    assert_eq!(driver.fsm_data_rate().unwrap(), FsmDataRate::Hz960);
    assert_eq!(driver.mlc_data_rate().unwrap(), MlcDataRate::Hz240);
}

#[test]
fn test_reserved_sflp_rate_reads_as_lowest() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(Bank::EmbeddedFunction, 0x5E, 7 << 3);

    assert_eq!(driver.sflp_data_rate().unwrap(), SflpDataRate::Hz15);
}

#[test]
fn test_sflp_configure() {
    let (mut driver, interface) = create_mock_driver();

    driver.sflp_configure().unwrap();

    assert_eq!(interface.paged_memory(0x0D2, 1), vec![0x50]);
    assert_eq!(interface.current_bank(), Bank::Main);
}

#[test]
fn test_fsm_programs_drive_fsm_enable() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(Bank::EmbeddedFunction, EMB_FUNC_EN_B, 0x10);

    let programs = FsmPrograms::NONE.with(1, true).with(3, true);
    driver.set_fsm_programs(programs).unwrap();

    assert_eq!(interface.get_register(Bank::EmbeddedFunction, 0x46), 0x05);
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, EMB_FUNC_EN_B), 0x11);
    assert_eq!(driver.fsm_programs().unwrap(), programs);

    // Disabling every program stops the FSM, other enables untouched
    driver.set_fsm_programs(FsmPrograms::NONE).unwrap();
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, 0x46), 0x00);
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, EMB_FUNC_EN_B), 0x10);
}

#[test]
fn test_fsm_permission() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_fsm_permission(FsmPermission::WriteCtrlRegs).unwrap();
    assert_eq!(interface.func_cfg_access() & 0x08, 0x08);
    assert_eq!(driver.fsm_permission().unwrap(), FsmPermission::WriteCtrlRegs);

    // Bank switches keep the permission bit
    driver.set_tilt(true).unwrap();
    assert_eq!(interface.func_cfg_access(), 0x08);

    driver.set_fsm_permission(FsmPermission::ProtectCtrlRegs).unwrap();
    assert_eq!(driver.fsm_permission().unwrap(), FsmPermission::ProtectCtrlRegs);
}

#[test]
fn test_fsm_permission_status() {
    let (mut driver, interface) = create_mock_driver();
    assert!(!driver.fsm_permission_status().unwrap());

    interface.set_register(Bank::Main, 0x1A, 0x04);
    assert!(driver.fsm_permission_status().unwrap());
}

#[test]
fn test_fsm_long_counter() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_fsm_long_counter(0x1234).unwrap();

    assert_eq!(interface.get_register(Bank::EmbeddedFunction, 0x48), 0x34);
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, 0x49), 0x12);
    assert_eq!(driver.fsm_long_counter().unwrap(), 0x1234);
}

#[test]
fn test_fsm_and_mlc_outputs() {
    let (mut driver, interface) = create_mock_driver();
    for (offset, value) in (0u8..8).zip([1u8, 2, 3, 4, 5, 6, 7, 8]) {
        interface.set_register(Bank::EmbeddedFunction, 0x4C + offset, value);
    }
    for (offset, value) in (0u8..4).zip([0xA0u8, 0xB0, 0xC0, 0xD0]) {
        interface.set_register(Bank::EmbeddedFunction, 0x70 + offset, value);
    }

    assert_eq!(driver.fsm_outputs().unwrap(), [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(driver.mlc_outputs().unwrap(), [0xA0, 0xB0, 0xC0, 0xD0]);
    assert_eq!(interface.current_bank(), Bank::Main);
}

#[test]
fn test_fsm_paged_parameters() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_fsm_long_counter_timeout(0x0102).unwrap();
    driver.set_fsm_program_count(3).unwrap();
    driver.set_fsm_start_address(0x0400).unwrap();

    assert_eq!(interface.paged_memory(0x17A, 2), vec![0x02, 0x01]);
    assert_eq!(interface.paged_memory(0x17C, 1), vec![3]);
    assert_eq!(interface.paged_memory(0x17E, 2), vec![0x00, 0x04]);

    assert_eq!(driver.fsm_long_counter_timeout().unwrap(), 0x0102);
    assert_eq!(driver.fsm_program_count().unwrap(), 3);
    assert_eq!(driver.fsm_start_address().unwrap(), 0x0400);
}

#[test]
fn test_bio_sensitivity_stored_as_half() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_fsm_bio_sensitivity(0.5).unwrap();
    driver.set_mlc_bio_sensitivity(-2.0).unwrap();

    assert_eq!(interface.paged_memory(0x0BA, 2), vec![0x00, 0x38]);
    assert_eq!(interface.paged_memory(0x1E8, 2), vec![0x00, 0xC0]);
    assert_float_eq(driver.fsm_bio_sensitivity().unwrap(), 0.5, 1e-6);
    assert_float_eq(driver.mlc_bio_sensitivity().unwrap(), -2.0, 1e-6);

    // Values between binary16 steps are rounded
    driver.set_fsm_bio_sensitivity(0.1).unwrap();
    assert_float_eq(driver.fsm_bio_sensitivity().unwrap(), 0.1, 1e-4);
}

#[test]
fn test_mlc_mode() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_mlc_mode(MlcMode::OnBeforeFsm).unwrap();
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, EMB_FUNC_EN_A), 0x80);
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, EMB_FUNC_EN_B), 0x00);
    assert_eq!(driver.mlc_mode().unwrap(), MlcMode::OnBeforeFsm);

    driver.set_mlc_mode(MlcMode::On).unwrap();
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, EMB_FUNC_EN_A), 0x00);
    assert_eq!(interface.get_register(Bank::EmbeddedFunction, EMB_FUNC_EN_B), 0x10);
    assert_eq!(driver.mlc_mode().unwrap(), MlcMode::On);

    driver.set_mlc_mode(MlcMode::Off).unwrap();
    assert_eq!(driver.mlc_mode().unwrap(), MlcMode::Off);
}
