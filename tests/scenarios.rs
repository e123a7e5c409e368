//! End-to-end scenarios exercising the CPU, bus and I/O controller together
//! through the public `Machine` API.

mod util;

use std::time::{Duration, Instant};

use mos6502_emu::config;
use mos6502_emu::devices::bus::Motherboard;
use mos6502_emu::devices::cpu::{Status, WithCpu};
use util::with_rom;

#[test]
fn reset_and_immediate_load() {
    let mut machine = with_rom(&[
        (0x4920, 0xA9),
        (0x4921, 0x2A),
        (0x4922, 0x00),
        (0xFFFC, 0x20),
        (0xFFFD, 0x49),
        (0xFFFE, 0x00),
        (0xFFFF, 0x00),
    ]);
    machine.step(); // RES
    machine.step(); // LDA #$2A
    assert_eq!(machine.cpu().state.acc, 0x2A);
    assert!(!machine.cpu().state.status.contains(Status::ZERO));
    assert!(!machine.cpu().state.status.contains(Status::NEGATIVE));
    machine.step(); // BRK
    let expected_pc = u16::from(machine.peek(0xFFFE).unwrap())
        | (u16::from(machine.peek(0xFFFF).unwrap()) << 8);
    assert_eq!(machine.cpu().state.pc, expected_pc);
    assert!(machine.cpu().state.status.contains(Status::IRQ_DISABLE));
}

#[test]
fn stack_round_trip() {
    let mut machine = with_rom(&[
        (0x4920, 0xA9),
        (0x4921, 0x7F),
        (0x4922, 0x48),
        (0x4923, 0xA9),
        (0x4924, 0x00),
        (0x4925, 0x68),
        (0xFFFC, 0x20),
        (0xFFFD, 0x49),
    ]);
    for _ in 0..5 {
        machine.step();
    }
    assert_eq!(machine.cpu().state.acc, 0x7F);
    assert!(!machine.cpu().state.status.contains(Status::ZERO));
    assert!(!machine.cpu().state.status.contains(Status::NEGATIVE));
    assert_eq!(machine.cpu().state.stack, 0xFF);
}

#[test]
fn zero_page_indexed_load() {
    let mut machine = with_rom(&[
        (0x4920, 0xA2),
        (0x4921, 0x04),
        (0x4922, 0xB5),
        (0x4923, 0x10),
        (0xFFFC, 0x20),
        (0xFFFD, 0x49),
    ]);
    machine.write(0x0014, 0x99);
    machine.step(); // RES
    machine.step(); // LDX #$04
    machine.step(); // LDA $10,X
    assert_eq!(machine.cpu().state.acc, 0x99);
    assert!(machine.cpu().state.status.contains(Status::NEGATIVE));
    assert!(!machine.cpu().state.status.contains(Status::ZERO));
}

#[test]
fn branch_taken_skips_following_bytes() {
    let mut machine = with_rom(&[
        (0x4920, 0xA9),
        (0x4921, 0x00),
        (0x4922, 0xF0),
        (0x4923, 0x02),
        (0x4924, 0xEA),
        (0x4925, 0xEA),
        (0xFFFC, 0x20),
        (0xFFFD, 0x49),
    ]);
    machine.step(); // RES
    machine.step(); // LDA #$00
    machine.step(); // BEQ +2, taken
    assert_eq!(machine.cpu().state.pc, 0x4926);
}

#[test]
fn branch_not_taken_falls_through() {
    let mut machine = with_rom(&[
        (0x4920, 0xA9),
        (0x4921, 0x01),
        (0x4922, 0xF0),
        (0x4923, 0x02),
        (0x4924, 0xEA),
        (0x4925, 0xEA),
        (0xFFFC, 0x20),
        (0xFFFD, 0x49),
    ]);
    machine.step(); // RES
    machine.step(); // LDA #$01
    machine.step(); // BEQ +2, not taken
    assert_eq!(machine.cpu().state.pc, 0x4924);
}

#[test]
fn irq_is_serviced_and_restored_by_rti() {
    let mut machine = with_rom(&[
        (0x4920, 0xEA),
        (0x4930, 0x40), // RTI
        (0xFFFC, 0x20),
        (0xFFFD, 0x49),
        (0xFFFE, 0x30),
        (0xFFFF, 0x49),
    ]);
    machine.step(); // RES
    machine.step(); // NOP, I still clear
    assert!(!machine.cpu().state.status.contains(Status::IRQ_DISABLE));
    let pc_before = machine.cpu().state.pc;
    machine.interrupts().assert_irq();
    machine.step(); // services IRQ
    assert!(machine.cpu().state.status.contains(Status::IRQ_DISABLE));
    assert_eq!(machine.cpu().state.pc, 0x4930);
    machine.step(); // RTI
    assert!(!machine.cpu().state.status.contains(Status::IRQ_DISABLE));
    assert_eq!(machine.cpu().state.pc, pc_before);
}

#[test]
fn timer_fires_event_and_irq_within_a_tenth_of_a_second() {
    let mut machine = with_rom(&[]);
    machine.io().start(
        Box::new(mos6502_emu::io::host::Headless),
        [
            Box::new(mos6502_emu::io::host::Headless),
            Box::new(mos6502_emu::io::host::Headless),
            Box::new(mos6502_emu::io::host::Headless),
        ],
        Box::new(mos6502_emu::io::host::Headless),
    );

    let timer1_lo = config::IO_START + config::io::TIMER1_LO;
    let timer1_hi = config::IO_START + config::io::TIMER1_HI;
    let event_type = config::IO_START + config::io::EVENT_TYPE;
    machine.write(timer1_hi, 0x00);
    machine.write(timer1_lo, 0x0A); // 10ms * 10 = 100ms

    let deadline = Instant::now() + Duration::from_millis(500);
    while Instant::now() < deadline && !machine.interrupts().irq_pending() {
        std::thread::sleep(Duration::from_millis(5));
    }

    assert!(machine.interrupts().irq_pending());
    assert_eq!(machine.peek(event_type).unwrap(), config::event::TIMER1);

    machine.io().stop().unwrap();
}

#[test]
fn adc_sets_overflow_with_incoming_carry() {
    // A = 0x7F, M = 0x00, carry-in = 1: both operands are positive, but the
    // sum 0x7F + 0x00 + 1 = 0x80 flips sign, so V must be set.
    let mut machine = with_rom(&[
        (0x4920, 0x38), // SEC
        (0x4921, 0xA9), // LDA #$7F
        (0x4922, 0x7F),
        (0x4923, 0x69), // ADC #$00
        (0x4924, 0x00),
        (0xFFFC, 0x20),
        (0xFFFD, 0x49),
    ]);
    machine.step(); // RES
    machine.step(); // SEC
    machine.step(); // LDA #$7F
    machine.step(); // ADC #$00
    assert_eq!(machine.cpu().state.acc, 0x80);
    assert!(machine.cpu().state.status.contains(Status::OVERFLOW));
    assert!(machine.cpu().state.status.contains(Status::NEGATIVE));
    assert!(!machine.cpu().state.status.contains(Status::CARRY));
}

#[test]
fn brk_pushes_pc_plus_one() {
    let mut machine = with_rom(&[
        (0x4920, 0x00), // BRK
        (0xFFFC, 0x20),
        (0xFFFD, 0x49),
        (0xFFFE, 0x00),
        (0xFFFF, 0x50),
    ]);
    machine.step(); // RES
    machine.step(); // BRK
    assert_eq!(machine.cpu().state.stack, 0xFC);

    let pushed_status = machine.peek(0x01FD).unwrap();
    let pushed_pc_lo = machine.peek(0x01FE).unwrap();
    let pushed_pc_hi = machine.peek(0x01FF).unwrap();
    let pushed_pc = u16::from(pushed_pc_lo) | (u16::from(pushed_pc_hi) << 8);

    // opcode at 0x4920; PC is 0x4921 after the opcode fetch, BRK pushes +1 more.
    assert_eq!(pushed_pc, 0x4922);
    assert!(Status::from_bits_truncate(pushed_status).contains(Status::BREAK));
}
