//! Shared harness for building a machine from a sparse ROM image.

use mos6502_emu::config;
use mos6502_emu::Machine;

/// Build a machine whose ROM region holds the given (address, byte) pairs,
/// with every other ROM byte zeroed.
pub fn with_rom(bytes: &[(u16, u8)]) -> Machine {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut machine = Machine::new();
    let mut rom_image = vec![0u8; config::ROM_SIZE];
    for &(addr, value) in bytes {
        rom_image[(addr - config::ROM_START) as usize] = value;
    }
    machine.load_rom(&rom_image).unwrap();
    machine
}
