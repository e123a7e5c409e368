//! Top-level wiring of CPU, bus devices and interrupt lines into one motherboard.

use std::io::{self, Write};

use crate::config;
use crate::devices::bus::{address_map, BusDevice, Motherboard};
use crate::devices::cpu::cpu::{self, Cpu6502, WithCpu};
use crate::devices::mem::{Ram, Rom};
use crate::error::EmulatorError;
use crate::interrupts::InterruptLines;
use crate::io::host::{AudioChannel, EventSource, Headless, Renderer};
use crate::io::IoController;

/// A complete machine: CPU, RAM, ROM and the I/O controller, wired to a flat
/// 16-bit address space.
pub struct Machine {
    cpu: Cpu6502,
    ram: Ram,
    rom: Rom,
    io: IoController,
    interrupts: InterruptLines,
}

impl Machine {
    pub fn new() -> Machine {
        let interrupts = InterruptLines::new();
        Machine {
            cpu: Cpu6502::new(),
            ram: Ram::new(config::RAM_SIZE),
            rom: Rom::new(config::ROM_SIZE),
            io: IoController::new(interrupts.clone()),
            interrupts,
        }
    }

    /// Preload the ROM region. Must be called before [`Machine::start`];
    /// RES is already pending at power-on, so the CPU reads its reset vector
    /// out of whatever has been loaded here by the time the fetch loop runs.
    pub fn load_rom(&mut self, image: &[u8]) -> Result<(), EmulatorError> {
        self.rom.load(image)
    }

    /// Spawn the peripheral threads and run the CPU fetch/decode/execute
    /// loop on the calling thread until it halts or [`Machine::stop`] is
    /// called from another thread.
    pub fn start(
        &mut self,
        renderer: Box<dyn Renderer>,
        audio: [Box<dyn AudioChannel>; 3],
        events: Box<dyn EventSource>,
    ) {
        self.io.start(renderer, audio, events);
        cpu::run(self);
    }

    /// Like [`Machine::start`], with no-op host backends. Useful for
    /// headless test harnesses and the `#[test]` scenarios below.
    pub fn start_headless(&mut self) {
        self.start(
            Box::new(Headless),
            [Box::new(Headless), Box::new(Headless), Box::new(Headless)],
            Box::new(Headless),
        );
    }

    /// Stop the CPU fetch loop and join every peripheral thread.
    pub fn stop(&mut self) -> Result<(), EmulatorError> {
        self.cpu.shutdown = true;
        self.io.stop()
    }

    pub fn dump_state(&self, sink: &mut impl Write) -> io::Result<()> {
        cpu::dump_state(self, sink)
    }

    /// Execute a single instruction, servicing interrupts first. Exposed for
    /// host front-ends that want to single-step outside of [`Machine::start`].
    pub fn step(&mut self) {
        cpu::exec(self);
    }

    /// Direct access to the I/O controller, for host front-ends and test
    /// harnesses that want to drive peripherals without running the CPU loop.
    pub fn io(&self) -> &IoController {
        &self.io
    }
}

impl Default for Machine {
    fn default() -> Machine {
        Machine::new()
    }
}

impl WithCpu for Machine {
    fn cpu(&self) -> &Cpu6502 {
        &self.cpu
    }

    fn cpu_mut(&mut self) -> &mut Cpu6502 {
        &mut self.cpu
    }

    fn interrupts(&self) -> &InterruptLines {
        &self.interrupts
    }
}

impl Motherboard for Machine {
    fn read(&mut self, addr: u16) -> u8 {
        match address_map::match_addr(addr) {
            (address_map::Device::Ram, local) => self.ram.read(local, 0),
            (address_map::Device::Io, local) => self.io.read(local, 0),
            (address_map::Device::Rom, local) => self.rom.read(local, 0),
        }
    }

    fn peek(&self, addr: u16) -> Option<u8> {
        match address_map::match_addr(addr) {
            (address_map::Device::Ram, local) => self.ram.peek(local).to_optional(),
            (address_map::Device::Io, local) => self.io.peek(local).to_optional(),
            (address_map::Device::Rom, local) => self.rom.peek(local).to_optional(),
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match address_map::match_addr(addr) {
            (address_map::Device::Ram, local) => self.ram.write(local, data),
            (address_map::Device::Io, local) => self.io.write(local, data),
            (address_map::Device::Rom, local) => self.rom.write(local, data),
        }
    }
}
