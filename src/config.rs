//! Compile-time layout constants for the address space and the I/O register file.

/// Start of RAM.
pub const RAM_START: u16 = 0x0000;
/// Start of the I/O region (exclusive end of RAM).
pub const IO_START: u16 = 0x4000;
/// Start of ROM (exclusive end of the I/O region).
pub const ROM_START: u16 = 0x4920;

pub const RAM_SIZE: usize = (IO_START - RAM_START) as usize;
pub const IO_SIZE: usize = (ROM_START - IO_START) as usize;
pub const ROM_SIZE: usize = 0x10000 - ROM_START as usize;

/// Interrupt vectors, as absolute 16-bit addresses.
pub const VEC_NMI: u16 = 0xFFFA;
pub const VEC_RES: u16 = 0xFFFC;
pub const VEC_IRQ: u16 = 0xFFFE;

pub mod io {
    //! Offsets of I/O registers, relative to [`super::IO_START`].

    pub const VRAM: u16 = 0x000;
    pub const VRAM_SIZE: usize = 0x900;

    pub const CONTROL: u16 = 0x900;
    pub const BG_COLOR: u16 = 0x901;
    pub const FG_COLOR: u16 = 0x902;
    pub const EVENT_TYPE: u16 = 0x903;
    pub const EVENT_PAYLOAD_0: u16 = 0x904;
    pub const EVENT_PAYLOAD_1: u16 = 0x905;

    pub const CLOCK1: u16 = 0x906;
    pub const CLOCK2: u16 = 0x907;

    pub const AUDIO1: u16 = 0x908;
    pub const AUDIO2: u16 = 0x909;
    pub const AUDIO3: u16 = 0x90A;

    pub const DRAW_METHOD: u16 = 0x90B;
    pub const DRAW_ARG1: u16 = 0x90C;
    pub const DRAW_ARG2: u16 = 0x90D;
    pub const DRAW_ARG3: u16 = 0x90E;
    pub const DRAW_ARG4: u16 = 0x90F;

    pub const TIMER1_LO: u16 = 0x910;
    pub const TIMER1_HI: u16 = 0x911;
    pub const TIMER2_LO: u16 = 0x912;
    pub const TIMER2_HI: u16 = 0x913;

    pub const COUNTER1: u16 = 0x914;
    pub const COUNTER2: u16 = 0x915;

    /// Size of the backing register file (VRAM plus all scalar registers).
    pub const REGISTER_FILE_SIZE: usize = (COUNTER2 + 1) as usize;
}

pub mod event {
    //! Codes written to [`io::EVENT_TYPE`].
    pub const NONE: u8 = 0x00;
    pub const KEYDOWN: u8 = 0x01;
    pub const KEYUP: u8 = 0x02;
    pub const MOUSEMOVE: u8 = 0x03;
    pub const MOUSEDOWN: u8 = 0x04;
    pub const MOUSEUP: u8 = 0x05;
    pub const CLOCK1: u8 = 0x06;
    pub const CLOCK2: u8 = 0x07;
    pub const TIMER1: u8 = 0x08;
    pub const TIMER2: u8 = 0x09;
    pub const COUNTER1: u8 = 0x0A;
    pub const COUNTER2: u8 = 0x0B;
}

pub mod draw {
    //! Codes written to [`io::DRAW_METHOD`].
    pub const RECTANGLE: u8 = 0x00;
    pub const SQUARE: u8 = 0x01;
    pub const DOT: u8 = 0x02;
    pub const LINE: u8 = 0x03;
    pub const BRUSH_BODY: u8 = 0x80;
    pub const BRUSH_OUTLINE: u8 = 0x81;
}

pub mod control {
    //! Bit positions within the CONTROL register (0x900).
    pub const TEXT_MODE: u8 = 1 << 7;
    pub const HIDDEN: u8 = 1 << 6;
    pub const FULLSCREEN: u8 = 1 << 5;
    pub const PORTRAIT: u8 = 1 << 4;
    pub const KEYBOARD_DISABLED: u8 = 1 << 3;
    pub const MOUSE_DISABLED: u8 = 1 << 2;
}

/// Clock pulse granularity.
pub const CLOCK_UNIT_MS: u64 = 5;
/// Timer one-shot granularity.
pub const TIMER_UNIT_MS: u64 = 10;
/// Counter tick period.
pub const COUNTER_PERIOD_MS: u64 = 1000;
/// Idle poll interval used by a clock/counter task while its register is zero.
pub const IDLE_POLL_MS: u64 = 500;
/// Renderer presentation interval.
pub const RENDER_INTERVAL_MS: u64 = 16;
