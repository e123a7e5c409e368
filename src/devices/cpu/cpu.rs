//! Interpreter for the MOS 6502.
//!
//! Binary Coded Decimal is not implemented: ADC/SBC always perform binary
//! arithmetic, regardless of the decimal flag.

use std::io::{self, Write};
use std::num::Wrapping;

use super::super::bus::Motherboard;
use super::{
    structs::{AddressingMode, CpuState, Instruction, Status, POWERON_CPU_STATE},
    utils,
};
use crate::interrupts::InterruptLines;
use crate::{bus, bytes_to_addr, reg};

macro_rules! op_fn {
    ($mnemonic: ident, $mb: ident, $body: expr) => {
        fn $mnemonic<T: WithCpu + Motherboard>($mb: &mut T) {
            $body
        }
    };
}

pub struct Cpu6502 {
    pub state: CpuState,
    /// Set once an undocumented opcode is decoded; the fetch loop halts
    /// when this is true and does not clear it.
    pub illegal: bool,
    /// Set externally (e.g. by [`crate::machine::Machine::stop`]) to stop
    /// the fetch loop at the next instruction boundary.
    pub shutdown: bool,
}

impl Cpu6502 {
    /// Create a new CPU in its power-on state. Call [`reset`] (or rely on
    /// the RES line being asserted at power-on) before executing.
    pub fn new() -> Cpu6502 {
        Cpu6502 {
            state: POWERON_CPU_STATE,
            illegal: false,
            shutdown: false,
        }
    }
}

impl Default for Cpu6502 {
    fn default() -> Cpu6502 {
        Cpu6502::new()
    }
}

/// Trait for a device that owns a CPU, such as the motherboard or a test harness
pub trait WithCpu {
    fn cpu(&self) -> &Cpu6502;
    fn cpu_mut(&mut self) -> &mut Cpu6502;
    fn interrupts(&self) -> &InterruptLines;
}

/// Run the fetch/decode/execute loop until the CPU halts (illegal opcode)
/// or shutdown is requested.
pub fn run<T: WithCpu + Motherboard>(mb: &mut T) {
    while !mb.cpu().illegal && !mb.cpu().shutdown {
        exec(mb);
    }
}

/// Execute exactly one instruction, first servicing any pending interrupt.
pub fn exec<T: WithCpu + Motherboard>(mb: &mut T) {
    if service_interrupts(mb) {
        return;
    }
    let instruction = fetch_opcode(mb);
    decode_opcode(mb, instruction);
    if mb.cpu().illegal {
        log::warn!(
            "illegal opcode {:02X} at PC {:04X}; halting",
            instruction.to_le_bytes()[0],
            reg!(get pc, mb).wrapping_sub(1)
        );
        return;
    }
    mb.cpu_mut().state.addr = get_addr(mb, instruction);
    mb.cpu_mut().state.tot_cycles = mb.cpu().state.tot_cycles.wrapping_add(1);
    exec_instr(mb);
}

/// Execute one instruction and return the disassembly line produced before
/// execution, in the style of [`utils::print_debug`].
pub fn debug<T: WithCpu + Motherboard>(mb: &mut T) -> String {
    let old_pc = reg!(get pc, mb);
    service_interrupts(mb);
    let instruction = fetch_opcode(mb);
    decode_opcode(mb, instruction);
    mb.cpu_mut().state.addr = get_addr(mb, instruction);
    let new_pc = reg!(get pc, mb);
    reg!(set pc, mb, old_pc);
    let debug_str = utils::print_debug(mb);
    reg!(set pc, mb, new_pc);
    exec_instr(mb);
    debug_str
}

/// Render the current register file in the same line format as
/// [`utils::print_debug`], for post-mortem inspection after a halt.
pub fn dump_state<T: WithCpu + Motherboard>(mb: &T, sink: &mut impl Write) -> io::Result<()> {
    writeln!(sink, "{}", utils::print_debug(mb))?;
    if mb.cpu().illegal {
        writeln!(sink, "halted: illegal opcode")?;
    }
    Ok(())
}

/// Triggers a hardware reset of the CPU.
pub fn reset<T: WithCpu + Motherboard>(mb: &mut T) {
    let fst = bus!(read mb, 0xFFFC);
    let snd = bus!(read mb, 0xFFFD);
    let cpu = mb.cpu_mut();
    cpu.state.acc = 0;
    cpu.state.x = 0;
    cpu.state.y = 0;
    cpu.state.stack = 0xFF;
    cpu.state.status = Status::UNUSED;
    cpu.illegal = false;
    cpu.state.pc = bytes_to_addr!(fst, snd);
}

fn set_flag<T: WithCpu>(mb: &mut T, flag: Status) {
    mb.cpu_mut().state.status |= flag;
}

fn clear_flag<T: WithCpu>(mb: &mut T, flag: Status) {
    mb.cpu_mut().state.status &= !flag;
}

fn adv_pc<T: WithCpu>(mb: &mut T, increment: u16) {
    reg!(add pc, mb, increment);
}

/// Service RES, then NMI, then IRQ, in priority order. Returns true if any
/// interrupt was serviced (in which case no instruction is fetched this cycle).
fn service_interrupts<T: WithCpu + Motherboard>(mb: &mut T) -> bool {
    if mb.interrupts().take_res() {
        log::debug!("servicing RES");
        reset(mb);
        return true;
    }
    if mb.interrupts().take_nmi() {
        log::debug!("servicing NMI");
        enter_interrupt(mb, 0xFFFA);
        return true;
    }
    if mb.interrupts().take_irq() {
        if reg!(get status, mb).contains(Status::IRQ_DISABLE) {
            // Re-assert: the line is edge-triggered here, but a masked IRQ
            // must be retried once I is cleared, not dropped.
            mb.interrupts().assert_irq();
            return false;
        }
        log::debug!("servicing IRQ");
        enter_interrupt(mb, 0xFFFE);
        return true;
    }
    false
}

fn enter_interrupt<T: WithCpu + Motherboard>(mb: &mut T, vector: u16) {
    let addr_bytes = reg!(get pc, mb).to_le_bytes();
    push_stack(mb, addr_bytes[1]);
    push_stack(mb, addr_bytes[0]);
    clear_flag(mb, Status::BREAK);
    set_flag(mb, Status::UNUSED);
    let status = reg!(get status, mb).bits();
    push_stack(mb, status);
    set_flag(mb, Status::IRQ_DISABLE);
    let addr_fst = bus!(read mb, vector);
    let addr_snd = bus!(read mb, vector.wrapping_add(1));
    reg!(set pc, mb, bytes_to_addr!(addr_fst, addr_snd));
}

fn fetch_opcode<T: WithCpu + Motherboard>(mb: &mut T) -> u32 {
    let pc = mb.cpu().state.pc;
    let opcode = bus!(read mb, pc);
    let operand1 = bus!(read mb, pc.wrapping_add(1));
    let operand2 = bus!(read mb, pc.wrapping_add(2));

    u32::from(opcode) | (u32::from(operand1) << 8) | (u32::from(operand2) << 16)
}

fn decode_opcode<T: WithCpu>(mb: &mut T, instruction: u32) {
    let ops = instruction.to_le_bytes();

    let (addr_mode, instr, illegal) = utils::decode_instruction(ops[0]);
    let cpu = mb.cpu_mut();
    cpu.state.instruction = instruction;
    cpu.state.addr_mode = addr_mode;
    cpu.state.instr = instr;
    cpu.illegal = illegal;
}

/// Resolve the effective address (or operand location) for the current
/// instruction's addressing mode, advancing PC by the correct operand width.
fn get_addr<T: WithCpu + Motherboard>(mb: &mut T, instruction: u32) -> u16 {
    let ops = instruction.to_le_bytes();
    adv_pc(mb, 1);

    match mb.cpu().state.addr_mode {
        AddressingMode::Abs => {
            adv_pc(mb, 2);
            bytes_to_addr!(ops[1], ops[2])
        }
        AddressingMode::AbsInd => {
            let addr_fst = bytes_to_addr!(ops[1], ops[2]);
            let addr_snd = bytes_to_addr!(ops[1].wrapping_add(1), ops[2]);
            adv_pc(mb, 2);
            let fst = bus!(read mb, addr_fst);
            let snd = bus!(read mb, addr_snd);
            bytes_to_addr!(fst, snd)
        }
        AddressingMode::AbsX => {
            let addr = bytes_to_addr!(ops[1], ops[2]).wrapping_add(u16::from(reg!(get x, mb)));
            adv_pc(mb, 2);
            addr
        }
        AddressingMode::AbsY => {
            let addr = bytes_to_addr!(ops[1], ops[2]).wrapping_add(u16::from(reg!(get y, mb)));
            adv_pc(mb, 2);
            addr
        }
        AddressingMode::Accum => 0x0000,
        AddressingMode::Imm => {
            let addr = reg!(get pc, mb);
            adv_pc(mb, 1);
            addr
        }
        AddressingMode::Impl => 0x0000,
        AddressingMode::IndX => {
            adv_pc(mb, 1);
            let ptr = ops[1].wrapping_add(reg!(get x, mb));
            let fst = bus!(read mb, u16::from(ptr));
            let snd = bus!(read mb, u16::from(ptr.wrapping_add(1)));
            bytes_to_addr!(fst, snd)
        }
        AddressingMode::IndY => {
            adv_pc(mb, 1);
            let fst = bus!(read mb, u16::from(ops[1]));
            let snd = bus!(read mb, u16::from(ops[1].wrapping_add(1)));
            bytes_to_addr!(fst, snd).wrapping_add(u16::from(reg!(get y, mb)))
        }
        AddressingMode::Rel => {
            adv_pc(mb, 1);
            let base = reg!(get pc, mb);
            base.wrapping_add((ops[1] as i8) as u16)
        }
        AddressingMode::ZP => {
            adv_pc(mb, 1);
            bytes_to_addr!(ops[1], 0u8)
        }
        AddressingMode::ZPX => {
            adv_pc(mb, 1);
            bytes_to_addr!(ops[1].wrapping_add(reg!(get x, mb)), 0u8)
        }
        AddressingMode::ZPY => {
            adv_pc(mb, 1);
            bytes_to_addr!(ops[1].wrapping_add(reg!(get y, mb)), 0u8)
        }
    }
}

/// Read the data at the resolved address, or the immediate operand, or the accumulator.
fn read<T: WithCpu + Motherboard>(mb: &mut T) -> u8 {
    let ops = reg!(get instruction, mb).to_le_bytes();
    match reg!(get addr_mode, mb) {
        AddressingMode::Imm => ops[1],
        AddressingMode::Accum => reg!(get acc, mb),
        _ => bus!(read mb, reg!(get addr, mb)),
    }
}

/// Write the data to the resolved address, or the accumulator for accumulator mode.
fn write<T: WithCpu + Motherboard>(mb: &mut T, data: u8) {
    match reg!(get addr_mode, mb) {
        AddressingMode::Accum => reg!(set acc, mb, data),
        _ => mb.write(reg!(get addr, mb), data),
    }
}

fn push_stack<T: WithCpu + Motherboard>(mb: &mut T, data: u8) {
    let addr = bytes_to_addr!(reg!(get stack, mb), 0x01u8);
    bus!(write mb, addr, data);
    reg!(sub stack, mb, 1);
}

fn pop_stack<T: WithCpu + Motherboard>(mb: &mut T) -> u8 {
    reg!(add stack, mb, 1);
    let addr = bytes_to_addr!(reg!(get stack, mb), 0x01u8);
    bus!(read mb, addr)
}

fn check_carry<T: WithCpu>(mb: &mut T, val: u16) {
    mb.cpu_mut().state.status.set(Status::CARRY, val & 0x100 == 0x100);
}

fn check_zero<T: WithCpu>(mb: &mut T, val: u8) {
    mb.cpu_mut().state.status.set(Status::ZERO, val == 0);
}

/// Set V from the actual operands and the actual (carry-inclusive) result,
/// not a fresh two-operand sum: V depends on the final stored result, which
/// for ADC/SBC already has the incoming carry/borrow folded in.
fn check_overflow<T: WithCpu>(mb: &mut T, left: u8, right: u8, result: u8) {
    let overflow = !(left ^ right) & (left ^ result) & 0x80 != 0;
    mb.cpu_mut().state.status.set(Status::OVERFLOW, overflow);
}

fn check_negative<T: WithCpu>(mb: &mut T, op: u8) {
    mb.cpu_mut().state.status.set(Status::NEGATIVE, op & 0x80 != 0);
}

fn exec_instr<T: WithCpu + Motherboard>(mb: &mut T) {
    let handler = match_handler(reg!(get instr, mb));
    handler(mb);
}

type OpcodeHandler<T> = fn(mb: &mut T);

fn match_handler<T: WithCpu + Motherboard>(mnemonic: Instruction) -> OpcodeHandler<T> {
    match mnemonic {
        Instruction::ADC => op_adc,
        Instruction::AND => op_and,
        Instruction::ASL => op_asl,
        Instruction::BIT => op_bit,
        Instruction::BPL => op_bpl,
        Instruction::BMI => op_bmi,
        Instruction::BVC => op_bvc,
        Instruction::BVS => op_bvs,
        Instruction::BCC => op_bcc,
        Instruction::BCS => op_bcs,
        Instruction::BNE => op_bne,
        Instruction::BEQ => op_beq,
        Instruction::BRK => op_brk,
        Instruction::CMP => op_cmp,
        Instruction::CPX => op_cpx,
        Instruction::CPY => op_cpy,
        Instruction::DEC => op_dec,
        Instruction::EOR => op_eor,
        Instruction::CLC => op_clc,
        Instruction::SEC => op_sec,
        Instruction::CLI => op_cli,
        Instruction::SEI => op_sei,
        Instruction::CLV => op_clv,
        Instruction::CLD => op_cld,
        Instruction::SED => op_sed,
        Instruction::INC => op_inc,
        Instruction::JMP => op_jmp,
        Instruction::JSR => op_jsr,
        Instruction::LDA => op_lda,
        Instruction::LDX => op_ldx,
        Instruction::LDY => op_ldy,
        Instruction::LSR => op_lsr,
        Instruction::NOP => op_nop,
        Instruction::ORA => op_ora,
        Instruction::TAX => op_tax,
        Instruction::TXA => op_txa,
        Instruction::DEX => op_dex,
        Instruction::INX => op_inx,
        Instruction::TAY => op_tay,
        Instruction::TYA => op_tya,
        Instruction::DEY => op_dey,
        Instruction::INY => op_iny,
        Instruction::ROL => op_rol,
        Instruction::ROR => op_ror,
        Instruction::RTI => op_rti,
        Instruction::RTS => op_rts,
        Instruction::SBC => op_sbc,
        Instruction::STA => op_sta,
        Instruction::STX => op_stx,
        Instruction::STY => op_sty,
        Instruction::TXS => op_txs,
        Instruction::TSX => op_tsx,
        Instruction::PHA => op_pha,
        Instruction::PLA => op_pla,
        Instruction::PHP => op_php,
        Instruction::PLP => op_plp,
        Instruction::WAI => op_wai,
    }
}

//region Arithmetic ops
op_fn!(op_adc, mb, {
    if reg!(get status, mb).contains(Status::DECIMAL) {
        log::warn!("ADC executed with the decimal flag set; BCD is not implemented");
    }
    let op = read(mb);
    let acc = reg!(get acc, mb);
    let val = Wrapping(u16::from(acc))
        + Wrapping(u16::from(op))
        + Wrapping(if reg!(get status, mb).contains(Status::CARRY) {
            1
        } else {
            0
        });
    check_carry(mb, val.0);
    let result = (0xFF & val.0) as u8;
    check_overflow(mb, acc, op, result);
    reg!(set acc, mb, result);
    check_zero(mb, reg!(get acc, mb));
    check_negative(mb, reg!(get acc, mb));
});
op_fn!(op_sbc, mb, {
    if reg!(get status, mb).contains(Status::DECIMAL) {
        log::warn!("SBC executed with the decimal flag set; BCD is not implemented");
    }
    let op = read(mb);
    let acc = reg!(get acc, mb);
    let val = Wrapping(u16::from(acc))
        - Wrapping(u16::from(op))
        - Wrapping(if !reg!(get status, mb).contains(Status::CARRY) {
            1
        } else {
            0
        });
    check_carry(mb, !val.0);
    let result = (0xFF & val.0) as u8;
    check_overflow(mb, acc, !op, result);
    reg!(set acc, mb, result);
    check_zero(mb, reg!(get acc, mb));
    check_negative(mb, reg!(get acc, mb));
});
//endregion

//region Bitwise ops
op_fn!(op_and, mb, {
    mb.cpu_mut().state.acc &= read(mb);
    check_zero(mb, reg!(get acc, mb));
    check_negative(mb, reg!(get acc, mb));
});
op_fn!(op_bit, mb, {
    let op = read(mb);
    let res = reg!(get acc, mb) & op;
    check_zero(mb, res);
    reg!(
        set status,
        mb,
        Status::from_bits_truncate((reg!(get status, mb).bits() & 0x3F) | (0xC0 & op))
    );
});
op_fn!(op_eor, mb, {
    mb.cpu_mut().state.acc ^= read(mb);
    check_zero(mb, reg!(get acc, mb));
    check_negative(mb, reg!(get acc, mb));
});
op_fn!(op_ora, mb, {
    mb.cpu_mut().state.acc |= read(mb);
    check_zero(mb, reg!(get acc, mb));
    check_negative(mb, reg!(get acc, mb));
});
//endregion
op_fn!(op_asl, mb, {
    let op = read(mb);
    let res = u16::from(op) << 1;
    check_carry(mb, res);
    let res = (0xFF & res) as u8;
    check_zero(mb, res);
    check_negative(mb, res);
    write(mb, res);
});

//region Branch instructions
op_fn!(op_bpl, mb, {
    if reg!(get status, mb).contains(Status::NEGATIVE) {
        return;
    }
    reg!(set pc, mb, reg!(get addr, mb));
});
op_fn!(op_bmi, mb, {
    if !reg!(get status, mb).contains(Status::NEGATIVE) {
        return;
    }
    reg!(set pc, mb, reg!(get addr, mb));
});
op_fn!(op_bvc, mb, {
    if reg!(get status, mb).contains(Status::OVERFLOW) {
        return;
    }
    reg!(set pc, mb, reg!(get addr, mb));
});
op_fn!(op_bvs, mb, {
    if !reg!(get status, mb).contains(Status::OVERFLOW) {
        return;
    }
    reg!(set pc, mb, reg!(get addr, mb));
});
op_fn!(op_bcc, mb, {
    if reg!(get status, mb).contains(Status::CARRY) {
        return;
    }
    reg!(set pc, mb, reg!(get addr, mb));
});
op_fn!(op_bcs, mb, {
    if !reg!(get status, mb).contains(Status::CARRY) {
        return;
    }
    reg!(set pc, mb, reg!(get addr, mb));
});
op_fn!(op_beq, mb, {
    if !reg!(get status, mb).contains(Status::ZERO) {
        return;
    }
    reg!(set pc, mb, reg!(get addr, mb));
});
op_fn!(op_bne, mb, {
    if reg!(get status, mb).contains(Status::ZERO) {
        return;
    }
    reg!(set pc, mb, reg!(get addr, mb));
});
//endregion
op_fn!(op_brk, mb, {
    // BRK skips a padding/signature byte after the opcode: push PC + 1, not PC.
    let addr_bytes = reg!(get pc, mb).wrapping_add(1).to_le_bytes();
    push_stack(mb, addr_bytes[1]);
    push_stack(mb, addr_bytes[0]);
    set_flag(mb, Status::BREAK);
    set_flag(mb, Status::UNUSED);
    let status = reg!(get status, mb).bits();
    push_stack(mb, status);
    set_flag(mb, Status::IRQ_DISABLE);
    let addr_fst = bus!(read mb, 0xFFFE);
    let addr_snd = bus!(read mb, 0xFFFF);
    reg!(set pc, mb, bytes_to_addr!(addr_fst, addr_snd));
});

//region Compare functions
op_fn!(op_cmp, mb, {
    let data = read(mb);
    let res = Wrapping(reg!(get acc, mb)) - Wrapping(data);
    let acc = reg!(get acc, mb);
    mb.cpu_mut().state.status.set(Status::CARRY, acc >= data);
    check_zero(mb, res.0);
    check_negative(mb, res.0);
});
op_fn!(op_cpx, mb, {
    let data = read(mb);
    let res = Wrapping(reg!(get x, mb)) - Wrapping(data);
    let x = reg!(get x, mb);
    mb.cpu_mut().state.status.set(Status::CARRY, x >= data);
    check_zero(mb, res.0);
    check_negative(mb, res.0);
});
op_fn!(op_cpy, mb, {
    let data = read(mb);
    let res = Wrapping(reg!(get y, mb)) - Wrapping(data);
    let y = reg!(get y, mb);
    mb.cpu_mut().state.status.set(Status::CARRY, y >= data);
    check_zero(mb, res.0);
    check_negative(mb, res.0);
});
// endregion

//region Memory functions
op_fn!(op_dec, mb, {
    let op = (Wrapping(read(mb)) - Wrapping(1)).0;
    write(mb, op);
    check_zero(mb, op);
    check_negative(mb, op);
});
op_fn!(op_inc, mb, {
    let op = (Wrapping(read(mb)) + Wrapping(1)).0;
    write(mb, op);
    check_zero(mb, op);
    check_negative(mb, op);
});
op_fn!(op_lsr, mb, {
    let data = u16::from(read(mb)) << 7;
    mb.cpu_mut()
        .state
        .status
        .set(Status::CARRY, data & 0x00_80 == 0x00_80);
    let data = data.to_be_bytes()[0];
    check_zero(mb, data);
    check_negative(mb, data);
    write(mb, data);
});
op_fn!(op_ror, mb, {
    let data = u16::from(read(mb)) << 7
        | if reg!(get status, mb).contains(Status::CARRY) {
            0x80_00
        } else {
            0x0
        };
    mb.cpu_mut()
        .state
        .status
        .set(Status::CARRY, data & 0x00_80 == 0x00_80);
    let data = data.to_be_bytes()[0];
    check_zero(mb, data);
    check_negative(mb, data);
    write(mb, data);
});
op_fn!(op_rol, mb, {
    let data = (u16::from(read(mb)) << 1)
        | if reg!(get status, mb).contains(Status::CARRY) {
            0x01
        } else {
            0x00
        };
    mb.cpu_mut()
        .state
        .status
        .set(Status::CARRY, data & 0x01_00 == 0x01_00);
    let data: u8 = (data & 0xFF) as u8;
    check_zero(mb, data);
    check_negative(mb, data);
    write(mb, data);
});
//endregion

//region Flag operations
op_fn!(op_clc, mb, clear_flag(mb, Status::CARRY));
op_fn!(op_sec, mb, set_flag(mb, Status::CARRY));
op_fn!(op_cli, mb, clear_flag(mb, Status::IRQ_DISABLE));
op_fn!(op_sei, mb, set_flag(mb, Status::IRQ_DISABLE));
op_fn!(op_clv, mb, clear_flag(mb, Status::OVERFLOW));
op_fn!(op_cld, mb, clear_flag(mb, Status::DECIMAL));
op_fn!(op_sed, mb, set_flag(mb, Status::DECIMAL));
//endregion

//region Jumps
op_fn!(op_jmp, mb, {
    reg!(set pc, mb, reg!(get addr, mb));
});
op_fn!(op_jsr, mb, {
    let addr_bytes = (reg!(get pc, mb).wrapping_sub(1)).to_le_bytes();
    push_stack(mb, addr_bytes[1]);
    push_stack(mb, addr_bytes[0]);
    reg!(set pc, mb, reg!(get addr, mb));
});
op_fn!(op_rti, mb, {
    let flags = pop_stack(mb);
    reg!(
        set status,
        mb,
        (Status::from_bits_truncate(flags) & !Status::BREAK) | Status::UNUSED
    );
    let fst = pop_stack(mb);
    let snd = pop_stack(mb);
    reg!(set pc, mb, bytes_to_addr!(fst, snd));
});
op_fn!(op_rts, mb, {
    let fst = pop_stack(mb);
    let snd = pop_stack(mb);
    reg!(set pc, mb, bytes_to_addr!(fst, snd).wrapping_add(1));
});
//endregion

//region Loads
op_fn!(op_lda, mb, {
    reg!(set acc, mb, read(mb));
    check_zero(mb, reg!(get acc, mb));
    check_negative(mb, reg!(get acc, mb));
});
op_fn!(op_ldx, mb, {
    reg!(set x, mb, read(mb));
    check_zero(mb, reg!(get x, mb));
    check_negative(mb, reg!(get x, mb));
});
op_fn!(op_ldy, mb, {
    reg!(set y, mb, read(mb));
    check_zero(mb, reg!(get y, mb));
    check_negative(mb, reg!(get y, mb));
});
//endregion
op_fn!(op_nop, _mb, {});
op_fn!(op_wai, _mb, {
    // Placeholder: a real front-end could park the CPU thread here; the
    // fetch loop already polls interrupts at the next instruction boundary.
});

//region Register instructions
op_fn!(op_tax, mb, {
    reg!(set x, mb, reg!(get acc, mb));
    check_zero(mb, reg!(get x, mb));
    check_negative(mb, reg!(get x, mb));
});
op_fn!(op_txa, mb, {
    reg!(set acc, mb, reg!(get x, mb));
    check_zero(mb, reg!(get acc, mb));
    check_negative(mb, reg!(get acc, mb));
});
op_fn!(op_tay, mb, {
    reg!(set y, mb, reg!(get acc, mb));
    check_zero(mb, reg!(get y, mb));
    check_negative(mb, reg!(get y, mb));
});
op_fn!(op_tya, mb, {
    reg!(set acc, mb, reg!(get y, mb));
    check_zero(mb, reg!(get acc, mb));
    check_negative(mb, reg!(get acc, mb));
});
op_fn!(op_inx, mb, {
    reg!(set x, mb, (Wrapping(reg!(get x, mb)) + Wrapping(1)).0);
    check_zero(mb, reg!(get x, mb));
    check_negative(mb, reg!(get x, mb));
});
op_fn!(op_dex, mb, {
    reg!(set x, mb, (Wrapping(reg!(get x, mb)) - Wrapping(1)).0);
    check_zero(mb, reg!(get x, mb));
    check_negative(mb, reg!(get x, mb));
});
op_fn!(op_iny, mb, {
    reg!(set y, mb, (Wrapping(reg!(get y, mb)) + Wrapping(1)).0);
    check_zero(mb, reg!(get y, mb));
    check_negative(mb, reg!(get y, mb));
});
op_fn!(op_dey, mb, {
    reg!(set y, mb, (Wrapping(reg!(get y, mb)) - Wrapping(1)).0);
    check_zero(mb, reg!(get y, mb));
    check_negative(mb, reg!(get y, mb));
});
//endregion

//region Storage instruction
op_fn!(op_sta, mb, {
    write(mb, reg!(get acc, mb));
});
op_fn!(op_stx, mb, {
    write(mb, reg!(get x, mb));
});
op_fn!(op_sty, mb, {
    write(mb, reg!(get y, mb));
});
//endregion

//region Stack instructions
op_fn!(op_txs, mb, {
    reg!(set stack, mb, reg!(get x, mb));
});
op_fn!(op_tsx, mb, {
    reg!(set x, mb, reg!(get stack, mb));
    check_zero(mb, reg!(get x, mb));
    check_negative(mb, reg!(get x, mb));
});
op_fn!(op_pha, mb, {
    push_stack(mb, reg!(get acc, mb));
});
op_fn!(op_pla, mb, {
    reg!(set acc, mb, pop_stack(mb));
    check_zero(mb, reg!(get acc, mb));
    check_negative(mb, reg!(get acc, mb));
});
op_fn!(op_php, mb, {
    push_stack(mb, reg!(get status, mb).bits() | 0x30)
});
op_fn!(op_plp, mb, {
    reg!(
        set status,
        mb,
        Status::from_bits_truncate((pop_stack(mb) & 0xEF) | 0x20)
    );
});
//endregion
