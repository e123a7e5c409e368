//! Crate-boundary error type.
//!
//! Execution faults such as an illegal opcode are not represented here: per
//! the CPU's halt contract they surface as observable state
//! ([`crate::devices::cpu::Cpu6502::illegal`]), not as a `Result`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("ROM image of {size} bytes does not fit in the {capacity}-byte ROM region")]
    RomTooLarge { size: usize, capacity: usize },

    #[error("host backend reported a failure during shutdown: {0}")]
    HostFailure(String),
}
