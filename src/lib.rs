#[macro_use]
extern crate bitflags;

pub mod config;
pub mod devices;
pub mod error;
pub mod interrupts;
pub mod io;
pub mod machine;

pub use error::EmulatorError;
pub use machine::Machine;
