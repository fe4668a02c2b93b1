//! AC100 - Assembler and Emulator for a 16-bit Microcomputer
//!
//! This library implements the full toolchain for the AC100, a fictitious
//! 16-bit register machine: a two-pass assembler that translates the
//! mnemonic source language into a bit-exact bytecode image, and an
//! emulator that executes that image.
//!
//! # Architecture
//!
//! - 16 general-purpose 16-bit registers, `R1`..`R16`
//! - 64 KiB byte-addressed RAM; words are big-endian everywhere
//! - fixed memory map: 512-byte stack at the bottom, code from `0x0200`,
//!   VRAM at the top (size set by the video configuration)
//! - four status flags: carry, zero, overflow, negative
//! - every instruction is exactly four bytes, 4-byte aligned
//!
//! # Quick Start
//!
//! ```rust
//! use ac100::{assemble_source, Machine, RunOutcome};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytecode = assemble_source("LDI R1 42\nHALT\n")?;
//!
//!     let mut machine = Machine::new();
//!     machine.load_ram(&bytecode);
//!     assert_eq!(machine.run()?, RunOutcome::Halted);
//!     assert_eq!(machine.reg(0), 42);
//!     Ok(())
//! }
//! ```
//!
//! # Source Language
//!
//! One statement per line. Comment lines start with `;`; a label is an
//! identifier followed by `:` on its own line. Register operands are
//! `R1`..`R16`; memory operands are `0x`-prefixed 16-bit addresses or the
//! register-indirect form `[Rn]`; immediates may be decimal, `0x` hex, or
//! `0b` binary.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]

pub mod arch;
pub mod asm;
pub mod emu;
pub mod error;
pub mod isa;

pub use asm::symbols::SymbolTable;
pub use asm::Assembler;
pub use emu::flags::Flags;
pub use emu::video::VideoLayout;
pub use emu::{Machine, RunOutcome, Snapshot};
pub use error::{AsmError, ConfigError, MachineError};
pub use isa::Opcode;

use std::path::Path;

/// Assemble a source string into its bytecode image.
///
/// This is the primary entry point for in-memory assembly. The returned
/// image's length is always a multiple of 4 and is intended to be loaded
/// at `CODE_START`.
///
/// # Errors
///
/// Returns the first [`AsmError`] encountered; no output is produced for
/// a source unit with any error.
pub fn assemble_source(source: &str) -> Result<Vec<u8>, AsmError> {
    Assembler::new().assemble(source)
}

/// Assemble a source file into its bytecode image.
///
/// Reads the file and delegates to [`assemble_source`].
///
/// # Errors
///
/// Returns [`AsmError::Io`] if the file cannot be read, or the first
/// assembly error otherwise.
pub fn assemble_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, AsmError> {
    let source = std::fs::read_to_string(path)?;
    assemble_source(&source)
}

/// Get version information for this library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
