//! Error types for the AC100 toolchain.
//!
//! Three taxonomies, matching the three ways the toolchain can fail:
//! [`AsmError`] for anything the assembler rejects, [`MachineError`] for
//! program misbehavior caught by the emulator at runtime, and
//! [`ConfigError`] for invalid video configuration (recovered locally by
//! substituting the default dimensions).

use crate::arch;
use thiserror::Error;

/// Errors raised while assembling a source unit.
///
/// Assembly aborts on the first error and produces no output. Errors
/// surfaced through the two-pass driver are wrapped in [`AsmError::AtLine`]
/// so diagnostics carry the 1-based source line.
#[derive(Debug, Error)]
pub enum AsmError {
    /// IO error reading source or writing bytecode.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A register operand lacked the `R` prefix.
    #[error("specified register {token} missing required prefix {}", arch::REGISTER_PREFIX)]
    RegisterNameMissingPrefix { token: String },

    /// A register operand named a register outside `R1..R16`.
    #[error("invalid register name {token}. Valid names: R{}--R{}", arch::REGISTER_MIN, arch::REGISTER_MAX)]
    InvalidRegisterName { token: String },

    /// A register-indirect operand was not of the form `[Rn]`.
    #[error("malformed register-indirect operand '{token}' (expected [Rn])")]
    InvalidIndirect { token: String },

    /// An integer literal was malformed or out of 16-bit range.
    #[error("could not parse 16-bit integer from '{token}': {message}")]
    InvalidLiteral { token: String, message: String },

    /// An address literal was not `0x` followed by exactly four hex digits.
    #[error("could not parse address from '{token}' (expected 0x-prefixed 16-bit address)")]
    InvalidAddress { token: String },

    /// A label identifier did not match `[A-Za-z][A-Za-z0-9_]*`.
    #[error("invalid label '{label}'")]
    InvalidLabel { label: String },

    /// The same label was defined twice in one source unit.
    #[error("duplicate label '{label}' (first defined for offset 0x{first:04x})")]
    DuplicateLabel { label: String, first: u16 },

    /// The first token of a statement named no known instruction.
    #[error("unknown mnemonic '{mnemonic}'")]
    UnknownMnemonic { mnemonic: String },

    /// A statement had the wrong number of operands for its mnemonic.
    #[error("{mnemonic} expects {expected} operand(s), found {found}")]
    OperandCount {
        mnemonic: &'static str,
        expected: usize,
        found: usize,
    },

    /// A jump target lay inside the stack region.
    #[error("jump target 0x{address:04x} lies in stack space ([0x{:04x}--0x{:04x}])", arch::STACK_MAX, arch::STACK_MIN)]
    JumpIntoStack { address: u16 },

    /// A jump target was not 4-byte aligned.
    #[error("jump target 0x{address:04x} not on a four-byte boundary")]
    JumpUnaligned { address: u16 },

    /// Any of the above, tagged with the source line it came from.
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<AsmError>,
    },
}

impl AsmError {
    /// Wrap this error with the 1-based source line it was raised on.
    pub(crate) fn at(self, line: usize) -> AsmError {
        AsmError::AtLine {
            line,
            source: Box::new(self),
        }
    }

    /// The underlying error, with any [`AsmError::AtLine`] wrapper peeled.
    pub fn cause(&self) -> &AsmError {
        match self {
            AsmError::AtLine { source, .. } => source.cause(),
            other => other,
        }
    }
}

/// Runtime errors raised by the emulator.
///
/// All of these stop the run and are reported to the caller;
/// [`MachineError::StoreIntoStack`] is additionally treated as fatal at the
/// CLI (exit status 1), mirroring the store-region rule.
#[derive(Debug, Error)]
pub enum MachineError {
    /// IO error loading a bytecode image.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A store instruction targeted the stack region.
    #[error("programs may not store data in the stack ([0x{:04x}--0x{:04x}])", arch::STACK_MAX, arch::STACK_MIN)]
    StoreIntoStack { address: u16 },

    /// A jump targeted the stack region.
    #[error("the program counter may not be set to addresses in stack space ([0x{:04x}--0x{:04x}])", arch::STACK_MAX, arch::STACK_MIN)]
    StackJump { address: u16 },

    /// A jump targeted VRAM.
    #[error("the program counter may not be set to addresses in VRAM ([0x{vram_start:04x}--0x{:04x}])", arch::ADDRESS_MAX)]
    VramJump { address: u16, vram_start: u16 },

    /// A jump targeted an address with its low two bits set.
    #[error("program counter @ 0x{address:04x} not on a four-byte boundary")]
    PcAlignment { address: u16 },

    /// A push was attempted with the stack already at the bottom of memory.
    #[error("stack overflow")]
    StackOverflow,

    /// A pop was attempted with the stack empty.
    #[error("stack empty")]
    StackEmpty,

    /// The stack pointer lost its 2-byte alignment.
    #[error("stack pointer at 0x{sp:04x} not 2-byte aligned")]
    StackPointerAlignment { sp: u16 },

    /// The opcode byte named no executable instruction.
    #[error("unknown or unimplemented opcode 0x{opcode:02x} at 0x{pc:04x}")]
    UnknownOpcode { opcode: u8, pc: u16 },
}

/// Errors raised while validating video dimensions.
///
/// Both kinds are recovered locally: the machine logs the error and falls
/// back to the default dimensions.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A video dimension was negative.
    #[error("invalid {dimension} value: cannot be negative!")]
    NegativeVideoDimension { dimension: &'static str },

    /// The requested dimensions would push VRAM into the stack region.
    #[error("invalid video dimensions {rows}x{columns}: VRAM too large")]
    VramTooLarge { rows: i64, columns: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asm_error_display() {
        let err = AsmError::InvalidRegisterName {
            token: "R17".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("R17"));
        assert!(msg.contains("R1--R16"));
    }

    #[test]
    fn test_at_line_wraps_and_peels() {
        let err = AsmError::UnknownMnemonic {
            mnemonic: "FROB".into(),
        }
        .at(3);
        assert!(err.to_string().starts_with("line 3:"));
        assert!(matches!(
            err.cause(),
            AsmError::UnknownMnemonic { mnemonic } if mnemonic == "FROB"
        ));
    }

    #[test]
    fn test_machine_error_display() {
        let err = MachineError::StoreIntoStack { address: 0x0100 };
        assert!(err.to_string().contains("0x0200"));

        let err = MachineError::UnknownOpcode {
            opcode: 0x39,
            pc: 0x0204,
        };
        assert!(err.to_string().contains("0x39"));
        assert!(err.to_string().contains("0x0204"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::VramTooLarge {
            rows: 2000,
            columns: 40,
        };
        assert!(err.to_string().contains("2000x40"));
    }
}
