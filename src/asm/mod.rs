//! The AC100 two-pass assembler.
//!
//! Pass 1 ([`Assembler::find_labels`]) walks the source recording label
//! offsets; pass 2 encodes each statement into its 4-byte record. Both
//! passes advance the same offset counter by exactly one instruction per
//! non-label statement, which is what keeps label addresses and emitted
//! code in agreement. Assembly aborts on the first error and yields no
//! output.

pub mod encoder;
pub mod lexer;
pub mod operand;
pub mod symbols;

use crate::arch;
use crate::error::AsmError;
use lexer::Line;
use symbols::SymbolTable;
use tracing::debug;

/// Assembler state for one translation unit.
///
/// The offset counter and label table live across the two passes; the
/// current line number is tracked for diagnostics and inspection.
#[derive(Debug)]
pub struct Assembler {
    symbols: SymbolTable,
    offset: u16,
    line: usize,
}

impl Assembler {
    /// Create an assembler with an empty label table.
    pub fn new() -> Assembler {
        Assembler {
            symbols: SymbolTable::new(),
            offset: arch::CODE_START,
            line: 0,
        }
    }

    /// Pass 1: record every label's offset.
    ///
    /// The offset counter starts at `CODE_START` and is bumped by one
    /// instruction for every non-blank, non-comment, non-label line,
    /// whether or not that line will encode successfully in pass 2; the
    /// two passes therefore agree on every label's address.
    pub fn find_labels(&mut self, source: &str) -> Result<(), AsmError> {
        self.symbols.clear();
        self.offset = arch::CODE_START;
        self.line = 0;

        for (index, text) in source.lines().enumerate() {
            self.line = index + 1;
            match lexer::classify(text) {
                Line::Blank | Line::Comment => {}
                Line::Label(name) => {
                    self.symbols
                        .define(name, self.offset)
                        .map_err(|e| e.at(self.line))?;
                }
                Line::Statement { .. } => {
                    self.offset = self.offset.wrapping_add(arch::INSTRUCTION_BYTES as u16);
                }
            }
        }

        debug!(labels = self.symbols.len(), "pass 1 complete");
        Ok(())
    }

    /// Assemble a source unit into its bytecode image.
    ///
    /// Runs both passes. On success the image length is a multiple of 4
    /// and is intended to be loaded at `CODE_START`.
    pub fn assemble(&mut self, source: &str) -> Result<Vec<u8>, AsmError> {
        self.find_labels(source)?;
        self.emit(source)
    }

    /// Pass 2: encode every statement, appending 4-byte records.
    fn emit(&mut self, source: &str) -> Result<Vec<u8>, AsmError> {
        self.offset = arch::CODE_START;
        self.line = 0;
        let mut bytecode = Vec::new();

        for (index, text) in source.lines().enumerate() {
            self.line = index + 1;
            match lexer::classify(text) {
                // labels were handled in pass 1
                Line::Blank | Line::Comment | Line::Label(_) => {}
                Line::Statement { mnemonic, operands } => {
                    let record = encoder::encode(&self.symbols, mnemonic, &operands)
                        .map_err(|e| e.at(self.line))?;
                    bytecode.extend_from_slice(&record);
                    self.offset = self.offset.wrapping_add(arch::INSTRUCTION_BYTES as u16);
                }
            }
        }

        debug!(bytes = bytecode.len(), "pass 2 complete");
        Ok(bytecode)
    }

    /// The label table built by pass 1.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// The current offset counter (one past the last emitted instruction).
    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// The 1-based source line most recently processed.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl Default for Assembler {
    fn default() -> Assembler {
        Assembler::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_whitespace_only_source() {
        let mut asm = Assembler::new();
        let bytecode = asm.assemble("   \n").unwrap();
        assert!(bytecode.is_empty());
        assert_eq!(asm.offset(), 0x0200);
        assert_eq!(asm.line(), 1);
    }

    #[test]
    fn test_comment_only_source() {
        let mut asm = Assembler::new();
        let bytecode = asm.assemble("; one\n; two\n; three\n").unwrap();
        assert!(bytecode.is_empty());
        assert_eq!(asm.line(), 3);
    }

    #[test]
    fn test_single_instruction() {
        let mut asm = Assembler::new();
        let bytecode = asm.assemble("HALT\n").unwrap();
        assert_eq!(bytecode, vec![0xFE, 0xFF, 0xFE, 0xFF]);
        assert_eq!(asm.offset(), 0x0204);
        assert_eq!(asm.line(), 1);
    }

    #[test]
    fn test_multi_instruction_program() {
        let mut asm = Assembler::new();
        let source = "LDI R1 5\nLDR R2 R1\n";
        let bytecode = asm.assemble(source).unwrap();
        assert_eq!(
            bytecode,
            vec![0x00, 0x00, 0x00, 0x05, 0x01, 0x01, 0x00, 0x00]
        );
        assert_eq!(asm.offset(), 0x0208);
    }

    #[test]
    fn test_image_length_is_multiple_of_four() {
        let mut asm = Assembler::new();
        let source = "LDI R1 1\n; comment\n\nLDI R2 2\nADDR R1 R2\nHALT\n";
        let bytecode = asm.assemble(source).unwrap();
        assert_eq!(bytecode.len() % 4, 0);
        assert_eq!(bytecode.len(), 16);
    }

    #[test]
    fn test_labels_consume_no_space() {
        let mut asm = Assembler::new();
        let source = "start:\nLDI R1 1\nloop:\nJMP loop\n";
        let bytecode = asm.assemble(source).unwrap();
        assert_eq!(asm.symbols().resolve("start"), Some(0x0200));
        assert_eq!(asm.symbols().resolve("loop"), Some(0x0204));
        // JMP loop targets the instruction right after the label
        assert_eq!(&bytecode[4..], &[0x38, 0x00, 0x02, 0x04]);
    }

    #[test]
    fn test_pass_agreement_with_interleaved_noise() {
        // property 3: pass-1 offsets match the emission position of the
        // instruction following each label, with comments and blanks mixed in
        let mut asm = Assembler::new();
        let source = "\n; header\nLDI R1 1\n\nmiddle:\n; note\nLDI R2 2\nend:\nHALT\n";
        let bytecode = asm.assemble(source).unwrap();
        let middle = asm.symbols().resolve("middle").unwrap();
        let end = asm.symbols().resolve("end").unwrap();
        assert_eq!(middle, 0x0204);
        assert_eq!(end, 0x0208);
        let at = |address: u16| {
            let index = (address - arch::CODE_START) as usize;
            &bytecode[index..index + 4]
        };
        assert_eq!(at(middle), &[0x00, 0x01, 0x00, 0x02]); // LDI R2 2
        assert_eq!(at(end), &[0xFE, 0xFF, 0xFE, 0xFF]); // HALT
    }

    #[test]
    fn test_forward_references_resolve() {
        let mut asm = Assembler::new();
        let source = "JMP done\nLDI R1 1\ndone:\nHALT\n";
        let bytecode = asm.assemble(source).unwrap();
        assert_eq!(&bytecode[0..4], &[0x38, 0x00, 0x02, 0x08]);
    }

    #[test]
    fn test_duplicate_label_aborts() {
        let mut asm = Assembler::new();
        let err = asm.assemble("loop:\nNOP\nloop:\nHALT\n").unwrap_err();
        assert!(matches!(err, AsmError::AtLine { line: 3, .. }));
        assert!(matches!(err.cause(), AsmError::DuplicateLabel { .. }));
    }

    #[test]
    fn test_invalid_label_aborts() {
        let mut asm = Assembler::new();
        let err = asm.assemble("9lives:\nHALT\n").unwrap_err();
        assert!(matches!(err.cause(), AsmError::InvalidLabel { .. }));
    }

    #[test]
    fn test_error_yields_no_output() {
        let mut asm = Assembler::new();
        let err = asm.assemble("LDI R1 1\nLDI R99 2\n").unwrap_err();
        assert!(matches!(err, AsmError::AtLine { line: 2, .. }));
        assert!(matches!(err.cause(), AsmError::InvalidRegisterName { .. }));
    }

    #[test]
    fn test_bad_mnemonic_carries_line() {
        let mut asm = Assembler::new();
        let err = asm.assemble("NOP\nNOP\nFROB R1\n").unwrap_err();
        assert!(matches!(err, AsmError::AtLine { line: 3, .. }));
    }

    #[test]
    fn test_misaligned_jump_rejected_at_assembly() {
        // property 5, assembler side
        let mut asm = Assembler::new();
        assert!(matches!(
            asm.assemble("JMP 0x0301\n").unwrap_err().cause(),
            AsmError::JumpUnaligned { address: 0x0301 }
        ));
        assert!(matches!(
            asm.assemble("JMP 0x0100\n").unwrap_err().cause(),
            AsmError::JumpIntoStack { address: 0x0100 }
        ));
    }
}
