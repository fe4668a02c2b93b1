//! Per-mnemonic instruction encoders.
//!
//! Every encoder produces a 4-byte record with the opcode in byte 0; the
//! `[u8; 4]` return type is itself the length guarantee. Operand shapes:
//!
//! - `Rd`/`Rs` encode as a single 0-based index byte;
//! - immediates encode as two big-endian bytes;
//! - addresses encode as two big-endian bytes; the register-indirect form
//!   `[Rn]` encodes as `hi = 0, lo = index`;
//! - unused trailing bytes are zero, except for `HALT` and `NOP`, whose
//!   fill bytes are part of the instruction's identity.
//!
//! Jump operands resolve through the label table first and fall back to a
//! literal address; targets in stack space or off the 4-byte grid are
//! rejected at assembly time.

use crate::arch;
use crate::asm::operand;
use crate::asm::symbols::SymbolTable;
use crate::error::AsmError;
use crate::isa::Opcode;
use byteorder::{BigEndian, ByteOrder};

/// Encode one statement into its 4-byte record.
pub(crate) fn encode(
    symbols: &SymbolTable,
    mnemonic: &str,
    operands: &[&str],
) -> Result<[u8; 4], AsmError> {
    let Some(opcode) = Opcode::from_mnemonic(mnemonic) else {
        return Err(AsmError::UnknownMnemonic {
            mnemonic: mnemonic.to_string(),
        });
    };

    match opcode {
        Opcode::Ldi | Opcode::Addi | Opcode::Subi | Opcode::Cmi => {
            encode_reg_imm(opcode, operands)
        }
        Opcode::Ldr | Opcode::Addr | Opcode::Subr | Opcode::Cmr => {
            encode_reg_reg(opcode, operands)
        }
        Opcode::Ldm | Opcode::St | Opcode::Sth | Opcode::Stl => {
            encode_reg_mem(opcode, operands)
        }
        _ if opcode.is_jump() => encode_jump(symbols, opcode, operands),
        Opcode::Inc | Opcode::Dec | Opcode::Push | Opcode::Pop => {
            encode_reg_only(opcode, operands)
        }
        Opcode::Rts => {
            expect_arity(opcode, 0, operands.len())?;
            Ok([opcode.byte(), 0x00, 0x00, 0x00])
        }
        Opcode::Halt => {
            expect_arity(opcode, 0, operands.len())?;
            Ok([opcode.byte(), 0xFF, 0xFE, 0xFF])
        }
        Opcode::Nop => {
            expect_arity(opcode, 0, operands.len())?;
            Ok([opcode.byte(), 0xFF, 0xFF, 0xFF])
        }
        // jumps are matched by the guard above
        _ => unreachable!("unhandled opcode {opcode}"),
    }
}

fn expect_arity(opcode: Opcode, expected: usize, found: usize) -> Result<(), AsmError> {
    if expected != found {
        return Err(AsmError::OperandCount {
            mnemonic: opcode.mnemonic(),
            expected,
            found,
        });
    }
    Ok(())
}

/// `OP Rd IMM16` -> `op rd imm_hi imm_lo`.
fn encode_reg_imm(opcode: Opcode, operands: &[&str]) -> Result<[u8; 4], AsmError> {
    expect_arity(opcode, 2, operands.len())?;
    let register = operand::parse_register(operands[0])?;
    let imm = operand::parse_int(operands[1])?;
    Ok([opcode.byte(), register, imm[0], imm[1]])
}

/// `OP Rd Rs` -> `op rd rs 00`.
fn encode_reg_reg(opcode: Opcode, operands: &[&str]) -> Result<[u8; 4], AsmError> {
    expect_arity(opcode, 2, operands.len())?;
    let dest = operand::parse_register(operands[0])?;
    let src = operand::parse_register(operands[1])?;
    Ok([opcode.byte(), dest, src, 0x00])
}

/// `OP Rd ADDR16` or `OP Rd [Rs]` -> `op rd addr_hi addr_lo`.
fn encode_reg_mem(opcode: Opcode, operands: &[&str]) -> Result<[u8; 4], AsmError> {
    expect_arity(opcode, 2, operands.len())?;
    let register = operand::parse_register(operands[0])?;
    let addr = encode_mem_operand(operands[1])?;
    Ok([opcode.byte(), register, addr[0], addr[1]])
}

/// `OP Rd` -> `op rd 00 00`.
fn encode_reg_only(opcode: Opcode, operands: &[&str]) -> Result<[u8; 4], AsmError> {
    expect_arity(opcode, 1, operands.len())?;
    let register = operand::parse_register(operands[0])?;
    Ok([opcode.byte(), register, 0x00, 0x00])
}

/// `J* target` -> `op 00 addr_hi addr_lo`.
fn encode_jump(
    symbols: &SymbolTable,
    opcode: Opcode,
    operands: &[&str],
) -> Result<[u8; 4], AsmError> {
    expect_arity(opcode, 1, operands.len())?;
    let address = resolve_jump_target(symbols, operands[0])?;
    let mut bytes = [0u8; 2];
    BigEndian::write_u16(&mut bytes, address);
    Ok([opcode.byte(), 0x00, bytes[0], bytes[1]])
}

/// Resolve a jump operand to an absolute address and validate the region
/// and alignment rules.
fn resolve_jump_target(symbols: &SymbolTable, token: &str) -> Result<u16, AsmError> {
    let address = match symbols.resolve(token) {
        Some(address) => address,
        None => operand::parse_address(token)?,
    };
    if address < arch::STACK_MIN {
        return Err(AsmError::JumpIntoStack { address });
    }
    if address % arch::INSTRUCTION_BYTES as u16 != 0 {
        return Err(AsmError::JumpUnaligned { address });
    }
    Ok(address)
}

/// Encode an address operand, honoring the `[Rn]` indirect form.
fn encode_mem_operand(token: &str) -> Result<[u8; 2], AsmError> {
    if operand::is_indirect(token) {
        let register = operand::parse_register_indirect(token)?;
        return Ok([0x00, register]);
    }
    let address = operand::parse_address(token)?;
    let mut bytes = [0u8; 2];
    BigEndian::write_u16(&mut bytes, address);
    Ok(bytes)
}
