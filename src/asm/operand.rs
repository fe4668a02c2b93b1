//! Operand literal parsers.
//!
//! Registers, register-indirect forms, 16-bit integer literals (binary,
//! hexadecimal, decimal), and address literals. Integer results are always
//! exactly two bytes, big-endian, matching the byte order of operands in
//! the instruction stream.

use crate::arch;
use crate::error::AsmError;
use byteorder::{BigEndian, ByteOrder};

/// Most negative value representable in a signed 16-bit word.
const SIGNED_MIN: i64 = -32768;

/// Largest value representable in an unsigned 16-bit word.
const UNSIGNED_MAX: i64 = 65535;

/// Parse a register name (`R1`..`R16`) into its 0-based index.
pub fn parse_register(token: &str) -> Result<u8, AsmError> {
    let Some(digits) = token.strip_prefix(arch::REGISTER_PREFIX) else {
        return Err(AsmError::RegisterNameMissingPrefix {
            token: token.to_string(),
        });
    };

    let number: u8 = digits.parse().map_err(|_| AsmError::InvalidRegisterName {
        token: token.to_string(),
    })?;
    if !(arch::REGISTER_MIN..=arch::REGISTER_MAX).contains(&number) {
        return Err(AsmError::InvalidRegisterName {
            token: token.to_string(),
        });
    }

    // register names count from 1, register indices from 0
    Ok(number - 1)
}

/// Parse a register-indirect operand (`[Rn]`) into the register's 0-based
/// index.
pub fn parse_register_indirect(token: &str) -> Result<u8, AsmError> {
    let inner = token
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| AsmError::InvalidIndirect {
            token: token.to_string(),
        })?;
    parse_register(inner)
}

/// Whether a token names a register-indirect operand.
pub fn is_indirect(token: &str) -> bool {
    token.starts_with('[')
}

/// Parse a 16-bit integer literal into its big-endian byte pair.
///
/// Accepted forms:
/// - `0b` binary, at most 16 digits;
/// - `0x` hexadecimal, one, two, or four digits (a single digit gains a
///   leading zero; three digits are rejected);
/// - decimal in `[-32768, 65535]`, with negative values emitted as their
///   16-bit two's complement.
pub fn parse_int(token: &str) -> Result<[u8; 2], AsmError> {
    let value = if let Some(digits) = token.strip_prefix(arch::BINARY_PREFIX) {
        parse_binary(token, digits)?
    } else if let Some(digits) = token.strip_prefix(arch::HEX_PREFIX) {
        parse_hex(token, digits)?
    } else {
        parse_decimal(token)?
    };

    let mut bytes = [0u8; 2];
    BigEndian::write_u16(&mut bytes, value);
    Ok(bytes)
}

fn literal_error(token: &str, message: impl Into<String>) -> AsmError {
    AsmError::InvalidLiteral {
        token: token.to_string(),
        message: message.into(),
    }
}

fn parse_binary(token: &str, digits: &str) -> Result<u16, AsmError> {
    if digits.is_empty() {
        return Err(literal_error(token, "no digits after binary prefix"));
    }
    if digits.len() > arch::WORD_BITS as usize {
        return Err(literal_error(token, "more than 16 binary digits"));
    }
    if let Some(bad) = digits.chars().find(|c| *c != '0' && *c != '1') {
        return Err(literal_error(token, format!("invalid binary digit '{bad}'")));
    }
    u16::from_str_radix(digits, 2)
        .map_err(|e| literal_error(token, e.to_string()))
}

fn parse_hex(token: &str, digits: &str) -> Result<u16, AsmError> {
    if digits.is_empty() {
        return Err(literal_error(token, "no digits after hex prefix"));
    }
    // a lone hexit is padded to a full byte; any other odd length is
    // ambiguous and rejected
    if digits.len() % 2 != 0 && digits.len() != 1 {
        return Err(literal_error(token, "odd number of hex digits"));
    }
    if digits.len() > 2 * arch::BYTES_PER_WORD {
        return Err(literal_error(token, "more than 4 hex digits"));
    }
    u16::from_str_radix(digits, 16)
        .map_err(|_| literal_error(token, "invalid hex digits"))
}

fn parse_decimal(token: &str) -> Result<u16, AsmError> {
    let number: i64 = token
        .parse()
        .map_err(|_| literal_error(token, "not an integer"))?;
    if number < SIGNED_MIN {
        return Err(literal_error(
            token,
            format!("value {number} too negative for 16 bits"),
        ));
    }
    if number > UNSIGNED_MAX {
        return Err(literal_error(
            token,
            format!("number {number} too large for 16 bits"),
        ));
    }
    Ok((number & 0xFFFF) as u16)
}

/// Parse an address literal: `0x` followed by exactly four hex digits.
pub fn parse_address(token: &str) -> Result<u16, AsmError> {
    let invalid = || AsmError::InvalidAddress {
        token: token.to_string(),
    };

    let digits = token.strip_prefix(arch::HEX_PREFIX).ok_or_else(invalid)?;
    if digits.len() != 2 * arch::BYTES_PER_WORD {
        return Err(invalid());
    }
    u16::from_str_radix(digits, 16).map_err(|_| invalid())
}
