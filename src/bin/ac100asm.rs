//! AC100 assembler CLI.
//!
//! Translates an AC100 assembly source file into a bytecode image.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

/// AC100 two-pass assembler.
///
/// Reads a mnemonic source file and writes the 4-byte-aligned bytecode
/// image the emulator loads at 0x0200.
#[derive(Parser, Debug)]
#[command(name = "ac100asm")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The source file to assemble
    infile: PathBuf,

    /// Name to use for output file
    #[arg(short, long, default_value = "out.bin", value_name = "file")]
    outfile: PathBuf,

    /// Logging level
    #[arg(short = 'l', long, default_value = "error", value_name = "level")]
    loglevel: LogLevel,
}

/// Logging level options.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    /// Everything, including per-pass progress
    Debug,
    /// Informational messages and up
    Info,
    /// Warnings and errors only
    Warning,
    /// Errors only
    Error,
}

impl LogLevel {
    fn as_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warning => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.loglevel.as_tracing())
        .init();

    match assemble(&args) {
        Ok(bytes) => {
            tracing::info!(
                "wrote {} bytes ({} instructions) to {}",
                bytes,
                bytes / 4,
                args.outfile.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn assemble(args: &Args) -> anyhow::Result<usize> {
    let source = std::fs::read_to_string(&args.infile)
        .with_context(|| format!("could not read {}", args.infile.display()))?;

    let bytecode = ac100::assemble_source(&source)
        .with_context(|| format!("could not assemble {}", args.infile.display()))?;

    std::fs::write(&args.outfile, &bytecode)
        .with_context(|| format!("could not write {}", args.outfile.display()))?;

    Ok(bytecode.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from(["ac100asm", "prog.asm"]).unwrap();
        assert_eq!(args.infile, PathBuf::from("prog.asm"));
        assert_eq!(args.outfile, PathBuf::from("out.bin"));
        assert!(matches!(args.loglevel, LogLevel::Error));
    }

    #[test]
    fn test_outfile_option() {
        let args =
            Args::try_parse_from(["ac100asm", "prog.asm", "-o", "prog.bin"]).unwrap();
        assert_eq!(args.outfile, PathBuf::from("prog.bin"));
    }

    #[test]
    fn test_loglevel_option() {
        let args = Args::try_parse_from(["ac100asm", "prog.asm", "-l", "debug"]).unwrap();
        assert!(matches!(args.loglevel, LogLevel::Debug));
    }

    #[test]
    fn test_infile_is_required() {
        assert!(Args::try_parse_from(["ac100asm"]).is_err());
    }
}
