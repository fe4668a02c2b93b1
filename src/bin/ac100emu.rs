//! AC100 emulator CLI.
//!
//! Loads a bytecode image at 0x0200 and runs it to completion. Exit
//! status: 0 after HALT (or running off the end of the code region), 1 on
//! fatal configuration / store-region / IO errors, 2 on other runtime
//! errors.

use ac100::{Machine, MachineError};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

/// AC100 emulator.
///
/// Executes a bytecode image produced by ac100asm against the AC100
/// register machine and its fixed memory map.
#[derive(Parser, Debug)]
#[command(name = "ac100emu")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// AC100 binary to run
    binary: PathBuf,

    /// Video display height in rows
    #[arg(
        short,
        long,
        allow_negative_numbers = true,
        default_value_t = i64::from(ac100::arch::DEFAULT_VIDEO_ROWS)
    )]
    rows: i64,

    /// Video display width in columns
    #[arg(
        short,
        long,
        allow_negative_numbers = true,
        default_value_t = i64::from(ac100::arch::DEFAULT_VIDEO_COLUMNS)
    )]
    columns: i64,

    /// Logging level
    #[arg(short = 'l', long, default_value = "error", value_name = "level")]
    loglevel: LogLevel,

    /// Machine state to print for debugging purposes
    #[arg(short = 'd', long, default_value = "none")]
    debug_info: DebugInfo,

    /// Print the final machine state as JSON
    #[arg(long)]
    json: bool,

    /// Render the VRAM contents to the terminal after the run
    #[cfg(feature = "display")]
    #[arg(long)]
    show_display: bool,
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

/// Debug dump options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DebugInfo {
    /// No dump
    None,
    /// Register contents
    Registers,
    /// Non-zero RAM rows
    Ram,
    /// Status flags
    Flags,
    /// Everything
    All,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.loglevel.as_tracing())
        .init();

    let mut machine = Machine::new();
    machine.configure_video(args.rows, args.columns);

    let image = match std::fs::read(&args.binary) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("error: could not read {}: {e}", args.binary.display());
            return ExitCode::from(1);
        }
    };
    machine.load_ram(&image);

    let result = machine.run();

    #[cfg(feature = "display")]
    if args.show_display {
        if let Err(e) = show_display(&machine) {
            tracing::error!("display error: {e}");
        }
    }

    dump(&machine, &args);

    match result {
        Ok(outcome) => {
            tracing::info!("run finished: {outcome:?}");
            ExitCode::SUCCESS
        }
        Err(e @ MachineError::StoreIntoStack { .. }) => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn dump(machine: &Machine, args: &Args) {
    if args.json {
        match serde_json::to_string_pretty(&machine.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!("could not serialize machine state: {e}"),
        }
        return;
    }

    if matches!(args.debug_info, DebugInfo::Registers | DebugInfo::All) {
        print!("{}", machine.dump_registers());
    }
    if matches!(args.debug_info, DebugInfo::Flags | DebugInfo::All) {
        print!("{}", machine.dump_flags());
    }
    if matches!(args.debug_info, DebugInfo::Ram | DebugInfo::All) {
        print!("{}", machine.dump_ram());
    }
}

/// Render VRAM and wait for a key so the image is visible before the
/// alternate screen is torn down.
#[cfg(feature = "display")]
fn show_display(machine: &Machine) -> std::io::Result<()> {
    use ac100::emu::display::Display;

    let layout = machine.video();
    let mut display = Display::new(layout.rows, layout.columns)?;
    display.render(machine.vram())?;
    crossterm::event::read()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from(["ac100emu", "prog.bin"]).unwrap();
        assert_eq!(args.binary, PathBuf::from("prog.bin"));
        assert_eq!(args.rows, 24);
        assert_eq!(args.columns, 40);
        assert_eq!(args.debug_info, DebugInfo::None);
        assert!(!args.json);
    }

    #[test]
    fn test_video_dimension_options() {
        let args =
            Args::try_parse_from(["ac100emu", "prog.bin", "-r", "10", "-c", "20"]).unwrap();
        assert_eq!(args.rows, 10);
        assert_eq!(args.columns, 20);
    }

    #[test]
    fn test_negative_dimensions_parse() {
        // validation happens in the machine, not the parser
        let args = Args::try_parse_from(["ac100emu", "prog.bin", "-r", "-5"]).unwrap();
        assert_eq!(args.rows, -5);
    }

    #[test]
    fn test_debug_info_option() {
        let args = Args::try_parse_from(["ac100emu", "prog.bin", "-d", "all"]).unwrap();
        assert_eq!(args.debug_info, DebugInfo::All);
    }

    #[test]
    fn test_binary_is_required() {
        assert!(Args::try_parse_from(["ac100emu"]).is_err());
    }
}
