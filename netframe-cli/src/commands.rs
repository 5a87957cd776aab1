//! Subcommand execution and frame file persistence
//!
//! A frame file holds exactly the bytes produced by encapsulation: no length
//! prefix, no magic number.

use crate::args::{Cli, Commands};
use crate::report::{write_banner, write_decapsulation, write_encapsulation};
use netframe_core::{Error, Result};
use netframe_packet::{
    ApplicationData, Decapsulator, DecodedPacket, EncapsulationConfig, Encapsulator,
};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Write raw frame bytes to `path`
pub fn save_frame(path: &Path, frame: &[u8]) -> Result<()> {
    fs::write(path, frame)?;
    info!(path = %path.display(), bytes = frame.len(), "frame saved");
    Ok(())
}

/// Read raw frame bytes from `path`
pub fn load_frame(path: &Path) -> Result<Vec<u8>> {
    let frame = fs::read(path)?;
    info!(path = %path.display(), bytes = frame.len(), "frame loaded");
    Ok(frame)
}

/// Run the parsed command line, narrating to `out`
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    match &cli.command {
        Commands::Send {
            message,
            output,
            addresses,
        } => {
            write_banner(out, "Encapsulation Module (Sender)")?;
            send(out, message, output, &addresses.to_config())?;
            writeln!(out, "\nEncapsulation complete!")?;
            Ok(())
        }
        Commands::Receive {
            input,
            verify_checksum,
        } => {
            write_banner(out, "Decapsulation Module (Receiver)")?;
            let packet = receive(out, input, *verify_checksum)?;
            writeln!(out)?;
            write_banner(out, "Decapsulation Result Summary")?;
            writeln!(out, "Original message: {}", packet.application.as_text())?;
            Ok(())
        }
        Commands::Demo {
            message,
            file,
            verify_checksum,
            addresses,
        } => demo(out, message, file, *verify_checksum, &addresses.to_config()),
    }
}

/// Encapsulate `message` and save the frame to `path`
pub fn send<W: Write>(
    out: &mut W,
    message: &str,
    path: &Path,
    config: &EncapsulationConfig,
) -> Result<Vec<u8>> {
    let data = ApplicationData::from(message);
    let mut frame = Vec::new();
    Encapsulator::new(*config).send(&data, |bytes| {
        save_frame(path, bytes)?;
        frame = bytes.to_vec();
        Ok(())
    })?;
    debug!(payload = data.len(), frame = frame.len(), "encapsulated");

    write_encapsulation(out, config, &data, &frame)?;

    writeln!(out, "\nPhysical Layer:")?;
    writeln!(out, "  Saved to file: {}", path.display())?;
    writeln!(out, "  Total bytes written: {}", frame.len())?;

    Ok(frame)
}

/// Load the frame at `path` and decapsulate it
pub fn receive<W: Write>(
    out: &mut W,
    path: &Path,
    verify_checksum: bool,
) -> Result<DecodedPacket> {
    writeln!(out, "Reading file: {}\n", path.display())?;

    let frame = load_frame(path)?;
    let packet = Decapsulator::default()
        .with_checksum_verification(verify_checksum)
        .decapsulate(&frame)?;
    debug!(payload = packet.application.len(), "decapsulated");

    write_decapsulation(out, frame.len(), &packet)?;
    Ok(packet)
}

/// Send, receive and compare the recovered message with the original
pub fn demo<W: Write>(
    out: &mut W,
    message: &str,
    path: &Path,
    verify_checksum: bool,
    config: &EncapsulationConfig,
) -> Result<()> {
    write_banner(out, "Network Protocol Simulation - Demo")?;

    write_banner(out, "Part 1: Encapsulation")?;
    send(out, message, path, config)?;

    writeln!(out, "\n")?;
    write_banner(out, "Part 2: Decapsulation")?;
    let packet = receive(out, path, verify_checksum)?;

    writeln!(out)?;
    write_banner(out, "Verification Result")?;
    let recovered = packet.application.as_text();
    writeln!(out, "Original sent message: {}", message)?;
    writeln!(out, "Decapsulated message:  {}", recovered)?;

    let verdict = check_roundtrip(message, &recovered);
    if verdict.is_ok() {
        writeln!(out, "Verification SUCCESS: Messages match!")?;
    } else {
        writeln!(out, "Verification FAILED: Messages don't match!")?;
    }
    verdict
}

/// Compare the recovered text with what was sent
pub fn check_roundtrip(sent: &str, received: &str) -> Result<()> {
    if sent == received {
        return Ok(());
    }

    warn!(sent, received, "demo roundtrip mismatch");
    Err(Error::RoundtripMismatch {
        sent: sent.to_string(),
        received: received.to_string(),
    })
}
