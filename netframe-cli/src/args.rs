//! CLI argument parsing

use clap::{Args, Parser, Subcommand};
use netframe_core::{parse_ipv4, parse_mac, MacAddress};
use netframe_packet::EncapsulationConfig;
use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Frame file used when none is given
pub const DEFAULT_FILENAME: &str = "packet.bin";

/// Message used when none is given
pub const DEFAULT_MESSAGE: &str = "Hello Teacher";

#[derive(Parser, Debug)]
#[command(name = "netframe")]
#[command(version, about = "Ethernet/IPv4/UDP encapsulation simulator", long_about = None)]
pub struct Cli {
    /// Verbose output (-v, -vv, -vvv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encapsulate a message and save the frame to a file
    Send {
        /// Application message
        #[arg(default_value = DEFAULT_MESSAGE)]
        message: String,

        /// Frame file to write
        #[arg(short, long, default_value = DEFAULT_FILENAME)]
        output: PathBuf,

        #[command(flatten)]
        addresses: AddressArgs,
    },

    /// Read a frame file and decapsulate it
    Receive {
        /// Frame file to read
        #[arg(default_value = DEFAULT_FILENAME)]
        input: PathBuf,

        /// Reject frames whose IPv4 header checksum does not verify
        #[arg(long)]
        verify_checksum: bool,
    },

    /// Encapsulate, save, read back and compare
    Demo {
        /// Application message
        #[arg(default_value = DEFAULT_MESSAGE)]
        message: String,

        /// Frame file to write and read back
        #[arg(short, long, default_value = DEFAULT_FILENAME)]
        file: PathBuf,

        /// Reject frames whose IPv4 header checksum does not verify
        #[arg(long)]
        verify_checksum: bool,

        #[command(flatten)]
        addresses: AddressArgs,
    },
}

/// Address overrides; anything left out keeps the default configuration
#[derive(Args, Debug, Clone, Default)]
pub struct AddressArgs {
    /// UDP source port [default: 12345]
    #[arg(long, value_name = "PORT")]
    pub src_port: Option<u16>,

    /// UDP destination port [default: 80]
    #[arg(long, value_name = "PORT")]
    pub dst_port: Option<u16>,

    /// IPv4 source address [default: 192.168.1.100]
    #[arg(long, value_name = "IP", value_parser = ipv4_arg)]
    pub src_ip: Option<Ipv4Addr>,

    /// IPv4 destination address [default: 192.168.1.1]
    #[arg(long, value_name = "IP", value_parser = ipv4_arg)]
    pub dst_ip: Option<Ipv4Addr>,

    /// Source MAC address [default: 00:11:22:33:44:55]
    #[arg(long, value_name = "MAC", value_parser = mac_arg)]
    pub src_mac: Option<MacAddress>,

    /// Destination MAC address [default: 66:77:88:99:aa:bb]
    #[arg(long, value_name = "MAC", value_parser = mac_arg)]
    pub dst_mac: Option<MacAddress>,
}

impl AddressArgs {
    /// Apply the overrides on top of [`EncapsulationConfig::default`]
    pub fn to_config(&self) -> EncapsulationConfig {
        let mut config = EncapsulationConfig::default();
        if let Some(port) = self.src_port {
            config.src_port = port.into();
        }
        if let Some(port) = self.dst_port {
            config.dst_port = port.into();
        }
        if let Some(ip) = self.src_ip {
            config.src_ip = ip;
        }
        if let Some(ip) = self.dst_ip {
            config.dst_ip = ip;
        }
        if let Some(mac) = self.src_mac {
            config.src_mac = mac;
        }
        if let Some(mac) = self.dst_mac {
            config.dst_mac = mac;
        }
        config
    }
}

fn ipv4_arg(s: &str) -> Result<Ipv4Addr, String> {
    parse_ipv4(s).map_err(|e| e.to_string())
}

fn mac_arg(s: &str) -> Result<MacAddress, String> {
    parse_mac(s).map_err(|e| e.to_string())
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_defaults() {
        let cli = Cli::try_parse_from(["netframe", "send"]).unwrap();
        match cli.command {
            Commands::Send {
                message,
                output,
                addresses,
            } => {
                assert_eq!(message, "Hello Teacher");
                assert_eq!(output, PathBuf::from("packet.bin"));
                assert_eq!(addresses.to_config(), EncapsulationConfig::default());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_send_overrides() {
        let cli = Cli::try_parse_from([
            "netframe",
            "-vv",
            "send",
            "hi there",
            "-o",
            "out.bin",
            "--dst-port",
            "53",
            "--src-ip",
            "10.0.0.1",
            "--dst-mac",
            "ff:ff:ff:ff:ff:ff",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);

        let Commands::Send {
            message, addresses, ..
        } = cli.command
        else {
            panic!("expected send");
        };
        assert_eq!(message, "hi there");

        let config = addresses.to_config();
        assert_eq!(config.dst_port.0, 53);
        assert_eq!(config.src_port.0, 12345);
        assert_eq!(config.src_ip, Ipv4Addr::new(10, 0, 0, 1));
        assert!(config.dst_mac.is_broadcast());
    }

    #[test]
    fn test_bad_addresses_rejected() {
        assert!(Cli::try_parse_from(["netframe", "send", "--src-ip", "10.0.0"]).is_err());
        assert!(Cli::try_parse_from(["netframe", "send", "--src-mac", "00:11:22"]).is_err());
        assert!(Cli::try_parse_from(["netframe", "send", "--src-port", "70000"]).is_err());
    }

    #[test]
    fn test_receive() {
        let cli =
            Cli::try_parse_from(["netframe", "receive", "frame.bin", "--verify-checksum"]).unwrap();
        match cli.command {
            Commands::Receive {
                input,
                verify_checksum,
            } => {
                assert_eq!(input, PathBuf::from("frame.bin"));
                assert!(verify_checksum);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["netframe"]).is_err());
    }
}
