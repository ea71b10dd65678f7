use std::time::Duration;

use clap::{Args, Subcommand};
use mixosc_client::{Client, DeviceKind, Entity};

use crate::exit::{client_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod fader;
pub mod get;
pub mod info;
pub mod listen;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a single OSC message.
    Send(SendArgs),
    /// Query an address and print the reply.
    Get(GetArgs),
    /// Ask the mixer to identify itself.
    Info(InfoArgs),
    /// Read or set an entity's fader in dB.
    Fader(FaderArgs),
    /// Subscribe to mixer updates and print them.
    Listen(ListenArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, conn, format),
        Command::Get(args) => get::run(args, conn, format),
        Command::Info(args) => info::run(args, conn, format),
        Command::Fader(args) => fader::run(args, conn, format),
        Command::Listen(args) => listen::run(args, conn, format),
        Command::Version(args) => version::run(args),
    }
}

/// Where the mixer is and how long to wait for it.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Mixer host name or IP address.
    #[arg(long, env = "MIXOSC_HOST", global = true)]
    pub host: Option<String>,
    /// Mixer OSC port. Default: 10024 for xair, 10023 for x32.
    #[arg(long, env = "MIXOSC_PORT", global = true)]
    pub port: Option<u16>,
    /// Mixer family (xair, x32).
    #[arg(long, env = "MIXOSC_KIND", default_value = "xair", global = true)]
    pub kind: DeviceKind,
    /// How long to wait for a reply (e.g. 2s, 500ms).
    #[arg(long, env = "MIXOSC_TIMEOUT", default_value = "500ms", global = true)]
    pub timeout: String,
}

impl ConnectionArgs {
    pub fn connect(&self) -> CliResult<Client> {
        let host = self
            .host
            .as_deref()
            .ok_or_else(|| CliError::new(USAGE, "no mixer host given (use --host or MIXOSC_HOST)"))?;
        Client::connect(host, self.port, self.kind)
            .map_err(|err| client_error("connect failed", err))
    }

    pub fn reply_timeout(&self) -> CliResult<Duration> {
        parse_duration(&self.timeout)
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// OSC address, e.g. /ch/01/mix/fader.
    pub address: String,
    /// Arguments: i:INT, f:FLOAT, s:TEXT, b:HEX, or untyped (int, then float, else string).
    #[arg(allow_negative_numbers = true)]
    pub args: Vec<String>,
    /// Wait for one reply and print it.
    #[arg(long)]
    pub wait: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// OSC address to query.
    pub address: String,
}

#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Args, Debug)]
pub struct FaderArgs {
    /// Entity to address (strip, bus, matrix, main, mainmono).
    pub entity: Entity,
    /// Entity number. Ignored for main and mainmono.
    #[arg(default_value_t = 1)]
    pub index: u32,
    /// Move the fader to this level in dB instead of reading it.
    #[arg(long, value_name = "DB", allow_negative_numbers = true)]
    pub set: Option<f64>,
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    /// Exit after receiving N messages.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}
