use mixosc_wire::Argument;

use crate::cmd::{ConnectionArgs, SendArgs};
use crate::exit::{client_error, CliError, CliResult, SUCCESS, TIMEOUT, USAGE};
use crate::output::{print_message, OutputFormat};

pub fn run(args: SendArgs, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let arguments = args
        .args
        .iter()
        .map(|raw| parse_argument(raw))
        .collect::<CliResult<Vec<_>>>()?;
    let timeout = conn.reply_timeout()?;
    let client = conn.connect()?;

    client
        .send(&args.address, &arguments)
        .map_err(|err| client_error("send failed", err))?;

    if args.wait {
        let reply = client
            .receive(timeout)
            .map_err(|err| client_error("receive failed", err))?
            .ok_or_else(|| {
                CliError::new(
                    TIMEOUT,
                    format!("no reply within {}ms", timeout.as_millis()),
                )
            })?;
        print_message(&reply, format);
    }

    client.close();
    Ok(SUCCESS)
}

/// Parse one command-line argument into a typed OSC argument.
///
/// `i:`, `f:`, `s:` and `b:` (hex) force a type. Untyped values become an
/// int if they parse as one, then a finite float, else a string.
pub fn parse_argument(raw: &str) -> CliResult<Argument> {
    if let Some(v) = raw.strip_prefix("i:") {
        return v
            .trim()
            .parse::<i32>()
            .map(Argument::Int)
            .map_err(|err| CliError::new(USAGE, format!("invalid int argument '{v}': {err}")));
    }
    if let Some(v) = raw.strip_prefix("f:") {
        return v
            .trim()
            .parse::<f32>()
            .map(Argument::Float)
            .map_err(|err| CliError::new(USAGE, format!("invalid float argument '{v}': {err}")));
    }
    if let Some(v) = raw.strip_prefix("s:") {
        return Ok(Argument::String(v.to_string()));
    }
    if let Some(v) = raw.strip_prefix("b:") {
        return decode_hex(v).map(Argument::from);
    }

    if let Ok(v) = raw.parse::<i32>() {
        return Ok(Argument::Int(v));
    }
    match raw.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(Argument::Float(v)),
        _ => Ok(Argument::String(raw.to_string())),
    }
}

fn decode_hex(input: &str) -> CliResult<Vec<u8>> {
    let digits = input.trim();
    if digits.len() % 2 != 0 {
        return Err(CliError::new(
            USAGE,
            format!("blob hex '{digits}' has an odd number of digits"),
        ));
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            digits
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| CliError::new(USAGE, format!("invalid blob hex '{digits}'")))
        })
        .collect()
}
