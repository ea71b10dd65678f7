use mixosc_units::Param;

use crate::cmd::{ConnectionArgs, FaderArgs};
use crate::exit::{client_error, CliError, CliResult, SUCCESS, TIMEOUT};
use crate::output::{print_value, OutputFormat};

const FADER_SUFFIX: &str = "mix/fader";

pub fn run(args: FaderArgs, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let timeout = conn.reply_timeout()?;
    let client = conn.connect()?;
    let address = client
        .resolver()
        .resolve_path(args.entity, args.index, FADER_SUFFIX)
        .map_err(|err| client_error("cannot address fader", err))?;

    let db = match args.set {
        Some(db) => {
            client
                .set_param(&address, Param::Fader, db)
                .map_err(|err| client_error("set failed", err))?;
            // Report the level the mixer will actually land on.
            Param::Fader.from_wire(Param::Fader.to_wire(db))
        }
        None => client
            .get_param(&address, Param::Fader, timeout)
            .map_err(|err| client_error("query failed", err))?
            .ok_or_else(|| {
                CliError::new(
                    TIMEOUT,
                    format!("no reply to {address} within {}ms", timeout.as_millis()),
                )
            })?,
    };
    print_value(&address, Param::Fader, db, format);

    client.close();
    Ok(SUCCESS)
}
