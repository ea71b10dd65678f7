use crate::cmd::{ConnectionArgs, InfoArgs};
use crate::exit::{client_error, CliError, CliResult, SUCCESS, TIMEOUT};
use crate::output::{print_info, OutputFormat};

pub fn run(_args: InfoArgs, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let timeout = conn.reply_timeout()?;
    let client = conn.connect()?;

    let info = client
        .info(timeout)
        .map_err(|err| client_error("info failed", err))?
        .ok_or_else(|| {
            CliError::new(
                TIMEOUT,
                format!("mixer did not answer within {}ms", timeout.as_millis()),
            )
        })?;
    print_info(&info, client.device_kind().name(), format);

    client.close();
    Ok(SUCCESS)
}
