use crate::cmd::{ConnectionArgs, GetArgs};
use crate::exit::{client_error, CliError, CliResult, SUCCESS, TIMEOUT};
use crate::output::{print_message, OutputFormat};

pub fn run(args: GetArgs, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let timeout = conn.reply_timeout()?;
    let client = conn.connect()?;

    let reply = client
        .query(&args.address, timeout)
        .map_err(|err| client_error("query failed", err))?
        .ok_or_else(|| {
            CliError::new(
                TIMEOUT,
                format!(
                    "no reply to {} within {}ms",
                    args.address,
                    timeout.as_millis()
                ),
            )
        })?;
    print_message(&reply, format);

    client.close();
    Ok(SUCCESS)
}
