use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cmd::{ConnectionArgs, ListenArgs};
use crate::exit::{client_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_message, OutputFormat};

/// Mixers drop a `/xremote` subscription after ~10 s.
const RENEW_INTERVAL: Duration = Duration::from_secs(9);

const POLL: Duration = Duration::from_millis(200);

pub fn run(args: ListenArgs, conn: &ConnectionArgs, format: OutputFormat) -> CliResult<i32> {
    let client = conn.connect()?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    client
        .remote()
        .map_err(|err| client_error("subscribe failed", err))?;
    let mut renewed = Instant::now();
    let mut printed = 0usize;

    while running.load(Ordering::SeqCst) {
        if renewed.elapsed() >= RENEW_INTERVAL {
            debug!("renewing /xremote subscription");
            client
                .remote()
                .map_err(|err| client_error("subscribe failed", err))?;
            renewed = Instant::now();
        }

        let Some(msg) = client
            .receive(POLL)
            .map_err(|err| client_error("receive failed", err))?
        else {
            continue;
        };

        print_message(&msg, format);
        printed = printed.saturating_add(1);

        if let Some(count) = args.count {
            if printed >= count {
                break;
            }
        }
    }

    client.close();
    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}
