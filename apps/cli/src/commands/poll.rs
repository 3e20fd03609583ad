use std::process::ExitCode;

use anyhow::Context;
use beacon_request::{PollingConfig, PollingState};

use crate::cli::PollArgs;
use crate::output::state_json;
use crate::settings::Settings;

/// Attach a poller and stream its state until `--count` settles or Ctrl-C
pub async fn poll(settings: &Settings, args: &PollArgs) -> anyhow::Result<ExitCode> {
    let service = super::service(settings)?;

    let mut config = PollingConfig::new(super::descriptor(&args.request));
    if let Some(interval) = args.interval {
        config = config.with_interval(interval);
    }

    let poller = service.use_request(config);
    let mut updates = poller.subscribe();

    // Without an interval nothing follows the first completion.
    let limit = match (args.count, args.interval) {
        (Some(n), _) => Some(n),
        (None, None) => Some(1),
        (None, Some(_)) => None,
    };
    let mut report = Reporter { limit, settled: 0 };

    let initial = updates.borrow_and_update().clone();
    if report.observe(&initial) {
        poller.detach();
        return Ok(ExitCode::SUCCESS);
    }

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl-C")?;
                tracing::debug!("interrupted");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                if report.observe(&state) {
                    break;
                }
            }
        }
    }

    poller.detach();
    Ok(ExitCode::SUCCESS)
}

struct Reporter {
    limit: Option<usize>,
    settled: usize,
}

impl Reporter {
    /// Print `state`; true once the settled limit is reached
    fn observe(&mut self, state: &PollingState) -> bool {
        println!("{}", state_json(state));
        if state.loading || state.is_initial_request {
            return false;
        }
        self.settled += 1;
        self.limit.is_some_and(|n| self.settled >= n)
    }
}
