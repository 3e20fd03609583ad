use std::process::ExitCode;

use crate::cli::RequestArgs;
use crate::output::result_json;
use crate::settings::Settings;

/// Send once, print the result, fail the process on a request error
pub async fn send(settings: &Settings, args: &RequestArgs) -> anyhow::Result<ExitCode> {
    let service = super::service(settings)?;
    let result = service.send(&super::descriptor(args)).await;

    println!("{}", result_json(&result));

    if let Some(error) = &result.error {
        tracing::debug!(%error, "request failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
