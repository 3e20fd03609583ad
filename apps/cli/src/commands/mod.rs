//! Subcommand implementations

mod poll;
mod send;

pub use poll::poll;
pub use send::send;

use anyhow::Context;
use beacon_request::{HttpTransport, RequestDescriptor, RequestService};

use crate::cli::RequestArgs;
use crate::settings::Settings;

fn service(settings: &Settings) -> anyhow::Result<RequestService<HttpTransport>> {
    let transport = HttpTransport::new(settings.http.clone())
        .context("failed to build HTTP transport")?;
    Ok(RequestService::new(transport))
}

fn descriptor(args: &RequestArgs) -> RequestDescriptor {
    let descriptor = RequestDescriptor::new(args.method.clone(), args.path.clone())
        .with_action_type("cli");
    match &args.body {
        Some(body) => descriptor.with_body(body.clone()),
        None => descriptor,
    }
}
