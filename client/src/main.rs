use std::{io, process::ExitCode};

use common::config::{defaults::Defaults, flags::ArgParse};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::connection::DBusNotifier;

mod app;
mod connection;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // stdout is reserved for the notification id and the usage text
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();

    let parser = ArgParse::new(Defaults::default());
    let result = app::compute(std::env::args_os().skip(1), &parser, DBusNotifier::connect).await;
    let status = app::report(
        result,
        &parser.usage(),
        &mut io::stdout(),
        &mut io::stderr(),
    );

    ExitCode::from(status)
}
