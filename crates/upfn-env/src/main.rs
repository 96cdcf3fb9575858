//! Binary entrypoint for the `env` provider.

use std::process::ExitCode;

use upfn_env::{Environment, ProcessEnvironment};

fn main() -> ExitCode {
    let environment: &dyn Environment = &ProcessEnvironment;
    upfn_protocol::run_provider(&upfn_env::TABLE, environment)
}
