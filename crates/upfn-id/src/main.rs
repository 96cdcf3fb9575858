//! Binary entrypoint for the `id` provider.

use std::process::ExitCode;

use upfn_id::Generators;

fn main() -> ExitCode {
    upfn_protocol::run_provider(&upfn_id::TABLE, &Generators::system())
}
