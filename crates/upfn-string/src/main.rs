//! Binary entrypoint for the `string` provider.

use std::process::ExitCode;

fn main() -> ExitCode {
    upfn_protocol::run_provider(&upfn_string::TABLE, &())
}
