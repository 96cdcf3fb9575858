//! Binary entrypoint for the `math` provider.

use std::process::ExitCode;

fn main() -> ExitCode {
    upfn_protocol::run_provider(&upfn_math::TABLE, &())
}
