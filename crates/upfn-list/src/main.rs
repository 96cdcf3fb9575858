//! Binary entrypoint for the `list` provider.

use std::process::ExitCode;

fn main() -> ExitCode {
    upfn_protocol::run_provider(&upfn_list::TABLE, &())
}
