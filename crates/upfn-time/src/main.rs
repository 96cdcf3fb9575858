//! Binary entrypoint for the `time` provider.

use std::process::ExitCode;

use upfn_protocol::{Clock, SystemClock};

fn main() -> ExitCode {
    let clock: &dyn Clock = &SystemClock;
    upfn_protocol::run_provider(&upfn_time::TABLE, clock)
}
