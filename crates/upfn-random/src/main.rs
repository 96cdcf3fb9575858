//! Binary entrypoint for the `random` provider.

use std::process::ExitCode;

use upfn_protocol::{EntropySource, OsEntropy};

fn main() -> ExitCode {
    let entropy: &dyn EntropySource = &OsEntropy;
    upfn_protocol::run_provider(&upfn_random::TABLE, entropy)
}
