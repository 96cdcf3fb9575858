//! Binary entrypoint for the `fake` provider.

use std::process::ExitCode;

use upfn_protocol::{EntropySource, OsEntropy};

fn main() -> ExitCode {
    let entropy: &dyn EntropySource = &OsEntropy;
    upfn_protocol::run_provider(&upfn_fake::TABLE, entropy)
}
