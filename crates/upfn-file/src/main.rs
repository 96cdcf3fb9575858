//! Binary entrypoint for the `file` provider.

use std::process::ExitCode;

use upfn_file::{Filesystem, HostFilesystem};

fn main() -> ExitCode {
    let filesystem: &dyn Filesystem = &HostFilesystem;
    upfn_protocol::run_provider(&upfn_file::TABLE, filesystem)
}
