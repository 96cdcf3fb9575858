//! The request lifecycle and process exit contract.
//!
//! [`serve`] runs one decode, dispatch and encode cycle over arbitrary
//! streams. [`run_provider`] binds it to the process stdio and is the only
//! thing a provider `main` calls.

use std::io::{self, BufReader, Read, Write};
use std::process::ExitCode;

use tracing::{debug, error, warn};

use crate::codec;
use crate::config::ProviderConfig;
use crate::dispatch::OperationTable;
use crate::error::EncodeError;
use crate::protocol::Response;
use crate::telemetry;

/// Exit status used when the response itself could not be written.
pub const ENCODING_FAILURE_STATUS: u8 = 2;

/// Which response shape was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A value response was written.
    Value,
    /// An error response was written.
    Error,
}

impl Outcome {
    /// Returns the process exit status for this outcome.
    #[must_use]
    pub const fn status(self) -> u8 {
        match self {
            Self::Value => 0,
            Self::Error => 1,
        }
    }

    /// Returns the process exit code for this outcome.
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.status())
    }
}

/// Decodes one request from `reader`, dispatches it and writes the response
/// to `writer`.
///
/// Decode failures and unknown functions never reach an operation handler;
/// they are reported as error responses like any operation failure.
///
/// # Errors
///
/// Returns [`EncodeError`] only when the response cannot be written. Every
/// other failure is reported in-band and yields [`Outcome::Error`].
///
/// # Example
///
/// ```
/// use upfn_protocol::{
///     Evaluated, Invocation, Operation, OperationResult, OperationTable, Outcome, serve,
/// };
///
/// fn ping(_call: &Invocation<'_>) -> OperationResult {
///     Ok(Evaluated::string("pong"))
/// }
///
/// const TABLE: OperationTable = OperationTable::new("demo", &[Operation::new("ping", ping)]);
///
/// let mut out = Vec::new();
/// let outcome = serve(&TABLE, &(), &br#"{"function":"ping"}"#[..], &mut out).expect("encode");
/// assert_eq!(outcome, Outcome::Value);
/// assert_eq!(out, b"{\"value\":\"pong\",\"type\":\"string\"}\n");
/// ```
pub fn serve<B: ?Sized>(
    table: &OperationTable<B>,
    backend: &B,
    reader: impl Read,
    writer: &mut impl Write,
) -> Result<Outcome, EncodeError> {
    let provider = table.provider();
    let (response, outcome) =
        match codec::decode(reader).and_then(|request| table.dispatch(&request, backend)) {
            Ok(evaluated) => {
                debug!(provider, tag = %evaluated.tag(), "operation succeeded");
                (Response::success(evaluated), Outcome::Value)
            }
            Err(failure) => {
                debug!(
                    provider,
                    error.kind = %failure.kind(),
                    error = %failure,
                    "request failed"
                );
                (Response::failure(failure.to_string()), Outcome::Error)
            }
        };
    codec::encode(writer, &response)?;
    Ok(outcome)
}

/// Runs a provider against the process stdio and returns its exit code.
///
/// Configuration is read from the environment and telemetry is installed
/// before the request is read. An unwritable response produces a diagnostic
/// on stderr and exit status [`ENCODING_FAILURE_STATUS`].
pub fn run_provider<B: ?Sized>(table: &OperationTable<B>, backend: &B) -> ExitCode {
    let config = ProviderConfig::from_env();
    if let Err(failure) = telemetry::initialise(&config) {
        writeln!(io::stderr().lock(), "{}: {failure}", table.provider()).ok();
    }
    if let Some(rejected) = config.rejected_log_format() {
        warn!(value = rejected, "unrecognised log format; using compact");
    }

    let stdin = io::stdin();
    let reader = BufReader::new(stdin.lock());
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    match serve(table, backend, reader, &mut writer) {
        Ok(outcome) => outcome.exit_code(),
        Err(failure) => {
            error!(
                provider = table.provider(),
                error.kind = %failure.kind(),
                error = %failure,
                "failed to write response"
            );
            writeln!(io::stderr().lock(), "{}: {failure}", table.provider()).ok();
            ExitCode::from(ENCODING_FAILURE_STATUS)
        }
    }
}
