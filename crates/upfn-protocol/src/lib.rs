//! Shared protocol for out-of-process function providers.
//!
//! A host templating engine launches a provider binary, writes one JSON
//! [`Request`] naming a function to its stdin and reads one JSON [`Response`]
//! from its stdout. This crate holds everything the providers have in common:
//!
//! - the [`DynamicValue`] model and its advisory [`TypeTag`]s;
//! - lenient parameter coercion through [`Params`];
//! - `const` [`OperationTable`]s and exact-match dispatch;
//! - the stdio codec and the exit-status contract ([`serve`],
//!   [`run_provider`]);
//! - shared collaborators such as [`EntropySource`] and [`Clock`], plus
//!   configuration and telemetry.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::process::ExitCode;
//!
//! use upfn_protocol::{Evaluated, Invocation, Operation, OperationResult, OperationTable};
//!
//! fn upper(call: &Invocation<'_>) -> OperationResult {
//!     let text = call.params().required_str("s")?;
//!     Ok(Evaluated::string(text.to_uppercase()))
//! }
//!
//! const TABLE: OperationTable = OperationTable::new("demo", &[Operation::new("upper", upper)]);
//!
//! fn main() -> ExitCode {
//!     upfn_protocol::run_provider(&TABLE, &())
//! }
//! ```

pub mod clock;
pub mod codec;
pub mod config;
pub mod dispatch;
pub mod entropy;
pub mod error;
pub mod exit;
pub mod params;
pub mod protocol;
pub mod telemetry;
pub mod value;

#[cfg(feature = "test-support")]
pub mod test_support;

#[cfg(test)]
mod tests;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::config::{LogFormat, ProviderConfig};
pub use self::dispatch::{Invocation, Operation, OperationResult, OperationTable};
pub use self::entropy::{EntropySource, OsEntropy, SeededEntropy};
pub use self::error::{EncodeError, ErrorKind, OperationError, ProtocolError};
pub use self::exit::{Outcome, run_provider, serve};
pub use self::params::Params;
pub use self::protocol::{Evaluated, Request, Response};
pub use self::value::{DynamicValue, Mapping, TypeTag};
