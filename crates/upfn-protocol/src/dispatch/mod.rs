//! Operation tables and exact-match dispatch.
//!
//! Each provider declares a `const` [`OperationTable`] mapping function names
//! to handlers. Handlers receive an [`Invocation`] giving access to the
//! request parameters, the host context and the provider's backend (the
//! collaborator the operations delegate to, such as a clock or the process
//! environment). Pure providers use `()` as their backend.
//!
//! Lookup is a single case-sensitive comparison against every entry; aliases
//! are simply extra entries pointing at the same handler.

use tracing::debug;

use crate::error::{OperationError, ProtocolError};
use crate::params::Params;
use crate::protocol::{Evaluated, Request};

/// Result type returned by operation handlers.
pub type OperationResult = Result<Evaluated, OperationError>;

/// Everything an operation handler may look at.
#[derive(Debug)]
pub struct Invocation<'a, B: ?Sized = ()> {
    request: &'a Request,
    backend: &'a B,
}

impl<'a, B: ?Sized> Invocation<'a, B> {
    /// Binds a request to a backend.
    #[must_use]
    pub const fn new(request: &'a Request, backend: &'a B) -> Self {
        Self { request, backend }
    }

    /// Returns the requested function name.
    #[must_use]
    pub const fn function(&self) -> &'a str {
        self.request.function()
    }

    /// Returns the operation parameters.
    #[must_use]
    pub const fn params(&self) -> Params<'a> {
        Params::new(self.request.params())
    }

    /// Returns the host-supplied context.
    #[must_use]
    pub const fn context(&self) -> Params<'a> {
        Params::new(self.request.context())
    }

    /// Returns the provider backend.
    #[must_use]
    pub const fn backend(&self) -> &'a B {
        self.backend
    }
}

/// A named entry in an [`OperationTable`].
pub struct Operation<B: ?Sized + 'static = ()> {
    name: &'static str,
    handler: fn(&Invocation<'_, B>) -> OperationResult,
}

impl<B: ?Sized> Operation<B> {
    /// Registers `handler` under `name`.
    #[must_use]
    pub const fn new(
        name: &'static str,
        handler: fn(&Invocation<'_, B>) -> OperationResult,
    ) -> Self {
        Self { name, handler }
    }

    /// Returns the function name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the handler.
    ///
    /// # Errors
    ///
    /// Propagates the handler's error unchanged.
    pub fn invoke(&self, invocation: &Invocation<'_, B>) -> OperationResult {
        (self.handler)(invocation)
    }
}

/// A provider's fixed mapping from function name to handler.
///
/// # Example
///
/// ```
/// use upfn_protocol::{Evaluated, Invocation, Operation, OperationResult, OperationTable, Request};
///
/// fn shout(call: &Invocation<'_>) -> OperationResult {
///     let text = call.params().required_str("s")?;
///     Ok(Evaluated::string(text.to_uppercase()))
/// }
///
/// const TABLE: OperationTable = OperationTable::new(
///     "demo",
///     &[Operation::new("shout", shout), Operation::new("yell", shout)],
/// );
///
/// let request = Request::new("nope");
/// let error = TABLE.dispatch(&request, &()).expect_err("unknown");
/// assert_eq!(error.to_string(), "Unknown function: nope");
/// assert_eq!(TABLE.names().collect::<Vec<_>>(), ["shout", "yell"]);
/// ```
pub struct OperationTable<B: ?Sized + 'static = ()> {
    provider: &'static str,
    operations: &'static [Operation<B>],
}

impl<B: ?Sized> OperationTable<B> {
    /// Declares a table for the named provider.
    #[must_use]
    pub const fn new(provider: &'static str, operations: &'static [Operation<B>]) -> Self {
        Self {
            provider,
            operations,
        }
    }

    /// Returns the provider name.
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        self.provider
    }

    /// Iterates over the registered function names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.operations.iter().map(Operation::name)
    }

    /// Finds the operation registered under exactly `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'static Operation<B>> {
        self.operations.iter().find(|operation| operation.name == name)
    }

    /// Resolves and runs the requested function.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UnknownFunction`] when the name is not
    /// registered (no handler runs), or the handler's error wrapped in
    /// [`ProtocolError::Operation`].
    pub fn dispatch(&self, request: &Request, backend: &B) -> Result<Evaluated, ProtocolError> {
        let function = request.function();
        let Some(operation) = self.lookup(function) else {
            debug!(provider = self.provider, function, "no operation registered");
            return Err(ProtocolError::UnknownFunction {
                name: function.to_owned(),
            });
        };

        debug!(provider = self.provider, function, "dispatching operation");
        let invocation = Invocation::new(request, backend);
        operation.invoke(&invocation).map_err(ProtocolError::from)
    }
}
