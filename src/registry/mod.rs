//! Command table: providers, operations and parameter descriptors.
//!
//! The table is declared once at startup and read-only afterwards.
//! Each provider owns an ordered list of operations; each operation
//! carries its parameter descriptors, a visibility flag, an optional
//! one-line summary and a handler. Handlers are factories producing a
//! ready-to-call function value, so whether an operation needs fresh
//! per-call provider state is hidden behind [`Handler::prepare`].
//!
//! Registration enforces the table invariants (operation names unique
//! within a provider, aliases unique across the registry) and rejects
//! violations with a [`RegistryError`].

use std::fmt;
use std::rc::Rc;

use anyhow::Result;
use thiserror::Error;

/// Separator between a provider alias and an operation name in a
/// command token, as in `db:list`.
pub const ALIAS_SEPARATOR: char = ':';

/// Name prefix reserved for lifecycle operations. These are never
/// listed and never dispatchable.
pub const LIFECYCLE_PREFIX: &str = "__";

/// Minimum column width for the padded help listing.
pub const DEFAULT_PAD_WIDTH: usize = 10;

/// Whether `name` denotes a lifecycle operation.
pub fn is_lifecycle(name: &str) -> bool {
    name.starts_with(LIFECYCLE_PREFIX)
}

/* -------------------------------------------------------------------------- */
/* Parameter Descriptors                                                      */
/* -------------------------------------------------------------------------- */

/// Declared kind of one parameter.
///
/// Only `Int` and `Float` are validated against raw tokens. Any other
/// declared type name is rendered in usage text but accepts any
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    Float,
    /// Some other declared type name, e.g. `string`.
    Declared(String),
    /// No declared type.
    Untyped,
}

impl ParamKind {
    /// Type label for usage text; `None` when untyped.
    pub fn label(&self) -> Option<&str> {
        match self {
            ParamKind::Int => Some("int"),
            ParamKind::Float => Some("float"),
            ParamKind::Declared(name) => Some(name),
            ParamKind::Untyped => None,
        }
    }
}

/// Statically known default value of an optional parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamDefault {
    /// Explicit absence-of-value default; rendered as the literal `NULL`.
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl fmt::Display for ParamDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamDefault::Null => f.write_str("NULL"),
            ParamDefault::Int(v) => write!(f, "{v}"),
            ParamDefault::Float(v) => write!(f, "{v}"),
            ParamDefault::Bool(v) => write!(f, "{v}"),
            ParamDefault::Text(v) => f.write_str(v),
        }
    }
}

/// One positional parameter of an operation, in declaration order.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    /// A present default makes the parameter optional.
    pub default: Option<ParamDefault>,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>, kind: ParamKind) -> Self {
        ParamSpec {
            name: name.into(),
            kind,
            default: None,
        }
    }

    pub fn optional(name: impl Into<String>, kind: ParamKind, default: ParamDefault) -> Self {
        ParamSpec {
            name: name.into(),
            kind,
            default: Some(default),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/* -------------------------------------------------------------------------- */
/* Handlers                                                                   */
/* -------------------------------------------------------------------------- */

/// A ready-to-call operation, bound to any per-call state it needs.
/// Receives the validated raw tokens (strings stay strings; coercion
/// is the provider's own responsibility).
pub type Invocation = Box<dyn FnOnce(&[String]) -> Result<()>>;

/// How an operation is called.
pub enum Handler {
    /// Provider-level operation with no per-call state.
    Shared(Rc<dyn Fn(&[String]) -> Result<()>>),
    /// Instance-scoped operation. The factory builds fresh provider
    /// state for a single dispatch.
    PerCall(Rc<dyn Fn() -> Invocation>),
}

impl Handler {
    pub fn shared(f: impl Fn(&[String]) -> Result<()> + 'static) -> Self {
        Handler::Shared(Rc::new(f))
    }

    pub fn per_call(factory: impl Fn() -> Invocation + 'static) -> Self {
        Handler::PerCall(Rc::new(factory))
    }

    /// Build the callable for one dispatch. Per-call provider state is
    /// only constructed here, and only for instance-scoped operations.
    pub fn prepare(&self) -> Invocation {
        match self {
            Handler::Shared(f) => {
                let f = Rc::clone(f);
                Box::new(move |args| f(args))
            }
            Handler::PerCall(factory) => factory(),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Shared(_) => f.write_str("Handler::Shared(..)"),
            Handler::PerCall(_) => f.write_str("Handler::PerCall(..)"),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Operations                                                                 */
/* -------------------------------------------------------------------------- */

/// One operation entry in the command table.
#[derive(Debug)]
pub struct OpSpec {
    pub name: String,
    /// First descriptive line is shown in the help listing.
    pub summary: Option<String>,
    /// Non-public operations resolve but are never invoked.
    pub public: bool,
    pub params: Vec<ParamSpec>,
    pub handler: Handler,
}

impl OpSpec {
    pub fn new(name: impl Into<String>, handler: Handler) -> Self {
        OpSpec {
            name: name.into(),
            summary: None,
            public: true,
            params: Vec::new(),
            handler,
        }
    }

    pub fn with_summary(mut self, text: impl Into<String>) -> Self {
        self.summary = Some(text.into());
        self
    }

    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Mark the operation non-public: describable, but never invocable.
    pub fn hidden(mut self) -> Self {
        self.public = false;
        self
    }

    pub fn is_lifecycle(&self) -> bool {
        is_lifecycle(&self.name)
    }
}

/* -------------------------------------------------------------------------- */
/* Providers                                                                  */
/* -------------------------------------------------------------------------- */

/// A named collection of operations, optionally registered under a
/// short alias that namespaces its commands.
#[derive(Debug)]
pub struct Provider {
    pub name: String,
    pub alias: Option<String>,
    pub ops: Vec<OpSpec>,
}

impl Provider {
    pub fn new(name: impl Into<String>) -> Self {
        Provider {
            name: name.into(),
            alias: None,
            ops: Vec::new(),
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Provider {
            name: name.into(),
            alias: Some(alias.into()),
            ops: Vec::new(),
        }
    }

    pub fn with_op(mut self, op: OpSpec) -> Self {
        self.ops.push(op);
        self
    }

    /// Descriptor lookup by bare operation name. `None` when the
    /// operation does not exist on this provider.
    pub fn describe(&self, name: &str) -> Option<&OpSpec> {
        self.ops.iter().find(|op| op.name == name)
    }

    /// Display name of an operation: `alias:name` when aliased,
    /// the bare name otherwise.
    pub fn qualified(&self, op_name: &str) -> String {
        match &self.alias {
            Some(alias) => format!("{alias}{ALIAS_SEPARATOR}{op_name}"),
            None => op_name.to_string(),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Registry                                                                   */
/* -------------------------------------------------------------------------- */

/// Violation of a command-table invariant. A configuration bug, not a
/// user input error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("provider alias '{0}' is already registered")]
    DuplicateAlias(String),
    #[error("operation '{name}' declared twice on provider '{provider}'")]
    DuplicateOperation { provider: String, name: String },
}

/// Ordered collection of providers. Insertion order is authoritative:
/// it drives both the help listing and resolution tie-breaks (first
/// match wins).
#[derive(Debug, Default)]
pub struct Registry {
    providers: Vec<Provider>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Convenience for tools driven by a single unaliased provider.
    pub fn single(provider: Provider) -> Result<Self, RegistryError> {
        let mut registry = Registry::new();
        registry.register(provider)?;
        Ok(registry)
    }

    pub fn register(&mut self, provider: Provider) -> Result<(), RegistryError> {
        for (i, op) in provider.ops.iter().enumerate() {
            if provider.ops[..i].iter().any(|prev| prev.name == op.name) {
                return Err(RegistryError::DuplicateOperation {
                    provider: provider.name.clone(),
                    name: op.name.clone(),
                });
            }
        }
        if let Some(alias) = &provider.alias
            && self
                .providers
                .iter()
                .any(|p| p.alias.as_deref() == Some(alias.as_str()))
        {
            return Err(RegistryError::DuplicateAlias(alias.clone()));
        }
        self.providers.push(provider);
        Ok(())
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }
}

/* --------------------------------- Tests ---------------------------------- */
