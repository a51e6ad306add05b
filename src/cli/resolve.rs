//! Command resolution: map the first CLI token to a provider and a
//! bare operation name.
//!
//! Scan order is registry order, then declaration order inside each
//! provider; the first match wins and ties across providers are
//! intentional contract, not accident. Lifecycle-prefixed entries are
//! never considered, even on an exact token match.

use crate::registry::{Provider, Registry};

/// A successful resolution: the owning provider and the bare operation
/// name to invoke (alias prefix already stripped).
#[derive(Debug)]
pub struct Resolution<'r> {
    pub provider: &'r Provider,
    pub operation: String,
    pub via_alias: bool,
}

/// Resolve `token` against the registry. Pure: same inputs, same
/// result. `None` when no provider exposes a matching operation.
pub fn resolve<'r>(registry: &'r Registry, token: &str) -> Option<Resolution<'r>> {
    for provider in registry.providers() {
        for op in provider.ops.iter().filter(|op| !op.is_lifecycle()) {
            // Bare name reaches an aliased provider's operation too,
            // unless an earlier provider shadows it.
            if op.name == token {
                return Some(Resolution {
                    provider,
                    operation: op.name.clone(),
                    via_alias: false,
                });
            }
            if provider.alias.is_some() && provider.qualified(&op.name) == token {
                return Some(Resolution {
                    provider,
                    operation: op.name.clone(),
                    via_alias: true,
                });
            }
        }
    }
    None
}
