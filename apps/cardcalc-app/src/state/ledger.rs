//! # Ledger State
//!
//! The calculator screen's draft quantities.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger State Operations                              │
//! │                                                                         │
//! │  UI Action              Command              Ledger Change              │
//! │  ─────────              ───────              ─────────────              │
//! │                                                                         │
//! │  Type in a cell ──────► set_quantity() ────► entry text replaced       │
//! │                                                                         │
//! │  Tap Clear ───────────► clear_ledger() ────► entries.clear()           │
//! │                                                                         │
//! │  Confirm save ────────► confirm_session() ─► snapshot, then clear      │
//! │                                              (after a successful write) │
//! │                                                                         │
//! │  Render ──────────────► get_ledger() ──────► (read only)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use cardcalc_core::QuantityLedger;

/// Shared draft ledger.
///
/// The lock is only ever held inside the closures below, never across an
/// `.await`.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    ledger: Arc<Mutex<QuantityLedger>>,
}

impl LedgerState {
    pub fn new() -> Self {
        LedgerState::default()
    }

    /// Runs `f` with read access to the ledger.
    ///
    /// ```rust,ignore
    /// let total = ledger_state.with_ledger(|l| l.overall_total(&catalog));
    /// ```
    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&QuantityLedger) -> R,
    {
        let ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        f(&ledger)
    }

    /// Runs `f` with write access to the ledger.
    pub fn with_ledger_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut QuantityLedger) -> R,
    {
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardcalc_core::{Denomination, Network};

    #[test]
    fn test_mutations_are_shared_between_clones() {
        let state = LedgerState::new();
        let other = state.clone();

        state.with_ledger_mut(|l| l.set_quantity(Network::Mtn, Denomination::new(100), "2"));

        assert_eq!(
            other.with_ledger(|l| l.quantity(Network::Mtn, Denomination::new(100)).map(String::from)),
            Some("2".to_string())
        );
    }
}
