//! Alert de-duplication across scan passes.

use std::collections::HashSet;

use crate::domain::PositionKey;

/// Identities already alerted on.
///
/// An identity alerts once while it stays in the results. When a pass no
/// longer reports it, it is forgotten and alerts again if it comes back.
#[derive(Debug, Default)]
pub struct NotificationLedger {
    notified: HashSet<PositionKey>,
}

impl NotificationLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the identities found in a pass and return the ones not yet
    /// alerted, in input order.
    pub fn observe<I>(&mut self, current: I) -> Vec<PositionKey>
    where
        I: IntoIterator<Item = PositionKey>,
    {
        let current: Vec<PositionKey> = current.into_iter().collect();
        let fresh: Vec<PositionKey> = current
            .iter()
            .filter(|key| !self.notified.contains(*key))
            .cloned()
            .collect();

        self.notified = current.into_iter().collect();
        fresh
    }

    /// Whether `key` has been alerted and is still current.
    #[must_use]
    pub fn contains(&self, key: &PositionKey) -> bool {
        self.notified.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notified.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notified.is_empty()
    }
}
