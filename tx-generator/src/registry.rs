use std::collections::HashSet;

/// Transaction ids already emitted as deposits during one generation run.
///
/// Append-only. Ids are kept in insertion order so a member can be sampled by index.
#[derive(Debug, Default)]
pub struct DepositRegistry {
    ids: Vec<u32>,
    seen: HashSet<u32>,
}

impl DepositRegistry {
    #[must_use]
    pub fn new() -> Self {
        DepositRegistry::default()
    }

    /// Returns `false` when `transaction_id` was already registered
    pub fn register(&mut self, transaction_id: u32) -> bool {
        if self.seen.insert(transaction_id) {
            self.ids.push(transaction_id);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn contains(&self, transaction_id: u32) -> bool {
        self.seen.contains(&transaction_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The id at `index` in registration order
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u32> {
        self.ids.get(index).copied()
    }
}
