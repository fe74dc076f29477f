//! Quantity adjustments applied by the construction and production engines.
//!
//! Three primitives, three floor rules:
//!
//! - [`Ledger::deduct_clamped`] pays a construction cost and floors at zero.
//! - [`Ledger::consume_tool`] uses up one tool and floors at zero.
//! - [`Ledger::apply_delta`] applies a day's net production with no floor,
//!   creating the entry when the kind is missing.
//!
//! None of them is [`Ledger::deduct`], which fails
//! instead of clamping.

use settlement_types::{Resource, ResourceId, ResourceKey, ResourceKind};

use crate::{Ledger, LedgerError};

impl Ledger<'_> {
    /// Take `quantity` from the first entry of `kind`, never going below zero.
    ///
    /// Returns the id of the entry charged, or `None` when the ledger holds
    /// nothing of that kind (nothing is charged then).
    pub fn deduct_clamped(&mut self, kind: ResourceKind, quantity: u32) -> Option<ResourceId> {
        let entry = self.entries_mut().iter_mut().find(|r| r.kind == kind)?;
        entry.amount = entry.amount.saturating_sub(i64::from(quantity)).max(0);
        tracing::debug!(id = %entry.id, %kind, quantity, remaining = entry.amount, "Charged construction cost");
        Some(entry.id)
    }

    /// Use up one unit of the first tool named `name` (case-insensitive).
    ///
    /// Returns the id of the tool entry, or `None` when no such tool exists.
    pub fn consume_tool(&mut self, name: &str) -> Option<ResourceId> {
        let key = ResourceKey::tool(name);
        let entry = self.entries_mut().iter_mut().find(|r| key.matches(r))?;
        entry.amount = entry.amount.saturating_sub(1).max(0);
        tracing::debug!(id = %entry.id, tool = %entry.name, remaining = entry.amount, "Consumed tool");
        Some(entry.id)
    }

    /// Add a signed daily delta to the first entry of `kind`.
    ///
    /// No floor is applied, so consumption can leave the entry negative.
    /// When the ledger holds nothing of that kind a new entry named after the
    /// kind is appended holding `delta`, which may itself be negative.
    ///
    /// # Errors
    ///
    /// [`LedgerError::ArithmeticOverflow`] if the amount or new id overflows.
    pub fn apply_delta(&mut self, kind: ResourceKind, delta: i64) -> Result<ResourceId, LedgerError> {
        if let Some(entry) = self.entries_mut().iter_mut().find(|r| r.kind == kind) {
            entry.amount = entry
                .amount
                .checked_add(delta)
                .ok_or(LedgerError::ArithmeticOverflow)?;
            return Ok(entry.id);
        }

        let id = self.next_id()?;
        self.entries_mut().push(Resource {
            id,
            kind,
            name: kind.as_str().to_owned(),
            amount: delta,
            is_tool: kind == ResourceKind::Tool,
        });
        tracing::debug!(%id, %kind, amount = delta, "Production created ledger entry");
        Ok(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use settlement_types::NewResource;

    use super::*;

    fn seeded() -> Vec<Resource> {
        let mut entries = Vec::new();
        let mut ledger = Ledger::new(&mut entries);
        ledger
            .upsert(&NewResource::material(ResourceKind::Ordinary, "Wood", 10))
            .unwrap();
        ledger
            .upsert(&NewResource::material(ResourceKind::Ordinary, "Stone", 40))
            .unwrap();
        ledger.upsert(&NewResource::tool("Axe", 1)).unwrap();
        entries
    }

    fn amount_of(entries: &[Resource], id: u32) -> Option<i64> {
        entries
            .iter()
            .find(|r| r.id == ResourceId::new(id))
            .map(|r| r.amount)
    }

    #[test]
    fn deduct_clamped_charges_first_entry_of_kind_only() {
        let mut entries = seeded();
        let charged = Ledger::new(&mut entries).deduct_clamped(ResourceKind::Ordinary, 4);
        assert_eq!(charged, Some(ResourceId::new(1)));
        assert_eq!(amount_of(&entries, 1), Some(6));
        assert_eq!(amount_of(&entries, 2), Some(40));
    }

    #[test]
    fn deduct_clamped_floors_at_zero() {
        let mut entries = seeded();
        Ledger::new(&mut entries).deduct_clamped(ResourceKind::Ordinary, 25);
        assert_eq!(amount_of(&entries, 1), Some(0));
    }

    #[test]
    fn deduct_clamped_missing_kind_is_noop() {
        let mut entries = seeded();
        let before = entries.clone();
        assert_eq!(Ledger::new(&mut entries).deduct_clamped(ResourceKind::Rare, 1), None);
        assert_eq!(entries, before);
    }

    #[test]
    fn consume_tool_takes_one_unit_and_floors() {
        let mut entries = seeded();
        let mut ledger = Ledger::new(&mut entries);
        assert_eq!(ledger.consume_tool("axe"), Some(ResourceId::new(3)));
        assert_eq!(ledger.consume_tool("AXE"), Some(ResourceId::new(3)));
        assert_eq!(amount_of(&entries, 3), Some(0));
    }

    #[test]
    fn consume_tool_ignores_non_tools() {
        let mut entries = seeded();
        assert_eq!(Ledger::new(&mut entries).consume_tool("Wood"), None);
        assert_eq!(amount_of(&entries, 1), Some(10));
    }

    #[test]
    fn apply_delta_may_go_negative() {
        let mut entries = seeded();
        let id = Ledger::new(&mut entries)
            .apply_delta(ResourceKind::Ordinary, -15)
            .unwrap();
        assert_eq!(id, ResourceId::new(1));
        assert_eq!(amount_of(&entries, 1), Some(-5));
    }

    #[test]
    fn apply_delta_creates_missing_kind() {
        let mut entries = seeded();
        let id = Ledger::new(&mut entries)
            .apply_delta(ResourceKind::Mystical, 3)
            .unwrap();
        assert_eq!(id, ResourceId::new(4));
        let created = entries.iter().find(|r| r.id == id).unwrap();
        assert_eq!(created.name, "Mystical");
        assert_eq!(created.amount, 3);
        assert!(!created.is_tool);
    }

    #[test]
    fn apply_delta_creates_negative_entry() {
        let mut entries = Vec::new();
        Ledger::new(&mut entries)
            .apply_delta(ResourceKind::Special, -2)
            .unwrap();
        assert_eq!(amount_of(&entries, 1), Some(-2));
    }

    #[test]
    fn apply_delta_for_tool_kind_creates_tool_entry() {
        let mut entries = Vec::new();
        Ledger::new(&mut entries)
            .apply_delta(ResourceKind::Tool, 1)
            .unwrap();
        assert!(entries.first().is_some_and(|r| r.is_tool));
    }
}
