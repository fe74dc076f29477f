//! The [`Ledger`] handle over a settlement's resource entries.
//!
//! The ledger does not own its entries: it borrows the `Vec` held by a
//! [`Settlement`] so that every change lands directly in the aggregate the
//! caller is about to persist.
//!
//! [`Settlement`]: settlement_types::Settlement

use settlement_types::{NewResource, Resource, ResourceId, ResourceKey, ResourceKind, next_id};

use crate::LedgerError;

/// The first ledger id assigned in an empty ledger.
const FIRST_RESOURCE_ID: ResourceId = ResourceId::new(1);

/// Outcome of [`Ledger::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// The contribution was summed into an existing entry.
    Merged {
        /// The existing entry.
        id: ResourceId,
        /// Its amount after the merge.
        amount: i64,
    },
    /// No entry carried the same identity; a new one was appended.
    Inserted {
        /// The id assigned to the new entry.
        id: ResourceId,
    },
}

impl Upsert {
    /// The id of the entry that now holds the contribution.
    pub const fn id(self) -> ResourceId {
        match self {
            Self::Merged { id, .. } | Self::Inserted { id } => id,
        }
    }
}

/// Mutable view of a settlement's resource entries.
#[derive(Debug)]
pub struct Ledger<'a> {
    entries: &'a mut Vec<Resource>,
}

impl<'a> Ledger<'a> {
    /// Wrap a settlement's entry list.
    pub const fn new(entries: &'a mut Vec<Resource>) -> Self {
        Self { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[Resource] {
        self.entries.as_slice()
    }

    /// The entry carrying `key`, if any.
    pub fn find(&self, key: &ResourceKey) -> Option<&Resource> {
        self.entries.iter().find(|r| key.matches(r))
    }

    /// Add a contribution, merging into the entry with the same identity.
    ///
    /// Tools merge with the tool of the same (case-insensitive) name whatever
    /// its kind; everything else merges on kind plus case-insensitive name.
    /// A merge sums the amounts and keeps the existing id and display name.
    /// Otherwise the contribution is appended under the next unused id.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidAmount`] for a negative contribution,
    /// [`LedgerError::ArithmeticOverflow`] if the sum or id overflows.
    pub fn upsert(&mut self, resource: &NewResource) -> Result<Upsert, LedgerError> {
        if resource.amount < 0 {
            return Err(LedgerError::InvalidAmount(resource.amount));
        }

        let key = ResourceKey::new(resource.kind, &resource.name, resource.is_tool);
        if let Some(existing) = self.entries.iter_mut().find(|r| key.matches(r)) {
            existing.amount = existing
                .amount
                .checked_add(resource.amount)
                .ok_or(LedgerError::ArithmeticOverflow)?;
            tracing::debug!(
                id = %existing.id,
                name = %existing.name,
                amount = existing.amount,
                "Merged into existing ledger entry"
            );
            return Ok(Upsert::Merged {
                id: existing.id,
                amount: existing.amount,
            });
        }

        let id = self.next_id()?;
        self.entries.push(Resource {
            id,
            kind: resource.kind,
            name: resource.name.clone(),
            amount: resource.amount,
            is_tool: resource.is_tool,
        });
        tracing::debug!(%id, name = %resource.name, amount = resource.amount, "Added ledger entry");
        Ok(Upsert::Inserted { id })
    }

    /// Remove `amount` from the entry with exactly this kind and id.
    ///
    /// Returns the remaining amount. Unlike the construction path this never
    /// clamps: asking for more than is held fails and leaves the entry as it
    /// was. `name` is only used to describe the failure.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotFound`], [`LedgerError::InsufficientQuantity`] or
    /// [`LedgerError::InvalidAmount`] for a negative request.
    pub fn deduct(
        &mut self,
        kind: ResourceKind,
        id: ResourceId,
        amount: i64,
        name: &str,
    ) -> Result<i64, LedgerError> {
        if amount < 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let entry = self
            .entries
            .iter_mut()
            .find(|r| r.kind == kind && r.id == id)
            .ok_or(LedgerError::NotFound { kind, id })?;

        if amount > entry.amount {
            return Err(LedgerError::InsufficientQuantity {
                name: name.to_owned(),
                requested: amount,
                available: entry.amount,
            });
        }

        entry.amount = entry
            .amount
            .checked_sub(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(entry.amount)
    }

    /// Sum of every entry's amount.
    ///
    /// # Errors
    ///
    /// [`LedgerError::ArithmeticOverflow`] if the sum overflows.
    pub fn saldo(&self) -> Result<i64, LedgerError> {
        sum_all(self.entries.as_slice())
    }

    /// The next unused entry id.
    pub(crate) fn next_id(&self) -> Result<ResourceId, LedgerError> {
        next_id(self.entries.iter().map(|r| r.id), FIRST_RESOURCE_ID)
            .ok_or(LedgerError::ArithmeticOverflow)
    }

    /// Mutable access for the adjustment primitives.
    pub(crate) fn entries_mut(&mut self) -> &mut Vec<Resource> {
        &mut *self.entries
    }
}

/// Sum of every entry's amount (the settlement's "saldo").
///
/// This counts quantities, not value: ten wood and ten mithril both add ten.
///
/// # Errors
///
/// [`LedgerError::ArithmeticOverflow`] if the sum overflows.
pub fn sum_all(entries: &[Resource]) -> Result<i64, LedgerError> {
    entries.iter().try_fold(0_i64, |total, r| {
        total
            .checked_add(r.amount)
            .ok_or(LedgerError::ArithmeticOverflow)
    })
}

/// The first entry of `kind`, in ledger order.
///
/// Affordability checks and production look at this entry only; several
/// entries of the same kind are never summed.
pub fn first_of_kind(entries: &[Resource], kind: ResourceKind) -> Option<&Resource> {
    entries.iter().find(|r| r.kind == kind)
}
