//! Reflective field reads through a record's field table.
//!
//! A reflective accessor does not know where its field lives. On first use
//! it locates the field by name in [`Record::FIELDS`] and stores the index in
//! a process-wide slot; every later read goes straight to
//! [`Record::field_ref`] with that index and downcasts the result.
//!
//! The slot is a `OnceLock`, so concurrent first reads race safely: exactly
//! one of them runs the lookup and all of them observe the same index.

use std::fmt;
use std::sync::OnceLock;

use super::{AccessError, MemberId, Record};

/// The lazily initialized read handle of one reflective field.
///
/// The handle caches the field index only, so one slot can serve every
/// instantiation of a generic record.
pub type HandleSlot = OnceLock<Result<usize, AccessError>>;

/// Reads a field through a record's field table.
///
/// # Type Parameters
///
/// - `T`: The record type
/// - `F`: The field type
pub struct ReflectiveAccessor<T, F> {
    slot: fn() -> &'static HandleSlot,
    locate: fn(MemberId) -> Result<usize, AccessError>,
    read: fn(&T, usize) -> Option<F>,
}

impl<T, F> ReflectiveAccessor<T, F> {
    /// Creates a reflective accessor.
    ///
    /// # Arguments
    ///
    /// * `slot` - Returns the process-wide handle slot for this field
    /// * `locate` - Finds the field index by member identity, usually [`locate_field`]
    /// * `read` - Reads the field at an index, usually [`read_field`]
    #[must_use]
    pub const fn new(
        slot: fn() -> &'static HandleSlot,
        locate: fn(MemberId) -> Result<usize, AccessError>,
        read: fn(&T, usize) -> Option<F>,
    ) -> Self {
        Self { slot, locate, read }
    }

    /// Returns the field index, resolving it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when the record has no field of that name.
    pub fn handle(&self, member: MemberId) -> Result<usize, AccessError> {
        *(self.slot)().get_or_init(|| {
            let resolved = (self.locate)(member);
            match &resolved {
                Ok(index) => tracing::debug!(%member, index, "resolved reflective field handle"),
                Err(_) => tracing::warn!(%member, "reflective field handle could not be resolved"),
            }
            resolved
        })
    }

    /// Returns `true` once the handle has been resolved.
    pub fn is_resolved(&self) -> bool {
        (self.slot)().get().is_some()
    }

    /// Reads the field from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when the handle cannot be resolved or the
    /// table entry does not hold a value of type `F`.
    pub fn read(&self, member: MemberId, source: &T) -> Result<F, AccessError> {
        let index = self.handle(member)?;
        (self.read)(source, index).ok_or_else(|| {
            tracing::warn!(%member, index, "reflective field read failed");
            AccessError::new(member)
        })
    }
}

impl<T, F> Clone for ReflectiveAccessor<T, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, F> Copy for ReflectiveAccessor<T, F> {}

impl<T, F> fmt::Debug for ReflectiveAccessor<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ReflectiveAccessor")
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}

/// Finds the index of `member` in the field table of `T`.
///
/// # Errors
///
/// Returns [`AccessError`] when `T` has no field with the member's name.
pub fn locate_field<T: Record>(member: MemberId) -> Result<usize, AccessError> {
    T::FIELDS
        .iter()
        .position(|name| *name == member.name())
        .ok_or_else(|| AccessError::new(member))
}

/// Reads the field at `index` of `source` as an owned `F`.
///
/// Returns `None` when the index is out of range or the field is not an `F`.
pub fn read_field<T: Record, F: Clone + 'static>(source: &T, index: usize) -> Option<F> {
    source.field_ref(index)?.downcast_ref::<F>().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::any::Any;

    struct Account {
        owner: String,
        balance: i64,
    }

    impl Record for Account {
        const FIELDS: &'static [&'static str] = &["owner", "balance"];

        fn field_ref(&self, index: usize) -> Option<&dyn Any> {
            match index {
                0 => Some(&self.owner),
                1 => Some(&self.balance),
                _ => None,
            }
        }
    }

    fn balance_slot() -> &'static HandleSlot {
        static SLOT: HandleSlot = OnceLock::new();
        &SLOT
    }

    fn missing_slot() -> &'static HandleSlot {
        static SLOT: HandleSlot = OnceLock::new();
        &SLOT
    }

    fn mistyped_slot() -> &'static HandleSlot {
        static SLOT: HandleSlot = OnceLock::new();
        &SLOT
    }

    fn account() -> Account {
        Account {
            owner: "ann".to_string(),
            balance: 120,
        }
    }

    #[rstest]
    fn test_locate_field_by_name() {
        let member = MemberId::new("Account", "balance");
        assert_eq!(locate_field::<Account>(member), Ok(1));
    }

    #[rstest]
    fn test_locate_unknown_field_fails() {
        let member = MemberId::new("Account", "currency");
        assert_eq!(
            locate_field::<Account>(member),
            Err(AccessError::new(member))
        );
    }

    #[rstest]
    fn test_read_resolves_handle_once() {
        let accessor: ReflectiveAccessor<Account, i64> =
            ReflectiveAccessor::new(balance_slot, locate_field::<Account>, read_field::<Account, i64>);
        let member = MemberId::new("Account", "balance");

        assert_eq!(accessor.read(member, &account()), Ok(120));
        assert!(accessor.is_resolved());
        assert_eq!(accessor.read(member, &account()), Ok(120));
    }

    #[rstest]
    fn test_missing_field_is_opaque_error() {
        let accessor: ReflectiveAccessor<Account, i64> =
            ReflectiveAccessor::new(missing_slot, locate_field::<Account>, read_field::<Account, i64>);
        let member = MemberId::new("Account", "currency");

        assert_eq!(accessor.read(member, &account()), Err(AccessError::new(member)));
    }

    #[rstest]
    fn test_type_mismatch_is_opaque_error() {
        let accessor: ReflectiveAccessor<Account, u8> =
            ReflectiveAccessor::new(mistyped_slot, locate_field::<Account>, read_field::<Account, u8>);
        let member = MemberId::new("Account", "owner");

        assert_eq!(accessor.read(member, &account()), Err(AccessError::new(member)));
    }
}
