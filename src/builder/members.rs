//! The closed member set of a builder.
//!
//! [`Members`] is implemented for tuples of 1 to 25 accessors of the same
//! record type. The tuple fixes both the member order and the value tuple
//! handed to the constructor.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use super::BuilderError;
use crate::accessor::{Accessor, MemberId};
use crate::persistent::PersistentList;

type Value = Arc<dyn Any + Send + Sync>;

/// Per-member values recorded by a builder, most recent first.
#[derive(Clone, Default)]
pub struct Overrides {
    entries: PersistentList<(MemberId, Value)>,
}

impl Overrides {
    /// Creates an empty override list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: PersistentList::new(),
        }
    }

    /// Returns a list with `value` recorded for `member` in front.
    #[must_use]
    pub fn push<F>(&self, member: MemberId, value: F) -> Self
    where
        F: Send + Sync + 'static,
    {
        Self {
            entries: self.entries.cons((member, Arc::new(value))),
        }
    }

    /// Returns the most recent `F` recorded for `member`.
    ///
    /// Values are keyed by member and field type together, so two members
    /// sharing an id but not a type never see each other's values.
    pub fn lookup<F>(&self, member: MemberId) -> Option<F>
    where
        F: Clone + 'static,
    {
        self.entries
            .iter()
            .filter(|(recorded, _)| *recorded == member)
            .find_map(|(_, value)| value.downcast_ref::<F>())
            .cloned()
    }

    /// Returns the number of recorded values, shadowed ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_list()
            .entries(self.entries.iter().map(|(member, _)| member))
            .finish()
    }
}

/// The identity and field type of one builder member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberSlot {
    member: MemberId,
    field_type: TypeId,
    declared_type: Option<&'static str>,
}

impl MemberSlot {
    /// Describes `accessor` as a builder member.
    pub fn of<T, A>(accessor: &A) -> Self
    where
        A: Accessor<T>,
        A::Field: 'static,
    {
        Self {
            member: accessor.member(),
            field_type: TypeId::of::<A::Field>(),
            declared_type: accessor.declared_type(),
        }
    }

    /// Returns the member identity.
    #[must_use]
    pub const fn member(&self) -> MemberId {
        self.member
    }

    /// Returns the `TypeId` of the member's field type.
    #[must_use]
    pub const fn field_type(&self) -> TypeId {
        self.field_type
    }

    /// Returns the declared field type, when the accessor carries it.
    #[must_use]
    pub const fn declared_type(&self) -> Option<&'static str> {
        self.declared_type
    }
}

/// How a missing member is filled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Use the accessor's default, else fail.
    Complete,
    /// Use the accessor's placeholder, else its default, else panic.
    AllowIncomplete,
}

/// A fixed, ordered set of accessors of `T`.
///
/// Implemented for tuples `(A1,)` through `(A1, .., A25)` where every `Ai`
/// is an [`Accessor<T>`]. `Values` is the tuple of their field types, in the
/// same order.
pub trait Members<T>: Send + Sync + 'static {
    /// The per-member values passed to the constructor.
    type Values;

    /// Describes every member, in declaration order.
    fn slots(&self) -> Vec<MemberSlot>;

    /// Records the current value of every member of `source`.
    fn snapshot(&self, source: &T, overrides: Overrides) -> Overrides;

    /// Resolves one value per member.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Incomplete`] naming the first member without
    /// a value under `resolution`.
    fn resolve(
        &self,
        overrides: &Overrides,
        resolution: Resolution,
    ) -> Result<Self::Values, BuilderError>;
}

fn record<T, A>(accessor: &A, source: &T, overrides: &Overrides) -> Overrides
where
    A: Accessor<T>,
    A::Field: Send + Sync + 'static,
{
    overrides.push(accessor.member(), accessor.get(source))
}

fn resolve_member<T, A>(
    accessor: &A,
    overrides: &Overrides,
    resolution: Resolution,
) -> Result<A::Field, BuilderError>
where
    A: Accessor<T>,
    A::Field: Clone + 'static,
{
    let member = accessor.member();
    if let Some(value) = overrides.lookup::<A::Field>(member) {
        tracing::trace!(%member, "member resolved from override");
        return Ok(value);
    }

    let fallback = match resolution {
        Resolution::Complete => accessor.default_value().inspect(|_| {
            tracing::trace!(%member, "member resolved from default");
        }),
        Resolution::AllowIncomplete => accessor
            .placeholder()
            .inspect(|_| tracing::trace!(%member, "member resolved from placeholder"))
            .or_else(|| accessor.default_value()),
    };

    fallback.ok_or_else(|| {
        tracing::debug!(%member, "member has no value");
        BuilderError::Incomplete(member)
    })
}

macro_rules! impl_members {
    ($($accessor:ident),+) => {
        paste::paste! {
            impl<T, $($accessor),+> Members<T> for ($($accessor,)+)
            where
                T: 'static,
                $(
                    $accessor: Accessor<T> + Send + Sync + 'static,
                    <$accessor as Accessor<T>>::Field: Clone + Send + Sync + 'static,
                )+
            {
                type Values = ($(<$accessor as Accessor<T>>::Field,)+);

                fn slots(&self) -> Vec<MemberSlot> {
                    let ($([<$accessor:lower>],)+) = self;
                    vec![$(MemberSlot::of::<T, $accessor>([<$accessor:lower>])),+]
                }

                fn snapshot(&self, source: &T, overrides: Overrides) -> Overrides {
                    let ($([<$accessor:lower>],)+) = self;
                    $(
                        let overrides = record::<T, $accessor>([<$accessor:lower>], source, &overrides);
                    )+
                    overrides
                }

                fn resolve(
                    &self,
                    overrides: &Overrides,
                    resolution: Resolution,
                ) -> Result<Self::Values, BuilderError> {
                    let ($([<$accessor:lower>],)+) = self;
                    Ok(($(
                        resolve_member::<T, $accessor>([<$accessor:lower>], overrides, resolution)?,
                    )+))
                }
            }
        }
    };
}

// Generates one impl per arity, growing the parameter list by one each step.
macro_rules! impl_members_up_to {
    (@step [$($done:ident),*]) => {};
    (@step [$($done:ident),*] $next:ident $(, $rest:ident)*) => {
        impl_members!($($done,)* $next);
        impl_members_up_to!(@step [$($done,)* $next] $($rest),*);
    };
    ($($accessor:ident),+) => {
        impl_members_up_to!(@step [] $($accessor),+);
    };
}

impl_members_up_to!(
    A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12, A13, A14, A15, A16, A17, A18, A19, A20,
    A21, A22, A23, A24, A25
);
