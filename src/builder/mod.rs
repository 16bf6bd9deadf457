//! A closed-world, persistent builder keyed by accessor tokens.
//!
//! A [`Builder<T>`] is created from a fixed tuple of accessors of `T` and a
//! constructor taking one value per accessor. Values are recorded with
//! [`Builder::with`]; [`Builder::build`] resolves every member and calls the
//! constructor.
//!
//! Builders are immutable: every operation returns a new builder sharing its
//! structure with the receiver, so a partially filled builder can be branched
//! and handed to other threads freely.
//!
//! # Resolution
//!
//! For every member, in declaration order:
//!
//! 1. the most recently recorded value for that member, if any;
//! 2. otherwise the accessor's [default](crate::accessor::Accessor::default_value)
//!    (derived tokens of `Option` fields default to `None`);
//! 3. otherwise [`BuilderError::Incomplete`] naming the member.
//!
//! # Examples
//!
//! ```rust
//! use fieldlens::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq, Accessors)]
//! struct Point {
//!     pub x: i32,
//!     pub y: i32,
//!     pub label: Option<String>,
//! }
//!
//! let builder = Builder::of(
//!     (Point::X, Point::Y, Point::LABEL),
//!     |(x, y, label)| Point { x, y, label },
//! );
//!
//! let origin = builder
//!     .with(&Point::X, 0)
//!     .and_then(|builder| builder.with(&Point::Y, 0))
//!     .and_then(|builder| builder.build());
//! assert_eq!(origin, Ok(Point { x: 0, y: 0, label: None }));
//!
//! let missing_y = builder.with(&Point::X, 1).and_then(|builder| builder.build());
//! assert_eq!(missing_y, Err(BuilderError::Incomplete(Point::Y.member())));
//! ```

mod error;
mod members;

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use static_assertions::assert_impl_all;

use crate::accessor::{Accessor, MemberId};

pub use error::BuilderError;
pub use members::MemberSlot;
pub use members::Members;
pub use members::Overrides;
pub use members::Resolution;

type Snapshot<T> = Arc<dyn Fn(&T) -> Overrides + Send + Sync>;
type Construct<T> = Arc<dyn Fn(&Overrides, Resolution) -> Result<T, BuilderError> + Send + Sync>;

/// An immutable builder for `T` over a closed set of members.
///
/// # Type Parameters
///
/// - `T`: The record type being built
pub struct Builder<T> {
    slots: Arc<[MemberSlot]>,
    overrides: Overrides,
    snapshot: Snapshot<T>,
    construct: Construct<T>,
}

impl<T: 'static> Builder<T> {
    /// Creates a builder over `members` with no recorded values.
    ///
    /// # Arguments
    ///
    /// * `members` - A tuple of 1 to 25 accessors of `T`, in constructor order
    /// * `constructor` - Assembles `T` from the tuple of member values
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldlens::accessor::{Accessor, FieldToken, MemberId};
    /// use fieldlens::builder::Builder;
    ///
    /// struct Celsius { degrees: f64 }
    ///
    /// const DEGREES: FieldToken<Celsius, f64> =
    ///     FieldToken::direct(MemberId::new("Celsius", "degrees"), |c: &Celsius| c.degrees);
    ///
    /// let builder = Builder::of((DEGREES,), |(degrees,)| Celsius { degrees });
    /// assert_eq!(builder.members().collect::<Vec<_>>(), vec![DEGREES.member()]);
    /// ```
    #[must_use]
    pub fn of<M, C>(members: M, constructor: C) -> Self
    where
        M: Members<T>,
        C: Fn(M::Values) -> T + Send + Sync + 'static,
    {
        let slots: Arc<[MemberSlot]> = members.slots().into();
        let members = Arc::new(members);

        let snapshot: Snapshot<T> = {
            let members = Arc::clone(&members);
            Arc::new(move |source: &T| members.snapshot(source, Overrides::new()))
        };
        let construct: Construct<T> = Arc::new(move |overrides: &Overrides, resolution| {
            members.resolve(overrides, resolution).map(&constructor)
        });

        tracing::debug!(members = slots.len(), "builder created");
        Self {
            slots,
            overrides: Overrides::new(),
            snapshot,
            construct,
        }
    }

    /// Returns the member identities in declaration order.
    pub fn members(&self) -> impl ExactSizeIterator<Item = MemberId> + '_ {
        self.slots.iter().map(MemberSlot::member)
    }

    /// Returns the recorded values, most recent first.
    #[must_use]
    pub const fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Returns `true` if `member` is one of this builder's members.
    pub fn contains<A>(&self, member: &A) -> bool
    where
        A: Accessor<T>,
        A::Field: 'static,
    {
        let id = member.member();
        let field_type = TypeId::of::<A::Field>();
        self.slots
            .iter()
            .any(|slot| slot.member() == id && slot.field_type() == field_type)
    }

    /// Returns a builder holding the current value of every member of `source`.
    ///
    /// Values recorded on the receiver are not carried over; the receiver is
    /// unchanged.
    #[must_use]
    pub fn init(&self, source: &T) -> Self {
        Self {
            overrides: (self.snapshot)(source),
            ..self.clone()
        }
    }

    /// Returns a builder with `value` recorded for `member`.
    ///
    /// A later value for the same member shadows earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ForeignMember`] when `member` is not one of the
    /// builder's members or its field type differs from the member's.
    pub fn with<A>(&self, member: &A, value: A::Field) -> Result<Self, BuilderError>
    where
        A: Accessor<T>,
        A::Field: Send + Sync + 'static,
    {
        let id = member.member();
        if !self.contains(member) {
            tracing::debug!(member = %id, "rejected foreign member");
            return Err(BuilderError::ForeignMember(id));
        }
        Ok(Self {
            overrides: self.overrides.push(id, value),
            ..self.clone()
        })
    }

    /// Returns a builder with `None` recorded for an optional member.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ForeignMember`] when `member` is not one of the
    /// builder's members.
    pub fn without<A, V>(&self, member: &A) -> Result<Self, BuilderError>
    where
        A: Accessor<T, Field = Option<V>>,
        V: Send + Sync + 'static,
    {
        self.with(member, None)
    }

    /// Resolves every member and constructs the value.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Incomplete`] naming the first member, in
    /// declaration order, that has neither a recorded value nor a default.
    pub fn build(&self) -> Result<T, BuilderError> {
        (self.construct)(&self.overrides, Resolution::Complete)
    }

    /// Constructs the value, substituting placeholders for missing members.
    ///
    /// A missing member takes the accessor's placeholder, which derived
    /// tokens provide for `Option` fields, and falls back to its default.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Incomplete`] naming the first missing member
    /// that has neither a placeholder nor a default.
    pub fn try_build_allow_incomplete(&self) -> Result<T, BuilderError> {
        (self.construct)(&self.overrides, Resolution::AllowIncomplete)
    }

    /// Like [`try_build_allow_incomplete`](Self::try_build_allow_incomplete),
    /// for callers that know every required member is set.
    ///
    /// # Panics
    ///
    /// Panics naming the member when a missing member has neither a
    /// placeholder nor a default.
    #[must_use]
    pub fn build_allow_incomplete(&self) -> T {
        match self.try_build_allow_incomplete() {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T> Clone for Builder<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
            overrides: self.overrides.clone(),
            snapshot: Arc::clone(&self.snapshot),
            construct: Arc::clone(&self.construct),
        }
    }
}

impl<T> fmt::Debug for Builder<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Builder")
            .field(
                "members",
                &self.slots.iter().map(MemberSlot::member).collect::<Vec<_>>(),
            )
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

assert_impl_all!(Builder<String>: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::FieldToken;
    use rstest::rstest;

    #[derive(Clone, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
        label: Option<String>,
    }

    const X: FieldToken<Point, i32> =
        FieldToken::direct(MemberId::new("Point", "x"), |p: &Point| p.x);
    const Y: FieldToken<Point, i32> =
        FieldToken::direct(MemberId::new("Point", "y"), |p: &Point| p.y);
    const LABEL: FieldToken<Point, Option<String>> =
        FieldToken::direct(MemberId::new("Point", "label"), |p: &Point| p.label.clone())
            .with_default(|| None)
            .with_placeholder(|| None);
    const Z: FieldToken<Point, i32> =
        FieldToken::direct(MemberId::new("Point", "z"), |p: &Point| p.x);

    fn builder() -> Builder<Point> {
        Builder::of((X, Y, LABEL), |(x, y, label)| Point { x, y, label })
    }

    #[rstest]
    fn test_last_write_wins() {
        let point = builder()
            .with(&X, 1)
            .and_then(|b| b.with(&X, 2))
            .and_then(|b| b.with(&Y, 3))
            .and_then(|b| b.build());
        assert_eq!(
            point,
            Ok(Point {
                x: 2,
                y: 3,
                label: None
            })
        );
    }

    #[rstest]
    fn test_foreign_member_rejected() {
        assert_eq!(
            builder().with(&Z, 1).map(|_| ()),
            Err(BuilderError::ForeignMember(Z.member()))
        );
    }

    #[rstest]
    fn test_mistyped_member_rejected() {
        let label_as_text: FieldToken<Point, String> =
            FieldToken::direct(MemberId::new("Point", "label"), |_: &Point| String::new());
        assert_eq!(
            builder().with(&label_as_text, String::new()).map(|_| ()),
            Err(BuilderError::ForeignMember(label_as_text.member()))
        );
    }

    #[rstest]
    fn test_members_sharing_an_id_resolve_by_type() {
        let count: FieldToken<(i32, String), i32> =
            FieldToken::direct(MemberId::new("Pair", "value"), |pair: &(i32, String)| pair.0);
        let text: FieldToken<(i32, String), String> =
            FieldToken::direct(MemberId::new("Pair", "value"), |pair: &(i32, String)| {
                pair.1.clone()
            });
        let pairs = Builder::of((count, text), |(count, text)| (count, text));

        let only_count = pairs.with(&count, 3);
        assert_eq!(
            only_count.as_ref().map(Builder::build),
            Ok(Err(BuilderError::Incomplete(text.member())))
        );

        let both = only_count.and_then(|b| b.with(&text, "three".to_string()));
        assert_eq!(both.and_then(|b| b.build()), Ok((3, "three".to_string())));
        assert_eq!(pairs.init(&(1, "one".to_string())).build(), Ok((1, "one".to_string())));
    }

    #[rstest]
    fn test_build_names_first_missing_member() {
        assert_eq!(builder().build(), Err(BuilderError::Incomplete(X.member())));
    }

    #[rstest]
    fn test_init_round_trips() {
        let point = Point {
            x: 5,
            y: 6,
            label: Some("p".to_string()),
        };
        assert_eq!(builder().init(&point).build(), Ok(point));
    }

    #[rstest]
    fn test_without_clears_optional_member() {
        let point = Point {
            x: 5,
            y: 6,
            label: Some("p".to_string()),
        };
        let cleared = builder().init(&point).without(&LABEL).and_then(|b| b.build());
        assert_eq!(cleared.map(|p| p.label), Ok(None));
    }

    #[rstest]
    fn test_operations_do_not_mutate_receiver() {
        let base = builder();
        let _ = base.with(&X, 1);
        assert!(base.overrides().is_empty());
        assert_eq!(base.members().len(), 3);
    }

    #[rstest]
    fn test_try_build_allow_incomplete_reports_required_member() {
        assert_eq!(
            builder().try_build_allow_incomplete(),
            Err(BuilderError::Incomplete(X.member()))
        );
        let partial = builder()
            .with(&X, 1)
            .and_then(|b| b.with(&Y, 2))
            .and_then(|b| b.try_build_allow_incomplete());
        assert_eq!(
            partial,
            Ok(Point {
                x: 1,
                y: 2,
                label: None
            })
        );
    }

    #[rstest]
    #[should_panic(expected = "Missing value for member Point.x")]
    fn test_build_allow_incomplete_panics_without_placeholder() {
        let _ = builder().build_allow_incomplete();
    }
}
