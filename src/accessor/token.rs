//! Concrete accessor token types.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use super::reflective::{HandleSlot, ReflectiveAccessor};
use super::{AccessError, Accessor, MemberId};

/// Reads a field through a plain function.
pub struct DirectAccessor<T, F> {
    read: fn(&T) -> F,
}

impl<T, F> DirectAccessor<T, F> {
    /// Creates a direct accessor from a read function.
    #[must_use]
    pub const fn new(read: fn(&T) -> F) -> Self {
        Self { read }
    }

    /// Reads the field from `source`.
    #[inline]
    pub fn read(&self, source: &T) -> F {
        (self.read)(source)
    }
}

impl<T, F> Clone for DirectAccessor<T, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, F> Copy for DirectAccessor<T, F> {}

/// How a [`FieldToken`] reaches its field.
pub enum Access<T, F> {
    /// The field is visible at the token's declaration site.
    Direct(DirectAccessor<T, F>),
    /// The field is private; it is read through the record's field table.
    Reflective(ReflectiveAccessor<T, F>),
}

impl<T, F> Access<T, F> {
    /// Returns `true` for the reflective variant.
    #[must_use]
    pub const fn is_reflective(&self) -> bool {
        matches!(self, Self::Reflective(_))
    }
}

impl<T, F> Clone for Access<T, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, F> Copy for Access<T, F> {}

impl<T, F> fmt::Debug for Access<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(_) => formatter.write_str("Direct"),
            Self::Reflective(accessor) => write!(formatter, "{accessor:?}"),
        }
    }
}

/// The accessor token generated for one record field.
///
/// Tokens only hold function pointers and static strings, so they are
/// `Copy` and can be declared as constants. Equality and hashing use the
/// [`MemberId`] only.
///
/// # Type Parameters
///
/// - `T`: The record type
/// - `F`: The field type
///
/// # Examples
///
/// ```rust
/// use fieldlens::accessor::{Accessor, FieldToken, MemberId};
///
/// struct Point { x: i32, y: i32 }
///
/// const X: FieldToken<Point, i32> =
///     FieldToken::direct(MemberId::new("Point", "x"), |point: &Point| point.x);
///
/// assert_eq!(X.get(&Point { x: 3, y: 4 }), 3);
/// ```
pub struct FieldToken<T, F> {
    member: MemberId,
    access: Access<T, F>,
    default: Option<fn() -> F>,
    placeholder: Option<fn() -> F>,
    declared_type: Option<&'static str>,
}

impl<T, F> FieldToken<T, F> {
    /// Creates a token from all of its parts.
    ///
    /// This is the constructor `#[derive(Accessors)]` emits.
    #[must_use]
    pub const fn from_parts(
        member: MemberId,
        access: Access<T, F>,
        default: Option<fn() -> F>,
        placeholder: Option<fn() -> F>,
        declared_type: Option<&'static str>,
    ) -> Self {
        Self {
            member,
            access,
            default,
            placeholder,
            declared_type,
        }
    }

    /// Creates a token that reads its field directly.
    #[must_use]
    pub const fn direct(member: MemberId, read: fn(&T) -> F) -> Self {
        Self::from_parts(
            member,
            Access::Direct(DirectAccessor::new(read)),
            None,
            None,
            None,
        )
    }

    /// Creates a token that reads its field through the record's field table.
    #[must_use]
    pub const fn reflective(
        member: MemberId,
        slot: fn() -> &'static HandleSlot,
        locate: fn(MemberId) -> Result<usize, AccessError>,
        read: fn(&T, usize) -> Option<F>,
    ) -> Self {
        Self::from_parts(
            member,
            Access::Reflective(ReflectiveAccessor::new(slot, locate, read)),
            None,
            None,
            None,
        )
    }

    /// Declares the value the builder uses when this member is not set.
    #[must_use]
    pub const fn with_default(mut self, supplier: fn() -> F) -> Self {
        self.default = Some(supplier);
        self
    }

    /// Declares the absent value substituted by incomplete builds.
    #[must_use]
    pub const fn with_placeholder(mut self, supplier: fn() -> F) -> Self {
        self.placeholder = Some(supplier);
        self
    }

    /// Attaches the declared type of the field.
    #[must_use]
    pub const fn with_declared_type(mut self, declared_type: &'static str) -> Self {
        self.declared_type = Some(declared_type);
        self
    }

    /// Returns how this token reaches its field.
    #[must_use]
    pub const fn access(&self) -> &Access<T, F> {
        &self.access
    }
}

impl<T, F> Accessor<T> for FieldToken<T, F> {
    type Field = F;

    fn member(&self) -> MemberId {
        self.member
    }

    fn try_get(&self, source: &T) -> Result<F, AccessError> {
        match &self.access {
            Access::Direct(accessor) => Ok(accessor.read(source)),
            Access::Reflective(accessor) => accessor.read(self.member, source),
        }
    }

    fn default_value(&self) -> Option<F> {
        self.default.map(|supplier| supplier())
    }

    fn placeholder(&self) -> Option<F> {
        self.placeholder.map(|supplier| supplier())
    }

    fn declared_type(&self) -> Option<&'static str> {
        self.declared_type
    }
}

impl<T, F> Clone for FieldToken<T, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, F> Copy for FieldToken<T, F> {}

impl<T, F> PartialEq for FieldToken<T, F> {
    fn eq(&self, other: &Self) -> bool {
        self.member == other.member
    }
}

impl<T, F> Eq for FieldToken<T, F> {}

impl<T, F> Hash for FieldToken<T, F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.member.hash(state);
    }
}

impl<T, F> fmt::Debug for FieldToken<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FieldToken")
            .field("member", &self.member)
            .field("access", &self.access)
            .field("declared_type", &self.declared_type)
            .finish_non_exhaustive()
    }
}

impl<T, F> fmt::Display for FieldToken<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.member)
    }
}

/// An accessor built from a member identity and a closure.
///
/// Use it for records that do not derive their tokens.
///
/// # Examples
///
/// ```rust
/// use fieldlens::accessor::{Accessor, FnAccessor, MemberId};
///
/// let length = FnAccessor::new(MemberId::new("String", "len"), |text: &String| text.len());
/// assert_eq!(length.get(&"four".to_string()), 4);
/// ```
pub struct FnAccessor<T, F, G> {
    member: MemberId,
    getter: G,
    default: Option<fn() -> F>,
    _marker: PhantomData<fn(&T) -> F>,
}

impl<T, F, G> FnAccessor<T, F, G>
where
    G: Fn(&T) -> F,
{
    /// Creates an accessor from a member identity and a getter.
    #[must_use]
    pub const fn new(member: MemberId, getter: G) -> Self {
        Self {
            member,
            getter,
            default: None,
            _marker: PhantomData,
        }
    }

    /// Declares the value the builder uses when this member is not set.
    #[must_use]
    pub fn with_default(self, supplier: fn() -> F) -> Self {
        Self {
            default: Some(supplier),
            ..self
        }
    }
}

impl<T, F, G> Accessor<T> for FnAccessor<T, F, G>
where
    G: Fn(&T) -> F,
{
    type Field = F;

    fn member(&self) -> MemberId {
        self.member
    }

    fn try_get(&self, source: &T) -> Result<F, AccessError> {
        Ok((self.getter)(source))
    }

    fn get(&self, source: &T) -> F {
        (self.getter)(source)
    }

    fn default_value(&self) -> Option<F> {
        self.default.map(|supplier| supplier())
    }
}

impl<T, F, G: Clone> Clone for FnAccessor<T, F, G> {
    fn clone(&self) -> Self {
        Self {
            member: self.member,
            getter: self.getter.clone(),
            default: self.default,
            _marker: PhantomData,
        }
    }
}

impl<T, F, G> PartialEq for FnAccessor<T, F, G> {
    fn eq(&self, other: &Self) -> bool {
        self.member == other.member
    }
}

impl<T, F, G> Eq for FnAccessor<T, F, G> {}

impl<T, F, G> Hash for FnAccessor<T, F, G> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.member.hash(state);
    }
}

impl<T, F, G> fmt::Debug for FnAccessor<T, F, G> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FnAccessor")
            .field("member", &self.member)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[derive(Clone, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    const X: FieldToken<Point, i32> =
        FieldToken::direct(MemberId::new("Point", "x"), |point: &Point| point.x);
    const Y: FieldToken<Point, i32> =
        FieldToken::direct(MemberId::new("Point", "y"), |point: &Point| point.y)
            .with_default(|| 0);

    #[rstest]
    fn test_direct_token_reads_live_value() {
        let point = Point { x: 3, y: 4 };
        assert_eq!(X.get(&point), 3);
        assert_eq!(Y.try_get(&point), Ok(4));
    }

    #[rstest]
    fn test_fn_accessor_identity_is_its_member() {
        type Getter = fn(&Point) -> i32;
        let x: FnAccessor<Point, i32, Getter> =
            FnAccessor::new(MemberId::new("Point", "x"), (|point: &Point| point.x) as Getter);
        let also_x: FnAccessor<Point, i32, Getter> =
            FnAccessor::new(MemberId::new("Point", "x"), (|_: &Point| 0) as Getter);
        let y: FnAccessor<Point, i32, Getter> =
            FnAccessor::new(MemberId::new("Point", "y"), (|point: &Point| point.y) as Getter);

        assert_eq!(x, also_x);
        assert_ne!(x, y);
        let accessors: HashSet<FnAccessor<Point, i32, Getter>> =
            [x, also_x, y].into_iter().collect();
        assert_eq!(accessors.len(), 2);
    }

    #[rstest]
    fn test_token_identity_ignores_access_path() {
        let other = FieldToken::<Point, i32>::direct(MemberId::new("Point", "x"), |_: &Point| 0);
        assert_eq!(X, other);
        assert_ne!(X, Y);

        let tokens: HashSet<FieldToken<Point, i32>> = [X, other, Y].into_iter().collect();
        assert_eq!(tokens.len(), 2);
    }

    #[rstest]
    fn test_token_default_and_metadata() {
        assert_eq!(X.default_value(), None);
        assert_eq!(Y.default_value(), Some(0));
        assert_eq!(X.declared_type(), None);
        assert_eq!(X.with_declared_type("i32").declared_type(), Some("i32"));
        assert!(!X.access().is_reflective());
    }

    #[rstest]
    fn test_token_display_names_member() {
        assert_eq!(X.to_string(), "Point.x");
    }
}
