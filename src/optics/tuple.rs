//! Lenses focusing on one position of a tuple.
//!
//! Positions are 1-indexed. [`_1`] through [`_32`] are shorthands for
//! [`slot::<N>()`](slot); both work on tuples of up to 32 elements.
//!
//! # Examples
//!
//! ```
//! use fieldlens::optics::{Lens, Setter, _2};
//!
//! let pair = ("x", 1, 'c');
//! assert_eq!(_2().get(&pair), 1);
//! assert_eq!(_2().modify(pair, |n: i32| n + 1), ("x", 2, 'c'));
//! ```

use std::fmt;
use std::marker::PhantomData;

use super::{Lens, Setter};

/// A tuple with a value at 1-indexed position `N`.
pub trait Slot<const N: usize>: Sized {
    /// The type at position `N`.
    type Value;

    /// Returns a reference to the value at position `N`.
    fn slot(&self) -> &Self::Value;

    /// Rebuilds the tuple with the value at position `N` transformed.
    fn map_slot(self, function: &mut dyn FnMut(Self::Value) -> Self::Value) -> Self;
}

macro_rules! impl_slot {
    (($($name:ident),+) $position:tt $index:tt $value:ident) => {
        impl<$($name),+> Slot<$position> for ($($name,)+) {
            type Value = $value;

            fn slot(&self) -> &$value {
                &self.$index
            }

            fn map_slot(self, function: &mut dyn FnMut($value) -> $value) -> Self {
                let mut tuple = self;
                tuple.$index = function(tuple.$index);
                tuple
            }
        }
    };
}

macro_rules! impl_slots {
    ($types:tt $([$position:tt $index:tt $value:ident])+) => {
        $(impl_slot!($types $position $index $value);)+
    };
}

// Implements every position of every arity, adding one position per step.
macro_rules! impl_slots_up_to {
    ([$([$position:tt $index:tt $value:ident])*]) => {};
    (
        [$([$position:tt $index:tt $value:ident])*]
        [$next_position:tt $next_index:tt $next_value:ident]
        $($rest:tt)*
    ) => {
        impl_slots!(
            ($($value,)* $next_value)
            $([$position $index $value])*
            [$next_position $next_index $next_value]
        );
        impl_slots_up_to!(
            [$([$position $index $value])* [$next_position $next_index $next_value]]
            $($rest)*
        );
    };
}

impl_slots_up_to!(
    []
    [1 0 T1] [2 1 T2] [3 2 T3] [4 3 T4] [5 4 T5] [6 5 T6] [7 6 T7] [8 7 T8]
    [9 8 T9] [10 9 T10] [11 10 T11] [12 11 T12] [13 12 T13] [14 13 T14] [15 14 T15]
    [16 15 T16] [17 16 T17] [18 17 T18] [19 18 T19] [20 19 T20] [21 20 T21] [22 21 T22]
    [23 22 T23] [24 23 T24] [25 24 T25] [26 25 T26] [27 26 T27] [28 27 T28] [29 28 T29]
    [30 29 T30] [31 30 T31] [32 31 T32]
);

/// The lens on position `N` of a tuple `T`.
pub struct SlotLens<T, const N: usize> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T, const N: usize> Clone for SlotLens<T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for SlotLens<T, N> {}

impl<T, const N: usize> fmt::Debug for SlotLens<T, N> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "SlotLens<{N}>")
    }
}

impl<T: Slot<N>, const N: usize> Setter<T, T::Value> for SlotLens<T, N> {
    fn modify<F>(&self, source: T, mut function: F) -> T
    where
        F: FnMut(T::Value) -> T::Value,
    {
        source.map_slot(&mut function)
    }
}

impl<T, const N: usize> Lens<T, T::Value> for SlotLens<T, N>
where
    T: Slot<N>,
    T::Value: Clone,
{
    fn get(&self, source: &T) -> T::Value {
        source.slot().clone()
    }
}

/// Returns the lens on 1-indexed position `N` of a tuple.
///
/// # Examples
///
/// ```
/// use fieldlens::optics::{slot, Lens};
///
/// let triple = (1, "two", 3.0);
/// assert_eq!(slot::<_, 2>().get(&triple), "two");
/// ```
#[must_use]
pub const fn slot<T: Slot<N>, const N: usize>() -> SlotLens<T, N> {
    SlotLens {
        _marker: PhantomData,
    }
}

macro_rules! slot_lenses {
    ($($name:ident => $position:literal),+ $(,)?) => {
        $(
            #[doc = concat!("Returns the lens on position ", stringify!($position), " of a tuple.")]
            #[must_use]
            pub const fn $name<T: Slot<$position>>() -> SlotLens<T, $position> {
                slot::<T, $position>()
            }
        )+
    };
}

slot_lenses! {
    _1 => 1,
    _2 => 2,
    _3 => 3,
    _4 => 4,
    _5 => 5,
    _6 => 6,
    _7 => 7,
    _8 => 8,
    _9 => 9,
    _10 => 10,
    _11 => 11,
    _12 => 12,
    _13 => 13,
    _14 => 14,
    _15 => 15,
    _16 => 16,
    _17 => 17,
    _18 => 18,
    _19 => 19,
    _20 => 20,
    _21 => 21,
    _22 => 22,
    _23 => 23,
    _24 => 24,
    _25 => 25,
    _26 => 26,
    _27 => 27,
    _28 => 28,
    _29 => 29,
    _30 => 30,
    _31 => 31,
    _32 => 32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_single_element_tuple() {
        assert_eq!(_1().get(&(5,)), 5);
        assert_eq!(_1().set((5,), 6), (6,));
    }

    #[rstest]
    fn test_slot_replaces_only_its_position() {
        let tuple = (1, "a", 2.5, 'z');
        assert_eq!(_3().set(tuple, 0.5), (1, "a", 0.5, 'z'));
        assert_eq!(_4().get(&tuple), 'z');
    }

    #[rstest]
    fn test_twelve_element_tuple() {
        let tuple = (1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, "twelve".to_string());
        assert_eq!(_12().get(&tuple), "twelve");
        assert_eq!(_11().modify(tuple, |n: i32| n * 2).10, 22);
    }

    #[rstest]
    fn test_thirteen_element_tuple() {
        let tuple = (1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 'm');
        assert_eq!(_13().get(&tuple), 'm');
        let updated = _13().set(tuple, 'n');
        assert_eq!((updated.0, updated.11, updated.12), (1, 12, 'n'));
    }

    #[rstest]
    fn test_slot_composes_into_nested_tuples() {
        let nested = ((1, 2), 3);
        let inner_second = _1::<((i32, i32), i32)>().and_then(_2::<(i32, i32)>());
        assert_eq!(inner_second.get(&nested), 2);
        assert_eq!(inner_second.set(nested, 20), ((1, 20), 3));
    }
}
