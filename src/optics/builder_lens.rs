//! Lenses that write through a [`Builder`].
//!
//! A [`BuilderLens`] reads its focus with an accessor token and writes it by
//! rebuilding the whole record: `builder.init(source).with(token, value).build()`.
//! Any record with derived tokens and a builder gets field lenses without a
//! hand-written modify function.
//!
//! # Examples
//!
//! ```
//! use fieldlens::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq, Accessors)]
//! struct Account {
//!     pub owner: String,
//!     pub balance: i64,
//! }
//!
//! let builder = Builder::of(
//!     (Account::OWNER, Account::BALANCE),
//!     |(owner, balance)| Account { owner, balance },
//! );
//! let balance = BuilderLens::new(Account::BALANCE, builder).unwrap();
//!
//! let account = Account { owner: "ann".to_string(), balance: 10 };
//! let credited = balance.modify(account, |amount| amount + 5);
//! assert_eq!(credited.balance, 15);
//! assert_eq!(balance.get(&credited), 15);
//! ```

use std::fmt;

use super::{Lens, Setter};
use crate::accessor::Accessor;
use crate::builder::{Builder, BuilderError};

/// A lens reading through an accessor and writing through a builder.
pub struct BuilderLens<T, A> {
    token: A,
    builder: Builder<T>,
}

impl<T, A> BuilderLens<T, A>
where
    T: 'static,
    A: Accessor<T>,
    A::Field: Send + Sync + 'static,
{
    /// Creates a lens for `token` over records assembled by `builder`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ForeignMember`] when `token` is not one of the
    /// builder's members.
    pub fn new(token: A, builder: Builder<T>) -> Result<Self, BuilderError> {
        if builder.contains(&token) {
            Ok(Self { token, builder })
        } else {
            Err(BuilderError::ForeignMember(token.member()))
        }
    }

    /// Returns the accessor this lens reads through.
    #[must_use]
    pub const fn token(&self) -> &A {
        &self.token
    }

    /// Rebuilds `source` with the focused field transformed.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying rebuild.
    pub fn try_modify<F>(&self, source: T, function: F) -> Result<T, BuilderError>
    where
        F: FnOnce(A::Field) -> A::Field,
    {
        let value = function(self.token.get(&source));
        self.builder
            .init(&source)
            .with(&self.token, value)?
            .build()
    }
}

impl<T, A> Setter<T, A::Field> for BuilderLens<T, A>
where
    T: 'static,
    A: Accessor<T>,
    A::Field: Send + Sync + 'static,
{
    /// # Panics
    ///
    /// Panics when the rebuild fails, which requires a record whose tokens
    /// cannot read their own fields.
    fn modify<F>(&self, source: T, function: F) -> T
    where
        F: FnMut(A::Field) -> A::Field,
    {
        match self.try_modify(source, function) {
            Ok(rebuilt) => rebuilt,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T, A> Lens<T, A::Field> for BuilderLens<T, A>
where
    T: 'static,
    A: Accessor<T>,
    A::Field: Send + Sync + 'static,
{
    fn get(&self, source: &T) -> A::Field {
        self.token.get(source)
    }
}

impl<T, A: Clone> Clone for BuilderLens<T, A> {
    fn clone(&self) -> Self {
        Self {
            token: self.token.clone(),
            builder: self.builder.clone(),
        }
    }
}

impl<T, A: fmt::Debug> fmt::Debug for BuilderLens<T, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BuilderLens")
            .field("token", &self.token)
            .field("builder", &self.builder)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::{FieldToken, MemberId};
    use rstest::rstest;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        name: String,
        count: u32,
    }

    const NAME: FieldToken<Item, String> =
        FieldToken::direct(MemberId::new("Item", "name"), |item: &Item| item.name.clone());
    const COUNT: FieldToken<Item, u32> =
        FieldToken::direct(MemberId::new("Item", "count"), |item: &Item| item.count);
    const PRICE: FieldToken<Item, u32> =
        FieldToken::direct(MemberId::new("Item", "price"), |_: &Item| 0);

    fn builder() -> Builder<Item> {
        Builder::of((NAME, COUNT), |(name, count)| Item { name, count })
    }

    fn item() -> Item {
        Item {
            name: "bolt".to_string(),
            count: 3,
        }
    }

    #[rstest]
    fn test_builder_lens_rebuilds_with_new_value() {
        let count = BuilderLens::new(COUNT, builder()).unwrap();
        assert_eq!(
            count.set(item(), 9),
            Item {
                name: "bolt".to_string(),
                count: 9
            }
        );
    }

    #[rstest]
    fn test_builder_lens_rejects_foreign_token() {
        assert_eq!(
            BuilderLens::new(PRICE, builder()).map(|_| ()),
            Err(BuilderError::ForeignMember(PRICE.member()))
        );
    }

    #[rstest]
    fn test_builder_lens_composes_with_function_lens() {
        let name = BuilderLens::new(NAME, builder()).unwrap();
        let first_char = name.and_then(crate::optics::FunctionLens::new(
            |text: &String| text.chars().next(),
            |text: String, function: &mut dyn FnMut(Option<char>) -> Option<char>| {
                match function(text.chars().next()) {
                    Some(head) => std::iter::once(head).chain(text.chars().skip(1)).collect(),
                    None => text,
                }
            },
        ));

        assert_eq!(first_char.get(&item()), Some('b'));
        assert_eq!(first_char.set(item(), Some('c')).name, "colt");
    }
}
