//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use derive_more::Display;
use rust_decimal::{prelude::ToPrimitive as _, Decimal};
use serde::{Deserialize, Serialize};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        match amount.normalize() {
            a if a.is_integer() => match a.to_i128() {
                Some(i) => write!(f, "{i}{currency}"),
                None => write!(f, "{a}{currency}"),
            },
            a => write!(f, "{a}{currency}"),
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 || !s.is_char_boundary(s.len() - 3) {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency as "UPPERCASE" {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,
    }
}

impl Default for Currency {
    /// The editor works in a single unit of account.
    fn default() -> Self {
        Self::Usd
    }
}

/// Nightly price: a non-negative amount in the property's [`Currency`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero [`Price`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Price`] if the provided `amount` is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (amount >= Decimal::ZERO).then_some(Self(amount))
    }

    /// Indicates whether this [`Price`] is strictly greater than zero.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns the amount of this [`Price`].
    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }

    /// Attaches the provided [`Currency`] to this [`Price`].
    #[must_use]
    pub fn in_currency(self, currency: Currency) -> Money {
        Money {
            amount: self.0,
            currency,
        }
    }
}

impl TryFrom<Decimal> for Price {
    type Error = &'static str;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount).ok_or("negative `Price`")
    }
}

impl From<Price> for Decimal {
    fn from(p: Price) -> Self {
        p.0
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map_err(|_| "invalid amount")
            .and_then(Self::try_from)
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money, Price};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn money_from_str() {
        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            },
        );
        assert_eq!(
            Money::from_str("80EUR").unwrap(),
            Money {
                amount: decimal("80"),
                currency: Currency::Eur,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Us").is_err());
        assert!(Money::from_str("123.45RUB").is_err());
    }

    #[test]
    fn money_to_string() {
        let usd = |s| Money {
            amount: decimal(s),
            currency: Currency::Usd,
        };

        assert_eq!(usd("123.45").to_string(), "123.45USD");
        assert_eq!(usd("123.00").to_string(), "123USD");
        assert_eq!(usd("123").to_string(), "123USD");
    }

    #[test]
    fn price_rejects_negative_amounts() {
        assert!(Price::from_str("-1").is_err());
        assert!(Price::from_str("abc").is_err());

        let zero = Price::from_str("0").unwrap();
        assert!(!zero.is_positive());
        assert!(Price::from_str(" 150.5 ").unwrap().is_positive());
    }

    #[test]
    fn price_attaches_currency() {
        let price = Price::from_str("150").unwrap();
        assert_eq!(
            price.in_currency(Currency::default()).to_string(),
            "150USD",
        );
        assert_eq!(Decimal::from(price), decimal("150"));
    }
}
