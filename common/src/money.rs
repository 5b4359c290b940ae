//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};
use serde::{Deserialize, Serialize};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Returns this amount in minor currency units (cents), as payment
    /// processors expect it.
    ///
    /// [`None`] is returned if the amount doesn't fit into [`i64`] minor
    /// units.
    #[must_use]
    pub fn minor_units(&self) -> Option<i64> {
        self.amount
            .checked_mul(Decimal::ONE_HUNDRED)?
            .trunc()
            .to_i64()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(f, "{}{currency}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount}{currency}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
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
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "Pound Sterling."]
        Gbp = 3,
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            },
        );

        assert_eq!(
            Money::from_str("123.45EUR").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Eur,
            },
        );

        assert_eq!(
            Money::from_str("123.45GBP").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Gbp,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Us").is_err());
        assert!(Money::from_str("123.45Usdollar").is_err());

        assert!(Money::from_str("123.00USD").is_ok());
        assert!(Money::from_str("123USD").is_ok());
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            }
            .to_string(),
            "123.45USD",
        );

        assert_eq!(
            Money {
                amount: decimal("123.0"),
                currency: Currency::Usd,
            }
            .to_string(),
            "123USD",
        );
    }

    #[test]
    fn minor_units() {
        let money = |s| Money {
            amount: decimal(s),
            currency: Currency::Usd,
        };

        assert_eq!(money("23").minor_units(), Some(2300));
        assert_eq!(money("10").minor_units(), Some(1000));
        assert_eq!(money("0.5").minor_units(), Some(50));
        assert_eq!(money("123.45").minor_units(), Some(12345));
        // Sub-cent precision is truncated, never rounded up.
        assert_eq!(money("0.019").minor_units(), Some(1));
        assert_eq!(
            money("79228162514264337593543950335").minor_units(),
            None,
        );
    }

    #[test]
    fn serde_roundtrip() {
        let money = Money {
            amount: decimal("23"),
            currency: Currency::Usd,
        };
        let json = serde_json::to_value(money).unwrap();
        assert_eq!(json["currency"], "USD");
        assert_eq!(serde_json::from_value::<Money>(json).unwrap(), money);
    }
}
