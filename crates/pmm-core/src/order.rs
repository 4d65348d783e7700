//! Order-related types shared between the strategy and the connector seam.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Price, Size};

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Venue-assigned order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A live order as reported by the venue.
#[derive(Debug, Clone)]
pub struct OpenOrder {
    /// Venue order id, used for cancellation.
    pub id: OrderId,
    /// Side of the resting order.
    pub side: OrderSide,
}

/// A proposed order, before the funding check.
///
/// The funding check may shrink `amount` or drop the intent entirely;
/// the two legs of a quote pair are adjusted independently.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderIntent {
    pub side: OrderSide,
    pub amount: Size,
    pub price: Price,
}

impl OrderIntent {
    pub fn buy(amount: Size, price: Price) -> Self {
        Self {
            side: OrderSide::Buy,
            amount,
            price,
        }
    }

    pub fn sell(amount: Size, price: Price) -> Self {
        Self {
            side: OrderSide::Sell,
            amount,
            price,
        }
    }

    /// An intent whose amount was shrunk to zero carries no order.
    pub fn is_empty(&self) -> bool {
        !self.amount.is_positive()
    }
}

/// A fill notification from the venue.
#[derive(Debug, Clone)]
pub struct FillEvent {
    pub side: OrderSide,
    pub amount: Size,
    pub pair: String,
    pub price: Price,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_display() {
        assert_eq!(OrderSide::Buy.to_string(), "BUY");
        assert_eq!(OrderSide::Sell.to_string(), "SELL");
    }

    #[test]
    fn test_intent_constructors() {
        let buy = OrderIntent::buy(Size::new(dec!(0.01)), Price::new(dec!(1999.5)));
        assert_eq!(buy.side, OrderSide::Buy);
        assert!(!buy.is_empty());

        let drained = OrderIntent::sell(Size::ZERO, Price::new(dec!(2000.5)));
        assert!(drained.is_empty());
    }
}
