//! Quote pricing and crossing avoidance.

use pmm_core::Price;
use rust_decimal::Decimal;

use crate::spread::SpreadPair;

/// Absolute buy/sell prices for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotePair {
    pub buy: Price,
    pub sell: Price,
}

/// Map spreads onto the reference price and clip against the top of book.
///
/// The clip guarantees a freshly submitted quote is never marketable:
/// the buy never improves on the best bid, the sell never improves on the
/// best ask. When the external book is momentarily crossed
/// (`best_bid > best_ask`) the same min/max rule applies unchanged.
pub fn clip_quotes(
    ref_price: Price,
    spreads: &SpreadPair,
    best_bid: Price,
    best_ask: Price,
) -> QuotePair {
    let buy = ref_price * (Decimal::ONE - spreads.bid);
    let sell = ref_price * (Decimal::ONE + spreads.ask);

    QuotePair {
        buy: buy.min(best_bid),
        sell: sell.max(best_ask),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn spreads(bid: Decimal, ask: Decimal) -> SpreadPair {
        SpreadPair { bid, ask }
    }

    #[test]
    fn test_prices_from_spreads() {
        let quotes = clip_quotes(
            Price::new(dec!(2000)),
            &spreads(dec!(0.001), dec!(0.0005)),
            Price::new(dec!(1999.9)),
            Price::new(dec!(2000.1)),
        );
        // 2000 * 0.999 = 1998, 2000 * 1.0005 = 2001; both outside the book
        assert_eq!(quotes.buy, Price::new(dec!(1998.000)));
        assert_eq!(quotes.sell, Price::new(dec!(2001.0000)));
    }

    #[test]
    fn test_clip_prevents_crossing() {
        // Tiny spreads would quote inside the book; the clip pins the buy
        // to the best bid and the sell to the best ask.
        let quotes = clip_quotes(
            Price::new(dec!(2000)),
            &spreads(dec!(0.00001), dec!(0.00001)),
            Price::new(dec!(1999)),
            Price::new(dec!(2001)),
        );
        assert_eq!(quotes.buy, Price::new(dec!(1999)));
        assert_eq!(quotes.sell, Price::new(dec!(2001)));
    }

    #[test]
    fn test_no_cross_invariant_over_inputs() {
        let cases = [
            (dec!(2000), dec!(0.0001), dec!(0.0001), dec!(1999.5), dec!(2000.5)),
            (dec!(2000), dec!(0.01), dec!(0.02), dec!(1999.5), dec!(2000.5)),
            (dec!(0.5), dec!(0.0001), dec!(0.0001), dec!(0.4999), dec!(0.5001)),
            (dec!(30000), dec!(0.000001), dec!(0.000001), dec!(29999), dec!(30001)),
        ];
        for (reference, bid, ask, best_bid, best_ask) in cases {
            let quotes = clip_quotes(
                Price::new(reference),
                &spreads(bid, ask),
                Price::new(best_bid),
                Price::new(best_ask),
            );
            assert!(quotes.buy <= Price::new(best_bid));
            assert!(quotes.sell >= Price::new(best_ask));
        }
    }

    #[test]
    fn test_crossed_book_applies_literal_clip() {
        // best_bid > best_ask: the clip still takes min against the bid and
        // max against the ask, so the pair can itself come out crossed.
        let quotes = clip_quotes(
            Price::new(dec!(2000)),
            &spreads(dec!(0.00001), dec!(0.00001)),
            Price::new(dec!(2002)),
            Price::new(dec!(1998)),
        );
        assert_eq!(quotes.buy, Price::new(dec!(1999.98000)));
        assert_eq!(quotes.sell, Price::new(dec!(2000.02000)));
    }
}
