use std::collections::BTreeMap;

use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Conversion factors keyed by ordered `(from, to)` pair.
const EXCHANGE_RATES: [((&str, &str), Decimal); 4] = [
    (("USD", "BRL"), dec!(5.15)),
    (("USD", "EUR"), dec!(0.92)),
    (("USD", "GBP"), dec!(0.79)),
    (("BRL", "USD"), dec!(0.19)),
];

/// Returned for any origin currency by the multi-rate lookup.
const MULTIPLE_RATES: [(&str, Decimal); 3] = [
    ("BRL", dec!(5.15)),
    ("EUR", dec!(0.92)),
    ("GBP", dec!(0.79)),
];

/// Where rates come from. Implementations must be safe to share across
/// concurrent invocations.
pub trait RateSource: Send + Sync {
    /// `Ok(None)` means the pair is not supported.
    fn rate(&self, from: &str, to: &str) -> Result<Option<Decimal>>;

    fn rates_from(&self, from: &str) -> Result<BTreeMap<String, Decimal>>;
}

/// The hardcoded, read-only rate table.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticRates;

impl RateSource for StaticRates {
    fn rate(&self, from: &str, to: &str) -> Result<Option<Decimal>> {
        let rate = EXCHANGE_RATES
            .iter()
            .find(|((pair_from, pair_to), _)| *pair_from == from && *pair_to == to)
            .map(|(_, rate)| *rate);

        Ok(rate)
    }

    fn rates_from(&self, _from: &str) -> Result<BTreeMap<String, Decimal>> {
        Ok(MULTIPLE_RATES
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_supported_pairs() {
        let rates = StaticRates;

        assert_eq!(rates.rate("USD", "BRL").unwrap(), Some(dec!(5.15)));
        assert_eq!(rates.rate("USD", "EUR").unwrap(), Some(dec!(0.92)));
        assert_eq!(rates.rate("USD", "GBP").unwrap(), Some(dec!(0.79)));
        assert_eq!(rates.rate("BRL", "USD").unwrap(), Some(dec!(0.19)));
    }

    #[test]
    fn pairs_are_ordered() {
        let rates = StaticRates;

        assert_eq!(rates.rate("EUR", "USD").unwrap(), None);
        assert_eq!(rates.rate("EUR", "JPY").unwrap(), None);
        assert_eq!(rates.rate("usd", "brl").unwrap(), None);
    }

    #[test]
    fn multiple_rates_ignore_origin() {
        let rates = StaticRates;
        let expected: BTreeMap<String, Decimal> = [
            ("BRL".to_string(), dec!(5.15)),
            ("EUR".to_string(), dec!(0.92)),
            ("GBP".to_string(), dec!(0.79)),
        ]
        .into_iter()
        .collect();

        assert_eq!(rates.rates_from("USD").unwrap(), expected);
        assert_eq!(rates.rates_from("JPY").unwrap(), expected);
    }
}
