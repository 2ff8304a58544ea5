use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::invocation::Invocation;
use crate::rate_table::{RateSource, StaticRates};

pub const SOURCE_TAG: &str = "StaticRateTable";
pub const PROCESSING_FAILURE_MESSAGE: &str = "Failed to process request";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExchangeRate {
    pub from: String,
    pub to: String,
    pub rate: Decimal,
    pub timestamp: DateTime<Utc>,
    pub source: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MultipleRates {
    pub from: String,
    pub rates: BTreeMap<String, Decimal>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Quote {
    Single(ExchangeRate),
    Multiple(MultipleRates),
}

/// Outcome of a lookup, serialized with a `status` tag.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RateResult {
    Success(Quote),
    Error { message: String },
}

impl RateResult {
    fn error(message: impl Into<String>) -> Self {
        RateResult::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RateResult::Success(_))
    }

    pub fn status_code(&self) -> u16 {
        if self.is_success() { 200 } else { 400 }
    }
}

#[derive(Debug)]
pub struct RateService<S = StaticRates> {
    source: S,
}

impl<S: RateSource> RateService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn get_exchange_rate(&self, from: &str, to: &str, invocation: &Invocation) -> RateResult {
        info!("[{}] Looking up rate: {} -> {}", invocation, from, to);

        match self.source.rate(from, to) {
            Ok(Some(rate)) => {
                info!("[{}] Rate found: {}", invocation, rate);
                RateResult::Success(Quote::Single(ExchangeRate {
                    from: from.to_string(),
                    to: to.to_string(),
                    rate,
                    timestamp: Utc::now(),
                    source: SOURCE_TAG,
                }))
            }
            Ok(None) => {
                warn!("[{}] Unsupported currency pair: {}/{}", invocation, from, to);
                RateResult::error(format!("Unsupported currency pair: {}/{}", from, to))
            }
            Err(err) => {
                error!("[{}] Failed to look up rate {}/{}: {:#}", invocation, from, to, err);
                RateResult::error(PROCESSING_FAILURE_MESSAGE)
            }
        }
    }

    pub fn get_multiple_rates(&self, from: &str, invocation: &Invocation) -> RateResult {
        info!("[{}] Looking up multiple rates for {}", invocation, from);

        match self.source.rates_from(from) {
            Ok(rates) => {
                info!("[{}] Multiple rates found", invocation);
                RateResult::Success(Quote::Multiple(MultipleRates {
                    from: from.to_string(),
                    rates,
                    timestamp: Utc::now(),
                }))
            }
            Err(err) => {
                error!("[{}] Failed to look up rates for {}: {:#}", invocation, from, err);
                RateResult::error(PROCESSING_FAILURE_MESSAGE)
            }
        }
    }
}
