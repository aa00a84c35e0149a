//! Closed enumerations identifying providers, trading pairs, and markets.
//!
//! All tokens are lowercase on the wire (`"binance"`, `"ltcbtc"`). Unknown
//! tokens fail to decode rather than mapping to a default variant.

use serde::{Deserialize, Serialize};

use crate::error::FeedError;

// ---------------------------------------------------------------------------
// API providers
// ---------------------------------------------------------------------------

/// Supported exchange API providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiProvider {
    Binance,
    Luno,
    DummyExchange,
}

impl ApiProvider {
    /// Lowercase wire token, identical to the serde representation.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Binance => "binance",
            Self::Luno => "luno",
            Self::DummyExchange => "dummyexchange",
        }
    }
}

impl std::fmt::Display for ApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for ApiProvider {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binance" => Ok(Self::Binance),
            "luno" => Ok(Self::Luno),
            "dummyexchange" => Ok(Self::DummyExchange),
            other => Err(FeedError::Parse(format!("unknown api provider: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Trading pairs
// ---------------------------------------------------------------------------

/// Supported trading pairs. Each follower instance is bound to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pair {
    Btceur,
    Ltcbtc,
    Btcgbp,
}

impl Pair {
    /// Lowercase token used in stream names and config (`"btceur"`).
    pub fn token(&self) -> &'static str {
        match self {
            Self::Btceur => "btceur",
            Self::Ltcbtc => "ltcbtc",
            Self::Btcgbp => "btcgbp",
        }
    }

    /// Uppercase venue symbol used in REST queries (`"BTCEUR"`).
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Btceur => "BTCEUR",
            Self::Ltcbtc => "LTCBTC",
            Self::Btcgbp => "BTCGBP",
        }
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for Pair {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "btceur" => Ok(Self::Btceur),
            "ltcbtc" => Ok(Self::Ltcbtc),
            "btcgbp" => Ok(Self::Btcgbp),
            other => Err(FeedError::Parse(format!("unknown pair: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Exchange — one market at one provider
// ---------------------------------------------------------------------------

/// A single market: one trading pair at one provider.
///
/// Serializes as `{"provider": "binance", "pair": "ltcbtc"}`. The canonical
/// string form `provider:pair` (via `Display`/`FromStr`) is stable and
/// deterministic, so it can be used as a JSON-friendly mapping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exchange {
    pub provider: ApiProvider,
    pub pair: Pair,
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.provider, self.pair)
    }
}

impl std::str::FromStr for Exchange {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (provider, pair) = s
            .split_once(':')
            .ok_or_else(|| FeedError::Parse(format!("exchange key missing ':': {s}")))?;
        Ok(Self {
            provider: provider.parse()?,
            pair: pair.parse()?,
        })
    }
}
