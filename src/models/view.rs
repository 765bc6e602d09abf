use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

use crate::models::fetch::{Endpoint, FetchRequest, HttpVerb};

pub const DEFAULT_SENTIMENT_SIZE: u32 = 400;
pub const DEFAULT_MARKET_DIARY_SIZE: u32 = 250;

/// Discriminant of the views the client knows how to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    PriceHistory,
    TechnicalParameter,
    TechnicalAnalysis,
    FundamentalAnalysis,
    MaxPainHistory,
    MaxPainDistribution,
    CorpBonds,
    Sentiment,
    MarketDiary,
    QuizList,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewKind::PriceHistory => "price history",
            ViewKind::TechnicalParameter => "technical parameter",
            ViewKind::TechnicalAnalysis => "technical analysis",
            ViewKind::FundamentalAnalysis => "fundamental analysis",
            ViewKind::MaxPainHistory => "max pain history",
            ViewKind::MaxPainDistribution => "max pain distribution",
            ViewKind::CorpBonds => "corporate bonds",
            ViewKind::Sentiment => "sentiment",
            ViewKind::MarketDiary => "market diary",
            ViewKind::QuizList => "quiz list",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "d")]
    Day,
    #[serde(rename = "w")]
    Week,
    #[serde(rename = "m")]
    Month,
}

impl Interval {
    pub fn code(&self) -> &'static str {
        match self {
            Interval::Day => "d",
            Interval::Week => "w",
            Interval::Month => "m",
        }
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "d" | "day" | "daily" => Ok(Interval::Day),
            "w" | "week" | "weekly" => Ok(Interval::Week),
            "m" | "month" | "monthly" => Ok(Interval::Month),
            other => Err(format!("unknown interval: {other} (expected d, w or m)")),
        }
    }
}

/// Transformation shown by the technical-parameter chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TpView {
    Sd,
    Hurst,
}

impl TpView {
    pub fn code(&self) -> &'static str {
        match self {
            TpView::Sd => "sd",
            TpView::Hurst => "hurst",
        }
    }
}

impl FromStr for TpView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sd" => Ok(TpView::Sd),
            "hurst" => Ok(TpView::Hurst),
            other => Err(format!("unknown technical parameter view: {other} (expected sd or hurst)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentSource {
    #[serde(rename = "NAAIM")]
    Naaim,
    #[serde(rename = "AAII")]
    Aaii,
    #[serde(rename = "FRA")]
    Fra,
    #[serde(rename = "FRA_SPREAD")]
    FraSpread,
}

impl SentimentSource {
    pub fn code(&self) -> &'static str {
        match self {
            SentimentSource::Naaim => "NAAIM",
            SentimentSource::Aaii => "AAII",
            SentimentSource::Fra => "FRA",
            SentimentSource::FraSpread => "FRA_SPREAD",
        }
    }
}

impl FromStr for SentimentSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "NAAIM" => Ok(SentimentSource::Naaim),
            "AAII" => Ok(SentimentSource::Aaii),
            "FRA" => Ok(SentimentSource::Fra),
            "FRA_SPREAD" => Ok(SentimentSource::FraSpread),
            other => Err(format!("unknown sentiment source: {other}")),
        }
    }
}

/// Exchange the market diary (advance/decline line) is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Nyse,
    Nasdaq,
}

impl Exchange {
    pub fn code(&self) -> &'static str {
        match self {
            Exchange::Nyse => "nyse",
            Exchange::Nasdaq => "nasdaq",
        }
    }
}

impl FromStr for Exchange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nyse" => Ok(Exchange::Nyse),
            "nasdaq" => Ok(Exchange::Nasdaq),
            other => Err(format!("unknown exchange: {other} (expected nyse or nasdaq)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BondType {
    #[serde(rename = "High Yield")]
    HighYield,
    #[serde(rename = "Investment Grade")]
    InvestmentGrade,
}

impl BondType {
    /// Name used both in the URL and in the server's `type` field.
    pub fn label(&self) -> &'static str {
        match self {
            BondType::HighYield => "High Yield",
            BondType::InvestmentGrade => "Investment Grade",
        }
    }
}

impl FromStr for BondType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "hy" | "high yield" => Ok(BondType::HighYield),
            "ig" | "investment grade" => Ok(BondType::InvestmentGrade),
            other => Err(format!("unknown bond type: {other}")),
        }
    }
}

/// A user-triggered view request with the caller's parameters.
///
/// Parameters are embedded in the request as given; the server is the one
/// that validates them.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewRequest {
    PriceHistory { security_id: u64, interval: Interval },
    TechnicalParameter { security_id: u64, view: TpView },
    TechnicalAnalysis { security_id: u64 },
    FundamentalAnalysis { security_id: u64 },
    MaxPainHistory { underlying: String },
    MaxPainDistribution { underlying: String },
    CorpBonds { bond_type: BondType },
    Sentiment { source: SentimentSource, size: u32 },
    MarketDiary { exchange: Exchange, size: u32 },
    QuizList,
}

impl ViewRequest {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewRequest::PriceHistory { .. } => ViewKind::PriceHistory,
            ViewRequest::TechnicalParameter { .. } => ViewKind::TechnicalParameter,
            ViewRequest::TechnicalAnalysis { .. } => ViewKind::TechnicalAnalysis,
            ViewRequest::FundamentalAnalysis { .. } => ViewKind::FundamentalAnalysis,
            ViewRequest::MaxPainHistory { .. } => ViewKind::MaxPainHistory,
            ViewRequest::MaxPainDistribution { .. } => ViewKind::MaxPainDistribution,
            ViewRequest::CorpBonds { .. } => ViewKind::CorpBonds,
            ViewRequest::Sentiment { .. } => ViewKind::Sentiment,
            ViewRequest::MarketDiary { .. } => ViewKind::MarketDiary,
            ViewRequest::QuizList => ViewKind::QuizList,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            ViewRequest::PriceHistory { security_id, .. } => {
                Endpoint::with_param("/data/security_history", security_id.to_string())
            }
            ViewRequest::TechnicalParameter { security_id, .. } => {
                Endpoint::with_param("/data/tp", security_id.to_string())
            }
            ViewRequest::TechnicalAnalysis { security_id } => {
                Endpoint::with_param("/data/ta", security_id.to_string())
            }
            ViewRequest::FundamentalAnalysis { security_id } => {
                Endpoint::with_param("/data/fa", security_id.to_string())
            }
            ViewRequest::MaxPainHistory { underlying } => {
                Endpoint::with_param("/data/max_pain_history", underlying.clone())
            }
            ViewRequest::MaxPainDistribution { underlying } => {
                Endpoint::with_param("/data/max_pain_distribution", underlying.clone())
            }
            ViewRequest::CorpBonds { bond_type } => {
                Endpoint::with_param("/data/corp_bonds_data", bond_type.label())
            }
            ViewRequest::Sentiment { .. } => Endpoint::fixed("/data/sentiment"),
            ViewRequest::MarketDiary { .. } => Endpoint::fixed("/data/md"),
            // relative to the page the quiz list lives on
            ViewRequest::QuizList => Endpoint::fixed("list"),
        }
    }

    pub fn verb(&self) -> HttpVerb {
        match self {
            ViewRequest::PriceHistory { .. }
            | ViewRequest::TechnicalParameter { .. }
            | ViewRequest::Sentiment { .. }
            | ViewRequest::MarketDiary { .. }
            | ViewRequest::QuizList => HttpVerb::Post,
            _ => HttpVerb::Get,
        }
    }

    fn body(&self) -> Option<serde_json::Value> {
        match self {
            ViewRequest::PriceHistory { interval, .. } => Some(json!({ "interval": interval.code() })),
            ViewRequest::TechnicalParameter { view, .. } => Some(json!({ "view": view.code() })),
            ViewRequest::Sentiment { source, size } => {
                Some(json!({ "source": source.code(), "size": size }))
            }
            ViewRequest::MarketDiary { exchange, size } => {
                Some(json!({ "source": exchange.code(), "size": size }))
            }
            _ => None,
        }
    }

    /// Build the request; the anti-forgery token only rides on POSTs.
    pub fn fetch_request(&self, csrf_token: Option<&str>) -> FetchRequest {
        let verb = self.verb();
        FetchRequest {
            endpoint: self.endpoint(),
            verb,
            body: self.body(),
            csrf_token: match verb {
                HttpVerb::Post => csrf_token.map(str::to_string),
                HttpVerb::Get => None,
            },
        }
    }
}
