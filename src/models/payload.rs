use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ViewError;
use crate::models::series::{Candle, LinePoint};
use crate::models::view::ViewKind;

/// Sentinel the server uses for metrics it could not compute.
pub const NOT_APPLICABLE: &str = "N/A";

#[derive(Debug, Clone, Deserialize)]
pub struct PriceHistory {
    pub interval: String,
    pub price: Vec<Candle>,
    pub ema20: Vec<LinePoint>,
    pub ema50: Vec<LinePoint>,
    pub bb_lower: Vec<LinePoint>,
    pub bb_upper: Vec<LinePoint>,
    #[serde(default)]
    pub volume: Vec<LinePoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TechnicalParameter {
    pub view: String,
    pub tp_data: Vec<LinePoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    Value(f64),
    NotApplicable,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMetric {
    Number(f64),
    Text(String),
}

/// Indicator name -> value, in the order the server sent them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisTable {
    pub entries: Vec<(String, Metric)>,
}

impl AnalysisTable {
    fn from_value(value: Value) -> Result<Self, String> {
        let Value::Object(map) = value else {
            return Err("expected an object of indicators".to_string());
        };

        let mut entries = Vec::with_capacity(map.len());
        for (name, raw) in map {
            let metric = match serde_json::from_value::<RawMetric>(raw) {
                Ok(RawMetric::Number(v)) => Metric::Value(v),
                Ok(RawMetric::Text(text)) if text == NOT_APPLICABLE => Metric::NotApplicable,
                Ok(RawMetric::Text(text)) => {
                    return Err(format!("indicator `{name}` has non-numeric value `{text}`"))
                }
                Err(_) => return Err(format!("indicator `{name}` is neither a number nor \"N/A\"")),
            };
            entries.push((name, metric));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaxPainHistory {
    pub max_pain: Vec<LinePoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Distribution {
    /// Base64 encoded PNG.
    pub image: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaxPainDistribution {
    pub distribution: Distribution,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorpBonds {
    pub ad: Vec<LinePoint>,
    pub trend: Vec<LinePoint>,
    #[serde(rename = "type")]
    pub bond_type: String,
}

/// Sentiment series; which ones are present depends on `source`.
#[derive(Debug, Clone, Deserialize)]
pub struct Sentiment {
    pub source: String,
    pub naaim_exposure: Option<Vec<LinePoint>>,
    pub aaii_bulls: Option<Vec<LinePoint>>,
    pub aaii_bears: Option<Vec<LinePoint>>,
    pub private_bears: Option<Vec<LinePoint>>,
    pub institutional_bears: Option<Vec<LinePoint>>,
    pub fra_spread: Option<Vec<LinePoint>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketDiary {
    pub source: String,
    pub ad_line: Vec<LinePoint>,
    pub ema_line: Vec<LinePoint>,
}

/// Number or label, as quiz fields are not consistently typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuizField {
    Number(f64),
    Label(String),
}

impl QuizField {
    pub fn display(&self) -> String {
        match self {
            QuizField::Number(n) if n.fract() == 0.0 => format!("{n:.0}"),
            QuizField::Number(n) => format!("{n:.2}"),
            QuizField::Label(label) => label.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizEntry {
    pub id: u64,
    pub name: String,
    pub difficulty: QuizField,
    #[serde(default)]
    pub result: Option<QuizField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizList {
    pub quizzes: Vec<QuizEntry>,
}

/// A success payload decoded into the shape its view expects.
#[derive(Debug, Clone)]
pub enum ChartPayload {
    PriceHistory(PriceHistory),
    TechnicalParameter(TechnicalParameter),
    Analysis(AnalysisTable),
    MaxPainHistory(MaxPainHistory),
    MaxPainDistribution(MaxPainDistribution),
    CorpBonds(CorpBonds),
    Sentiment(Sentiment),
    MarketDiary(MarketDiary),
    QuizList(QuizList),
}

fn typed<T: DeserializeOwned>(kind: ViewKind, value: Value) -> Result<T, ViewError> {
    serde_json::from_value(value).map_err(|e| ViewError::MalformedPayload {
        view: kind,
        reason: e.to_string(),
    })
}

impl ChartPayload {
    pub fn decode(kind: ViewKind, value: Value) -> Result<Self, ViewError> {
        let payload = match kind {
            ViewKind::PriceHistory => ChartPayload::PriceHistory(typed(kind, value)?),
            ViewKind::TechnicalParameter => ChartPayload::TechnicalParameter(typed(kind, value)?),
            ViewKind::TechnicalAnalysis | ViewKind::FundamentalAnalysis => ChartPayload::Analysis(
                AnalysisTable::from_value(value)
                    .map_err(|reason| ViewError::MalformedPayload { view: kind, reason })?,
            ),
            ViewKind::MaxPainHistory => ChartPayload::MaxPainHistory(typed(kind, value)?),
            ViewKind::MaxPainDistribution => ChartPayload::MaxPainDistribution(typed(kind, value)?),
            ViewKind::CorpBonds => ChartPayload::CorpBonds(typed(kind, value)?),
            ViewKind::Sentiment => ChartPayload::Sentiment(typed(kind, value)?),
            ViewKind::MarketDiary => ChartPayload::MarketDiary(typed(kind, value)?),
            ViewKind::QuizList => ChartPayload::QuizList(typed(kind, value)?),
        };
        Ok(payload)
    }
}
