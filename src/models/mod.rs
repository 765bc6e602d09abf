pub mod fetch;
pub mod payload;
pub mod series;
pub mod view;

pub use fetch::{Endpoint, FetchRequest, FetchResult, HttpVerb, GENERIC_FAILURE};
pub use payload::{
    AnalysisTable, ChartPayload, CorpBonds, MarketDiary, MaxPainDistribution, MaxPainHistory,
    Metric, PriceHistory, QuizEntry, QuizField, QuizList, Sentiment, TechnicalParameter,
    NOT_APPLICABLE,
};
pub use series::{Candle, LinePoint, Time};
pub use view::{
    BondType, Exchange, Interval, SentimentSource, TpView, ViewKind, ViewRequest,
    DEFAULT_MARKET_DIARY_SIZE, DEFAULT_SENTIMENT_SIZE,
};
