use clap::{Args, Parser, Subcommand};

use wyca_client::models::{
    BondType, Exchange, Interval, SentimentSource, TpView, ViewRequest, DEFAULT_MARKET_DIARY_SIZE,
    DEFAULT_SENTIMENT_SIZE,
};

#[derive(Parser, Debug)]
#[command(version, about = "Fetch and render analytics views", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the web application; overrides WYCA_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Anti-forgery token sent on POST requests; overrides WYCA_CSRF_TOKEN.
    #[arg(long, global = true)]
    pub csrf_token: Option<String>,

    /// Print the page as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price history with EMAs, Bollinger bands and volume.
    History(HistoryArgs),

    /// Technical parameter chart (sd or hurst).
    Tp(TpArgs),

    /// Technical analysis table.
    Ta(SecurityArgs),

    /// Fundamental analysis table.
    Fa(SecurityArgs),

    /// Max pain history or distribution of an underlying.
    MaxPain(MaxPainArgs),

    /// Corporate bonds advance/decline chart.
    CorpBonds(CorpBondsArgs),

    /// Investor sentiment survey chart.
    Sentiment(SentimentArgs),

    /// Market diary advance/decline line.
    MarketDiary(MarketDiaryArgs),

    /// Quizzes available to the current user.
    Quizzes,
}

#[derive(Args, Debug)]
pub struct SecurityArgs {
    pub security_id: u64,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    pub security_id: u64,

    /// d, w or m
    #[arg(short, long, default_value = "d")]
    pub interval: Interval,
}

#[derive(Args, Debug)]
pub struct TpArgs {
    pub security_id: u64,

    /// sd or hurst
    #[arg(long, default_value = "sd")]
    pub view: TpView,
}

#[derive(Args, Debug)]
pub struct MaxPainArgs {
    pub underlying: String,

    /// Show the distribution image instead of the history chart.
    #[arg(long)]
    pub distribution: bool,
}

#[derive(Args, Debug)]
pub struct CorpBondsArgs {
    /// hy or ig
    pub bond_type: BondType,
}

#[derive(Args, Debug)]
pub struct SentimentArgs {
    /// NAAIM, AAII, FRA or FRA_SPREAD
    pub source: SentimentSource,

    #[arg(long, default_value_t = DEFAULT_SENTIMENT_SIZE)]
    pub size: u32,
}

#[derive(Args, Debug)]
pub struct MarketDiaryArgs {
    /// nyse or nasdaq
    pub exchange: Exchange,

    #[arg(long, default_value_t = DEFAULT_MARKET_DIARY_SIZE)]
    pub size: u32,
}

impl Commands {
    pub fn view_request(&self) -> ViewRequest {
        match self {
            Commands::History(args) => ViewRequest::PriceHistory {
                security_id: args.security_id,
                interval: args.interval,
            },
            Commands::Tp(args) => ViewRequest::TechnicalParameter {
                security_id: args.security_id,
                view: args.view,
            },
            Commands::Ta(args) => ViewRequest::TechnicalAnalysis {
                security_id: args.security_id,
            },
            Commands::Fa(args) => ViewRequest::FundamentalAnalysis {
                security_id: args.security_id,
            },
            Commands::MaxPain(args) if args.distribution => ViewRequest::MaxPainDistribution {
                underlying: args.underlying.clone(),
            },
            Commands::MaxPain(args) => ViewRequest::MaxPainHistory {
                underlying: args.underlying.clone(),
            },
            Commands::CorpBonds(args) => ViewRequest::CorpBonds {
                bond_type: args.bond_type,
            },
            Commands::Sentiment(args) => ViewRequest::Sentiment {
                source: args.source,
                size: args.size,
            },
            Commands::MarketDiary(args) => ViewRequest::MarketDiary {
                exchange: args.exchange,
                size: args.size,
            },
            Commands::Quizzes => ViewRequest::QuizList,
        }
    }
}
