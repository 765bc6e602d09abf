//! Chart definitions of every chart view on the site.

use crate::models::{CorpBonds, MarketDiary, MaxPainHistory, PriceHistory, Sentiment, TechnicalParameter, ViewKind};
use crate::render::chart::{CandleColors, ChartSpec, SeriesData, SeriesSpec, SeriesStyle};

pub const BLUE: &str = "#049DBF";
pub const ORANGE: &str = "#F2A057";
pub const DEEP_BLUE: &str = "#0378A6";

/// Reference level of the hurst view; every other view uses zero.
pub const HURST_REFERENCE: f64 = 0.5;

fn line(color: &'static str, width: f32) -> SeriesStyle {
    SeriesStyle::Line {
        color,
        width,
        price_line_visible: false,
        last_value_visible: true,
    }
}

fn volume() -> SeriesStyle {
    SeriesStyle::Histogram {
        color: ORANGE,
        price_scale_id: "volume",
        margin_top: 0.8,
        margin_bottom: 0.0,
    }
}

fn candles() -> SeriesStyle {
    SeriesStyle::Candlestick(CandleColors {
        up: "rgba(0, 150, 136, 0.8)",
        down: "rgba(255,82,82, 0.8)",
        border_up: "#198754",
        border_down: "#dc3545",
        wick_up: "rgba(255, 144, 0, 1)",
        wick_down: "rgba(255, 144, 0, 1)",
    })
}

pub fn price_history() -> ChartSpec<PriceHistory> {
    ChartSpec::new(ViewKind::PriceHistory)
        .series(SeriesSpec::new("ema50", line(BLUE, 2.0), |p: &PriceHistory| {
            Some(SeriesData::Line(p.ema50.clone()))
        }))
        .series(SeriesSpec::new("ema20", line(BLUE, 1.0), |p: &PriceHistory| {
            Some(SeriesData::Line(p.ema20.clone()))
        }))
        .series(SeriesSpec::new("bb_lower", line(ORANGE, 0.5), |p: &PriceHistory| {
            Some(SeriesData::Line(p.bb_lower.clone()))
        }))
        .series(SeriesSpec::new("bb_upper", line(ORANGE, 0.5), |p: &PriceHistory| {
            Some(SeriesData::Line(p.bb_upper.clone()))
        }))
        .series(
            SeriesSpec::new("volume", volume(), |p: &PriceHistory| {
                Some(SeriesData::Line(p.volume.clone()))
            })
            .optional(),
        )
        .series(SeriesSpec::new("price", candles(), |p: &PriceHistory| {
            Some(SeriesData::Candles(p.price.clone()))
        }))
}

pub fn technical_parameter() -> ChartSpec<TechnicalParameter> {
    let style = SeriesStyle::Line {
        color: BLUE,
        width: 2.0,
        price_line_visible: true,
        last_value_visible: true,
    };

    ChartSpec::new(ViewKind::TechnicalParameter)
        .without_watermark()
        .series(
            SeriesSpec::new("tp_data", style, |p: &TechnicalParameter| {
                Some(SeriesData::Line(p.tp_data.clone()))
            })
            .with_reference(|p: &TechnicalParameter| {
                if p.view == "hurst" {
                    HURST_REFERENCE
                } else {
                    0.0
                }
            }),
        )
}

pub fn max_pain_history() -> ChartSpec<MaxPainHistory> {
    let style = SeriesStyle::Line {
        color: DEEP_BLUE,
        width: 2.0,
        price_line_visible: false,
        last_value_visible: false,
    };

    ChartSpec::new(ViewKind::MaxPainHistory)
        .fit_content()
        .series(SeriesSpec::new("max_pain", style, |p: &MaxPainHistory| {
            Some(SeriesData::Line(p.max_pain.clone()))
        }))
}

pub fn corp_bonds() -> ChartSpec<CorpBonds> {
    ChartSpec::new(ViewKind::CorpBonds)
        .fit_content()
        .series(SeriesSpec::new("ad", line(BLUE, 2.0), |p: &CorpBonds| {
            Some(SeriesData::Line(p.ad.clone()))
        }))
        .series(SeriesSpec::new("trend", line(ORANGE, 2.0), |p: &CorpBonds| {
            Some(SeriesData::Line(p.trend.clone()))
        }))
}

/// Series depend on the survey source; an unknown source yields an empty chart.
pub fn sentiment(source: &str) -> ChartSpec<Sentiment> {
    let spec = ChartSpec::new(ViewKind::Sentiment).fit_content();

    match source {
        "NAAIM" => spec.series(SeriesSpec::new("naaim_exposure", line(ORANGE, 2.0), |p: &Sentiment| {
            p.naaim_exposure.clone().map(SeriesData::Line)
        })),
        "AAII" => spec
            .series(SeriesSpec::new("aaii_bulls", line(ORANGE, 2.0), |p: &Sentiment| {
                p.aaii_bulls.clone().map(SeriesData::Line)
            }))
            .series(SeriesSpec::new("aaii_bears", line(DEEP_BLUE, 2.0), |p: &Sentiment| {
                p.aaii_bears.clone().map(SeriesData::Line)
            })),
        "FRA" => spec
            .series(SeriesSpec::new("private_bears", line(ORANGE, 2.0), |p: &Sentiment| {
                p.private_bears.clone().map(SeriesData::Line)
            }))
            .series(SeriesSpec::new("institutional_bears", line(DEEP_BLUE, 2.0), |p: &Sentiment| {
                p.institutional_bears.clone().map(SeriesData::Line)
            })),
        "FRA_SPREAD" => spec.series(
            SeriesSpec::new("fra_spread", line(ORANGE, 2.0), |p: &Sentiment| {
                p.fra_spread.clone().map(SeriesData::Line)
            })
            .with_reference(|_: &Sentiment| 0.0),
        ),
        _ => spec,
    }
}

pub fn market_diary() -> ChartSpec<MarketDiary> {
    ChartSpec::new(ViewKind::MarketDiary)
        .fit_content()
        .series(SeriesSpec::new("ad_line", line(BLUE, 2.0), |p: &MarketDiary| {
            Some(SeriesData::Line(p.ad_line.clone()))
        }))
        .series(SeriesSpec::new("ema_line", line(ORANGE, 2.0), |p: &MarketDiary| {
            Some(SeriesData::Line(p.ema_line.clone()))
        }))
        .legend("ad_line", "AD-Line")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LinePoint, Time};
    use crate::render::chart::{ChartId, ChartOptions};

    fn points(n: i64) -> Vec<LinePoint> {
        (1..=n)
            .map(|t| LinePoint {
                time: Time::Timestamp(t),
                value: t as f64,
            })
            .collect()
    }

    fn sentiment_payload(source: &str) -> Sentiment {
        Sentiment {
            source: source.to_string(),
            naaim_exposure: Some(points(3)),
            aaii_bulls: Some(points(3)),
            aaii_bears: Some(points(3)),
            private_bears: None,
            institutional_bears: None,
            fra_spread: Some(points(2)),
        }
    }

    #[test]
    fn test_sentiment_series_follow_source() {
        let options = ChartOptions::default();

        let aaii = sentiment("AAII").build(ChartId(1), &options, &sentiment_payload("AAII")).unwrap();
        let names: Vec<&str> = aaii.series.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["aaii_bulls", "aaii_bears"]);

        let spread = sentiment("FRA_SPREAD")
            .build(ChartId(2), &options, &sentiment_payload("FRA_SPREAD"))
            .unwrap();
        assert_eq!(spread.series[0].price_lines[0].price, 0.0);
    }

    #[test]
    fn test_fra_without_series_is_malformed() {
        let result = sentiment("FRA").build(ChartId(1), &ChartOptions::default(), &sentiment_payload("FRA"));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_sentiment_source_is_empty_chart() {
        let chart = sentiment("VIX")
            .build(ChartId(1), &ChartOptions::default(), &sentiment_payload("VIX"))
            .unwrap();
        assert!(chart.series.is_empty());
    }

    #[test]
    fn test_sd_reference_is_zero() {
        let payload = TechnicalParameter {
            view: "sd".to_string(),
            tp_data: points(4),
        };
        let chart = technical_parameter().build(ChartId(1), &ChartOptions::default(), &payload).unwrap();
        assert_eq!(chart.series[0].price_lines[0].price, 0.0);
        assert!(chart.options.watermark.is_none());
    }
}
