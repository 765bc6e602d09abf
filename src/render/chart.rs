use serde::Serialize;

use crate::errors::ViewError;
use crate::models::series::is_ascending;
use crate::models::{Candle, LinePoint, Time, ViewKind};

pub const WATERMARK_TEXT: &str = "wyca-analytics.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ChartId(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Watermark {
    pub text: &'static str,
    pub font_size: u32,
    pub color: &'static str,
}

impl Default for Watermark {
    fn default() -> Self {
        Self {
            text: WATERMARK_TEXT,
            font_size: 32,
            color: "rgba(4, 157, 191, 0.3)",
        }
    }
}

/// Layout shared by every chart on the site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub background: &'static str,
    pub text_color: &'static str,
    pub grid_color: &'static str,
    pub border_color: &'static str,
    pub watermark: Option<Watermark>,
}

impl ChartOptions {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: "#ffffff",
            text_color: "rgba(3, 103, 166, 0.9)",
            grid_color: "rgba(197, 203, 206, 0.5)",
            border_color: "rgba(197, 203, 206, 0.8)",
            watermark: None,
        }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::with_size(crate::config::DEFAULT_CHART_WIDTH, crate::config::DEFAULT_CHART_HEIGHT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleColors {
    pub up: &'static str,
    pub down: &'static str,
    pub border_up: &'static str,
    pub border_down: &'static str,
    pub wick_up: &'static str,
    pub wick_down: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SeriesStyle {
    Line {
        color: &'static str,
        width: f32,
        price_line_visible: bool,
        last_value_visible: bool,
    },
    /// Drawn on its own price scale, squeezed into the given margins.
    Histogram {
        color: &'static str,
        price_scale_id: &'static str,
        margin_top: f32,
        margin_bottom: f32,
    },
    Candlestick(CandleColors),
}

impl SeriesStyle {
    pub fn kind(&self) -> &'static str {
        match self {
            SeriesStyle::Line { .. } => "line",
            SeriesStyle::Histogram { .. } => "histogram",
            SeriesStyle::Candlestick(_) => "candlestick",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SeriesData {
    Line(Vec<LinePoint>),
    Candles(Vec<Candle>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Line(points) => points.len(),
            SeriesData::Candles(candles) => candles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_ascending(&self) -> bool {
        match self {
            SeriesData::Line(points) => is_ascending(points),
            SeriesData::Candles(candles) => is_ascending(candles),
        }
    }

    pub fn last(&self) -> Option<(&Time, f64)> {
        match self {
            SeriesData::Line(points) => points.last().map(|p| (&p.time, p.value)),
            SeriesData::Candles(candles) => candles.last().map(|c| (&c.time, c.close)),
        }
    }
}

/// Horizontal annotation at a fixed price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceLine {
    pub price: f64,
    pub color: &'static str,
    pub width: f32,
    pub axis_label_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: &'static str,
    pub style: SeriesStyle,
    pub data: SeriesData,
    pub price_lines: Vec<PriceLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendSpec {
    pub series: &'static str,
    pub label: &'static str,
}

/// Text shown in the legend container next to a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub text: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub id: ChartId,
    pub options: ChartOptions,
    pub series: Vec<Series>,
    pub fit_content: bool,
    pub legend: Option<LegendSpec>,
}

impl Chart {
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.options.width = width;
        self.options.height = height;
    }

    /// Legend for the bar under the crosshair, or the last bar when the
    /// crosshair is outside the data.
    pub fn legend_at(&self, time: Option<&Time>) -> Option<Legend> {
        let spec = self.legend.as_ref()?;
        let SeriesData::Line(points) = &self.series(spec.series)?.data else {
            return None;
        };

        let point = time
            .and_then(|t| points.iter().find(|p| &p.time == t))
            .or_else(|| points.last())?;

        Some(Legend {
            text: format!("{}: {:.2}", spec.label, point.value),
            date: point.time.us_date().unwrap_or_else(|| point.time.to_string()),
        })
    }
}

/// Declarative description of one series: how it looks and where its data
/// comes from in the payload.
pub struct SeriesSpec<P> {
    pub name: &'static str,
    pub style: SeriesStyle,
    pub data: fn(&P) -> Option<SeriesData>,
    pub skip_if_empty: bool,
    pub reference: Option<fn(&P) -> f64>,
}

impl<P> SeriesSpec<P> {
    pub fn new(name: &'static str, style: SeriesStyle, data: fn(&P) -> Option<SeriesData>) -> Self {
        Self {
            name,
            style,
            data,
            skip_if_empty: false,
            reference: None,
        }
    }

    /// Leave the series out entirely when the payload has no points for it.
    pub fn optional(mut self) -> Self {
        self.skip_if_empty = true;
        self
    }

    pub fn with_reference(mut self, reference: fn(&P) -> f64) -> Self {
        self.reference = Some(reference);
        self
    }
}

/// One parameterized chart: every chart view is a `ChartSpec` over its payload.
pub struct ChartSpec<P> {
    pub view: ViewKind,
    pub watermark: bool,
    pub fit_content: bool,
    pub series: Vec<SeriesSpec<P>>,
    pub legend: Option<LegendSpec>,
}

pub const REFERENCE_COLOR: &str = "#be1238";

impl<P> ChartSpec<P> {
    pub fn new(view: ViewKind) -> Self {
        Self {
            view,
            watermark: true,
            fit_content: false,
            series: Vec::new(),
            legend: None,
        }
    }

    pub fn without_watermark(mut self) -> Self {
        self.watermark = false;
        self
    }

    pub fn fit_content(mut self) -> Self {
        self.fit_content = true;
        self
    }

    pub fn series(mut self, spec: SeriesSpec<P>) -> Self {
        self.series.push(spec);
        self
    }

    pub fn legend(mut self, series: &'static str, label: &'static str) -> Self {
        self.legend = Some(LegendSpec { series, label });
        self
    }

    pub fn build(&self, id: ChartId, base: &ChartOptions, payload: &P) -> Result<Chart, ViewError> {
        let mut options = base.clone();
        options.watermark = self.watermark.then(Watermark::default);

        let mut series = Vec::with_capacity(self.series.len());
        for spec in &self.series {
            let data = (spec.data)(payload).ok_or_else(|| ViewError::MalformedPayload {
                view: self.view,
                reason: format!("missing series `{}`", spec.name),
            })?;

            if spec.skip_if_empty && data.is_empty() {
                continue;
            }
            if !data.is_ascending() {
                return Err(ViewError::UnsortedSeries {
                    series: spec.name.to_string(),
                });
            }

            let price_lines = spec
                .reference
                .map(|reference| {
                    vec![PriceLine {
                        price: reference(payload),
                        color: REFERENCE_COLOR,
                        width: 2.0,
                        axis_label_visible: true,
                    }]
                })
                .unwrap_or_default();

            series.push(Series {
                name: spec.name,
                style: spec.style.clone(),
                data,
                price_lines,
            });
        }

        Ok(Chart {
            id,
            options,
            series,
            fit_content: self.fit_content,
            legend: self.legend.clone(),
        })
    }
}
