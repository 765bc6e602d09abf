use tracing::{debug, error, info, warn};

use crate::errors::ViewError;
use crate::models::{ChartPayload, FetchResult, ViewKind, GENERIC_FAILURE};
use crate::render::chart::{ChartId, ChartOptions};
use crate::render::nav::*;
use crate::render::specs;
use crate::render::surface::{Image, Node, ObserverId, Region, Surface};
use crate::render::table::{analysis_table, quiz_table};

/// How a view reports a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisplay {
    /// Blocking modal message.
    Alert,
    /// Message in the page's inline error region.
    Inline,
}

pub fn error_display(kind: ViewKind) -> ErrorDisplay {
    match kind {
        ViewKind::FundamentalAnalysis | ViewKind::QuizList => ErrorDisplay::Inline,
        _ => ErrorDisplay::Alert,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    Failed,
    /// A newer request was issued before this one completed; nothing was drawn.
    Stale,
}

/// Everything a successful render writes, computed before the page is touched.
struct Prepared {
    region: Region,
    node: Node,
    nav: Option<(&'static str, Option<&'static str>)>,
}

/// Turns fetch results into page content.
///
/// Owns the chart currently shown in the chart container together with its
/// resize observer, so the observer can be disconnected before the chart is
/// replaced.
pub struct Renderer {
    options: ChartOptions,
    next_chart: u64,
    active_chart: Option<(ChartId, ObserverId)>,
}

impl Renderer {
    pub fn new(options: ChartOptions) -> Self {
        Self {
            options,
            next_chart: 0,
            active_chart: None,
        }
    }

    pub fn active_chart(&self) -> Option<ChartId> {
        self.active_chart.map(|(chart, _)| chart)
    }

    /// Render one fetch result for `kind`.
    ///
    /// A failure is reported exactly once through the view's error path and
    /// leaves the page content alone. A payload that cannot be drawn is
    /// reported the same way and returned as an error.
    pub fn render(
        &mut self,
        kind: ViewKind,
        result: FetchResult,
        surface: &mut dyn Surface,
    ) -> Result<RenderOutcome, ViewError> {
        let value = match result {
            FetchResult::Success(value) => value,
            FetchResult::Failure(message) => {
                warn!("{} request failed: {}", kind, message);
                report(kind, &message, surface);
                return Ok(RenderOutcome::Failed);
            }
        };

        let prepared = match ChartPayload::decode(kind, value).and_then(|p| self.prepare(kind, p)) {
            Ok(prepared) => prepared,
            Err(e) => {
                error!("Cannot render {}: {}", kind, e);
                report(kind, GENERIC_FAILURE, surface);
                return Err(e);
            }
        };

        surface.set_error(None);
        if let Some((group, link)) = prepared.nav {
            if !surface.nav_mut().activate(group, link) {
                debug!("{}: no link to activate in {}", kind, group);
            }
        }
        self.show(prepared.region, prepared.node, surface);

        info!("Rendered {}", kind);
        Ok(RenderOutcome::Rendered)
    }

    fn next_chart_id(&mut self) -> ChartId {
        self.next_chart += 1;
        ChartId(self.next_chart)
    }

    fn prepare(&mut self, kind: ViewKind, payload: ChartPayload) -> Result<Prepared, ViewError> {
        let prepared = match payload {
            ChartPayload::PriceHistory(p) => {
                let link = match p.interval.as_str() {
                    "d" => Some(NL_DAILY),
                    "w" => Some(NL_WEEKLY),
                    "m" => Some(NL_MONTHLY),
                    _ => None,
                };
                let id = self.next_chart_id();
                Prepared {
                    region: Region::Chart,
                    node: Node::Chart(specs::price_history().build(id, &self.options, &p)?),
                    nav: Some((CHART_VIEW_GROUP, link)),
                }
            }
            ChartPayload::TechnicalParameter(p) => {
                let link = match p.view.as_str() {
                    "sd" => Some(NL_SD),
                    "hurst" => Some(NL_HURST),
                    _ => None,
                };
                let id = self.next_chart_id();
                Prepared {
                    region: Region::Chart,
                    node: Node::Chart(specs::technical_parameter().build(id, &self.options, &p)?),
                    nav: Some((CHART_VIEW_GROUP, link)),
                }
            }
            ChartPayload::Analysis(table) => {
                let link = match kind {
                    ViewKind::TechnicalAnalysis => TA_LINK,
                    _ => FA_LINK,
                };
                Prepared {
                    region: Region::Analysis,
                    node: Node::Table(analysis_table(&table)),
                    nav: Some((ANALYSIS_GROUP, Some(link))),
                }
            }
            ChartPayload::MaxPainHistory(p) => {
                let id = self.next_chart_id();
                Prepared {
                    region: Region::Chart,
                    node: Node::Chart(specs::max_pain_history().build(id, &self.options, &p)?),
                    nav: Some((MAX_PAIN_GROUP, Some(MP_HISTORY))),
                }
            }
            ChartPayload::MaxPainDistribution(p) => Prepared {
                region: Region::Chart,
                node: Node::Image(Image::png(&p.distribution.image, "Max Pain distribution")?),
                nav: Some((MAX_PAIN_GROUP, Some(MP_DISTRIBUTION))),
            },
            ChartPayload::CorpBonds(p) => {
                let link = match p.bond_type.as_str() {
                    "High Yield" => Some(CB_HY),
                    "Investment Grade" => Some(CB_IG),
                    _ => None,
                };
                let id = self.next_chart_id();
                Prepared {
                    region: Region::Chart,
                    node: Node::Chart(specs::corp_bonds().build(id, &self.options, &p)?),
                    nav: Some((CORP_BONDS_GROUP, link)),
                }
            }
            ChartPayload::Sentiment(p) => {
                let link = match p.source.as_str() {
                    "NAAIM" => Some(NAAIM),
                    "AAII" => Some(AAII),
                    "FRA" => Some(FRA),
                    "FRA_SPREAD" => Some(FRA_SPREAD),
                    _ => None,
                };
                let id = self.next_chart_id();
                Prepared {
                    region: Region::Chart,
                    node: Node::Chart(specs::sentiment(&p.source).build(id, &self.options, &p)?),
                    nav: Some((SENTIMENT_GROUP, link)),
                }
            }
            ChartPayload::MarketDiary(p) => {
                let link = match p.source.as_str() {
                    "nyse" => Some(NYSE),
                    "nasdaq" => Some(NASDAQ),
                    _ => None,
                };
                let id = self.next_chart_id();
                Prepared {
                    region: Region::Chart,
                    node: Node::Chart(specs::market_diary().build(id, &self.options, &p)?),
                    nav: Some((MARKET_DIARY_GROUP, link)),
                }
            }
            ChartPayload::QuizList(list) => Prepared {
                region: Region::Quiz,
                node: Node::Table(quiz_table(&list)),
                nav: None,
            },
        };
        Ok(prepared)
    }

    fn show(&mut self, region: Region, node: Node, surface: &mut dyn Surface) {
        if region != Region::Chart {
            surface.clear(region);
            surface.append(region, node);
            return;
        }

        // the previous chart's observer must go before its chart does
        if let Some((chart, observer)) = self.active_chart.take() {
            debug!("Disconnecting resize observer of chart {}", chart.0);
            surface.disconnect(observer);
        }
        surface.clear(Region::Chart);
        surface.clear(Region::Legend);

        let Node::Chart(chart) = node else {
            surface.append(Region::Chart, node);
            return;
        };

        let id = chart.id;
        let legend = chart.legend_at(None);
        surface.append(Region::Chart, Node::Chart(chart));
        let observer = surface.observe_resize(Region::Chart, id);
        self.active_chart = Some((id, observer));

        if let Some(legend) = legend {
            surface.append(Region::Legend, Node::Legend(legend));
        }
    }
}

fn report(kind: ViewKind, message: &str, surface: &mut dyn Surface) {
    match error_display(kind) {
        ErrorDisplay::Alert => surface.alert(message),
        ErrorDisplay::Inline => surface.set_error(Some(message)),
    }
}
