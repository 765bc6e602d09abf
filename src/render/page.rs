use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::models::Time;
use crate::render::chart::{Chart, ChartId};
use crate::render::nav::NavState;
use crate::render::surface::{Node, ObserverId, Region, Surface};
use crate::render::table::Table;

/// Headless page: keeps what a browser page would show.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    regions: BTreeMap<Region, Vec<Node>>,
    alerts: Vec<String>,
    error: Option<String>,
    nav: NavState,
    #[serde(skip)]
    observers: BTreeMap<ObserverId, (Region, ChartId)>,
    #[serde(skip)]
    next_observer: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self::with_nav(NavState::standard())
    }

    pub fn with_nav(nav: NavState) -> Self {
        Self {
            regions: BTreeMap::new(),
            alerts: Vec::new(),
            error: None,
            nav,
            observers: BTreeMap::new(),
            next_observer: 0,
        }
    }

    pub fn children(&self, region: Region) -> &[Node] {
        self.regions.get(&region).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    pub fn live_observers(&self) -> usize {
        self.observers.len()
    }

    pub fn chart(&self, region: Region) -> Option<&Chart> {
        self.children(region).iter().find_map(|node| match node {
            Node::Chart(chart) => Some(chart),
            _ => None,
        })
    }

    pub fn table(&self, region: Region) -> Option<&Table> {
        self.children(region).iter().find_map(|node| match node {
            Node::Table(table) => Some(table),
            _ => None,
        })
    }

    /// Container size changed: every observed chart in `region` follows.
    ///
    /// Returns how many charts were resized.
    pub fn resize(&mut self, region: Region, width: u32, height: u32) -> usize {
        let observed: Vec<ChartId> = self
            .observers
            .values()
            .filter(|(r, _)| *r == region)
            .map(|(_, chart)| *chart)
            .collect();

        let mut resized = 0;
        if let Some(nodes) = self.regions.get_mut(&region) {
            for node in nodes.iter_mut() {
                if let Node::Chart(chart) = node {
                    if observed.contains(&chart.id) {
                        chart.resize(width, height);
                        resized += 1;
                    }
                }
            }
        }
        resized
    }

    /// Crosshair moved over the main chart; `None` means it left the chart.
    pub fn crosshair_move(&mut self, time: Option<&Time>) -> bool {
        let Some(legend) = self.chart(Region::Chart).and_then(|c| c.legend_at(time)) else {
            return false;
        };
        self.clear(Region::Legend);
        self.append(Region::Legend, Node::Legend(legend));
        true
    }
}

impl Surface for Page {
    fn clear(&mut self, region: Region) {
        self.regions.remove(&region);
    }

    fn append(&mut self, region: Region, node: Node) {
        self.regions.entry(region).or_default().push(node);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn set_error(&mut self, message: Option<&str>) {
        self.error = message.map(str::to_string);
    }

    fn nav_mut(&mut self) -> &mut NavState {
        &mut self.nav
    }

    fn observe_resize(&mut self, region: Region, chart: ChartId) -> ObserverId {
        self.next_observer += 1;
        let id = ObserverId(self.next_observer);
        self.observers.insert(id, (region, chart));
        debug!("observing {} for chart {}", region.selector(), chart.0);
        id
    }

    fn disconnect(&mut self, observer: ObserverId) {
        self.observers.remove(&observer);
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, table: &Table) -> fmt::Result {
    let rows = table.header.iter().chain(table.rows.iter());
    for row in rows {
        let line: Vec<String> = row
            .cells
            .iter()
            .map(|cell| match cell.style.class() {
                Some(class) => format!("{} ({})", cell.text, class),
                None => cell.text.clone(),
            })
            .collect();
        writeln!(f, "  {}", line.join(" | "))?;
    }
    Ok(())
}

fn write_chart(f: &mut fmt::Formatter<'_>, chart: &Chart) -> fmt::Result {
    write!(f, "  chart #{} {}x{}", chart.id.0, chart.options.width, chart.options.height)?;
    if let Some(watermark) = &chart.options.watermark {
        write!(f, " watermark={}", watermark.text)?;
    }
    writeln!(f)?;

    for series in &chart.series {
        write!(f, "    {} {} ({} points)", series.style.kind(), series.name, series.data.len())?;
        if let Some((time, value)) = series.data.last() {
            write!(f, " last {:.2} @ {}", value, time)?;
        }
        writeln!(f)?;
        for line in &series.price_lines {
            writeln!(f, "      price line @ {:.2} {}", line.price, line.color)?;
        }
    }
    Ok(())
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (region, nodes) in &self.regions {
            writeln!(f, "[{}]", region.selector())?;
            for node in nodes {
                match node {
                    Node::Table(table) => write_table(f, table)?,
                    Node::Chart(chart) => write_chart(f, chart)?,
                    Node::Image(image) => {
                        writeln!(f, "  {} {} bytes ({})", image.mime, image.byte_len, image.alt)?
                    }
                    Node::Legend(legend) => writeln!(f, "  {}  {}", legend.text, legend.date)?,
                }
            }
        }

        for (group, _) in self.nav.groups() {
            if let Some(active) = self.nav.active(group) {
                writeln!(f, "[nav] {} -> {}", group, active)?;
            }
        }
        if let Some(error) = &self.error {
            writeln!(f, "[error] {}", error)?;
        }
        for alert in &self.alerts {
            writeln!(f, "[alert] {}", alert)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LinePoint;
    use crate::render::chart::{ChartOptions, SeriesData, Series, SeriesStyle};

    fn chart(id: u64) -> Chart {
        Chart {
            id: ChartId(id),
            options: ChartOptions::default(),
            series: vec![Series {
                name: "ad",
                style: SeriesStyle::Line {
                    color: "#049DBF",
                    width: 2.0,
                    price_line_visible: false,
                    last_value_visible: true,
                },
                data: SeriesData::Line(vec![LinePoint {
                    time: Time::Timestamp(1704067200),
                    value: 1.5,
                }]),
                price_lines: Vec::new(),
            }],
            fit_content: true,
            legend: None,
        }
    }

    #[test]
    fn test_clear_then_append() {
        let mut page = Page::new();
        page.append(Region::Chart, Node::Chart(chart(1)));
        page.append(Region::Chart, Node::Chart(chart(2)));
        assert_eq!(page.children(Region::Chart).len(), 2);

        page.clear(Region::Chart);
        assert!(page.children(Region::Chart).is_empty());
    }

    #[test]
    fn test_resize_only_touches_observed_charts() {
        let mut page = Page::new();
        page.append(Region::Chart, Node::Chart(chart(1)));
        page.append(Region::Chart, Node::Chart(chart(2)));
        let observer = page.observe_resize(Region::Chart, ChartId(2));

        assert_eq!(page.resize(Region::Chart, 640, 320), 1);
        let sizes: Vec<u32> = page
            .children(Region::Chart)
            .iter()
            .filter_map(|n| match n {
                Node::Chart(c) => Some(c.options.width),
                _ => None,
            })
            .collect();
        assert_eq!(sizes, vec![800, 640]);

        page.disconnect(observer);
        assert_eq!(page.resize(Region::Chart, 100, 100), 0);
        assert_eq!(page.live_observers(), 0);
    }

    #[test]
    fn test_display_lists_alerts_and_nav() {
        let mut page = Page::new();
        page.alert("Security not found");
        page.nav_mut().activate(crate::render::nav::CORP_BONDS_GROUP, Some("cb_hy"));

        let text = page.to_string();
        assert!(text.contains("[alert] Security not found"));
        assert!(text.contains("[nav] corp-bonds -> cb_hy"));
    }

    #[test]
    fn test_crosshair_moves_legend() {
        use crate::models::{FetchResult, ViewKind};
        use crate::render::dispatch::Renderer;
        use serde_json::json;

        let mut page = Page::new();
        let payload = json!({
            "source": "nyse",
            "ad_line": [
                { "time": "2024-03-06", "value": 10.0 },
                { "time": "2024-03-07", "value": 11.111 },
                { "time": "2024-03-08", "value": 12.5 }
            ],
            "ema_line": [
                { "time": "2024-03-06", "value": 9.0 },
                { "time": "2024-03-07", "value": 9.5 },
                { "time": "2024-03-08", "value": 10.0 }
            ]
        });
        Renderer::new(ChartOptions::default())
            .render(ViewKind::MarketDiary, FetchResult::Success(payload), &mut page)
            .unwrap();

        let legend = |page: &Page| match page.children(Region::Legend) {
            [Node::Legend(legend)] => (legend.text.clone(), legend.date.clone()),
            other => panic!("unexpected legend region: {:?}", other),
        };
        assert_eq!(legend(&page), ("AD-Line: 12.50".to_string(), "3/8/2024".to_string()));

        assert!(page.crosshair_move(Some(&Time::BusinessDay("2024-03-07".to_string()))));
        assert_eq!(legend(&page), ("AD-Line: 11.11".to_string(), "3/7/2024".to_string()));

        assert!(page.crosshair_move(None));
        assert_eq!(legend(&page), ("AD-Line: 12.50".to_string(), "3/8/2024".to_string()));
    }

    #[test]
    fn test_crosshair_without_legend_chart() {
        let mut page = Page::new();
        page.append(Region::Chart, Node::Chart(chart(1)));

        assert!(!page.crosshair_move(None));
        assert!(page.children(Region::Legend).is_empty());
    }
}
