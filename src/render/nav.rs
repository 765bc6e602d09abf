use serde::Serialize;
use std::collections::BTreeMap;

// Groups of mutually exclusive navigation links, keyed like the page markup.
pub const CHART_VIEW_GROUP: &str = "chart-view";
pub const ANALYSIS_GROUP: &str = "analysis";
pub const MAX_PAIN_GROUP: &str = "max-pain";
pub const CORP_BONDS_GROUP: &str = "corp-bonds";
pub const SENTIMENT_GROUP: &str = "sentiment";
pub const MARKET_DIARY_GROUP: &str = "market-diary";

pub const NL_DAILY: &str = "nl_daily";
pub const NL_WEEKLY: &str = "nl_weekly";
pub const NL_MONTHLY: &str = "nl_monthly";
pub const NL_HURST: &str = "nl_hurst";
pub const NL_SD: &str = "nl_sd";
pub const TA_LINK: &str = "ta_link";
pub const FA_LINK: &str = "fa_link";
pub const MP_HISTORY: &str = "mp_history";
pub const MP_DISTRIBUTION: &str = "mp_distribution";
pub const CB_HY: &str = "cb_hy";
pub const CB_IG: &str = "cb_ig";
pub const NAAIM: &str = "naaim";
pub const AAII: &str = "aaii";
pub const FRA: &str = "fra";
pub const FRA_SPREAD: &str = "fra-spread";
pub const NYSE: &str = "nyse";
pub const NASDAQ: &str = "nasdaq";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub id: String,
    pub active: bool,
}

/// Active-link bookkeeping for every navigation group on the page.
///
/// A link is only ever marked after its whole group was cleared, so each
/// group has at most one active link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavState {
    groups: BTreeMap<String, Vec<NavLink>>,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    /// All groups the analytics pages render.
    pub fn standard() -> Self {
        let mut nav = Self::new();
        nav.register(CHART_VIEW_GROUP, &[NL_DAILY, NL_WEEKLY, NL_MONTHLY, NL_HURST, NL_SD]);
        nav.register(ANALYSIS_GROUP, &[TA_LINK, FA_LINK]);
        nav.register(MAX_PAIN_GROUP, &[MP_HISTORY, MP_DISTRIBUTION]);
        nav.register(CORP_BONDS_GROUP, &[CB_HY, CB_IG]);
        nav.register(SENTIMENT_GROUP, &[NAAIM, AAII, FRA, FRA_SPREAD]);
        nav.register(MARKET_DIARY_GROUP, &[NYSE, NASDAQ]);
        nav
    }

    pub fn register(&mut self, group: &str, links: &[&str]) {
        let links = links
            .iter()
            .map(|id| NavLink {
                id: id.to_string(),
                active: false,
            })
            .collect();
        self.groups.insert(group.to_string(), links);
    }

    /// Clear `group`, then mark `link` if the group knows it.
    ///
    /// Returns whether a link ended up active.
    pub fn activate(&mut self, group: &str, link: Option<&str>) -> bool {
        let Some(links) = self.groups.get_mut(group) else {
            return false;
        };
        for l in links.iter_mut() {
            l.active = false;
        }
        match link.and_then(|id| links.iter().position(|l| l.id == id)) {
            Some(index) => {
                links[index].active = true;
                true
            }
            None => false,
        }
    }

    pub fn active(&self, group: &str) -> Option<&str> {
        self.groups
            .get(group)?
            .iter()
            .find(|l| l.active)
            .map(|l| l.id.as_str())
    }

    pub fn is_active(&self, link: &str) -> bool {
        self.groups
            .values()
            .flatten()
            .any(|l| l.id == link && l.active)
    }

    pub fn active_count(&self, group: &str) -> usize {
        self.groups
            .get(group)
            .map(|links| links.iter().filter(|l| l.active).count())
            .unwrap_or(0)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[NavLink])> {
        self.groups.iter().map(|(name, links)| (name.as_str(), links.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_marks_single_link() {
        let mut nav = NavState::standard();

        assert!(nav.activate(CHART_VIEW_GROUP, Some(NL_DAILY)));
        assert!(nav.activate(CHART_VIEW_GROUP, Some(NL_HURST)));

        assert_eq!(nav.active(CHART_VIEW_GROUP), Some(NL_HURST));
        assert_eq!(nav.active_count(CHART_VIEW_GROUP), 1);
        assert!(!nav.is_active(NL_DAILY));
    }

    #[test]
    fn test_unknown_link_clears_group() {
        let mut nav = NavState::standard();
        nav.activate(SENTIMENT_GROUP, Some(AAII));

        assert!(!nav.activate(SENTIMENT_GROUP, Some("vix")));
        assert_eq!(nav.active(SENTIMENT_GROUP), None);
    }

    #[test]
    fn test_groups_are_independent() {
        let mut nav = NavState::standard();
        nav.activate(MAX_PAIN_GROUP, Some(MP_HISTORY));
        nav.activate(CORP_BONDS_GROUP, Some(CB_IG));

        assert_eq!(nav.active(MAX_PAIN_GROUP), Some(MP_HISTORY));
        assert_eq!(nav.active(CORP_BONDS_GROUP), Some(CB_IG));
    }

    #[test]
    fn test_unknown_group_is_ignored() {
        let mut nav = NavState::standard();
        assert!(!nav.activate("quiz", Some("q1")));
        assert_eq!(nav.active_count("quiz"), 0);
    }
}
