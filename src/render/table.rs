use serde::Serialize;

use crate::models::{AnalysisTable, Metric, QuizList, NOT_APPLICABLE};

pub const TABLE_CLASSES: [&str; 3] = ["table", "table-responsive", "table-hover"];

/// Visual style of a value cell (`text-success` / `text-danger`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CellStyle {
    Plain,
    Success,
    Danger,
}

impl CellStyle {
    pub fn class(&self) -> Option<&'static str> {
        match self {
            CellStyle::Plain => None,
            CellStyle::Success => Some("text-success"),
            CellStyle::Danger => Some("text-danger"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::Plain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub classes: Vec<&'static str>,
    pub header: Option<Row>,
    pub rows: Vec<Row>,
}

impl Table {
    fn new(header: Option<Row>, rows: Vec<Row>) -> Self {
        Self {
            classes: TABLE_CLASSES.to_vec(),
            header,
            rows,
        }
    }
}

/// Two decimals, sign picks the style; "N/A" is shown as is.
pub fn format_metric(metric: &Metric) -> Cell {
    match metric {
        Metric::NotApplicable => Cell::plain(NOT_APPLICABLE),
        Metric::Value(value) => Cell {
            text: format!("{value:.2}"),
            style: if *value >= 0.0 {
                CellStyle::Success
            } else {
                CellStyle::Danger
            },
        },
    }
}

/// Label / value table of the technical and fundamental analysis views.
pub fn analysis_table(table: &AnalysisTable) -> Table {
    let rows = table
        .entries
        .iter()
        .map(|(name, metric)| Row {
            cells: vec![Cell::plain(name.clone()), format_metric(metric)],
        })
        .collect();
    Table::new(None, rows)
}

pub fn quiz_table(list: &QuizList) -> Table {
    let header = Row {
        cells: vec![
            Cell::plain("Quiz"),
            Cell::plain("Difficulty"),
            Cell::plain("Result"),
        ],
    };
    let rows = list
        .quizzes
        .iter()
        .map(|quiz| Row {
            cells: vec![
                Cell::plain(quiz.name.clone()),
                Cell::plain(quiz.difficulty.display()),
                Cell::plain(
                    quiz.result
                        .as_ref()
                        .map(|r| r.display())
                        .unwrap_or_else(|| "-".to_string()),
                ),
            ],
        })
        .collect();
    Table::new(Some(header), rows)
}
