use std::fmt::Write as _;

use tracing::info;

use crate::trajectory_system::state::SimulationState;

/// Summary of one finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRow {
    pub time_step: f64,
    pub range: f64,
    pub max_height: f64,
    pub terminal_speed: f64,
}

impl ResultRow {
    pub fn from_state(time_step: f64, state: &SimulationState) -> Self {
        ResultRow {
            time_step,
            range: state.range(),
            max_height: state.max_height,
            terminal_speed: state.speed(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.range.is_finite() && self.max_height.is_finite() && self.terminal_speed.is_finite()
    }
}

const HEADERS: [&str; 4] = ["dt, s", "Range, m", "Max height, m", "Final speed, m/s"];
const WIDTHS: [usize; 4] = [8, 12, 15, 18];

/// Rows accumulate across runs until cleared.
#[derive(Debug, Clone, Default)]
pub struct ResultsTable {
    rows: Vec<ResultRow>,
}

impl ResultsTable {
    pub fn new() -> Self {
        ResultsTable::default()
    }

    pub fn record(&mut self, row: ResultRow) {
        info!(
            dt = row.time_step,
            range = row.range,
            max_height = row.max_height,
            terminal_speed = row.terminal_speed,
            "result recorded"
        );
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    fn format_cells(row: &ResultRow) -> [String; 4] {
        [
            format!("{}", row.time_step),
            format!("{:.2}", row.range),
            format!("{:.2}", row.max_height),
            format!("{:.2}", row.terminal_speed),
        ]
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        Self::render_line(&mut out, HEADERS.map(String::from));
        let rule: Vec<String> = WIDTHS.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(out, "{}", rule.join("-+-"));
        for row in &self.rows {
            Self::render_line(&mut out, Self::format_cells(row));
        }
        out
    }

    fn render_line(out: &mut String, cells: [String; 4]) {
        let padded: Vec<String> = cells
            .iter()
            .zip(WIDTHS)
            .map(|(cell, width)| format!("{:^width$}", cell, width = width))
            .collect();
        let _ = writeln!(out, "{}", padded.join(" | "));
    }
}
