//! Text views over a [`SimulationResult`]: the per-step log, the summary, and
//! a timeline with one column per step.

use std::fmt::{self, Display, Write};

use owo_colors::OwoColorize;

use crate::{replace::AccessResult, sim::SimulationResult};

/// `"<key> → HIT"` / `"<key> → MISS"`, one per step.
pub fn log_lines<K: Display>(result: &SimulationResult<K>) -> impl Iterator<Item = String> + '_ {
    result
        .steps
        .iter()
        .map(|step| format!("{} → {}", step.key, step.outcome))
}

/// Totals and hit ratio. The ratio prints as its shortest form with a
/// trailing `.0` when whole (`25.0%`, `33.33%`), and as `0%` for an empty run.
pub fn summary<K>(result: &SimulationResult<K>) -> String {
    let ratio = if result.stats.total == 0 {
        "0".to_string()
    } else {
        format!("{:?}", result.hit_ratio())
    };
    format!(
        "Total Hits: {}\nTotal Misses: {}\nHit Ratio: {ratio}%",
        result.hits(),
        result.misses(),
    )
}

/// Post-access cache contents per step, top slot first, with an `H`/`M`
/// marker row underneath. Hits are green and misses red when `color` is set.
pub struct Timeline<'a, K> {
    result: &'a SimulationResult<K>,
    color: bool,
}

impl<'a, K: Display> Timeline<'a, K> {
    pub fn new(result: &'a SimulationResult<K>) -> Self {
        Timeline {
            result,
            color: false,
        }
    }

    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn cell_width(&self) -> usize {
        self.result
            .steps
            .iter()
            .flat_map(|step| step.cache.iter())
            .map(|key| key.to_string().chars().count())
            .max()
            .unwrap_or(1)
            + 2
    }

    fn paint(&self, text: &str, outcome: AccessResult) -> String {
        match (self.color, outcome) {
            (false, _) => text.to_string(),
            (true, AccessResult::Hit) => text.black().on_green().to_string(),
            (true, AccessResult::Miss) => text.black().on_red().to_string(),
        }
    }
}

impl<K: Display> Display for Timeline<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.cell_width();
        let inner = width - 2;
        let mut row = String::new();

        for slot in 0..self.result.max_occupancy() {
            row.clear();
            for (idx, step) in self.result.steps.iter().enumerate() {
                if idx > 0 {
                    row.push(' ');
                }
                match step.cache.get(slot) {
                    Some(key) => {
                        let cell = format!("[{:^inner$}]", key.to_string());
                        row.push_str(&self.paint(&cell, step.outcome));
                    }
                    None => write!(row, "{:width$}", "")?,
                }
            }
            writeln!(f, "{}", row.trim_end())?;
        }

        row.clear();
        for (idx, step) in self.result.steps.iter().enumerate() {
            if idx > 0 {
                row.push(' ');
            }
            let marker = if step.outcome.is_hit() { "H" } else { "M" };
            write!(row, "{marker:^width$}")?;
        }
        writeln!(f, "{}", row.trim_end())
    }
}
