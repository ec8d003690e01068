// Console rendering of the dashboard widgets and the command prompt
use crate::application::command::Command;
use crate::application::pagination::PaginationControls;
use crate::application::views::{
    ChartSeries, ChartView, OrientationView, PaginationView, TableView, TileView,
};
use crate::domain::temperature::TemperatureStatus;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub struct ConsoleOrientation;

impl OrientationView for ConsoleOrientation {
    fn set_orientation(&mut self, x: f64, y: f64, z: f64) {
        println!("orientation  x {:>8.2}  y {:>8.2}  z {:>8.2}", x, y, z);
    }
}

pub struct ConsoleChart;

impl ChartView for ConsoleChart {
    fn redraw(&mut self, labels: &[String], series: &[ChartSeries<'_>]) {
        let Some(latest) = labels.last() else {
            return;
        };
        let readings: Vec<String> = series
            .iter()
            .map(|s| match s.points.last() {
                Some(v) if v.is_finite() => format!("{}={}", s.name, v),
                _ => format!("{}=-", s.name),
            })
            .collect();
        println!("chart [{} pts] {}  {}", labels.len(), latest, readings.join("  "));
    }
}

pub struct ConsoleTable;

impl TableView for ConsoleTable {
    fn render(&mut self, header: &[&str], rows: &[Vec<String>]) {
        println!("{}", header.join(" | "));
        for row in rows {
            println!("{}", row.join(" | "));
        }
    }
}

pub struct ConsolePagination;

impl PaginationView for ConsolePagination {
    fn render(&mut self, controls: &PaginationControls) {
        let mut parts = Vec::new();
        parts.push(button("<<", controls.first_enabled));
        parts.push(button("<", controls.prev_enabled));
        for page in controls.page_numbers.clone() {
            if page == controls.current {
                parts.push(format!("[{}]", page));
            } else {
                parts.push(page.to_string());
            }
        }
        parts.push(button(">", controls.next_enabled));
        parts.push(button(">>", controls.last_enabled));
        println!("{}", parts.join(" "));
    }
}

// disabled buttons render parenthesized
fn button(label: &str, enabled: bool) -> String {
    if enabled {
        label.to_string()
    } else {
        format!("({})", label)
    }
}

pub struct ConsoleTile;

impl TileView for ConsoleTile {
    fn show_reading(&mut self, value: f64, status: TemperatureStatus) {
        println!("temperature {} °C  [{}]", value, status.label());
    }
}

/// Forward navigation and export commands typed on stdin to the session.
pub async fn pump_stdin_commands(tx: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match Command::parse(&line) {
            Some(command) => {
                if tx.send(command).await.is_err() {
                    return;
                }
            }
            None => {
                if !line.trim().is_empty() {
                    eprintln!("unknown command: {}", line.trim());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_markers() {
        assert_eq!(button("<<", true), "<<");
        assert_eq!(button(">", false), "(>)");
    }
}
