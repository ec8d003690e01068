// Main entry point - Dependency injection and session startup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use crate::application::motion_service::MotionDashboard;
use crate::application::temperature_service::TemperatureDashboard;
use crate::infrastructure::config::{load_motion_settings, load_temperature_settings};
use crate::infrastructure::rest_store::RestReadingStore;
use crate::infrastructure::{push_channel, realtime_feed};
use crate::presentation::console::{
    self, ConsoleChart, ConsoleOrientation, ConsolePagination, ConsoleTable, ConsoleTile,
};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let page = std::env::args().nth(1).unwrap_or_else(|| "motion".to_string());
    let client = reqwest::Client::new();

    // the command prompt plays the part of the pagination/download buttons
    let (command_tx, command_rx) = mpsc::channel(16);
    tokio::spawn(console::pump_stdin_commands(command_tx));

    match page.as_str() {
        "motion" => {
            let settings = load_motion_settings()?;

            let (sample_tx, sample_rx) = mpsc::channel(100);
            tokio::spawn(push_channel::pump_motion_events(
                client,
                settings.events_url.clone(),
                settings.event_name.clone(),
                sample_tx,
            ));

            let dashboard = MotionDashboard::new(
                settings.page_size,
                settings.chart_points,
                settings.export_path.clone().into(),
                Box::new(ConsoleOrientation),
                Box::new(ConsoleChart),
                Box::new(ConsoleTable),
                Box::new(ConsolePagination),
            );

            println!("Starting motion dashboard session");
            dashboard.run(sample_rx, command_rx).await;
        }
        "temperature" => {
            let settings = load_temperature_settings()?;

            let (value_tx, value_rx) = mpsc::channel(100);
            tokio::spawn(realtime_feed::pump_feed_values(
                client.clone(),
                settings.feed_url.clone(),
                settings.feed_path.clone(),
                value_tx,
            ));

            let store = Arc::new(RestReadingStore::new(
                client,
                settings.store_url.clone(),
                settings.store_key.clone(),
                settings.table.clone(),
            ));
            let dashboard = TemperatureDashboard::new(
                store,
                settings.page_size,
                settings.export_path.clone().into(),
                Box::new(ConsoleTile),
                Box::new(ConsoleChart),
                Box::new(ConsoleTable),
                Box::new(ConsolePagination),
            );

            println!("Starting temperature dashboard session");
            dashboard.run(value_rx, command_rx).await;
        }
        other => anyhow::bail!("unknown dashboard page: {} (expected motion or temperature)", other),
    }

    Ok(())
}
