// Temperature session - mirrors realtime feed values into the hosted
// store and renders the paginated chart/table from it
use crate::application::command::Command;
use crate::application::pagination::Pager;
use crate::application::reading_store::ReadingStore;
use crate::application::views::{ChartSeries, ChartView, PaginationView, TableView, TileView};
use crate::domain::temperature::{ProbeHealth, StoredReading, TemperatureReading, TemperatureStatus};
use crate::infrastructure::csv_export;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;

const TABLE_HEADER: [&str; 3] = ["Sensor", "Value", "Timestamp"];
const SERIES_NAME: &str = "Temperature";

/// One page session: owns the page cursor, reads every displayed row back
/// from the hosted store so page numbers behave exactly like the remote
/// range convention.
pub struct TemperatureDashboard {
    store: Arc<dyn ReadingStore>,
    pager: Pager,
    export_path: PathBuf,
    /// Row count reported by the last fetch; drives the cursor bounds
    /// between fetches.
    total: usize,
    tile: Box<dyn TileView>,
    chart: Box<dyn ChartView>,
    table: Box<dyn TableView>,
    controls: Box<dyn PaginationView>,
}

impl TemperatureDashboard {
    pub fn new(
        store: Arc<dyn ReadingStore>,
        page_size: usize,
        export_path: PathBuf,
        tile: Box<dyn TileView>,
        chart: Box<dyn ChartView>,
        table: Box<dyn TableView>,
        controls: Box<dyn PaginationView>,
    ) -> Self {
        Self {
            store,
            pager: Pager::new(page_size),
            export_path,
            total: 0,
            tile,
            chart,
            table,
            controls,
        }
    }

    /// Drain feed values and commands one at a time; each message is
    /// handled to completion before the next is dequeued.
    pub async fn run(mut self, values: mpsc::Receiver<f64>, commands: mpsc::Receiver<Command>) {
        self.refresh().await;
        let mut values = ReceiverStream::new(values);
        let mut commands = ReceiverStream::new(commands);
        loop {
            tokio::select! {
                Some(value) = values.next() => self.ingest(value).await,
                Some(command) = commands.next() => self.handle(command).await,
                else => break,
            }
        }
        tracing::info!("temperature session ended");
    }

    /// One full ingestion step: classify, update the tile, mirror into
    /// the hosted store, then re-fetch and redraw the current page. A
    /// failed mirror write is logged and never redone; the local display
    /// update goes ahead regardless.
    pub async fn ingest(&mut self, value: f64) {
        match ProbeHealth::classify(value) {
            ProbeHealth::LinkDown => tracing::error!("probe radio link is down"),
            ProbeHealth::NoData => tracing::warn!("probe delivered no reading"),
            ProbeHealth::Healthy => {}
        }

        self.tile
            .show_reading(value, TemperatureStatus::from_celsius(value));

        let reading = TemperatureReading::new(value);
        if let Err(e) = self.store.insert(&reading).await {
            tracing::error!("failed to mirror reading into the hosted store: {}", e);
        }

        self.refresh().await;
    }

    pub async fn handle(&mut self, command: Command) {
        match command {
            Command::First => self.pager.first(),
            Command::Prev => self.pager.prev(),
            Command::Next => self.pager.next(self.total),
            Command::Last => self.pager.last(self.total),
            Command::Goto(page) => self.pager.goto(page, self.total),
            Command::Export => {
                self.export_csv().await;
                return;
            }
        }
        self.refresh().await;
    }

    /// Fetch the current page (descending insertion time) and redraw the
    /// chart, table and controls from it. On a fetch failure the visuals
    /// simply stay stale.
    async fn refresh(&mut self) {
        let page = match self
            .store
            .fetch_page(self.pager.offset(), self.pager.limit())
            .await
        {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("failed to fetch readings: {}", e);
                return;
            }
        };
        self.total = page.total;

        let labels: Vec<String> = page.rows.iter().map(|r| r.created_at.clone()).collect();
        let values: Vec<f64> = page.rows.iter().map(|r| r.value).collect();
        self.chart.redraw(
            &labels,
            &[ChartSeries {
                name: SERIES_NAME,
                points: &values,
            }],
        );

        let rows: Vec<Vec<String>> = page
            .rows
            .iter()
            .map(|r| vec![r.sensor.clone(), r.value.to_string(), r.created_at.clone()])
            .collect();
        self.table.render(&TABLE_HEADER, &rows);

        self.controls.render(&self.pager.controls(self.total));
    }

    /// Serialize every stored reading, not just the displayed page.
    pub async fn export_csv(&self) {
        let rows = match self.fetch_all().await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("CSV export aborted, could not read the store: {}", e);
                return;
            }
        };
        match csv_export::export_readings(&rows, &self.export_path) {
            Ok(()) => tracing::info!(
                "exported {} readings to {}",
                rows.len(),
                self.export_path.display()
            ),
            Err(e) => tracing::error!("CSV export failed: {}", e),
        }
    }

    /// Page through the store until the reported total is reached.
    async fn fetch_all(&self) -> anyhow::Result<Vec<StoredReading>> {
        let mut rows = Vec::new();
        let mut offset = 0;
        loop {
            let page = self.store.fetch_page(offset, self.pager.limit()).await?;
            let fetched = page.rows.len();
            rows.extend(page.rows);
            offset += fetched;
            if fetched == 0 || rows.len() >= page.total {
                break;
            }
        }
        Ok(rows)
    }
}
