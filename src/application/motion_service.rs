// Motion session - ingests push-channel samples, drives the chart window,
// the paginated table and the CSV export
use crate::application::command::Command;
use crate::application::pagination::Pager;
use crate::application::views::{
    ChartSeries, ChartView, OrientationView, PaginationView, TableView,
};
use crate::domain::motion::{self, MOTION_CHANNELS, MotionSample};
use crate::domain::store::SampleStore;
use crate::infrastructure::csv_export;
use chrono::{SecondsFormat, Utc};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;

const TABLE_HEADER: [&str; 8] = [
    "Index", "Timestamp", "Acc X", "Acc Y", "Acc Z", "Gyro X", "Gyro Y", "Gyro Z",
];

/// One page session: exclusive owner of the sample store and the page
/// cursor, driven by push-channel samples and user commands.
pub struct MotionDashboard {
    store: SampleStore,
    pager: Pager,
    chart_points: usize,
    export_path: PathBuf,
    orientation: Box<dyn OrientationView>,
    chart: Box<dyn ChartView>,
    table: Box<dyn TableView>,
    controls: Box<dyn PaginationView>,
}

impl MotionDashboard {
    pub fn new(
        page_size: usize,
        chart_points: usize,
        export_path: PathBuf,
        orientation: Box<dyn OrientationView>,
        chart: Box<dyn ChartView>,
        table: Box<dyn TableView>,
        controls: Box<dyn PaginationView>,
    ) -> Self {
        Self {
            store: SampleStore::new(MOTION_CHANNELS),
            pager: Pager::new(page_size),
            chart_points,
            export_path,
            orientation,
            chart,
            table,
            controls,
        }
    }

    /// Drain samples and commands one at a time; each message is handled
    /// to completion before the next is dequeued.
    pub async fn run(
        mut self,
        samples: mpsc::Receiver<MotionSample>,
        commands: mpsc::Receiver<Command>,
    ) {
        self.render_table();
        self.render_controls();
        let mut samples = ReceiverStream::new(samples);
        let mut commands = ReceiverStream::new(commands);
        loop {
            tokio::select! {
                Some(sample) = samples.next() => self.ingest(sample),
                Some(command) = commands.next() => self.handle(command),
                else => break,
            }
        }
        tracing::info!("motion session ended");
    }

    /// Ingest one sample stamped with the arrival time.
    pub fn ingest(&mut self, sample: MotionSample) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.ingest_at(timestamp, sample);
    }

    /// One full ingestion step: normalize the angular channels, hand the
    /// orientation to the 3D collaborator, append, then refresh chart,
    /// table and controls.
    pub fn ingest_at(&mut self, timestamp: String, sample: MotionSample) {
        let gyro_x = motion::round2(motion::scale_angular(sample.gyro_x));
        let gyro_y = motion::round2(motion::scale_angular(sample.gyro_y));
        let gyro_z = motion::round2(motion::scale_angular(sample.gyro_z));

        self.orientation.set_orientation(gyro_x, gyro_y, gyro_z);

        self.store.append(
            timestamp,
            &[sample.acc_x, sample.acc_y, sample.acc_z, gyro_x, gyro_y, gyro_z],
        );

        self.redraw_chart();
        self.render_table();
        self.render_controls();
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::First => self.pager.first(),
            Command::Prev => self.pager.prev(),
            Command::Next => self.pager.next(self.store.len()),
            Command::Last => self.pager.last(self.store.len()),
            Command::Goto(page) => self.pager.goto(page, self.store.len()),
            Command::Export => {
                self.export_csv();
                return;
            }
        }
        self.render_table();
        self.render_controls();
    }

    /// Serialize the whole store, not just the current page or window.
    pub fn export_csv(&self) {
        match csv_export::export_motion(&self.store, &self.export_path) {
            Ok(()) => tracing::info!(
                "exported {} samples to {}",
                self.store.len(),
                self.export_path.display()
            ),
            Err(e) => tracing::error!("CSV export failed: {}", e),
        }
    }

    fn redraw_chart(&mut self) {
        let window = self.store.window(self.chart_points);
        let series: Vec<ChartSeries<'_>> = window
            .series
            .iter()
            .map(|&(name, points)| ChartSeries { name, points })
            .collect();
        self.chart.redraw(window.labels, &series);
    }

    fn render_table(&mut self) {
        let rows: Vec<Vec<String>> = self
            .store
            .rows(self.pager.slice(self.store.len()))
            .map(|row| {
                let mut cells = Vec::with_capacity(TABLE_HEADER.len());
                cells.push((row.index + 1).to_string());
                cells.push(row.label.to_string());
                cells.extend(row.values.iter().map(|v| format_cell(*v)));
                cells
            })
            .collect();
        self.table.render(&TABLE_HEADER, &rows);
    }

    fn render_controls(&mut self) {
        self.controls.render(&self.pager.controls(self.store.len()));
    }
}

/// Non-finite values render as blank cells rather than crashing the table.
fn format_cell(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}
