// In-memory sample log shared by the dashboard sessions
use std::ops::Range;

/// One named measurement stream. Values are position-correlated with the
/// timestamp labels of the owning store.
#[derive(Debug, Clone)]
pub struct ChannelSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Append-only, time-ordered log of telemetry samples.
///
/// Insertion order is arrival order is display order. Every channel
/// sequence and the timestamp sequence have identical length at all
/// times; an append grows each of them by exactly one element and nothing
/// is ever deleted. The store grows unbounded for the lifetime of the
/// session.
#[derive(Debug, Clone)]
pub struct SampleStore {
    labels: Vec<String>,
    channels: Vec<ChannelSeries>,
}

/// Read-only view over a contiguous run of the store, handed to the
/// chart and table renderers.
#[derive(Debug, Clone)]
pub struct StoreView<'a> {
    pub labels: &'a [String],
    pub series: Vec<(&'a str, &'a [f64])>,
}

/// One sample flattened into row form for table rendering and export.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow<'a> {
    /// Zero-based position in the store.
    pub index: usize,
    pub label: &'a str,
    pub values: Vec<f64>,
}

impl SampleStore {
    pub fn new<I, S>(channel_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: Vec::new(),
            channels: channel_names
                .into_iter()
                .map(|name| ChannelSeries {
                    name: name.into(),
                    values: Vec::new(),
                })
                .collect(),
        }
    }

    /// Append one sample: the timestamp label plus one value per channel,
    /// in one logical step. A short `values` slice fills the remaining
    /// channels with NaN so the sequences never drift apart; renderers
    /// treat non-finite values as gaps.
    pub fn append(&mut self, label: String, values: &[f64]) {
        self.labels.push(label);
        for (i, channel) in self.channels.iter_mut().enumerate() {
            channel
                .values
                .push(values.get(i).copied().unwrap_or(f64::NAN));
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|c| c.name.as_str())
    }

    /// Trailing slice of at most `max_points` samples, or the whole store
    /// when it holds fewer. Recomputed from scratch on every call; no
    /// state is carried between calls.
    pub fn window(&self, max_points: usize) -> StoreView<'_> {
        let start = self.len().saturating_sub(max_points);
        self.view(start..self.len())
    }

    /// View over an arbitrary range, clamped to the store bounds.
    pub fn view(&self, range: Range<usize>) -> StoreView<'_> {
        let start = range.start.min(self.len());
        let end = range.end.min(self.len()).max(start);
        StoreView {
            labels: &self.labels[start..end],
            series: self
                .channels
                .iter()
                .map(|c| (c.name.as_str(), &c.values[start..end]))
                .collect(),
        }
    }

    /// Row-wise iteration over a range, for the table and CSV export.
    pub fn rows(&self, range: Range<usize>) -> impl Iterator<Item = SampleRow<'_>> {
        let start = range.start.min(self.len());
        let end = range.end.min(self.len()).max(start);
        (start..end).map(move |i| SampleRow {
            index: i,
            label: &self.labels[i],
            values: self.channels.iter().map(|c| c.values[i]).collect(),
        })
    }
}

impl StoreView<'_> {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
