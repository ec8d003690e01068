// CSV export - serializes the full telemetry history to a local file
use crate::domain::store::SampleStore;
use crate::domain::temperature::StoredReading;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Write the entire motion store: a header row, then one row per sample
/// with a 1-based index column. Page and window do not apply here.
pub fn export_motion(store: &SampleStore, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_motion(store, file)
}

fn write_motion<W: Write>(store: &SampleStore, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["Index".to_string(), "Timestamp".to_string()];
    header.extend(store.channel_names().map(str::to_string));
    writer.write_record(&header)?;

    for row in store.rows(0..store.len()) {
        let mut record = vec![(row.index + 1).to_string(), row.label.to_string()];
        record.extend(row.values.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write every stored temperature reading, newest first as fetched.
pub fn export_readings(rows: &[StoredReading], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_readings(rows, file)
}

fn write_readings<W: Write>(rows: &[StoredReading], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record(["Sensor", "Value", "Timestamp"])?;
    for row in rows {
        writer.write_record([
            row.sensor.as_str(),
            &row.value.to_string(),
            row.created_at.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::motion::MOTION_CHANNELS;

    fn sample_store(samples: usize) -> SampleStore {
        let mut store = SampleStore::new(MOTION_CHANNELS);
        for i in 0..samples {
            store.append(
                format!("2026-08-05T12:00:{:02}.000Z", i),
                &[0.1, 0.2, 9.8, 1.5, -2.25, (i as f64)],
            );
        }
        store
    }

    fn written_lines(buffer: &[u8]) -> Vec<String> {
        String::from_utf8(buffer.to_vec())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_motion_export_has_header_plus_one_row_per_sample() {
        let store = sample_store(25);
        let mut buffer = Vec::new();
        write_motion(&store, &mut buffer).unwrap();

        let lines = written_lines(&buffer);
        assert_eq!(lines.len(), 26);
        assert_eq!(
            lines[0],
            "Index,Timestamp,Acc X,Acc Y,Acc Z,Gyro X,Gyro Y,Gyro Z"
        );
        assert!(lines[1].starts_with("1,2026-08-05T12:00:00.000Z,0.1,"));
        assert!(lines[25].starts_with("25,"));
    }

    #[test]
    fn test_motion_rows_have_a_field_per_column() {
        let store = sample_store(3);
        let mut buffer = Vec::new();
        write_motion(&store, &mut buffer).unwrap();

        for line in written_lines(&buffer) {
            assert_eq!(line.split(',').count(), 8);
        }
    }

    #[test]
    fn test_reading_export_layout() {
        let rows = vec![
            StoredReading {
                sensor: "MAX31865".to_string(),
                value: -1.5,
                created_at: "2026-08-05T12:00:01Z".to_string(),
            },
            StoredReading {
                sensor: "MAX31865".to_string(),
                value: 4.0,
                created_at: "2026-08-05T12:00:00Z".to_string(),
            },
        ];
        let mut buffer = Vec::new();
        write_readings(&rows, &mut buffer).unwrap();

        let lines = written_lines(&buffer);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Sensor,Value,Timestamp");
        assert_eq!(lines[1], "MAX31865,-1.5,2026-08-05T12:00:01Z");
    }

    #[test]
    fn test_export_to_file() {
        let store = sample_store(2);
        let path = std::env::temp_dir().join("motion-export-unit-test.csv");
        export_motion(&store, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        let _ = std::fs::remove_file(&path);
    }
}
