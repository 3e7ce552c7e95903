//! CSV results table formatter

use super::OutputFormatter;
use anyhow::Result;
use logeval_core::record::keys;
use logeval_core::JobOutcome;
use std::io::Write;

/// CSV formatter - one row per comparison, one column per metric
///
/// Columns are fixed (`method`, `dataset`, every metric key, `error`, then
/// `coverage` and the source files) so rows from strict-only and full
/// evaluations line up in the same table.
pub struct CsvFormatter<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> CsvFormatter<W> {
    /// Create a new CSV formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            header_written: false,
        }
    }

    /// Consume the formatter, returning the writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))
    }

    fn write_header(&mut self) -> Result<()> {
        if !self.header_written {
            let mut header = vec!["method", "dataset"];
            header.extend(keys::ALL);
            header.extend(["error", "coverage", "gt_file", "pred_file"]);
            self.writer.write_record(&header)?;
            self.header_written = true;
        }
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for CsvFormatter<W> {
    fn format_outcome(&mut self, outcome: &JobOutcome) -> Result<()> {
        self.write_header()?;

        let mut row = vec![outcome.method.clone(), outcome.dataset.clone()];
        for key in keys::ALL {
            let cell = outcome
                .metrics()
                .and_then(|m| m.get(key))
                .map(|v| v.to_string())
                .unwrap_or_default();
            row.push(cell);
        }
        row.push(outcome.error().unwrap_or_default().to_string());
        row.push(outcome.coverage.map(|c| c.to_string()).unwrap_or_default());
        row.push(outcome.gt_file.clone().unwrap_or_default());
        row.push(outcome.pred_file.clone().unwrap_or_default());
        self.writer.write_record(&row)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.write_header()?;
        self.writer.flush()?;
        Ok(())
    }
}
