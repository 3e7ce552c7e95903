//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use logeval_core::record::keys;
use logeval_core::{JobOutcome, JobStatus};
use std::io::{self, Write};

/// Plain text formatter - one status line per comparison
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the formatter, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_outcome(&mut self, outcome: &JobOutcome) -> Result<()> {
        let name = format!("{}/{}", outcome.method, outcome.dataset);
        match &outcome.status {
            JobStatus::Ok { metrics } => {
                let value = |key: &str| metrics.get(key).unwrap_or(0.0);
                write!(
                    self.writer,
                    "[ok] {name}: GA={:.3} (P={:.3}, R={:.3}) PA={:.3}",
                    value(keys::GA),
                    value(keys::GA_PRECISION),
                    value(keys::GA_RECALL),
                    value(keys::PA),
                )?;
                if let (Some(ga), Some(pa)) =
                    (metrics.get(keys::GA_FRIENDLY), metrics.get(keys::PA_FRIENDLY))
                {
                    write!(self.writer, " | friendly GA={ga:.3} PA={pa:.3}")?;
                }
                if let (Some(pred), Some(gt)) =
                    (metrics.get(keys::PRED_PURE), metrics.get(keys::GT_PURE))
                {
                    write!(self.writer, " | purity pred={pred:.3} gt={gt:.3}")?;
                }
                writeln!(self.writer)?;
            }
            JobStatus::Failed { error } => {
                writeln!(self.writer, "[fail] {name}: {error}")?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
