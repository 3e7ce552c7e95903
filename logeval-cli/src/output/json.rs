//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use logeval_core::JobOutcome;
use std::io::Write;

/// JSON formatter - outputs comparisons as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    outcomes: Vec<JobOutcome>,
    pretty: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            outcomes: Vec::new(),
            pretty: true,
        }
    }

    /// Toggle pretty printing
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Consume the formatter, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_outcome(&mut self, outcome: &JobOutcome) -> Result<()> {
        self.outcomes.push(outcome.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.outcomes)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.outcomes)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logeval_core::record::keys;
    use logeval_core::MetricsRecord;

    #[test]
    fn test_outcomes_as_flat_objects() {
        let mut formatter = JsonFormatter::new(Vec::new()).pretty(false);
        formatter
            .format_outcome(&JobOutcome::ok(
                "Drain",
                "HDFS",
                MetricsRecord::new().with(keys::GA, 1.0),
            ))
            .unwrap();
        formatter
            .format_outcome(&JobOutcome::failed("Spell", "HDFS", "boom"))
            .unwrap();
        formatter.finish().unwrap();

        let out = String::from_utf8(formatter.into_inner()).unwrap();
        assert_eq!(
            out,
            "[{\"method\":\"Drain\",\"dataset\":\"HDFS\",\"metrics\":{\"GA\":1.0}},\
             {\"method\":\"Spell\",\"dataset\":\"HDFS\",\"error\":\"boom\"}]\n"
        );
    }

    #[test]
    fn test_empty_array() {
        let mut formatter = JsonFormatter::new(Vec::new());
        formatter.finish().unwrap();
        let out = String::from_utf8(formatter.into_inner()).unwrap();
        assert_eq!(out.trim(), "[]");
    }
}
