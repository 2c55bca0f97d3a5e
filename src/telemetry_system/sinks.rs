//! Consumers of trajectory samples.

use std::io::Write;

use crate::errors::SimulationResult;
use crate::utils::vector2d::Vector2D;

/// Receives curves as they are drawn: one `begin_curve`, any number of samples, one `finish_curve`.
pub trait TrajectorySink {
    fn begin_curve(&mut self, label: &str) -> SimulationResult<()>;

    fn push_sample(&mut self, sample: Vector2D) -> SimulationResult<()>;

    fn finish_curve(&mut self) -> SimulationResult<()>;

    /// Drops every curve received so far.
    fn clear(&mut self) -> SimulationResult<()>;

    fn name(&self) -> &str;
}

/// Writes `label,x,y` rows.
pub struct CsvSink<W: Write> {
    writer: W,
    label: String,
    wrote_header: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        CsvSink {
            writer,
            label: String::new(),
            wrote_header: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TrajectorySink for CsvSink<W> {
    fn begin_curve(&mut self, label: &str) -> SimulationResult<()> {
        if !self.wrote_header {
            writeln!(self.writer, "label,x,y")?;
            self.wrote_header = true;
        }
        self.label = label.to_string();
        Ok(())
    }

    fn push_sample(&mut self, sample: Vector2D) -> SimulationResult<()> {
        writeln!(self.writer, "{},{:.6},{:.6}", self.label, sample.x, sample.y)?;
        Ok(())
    }

    fn finish_curve(&mut self) -> SimulationResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    // Rows already written stay written.
    fn clear(&mut self) -> SimulationResult<()> {
        self.label.clear();
        Ok(())
    }

    fn name(&self) -> &str {
        "csv_sink"
    }
}

/// A sink that logs samples using the `tracing` crate.
#[derive(Debug, Default)]
pub struct TracingSink {
    label: String,
    samples: usize,
}

impl TracingSink {
    pub fn new() -> Self {
        TracingSink::default()
    }
}

impl TrajectorySink for TracingSink {
    fn begin_curve(&mut self, label: &str) -> SimulationResult<()> {
        self.label = label.to_string();
        self.samples = 0;
        tracing::info!(label, "curve started");
        Ok(())
    }

    fn push_sample(&mut self, sample: Vector2D) -> SimulationResult<()> {
        self.samples += 1;
        tracing::debug!(label = %self.label, x = sample.x, y = sample.y, "sample");
        Ok(())
    }

    fn finish_curve(&mut self) -> SimulationResult<()> {
        tracing::info!(label = %self.label, samples = self.samples, "curve finished");
        Ok(())
    }

    fn clear(&mut self) -> SimulationResult<()> {
        tracing::info!("plot cleared");
        Ok(())
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
