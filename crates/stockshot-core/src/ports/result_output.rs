//! Result output port for writing analysis reports.

use crate::domain::ImageReport;

/// Port for outputting per-image reports.
pub trait ResultOutput: Send + Sync {
    /// Writes a single report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, report: &ImageReport) -> anyhow::Result<()>;

    /// Writes a whole batch at once. Defaults to one `write` per report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_batch(&self, reports: &[ImageReport]) -> anyhow::Result<()> {
        reports.iter().try_for_each(|report| self.write(report))
    }

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
