//! JSON output adapter.

use anyhow::Result;
use stockshot_core::{ImageReport, ResultOutput};
use std::io::{self, Write};
use std::sync::Mutex;

/// JSON output adapter.
///
/// Single reports are written as JSON Lines; batches as one JSON array,
/// indented when `pretty` is set.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    pretty: bool,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout(pretty: bool) -> Self {
        Self::new(Box::new(io::stdout()), pretty)
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            pretty,
        }
    }
}

impl ResultOutput for JsonOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, report: &ImageReport) -> Result<()> {
        let json = serde_json::to_string(report)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn write_batch(&self, reports: &[ImageReport]) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(reports)?
        } else {
            serde_json::to_string(reports)?
        };
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use stockshot_core::{Analyzer, ImageDimensions, PixelBuffer};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn report(path: &str) -> ImageReport {
        let buffer = PixelBuffer::from_fn(8, 8, |x, _| [(x * 30) as u8, 90, 120, 255]).unwrap();
        ImageReport {
            path: path.into(),
            timestamp: "2024-01-01T00:00:00Z".into(),
            dimensions: ImageDimensions::new(8, 8),
            analysis: Analyzer::default().analyze(&buffer),
            exif: None,
        }
    }

    #[test]
    fn test_jsonl_one_line_per_report() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()), false);
        output.write(&report("a.png")).unwrap();
        output.write(&report("b.png")).unwrap();
        output.flush().unwrap();

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["path"], "a.png");
        assert!(first["is_good"].is_boolean());
        assert!(first["metrics"]["composition"]["overall"].is_number());
        assert!(first.get("exif").is_none());
    }

    #[test]
    fn test_json_array() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()), true);
        output
            .write_batch(&[report("a.png"), report("b.png")])
            .unwrap();

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_json_array_compact() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()), false);
        output.write_batch(&[]).unwrap();

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text, "[]\n");
    }
}
