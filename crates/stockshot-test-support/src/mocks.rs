//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use stockshot_core::domain::{ImageInfo, ImageReport};
use stockshot_core::error::AnalysisError;
use stockshot_core::ports::{ImageSource, ProgressEvent, ProgressSink, ResultOutput};

/// Mock implementation of `ImageSource` for testing.
///
/// Yields pre-built images, then any queued load failures, and tracks
/// iteration for assertions.
pub struct MockImageSource {
    images: Vec<ImageInfo>,
    failures: Vec<AnalysisError>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockImageSource {
    /// Creates a new mock source with the given images.
    #[must_use]
    pub fn new(images: Vec<ImageInfo>) -> Self {
        Self {
            images,
            failures: Vec::new(),
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queues a load failure yielded after the images.
    #[must_use]
    pub fn with_failure(mut self, error: AnalysisError) -> Self {
        self.failures.push(error);
        self
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<ImageInfo>> + Send + '_> {
        let count = Arc::clone(&self.iteration_count);
        if let Ok(mut c) = count.lock() {
            *c += 1;
        }
        let failures = self
            .failures
            .iter()
            .cloned()
            .map(|e| Err(anyhow::Error::from(e)));
        Box::new(self.images.iter().cloned().map(Ok).chain(failures))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.images.len() + self.failures.len())
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockResultOutput {
    reports: Arc<Mutex<Vec<ImageReport>>>,
    batch_count: Arc<Mutex<usize>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            batch_count: Arc::new(Mutex::new(0)),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<ImageReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `write_batch()` was called.
    #[must_use]
    pub fn batch_count(&self) -> usize {
        *self
            .batch_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, report: &ImageReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn write_batch(&self, reports: &[ImageReport]) -> anyhow::Result<()> {
        if let Ok(mut c) = self.batch_count.lock() {
            *c += 1;
        }
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(reports);
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Started { .. }))
            .count()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns whether a `Finished` event was received.
    #[must_use]
    pub fn has_finished(&self) -> bool {
        self.events()
            .iter()
            .any(|e| matches!(e, ProgressEvent::Finished { .. }))
    }

    /// Returns the number of completed images that were rejected.
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| {
                matches!(e, ProgressEvent::Completed { report } if !report.analysis.is_good)
            })
            .count()
    }

    /// Returns `(processed, skipped, rejected)` from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished {
                processed,
                skipped,
                rejected,
            } => Some((*processed, *skipped, *rejected)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::SyntheticImageBuilder;
    use stockshot_core::domain::ImageDimensions;
    use stockshot_core::Analyzer;

    fn report(path: &str, is_good: bool) -> ImageReport {
        let buffer = SyntheticImageBuilder::checkerboard(16, 16);
        let mut analysis = Analyzer::default().analyze(&buffer);
        analysis.is_good = is_good;
        ImageReport {
            path: path.into(),
            timestamp: "2024-01-01T00:00:00Z".into(),
            dimensions: ImageDimensions::new(16, 16),
            analysis,
            exif: None,
        }
    }

    #[test]
    fn test_mock_image_source_empty() {
        let source = MockImageSource::empty();
        assert_eq!(source.count_hint(), Some(0));
        assert_eq!(source.images().count(), 0);
        assert_eq!(source.iteration_count(), 1);
    }

    #[test]
    fn test_mock_image_source_with_images() {
        let info = SyntheticImageBuilder::info("a", SyntheticImageBuilder::uniform_gray(8, 8, 90));
        let source = MockImageSource::new(vec![info]);

        assert_eq!(source.count_hint(), Some(1));
        assert_eq!(source.images().count(), 1);
    }

    #[test]
    fn test_mock_image_source_failures_follow_images() {
        let info = SyntheticImageBuilder::info("a", SyntheticImageBuilder::uniform_gray(8, 8, 90));
        let source = MockImageSource::new(vec![info]).with_failure(AnalysisError::ZeroDimensions {
            width: 0,
            height: 0,
        });

        let results: Vec<_> = source.images().collect();
        assert_eq!(source.count_hint(), Some(2));
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        assert!(err.downcast_ref::<AnalysisError>().is_some());
    }

    #[test]
    fn test_mock_result_output() {
        let output = MockResultOutput::new();

        output.write(&report("test.jpg", true)).unwrap();
        output.flush().unwrap();

        assert_eq!(output.reports().len(), 1);
        assert_eq!(output.reports()[0].path, "test.jpg");
        assert_eq!(output.flush_count(), 1);

        output.write_batch(&[report("b.jpg", false)]).unwrap();
        assert_eq!(output.batch_count(), 1);
        assert_eq!(output.reports().len(), 2);
    }

    #[test]
    fn test_mock_progress_sink() {
        let sink = MockProgressSink::new();

        sink.on_event(ProgressEvent::Started {
            path: "test.jpg".into(),
            index: 0,
            total: Some(2),
        });
        sink.on_event(ProgressEvent::Completed {
            report: report("test.jpg", false),
        });
        sink.on_event(ProgressEvent::Skipped {
            path: "broken.png".into(),
            reason: "decode error".into(),
        });
        sink.on_event(ProgressEvent::Finished {
            processed: 1,
            skipped: 1,
            rejected: 1,
        });

        assert_eq!(sink.started_count(), 1);
        assert_eq!(sink.completed_count(), 1);
        assert_eq!(sink.skipped_count(), 1);
        assert_eq!(sink.rejected_count(), 1);
        assert!(sink.has_finished());
        assert_eq!(sink.finished_counts(), Some((1, 1, 1)));
    }
}
