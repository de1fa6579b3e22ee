//! A long-lived analysis context that keeps the last good result.
//!
//! A [`Session`] publishes one [`Analysis`] at a time. A failed run, including
//! a panic somewhere in the pipeline, is logged and reported to the caller
//! while the previously published analysis stays in place.

use std::panic::{self, AssertUnwindSafe};

use log::{error, info};

use crate::{Analysis, Analyzer, SchemaGraphError};

/// Owns an [`Analyzer`] and the last successful [`Analysis`].
#[derive(Debug, Default)]
pub struct Session {
    analyzer: Analyzer,
    current: Option<Analysis>,
}

impl Session {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            current: None,
        }
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// The last successfully published analysis, if any.
    pub fn current(&self) -> Option<&Analysis> {
        self.current.as_ref()
    }

    /// Analyze `source` and publish the result.
    ///
    /// # Errors
    ///
    /// Returns the pipeline's error, or [`SchemaGraphError::Pipeline`] if it
    /// panicked. The previous analysis remains published in both cases.
    pub fn analyze(&mut self, source: &str) -> Result<&Analysis, SchemaGraphError> {
        self.run(|analyzer| analyzer.analyze(source))
    }

    fn run<F>(&mut self, pipeline: F) -> Result<&Analysis, SchemaGraphError>
    where
        F: FnOnce(&Analyzer) -> Result<Analysis, SchemaGraphError>,
    {
        let analyzer = &self.analyzer;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| pipeline(analyzer)))
            .unwrap_or_else(|payload| Err(SchemaGraphError::Pipeline(panic_message(&*payload))));

        match outcome {
            Ok(analysis) => {
                info!(schemas = analysis.graph().schemas().len(); "Published analysis");
                Ok(self.current.insert(analysis))
            }
            Err(err) => {
                error!(kept_previous = self.current.is_some(); "Analysis failed: {err}");
                Err(err)
            }
        }
    }

    /// Drop the published analysis.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
