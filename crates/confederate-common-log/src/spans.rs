//! Span helpers for confederacy generation.

use tracing::{info_span, Span};

/// Create a span covering one confederacy creation run.
pub fn confederacy_span(source: &str) -> Span {
    info_span!(
        "confederacy",
        source = %source,
        error = tracing::field::Empty
    )
}

/// Create a span for a single project's generation.
pub fn project_span(project_id: &str) -> Span {
    info_span!("project", id = %project_id, error = tracing::field::Empty)
}

/// Create a span for a single constituent.
pub fn constituent_span(kind: &str, target: &str) -> Span {
    info_span!(
        "constituent",
        kind = %kind,
        target = %target,
        error = tracing::field::Empty
    )
}

/// Record an error on the current span.
///
/// Only spans created by this module declare the `error` field.
pub fn record_error(error: &dyn std::error::Error) {
    Span::current().record("error", tracing::field::display(error));
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Complete the timer and record duration.
    pub fn finish(self) {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %duration.as_millis(),
            "operation completed"
        );
    }
}

/// Macro for timing a block of code.
#[macro_export]
macro_rules! timed {
    ($name:expr, $body:expr) => {{
        let _timer = $crate::spans::Timer::start($name);
        let result = $body;
        _timer.finish();
        result
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::EnvFilter;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn with_subscriber<F>(f: F) -> String
    where
        F: FnOnce(),
    {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_env_filter(EnvFilter::new("trace"))
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        captured.contents()
    }

    #[test]
    fn test_span_nesting() {
        let output = with_subscriber(|| {
            let confederacy = confederacy_span("spec.xml");
            let _outer = confederacy.enter();

            let project = project_span("demo");
            let _inner = project.enter();

            let constituent = constituent_span("template", "README.md");
            let _leaf = constituent.enter();

            assert_eq!(
                Span::current().metadata().map(|m| m.name()),
                Some("constituent")
            );
            tracing::info!("nested operation");
        });

        assert!(output.contains("confederacy{source=spec.xml}"));
        assert!(output.contains("project{id=demo}"));
        assert!(output.contains("constituent{kind=template target=README.md}"));
        assert!(output.contains("nested operation"));
    }

    #[test]
    fn test_spans_declare_error_field() {
        with_subscriber(|| {
            assert!(confederacy_span("spec.xml").field("error").is_some());
            assert!(project_span("demo").field("error").is_some());
            assert!(constituent_span("template", "README.md")
                .field("error")
                .is_some());
        });
    }

    #[test]
    fn test_record_error_on_current_span() {
        let output = with_subscriber(|| {
            let span = project_span("broken");
            let _guard = span.enter();

            let error = std::io::Error::new(std::io::ErrorKind::NotFound, "template missing");
            record_error(&error);
            tracing::info!("after failure");
        });

        assert!(
            output.contains("project{id=broken error=template missing}"),
            "output was: {output}"
        );
    }

    #[test]
    fn test_timed_macro_returns_body_value() {
        with_subscriber(|| {
            let result = timed!("macro_test", { 40 + 2 });
            assert_eq!(result, 42);
        });
    }
}
