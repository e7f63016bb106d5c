use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared cancellation flag. Clones observe the same flag, so another thread can
/// trip a layout that is still running.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Per-call handle for cancellation and diagnostics. Carries nothing the geometry reads.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    token: CancellationToken,
    span: tracing::Span,
}

impl LayoutContext {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            span: tracing::debug_span!("sequence_layout"),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Emits the engine's events under `span` instead of the default one.
    pub fn with_span(mut self, span: tracing::Span) -> Self {
        self.span = span;
        self
    }

    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new()
    }
}
