// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scoped acquisition and release of side-effecting resources.
//!
//! Every timer, listener, or claimed surface acquired while a sequence plays
//! is registered here; disposal releases them in reverse acquisition order,
//! and one failing release never prevents the rest from running.

/// Error from releasing a single resource
#[derive(Debug, thiserror::Error)]
#[error("failed to release '{label}': {message}")]
pub struct DisposeError {
    /// Label the resource was registered under
    pub label: String,
    /// Backend-specific failure description
    pub message: String,
}

impl DisposeError {
    /// Create a dispose error for the named resource
    pub fn new(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            message: message.into(),
        }
    }
}

type ReleaseFn = Box<dyn FnOnce() -> Result<(), DisposeError>>;

/// Registry of release actions, run once in reverse acquisition order
#[derive(Default)]
pub struct ResourceScope {
    resources: Vec<(String, ReleaseFn)>,
    released: bool,
}

impl ResourceScope {
    /// Create an empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource's release action.
    ///
    /// Registration after release is a logged mistake; the action runs
    /// immediately so the resource still cannot leak.
    pub fn register(
        &mut self,
        label: impl Into<String>,
        release: impl FnOnce() -> Result<(), DisposeError> + 'static,
    ) {
        let label = label.into();
        if self.released {
            tracing::warn!(resource = %label, "registered after release, releasing now");
            if let Err(e) = release() {
                tracing::warn!("late release failed: {e}");
            }
            return;
        }
        self.resources.push((label, Box::new(release)));
    }

    /// Release everything in reverse acquisition order.
    ///
    /// Failures are isolated: each release runs regardless of earlier
    /// errors, and all failures are aggregated, logged, and returned.
    /// Calling this more than once is a no-op.
    pub fn release_all(&mut self) -> Vec<DisposeError> {
        if self.released {
            return Vec::new();
        }
        self.released = true;

        let mut failures = Vec::new();
        for (label, release) in self.resources.drain(..).rev() {
            if let Err(e) = release() {
                tracing::warn!(resource = %label, "release failed: {e}");
                failures.push(e);
            }
        }
        if !failures.is_empty() {
            tracing::warn!(count = failures.len(), "resource releases failed");
        }
        failures
    }

    /// Number of registered, not-yet-released resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check whether the scope is empty
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
