use std::fmt;
use std::sync::Arc;

use crate::error::GenerateError;
use crate::ids::IdAllocator;

/// A string transformation supplied by a language profile.
pub type FormatFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Formatting functions a language profile may provide. Unset entries fall back to
/// the defaults in [`FormatOverrides::resolve`].
#[derive(Clone, Default)]
pub struct FormatOverrides {
    pub uri: Option<FormatFn>,
    pub variable: Option<FormatFn>,
    /// Replaces the run's [`IdAllocator`], which is then never consulted or reset.
    /// Such a generator is responsible for its own per-run uniqueness and
    /// reproducibility.
    pub unique_id: Option<FormatFn>,
}

impl FormatOverrides {
    pub fn with_uri(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.uri = Some(Arc::new(f));
        self
    }

    pub fn with_variable(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.variable = Some(Arc::new(f));
        self
    }

    pub fn with_unique_id(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.unique_id = Some(Arc::new(f));
        self
    }

    /// Overlay the overrides onto the default strategy.
    ///
    /// `uri` defaults to the identity function and `unique_id` to the run's
    /// [`IdAllocator`]. There is no sensible default for `variable`: a profile that
    /// cannot name identifiers cannot generate code, so its absence is an error.
    pub fn resolve(&self) -> Result<FormatStrategy, GenerateError> {
        let variable = self.variable.clone().ok_or_else(|| {
            GenerateError::Configuration(
                "language profile must supply a `variable` format function".to_string(),
            )
        })?;

        Ok(FormatStrategy {
            uri: self
                .uri
                .clone()
                .unwrap_or_else(|| Arc::new(identity) as FormatFn),
            variable,
            unique_id: self.unique_id.clone(),
        })
    }
}

impl fmt::Debug for FormatOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatOverrides")
            .field("uri", &self.uri.is_some())
            .field("variable", &self.variable.is_some())
            .field("unique_id", &self.unique_id.is_some())
            .finish()
    }
}

fn identity(value: &str) -> String {
    value.to_string()
}

/// The resolved formatting functions shared by every component of one run.
#[derive(Clone)]
pub struct FormatStrategy {
    uri: FormatFn,
    variable: FormatFn,
    unique_id: Option<FormatFn>,
}

impl FormatStrategy {
    pub fn uri(&self, uri: &str) -> String {
        (self.uri)(uri)
    }

    pub fn variable(&self, name: &str) -> String {
        (self.variable)(name)
    }

    /// Next identifier in `prefix`'s category, from the profile's generator when it
    /// has one, otherwise from `ids`.
    pub fn unique_id(&self, ids: &mut IdAllocator, prefix: &str) -> String {
        match &self.unique_id {
            Some(f) => f(prefix),
            None => ids.next(prefix),
        }
    }
}

impl fmt::Debug for FormatStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatStrategy")
            .field("unique_id", &self.unique_id.is_some())
            .finish_non_exhaustive()
    }
}
