use std::error::Error;
use std::fmt;

use crate::envelope::BoxError;

/// Errors that fan out into several independent causes
///
/// Register implementors with
/// [`StatusResolverBuilder::multi_cause`](crate::StatusResolverBuilder::multi_cause)
/// so the resolver can walk into each branch.
pub trait MultiCause: Error {
    /// Causes in order
    fn causes(&self) -> Vec<&(dyn Error + 'static)>;
}

/// Several independent errors combined into one
///
/// Displays each cause on its own line. `source()` is `None`: the causes
/// are only reachable through [`MultiCause`].
#[derive(Debug)]
pub struct JoinedError {
    errors: Vec<BoxError>,
}

impl JoinedError {
    /// Add another cause at the end
    pub fn push(&mut self, err: impl Into<BoxError>) {
        self.errors.push(err.into());
    }

    /// Number of joined causes
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether there are no joined causes; false for any value from [`join`]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over the joined causes
    pub fn errors(&self) -> impl Iterator<Item = &(dyn Error + Send + Sync + 'static)> {
        self.errors.iter().map(|e| &**e)
    }
}

/// Combine errors into a [`JoinedError`]
///
/// Returns `None` when `errors` is empty.
pub fn join<I, E>(errors: I) -> Option<JoinedError>
where
    I: IntoIterator<Item = E>,
    E: Into<BoxError>,
{
    let errors: Vec<BoxError> = errors.into_iter().map(Into::into).collect();
    (!errors.is_empty()).then_some(JoinedError { errors })
}

impl fmt::Display for JoinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl Error for JoinedError {}

impl MultiCause for JoinedError {
    fn causes(&self) -> Vec<&(dyn Error + 'static)> {
        self.errors.iter().map(|e| &**e as &(dyn Error + 'static)).collect()
    }
}
