use std::fmt;

const REDACTED: &str = "****";

/// A wrapper that keeps credentials out of logs.
///
/// Both `Debug` and `Display` render as `****`, so a `Secret` can sit inside a config struct that derives `Debug`
/// without leaking. Reading the inner value takes an explicit [`reveal`](Secret::reveal) call at the point of use.
#[derive(Clone, Default)]
pub struct Secret<T: Clone + Default>(T);

impl<T: Clone + Default> Secret<T> {
    pub fn new(value: T) -> Self {
        Secret(value)
    }

    pub fn reveal(&self) -> &T {
        &self.0
    }

    /// Unwrap the secret, consuming the redaction guard.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Clone + Default> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Secret(value)
    }
}

impl<T: Clone + Default> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Clone + Default> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
