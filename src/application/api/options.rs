//! Api options

/// Options for the api command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApiOptions {
    /// Compare the generated manifest with the lockfile
    pub test: bool,
    /// Overwrite the lockfile with the generated manifest
    pub update: bool,
}

impl ApiOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_test(mut self, test: bool) -> Self {
        self.test = test;
        self
    }

    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }
}
