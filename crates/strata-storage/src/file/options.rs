//! File open options.

use std::fs;

/// Options for opening data files.
///
/// A thin builder over `std::fs::OpenOptions` with presets for the open
/// modes the storage layer actually uses.
///
/// # Example
///
/// ```rust
/// use strata_storage::file::OpenOptions;
///
/// let options = OpenOptions::new().read(true).write(true).create(true);
/// assert!(options.is_write());
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    pub(crate) read: bool,
    pub(crate) write: bool,
    pub(crate) create: bool,
    pub(crate) create_new: bool,
    pub(crate) truncate: bool,
}

impl OpenOptions {
    /// Creates a new set of options with everything disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the option for read access.
    #[must_use]
    pub fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    /// Sets the option for write access.
    #[must_use]
    pub fn write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    /// Sets the option to create the file if it doesn't exist.
    #[must_use]
    pub fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Sets the option to create the file, failing if it already exists.
    #[must_use]
    pub fn create_new(mut self, create_new: bool) -> Self {
        self.create_new = create_new;
        self
    }

    /// Sets the option to truncate an existing file on open.
    #[must_use]
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Returns true if read access is enabled.
    #[inline]
    pub fn is_read(&self) -> bool {
        self.read
    }

    /// Returns true if write access is enabled.
    #[inline]
    pub fn is_write(&self) -> bool {
        self.write
    }

    /// Converts to `std::fs::OpenOptions`.
    pub fn to_std_options(&self) -> fs::OpenOptions {
        let mut opts = fs::OpenOptions::new();
        opts.read(self.read)
            .write(self.write)
            .create(self.create)
            .create_new(self.create_new)
            .truncate(self.truncate);
        opts
    }

    /// Preset for read-only access.
    #[must_use]
    pub fn for_read() -> Self {
        Self::new().read(true)
    }

    /// Preset for read/write access to an existing file.
    #[must_use]
    pub fn for_write() -> Self {
        Self::new().read(true).write(true)
    }

    /// Preset for database files: read/write, create-if-missing, never
    /// truncate.
    #[must_use]
    pub fn for_database() -> Self {
        Self::new().read(true).write(true).create(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = OpenOptions::new();
        assert!(!opts.is_read());
        assert!(!opts.is_write());
        assert!(!opts.create);
    }

    #[test]
    fn test_builder() {
        let opts = OpenOptions::new().read(true).write(true).create_new(true);
        assert!(opts.is_read());
        assert!(opts.is_write());
        assert!(opts.create_new);
    }

    #[test]
    fn test_for_database_never_truncates() {
        let opts = OpenOptions::for_database();
        assert!(opts.is_read());
        assert!(opts.is_write());
        assert!(opts.create);
        assert!(!opts.truncate);
        assert!(!opts.create_new);
    }
}
