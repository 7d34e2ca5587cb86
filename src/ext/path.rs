use std::path::Path;

/// Extension trait for Path to provide convenient string conversion methods
pub trait PathExt {
    /// Returns the final component of the path as an owned string, if there is one.
    ///
    /// Non-UTF-8 names are converted lossily.
    ///
    /// # Examples
    /// ```
    /// use kiln::ext::PathExt;
    /// use std::path::Path;
    ///
    /// assert_eq!(Path::new("/work/my-api").base_name().as_deref(), Some("my-api"));
    /// assert_eq!(Path::new("/").base_name(), None);
    /// ```
    fn base_name(&self) -> Option<String>;
}

impl PathExt for Path {
    fn base_name(&self) -> Option<String> {
        self.file_name().map(|name| name.to_string_lossy().into_owned())
    }
}
