use serde::Serialize;

/// A registry row accepted for generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub display_name: String,
    pub sdk_version: String,
    /// Package for the selected SDK version; may be empty.
    pub package_name: String,
}

impl Record {
    pub fn new(
        display_name: impl Into<String>,
        sdk_version: impl Into<String>,
        package_name: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            sdk_version: sdk_version.into(),
            package_name: package_name.into(),
        }
    }
}
