//! Positional column layout of the registry.

use serde::Deserialize;

/// Maps each semantic registry field to its zero-based column index.
///
/// Built once at startup (defaults, optionally overridden by `[columns]` in
/// svcgen.toml) and shared by reference between the reader and the
/// normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnSchema {
    /// Non-empty means the service is excluded from the provider entirely
    pub exclude: usize,
    /// Non-empty means no client is generated for the service
    pub skip_generate: usize,
    /// Package name used when the version selector is the sentinel (variant A)
    pub package_v1: usize,
    /// Package name used for every other version selector (variant B)
    pub package_v2: usize,
    /// Display name, also the sort key
    pub display_name: usize,
    /// Version selector
    pub sdk_version: usize,
    /// Package name the provider currently uses
    pub provider_package_actual: usize,
    /// Package name the provider should use
    pub provider_package_correct: usize,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            package_v1: 2,
            package_v2: 3,
            provider_package_actual: 4,
            provider_package_correct: 5,
            display_name: 8,
            skip_generate: 10,
            sdk_version: 11,
            exclude: 19,
        }
    }
}

impl ColumnSchema {
    /// All columns with their semantic names, in declaration order.
    pub fn columns(&self) -> [(&'static str, usize); 8] {
        [
            ("exclude", self.exclude),
            ("skip_generate", self.skip_generate),
            ("package_v1", self.package_v1),
            ("package_v2", self.package_v2),
            ("display_name", self.display_name),
            ("sdk_version", self.sdk_version),
            ("provider_package_actual", self.provider_package_actual),
            ("provider_package_correct", self.provider_package_correct),
        ]
    }

    /// Minimum number of fields a row needs for every column to resolve.
    pub fn required_fields(&self) -> usize {
        self.columns()
            .iter()
            .map(|(_, index)| index + 1)
            .max()
            .unwrap_or(0)
    }

    /// Find two semantic names that share the same index.
    pub fn find_overlap(&self) -> Option<(&'static str, &'static str, usize)> {
        let columns = self.columns();
        columns.iter().enumerate().find_map(|(i, (name, index))| {
            columns[i + 1..]
                .iter()
                .find(|(_, other)| other == index)
                .map(|(other_name, _)| (*name, *other_name, *index))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_required_fields() {
        assert_eq!(ColumnSchema::default().required_fields(), 20);
    }

    #[test]
    fn test_default_has_no_overlap() {
        assert_eq!(ColumnSchema::default().find_overlap(), None);
    }

    #[test]
    fn test_find_overlap() {
        let schema = ColumnSchema {
            display_name: 3,
            ..ColumnSchema::default()
        };
        assert_eq!(
            schema.find_overlap(),
            Some(("package_v2", "display_name", 3))
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let schema: ColumnSchema = toml::from_str("exclude = 0\nskip_generate = 1").unwrap();
        assert_eq!(schema.exclude, 0);
        assert_eq!(schema.skip_generate, 1);
        assert_eq!(schema.display_name, ColumnSchema::default().display_name);
    }

    #[test]
    fn test_deserialize_rejects_unknown() {
        assert!(toml::from_str::<ColumnSchema>("bogus = 1").is_err());
    }
}
