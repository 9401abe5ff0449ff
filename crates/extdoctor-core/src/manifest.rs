//! Extension manifest discovery and parsing.
//!
//! The manifest is kept as an open key/value map: the diagnosis only looks at
//! a handful of keys, exposed through typed accessors, and everything else is
//! passed through untouched.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::DiagnosisConfig;
use crate::inspection::ArchiveInspector;
use crate::inspection::MANIFEST_MARKER;

/// Keys every extension manifest must define.
pub const REQUIRED_FIELDS: [&str; 3] = ["id", "version", "name"];

const KNOWN_FIELDS: [&str; 5] = [
    "id",
    "version",
    "name",
    "blender_version_min",
    "blender_version_max",
];

/// Why a manifest could not be produced.
///
/// The `Display` text is the wording used in diagnosis findings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    /// No entry named like a manifest exists.
    #[error("No {} found", MANIFEST_MARKER)]
    NotFound,

    /// The manifest entry could not be read.
    #[error("Unable to read manifest: {0}")]
    Unreadable(String),

    /// The manifest is not UTF-8 or not valid TOML.
    #[error("Manifest parse error: {0}")]
    Parse(String),

    /// This build cannot parse manifests.
    #[error("{parser} parser not available in this environment")]
    ParserUnavailable {
        /// Name of the missing parser.
        parser: &'static str,
    },
}

/// A value stored in the manifest.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestValue {
    /// String value.
    String(String),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
    /// Date/time value, kept in its textual form.
    Datetime(String),
    /// Array of values.
    Array(Vec<ManifestValue>),
    /// Nested table.
    Table(BTreeMap<String, ManifestValue>),
}

impl ManifestValue {
    /// Returns the string content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `false` for empty strings, zero, `false` and empty
    /// collections.
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::String(s) | Self::Datetime(s) => !s.is_empty(),
            Self::Integer(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Boolean(b) => *b,
            Self::Array(items) => !items.is_empty(),
            Self::Table(table) => !table.is_empty(),
        }
    }
}

impl fmt::Display for ManifestValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) | Self::Datetime(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            // Whole floats keep their fraction: 4.0 renders as "4.0".
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Table(table) => {
                f.write_str("{")?;
                for (i, (key, value)) in table.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(feature = "toml")]
impl From<toml::Value> for ManifestValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::String(s),
            toml::Value::Integer(i) => Self::Integer(i),
            toml::Value::Float(x) => Self::Float(x),
            toml::Value::Boolean(b) => Self::Boolean(b),
            toml::Value::Datetime(dt) => Self::Datetime(dt.to_string()),
            toml::Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            toml::Value::Table(table) => Self::Table(
                table
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Parsed `blender_manifest.toml`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    fields: BTreeMap<String, ManifestValue>,
}

impl Manifest {
    /// Creates a manifest from already parsed fields.
    #[must_use]
    pub fn from_fields(fields: BTreeMap<String, ManifestValue>) -> Self {
        Self { fields }
    }

    /// Parses manifest text.
    ///
    /// # Examples
    ///
    /// ```
    /// use extdoctor_core::Manifest;
    ///
    /// let manifest = Manifest::parse("id = \"demo\"\nblender_version_min = \"4.2.0\"\n").unwrap();
    /// assert_eq!(manifest.id(), Some("demo"));
    /// assert_eq!(manifest.missing_required(), vec!["version", "name"]);
    /// ```
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        parse_toml(text)
    }

    /// Returns the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ManifestValue> {
        self.fields.get(key)
    }

    /// Returns whether `key` is defined, whatever its value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Returns the `id` string.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get("id").and_then(ManifestValue::as_str)
    }

    /// Returns the `version` string.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.get("version").and_then(ManifestValue::as_str)
    }

    /// Returns the `name` string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(ManifestValue::as_str)
    }

    /// Returns `blender_version_min` when it is set to a non-empty value.
    #[must_use]
    pub fn blender_version_min(&self) -> Option<&ManifestValue> {
        self.get("blender_version_min").filter(|v| v.is_set())
    }

    /// Returns `blender_version_max` when it is set to a non-empty value.
    #[must_use]
    pub fn blender_version_max(&self) -> Option<&ManifestValue> {
        self.get("blender_version_max").filter(|v| v.is_set())
    }

    /// Returns the required keys that are not defined, in declaration order.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .filter(|key| !self.contains_key(key))
            .collect()
    }

    /// Returns the fields the diagnosis does not inspect.
    pub fn extra_fields(&self) -> impl Iterator<Item = (&str, &ManifestValue)> {
        self.fields
            .iter()
            .filter(|(key, _)| !KNOWN_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str(), value))
    }
}

#[cfg(feature = "toml")]
fn parse_toml(text: &str) -> Result<Manifest, ManifestError> {
    let table: toml::Table =
        toml::from_str(text).map_err(|e| ManifestError::Parse(e.message().to_string()))?;

    Ok(Manifest::from_fields(
        table
            .into_iter()
            .map(|(key, value)| (key, ManifestValue::from(value)))
            .collect(),
    ))
}

#[cfg(not(feature = "toml"))]
fn parse_toml(_text: &str) -> Result<Manifest, ManifestError> {
    Err(ManifestError::ParserUnavailable { parser: "toml" })
}

/// Locates, reads and parses the manifest of an opened archive.
///
/// The first entry whose path ends with `blender_manifest.toml` is used,
/// independently of where marker analysis located the manifest.
///
/// # Errors
///
/// Returns the [`ManifestError`] describing the first step that failed.
pub fn read_manifest(
    inspector: &mut ArchiveInspector,
    config: &DiagnosisConfig,
) -> Result<Manifest, ManifestError> {
    let Some(name) = inspector.find_suffix(MANIFEST_MARKER).map(str::to_string) else {
        return Err(ManifestError::NotFound);
    };
    tracing::debug!(entry = %name, "reading manifest");

    let data = inspector
        .read_entry(&name, config.max_manifest_size)
        .map_err(|e| ManifestError::Unreadable(e.to_string()))?;

    let text = String::from_utf8(data).map_err(|e| ManifestError::Parse(e.to_string()))?;
    Manifest::parse(&text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::ZipTestBuilder;
    use tempfile::TempDir;

    const FULL: &str = r#"
schema_version = "1.0.0"
id = "demo"
version = "1.2.0"
name = "Demo"
blender_version_min = "4.2.0"
tags = ["Mesh", "Modeling"]
"#;

    fn open(builder: ZipTestBuilder) -> (TempDir, ArchiveInspector) {
        let temp = TempDir::new().unwrap();
        let path = builder.write_to(temp.path(), "ext.zip");
        let inspector = ArchiveInspector::open(&path, &DiagnosisConfig::default()).unwrap();
        (temp, inspector)
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ManifestError::NotFound.to_string(),
            "No blender_manifest.toml found"
        );
        assert_eq!(
            ManifestError::ParserUnavailable { parser: "toml" }.to_string(),
            "toml parser not available in this environment"
        );
        assert!(
            ManifestError::Parse("expected `=`".into())
                .to_string()
                .starts_with("Manifest parse error: ")
        );
    }

    #[cfg(not(feature = "toml"))]
    #[test]
    fn test_parser_unavailable_without_toml() {
        let (_temp, mut inspector) =
            open(ZipTestBuilder::new().add_file("blender_manifest.toml", FULL.as_bytes()));
        let err = read_manifest(&mut inspector, &DiagnosisConfig::default()).unwrap_err();
        assert_eq!(err, ManifestError::ParserUnavailable { parser: "toml" });
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_typed_accessors() {
        let manifest = Manifest::parse(FULL).unwrap();
        assert_eq!(manifest.id(), Some("demo"));
        assert_eq!(manifest.version(), Some("1.2.0"));
        assert_eq!(manifest.name(), Some("Demo"));
        assert_eq!(
            manifest.blender_version_min().map(ToString::to_string),
            Some("4.2.0".to_string())
        );
        assert!(manifest.blender_version_max().is_none());
        assert!(manifest.missing_required().is_empty());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_extra_fields_pass_through() {
        let manifest = Manifest::parse(FULL).unwrap();
        let extra: Vec<&str> = manifest.extra_fields().map(|(k, _)| k).collect();
        assert_eq!(extra, ["schema_version", "tags"]);
        assert_eq!(
            manifest.get("tags").unwrap().to_string(),
            "[Mesh, Modeling]"
        );
    }

    #[test]
    fn test_float_display_keeps_fraction() {
        assert_eq!(ManifestValue::Float(4.0).to_string(), "4.0");
        assert_eq!(ManifestValue::Float(4.25).to_string(), "4.25");
        assert_eq!(ManifestValue::Integer(4).to_string(), "4");
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_empty_min_is_unset() {
        let manifest = Manifest::parse("blender_version_min = \"\"\n").unwrap();
        assert!(manifest.contains_key("blender_version_min"));
        assert!(manifest.blender_version_min().is_none());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_non_string_required_field_counts_as_present() {
        let manifest = Manifest::parse("id = 7\nversion = \"1\"\nname = \"n\"\n").unwrap();
        assert!(manifest.missing_required().is_empty());
        assert_eq!(manifest.id(), None);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_parse_error() {
        let err = Manifest::parse("id = \n").unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn test_read_not_found() {
        let (_temp, mut inspector) =
            open(ZipTestBuilder::new().add_file("addon/__init__.py", b""));
        let err = read_manifest(&mut inspector, &DiagnosisConfig::default()).unwrap_err();
        assert_eq!(err, ManifestError::NotFound);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_read_nested_deflated_manifest() {
        let (_temp, mut inspector) = open(
            ZipTestBuilder::new()
                .deflated()
                .add_file("pkg/blender_manifest.toml", FULL.as_bytes()),
        );
        let manifest = read_manifest(&mut inspector, &DiagnosisConfig::default()).unwrap();
        assert_eq!(manifest.name(), Some("Demo"));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_read_invalid_utf8() {
        let (_temp, mut inspector) = open(
            ZipTestBuilder::new().add_file("blender_manifest.toml", &[0xff, 0xfe, b'i', b'd']),
        );
        let err = read_manifest(&mut inspector, &DiagnosisConfig::default()).unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn test_read_oversized_manifest() {
        let (_temp, mut inspector) =
            open(ZipTestBuilder::new().add_file("blender_manifest.toml", FULL.as_bytes()));
        let config = DiagnosisConfig {
            max_manifest_size: 8,
            ..Default::default()
        };
        let err = read_manifest(&mut inspector, &config).unwrap_err();
        assert!(err.to_string().starts_with("Unable to read manifest: "));
    }
}
