#[cfg(feature = "serde")]
use std::fs::read_to_string;
#[cfg(feature = "serde")]
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use thiserror::Error;

/// Number of region tags a store reserves room for on first insertion.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

///
/// Tuning knobs for a [`RegionTagSet`](crate::RegionTagSet).
///
/// With the `serde` feature the options can be read from TOML:
///
/// ```toml
/// initial_capacity = 4
/// ```
///
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StoreOptions {
    pub initial_capacity: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Error, Debug)]
pub enum StoreOptionsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

#[cfg(feature = "serde")]
pub type StoreOptionsResult<T> = std::result::Result<T, StoreOptionsError>;

#[cfg(feature = "serde")]
impl StoreOptions {
    pub fn from_toml_str(value: &str) -> StoreOptionsResult<Self> {
        Ok(toml::from_str(value)?)
    }

    ///
    /// Read store options from a TOML file.
    /// # Arguments
    /// * `path` - path to the TOML file
    ///
    pub fn from_path(path: &Path) -> StoreOptionsResult<Self> {
        let contents = read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_default_capacity() {
        assert_eq!(StoreOptions::default().initial_capacity, 16);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case("initial_capacity = 4", 4)]
    #[case("", DEFAULT_INITIAL_CAPACITY)]
    fn test_from_toml_str(#[case] value: &str, #[case] expected: usize) {
        let options = StoreOptions::from_toml_str(value).unwrap();
        assert_eq!(options.initial_capacity, expected);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn test_from_toml_str_rejects_bad_type() {
        let result = StoreOptions::from_toml_str("initial_capacity = \"many\"");
        assert!(matches!(result, Err(StoreOptionsError::Toml(_))));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn test_from_path() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "initial_capacity = 2").unwrap();
        let options = StoreOptions::from_path(file.path()).unwrap();
        assert_eq!(options, StoreOptions { initial_capacity: 2 });
        assert!(matches!(
            StoreOptions::from_path(Path::new("does/not/exist.toml")),
            Err(StoreOptionsError::Io(_))
        ));
    }
}
