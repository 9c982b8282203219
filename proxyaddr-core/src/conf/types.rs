use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Contents of a policy file.
///
/// ```hcl
/// trust = ["loopback", "10.0.0.0/8"]
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySpec {
    #[serde(skip)]
    pub origin: Origin,

    /// A single token or a list of tokens. Kept untyped so that other
    /// shapes are reported as unsupported rather than as parse errors.
    pub trust: Option<hcl::Value>,
}

/// Where a policy entry came from, for reporting.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    pub(crate) file: PathBuf,
    pub(crate) section: String,
    pub(crate) index: Option<usize>,
}

impl Origin {
    pub fn new(file: &Path, section: &str, index: Option<usize>) -> Self {
        Self {
            file: file.to_path_buf(),
            section: section.to_owned(),
            index,
        }
    }

    pub fn with_index(&self, index: usize) -> Self {
        Self {
            index: Some(index),
            ..self.clone()
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    #[cfg(test)]
    pub(crate) fn test(section: &str) -> Self {
        Self::new(Path::new("/test/policy.hcl"), section, None)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}: {}[{}]", self.file.display(), self.section, i),
            None => write!(f, "{}: {}", self.file.display(), self.section),
        }
    }
}
