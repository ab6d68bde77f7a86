//! Backend languages.
//!
//! The set of code-generation targets is closed. Anything outside it is a
//! configuration defect upstream, never a value to be tolerated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Target language of a generated interface library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Native shared backend (libbinder flavour)
    Cpp,
    /// Native platform-minimal backend, with an optional app-facing variant
    Ndk,
    /// Developer analyzer tool built on top of the cpp library
    CppAnalyzer,
    /// Managed-language backend
    Java,
    /// Memory-safe systems backend
    Rust,
}

impl Backend {
    /// All backends, in the order libraries are planned.
    pub const ALL: [Backend; 5] = [
        Backend::Java,
        Backend::Cpp,
        Backend::Ndk,
        Backend::Rust,
        Backend::CppAnalyzer,
    ];

    /// The suffix used in generated module names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Cpp => "cpp",
            Backend::Ndk => "ndk",
            Backend::CppAnalyzer => "cpp-analyzer",
            Backend::Java => "java",
            Backend::Rust => "rust",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpp" => Ok(Backend::Cpp),
            "ndk" => Ok(Backend::Ndk),
            "cpp-analyzer" | "cpp_analyzer" => Ok(Backend::CppAnalyzer),
            "java" => Ok(Backend::Java),
            "rust" => Ok(Backend::Rust),
            _ => Err(ConfigError::UnsupportedBackend {
                backend: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_backends() {
        for backend in Backend::ALL {
            assert_eq!(backend.as_str().parse::<Backend>().unwrap(), backend);
        }
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = "cobol".parse::<Backend>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedBackend { .. }));
        assert!(err.to_string().contains("cobol"));
    }
}
