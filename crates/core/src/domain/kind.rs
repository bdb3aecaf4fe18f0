// Environment kind marker

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which constructor produced an Environment
///
/// Stored in the variable table under `KIND_VARIABLE`. The null environment
/// carries no marker at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentKind {
    Cli,
    Testing,
}

impl EnvironmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentKind::Cli => "cli",
            EnvironmentKind::Testing => "testing",
        }
    }

    /// Parse a marker value; unknown values yield None
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cli" => Some(EnvironmentKind::Cli),
            "testing" => Some(EnvironmentKind::Testing),
            _ => None,
        }
    }
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!(EnvironmentKind::parse("cli"), Some(EnvironmentKind::Cli));
        assert_eq!(
            EnvironmentKind::parse("testing"),
            Some(EnvironmentKind::Testing)
        );
        assert_eq!(EnvironmentKind::parse("CLI"), None);
    }

    #[test]
    fn test_serde_uses_marker_values() {
        let json = serde_json::to_string(&EnvironmentKind::Testing).unwrap();
        assert_eq!(json, "\"testing\"");
    }
}
