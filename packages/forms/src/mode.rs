//! Operating mode of an authentication form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether a form signs an existing user in or creates a new account.
///
/// Chosen once when the form is built; the schema, the field set and the
/// payload shape all follow from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperatingMode {
    SignIn,
    SignUp,
}

impl OperatingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingMode::SignIn => "sign-in",
            OperatingMode::SignUp => "sign-up",
        }
    }

    /// Route path of the page hosting a form in this mode.
    pub fn path(&self) -> &'static str {
        match self {
            OperatingMode::SignIn => "/sign-in",
            OperatingMode::SignUp => "/sign-up",
        }
    }

    /// The mode the footer link switches to.
    pub fn other(&self) -> Self {
        match self {
            OperatingMode::SignIn => OperatingMode::SignUp,
            OperatingMode::SignUp => OperatingMode::SignIn,
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form mode: {0}")]
pub struct UnknownMode(pub String);

impl FromStr for OperatingMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sign-in" => Ok(OperatingMode::SignIn),
            "sign-up" => Ok(OperatingMode::SignUp),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("sign-in".parse::<OperatingMode>(), Ok(OperatingMode::SignIn));
        assert_eq!("sign-up".parse::<OperatingMode>(), Ok(OperatingMode::SignUp));
        assert_eq!(
            "login".parse::<OperatingMode>(),
            Err(UnknownMode("login".to_string()))
        );
        assert_eq!(OperatingMode::SignUp.to_string(), "sign-up");
    }

    #[test]
    fn test_other_mode_links_back() {
        assert_eq!(OperatingMode::SignIn.other().path(), "/sign-up");
        assert_eq!(OperatingMode::SignUp.other().path(), "/sign-in");
    }
}
