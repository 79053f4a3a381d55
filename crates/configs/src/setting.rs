use {
    crate::{Error, Result},
    serde::{Deserialize, Deserializer},
    std::fmt::{self, Debug, Display, Formatter},
};

/// A configuration string that is either written out literally or taken from
/// an environment variable.
///
/// Settings usually hold secrets (private keys, RPC urls with API keys) so
/// neither `Debug` nor `Display` print the value.
#[derive(Clone, PartialEq, Eq)]
pub enum Setting {
    Value(String),
    /// The environment variable the value should come from is not set.
    Unset { variable: String },
}

impl Setting {
    /// Reads `variable` through `lookup`. Empty values count as unset.
    pub fn from_variable(variable: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(variable).filter(|value| !value.is_empty()) {
            Some(value) => Self::Value(value),
            None => {
                tracing::debug!(%variable, "environment variable not set");
                Self::Unset {
                    variable: variable.to_string(),
                }
            }
        }
    }

    /// Interprets `%VAR` as a reference to the environment variable `VAR` and
    /// anything else as a literal value.
    pub fn parse(raw: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        match raw.strip_prefix('%') {
            Some(variable) => Self::from_variable(variable, lookup),
            None => Self::Value(raw.to_string()),
        }
    }

    /// Returns the value, or an error naming the missing variable on behalf
    /// of `network`.
    pub fn require(&self, network: &str) -> Result<&str> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Unset { variable } => Err(Error::MissingVariable {
                network: network.to_string(),
                variable: variable.clone(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Setting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw, |variable| std::env::var(variable).ok()))
    }
}

impl Debug for Setting {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(_) => f.write_str("Value(SECRET)"),
            Self::Unset { variable } => write!(f, "Unset({variable})"),
        }
    }
}

impl Display for Setting {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(_) => f.write_str("SECRET"),
            Self::Unset { variable } => write!(f, "unset (${variable})"),
        }
    }
}
