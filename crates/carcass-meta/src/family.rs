//! Supported server software families

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Software run by a backend server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendFamily {
    /// PaperMC server. Needs a `config/` directory for `paper-global.yml`.
    #[default]
    Paper,
}

impl BackendFamily {
    /// Project identifier on the artifact metadata service.
    pub fn project(&self) -> &'static str {
        match self {
            BackendFamily::Paper => "paper",
        }
    }

    /// File name the artifact is stored under inside the server directory.
    pub fn jar_name(&self) -> &'static str {
        match self {
            BackendFamily::Paper => "paper.jar",
        }
    }

    /// Subdirectories created before anything else is written.
    pub fn subdirectories(&self) -> &'static [&'static str] {
        match self {
            BackendFamily::Paper => &["config", "plugins"],
        }
    }
}

impl FromStr for BackendFamily {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paper" => Ok(BackendFamily::Paper),
            _ => Err(Error::UnknownFamily {
                role: "backend",
                family: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BackendFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.project())
    }
}

/// Software run by the proxy server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyFamily {
    /// Waterfall, the PaperMC BungeeCord fork.
    #[default]
    Waterfall,
}

impl ProxyFamily {
    pub fn project(&self) -> &'static str {
        match self {
            ProxyFamily::Waterfall => "waterfall",
        }
    }

    pub fn jar_name(&self) -> &'static str {
        match self {
            ProxyFamily::Waterfall => "waterfall.jar",
        }
    }

    pub fn subdirectories(&self) -> &'static [&'static str] {
        match self {
            ProxyFamily::Waterfall => &["plugins"],
        }
    }
}

impl FromStr for ProxyFamily {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "waterfall" => Ok(ProxyFamily::Waterfall),
            _ => Err(Error::UnknownFamily {
                role: "proxy",
                family: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProxyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.project())
    }
}
