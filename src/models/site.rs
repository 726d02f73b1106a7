use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    pub location: String,
}

/// Which sites a listing covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteScope {
    #[default]
    All,
    Site(String),
}

impl SiteScope {
    pub fn contains(&self, site_id: &str) -> bool {
        match self {
            SiteScope::All => true,
            SiteScope::Site(id) => id == site_id,
        }
    }
}

impl Display for SiteScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteScope::All => write!(f, "all"),
            SiteScope::Site(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for SiteScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Site id must not be empty".to_string());
        }
        if s.eq_ignore_ascii_case("all") {
            Ok(SiteScope::All)
        } else {
            Ok(SiteScope::Site(s.to_string()))
        }
    }
}
