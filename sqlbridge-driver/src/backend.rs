//! The closed set of supported backends.

use std::fmt;

use sqlbridge_dsn::Dialect;

/// A supported backend, selected by a case-insensitive tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// MySQL.
    MySql,
    /// MariaDB, wire-compatible with MySQL.
    MariaDb,
    /// TiDB, wire-compatible with MySQL.
    Tidb,
    /// GoldenDB, wire-compatible with MySQL.
    GoldenDb,
    /// DM 8.
    Dm8,
    /// KingbaseES 9.
    Kingbase,
}

impl Backend {
    /// The backend used when the selection tag is unknown or absent.
    pub const DEFAULT: Backend = Backend::MySql;

    /// Parse a backend tag, case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "mysql" => Some(Self::MySql),
            "mariadb" => Some(Self::MariaDb),
            "tidb" => Some(Self::Tidb),
            "goldendb" => Some(Self::GoldenDb),
            "dm8" => Some(Self::Dm8),
            "kdb9" | "kingbase" => Some(Self::Kingbase),
            "default" => Some(Self::DEFAULT),
            _ => None,
        }
    }

    /// Parse a tag, falling back to [`Backend::DEFAULT`] when the tag is
    /// unknown or absent.
    pub fn from_tag_or_default(tag: Option<&str>) -> Self {
        tag.and_then(Self::from_tag).unwrap_or(Self::DEFAULT)
    }

    /// The canonical tag string.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::MariaDb => "mariadb",
            Self::Tidb => "tidb",
            Self::GoldenDb => "goldendb",
            Self::Dm8 => "dm8",
            Self::Kingbase => "kdb9",
        }
    }

    /// The connection-string dialect this backend consumes.
    pub fn dialect(&self) -> Dialect {
        match self {
            Self::MySql | Self::MariaDb | Self::Tidb | Self::GoldenDb => Dialect::MySql,
            Self::Dm8 => Dialect::Dm,
            Self::Kingbase => Dialect::Kingbase,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
