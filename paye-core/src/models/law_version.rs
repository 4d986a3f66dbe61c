use std::fmt;

use serde::{Deserialize, Serialize};

/// The tax-law versions the engine ships band tables and reliefs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LawVersion {
    /// Consolidated-relief regime in force until the end of 2025.
    Y2025,
    /// The 2026 regime with statutory deductions and rent relief.
    Y2026,
}

impl LawVersion {
    pub const OLD: LawVersion = LawVersion::Y2025;
    pub const CURRENT: LawVersion = LawVersion::Y2026;

    pub fn all() -> &'static [LawVersion] {
        &[LawVersion::Y2025, LawVersion::Y2026]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Y2025 => "2025",
            Self::Y2026 => "2026",
        }
    }

    /// Accepts the year (`"2025"`, `"2026"`) or `"old"` / `"new"`, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2025" | "old" => Some(Self::Y2025),
            "2026" | "new" => Some(Self::Y2026),
            _ => None,
        }
    }
}

impl fmt::Display for LawVersion {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
