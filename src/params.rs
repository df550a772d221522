//! Run parameters - inputs identifying one experiment point

use serde::{Deserialize, Serialize};
use std::fmt;

/// Benchmark mode.
///
/// Selects the metric vocabulary the extractor requires (sort needs reads
/// and comparisons, search needs transfers and comparisons) and the naming
/// of capture files and chart output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// External sorting run
    Sort,
    /// External searching run
    Search,
}

impl Mode {
    /// Token used in capture-file and chart-file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sort => "ordena",
            Self::Search => "pesquisa",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Algorithm variant understood by the external program.
///
/// Carries the positional integer token the program expects and the
/// human-readable name used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Balanced merge on 2F tapes
    TwoWayMerge,
    /// Balanced merge on F + 1 tapes
    MultiwayMerge,
    /// External quicksort
    ExternalQuicksort,
}

impl Method {
    /// Positional command-line token (1-based, matching the program's menu).
    #[must_use]
    pub const fn token(self) -> u8 {
        match self {
            Self::TwoWayMerge => 1,
            Self::MultiwayMerge => 2,
            Self::ExternalQuicksort => 3,
        }
    }

    /// Parse a menu token back into a variant.
    #[must_use]
    pub const fn from_token(token: u8) -> Option<Self> {
        match token {
            1 => Some(Self::TwoWayMerge),
            2 => Some(Self::MultiwayMerge),
            3 => Some(Self::ExternalQuicksort),
            _ => None,
        }
    }

    /// Display name as the external program advertises it.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::TwoWayMerge => "2F Fitas",
            Self::MultiwayMerge => "F + 1 Fitas",
            Self::ExternalQuicksort => "Quicksort Externo",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Initial ordering of the generated input records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialCondition {
    /// Already ascending
    Ascending,
    /// Descending
    Descending,
    /// Random order
    Random,
}

impl InitialCondition {
    /// Positional command-line token.
    #[must_use]
    pub const fn token(self) -> u8 {
        match self {
            Self::Ascending => 1,
            Self::Descending => 2,
            Self::Random => 3,
        }
    }
}

/// Full set of inputs identifying one experiment point.
///
/// Immutable once constructed; the orchestrator builds one per configured
/// record count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    /// Algorithm variant selector
    pub method: Method,
    /// Number of records the external program should process
    pub record_count: u64,
    /// Input ordering selector
    pub initial_condition: InitialCondition,
    /// Key to search for (search mode only)
    pub search_key: Option<i64>,
    /// Pass the program's verbose flag
    pub verbose: bool,
}

impl RunParameters {
    /// Positional command-line tokens, in the order the program expects:
    /// `<method> <record_count> <initial_condition> [search_key] [-P]`.
    ///
    /// Omitted optional fields produce no token at all, not an empty one.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            self.method.token().to_string(),
            self.record_count.to_string(),
            self.initial_condition.token().to_string(),
        ];
        if let Some(key) = self.search_key {
            args.push(key.to_string());
        }
        if self.verbose {
            args.push("-P".to_string());
        }
        args
    }
}
