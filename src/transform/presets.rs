//! Named, reusable filter presets

use crate::core::LoggerError;
use std::fmt;
use std::str::FromStr;

/// Built-in suppression presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Host bookkeeping attributes that cost ingestion bytes but are rarely queried
    LowCost,
    /// Keys reserved by Logstash/ELK pipelines
    ElkCompatible,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::LowCost, Preset::ElkCompatible];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::LowCost => "low-cost",
            Preset::ElkCompatible => "elk-compatible",
        }
    }

    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            Preset::LowCost => &[
                "name",
                "filename",
                "module",
                "thread",
                "threadName",
                "processName",
                "process",
            ],
            Preset::ElkCompatible => &["type", "tags", "host", "@version", "@timestamp"],
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "low-cost" => Ok(Preset::LowCost),
            "elk-compatible" | "elk" => Ok(Preset::ElkCompatible),
            _ => Err(LoggerError::UnknownPreset(s.to_string())),
        }
    }
}
