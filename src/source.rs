// src/source.rs

use serde::Serialize;
use std::{fmt, str::FromStr};

/// One of the five generation sources tracked by the dashboard.
///
/// The declaration order is the order used everywhere a per-source vector
/// appears (slice values, table columns, chart traces).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Source {
    Coal,
    Hydroelectric,
    NaturalGas,
    Oil,
    OtherRenewable,
}

impl Source {
    pub const COUNT: usize = 5;

    pub const ALL: [Source; Source::COUNT] = [
        Source::Coal,
        Source::Hydroelectric,
        Source::NaturalGas,
        Source::Oil,
        Source::OtherRenewable,
    ];

    /// Position of this source in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Series name as it appears in the spreadsheet's `SeriesName` column.
    pub fn column_name(self) -> &'static str {
        match self {
            Source::Coal => "Coal",
            Source::Hydroelectric => "Hydroelectric",
            Source::NaturalGas => "Natural gas",
            Source::Oil => "Oil",
            Source::OtherRenewable => "Other Renewable",
        }
    }

    /// Label shown on the donut chart.
    pub fn label(self) -> &'static str {
        match self {
            Source::OtherRenewable => "Other Renewables",
            other => other.column_name(),
        }
    }

    pub fn default_color(self) -> &'static str {
        match self {
            Source::Coal => "#222C61",
            Source::Hydroelectric => "#34469C",
            Source::NaturalGas => "#6DCAF6",
            Source::Oil => "#D26AE3",
            Source::OtherRenewable => "#854FCB",
        }
    }

    /// Looks up a source by its spreadsheet series name (trimmed, case-insensitive).
    pub fn from_column_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Source::ALL
            .into_iter()
            .find(|s| s.column_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Source::from_column_name(s).ok_or_else(|| format!("unknown source `{}`", s))
    }
}

/// Colour per source, indexed by `Source::index`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Palette([String; Source::COUNT]);

impl Palette {
    pub fn color(&self, source: Source) -> &str {
        &self.0[source.index()]
    }

    pub fn set(&mut self, source: Source, color: impl Into<String>) {
        self.0[source.index()] = color.into();
    }

    /// Colours in `Source::ALL` order.
    pub fn colors(&self) -> Vec<String> {
        self.0.to_vec()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette(Source::ALL.map(|s| s.default_color().to_string()))
    }
}
