use std::{fmt, panic::Location};

/// Source location of a construction call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ConstructionSite {
    /// Source file.
    pub file: &'static str,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
}

impl ConstructionSite {
    pub(crate) fn from_location(loc: &'static Location<'static>) -> Self {
        Self {
            file: loc.file(),
            line: loc.line(),
            column: loc.column(),
        }
    }
}

impl fmt::Display for ConstructionSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Construction sites keyed by the clock value at which they were recorded.
#[derive(Clone, Debug, Default)]
pub(crate) struct LineLog {
    entries: Vec<(f64, ConstructionSite)>,
}

impl LineLog {
    pub(crate) fn record(&mut self, t: f64, site: ConstructionSite) {
        let pos = self.entries.partition_point(|(at, _)| *at <= t);
        self.entries.insert(pos, (t, site));
    }

    /// Site of the last call recorded at or before `t`.
    pub(crate) fn at(&self, t: f64) -> Option<ConstructionSite> {
        let idx = self.entries.partition_point(|(at, _)| *at <= t);
        idx.checked_sub(1).map(|i| self.entries[i].1)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/lines.rs"]
mod tests;
