//! Color, line-style and marker cycles.

use crate::description::StyleHint;

/// Default color cycle.
pub const DEFAULT_COLORS: [&str; 8] = [
    "#1F77B4", "#FF7F0E", "#2CA02C", "#D62728", "#9467BD", "#8C564B", "#E377C2", "#7F7F7F",
];

/// Default line-style cycle.
pub const DEFAULT_LINES: [&str; 4] = ["-", "--", ":", "-."];

/// Default marker cycle.
pub const DEFAULT_MARKERS: [&str; 6] = ["o", "s", "^", "p", "v", "8"];

/// Caller-level style lists, taking precedence over description hints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOverrides {
    /// Marker cycle.
    pub markers: Option<Vec<String>>,
    /// Color cycle.
    pub colors: Option<Vec<String>>,
    /// Line-style cycle.
    pub lines: Option<Vec<String>>,
}

/// Resolved style lists for one figure.
///
/// When a list came from a hint or a caller override, series without an
/// explicit index still get a token from it (`explicit_*`); with the defaults,
/// such series are left to the plotting library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleCycle {
    /// Marker tokens.
    pub markers: Vec<String>,
    /// Color tokens.
    pub colors: Vec<String>,
    /// Line-style tokens.
    pub lines: Vec<String>,
    /// Colors were supplied rather than defaulted.
    pub explicit_colors: bool,
    /// Line styles were supplied rather than defaulted.
    pub explicit_lines: bool,
}

impl Default for StyleCycle {
    fn default() -> Self {
        Self::resolve(None, &StyleOverrides::default())
    }
}

impl StyleCycle {
    /// Resolves each list from: caller override, then the hint, then defaults.
    ///
    /// Empty lists count as absent.
    pub fn resolve(hint: Option<&StyleHint>, overrides: &StyleOverrides) -> Self {
        let pick = |explicit: Option<&Vec<String>>, hinted: Option<&Vec<String>>| {
            explicit
                .filter(|list| !list.is_empty())
                .or_else(|| hinted.filter(|list| !list.is_empty()))
                .cloned()
        };
        let markers = pick(
            overrides.markers.as_ref(),
            hint.and_then(|h| h.markers.as_ref()),
        );
        let colors = pick(
            overrides.colors.as_ref(),
            hint.and_then(|h| h.colors.as_ref()),
        );
        let lines = pick(
            overrides.lines.as_ref(),
            hint.and_then(|h| h.lines.as_ref()),
        );
        Self {
            markers: markers.unwrap_or_else(|| owned(&DEFAULT_MARKERS)),
            explicit_colors: colors.is_some(),
            colors: colors.unwrap_or_else(|| owned(&DEFAULT_COLORS)),
            explicit_lines: lines.is_some(),
            lines: lines.unwrap_or_else(|| owned(&DEFAULT_LINES)),
        }
    }

    /// Starts a fresh set of counters for one plot.
    pub fn cycler(&self) -> Cycler<'_> {
        Cycler {
            style: self,
            marker: 0,
            color: 0,
            line: 0,
        }
    }
}

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| (*t).to_string()).collect()
}

/// Element `index` of `list`, wrapping in both directions.
fn wrapped(list: &[String], index: i64) -> Option<String> {
    let len = i64::try_from(list.len()).ok().filter(|len| *len > 0)?;
    let index = usize::try_from(index.rem_euclid(len)).ok()?;
    list.get(index).cloned()
}

/// Per-plot position in each style cycle.
///
/// Counters only advance when a token is handed out from the cycle: explicit
/// 1-based indices requested by a series never move them.
#[derive(Debug)]
pub struct Cycler<'a> {
    style: &'a StyleCycle,
    marker: i64,
    color: i64,
    line: i64,
}

impl Cycler<'_> {
    /// Next marker token.
    pub fn next_marker(&mut self) -> Option<String> {
        let marker = wrapped(&self.style.markers, self.marker);
        self.marker += 1;
        marker
    }

    /// Color for a series requesting `index` (1-based), if any.
    pub fn color(&mut self, index: Option<i64>) -> Option<String> {
        match index {
            Some(index) => wrapped(&self.style.colors, index - 1),
            None if self.style.explicit_colors => {
                let color = wrapped(&self.style.colors, self.color);
                self.color += 1;
                color
            }
            None => None,
        }
    }

    /// Line style for a series requesting `index` (1-based), if any.
    pub fn line(&mut self, index: Option<i64>) -> Option<String> {
        match index {
            Some(index) => wrapped(&self.style.lines, index - 1),
            None if self.style.explicit_lines => {
                let line = wrapped(&self.style.lines, self.line);
                self.line += 1;
                line
            }
            None => None,
        }
    }
}
