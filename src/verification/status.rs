//! Status markers and the Summary block shared by the log generator and
//! the patcher.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::constants::verification::{PROGRESS_PREFIX, STATUS_PREFIX, SUMMARY_HEADING};

/// Verification state of one endpoint section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusMarker {
    Verified,
    InProgress,
    NotUsed,
    NeedsFix,
    Missing,
    ReviewNeeded,
}

impl StatusMarker {
    pub const ALL: [Self; 6] = [
        Self::Verified,
        Self::InProgress,
        Self::NotUsed,
        Self::NeedsFix,
        Self::Missing,
        Self::ReviewNeeded,
    ];

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Verified => "✅",
            Self::InProgress => "⏳",
            Self::NotUsed => "❌",
            Self::NeedsFix => "🔧",
            Self::Missing => "➕",
            Self::ReviewNeeded => "📝",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::InProgress => "In Progress",
            Self::NotUsed => "Not Used",
            Self::NeedsFix => "Needs Fix",
            Self::Missing => "Missing",
            Self::ReviewNeeded => "Review Needed",
        }
    }

    /// Legend line describing the marker
    pub fn legend(self) -> String {
        let meaning = match self {
            Self::Verified => "Endpoint is correctly implemented and tested",
            Self::InProgress => "Currently being verified",
            Self::NotUsed => "Endpoint not related to app or should be skipped",
            Self::NeedsFix => "Endpoint exists but has issues",
            Self::Missing => "Endpoint should be used but is not implemented",
            Self::ReviewNeeded => "Requires manual review",
        };
        format!("- {} **{}** - {}", self.emoji(), self.label(), meaning)
    }

    /// `**Status:** <emoji> <label>`
    pub fn status_line(self) -> String {
        format!("{} {}", STATUS_PREFIX, self)
    }

    /// Marker whose emoji opens the status of `line`; any note after the
    /// label is ignored
    pub fn detect(line: &str) -> Option<Self> {
        let status = line.strip_prefix(STATUS_PREFIX).unwrap_or(line).trim_start();
        Self::ALL
            .into_iter()
            .find(|m| status.starts_with(m.emoji()))
    }
}

impl fmt::Display for StatusMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.label())
    }
}

impl FromStr for StatusMarker {
    type Err = String;

    /// Accepts `not-used`, `not_used` and `Not Used` alike
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|m| m.label().replace(' ', "").to_lowercase() == key)
            .ok_or_else(|| {
                format!(
                    "Invalid status '{}'. Valid values: verified, in-progress, not-used, needs-fix, missing, review-needed",
                    s
                )
            })
    }
}

// =============================================================================
// Counting
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub verified: usize,
    pub in_progress: usize,
    pub not_used: usize,
    pub needs_fix: usize,
    pub missing: usize,
    pub review_needed: usize,
}

impl StatusCounts {
    pub fn record(&mut self, marker: StatusMarker) {
        *self.slot(marker) += 1;
    }

    pub fn get(&self, marker: StatusMarker) -> usize {
        match marker {
            StatusMarker::Verified => self.verified,
            StatusMarker::InProgress => self.in_progress,
            StatusMarker::NotUsed => self.not_used,
            StatusMarker::NeedsFix => self.needs_fix,
            StatusMarker::Missing => self.missing,
            StatusMarker::ReviewNeeded => self.review_needed,
        }
    }

    pub fn total(&self) -> usize {
        StatusMarker::ALL.into_iter().map(|m| self.get(m)).sum()
    }

    /// Tally the status lines of the endpoint sections in a log.
    ///
    /// Only lines above the Summary block are considered; lines with an
    /// unrecognized marker are ignored.
    pub fn tally(log: &str) -> Self {
        let sections = summary_span(log).map_or(log, |(start, _)| &log[..start]);
        let mut counts = Self::default();
        for marker in status_lines(sections).filter_map(StatusMarker::detect) {
            counts.record(marker);
        }
        counts
    }

    fn slot(&mut self, marker: StatusMarker) -> &mut usize {
        match marker {
            StatusMarker::Verified => &mut self.verified,
            StatusMarker::InProgress => &mut self.in_progress,
            StatusMarker::NotUsed => &mut self.not_used,
            StatusMarker::NeedsFix => &mut self.needs_fix,
            StatusMarker::Missing => &mut self.missing,
            StatusMarker::ReviewNeeded => &mut self.review_needed,
        }
    }
}

/// Lines that open with the status prefix
pub fn status_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| line.starts_with(STATUS_PREFIX))
}

// =============================================================================
// Summary block
// =============================================================================

/// Render the Summary block, from its heading through the Progress line
/// (no trailing newline).
pub fn render_summary(total: usize, counts: &StatusCounts) -> String {
    let pct = if total > 0 {
        counts.verified * 100 / total
    } else {
        0
    };
    [
        SUMMARY_HEADING.to_string(),
        String::new(),
        format!("- **Total Endpoints:** {}", total),
        summary_count(StatusMarker::Verified, counts),
        summary_count(StatusMarker::NotUsed, counts),
        summary_count(StatusMarker::NeedsFix, counts),
        summary_count(StatusMarker::Missing, counts),
        summary_count(StatusMarker::ReviewNeeded, counts),
        String::new(),
        format!("{} {}/{} ({}%)", PROGRESS_PREFIX, counts.verified, total, pct),
    ]
    .join("\n")
}

fn summary_count(marker: StatusMarker, counts: &StatusCounts) -> String {
    format!(
        "- {} **{}:** {}",
        marker.emoji(),
        marker.label(),
        counts.get(marker)
    )
}

/// Byte span of the last Summary block: the heading line through the end
/// of the Progress line, excluding its newline
pub fn summary_span(log: &str) -> Option<(usize, usize)> {
    let start = log
        .rmatch_indices(SUMMARY_HEADING)
        .map(|(idx, _)| idx)
        .find(|&idx| {
            let after = &log[idx + SUMMARY_HEADING.len()..];
            (idx == 0 || log[..idx].ends_with('\n'))
                && (after.is_empty() || after.starts_with('\n') || after.starts_with("\r\n"))
        })?;
    let progress = start + log[start..].find(PROGRESS_PREFIX)?;
    let end = log[progress..]
        .find('\n')
        .map_or(log.len(), |offset| progress + offset);
    Some((start, end))
}
