//! Marker classification and interleaved-line removal
//!
//!     A single forward scan classifies every `docs:start` / `docs:end` marker in the file once.
//!     Markers naming the target identifier delimit the snippet; all others are *foreign* and
//!     get scrubbed from the snippet body, but only when they sit inside the target's own
//!     `[start, end]` interval.
//!
//!     Scrubbing is split in two pure phases over the line array:
//!         1. [`plan_removals`] builds the set of lines to drop (and trailing markers to cut)
//!         2. [`apply_removals`] applies that plan and selects the body between the markers

use crate::error::MarkerKind;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?://|#)\s+docs:(start|end):([a-zA-Z0-9\-._:]+)")
        .expect("marker pattern is a valid regex")
});

/// A `docs:start` / `docs:end` occurrence within one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'s> {
    pub kind: MarkerKind,
    /// Colon-separated identifier list, as written.
    pub ids: &'s str,
    /// The full matched text, comment prefix included (e.g. `// docs:start:foo`).
    pub text: &'s str,
}

impl Marker<'_> {
    /// Exact membership of `identifier` in the marker's identifier list.
    pub fn names(&self, identifier: &str) -> bool {
        ids_contain(self.ids, identifier)
    }
}

/// Exact membership test against a colon-separated identifier list.
pub(crate) fn ids_contain(ids: &str, identifier: &str) -> bool {
    ids.split(':').any(|id| id == identifier)
}

/// Iterate over every marker found on a line, left to right.
pub fn markers_on_line(line: &str) -> impl Iterator<Item = Marker<'_>> {
    MARKER_RE.captures_iter(line).filter_map(|caps| {
        let kind = match caps.get(1)?.as_str() {
            "start" => MarkerKind::Start,
            _ => MarkerKind::End,
        };
        Some(Marker {
            kind,
            ids: caps.get(2)?.as_str(),
            text: caps.get(0)?.as_str(),
        })
    })
}

/// A marker belonging to some other identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignMarker<'s> {
    /// 1-based line number
    pub line: usize,
    pub text: &'s str,
    /// The line holds nothing but the marker
    pub whole_line: bool,
}

/// Everything the classification scan learned about one identifier.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MarkerScan<'s> {
    /// 1-based lines of start markers naming the identifier
    pub starts: Vec<usize>,
    /// 1-based lines of end markers naming the identifier
    pub ends: Vec<usize>,
    pub foreign: Vec<ForeignMarker<'s>>,
}

/// Classify every marker in `lines` relative to `identifier`.
pub fn scan_markers<'s>(lines: &[&'s str], identifier: &str) -> MarkerScan<'s> {
    let mut scan = MarkerScan::default();

    for (index, line) in lines.iter().enumerate() {
        let line_number = index + 1;
        for marker in markers_on_line(line) {
            if marker.names(identifier) {
                match marker.kind {
                    MarkerKind::Start => scan.starts.push(line_number),
                    MarkerKind::End => scan.ends.push(line_number),
                }
            } else {
                scan.foreign.push(ForeignMarker {
                    line: line_number,
                    text: marker.text,
                    whole_line: line.trim() == marker.text.trim(),
                });
            }
        }
    }

    scan
}

/// Lines to drop and trailing markers to cut, scoped to one snippet interval.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RemovalPlan<'s> {
    removed: BTreeSet<usize>,
    cuts: BTreeMap<usize, Vec<&'s str>>,
}

impl<'s> RemovalPlan<'s> {
    /// Number of whole lines the plan drops.
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    pub fn removes(&self, line: usize) -> bool {
        self.removed.contains(&line)
    }

    fn rewrite(&self, line_number: usize, line: &'s str) -> Cow<'s, str> {
        match self.cuts.get(&line_number) {
            None => Cow::Borrowed(line),
            Some(markers) => {
                let mut rewritten = line.to_string();
                for marker in markers {
                    rewritten = rewritten.replacen(marker, "", 1);
                }
                Cow::Owned(rewritten.trim_end().to_string())
            }
        }
    }
}

/// Phase 1: restrict foreign markers to the inclusive `[start, end]` interval.
pub fn plan_removals<'s>(scan: &MarkerScan<'s>, start: usize, end: usize) -> RemovalPlan<'s> {
    let mut plan = RemovalPlan::default();

    for marker in scan
        .foreign
        .iter()
        .filter(|m| m.line >= start && m.line <= end)
    {
        if marker.whole_line {
            plan.removed.insert(marker.line);
        } else {
            plan.cuts.entry(marker.line).or_default().push(marker.text);
        }
    }

    plan
}

/// Phase 2: drop planned lines, then keep what lies strictly between the markers.
///
/// Dropping lines shifts positions, so the end marker is found at
/// `end - removed_count` in the filtered array.
pub fn apply_removals<'s>(
    lines: &[&'s str],
    plan: &RemovalPlan<'s>,
    start: usize,
    end: usize,
) -> Vec<Cow<'s, str>> {
    let adjusted_end = end.saturating_sub(plan.removed_count());

    lines
        .iter()
        .enumerate()
        .map(|(index, line)| (index + 1, *line))
        .filter(|(line_number, _)| !plan.removes(*line_number))
        .enumerate()
        .filter(|(index, _)| index + 1 > start && index + 1 < adjusted_end)
        .map(|(_, (line_number, line))| plan.rewrite(line_number, line))
        .collect()
}
