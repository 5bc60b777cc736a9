//! Needle search over monochrome masks.
//!
//! [`Matcher`] prepares a needle once and searches haystacks with the
//! bidirectional two-worker scan. The row-level rule and scan ranges are
//! exposed through [`crate::lowlevel`]. Results are center coordinates; "no
//! match" is `None`.

pub(crate) mod race;
pub(crate) mod rows;

use std::sync::Arc;

use crate::image::ImageView;
use crate::search::race::BidirectionalRowSearch;
use crate::search::rows::NeedleRows;
use crate::trace::{trace_event, trace_span};
use crate::MonoMask;

/// Center of a matched region in haystack coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Match {
    /// Column of the match center.
    pub x: usize,
    /// Row of the match center.
    pub y: usize,
}

impl Match {
    /// Converts a top-left placement into the center coordinate.
    pub(crate) fn centered(offset: usize, row: usize, needle: &NeedleRows) -> Self {
        Self {
            x: offset + needle.width() / 2,
            y: row + needle.height() / 2,
        }
    }
}

/// Search configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Run the two scanners concurrently. When false both scans run on the
    /// calling thread, forward first.
    pub parallel: bool,
    /// Let the losing worker stop early once a match is published.
    pub cancel_on_match: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            cancel_on_match: true,
        }
    }
}

/// Needle prepared for repeated searches.
pub struct Matcher {
    needle: MonoMask,
    rows: Option<Arc<NeedleRows>>,
    cfg: MatchConfig,
}

impl Matcher {
    /// Creates a matcher with the default configuration.
    pub fn new(needle: MonoMask) -> Self {
        let rows = NeedleRows::from_mask(&needle).map(Arc::new);
        Self {
            needle,
            rows,
            cfg: MatchConfig::default(),
        }
    }

    /// Replaces the search configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the needle mask.
    pub fn needle(&self) -> &MonoMask {
        &self.needle
    }

    /// Returns the active configuration.
    pub fn config(&self) -> MatchConfig {
        self.cfg
    }

    /// Searches a haystack mask, consuming it.
    pub fn find(&self, haystack: MonoMask) -> Option<Match> {
        let _span = trace_span!(
            "find",
            hay_width = haystack.width(),
            hay_height = haystack.height(),
            needle_width = self.needle.width(),
            needle_height = self.needle.height(),
            needle_set = self.needle.count_set()
        )
        .entered();

        let Some(rows) = self.rows.as_ref() else {
            trace_event!("guard_rejected", reason = "needle has fewer than two rows");
            return None;
        };
        let search = BidirectionalRowSearch::new(Arc::new(haystack), Arc::clone(rows))?;
        if self.cfg.parallel {
            search.run(self.cfg.cancel_on_match)
        } else {
            search.run_sequential()
        }
    }

    /// Packs an optional byte source and searches it.
    pub fn find_in(&self, haystack: Option<ImageView<'_, u8>>) -> Option<Match> {
        match MonoMask::from_source(haystack) {
            Ok(mask) => self.find(mask),
            Err(_) => {
                trace_event!("guard_rejected", reason = "haystack source is absent");
                None
            }
        }
    }
}

/// Locates `needle` in `haystack` with the default configuration.
///
/// Absent sources yield `None` without starting any worker.
pub fn find_in(
    haystack: Option<ImageView<'_, u8>>,
    needle: Option<ImageView<'_, u8>>,
) -> Option<Match> {
    find_in_with(haystack, needle, MatchConfig::default())
}

/// Like [`find_in`] with an explicit configuration.
pub fn find_in_with(
    haystack: Option<ImageView<'_, u8>>,
    needle: Option<ImageView<'_, u8>>,
    cfg: MatchConfig,
) -> Option<Match> {
    let (Some(haystack), Some(needle)) = (haystack, needle) else {
        trace_event!("guard_rejected", reason = "source is absent");
        return None;
    };
    let needle = MonoMask::from_view(needle);
    Matcher::new(needle).with_config(cfg).find_in(Some(haystack))
}
