//! Low-level building blocks for custom matching pipelines.
//!
//! These expose the row rule, scan ranges, and the two-worker search for
//! callers that manage their own masks. Most users should prefer
//! [`Matcher`](crate::Matcher) or [`find_in`](crate::find_in).

pub use crate::mask::packed_stride;
pub use crate::search::race::{scan_direction, BidirectionalRowSearch, ScanOutcome};
pub use crate::search::rows::{
    find_subsequence, match_at_row, scan_rows, NeedleRows, ScanDirection,
};
