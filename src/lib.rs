//! MonoMatch locates a small monochrome needle inside a larger haystack.
//!
//! Both images are packed into 1-bit-per-pixel [`MonoMask`]s. The search
//! looks for the needle's first two rows as a contiguous pattern, scanning
//! the haystack from both ends toward the middle on two workers and
//! returning the first placement found, as the center of the needle.
//! Matching is exact; only rows 0 and 1 of the needle are compared.

pub mod image;
pub mod lowlevel;
pub mod mask;
pub mod search;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;
pub use crate::image::ImageView;
pub use crate::mask::MonoMask;
pub use crate::search::{find_in, find_in_with, Match, MatchConfig, Matcher};
pub use crate::util::{MonoMatchError, MonoMatchResult};
