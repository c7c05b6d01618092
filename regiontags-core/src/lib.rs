//! Core models for attaching typed metadata to regions of an in-memory buffer.
//!
//! A region is a half-open range `[offset, offset + length)` on the linear
//! address axis of a buffer, measured in whatever unit the buffer uses (bytes
//! or bits). A [`RegionTag`] pairs such a region with an owned tag, and the
//! [`Tag`] trait describes what a tag payload must offer: explicit
//! duplication and a stable [`TagKind`] discriminant.
//!
//! ```rust
//! use regiontags_core::{RegionTag, Tag, TagKind};
//!
//! #[derive(Clone, Debug, Default)]
//! struct FlowTag {
//!     names: Vec<String>,
//! }
//!
//! let region: RegionTag<u64, Box<dyn Tag>> = RegionTag::new(0, 8, Box::new(FlowTag::default()));
//! assert_eq!(region.end_offset(), 8);
//! assert_eq!(region.as_tag().kind(), TagKind::of::<FlowTag>());
//! assert_eq!(region.clip(4, 16), Some((4, 4)));
//! ```
pub mod errors;
pub mod models;
pub mod utils;

// re-exports
pub use self::errors::{RegionTagError, RegionTagResult};
pub use self::models::{RegionTag, Tag, TagKind};
