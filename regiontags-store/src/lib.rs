//! A store for typed metadata ("tags") attached to regions of an in-memory
//! buffer that keeps being sliced, concatenated, trimmed and copied.
//!
//! [`RegionTagSet`] keeps its tags sorted by offset and offers two layers:
//!
//! - **raw operations** that ignore tag types: [`insert`](RegionTagSet::insert),
//!   [`intersecting`](RegionTagSet::intersecting), [`clear`](RegionTagSet::clear),
//!   [`copy_from`](RegionTagSet::copy_from), [`shift`](RegionTagSet::shift).
//!   These are what a buffer calls when its content changes shape.
//! - **typed operations** for one tag type at a time: `add`, `find`, `get`,
//!   `remove` and friends. They split tags of that type on demand so that each
//!   region carries at most one tag of a type, matched exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use regiontags_store::RegionTagSet;
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct FlowTag {
//!     names: Vec<String>,
//! }
//!
//! let mut tags: RegionTagSet<u64> = RegionTagSet::new();
//! tags.add::<FlowTag>(10, 10).unwrap();
//!
//! // cover the rest of the first 30 units
//! let added = tags.add_where_absent::<FlowTag>(0, 30);
//! assert_eq!(added.len(), 2);
//!
//! // name the flow everywhere
//! tags.for_each_tag_mut::<FlowTag, _>(0, 30, |_, _, flow| flow.names.push("voip".to_string()));
//!
//! // split the content in two: the second half gets its own tags
//! let mut tail: RegionTagSet<u64> = RegionTagSet::new();
//! tail.copy_from(&tags, 15, 0, 15);
//! tags.clear(15, 15);
//!
//! assert_eq!(tail.get::<FlowTag>(0, 5).unwrap().names, vec!["voip".to_string()]);
//! assert_eq!(tags.find::<FlowTag>(15, 15).unwrap(), None);
//! ```
//!
//! ## Errors
//!
//! Typed exact-match operations fail with
//! [`RegionTagError::AmbiguousOverlap`](regiontags_core::RegionTagError::AmbiguousOverlap)
//! when a tag of the queried type intersects the query without matching it,
//! which can only happen if tags were put in place with the raw
//! [`insert`](RegionTagSet::insert).

/// Store options.
pub mod options;

/// The region tag store and its raw, type-agnostic operations.
///
/// See [`RegionTagSet`] for details.
pub mod region_tag_set;

/// Core traits for content owning a region tag store.
///
/// See [`RegionTagged`] for the main trait.
pub mod traits;

mod typed;

// re-exports
pub use self::options::StoreOptions;
pub use self::region_tag_set::{Intersecting, RegionTagSet, Shift};
pub use self::traits::RegionTagged;
pub use regiontags_core::{RegionTag, RegionTagError, RegionTagResult, Tag, TagKind};
