pub mod region_tag;
pub mod tag;

// re-export for cleaner imports
pub use self::region_tag::RegionTag;
pub use self::tag::{Tag, TagKind};
