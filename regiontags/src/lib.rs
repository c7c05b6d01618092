#[cfg(feature = "core")]
#[doc(inline)]
pub use regiontags_core as core;

#[cfg(feature = "store")]
#[doc(inline)]
pub use regiontags_store as store;

#[cfg(feature = "store")]
pub use regiontags_store::{RegionTagSet, Shift, StoreOptions};

#[cfg(feature = "core")]
pub use regiontags_core::{RegionTag, RegionTagError, RegionTagResult, Tag, TagKind};
