use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegionTagError {
    #[error("Tag '{0}' is absent")]
    TagAbsent(&'static str),

    #[error("Tag '{0}' is present")]
    TagPresent(&'static str),

    /// A tag of the queried kind intersects the query without matching it exactly.
    #[error("Overlapping tag '{tag}' is present in region (offset = {offset}, length = {length})")]
    AmbiguousOverlap {
        tag: &'static str,
        offset: u64,
        length: u64,
    },

    #[error("Tag index {index} is out of range (number of tags = {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Shifting tags by {0} would move a region out of the coordinate range")]
    ShiftOutOfRange(u64),
}

pub type RegionTagResult<T> = std::result::Result<T, RegionTagError>;
