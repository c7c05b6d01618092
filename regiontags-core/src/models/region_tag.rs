use num_traits::{PrimInt, Unsigned};
use std::cmp::Ordering::{self};

use crate::models::Tag;

/// A tag attached to the half-open region `[offset, offset + length)`.
///
/// Inside a store the tag is a `Box<dyn Tag>`; typed snapshots handed back to
/// callers carry the concrete tag type instead.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTag<I, T>
where
    I: PrimInt + Unsigned,
{
    pub offset: I,
    pub length: I,
    pub tag: T,
}

impl<I, T> RegionTag<I, T>
where
    I: PrimInt + Unsigned,
{
    pub fn new(offset: I, length: I, tag: T) -> Self {
        RegionTag {
            offset,
            length,
            tag,
        }
    }

    #[inline]
    pub fn start_offset(&self) -> I {
        self.offset
    }

    #[inline]
    pub fn end_offset(&self) -> I {
        self.offset + self.length
    }

    /// Check if the region intersects `[offset, offset + length)`
    #[inline]
    pub fn intersects(&self, offset: I, length: I) -> bool {
        offset < self.end_offset() && self.start_offset() < offset + length
    }

    /// Check if the region is exactly `[offset, offset + length)`
    #[inline]
    pub fn matches(&self, offset: I, length: I) -> bool {
        self.offset == offset && self.length == length
    }

    /// Check if `offset` lies strictly inside the region, so that splitting
    /// there leaves two non-empty halves.
    #[inline]
    pub fn straddles(&self, offset: I) -> bool {
        self.start_offset() < offset && offset < self.end_offset()
    }

    ///
    /// Clip the region to the query `[offset, offset + length)`.
    ///
    /// # Returns
    /// - the `(offset, length)` of the intersection, or `None` when the two
    ///   ranges are disjoint
    ///
    pub fn clip(&self, offset: I, length: I) -> Option<(I, I)> {
        let start = offset;
        let end = offset + length;
        if end <= self.start_offset() || self.end_offset() <= start {
            // no intersection
            None
        } else if start <= self.start_offset() && self.end_offset() <= end {
            // query covers the whole region
            Some((self.offset, self.length))
        } else if self.start_offset() < start && end < self.end_offset() {
            // region covers the whole query
            Some((start, length))
        } else if self.end_offset() <= end {
            // query cuts the tail of the region
            Some((start, self.end_offset() - start))
        } else {
            // query cuts the head of the region
            Some((self.start_offset(), end - self.start_offset()))
        }
    }

    /// Order two region tags by their start offset only.
    #[inline]
    pub fn cmp_offset(&self, other: &RegionTag<I, T>) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl<I> RegionTag<I, Box<dyn Tag>>
where
    I: PrimInt + Unsigned,
{
    /// Borrow the stored tag as a trait object.
    #[inline]
    pub fn as_tag(&self) -> &dyn Tag {
        &*self.tag
    }

    /// Deep copy of the region tag, duplicating the owned tag.
    pub fn dup(&self) -> Self {
        RegionTag {
            offset: self.offset,
            length: self.length,
            tag: self.as_tag().dup(),
        }
    }
}
