//! Operations on a [`RegionTagSet`] restricted to one tag type.
//!
//! Tags of the queried type never partially overlap each other from the point
//! of view of these operations: before looking for an exact region they split
//! (align) every tag of that type that straddles the query boundaries. A tag
//! of the queried type that still intersects the query without matching it
//! exactly is reported as [`RegionTagError::AmbiguousOverlap`].

use log::{debug, trace};
use num_traits::{PrimInt, Unsigned};

use regiontags_core::models::{RegionTag, Tag, TagKind};
use regiontags_core::utils::{gaps, to_u64};
use regiontags_core::{RegionTagError, RegionTagResult};

use crate::region_tag_set::RegionTagSet;

impl<I> RegionTagSet<I>
where
    I: PrimInt + Unsigned,
{
    ///
    /// Split every tag of type `T` that strictly straddles `offset` into two
    /// adjacent tags meeting at `offset`. The right half receives a duplicate
    /// of the tag. Tags of other types are left alone.
    ///
    pub fn align<T: Tag>(&mut self, offset: I) {
        let Some(region_tags) = self.region_tags.as_mut() else {
            return;
        };
        let kind = TagKind::of::<T>();
        let mut right_halves = Vec::new();
        for region_tag in region_tags.iter_mut() {
            if region_tag.as_tag().kind() == kind && region_tag.straddles(offset) {
                trace!(
                    "align: splitting '{}' at offset {}",
                    kind,
                    to_u64(offset)
                );
                let end = region_tag.end_offset();
                right_halves.push(RegionTag::new(offset, end - offset, region_tag.as_tag().dup()));
                region_tag.length = offset - region_tag.offset;
            }
        }
        for right_half in right_halves {
            let index = region_tags.partition_point(|r| r.offset <= right_half.offset);
            region_tags.insert(index, right_half);
        }
    }

    ///
    /// Find the position of the tag of type `T` registered for exactly
    /// `[offset, offset + length)`.
    ///
    /// Tags of type `T` are aligned at both query boundaries first.
    ///
    /// # Returns
    /// - `Ok(Some(index))` for an exact match, `Ok(None)` if no tag of type `T`
    ///   touches the query
    /// - `Err(AmbiguousOverlap)` if a tag of type `T` intersects the query
    ///   without matching it exactly
    ///
    pub fn find_exact_index<T: Tag>(&mut self, offset: I, length: I) -> RegionTagResult<Option<usize>> {
        self.align::<T>(offset);
        self.align::<T>(offset + length);
        let kind = TagKind::of::<T>();
        let end = offset + length;
        let mut found = None;
        for (index, region_tag) in self.entries().iter().enumerate() {
            if region_tag.start_offset() > end {
                break;
            }
            if region_tag.as_tag().kind() != kind {
                continue;
            }
            if region_tag.matches(offset, length) {
                found.get_or_insert(index);
            } else if region_tag.intersects(offset, length) {
                return Err(RegionTagError::AmbiguousOverlap {
                    tag: kind.name(),
                    offset: to_u64(region_tag.offset),
                    length: to_u64(region_tag.length),
                });
            }
        }
        Ok(found)
    }

    /// Get the tag of type `T` for exactly `[offset, offset + length)`, or
    /// `None` if there is no such tag.
    pub fn find<T: Tag>(&mut self, offset: I, length: I) -> RegionTagResult<Option<&T>> {
        match self.find_exact_index::<T>(offset, length)? {
            Some(index) => Ok(self.entries()[index].as_tag().downcast_ref::<T>()),
            None => Ok(None),
        }
    }

    pub fn find_mut<T: Tag>(&mut self, offset: I, length: I) -> RegionTagResult<Option<&mut T>> {
        match self.find_exact_index::<T>(offset, length)? {
            Some(index) => Ok(self.entries_mut()[index].tag.downcast_mut::<T>()),
            None => Ok(None),
        }
    }

    /// Get the tag of type `T` for exactly `[offset, offset + length)`.
    pub fn get<T: Tag>(&mut self, offset: I, length: I) -> RegionTagResult<&T> {
        self.find::<T>(offset, length)?
            .ok_or(RegionTagError::TagAbsent(TagKind::of::<T>().name()))
    }

    pub fn get_mut<T: Tag>(&mut self, offset: I, length: I) -> RegionTagResult<&mut T> {
        self.find_mut::<T>(offset, length)?
            .ok_or(RegionTagError::TagAbsent(TagKind::of::<T>().name()))
    }

    ///
    /// Add a default-constructed tag of type `T` for `[offset, offset + length)`.
    ///
    /// Fails with [`RegionTagError::TagPresent`] if the region already carries
    /// a tag of type `T`.
    ///
    pub fn add<T: Tag + Default>(&mut self, offset: I, length: I) -> RegionTagResult<&mut T> {
        if self.find_exact_index::<T>(offset, length)?.is_some() {
            return Err(RegionTagError::TagPresent(TagKind::of::<T>().name()));
        }
        let index = self.insert(offset, length, Box::new(T::default()));
        self.typed_mut_at::<T>(index)
    }

    /// Get the tag of type `T` for exactly `[offset, offset + length)`,
    /// adding a default-constructed one first if there is none.
    pub fn add_if_absent<T: Tag + Default>(&mut self, offset: I, length: I) -> RegionTagResult<&mut T> {
        let index = match self.find_exact_index::<T>(offset, length)? {
            Some(index) => index,
            None => self.insert(offset, length, Box::new(T::default())),
        };
        self.typed_mut_at::<T>(index)
    }

    ///
    /// Add default-constructed tags of type `T` to every part of
    /// `[offset, offset + length)` that no tag of type `T` covers yet.
    ///
    /// Tags of type `T` already present are left untouched.
    ///
    /// # Returns
    /// - duplicates of the newly added tags with their regions, in offset order
    ///
    pub fn add_where_absent<T: Tag + Clone + Default>(&mut self, offset: I, length: I) -> Vec<RegionTag<I, T>> {
        self.align::<T>(offset);
        self.align::<T>(offset + length);
        let kind = TagKind::of::<T>();
        let covered: Vec<(I, I)> = self
            .iter()
            .filter(|r| r.as_tag().kind() == kind)
            .map(|r| (r.offset, r.length))
            .collect();
        let mut added = Vec::new();
        for (o, l) in gaps(offset, length, covered) {
            let tag = T::default();
            added.push(RegionTag::new(o, l, tag.clone()));
            self.insert(o, l, Box::new(tag));
        }
        debug!(
            "added {} '{}' tags in region (offset = {}, length = {})",
            added.len(),
            kind,
            to_u64(offset),
            to_u64(length)
        );
        added
    }

    /// Remove the tag of type `T` for exactly `[offset, offset + length)`.
    pub fn remove<T: Tag>(&mut self, offset: I, length: I) -> RegionTagResult<T> {
        self.remove_if_present::<T>(offset, length)?
            .ok_or(RegionTagError::TagAbsent(TagKind::of::<T>().name()))
    }

    /// Remove the tag of type `T` for exactly `[offset, offset + length)` if
    /// there is one.
    pub fn remove_if_present<T: Tag>(&mut self, offset: I, length: I) -> RegionTagResult<Option<T>> {
        let Some(index) = self.find_exact_index::<T>(offset, length)? else {
            return Ok(None);
        };
        match self.remove_at(index)?.downcast::<T>() {
            Ok(tag) => Ok(Some(tag)),
            Err(_) => unreachable!("exact match was found by tag kind"),
        }
    }

    ///
    /// Remove and return the tags of type `T` in `[offset, offset + length)`,
    /// clipped to that range.
    ///
    /// The range is cleared with [`clear`](Self::clear) afterwards, which
    /// removes tags of *every* type there, not only `T`.
    ///
    pub fn remove_all_present<T: Tag + Clone>(&mut self, offset: I, length: I) -> Vec<RegionTag<I, T>> {
        let removed = self.tags::<T>(offset, length);
        self.clear(offset, length);
        removed
    }

    /// Duplicates of the tags of type `T` in `[offset, offset + length)`,
    /// clipped to that range.
    pub fn tags<T: Tag + Clone>(&self, offset: I, length: I) -> Vec<RegionTag<I, T>> {
        let mut result = Vec::new();
        self.for_each_tag::<T, _>(offset, length, |o, l, tag| {
            result.push(RegionTag::new(o, l, tag.clone()))
        });
        result
    }

    /// Call `f` with the clipped `(offset, length, tag)` of every tag of type
    /// `T` intersecting `[offset, offset + length)`. Does not align.
    pub fn for_each_tag<T, F>(&self, offset: I, length: I, mut f: F)
    where
        T: Tag,
        F: FnMut(I, I, &T),
    {
        for (o, l, tag) in self.intersecting(offset, length) {
            if let Some(tag) = tag.downcast_ref::<T>() {
                f(o, l, tag);
            }
        }
    }

    /// Mutable counterpart of [`for_each_tag`](Self::for_each_tag).
    ///
    /// Tags of type `T` are aligned at both boundaries first, so every call
    /// sees a tag whose whole region lies inside the range.
    pub fn for_each_tag_mut<T, F>(&mut self, offset: I, length: I, mut f: F)
    where
        T: Tag,
        F: FnMut(I, I, &mut T),
    {
        self.align::<T>(offset);
        self.align::<T>(offset + length);
        for region_tag in self.entries_mut().iter_mut() {
            let Some((o, l)) = region_tag.clip(offset, length) else {
                continue;
            };
            if let Some(tag) = region_tag.tag.downcast_mut::<T>() {
                f(o, l, tag);
            }
        }
    }

    fn typed_mut_at<T: Tag>(&mut self, index: usize) -> RegionTagResult<&mut T> {
        self.entries_mut()
            .get_mut(index)
            .and_then(|region_tag| region_tag.tag.downcast_mut::<T>())
            .ok_or(RegionTagError::TagAbsent(TagKind::of::<T>().name()))
    }
}
