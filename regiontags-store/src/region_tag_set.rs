use std::fmt::Debug;

use log::{debug, trace};
use num_traits::{PrimInt, Unsigned};

use regiontags_core::models::{RegionTag, Tag};
use regiontags_core::utils::to_u64;
use regiontags_core::{RegionTagError, RegionTagResult};

use crate::options::StoreOptions;

/// Direction and distance of a [`RegionTagSet::shift`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift<I> {
    /// Content was prepended: every region moves towards higher offsets.
    Forward(I),
    /// Content was trimmed off the front: every region moves towards zero.
    Backward(I),
}

/// A set of tags, each referring to a region of a buffer.
///
/// Regions are kept sorted ascending by offset. The raw operations on this
/// type ([`insert`](Self::insert), [`clear`](Self::clear),
/// [`copy_from`](Self::copy_from), [`shift`](Self::shift)) ignore the kind of
/// the tags entirely, so regions of any kind may overlap freely. The typed
/// operations (`add`, `find`, `remove`, ...) only allow one tag of a given kind
/// per exact region and split regions on demand to make exact matches possible.
///
/// Tags are exclusively owned by the set; they leave it only through explicit
/// removal, and they are dropped with it.
///
/// # Examples
///
/// ```
/// use regiontags_store::{RegionTagSet, Shift};
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// struct FlowTag {
///     names: Vec<String>,
/// }
///
/// let mut tags: RegionTagSet<u64> = RegionTagSet::new();
/// tags.add::<FlowTag>(0, 20).unwrap().names.push("video".to_string());
///
/// // drop the middle of the content
/// tags.clear(5, 10);
/// assert_eq!(tags.len(), 2);
///
/// // 5 units of content were prepended
/// tags.shift(Shift::Forward(5)).unwrap();
/// let flow = tags.get::<FlowTag>(20, 5).unwrap();
/// assert_eq!(flow.names, vec!["video".to_string()]);
/// ```
#[derive(Debug)]
pub struct RegionTagSet<I>
where
    I: PrimInt + Unsigned,
{
    /// `None` until the first tag is inserted.
    pub(crate) region_tags: Option<Vec<RegionTag<I, Box<dyn Tag>>>>,
    options: StoreOptions,
}

impl<I> Default for RegionTagSet<I>
where
    I: PrimInt + Unsigned,
{
    fn default() -> Self {
        RegionTagSet::with_options(StoreOptions::default())
    }
}

impl<I> Clone for RegionTagSet<I>
where
    I: PrimInt + Unsigned,
{
    /// Deep copy: every tag is duplicated.
    fn clone(&self) -> Self {
        RegionTagSet {
            region_tags: self
                .region_tags
                .as_ref()
                .map(|region_tags| region_tags.iter().map(RegionTag::dup).collect()),
            options: self.options.clone(),
        }
    }
}

impl<I> RegionTagSet<I>
where
    I: PrimInt + Unsigned,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: StoreOptions) -> Self {
        RegionTagSet {
            region_tags: None,
            options,
        }
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Get the number of region tags
    #[inline]
    pub fn len(&self) -> usize {
        self.region_tags.as_ref().map_or(0, Vec::len)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether storage has been allocated. An unallocated set holds no tags.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.region_tags.is_some()
    }

    /// Iterate over all region tags in offset order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, RegionTag<I, Box<dyn Tag>>> {
        self.entries().iter()
    }

    #[inline]
    pub(crate) fn entries(&self) -> &[RegionTag<I, Box<dyn Tag>>] {
        self.region_tags.as_deref().unwrap_or(&[])
    }

    #[inline]
    pub(crate) fn entries_mut(&mut self) -> &mut [RegionTag<I, Box<dyn Tag>>] {
        self.region_tags.as_deref_mut().unwrap_or(&mut [])
    }

    fn ensure_allocated(&mut self) -> &mut Vec<RegionTag<I, Box<dyn Tag>>> {
        let capacity = self.options.initial_capacity;
        self.region_tags
            .get_or_insert_with(|| Vec::with_capacity(capacity))
    }

    /// Get the region tag at `index` in offset order.
    pub fn region_tag_at(&self, index: usize) -> RegionTagResult<&RegionTag<I, Box<dyn Tag>>> {
        self.entries()
            .get(index)
            .ok_or(RegionTagError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Get the tag at `index` in offset order.
    pub fn tag_at(&self, index: usize) -> RegionTagResult<&dyn Tag> {
        self.region_tag_at(index).map(RegionTag::as_tag)
    }

    ///
    /// Insert a tag for `[offset, offset + length)`, taking ownership of it.
    ///
    /// No overlap validation happens here, not even against tags of the same
    /// kind. The tag is placed after any tags that share its offset.
    ///
    /// # Returns
    /// - the position of the new tag in offset order
    ///
    pub fn insert(&mut self, offset: I, length: I, tag: Box<dyn Tag>) -> usize {
        let region_tags = self.ensure_allocated();
        let index = region_tags.partition_point(|r| r.offset <= offset);
        region_tags.insert(index, RegionTag::new(offset, length, tag));
        index
    }

    /// Remove the tag at `index` in offset order and hand its ownership back.
    pub fn remove_at(&mut self, index: usize) -> RegionTagResult<Box<dyn Tag>> {
        let len = self.len();
        match self.region_tags.as_mut() {
            Some(region_tags) if index < len => Ok(region_tags.remove(index).tag),
            _ => Err(RegionTagError::IndexOutOfRange { index, len }),
        }
    }

    ///
    /// Iterate over every tag intersecting `[offset, offset + length)`.
    ///
    /// Each item carries the clipped intersection of the stored region with
    /// the query, not the stored region itself.
    ///
    pub fn intersecting(&self, offset: I, length: I) -> Intersecting<'_, I> {
        Intersecting {
            inner: self.entries().iter(),
            offset,
            length,
        }
    }

    /// Call `f` with the clipped `(offset, length, tag)` of every tag
    /// intersecting `[offset, offset + length)`.
    pub fn for_each_intersecting<F>(&self, offset: I, length: I, mut f: F)
    where
        F: FnMut(I, I, &dyn Tag),
    {
        for (o, l, tag) in self.intersecting(offset, length) {
            f(o, l, tag);
        }
    }

    /// Duplicate every tag intersecting `[offset, offset + length)` together
    /// with its clipped region.
    pub fn snapshot_intersecting(&self, offset: I, length: I) -> Vec<RegionTag<I, Box<dyn Tag>>> {
        self.intersecting(offset, length)
            .map(|(o, l, tag)| RegionTag::new(o, l, tag.dup()))
            .collect()
    }

    ///
    /// Clear all tags, of any kind, from `[offset, offset + length)`.
    ///
    /// Regions inside the cleared range are dropped, regions sticking out on
    /// one side are truncated, and a region sticking out on both sides is
    /// split into its left and right remainders.
    ///
    pub fn clear(&mut self, offset: I, length: I) {
        let Some(region_tags) = self.region_tags.as_mut() else {
            return;
        };
        let clear_start = offset;
        let clear_end = offset + length;
        let mut moved = false;
        let mut index = 0;
        while index < region_tags.len() {
            let region_tag = &mut region_tags[index];
            let start = region_tag.start_offset();
            let end = region_tag.end_offset();
            if clear_end <= start || end <= clear_start {
                // no intersection
                index += 1;
            } else if clear_start <= start && end <= clear_end {
                // clear covers the whole region
                trace!("clear: dropping region tag at offset {}", to_u64(start));
                region_tags.remove(index);
            } else if start < clear_start && clear_end < end {
                // clear splits the region into two parts
                trace!("clear: splitting region tag at offset {}", to_u64(start));
                let left = RegionTag::new(start, clear_start - start, region_tag.as_tag().dup());
                region_tag.offset = clear_end;
                region_tag.length = end - clear_end;
                region_tags.insert(index, left);
                moved = true;
                index += 2;
            } else if end <= clear_end {
                // clear cuts the end of the region
                trace!(
                    "clear: truncating region tag at offset {} to end at {}",
                    to_u64(start),
                    to_u64(clear_start)
                );
                region_tag.length = clear_start - start;
                index += 1;
            } else {
                // clear cuts the beginning of the region
                trace!(
                    "clear: truncating region tag at offset {} to start at {}",
                    to_u64(start),
                    to_u64(clear_end)
                );
                region_tag.offset = clear_end;
                region_tag.length = end - clear_end;
                moved = true;
                index += 1;
            }
        }
        if moved {
            // right remainders now start at `clear_end` and may have jumped
            // past regions that begin inside the left remainders
            region_tags.sort_by(RegionTag::cmp_offset);
        }
    }

    /// Drop every tag and release the storage.
    pub fn clear_all(&mut self) {
        self.region_tags = None;
    }

    ///
    /// Copy the tags of `source` in `[source_offset, source_offset + length)`
    /// over `[offset, offset + length)` of this set.
    ///
    /// The destination range is cleared first; the copied tags are duplicates
    /// clipped to the source range.
    ///
    pub fn copy_from(&mut self, source: &RegionTagSet<I>, source_offset: I, offset: I, length: I) {
        let snapshot = source.snapshot_intersecting(source_offset, length);
        self.paste(snapshot, source_offset, offset, length);
    }

    /// Like [`copy_from`](Self::copy_from) with this set as the source.
    pub fn copy_within(&mut self, source_offset: I, offset: I, length: I) {
        let snapshot = self.snapshot_intersecting(source_offset, length);
        self.paste(snapshot, source_offset, offset, length);
    }

    fn paste(
        &mut self,
        snapshot: Vec<RegionTag<I, Box<dyn Tag>>>,
        source_offset: I,
        offset: I,
        length: I,
    ) {
        debug!(
            "copying {} region tags from offset {} to offset {} (length = {})",
            snapshot.len(),
            to_u64(source_offset),
            to_u64(offset),
            to_u64(length)
        );
        self.clear(offset, length);
        for region_tag in snapshot {
            let shifted = offset + (region_tag.offset - source_offset);
            self.insert(shifted, region_tag.length, region_tag.tag);
        }
    }

    ///
    /// Move every region by `shift`, regardless of its kind.
    ///
    /// Fails without touching any region if a region would leave the
    /// coordinate range.
    ///
    pub fn shift(&mut self, shift: Shift<I>) -> RegionTagResult<()> {
        let Some(region_tags) = self.region_tags.as_mut() else {
            return Ok(());
        };
        match shift {
            Shift::Forward(delta) => {
                if region_tags
                    .iter()
                    .any(|r| r.end_offset().checked_add(&delta).is_none())
                {
                    return Err(RegionTagError::ShiftOutOfRange(to_u64(delta)));
                }
                region_tags.iter_mut().for_each(|r| r.offset = r.offset + delta);
            }
            Shift::Backward(delta) => {
                if region_tags.iter().any(|r| r.offset < delta) {
                    return Err(RegionTagError::ShiftOutOfRange(to_u64(delta)));
                }
                region_tags.iter_mut().for_each(|r| r.offset = r.offset - delta);
            }
        }
        debug!("shifted {} region tags by {:?}", region_tags.len(), shift.map(to_u64));
        Ok(())
    }

    /// Move all tags out, leaving this set empty and unallocated.
    pub fn take(&mut self) -> Self {
        RegionTagSet {
            region_tags: self.region_tags.take(),
            options: self.options.clone(),
        }
    }
}

impl<I> Shift<I> {
    pub fn map<U, F>(self, f: F) -> Shift<U>
    where
        F: FnOnce(I) -> U,
    {
        match self {
            Shift::Forward(delta) => Shift::Forward(f(delta)),
            Shift::Backward(delta) => Shift::Backward(f(delta)),
        }
    }
}

/// An iterator over the tags of a [`RegionTagSet`] that intersect a query
/// range, yielding the clipped `(offset, length, tag)` of each.
///
/// This struct is created by [`RegionTagSet::intersecting`].
pub struct Intersecting<'a, I>
where
    I: PrimInt + Unsigned,
{
    inner: std::slice::Iter<'a, RegionTag<I, Box<dyn Tag>>>,
    offset: I,
    length: I,
}

impl<'a, I> Iterator for Intersecting<'a, I>
where
    I: PrimInt + Unsigned,
{
    type Item = (I, I, &'a dyn Tag);

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.offset + self.length;
        for region_tag in self.inner.by_ref() {
            if region_tag.start_offset() >= end {
                // sorted by offset: nothing further can intersect
                break;
            }
            if let Some((o, l)) = region_tag.clip(self.offset, self.length) {
                return Some((o, l, region_tag.as_tag()));
            }
        }
        None
    }
}

impl<'a, I> IntoIterator for &'a RegionTagSet<I>
where
    I: PrimInt + Unsigned,
{
    type Item = &'a RegionTag<I, Box<dyn Tag>>;
    type IntoIter = std::slice::Iter<'a, RegionTag<I, Box<dyn Tag>>>;

    fn into_iter(self) -> std::slice::Iter<'a, RegionTag<I, Box<dyn Tag>>> {
        self.iter()
    }
}

impl<I> Debug for Intersecting<'_, I>
where
    I: PrimInt + Unsigned,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Intersecting")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Marker(&'static str);

    fn markers(tags: &RegionTagSet<u16>) -> Vec<(u16, u16, &'static str)> {
        tags.iter()
            .filter_map(|r| r.as_tag().downcast_ref::<Marker>().map(|m| (r.offset, r.length, m.0)))
            .collect()
    }

    #[fixture]
    fn abc() -> RegionTagSet<u16> {
        let mut tags = RegionTagSet::new();
        tags.insert(10, 5, Box::new(Marker("b")));
        tags.insert(0, 5, Box::new(Marker("a")));
        tags.insert(20, 5, Box::new(Marker("c")));
        tags
    }

    #[rstest]
    fn test_new_is_unallocated() {
        let tags: RegionTagSet<u16> = RegionTagSet::new();
        assert!(!tags.is_allocated());
        assert_eq!(tags.len(), 0);
        assert_eq!(tags.iter().count(), 0);
    }

    #[rstest]
    fn test_insert_keeps_offset_order(abc: RegionTagSet<u16>) {
        assert_eq!(markers(&abc), vec![(0, 5, "a"), (10, 5, "b"), (20, 5, "c")]);
    }

    #[rstest]
    fn test_insert_after_equal_offsets(mut abc: RegionTagSet<u16>) {
        let index = abc.insert(10, 1, Box::new(Marker("b2")));
        assert_eq!(index, 2);
        assert_eq!(abc.region_tag_at(2).unwrap().length, 1);
    }

    #[rstest]
    #[case(0, 30, 3)]
    #[case(4, 7, 2)]
    #[case(5, 5, 0)]
    #[case(24, 100, 1)]
    fn test_intersecting_count(abc: RegionTagSet<u16>, #[case] offset: u16, #[case] length: u16, #[case] expected: usize) {
        assert_eq!(abc.intersecting(offset, length).count(), expected);
    }

    #[rstest]
    fn test_clear_spanning_several(mut abc: RegionTagSet<u16>) {
        abc.clear(3, 20);
        assert_eq!(markers(&abc), vec![(0, 3, "a"), (23, 2, "c")]);
    }

    #[rstest]
    fn test_shift_backward(mut abc: RegionTagSet<u16>) {
        abc.shift(Shift::Backward(0)).unwrap();
        assert!(abc.shift(Shift::Backward(1)).is_err());
        abc.clear(0, 5);
        abc.shift(Shift::Backward(10)).unwrap();
        assert_eq!(markers(&abc), vec![(0, 5, "b"), (10, 5, "c")]);
    }
}
