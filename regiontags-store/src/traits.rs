use num_traits::{PrimInt, Unsigned};

use regiontags_core::models::{RegionTag, Tag};
use regiontags_core::RegionTagResult;

use crate::RegionTagSet;

///
/// Content that owns a [`RegionTagSet`] addressing its own coordinates.
///
/// Implementors only provide access to the set; the tag operations come for
/// free. The implementor stays responsible for keeping the set in step with
/// its content: shifting it when content is prepended or trimmed at the front,
/// clearing ranges it drops, and copying tags along with copied content.
///
pub trait RegionTagged<I>
where
    I: PrimInt + Unsigned + 'static,
{
    fn region_tags(&self) -> &RegionTagSet<I>;

    fn region_tags_mut(&mut self) -> &mut RegionTagSet<I>;

    fn num_region_tags(&self) -> usize {
        self.region_tags().len()
    }

    fn find_tag<T: Tag>(&mut self, offset: I, length: I) -> RegionTagResult<Option<&T>> {
        self.region_tags_mut().find::<T>(offset, length)
    }

    fn get_tag<T: Tag>(&mut self, offset: I, length: I) -> RegionTagResult<&T> {
        self.region_tags_mut().get::<T>(offset, length)
    }

    fn add_tag<T: Tag + Default>(&mut self, offset: I, length: I) -> RegionTagResult<&mut T> {
        self.region_tags_mut().add::<T>(offset, length)
    }

    fn add_tag_if_absent<T: Tag + Default>(&mut self, offset: I, length: I) -> RegionTagResult<&mut T> {
        self.region_tags_mut().add_if_absent::<T>(offset, length)
    }

    fn add_tags_where_absent<T: Tag + Clone + Default>(&mut self, offset: I, length: I) -> Vec<RegionTag<I, T>> {
        self.region_tags_mut().add_where_absent::<T>(offset, length)
    }

    fn remove_tag<T: Tag>(&mut self, offset: I, length: I) -> RegionTagResult<T> {
        self.region_tags_mut().remove::<T>(offset, length)
    }

    fn remove_tag_if_present<T: Tag>(&mut self, offset: I, length: I) -> RegionTagResult<Option<T>> {
        self.region_tags_mut().remove_if_present::<T>(offset, length)
    }

    fn remove_tags_where_present<T: Tag + Clone>(&mut self, offset: I, length: I) -> Vec<RegionTag<I, T>> {
        self.region_tags_mut().remove_all_present::<T>(offset, length)
    }

    fn all_tags<T: Tag + Clone>(&self, offset: I, length: I) -> Vec<RegionTag<I, T>> {
        self.region_tags().tags::<T>(offset, length)
    }

    fn map_all_tags<T, F>(&self, offset: I, length: I, f: F)
    where
        T: Tag,
        F: FnMut(I, I, &T),
    {
        self.region_tags().for_each_tag::<T, F>(offset, length, f)
    }

    fn map_all_tags_mut<T, F>(&mut self, offset: I, length: I, f: F)
    where
        T: Tag,
        F: FnMut(I, I, &mut T),
    {
        self.region_tags_mut().for_each_tag_mut::<T, F>(offset, length, f)
    }
}
