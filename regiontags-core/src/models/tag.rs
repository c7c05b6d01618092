use std::any::{Any, TypeId, type_name};
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};

///
/// Stable discriminant for the concrete type of a tag. Two tags are of the
/// same kind if and only if their concrete types are identical.
///
#[derive(Clone, Copy, Debug)]
pub struct TagKind {
    id: TypeId,
    name: &'static str,
}

impl TagKind {
    pub fn of<T: Any>() -> Self {
        TagKind {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Type name used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TagKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TagKind {}

impl Hash for TagKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Capabilities every region tag payload provides.
///
/// Implemented for any `'static` type that is `Clone + Debug + Default`, so
/// client code only has to derive those traits. Duplication is never implicit:
/// stores call [`Tag::dup`] when a tag crosses into another container or a
/// region is split.
pub trait Tag: Any + Debug + 'static {
    /// Deep copy into a new boxed instance of the identical concrete type.
    fn dup(&self) -> Box<dyn Tag>;

    fn kind(&self) -> TagKind;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> Tag for T
where
    T: Any + Clone + Debug + Default,
{
    fn dup(&self) -> Box<dyn Tag> {
        Box::new(self.clone())
    }

    fn kind(&self) -> TagKind {
        TagKind::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn Tag {
    #[inline]
    pub fn is<T: Tag>(&self) -> bool {
        self.kind() == TagKind::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Tag>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Tag>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Take the concrete tag out of its box, or hand the box back untouched
    /// if the kinds differ.
    pub fn downcast<T: Tag>(self: Box<Self>) -> Result<T, Box<dyn Tag>> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.into_any().downcast::<T>() {
            Ok(tag) => Ok(*tag),
            Err(_) => unreachable!("tag kind was checked before downcasting"),
        }
    }
}
