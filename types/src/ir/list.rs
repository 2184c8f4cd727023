use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use super::ty::mix;
use super::{RawType, Ty, TypeFlags};

/// Ordered, immutable sequence of terms.
///
/// Used both for type arguments (where order is meaningful) and for bound
/// lists (where it only affects rendering and encoding). The empty list is
/// the "no bounds" / "no parameters" value; there is no absent list.
#[derive(Clone)]
pub struct TypeList {
    items: Arc<[Ty]>,
    flags: TypeFlags,
}

impl TypeList {
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn new(items: impl IntoIterator<Item = Ty>) -> Self {
        let items: Arc<[Ty]> = items.into_iter().collect();
        let flags = items
            .iter()
            .fold(TypeFlags::empty(), |flags, ty| flags | ty.flags());
        Self { items, flags }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Ty> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&Ty> {
        self.items.first()
    }

    /// The single element, or `None` if the list does not hold exactly one.
    pub fn only(&self) -> Option<&Ty> {
        match &*self.items {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ty> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Ty] {
        &self.items
    }

    /// Union of the element flags.
    pub fn flags(&self) -> TypeFlags {
        self.flags
    }

    /// Elements matching `predicate`, in order.
    pub fn filter(&self, mut predicate: impl FnMut(&Ty) -> bool) -> TypeList {
        self.iter().filter(|ty| predicate(ty)).cloned().collect()
    }

    /// Erasure of every element.
    pub fn as_raw_types(&self) -> Vec<RawType> {
        self.iter().map(Ty::as_raw_type).collect()
    }

    pub fn hash_code(&self) -> u64 {
        self.iter().fold(1, |acc, ty| mix(acc, ty.hash_code()))
    }
}

impl Default for TypeList {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for TypeList {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl Eq for TypeList {}

impl std::hash::Hash for TypeList {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl Index<usize> for TypeList {
    type Output = Ty;

    fn index(&self, index: usize) -> &Ty {
        &self.items[index]
    }
}

impl FromIterator<Ty> for TypeList {
    fn from_iter<I: IntoIterator<Item = Ty>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a TypeList {
    type Item = &'a Ty;
    type IntoIter = std::slice::Iter<'a, Ty>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Ty>> for TypeList {
    fn from(items: Vec<Ty>) -> Self {
        Self::new(items)
    }
}

impl<const N: usize> From<[Ty; N]> for TypeList {
    fn from(items: [Ty; N]) -> Self {
        Self::new(items)
    }
}

impl From<Ty> for TypeList {
    fn from(item: Ty) -> Self {
        Self::new([item])
    }
}

impl fmt::Debug for TypeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
