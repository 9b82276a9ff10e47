use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use indexmap::IndexSet;
use serde::Serialize;
use thiserror::Error;

/// A dense position in one axis of the interaction matrix
pub trait DenseIndex: Copy + Eq + Hash + Ord + fmt::Debug {
    fn from_position(position: usize) -> Self;
    fn position(self) -> usize;
}

/// Row of the interaction matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CustomerIx(pub usize);

/// Column of the interaction matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MaterialIx(pub usize);

impl DenseIndex for CustomerIx {
    fn from_position(position: usize) -> Self {
        Self(position)
    }

    fn position(self) -> usize {
        self.0
    }
}

impl DenseIndex for MaterialIx {
    fn from_position(position: usize) -> Self {
        Self(position)
    }

    fn position(self) -> usize {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("duplicate id `{0}` in index")]
pub struct DuplicateId(pub String);

/// Bijection between external ids and dense matrix positions.
///
/// Positions follow the order ids were supplied in, which must match the
/// order the model and matrices were built with.
#[derive(Debug, Clone)]
pub struct IdIndex<I> {
    ids: IndexSet<String>,
    _axis: PhantomData<I>,
}

impl<I: DenseIndex> IdIndex<I> {
    pub fn from_ids<T>(ids: T) -> Result<Self, DuplicateId>
    where
        T: IntoIterator<Item = String>,
    {
        let mut set = IndexSet::new();
        for id in ids {
            if let (_, false) = set.insert_full(id.clone()) {
                return Err(DuplicateId(id));
            }
        }
        Ok(Self {
            ids: set,
            _axis: PhantomData,
        })
    }

    pub fn get(&self, id: &str) -> Option<I> {
        self.ids.get_index_of(id).map(I::from_position)
    }

    pub fn id(&self, ix: I) -> Option<&str> {
        self.ids.get_index(ix.position()).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolves every id, or returns the ids that have no position
    pub fn resolve_all<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<I>, Vec<String>> {
        let mut resolved = Vec::with_capacity(ids.len());
        let mut missing = Vec::new();
        for id in ids {
            match self.get(id.as_ref()) {
                Some(ix) => resolved.push(ix),
                None => missing.push(id.as_ref().to_string()),
            }
        }
        if missing.is_empty() {
            Ok(resolved)
        } else {
            Err(missing)
        }
    }
}
