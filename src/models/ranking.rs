use serde::Serialize;

use super::{CustomerRow, MaterialRow};

/// An item paired with the score it was ranked by
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scored<T> {
    pub item: T,
    pub score: f32,
}

impl<T> Scored<T> {
    pub fn new(item: T, score: f32) -> Self {
        Self { item, score }
    }

    /// Keeps the score, replaces the item
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Scored<U> {
        Scored {
            item: f(self.item),
            score: self.score,
        }
    }
}

/// A row that can be rendered as a table line, in header order
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<&str>;
}

impl TableRow for MaterialRow {
    const HEADERS: &'static [&'static str] = &["Material", "Description"];

    fn cells(&self) -> Vec<&str> {
        vec![self.material.as_str(), self.description.as_str()]
    }
}

impl TableRow for CustomerRow {
    const HEADERS: &'static [&'static str] = &["Customer", "Name", "Country"];

    fn cells(&self) -> Vec<&str> {
        vec![self.soldto.as_str(), self.name.as_str(), self.country.as_str()]
    }
}

/// The kind of ranking a view produced, which names its export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Recommendations,
    SimilarMaterials,
    NewCustomer,
    TargetCustomer,
}

impl ResultKind {
    pub fn sheet_name(self) -> &'static str {
        match self {
            ResultKind::Recommendations | ResultKind::SimilarMaterials => "Recommendations",
            ResultKind::NewCustomer => "New_Customer",
            ResultKind::TargetCustomer => "Target_Customer",
        }
    }

    fn file_stem(self) -> &'static str {
        match self {
            ResultKind::Recommendations => "recommendations",
            ResultKind::SimilarMaterials => "similar-materials",
            ResultKind::NewCustomer => "new-customer",
            ResultKind::TargetCustomer => "target-customer",
        }
    }

    /// Download filename, parameterized by the ids the query was made for
    pub fn file_name<S: AsRef<str>>(self, ids: &[S]) -> String {
        let ids: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
        if ids.is_empty() {
            format!("{}.xlsx", self.file_stem())
        } else {
            format!("{}-{}.xlsx", self.file_stem(), ids.join("_"))
        }
    }
}
