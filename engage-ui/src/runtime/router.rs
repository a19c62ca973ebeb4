use std::collections::BTreeMap;

use crate::document::Document;

use super::Page;

type PageFactory = Box<dyn Fn(&Document) -> Box<dyn Page>>;

/// Literal path to page table.
#[derive(Default)]
pub struct Router {
    routes: BTreeMap<String, PageFactory>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route<F, P>(mut self, path: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Document) -> P + 'static,
        P: Page + 'static,
    {
        self.routes.insert(
            path.into(),
            Box::new(move |document| Box::new(factory(document)) as Box<dyn Page>),
        );
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// A fresh page for `path`, `None` when nothing is registered.
    pub fn build(&self, path: &str, document: &Document) -> Option<Box<dyn Page>> {
        self.routes.get(path).map(|factory| factory(document))
    }
}
