//! Repository layer: in-memory storage

pub mod books;

pub use books::BookStore;

/// Main repository struct holding every store.
///
/// Built once at startup. Clones share the same underlying collections.
#[derive(Clone, Default)]
pub struct Repository {
    pub books: BookStore,
}

impl Repository {
    /// Create a repository with empty stores
    pub fn new() -> Self {
        Self {
            books: BookStore::new(),
        }
    }
}
