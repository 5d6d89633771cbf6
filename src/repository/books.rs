//! In-memory book store

use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::book::{Book, BookQuery, BookSummary};

#[derive(Default)]
struct Shelf {
    books: IndexMap<String, Book>,
    /// Every id ever accepted, including removed ones
    issued: HashSet<String>,
}

/// Ordered collection of books keyed by id.
///
/// Every method takes the lock exactly once, so a lookup followed by a
/// mutation inside one call cannot interleave with another request.
#[derive(Clone, Default)]
pub struct BookStore {
    shelf: Arc<RwLock<Shelf>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a book. If the id was ever used before, even by a removed book,
    /// the store is left untouched and the book is handed back.
    pub async fn insert(&self, book: Book) -> Result<(), Book> {
        let mut shelf = self.shelf.write().await;
        if !shelf.issued.insert(book.id.clone()) {
            return Err(book);
        }
        shelf.books.insert(book.id.clone(), book);
        Ok(())
    }

    /// Projections of matching books, in insertion order
    pub async fn list(&self, query: &BookQuery) -> Vec<BookSummary> {
        self.shelf
            .read()
            .await
            .books
            .values()
            .filter(|book| query.matches(book))
            .map(BookSummary::from)
            .collect()
    }

    pub async fn get(&self, id: &str) -> Option<Book> {
        self.shelf.read().await.books.get(id).cloned()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.shelf.read().await.books.contains_key(id)
    }

    /// Run `f` on the stored book under the write lock.
    /// Returns `None` when the id is unknown, in which case `f` is not called.
    pub async fn update<F, T>(&self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Book) -> T,
    {
        self.shelf.write().await.books.get_mut(id).map(f)
    }

    /// Remove a book, keeping the order of the others
    pub async fn remove(&self, id: &str) -> Option<Book> {
        self.shelf.write().await.books.shift_remove(id)
    }

    pub async fn len(&self) -> usize {
        self.shelf.read().await.books.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.shelf.read().await.books.is_empty()
    }
}
