//! Book management service

use chrono::Utc;
use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload, BookQuery, BookSummary, PayloadRule},
    repository::Repository,
};

/// URL-safe alphabet used for book ids
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

pub const BOOK_ID_LENGTH: usize = 16;

/// Generate a random book id of [`BOOK_ID_LENGTH`] characters
pub fn generate_book_id() -> String {
    let mut rng = rand::thread_rng();
    (0..BOOK_ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a book and return its id
    pub async fn create(&self, payload: BookPayload) -> AppResult<String> {
        payload.check().map_err(|rule| rejected("Failed to add book", rule))?;

        let mut book = Book::new(generate_book_id(), payload, Utc::now());
        let id = loop {
            let id = book.id.clone();
            match self.repository.books.insert(book).await {
                Ok(()) => break id,
                Err(taken) => {
                    tracing::warn!("Book id collision on {}, regenerating", id);
                    book = taken;
                    book.id = generate_book_id();
                }
            }
        };

        if !self.repository.books.contains(&id).await {
            return Err(AppError::Internal("Failed to add book".to_string()));
        }

        tracing::info!("Book created: id={}", id);
        Ok(id)
    }

    /// List book projections matching every supplied filter
    pub async fn list(&self, query: &BookQuery) -> Vec<BookSummary> {
        let books = self.repository.books.list(query).await;
        tracing::debug!("Book list: {} match(es) for {:?}", books.len(), query);
        books
    }

    /// Get the full book record
    pub async fn get(&self, id: &str) -> AppResult<Book> {
        tracing::debug!("Book lookup: id={}", id);
        self.repository
            .books
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Replace every mutable field of an existing book.
    ///
    /// `payload` may carry the body's extraction error: an unknown id is
    /// reported before it, and before any payload rule.
    pub async fn update(&self, id: &str, payload: AppResult<BookPayload>) -> AppResult<()> {
        let outcome = self
            .repository
            .books
            .update(id, |book| -> AppResult<()> {
                let payload = payload?;
                payload
                    .check()
                    .map_err(|rule| rejected("Failed to update book", rule))?;
                book.apply(payload, Utc::now());
                Ok(())
            })
            .await;

        match outcome {
            None => Err(AppError::NotFound(
                "Failed to update book. Id not found".to_string(),
            )),
            Some(Err(err)) => Err(err),
            Some(Ok(())) => {
                tracing::info!("Book updated: id={}", id);
                Ok(())
            }
        }
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository
            .books
            .remove(id)
            .await
            .ok_or_else(|| AppError::NotFound("Failed to delete book. Id not found".to_string()))?;

        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }

    /// Number of stored books (for readiness)
    pub async fn count(&self) -> usize {
        self.repository.books.len().await
    }
}

fn rejected(action: &str, rule: PayloadRule) -> AppError {
    AppError::Validation(format!("{}. {}", action, rule))
}
