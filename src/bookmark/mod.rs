//! Bookmarks Module
//!
//! CRUD over a single `bookmarks` table: the storage gateway, request body
//! validation, and the HTTP handlers and routes that tie them together.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookmarks::bookmark;
//!
//! let app = Router::new()
//!     .merge(bookmark::routes())
//!     .with_state(app_state);
//!
//! // Or use the store directly
//! let store = bookmark::BookmarkStore::new(db.connection());
//! let all = store.list_all().await?;
//! ```

mod handler;
mod payload;
mod routes;
mod store;

pub use routes::routes;
pub use store::BookmarkStore;

/// Returns the schema migrations for the bookmarks table.
pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "bookmarks_001_schema.sql",
        include_str!("migrations/001_schema.sql"),
    )]
}
