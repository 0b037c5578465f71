//! Output sanitization for free-text bookmark fields.
//!
//! Stored values are kept exactly as submitted; cleaning happens on the way
//! out so that markup saved by an attacker cannot run in a browser that
//! renders the API response.

use crate::model::Bookmark;

/// Removes scripts, event-handler attributes and any tag outside the
/// allow-list. Ampersands come back exactly as written, so query strings and
/// already-escaped text survive. Applying it twice gives the same result as
/// applying it once.
pub fn clean_text(input: &str) -> String {
    // Every `&` is fed to the parser as a literal, which ammonia serializes
    // as `&amp;`; undoing that afterwards restores the input's ampersands
    // without touching the `&lt;`/`&gt;` it emits for stray angle brackets.
    let shielded = input.replace('&', "&amp;");
    ammonia::clean(&shielded).replace("&amp;", "&")
}

pub fn sanitize_bookmark(bookmark: Bookmark) -> Bookmark {
    Bookmark {
        id: bookmark.id,
        title: clean_text(&bookmark.title),
        url: clean_text(&bookmark.url),
        about: clean_text(&bookmark.about),
        rating: bookmark.rating,
    }
}
