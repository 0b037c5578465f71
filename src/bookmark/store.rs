use anyhow::Result;
use libsql::Connection;

use crate::model::{Bookmark, BookmarkChanges, NewBookmark};

/// Single-statement access to the `bookmarks` table.
pub struct BookmarkStore<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<Bookmark>> {
        let query = r#"
            SELECT id, title, url, about, rating
            FROM bookmarks
            ORDER BY id
        "#;

        let mut rows = self.conn.query(query, ()).await?;
        let mut bookmarks = Vec::new();
        while let Some(row) = rows.next().await? {
            bookmarks.push(Self::row_to_bookmark(&row)?);
        }

        Ok(bookmarks)
    }

    pub async fn insert(&self, input: NewBookmark) -> Result<Bookmark> {
        let query = r#"
            INSERT INTO bookmarks (title, url, about, rating)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, url, about, rating
        "#;

        let mut rows = self
            .conn
            .query(query, libsql::params![input.title, input.url, input.about, input.rating])
            .await?;

        match rows.next().await? {
            Some(row) => Self::row_to_bookmark(&row),
            None => anyhow::bail!("insert into bookmarks returned no row"),
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>> {
        let query = r#"
            SELECT id, title, url, about, rating
            FROM bookmarks WHERE id = ?
        "#;

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_bookmark(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<u64> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?", libsql::params![id])
            .await?;
        Ok(affected)
    }

    /// Writes only the columns present in `changes`.
    pub async fn update_by_id(&self, id: i64, changes: BookmarkChanges) -> Result<u64> {
        let mut updates = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        for (column, value) in [
            ("title", changes.title),
            ("url", changes.url),
            ("about", changes.about),
            ("rating", changes.rating),
        ] {
            if let Some(value) = value {
                updates.push(format!("{column} = ?"));
                params.push(value.into());
            }
        }

        if updates.is_empty() {
            return Ok(0);
        }

        params.push(id.into());
        let query = format!("UPDATE bookmarks SET {} WHERE id = ?", updates.join(", "));

        let affected = self.conn.execute(&query, params).await?;
        Ok(affected)
    }

    fn row_to_bookmark(row: &libsql::Row) -> Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            about: row.get(3)?,
            rating: row.get(4)?,
        })
    }
}
