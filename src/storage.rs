use crate::api::models::Conversation;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no data directory available")]
    NoDataDir,
    #[error("cache io: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache db: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("cache encode: {0}")]
    Encode(#[from] serde_json::Error),
}

pub fn db_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("com", "introbook", "IntroBook")?;
    Some(proj.data_dir().join("cache.sqlite"))
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Local cache of the conversation list and of events hidden from the home screen.
pub struct Cache {
    conn: Connection,
}

impl Cache {
    /// Opens the cache in the platform data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        let path = db_path().ok_or(StorageError::NoDataDir)?;
        Self::open(&path)
    }

    pub fn open(path: &Path) -> Result<Self, StorageError> {
        ensure_dir(path)?;
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            CREATE TABLE IF NOT EXISTS conversations (
                partner_id INTEGER PRIMARY KEY,
                position INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                raw_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS dismissed_events (
                event_id INTEGER PRIMARY KEY,
                dismissed_at INTEGER NOT NULL
            );
            "#,
        )?;
        Ok(Self { conn })
    }

    /// Replaces the cached conversation list, keeping the server's order.
    pub fn store_conversations(&mut self, list: &[Conversation]) -> Result<(), StorageError> {
        let now = now_secs();
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM conversations", [])?;
        for (idx, c) in list.iter().enumerate() {
            let raw = serde_json::to_string(c)?;
            tx.execute(
                r#"
                INSERT INTO conversations (partner_id, position, updated_at, raw_json)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(partner_id) DO UPDATE SET
                    position=excluded.position,
                    updated_at=excluded.updated_at,
                    raw_json=excluded.raw_json
                "#,
                params![c.partner.id, idx as i64, now, raw],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn conversations(&self) -> Result<Vec<Conversation>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT raw_json FROM conversations ORDER BY position ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for raw in rows {
            match serde_json::from_str(&raw?) {
                Ok(c) => out.push(c),
                Err(e) => log::debug!("skipping unreadable cached conversation: {}", e),
            }
        }
        Ok(out)
    }

    pub fn conversations_updated_at(&self) -> Result<Option<i64>, StorageError> {
        let ts = self
            .conn
            .query_row("SELECT MAX(updated_at) FROM conversations", [], |row| row.get::<_, Option<i64>>(0))
            .optional()?;
        Ok(ts.flatten())
    }

    pub fn dismiss_event(&self, event_id: i64) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO dismissed_events (event_id, dismissed_at) VALUES (?1, ?2)",
            params![event_id, now_secs()],
        )?;
        Ok(())
    }

    pub fn dismissed_events(&self) -> Result<HashSet<i64>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT event_id FROM dismissed_events")?;
        let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
        Ok(rows.collect::<Result<HashSet<_>, _>>()?)
    }

    /// Drops everything cached for the previous session.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.conn.execute_batch("DELETE FROM conversations; DELETE FROM dismissed_events;")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{ConversationPartner, LatestMessage};

    fn conv(id: i64, name: &str) -> Conversation {
        Conversation {
            partner: ConversationPartner { id, name: name.into(), avatar: None },
            unread_count: id as u32,
            latest_message: LatestMessage { message: "hi".into(), created_at: String::new(), is_sender: false },
        }
    }

    #[test]
    fn conversations_round_trip_in_order() {
        let mut cache = Cache::open_in_memory().unwrap();
        assert!(cache.conversations().unwrap().is_empty());
        assert_eq!(cache.conversations_updated_at().unwrap(), None);

        cache.store_conversations(&[conv(9, "Shah"), conv(2, "Patel")]).unwrap();
        let names: Vec<String> = cache.conversations().unwrap().into_iter().map(|c| c.partner.name).collect();
        assert_eq!(names, vec!["Shah", "Patel"]);
        assert!(cache.conversations_updated_at().unwrap().is_some());

        cache.store_conversations(&[conv(2, "Patel")]).unwrap();
        assert_eq!(cache.conversations().unwrap().len(), 1);
    }

    #[test]
    fn dismissed_events_persist_until_cleared() {
        let cache = Cache::open_in_memory().unwrap();
        cache.dismiss_event(4).unwrap();
        cache.dismiss_event(4).unwrap();
        cache.dismiss_event(7).unwrap();
        assert_eq!(cache.dismissed_events().unwrap(), [4, 7].into_iter().collect());
        cache.clear().unwrap();
        assert!(cache.dismissed_events().unwrap().is_empty());
    }

    #[test]
    fn opens_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cache.sqlite");
        {
            let cache = Cache::open(&path).unwrap();
            cache.dismiss_event(1).unwrap();
        }
        let cache = Cache::open(&path).unwrap();
        assert!(cache.dismissed_events().unwrap().contains(&1));
    }
}
