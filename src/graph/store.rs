//! Store operations over the persisted graph tables.
//!
//! `SocialGraph` wraps the shared connection and exposes the lookups the
//! query engine needs. Every dynamic id set binds through `?` placeholders
//! (`sql_placeholders` + `params_from_iter`); id lists are never joined
//! into the statement text. The edge relation is stored directionally
//! (`FROM < TO`) and queried symmetrically.

use crate::utilities::sql_placeholders;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Handle to the persisted collaboration graph.
///
/// Cheap to share (`Arc` it for the server); one request's lookups run
/// sequentially on the single guarded connection and no lock is held
/// across an await point.
pub struct SocialGraph {
    conn: Arc<Mutex<Connection>>,
}

impl SocialGraph {
    /// Opens the graph database at `path`, creating the schema if needed.
    pub fn open(path: &Path) -> Result<Self, rusqlite::Error> {
        Ok(Self::from_connection(crate::db::client::open_graph_db(
            path,
        )?))
    }

    /// Wraps an already-opened connection. Used by tests with in-memory
    /// databases.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Resolves a public id to its internal id, or `None` when the person
    /// is not in the graph.
    pub fn lookup_node(&self, public_id: &str) -> Result<Option<i64>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached("SELECT ID FROM NODES WHERE PERSON_ID = ?1")?;
        stmt.query_row(params![public_id], |row| row.get(0))
            .optional()
    }

    /// Internal ids adjacent to `internal_id`, from either edge direction.
    pub fn neighbors(&self, internal_id: i64) -> Result<Vec<i64>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            r#"SELECT "TO" FROM EDGES WHERE "FROM" = ?1
               UNION
               SELECT "FROM" FROM EDGES WHERE "TO" = ?1"#,
        )?;
        let rows = stmt.query_map(params![internal_id], |row| row.get(0))?;
        rows.collect()
    }

    /// Bulk reverse lookup: internal id → public id for every id in `ids`
    /// that exists. One call per response, not one per node.
    pub fn resolve_public_ids(&self, ids: &[i64]) -> Result<HashMap<i64, String>, rusqlite::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT ID, PERSON_ID FROM NODES WHERE ID IN ({})",
            sql_placeholders(ids.len())
        );
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?;
        rows.collect()
    }

    /// All stored edges whose both endpoints are in `ids`, as
    /// `(from, to, weight)` triples. Accepts arbitrary set cardinality.
    pub fn edges_induced(&self, ids: &[i64]) -> Result<Vec<(i64, i64, i64)>, rusqlite::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = sql_placeholders(ids.len());
        let sql = format!(
            r#"SELECT "FROM", "TO", WEIGHT FROM EDGES
               WHERE "FROM" IN ({placeholders}) AND "TO" IN ({placeholders})"#
        );
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter().chain(ids.iter())), |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?;
        rows.collect()
    }

    pub fn node_count(&self) -> Result<i64, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM NODES", [], |row| row.get(0))
    }

    pub fn edge_count(&self) -> Result<i64, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM EDGES", [], |row| row.get(0))
    }
}
