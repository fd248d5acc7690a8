//! Graph database schema definition.
//!
//! The persisted model is two tables:
//! - **NODES**: one row per person; `ID` is the dense internal identifier
//!   (SQLite rowid), `PERSON_ID` the stable public identifier.
//! - **EDGES**: one row per unordered collaboration pair, stored with
//!   `"FROM" < "TO"`, weighted by the accumulated collaboration count.
//!
//! `FROM` and `TO` are SQL keywords, so every statement touching EDGES
//! quotes them.

use rusqlite::Connection;

/// Table holding one row per person.
pub const NODES_TABLE: &str = "NODES";

/// Table holding one row per unordered collaboration pair.
pub const EDGES_TABLE: &str = "EDGES";

/// Insertable columns of `NODES` (`ID` is assigned by the store).
pub const NODE_COLUMNS: [&str; 1] = ["PERSON_ID"];

/// Insertable columns of `EDGES`.
pub const EDGE_COLUMNS: [&str; 3] = ["FROM", "TO", "WEIGHT"];

const CREATE_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS NODES (
    ID INTEGER PRIMARY KEY,
    PERSON_ID TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS EDGES (
    "FROM" INTEGER NOT NULL,
    "TO" INTEGER NOT NULL,
    WEIGHT INTEGER NOT NULL,
    UNIQUE ("FROM", "TO")
);
CREATE INDEX IF NOT EXISTS EDGES_FROM ON EDGES ("FROM");
CREATE INDEX IF NOT EXISTS EDGES_TO ON EDGES ("TO");
"#;

/// Creates the graph tables and indexes if they do not exist yet.
pub fn create_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(CREATE_SCHEMA_SQL)
}

/// Drops and recreates the graph tables.
///
/// A build is a rebuild: it starts from empty tables and accumulates edge
/// weights within the run, so a rerun cannot double-count collaborations.
pub fn reset_graph(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r#"
DROP TABLE IF EXISTS EDGES;
DROP TABLE IF EXISTS NODES;
"#,
    )?;
    create_schema(conn)
}
