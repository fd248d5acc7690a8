use rusqlite::Connection;
use std::path::Path;

/// Open the graph database and make sure its schema exists.
pub fn open_graph_db(path: &Path) -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open(path)?;
    crate::db::schema::create_schema(&conn)?;
    Ok(conn)
}

/// Attach the collaboration source database as schema `src`.
///
/// Skipped when the source and graph databases are the same file; queries
/// then resolve the source tables directly in the main schema.
pub fn attach_source_db(conn: &Connection, path: &Path) -> Result<(), rusqlite::Error> {
    conn.execute(
        "ATTACH DATABASE ?1 AS src",
        [path.to_string_lossy().as_ref()],
    )?;
    Ok(())
}
