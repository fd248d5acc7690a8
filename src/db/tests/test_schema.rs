use crate::db::schema::{create_schema, reset_graph};
use rusqlite::Connection;

fn mem_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    create_schema(&conn).unwrap();
    conn
}

/// Schema creation is idempotent.
#[test]
fn test_create_schema_twice() {
    let conn = mem_conn();
    create_schema(&conn).unwrap();
}

/// Internal ids are assigned by the store and are dense.
#[test]
fn test_node_ids_assigned_sequentially() {
    let conn = mem_conn();
    conn.execute("INSERT INTO NODES (PERSON_ID) VALUES ('alice')", [])
        .unwrap();
    conn.execute("INSERT INTO NODES (PERSON_ID) VALUES ('bob')", [])
        .unwrap();

    let ids: Vec<i64> = conn
        .prepare("SELECT ID FROM NODES ORDER BY ID")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(ids, vec![1, 2]);
}

/// The public↔internal mapping is enforced unique.
#[test]
fn test_person_id_unique_constraint() {
    let conn = mem_conn();
    conn.execute("INSERT INTO NODES (PERSON_ID) VALUES ('alice')", [])
        .unwrap();

    let duplicate = conn.execute("INSERT INTO NODES (PERSON_ID) VALUES ('alice')", []);
    assert!(duplicate.is_err());
}

/// At most one stored edge per ordered pair; the build job additionally
/// stores only the FROM < TO orientation.
#[test]
fn test_edge_pair_unique_constraint() {
    let conn = mem_conn();
    conn.execute(r#"INSERT INTO EDGES ("FROM", "TO", WEIGHT) VALUES (1, 2, 1)"#, [])
        .unwrap();

    let duplicate = conn.execute(r#"INSERT INTO EDGES ("FROM", "TO", WEIGHT) VALUES (1, 2, 3)"#, []);
    assert!(duplicate.is_err());
}

/// Resetting drops all graph content but leaves a usable schema.
#[test]
fn test_reset_graph_clears_tables() {
    let conn = mem_conn();
    conn.execute("INSERT INTO NODES (PERSON_ID) VALUES ('alice')", [])
        .unwrap();
    conn.execute(r#"INSERT INTO EDGES ("FROM", "TO", WEIGHT) VALUES (1, 1, 1)"#, [])
        .unwrap();

    reset_graph(&conn).unwrap();

    let nodes: i64 = conn
        .query_row("SELECT COUNT(*) FROM NODES", [], |row| row.get(0))
        .unwrap();
    let edges: i64 = conn
        .query_row("SELECT COUNT(*) FROM EDGES", [], |row| row.get(0))
        .unwrap();
    assert_eq!((nodes, edges), (0, 0));

    conn.execute("INSERT INTO NODES (PERSON_ID) VALUES ('bob')", [])
        .unwrap();
}
