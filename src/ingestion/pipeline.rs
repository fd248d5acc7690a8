//! Graph build orchestration.
//!
//! Runs the batch job that turns the configured collaboration pair stream
//! into the persisted graph, in two phases over the same stream:
//!
//! 1. **Node phase**: pairs ordered by first author flow through the
//!    aggregator; each emitted adjacency contributes one NODES row, so the
//!    store assigns every collaborating author a dense internal id.
//! 2. **Edge phase**: the pair stream joined twice against NODES yields
//!    internal-id pairs; the aggregator's counts become edge weights, and
//!    each unordered pair is written once (the `from < to` orientation).
//!
//! Both phases wrap the configured query with their own `ORDER BY`, which
//! keeps LIMIT/OFFSET paging stable and guarantees the aggregator's
//! grouping precondition. There is no cross-phase transaction: a build
//! that fails midway leaves partial tables behind, and the next build
//! resets them.

use crate::config::IngestionConfig;
use crate::db::batch_writer::BatchWriter;
use crate::db::cursor::PagedCursor;
use crate::db::schema::{self, EDGE_COLUMNS, EDGES_TABLE, NODE_COLUMNS, NODES_TABLE};
use crate::ingestion::aggregator::{count_collaborations, AuthorAdjacency, CollaborationPair};
use crate::logger;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a completed build.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub nodes_written: u64,
    pub edges_written: u64,
}

/// Runs the full two-phase build against an opened (and, if needed,
/// source-attached) connection.
///
/// The graph tables are reset first: a build is a rebuild from the pair
/// stream, never an in-place mutation. Writer completion is awaited at the
/// end of each phase, so no partial batch can be lost to early exit. Any
/// paging or insertion error aborts the job. A cancelled token makes the
/// job stop at the next page/batch boundary and fail with a distinct
/// error.
pub async fn build_graph(
    conn: Arc<Mutex<Connection>>,
    options: &IngestionConfig,
    cancel: CancellationToken,
) -> Result<BuildSummary, BoxError> {
    {
        let conn = conn.lock().unwrap();
        schema::reset_graph(&conn)?;
    }

    logger::info("Starting node phase");
    let nodes_written = run_node_phase(&conn, options, &cancel).await?;
    if cancel.is_cancelled() {
        return Err("graph build cancelled".into());
    }
    logger::info(&format!("Node phase complete: {} authors", nodes_written));

    logger::info("Starting edge phase");
    let edges_written = run_edge_phase(&conn, options, &cancel).await?;
    if cancel.is_cancelled() {
        return Err("graph build cancelled".into());
    }
    logger::info(&format!("Edge phase complete: {} edges", edges_written));

    Ok(BuildSummary {
        nodes_written,
        edges_written,
    })
}

/// Pair stream ordered and paged for the node phase.
fn node_phase_query(pairs_query: &str) -> String {
    format!(
        "SELECT A, B FROM ({}) ORDER BY A, B LIMIT ?1 OFFSET ?2",
        strip_terminator(pairs_query)
    )
}

/// Pair stream resolved to internal ids for the edge phase.
fn edge_phase_query(pairs_query: &str) -> String {
    format!(
        "SELECT CAST(NA.ID AS TEXT), CAST(NB.ID AS TEXT) \
         FROM ({}) AS P \
         JOIN NODES NA ON NA.PERSON_ID = P.A \
         JOIN NODES NB ON NB.PERSON_ID = P.B \
         ORDER BY NA.ID, NB.ID LIMIT ?1 OFFSET ?2",
        strip_terminator(pairs_query)
    )
}

fn strip_terminator(query: &str) -> &str {
    query.trim().trim_end_matches(';')
}

async fn run_node_phase(
    conn: &Arc<Mutex<Connection>>,
    options: &IngestionConfig,
    cancel: &CancellationToken,
) -> Result<u64, BoxError> {
    let cursor = PagedCursor::spawn(
        Arc::clone(conn),
        node_phase_query(&options.pairs_query),
        options.page_size,
        cancel.clone(),
    );
    let writer = BatchWriter::spawn(
        Arc::clone(conn),
        NODES_TABLE,
        &NODE_COLUMNS,
        options.buffer_size,
        cancel.clone(),
    );

    let (mut authors, forwarder, aggregator) = spawn_aggregation(cursor, options.page_size);

    while let Some(author) = authors.recv().await {
        if writer.write(vec![author.id]).await.is_err() {
            break;
        }
    }
    drop(authors);

    forwarder.await??;
    aggregator.await?;
    let report = writer.finish().await?;
    Ok(report.rows)
}

async fn run_edge_phase(
    conn: &Arc<Mutex<Connection>>,
    options: &IngestionConfig,
    cancel: &CancellationToken,
) -> Result<u64, BoxError> {
    let cursor = PagedCursor::spawn(
        Arc::clone(conn),
        edge_phase_query(&options.pairs_query),
        options.page_size,
        cancel.clone(),
    );
    let writer = BatchWriter::spawn(
        Arc::clone(conn),
        EDGES_TABLE,
        &EDGE_COLUMNS,
        options.buffer_size,
        cancel.clone(),
    );

    let (mut authors, forwarder, aggregator) = spawn_aggregation(cursor, options.page_size);

    let mut row_error: Option<BoxError> = None;
    'drain: while let Some(author) = authors.recv().await {
        let rows = match edge_rows(&author) {
            Ok(rows) => rows,
            Err(e) => {
                row_error = Some(e);
                break;
            }
        };
        for row in rows {
            if writer.write(row).await.is_err() {
                break 'drain;
            }
        }
    }
    drop(authors);

    forwarder.await??;
    aggregator.await?;
    let report = writer.finish().await?;

    match row_error {
        Some(e) => Err(e),
        None => Ok(report.rows),
    }
}

/// Connects a cursor to the aggregator: a forwarding task feeds the pair
/// channel and then surfaces the cursor's outcome; the aggregator task
/// closes the adjacency channel when the run is folded.
fn spawn_aggregation(
    mut cursor: PagedCursor,
    channel_capacity: usize,
) -> (
    mpsc::Receiver<AuthorAdjacency>,
    tokio::task::JoinHandle<Result<u64, BoxError>>,
    tokio::task::JoinHandle<()>,
) {
    let (pair_tx, pair_rx) = mpsc::channel(channel_capacity.max(1));
    let (author_tx, author_rx) = mpsc::channel(channel_capacity.max(1));

    let aggregator = tokio::spawn(count_collaborations(pair_rx, author_tx));

    let forwarder = tokio::spawn(async move {
        while let Some((first, second)) = cursor.next_row().await {
            let pair = CollaborationPair {
                first_author: first,
                second_author: second,
            };
            if pair_tx.send(pair).await.is_err() {
                break;
            }
        }
        drop(pair_tx);
        cursor.finish().await
    });

    (author_rx, forwarder, aggregator)
}

/// Flattens one adjacency record into EDGES rows, keeping only the
/// `from < to` orientation so each unordered pair is stored exactly once
/// (the symmetric pair stream delivers the mirror orientation to the other
/// author's run).
fn edge_rows(author: &AuthorAdjacency) -> Result<Vec<Vec<String>>, BoxError> {
    let from: i64 = author
        .id
        .parse()
        .map_err(|_| format!("edge phase produced a non-numeric node id: {:?}", author.id))?;

    let mut rows = Vec::new();
    for (to, weight) in &author.collaborators {
        let to: i64 = to
            .parse()
            .map_err(|_| format!("edge phase produced a non-numeric node id: {:?}", to))?;
        if from < to {
            rows.push(vec![from.to_string(), to.to_string(), weight.to_string()]);
        }
    }
    Ok(rows)
}
