//! Paginated read cursor.
//!
//! Streams the result set of a parameterized query as fixed-size pages so
//! arbitrarily large inputs never sit in memory at once. A producer task
//! fetches one page at a time and hands rows to the consumer through a
//! bounded channel; the channel closing is the one and only exhaustion
//! signal, so the consumer can never observe a stale "done" flag.

use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A two-column result row.
pub type RowPair = (String, String);

/// Lazily-produced sequence of two-column rows, fetched in pages.
///
/// Pages are strictly sequential: the query runs with `LIMIT ?1 OFFSET ?2`,
/// the offset advances by one page size per fetch, and a short page ends
/// production without issuing a further page. Any query error aborts the
/// cursor and surfaces through [`PagedCursor::finish`].
pub struct PagedCursor {
    rows: mpsc::Receiver<RowPair>,
    producer: JoinHandle<Result<u64, rusqlite::Error>>,
}

impl PagedCursor {
    /// Spawns the producer task for `query`.
    ///
    /// `query` must accept the page size as `?1` and the offset as `?2`
    /// (a trailing `LIMIT ?1 OFFSET ?2`), and must carry a deterministic
    /// `ORDER BY` for the paging to be stable. The hand-off channel is
    /// bounded at one page.
    ///
    /// Cancellation is honored at page boundaries: a cancelled cursor stops
    /// fetching, closes its channel and reports the rows delivered so far.
    pub fn spawn(
        conn: Arc<Mutex<Connection>>,
        query: String,
        page_size: usize,
        cancel: CancellationToken,
    ) -> Self {
        let page_size = page_size.max(1);
        let (tx, rows) = mpsc::channel(page_size);
        let producer = tokio::spawn(produce_pages(conn, query, page_size, tx, cancel));
        Self { rows, producer }
    }

    /// Receives the next row, or `None` once the producer has finished and
    /// every row has been drained.
    pub async fn next_row(&mut self) -> Option<RowPair> {
        self.rows.recv().await
    }

    /// Awaits producer termination and returns the number of rows produced.
    ///
    /// A query execution error during any page fetch is fatal to the whole
    /// cursor and is returned here; there is no partial-result contract.
    pub async fn finish(self) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        drop(self.rows);
        match self.producer.await {
            Ok(result) => result.map_err(Into::into),
            Err(join_error) => Err(join_error.into()),
        }
    }
}

async fn produce_pages(
    conn: Arc<Mutex<Connection>>,
    query: String,
    page_size: usize,
    tx: mpsc::Sender<RowPair>,
    cancel: CancellationToken,
) -> Result<u64, rusqlite::Error> {
    let mut offset: u64 = 0;
    let mut produced: u64 = 0;

    loop {
        if cancel.is_cancelled() {
            break;
        }

        let page = fetch_page(&conn, &query, page_size, offset)?;
        offset += page_size as u64;

        let fetched = page.len();
        for row in page {
            if tx.send(row).await.is_err() {
                // Consumer dropped its receiver; no one left to deliver to.
                return Ok(produced);
            }
            produced += 1;
        }

        if fetched < page_size {
            break;
        }
    }

    Ok(produced)
}

/// Fetches one page while holding the connection lock; the lock is released
/// before any row is sent downstream.
fn fetch_page(
    conn: &Arc<Mutex<Connection>>,
    query: &str,
    page_size: usize,
    offset: u64,
) -> Result<Vec<RowPair>, rusqlite::Error> {
    let conn = conn.lock().unwrap();
    let mut stmt = conn.prepare_cached(query)?;
    let mut rows = stmt.query(rusqlite::params![page_size as i64, offset as i64])?;

    let mut page = Vec::with_capacity(page_size);
    while let Some(row) = rows.next()? {
        page.push((row.get(0)?, row.get(1)?));
    }
    Ok(page)
}
