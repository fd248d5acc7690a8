//! Buffered bulk writer.
//!
//! Accumulates rows destined for one table into a bounded buffer and
//! persists each full buffer as a single parameterized multi-row INSERT.
//! For an input of N rows and a buffer of B this issues exactly ⌈N/B⌉
//! statements: one per full buffer plus one final flush for the partial
//! remainder when the input ends.
//!
//! Values are never embedded in the statement text; every value binds to a
//! `?` placeholder. Table and column names are identifiers supplied by the
//! crate's schema constants.

use crate::utilities::sql_placeholders;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// What a completed writer did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriterReport {
    /// Rows persisted.
    pub rows: u64,
    /// INSERT statements issued.
    pub batches: u64,
}

/// Accepts rows over a channel and persists them in batches.
///
/// Any INSERT failure is fatal to the writer: the consumer task stops, the
/// failed batch's rows are lost, and the error surfaces through
/// [`BatchWriter::finish`]. There is no retry.
pub struct BatchWriter {
    rows: mpsc::Sender<Vec<String>>,
    consumer: JoinHandle<Result<WriterReport, rusqlite::Error>>,
}

impl BatchWriter {
    /// Spawns the consuming task for one table and column list.
    ///
    /// `capacity` is the buffer size B. Cancellation is honored at batch
    /// boundaries; a cancelled writer stops consuming and does not flush
    /// its partial buffer (a cancelled build has no partial-success
    /// contract).
    pub fn spawn(
        conn: Arc<Mutex<Connection>>,
        table: &str,
        columns: &[&str],
        capacity: usize,
        cancel: CancellationToken,
    ) -> Self {
        let capacity = capacity.max(1);
        let (rows, rx) = mpsc::channel(capacity);
        let table = table.to_string();
        let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        let consumer = tokio::spawn(consume_rows(conn, table, columns, capacity, rx, cancel));
        Self { rows, consumer }
    }

    /// Queues one row for insertion.
    ///
    /// Fails only once the consuming task has stopped (fatal INSERT error
    /// or cancellation); await [`BatchWriter::finish`] for the cause.
    pub async fn write(&self, row: Vec<String>) -> Result<(), mpsc::error::SendError<Vec<String>>> {
        self.rows.send(row).await
    }

    /// Signals end of input, awaits the final flush and returns the report.
    ///
    /// This is the completion barrier: a caller must await it before
    /// considering the ingestion finished, or a final partial batch could
    /// be lost to early process exit.
    pub async fn finish(self) -> Result<WriterReport, Box<dyn std::error::Error + Send + Sync>> {
        drop(self.rows);
        match self.consumer.await {
            Ok(result) => result.map_err(Into::into),
            Err(join_error) => Err(join_error.into()),
        }
    }
}

async fn consume_rows(
    conn: Arc<Mutex<Connection>>,
    table: String,
    columns: Vec<String>,
    capacity: usize,
    mut rx: mpsc::Receiver<Vec<String>>,
    cancel: CancellationToken,
) -> Result<WriterReport, rusqlite::Error> {
    let mut buffer: Vec<Vec<String>> = Vec::with_capacity(capacity);
    let mut report = WriterReport::default();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                return Ok(report);
            }
            row = rx.recv() => match row {
                Some(row) => {
                    buffer.push(row);
                    if buffer.len() >= capacity {
                        flush(&conn, &table, &columns, &buffer)?;
                        report.rows += buffer.len() as u64;
                        report.batches += 1;
                        buffer.clear();
                    }
                }
                None => break,
            }
        }
    }

    if !buffer.is_empty() {
        flush(&conn, &table, &columns, &buffer)?;
        report.rows += buffer.len() as u64;
        report.batches += 1;
    }

    Ok(report)
}

/// Issues one multi-row INSERT for the buffered rows.
fn flush(
    conn: &Arc<Mutex<Connection>>,
    table: &str,
    columns: &[String],
    rows: &[Vec<String>],
) -> Result<(), rusqlite::Error> {
    let column_list = columns
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ");
    let row_template = format!("({})", sql_placeholders(columns.len()));
    let values = vec![row_template; rows.len()].join(", ");
    let sql = format!("INSERT INTO \"{}\" ({}) VALUES {}", table, column_list, values);

    let conn = conn.lock().unwrap();
    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.execute(rusqlite::params_from_iter(rows.iter().flatten()))?;
    Ok(())
}
