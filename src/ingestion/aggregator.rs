//! Collaboration counting.
//!
//! Folds an ordered stream of (first author, second author) pairs into one
//! weighted adjacency record per contiguous run of equal first authors.
//!
//! Precondition: the input must already be grouped contiguously by first
//! author; the aggregator never sorts or buffers more than the current
//! run. The build pipeline guarantees this with a deterministic `ORDER BY`
//! on both phase queries; other callers get duplicate or fragmented
//! records for ungrouped input.

use std::collections::HashMap;
use tokio::sync::mpsc;

/// One observed collaboration occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaborationPair {
    pub first_author: String,
    pub second_author: String,
}

/// Accumulated co-author counts for one author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorAdjacency {
    pub id: String,
    /// Co-author id → number of observed collaborations.
    pub collaborators: HashMap<String, u32>,
}

/// Consumes the pair stream and emits one [`AuthorAdjacency`] per run.
///
/// The accumulator starts empty, so an empty input emits nothing and no
/// empty-id record can ever appear. When the input channel closes, the
/// remaining accumulator (if any) is emitted and the output channel closes
/// with it; closure is the only end-of-output signal.
pub async fn count_collaborations(
    mut pairs: mpsc::Receiver<CollaborationPair>,
    out: mpsc::Sender<AuthorAdjacency>,
) {
    let mut current: Option<AuthorAdjacency> = None;

    while let Some(pair) = pairs.recv().await {
        match current.as_mut() {
            Some(author) if author.id == pair.first_author => {
                *author.collaborators.entry(pair.second_author).or_insert(0) += 1;
            }
            _ => {
                if let Some(done) = current.take() {
                    if out.send(done).await.is_err() {
                        return;
                    }
                }
                let mut collaborators = HashMap::new();
                collaborators.insert(pair.second_author, 1);
                current = Some(AuthorAdjacency {
                    id: pair.first_author,
                    collaborators,
                });
            }
        }
    }

    if let Some(done) = current.take() {
        let _ = out.send(done).await;
    }
}
