use crate::ingestion::aggregator::{count_collaborations, AuthorAdjacency, CollaborationPair};
use std::collections::HashMap;
use tokio::sync::mpsc;

/// Runs the aggregator over an in-memory pair stream and collects every
/// emitted record.
async fn run_aggregator(pairs: &[(&str, &str)]) -> Vec<AuthorAdjacency> {
    let (pair_tx, pair_rx) = mpsc::channel(64);
    let (author_tx, mut author_rx) = mpsc::channel(64);
    let task = tokio::spawn(count_collaborations(pair_rx, author_tx));

    for (first, second) in pairs {
        pair_tx
            .send(CollaborationPair {
                first_author: first.to_string(),
                second_author: second.to_string(),
            })
            .await
            .unwrap();
    }
    drop(pair_tx);

    let mut out = Vec::new();
    while let Some(author) = author_rx.recv().await {
        out.push(author);
    }
    task.await.unwrap();
    out
}

fn counts(author: &AuthorAdjacency) -> HashMap<&str, u32> {
    author
        .collaborators
        .iter()
        .map(|(k, v)| (k.as_str(), *v))
        .collect()
}

/// One record per contiguous first-author run, co-author counts
/// incremented once per occurrence.
#[tokio::test]
async fn test_grouped_input_one_record_per_run() {
    let records = run_aggregator(&[
        ("alice", "bob"),
        ("alice", "bob"),
        ("alice", "carol"),
        ("bob", "alice"),
    ])
    .await;

    assert_eq!(records.len(), 2);

    assert_eq!(records[0].id, "alice");
    assert_eq!(counts(&records[0]), HashMap::from([("bob", 2), ("carol", 1)]));

    assert_eq!(records[1].id, "bob");
    assert_eq!(counts(&records[1]), HashMap::from([("alice", 1)]));
}

/// A stream with zero transitions still emits its only record at
/// end-of-stream.
#[tokio::test]
async fn test_single_run_emitted_at_stream_end() {
    let records = run_aggregator(&[("alice", "bob"), ("alice", "carol")]).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "alice");
    assert_eq!(counts(&records[0]), HashMap::from([("bob", 1), ("carol", 1)]));
}

/// An empty stream emits nothing, in particular no empty-id record.
#[tokio::test]
async fn test_empty_stream_emits_nothing() {
    let records = run_aggregator(&[]).await;
    assert!(records.is_empty());
}

/// Grouping law: for grouped input, the emitted (id, co-author, count)
/// triples equal the multiset count of matching input pairs.
#[tokio::test]
async fn test_counts_match_input_multiset() {
    let input = [
        ("a", "x"),
        ("a", "x"),
        ("a", "y"),
        ("b", "x"),
        ("c", "x"),
        ("c", "y"),
        ("c", "y"),
        ("c", "y"),
    ];
    let records = run_aggregator(&input).await;

    let mut expected: HashMap<(&str, &str), u32> = HashMap::new();
    for (first, second) in input {
        *expected.entry((first, second)).or_insert(0) += 1;
    }

    let mut emitted = HashMap::new();
    for record in &records {
        for (second, count) in &record.collaborators {
            emitted.insert((record.id.as_str(), second.as_str()), *count);
        }
    }

    assert_eq!(emitted, expected);
}

/// Ungrouped input fragments into one record per run, the documented
/// consequence of violating the ordering precondition.
#[tokio::test]
async fn test_ungrouped_input_fragments() {
    let records = run_aggregator(&[("a", "x"), ("b", "y"), ("a", "z")]).await;

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "a"]);
}
