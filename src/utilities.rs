//! Small helpers shared by the write path and the request layer.

/// Builds a comma-separated list of `?` placeholders for a parameterized
/// statement with `count` values.
///
/// Used for every dynamic "value in set" construct and for multi-row
/// INSERT templates, so id sets and row values always bind as parameters
/// instead of being spliced into the SQL text.
///
/// # Example
/// ```
/// use collab_graph::utilities::sql_placeholders;
///
/// assert_eq!(sql_placeholders(3), "?, ?, ?");
/// assert_eq!(sql_placeholders(1), "?");
/// assert_eq!(sql_placeholders(0), "");
/// ```
pub fn sql_placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Splits a comma-separated public-id list into individual ids.
///
/// Whitespace around each id is trimmed and empty entries are dropped, so
/// `""`, `","` and `"a,,b"` never yield phantom seeds.
///
/// # Example
/// ```
/// use collab_graph::utilities::parse_seed_list;
///
/// assert_eq!(parse_seed_list("alice, bob"), vec!["alice", "bob"]);
/// assert!(parse_seed_list("").is_empty());
/// ```
pub fn parse_seed_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
