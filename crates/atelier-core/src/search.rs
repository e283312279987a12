//! List Search
//!
//! Display-only filters; store state is never touched.

use crate::domain::{Client, Measurement};

/// Name of the client with `id`, if it is loaded
pub fn client_name<'a>(clients: &'a [Client], id: &str) -> Option<&'a str> {
    clients
        .iter()
        .find(|client| client.id == id)
        .map(|client| client.name.as_str())
}

/// Records whose client name or garment type contains `query`, ignoring case.
/// A blank query matches everything.
pub fn filter_measurements<'a>(records: &'a [Measurement], clients: &[Client], query: &str) -> Vec<&'a Measurement> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| {
            let by_client = client_name(clients, &record.client_id)
                .map(|name| name.to_lowercase().contains(&needle))
                .unwrap_or(false);
            by_client || record.garment_type.key().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Clients whose name or email contains `query`, ignoring case
pub fn filter_clients<'a>(clients: &'a [Client], query: &str) -> Vec<&'a Client> {
    let needle = query.trim().to_lowercase();
    clients
        .iter()
        .filter(|client| {
            needle.is_empty()
                || client.name.to_lowercase().contains(&needle)
                || client.email.to_lowercase().contains(&needle)
        })
        .collect()
}
