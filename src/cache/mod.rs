// Cache module for in-process caching.
// Stores filtered and aggregated GitHub query results between calls.

pub mod store;

pub use store::{ExpiryPolicy, Slot};
