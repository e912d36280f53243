//! Unit tests for pinning descriptor resolution and aggregation.
