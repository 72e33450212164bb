//! Tests for the catalog providers
//!
//! The HTTP provider runs against a local mock server; nothing here touches
//! the network.

pub mod static_catalog;
