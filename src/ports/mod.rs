//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, the scan pipeline talks to market data
//! only through `MarketDataGateway`. `mocks` provides a recording in-memory
//! gateway for tests and dry runs.

pub mod market_data;
pub mod mocks;

pub use market_data::{MarketDataError, MarketDataGateway};
pub use mocks::MockGateway;
