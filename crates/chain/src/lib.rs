//! Chain access for the transfer pipeline
//!
//! This crate provides the `ChainClient` seam the executor talks to the
//! network through, plus the JSON-RPC implementation of it.

pub mod rpc;
pub mod traits;

pub use rpc::RpcChainClient;
pub use traits::{ChainClient, DryRunStatus};
