// Protocol layer: JSON-RPC 2.0 envelopes, tool/resource catalog, dispatch.
// The REST shim in `routes` does not go through here.

pub mod dispatch;
pub mod handlers;
pub mod protocol;
pub mod registry;
pub mod tools;

pub use registry::ToolRegistry;
