// Per-user workflow sessions and their HTTP surface.
// Each route maps onto exactly one WorkflowController operation.

pub mod controller;
pub mod forms;
pub mod handlers;
pub mod registry;

pub use registry::SessionRegistry;
