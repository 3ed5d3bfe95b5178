// Minimal HTTP/1.1 control surface
//
// Provides:
// - Path -> maneuver routing with JSON state reports
// - The single-connection request/response cycle
// - The sequential accept loop

pub mod router;
pub mod server;

pub use router::{Response, Status, route};
pub use server::{ConnectionError, ConnectionOutcome, bind, serve};
