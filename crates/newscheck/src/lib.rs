//! Client side of the news statement verifier: input validation, the wire
//! schema, the single-flight request state machine and the presentation
//! model a renderer reads.

pub mod schema;
pub mod validator;
pub mod transport;
pub mod client;
pub mod view;

pub use schema::*;
pub use validator::*;
pub use transport::*;
pub use client::*;
pub use view::*;
