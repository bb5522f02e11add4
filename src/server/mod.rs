//! Quiz generation server.
//!
//! Serves `POST /api/quiz/generate` over plain HTTP; each request is
//! independent and triggers exactly one upstream completion call.

mod handler;
mod http;

pub use http::run;
