//! API request handlers

mod examples;
mod programs;
mod service;

pub use examples::*;
pub use programs::*;
pub use service::*;
