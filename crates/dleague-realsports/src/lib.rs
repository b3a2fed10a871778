// Client for the Real Sports draft view API.

pub mod client;
pub mod token;
mod wire;

pub use client::{ApiClient, RealSportsClient};
