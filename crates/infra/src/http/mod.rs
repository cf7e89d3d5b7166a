//! HTTP plumbing shared by the remote gateways.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
