mod client;
mod cloudflare;

pub use client::{ApiClient, Credentials};
pub use cloudflare::{ClientOptions, CloudflareClient, CLOUDFLARE_API_BASE, REQUEST_TIMEOUT};
