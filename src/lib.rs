pub mod api;
pub mod config;
pub mod error;
pub mod registrar;

pub use api::{ApiClient, ClientOptions, CloudflareClient, Credentials};
pub use error::{Error, Result};
pub use registrar::{RegistrationRequest, Registrar};
