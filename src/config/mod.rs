mod settings;

pub use settings::{ApiConfig, CredentialsConfig, Settings, ENV_AUTH_KEY, ENV_EMAIL};
