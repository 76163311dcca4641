mod upsert;
mod zone;

pub use upsert::{RegistrationRequest, Registrar};
pub use zone::zone_candidates;
