use serde_json::{json, Value};
use tracing::{debug, info};

use super::zone::zone_candidates;
use crate::api::ApiClient;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub domain_name: String,
    pub content: String,
    pub record_type: String,
    pub ttl: Option<u32>,
    pub proxied: Option<bool>,
}

impl RegistrationRequest {
    pub fn new(domain_name: &str, content: &str, record_type: &str) -> Self {
        Self {
            domain_name: domain_name.to_string(),
            content: content.to_string(),
            record_type: record_type.to_string(),
            ttl: None,
            proxied: None,
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_proxied(mut self, proxied: bool) -> Self {
        self.proxied = Some(proxied);
        self
    }

    fn body(&self) -> Value {
        let mut body = json!({
            "type": self.record_type,
            "name": self.domain_name,
            "content": self.content,
        });
        if let Some(ttl) = self.ttl {
            body["ttl"] = json!(ttl);
        }
        if let Some(proxied) = self.proxied {
            body["proxied"] = json!(proxied);
        }
        body
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordAction {
    Created,
    Updated,
}

/// Creates or updates a record by name without the caller knowing zone or
/// record ids. Every call resolves both ids again.
///
/// Existing records are matched by name only: when several records share a
/// name (e.g. an `A` and a `TXT`), the first one listed is overwritten.
pub struct Registrar<C> {
    client: C,
}

impl<C: ApiClient> Registrar<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub async fn register(
        &self,
        domain_name: &str,
        content: &str,
        record_type: &str,
    ) -> Result<Value> {
        self.register_request(&RegistrationRequest::new(domain_name, content, record_type))
            .await
    }

    pub async fn register_request(&self, request: &RegistrationRequest) -> Result<Value> {
        let zone_id = self.resolve_zone(&request.domain_name).await?;
        let records = self.list_records(&zone_id, &request.domain_name).await?;

        let records_path = format!("/zones/{}/dns_records", zone_id);
        let body = request.body();

        let (action, record) = match records.first() {
            None => {
                let record = self.client.post(&records_path, &body).await?;
                (RecordAction::Created, record)
            }
            Some(existing) => {
                let record_id = entry_id(existing, "record")?;
                let record_path = format!("{}/{}", records_path, record_id);
                let record = self.client.put(&record_path, &body).await?;
                (RecordAction::Updated, record)
            }
        };

        info!(
            "{:?} {} record {} -> {}",
            action, request.record_type, request.domain_name, request.content
        );

        Ok(record)
    }

    /// Returns the record currently registered under `domain_name`, if any.
    pub async fn lookup(&self, domain_name: &str) -> Result<Option<Value>> {
        let zone_id = self.resolve_zone(domain_name).await?;
        let records = self.list_records(&zone_id, domain_name).await?;
        Ok(records.into_iter().next())
    }

    async fn resolve_zone(&self, domain_name: &str) -> Result<String> {
        for candidate in zone_candidates(domain_name) {
            let zones = self.client.get("/zones", &[("name", candidate)]).await?;
            let zones = into_entries(zones, "zone")?;

            if let Some(zone) = zones.first() {
                let zone_id = entry_id(zone, "zone")?;
                debug!("Resolved zone {} for {} ({})", candidate, domain_name, zone_id);
                return Ok(zone_id);
            }

            debug!("No zone named {}", candidate);
        }

        Err(Error::ZoneNotFound(domain_name.to_string()))
    }

    async fn list_records(&self, zone_id: &str, domain_name: &str) -> Result<Vec<Value>> {
        let path = format!("/zones/{}/dns_records", zone_id);
        let records = self.client.get(&path, &[("name", domain_name)]).await?;
        into_entries(records, "record")
    }
}

fn into_entries(value: Value, kind: &str) -> Result<Vec<Value>> {
    match value {
        Value::Array(entries) => Ok(entries),
        other => Err(Error::Malformed(format!(
            "expected a list of {}s, got: {}",
            kind, other
        ))),
    }
}

fn entry_id(entry: &Value, kind: &str) -> Result<String> {
    entry
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::Malformed(format!("{} entry has no id: {}", kind, entry)))
}
