//! DNS Gateway API client.
//!
//! One `GatewayClient` represents one authenticated session against one
//! gateway endpoint. It is stateless: every operation is a single blocking
//! HTTP round trip, and listing follows server-driven pagination lazily, one
//! page per pull.

use std::collections::VecDeque;
use std::fmt;

use serde_json::{json, Value};
use tracing::{debug, error};

use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::record::RemoteRecord;
use crate::transport::{HttpTransport, Method, Transport};

pub const PRODUCTION_ENDPOINT: &str = "https://gateway-epp.dns.net.za/api";
pub const DEVELOPMENT_ENDPOINT: &str = "https://gateway-otande.dns.net.za:8443/api";

/// Domain operation an availability check can price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CheckOp {
    Create,
    Renew,
    Transfer,
    Restore,
}

impl CheckOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckOp::Create => "create",
            CheckOp::Renew => "renew",
            CheckOp::Transfer => "transfer",
            CheckOp::Restore => "restore",
        }
    }
}

impl fmt::Display for CheckOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for `create_domain`. Contact roles name existing contacts by their
/// caller-facing id.
pub struct NewDomain {
    pub name: String,
    pub period: u32,
    pub autorenew: bool,
    pub authinfo: String,
    pub hosts: Vec<String>,
    pub registrant: String,
    pub admin: String,
    pub billing: String,
    pub tech: String,
    /// Accepted registration charge, as returned by `check_domain`.
    pub charge: Value,
}

impl NewDomain {
    fn payload(&self) -> Value {
        let hosts: Vec<Value> = self
            .hosts
            .iter()
            .map(|h| json!({ "hostname": h }))
            .collect();
        let contacts = json!([
            { "type": "registrant", "contact": { "id": self.registrant } },
            { "type": "admin", "contact": { "id": self.admin } },
            { "type": "billing", "contact": { "id": self.billing } },
            { "type": "tech", "contact": { "id": self.tech } },
        ]);
        json!({
            "name": self.name,
            "period": self.period,
            "period_unit": "y",
            "autorenew": self.autorenew,
            "authinfo": self.authinfo,
            "hosts": hosts,
            "contacts": contacts,
            "charge": self.charge,
        })
    }
}

/// One postal address, expanded into the gateway's `loc` and `int` blocks on
/// contact creation.
#[derive(Debug, Clone)]
pub struct PostalAddress {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: String,
    pub province: Option<String>,
    pub code: Option<String>,
    pub country: String,
}

impl PostalAddress {
    fn block(&self, kind: &str) -> Value {
        json!({
            "type": kind,
            "address1": self.address1,
            "address2": self.address2,
            "address3": self.address3,
            "city": self.city,
            "province": self.province,
            "code": self.code,
            "country": self.country,
        })
    }
}

/// Input for `create_contact`.
pub struct NewContact {
    pub id: String,
    pub name: String,
    pub org: Option<String>,
    pub email: String,
    pub phone: String,
    pub fax: Option<String>,
    pub address: PostalAddress,
}

impl NewContact {
    fn payload(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "org": self.org,
            "email": self.email,
            "phone": self.phone,
            "fax": self.fax,
            "contact_address": [
                self.address.block("loc"),
                self.address.block("int"),
            ],
        })
    }
}

pub struct GatewayClient {
    endpoint: String,
    transport: Box<dyn Transport>,
}

impl GatewayClient {
    /// Authenticated client against `endpoint` using HTTP basic auth.
    pub fn new(endpoint: &str, username: &str, password: &str) -> Self {
        Self::with_transport(endpoint, Box::new(HttpTransport::new(username, password)))
    }

    /// Client with a caller-supplied transport.
    pub fn with_transport(endpoint: &str, transport: Box<dyn Transport>) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        // pagination cursors may be absolute URLs; follow them verbatim
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.endpoint, path)
        }
    }

    /// Issue one request and map the response: body is JSON-decoded by the
    /// transport first, then any non-2xx status becomes `Error::Remote` with
    /// the server-reported detail.
    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self.url(path);
        debug!("{method} {url}");
        let response = self.transport.send(method, &url, query, body)?;
        if !(200..300).contains(&response.status) {
            let detail = response
                .body
                .get("detail")
                .and_then(Value::as_str)
                .unwrap_or("no detail provided")
                .to_string();
            error!("{method} {url} failed with status {}: {detail}", response.status);
            return Err(Error::Remote {
                status: response.status,
                detail,
            });
        }
        Ok(response.body)
    }

    fn wrap(&self, entity: Entity, body: Value) -> Result<RemoteRecord<'_>> {
        match body {
            Value::Object(map) => RemoteRecord::from_response(self, entity, map),
            other => Err(Error::Decode(format!(
                "expected a JSON object for {entity}, got {other}"
            ))),
        }
    }

    /// Lazy, pull-driven listing of all records of one kind.
    pub fn list(&self, entity: Entity) -> RecordPages<'_> {
        RecordPages::new(self, entity, Vec::new())
    }

    /// Registered domains.
    pub fn domains(&self) -> RecordPages<'_> {
        self.list(Entity::Domain)
    }

    /// Registered contacts.
    pub fn contacts(&self) -> RecordPages<'_> {
        self.list(Entity::Contact)
    }

    /// Supported zones.
    pub fn zones(&self) -> RecordPages<'_> {
        self.list(Entity::Zone)
    }

    /// Fetch a single resource by its server-issued id.
    pub fn get(&self, entity: Entity, wid: u64) -> Result<RemoteRecord<'_>> {
        let body = self.fetch(entity, wid)?;
        self.wrap(entity, body)
    }

    /// Filtered lookup that must match exactly one record. Zero and multiple
    /// matches are the same caller error: `Error::AmbiguousResult`.
    pub fn find_one(&self, entity: Entity, filter: &[(&str, &str)]) -> Result<RemoteRecord<'_>> {
        let query: Vec<(String, String)> = filter
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut body = self.request(Method::Get, entity.base_path(), &query, None)?;
        let count = body
            .get("count")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::Decode("listing response missing 'count'".to_string()))?;
        if count != 1 {
            return Err(Error::AmbiguousResult { count });
        }
        let first = body
            .get_mut("results")
            .and_then(Value::as_array_mut)
            .filter(|results| !results.is_empty())
            .map(|results| results.remove(0))
            .ok_or_else(|| Error::Decode("listing response missing 'results'".to_string()))?;
        self.wrap(entity, first)
    }

    /// Domain lookup by name.
    pub fn domain_by_name(&self, name: &str) -> Result<RemoteRecord<'_>> {
        self.find_one(Entity::Domain, &[("name", name)])
    }

    /// Contact lookup by caller-facing id.
    pub fn contact_by_id(&self, id: &str) -> Result<RemoteRecord<'_>> {
        self.find_one(Entity::Contact, &[("id", id)])
    }

    /// Pre-registration availability and cost probe.
    ///
    /// Returns `None` when the name is unavailable; otherwise the charge for
    /// the requested operation from the per-operation charge table.
    pub fn check_domain(&self, name: &str, op: CheckOp) -> Result<Option<Value>> {
        let body = json!({ "name": name });
        let response = self.request(Method::Post, "registry/domains/check", &[], Some(&body))?;
        let avail = response
            .get("avail")
            .and_then(Value::as_bool)
            .ok_or_else(|| Error::Decode("availability response missing 'avail'".to_string()))?;
        if !avail {
            return Ok(None);
        }
        let charges = response
            .get("charge")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::Decode("availability response missing 'charge'".to_string()))?;
        match charges.get(op.as_str()) {
            Some(charge) => Ok(Some(charge.clone())),
            None => Err(Error::UnsupportedOperation(op.to_string())),
        }
    }

    /// Register a new domain.
    pub fn create_domain(&self, domain: &NewDomain) -> Result<RemoteRecord<'_>> {
        let body = self.request(
            Method::Post,
            Entity::Domain.base_path(),
            &[],
            Some(&domain.payload()),
        )?;
        self.wrap(Entity::Domain, body)
    }

    /// Register a new contact.
    pub fn create_contact(&self, contact: &NewContact) -> Result<RemoteRecord<'_>> {
        let body = self.request(
            Method::Post,
            Entity::Contact.base_path(),
            &[],
            Some(&contact.payload()),
        )?;
        self.wrap(Entity::Contact, body)
    }

    /// Fetch the full representation of one resource.
    pub fn fetch(&self, entity: Entity, wid: u64) -> Result<Value> {
        let path = format!("{}/{wid}", entity.base_path());
        self.request(Method::Get, &path, &[], None)
    }

    /// Partial update of one resource; returns the full updated
    /// representation.
    pub fn update(&self, entity: Entity, wid: u64, partial: Value) -> Result<Value> {
        let path = format!("{}/{wid}", entity.base_path());
        self.request(Method::Put, &path, &[], Some(&partial))
    }

    /// Delete one resource.
    pub fn delete(&self, entity: Entity, wid: u64) -> Result<()> {
        let path = format!("{}/{wid}", entity.base_path());
        self.request(Method::Delete, &path, &[], None)?;
        Ok(())
    }
}

/// Lazy iterator over a paginated listing.
///
/// Each page response carries `{count, next, results}`; one GET is issued per
/// page, only as the consumer advances past a page boundary, and the sequence
/// ends when `next` is null. Abandoning the iterator issues no further calls.
pub struct RecordPages<'a> {
    client: &'a GatewayClient,
    entity: Entity,
    next: Option<String>,
    query: Vec<(String, String)>,
    buffer: VecDeque<Value>,
    failed: bool,
}

impl<'a> RecordPages<'a> {
    fn new(client: &'a GatewayClient, entity: Entity, query: Vec<(String, String)>) -> Self {
        Self {
            client,
            entity,
            next: Some(entity.base_path().to_string()),
            query,
            buffer: VecDeque::new(),
            failed: false,
        }
    }

    fn fetch_page(&mut self, path: &str) -> Result<()> {
        let page = self
            .client
            .request(Method::Get, path, &self.query, None)?;
        let Value::Object(mut page) = page else {
            return Err(Error::Decode(
                "listing response is not a JSON object".to_string(),
            ));
        };
        self.next = match page.remove("next") {
            Some(Value::String(url)) => Some(url),
            Some(Value::Null) | None => None,
            Some(other) => {
                return Err(Error::Decode(format!(
                    "unexpected 'next' cursor: {other}"
                )))
            }
        };
        match page.remove("results") {
            Some(Value::Array(results)) => {
                self.buffer.extend(results);
                Ok(())
            }
            _ => Err(Error::Decode(
                "listing response missing 'results'".to_string(),
            )),
        }
    }
}

impl<'a> Iterator for RecordPages<'a> {
    type Item = Result<RemoteRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }
            if let Some(raw) = self.buffer.pop_front() {
                let record = match raw {
                    Value::Object(map) => {
                        RemoteRecord::from_response(self.client, self.entity, map)
                    }
                    other => Err(Error::Decode(format!(
                        "expected a JSON object for {}, got {other}",
                        self.entity
                    ))),
                };
                if record.is_err() {
                    self.failed = true;
                }
                return Some(record);
            }
            let path = self.next.take()?;
            if let Err(err) = self.fetch_page(&path) {
                self.failed = true;
                return Some(Err(err));
            }
        }
    }
}
