//! Remotely backed entity records.
//!
//! A `RemoteRecord` is a locally held snapshot of one server-side entity.
//! Field writes are validated against the entity's schema before any network
//! access, then translated into a partial PUT; the server's full response
//! replaces local state wholesale, so the record always mirrors exactly one
//! server-side snapshot (never a merge of pre- and post-update values).

use std::fmt;

use serde_json::{json, Map, Value};

use crate::client::GatewayClient;
use crate::entity::Entity;
use crate::error::{Error, Result};

pub struct RemoteRecord<'a> {
    client: &'a GatewayClient,
    entity: Entity,
    properties: Map<String, Value>,
}

impl<'a> RemoteRecord<'a> {
    /// Wrap a server response mapping. Every key must be in the entity's
    /// schema and every value must pass its validator. Property order is
    /// normalised to schema declaration order.
    pub(crate) fn from_response(
        client: &'a GatewayClient,
        entity: Entity,
        mut raw: Map<String, Value>,
    ) -> Result<Self> {
        let schema = entity.schema();
        let mut properties = Map::new();
        for (name, _) in schema.fields() {
            if let Some(value) = raw.remove(*name) {
                schema.validate(name, &value)?;
                properties.insert((*name).to_string(), value);
            }
        }
        if let Some((field, _)) = raw.into_iter().next() {
            return Err(Error::UnknownField(field));
        }
        Ok(Self {
            client,
            entity,
            properties,
        })
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Current local value of a field, as last fetched or written.
    pub fn get(&self, field: &str) -> Result<&Value> {
        self.properties
            .get(field)
            .ok_or_else(|| Error::UnknownField(field.to_string()))
    }

    /// Server-issued numeric identifier; the record's path segment.
    pub fn wid(&self) -> Result<u64> {
        self.get("wid")?
            .as_u64()
            .ok_or_else(|| Error::Decode("wid is not an unsigned integer".to_string()))
    }

    /// Write one field through to the gateway.
    ///
    /// Validation happens strictly before the network call; on success the
    /// server's full response replaces the local snapshot, so a single-field
    /// write can change several observed fields (server-computed
    /// derivations such as a recalculated expiry).
    pub fn set(&mut self, field: &str, value: Value) -> Result<()> {
        self.entity.schema().validate(field, &value)?;
        let wid = self.wid()?;
        let body = self.client.update(self.entity, wid, json!({ field: value }))?;
        self.replace(body)
    }

    /// Re-fetch the resource and replace the local snapshot wholesale.
    pub fn refresh(&mut self) -> Result<&mut Self> {
        let wid = self.wid()?;
        let body = self.client.fetch(self.entity, wid)?;
        self.replace(body)?;
        Ok(self)
    }

    /// Delete the resource server-side. The local record is stale afterwards
    /// and should be discarded.
    pub fn delete(&self) -> Result<()> {
        self.client.delete(self.entity, self.wid()?)
    }

    fn replace(&mut self, body: Value) -> Result<()> {
        let raw = match body {
            Value::Object(map) => map,
            other => {
                return Err(Error::Decode(format!(
                    "expected a JSON object for {}, got {other}",
                    self.entity
                )))
            }
        };
        let fresh = Self::from_response(self.client, self.entity, raw)?;
        self.properties = fresh.properties;
        Ok(())
    }

    /// Pretty JSON rendering of the properties, in schema order.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.properties)
            .unwrap_or_else(|_| String::from("{}"))
    }
}

impl fmt::Display for RemoteRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl fmt::Debug for RemoteRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteRecord")
            .field("entity", &self.entity)
            .field("properties", &self.properties)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::canned;
    use crate::transport::Method;
    use serde_json::json;

    fn domain_body() -> Value {
        json!({
            "wid": 7,
            "name": "example.co.za",
            "autorenew": false,
            "expiry": "2026-08-24",
        })
    }

    fn record<'a>(client: &'a GatewayClient) -> RemoteRecord<'a> {
        let Value::Object(map) = domain_body() else {
            unreachable!()
        };
        RemoteRecord::from_response(client, Entity::Domain, map).expect("valid body")
    }

    #[test]
    fn get_unknown_field_fails() {
        let (client, _state) = canned(vec![]);
        let rec = record(&client);
        assert!(matches!(rec.get("nonesuch"), Err(Error::UnknownField(_))));
        // schema field absent from the snapshot is just as unknown
        assert!(matches!(rec.get("authinfo"), Err(Error::UnknownField(_))));
        assert_eq!(rec.get("name").unwrap(), &json!("example.co.za"));
    }

    #[test]
    fn set_invalid_value_makes_no_network_call() {
        let (client, state) = canned(vec![]);
        let mut rec = record(&client);
        let err = rec.set("autorenew", json!("not-a-bool")).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
        assert!(state.lock().unwrap().calls.is_empty());
    }

    #[test]
    fn set_unknown_field_makes_no_network_call() {
        let (client, state) = canned(vec![]);
        let mut rec = record(&client);
        let err = rec.set("nonesuch", json!(true)).unwrap_err();
        assert!(matches!(err, Error::UnknownField(_)));
        assert!(state.lock().unwrap().calls.is_empty());
    }

    #[test]
    fn set_replaces_properties_wholesale() {
        // server recalculates expiry as a side effect of the write
        let response = json!({
            "wid": 7,
            "name": "example.co.za",
            "autorenew": true,
            "expiry": "2027-08-24",
        });
        let (client, state) = canned(vec![(200, response.clone())]);
        let mut rec = record(&client);
        rec.set("autorenew", json!(true)).expect("update succeeds");

        assert_eq!(rec.get("autorenew").unwrap(), &json!(true));
        assert_eq!(rec.get("expiry").unwrap(), &json!("2027-08-24"));

        let state = state.lock().unwrap();
        assert_eq!(state.calls.len(), 1);
        let (method, url, body) = &state.calls[0];
        assert_eq!(*method, Method::Put);
        assert!(url.ends_with("registry/domains/7"));
        assert_eq!(body.as_ref().unwrap(), &json!({ "autorenew": true }));
    }

    #[test]
    fn failed_update_leaves_snapshot_untouched() {
        let (client, _state) = canned(vec![(500, json!({ "detail": "boom" }))]);
        let mut rec = record(&client);
        let err = rec.set("autorenew", json!(true)).unwrap_err();
        assert!(matches!(err, Error::Remote { status: 500, .. }));
        assert_eq!(rec.get("autorenew").unwrap(), &json!(false));
        assert_eq!(rec.get("expiry").unwrap(), &json!("2026-08-24"));
    }

    #[test]
    fn refresh_fetches_by_wid() {
        let response = json!({ "wid": 7, "name": "example.co.za", "autorenew": true });
        let (client, state) = canned(vec![(200, response)]);
        let mut rec = record(&client);
        rec.refresh().expect("refresh succeeds");
        assert_eq!(rec.get("autorenew").unwrap(), &json!(true));
        // expiry was absent from the new snapshot, so it is gone locally too
        assert!(matches!(rec.get("expiry"), Err(Error::UnknownField(_))));

        let state = state.lock().unwrap();
        assert_eq!(state.calls.len(), 1);
        assert_eq!(state.calls[0].0, Method::Get);
        assert!(state.calls[0].1.ends_with("registry/domains/7"));
    }

    #[test]
    fn unknown_server_field_is_rejected_on_wrap() {
        let (client, _state) = canned(vec![]);
        let Value::Object(map) = json!({ "wid": 1, "bogus": true }) else {
            unreachable!()
        };
        let err = RemoteRecord::from_response(&client, Entity::Zone, map).unwrap_err();
        assert!(matches!(err, Error::UnknownField(f) if f == "bogus"));
    }

    #[test]
    fn display_follows_schema_order() {
        let (client, _state) = canned(vec![]);
        // insertion order deliberately scrambled
        let Value::Object(map) =
            json!({ "name": "example.co.za", "autorenew": false, "wid": 7 })
        else {
            unreachable!()
        };
        let rec = RemoteRecord::from_response(&client, Entity::Domain, map).unwrap();
        let rendered = rec.to_json();
        let wid = rendered.find("\"wid\"").unwrap();
        let name = rendered.find("\"name\"").unwrap();
        let autorenew = rendered.find("\"autorenew\"").unwrap();
        assert!(wid < name && name < autorenew);
    }
}
