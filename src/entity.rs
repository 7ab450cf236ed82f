//! Entity catalogue: the three record kinds the gateway exposes.
//!
//! Each kind is purely descriptive data: a base resource path plus a
//! `FieldSchema`. A single generic `RemoteRecord` is configured by one of
//! these kinds rather than subclassed per entity.

use std::fmt;
use std::sync::OnceLock;

use crate::schema::{any, array, boolean, integer, FieldSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Domain,
    Contact,
    Zone,
}

impl Entity {
    /// Collection path relative to the configured endpoint.
    pub fn base_path(self) -> &'static str {
        match self {
            Entity::Domain => "registry/domains",
            Entity::Contact => "registry/contacts",
            Entity::Zone => "registry/zones",
        }
    }

    /// The shared field schema for this kind.
    pub fn schema(self) -> &'static FieldSchema {
        match self {
            Entity::Domain => {
                static SCHEMA: OnceLock<FieldSchema> = OnceLock::new();
                SCHEMA.get_or_init(domain_schema)
            }
            Entity::Contact => {
                static SCHEMA: OnceLock<FieldSchema> = OnceLock::new();
                SCHEMA.get_or_init(contact_schema)
            }
            Entity::Zone => {
                static SCHEMA: OnceLock<FieldSchema> = OnceLock::new();
                SCHEMA.get_or_init(zone_schema)
            }
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Domain => write!(f, "domain"),
            Entity::Contact => write!(f, "contact"),
            Entity::Zone => write!(f, "zone"),
        }
    }
}

fn domain_schema() -> FieldSchema {
    FieldSchema::new(vec![
        ("wid", integer),
        ("name", any),
        ("zone", any),
        ("zone_id", any),
        ("transport", any),
        ("passthrough", boolean),
        ("registrant", any),
        ("admin", any),
        ("tech", any),
        ("billing", any),
        ("cdate", any),
        ("expiry", any),
        ("curExpDate", any),
        ("rar", any),
        ("period", any),
        ("period_unit", any),
        ("autorenew", boolean),
        ("authinfo", any),
        ("detail", any),
        ("hosts", any),
        ("contacts", any),
        ("statuses", any),
        ("events", any),
        ("domainsec", any),
        ("rgp_statuses", any),
        ("fee_commands", any),
        ("charge", any),
    ])
}

fn contact_schema() -> FieldSchema {
    FieldSchema::new(vec![
        ("wid", integer),
        ("id", any),
        ("cdate", any),
        ("name", any),
        ("phone", any),
        ("fax", any),
        ("email", any),
        ("contact_address", array),
        ("statuses", any),
        ("linked", boolean),
        ("detail", any),
        ("domains", integer),
    ])
}

fn zone_schema() -> FieldSchema {
    FieldSchema::new(vec![
        ("wid", integer),
        ("cdate", any),
        ("operator", any),
        ("url", any),
        ("zone", any),
        ("default_allow", boolean),
        ("zone_access", any),
        ("transport", any),
        ("passthrough", boolean),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_paths() {
        assert_eq!(Entity::Domain.base_path(), "registry/domains");
        assert_eq!(Entity::Contact.base_path(), "registry/contacts");
        assert_eq!(Entity::Zone.base_path(), "registry/zones");
    }

    #[test]
    fn schemas_know_their_fields() {
        assert!(Entity::Domain.schema().contains("autorenew"));
        assert!(Entity::Contact.schema().contains("contact_address"));
        assert!(Entity::Zone.schema().contains("default_allow"));
        assert!(!Entity::Zone.schema().contains("autorenew"));
    }

    #[test]
    fn wid_leads_every_schema() {
        for entity in [Entity::Domain, Entity::Contact, Entity::Zone] {
            assert_eq!(entity.schema().fields()[0].0, "wid");
        }
    }
}
