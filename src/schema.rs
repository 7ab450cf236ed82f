//! Declarative per-entity field schemas.
//!
//! A schema is an ordered set of recognised field names, each paired with a
//! structural validator. Validators are pure predicates over the JSON shape
//! of a value (integer, boolean, array); they carry no business meaning and
//! perform no I/O. Declaration order doubles as the serialisation order of
//! record properties.

use serde_json::Value;

use crate::error::{Error, Result};

/// Structural predicate over a candidate field value.
pub type Validator = fn(&Value) -> bool;

/// Accept any value.
pub fn any(_: &Value) -> bool {
    true
}

/// Accept JSON integers only.
pub fn integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

/// Accept JSON booleans only.
pub fn boolean(value: &Value) -> bool {
    value.is_boolean()
}

/// Accept JSON arrays only.
pub fn array(value: &Value) -> bool {
    value.is_array()
}

/// Ordered field set for one entity kind.
pub struct FieldSchema {
    fields: Vec<(&'static str, Validator)>,
}

impl FieldSchema {
    pub fn new(fields: Vec<(&'static str, Validator)>) -> Self {
        Self { fields }
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[(&'static str, Validator)] {
        &self.fields
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|(name, _)| *name == field)
    }

    fn validator(&self, field: &str) -> Option<Validator> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, validator)| *validator)
    }

    /// Check a candidate value against the field's validator.
    pub fn validate(&self, field: &str, value: &Value) -> Result<()> {
        match self.validator(field) {
            None => Err(Error::UnknownField(field.to_string())),
            Some(validator) if validator(value) => Ok(()),
            Some(_) => Err(Error::InvalidValue {
                field: field.to_string(),
                value: value.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> FieldSchema {
        FieldSchema::new(vec![
            ("wid", integer),
            ("name", any),
            ("autorenew", boolean),
            ("hosts", array),
        ])
    }

    #[test]
    fn validate_accepts_matching_shapes() {
        let s = schema();
        assert!(s.validate("wid", &json!(42)).is_ok());
        assert!(s.validate("name", &json!("example.co.za")).is_ok());
        assert!(s.validate("autorenew", &json!(true)).is_ok());
        assert!(s.validate("hosts", &json!(["ns1.example.net"])).is_ok());
    }

    #[test]
    fn validate_rejects_wrong_shapes() {
        let s = schema();
        assert!(matches!(
            s.validate("autorenew", &json!("not-a-bool")),
            Err(Error::InvalidValue { .. })
        ));
        assert!(matches!(
            s.validate("wid", &json!("42")),
            Err(Error::InvalidValue { .. })
        ));
        assert!(matches!(
            s.validate("hosts", &json!("ns1.example.net")),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn validate_rejects_unknown_fields() {
        let s = schema();
        assert!(matches!(
            s.validate("nonesuch", &json!(1)),
            Err(Error::UnknownField(f)) if f == "nonesuch"
        ));
    }

    #[test]
    fn fields_keep_declaration_order() {
        let s = schema();
        let names: Vec<&str> = s.fields().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["wid", "name", "autorenew", "hosts"]);
    }
}
