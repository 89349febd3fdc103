use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

#[cfg(test)]
mod tests {
    use refuge_core::enums::{AuditAction, EntityType};

    use super::parse_enum;

    #[test]
    fn parses_snake_case_enum() {
        let entity: EntityType = parse_enum("family", "entity-type").expect("entity should parse");
        assert_eq!(entity, EntityType::Family);
    }

    #[test]
    fn parses_hyphenated_alias() {
        let action: AuditAction =
            parse_enum("status-changed", "action").expect("action should parse");
        assert_eq!(action, AuditAction::StatusChanged);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<AuditAction>("deleted", "action").expect_err("should fail");
        assert!(err.to_string().contains("invalid action 'deleted'"));
    }
}
