//! Audit trail repository.
//!
//! Append-only audit entries recording every mutation, written inside the
//! mutation's unit of work so they commit or vanish with it.

use chrono::Utc;
use refuge_core::entities::AuditEntry;
use refuge_core::enums::{AuditAction, EntityType};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json};
use crate::service::RefugeService;
use crate::uow::UnitOfWork;

/// Default number of entries returned by [`RefugeService::query_audit`].
pub const DEFAULT_AUDIT_LIMIT: u32 = 100;

/// Filter criteria for audit queries.
#[derive(Debug, Default)]
pub struct AuditFilter {
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<i64>,
    pub action: Option<AuditAction>,
    pub limit: Option<u32>,
}

impl RefugeService {
    /// Append an audit entry. Called by every mutation method.
    ///
    /// Returns the new entry's id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append_audit(
        &self,
        uow: &UnitOfWork<'_>,
        entity_type: EntityType,
        entity_id: i64,
        action: AuditAction,
        detail: Option<serde_json::Value>,
    ) -> Result<i64, DatabaseError> {
        let conn = uow.conn();
        conn.execute(
            "INSERT INTO audit_trail (entity_type, entity_id, action, detail, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![
                entity_type.as_str(),
                entity_id,
                action.as_str(),
                detail.as_ref().map(std::string::ToString::to_string),
                Utc::now().to_rfc3339()
            ],
        )
        .await?;
        Ok(conn.last_insert_rowid())
    }

    /// Query audit entries with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(et) = filter.entity_type {
            params.push(libsql::Value::Text(et.as_str().to_string()));
            conditions.push(format!("entity_type = ?{}", params.len()));
        }
        if let Some(eid) = filter.entity_id {
            params.push(libsql::Value::Integer(eid));
            conditions.push(format!("entity_id = ?{}", params.len()));
        }
        if let Some(action) = filter.action {
            params.push(libsql::Value::Text(action.as_str().to_string()));
            conditions.push(format!("action = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
        let sql = format!(
            "SELECT id, entity_type, entity_id, action, detail, created_at
             FROM audit_trail {where_clause}
             ORDER BY id DESC LIMIT {limit}"
        );

        let _gate = self.db().lock().await;
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next().await? {
            entries.push(AuditEntry {
                id: row.get::<i64>(0)?,
                entity_type: parse_enum(&row.get::<String>(1)?)?,
                entity_id: row.get::<i64>(2)?,
                action: parse_enum(&row.get::<String>(3)?)?,
                detail: parse_optional_json(get_opt_string(&row, 4)?.as_deref())?,
                created_at: parse_datetime(&row.get::<String>(5)?)?,
            });
        }

        Ok(entries)
    }
}
