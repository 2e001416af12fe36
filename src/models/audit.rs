/// One row of the `audit_log` table.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub created_at: String,
    pub actor: String,
    pub action: String,
    pub payload: String,
}
