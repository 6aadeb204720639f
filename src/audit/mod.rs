//! Audit logging
//!
//! Every create, update and delete performed through the services is
//! appended to `audit.log` with before/after snapshots of the entity.

mod entry;
mod logger;

pub use entry::{summarize_changes, AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn entry(id: usize) -> AuditEntry {
        AuditEntry::create(
            EntityType::Budget,
            format!("bud-{}", id),
            None,
            &json!({"amount": id * 100}),
        )
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = logger();
        logger.log(&entry(1)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Budget);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = logger();
        for i in 0..10 {
            logger.log(&entry(i)).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<&str> = recent.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["bud-7", "bud-8", "bud-9"]);

        assert_eq!(logger.read_recent(50).unwrap().len(), 10);
    }

    #[test]
    fn test_missing_log_is_empty() {
        let (logger, _temp) = logger();
        assert!(!logger.path().exists());
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_line_is_an_error() {
        let (logger, _temp) = logger();
        logger.log(&entry(1)).unwrap();
        std::fs::write(
            logger.path(),
            format!(
                "{}\nnot json\n",
                serde_json::to_string(&entry(1)).unwrap()
            ),
        )
        .unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
