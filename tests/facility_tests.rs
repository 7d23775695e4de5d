mod fixtures;

use fixtures::{parse_line, TestFacility};
use sinklog::internal::config::{DeploymentMode, LoggingConfig};
use sinklog::{Fields, Level, LogFacility};

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // ==================== threshold tests ====================

    #[test]
    fn test_below_global_level_writes_nothing_anywhere() {
        let dir = tempdir().unwrap();
        let t = TestFacility::production(dir.path(), Level::Info);

        t.facility.debug("x", None);

        assert!(t.console.is_empty());
        assert!(t.error_log().is_empty());
        assert!(t.combined_log().is_empty());
    }

    #[test]
    fn test_console_gets_exactly_one_line_per_accepted_call() {
        let dir = tempdir().unwrap();
        let t = TestFacility::production(dir.path(), Level::Warn);

        t.facility.error("first failure", None);
        t.facility.warn("a warning", None);
        t.facility.info("dropped", None);

        let lines = t.console.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("first failure"));
        assert!(lines[1].contains("a warning"));
    }

    // ==================== production routing tests ====================

    #[test]
    fn test_production_routing_at_info() {
        let dir = tempdir().unwrap();
        let t = TestFacility::production(dir.path(), Level::Info);

        t.facility.error("boom", None);
        t.facility.info("ok", None);
        t.facility.debug("skip", None);

        let errors = t.error_log();
        let combined = t.combined_log();

        assert_eq!(errors.len(), 1);
        assert_eq!(parse_line(&errors[0])["message"], "boom");

        assert_eq!(combined.len(), 2);
        assert_eq!(parse_line(&combined[0])["message"], "boom");
        assert_eq!(parse_line(&combined[1])["message"], "ok");

        assert!(!errors.iter().any(|l| l.contains("skip")));
        assert!(!combined.iter().any(|l| l.contains("skip")));
    }

    #[test]
    fn test_file_lines_have_timestamp_and_recoverable_fields() {
        let dir = tempdir().unwrap();
        let t = TestFacility::production(dir.path(), Level::Debug);

        let fields = Fields::new()
            .with("user", "alice")
            .with("attempts", 3)
            .with("ratio", 0.5)
            .with("admin", false);
        t.facility.error("login failed", Some(&fields));

        let line = parse_line(&t.combined_log()[0]);
        assert_eq!(line["level"], "error");
        assert_eq!(line["user"], "alice");
        assert_eq!(line["attempts"], 3);
        assert_eq!(line["ratio"], 0.5);
        assert_eq!(line["admin"], false);

        let ts = line["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());

        assert!(t.console.contents().contains("login failed"));
    }

    #[test]
    fn test_files_are_appended_across_facilities() {
        let dir = tempdir().unwrap();
        {
            let t = TestFacility::production(dir.path(), Level::Info);
            t.facility.info("from first run", None);
        }
        let t = TestFacility::production(dir.path(), Level::Info);
        t.facility.info("from second run", None);

        let combined = t.combined_log();
        assert_eq!(combined.len(), 2);
        assert!(combined[0].contains("from first run"));
        assert!(combined[1].contains("from second run"));
    }

    // ==================== configuration tests ====================

    #[test]
    fn test_non_production_creates_no_files() {
        let dir = tempdir().unwrap();
        let logs_dir = dir.path().join("logs");

        for mode in [
            DeploymentMode::Development,
            DeploymentMode::Other("staging".into()),
        ] {
            let cfg = LoggingConfig {
                level: Level::Debug,
                mode,
                logs_dir: logs_dir.clone(),
                color: false,
            };
            let facility = LogFacility::from_config(&cfg).unwrap();
            for i in 0..50 {
                facility.error(&format!("error {}", i), None);
            }
            assert_eq!(facility.sinks().len(), 1);
        }

        assert!(!logs_dir.exists());
    }

    #[test]
    fn test_production_config_writes_files() {
        let dir = tempdir().unwrap();
        let cfg = LoggingConfig {
            level: Level::Info,
            mode: DeploymentMode::Production,
            logs_dir: dir.path().join("logs"),
            color: false,
        };
        let facility = LogFacility::from_config(&cfg).unwrap();
        facility.error("persisted", None);
        facility.info("combined only", None);

        let errors = fixtures::read_lines(&cfg.error_log_path());
        let combined = fixtures::read_lines(&cfg.combined_log_path());
        assert_eq!(errors.len(), 1);
        assert_eq!(combined.len(), 2);
    }
}
