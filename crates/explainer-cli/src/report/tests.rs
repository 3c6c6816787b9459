use super::*;
use explainer_analyzer::{
    AccessType, PlanRow, QueryExecutionError, QueryModel, ResourceExhaustedError, TableReport,
};
use explainer_core::ExplainerError;

fn report(sql: &str, grade: f64) -> QueryReport {
    let mut report = QueryReport::new(
        PlanRow::new(QueryModel::new(sql)).with_access_type(AccessType::Const),
    );
    report.grade = Grade::new(grade);
    report
}

mod bands {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(GradeBand::of(Grade::new(1.0)), GradeBand::Poor);
        assert_eq!(GradeBand::of(Grade::new(2.99)), GradeBand::Poor);
        assert_eq!(GradeBand::of(Grade::new(3.0)), GradeBand::Fair);
        assert_eq!(GradeBand::of(Grade::new(3.75)), GradeBand::Fair);
        assert_eq!(GradeBand::of(Grade::new(4.0)), GradeBand::Good);
        assert_eq!(GradeBand::of(Grade::best()), GradeBand::Good);
    }

    #[test]
    fn test_render_keeps_report_text() {
        colored::control::set_override(false);
        let table = TableReport::new("users");
        assert_eq!(render(&table), "Table: users\nGrade: 5.00/5\nNo problems found");
    }
}

mod summary {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_one_row_per_report() {
        let reports = vec![
            report("SELECT id FROM users WHERE id = ?", 5.0),
            report("SELECT * FROM orders", 2.25),
        ];

        let text = summary_table(&reports).to_string();
        assert!(text.contains("SELECT id FROM users WHERE id = ?"));
        assert!(text.contains("2.25/5"));
        assert_eq!(summary_table(&reports).row_iter().count(), 2);
    }

    #[test]
    fn test_long_statements_are_shortened() {
        let sql = format!("SELECT id FROM users WHERE {}", "a = 1 AND ".repeat(20));
        let short = shorten(&sql, SUMMARY_SQL_WIDTH);

        assert_eq!(short.chars().count(), SUMMARY_SQL_WIDTH);
        assert!(short.ends_with("..."));
        assert_eq!(shorten("SELECT 1", SUMMARY_SQL_WIDTH), "SELECT 1");
    }
}

mod json {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_logs_output() {
        let reports = vec![report("SELECT id FROM users", 4.5)];
        let batch = ExplainBatch {
            plans: Vec::new(),
            skipped: vec![QueryExecutionError {
                sql: "SELECT nope FROM users".into(),
                bindings: Vec::new(),
                source: ExplainerError::Query("Unknown column 'nope'".into()),
            }],
            exhausted: None,
        };

        let json: serde_json::Value =
            serde_json::from_str(&to_json(&LogsOutput::new(&reports, &batch)).unwrap()).unwrap();

        assert_eq!(json["reports"][0]["grade"], serde_json::json!(4.5));
        assert_eq!(json["reports"][0]["plan"]["access_type"], serde_json::json!("const"));
        assert_eq!(json["skipped"][0]["sql"], serde_json::json!("SELECT nope FROM users"));
        assert!(json.get("exhausted").is_none());
    }

    #[test]
    fn test_exhaustion_is_reported() {
        let batch = ExplainBatch {
            exhausted: Some(ResourceExhaustedError {
                processed: 3,
                sql: "SELECT 1".into(),
            }),
            ..ExplainBatch::default()
        };

        let output = LogsOutput::new(&[], &batch);
        let message = output.exhausted.unwrap();
        assert!(message.contains("after 3 queries"));
        assert!(message.contains("SET GLOBAL max_connections = 255;"));
    }
}
