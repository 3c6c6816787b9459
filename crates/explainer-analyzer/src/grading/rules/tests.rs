//! Tests for individual grading rules

use super::*;
use crate::explain::PlanRow;
use crate::grade::Grade;
use crate::query::QueryModel;
use crate::test_support::CannedExecutor;

fn report(access_type: AccessType, extra: &str) -> QueryReport {
    QueryReport::new(
        PlanRow::new(QueryModel::new("select id from users"))
            .with_access_type(access_type)
            .with_extra(extra),
    )
}

fn report_for(query: QueryModel) -> QueryReport {
    QueryReport::new(PlanRow::new(query))
}

// ============================================================================
// Access type
// ============================================================================

mod access_type_rule {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_scan() {
        let r = access_type(report(AccessType::All, "Using where"));
        assert_eq!(r.grade.value(), 1.0);
        assert!(r.warning(Rule::AccessType).unwrap().contains("\"ALL\""));
    }

    #[test]
    fn test_index_without_covering_index() {
        let r = access_type(report(AccessType::Index, ""));
        assert_eq!(r.grade.value(), 1.0);
        assert!(r.warning(Rule::AccessType).unwrap().contains("FULL TABLE SCAN"));
    }

    #[test]
    fn test_index_with_covering_index() {
        let r = access_type(report(AccessType::Index, "Using index"));
        assert_eq!(r.grade.value(), 2.0);
        assert!(r.warning(Rule::AccessType).is_some());
    }

    #[test]
    fn test_range_without_covering_index() {
        let r = access_type(report(AccessType::Range, "Using where"));
        assert_eq!(r.grade.value(), 3.0);
        assert!(r.warning(Rule::AccessType).is_some());
    }

    #[test]
    fn test_range_with_covering_index() {
        let r = access_type(report(AccessType::Range, "Using where; Using index"));
        assert_eq!(r.grade.value(), 4.0);
        assert_eq!(r.warning(Rule::AccessType), None);
    }

    #[test]
    fn test_const_and_ref_are_best() {
        for kind in [AccessType::Const, AccessType::Ref] {
            let r = access_type(report(kind, ""));
            assert_eq!(r.grade.value(), 5.0);
            assert!(r.warnings.is_empty());
        }
    }

    #[test]
    fn test_unlisted_access_types_are_not_judged() {
        for kind in [
            AccessType::EqRef,
            AccessType::System,
            AccessType::Other("index_merge".into()),
        ] {
            let r = access_type(report(kind, ""));
            assert_eq!(r.grade, Grade::best());
            assert!(r.warnings.is_empty());
        }
    }

    #[test]
    fn test_null_access_type_is_not_judged() {
        let r = access_type(report_for(QueryModel::new("select 1")));
        assert_eq!(r.grade, Grade::best());
    }

    #[test]
    fn test_never_raises_a_lower_grade() {
        let mut r = report(AccessType::Const, "");
        r.grade = Grade::new(2.0);
        assert_eq!(access_type(r).grade.value(), 2.0);
    }
}

// ============================================================================
// Plan-based penalties
// ============================================================================

mod plan_penalties {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filtered(pct: f64) -> QueryReport {
        QueryReport::new(
            PlanRow::new(QueryModel::new("select id from users"))
                .with_rows(1000)
                .with_filtered(pct),
        )
    }

    #[test]
    fn test_filtered_thresholds() {
        assert_eq!(filtered_rows(filtered(50.0)).grade.value(), 5.0);
        assert_eq!(filtered_rows(filtered(49.0)).grade.value(), 4.0);
        assert_eq!(filtered_rows(filtered(33.0)).grade.value(), 4.0);
        assert_eq!(filtered_rows(filtered(32.9)).grade.value(), 3.0);
    }

    #[test]
    fn test_filtered_warning_cites_rows_and_percentage() {
        let r = filtered_rows(filtered(25.0));
        let warning = r.warning(Rule::FilteredRows).unwrap();
        assert!(warning.contains("1000 rows"));
        assert!(warning.contains("25.00%"));
    }

    #[test]
    fn test_null_filtered_is_not_penalized() {
        let r = filtered_rows(report_for(QueryModel::new("select id from users")));
        assert_eq!(r.grade, Grade::best());
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn test_filesort_and_temp_table() {
        let r = temp_table(filesort(report(
            AccessType::Ref,
            "Using where; Using temporary; Using filesort",
        )));
        assert_eq!(r.grade.value(), 4.0);
        assert!(r.warning(Rule::Filesort).is_some());
        assert!(r.warning(Rule::TempTable).is_some());
    }
}

// ============================================================================
// SQL text penalties
// ============================================================================

mod text_penalties {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_select_star() {
        let r = select_star(report_for(QueryModel::new("SELECT * FROM users")));
        assert_eq!(r.grade.value(), 4.75);
        assert!(r.warning(Rule::SelectStar).is_some());
    }

    #[test]
    fn test_like_pattern() {
        let r = like_pattern(report_for(QueryModel::with_bindings(
            "select id from users where username like ?",
            ["%john%"],
        )));
        assert_eq!(r.grade.value(), 4.5);
        assert!(r.warning(Rule::LikePattern).is_some());
    }

    #[test]
    fn test_subquery_in_select() {
        let r = subquery_in_select(report_for(QueryModel::new(
            "select users.id, (select count(*) from orders where orders.user_id = users.id) from users",
        )));
        assert_eq!(r.grade.value(), 3.0);
        assert!(r.warning(Rule::SubqueryInSelect).unwrap().contains("N+1"));
    }
}

// ============================================================================
// Join order
// ============================================================================

mod join_order_rule {
    use super::*;
    use pretty_assertions::assert_eq;

    const JOIN: &str = "select * from users join orders o on o.user_id=users.id join order_items i on i.order_id=o.id";

    #[tokio::test]
    async fn test_largest_first_is_accepted() {
        let executor = CannedExecutor::new()
            .with_count("orders", 5000)
            .with_count("order_items", 200);

        let r = join_order(report_for(QueryModel::new(JOIN)), &executor).await;
        assert_eq!(r.grade, Grade::best());
        assert_eq!(r.warning(Rule::JoinOrder), None);
        assert_eq!(executor.calls(), vec!["count orders", "count order_items"]);
    }

    #[tokio::test]
    async fn test_out_of_order_is_penalized() {
        let executor = CannedExecutor::new()
            .with_count("orders", 200)
            .with_count("order_items", 5000);

        let r = join_order(report_for(QueryModel::new(JOIN)), &executor).await;
        assert_eq!(r.grade.value(), 4.75);
        let warning = r.warning(Rule::JoinOrder).unwrap();
        assert!(warning.contains("orders (200 rows), order_items (5000 rows)"));
    }

    #[tokio::test]
    async fn test_failed_count_skips_the_rule() {
        let executor = CannedExecutor::new().with_count("orders", 200);

        let r = join_order(report_for(QueryModel::new(JOIN)), &executor).await;
        assert_eq!(r.grade, Grade::best());
        assert!(r.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_no_joins_issues_no_counts() {
        let executor = CannedExecutor::new();

        let r = join_order(report_for(QueryModel::new("select id from users")), &executor).await;
        assert_eq!(r.grade, Grade::best());
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_using_clause_joins_are_counted() {
        let executor = CannedExecutor::new()
            .with_count("orders", 10)
            .with_count("order_items", 900);
        let query = QueryModel::new(
            "select * from users join orders using (user_id) join order_items using (order_id)",
        );

        let r = join_order(report_for(query), &executor).await;
        assert_eq!(executor.calls(), vec!["count orders", "count order_items"]);
        assert_eq!(r.grade.value(), 4.75);
    }
}
