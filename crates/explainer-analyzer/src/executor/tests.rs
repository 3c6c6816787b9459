//! Tests for ConnectionExecutor row decoding

use super::*;
use crate::explain::AccessType;
use crate::test_support::{Canned, CannedConnection};
use explainer_core::{QueryResult, Value};

fn text(s: &str) -> Value {
    Value::String(s.to_string())
}

fn executor(connection: CannedConnection) -> (Arc<CannedConnection>, ConnectionExecutor) {
    let connection = Arc::new(connection);
    let executor = ConnectionExecutor::new(connection.clone());
    (connection, executor)
}

fn explain_result() -> QueryResult {
    QueryResult::from_rows(
        &[
            "id",
            "select_type",
            "table",
            "partitions",
            "type",
            "possible_keys",
            "key",
            "key_len",
            "ref",
            "rows",
            "filtered",
            "Extra",
        ],
        vec![vec![
            Value::Int64(1),
            text("SIMPLE"),
            text("users"),
            Value::Null,
            text("ALL"),
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Int64(1200),
            Value::Float64(11.11),
            text("Using where"),
        ]],
    )
}

mod explain {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_explain_binds_parameters() {
        let query = QueryModel::with_bindings("select * from users where username like ?", ["%jo%"]);
        let (connection, executor) = executor(
            CannedConnection::new().with_result(&query.as_explain(), explain_result()),
        );

        let plan = executor.explain(&query).await.unwrap().unwrap();

        assert_eq!(plan.access_type, Some(AccessType::All));
        assert_eq!(plan.rows, Some(1200));
        assert_eq!(plan.query, query);
        assert_eq!(
            connection.calls(),
            vec![(
                "EXPLAIN select * from users where username like ?".to_string(),
                vec![text("%jo%")]
            )]
        );
    }

    #[tokio::test]
    async fn test_explain_without_rows() {
        let query = QueryModel::new("select 1 from dual where false");
        let (_, executor) = executor(
            CannedConnection::new().with_result(&query.as_explain(), QueryResult::empty()),
        );

        assert_eq!(executor.explain(&query).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_explain_error_propagates() {
        let query = QueryModel::new("select * from users");
        let (_, executor) = executor(
            CannedConnection::new().with_answer(&query.as_explain(), Canned::TooManyConnections),
        );

        let err = executor.explain(&query).await.unwrap_err();
        assert!(err.is_too_many_connections());
    }
}

mod metadata {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_count_rows() {
        let (connection, executor) = executor(CannedConnection::new().with_result(
            "select count(*) from orders",
            QueryResult::from_rows(&["count(*)"], vec![vec![Value::Int64(42)]]),
        ));

        assert_eq!(executor.count_rows("orders").await.unwrap(), 42);
        assert_eq!(connection.calls()[0].1, Vec::<Value>::new());
    }

    #[tokio::test]
    async fn test_count_rows_without_result_is_zero() {
        let (_, executor) = executor(
            CannedConnection::new().with_result("select count(*) from orders", QueryResult::empty()),
        );

        assert_eq!(executor.count_rows("orders").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_show_columns_keeps_string_columns() {
        let rows = vec![
            vec![text("id"), text("bigint unsigned"), text("NO"), text("PRI"), Value::Null, text("auto_increment")],
            vec![text("email"), text("varchar(255)"), text("NO"), text("UNI"), Value::Null, text("")],
            vec![text("bio"), text("longtext"), text("YES"), text(""), Value::Null, text("")],
        ];
        let (_, executor) = executor(CannedConnection::new().with_result(
            "show columns from users",
            QueryResult::from_rows(&["Field", "Type", "Null", "Key", "Default", "Extra"], rows),
        ));

        let columns = executor.show_columns("users").await.unwrap();
        let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["email", "bio"]);
    }

    #[tokio::test]
    async fn test_show_indexes() {
        let row = |key: &str, seq: i64, column: &str, cardinality: Value| {
            vec![
                text("users"),
                Value::Int64(1),
                text(key),
                Value::Int64(seq),
                text(column),
                text("A"),
                cardinality,
                Value::Null,
                Value::Null,
                text(""),
                text("BTREE"),
                text(""),
                text(""),
            ]
        };
        let columns = [
            "Table", "Non_unique", "Key_name", "Seq_in_index", "Column_name", "Collation",
            "Cardinality", "Sub_part", "Packed", "Null", "Index_type", "Comment", "Index_comment",
        ];
        let (_, executor) = executor(CannedConnection::new().with_result(
            "show index from users",
            QueryResult::from_rows(
                &columns,
                vec![
                    row("PRIMARY", 1, "id", Value::Int64(1000)),
                    row("idx_name", 1, "last_name", Value::Null),
                ],
            ),
        ));

        let indexes = executor.show_indexes("users").await.unwrap();
        assert_eq!(
            indexes,
            vec![
                IndexEntry::new("PRIMARY", "id", 1).with_cardinality(1000),
                IndexEntry::new("idx_name", "last_name", 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_max_length() {
        let (_, executor) = executor(
            CannedConnection::new()
                .with_result(
                    "select max(length(body)) from posts",
                    QueryResult::from_rows(&["max"], vec![vec![Value::Int64(5000)]]),
                )
                .with_result(
                    "select max(length(body)) from drafts",
                    QueryResult::from_rows(&["max"], vec![vec![Value::Null]]),
                ),
        );

        assert_eq!(executor.max_length("posts", "body").await.unwrap(), Some(5000));
        assert_eq!(executor.max_length("drafts", "body").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_metadata_error_propagates() {
        let (_, executor) = executor(CannedConnection::new());
        assert!(executor.show_indexes("missing").await.is_err());
    }
}
