//! Tests for MySQL value conversion and error classification

use super::*;

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_connection_limit_is_exhaustion() {
        let err = classify_server_error(1040, "Too many connections");
        assert!(matches!(err, ExplainerError::TooManyConnections(_)));
        assert!(err.is_too_many_connections());
    }

    #[test]
    fn test_user_connection_limit_is_exhaustion() {
        let err = classify_server_error(
            1203,
            "User root already has more than 'max_user_connections' active connections",
        );
        assert!(err.is_too_many_connections());
    }

    #[test]
    fn test_other_server_errors_are_query_errors() {
        let err = classify_server_error(1054, "Unknown column 'nope' in 'field list'");
        match err {
            ExplainerError::Query(message) => {
                assert_eq!(message, "ERROR 1054: Unknown column 'nope' in 'field list'")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

mod values {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_protocol_integers() {
        let value = mysql_value_to_value(
            mysql_async::Value::Bytes(b"1200".to_vec()),
            ColumnType::MYSQL_TYPE_LONGLONG,
        );
        assert_eq!(value, Value::Int64(1200));
    }

    #[test]
    fn test_text_protocol_floats() {
        let value = mysql_value_to_value(
            mysql_async::Value::Bytes(b"33.33".to_vec()),
            ColumnType::MYSQL_TYPE_DOUBLE,
        );
        assert_eq!(value, Value::Float64(33.33));
    }

    #[test]
    fn test_text_protocol_strings() {
        let value = mysql_value_to_value(
            mysql_async::Value::Bytes(b"Using where".to_vec()),
            ColumnType::MYSQL_TYPE_VAR_STRING,
        );
        assert_eq!(value, Value::String("Using where".into()));
    }

    #[test]
    fn test_binary_values() {
        assert_eq!(
            mysql_value_to_value(mysql_async::Value::UInt(7), ColumnType::MYSQL_TYPE_LONGLONG),
            Value::Int64(7)
        );
        assert_eq!(
            mysql_value_to_value(mysql_async::Value::UInt(u64::MAX), ColumnType::MYSQL_TYPE_LONGLONG),
            Value::Decimal(u64::MAX.to_string())
        );
        assert_eq!(
            mysql_value_to_value(mysql_async::Value::NULL, ColumnType::MYSQL_TYPE_NULL),
            Value::Null
        );
    }

    #[test]
    fn test_dates() {
        let date = mysql_value_to_value(
            mysql_async::Value::Date(2024, 12, 13, 0, 0, 0, 0),
            ColumnType::MYSQL_TYPE_DATE,
        );
        assert_eq!(
            date,
            Value::Date(chrono::NaiveDate::from_ymd_opt(2024, 12, 13).unwrap())
        );

        let datetime = mysql_value_to_value(
            mysql_async::Value::Date(2024, 12, 13, 20, 6, 25, 0),
            ColumnType::MYSQL_TYPE_DATETIME,
        );
        assert!(matches!(datetime, Value::DateTime(_)));
    }

    #[test]
    fn test_bindings_are_sent_as_text() {
        assert_eq!(
            value_to_param(&Value::String("%john%".into())),
            mysql_async::Value::Bytes(b"%john%".to_vec())
        );
        assert_eq!(value_to_param(&Value::Int64(10)), mysql_async::Value::Int(10));
        assert_eq!(value_to_param(&Value::Null), mysql_async::Value::NULL);
    }
}
