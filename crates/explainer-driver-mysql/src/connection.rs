//! MySQL connection implementation

use async_trait::async_trait;
use explainer_core::{ColumnMeta, Connection, ExplainerError, QueryResult, Result, Row, Value};
use mysql_async::{
    Conn, Opts, OptsBuilder, Params, Pool, PoolConstraints, PoolOpts, Row as MySqlRow,
    consts::ColumnType, prelude::*,
};

/// `ER_CON_COUNT_ERROR`: the server reached `max_connections`
const ER_CON_COUNT_ERROR: u16 = 1040;

/// `ER_TOO_MANY_USER_CONNECTIONS`: the account reached `max_user_connections`
const ER_TOO_MANY_USER_CONNECTIONS: u16 = 1203;

/// MySQL connection wrapper
pub struct MySqlConnection {
    pool: Pool,
}

impl MySqlConnection {
    /// Connect to a MySQL database
    pub async fn connect(
        host: &str,
        port: u16,
        database: Option<&str>,
        user: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self> {
        tracing::info!(host = %host, port = %port, database = ?database, "connecting to MySQL database");

        let mut opts_builder = OptsBuilder::from_opts(Opts::default())
            .ip_or_hostname(host)
            .tcp_port(port);

        if let Some(db) = database {
            opts_builder = opts_builder.db_name(Some(db));
        }
        if let Some(u) = user {
            opts_builder = opts_builder.user(Some(u));
        }
        if let Some(p) = password {
            opts_builder = opts_builder.pass(Some(p));
        }

        // Statements run one at a time, a single pooled connection is enough.
        let constraints = PoolConstraints::new(1, 1).ok_or_else(|| {
            ExplainerError::Connection(
                "Failed to configure MySQL pool constraints (min=1, max=1)".into(),
            )
        })?;

        let pool_opts = PoolOpts::default()
            .with_constraints(constraints)
            .with_reset_connection(false);
        opts_builder = opts_builder.pool_opts(pool_opts);

        let pool = Pool::new(Opts::from(opts_builder));

        // Verify connectivity by acquiring and releasing a connection
        drop(
            pool.get_conn()
                .await
                .map_err(|e| classify_error("Failed to connect to MySQL", e))?,
        );

        tracing::info!(host = %host, port = %port, database = ?database, "MySQL connection established");
        Ok(Self { pool })
    }

    async fn get_conn(&self) -> Result<Conn> {
        self.pool
            .get_conn()
            .await
            .map_err(|e| classify_error("Failed to get MySQL connection", e))
    }
}

/// Maps a server error code to the error taxonomy. Connection-limit errors
/// become [`ExplainerError::TooManyConnections`] so callers can stop a batch.
pub(crate) fn classify_server_error(code: u16, message: &str) -> ExplainerError {
    match code {
        ER_CON_COUNT_ERROR | ER_TOO_MANY_USER_CONNECTIONS => {
            ExplainerError::TooManyConnections(format!("ERROR {code}: {message}"))
        }
        _ => ExplainerError::Query(format!("ERROR {code}: {message}")),
    }
}

fn classify_error(context: &str, err: mysql_async::Error) -> ExplainerError {
    match err {
        mysql_async::Error::Server(server) => {
            match classify_server_error(server.code, &server.message) {
                ExplainerError::Query(message) => {
                    ExplainerError::Query(format!("{context}: {message}"))
                }
                other => other,
            }
        }
        other => ExplainerError::Connection(format!("{context}: {other}")),
    }
}

/// Convert a binding to a mysql_async parameter
fn value_to_param(value: &Value) -> mysql_async::Value {
    match value {
        Value::Null => mysql_async::Value::NULL,
        Value::Bool(v) => mysql_async::Value::Int(i64::from(*v)),
        Value::Int64(v) => mysql_async::Value::Int(*v),
        Value::Float64(v) => mysql_async::Value::Double(*v),
        Value::Decimal(v) | Value::String(v) => mysql_async::Value::Bytes(v.as_bytes().to_vec()),
        Value::Bytes(v) => mysql_async::Value::Bytes(v.clone()),
        Value::Date(v) => mysql_async::Value::Bytes(v.to_string().into_bytes()),
        Value::DateTime(v) => {
            mysql_async::Value::Bytes(v.format("%Y-%m-%d %H:%M:%S%.f").to_string().into_bytes())
        }
    }
}

/// Convert mysql_async Value to our Value type, using column type metadata
/// to correctly interpret byte strings from the text protocol.
fn mysql_value_to_value(val: mysql_async::Value, col_type: ColumnType) -> Value {
    match val {
        mysql_async::Value::NULL => Value::Null,
        mysql_async::Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(s) => match col_type {
                ColumnType::MYSQL_TYPE_TINY
                | ColumnType::MYSQL_TYPE_SHORT
                | ColumnType::MYSQL_TYPE_LONG
                | ColumnType::MYSQL_TYPE_LONGLONG
                | ColumnType::MYSQL_TYPE_INT24
                | ColumnType::MYSQL_TYPE_YEAR => {
                    s.parse::<i64>().map(Value::Int64).unwrap_or(Value::String(s))
                }
                ColumnType::MYSQL_TYPE_FLOAT | ColumnType::MYSQL_TYPE_DOUBLE => {
                    s.parse::<f64>().map(Value::Float64).unwrap_or(Value::String(s))
                }
                ColumnType::MYSQL_TYPE_DECIMAL | ColumnType::MYSQL_TYPE_NEWDECIMAL => {
                    Value::Decimal(s)
                }
                _ => Value::String(s),
            },
            Err(e) => Value::Bytes(e.into_bytes()),
        },
        mysql_async::Value::Int(i) => Value::Int64(i),
        mysql_async::Value::UInt(u) => match i64::try_from(u) {
            Ok(i) => Value::Int64(i),
            Err(_) => Value::Decimal(u.to_string()),
        },
        mysql_async::Value::Float(f) => Value::Float64(f64::from(f)),
        mysql_async::Value::Double(d) => Value::Float64(d),
        mysql_async::Value::Date(year, month, day, hour, min, sec, micro) => {
            let date = chrono::NaiveDate::from_ymd_opt(year.into(), month.into(), day.into());
            match date {
                Some(date) if hour == 0 && min == 0 && sec == 0 && micro == 0 => Value::Date(date),
                Some(date) => date
                    .and_hms_micro_opt(hour.into(), min.into(), sec.into(), micro)
                    .map(Value::DateTime)
                    .unwrap_or_else(|| Value::String(date.to_string())),
                None => Value::String(format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                    year, month, day, hour, min, sec
                )),
            }
        }
        mysql_async::Value::Time(negative, days, hours, mins, secs, micros) => {
            let total_hours = days * 24 + u32::from(hours);
            let sign = if negative { "-" } else { "" };
            Value::String(format!(
                "{}{:02}:{:02}:{:02}.{:06}",
                sign, total_hours, mins, secs, micros
            ))
        }
    }
}

fn convert_rows(mysql_rows: Vec<MySqlRow>) -> (Vec<ColumnMeta>, Vec<Row>) {
    let mut columns = Vec::new();
    let mut column_names = Vec::new();
    let mut column_types = Vec::new();

    if let Some(first_row) = mysql_rows.first() {
        for (idx, col) in first_row.columns_ref().iter().enumerate() {
            let name = col.name_str().to_string();
            column_names.push(name.clone());
            column_types.push(col.column_type());
            columns.push(ColumnMeta {
                name,
                data_type: format!("{:?}", col.column_type()),
                ordinal: idx,
            });
        }
    }

    let rows = mysql_rows
        .into_iter()
        .map(|mysql_row| {
            let values = column_types
                .iter()
                .enumerate()
                .map(|(idx, col_type)| {
                    let mysql_val: mysql_async::Value =
                        mysql_row.get(idx).unwrap_or(mysql_async::Value::NULL);
                    mysql_value_to_value(mysql_val, *col_type)
                })
                .collect();
            Row::new(column_names.clone(), values)
        })
        .collect();

    (columns, rows)
}

#[async_trait]
impl Connection for MySqlConnection {
    fn driver_name(&self) -> &str {
        "mysql"
    }

    #[tracing::instrument(skip(self, sql, params), fields(sql_preview = %sql.chars().take(100).collect::<String>(), params = params.len()))]
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let start_time = std::time::Instant::now();
        let mut conn = self.get_conn().await?;

        let mysql_rows: Vec<MySqlRow> = if params.is_empty() {
            conn.query(sql).await
        } else {
            let params = Params::Positional(params.iter().map(value_to_param).collect());
            conn.exec(sql, params).await
        }
        .map_err(|e| classify_error("Failed to execute query", e))?;

        let (columns, rows) = convert_rows(mysql_rows);
        let execution_time_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);

        tracing::debug!(
            row_count = rows.len(),
            execution_time_ms = execution_time_ms,
            "query executed successfully"
        );

        Ok(QueryResult {
            columns,
            rows,
            execution_time_ms,
        })
    }

    async fn close(&self) -> Result<()> {
        tracing::info!("closing MySQL connection pool");
        self.pool
            .clone()
            .disconnect()
            .await
            .map_err(|e| ExplainerError::Connection(format!("Failed to close MySQL connection: {}", e)))
    }
}

#[cfg(test)]
mod tests;
