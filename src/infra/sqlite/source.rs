use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::{Connection, OpenFlags, ToSql};

use crate::domain::entities::row::{Dataset, Row, Value};
use crate::usecase::ports::source::{DataSource, FetchError, ParamValue, QueryParams};

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    Ok(conn)
}

// Runs one statement against a local database. Each query parameter is bound
// to the `:name` placeholder of the same name when the statement has one.
pub struct SqliteSource {
    pub db_path: PathBuf,
    pub sql: String,
}

impl SqliteSource {
    pub fn new(db_path: impl Into<PathBuf>, sql: &str) -> Self {
        Self {
            db_path: db_path.into(),
            sql: sql.to_string(),
        }
    }

    fn query(&self, params: &QueryParams) -> Result<Dataset> {
        let conn = open_connection(&self.db_path)?;
        let mut stmt = conn
            .prepare(&self.sql)
            .with_context(|| format!("failed to prepare query: {}", self.sql))?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_string).collect();

        let mut bindings: Vec<(String, &ParamValue)> = Vec::new();
        for (name, value) in params {
            let placeholder = format!(":{name}");
            if stmt
                .parameter_index(&placeholder)
                .context("failed to inspect query parameters")?
                .is_some()
            {
                bindings.push((placeholder, value));
            }
        }
        debug!(
            "sqlite {}: binding {} of {} parameters",
            self.db_path.display(),
            bindings.len(),
            params.len()
        );
        let named: Vec<(&str, &dyn ToSql)> = bindings
            .iter()
            .map(|(name, value)| (name.as_str(), *value as &dyn ToSql))
            .collect();

        let mut rows = stmt
            .query(named.as_slice())
            .context("failed to run query")?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().context("failed to read query row")? {
            let mut record = Row::new();
            for (col_idx, column) in columns.iter().enumerate() {
                let cell = row
                    .get_ref(col_idx)
                    .with_context(|| format!("failed to read column {column}"))?;
                record.insert(column.clone(), value_from_sql(cell));
            }
            out.push(record);
        }

        Ok(Dataset::with_columns(columns, out))
    }
}

impl DataSource for SqliteSource {
    fn fetch(&self, params: &QueryParams) -> Result<Dataset, FetchError> {
        self.query(params)
            .map_err(|err| FetchError::transport(format!("{err:#}")))
    }
}

fn value_from_sql(cell: ValueRef<'_>) -> Value {
    match cell {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(number) => Value::Number(number as f64),
        ValueRef::Real(number) => Value::Number(number),
        ValueRef::Text(text) | ValueRef::Blob(text) => {
            Value::Text(String::from_utf8_lossy(text).into_owned())
        }
    }
}

impl ToSql for ParamValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            ParamValue::Int(value) => ToSqlOutput::Owned(SqlValue::Integer(*value)),
            ParamValue::Float(value) => ToSqlOutput::Owned(SqlValue::Real(*value)),
            ParamValue::Text(text) => ToSqlOutput::Borrowed(ValueRef::Text(text.as_bytes())),
        })
    }
}
