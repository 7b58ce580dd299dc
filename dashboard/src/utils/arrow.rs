use arrow::array::{Array, ArrayRef, AsArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Float64Type, Int64Type, Schema};
use arrow::record_batch::RecordBatch;
use common::{Error, Result};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Statement};
use std::sync::Arc;

/// Runs a prepared statement and collects the rows into one record batch.
///
/// Column types follow the SQLite storage classes seen in the data: any text
/// makes a `Utf8` column, otherwise any real makes `Float64`, otherwise
/// integers make `Int64`. A column with no values at all is `Utf8`.
pub fn query_to_batch(stmt: &mut Statement<'_>, params: &[Value]) -> Result<RecordBatch> {
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); names.len()];

    let mut rows = stmt.query(params_from_iter(params.iter()))?;
    while let Some(row) = rows.next()? {
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(row.get::<_, Value>(idx)?);
        }
    }

    let mut fields = Vec::with_capacity(names.len());
    let mut arrays = Vec::with_capacity(names.len());
    for (name, values) in names.iter().zip(columns) {
        let (data_type, array) = values_to_array(name, values)?;
        fields.push(Field::new(name, data_type, true));
        arrays.push(array);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

fn values_to_array(name: &str, values: Vec<Value>) -> Result<(DataType, ArrayRef)> {
    let mut has_text = false;
    let mut has_real = false;
    let mut has_integer = false;
    for value in &values {
        match value {
            Value::Text(_) => has_text = true,
            Value::Real(_) => has_real = true,
            Value::Integer(_) => has_integer = true,
            Value::Null => {}
            Value::Blob(_) => {
                return Err(Error::SchemaMismatch(format!(
                    "Column {} holds blobs, which reports do not read",
                    name
                )));
            }
        }
    }

    if has_text || !(has_real || has_integer) {
        let array: StringArray = values
            .into_iter()
            .map(|value| match value {
                Value::Text(text) => Some(text),
                Value::Integer(int) => Some(int.to_string()),
                Value::Real(real) => Some(real.to_string()),
                _ => None,
            })
            .collect();
        Ok((DataType::Utf8, Arc::new(array)))
    } else if has_real {
        let array: Float64Array = values
            .iter()
            .map(|value| match value {
                Value::Real(real) => Some(*real),
                Value::Integer(int) => Some(*int as f64),
                _ => None,
            })
            .collect();
        Ok((DataType::Float64, Arc::new(array)))
    } else {
        let array: Int64Array = values
            .iter()
            .map(|value| match value {
                Value::Integer(int) => Some(*int),
                _ => None,
            })
            .collect();
        Ok((DataType::Int64, Arc::new(array)))
    }
}

pub fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| Error::SchemaMismatch(format!("Result has no column {}", name)))
}

fn all_null(array: &ArrayRef) -> bool {
    array.data_type() == &DataType::Utf8 && array.null_count() == array.len()
}

pub fn string_values(batch: &RecordBatch, name: &str) -> Result<Vec<Option<String>>> {
    let array = column(batch, name)?;
    match array.data_type() {
        DataType::Utf8 => Ok(array
            .as_string::<i32>()
            .iter()
            .map(|value| value.map(str::to_string))
            .collect()),
        other => Err(Error::SchemaMismatch(format!(
            "Column {} is {}, expected text",
            name, other
        ))),
    }
}

pub fn f64_values(batch: &RecordBatch, name: &str) -> Result<Vec<Option<f64>>> {
    let array = column(batch, name)?;
    match array.data_type() {
        DataType::Float64 => Ok(array.as_primitive::<Float64Type>().iter().collect()),
        DataType::Int64 => Ok(array
            .as_primitive::<Int64Type>()
            .iter()
            .map(|value| value.map(|v| v as f64))
            .collect()),
        _ if all_null(array) => Ok(vec![None; array.len()]),
        other => Err(Error::SchemaMismatch(format!(
            "Column {} is {}, expected a number",
            name, other
        ))),
    }
}

pub fn i64_values(batch: &RecordBatch, name: &str) -> Result<Vec<Option<i64>>> {
    let array = column(batch, name)?;
    match array.data_type() {
        DataType::Int64 => Ok(array.as_primitive::<Int64Type>().iter().collect()),
        DataType::Float64 => Ok(array
            .as_primitive::<Float64Type>()
            .iter()
            .map(|value| value.map(|v| v.round() as i64))
            .collect()),
        _ if all_null(array) => Ok(vec![None; array.len()]),
        other => Err(Error::SchemaMismatch(format!(
            "Column {} is {}, expected an integer",
            name, other
        ))),
    }
}

/// Unwraps a cell that the report cannot do without.
pub fn required<T>(value: Option<T>, name: &str, row: usize) -> Result<T> {
    value.ok_or_else(|| Error::SchemaMismatch(format!("Column {} is NULL in row {}", name, row)))
}
