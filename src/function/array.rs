use super::Arguments;
use crate::{
    log::{error_argument, Error},
    value::{to_key, to_text, Map},
};
use serde_json::Value;

/// `explode(separator, text, limit = unlimited)`.
///
/// A positive limit caps the number of parts, and the last part keeps the
/// rest of the text. A negative limit drops that many parts from the end.
/// Zero counts as one.
pub fn explode(arguments: &Arguments) -> Result<Value, Error> {
    let separator = arguments.text(0)?;
    let text = arguments.text(1)?;
    let limit = arguments.integer_or_none(2)?;

    if separator.is_empty() {
        return Err(error_argument(arguments.name(), 0, "a non-empty separator"));
    }

    let parts: Vec<&str> = match limit {
        None => text.split(separator.as_str()).collect(),
        Some(limit) if limit >= 0 => {
            let limit = usize::try_from(limit.max(1)).unwrap_or(usize::MAX);
            text.splitn(limit, separator.as_str()).collect()
        }
        Some(limit) => {
            let mut parts: Vec<&str> = text.split(separator.as_str()).collect();
            let keep = parts
                .len()
                .saturating_sub(usize::try_from(limit.unsigned_abs()).unwrap_or(usize::MAX));
            parts.truncate(keep);
            parts
        }
    };

    Ok(Value::Array(parts.into_iter().map(Value::from).collect()))
}

/// `implode(separator, list)` or `implode(list)`.
///
/// The list may also come first, followed by the separator.
pub fn implode(arguments: &Arguments) -> Result<Value, Error> {
    let (separator, list) = match (arguments.value(0), arguments.len()) {
        (_, 1) => (String::new(), arguments.list(0)?),
        (Some(Value::Array(list)), _) => (arguments.text(1)?, list),
        _ => (arguments.text(0)?, arguments.list(1)?),
    };

    let items = list
        .iter()
        .map(to_text)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| error_argument(arguments.name(), 1, "a list of text"))?;

    Ok(Value::from(items.join(&separator)))
}

/// `array_column(rows, column, index = none)`.
///
/// Collects `column` from every row that has it. With `index`, the result is
/// a map keyed by each row's `index` value instead of a list.
pub fn array_column(arguments: &Arguments) -> Result<Value, Error> {
    let rows = arguments.list(0)?;
    let column = to_key(arguments.value(1).unwrap_or(&Value::Null))
        .ok_or_else(|| error_argument(arguments.name(), 1, "a key"))?;
    let index = arguments
        .value(2)
        .map(|index| to_key(index).ok_or_else(|| error_argument(arguments.name(), 2, "a key")))
        .transpose()?;

    let picked = rows
        .iter()
        .filter_map(|row| field(row, &column).map(|value| (row, value)));

    let Some(index) = index else {
        return Ok(Value::Array(picked.map(|(_, value)| value.clone()).collect()));
    };

    let mut keyed = Map::new();
    for (position, (row, value)) in picked.enumerate() {
        let key = field(row, &index)
            .and_then(to_key)
            .unwrap_or_else(|| position.to_string());
        keyed.insert(key, value.clone());
    }

    Ok(Value::Object(keyed))
}

fn field<'v>(row: &'v Value, key: &str) -> Option<&'v Value> {
    match row {
        Value::Object(map) => map.get(key),
        Value::Array(list) => key.parse::<usize>().ok().and_then(|index| list.get(index)),
        _ => None,
    }
}
