//! Converter application.
//!
//! Examples record [`Conversion`]s: converter chains over runs of tokens.
//! When a recognition is built, the winning example's outputs are turned into
//! JSON values and every chain is applied innermost first.
//!
//! Built-in converters:
//!
//! | Name    | Effect                                 |
//! |---------|----------------------------------------|
//! | `int`   | parse each value as an integer         |
//! | `float` | parse each value as a float            |
//! | `bool`  | parse `true`/`false`                   |
//! | `upper` | upper-case strings                     |
//! | `lower` | lower-case strings                     |
//!
//! Custom converters registered under the same name take precedence. A
//! converter that is unknown or fails leaves its input unchanged and logs a
//! warning.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Number, Value};
use tracing::warn;

use fuzzyintent_grammar::{Converter, ExampleToken};

/// A converter function: input values and converter arguments to output
/// values.
pub type ConverterFn = dyn Fn(&[Value], &[String]) -> Result<Vec<Value>, String> + Send + Sync;

/// Registry of custom converters layered over the built-ins.
#[derive(Clone, Default)]
pub struct Converters {
    custom: HashMap<String, Arc<ConverterFn>>,
}

impl fmt::Debug for Converters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.custom.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Converters").field("custom", &names).finish()
    }
}

impl Converters {
    /// Creates a registry with only the built-in converters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom converter.
    pub fn insert<F>(&mut self, name: impl Into<String>, converter: F)
    where
        F: Fn(&[Value], &[String]) -> Result<Vec<Value>, String> + Send + Sync + 'static,
    {
        self.custom.insert(name.into(), Arc::new(converter));
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with<F>(mut self, name: impl Into<String>, converter: F) -> Self
    where
        F: Fn(&[Value], &[String]) -> Result<Vec<Value>, String> + Send + Sync + 'static,
    {
        self.insert(name, converter);
        self
    }

    /// Returns true if `name` is a custom or built-in converter.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.custom.contains_key(name) || builtin(name, &[]).is_some()
    }

    /// Applies one converter. Unknown or failing converters return `values`.
    #[must_use]
    pub fn apply(&self, converter: &Converter, values: Vec<Value>) -> Vec<Value> {
        let result = match self.custom.get(&converter.name) {
            Some(custom) => Some(custom(&values, &converter.args)),
            None => builtin(&converter.name, &values),
        };
        match result {
            Some(Ok(converted)) => converted,
            Some(Err(message)) => {
                warn!(converter = %converter.name, %message, "converter failed");
                values
            }
            None => {
                warn!(converter = %converter.name, "unknown converter");
                values
            }
        }
    }

    /// Applies a chain of converters in order.
    #[must_use]
    pub fn apply_chain(&self, chain: &[Converter], values: Vec<Value>) -> Vec<Value> {
        chain
            .iter()
            .fold(values, |values, converter| self.apply(converter, values))
    }

    /// Output values of a token run with every conversion inside it applied.
    ///
    /// Empty outputs are dropped. A conversion reaching past the end of the
    /// run is cut off there.
    #[must_use]
    pub fn convert(&self, tokens: &[ExampleToken]) -> Vec<Value> {
        let mut values = Vec::new();
        let mut at = 0;
        while at < tokens.len() {
            at = self.convert_at(tokens, at, tokens[at].conversions.len(), &mut values);
        }
        values
    }

    /// Converts from token `at` under its first `depth` conversions and
    /// returns the index after the covered tokens.
    fn convert_at(&self, tokens: &[ExampleToken], at: usize, depth: usize, out: &mut Vec<Value>) -> usize {
        let Some(conversion) = depth.checked_sub(1).map(|d| &tokens[at].conversions[d]) else {
            let output = tokens[at].output();
            if !output.is_empty() {
                out.push(Value::String(output.to_string()));
            }
            return at + 1;
        };

        let end = (at + conversion.len).min(tokens.len());
        let mut inner = Vec::new();
        let mut next = self.convert_at(tokens, at, depth - 1, &mut inner);
        while next < end {
            next = self.convert_at(tokens, next, tokens[next].conversions.len(), &mut inner);
        }
        out.extend(self.apply_chain(&conversion.converters, inner));
        next
    }
}

/// Text form of a value: strings as-is, everything else as JSON.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Collapses converted values into one: a single value is kept, anything
/// else becomes the space-joined text.
#[must_use]
pub fn single_value(mut values: Vec<Value>) -> Value {
    if values.len() == 1 {
        return values.remove(0);
    }
    Value::String(values.iter().map(value_text).collect::<Vec<_>>().join(" "))
}

fn builtin(name: &str, values: &[Value]) -> Option<Result<Vec<Value>, String>> {
    let convert: fn(&Value) -> Result<Value, String> = match name {
        "int" => to_int,
        "float" => to_float,
        "bool" => to_bool,
        "upper" => |v| Ok(map_str(v, str::to_uppercase)),
        "lower" => |v| Ok(map_str(v, str::to_lowercase)),
        _ => return None,
    };
    Some(values.iter().map(convert).collect())
}

fn map_str(value: &Value, f: fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(s)),
        other => other.clone(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_int(value: &Value) -> Result<Value, String> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
        Value::Number(n) => n
            .as_f64()
            .map(|f| Value::from(f.trunc() as i64))
            .ok_or_else(|| format!("{n} is not an integer")),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| format!("'{s}' is not an integer: {e}")),
        other => Err(format!("{other} is not an integer")),
    }
}

fn to_float(value: &Value) -> Result<Value, String> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| format!("{value} is not a number"))
}

fn to_bool(value: &Value) -> Result<Value, String> {
    match value {
        Value::Bool(_) => Ok(value.clone()),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
        other => Err(format!("{other} is not a boolean")),
    }
}
