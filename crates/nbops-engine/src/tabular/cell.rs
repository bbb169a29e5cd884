use std::fmt;

use serde_json::Value;

/// One table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    /// Whole number kept exactly. JSON integers beyond 2^53 survive the CSV.
    Integer(i128),
    Number(f64),
    Text(String),
}

impl Cell {
    /// Infer a cell from a CSV field.
    pub fn parse(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Cell::Null;
        }
        match trimmed {
            "true" | "True" | "TRUE" => return Cell::Bool(true),
            "false" | "False" | "FALSE" => return Cell::Bool(false),
            _ => {}
        }
        if let Ok(i) = trimmed.parse::<i128>() {
            return Cell::Integer(i);
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(field.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(i) => Some(*i as f64),
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// CSV field text. Integral numbers are written without a fraction.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Bool(true) => "True".to_string(),
            Cell::Bool(false) => "False".to_string(),
            Cell::Integer(i) => i.to_string(),
            Cell::Number(n) => format_number(*n),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Cell::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Cell::Integer(i128::from(u))
                } else {
                    n.as_f64().map(Cell::Number).unwrap_or(Cell::Null)
                }
            }
            Value::String(s) => Cell::Text(s.clone()),
            // Nested values are kept as their JSON text.
            other => Cell::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_field())
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_infers_types() {
        assert_eq!(Cell::parse(""), Cell::Null);
        assert_eq!(Cell::parse("  "), Cell::Null);
        assert_eq!(Cell::parse("30"), Cell::Integer(30));
        assert_eq!(Cell::parse("30.0"), Cell::Number(30.0));
        assert_eq!(Cell::parse("0.73"), Cell::Number(0.73));
        assert_eq!(Cell::parse("True"), Cell::Bool(true));
        assert_eq!(Cell::parse("false"), Cell::Bool(false));
        assert_eq!(Cell::parse("monthly"), Cell::Text("monthly".into()));
        assert_eq!(Cell::parse("NaN"), Cell::Text("NaN".into()));
    }

    #[test]
    fn json_values_convert() {
        assert_eq!(Cell::from(&json!(5)), Cell::Integer(5));
        assert_eq!(Cell::from(&json!(2.5)), Cell::Number(2.5));
        assert_eq!(
            Cell::from(&json!(18446744073709551615u64)),
            Cell::Integer(18_446_744_073_709_551_615)
        );
        assert_eq!(Cell::from(&json!(null)), Cell::Null);
        assert_eq!(Cell::from(&json!("a")), Cell::Text("a".into()));
        assert_eq!(Cell::from(&json!([1, 2])), Cell::Text("[1,2]".into()));
    }

    #[test]
    fn integers_are_numeric() {
        assert_eq!(Cell::Integer(7).as_f64(), Some(7.0));
        assert_eq!(Cell::Text("7x".into()).as_f64(), None);
    }

    #[test]
    fn integral_numbers_have_no_fraction() {
        assert_eq!(Cell::Number(30.0).to_field(), "30");
        assert_eq!(Cell::Integer(9_007_199_254_740_993).to_field(), "9007199254740993");
        assert_eq!(Cell::Number(-2.5).to_field(), "-2.5");
        assert_eq!(Cell::Bool(true).to_field(), "True");
        assert_eq!(Cell::Null.to_field(), "");
    }
}
