//! Condition shapes and their SQL text
//!
//! Values are rendered as SQL text without quoting, the same way a raw
//! fragment is passed through. `%` templates are expanded printf-style.

use serde_json::Value;

/// A single condition leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `<column> <operator> <value>`
    Compare {
        column: String,
        operator: String,
        value: String,
    },
    /// SQL passed through verbatim
    Raw(String),
}

impl Condition {
    pub fn compare<T: Into<Value>>(column: &str, operator: &str, value: T) -> Self {
        Condition::Compare {
            column: column.to_string(),
            operator: operator.to_string(),
            value: value_sql(&value.into()),
        }
    }

    /// Compare against a `%` template expanded with `args`
    pub fn compare_template(column: &str, operator: &str, template: &str, args: &[Value]) -> Self {
        Condition::Compare {
            column: column.to_string(),
            operator: operator.to_string(),
            value: expand_template(template, args),
        }
    }

    /// Equality from exactly two strings.
    ///
    /// `operand` is read as a value template if it contains `%`, otherwise
    /// as a literal. This is purely textual: a literal that happens to
    /// contain `%` goes through template expansion.
    pub fn pair(column: &str, operand: &str, args: &[Value]) -> Self {
        let value = if is_template(operand) {
            expand_template(operand, args)
        } else {
            operand.to_string()
        };

        Condition::Compare {
            column: column.to_string(),
            operator: "=".to_string(),
            value,
        }
    }

    pub fn raw(sql: &str) -> Self {
        Condition::Raw(sql.to_string())
    }

    pub fn template(template: &str, args: &[Value]) -> Self {
        Condition::Raw(expand_template(template, args))
    }

    pub fn between<T: Into<Value>>(column: &str, low: T, high: T, negated: bool) -> Self {
        let keyword = if negated { "NOT BETWEEN" } else { "BETWEEN" };
        Condition::Raw(format!(
            "{} {} {} AND {}",
            column,
            keyword,
            value_sql(&low.into()),
            value_sql(&high.into())
        ))
    }

    pub fn in_list<I, T>(column: &str, values: I, negated: bool) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let keyword = if negated { "NOT IN" } else { "IN" };
        let values: Vec<String> = values
            .into_iter()
            .map(|v| value_sql(&v.into()))
            .collect();
        Condition::Raw(format!("{} {} ({})", column, keyword, values.join(", ")))
    }

    pub fn null(column: &str, negated: bool) -> Self {
        let keyword = if negated { "IS NOT NULL" } else { "IS NULL" };
        Condition::Raw(format!("{} {}", column, keyword))
    }

    pub fn to_sql(&self) -> String {
        match self {
            Condition::Compare {
                column,
                operator,
                value,
            } => format!("{} {} {}", column, operator, value),
            Condition::Raw(sql) => sql.clone(),
        }
    }
}

impl From<&str> for Condition {
    fn from(sql: &str) -> Self {
        Condition::raw(sql)
    }
}

/// SQL text of a value
pub fn value_sql(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Null => "NULL".to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(value_sql).collect();
            format!("({})", items.join(", "))
        }
        Value::Object(_) => value.to_string(),
    }
}

pub fn is_template(text: &str) -> bool {
    text.contains('%')
}

/// Expand `%` conversions in `template` with `args`, in order.
///
/// `%%` yields `%`. Flags, width, precision and length modifiers are
/// accepted and ignored. A conversion without a remaining argument, or a
/// `%` that does not start a conversion, is copied as is.
pub fn expand_template(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let marker = &rest[pos..];

        if marker.starts_with("%%") {
            out.push('%');
            rest = &marker[2..];
            continue;
        }

        match conversion_len(marker) {
            Some(len) => {
                match args.next() {
                    Some(arg) => out.push_str(&value_sql(arg)),
                    None => out.push_str(&marker[..len]),
                }
                rest = &marker[len..];
            }
            None => {
                out.push('%');
                rest = &marker[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn conversion_len(marker: &str) -> Option<usize> {
    let bytes = marker.as_bytes();
    let mut i = 1;

    while i < bytes.len() && b"-+ #0".contains(&bytes[i]) {
        i += 1;
    }
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.' || bytes[i] == b'*') {
        i += 1;
    }
    while i < bytes.len() && b"hlLqjzt".contains(&bytes[i]) {
        i += 1;
    }

    match bytes.get(i) {
        Some(c) if b"sdiuoxXfFeEgGc".contains(c) => Some(i + 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_sql() {
        assert_eq!(value_sql(&json!(100)), "100");
        assert_eq!(value_sql(&json!(1.5)), "1.5");
        assert_eq!(value_sql(&json!("'Bob'")), "'Bob'");
        assert_eq!(value_sql(&json!(true)), "TRUE");
        assert_eq!(value_sql(&Value::Null), "NULL");
        assert_eq!(value_sql(&json!([1, 2, 3])), "(1, 2, 3)");
    }

    #[test]
    fn test_expand_template() {
        assert_eq!(
            expand_template("id > %d AND name = '%s'", &[json!(5), json!("Ann")]),
            "id > 5 AND name = 'Ann'"
        );
        assert_eq!(expand_template("%ld%%", &[json!(42)]), "42%");
        assert_eq!(expand_template("%-08.3f", &[json!(2.5)]), "2.5");
    }

    #[test]
    fn test_expand_template_leaves_unmatched_markers() {
        assert_eq!(expand_template("a = %d, b = %d", &[json!(1)]), "a = 1, b = %d");
        assert_eq!(expand_template("100%", &[]), "100%");
        assert_eq!(expand_template("50% off", &[]), "50% off");
    }

    #[test]
    fn test_pair_heuristic() {
        assert_eq!(Condition::pair("id", "%d", &[json!(7)]).to_sql(), "id = 7");
        assert_eq!(Condition::pair("name", "'Bob'", &[]).to_sql(), "name = 'Bob'");
        // Textual: a literal with a `%` conversion is still expanded
        assert_eq!(
            Condition::pair("code", "'%s'", &[json!("x")]).to_sql(),
            "code = 'x'"
        );
    }

    #[test]
    fn test_condition_shapes() {
        assert_eq!(Condition::compare("age", ">=", 18).to_sql(), "age >= 18");
        assert_eq!(
            Condition::between("age", 18, 65, false).to_sql(),
            "age BETWEEN 18 AND 65"
        );
        assert_eq!(
            Condition::between("age", 18, 65, true).to_sql(),
            "age NOT BETWEEN 18 AND 65"
        );
        assert_eq!(
            Condition::in_list("id", vec![1, 2, 3], false).to_sql(),
            "id IN (1, 2, 3)"
        );
        assert_eq!(
            Condition::in_list("id", vec![4], true).to_sql(),
            "id NOT IN (4)"
        );
        assert_eq!(Condition::null("deleted_at", false).to_sql(), "deleted_at IS NULL");
        assert_eq!(
            Condition::null("deleted_at", true).to_sql(),
            "deleted_at IS NOT NULL"
        );
        assert_eq!(Condition::from("1 = 1").to_sql(), "1 = 1");
    }
}
