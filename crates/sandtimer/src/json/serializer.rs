//! Compact JSON serializer.

use super::value::Value;

/// Integral doubles below this magnitude are written as plain integers.
pub(crate) const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SerializeError {
    #[error("Cannot serialise non-finite number {0}")]
    NonFiniteNumber(f64),
}

/// Serialize `value` without any inserted whitespace.
pub fn to_string(value: &Value) -> Result<String, SerializeError> {
    let mut out = String::new();
    write_value(value, &mut out)?;
    Ok(out)
}

/// Serialize `value` to UTF-8 bytes.
pub fn to_vec(value: &Value) -> Result<Vec<u8>, SerializeError> {
    to_string(value).map(String::into_bytes)
}

fn write_value(value: &Value, out: &mut String) -> Result<(), SerializeError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(*n, out)?,
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out)?;
            }
            out.push(']');
        }
        Value::Object(members) => {
            out.push('{');
            for (i, (key, item)) in members.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_value(item, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn write_number(n: f64, out: &mut String) -> Result<(), SerializeError> {
    if !n.is_finite() {
        return Err(SerializeError::NonFiniteNumber(n));
    }
    if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
        // Also folds -0.0 into "0".
        out.push_str(&(n as i64).to_string());
    } else {
        // Debug is the shortest round-trip form and switches to exponent
        // notation for very large or small magnitudes, both valid JSON.
        out.push_str(&format!("{n:?}"));
    }
    Ok(())
}

fn write_string(s: &str, out: &mut String) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let byte = c as u8;
                out.push_str("\\u00");
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0F) as usize] as char);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl Value {
    /// Compact serialization; fails on non-finite numbers.
    pub fn dump(&self) -> Result<String, SerializeError> {
        to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::parse;
    use crate::{array, object};

    #[test]
    fn test_compact_output() {
        let doc = object! {
            "b" => array![1, true, Value::Null],
            "a" => object! { "x" => "y" },
        };
        assert_eq!(to_string(&doc).unwrap(), r#"{"a":{"x":"y"},"b":[1,true,null]}"#);
        assert_eq!(to_string(&array![]).unwrap(), "[]");
        assert_eq!(to_string(&object! {}).unwrap(), "{}");
    }

    #[test]
    fn test_integral_numbers_have_no_fraction() {
        assert_eq!(to_string(&Value::from(5.0)).unwrap(), "5");
        assert_eq!(to_string(&Value::from(-42)).unwrap(), "-42");
        assert_eq!(to_string(&Value::from(-0.0)).unwrap(), "0");
        assert_eq!(to_string(&Value::from(61420u32)).unwrap(), "61420");
    }

    #[test]
    fn test_fractional_and_large_numbers() {
        assert_eq!(to_string(&Value::from(0.5)).unwrap(), "0.5");
        assert_eq!(to_string(&Value::from(-2.25)).unwrap(), "-2.25");
        assert_eq!(to_string(&Value::from(0.1)).unwrap(), "0.1");
        assert_eq!(to_string(&Value::from(1e300)).unwrap(), "1e300");

        for n in [1e300, 1.5e-7, 123456.789, 2f64.powi(60)] {
            let text = to_string(&Value::from(n)).unwrap();
            assert_eq!(parse(text.as_bytes()).unwrap(), n, "{text}");
        }
    }

    #[test]
    fn test_non_finite_numbers_fail() {
        assert!(matches!(
            to_string(&Value::from(f64::NAN)),
            Err(SerializeError::NonFiniteNumber(_))
        ));
        let nested = array![object! { "t" => f64::INFINITY }];
        assert_eq!(
            to_string(&nested),
            Err(SerializeError::NonFiniteNumber(f64::INFINITY))
        );
    }

    #[test]
    fn test_string_escaping() {
        let text = "quote\" back\\ slash/ \u{8}\u{c}\n\r\t \u{1} \u{1f}";
        assert_eq!(
            to_string(&Value::from(text)).unwrap(),
            r#""quote\" back\\ slash/ \b\f\n\r\t \u0001 \u001F""#
        );
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(
            to_string(&Value::from("日本 🎨 ü \u{7f}")).unwrap(),
            "\"日本 🎨 ü \u{7f}\""
        );
    }

    #[test]
    fn test_parse_dump_roundtrip() {
        let doc = object! {
            "null" => Value::Null,
            "flags" => array![true, false],
            "numbers" => array![0, -1, 3.25, 1e-9, 9007199254740991u64],
            "text" => "ctl \u{0} \u{1b} esc \" \\ / 😀 é",
            "nested" => object! {
                "empty_obj" => object! {},
                "empty_arr" => array![],
                "deep" => array![array![array!["x"]]],
            },
        };

        let encoded = to_vec(&doc).unwrap();
        let decoded = parse(&encoded).unwrap();
        assert_eq!(decoded, doc);
        assert_eq!(to_vec(&decoded).unwrap(), encoded);
    }

    fn nested(depth: usize) -> Value {
        (0..depth).fold(Value::from("core"), |inner, level| {
            if level % 2 == 0 {
                array![inner]
            } else {
                object! { "k" => inner }
            }
        })
    }

    #[test]
    fn test_roundtrip_table() {
        let mut docs: Vec<Value> = (0u32..0x20)
            .filter_map(char::from_u32)
            .map(|c| Value::from(format!("a{c}b")))
            .collect();
        docs.extend([
            Value::from("\u{1F600}\u{10FFFF}\u{10000}"),
            Value::from("\u{FFFF} \u{D7FF} \u{E000}"),
            Value::from(""),
            Value::Null,
            Value::from(true),
            Value::from(-1.5e-300),
            Value::from(4503599627370497.0),
            array![],
            object! {},
            object! { "\u{0}key\n" => "v", "" => Value::Null },
            nested(crate::json::MAX_DEPTH),
        ]);

        for doc in docs {
            let encoded = to_vec(&doc).unwrap();
            assert_eq!(parse(&encoded).unwrap(), doc, "{}", String::from_utf8_lossy(&encoded));
        }
    }

    #[test]
    fn test_dump_method() {
        assert_eq!(Value::from("x").dump().unwrap(), "\"x\"");
    }
}
