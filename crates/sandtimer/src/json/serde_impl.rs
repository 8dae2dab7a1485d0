//! serde integration for [`Value`].

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use super::serializer::MAX_EXACT_INTEGER;
use super::value::{Array, Object, Value};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) if is_exact_integer(*n) => serializer.serialize_i64(*n as i64),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (key, item) in members {
                    map.serialize_entry(key, item)?;
                }
                map.end()
            }
        }
    }
}

fn is_exact_integer(n: f64) -> bool {
    n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Array::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut members = Object::new();
        while let Some((key, item)) = map.next_entry::<String, Value>()? {
            members.entry(key).or_insert(item);
        }
        Ok(Value::Object(members))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::json::{parse, to_string, Value};
    use crate::{array, object};

    #[test]
    fn test_serde_json_reads_our_output() {
        let doc = object! {
            "cmd" => "start",
            "label" => "tea \"green\" \u{1}",
            "time" => 180,
            "ratio" => 0.75,
            "tags" => array!["a", Value::Null, false],
        };

        let text = to_string(&doc).unwrap();
        let theirs: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(theirs["cmd"], "start");
        assert_eq!(theirs["label"], "tea \"green\" \u{1}");
        assert_eq!(theirs["time"], 180);
        assert_eq!(theirs["ratio"], 0.75);
        assert_eq!(theirs["tags"][2], false);
    }

    #[test]
    fn test_serialize_through_serde_json() {
        let doc = object! { "n" => 2.5, "s" => "x", "list" => array![1.5, true] };
        let text = serde_json::to_string(&doc).unwrap();
        assert_eq!(parse(text.as_bytes()).unwrap(), doc);
    }

    #[test]
    fn test_integers_serialize_without_fraction() {
        let doc = object! { "minimum" => 1, "half" => 0.5 };
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"half":0.5,"minimum":1}"#
        );
    }

    #[test]
    fn test_deserialize_through_serde_json() {
        let text = r#"{"id":7,"method":"ping","params":{"nested":[null,-3,"é"]}}"#;
        let ours: Value = serde_json::from_str(text).unwrap();
        assert_eq!(ours, parse(text.as_bytes()).unwrap());
        assert_eq!(ours["params"]["nested"][1], -3);
    }
}
