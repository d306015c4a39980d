//! Response normalization: handler result -> JSON tree with every timestamp
//! rendered in the configured zone and format -> success envelope.

mod error;
mod node;
mod timestamp;

use std::future::Future;

use chrono::format::{Item, StrftimeItems};
use chrono_tz::Tz;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Settings;
use crate::response::{Envelope, HttpResp};

pub use error::NormalizeError;
pub use node::{Node, NodeSerializer};
pub use timestamp::Timestamp;

/// `true` when every strftime item in `fmt` is recognised.
pub fn is_valid_format(fmt: &str) -> bool {
    StrftimeItems::new(fmt).all(|item| !matches!(item, Item::Error))
}

/// Renders handler results into envelope-ready JSON.
///
/// Holds only the target zone and format, so one instance is shared by every
/// request without locking.
#[derive(Debug, Clone)]
pub struct Normalizer {
    tz: Tz,
    format: String,
}

impl Normalizer {
    pub fn new(tz: Tz, format: impl Into<String>) -> Result<Self, NormalizeError> {
        let format = format.into();
        if !is_valid_format(&format) {
            return Err(NormalizeError::InvalidFormat(format));
        }
        Ok(Self { tz, format })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, NormalizeError> {
        Self::new(settings.tz(), settings.datetime_fmt.as_str())
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Build the tree for a handler result. An absent result becomes `[]`.
    pub fn to_node<T: Serialize + ?Sized>(value: &T) -> Result<Node, NormalizeError> {
        match Node::from_serialize(value)? {
            Node::Null => Ok(Node::Array(Vec::new())),
            node => Ok(node),
        }
    }

    /// Consume the tree, localizing every timestamp leaf.
    pub fn render(&self, node: Node) -> Value {
        match node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(b),
            Node::Number(n) => Value::Number(n),
            Node::String(s) => Value::String(s),
            Node::Timestamp(ts) => Value::String(ts.localize(&self.tz).format(&self.format).to_string()),
            Node::Array(items) => Value::Array(items.into_iter().map(|item| self.render(item)).collect()),
            Node::Object(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key, self.render(value));
                }
                Value::Object(map)
            }
        }
    }

    pub fn normalize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value, NormalizeError> {
        Ok(self.render(Self::to_node(value)?))
    }

    pub fn envelope(&self, node: Node) -> Envelope {
        Envelope::new(HttpResp::SUCCESS, self.render(node))
    }

    /// Await `producer` once, then normalize what it yields.
    pub async fn wrap<F, T>(&self, producer: F) -> Result<Envelope, NormalizeError>
    where
        F: Future<Output = T>,
        T: Serialize,
    {
        let result = producer.await;
        Ok(self.envelope(Self::to_node(&result)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn shanghai() -> Normalizer {
        Normalizer::new(chrono_tz::Asia::Shanghai, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn midnight_2024() -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .into()
    }

    #[derive(Serialize)]
    #[serde(untagged)]
    enum Leaf {
        Time(Timestamp),
        Int(i64),
    }

    #[test]
    fn rejects_bad_format() {
        assert!(matches!(
            Normalizer::new(chrono_tz::UTC, "%Y-%Q"),
            Err(NormalizeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn none_becomes_empty_list() {
        let n = shanghai();
        assert_eq!(n.normalize(&None::<u8>).unwrap(), json!([]));
        assert_eq!(n.normalize(&()).unwrap(), json!([]));
        // Only the top level is replaced.
        assert_eq!(n.normalize(&json!({"a": null})).unwrap(), json!({"a": null}));
    }

    #[test]
    fn deep_traversal_rewrites_nested_timestamps() {
        let mut first = BTreeMap::new();
        first.insert("b", Leaf::Time(midnight_2024()));
        let mut second = BTreeMap::new();
        second.insert("c", Leaf::Int(5));
        let mut input = BTreeMap::new();
        input.insert("a", vec![first, second]);

        let out = shanghai().normalize(&input).unwrap();
        assert_eq!(out, json!({"a": [{"b": "2024-01-01 08:00:00"}, {"c": 5}]}));
    }

    #[test]
    fn aware_utc_converts_once() {
        let utc = chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap();
        let out = shanghai().normalize(&vec![Timestamp::from(utc)]).unwrap();
        assert_eq!(out, json!(["2024-01-01 08:00:00"]));
    }

    #[test]
    fn idempotent_without_timestamps() {
        let n = shanghai();
        let input = json!({"z": 1, "a": [true, "s", 2.5, {"k": []}]});
        let once = n.normalize(&input).unwrap();
        assert_eq!(once, input);
        assert_eq!(n.normalize(&once).unwrap(), once);
    }

    #[test]
    fn input_is_left_untouched_and_output_is_deterministic() {
        let n = shanghai();
        let input = vec![("k", midnight_2024()), ("j", midnight_2024())];
        let before = format!("{input:?}");
        let a = serde_json::to_vec(&n.envelope(Normalizer::to_node(&input).unwrap())).unwrap();
        let b = serde_json::to_vec(&n.envelope(Normalizer::to_node(&input).unwrap())).unwrap();
        assert_eq!(a, b);
        assert_eq!(format!("{input:?}"), before);
    }

    #[test]
    fn key_order_and_sequence_order_are_kept() {
        let input = json!({"zeta": [3, 2, 1], "alpha": 0, "mid": {"y": 1, "x": 2}});
        let out = shanghai().normalize(&input).unwrap();
        let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(out["zeta"], json!([3, 2, 1]));
        let inner: Vec<_> = out["mid"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(inner, ["y", "x"]);
    }

    #[test]
    fn envelope_uses_success_entry() {
        let env = shanghai().envelope(Normalizer::to_node(&None::<u8>).unwrap());
        let value = serde_json::to_value(&env).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["code", "msg", "data"]);
        assert_eq!(value["code"], 200);
        assert_eq!(value["msg"], HttpResp::SUCCESS.msg);
        assert_eq!(value["data"], json!([]));
    }

    #[tokio::test]
    async fn wrap_awaits_the_producer() {
        let env = shanghai()
            .wrap(async { Some(midnight_2024()) })
            .await
            .unwrap();
        assert_eq!(env.data, json!("2024-01-01 08:00:00"));
    }

    #[test]
    fn unrepresentable_leaf_is_an_error() {
        assert!(shanghai().normalize(&vec![f64::INFINITY]).is_err());
    }
}
