//! Serde adapter storing an optional `chrono::Duration` as whole milliseconds.

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    value
        .map(|d| d.num_milliseconds())
        .serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
    let millis = Option::<i64>::deserialize(deserializer)?;
    Ok(millis.and_then(Duration::try_milliseconds))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(default, with = "super")]
        remaining: Option<Duration>,
    }

    #[test]
    fn test_duration_as_millis() {
        let holder = Holder {
            remaining: Some(Duration::seconds(90)),
        };
        let json = serde_json::to_string(&holder).unwrap();
        assert_eq!(json, r#"{"remaining":90000}"#);
        assert_eq!(serde_json::from_str::<Holder>(&json).unwrap(), holder);
    }

    #[test]
    fn test_missing_and_null() {
        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert_eq!(holder.remaining, None);
        let holder: Holder = serde_json::from_str(r#"{"remaining":null}"#).unwrap();
        assert_eq!(holder.remaining, None);
    }
}
