//! Lenient scalar deserializers for fields the backend sends either as JSON
//! numbers or as strings.

use serde::{de::Error, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Num(serde_json::Number),
}

/// Accept `"1,200"`, `1200` or `null`, keeping the textual form.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<StringOrNumber> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(StringOrNumber::Str(s)) => s,
        Some(StringOrNumber::Num(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Accept `2024` or `"2024"`.
pub fn int_or_string<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Num(n) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| D::Error::custom(format!("expected an integer year, got {n}"))),
        StringOrNumber::Str(s) => s
            .trim()
            .parse::<i32>()
            .map_err(|_| D::Error::custom(format!("expected an integer year, got {s:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "super::int_or_string")]
        year: i32,
        #[serde(default, deserialize_with = "super::string_or_number")]
        value: String,
    }

    #[test]
    fn test_accepts_numbers_and_strings() {
        let a: Probe = serde_json::from_str(r#"{"year": 2024, "value": 12.5}"#).unwrap();
        assert_eq!(a.year, 2024);
        assert_eq!(a.value, "12.5");

        let b: Probe = serde_json::from_str(r#"{"year": "2023", "value": "1,200"}"#).unwrap();
        assert_eq!(b.year, 2023);
        assert_eq!(b.value, "1,200");
    }

    #[test]
    fn test_null_value_is_empty() {
        let c: Probe = serde_json::from_str(r#"{"year": 2024, "value": null}"#).unwrap();
        assert_eq!(c.value, "");
    }

    #[test]
    fn test_rejects_bad_year() {
        assert!(serde_json::from_str::<Probe>(r#"{"year": "twenty"}"#).is_err());
    }
}
