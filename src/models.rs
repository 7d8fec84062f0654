use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// A blog post as returned by every endpoint
///
/// `id` is the storage rowid rendered as a decimal string (`"1"`), on every
/// response, so clients can treat it as an opaque key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BlogPost {
    #[schema(example = "1")]
    pub id: String,
    pub date: String,
    pub title: String,
    pub content: String,
    pub image: String,
}

impl BlogPost {
    pub fn from_input(id: impl Into<String>, input: BlogInput) -> Self {
        Self {
            id: id.into(),
            date: input.date,
            title: input.title,
            content: input.content,
            image: input.image,
        }
    }
}

/// Request body for create and update
///
/// Decoding is deliberately loose:
/// - only the first JSON value of the body is read; anything after it is ignored
/// - keys match field names ignoring ASCII case, and when several keys name the
///   same field the last one in the body wins
/// - `null` and non-string values leave the field as it was (`""` unless an
///   earlier key set it)
/// - a body that is empty, not JSON, or not a JSON object yields all-empty fields
/// - an `id` key is ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, utoipa::ToSchema)]
pub struct BlogInput {
    #[schema(example = "2024-01-01")]
    pub date: String,
    #[schema(example = "Hi")]
    pub title: String,
    #[schema(example = "Body")]
    pub content: String,
    pub image: String,
}

impl BlogInput {
    pub fn from_json_lenient(body: &[u8]) -> Self {
        let mut values = serde_json::Deserializer::from_slice(body).into_iter::<LooseObject>();

        let input = match values.next() {
            None => return Self::default(),
            Some(Ok(LooseObject(input))) => input,
            Some(Err(e)) => {
                tracing::warn!("Ignoring undecodable request body: {}", e);
                return Self::default();
            }
        };

        let rest = &body[values.byte_offset()..];
        if !rest.iter().all(u8::is_ascii_whitespace) {
            tracing::warn!("Ignoring {} byte(s) after the JSON object in the request body", rest.len());
        }

        input
    }

    fn field_mut(&mut self, key: &str) -> Option<(&'static str, &mut String)> {
        if key.eq_ignore_ascii_case("date") {
            Some(("date", &mut self.date))
        } else if key.eq_ignore_ascii_case("title") {
            Some(("title", &mut self.title))
        } else if key.eq_ignore_ascii_case("content") {
            Some(("content", &mut self.content))
        } else if key.eq_ignore_ascii_case("image") {
            Some(("image", &mut self.image))
        } else {
            None
        }
    }
}

/// A JSON object applied key by key onto a [`BlogInput`], in body order
struct LooseObject(BlogInput);

impl<'de> Deserialize<'de> for LooseObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LooseObjectVisitor)
    }
}

struct LooseObjectVisitor;

impl<'de> Visitor<'de> for LooseObjectVisitor {
    type Value = LooseObject;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut input = BlogInput::default();

        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value::<JsonValue>()?;
            let Some((name, field)) = input.field_mut(&key) else {
                continue;
            };

            match value {
                JsonValue::String(s) => *field = s,
                JsonValue::Null => {}
                other => tracing::warn!(
                    "Field '{}' is a JSON {}, not a string; leaving it unchanged",
                    name,
                    json_kind(&other)
                ),
            }
        }

        Ok(LooseObject(input))
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Response type for successful DELETE operations
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Blog deleted successfully")]
    pub message: String,
}

impl DeleteResponse {
    pub const MESSAGE: &'static str = "Blog deleted successfully";

    pub fn success() -> Self {
        Self {
            message: Self::MESSAGE.to_string(),
        }
    }
}
