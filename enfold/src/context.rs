//! The data bag passed to every template in a render call.
//!
//! A [`Context`] maps string keys to [`Value`]s. During hierarchical
//! composition each layout receives the markup it encloses under the
//! reserved [`CONTENT_KEY`], marked as [`Value::Html`] so the engine emits
//! it verbatim instead of escaping it a second time.
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

/// Key under which a layout receives the markup it encloses.
pub const CONTENT_KEY: &str = "content";

/// A value inside the data bag.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    List(Vec<Value>),
    Hash(HashMap<String, Value>),
    /// Markup that is already escaped. Engines must emit it verbatim;
    /// plain [`Value::String`]s are subject to the engine's escaping.
    Html(String),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::List(list) => {
                write!(f, "[")?;
                for (i, value) in list.iter().enumerate() {
                    write!(f, "{}", value)?;
                    if i < list.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "]")
            }
            Value::Hash(hash) => {
                write!(f, "{{")?;
                for (i, (key, value)) in hash.iter().enumerate() {
                    write!(f, "{}: {}", key, value)?;
                    if i < hash.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "}}")
            }
            Value::Html(s) => write!(f, "{}", s),
            Value::Null => write!(f, "null"),
        }
    }
}

/// Convert a Rust value into a template [`Value`].
pub trait ToTemplateValue {
    fn to_template_value(&self) -> Value;
}

impl ToTemplateValue for Value {
    fn to_template_value(&self) -> Value {
        self.clone()
    }
}

impl ToTemplateValue for &str {
    fn to_template_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToTemplateValue for String {
    fn to_template_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToTemplateValue for bool {
    fn to_template_value(&self) -> Value {
        Value::Boolean(*self)
    }
}

impl ToTemplateValue for f64 {
    fn to_template_value(&self) -> Value {
        Value::Float(*self)
    }
}

macro_rules! impl_integer {
    ($ty:ty) => {
        impl ToTemplateValue for $ty {
            fn to_template_value(&self) -> Value {
                Value::Integer(*self as i64)
            }
        }
    };
}

impl_integer!(i8);
impl_integer!(i16);
impl_integer!(i32);
impl_integer!(i64);
impl_integer!(u8);
impl_integer!(u16);
impl_integer!(u32);
impl_integer!(u64);

impl ToTemplateValue for Vec<Value> {
    fn to_template_value(&self) -> Value {
        Value::List(self.clone())
    }
}

impl ToTemplateValue for HashMap<String, Value> {
    fn to_template_value(&self) -> Value {
        Value::Hash(self.clone())
    }
}

impl ToTemplateValue for serde_json::Value {
    fn to_template_value(&self) -> Value {
        use serde_json::Value as Json;

        match self {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Boolean(*b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(0.0)),
            },
            Json::String(s) => Value::String(s.clone()),
            Json::Array(list) => {
                Value::List(list.iter().map(|value| value.to_template_value()).collect())
            }
            Json::Object(map) => Value::Hash(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_template_value()))
                    .collect(),
            ),
        }
    }
}

/// The data bag. Created per request, passed by reference through the
/// whole rendering chain, discarded at the end of the call.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Context {
    values: HashMap<String, Value>,
}

impl Context {
    /// Create an empty data bag.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: &str, value: impl ToTemplateValue) -> &mut Self {
        self.values.insert(key.to_string(), value.to_template_value());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy of this bag with the enclosed markup shadowing [`CONTENT_KEY`].
    /// The caller's own entry under that key is never overwritten.
    pub(crate) fn with_content(&self, html: &str) -> Context {
        let mut scope = self.clone();
        scope.set(CONTENT_KEY, Value::Html(html.to_string()));
        scope
    }
}

impl Index<&str> for Context {
    type Output = Value;

    fn index(&self, key: &str) -> &Self::Output {
        self.values.get(key).unwrap_or(&Value::Null)
    }
}

impl<K: ToString, V: ToTemplateValue> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Context::new();
        for (key, value) in iter {
            context.set(&key.to_string(), value);
        }
        context
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_context_index() {
        let mut context = Context::new();
        context.set("title", "hello").set("count", 5);

        assert_eq!(context["title"], Value::String("hello".to_string()));
        assert_eq!(context["count"], Value::Integer(5));
        assert_eq!(context["missing"], Value::Null);
    }

    #[test]
    fn test_context_from_iterator() {
        let context: Context = [("title", "hello"), ("body", "world")].into_iter().collect();

        assert_eq!(context["title"], Value::String("hello".to_string()));
        assert_eq!(context["body"], Value::String("world".to_string()));
        assert_eq!(context.len(), 2);
    }

    #[test]
    fn test_with_content_shadows_without_mutating() {
        let mut context = Context::new();
        context.set("content", "caller data");

        let scope = context.with_content("<p>rendered</p>");

        assert_eq!(scope["content"], Value::Html("<p>rendered</p>".to_string()));
        assert_eq!(context["content"], Value::String("caller data".to_string()));
    }

    #[test]
    fn test_from_serde_json() {
        let json = serde_json::json!({
            "title": "hello",
            "count": 5,
            "tags": ["a", "b"],
        });

        let value = json.to_template_value();
        match value {
            Value::Hash(hash) => {
                assert_eq!(hash["title"], Value::String("hello".to_string()));
                assert_eq!(hash["count"], Value::Integer(5));
                assert_eq!(
                    hash["tags"],
                    Value::List(vec![
                        Value::String("a".to_string()),
                        Value::String("b".to_string())
                    ])
                );
            }
            value => panic!("expected a hash, got {:?}", value),
        }
    }

    #[test]
    fn test_html_displays_verbatim() {
        let value = Value::Html("<p>&amp;</p>".to_string());
        assert_eq!(value.to_string(), "<p>&amp;</p>");
    }
}
