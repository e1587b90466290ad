use std::borrow::Cow;

/// A value that can be written into an MKM request document.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Character data of a leaf element.
    Scalar(String),
    /// Repeated elements sharing the enclosing tag name.
    Sequence(Vec<Value>),
    /// Child elements, written in insertion order.
    Mapping(Mapping),
}

impl Value {
    /// Returns the kind of the value, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }
}

/// An insertion-ordered mapping from element tag to [`Value`].
///
/// The server parses request bodies positionally, so the order entries are
/// inserted in is the order they are written in. Inserting a tag twice keeps
/// both entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(Cow<'static, str>, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends an entry, consuming and returning the mapping.
    pub fn with<K, V>(mut self, tag: K, value: V) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Value>,
    {
        self.insert(tag, value);
        self
    }

    /// Appends an entry.
    pub fn insert<K, V>(&mut self, tag: K, value: V)
    where
        K: Into<Cow<'static, str>>,
        V: Into<Value>,
    {
        self.entries.push((tag.into(), value.into()));
    }

    /// Appends an entry only when `value` is `Some`.
    ///
    /// The serializer has no notion of an absent value, so optional fields
    /// must be dropped here rather than stringified.
    pub fn insert_some<K, V>(&mut self, tag: K, value: Option<V>)
    where
        K: Into<Cow<'static, str>>,
        V: Into<Value>,
    {
        if let Some(value) = value {
            self.insert(tag, value);
        }
    }

    pub fn get(&self, tag: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| &**k == tag)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (&**k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> std::iter::FromIterator<(K, V)> for Mapping
where
    K: Into<Cow<'static, str>>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (tag, value) in iter {
            mapping.insert(tag, value);
        }
        mapping
    }
}

/// Builds a [`Mapping`] from `tag => value` pairs, preserving their order.
///
/// ```
/// use reqwest_mkm::mapping;
///
/// let body = mapping! {
///     "action" => "add",
///     "article" => vec![mapping! { "idArticle" => 1, "amount" => 1 }],
/// };
/// assert_eq!(body.len(), 2);
/// ```
#[macro_export]
macro_rules! mapping {
    () => {
        $crate::Mapping::new()
    };
    ($($tag:expr => $value:expr),+ $(,)?) => {{
        let mut mapping = $crate::Mapping::new();
        $(mapping.insert($tag, $value);)+
        mapping
    }};
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Value::Mapping(mapping)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_owned())
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(s: Cow<'_, str>) -> Self {
        Value::Scalar(s.into_owned())
    }
}

// the server expects lowercase literals
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(if b { "true" } else { "false" }.to_owned())
    }
}

macro_rules! scalar_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Scalar(v.to_string())
                }
            }
        )*
    };
}

scalar_from_display!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64, char);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_keeps_insertion_order() {
        let m = mapping! {
            "zeta" => 1,
            "alpha" => 2,
            "mid" => 3,
        };
        let tags: Vec<&str> = m.iter().map(|(k, _)| k).collect();
        assert_eq!(tags, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn scalars_are_stringified() {
        assert_eq!(Value::from(42u32), Value::Scalar("42".to_string()));
        assert_eq!(Value::from(-7i64), Value::Scalar("-7".to_string()));
        assert_eq!(Value::from(1.5f64), Value::Scalar("1.5".to_string()));
        assert_eq!(Value::from(true), Value::Scalar("true".to_string()));
        assert_eq!(Value::from(false), Value::Scalar("false".to_string()));
    }

    #[test]
    fn vec_becomes_sequence() {
        let v = Value::from(vec!["late", "damaged"]);
        assert_eq!(
            v,
            Value::Sequence(vec![
                Value::Scalar("late".to_string()),
                Value::Scalar("damaged".to_string()),
            ])
        );
    }

    #[test]
    fn insert_some_skips_none() {
        let mut m = Mapping::new();
        m.insert_some("reason", None::<&str>);
        m.insert_some("relistItems", Some(true));
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("relistItems"), Some(&Value::from("true")));
        assert!(m.get("reason").is_none());
    }

    #[test]
    fn collect_into_mapping() {
        let m: Mapping = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("b"), Some(&Value::from(2)));
    }
}
