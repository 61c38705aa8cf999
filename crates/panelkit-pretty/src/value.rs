#![forbid(unsafe_code)]

//! Structured values to be pretty-printed.

/// A structured value.
///
/// `Dict` keeps insertion order and allows any value as key; syntaxes
/// that restrict keys reject the others when formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    Dict(Vec<(Value, Value)>),
}

/// The bracket kind of a container value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    List,
    Tuple,
    Set,
    Dict,
}

/// One element of a container: a plain item or a dict entry.
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    Item(&'a Value),
    Pair(&'a Value, &'a Value),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    /// Container kind, `None` for scalars.
    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            Self::List(_) => Some(ContainerKind::List),
            Self::Tuple(_) => Some(ContainerKind::Tuple),
            Self::Set(_) => Some(ContainerKind::Set),
            Self::Dict(_) => Some(ContainerKind::Dict),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.container_kind().is_some()
    }

    /// Elements of a container in order. Empty for scalars.
    pub fn entries(&self) -> Vec<Entry<'_>> {
        match self {
            Self::List(items) | Self::Tuple(items) | Self::Set(items) => {
                items.iter().map(Entry::Item).collect()
            }
            Self::Dict(pairs) => pairs.iter().map(|(k, v)| Entry::Pair(k, v)).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::None, Into::into)
    }
}
