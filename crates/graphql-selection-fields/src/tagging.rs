//! Attaching out-of-band context to resolved payloads.
//!
//! A resolver fetching rows for a field can tag each row with whatever its children need
//! (the parent record, a locale...) and the child resolvers read it back with [`get_context`].
//! The payload itself is borrowed, never modified.

use std::{borrow::Cow, ops::Deref};

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{TagError, TagResult};

/// Member name used by the inline JSON form of a context.
pub const CONTEXT_KEY: &str = "__context";

/// A payload value together with its context.
///
/// Derefs and serializes to the payload alone, the context stays out of band.
#[derive(Debug, Clone, PartialEq)]
pub struct Contextual<'a, C> {
    value: Cow<'a, Value>,
    context: C,
}

impl<'a, C> Contextual<'a, C> {
    pub fn borrowed(value: &'a Value, context: C) -> Self {
        Contextual {
            value: Cow::Borrowed(value),
            context,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn into_parts(self) -> (Cow<'a, Value>, C) {
        (self.value, self.context)
    }

    /// Detaches the payload from the value it was borrowed from.
    pub fn into_owned(self) -> Contextual<'static, C> {
        Contextual {
            value: Cow::Owned(self.value.into_owned()),
            context: self.context,
        }
    }

    pub fn map_context<D>(self, f: impl FnOnce(C) -> D) -> Contextual<'a, D> {
        Contextual {
            value: self.value,
            context: f(self.context),
        }
    }

    /// The payload with the context injected as a `__context` member, for hosts exchanging
    /// plain JSON. Only objects have room for it.
    pub fn to_inline_json(&self) -> TagResult<Value>
    where
        C: Serialize,
    {
        let Value::Object(object) = self.value.as_ref() else {
            return Err(TagError::NotInlinable {
                found: kind(&self.value),
            });
        };

        let mut object = object.clone();
        object.insert(CONTEXT_KEY.to_string(), serde_json::to_value(&self.context)?);

        Ok(Value::Object(object))
    }
}

impl<C> Contextual<'static, C> {
    pub fn owned(value: Value, context: C) -> Self {
        Contextual {
            value: Cow::Owned(value),
            context,
        }
    }
}

impl<C> Deref for Contextual<'_, C> {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<C> Serialize for Contextual<'_, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

/// Result of tagging a payload: one wrapper for an object, one per element for a list.
#[derive(Debug, Clone, PartialEq)]
pub enum Tagged<'a, C> {
    One(Contextual<'a, C>),
    Many(Vec<Contextual<'a, C>>),
}

impl<'a, C> Tagged<'a, C> {
    pub fn as_slice(&self) -> &[Contextual<'a, C>] {
        match self {
            Tagged::One(item) => std::slice::from_ref(item),
            Tagged::Many(items) => items,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contextual<'a, C>> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn into_vec(self) -> Vec<Contextual<'a, C>> {
        match self {
            Tagged::One(item) => vec![item],
            Tagged::Many(items) => items,
        }
    }

    pub fn into_owned(self) -> Tagged<'static, C> {
        match self {
            Tagged::One(item) => Tagged::One(item.into_owned()),
            Tagged::Many(items) => Tagged::Many(items.into_iter().map(Contextual::into_owned).collect()),
        }
    }
}

impl<C> Serialize for Tagged<'_, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Tagged::One(item) => item.serialize(serializer),
            Tagged::Many(items) => items.serialize(serializer),
        }
    }
}

/// Tags `payload` with a copy of `context`: the payload itself if it is an object, each of its
/// elements if it is a list.
pub fn with_context<C: Clone>(payload: &Value, context: C) -> TagResult<Tagged<'_, C>> {
    with_context_fn(payload, |_| context.clone())
}

/// Like [`with_context`], deriving the context from each tagged value.
///
/// List elements may be objects or lists, a nested list being tagged as a whole.
pub fn with_context_fn<'a, C, F>(payload: &'a Value, mut context_fn: F) -> TagResult<Tagged<'a, C>>
where
    F: FnMut(&'a Value) -> C,
{
    match payload {
        Value::Object(_) => Ok(Tagged::One(Contextual::borrowed(payload, context_fn(payload)))),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(_) | Value::Array(_) => Ok(Contextual::borrowed(item, context_fn(item))),
                other => Err(TagError::ElementTypeMismatch {
                    index,
                    found: kind(other),
                }),
            })
            .collect::<TagResult<Vec<_>>>()
            .map(Tagged::Many),
        other => Err(TagError::TypeMismatch { found: kind(other) }),
    }
}

/// Values a context can be read from.
pub trait HasContext {
    type Context;

    fn get_context(&self) -> Option<&Self::Context>;
}

impl<C> HasContext for Contextual<'_, C> {
    type Context = C;

    fn get_context(&self) -> Option<&C> {
        Some(&self.context)
    }
}

impl<C> HasContext for Tagged<'_, C> {
    type Context = C;

    fn get_context(&self) -> Option<&C> {
        match self {
            Tagged::One(item) => item.get_context(),
            Tagged::Many(_) => None,
        }
    }
}

/// Reads the inline form produced by [`Contextual::to_inline_json`].
impl HasContext for Value {
    type Context = Value;

    fn get_context(&self) -> Option<&Value> {
        self.as_object()?.get(CONTEXT_KEY)
    }
}

impl<T: HasContext + ?Sized> HasContext for &T {
    type Context = T::Context;

    fn get_context(&self) -> Option<&Self::Context> {
        (**self).get_context()
    }
}

/// Context attached to `value`, if any.
pub fn get_context<T: HasContext + ?Sized>(value: &T) -> Option<&T::Context> {
    value.get_context()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
