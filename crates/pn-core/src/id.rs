use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for node IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Identifier the remote store assigns to a place or transition.
/// Internally a `Spur` index: 4 bytes, Copy, Eq, Hash in O(1).
///
/// On the wire the store wraps the string in an object: `{"id": "p1"}`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Spur);

impl NodeId {
    /// Intern a new string as a NodeId, or return existing if already interned.
    pub fn intern(s: &str) -> Self {
        NodeId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize)]
struct WireId<'a> {
    #[serde(borrow)]
    id: Cow<'a, str>,
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireId {
            id: Cow::Borrowed(self.as_str()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireId::deserialize(deserializer)?;
        Ok(NodeId::intern(&wire.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = NodeId::intern("p1");
        let b = NodeId::intern("p1");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "p1");
        assert_eq!(a.to_string(), "p1");
    }

    #[test]
    fn wire_shape_is_wrapped_object() {
        let id = NodeId::intern("t7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#"{"id":"t7"}"#);

        let back: NodeId = serde_json::from_str(r#"{"id":"t7"}"#).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn escaped_ids_deserialize() {
        let id: NodeId = serde_json::from_str(r#"{"id":"a\"b"}"#).unwrap();
        assert_eq!(id.as_str(), "a\"b");
    }
}
