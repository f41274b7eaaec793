use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::object::ObjectId;

/// The provider's answer for a single object ID.
///
/// The liveness question is settled once, where the response enters the
/// SDK; everything downstream matches on the variant instead of probing the
/// payload shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ObjectResponse {
    /// The object exists and its contents were returned.
    Live(LiveObject),
    /// The object could not be returned.
    Missing { id: ObjectId, status: ObjectStatus },
}

impl ObjectResponse {
    pub fn missing(id: impl Into<ObjectId>) -> Self {
        Self::Missing { id: id.into(), status: ObjectStatus::NotExists }
    }

    /// The ID this response answers for.
    pub fn object_id(&self) -> &ObjectId {
        match self {
            Self::Live(obj) => &obj.reference.object_id,
            Self::Missing { id, .. } => id,
        }
    }

    pub fn as_live(&self) -> Option<&LiveObject> {
        match self {
            Self::Live(obj) => Some(obj),
            Self::Missing { .. } => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }
}

/// Why an object was not returned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectStatus {
    NotExists,
    Deleted,
    Unknown(String),
}

/// A live object as reported by a full node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveObject {
    pub data: MoveObject,
    pub owner: Owner,
    #[serde(default)]
    pub previous_transaction: String,
    #[serde(default)]
    pub storage_rebate: u64,
    pub reference: ObjectRef,
}

impl LiveObject {
    pub fn id(&self) -> &ObjectId {
        &self.reference.object_id
    }

    /// The fully qualified Move type descriptor, e.g. `0x2::coin::Coin<0x2::sui::SUI>`.
    pub fn type_descriptor(&self) -> &str {
        &self.data.type_
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.data.fields
    }
}

/// The Move payload of an object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveObject {
    #[serde(rename = "dataType", default = "default_data_type")]
    pub data_type: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub has_public_transfer: bool,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

fn default_data_type() -> String {
    "moveObject".into()
}

/// Versioned reference to an object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub object_id: ObjectId,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub digest: String,
}

/// Ownership of an object.
///
/// Deserialization never fails: shapes that match none of the known tags
/// become [`Owner::Unknown`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Owner {
    /// Owned by an account address.
    Address(String),
    /// Owned by another object (dynamic fields, wrapped listings).
    Object(String),
    Shared { initial_shared_version: u64 },
    Immutable,
    Unknown,
}

impl Owner {
    /// The owning address or parent object ID, or `""` for every other shape.
    pub fn address(&self) -> &str {
        match self {
            Self::Address(a) | Self::Object(a) => a,
            _ => "",
        }
    }

    /// Decode the RPC representation: `{"AddressOwner": ..}`,
    /// `{"ObjectOwner": ..}`, `{"Shared": ..}` or `"Immutable"`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) if s == "Immutable" => Self::Immutable,
            Value::Object(map) => {
                // ObjectOwner wins if a malformed payload carries both tags.
                if let Some(parent) = map.get("ObjectOwner").and_then(Value::as_str) {
                    Self::Object(parent.to_owned())
                } else if let Some(addr) = map.get("AddressOwner").and_then(Value::as_str) {
                    Self::Address(addr.to_owned())
                } else if let Some(shared) = map.get("Shared") {
                    let initial_shared_version = shared
                        .get("initial_shared_version")
                        .and_then(Value::as_u64)
                        .unwrap_or_default();
                    Self::Shared { initial_shared_version }
                } else {
                    Self::Unknown
                }
            }
            _ => Self::Unknown,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Address(a) => serde_json::json!({ "AddressOwner": a }),
            Self::Object(o) => serde_json::json!({ "ObjectOwner": o }),
            Self::Shared { initial_shared_version } => {
                serde_json::json!({ "Shared": { "initial_shared_version": initial_shared_version } })
            }
            Self::Immutable => Value::String("Immutable".into()),
            Self::Unknown => Value::Object(Map::new()),
        }
    }
}

impl Serialize for Owner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Owner {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn owner_address_tag() {
        let owner = Owner::from_json(&json!({ "AddressOwner": "0xabc" }));
        assert_eq!(owner, Owner::Address("0xabc".into()));
        assert_eq!(owner.address(), "0xabc");
    }

    #[test]
    fn owner_object_tag() {
        let owner = Owner::from_json(&json!({ "ObjectOwner": "0xparent" }));
        assert_eq!(owner.address(), "0xparent");
    }

    #[test]
    fn owner_without_tag_is_empty() {
        assert_eq!(Owner::from_json(&json!({})).address(), "");
        assert_eq!(Owner::from_json(&json!(null)), Owner::Unknown);
        assert_eq!(Owner::from_json(&json!({ "AddressOwner": 7 })), Owner::Unknown);
    }

    #[test]
    fn owner_shared_and_immutable() {
        let shared = Owner::from_json(&json!({ "Shared": { "initial_shared_version": 3 } }));
        assert_eq!(shared, Owner::Shared { initial_shared_version: 3 });
        assert_eq!(shared.address(), "");
        assert_eq!(Owner::from_json(&json!("Immutable")), Owner::Immutable);
    }

    #[test]
    fn owner_serde_uses_rpc_shape() {
        let owner = Owner::Object("0xparent".into());
        let value = serde_json::to_value(&owner).unwrap();
        assert_eq!(value, json!({ "ObjectOwner": "0xparent" }));
        let back: Owner = serde_json::from_value(value).unwrap();
        assert_eq!(back, owner);
    }

    #[test]
    fn live_object_from_rpc_json() {
        let obj: LiveObject = serde_json::from_value(json!({
            "data": {
                "dataType": "moveObject",
                "type": "0x2::coin::Coin<0x2::sui::SUI>",
                "has_public_transfer": true,
                "fields": { "balance": "100" }
            },
            "owner": { "AddressOwner": "0xabc" },
            "previousTransaction": "tx",
            "storageRebate": 12,
            "reference": { "objectId": "0x1", "version": 4, "digest": "d" }
        }))
        .unwrap();
        assert_eq!(obj.id().as_str(), "0x1");
        assert_eq!(obj.type_descriptor(), "0x2::coin::Coin<0x2::sui::SUI>");
        assert_eq!(obj.fields()["balance"], json!("100"));
        assert_eq!(obj.owner.address(), "0xabc");
        assert_eq!(obj.storage_rebate, 12);
    }

    #[test]
    fn missing_response_keeps_id() {
        let resp = ObjectResponse::missing("0xdead");
        assert_eq!(resp.object_id().as_str(), "0xdead");
        assert!(!resp.is_live());
        assert!(resp.as_live().is_none());
    }
}
