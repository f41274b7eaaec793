//! JSON-RPC backend talking to a Sui full node over HTTP.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use nft_types::{Address, CoinBalance, LiveObject, ObjectId, ObjectRef, ObjectResponse, ObjectStatus};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::coin::{coin_balance, is_coin_type};
use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::traits::ObjectProvider;

const GET_OBJECT: &str = "sui_getObject";
const GET_OWNED_OBJECTS: &str = "sui_getObjectsOwnedByAddress";

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl RpcResponse {
    fn into_result(self) -> ProviderResult<Value> {
        match (self.result, self.error) {
            (_, Some(err)) => Err(ProviderError::Rpc { code: err.code, message: err.message }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(ProviderError::Decode("response carries neither result nor error".into())),
        }
    }
}

/// `sui_getObject` result.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", content = "details")]
enum ObjectRead {
    Exists(LiveObject),
    NotExists(Value),
    Deleted(ObjectRef),
}

impl ObjectRead {
    fn into_response(self, requested: &ObjectId) -> ObjectResponse {
        match self {
            Self::Exists(object) => ObjectResponse::Live(object),
            Self::NotExists(_) => ObjectResponse::missing(requested.clone()),
            Self::Deleted(_) => ObjectResponse::Missing {
                id: requested.clone(),
                status: ObjectStatus::Deleted,
            },
        }
    }
}

/// One entry of `sui_getObjectsOwnedByAddress`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectInfo {
    object_id: ObjectId,
    #[serde(rename = "type", default)]
    type_: String,
}

fn decode_object(value: Value, requested: &ObjectId) -> ProviderResult<ObjectResponse> {
    let read: ObjectRead = serde_json::from_value(value)?;
    Ok(read.into_response(requested))
}

/// Pair batch responses with the IDs that were asked for, by request id.
///
/// A response that errored or never came back turns into a `Missing` entry
/// for its ID. Only a body that is not a batch at all fails the whole call.
fn decode_batch(ids: &[ObjectId], request_ids: &[u64], body: Value) -> ProviderResult<Vec<ObjectResponse>> {
    let responses: Vec<RpcResponse> = match body {
        Value::Array(_) => serde_json::from_value(body)?,
        other => {
            let single: RpcResponse = serde_json::from_value(other)?;
            return Err(single.into_result().err().unwrap_or_else(|| {
                ProviderError::Decode("expected a batch response array".into())
            }));
        }
    };

    let mut by_id: HashMap<u64, RpcResponse> = responses
        .into_iter()
        .filter_map(|r| r.id.map(|id| (id, r)))
        .collect();

    let mut out = Vec::with_capacity(ids.len());
    for (object_id, request_id) in ids.iter().zip(request_ids) {
        let response = match by_id.remove(request_id) {
            Some(response) => response,
            None => {
                warn!(object = %object_id, request_id, "no response in batch");
                out.push(ObjectResponse::Missing {
                    id: object_id.clone(),
                    status: ObjectStatus::Unknown("no response".into()),
                });
                continue;
            }
        };
        let decoded = response.into_result().and_then(|v| decode_object(v, object_id));
        out.push(decoded.unwrap_or_else(|err| {
            warn!(object = %object_id, error = %err, "object read failed");
            ObjectResponse::Missing {
                id: object_id.clone(),
                status: ObjectStatus::Unknown(err.to_string()),
            }
        }));
    }
    Ok(out)
}

/// [`ObjectProvider`] backed by a full node's JSON-RPC endpoint.
pub struct JsonRpcProvider {
    client: reqwest::Client,
    config: ProviderConfig,
    next_id: AtomicU64,
}

impl JsonRpcProvider {
    /// Build an HTTP client for `config.rpc_url` with the configured timeout.
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config, next_id: AtomicU64::new(1) })
    }

    /// The configuration this provider was built with.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn post(&self, body: &impl Serialize) -> ProviderResult<Value> {
        let value = self
            .client
            .post(&self.config.rpc_url)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(value)
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> ProviderResult<T> {
        let request = RpcRequest { jsonrpc: "2.0", id: self.request_id(), method, params };
        debug!(method, id = request.id, "rpc call");
        let response: RpcResponse = serde_json::from_value(self.post(&request).await?)?;
        Ok(serde_json::from_value(response.into_result()?)?)
    }
}

impl std::fmt::Debug for JsonRpcProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonRpcProvider")
            .field("rpc_url", &self.config.rpc_url)
            .finish()
    }
}

#[async_trait]
impl ObjectProvider for JsonRpcProvider {
    async fn get_object(&self, id: &ObjectId) -> ProviderResult<ObjectResponse> {
        let value: Value = self.call(GET_OBJECT, json!([id])).await?;
        decode_object(value, id)
    }

    async fn get_objects(&self, ids: &[ObjectId]) -> ProviderResult<Vec<ObjectResponse>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let requests: Vec<RpcRequest<'_>> = ids
            .iter()
            .map(|id| RpcRequest {
                jsonrpc: "2.0",
                id: self.request_id(),
                method: GET_OBJECT,
                params: json!([id]),
            })
            .collect();
        let request_ids: Vec<u64> = requests.iter().map(|r| r.id).collect();
        debug!(count = ids.len(), "rpc batch");
        let body = self.post(&requests).await?;
        decode_batch(ids, &request_ids, body)
    }

    async fn get_objects_owned_by_address(
        &self,
        address: &Address,
    ) -> ProviderResult<Vec<ObjectResponse>> {
        let infos: Vec<ObjectInfo> = self.call(GET_OWNED_OBJECTS, json!([address.as_str()])).await?;
        let ids: Vec<ObjectId> = infos.into_iter().map(|info| info.object_id).collect();
        self.get_objects(&ids).await
    }

    async fn get_coin_balances_owned_by_address(
        &self,
        address: &Address,
    ) -> ProviderResult<Vec<CoinBalance>> {
        let infos: Vec<ObjectInfo> = self.call(GET_OWNED_OBJECTS, json!([address.as_str()])).await?;
        let coin_ids: Vec<ObjectId> = infos
            .into_iter()
            .filter(|info| is_coin_type(&info.type_))
            .map(|info| info.object_id)
            .collect();
        let objects = self.get_objects(&coin_ids).await?;
        Ok(objects
            .iter()
            .filter_map(ObjectResponse::as_live)
            .filter_map(coin_balance)
            .collect())
    }
}
