use serde::{Deserialize, Serialize};

use nft_types::ObjectId;

/// A Move call argument: an object/address reference or a pure integer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallArg {
    Pure(u64),
    Object(String),
}

impl From<&ObjectId> for CallArg {
    fn from(id: &ObjectId) -> Self {
        Self::Object(id.as_str().to_owned())
    }
}

impl From<u64> for CallArg {
    fn from(n: u64) -> Self {
        Self::Pure(n)
    }
}

/// An entry function call, in the shape wallets accept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCallTransaction {
    pub package_object_id: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<CallArg>,
    pub gas_budget: u64,
}

impl MoveCallTransaction {
    pub fn new(package: ObjectId, module: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            package_object_id: package,
            module: module.into(),
            function: function.into(),
            type_arguments: Vec::new(),
            arguments: Vec::new(),
            gas_budget: 0,
        }
    }

    pub fn with_type_arg(mut self, type_arg: impl Into<String>) -> Self {
        self.type_arguments.push(type_arg.into());
        self
    }

    pub fn with_arg(mut self, arg: impl Into<CallArg>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    pub fn with_gas_budget(mut self, gas_budget: u64) -> Self {
        self.gas_budget = gas_budget;
        self
    }

    /// `package::module::function`, for logging.
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package_object_id, self.module, self.function)
    }
}

/// A transaction handed to a wallet for signing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum SignableTransaction {
    MoveCall(MoveCallTransaction),
}

impl From<MoveCallTransaction> for SignableTransaction {
    fn from(call: MoveCallTransaction) -> Self {
        Self::MoveCall(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_collects_args() {
        let call = MoveCallTransaction::new(ObjectId::from("0xpkg"), "marketplace", "list")
            .with_arg(&ObjectId::from("0xmarket"))
            .with_arg(100)
            .with_type_arg("0xpkg::m::T")
            .with_gas_budget(5000);
        assert_eq!(call.target(), "0xpkg::marketplace::list");
        assert_eq!(call.arguments, vec![CallArg::Object("0xmarket".into()), CallArg::Pure(100)]);
        assert_eq!(call.type_arguments, vec!["0xpkg::m::T"]);
        assert_eq!(call.gas_budget, 5000);
    }

    #[test]
    fn signable_transaction_wire_shape() {
        let tx: SignableTransaction = MoveCallTransaction::new(ObjectId::from("0xpkg"), "m", "f")
            .with_arg(&ObjectId::from("0x1"))
            .with_arg(7)
            .with_gas_budget(10)
            .into();
        assert_eq!(
            serde_json::to_value(&tx).unwrap(),
            json!({
                "kind": "moveCall",
                "data": {
                    "packageObjectId": "0xpkg",
                    "module": "m",
                    "function": "f",
                    "typeArguments": [],
                    "arguments": ["0x1", 7],
                    "gasBudget": 10
                }
            })
        );
    }
}
