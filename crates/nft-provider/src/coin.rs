use nft_types::{CoinBalance, LiveObject};
use serde_json::Value;

/// Type prefix shared by every coin object.
pub const COIN_TYPE_PREFIX: &str = "0x2::coin::Coin<";

pub fn is_coin_type(type_descriptor: &str) -> bool {
    type_descriptor.starts_with(COIN_TYPE_PREFIX) && type_descriptor.ends_with('>')
}

/// Read the balance of a coin object. Non-coins yield `None`.
pub fn coin_balance(object: &LiveObject) -> Option<CoinBalance> {
    let descriptor = object.type_descriptor();
    if !is_coin_type(descriptor) {
        return None;
    }
    let coin_type = &descriptor[COIN_TYPE_PREFIX.len()..descriptor.len() - 1];
    let balance = match object.fields().get("balance")? {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.parse().ok()?,
        _ => return None,
    };
    Some(CoinBalance {
        object_id: object.id().clone(),
        coin_type: coin_type.to_owned(),
        balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(type_: &str, fields: Value) -> LiveObject {
        serde_json::from_value(json!({
            "data": { "type": type_, "fields": fields },
            "owner": { "AddressOwner": "0xabc" },
            "reference": { "objectId": "0xcoin" }
        }))
        .unwrap()
    }

    #[test]
    fn reads_string_balance() {
        let coin = coin_balance(&object("0x2::coin::Coin<0x2::sui::SUI>", json!({ "balance": "5000" }))).unwrap();
        assert_eq!(coin.balance, 5000);
        assert_eq!(coin.coin_type, "0x2::sui::SUI");
        assert_eq!(coin.object_id.as_str(), "0xcoin");
    }

    #[test]
    fn reads_numeric_balance() {
        let coin = coin_balance(&object("0x2::coin::Coin<0x2::sui::SUI>", json!({ "balance": 12 }))).unwrap();
        assert_eq!(coin.balance, 12);
    }

    #[test]
    fn rejects_non_coins_and_bad_balances() {
        assert!(coin_balance(&object("0x2::devnet_nft::DevNetNFT", json!({ "balance": "1" }))).is_none());
        assert!(coin_balance(&object("0x2::coin::Coin<0x2::sui::SUI>", json!({}))).is_none());
        assert!(coin_balance(&object("0x2::coin::Coin<0x2::sui::SUI>", json!({ "balance": "lots" }))).is_none());
    }
}
