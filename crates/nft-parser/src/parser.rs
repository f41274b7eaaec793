use std::sync::Arc;

use nft_types::{
    ArtNft, LaunchpadMarket, LiveObject, MarketSale, NftCertificate, NftCollection, ObjectId,
    ObjectResponse, Owner, PackageType,
};
use regex::Regex;
use tracing::trace;

use crate::fields::{
    attributes, bool_field, id_field, nested_fields, str_field, string_list, struct_fields,
    u64_field, value_to_id, value_to_u64,
};
use crate::pattern::{DescriptorKind, TypeDescriptor};

/// Turns a generic object response into one kind of typed record.
///
/// Parsing is pure: no I/O and no shared state, so a parser can be shared
/// freely across tasks. A response that is not a live object, or whose type
/// descriptor does not have the expected shape, parses to `None`.
pub trait ObjectParser: Send + Sync + 'static {
    type Output: Send + Sync + 'static;

    /// The descriptor kind this parser accepts.
    fn kind(&self) -> DescriptorKind;

    /// Build the record from a live object whose descriptor already matched.
    fn build(&self, object: &LiveObject, descriptor: TypeDescriptor<'_>) -> Self::Output;

    fn regex(&self) -> &'static Regex {
        self.kind().regex()
    }

    /// Whether an object of this type descriptor would be accepted.
    fn matches(&self, type_descriptor: &str) -> bool {
        self.kind().matches(type_descriptor)
    }

    fn parse_live(&self, object: &LiveObject) -> Option<Self::Output> {
        let Some(descriptor) = self.kind().decompose(object.type_descriptor()) else {
            trace!(id = %object.id(), kind = ?self.kind(), "descriptor did not match");
            return None;
        };
        Some(self.build(object, descriptor))
    }

    fn parse(&self, response: &ObjectResponse) -> Option<Self::Output> {
        self.parse_live(response.as_live()?)
    }

    /// Parse every response, dropping the ones that are not of this kind.
    fn parse_all<'a, I>(&self, responses: I) -> Vec<Self::Output>
    where
        I: IntoIterator<Item = &'a ObjectResponse>,
    {
        responses.into_iter().filter_map(|r| self.parse(r)).collect()
    }
}

/// The owner's address for address- or object-owned objects, `""` otherwise.
pub fn parse_object_owner(owner: &Owner) -> String {
    owner.address().to_owned()
}

fn package_type(descriptor: &TypeDescriptor<'_>) -> PackageType {
    PackageType {
        package_object_id: ObjectId::new(descriptor.package),
        package_module: descriptor.module.to_owned(),
        package_module_class_name: descriptor.class_name.to_owned(),
    }
}

/// Parses `nft::Nft<C, D>` objects into [`ArtNft`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ArtNftParser;

impl ObjectParser for ArtNftParser {
    type Output = ArtNft;

    fn kind(&self) -> DescriptorKind {
        DescriptorKind::ArtNft
    }

    fn build(&self, object: &LiveObject, descriptor: TypeDescriptor<'_>) -> ArtNft {
        let fields = object.fields();
        ArtNft {
            id: object.id().clone(),
            name: str_field(fields, "name"),
            url: str_field(fields, "url"),
            collection_id: id_field(fields, "collection_id"),
            attributes: attributes(fields),
            owner: object.owner.clone(),
            owner_address: parse_object_owner(&object.owner),
            data_type: object.data.data_type.clone(),
            package: package_type(&descriptor),
            nft_type: descriptor.secondary.unwrap_or_default().to_owned(),
            raw: Arc::new(object.clone()),
        }
    }
}

/// Parses `collection::Collection<C, std_collection::StdMeta>` objects.
#[derive(Clone, Copy, Debug, Default)]
pub struct CollectionParser;

impl ObjectParser for CollectionParser {
    type Output = NftCollection;

    fn kind(&self) -> DescriptorKind {
        DescriptorKind::Collection
    }

    fn build(&self, object: &LiveObject, descriptor: TypeDescriptor<'_>) -> NftCollection {
        let fields = object.fields();
        NftCollection {
            id: object.id().clone(),
            name: str_field(fields, "name"),
            description: str_field(fields, "description"),
            symbol: str_field(fields, "symbol"),
            creators: string_list(fields, "creators"),
            receiver: str_field(fields, "receiver"),
            mint_authority_id: id_field(fields, "mint_authority"),
            tags: string_list(fields, "tags"),
            data_type: object.data.data_type.clone(),
            package: package_type(&descriptor),
            raw: Arc::new(object.clone()),
        }
    }
}

/// Parses fixed-price launchpads (`slingshot::Slingshot<C, fixed_price::FixedPriceMarket>`).
#[derive(Clone, Copy, Debug, Default)]
pub struct MarketParser;

impl ObjectParser for MarketParser {
    type Output = LaunchpadMarket;

    fn kind(&self) -> DescriptorKind {
        DescriptorKind::Market
    }

    fn build(&self, object: &LiveObject, descriptor: TypeDescriptor<'_>) -> LaunchpadMarket {
        let fields = object.fields();
        let sales = fields
            .get("sales")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().filter_map(nested_fields).map(parse_sale).collect())
            .unwrap_or_default();
        LaunchpadMarket {
            id: object.id().clone(),
            live: bool_field(fields, "live"),
            admin: str_field(fields, "admin"),
            receiver: str_field(fields, "receiver"),
            sales,
            package: package_type(&descriptor),
            raw: Arc::new(object.clone()),
        }
    }
}

fn parse_sale(sale: &serde_json::Map<String, serde_json::Value>) -> MarketSale {
    let nfts = sale
        .get("nfts")
        .and_then(|v| v.as_array())
        .map(|ids| ids.iter().filter_map(value_to_id).collect())
        .unwrap_or_default();
    let market_price = struct_fields(sale, "market")
        .and_then(|market| market.get("price"))
        .and_then(value_to_u64)
        .unwrap_or_else(|| u64_field(sale, "market_price"));
    MarketSale {
        id: id_field(sale, "id"),
        tier_index: u64_field(sale, "tier_index"),
        nfts,
        market_price,
    }
}

/// Parses `launchpad::NftCertificate` objects.
#[derive(Clone, Copy, Debug, Default)]
pub struct CertificateParser;

impl ObjectParser for CertificateParser {
    type Output = NftCertificate;

    fn kind(&self) -> DescriptorKind {
        DescriptorKind::Certificate
    }

    fn build(&self, object: &LiveObject, descriptor: TypeDescriptor<'_>) -> NftCertificate {
        let fields = object.fields();
        NftCertificate {
            id: object.id().clone(),
            package_object_id: ObjectId::new(descriptor.package),
            launchpad_id: id_field(fields, "launchpad_id").unwrap_or_else(|| ObjectId::new("")),
            nft_id: id_field(fields, "nft_id").unwrap_or_else(|| ObjectId::new("")),
            owner_address: parse_object_owner(&object.owner),
            raw: Arc::new(object.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    const PKG: &str = "0xc8670160d3af6a605385f570a59344f5182d4267";

    fn live(id: &str, type_: String, fields: Value, owner: Value) -> ObjectResponse {
        let object: LiveObject = serde_json::from_value(json!({
            "data": {
                "dataType": "moveObject",
                "type": type_,
                "has_public_transfer": true,
                "fields": fields
            },
            "owner": owner,
            "previousTransaction": "9a3f",
            "storageRebate": 16,
            "reference": { "objectId": id, "version": 1, "digest": "d1" }
        }))
        .unwrap();
        ObjectResponse::Live(object)
    }

    fn nft_type() -> String {
        format!("{PKG}::nft::Nft<{PKG}::suimarines::SUIMARINES, {PKG}::unique_nft::Unique>")
    }

    fn nft_response() -> ObjectResponse {
        live(
            "0x01",
            nft_type(),
            json!({
                "id": { "id": "0x01" },
                "name": "First Releap NFT",
                "url": "https://i.imgur.com/D5yhcTC.png",
                "collection_id": "0x16ccac9ac3f10018b231855665fe22215a6f0edf",
                "attributes": { "type": "0x2::vec_map::VecMap", "fields": { "keys": ["Rarity"], "values": ["Ultra-rare"] } }
            }),
            json!({ "AddressOwner": "0xowner" }),
        )
    }

    #[test]
    fn parses_art_nft() {
        let nft = ArtNftParser.parse(&nft_response()).unwrap();
        assert_eq!(nft.id.as_str(), "0x01");
        assert_eq!(nft.name, "First Releap NFT");
        assert_eq!(nft.url, "https://i.imgur.com/D5yhcTC.png");
        assert_eq!(
            nft.collection_id,
            Some(ObjectId::from("0x16ccac9ac3f10018b231855665fe22215a6f0edf"))
        );
        assert_eq!(nft.attributes["Rarity"], "Ultra-rare");
        assert_eq!(nft.owner_address, "0xowner");
        assert_eq!(nft.data_type, "moveObject");
        assert_eq!(nft.package.package_object_id.as_str(), PKG);
        assert_eq!(nft.package.package_module, "suimarines");
        assert_eq!(nft.package.package_module_class_name, "SUIMARINES");
        assert_eq!(nft.nft_type, "unique_nft::Unique");
        assert_eq!(nft.collection_type(), format!("{PKG}::suimarines::SUIMARINES"));
        assert_eq!(nft.raw.id().as_str(), "0x01");
    }

    #[test]
    fn parsing_is_deterministic() {
        let resp = nft_response();
        assert_eq!(ArtNftParser.parse(&resp), ArtNftParser.parse(&resp));
    }

    #[test]
    fn missing_object_is_none() {
        assert!(ArtNftParser.parse(&ObjectResponse::missing("0x01")).is_none());
        assert!(CollectionParser.parse(&ObjectResponse::missing("0x01")).is_none());
    }

    #[test]
    fn wrong_descriptor_is_none() {
        let coin = live("0x02", "0x2::coin::Coin<0x2::sui::SUI>".into(), json!({}), json!({}));
        assert!(ArtNftParser.parse(&coin).is_none());
        assert!(CollectionParser.parse(&nft_response()).is_none());
    }

    #[test]
    fn object_owned_nft_reports_parent() {
        let resp = live("0x03", nft_type(), json!({ "name": "listed" }), json!({ "ObjectOwner": "0xparent" }));
        let nft = ArtNftParser.parse(&resp).unwrap();
        assert_eq!(nft.owner_address, "0xparent");
        assert!(nft.collection_id.is_none());
        assert!(nft.attributes.is_empty());
    }

    #[test]
    fn parses_collection() {
        let resp = live(
            "0x16cc",
            format!("{PKG}::collection::Collection<{PKG}::suimarines::SUIMARINES, {PKG}::std_collection::StdMeta>"),
            json!({
                "name": "Suimarines",
                "description": "A unique NFT collection of Suimarines on Sui",
                "symbol": "SUIM",
                "creators": ["0xcreator"],
                "receiver": "0xreceiver",
                "mint_authority": "0x69dd15849c0be531bc2eabb70a4d1077da2d0411"
            }),
            json!("Immutable"),
        );
        let c = CollectionParser.parse(&resp).unwrap();
        assert_eq!(c.id.as_str(), "0x16cc");
        assert_eq!(c.name, "Suimarines");
        assert_eq!(c.symbol, "SUIM");
        assert_eq!(c.creators, vec!["0xcreator"]);
        assert_eq!(c.receiver, "0xreceiver");
        assert_eq!(
            c.mint_authority_id,
            Some(ObjectId::from("0x69dd15849c0be531bc2eabb70a4d1077da2d0411"))
        );
        assert!(c.tags.is_empty());
        assert_eq!(c.package.package_module, "suimarines");
    }

    #[test]
    fn parses_market_sales() {
        let resp = live(
            "0x5c26",
            format!("{PKG}::slingshot::Slingshot<{PKG}::suimarines::SUIMARINES, {PKG}::fixed_price::FixedPriceMarket>"),
            json!({
                "live": true,
                "admin": "0xadmin",
                "receiver": "0xreceiver",
                "sales": [
                    { "type": "Sale", "fields": { "id": { "id": "0xs0" }, "tier_index": "0", "nfts": [],
                      "market": { "type": "FixedPriceMarket", "fields": { "price": "50" } } } },
                    { "type": "Sale", "fields": { "id": { "id": "0xs1" }, "tier_index": "1", "nfts": ["0xn1", "0xn2"],
                      "market": { "type": "FixedPriceMarket", "fields": { "price": "100" } } } }
                ]
            }),
            json!({ "Shared": { "initial_shared_version": 1 } }),
        );
        let m = MarketParser.parse(&resp).unwrap();
        assert!(m.live);
        assert_eq!(m.sales.len(), 2);
        let sale = m.active_sale().unwrap();
        assert_eq!(sale.tier_index, 1);
        assert_eq!(sale.market_price, 100);
        assert_eq!(sale.nfts, vec![ObjectId::from("0xn1"), ObjectId::from("0xn2")]);
    }

    #[test]
    fn parses_certificate() {
        let resp = live(
            "0xcert",
            format!("{PKG}::launchpad::NftCertificate"),
            json!({ "id": { "id": "0xcert" }, "launchpad_id": "0x5c26", "nft_id": "0xn1" }),
            json!({ "AddressOwner": "0xbuyer" }),
        );
        let cert = CertificateParser.parse(&resp).unwrap();
        assert_eq!(cert.package_object_id.as_str(), PKG);
        assert_eq!(cert.launchpad_id.as_str(), "0x5c26");
        assert_eq!(cert.nft_id.as_str(), "0xn1");
        assert_eq!(cert.owner_address, "0xbuyer");
    }

    #[test]
    fn parse_all_filters() {
        let responses = vec![
            nft_response(),
            ObjectResponse::missing("0xgone"),
            live("0x09", "0x2::coin::Coin<0x2::sui::SUI>".into(), json!({}), json!({})),
        ];
        let parsed = ArtNftParser.parse_all(&responses);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id.as_str(), "0x01");
    }

    #[test]
    fn owner_helper() {
        assert_eq!(parse_object_owner(&Owner::Object("0xparent".into())), "0xparent");
        assert_eq!(parse_object_owner(&Owner::Unknown), "");
    }

    proptest! {
        #[test]
        fn arbitrary_descriptors_never_panic(desc in ".{0,200}") {
            let resp = live("0x01", desc, json!({}), json!({}));
            let first = ArtNftParser.parse(&resp);
            prop_assert_eq!(first, ArtNftParser.parse(&resp));
            let _ = CollectionParser.parse(&resp);
        }

        #[test]
        fn generated_nft_descriptors_decompose(
            pkg in "[a-f0-9]{40}",
            module in "[a-zA-Z_]{1,12}",
            class in "[a-zA-Z_]{1,12}",
            second in "[a-zA-Z_]{1,12}::[a-zA-Z_]{1,12}",
        ) {
            let desc = format!("0x{pkg}::nft::Nft<0x{pkg}::{module}::{class}, 0x{pkg}::{second}>");
            let resp = live("0x01", desc, json!({}), json!({}));
            let nft = ArtNftParser.parse(&resp).unwrap();
            prop_assert_eq!(nft.package.package_object_id.as_str(), format!("0x{pkg}"));
            prop_assert_eq!(nft.package.package_module, module);
            prop_assert_eq!(nft.package.package_module_class_name, class);
            prop_assert_eq!(nft.nft_type, second);
        }
    }
}
