//! Type-descriptor patterns.
//!
//! A descriptor is the Move type string carried by every object, e.g.
//! `0x..::nft::Nft<0x..::suimarines::SUIMARINES, 0x..::unique_nft::Unique>`.
//! Addresses are exactly 40 lowercase hex digits. Matching is unanchored, so a
//! descriptor only has to contain the pattern.

use std::sync::LazyLock;

use regex::Regex;

static ART_NFT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(0x[a-f0-9]{40})::nft::Nft<0x[a-f0-9]{40}::([a-zA-Z_]{1,})::([a-zA-Z_]{1,}), 0x[a-f0-9]{40}::([a-zA-Z_]{1,}::[a-zA-Z_]{1,})>",
    )
    .expect("valid nft pattern")
});

static COLLECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(0x[a-f0-9]{40})::collection::Collection<0x[a-f0-9]{40}::([a-zA-Z_]{1,})::([a-zA-Z_]{1,}), 0x[a-f0-9]{40}::std_collection::StdMeta>",
    )
    .expect("valid collection pattern")
});

static MARKET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(0x[a-f0-9]{40})::slingshot::Slingshot<0x[a-f0-9]{40}::([a-zA-Z_]{1,})::([a-zA-Z_]{1,}), 0x[a-f0-9]{40}::fixed_price::FixedPriceMarket>",
    )
    .expect("valid market pattern")
});

static CERTIFICATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(0x[a-f0-9]{40})::launchpad::NftCertificate").expect("valid certificate pattern")
});

/// The pieces of a matched descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeDescriptor<'a> {
    /// Address of the package that defines the outer type.
    pub package: &'a str,
    /// Module of the first type parameter.
    pub module: &'a str,
    /// Name of the first type parameter.
    pub class_name: &'a str,
    /// Second type parameter as `module::Type`, when the pattern captures one.
    pub secondary: Option<&'a str>,
}

/// The kind of record a descriptor pattern selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DescriptorKind {
    ArtNft,
    Collection,
    Market,
    Certificate,
}

impl DescriptorKind {
    pub fn regex(self) -> &'static Regex {
        match self {
            Self::ArtNft => &ART_NFT,
            Self::Collection => &COLLECTION,
            Self::Market => &MARKET,
            Self::Certificate => &CERTIFICATE,
        }
    }

    pub fn matches(self, descriptor: &str) -> bool {
        self.regex().is_match(descriptor)
    }

    /// Decompose `descriptor`, or `None` if it does not have this kind's shape.
    pub fn decompose(self, descriptor: &str) -> Option<TypeDescriptor<'_>> {
        let caps = self.regex().captures(descriptor)?;
        let package = caps.get(1)?.as_str();
        let group = |i: usize| caps.get(i).map(|m| m.as_str());
        Some(TypeDescriptor {
            package,
            module: group(2).unwrap_or_default(),
            class_name: group(3).unwrap_or_default(),
            secondary: group(4),
        })
    }
}
