use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "nft",
    about = "Query NFTs, collections and marketplace listings on Sui",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Full node JSON-RPC endpoint, overriding the config file
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the NFTs owned by an address
    Owner(OwnerArgs),
    /// Fetch NFTs by object ID, in one batch
    Get(GetArgs),
    /// Fetch a collection
    Collection(CollectionArgs),
    /// Check whether an NFT is listed on a marketplace
    Listed(ListedArgs),
}

#[derive(Args)]
pub struct OwnerArgs {
    pub address: String,
}

#[derive(Args)]
pub struct GetArgs {
    #[arg(required = true)]
    pub ids: Vec<String>,
    /// Drop each cached record and ask the node again, one at a time
    #[arg(long)]
    pub reload: bool,
}

#[derive(Args)]
pub struct CollectionArgs {
    pub id: String,
}

#[derive(Args)]
pub struct ListedArgs {
    pub id: String,
    #[arg(short, long)]
    pub marketplace: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_get_with_many_ids() {
        let cli = Cli::try_parse_from(["nft", "get", "0x1", "0x2", "--reload", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Get(args) => {
                assert_eq!(args.ids, vec!["0x1", "0x2"]);
                assert!(args.reload);
            }
            _ => panic!("expected get"),
        }
    }

    #[test]
    fn get_requires_an_id() {
        assert!(Cli::try_parse_from(["nft", "get"]).is_err());
    }

    #[test]
    fn listed_requires_marketplace() {
        assert!(Cli::try_parse_from(["nft", "listed", "0x1"]).is_err());
        let cli = Cli::try_parse_from(["nft", "-v", "listed", "0x1", "-m", "0xmarket"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Listed(args) => assert_eq!(args.marketplace, "0xmarket"),
            _ => panic!("expected listed"),
        }
    }

    #[test]
    fn global_overrides() {
        let cli = Cli::try_parse_from([
            "nft", "owner", "0xabc", "--rpc-url", "http://localhost:9000", "--config", "nft.toml",
        ])
        .unwrap();
        assert_eq!(cli.rpc_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cli.config, Some(PathBuf::from("nft.toml")));
        assert_eq!(cli.format, OutputFormat::Text);
    }
}
