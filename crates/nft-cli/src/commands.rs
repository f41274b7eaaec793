use std::sync::Arc;

use colored::Colorize;
use nft_provider::JsonRpcProvider;
use nft_sdk::{ArtNft, NftCollection, NftService};
use nft_types::{Address, ObjectId};
use serde_json::json;

use crate::cli::*;
use crate::config::CliConfig;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?.with_rpc_url(cli.rpc_url);
    tracing::debug!(rpc_url = %config.provider.rpc_url, "connecting");
    let provider = JsonRpcProvider::new(config.provider)?;
    let service = NftService::with_config(Arc::new(provider), config.service);
    let format = cli.format;

    match cli.command {
        Command::Owner(args) => cmd_owner(&service, args, format).await,
        Command::Get(args) => cmd_get(&service, args, format).await,
        Command::Collection(args) => cmd_collection(&service, args, format).await,
        Command::Listed(args) => cmd_listed(&service, args, format).await,
    }
}

async fn cmd_owner(service: &NftService, args: OwnerArgs, format: OutputFormat) -> anyhow::Result<()> {
    let address = Address::parse(&args.address)?;
    let nfts = service.get_nfts_by_owner(&address).await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&nfts)?),
        OutputFormat::Text => {
            if nfts.is_empty() {
                println!("No NFTs owned by {}", address.to_string().bold());
            }
            for nft in &nfts {
                print_nft(nft);
            }
        }
    }
    Ok(())
}

async fn cmd_get(service: &NftService, args: GetArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ids: Vec<ObjectId> = args.ids.into_iter().map(ObjectId::from).collect();
    let nfts = if args.reload {
        let mut nfts = Vec::with_capacity(ids.len());
        for id in &ids {
            nfts.push(service.get_nft_by_id(id, true).await?);
        }
        nfts
    } else {
        service.get_nfts_by_ids(&ids).await
    };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&nfts)?),
        OutputFormat::Text => {
            for (id, nft) in ids.iter().zip(&nfts) {
                match nft {
                    Some(nft) => print_nft(nft),
                    None => println!("{} {}", id.to_string().yellow(), "not found".dimmed()),
                }
            }
        }
    }
    Ok(())
}

async fn cmd_collection(service: &NftService, args: CollectionArgs, format: OutputFormat) -> anyhow::Result<()> {
    let id = ObjectId::from(args.id);
    let collection = service.get_collection(&id).await?;
    match (format, collection) {
        (OutputFormat::Json, collection) => println!("{}", serde_json::to_string_pretty(&collection)?),
        (OutputFormat::Text, Some(collection)) => print_collection(&collection),
        (OutputFormat::Text, None) => println!("{} {}", id.to_string().yellow(), "not found".dimmed()),
    }
    Ok(())
}

async fn cmd_listed(service: &NftService, args: ListedArgs, format: OutputFormat) -> anyhow::Result<()> {
    let nft = ObjectId::from(args.id);
    let marketplace = ObjectId::from(args.marketplace);
    let listed = service.is_nft_listed(&nft, &marketplace).await?;
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "nft": nft, "marketplace": marketplace, "listed": listed }))?
        ),
        OutputFormat::Text if listed => {
            println!("{} {} is listed on {}", "✓".green().bold(), nft.to_string().yellow(), marketplace.to_string().bold())
        }
        OutputFormat::Text => {
            println!("{} {} is not listed on {}", "✗".red().bold(), nft.to_string().yellow(), marketplace.to_string().bold())
        }
    }
    Ok(())
}

fn print_nft(nft: &ArtNft) {
    println!("{}  {}", nft.id.to_string().yellow().bold(), nft.name.bold());
    println!("  Type: {}", nft.collection_type().cyan());
    println!("  Owner: {}", nft.owner_address);
    if let Some(collection) = &nft.collection_id {
        println!("  Collection: {}", collection.to_string().cyan());
    }
    if !nft.url.is_empty() {
        println!("  Url: {}", nft.url.blue());
    }
    for (key, value) in &nft.attributes {
        println!("  {}: {}", key.dimmed(), value);
    }
}

fn print_collection(collection: &NftCollection) {
    println!("{}  {} ({})", collection.id.to_string().yellow().bold(), collection.name.bold(), collection.symbol);
    println!("  Type: {}", collection.collection_type().cyan());
    if !collection.description.is_empty() {
        println!("  {}", collection.description);
    }
    if !collection.creators.is_empty() {
        println!("  Creators: {}", collection.creators.join(", "));
    }
    if !collection.tags.is_empty() {
        println!("  Tags: {}", collection.tags.join(", ").green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nft_provider::InMemoryProvider;
    use nft_types::LiveObject;

    const PKG: &str = "0xc8670160d3af6a605385f570a59344f5182d4267";

    fn nft(id: &str) -> LiveObject {
        serde_json::from_value(json!({
            "data": {
                "type": format!("{PKG}::nft::Nft<{PKG}::suimarines::SUIMARINES, {PKG}::unique_nft::Unique>"),
                "fields": { "id": { "id": id }, "name": "Suimarine", "url": "https://x" }
            },
            "owner": { "AddressOwner": "0x9db6a28b950590baa63509de3603ef7a2ced0a3c" },
            "reference": { "objectId": id, "version": 1, "digest": "d" }
        }))
        .unwrap()
    }

    fn get(reload: bool) -> GetArgs {
        GetArgs { ids: vec!["0xa".into()], reload }
    }

    #[tokio::test]
    async fn get_with_reload_asks_the_node_again() {
        let provider = Arc::new(InMemoryProvider::new());
        provider.insert(nft("0xa"));
        let service = NftService::new(provider.clone());

        cmd_get(&service, get(false), OutputFormat::Json).await.unwrap();
        cmd_get(&service, get(false), OutputFormat::Json).await.unwrap();
        assert_eq!(provider.batch_calls().len(), 1);

        cmd_get(&service, get(true), OutputFormat::Json).await.unwrap();
        assert_eq!(provider.batch_calls().len(), 2);
    }
}
