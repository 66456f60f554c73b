use anyhow::Context;
use clap::Parser;
use seed_share::core::csv_import::parse_seed_csv_bytes;
use seed_share::core::store::DEFAULT_SEEDS_FILE;
use seed_share::core::Storage;
use seed_share::domain::model::Inventory;
use seed_share::utils::logger;
use seed_share::LocalStorage;

#[derive(Parser)]
#[command(name = "convert-seeds")]
#[command(about = "Convert a seed list CSV into the server's seeds JSON file")]
struct Args {
    /// CSV with columns id, family, name, quantity (first row is a header)
    #[arg(short, long)]
    input: String,

    /// Data directory the server reads from
    #[arg(long, default_value = "./data")]
    data_dir: String,

    /// Output file name inside the data directory
    #[arg(short, long, default_value = DEFAULT_SEEDS_FILE)]
    output: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Reading seed list from: {}", args.input);
    let data = tokio::fs::read(&args.input)
        .await
        .with_context(|| format!("failed to read {}", args.input))?;

    let seeds = parse_seed_csv_bytes(&data).context("failed to parse seed CSV")?;
    let inventory = Inventory::new(seeds).context("seed list is not valid")?;

    let json = serde_json::to_vec_pretty(inventory.seeds())?;
    let storage = LocalStorage::new(&args.data_dir);
    storage
        .write_file(&args.output, &json)
        .await
        .with_context(|| format!("failed to write {}/{}", args.data_dir, args.output))?;

    tracing::info!(
        "✅ Converted {} seeds into {}",
        inventory.seeds().len(),
        storage.base_path().join(&args.output).display()
    );
    println!("✅ Successfully converted {} seeds to JSON.", inventory.seeds().len());

    Ok(())
}
