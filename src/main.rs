mod cli;

use clap::Parser;
use cli::{Cli, Commands, ConfigArgs, ResolveArgs};
use mediabox::api::models::ResolveResponse;
use mediabox::config::Config;
use mediabox::dispatch::MediaDispatcher;
use mediabox::filters::TransformerSet;
use mediabox::media::{MediaFile, Options};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Server(args) => {
            let config = load_config(args.config)?;
            let address = args.address.unwrap_or(config.server.bind_addr);
            mediabox::api::run(config, address).await?
        }
        Commands::Resolve(args) => resolve(args).await?,
        Commands::Template(args) => {
            let config = load_config(args.config)?;
            let dispatcher = MediaDispatcher::from_config(&config, &TransformerSet::with_defaults())?;
            println!("{}", dispatcher.templates().resolve(args.alias.as_deref()));
        }
    }

    Ok(())
}

fn load_config(args: ConfigArgs) -> Result<Config, AnyError> {
    let config = match args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

async fn resolve(args: ResolveArgs) -> Result<(), AnyError> {
    let config = load_config(args.config)?;
    let dispatcher = MediaDispatcher::from_config(&config, &TransformerSet::with_defaults())?;

    let name = args.key.rsplit('/').next().unwrap_or(&args.key).to_string();
    let mut media = MediaFile::new(args.kind, name, args.key.as_str());
    let options: Options = args.options.into_iter().collect();

    let resolved = dispatcher
        .resolve_filtered_media(&mut media, args.filter.as_deref(), &options)
        .await?;

    let filtered = resolved.is_filtered();
    let response = ResolveResponse {
        media: resolved.into_owned(),
        filtered,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
