use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mediabox")]
#[command(about = "Media dispatch: storage URIs, cached filters and template aliases", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Server(ServerArgs),
    /// Resolve one media and print it as JSON
    Resolve(ResolveArgs),
    /// Print the template an alias resolves to
    Template(TemplateArgs),
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Configuration file (defaults to $MEDIABOX_CONFIG or config/mediabox.toml)
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Address to bind the HTTP server to (overrides server.bind_addr)
    #[arg(long)]
    pub address: Option<SocketAddr>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Media kind used to pick the storage handler
    #[arg(long)]
    pub kind: String,

    /// Storage key of the original
    #[arg(long)]
    pub key: String,

    /// Filter alias
    #[arg(long)]
    pub filter: Option<String>,

    /// Filter option as key=value; values are parsed as JSON when possible
    #[arg(long = "option", short = 'o', value_parser = parse_option)]
    pub options: Vec<(String, serde_json::Value)>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Template alias; omitted selects the default template
    pub alias: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

fn parse_option(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;

    if key.is_empty() {
        return Err(format!("empty option name in '{}'", raw));
    }

    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_option() {
        assert_eq!(parse_option("width=200").unwrap(), ("width".to_string(), json!(200)));
        assert_eq!(parse_option("mode=crop").unwrap(), ("mode".to_string(), json!("crop")));
        assert_eq!(parse_option("x=").unwrap(), ("x".to_string(), json!("")));
        assert!(parse_option("width").is_err());
        assert!(parse_option("=1").is_err());
    }

    #[test]
    fn test_parse_resolve_command() {
        let cli = Cli::try_parse_from([
            "mediabox", "resolve", "--kind", "image", "--key", "images/cat.jpg", "--filter",
            "thumb", "-o", "width=200",
        ])
        .unwrap();

        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.kind, "image");
                assert_eq!(args.filter.as_deref(), Some("thumb"));
                assert_eq!(args.options, vec![("width".to_string(), json!(200))]);
                assert!(args.config.config.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
