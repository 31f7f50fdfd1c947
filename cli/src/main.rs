//! `http-helper`: send one request through the facade and print the response.
//!
//! ```text
//! http-helper --base-url https://jsonplaceholder.typicode.com get /posts -q userId=1
//! http-helper --base-url https://jsonplaceholder.typicode.com --auth TOKEN \
//!     post /posts --json '{"title":"foo","body":"bar","userId":1}'
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use http_helper::{
    ClientConfig, FormData, HttpHelper, HttpResponse, Params, RequestBody, TransportConfig,
    UreqTransport,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "http-helper", version, about = "Send a single HTTP request with shared defaults")]
struct Cli {
    /// JSON file with `base_url` and `headers` defaults
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Prefix prepended verbatim to every endpoint
    #[arg(long, value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Extra header as `Name: value`; repeatable
    #[arg(short = 'H', long = "header", value_name = "HEADER", value_parser = parse_header, global = true)]
    headers: Vec<(String, String)>,

    /// Bearer token sent in the Authorization header
    #[arg(long, value_name = "TOKEN", global = true)]
    auth: Option<String>,

    /// Overall request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    timeout: Option<u64>,

    /// Exit with status 1 when the response status is not 2xx
    #[arg(long, global = true)]
    fail: bool,

    /// Log request dispatch to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Get(QueryArgs),
    Delete(QueryArgs),
    Post(BodyArgs),
    Put(BodyArgs),
}

#[derive(Debug, Args)]
struct QueryArgs {
    endpoint: String,

    /// Query parameter as `key=value`; repeatable
    #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_pair)]
    query: Vec<(String, String)>,
}

impl QueryArgs {
    fn params(&self) -> Params {
        self.query.iter().cloned().collect()
    }
}

#[derive(Debug, Args)]
struct BodyArgs {
    endpoint: String,

    /// JSON document sent as the request body
    #[arg(long, value_name = "JSON", conflicts_with = "form")]
    json: Option<String>,

    /// Form field as `key=value`; repeatable
    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_pair)]
    form: Vec<(String, String)>,
}

impl BodyArgs {
    fn body(&self) -> Result<RequestBody> {
        let json = self
            .json
            .as_deref()
            .map(|raw| serde_json::from_str::<serde_json::Value>(raw))
            .transpose()
            .context("--json is not valid JSON")?;
        let form = (!self.form.is_empty()).then(|| self.form.iter().cloned().collect::<FormData>());
        Ok(RequestBody::from_parts(form, json)?)
    }
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in `{raw}`"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected `key=value`, got `{raw}`"))
}

/// File defaults first, then flags: `--base-url` replaces, `-H` upserts.
fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ClientConfig::from_json(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ClientConfig::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.base_url = Some(base_url.clone());
    }
    for (name, value) in &cli.headers {
        config.headers.upsert(name, value);
    }
    Ok(config)
}

fn transport_config(cli: &Cli) -> TransportConfig {
    TransportConfig {
        timeout: cli.timeout.map(Duration::from_secs),
    }
}

fn build_helper(cli: &Cli) -> Result<HttpHelper> {
    let config = load_config(cli)?;
    let transport = UreqTransport::with_config(&transport_config(cli));
    let mut helper = HttpHelper::with_transport(config, transport);
    if let Some(token) = &cli.auth {
        helper.set_auth(token);
    }
    Ok(helper)
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let helper = build_helper(cli)?;

    let (endpoint, result) = match &cli.command {
        Command::Get(args) => (&args.endpoint, helper.get(&args.endpoint, Some(&args.params()))),
        Command::Delete(args) => (&args.endpoint, helper.delete(&args.endpoint, Some(&args.params()))),
        Command::Post(args) => (&args.endpoint, helper.post(&args.endpoint, args.body()?)),
        Command::Put(args) => (&args.endpoint, helper.put(&args.endpoint, args.body()?)),
    };
    let response = result.with_context(|| format!("request to {} failed", helper.url_for(endpoint)))?;

    println!("{}", render(&response));
    if cli.fail && !response.is_success() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Status line followed by the body, pretty-printed when it is JSON.
fn render(response: &HttpResponse) -> String {
    let body = match response.json::<serde_json::Value>() {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
        Err(_) => String::from_utf8_lossy(response.bytes()).into_owned(),
    };
    if body.is_empty() {
        format!("HTTP {}", response.status)
    } else {
        format!("HTTP {}\n{body}", response.status)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,http_helper=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
