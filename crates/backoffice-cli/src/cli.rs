use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "backoffice", version, about = "Browse and edit marketplace back-office resources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Request timeout in seconds. Overrides BACKOFFICE_TIMEOUT_SECS.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a list view and print its table.
    List(ListArgs),

    /// GET a resource and print the response body.
    Get(GetArgs),

    /// Build a record from field writes and send it.
    Submit(SubmitArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// List view declaration (JSON).
    #[arg(long, value_name = "PATH")]
    pub view: PathBuf,

    /// Starting query string, as found in the address bar.
    #[arg(long)]
    pub query: Option<String>,

    /// Filter value, `name=value`. The operator comes from the view unless the
    /// value starts with `~`, `<` or `>`.
    #[arg(long = "filter", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub filters: Vec<(String, String)>,

    /// Column id to sort by.
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Free-text search term.
    #[arg(long)]
    pub search: Option<String>,

    /// Print only selected rows matching this column id and value, `id=value`.
    #[arg(long, value_name = "ID=VALUE", value_parser = parse_key_value)]
    pub select: Option<(String, String)>,
}

#[derive(Args)]
pub struct GetArgs {
    /// Resource path below the API prefix, e.g. `buyers/12`.
    pub path: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SubmitMethod {
    Post,
    Put,
    Patch,
}

impl From<SubmitMethod> for http::Method {
    fn from(method: SubmitMethod) -> Self {
        match method {
            SubmitMethod::Post => http::Method::POST,
            SubmitMethod::Put => http::Method::PUT,
            SubmitMethod::Patch => http::Method::PATCH,
        }
    }
}

#[derive(Args)]
pub struct SubmitArgs {
    /// Resource path below the API prefix.
    pub path: String,

    #[arg(long, value_enum, default_value = "post")]
    pub method: SubmitMethod,

    /// Initial record (JSON file).
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Field write, `path=value`, e.g. `address[0].city=Leeds`.
    #[arg(long = "set", value_name = "PATH=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,

    /// Field write parsed as a number, `path=value`.
    #[arg(long = "set-number", value_name = "PATH=VALUE", value_parser = parse_key_value)]
    pub set_number: Vec<(String, String)>,

    /// Date field write, `path=DD/MM/YYYY HH:MM`.
    #[arg(long = "set-date", value_name = "PATH=DATE TIME", value_parser = parse_key_value)]
    pub set_date: Vec<(String, String)>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}
