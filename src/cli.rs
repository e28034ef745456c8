use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::usecase::ports::source::ParamValue;

#[derive(Parser, Debug, Clone)]
#[command(name = "stockboard")]
#[command(about = "Inventory and sales dashboards over a JSON analytics API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, value_name = "FILE", help = "Dashboard config file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "List configured dashboards")]
    List,
    #[command(about = "Fetch a dashboard and print the current page with its KPIs")]
    Show(ViewArgs),
    #[command(about = "Fetch a dashboard and write the matching rows as CSV")]
    Export {
        #[command(flatten)]
        view: ViewArgs,

        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    #[arg(help = "Dashboard name, see `stockboard list`")]
    pub dashboard: String,

    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, ParamValue)>,

    #[arg(long)]
    pub search: Option<String>,

    #[arg(long = "filter", value_name = "FIELD=TERM", value_parser = parse_pair)]
    pub filters: Vec<(String, String)>,

    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,

    #[arg(long, requires = "sort")]
    pub desc: bool,

    #[arg(long, default_value = "1")]
    pub page: usize,

    #[arg(long, value_name = "FILE", help = "Read rows from a SQLite file instead of HTTP")]
    pub db: Option<PathBuf>,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_param(raw: &str) -> Result<(String, ParamValue), String> {
    let (key, value) = parse_pair(raw)?;
    Ok((key, ParamValue::parse(&value)))
}
