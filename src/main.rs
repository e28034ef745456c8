use std::process;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::debug;

use stockboard::cli::{Cli, Command, ViewArgs};
use stockboard::domain::entities::dataset::{SortDirection, SortSpec};
use stockboard::infra::config::AppConfig;
use stockboard::infra::export::delivery::DirectoryDelivery;
use stockboard::infra::http::source::HttpSource;
use stockboard::infra::sqlite::source::SqliteSource;
use stockboard::platform::paths::default_export_dir;
use stockboard::ui::render::render_snapshot;
use stockboard::usecase::ports::source::DataSource;
use stockboard::usecase::services::dashboard::{Dashboard, FetchStatus};
use stockboard::usecase::services::export_service::ExportOutcome;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::resolve(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    debug!("using API at {}", config.base_url);

    match cli.command {
        Command::List => {
            for dashboard in &config.dashboards {
                println!("{:<24} {}", dashboard.name, dashboard.display_title());
            }
            Ok(())
        }
        Command::Show(view) => {
            let dashboard = load_dashboard(&config, &view)?;
            print!("{}", render_snapshot(&dashboard.snapshot()));
            if let FetchStatus::Failed(err) = dashboard.status() {
                bail!("{}: {err}", dashboard.config().name)
            }
            Ok(())
        }
        Command::Export { view, out } => {
            let dashboard = load_dashboard(&config, &view)?;
            if let FetchStatus::Failed(err) = dashboard.status() {
                bail!("{}: {err}", dashboard.config().name)
            }
            let export_dir = match out.or_else(|| config.export_dir.clone()) {
                Some(dir) => dir,
                None => default_export_dir()?,
            };
            let delivery = DirectoryDelivery::new(export_dir);
            match dashboard.export(&delivery)? {
                ExportOutcome::Skipped => println!("nothing to export: no matching rows"),
                ExportOutcome::Delivered { path, rows } => {
                    println!("exported {rows} rows to {}", path.display())
                }
            }
            Ok(())
        }
    }
}

fn load_dashboard(config: &AppConfig, args: &ViewArgs) -> Result<Dashboard> {
    let dashboard_config = config
        .dashboard(&args.dashboard)
        .cloned()
        .ok_or_else(|| anyhow!("unknown dashboard `{}` (see `stockboard list`)", args.dashboard))?;

    let source: Box<dyn DataSource> = match &args.db {
        Some(db_path) => {
            let sql = dashboard_config.sql.as_deref().ok_or_else(|| {
                anyhow!("dashboard `{}` has no `sql` for --db", dashboard_config.name)
            })?;
            Box::new(SqliteSource::new(db_path.clone(), sql))
        }
        None => Box::new(HttpSource::new(&config.base_url, &dashboard_config.endpoint)),
    };

    let mut dashboard = Dashboard::new(dashboard_config)
        .with_context(|| format!("invalid dashboard `{}`", args.dashboard))?;
    for (name, value) in &args.params {
        dashboard.set_param(name, value.clone());
    }
    dashboard.refresh(source.as_ref());

    let table = dashboard.table_mut();
    if let Some(term) = &args.search {
        table.set_search(term);
    }
    for (field, term) in &args.filters {
        table.set_column_filter(field, term)?;
    }
    if let Some(field) = &args.sort {
        let direction = if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        table.set_sort(Some(SortSpec {
            field: field.clone(),
            direction,
        }));
    }
    dashboard.set_page(args.page);
    Ok(dashboard)
}
