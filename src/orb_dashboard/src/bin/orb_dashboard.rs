use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use orb_dashboard::{Dashboard, FilterRequest, Request, load_config_path};
use orb_data::selector::DatasetKey;
use shared_utils::env::get_env_var;

const PASSWORD_ENV: &str = "ORB_DASHBOARD_PASSWORD";

#[derive(Parser)]
#[command(version, about = "ORB statistics dashboard CLI")]
struct Cli {
    #[arg(long, value_name = "FILE")]
    config: PathBuf,
    /// Password is read from ORB_DASHBOARD_PASSWORD.
    #[arg(long, value_name = "NAME")]
    user: String,
    /// Indent the JSON output.
    #[arg(long, global = true)]
    pretty: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// List the selector choices for a partial selection.
    Options {
        #[arg(long)]
        instrument: Option<String>,
        #[arg(long, value_name = "HH:MM")]
        orb_start: Option<String>,
        #[arg(long, value_name = "HH:MM")]
        orb_end: Option<String>,
    },
    /// Render every chart for one selection.
    Render(RenderArgs),
}

#[derive(Args)]
struct RenderArgs {
    #[arg(long)]
    instrument: String,
    #[arg(long, value_name = "HH:MM")]
    orb_start: String,
    #[arg(long, value_name = "HH:MM")]
    orb_end: String,
    #[arg(long, value_name = "HH:MM")]
    range_end: String,
    #[arg(long)]
    bucket_width: Option<f64>,
    #[arg(long, default_value = "All")]
    day: String,
    #[arg(long, value_name = "YYYY-MM-DD")]
    start_date: Option<NaiveDate>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    end_date: Option<NaiveDate>,
    #[arg(long, default_value = "All")]
    orb_conf_direction: String,
    #[arg(long, default_value = "All", value_name = "HH:MM")]
    orb_conf_time: String,
    #[arg(long, default_value = "All")]
    orb_range_direction: String,
    #[arg(long, default_value = "All")]
    orb_true: String,
    #[arg(long, default_value = "All")]
    box_color: String,
}

impl RenderArgs {
    fn into_request(self) -> Request {
        Request {
            key: DatasetKey::new(self.instrument, self.orb_start, self.orb_end, self.range_end),
            bucket_width: self.bucket_width,
            filters: FilterRequest {
                weekday: self.day,
                orb_conf_direction: self.orb_conf_direction,
                orb_conf_time: self.orb_conf_time,
                orb_range_direction: self.orb_range_direction,
                orb_true: self.orb_true,
                box_color: self.box_color,
                start_date: self.start_date,
                end_date: self.end_date,
            },
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = load_config_path(&cli.config)?;
    let mut dashboard = Dashboard::from_config(config, orb_data::cache::global())?;

    let password = get_env_var(PASSWORD_ENV)?;
    dashboard
        .login(&cli.user, &password)
        .with_context(|| format!("login as {}", cli.user))?;

    match cli.cmd {
        Cmd::Options {
            instrument,
            orb_start,
            orb_end,
        } => {
            let options = dashboard
                .options(instrument.as_deref(), orb_start.as_deref(), orb_end.as_deref())
                .await?;
            print_json(&options, cli.pretty)?;
        }
        Cmd::Render(args) => {
            let view = dashboard.render(&args.into_request()).await?;
            for message in view.messages() {
                tracing::warn!("{message}");
            }
            print_json(&view, cli.pretty)?;
        }
    }

    Ok(())
}
