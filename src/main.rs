use clap::Parser;
use photo_timeline::{cli, client, config, error, render};
use photo_timeline_common::{ArchiveConfig, PaginationCursor};
use cli::{Cli, Commands};
use client::TimelineClient;
use config::Config;
use error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = Config::load()?;

    match cli.command {
        Commands::Calendar { month, select } => {
            let today = chrono::Local::now().date_naive();
            let state = cli::calendar_state(month.as_deref(), select.as_deref(), today)?;

            let client = TimelineClient::new(&config)?;
            let dates = client.fetch_archive_dates().await?;
            log::info!("{}日分のイベント日付を取得", dates.len());

            print!("{}", render::render_calendar(&state, &dates));
        }

        Commands::Archive { skip, limit, media_type, raw } => {
            let archive = ArchiveConfig {
                initial_skip: skip,
                limit: limit.unwrap_or(config.default_limit),
                total: u32::MAX,
                media_type,
            };
            if archive.limit == 0 {
                return Err(error::TimelineError::InvalidArgument("--limit は1以上".into()));
            }
            let mut cursor = PaginationCursor::from(archive);

            let client = TimelineClient::new(&config)?;
            let html = client.fetch_archive_page(&cursor).await?;
            let step = cursor.on_fragment(&html);

            if raw {
                println!("{}", html);
            }
            println!("{}", render::archive_summary(&html, step, cursor.skip));
        }

        Commands::Event { id } => {
            let client = TimelineClient::new(&config)?;
            let detail = client.fetch_event_detail(&id).await?;
            println!("{}", render::render_detail(&detail));
        }

        Commands::Stack { id } => {
            let client = TimelineClient::new(&config)?;
            let html = client.fetch_stack(&id).await?;
            println!("{}", html);
        }

        Commands::Config { set_server, show } => {
            if let Some(url) = set_server {
                config.set_server(&url)?;
                config.save()?;
                println!("✔ サーバーURLを設定しました: {}", config.server_url);
            }

            if show {
                println!("設定ファイル: {}", Config::config_path()?.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
                println!("接続先: {}", config.server_url());
            }
        }
    }

    Ok(())
}
