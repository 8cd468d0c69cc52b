use clap::Parser;
use service_catalog::app::report;
use service_catalog::config::ShowMode;
use service_catalog::utils::logger;
use service_catalog::{AppState, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(config.verbose, settings.log_level.as_deref());
    }

    tracing::info!("Starting service-catalog CLI");
    tracing::debug!("Resolved settings: {:?}", settings);

    let state = AppState::with_reqwest(&settings.api);

    if settings.show == ShowMode::Hero {
        state.hero.load().await;
        print!("{}", report::render_hero(state.hero.hero().as_ref(), &state.hero.error()));
        if state.hero.hero().is_none() {
            std::process::exit(2);
        }
        return Ok(());
    }

    state.services.load(false).await;
    let error = state.services.error();
    if !error.is_empty() {
        eprintln!("⚠️  {}", error);
    }

    let tree = state.services.tree();

    if let Some(path) = settings.path.as_deref() {
        match tree.get(path) {
            Some(service) => println!("{}", report::render_json(service)?),
            None => {
                eprintln!("❌ No service at path '{}'", path);
                std::process::exit(2);
            }
        }
        return Ok(());
    }

    match settings.show {
        ShowMode::Json => println!("{}", report::render_json(tree.as_ref())?),
        ShowMode::Prices => print!("{}", report::render_price_list(&tree)),
        ShowMode::Csv => report::write_price_csv(&tree, std::io::stdout().lock())?,
        ShowMode::Tree | ShowMode::Hero => print!("{}", report::render_tree(&tree)),
    }

    Ok(())
}
