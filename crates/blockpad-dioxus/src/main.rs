use blockpad_config::Config;
use blockpad_engine::BlockKind;
use dioxus::prelude::*;

mod render;
mod ui;

use ui::App;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("blockpad starting up!");

    let config = load_config_or_default();
    log::info!(
        "Launching with title '{}' and default kind '{}'",
        config.title,
        config.default_kind
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config(&config.title))
        .launch(app_root);
}

fn load_config_or_default() -> Config {
    match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", Config::config_path().display());
            config
        }
        Ok(None) => {
            log::info!("No config file found, using defaults");
            Config::default()
        }
        Err(e) => {
            log::warn!("Failed to load config, using defaults: {e}");
            Config::default()
        }
    }
}

fn app_root() -> Element {
    let config = load_config_or_default();
    let initial_kind = BlockKind::from_name(&config.default_kind).unwrap_or(BlockKind::Body);

    rsx! {
        App { initial_kind }
    }
}

fn make_window_config(title: &str) -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title(title)
        .with_always_on_top(false);

    Config::default().with_window(window)
}
