mod config;
mod platform;

fn main() -> anyhow::Result<()> {
    platform::run_app(config::ViewerConfig::from_env())
}
