mod capture;
mod cli;
mod config;
mod domain;
mod export;
mod render;
mod session;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    cli::run(pico_args::Arguments::from_env()).await
}
