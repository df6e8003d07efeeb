use clap::Parser;
use cli::{Cli, Command};

mod cities;
mod cli;
mod config;
mod earth_engine;
mod error;
mod estimator;
mod green_space;
mod models;
mod server;
mod tools;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Cli::parse();

    match args.cmd {
        Command::Http { address } => server::run(address).await,
        Command::Predict(predict_args) => {
            tools::predict::exec(predict_args).await.unwrap();
        }
    }
}
