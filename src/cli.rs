use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(about = "UHI backend CLI.")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Http {
        #[arg(env = "UHI_SERVER_ADDRESS", default_value = "127.0.0.1:5000")]
        address: std::net::SocketAddr,
    },
    /// One-shot UHI estimate for a coordinate, printed as JSON.
    Predict(PredictArgs),
}

#[derive(Debug, Parser)]
pub struct PredictArgs {
    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
    /// Green-space share of the area, 0-100. Derived from NDVI when omitted.
    #[arg(long)]
    pub green_space: Option<f64>,
}
