//! One-shot UHI estimate from the command line.

use anyhow::Result;

use crate::cli::PredictArgs;
use crate::config::config;
use crate::earth_engine::{DateWindow, EarthEngineClient, LST_WINDOW_DAYS};
use crate::estimator;
use crate::green_space;
use crate::models::Coordinate;

pub async fn exec(args: PredictArgs) -> Result<()> {
    let coord = Coordinate::new(args.lat, args.lon)?;
    let client = EarthEngineClient::new(config());

    let raw = client
        .mean_lst(coord, DateWindow::trailing_days(LST_WINDOW_DAYS))
        .await?;
    let fraction = green_space::resolve(&client, coord, args.green_space).await;
    let estimate = estimator::estimate(raw, fraction)?;

    println!("{}", serde_json::to_string_pretty(&estimate)?);
    Ok(())
}
