//! The `search` subcommand.

use anyhow::Context;
use clap::Args;

use konbini_core::{AppConfig, Coordinates, SearchResult};
use konbini_gemini::GeminiClient;
use konbini_reconcile::reconcile;

use crate::output::{render, OutputFormat};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search center latitude; requires --lng.
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Search center longitude; requires --lat.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Free-text address to geocode; ignored when --lat/--lng are given.
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub address: Option<String>,

    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

pub async fn run(
    config: &AppConfig,
    gemini: &GeminiClient,
    args: &SearchArgs,
) -> anyhow::Result<()> {
    let center = resolve_center(config, gemini, args).await?;

    tracing::info!(%center, brand = %config.brand, "searching for stores");
    let raw = gemini
        .find_nearby_stores(center, &config.brand, config.search_radius_km)
        .await
        .context("store search failed")?;

    let stores = reconcile(&raw.text, &raw.places, &config.brand);
    let result = SearchResult {
        text: raw.text,
        stores,
    };

    print!("{}", render(args.format, center, &result)?);
    Ok(())
}

async fn resolve_center(
    config: &AppConfig,
    gemini: &GeminiClient,
    args: &SearchArgs,
) -> anyhow::Result<Coordinates> {
    if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        let center = Coordinates::new(lat, lng);
        anyhow::ensure!(
            center.is_finite(),
            "latitude and longitude must be finite numbers"
        );
        return Ok(center);
    }

    if let Some(address) = args.address.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        return match gemini.geocode(address).await? {
            Some(center) => Ok(center),
            None => anyhow::bail!("could not resolve \"{address}\" to coordinates"),
        };
    }

    Ok(config.default_center)
}
