// Basic queries against public Socrata portals
//
// Fetches campaign contributions and summarizes them per recipient, then
// compares how many 311 complaints mention trees in two cities.
//
// Set SODAPY_APPTOKEN to avoid the anonymous throttle and SODA_LOG to change
// the log filter (default "info").
//
//     cargo run -p soda-frame --example basic_queries

use anyhow::Context;
use soda_frame::{cast_float, compare_match_shares, fetch_frame, summarize_by};
use soda_sources::{ClientConfig, Endpoint, ResourceClient, RetryPolicy, SoqlQuery};
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONTRIBUTIONS_HOST: &str = "opendata.socrata.com";
const CONTRIBUTIONS_DATASET: &str = "f92i-ik66";

const NYC_HOST: &str = "data.cityofnewyork.us";
const NYC_DATASET: &str = "fhrw-4uyv";

const CHATT_HOST: &str = "data.chattlibrary.org";
const CHATT_DATASET: &str = "sf89-4qcw";

fn client(host: &str) -> anyhow::Result<ResourceClient> {
    let config = ClientConfig::default().with_retry(RetryPolicy::default());
    ResourceClient::new(Endpoint::from_env(host), config)
        .with_context(|| format!("building client for {}", host))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("SODA_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let contributions = client(CONTRIBUTIONS_HOST)?;
    info!(
        "Domain: {} | token: {} | URI prefix: {}",
        contributions.host(),
        contributions.has_token(),
        contributions.uri_prefix()
    );

    let df = fetch_frame(&contributions, CONTRIBUTIONS_DATASET, &SoqlQuery::new()).await?;
    println!("{}", df.head(Some(5)));

    let df = cast_float(&df, "amount")?;
    let by_candidate = summarize_by(&df, "recipient", "amount")?;
    println!("{}", by_candidate.head(Some(5)));

    let nyc = fetch_frame(&client(NYC_HOST)?, NYC_DATASET, &SoqlQuery::new()).await?;
    info!("{}: {:?}", NYC_HOST, nyc.shape());

    let chatt = fetch_frame(&client(CHATT_HOST)?, CHATT_DATASET, &SoqlQuery::new()).await?;
    info!("{}: {:?}", CHATT_HOST, chatt.shape());

    // Both results are capped at 1000 rows by the portals, so only the
    // shares are comparable, not the counts.
    let tree_related = compare_match_shares(
        &[("nyc", &nyc, "complaint_type"), ("chatt", &chatt, "description")],
        "[T|t]ree",
    )?;
    println!("{}", tree_related);

    Ok(())
}
