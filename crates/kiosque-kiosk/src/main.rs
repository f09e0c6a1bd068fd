use std::sync::Arc;

use eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use kiosque_core::models::answer::AnswerStore;
use kiosque_kiosk::config;
use kiosque_kiosk::kiosk::{Kiosk, Timings};
use kiosque_kiosk::location::{FixedLocation, LocationProvider, NoLocation};
use kiosque_kiosk::login::login;
use kiosque_questionnaire::{Questionnaire, intake_catalog};
use kiosque_triage::TriageClient;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_or_init()?;
    info!(robot_id = %config.robot_id, api_url = %config.api_url, "kiosk starting");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();
    let Some(session) = login(&mut lines, &mut stdout, &config).await? else {
        return Ok(());
    };

    let locator: Arc<dyn LocationProvider> = match config.fixed_location {
        Some(coordinates) => Arc::new(FixedLocation::new(coordinates)),
        None => Arc::new(NoLocation),
    };
    let scorer = Arc::new(TriageClient::new(&config.api_url, config.request_timeout()));
    let flow = Questionnaire::new(intake_catalog(), session, AnswerStore::new());

    Kiosk::new(flow, Timings::from(&config), scorer, locator, stdout)
        .with_reports_dir(config::reports_dir().ok())
        .run(lines)
        .await
}
