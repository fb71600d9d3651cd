use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use wallet_dashboard::{
  CompositeView, ConsoleView, DashboardConfig, DashboardController, DashboardSession,
  FileStore, HtmlChartSurface, HtmlView, HttpDataProvider, LocalWalletProvider, VERSION,
};

fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();
  let config = DashboardConfig::from_env();

  // Initialize logging
  tracing_subscriber::fmt()
    .with_level(true)
    .with_target(false)
    .with_max_level(config.log_level)
    .with_file(true)
    .with_line_number(true)
    .init();

  for warning in &config.warnings {
    warn!("{}", warning);
  }

  tokio::runtime::Runtime::new()?.block_on(async {
    info!("Wallet dashboard v{}", VERSION);
    info!("Networks: {}", config.networks);

    let data_provider = Arc::new(HttpDataProvider::new(config.api_url.clone()));
    info!("API URL: {}", data_provider.base_url());
    let store = Arc::new(
      FileStore::open(&config.store_path)
        .with_context(|| format!("opening store {}", config.store_path.display()))?,
    );
    info!("Session store: {}", store.path().display());

    let html = HtmlView::new();
    let mut view = CompositeView::new();
    view.add_view(Box::new(html.clone()));
    view.add_view(Box::new(ConsoleView::new()));

    let session = DashboardSession::new(view, HtmlChartSurface::new());
    let mut controller = DashboardController::new(data_provider, store, session)
      .with_networks(config.networks.clone())
      .with_demo_address(config.demo_address.clone());
    if let Some(url) = &config.page_url {
      controller = controller.with_page_url(url.clone());
    }
    if let Some(address) = &config.manual_address {
      controller = controller.with_manual_input(address.clone());
    }
    if config.wallet_account.is_some() {
      controller = controller
        .with_wallet(Arc::new(LocalWalletProvider::new(config.wallet_account.clone())));
    } else {
      warn!("No wallet account configured. Set WALLET_ACCOUNT in .env to enable wallet connect.");
    }

    // Failures are already shown as notices; keep going so the page is still written.
    if let Err(e) = controller.start().await {
      error!("Initial load failed: {}", e);
    }

    if config.connect_wallet {
      if let Err(e) = controller.connect_wallet_extension().await {
        error!("Wallet connection failed: {}", e);
      }
    }

    if let Some(period) = config.fee_period {
      if let Err(e) = controller.change_fee_period(period).await {
        error!("Fee refresh for {} failed: {}", period.as_str(), e);
      }
    }

    let page = {
      let session = controller.session().await;
      html.render_page(session.surface())
    };
    tokio::fs::write(&config.output_path, page)
      .await
      .with_context(|| format!("writing {}", config.output_path.display()))?;

    info!("Dashboard written to {}", config.output_path.display());
    Ok(())
  })
}
