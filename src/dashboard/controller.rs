use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use reqwest::Url;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::error::{DashboardError, Result};
use crate::models::{NetworkSet, WalletAddress};
use crate::providers::store::CONNECTED_WALLET_KEY;
use crate::traits::{
    ChartSurface, DashboardDataProvider, DashboardView, FeePeriod, SessionStore, WalletProvider,
};

use super::session::DashboardSession;
use super::view_model::Notice;

pub const DEMO_ADDRESS: &str = "0x28C6c06298d514Db089934071355E5743bf21d60";
pub const NO_ADDRESS_MESSAGE: &str = "Please enter a valid wallet address";

/// Inputs the page exposes besides the session itself.
#[derive(Debug, Clone, Default)]
struct PageInputs {
    page_url: Option<String>,
    manual_input: String,
    networks: NetworkSet,
}

/// `address` query parameter of a page URL.
pub fn address_from_url(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "address")
        .map(|(_, value)| value.into_owned())
}

/// Drives one dashboard session: resolves the wallet to show, loads its data
/// and reacts to user interactions.
pub struct DashboardController<V, S> {
    data_provider: Arc<dyn DashboardDataProvider>,
    wallet: Option<Arc<dyn WalletProvider>>,
    store: Arc<dyn SessionStore>,
    session: Mutex<DashboardSession<V, S>>,
    inputs: Mutex<PageInputs>,
    demo_address: Option<WalletAddress>,
    generation: AtomicU64,
}

impl<V: DashboardView, S: ChartSurface> DashboardController<V, S> {
    pub fn new(
        data_provider: Arc<dyn DashboardDataProvider>,
        store: Arc<dyn SessionStore>,
        session: DashboardSession<V, S>,
    ) -> Self {
        Self {
            data_provider,
            wallet: None,
            store,
            session: Mutex::new(session),
            inputs: Mutex::new(PageInputs::default()),
            demo_address: WalletAddress::parse(DEMO_ADDRESS).ok(),
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_wallet(mut self, wallet: Arc<dyn WalletProvider>) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.inputs.get_mut().page_url = Some(url.into());
        self
    }

    pub fn with_manual_input(mut self, input: impl Into<String>) -> Self {
        self.inputs.get_mut().manual_input = input.into();
        self
    }

    pub fn with_networks(mut self, networks: NetworkSet) -> Self {
        self.inputs.get_mut().networks = networks;
        self
    }

    /// Fallback shown when nothing else resolves. `None` disables it.
    pub fn with_demo_address(mut self, address: Option<WalletAddress>) -> Self {
        self.demo_address = address;
        self
    }

    /// Lock the session, for reading rendered state.
    pub async fn session(&self) -> MutexGuard<'_, DashboardSession<V, S>> {
        self.session.lock().await
    }

    pub async fn networks(&self) -> NetworkSet {
        self.inputs.lock().await.networks.clone()
    }

    async fn notify_error(&self, err: &DashboardError) {
        self.session
            .lock()
            .await
            .notify(Notice::error(err.to_string()));
    }

    async fn fail<T>(&self, err: DashboardError) -> Result<T> {
        self.notify_error(&err).await;
        Err(err)
    }

    async fn fail_no_address<T>(&self) -> Result<T> {
        self.session
            .lock()
            .await
            .notify(Notice::error(NO_ADDRESS_MESSAGE));
        Err(DashboardError::InvalidAddress)
    }

    /// First valid address from the display, the store, the page URL, the
    /// manual input, the wallet's selected account and the demo fallback.
    pub async fn resolve_address(&self) -> Option<WalletAddress> {
        if let Some(address) = self.session.lock().await.displayed_address() {
            return Some(address.clone());
        }

        let inputs = self.inputs.lock().await.clone();
        let candidates = [
            self.store.get(CONNECTED_WALLET_KEY),
            inputs.page_url.as_deref().and_then(address_from_url),
            Some(inputs.manual_input.trim().to_string()),
            self.wallet.as_ref().and_then(|w| w.selected_address()),
        ];

        candidates
            .into_iter()
            .flatten()
            .find_map(|candidate| WalletAddress::parse(&candidate).ok())
            .or_else(|| self.demo_address.clone())
    }

    /// Load and render the dashboard for `address`, or for the resolved
    /// address when none is given.
    ///
    /// A response is applied only if no newer load started while it was in
    /// flight.
    pub async fn load_dashboard_data(
        &self,
        address: Option<&str>,
        networks: Option<&NetworkSet>,
    ) -> Result<()> {
        let address = match address {
            Some(raw) => match WalletAddress::parse(raw) {
                Ok(address) => address,
                Err(e) => return self.fail(e).await,
            },
            None => match self.resolve_address().await {
                Some(address) => address,
                None => return self.fail_no_address().await,
            },
        };
        let networks = match networks {
            Some(networks) => networks.clone(),
            None => self.networks().await,
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut session = self.session.lock().await;
            session.clear_notice();
            session.display_address(&address);
            session.set_loading(true);
        }
        info!("Loading dashboard for {} on {}", address.short(), networks);

        let result = self
            .data_provider
            .fetch_dashboard_data(address.as_str(), Some(&networks))
            .await;

        let mut session = self.session.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Dropping stale dashboard response for {}", address.short());
            return Ok(());
        }
        session.set_loading(false);

        match result {
            Ok(payload) => {
                session.clear_notice();
                session.apply(&payload);
                info!("Dashboard updated for {}", address.short());
                Ok(())
            }
            Err(e) => {
                session.notify(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Reload with a new network selection.
    pub async fn change_networks(&self, networks: NetworkSet) -> Result<()> {
        self.inputs.lock().await.networks = networks.clone();
        self.load_dashboard_data(None, Some(&networks)).await
    }

    pub async fn submit_manual_address(&self, input: &str) -> Result<()> {
        let input = input.trim().to_string();
        self.inputs.lock().await.manual_input = input.clone();

        if WalletAddress::parse(&input).is_err() {
            return self.fail_no_address().await;
        }
        self.load_dashboard_data(Some(&input), None).await
    }

    /// Refetch fees for the displayed wallet over another period.
    pub async fn change_fee_period(&self, period: FeePeriod) -> Result<()> {
        let Some(address) = self.resolve_address().await else {
            return self.fail_no_address().await;
        };
        let networks = self.networks().await;
        let generation = self.generation.load(Ordering::SeqCst);

        let result = self
            .data_provider
            .fetch_gas_fees(address.as_str(), Some(&networks), period)
            .await;

        let mut session = self.session.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Dropping {} fee report, a newer load started", period.as_str());
            return Ok(());
        }
        match result {
            Ok(report) => {
                session.apply_fees(&report);
                info!("Fees updated for period {}", period.as_str());
                Ok(())
            }
            Err(e) => {
                session.notify(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Ask the wallet extension for an account, remember it and load it.
    pub async fn connect_wallet_extension(&self) -> Result<()> {
        let wallet = match &self.wallet {
            Some(wallet) if wallet.is_available() => wallet.clone(),
            _ => return self.fail(DashboardError::WalletProviderUnavailable).await,
        };

        let accounts = match wallet.request_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => return self.fail(e).await,
        };
        let Some(account) = accounts.into_iter().next() else {
            return self.fail(DashboardError::WalletAuthorizationDeclined).await;
        };
        let address = match WalletAddress::parse(&account) {
            Ok(address) => address,
            Err(e) => return self.fail(e).await,
        };

        if let Err(e) = self.store.set(CONNECTED_WALLET_KEY, address.as_str()) {
            warn!("Could not persist wallet connection: {}", e);
        }
        {
            let mut session = self.session.lock().await;
            session.set_connected(true);
            session.notify(Notice::success("Wallet connected successfully"));
        }
        info!("{} connected {}", wallet.name(), address.short());

        self.load_dashboard_data(Some(address.as_str()), None).await
    }

    /// Pairing-based wallets are not supported yet.
    pub async fn connect_wallet_pairing(&self) -> Result<()> {
        self.fail(DashboardError::FeatureUnavailable("WalletConnect"))
            .await
    }

    /// Create the charts, then resume a remembered connection or load the
    /// resolved address.
    pub async fn start(&self) -> Result<()> {
        self.session.lock().await.init_charts();

        let remembered = self
            .store
            .get(CONNECTED_WALLET_KEY)
            .and_then(|stored| WalletAddress::parse(&stored).ok());

        match remembered {
            Some(address) => {
                info!("Resuming wallet connection for {}", address.short());
                self.session.lock().await.set_connected(true);
                self.load_dashboard_data(Some(address.as_str()), None).await
            }
            None => self.load_dashboard_data(None, None).await,
        }
    }
}
