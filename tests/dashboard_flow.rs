use std::sync::Arc;

use serde_json::json;
use wallet_dashboard::dashboard::view_model::{MetricId, NO_ASSETS, NO_TRANSACTIONS};
use wallet_dashboard::{
    DashboardController, DashboardSession, HtmlChartSurface, HttpDataProvider, HtmlView,
    MemoryStore, NetworkSet,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ALICE: &str = "0x1234567890123456789012345678901234567890";
const BOB: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

fn alice_payload() -> serde_json::Value {
    json!({
        "address": ALICE,
        "overview": {
            "totalBalance": 1234.5,
            "totalBalanceChange": -3.2,
            "cryptoAssets": 1000,
            "defiPositions": 234.5,
            "totalFees": 12
        },
        "walletBalances": [
            {"symbol": "ALICETOKEN", "name": "Alice Token", "network": "ethereum",
             "balance": 10, "price": 100, "value": 1000}
        ],
        "defiPositions": [
            {"protocol": "Aave", "network": "ethereum", "type": "Lending",
             "assets": [{"symbol": "USDC", "amount": 234.5}], "value": 234.5, "apy": 4.2}
        ],
        "transactions": [
            {"type": "swap", "symbol": "ALICETOKEN", "amount": 1, "value": 100,
             "date": "2024-03-05T10:00:00Z", "status": "Confirmed", "network": "ethereum"}
        ],
        "charts": {
            "portfolioHistory": {"labels": ["Mon", "Tue"], "values": [1200, 1234.5]},
            "feesByNetwork": [{"network": "ethereum", "value": 12}]
        }
    })
}

fn bob_payload() -> serde_json::Value {
    json!({
        "overview": {"totalBalance": 50, "totalBalanceChange": 1.5},
        "walletBalances": [],
        "transactions": []
    })
}

async fn mount(server: &MockServer, address: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/dashboard/wallet"))
        .and(query_param("address", address))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn new_controller(
    server: &MockServer,
) -> (DashboardController<HtmlView, HtmlChartSurface>, HtmlView) {
    let view = HtmlView::new();
    let session = DashboardSession::new(view.clone(), HtmlChartSurface::new());
    let controller = DashboardController::new(
        Arc::new(HttpDataProvider::new(server.uri())),
        Arc::new(MemoryStore::new()),
        session,
    )
    .with_demo_address(None);
    (controller, view)
}

#[tokio::test]
async fn start_renders_overview_from_page_url() {
    let server = MockServer::start().await;
    mount(&server, ALICE, alice_payload()).await;

    let (controller, view) = new_controller(&server);
    let controller = controller.with_page_url(format!("https://dash.example/?address={}", ALICE));
    controller.start().await.unwrap();

    let card = view.metric_html(MetricId::TotalBalance);
    assert!(card.contains("$1,234.50"));
    assert!(card.contains("<div class=\"card-change negative\">-3.2%</div>"));
    assert!(view.balances_html().contains("ALICETOKEN"));
    assert!(view.positions_html().contains("APY 4.20%"));
    assert!(view.transactions_html().contains("tx-swap"));

    let page = {
        let session = controller.session().await;
        view.render_page(session.surface())
    };
    assert!(page.contains("0x1234...7890"));
    assert!(page.contains("\"$12.00 (100%)\""));
}

#[tokio::test]
async fn empty_transactions_render_empty_state() {
    let server = MockServer::start().await;
    mount(&server, BOB, bob_payload()).await;

    let (controller, view) = new_controller(&server);
    controller.load_dashboard_data(Some(BOB), None).await.unwrap();

    assert!(view.transactions_html().contains(NO_TRANSACTIONS));
    assert!(view.balances_html().contains(NO_ASSETS));
}

#[tokio::test]
async fn reloading_with_another_address_replaces_everything() {
    let server = MockServer::start().await;
    mount(&server, ALICE, alice_payload()).await;
    mount(&server, BOB, bob_payload()).await;

    let (controller, view) = new_controller(&server);
    controller.load_dashboard_data(Some(ALICE), None).await.unwrap();
    controller.submit_manual_address(BOB).await.unwrap();

    assert!(view.metric_html(MetricId::TotalBalance).contains("$50.00"));
    for html in [
        view.balances_html(),
        view.positions_html(),
        view.transactions_html(),
    ] {
        assert!(!html.contains("ALICETOKEN"));
        assert!(!html.contains("Aave"));
    }

    let session = controller.session().await;
    assert_eq!(session.displayed_address().unwrap().as_str(), BOB);
    let page = view.render_page(session.surface());
    assert!(!page.contains("1234.5"));
}

#[tokio::test]
async fn network_change_is_sent_to_api() {
    let server = MockServer::start().await;
    mount(&server, ALICE, alice_payload()).await;
    Mock::given(method("GET"))
        .and(path("/dashboard/wallet"))
        .and(query_param("networks", "polygon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bob_payload()))
        .with_priority(1)
        .expect(1)
        .named("polygon reload")
        .mount(&server)
        .await;

    let (controller, view) = new_controller(&server);
    controller.load_dashboard_data(Some(ALICE), None).await.unwrap();
    controller
        .change_networks(NetworkSet::from("polygon"))
        .await
        .unwrap();

    assert!(view.metric_html(MetricId::TotalBalance).contains("$50.00"));
}

#[tokio::test]
async fn api_error_becomes_notice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/wallet"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Upstream down"})))
        .mount(&server)
        .await;

    let (controller, view) = new_controller(&server);
    assert!(controller.load_dashboard_data(Some(ALICE), None).await.is_err());
    assert!(view.notice_html().contains("Upstream down"));
    assert!(!view.is_loading());
}
