use std::sync::Arc;

use dashmap::DashMap;

use crate::charts::adapters::{
    FEES_BY_NETWORK_TARGET, FEES_BY_TYPE_TARGET, FEES_TARGET, PORTFOLIO_TARGET,
};
use crate::dashboard::view_model::{
    MetricCard, MetricId, Notice, NoticeLevel, PositionCard, Section, TokenRow, TransactionRow,
};
use crate::models::WalletAddress;
use crate::traits::view::DashboardView;

use super::html_surface::HtmlChartSurface;

const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Region {
    Address,
    Loading,
    Notice,
    WalletStatus,
    Metric(MetricId),
    Balances,
    Positions,
    Transactions,
}

/// Static HTML rendering of the dashboard.
///
/// Clones share the same regions, so one clone can be handed to a controller
/// while another renders the page.
#[derive(Debug, Clone, Default)]
pub struct HtmlView {
    regions: Arc<DashMap<Region, String>>,
}

impl HtmlView {
    pub fn new() -> Self {
        Self::default()
    }

    fn region(&self, region: Region) -> String {
        self.regions
            .get(&region)
            .map(|r| r.value().clone())
            .unwrap_or_default()
    }

    fn set(&self, region: Region, html: String) {
        self.regions.insert(region, html);
    }

    pub fn balances_html(&self) -> String {
        self.region(Region::Balances)
    }

    pub fn positions_html(&self) -> String {
        self.region(Region::Positions)
    }

    pub fn transactions_html(&self) -> String {
        self.region(Region::Transactions)
    }

    /// Current markup of one overview card.
    pub fn metric_html(&self, id: MetricId) -> String {
        self.region(Region::Metric(id))
    }

    pub fn notice_html(&self) -> String {
        self.region(Region::Notice)
    }

    pub fn is_loading(&self) -> bool {
        self.regions.contains_key(&Region::Loading)
    }

    /// Full document with every region and the chart setup scripts.
    pub fn render_page(&self, surface: &HtmlChartSurface) -> String {
        let mut page = String::new();
        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        page.push_str("<meta charset=\"utf-8\">\n<title>Wallet Dashboard</title>\n");
        page.push_str(&format!("<script src=\"{}\"></script>\n", CHART_JS_CDN));
        page.push_str("</head>\n<body>\n<header>\n");
        page.push_str(&format!(
            "<div id=\"walletAddress\">{}</div>\n",
            self.region(Region::Address)
        ));
        page.push_str(&self.region(Region::WalletStatus));
        page.push_str(&self.region(Region::Loading));
        page.push_str(&self.region(Region::Notice));
        page.push_str("</header>\n<main>\n<section id=\"overview\">\n");
        for id in MetricId::ALL {
            page.push_str(&self.region(Region::Metric(id)));
        }
        page.push_str("</section>\n");

        for target in [
            PORTFOLIO_TARGET,
            FEES_TARGET,
            FEES_BY_NETWORK_TARGET,
            FEES_BY_TYPE_TARGET,
        ] {
            page.push_str(&format!(
                "<div class=\"chart-container\"><canvas id=\"{}\"></canvas></div>\n",
                target
            ));
        }

        page.push_str(&format!(
            "<div id=\"walletBalances\">{}</div>\n",
            self.region(Region::Balances)
        ));
        page.push_str(&format!(
            "<div id=\"defiPositions\">{}</div>\n",
            self.region(Region::Positions)
        ));
        page.push_str(&format!(
            "<div id=\"transactionsList\">{}</div>\n",
            self.region(Region::Transactions)
        ));
        page.push_str("</main>\n<script>\n");
        page.push_str(NOTICE_DISMISS);
        page.push_str(TOOLTIP_HELPER);
        page.push_str(&surface.render_scripts());
        page.push_str("\n</script>\n</body>\n</html>\n");
        page
    }
}

/// Removes each banner after its `data-dismiss-ms`.
const NOTICE_DISMISS: &str = r#"document.querySelectorAll('[data-dismiss-ms]').forEach((notice) => {
  setTimeout(() => notice.remove(), Number(notice.dataset.dismissMs));
});
"#;

/// Wires precomputed tooltip text and currency ticks into a Chart.js config.
const TOOLTIP_HELPER: &str = r#"function applyTooltips(config) {
  const text = config.options.tooltipText || [];
  delete config.options.tooltipText;
  config.options.plugins.tooltip = { callbacks: { label: (ctx) => text[ctx.dataIndex] } };
  const y = config.options.scales && config.options.scales.y;
  if (y && y.currency) {
    delete y.currency;
    y.ticks = { callback: (value) => '$' + value };
  }
  return config;
}
"#;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn empty_state(message: &str) -> String {
    format!("<div class=\"empty-state\">{}</div>", escape(message))
}

fn icon(url: &Option<String>, alt: &str) -> String {
    match url {
        Some(url) if !url.is_empty() => {
            format!("<img src=\"{}\" alt=\"{}\">", escape(url), escape(alt))
        }
        _ => String::new(),
    }
}

fn metric_html(card: &MetricCard) -> String {
    format!(
        "<div class=\"card\" id=\"{id}\"><div class=\"card-title\">{title}</div>\
         <div class=\"card-value\">{value}</div>\
         <div class=\"{class}\">{change}</div></div>\n",
        id = card.id.element_id(),
        title = escape(card.id.title()),
        value = escape(&card.value),
        class = card.change.css_class(),
        change = escape(&card.change.text),
    )
}

fn token_html(row: &TokenRow) -> String {
    format!(
        "<tr class=\"token-row\"><td>{icon}<span class=\"token-symbol\">{symbol}</span>\
         <span class=\"token-name\">{name}</span></td><td>{network}</td>\
         <td>{amount}</td><td>{price}</td><td class=\"{class}\">{change}</td>\
         <td>{value}</td><td><div class=\"allocation-bar\" style=\"width: {share:.1}%\"></div>\
         {share_text}</td></tr>\n",
        icon = icon(&row.icon, &row.symbol),
        symbol = escape(&row.symbol),
        name = escape(&row.name),
        network = escape(&row.network),
        amount = escape(&row.amount),
        price = escape(&row.price),
        class = row.price_change.trend.css_class(),
        change = escape(&row.price_change.text),
        value = escape(&row.value),
        share = row.share,
        share_text = escape(&row.share_text),
    )
}

fn position_html(card: &PositionCard) -> String {
    let assets: String = card
        .assets
        .iter()
        .map(|a| {
            format!(
                "<span class=\"position-asset\">{}{}</span>",
                icon(&a.icon, &a.symbol),
                escape(&a.text)
            )
        })
        .collect();
    let apy = card
        .apy
        .as_deref()
        .map(|apy| format!("<div class=\"position-apy\">APY {}</div>", escape(apy)))
        .unwrap_or_default();
    format!(
        "<div class=\"position-card\"><div class=\"position-header\">{icon}\
         <span class=\"position-title\">{title}</span>\
         <span class=\"position-network\">{network}</span>\
         <span class=\"position-type\">{kind}</span></div>\
         <div class=\"position-assets\">{assets}</div>\
         <div class=\"position-value\">{value}</div>\
         <div class=\"{class}\">{change}</div>{apy}</div>\n",
        icon = icon(&card.protocol_icon, &card.protocol),
        title = escape(&card.title),
        network = escape(&card.network),
        kind = escape(&card.position_type),
        assets = assets,
        value = escape(&card.value),
        class = card.value_change.css_class(),
        change = escape(&card.value_change.text),
        apy = apy,
    )
}

fn transaction_html(row: &TransactionRow) -> String {
    let amount_class = row.direction.map(|d| d.css_class()).unwrap_or("");
    let link = row
        .explorer_url
        .as_deref()
        .map(|url| {
            format!(
                "<a class=\"tx-link\" href=\"{}\" target=\"_blank\">View</a>",
                escape(url)
            )
        })
        .unwrap_or_default();
    format!(
        "<div class=\"transaction-item\"><div class=\"tx-icon {type_class}\">\
         <i class=\"fas {icon}\"></i></div><div class=\"tx-details\">\
         <div class=\"tx-title\">{title}</div><div class=\"tx-date\">{date}</div>\
         <div class=\"tx-network\">{network}</div></div>\
         <div class=\"tx-amount {amount_class}\">{amount}</div>\
         <div class=\"tx-value\">{value}</div>\
         <div class=\"tx-status {status_class}\">{status}</div>{link}</div>\n",
        type_class = row.type_class,
        icon = row.icon,
        title = escape(&row.title),
        date = escape(&row.date),
        network = escape(&row.network),
        amount_class = amount_class,
        amount = escape(&row.amount),
        value = escape(&row.value),
        status_class = escape(&row.status_class),
        status = escape(&row.status),
        link = link,
    )
}

fn section_html<T>(section: &Section<T>, row: impl Fn(&T) -> String) -> String {
    match section {
        Section::Rows(rows) => rows.iter().map(row).collect(),
        Section::Empty(message) => empty_state(message),
    }
}

impl DashboardView for HtmlView {
    fn show_address(&mut self, address: &WalletAddress) {
        self.set(
            Region::Address,
            format!(
                "<span title=\"{}\">{}</span>",
                escape(address.as_str()),
                escape(&address.short())
            ),
        );
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            self.set(
                Region::Loading,
                "<div class=\"loading-overlay\">Loading...</div>\n".to_string(),
            );
        } else {
            self.regions.remove(&Region::Loading);
        }
    }

    fn show_notice(&mut self, notice: &Notice) {
        let class = match notice.level {
            NoticeLevel::Error => "error-message",
            NoticeLevel::Success => "success-message",
        };
        self.set(
            Region::Notice,
            format!(
                "<div class=\"{}\" data-dismiss-ms=\"{}\">{}</div>\n",
                class,
                notice.dismiss_after.as_millis(),
                escape(&notice.message)
            ),
        );
    }

    fn clear_notice(&mut self) {
        self.regions.remove(&Region::Notice);
    }

    fn set_wallet_connected(&mut self, connected: bool) {
        let html = if connected {
            "<button id=\"connectWallet\" class=\"connected\">Wallet Connected</button>\n"
        } else {
            "<button id=\"connectWallet\">Connect Wallet</button>\n"
        };
        self.set(Region::WalletStatus, html.to_string());
    }

    fn render_overview(&mut self, cards: &Section<MetricCard>) {
        for id in MetricId::ALL {
            self.regions.remove(&Region::Metric(id));
        }
        match cards {
            Section::Rows(cards) => {
                for card in cards {
                    self.render_metric(card);
                }
            }
            Section::Empty(message) => {
                self.set(Region::Metric(MetricId::TotalBalance), empty_state(message));
            }
        }
    }

    fn render_metric(&mut self, card: &MetricCard) {
        self.set(Region::Metric(card.id), metric_html(card));
    }

    fn render_balances(&mut self, rows: &Section<TokenRow>) {
        let html = match rows {
            Section::Rows(_) => format!("<table>{}</table>", section_html(rows, token_html)),
            Section::Empty(_) => section_html(rows, token_html),
        };
        self.set(Region::Balances, html);
    }

    fn render_positions(&mut self, cards: &Section<PositionCard>) {
        self.set(Region::Positions, section_html(cards, position_html));
    }

    fn render_transactions(&mut self, rows: &Section<TransactionRow>) {
        self.set(Region::Transactions, section_html(rows, transaction_html));
    }
}
