//! # Receipt Projection
//!
//! Read-only view of a [`Session`] for the receipt screen and the image
//! exporter. Nothing here mutates or persists.
//!
//! ```text
//! ┌────────────────────────────────┐
//! │        Purchase Receipt        │
//! │        2024-03-01 10:00        │
//! │ Item            Qty      Total │
//! │ MTN 100        1 1/2      ₦147 │
//! │ GLO 500          2        ₦950 │
//! │ ────────────────────────────── │
//! │ Overall Total           ₦1,097 │
//! └────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::format::format_currency;
use crate::session::{Session, SessionId};
use crate::types::{Denomination, Network, Price};
use crate::RECEIPT_TITLE;

/// One receipt row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptLine {
    /// "MTN 100"
    pub label: String,
    pub network: Network,
    pub denomination: Denomination,
    pub quantity: String,
    pub unit_price: Price,
    pub total: f64,
}

/// Receipt for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Receipt {
    pub session_id: SessionId,
    pub title: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub lines: Vec<ReceiptLine>,
    pub overall_total: f64,
}

impl From<&Session> for Receipt {
    fn from(session: &Session) -> Self {
        Receipt {
            session_id: session.id(),
            title: RECEIPT_TITLE.to_string(),
            date: session.date(),
            lines: session
                .items()
                .iter()
                .map(|item| ReceiptLine {
                    label: item.label(),
                    network: item.network,
                    denomination: item.denomination,
                    quantity: item.quantity.clone(),
                    unit_price: item.price,
                    total: item.total,
                })
                .collect(),
            overall_total: session.overall_total(),
        }
    }
}

impl Receipt {
    /// Formatted overall total, e.g. `"₦1,097"`.
    pub fn display_total(&self, symbol: &str) -> String {
        format_currency(symbol, self.overall_total)
    }

    /// Date line as shown under the title.
    pub fn display_date(&self) -> String {
        self.date.format("%Y-%m-%d %H:%M").to_string()
    }

    /// Renders a monospace text receipt `width` characters wide.
    ///
    /// Columns split 3:1:2 (item, quantity, total), the same proportions
    /// as the on-screen table. A row whose quantity or total does not fit
    /// its column prints the label alone and continues on the next line, so
    /// amounts are never cut:
    ///
    /// ```text
    /// MTN 1000
    ///   x 125000 1/2      ₦122,500,490
    /// ```
    pub fn render_text(&self, symbol: &str, width: usize) -> String {
        let width = width.max(12);
        let qty_width = width / 6;
        let item_width = width / 2;
        let total_width = width - item_width - qty_width;

        let mut out = String::new();
        out.push_str(&center(&self.title, width));
        out.push('\n');
        out.push_str(&center(&self.display_date(), width));
        out.push('\n');
        out.push_str(&row("Item", "Qty", "Total", item_width, qty_width, total_width));

        for line in &self.lines {
            let total = format_currency(symbol, line.total);
            let fits = line.quantity.chars().count() <= qty_width
                && total.chars().count() <= total_width;

            if fits {
                out.push_str(&row(
                    &line.label,
                    &line.quantity,
                    &total,
                    item_width,
                    qty_width,
                    total_width,
                ));
            } else {
                out.push_str(&fit_left(&line.label, width));
                out.push('\n');
                out.push_str(&continuation(&line.quantity, &total, width));
            }
        }

        out.push_str(&"-".repeat(width));
        out.push('\n');
        let total = self.display_total(symbol);
        let label_width = width.saturating_sub(total.chars().count());
        out.push_str(&format!("{:<label_width$}{}", "Overall Total", total));
        out.push('\n');
        out
    }
}

fn row(
    item: &str,
    qty: &str,
    total: &str,
    item_width: usize,
    qty_width: usize,
    total_width: usize,
) -> String {
    format!(
        "{}{}{}\n",
        fit_left(item, item_width),
        center(qty, qty_width),
        fit_right(total, total_width)
    )
}

/// Quantity and total of a wrapped row, on one line when both fit and on
/// two otherwise. Neither value is shortened.
fn continuation(qty: &str, total: &str, width: usize) -> String {
    let qty = format!("  x {}", qty);
    let qty_len = qty.chars().count();
    let total_len = total.chars().count();

    if qty_len + 1 + total_len <= width {
        let pad = width - total_len;
        format!("{:<pad$}{}\n", qty, total)
    } else {
        format!("{:<width$}\n{:>width$}\n", qty, total)
    }
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn fit_left(text: &str, width: usize) -> String {
    format!("{:<width$}", truncate(text, width))
}

fn fit_right(text: &str, width: usize) -> String {
    format!("{:>width$}", truncate(text, width))
}

fn center(text: &str, width: usize) -> String {
    format!("{:^width$}", truncate(text, width))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionItem;
    use chrono::TimeZone;

    fn sample_session() -> Session {
        Session::new(
            42,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            vec![
                SessionItem::new(Network::Mtn, Denomination::new(100), "1 1/2", 98),
                SessionItem::new(Network::Glo, Denomination::new(500), "2", 475),
            ],
        )
    }

    #[test]
    fn test_projection_is_verbatim() {
        let session = sample_session();
        let receipt = Receipt::from(&session);

        assert_eq!(receipt.session_id, 42);
        assert_eq!(receipt.title, "Purchase Receipt");
        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.lines[0].label, "MTN 100");
        assert_eq!(receipt.lines[0].quantity, "1 1/2");
        assert_eq!(receipt.lines[0].total, 147.0);
        assert_eq!(receipt.lines[1].unit_price, 475);
        assert_eq!(receipt.overall_total, session.overall_total());
    }

    #[test]
    fn test_display_helpers() {
        let receipt = Receipt::from(&sample_session());
        assert_eq!(receipt.display_total("₦"), "₦1,097");
        assert_eq!(receipt.display_date(), "2024-03-01 10:00");
    }

    #[test]
    fn test_render_text() {
        let receipt = Receipt::from(&sample_session());
        let text = receipt.render_text("₦", 32);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].trim(), "Purchase Receipt");
        assert!(lines[3].starts_with("MTN 100"));
        assert!(lines[3].ends_with("₦147"));
        assert!(lines.last().unwrap().starts_with("Overall Total"));
        assert!(lines.last().unwrap().ends_with("₦1,097"));
        for line in lines {
            assert_eq!(line.chars().count(), 32);
        }
    }

    #[test]
    fn test_render_text_wraps_wide_rows() {
        let session = Session::new(
            9,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            vec![
                SessionItem::new(Network::Mtn, Denomination::new(1000), "125000 1/2", 980),
                SessionItem::new(Network::Glo, Denomination::new(500), "2", 475),
            ],
        );
        let text = Receipt::from(&session).render_text("₦", 32);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[3].trim_end(), "MTN 1000");
        assert!(lines[4].starts_with("  x 125000 1/2"));
        assert!(lines[4].ends_with("₦122,500,490"));
        assert!(lines[5].starts_with("GLO 500"));
        assert!(lines[5].ends_with("₦950"));
        assert!(lines.last().unwrap().ends_with("₦122,501,440"));
        for line in lines {
            assert_eq!(line.chars().count(), 32);
        }
    }

    #[test]
    fn test_render_text_narrow_width_keeps_full_amounts() {
        let session = Session::new(
            3,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            vec![SessionItem::new(Network::Airtel, Denomination::new(1000), "1234567", 970)],
        );
        let text = Receipt::from(&session).render_text("₦", 12);

        assert!(text.contains("  x 1234567"));
        assert!(text.contains("₦1,197,529,990"));
    }
}
