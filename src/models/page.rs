use rust_decimal::Decimal;
use serde::Serialize;

/// Paging information a feed reports about itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Authoritative record count across all pages.
    pub total: Option<u64>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub pages: Option<u64>,
    pub total_bet_amount: Option<Decimal>,
    pub total_win_amount: Option<Decimal>
}

impl PageMeta {
    pub fn with_total(total: u64) -> Self {
        Self {
            total: Some(total),
            ..Self::default()
        }
    }

    /// Page count as reported, or derived from the total when the feed omits it.
    pub fn page_count(&self, page_size: u32) -> Option<u64> {
        self.pages.or_else(|| {
            self.total.map(|total| total.div_ceil(u64::from(page_size.max(1))))
        })
    }
}
