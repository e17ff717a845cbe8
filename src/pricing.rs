// 料金判定: カラー被覆率 -> 区分・単価・理由

use serde::Serialize;

/// カラー判定の境界となる被覆率（%）。
///
/// 青いハイパーリンクは 0.05%〜0.2% 程度、小さなロゴは 1%〜5% 程度になる。
pub const DEFAULT_COVERAGE_THRESHOLD_PERCENT: f64 = 0.5;

/// 白黒ページの単価（最小通貨単位）。
pub const DEFAULT_PRICE_BW: u64 = 500;

/// カラーページの単価（最小通貨単位）。
pub const DEFAULT_PRICE_COLOR: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingConfig {
    pub coverage_threshold_percent: f64,
    pub price_bw: u64,
    pub price_color: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            coverage_threshold_percent: DEFAULT_COVERAGE_THRESHOLD_PERCENT,
            price_bw: DEFAULT_PRICE_BW,
            price_color: DEFAULT_PRICE_COLOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    #[serde(rename = "BW")]
    Bw,
    #[serde(rename = "Color")]
    Color,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Bw => "BW",
            Category::Color => "Color",
        }
    }
}

/// 1ページ分の判定結果。
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub page_number: u32,
    pub category: Category,
    pub unit_price: u64,
    pub reason: String,
}

/// 被覆率からページの区分・単価・理由を決める。
///
/// - 閾値を超える: カラー
/// - 0 より大きく閾値以下: 白黒（リンクや汚れ程度の色は無視）
/// - 0: 純粋な白黒
pub fn classify(page_number: u32, coverage_percent: f64, config: &PricingConfig) -> Classification {
    let (category, reason) = if coverage_percent > config.coverage_threshold_percent {
        (
            Category::Color,
            format!("Color detected ({coverage_percent:?}%)"),
        )
    } else if coverage_percent > 0.0 {
        (
            Category::Bw,
            format!("Color ignored ({coverage_percent:?}% - Link/Noda)"),
        )
    } else {
        (Category::Bw, "Pure black-and-white".to_string())
    };

    let unit_price = match category {
        Category::Bw => config.price_bw,
        Category::Color => config.price_color,
    };

    Classification {
        page_number,
        category,
        unit_price,
        reason,
    }
}

/// 全ページの単価を合計する。
pub fn total_cost<'a>(classifications: impl IntoIterator<Item = &'a Classification>) -> u64 {
    classifications.into_iter().map(|c| c.unit_price).sum()
}
