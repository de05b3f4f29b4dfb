//! Statement metrics and their source labels.
//!
//! Source tables label the same metric differently (Korean portal tables,
//! English API exports). Each [`Metric`] owns an ordered list of exact label
//! aliases; the first alias present in a table wins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A headline metric of an annual financial-statement table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Revenue (sales).
    Revenue,
    /// Operating income.
    OperatingIncome,
    /// Net income.
    NetIncome,
    /// Operating margin, percent.
    OperatingMargin,
    /// Debt ratio (liabilities over equity), percent.
    DebtRatio,
    /// Return on equity, percent.
    Roe,
    /// Earnings per share.
    Eps,
    /// Book value per share.
    Bps,
    /// Price-to-earnings ratio.
    Per,
    /// Price-to-book ratio.
    Pbr,
}

impl Metric {
    /// Every headline metric, in display order.
    pub const HEADLINE: [Self; 10] = [
        Self::Revenue,
        Self::OperatingIncome,
        Self::NetIncome,
        Self::OperatingMargin,
        Self::DebtRatio,
        Self::Roe,
        Self::Eps,
        Self::Bps,
        Self::Per,
        Self::Pbr,
    ];

    /// Exact row labels for this metric, highest priority first.
    #[must_use]
    pub const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Revenue => &["매출액", "영업수익", "Revenue", "Total Revenue", "Sales"],
            Self::OperatingIncome => &["영업이익", "Operating Income"],
            Self::NetIncome => &[
                "당기순이익",
                "지배주주순이익",
                "Net Income",
                "Net Income Common Stockholders",
            ],
            Self::OperatingMargin => &["영업이익률", "Operating Margin"],
            Self::DebtRatio => &["부채비율", "Debt Ratio", "Debt to Equity"],
            Self::Roe => &["ROE(지배주주)", "ROE(%)", "ROE", "Return on Equity"],
            Self::Eps => &["EPS(원)", "EPS", "Diluted EPS", "Basic EPS"],
            Self::Bps => &["BPS(원)", "BPS", "Book Value Per Share"],
            Self::Per => &["PER(배)", "PER", "P/E", "PE Ratio"],
            Self::Pbr => &["PBR(배)", "PBR", "P/B", "PB Ratio"],
        }
    }

    /// Returns the alias priority of `label` for this metric, if it is one.
    #[must_use]
    pub fn alias_rank(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.aliases().iter().position(|alias| *alias == label)
    }

    /// Short display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::OperatingIncome => "Operating Income",
            Self::NetIncome => "Net Income",
            Self::OperatingMargin => "Operating Margin",
            Self::DebtRatio => "Debt Ratio",
            Self::Roe => "ROE",
            Self::Eps => "EPS",
            Self::Bps => "BPS",
            Self::Per => "PER",
            Self::Pbr => "PBR",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
