use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{BoardConfig, BrandKey, Grouping, Item, Resolution};

/// Display text for a missing or unlisted price.
pub const MISSING: &str = "-";

/// Badge class of a listing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockClass {
    /// The row's stock text equals the configured in-stock label.
    InStock,
    /// Anything else, including an empty stock text.
    OutOfStock,
}

impl StockClass {
    /// CSS-style class name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in-stock",
            Self::OutOfStock => "out-stock",
        }
    }
}

/// One formatted table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRecord {
    /// Model name.
    pub model: String,
    /// Memory/storage variant.
    pub ram_storage: String,
    /// Color variant.
    pub color: String,
    /// Grouped shelf price or `-`.
    pub price: String,
    /// Grouped online price or `-`.
    pub online_price: String,
    /// Stock text as published.
    pub stock: String,
    /// Badge class derived from `stock`.
    pub stock_class: StockClass,
}

/// Status line shown next to the date picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    /// Effective date.
    pub date: String,
    /// Effective time label, or `No Data`.
    pub time: String,
    /// Whether a snapshot is displayed.
    pub available: bool,
}

impl StatusLine {
    /// Status for a resolution.
    #[must_use]
    pub fn from_resolution(resolution: &Resolution) -> Self {
        Self {
            date: resolution.effective_date.clone(),
            time: resolution.effective_time.to_string(),
            available: resolution.is_found(),
        }
    }

    /// `date-available` or `date-not-found`.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        if self.available {
            "date-available"
        } else {
            "date-not-found"
        }
    }
}

/// Output contract of the board. Implemented by whatever draws the view.
///
/// Calls for one render cycle arrive in order: `populate_times` (when the
/// time options changed), `show_status`, `set_not_found`, then one
/// `render_section` per configured brand.
pub trait PresentationSink: Send {
    /// Replace the time options for `date`. A leading "Latest" option is
    /// implied and not part of `times`.
    fn populate_times(&mut self, date: &str, times: &[String]);

    /// Show the effective date, time and availability.
    fn show_status(&mut self, status: &StatusLine);

    /// Render a brand section; empty `rows` hides the section.
    fn render_section(&mut self, brand: &BrandKey, rows: &[RowRecord]);

    /// Toggle the not-found indicator.
    fn set_not_found(&mut self, not_found: bool);
}

/// Turns document items into display rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFormatter {
    grouping: Grouping,
    in_stock_label: String,
}

impl Default for RowFormatter {
    fn default() -> Self {
        Self::new(Grouping::default(), "In Stock")
    }
}

impl RowFormatter {
    /// Formatter with explicit grouping and in-stock label.
    pub fn new(grouping: Grouping, in_stock_label: impl Into<String>) -> Self {
        Self {
            grouping,
            in_stock_label: in_stock_label.into(),
        }
    }

    /// Formatter matching a board configuration.
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.grouping, config.in_stock_label.clone())
    }

    /// Format one item.
    #[must_use]
    pub fn row(&self, item: &Item) -> RowRecord {
        let price = item
            .price
            .map_or_else(|| MISSING.to_string(), |p| format_price(p, self.grouping));
        let online_price = match item.online_price {
            Some(p) if !p.is_zero() => format_price(p, self.grouping),
            _ => MISSING.to_string(),
        };
        let stock_class = if item.stock == self.in_stock_label {
            StockClass::InStock
        } else {
            StockClass::OutOfStock
        };
        RowRecord {
            model: item.model.clone(),
            ram_storage: item.ram_storage.clone(),
            color: item.color.clone(),
            price,
            online_price,
            stock: item.stock.clone(),
            stock_class,
        }
    }

    /// Format a brand's items in order.
    #[must_use]
    pub fn rows(&self, items: &[Item]) -> Vec<RowRecord> {
        items.iter().map(|item| self.row(item)).collect()
    }
}

/// Format a price with locale digit grouping and at most three fraction
/// digits, half away from zero.
///
/// ```
/// use rust_decimal::Decimal;
/// use stockboard_core::render::format_price;
/// use stockboard_core::Grouping;
///
/// assert_eq!(format_price(Decimal::from(1_234_567), Grouping::Indian), "12,34,567");
/// assert_eq!(format_price(Decimal::from(1_234_567), Grouping::Western), "1,234,567");
/// ```
#[must_use]
pub fn format_price(value: Decimal, grouping: Grouping) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = rounded.abs().to_string();
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

    let mut out = String::with_capacity(plain.len() + plain.len() / 2 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, grouping));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let step = match grouping {
        Grouping::Indian => 2,
        _ => 3,
    };
    let mut groups: Vec<&str> = Vec::with_capacity(head.len() / step + 2);
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// Drive `sink` through the status and brand sections for `resolution`.
///
/// A not-found resolution hides every configured brand section. A found
/// payload without an entry for a brand hides only that section.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "stockboard::render",
        skip(sink, brands, formatter, resolution),
        fields(date = %resolution.effective_date, time = %resolution.effective_time),
    )
)]
pub fn render_resolution<S>(
    sink: &mut S,
    brands: &[BrandKey],
    formatter: &RowFormatter,
    resolution: &Resolution,
) where
    S: PresentationSink + ?Sized,
{
    sink.show_status(&StatusLine::from_resolution(resolution));
    match &resolution.payload {
        Some(payload) => {
            sink.set_not_found(false);
            for brand in brands {
                let rows = payload
                    .get(brand.as_str())
                    .map(|items| formatter.rows(items))
                    .unwrap_or_default();
                sink.render_section(brand, &rows);
            }
        }
        None => {
            sink.set_not_found(true);
            for brand in brands {
                sink.render_section(brand, &[]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn indian_grouping() {
        assert_eq!(format_price(dec("79999"), Grouping::Indian), "79,999");
        assert_eq!(format_price(dec("100000"), Grouping::Indian), "1,00,000");
        assert_eq!(format_price(dec("12345678"), Grouping::Indian), "1,23,45,678");
        assert_eq!(format_price(dec("999"), Grouping::Indian), "999");
        assert_eq!(format_price(dec("0"), Grouping::Indian), "0");
    }

    #[test]
    fn western_grouping() {
        assert_eq!(format_price(dec("100000"), Grouping::Western), "100,000");
        assert_eq!(format_price(dec("1234567.5"), Grouping::Western), "1,234,567.5");
    }

    #[test]
    fn fraction_digits_capped_at_three() {
        assert_eq!(format_price(dec("1999.50"), Grouping::Indian), "1,999.5");
        assert_eq!(format_price(dec("0.12345"), Grouping::Indian), "0.123");
        assert_eq!(format_price(dec("0.0005"), Grouping::Indian), "0.001");
        assert_eq!(format_price(dec("-123456.7891"), Grouping::Indian), "-1,23,456.789");
    }

    #[test]
    fn missing_and_zero_prices() {
        let f = RowFormatter::default();
        let row = f.row(&Item::new("m", "r", "c", None, Some(Decimal::ZERO), "Sold out"));
        assert_eq!(row.price, "-");
        assert_eq!(row.online_price, "-");
        assert_eq!(row.stock_class, StockClass::OutOfStock);

        let row = f.row(&Item::new("m", "r", "c", Some(Decimal::ZERO), None, "In Stock"));
        assert_eq!(row.price, "0");
        assert_eq!(row.online_price, "-");
        assert_eq!(row.stock_class.as_str(), "in-stock");
    }

    #[test]
    fn stock_label_is_exact() {
        let f = RowFormatter::default();
        let row = f.row(&Item::new("m", "r", "c", None, None, "in stock"));
        assert_eq!(row.stock_class, StockClass::OutOfStock);
    }
}
