/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64) -> String;
}

/// Minimal formatter: a fixed symbol followed by two decimals.
#[derive(Debug, Clone)]
pub struct SymbolFormatter {
    pub symbol: String,
}

impl SymbolFormatter {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl Default for SymbolFormatter {
    fn default() -> Self {
        Self::new("₹")
    }
}

impl CurrencyFormatter for SymbolFormatter {
    fn format_amount(&self, amount: f64) -> String {
        let rounded = round_to_cents(amount);
        if rounded < 0.0 {
            format!("-{}{:.2}", self.symbol, rounded.abs())
        } else {
            format!("{}{:.2}", self.symbol, rounded)
        }
    }
}

/// Rounds to two decimals for display. Never yields negative zero.
pub fn round_to_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
