use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use trip_config::Config;
use trip_core::CurrencyFormatter;

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("INR")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DigitGrouping {
    /// 1,234,567
    Thousands,
    /// 12,34,567
    Indian,
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub grouping: DigitGrouping,
    pub date_format: DateFormatStyle,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            grouping: DigitGrouping::Thousands,
            date_format: DateFormatStyle::Medium,
        }
    }
}

impl LocaleConfig {
    /// Separators for a BCP 47 tag; unknown tags fall back to `en-US` rules.
    pub fn for_tag(tag: &str) -> Self {
        let base = Self {
            language_tag: tag.to_string(),
            ..Self::default()
        };
        match tag.to_ascii_lowercase().as_str() {
            "en-in" | "hi-in" => Self {
                grouping: DigitGrouping::Indian,
                ..base
            },
            "de-de" | "es-es" | "it-it" | "pt-br" => Self {
                decimal_separator: ',',
                grouping_separator: '.',
                ..base
            },
            "fr-fr" => Self {
                decimal_separator: ',',
                grouping_separator: ' ',
                ..base
            },
            "en-gb" => Self {
                date_format: DateFormatStyle::Short,
                ..base
            },
            _ => base,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency_display: CurrencyDisplay::Symbol,
            negative_style: NegativeStyle::Sign,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CurrencyDisplay {
    Symbol,
    Code,
    SymbolAndCode,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateFormatStyle {
    Short,
    Medium,
}

static SYMBOLS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("INR", "₹"),
        ("USD", "$"),
        ("EUR", "€"),
        ("GBP", "£"),
        ("JPY", "¥"),
        ("AUD", "A$"),
        ("SGD", "S$"),
        ("THB", "฿"),
        ("AED", "AED"),
    ])
});

pub fn symbol_for(code: &str) -> String {
    SYMBOLS
        .get(code)
        .map(|symbol| symbol.to_string())
        .unwrap_or_else(|| code.to_string())
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" => 0,
        "KWD" | "BHD" | "OMR" => 3,
        _ => 2,
    }
}

/// Renders a non-negative magnitude with locale separators.
pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let grouped = group_digits(int_part, locale.grouping_separator, locale.grouping);
    match frac_part {
        Some(frac) => format!("{grouped}{}{frac}", locale.decimal_separator),
        None => grouped,
    }
}

fn group_digits(digits: &str, separator: char, grouping: DigitGrouping) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut grouped = Vec::with_capacity(chars.len() + chars.len() / 2);
    for (count, ch) in chars.iter().rev().enumerate() {
        let boundary = match grouping {
            DigitGrouping::Thousands => count != 0 && count % 3 == 0,
            DigitGrouping::Indian => count == 3 || (count > 3 && (count - 3) % 2 == 0),
        };
        if boundary {
            grouped.push(separator);
        }
        grouped.push(*ch);
    }
    grouped.iter().rev().collect()
}

pub fn format_currency_value(
    amount: f64,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let precision = minor_units_for(code.as_str());
    let scale = 10f64.powi(i32::from(precision));
    let rounded = (amount * scale).round() / scale;
    let body = format_number(locale, rounded, precision);
    let symbol = symbol_for(code.as_str());
    let formatted = match options.currency_display {
        CurrencyDisplay::Symbol => format!("{symbol}{body}"),
        CurrencyDisplay::Code => format!("{} {body}", code.as_str()),
        CurrencyDisplay::SymbolAndCode => format!("{symbol}{body} ({})", code.as_str()),
    };
    if rounded < 0.0 {
        match options.negative_style {
            NegativeStyle::Sign => format!("-{formatted}"),
            NegativeStyle::Parentheses => format!("({formatted})"),
        }
    } else {
        formatted
    }
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    match locale.date_format {
        DateFormatStyle::Short => date.format("%Y-%m-%d").to_string(),
        DateFormatStyle::Medium => format!(
            "{:02} {} {}",
            date.day(),
            month_label(date.month()),
            date.year()
        ),
    }
}

fn month_label(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    month
        .checked_sub(1)
        .and_then(|idx| MONTHS.get(idx as usize))
        .copied()
        .unwrap_or("")
}

/// [`CurrencyFormatter`] driven by the user's currency and locale settings.
#[derive(Debug, Clone, Default)]
pub struct LocaleFormatter {
    pub code: CurrencyCode,
    pub locale: LocaleConfig,
    pub options: FormatOptions,
}

impl LocaleFormatter {
    pub fn new(code: CurrencyCode, locale: LocaleConfig) -> Self {
        Self {
            code,
            locale,
            options: FormatOptions::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CurrencyCode::new(config.currency.as_str()),
            LocaleConfig::for_tag(&config.locale),
        )
    }

    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        format_date(&self.locale, date)
    }
}

impl CurrencyFormatter for LocaleFormatter {
    fn format_amount(&self, amount: f64) -> String {
        format_currency_value(amount, &self.code, &self.locale, &self.options)
    }
}
