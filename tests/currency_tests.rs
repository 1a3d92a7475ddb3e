use chrono::NaiveDate;
use trip_config::Config;
use trip_core::CurrencyFormatter;
use trip_ledger::currency::{
    format_currency_value, format_date, symbol_for, CurrencyCode, CurrencyDisplay, FormatOptions,
    LocaleConfig, LocaleFormatter, NegativeStyle,
};

#[test]
fn rupees_use_indian_digit_grouping() {
    let formatter = LocaleFormatter::from_config(&Config::default());
    assert_eq!(formatter.format_amount(1_234_567.5), "₹12,34,567.50");
    assert_eq!(formatter.format_amount(100.0 / 3.0), "₹33.33");
    assert_eq!(formatter.format_amount(-50.0), "-₹50.00");
    assert_eq!(formatter.format_amount(-0.001), "₹0.00");
}

#[test]
fn formats_currency_with_locale() {
    let locale = LocaleConfig::for_tag("fr-FR");
    let options = FormatOptions {
        currency_display: CurrencyDisplay::Symbol,
        negative_style: NegativeStyle::Parentheses,
    };
    let code = CurrencyCode::new("eur");
    assert_eq!(
        format_currency_value(-1234.5, &code, &locale, &options),
        "(€1 234,50)"
    );
}

#[test]
fn currency_code_display_and_minor_units() {
    let locale = LocaleConfig::default();
    let options = FormatOptions {
        currency_display: CurrencyDisplay::Code,
        negative_style: NegativeStyle::Sign,
    };
    assert_eq!(
        format_currency_value(1500.4, &CurrencyCode::new("JPY"), &locale, &options),
        "JPY 1,500"
    );
    assert_eq!(symbol_for("INR"), "₹");
    assert_eq!(symbol_for("XYZ"), "XYZ");
}

#[test]
fn dates_follow_locale_style() {
    let date = NaiveDate::from_ymd_opt(2024, 12, 5).expect("date");
    assert_eq!(format_date(&LocaleConfig::for_tag("en-IN"), date), "05 Dec 2024");
    assert_eq!(format_date(&LocaleConfig::for_tag("en-GB"), date), "2024-12-05");
}

#[test]
fn formatter_options_override_defaults() {
    let formatter = LocaleFormatter::new(CurrencyCode::new("INR"), LocaleConfig::for_tag("en-IN"))
        .with_options(FormatOptions {
            currency_display: CurrencyDisplay::Code,
            negative_style: NegativeStyle::Parentheses,
        });
    assert_eq!(formatter.format_amount(-1_500.0), "(INR 1,500.00)");
    assert_eq!(formatter.format_amount(250_000.0), "INR 2,50,000.00");
}
