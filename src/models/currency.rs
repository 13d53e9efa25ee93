//! Currency catalogue
//!
//! Names and symbols for the currencies wallets are commonly held in. Amounts
//! in different currencies are never converted into one another.

/// A known currency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

const fn currency(code: &'static str, name: &'static str, symbol: &'static str) -> Currency {
    Currency { code, name, symbol }
}

/// Supported currencies, by code
pub const CURRENCIES: &[Currency] = &[
    currency("AED", "United Arab Emirates Dirham", "د.إ"),
    currency("AUD", "Australian Dollar", "A$"),
    currency("BRL", "Brazilian Real", "R$"),
    currency("CAD", "Canadian Dollar", "CA$"),
    currency("CHF", "Swiss Franc", "CHF"),
    currency("CNY", "Chinese Yuan", "¥"),
    currency("EGP", "Egyptian Pound", "E£"),
    currency("EUR", "Euro", "€"),
    currency("GBP", "British Pound Sterling", "£"),
    currency("GHS", "Ghanaian Cedi", "GH₵"),
    currency("INR", "Indian Rupee", "₹"),
    currency("JPY", "Japanese Yen", "¥"),
    currency("KES", "Kenyan Shilling", "KSh"),
    currency("KRW", "South Korean Won", "₩"),
    currency("MAD", "Moroccan Dirham", "MAD"),
    currency("MXN", "Mexican Peso", "MX$"),
    currency("NGN", "Nigerian Naira", "₦"),
    currency("RUB", "Russian Ruble", "₽"),
    currency("SAR", "Saudi Riyal", "﷼"),
    currency("TRY", "Turkish Lira", "₺"),
    currency("USD", "United States Dollar", "$"),
    currency("XAF", "CFA Franc BEAC", "FCFA"),
    currency("XOF", "CFA Franc BCEAO", "CFA"),
    currency("ZAR", "South African Rand", "R"),
];

/// Look up a currency by code (case-insensitive)
pub fn lookup(code: &str) -> Option<&'static Currency> {
    CURRENCIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
}

/// Symbol to print in front of amounts; unknown codes print as themselves
pub fn symbol_for(code: &str) -> String {
    match lookup(code) {
        Some(c) => c.symbol.to_string(),
        None => format!("{} ", code),
    }
}
