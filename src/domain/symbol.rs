//! Trading symbol extraction from dropped file names.

/// Default quote asset for balance and symbol checks.
pub const DEFAULT_QUOTE_ASSET: &str = "USDT";

/// Extract the trading symbol a file name refers to.
///
/// The symbol is the shortest leading run of ASCII uppercase letters and
/// digits that ends with `quote_asset` and has at least one character before
/// it, e.g. `BTCUSDTfoo.csv` gives `BTCUSDT` and `1000PEPEUSDT_1h.csv` gives
/// `1000PEPEUSDT`. Returns `None` when no such prefix exists.
#[must_use]
pub fn extract_symbol<'a>(file_name: &'a str, quote_asset: &str) -> Option<&'a str> {
    if quote_asset.is_empty() {
        return None;
    }

    let run_len = file_name
        .bytes()
        .take_while(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        .count();
    let run = &file_name[..run_len];

    if run.len() <= quote_asset.len() {
        return None;
    }

    // Search from 1 so the base asset is never empty.
    let pos = 1 + run[1..].find(quote_asset)?;
    Some(&run[..pos + quote_asset.len()])
}
