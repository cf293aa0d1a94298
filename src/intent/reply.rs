use num_format::{Locale, ToFormattedString};

use crate::models::{GlobalData, MarketCoin, TimeRange};

pub const DISCLAIMER: &str = "\n\n⚠️ Crypto investing is risky—always do your own research!";

pub const HELP_TEXT: &str = "🤖 I can help you explore the crypto market! Try asking:\n\
• \"What's trending?\" for the top coins by market cap (add \"top 10\" for more)\n\
• \"Show me bitcoin historical price for 7 days\"\n\
• \"Global market cap\" for overall market stats\n\
• \"Ethereum OHLC for 30 days\" for candlestick data\n\
• \"Compare bitcoin and ethereum\"";

pub const COMPARE_HINT: &str =
    "🤔 Please mention two coins to compare, for example \"compare bitcoin and ethereum\".";

pub fn with_disclaimer(text: &str) -> String {
    format!("{}{}", text, DISCLAIMER)
}

pub fn usd(value: f64) -> String {
    if value.abs() < 1.0 {
        return format!("${:.4}", value);
    }

    let mut whole = value.trunc() as i64;
    let mut cents = (value.fract().abs() * 100.0).round() as i64;
    if cents == 100 {
        whole += value.signum() as i64;
        cents = 0;
    }
    format!("${}.{:02}", whole.to_formatted_string(&Locale::en), cents)
}

// $2.41T / $98.20B / $512.00M
pub fn usd_compact(value: f64) -> String {
    const UNITS: [(f64, &str); 3] = [(1e12, "T"), (1e9, "B"), (1e6, "M")];
    for (scale, unit) in UNITS {
        if value.abs() >= scale {
            return format!("${:.2}{}", value / scale, unit);
        }
    }
    usd(value)
}

pub fn percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

pub fn trending(coins: &[MarketCoin]) -> String {
    if coins.is_empty() {
        return "📈 No market listing is available right now.".to_string();
    }

    let mut lines = vec![format!(
        "📈 Top {} cryptocurrencies by market cap:",
        coins.len()
    )];
    for (i, coin) in coins.iter().enumerate() {
        let price = coin.current_price.map(usd).unwrap_or_else(|| "n/a".to_string());
        let change = coin
            .price_change_percentage_24h
            .map(percent)
            .unwrap_or_else(|| "n/a".to_string());
        lines.push(format!(
            "{}. {} ({}): {} ({} 24h)",
            i + 1,
            coin.name,
            coin.symbol.to_uppercase(),
            price,
            change
        ));
    }
    lines.join("\n")
}

pub fn historical(name: &str, range: TimeRange, first: f64, last: f64) -> String {
    let change = if first != 0.0 {
        (last - first) / first * 100.0
    } else {
        0.0
    };
    let arrow = if change >= 0.0 { "📈" } else { "📉" };
    format!(
        "📊 {} over the last {}:\n• Current price: {}\n• Change: {} {}",
        name,
        range.label(),
        usd(last),
        percent(change),
        arrow
    )
}

pub fn global(data: &GlobalData) -> String {
    let cap = data.total_market_cap.get("usd").copied().unwrap_or_default();
    let volume = data.total_volume.get("usd").copied().unwrap_or_default();
    let dominance = data.market_cap_percentage.get("btc").copied().unwrap_or_default();
    format!(
        "🌍 Global crypto market:\n• Total Market Cap: {}\n• 24h Volume: {}\n• BTC Dominance: {:.2}%",
        usd_compact(cap),
        usd_compact(volume),
        dominance
    )
}

pub fn ohlc(name: &str, range: TimeRange, candles: usize) -> String {
    format!(
        "🕯️ Loaded {} OHLC candles for {} over the last {}. Check the candlestick chart on the dashboard!",
        candles,
        name,
        range.label()
    )
}

pub fn compare(first: (&str, f64), second: (&str, f64)) -> String {
    format!(
        "⚖️ Price comparison:\n• {}: {}\n• {}: {}",
        first.0,
        usd(first.1),
        second.0,
        usd(second.1)
    )
}
