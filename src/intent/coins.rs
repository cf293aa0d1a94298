// Alias -> provider coin id. Scanned in order, first substring hit wins.
pub struct CoinAlias {
    pub alias: &'static str,
    pub id: &'static str,
    pub name: &'static str,
}

const fn alias(alias: &'static str, id: &'static str, name: &'static str) -> CoinAlias {
    CoinAlias { alias, id, name }
}

pub const COIN_ALIASES: &[CoinAlias] = &[
    alias("bitcoin", "bitcoin", "Bitcoin"),
    alias("btc", "bitcoin", "Bitcoin"),
    alias("ethereum", "ethereum", "Ethereum"),
    alias("eth", "ethereum", "Ethereum"),
    alias("tether", "tether", "Tether"),
    alias("usdt", "tether", "Tether"),
    alias("binance", "binancecoin", "BNB"),
    alias("bnb", "binancecoin", "BNB"),
    alias("solana", "solana", "Solana"),
    alias("ripple", "ripple", "XRP"),
    alias("xrp", "ripple", "XRP"),
    alias("cardano", "cardano", "Cardano"),
    alias("ada", "cardano", "Cardano"),
    alias("dogecoin", "dogecoin", "Dogecoin"),
    alias("doge", "dogecoin", "Dogecoin"),
    alias("polkadot", "polkadot", "Polkadot"),
    alias("litecoin", "litecoin", "Litecoin"),
    alias("ltc", "litecoin", "Litecoin"),
    alias("avalanche", "avalanche-2", "Avalanche"),
    alias("avax", "avalanche-2", "Avalanche"),
    alias("chainlink", "chainlink", "Chainlink"),
    alias("polygon", "matic-network", "Polygon"),
    alias("matic", "matic-network", "Polygon"),
    alias("shiba", "shiba-inu", "Shiba Inu"),
];

/// First coin whose alias appears anywhere in `text` (already lowercased).
pub fn find_coin(text: &str) -> Option<&'static CoinAlias> {
    COIN_ALIASES.iter().find(|c| text.contains(c.alias))
}

/// Every distinct coin id mentioned in `text`, in table order.
pub fn find_all_coins(text: &str) -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = Vec::new();
    for coin in COIN_ALIASES.iter().filter(|c| text.contains(c.alias)) {
        if !ids.contains(&coin.id) {
            ids.push(coin.id);
        }
    }
    ids
}

pub fn display_name(coin_id: &str) -> String {
    if let Some(coin) = COIN_ALIASES.iter().find(|c| c.id == coin_id) {
        return coin.name.to_string();
    }

    // unknown id: "some-coin" -> "Some-coin"
    let mut chars = coin_id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
