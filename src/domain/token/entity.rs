use candid::Principal;
use serde::{Deserialize, Serialize};

/// Fractional-ownership token layered over a tokenized property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyToken {
    pub token_id: u64,

    /// Identity holding the token record
    pub owner: Principal,

    pub metadata: TokenMetadata,

    /// Backing property
    pub property_id: u64,

    pub total_supply: u64,

    /// Units still purchasable; never exceeds `total_supply`
    pub available_supply: u64,

    /// Price of one unit in the settlement currency's smallest unit
    pub price_per_token: u64,

    pub currency: SettlementCurrency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub description: Option<String>,
    pub image: Option<Vec<u8>>,
    /// Basis points (10000 = 100%)
    pub royalties: Option<u16>,
    pub royalty_recipient: Option<Principal>,
}

/// Stablecoin used to settle purchases and income distributions.
/// Travels on the wire as the `use_usdt` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementCurrency {
    CkUsdc,
    CkUsdt,
}

impl SettlementCurrency {
    pub fn from_use_usdt(use_usdt: bool) -> Self {
        if use_usdt {
            SettlementCurrency::CkUsdt
        } else {
            SettlementCurrency::CkUsdc
        }
    }

    pub fn use_usdt(self) -> bool {
        matches!(self, SettlementCurrency::CkUsdt)
    }

    pub fn label(self) -> &'static str {
        match self {
            SettlementCurrency::CkUsdc => "ckUSDC",
            SettlementCurrency::CkUsdt => "ckUSDT",
        }
    }
}

impl PropertyToken {
    pub fn has_available_supply(&self) -> bool {
        self.available_supply > 0
    }

    /// Royalty as a percentage string with two decimals, e.g. `250` → `"2.50"`
    pub fn royalty_percentage(&self) -> Option<String> {
        self.metadata
            .royalties
            .map(|bps| format!("{:.2}", f64::from(bps) / 100.0))
    }

    /// Cost of `amount` units, `None` on overflow
    pub fn quote(&self, amount: u64) -> Option<u64> {
        self.price_per_token.checked_mul(amount)
    }
}

impl std::fmt::Display for SettlementCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
