//! # Pricing Catalog
//!
//! Unit prices per network and denomination.
//!
//! ## Merge on Load
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  defaults (this build)          persisted (older build, user-edited)   │
//! │  MTN { 100: 98, 200: 196,       MTN { 100: 90 }                         │
//! │        500: 490, 1000: 980 }                                           │
//! │            │                              │                             │
//! │            └──────────────┬───────────────┘                             │
//! │                           ▼                                             │
//! │  merged: MTN { 100: 90, 200: 196, 500: 490, 1000: 980 }                │
//! │                                                                         │
//! │  • persisted prices win on conflict                                    │
//! │  • defaults fill denominations the user never saw                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Iteration order is network declaration order, then ascending denomination.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Denomination, Network, Price};
use crate::validation::parse_price_text;

/// Built-in prices: (network, [(denomination, price)]).
const DEFAULT_PRICES: &[(Network, &[(u32, Price)])] = &[
    (Network::Mtn, &[(100, 98), (200, 196), (500, 490), (1000, 980)]),
    (Network::Airtel, &[(100, 97), (200, 194), (500, 485), (1000, 970)]),
    (Network::Glo, &[(100, 95), (200, 190), (500, 475), (1000, 950)]),
];

/// Network → denomination → unit price.
///
/// ## Invariant
/// Every network present has at least one denomination. Constructors and
/// merges drop networks that would end up empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct PriceCatalog(BTreeMap<Network, BTreeMap<Denomination, Price>>);

impl PriceCatalog {
    /// The catalog shipped with this build.
    pub fn defaults() -> Self {
        let map = DEFAULT_PRICES
            .iter()
            .map(|(network, prices)| {
                let denominations = prices
                    .iter()
                    .map(|(value, price)| (Denomination::new(*value), *price))
                    .collect();
                (*network, denominations)
            })
            .collect();
        PriceCatalog(map)
    }

    /// Builds a catalog from a decoded map.
    ///
    /// Empty networks are dropped and negative prices clamp to 0.
    pub fn from_map(map: BTreeMap<Network, BTreeMap<Denomination, Price>>) -> Self {
        let mut catalog = PriceCatalog(map);
        for prices in catalog.0.values_mut() {
            for price in prices.values_mut() {
                *price = (*price).max(0);
            }
        }
        catalog.drop_empty_networks();
        catalog
    }

    /// Merges `persisted` over `defaults`.
    ///
    /// Persisted entries override defaults for matching keys; default
    /// entries fill every gap.
    pub fn merged_over(defaults: &PriceCatalog, persisted: &PriceCatalog) -> Self {
        let mut merged = defaults.clone();
        for (network, prices) in &persisted.0 {
            merged
                .0
                .entry(*network)
                .or_default()
                .extend(prices.iter().map(|(d, p)| (*d, *p)));
        }
        merged.drop_empty_networks();
        merged
    }

    /// Unit price for a pair, if the catalog has one.
    pub fn price(&self, network: Network, denomination: Denomination) -> Option<Price> {
        self.0.get(&network)?.get(&denomination).copied()
    }

    /// Returns true when the catalog prices this pair.
    pub fn contains(&self, network: Network, denomination: Denomination) -> bool {
        self.price(network, denomination).is_some()
    }

    /// Replaces one entry from price text and returns the stored price.
    ///
    /// Text that is not a non-negative integer stores 0.
    pub fn set_price(&mut self, network: Network, denomination: Denomination, raw: &str) -> Price {
        let price = parse_price_text(raw);
        self.0.entry(network).or_default().insert(denomination, price);
        price
    }

    /// Networks in display order.
    pub fn networks(&self) -> impl Iterator<Item = Network> + '_ {
        self.0.keys().copied()
    }

    /// Denominations and prices of one network, ascending.
    pub fn denominations(
        &self,
        network: Network,
    ) -> impl Iterator<Item = (Denomination, Price)> + '_ {
        self.0
            .get(&network)
            .into_iter()
            .flat_map(|prices| prices.iter().map(|(d, p)| (*d, *p)))
    }

    /// Every (network, denomination, price) triple in display order.
    pub fn entries(&self) -> impl Iterator<Item = (Network, Denomination, Price)> + '_ {
        self.0
            .iter()
            .flat_map(|(n, prices)| prices.iter().map(move |(d, p)| (*n, *d, *p)))
    }

    /// Number of priced pairs.
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    /// Checks if the catalog prices nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn drop_empty_networks(&mut self) {
        self.0.retain(|_, prices| !prices.is_empty());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
