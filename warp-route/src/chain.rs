//! Chain identifiers, ordered chain maps and chain metadata.
//!
//! - [`ChainName`] - Human-readable chain name used as the key of every per-chain map
//! - [`Domain`] - Hyperlane's 32-bit chain identifier used on the wire
//! - [`ChainMap`] - Insertion-ordered map keyed by chain name
//! - [`ChainMetadata`] - Static facts about a chain (chain ID, domain, native asset)
//! - [`ChainMetadataProvider`] - Lookup of domain IDs and native-asset descriptors

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Human-readable chain name (e.g., `"ethereum"`, `"polygon"`).
pub type ChainName = String;

/// Hyperlane domain identifier of a chain.
pub type Domain = u32;

/// A map keyed by chain name that preserves insertion order.
///
/// Deployment and metadata resolution walk chains in the order the caller
/// supplied them, so a hash map is not an option here. Serializes as a plain
/// JSON/TOML map, and deserialization keeps the document order.
///
/// Inserting an existing key replaces the value in place without moving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainMap<T>(Vec<(ChainName, T)>);

impl<T> ChainMap<T> {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates an empty map with room for `capacity` chains.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Number of chains in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map holds no chain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value stored for `chain`, if any.
    #[must_use]
    pub fn get(&self, chain: &str) -> Option<&T> {
        self.0.iter().find(|(name, _)| name == chain).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value stored for `chain`, if any.
    pub fn get_mut(&mut self, chain: &str) -> Option<&mut T> {
        self.0
            .iter_mut()
            .find(|(name, _)| name == chain)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the map has an entry for `chain`.
    #[must_use]
    pub fn contains(&self, chain: &str) -> bool {
        self.get(chain).is_some()
    }

    /// Inserts a value for `chain`, returning the previous value if there was one.
    pub fn insert(&mut self, chain: impl Into<ChainName>, value: T) -> Option<T> {
        let chain = chain.into();
        if let Some(slot) = self.get_mut(&chain) {
            return Some(std::mem::replace(slot, value));
        }
        self.0.push((chain, value));
        None
    }

    /// Iterates over `(chain, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ChainName, &T)> {
        self.0.iter().map(|(name, v)| (name, v))
    }

    /// Iterates over chain names in insertion order.
    pub fn chains(&self) -> impl Iterator<Item = &ChainName> {
        self.0.iter().map(|(name, _)| name)
    }

    /// Builds a new map with the same chains by applying `f` to every entry.
    pub fn map<U>(&self, mut f: impl FnMut(&ChainName, &T) -> U) -> ChainMap<U> {
        ChainMap(
            self.0
                .iter()
                .map(|(name, v)| (name.clone(), f(name, v)))
                .collect(),
        )
    }

    /// Like [`ChainMap::map`], stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(&ChainName, &T) -> Result<U, E>,
    ) -> Result<ChainMap<U>, E> {
        let mut out = Vec::with_capacity(self.0.len());
        for (name, v) in &self.0 {
            out.push((name.clone(), f(name, v)?));
        }
        Ok(ChainMap(out))
    }
}

impl<T> Default for ChainMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Into<ChainName>> FromIterator<(K, T)> for ChainMap<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (chain, value) in iter {
            map.insert(chain, value);
        }
        map
    }
}

impl<T> IntoIterator for ChainMap<T> {
    type Item = (ChainName, T);
    type IntoIter = std::vec::IntoIter<(ChainName, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T: Serialize> Serialize for ChainMap<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ChainMap<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ChainMapVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for ChainMapVisitor<T> {
            type Value = ChainMap<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map keyed by chain name")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = ChainMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<ChainName, T>()? {
                    if map.contains(&name) {
                        return Err(de::Error::custom(format!("duplicate chain `{name}`")));
                    }
                    map.0.push((name, value));
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(ChainMapVisitor(PhantomData))
    }
}

/// Descriptor of a chain's base asset (e.g., Ether on Ethereum).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeToken {
    /// Asset name (e.g., `"Ether"`).
    pub name: String,
    /// Ticker symbol (e.g., `"ETH"`).
    pub symbol: String,
    /// Number of decimals of the base unit.
    pub decimals: u8,
}

/// Static metadata about a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainMetadata {
    /// EIP-155 chain ID.
    pub chain_id: u64,
    /// Hyperlane domain ID.
    pub domain_id: Domain,
    /// Base asset of the chain, when one is registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_token: Option<NativeToken>,
}

/// Lookup of per-chain facts that never require a network round trip.
pub trait ChainMetadataProvider {
    /// Returns the Hyperlane domain of `chain`, if the chain is known.
    fn domain_id(&self, chain: &str) -> Option<Domain>;

    /// Returns the native-asset descriptor of `chain`, if one is registered.
    fn native_token(&self, chain: &str) -> Option<NativeToken>;
}

impl ChainMetadataProvider for ChainMap<ChainMetadata> {
    fn domain_id(&self, chain: &str) -> Option<Domain> {
        self.get(chain).map(|m| m.domain_id)
    }

    fn native_token(&self, chain: &str) -> Option<NativeToken> {
        self.get(chain).and_then(|m| m.native_token.clone())
    }
}

impl<T: ChainMetadataProvider + ?Sized> ChainMetadataProvider for Arc<T> {
    fn domain_id(&self, chain: &str) -> Option<Domain> {
        (**self).domain_id(chain)
    }

    fn native_token(&self, chain: &str) -> Option<NativeToken> {
        (**self).native_token(chain)
    }
}

impl<T: ChainMetadataProvider + ?Sized> ChainMetadataProvider for &T {
    fn domain_id(&self, chain: &str) -> Option<Domain> {
        (**self).domain_id(chain)
    }

    fn native_token(&self, chain: &str) -> Option<NativeToken> {
        (**self).native_token(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_map_preserves_document_order() {
        let map: ChainMap<u32> =
            serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mu": 3}"#).unwrap();
        let chains: Vec<&str> = map.chains().map(String::as_str).collect();
        assert_eq!(chains, ["zeta", "alpha", "mu"]);
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"zeta":1,"alpha":2,"mu":3}"#
        );
    }

    #[test]
    fn test_chain_map_rejects_duplicate_chain() {
        let result: Result<ChainMap<u32>, _> = serde_json::from_str(r#"{"a": 1, "a": 2}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("duplicate chain `a`"), "{err}");
    }

    #[test]
    fn test_chain_map_insert_replaces_in_place() {
        let mut map: ChainMap<u32> = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(map.insert("a", 10), Some(1));
        assert_eq!(map.insert("c", 3), None);
        let entries: Vec<(&str, u32)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(entries, [("a", 10), ("b", 2), ("c", 3)]);
    }

    #[test]
    fn test_chain_map_try_map_stops_on_error() {
        let map: ChainMap<u32> = [("a", 1), ("b", 0), ("c", 3)].into_iter().collect();
        let result = map.try_map(|chain, v| if *v == 0 { Err(chain.clone()) } else { Ok(v * 2) });
        assert_eq!(result.unwrap_err(), "b");
    }

    #[test]
    fn test_metadata_provider_for_chain_map() {
        let registry: ChainMap<ChainMetadata> = [
            (
                "ethereum",
                ChainMetadata {
                    chain_id: 1,
                    domain_id: 1,
                    native_token: Some(NativeToken {
                        name: "Ether".into(),
                        symbol: "ETH".into(),
                        decimals: 18,
                    }),
                },
            ),
            (
                "custom",
                ChainMetadata {
                    chain_id: 31337,
                    domain_id: 31337,
                    native_token: None,
                },
            ),
        ]
        .into_iter()
        .collect();

        assert_eq!(registry.domain_id("ethereum"), Some(1));
        assert_eq!(registry.native_token("ethereum").unwrap().symbol, "ETH");
        assert_eq!(registry.domain_id("custom"), Some(31337));
        assert!(registry.native_token("custom").is_none());
        assert!(registry.domain_id("unknown").is_none());
    }
}
