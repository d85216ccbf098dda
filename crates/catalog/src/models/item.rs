//! Item domain types.
//!
//! `Item` is the stored record; `ItemDraft` is the creation payload (the
//! store assigns the id); `ItemPatch` is the partial-update payload with
//! explicit per-field presence.
//!
//! Wire names are camelCase (`imageUrl`, `stockAvailable`), the format the
//! shop and admin front-ends exchange.

use serde::{Deserialize, Deserializer, Serialize};

use sahara_core::ItemId;

/// A catalog item.
///
/// Every field except the id is optional: records may be partially
/// populated, and partial updates depend on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique item ID, assigned by the store on insert. Never reused.
    pub id: ItemId,
    /// Display name.
    pub name: Option<String>,
    /// Unit price.
    pub price: Option<f64>,
    /// Units on hand. Drives the in-stock filter (`quantity > 0`).
    pub quantity: Option<i32>,
    /// Opaque image URL.
    pub image_url: Option<String>,
    /// Color, stored case-sensitively.
    pub color: Option<String>,
    /// Category, stored case-sensitively; filters compare case-insensitively.
    pub category: Option<String>,
    /// Tag list in insertion order, no duplicates via the add-tag operation.
    /// `None` if tags were never set.
    pub tags: Option<Vec<String>>,
    /// Independently settable stock flag. Not derived from `quantity` and
    /// never consulted by the filter engine.
    pub stock_available: Option<bool>,
}

/// Creation payload for an item.
///
/// Carries everything but the id; an `id` sent by the caller is an unknown
/// field and is dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub stock_available: Option<bool>,
}

/// Tri-state presence for a patch field: absent, explicit null, or a value.
///
/// Plain `Option` cannot distinguish "the caller did not mention this field"
/// from "the caller sent null". The merge policy currently treats both as
/// keep (see [`Patch::apply`]), but the wire distinction is preserved here
/// so changing the null arm is a local edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field was not present in the payload.
    #[default]
    Absent,
    /// Field was present with an explicit `null`.
    Null,
    /// Field was present with a value.
    Value(T),
}

impl<T> Patch<T> {
    /// Apply this patch on top of the current value.
    ///
    /// `Value` replaces; `Absent` and `Null` both keep the current value,
    /// the contract the existing clients rely on.
    pub fn apply(self, current: &mut Option<T>) {
        match self {
            Self::Value(v) => *current = Some(v),
            Self::Absent | Self::Null => {}
        }
    }

    /// True if the field was present in the payload (null or value).
    pub const fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }
}

// serde's `default` covers the Absent case; a present field deserializes
// through Option, so null becomes Null and anything else Value.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|opt| opt.map_or(Self::Null, Self::Value))
    }
}

/// Partial-update payload for an item.
///
/// Each field is tri-state; see [`Patch`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub price: Patch<f64>,
    #[serde(default)]
    pub quantity: Patch<i32>,
    #[serde(default)]
    pub image_url: Patch<String>,
    #[serde(default)]
    pub color: Patch<String>,
    #[serde(default)]
    pub category: Patch<String>,
    #[serde(default)]
    pub stock_available: Patch<bool>,
}
