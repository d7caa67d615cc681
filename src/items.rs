//! Items

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::prices::Price;

/// Catalog identifier, assigned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Wraps a raw catalog identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw catalog identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Server-assigned identifier
    pub id: ItemId,

    /// Display name
    pub name: String,

    /// Unit price
    pub price: Price,

    /// Image URL, when the seller supplied one
    #[serde(default, deserialize_with = "blank_as_none")]
    pub img: Option<String>,
}

impl Item {
    /// Creates an item without an image.
    pub fn new(id: u64, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            price,
            img: None,
        }
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_img(mut self, img: impl Into<String>) -> Self {
        self.img = Some(img.into());
        self
    }
}

/// Fields for a seller-created item; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    /// Display name
    pub name: String,

    /// Unit price
    pub price: Price,

    /// Image URL
    pub img: String,
}

/// A partial edit of an existing item. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New unit price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,

    /// New image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

impl ItemUpdate {
    /// Returns true when the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.img.is_none()
    }
}

impl From<NewItem> for ItemUpdate {
    fn from(item: NewItem) -> Self {
        Self {
            name: Some(item.name),
            price: Some(item.price),
            img: Some(item.img),
        }
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let img = Option::<String>::deserialize(deserializer)?;

    Ok(img.filter(|url| !url.trim().is_empty()))
}
