//! Seller forms
//!
//! Raw text captured from a "sell an item" form, validated into a
//! [`NewItem`] before it is sent to the catalog.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use thiserror::Error;

use randostore::{
    items::NewItem,
    prices::{Price, PriceError},
};

/// A single invalid form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Name is blank.
    #[error("Item name is required.")]
    NameRequired,

    /// Price is blank.
    #[error("Price is required.")]
    PriceRequired,

    /// Price is not a decimal number.
    #[error("Must be a number.")]
    PriceNotNumber,

    /// Price is zero or below once rounded to cents.
    #[error("Must be > 0.")]
    PriceNotPositive,

    /// Image URL is blank.
    #[error("Image URL is required.")]
    ImageRequired,

    /// Image URL is not an absolute URL.
    #[error("Enter a valid URL.")]
    ImageInvalid,
}

impl FieldError {
    /// Name of the form field the error belongs to.
    pub fn field(self) -> &'static str {
        match self {
            Self::NameRequired => "name",
            Self::PriceRequired | Self::PriceNotNumber | Self::PriceNotPositive => "price",
            Self::ImageRequired | Self::ImageInvalid => "img",
        }
    }
}

/// Every field error found in a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid item: {}", describe(.0))]
pub struct ItemFormError(pub Vec<FieldError>);

impl ItemFormError {
    /// Returns the individual field errors, in form order.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {error}", error.field()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Unvalidated seller input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemForm {
    /// Item name
    pub name: String,

    /// Unit price as typed, e.g. `"12.5"`
    pub price: String,

    /// Image URL
    pub img: String,
}

impl ItemForm {
    /// Validates the form, returning the item to create.
    ///
    /// Whitespace is trimmed from every field and the price is normalised to
    /// two decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`ItemFormError`] listing every invalid field.
    pub fn validate(&self) -> Result<NewItem, ItemFormError> {
        let mut errors = Vec::new();

        let name = self.name.trim();

        if name.is_empty() {
            errors.push(FieldError::NameRequired);
        }

        let price = validate_price(self.price.trim())
            .inspect_err(|error| errors.push(*error))
            .ok();
        let img = validate_img(self.img.trim())
            .inspect_err(|error| errors.push(*error))
            .ok();

        match (price, img) {
            (Some(price), Some(img)) if errors.is_empty() => Ok(NewItem {
                name: name.to_string(),
                price,
                img: img.to_string(),
            }),
            _ => Err(ItemFormError(errors)),
        }
    }
}

fn validate_price(raw: &str) -> Result<Price, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::PriceRequired);
    }

    let price = match raw.parse::<Price>() {
        Ok(price) => price,
        Err(PriceError::Negative(_)) => return Err(FieldError::PriceNotPositive),
        Err(PriceError::Invalid(_)) => return Err(FieldError::PriceNotNumber),
    };

    if price.amount() <= Decimal::ZERO {
        return Err(FieldError::PriceNotPositive);
    }

    let mut amount = price
        .amount()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);

    if amount.is_zero() {
        return Err(FieldError::PriceNotPositive);
    }

    match Price::new(amount) {
        Ok(price) => Ok(price),
        Err(PriceError::Negative(_)) => Err(FieldError::PriceNotPositive),
        Err(PriceError::Invalid(_)) => Err(FieldError::PriceNotNumber),
    }
}

fn validate_img(raw: &str) -> Result<&str, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::ImageRequired);
    }

    match reqwest::Url::parse(raw) {
        Ok(_) => Ok(raw),
        Err(_) => Err(FieldError::ImageInvalid),
    }
}
