//! The catalog record carried by product events, with the validation rules
//! the storefront applies before accepting a create or update payload.

use serde::{Deserialize, Serialize};

/// A catalog entry of the bakery storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub price: f64,
    /// Units in stock. Non-negativity is carried by the type.
    pub stock: u32,
    /// URL of the product picture. May be left empty.
    pub image: String,
}

/// A single violated validation rule.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Product name is required")]
    MissingName,
    #[error("Category is required")]
    MissingCategory,
    #[error("Price must be greater than 0")]
    InvalidPrice,
    #[error("Please enter a valid image URL")]
    MalformedImageUrl,
}

impl Product {
    /// Check the record against the storefront's rules, collecting every
    /// violated one: non-empty name, a category selected, a positive finite
    /// price and, when an image is given, a well-formed http(s) URL.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut violations = Vec::new();
        if self.name.trim().is_empty() {
            violations.push(ValidationError::MissingName);
        }
        if self.category.is_empty() {
            violations.push(ValidationError::MissingCategory);
        }
        if !(self.price.is_finite() && self.price > 0.0) {
            violations.push(ValidationError::InvalidPrice);
        }
        if !self.image.is_empty() && !is_well_formed_image_url(&self.image) {
            violations.push(ValidationError::MalformedImageUrl);
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// An http(s) URL whose remainder contains a dot with something on both
/// sides and no whitespace.
fn is_well_formed_image_url(url: &str) -> bool {
    let Some(rest) = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
    else {
        return false;
    };
    rest.contains('.')
        && !rest.starts_with('.')
        && !rest.ends_with('.')
        && !rest.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::{Product, ValidationError};
    use fake::{Fake, Faker};

    fn valid_product() -> Product {
        Product {
            id: Faker.fake(),
            name: "Kaju Katli".into(),
            category: "sweets".into(),
            price: 12.5,
            stock: Faker.fake(),
            image: "https://cdn.example.com/kaju.png".into(),
        }
    }

    #[test]
    fn a_complete_record_passes() {
        assert_eq!(Ok(()), valid_product().validate());
    }

    #[test]
    fn an_empty_image_is_allowed() {
        let product = Product {
            image: String::new(),
            ..valid_product()
        };
        assert_eq!(Ok(()), product.validate());
    }

    #[test]
    fn blank_name_is_rejected() {
        let product = Product {
            name: "   ".into(),
            ..valid_product()
        };
        assert_eq!(
            Err(vec![ValidationError::MissingName]),
            product.validate()
        );
    }

    #[test]
    fn missing_category_is_rejected() {
        let product = Product {
            category: String::new(),
            ..valid_product()
        };
        assert_eq!(
            Err(vec![ValidationError::MissingCategory]),
            product.validate()
        );
    }

    #[test]
    fn non_positive_or_non_finite_prices_are_rejected() {
        for price in [0.0, -3.5, f64::NAN] {
            let product = Product {
                price,
                ..valid_product()
            };
            assert_eq!(
                Err(vec![ValidationError::InvalidPrice]),
                product.validate(),
                "price {price} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_image_urls_are_rejected() {
        for image in [
            "ftp://cdn.example.com/a.png",
            "cdn.example.com/a.png",
            "http://nodot",
            "http://.hidden",
            "http://trailing.",
            "http://has space.com/a.png",
        ] {
            let product = Product {
                image: image.into(),
                ..valid_product()
            };
            assert_eq!(
                Err(vec![ValidationError::MalformedImageUrl]),
                product.validate(),
                "image `{image}` should be rejected"
            );
        }
    }

    #[test]
    fn every_violation_is_reported() {
        let product = Product {
            id: 0,
            name: String::new(),
            category: String::new(),
            price: 0.0,
            stock: 0,
            image: "not-a-url".into(),
        };
        let violations = product.validate().unwrap_err();
        assert_eq!(4, violations.len());
    }
}
