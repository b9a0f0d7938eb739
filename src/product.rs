//! Product records (the catalog)

use serde::{Deserialize, Serialize};

use crate::traits::TableRecord;

/// The key the store assigns to every product row
pub type ProductId = i64;

/// The currency a price is expressed in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "CLP")]
    Clp,
}

/// A product, as stored in the hosted `products` table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    #[serde(default, deserialize_with = "crate::utils::null_to_default")]
    code: String,
    #[serde(default, deserialize_with = "crate::utils::null_to_default")]
    name: String,
    #[serde(default, deserialize_with = "crate::utils::null_to_default")]
    description: String,
    price: f64,
    currency: Currency,
}

impl Product {
    pub fn id(&self) -> ProductId { self.id }
    pub fn code(&self) -> &str { &self.code }
    pub fn name(&self) -> &str { &self.name }
    pub fn description(&self) -> &str { &self.description }
    pub fn price(&self) -> f64 { self.price }
    pub fn currency(&self) -> Currency { self.currency }

    /// The price as the UI shows it: USD keeps its cents, CLP is rounded to whole
    /// pesos and grouped with dots
    pub fn display_price(&self) -> String {
        match self.currency {
            Currency::Usd => format!("${:.2}", self.price),
            Currency::Clp => format!("CLP {}", group_thousands(self.price.round() as i64)),
        }
    }
}

/// What a product row is made of, before the store assigns it an id
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub code: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: Currency,
}

impl TableRecord for Product {
    type Id = ProductId;
    type Draft = ProductDraft;

    const TABLE: &'static str = "products";
    const NOUN: &'static str = "product";
    const SEARCH_COLUMNS: &'static [&'static str] = &["code", "name", "description"];

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn search_values(&self) -> Vec<&str> {
        vec![self.code.as_str(), self.name.as_str(), self.description.as_str()]
    }

    fn from_draft(id: ProductId, draft: &ProductDraft) -> Self {
        Self {
            id,
            code: draft.code.clone(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price,
            currency: draft.currency,
        }
    }
}

/// Groups the digits of `value` by three with `.` separators (es-CL style)
fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::new();
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn product(price: f64, currency: Currency) -> Product {
        Product::from_draft(
            1,
            &ProductDraft {
                code: "SKU-1".to_string(),
                name: "Widget".to_string(),
                description: "".to_string(),
                price,
                currency,
            },
        )
    }

    #[test]
    fn usd_prices_keep_their_cents() {
        assert_eq!(product(1234.5, Currency::Usd).display_price(), "$1234.50");
        assert_eq!(product(0.999, Currency::Usd).display_price(), "$1.00");
    }

    #[test]
    fn clp_prices_are_rounded_and_grouped() {
        assert_eq!(product(1234567.0, Currency::Clp).display_price(), "CLP 1.234.567");
        assert_eq!(product(999.6, Currency::Clp).display_price(), "CLP 1.000");
        assert_eq!(product(12.0, Currency::Clp).display_price(), "CLP 12");
    }

    #[test]
    fn currencies_use_their_iso_codes_on_the_wire() {
        let row: Product = serde_json::from_str(
            r#"{ "id": 1, "code": "SKU-1", "name": "Widget", "description": null,
                 "price": 9.5, "currency": "USD" }"#,
        )
        .unwrap();
        assert_eq!(row.currency(), Currency::Usd);
        assert_eq!(row.description(), "");
        assert_eq!(serde_json::to_value(Currency::Clp).unwrap(), "CLP");
    }
}
