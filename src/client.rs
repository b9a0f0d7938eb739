//! Client records (the people and companies the business works with)

use serde::{Deserialize, Serialize};

use crate::traits::TableRecord;

/// The key the store assigns to every client row
pub type ClientId = i64;

/// A client, as stored in the hosted `clients` table.
///
/// Rows written by other tools may carry null columns; those read back as empty
/// strings here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    id: ClientId,
    #[serde(default, deserialize_with = "crate::utils::null_to_default")]
    name: String,
    #[serde(default, deserialize_with = "crate::utils::null_to_default")]
    company: String,
    #[serde(default, deserialize_with = "crate::utils::null_to_default")]
    email: String,
    #[serde(default, deserialize_with = "crate::utils::null_to_default")]
    phone: String,
    #[serde(default, deserialize_with = "crate::utils::null_to_default")]
    tax_id: String,
}

impl ClientRecord {
    pub fn id(&self) -> ClientId { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn company(&self) -> &str { &self.company }
    pub fn email(&self) -> &str { &self.email }
    pub fn phone(&self) -> &str { &self.phone }
    /// The national tax identifier (RUT for Chilean clients)
    pub fn tax_id(&self) -> &str { &self.tax_id }
}

/// What a client row is made of, before the store assigns it an id
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDraft {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub tax_id: String,
}

impl TableRecord for ClientRecord {
    type Id = ClientId;
    type Draft = ClientDraft;

    const TABLE: &'static str = "clients";
    const NOUN: &'static str = "client";
    const SEARCH_COLUMNS: &'static [&'static str] = &["name", "company", "email"];

    fn id(&self) -> &ClientId {
        &self.id
    }

    fn search_values(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.company.as_str(), self.email.as_str()]
    }

    fn from_draft(id: ClientId, draft: &ClientDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            company: draft.company.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            tax_id: draft.tax_id.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn null_columns_read_back_as_empty_strings() {
        let row: ClientRecord = serde_json::from_str(
            r#"{ "id": 3, "name": "Rosa Díaz", "company": null, "email": "rosa@acme.test" }"#,
        )
        .unwrap();
        assert_eq!(row.id(), 3);
        assert_eq!(row.name(), "Rosa Díaz");
        assert_eq!(row.company(), "");
        assert_eq!(row.phone(), "");
    }

    #[test]
    fn drafts_serialize_every_column() {
        let draft = ClientDraft {
            name: "Rosa Díaz".to_string(),
            company: "Acme Corp".to_string(),
            email: "rosa@acme.test".to_string(),
            phone: "".to_string(),
            tax_id: "12.345.678-5".to_string(),
        };
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["name"], "Rosa Díaz");
        // a cleared field overwrites the stored value instead of being skipped
        assert_eq!(body["phone"], "");
    }
}
