//! The HTTP gateway to the hosted table store
//!
//! The store speaks a PostgREST-style dialect: row ranges through the `Range`
//! header, totals through `Content-Range`, filters and key lookups through query
//! parameters, returned representations through the `Prefer` header. [`RestTable`]
//! translates the [`TableSource`] operations into that dialect for one table.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CONTENT_RANGE, RANGE};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{StoreError, StoreResult};
use crate::pager::SearchFilter;
use crate::resource::Resource;
use crate::session::Session;
use crate::traits::{TableRecord, TableSource};

/// Path of the data API on the hosted project
static DATA_PATH: &str = "/rest/v1";

/// Turns a non-success response into the error the caller reports
pub(crate) async fn rejection(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    StoreError::Rejected { status, message }
}

/// A [`TableSource`] over the hosted data API, for the table [`TableRecord::TABLE`]
pub struct RestTable<R: TableRecord> {
    resource: Resource,
    session: Option<Arc<Session>>,
    http: reqwest::Client,
    phantom: PhantomData<R>,
}

impl<R: TableRecord> RestTable<R> {
    /// A gateway that authenticates with the project api key only
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            session: None,
            http: reqwest::Client::new(),
            phantom: PhantomData,
        }
    }

    /// A gateway that also sends the signed-in user's token with every request.
    ///
    /// While `session` is signed out, requests fall back to the api key.
    pub fn new_with_session(resource: Resource, session: Arc<Session>) -> Self {
        Self {
            resource,
            session: Some(session),
            http: reqwest::Client::new(),
            phantom: PhantomData,
        }
    }

    /// The URL of this table on the data API
    fn table_url(&self) -> Url {
        self.resource
            .combine(&format!("{}/{}", DATA_PATH, R::TABLE))
            .url()
            .clone()
    }

    /// The URL a read (or count) goes to: select everything, a stable order, and the
    /// optional search disjunction
    fn read_url(&self, filter: Option<&SearchFilter>) -> Url {
        let mut url = self.table_url();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "id.asc");
        if let Some(filter) = filter {
            url.query_pairs_mut()
                .append_pair("or", &Self::search_disjunction(filter));
        }
        url
    }

    /// The URL a mutation scoped to one row goes to
    fn row_url(&self, id: &R::Id) -> Url {
        let mut url = self.table_url();
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{}", id));
        url
    }

    /// Renders the disjunction that matches `filter` against every searchable column,
    /// e.g. `(name.ilike.*acme*,company.ilike.*acme*,email.ilike.*acme*)`.
    ///
    /// A term containing `,` or `)` would split the disjunction on the store side;
    /// such terms simply match nothing instead of erroring.
    fn search_disjunction(filter: &SearchFilter) -> String {
        let clauses: Vec<String> = R::SEARCH_COLUMNS
            .iter()
            .map(|column| format!("{}.ilike.*{}*", column, filter.term()))
            .collect();
        format!("({})", clauses.join(","))
    }

    /// Adds the api key and the bearer token (the user's when signed in, the api key
    /// otherwise) to a request
    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = self.session.as_ref().and_then(|session| session.access_token());
        let bearer = token.unwrap_or_else(|| self.resource.api_key().clone());
        request
            .header("apikey", self.resource.api_key().as_str())
            .bearer_auth(bearer)
    }

    /// Extracts the total row count from a `Content-Range` value such as `0-9/42` or `*/0`
    fn parse_content_range_total(value: &str) -> Option<usize> {
        value.rsplit('/').next()?.parse().ok()
    }
}

#[async_trait]
impl<R> TableSource<R> for RestTable<R>
where
    R: TableRecord + DeserializeOwned,
{
    async fn count_matching(&self, filter: Option<&SearchFilter>) -> StoreResult<usize> {
        let response = self
            .apply_auth(self.http.head(self.read_url(filter)))
            .header("Prefer", "count=exact")
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(rejection(response).await);
        }

        let header = match response.headers().get(CONTENT_RANGE) {
            Some(value) => value
                .to_str()
                .map_err(|err| StoreError::BadResponse(format!("Unreadable Content-Range: {}", err)))?,
            None => {
                return Err(StoreError::BadResponse(
                    "The count answer carries no Content-Range header".to_string(),
                ))
            }
        };

        Self::parse_content_range_total(header).ok_or_else(|| {
            StoreError::BadResponse(format!("Cannot parse a total out of Content-Range {:?}", header))
        })
    }

    async fn read_range(
        &self,
        filter: Option<&SearchFilter>,
        start: usize,
        end: usize,
    ) -> StoreResult<Vec<R>> {
        let response = self
            .apply_auth(self.http.get(self.read_url(filter)))
            .header(RANGE, format!("{}-{}", start, end))
            .send()
            .await?;

        // The store answers 416 for a range entirely past the last row
        if response.status() == reqwest::StatusCode::RANGE_NOT_SATISFIABLE {
            return Ok(Vec::new());
        }
        if response.status().is_success() == false {
            return Err(rejection(response).await);
        }

        response
            .json::<Vec<R>>()
            .await
            .map_err(|err| StoreError::BadResponse(err.to_string()))
    }

    async fn insert(&self, draft: &R::Draft) -> StoreResult<R> {
        let response = self
            .apply_auth(self.http.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(draft)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(rejection(response).await);
        }

        let rows: Vec<R> = response
            .json()
            .await
            .map_err(|err| StoreError::BadResponse(err.to_string()))?;
        rows.into_iter().next().ok_or_else(|| {
            StoreError::BadResponse("The store created no row for this insert".to_string())
        })
    }

    async fn update(&self, id: &R::Id, draft: &R::Draft) -> StoreResult<R> {
        let response = self
            .apply_auth(self.http.patch(self.row_url(id)))
            .header("Prefer", "return=representation")
            .json(draft)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(rejection(response).await);
        }

        let rows: Vec<R> = response
            .json()
            .await
            .map_err(|err| StoreError::BadResponse(err.to_string()))?;
        // An empty representation means the key matched nothing
        rows.into_iter().next().ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: &R::Id) -> StoreResult<()> {
        let response = self
            .apply_auth(self.http.delete(self.row_url(id)))
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(rejection(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::client::ClientRecord;

    fn table() -> RestTable<ClientRecord> {
        let resource = Resource::new(
            Url::parse("https://project.example.com").unwrap(),
            "anon-key".to_string(),
        );
        RestTable::new(resource)
    }

    #[test]
    fn content_range_totals() {
        type T = RestTable<ClientRecord>;
        assert_eq!(T::parse_content_range_total("0-9/42"), Some(42));
        assert_eq!(T::parse_content_range_total("*/0"), Some(0));
        assert_eq!(T::parse_content_range_total("10-11/12"), Some(12));
        assert_eq!(T::parse_content_range_total("0-9/*"), None);
        assert_eq!(T::parse_content_range_total("garbage"), None);
    }

    #[test]
    fn search_disjunction_covers_every_column() {
        let filter = SearchFilter::new("acme").unwrap();
        assert_eq!(
            RestTable::<ClientRecord>::search_disjunction(&filter),
            "(name.ilike.*acme*,company.ilike.*acme*,email.ilike.*acme*)"
        );
    }

    #[test]
    fn read_url_carries_select_order_and_filter() {
        let table = table();

        let url = table.read_url(None);
        assert_eq!(url.path(), "/rest/v1/clients");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert!(pairs.contains(&("select".to_string(), "*".to_string())));
        assert!(pairs.contains(&("order".to_string(), "id.asc".to_string())));
        assert!(pairs.iter().all(|(k, _)| k != "or"));

        let filter = SearchFilter::new("acme").unwrap();
        let url = table.read_url(Some(&filter));
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert!(pairs.contains(&(
            "or".to_string(),
            "(name.ilike.*acme*,company.ilike.*acme*,email.ilike.*acme*)".to_string()
        )));
    }

    #[test]
    fn row_url_scopes_to_the_key() {
        let table = table();
        let url = table.row_url(&7);
        assert_eq!(url.path(), "/rest/v1/clients");
        assert_eq!(url.query(), Some("id=eq.7"));
    }
}
