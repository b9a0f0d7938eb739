use async_trait::async_trait;
use serde::Serialize;
use std::fmt::{Debug, Display};

use crate::error::StoreResult;
use crate::pager::SearchFilter;

/// Description of a record type that lives in a remote table.
///
/// Records are keyed by an `id` column the store assigns. The searchable columns and
/// [`search_values`](Self::search_values) must list the same fields in the same order.
pub trait TableRecord: Clone + Debug + Send + Sync + 'static {
    /// The type of the server-assigned key
    type Id: Clone + PartialEq + Display + Debug + Send + Sync;
    /// The id-less payload sent to the store when creating or updating a row
    type Draft: Clone + Debug + Serialize + Send + Sync;

    /// The name of the table holding these records
    const TABLE: &'static str;
    /// How user-facing messages call one of these records
    const NOUN: &'static str;
    /// The columns a search term is matched against
    const SEARCH_COLUMNS: &'static [&'static str];

    fn id(&self) -> &Self::Id;

    /// The current values of the searchable columns, in [`Self::SEARCH_COLUMNS`] order
    fn search_values(&self) -> Vec<&str>;

    /// Materialize the row a store would create from `draft` under the key `id`
    fn from_draft(id: Self::Id, draft: &Self::Draft) -> Self;
}

/// A source of rows of one table: the remote store itself, or anything standing in for it.
///
/// Range reads are inclusive on both ends and use zero-based positions within the
/// filtered, store-ordered row sequence. Reading past the end is not an error, it
/// returns the rows that do exist (possibly none).
#[async_trait]
pub trait TableSource<R: TableRecord>: Send + Sync {
    /// Returns how many rows match `filter` (all rows when `filter` is `None`)
    async fn count_matching(&self, filter: Option<&SearchFilter>) -> StoreResult<usize>;

    /// Returns the matching rows whose positions fall within `start..=end`
    async fn read_range(
        &self,
        filter: Option<&SearchFilter>,
        start: usize,
        end: usize,
    ) -> StoreResult<Vec<R>>;

    /// Inserts a row built from `draft` and returns it as stored, with its new id
    async fn insert(&self, draft: &R::Draft) -> StoreResult<R>;

    /// Overwrites the row identified by `id` and returns it as stored.
    ///
    /// Fails with [`StoreError::NotFound`](crate::error::StoreError::NotFound) when no
    /// row has this id.
    async fn update(&self, id: &R::Id, draft: &R::Draft) -> StoreResult<R>;

    /// Deletes the row identified by `id`.
    ///
    /// Deleting an id the store does not hold is not an error.
    async fn delete(&self, id: &R::Id) -> StoreResult<()>;
}
