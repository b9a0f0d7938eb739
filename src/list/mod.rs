//! This module keeps the rows of one remote table in sync with a local display cache
//!
//! A [`ListView`] owns a [`TableSource`], the rows currently displayed, and a
//! [`PageState`]. Every operation issues at most one round of remote calls, catches
//! any error at this boundary, and reports the outcome through the `log` macros and
//! an optional notice channel.

use crate::error::StoreResult;
use crate::pager::{PageState, SearchFilter};
use crate::traits::{TableRecord, TableSource};

pub mod notice;
pub use notice::{notice_channel, Notice, NoticeReceiver, NoticeSender};
use notice::Reporter;

/// What to do when an update succeeds on the store but the updated row is not among
/// the displayed ones (a stale page, for example)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateMissPolicy {
    /// Keep the displayed rows as they are
    Ignore,
    /// Adopt the returned row by appending it to the displayed ones
    Append,
    /// Re-read the current page from the store
    Refetch,
}

impl Default for UpdateMissPolicy {
    fn default() -> Self {
        Self::Refetch
    }
}

/// A pending page read, pinned to the pagination state it was issued under.
///
/// Tickets order concurrent refreshes: [`ListView::apply_refresh`] only applies the
/// outcome of the newest issued ticket and discards the others, so a slow stale
/// response can never overwrite fresher rows.
#[derive(Clone, Debug)]
pub struct RefreshTicket {
    seq: u64,
    start: usize,
    end: usize,
    filter: Option<SearchFilter>,
}

impl RefreshTicket {
    /// The inclusive row range this ticket will read
    pub fn range(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// The filter this ticket was issued under
    pub fn filter(&self) -> Option<&SearchFilter> {
        self.filter.as_ref()
    }
}

/// A paginated, searchable view over one remote table.
///
/// The rows it holds are a display-only projection of the store: they are replaced
/// wholesale by [`refresh`](Self::refresh) and spliced in place by the mutation
/// operations. The store always wins; after any operation the view either shows
/// fresh data or its last known good state plus a failure notice.
pub struct ListView<R, S>
where
    R: TableRecord,
    S: TableSource<R>,
{
    /// The store (usually remote) this view reads from and writes to
    source: S,
    /// The displayed rows
    rows: Vec<R>,
    /// Page, page size, total, search term
    pager: PageState,
    /// Sequence number of the newest issued refresh
    last_issued: u64,
    miss_policy: UpdateMissPolicy,
    reporter: Reporter,
}

impl<R, S> ListView<R, S>
where
    R: TableRecord,
    S: TableSource<R>,
{
    /// Create a view over `source`, without any notice listener.
    ///
    /// The view starts empty: call [`refresh`](Self::refresh) to load the first page.
    pub fn new(source: S) -> Self {
        Self {
            source,
            rows: Vec::new(),
            pager: PageState::new(),
            last_issued: 0,
            miss_policy: UpdateMissPolicy::default(),
            reporter: Reporter::new(),
        }
    }

    /// Create a view whose outcome messages are also sent over `channel`
    pub fn new_with_notice_channel(source: S, channel: NoticeSender) -> Self {
        let mut view = Self::new(source);
        view.reporter = Reporter::new_with_notice_channel(channel);
        view
    }

    /// The displayed rows, in store order
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// The pagination and search state this view is currently showing
    pub fn pager(&self) -> &PageState {
        &self.pager
    }

    /// The underlying source.
    ///
    /// Apart from tests, there are very few (if any) reasons to access it directly.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn update_miss_policy(&self) -> UpdateMissPolicy {
        self.miss_policy
    }

    pub fn set_update_miss_policy(&mut self, policy: UpdateMissPolicy) {
        self.miss_policy = policy;
    }

    /// Issue a new refresh ticket for the current page, page size and search term.
    ///
    /// This supersedes every ticket issued before: their outcomes will be discarded
    /// by [`apply_refresh`](Self::apply_refresh).
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.last_issued += 1;
        let (start, end) = self.pager.range();
        RefreshTicket {
            seq: self.last_issued,
            start,
            end,
            filter: self.pager.filter(),
        }
    }

    /// Read the total count and the rows `ticket` covers, in that order.
    ///
    /// The two reads are not atomic: under concurrent external writes the total and
    /// the rows can disagree until the next refresh.
    pub async fn fetch_page(&self, ticket: &RefreshTicket) -> StoreResult<(usize, Vec<R>)> {
        let filter = ticket.filter();
        let total = self.source.count_matching(filter).await?;
        let rows = self.source.read_range(filter, ticket.start, ticket.end).await?;
        Ok((total, rows))
    }

    /// Apply the outcome of a fetch, unless a newer ticket has been issued since.
    ///
    /// Returns whether the view now displays the rows this ticket read. A stale
    /// ticket is discarded silently; a failed fetch leaves the displayed rows and
    /// total untouched and reports a failure notice.
    pub fn apply_refresh(&mut self, ticket: RefreshTicket, outcome: StoreResult<(usize, Vec<R>)>) -> bool {
        if ticket.seq != self.last_issued {
            log::debug!(
                "Discarding the outcome of {} fetch #{}: #{} has been issued since",
                R::NOUN, ticket.seq, self.last_issued
            );
            return false;
        }

        match outcome {
            Ok((total, rows)) => {
                log::debug!("Displaying {} {} rows out of {}", rows.len(), R::NOUN, total);
                self.rows = rows;
                self.pager.set_total(total);
                true
            }
            Err(err) => {
                self.reporter
                    .failure(&format!("Could not load the {} list: {}", R::NOUN, err));
                false
            }
        }
    }

    /// Re-read the current page: [`begin_refresh`](Self::begin_refresh), the fetch,
    /// and [`apply_refresh`](Self::apply_refresh), in one call.
    ///
    /// Returns whether the displayed rows are now fresh.
    pub async fn refresh(&mut self) -> bool {
        let ticket = self.begin_refresh();
        let outcome = self.fetch_page(&ticket).await;
        self.apply_refresh(ticket, outcome)
    }

    /// Store a new search term, reset to page 1 and refresh
    pub async fn search(&mut self, term: &str) -> bool {
        self.pager.set_search(term);
        self.refresh().await
    }

    /// Move to `page` and refresh
    pub async fn goto_page(&mut self, page: usize) -> bool {
        self.pager.set_page(page);
        self.refresh().await
    }

    /// Change the page size, keep the current page and refresh
    pub async fn set_page_size(&mut self, page_size: usize) -> bool {
        self.pager.set_page_size(page_size);
        self.refresh().await
    }

    /// Insert a new row built from `draft`.
    ///
    /// On success the returned row (carrying its server-assigned id) is appended to
    /// the displayed rows and the total is bumped, without a refetch. On failure the
    /// displayed rows are left untouched.
    pub async fn create(&mut self, draft: &R::Draft) -> bool {
        match self.source.insert(draft).await {
            Ok(row) => {
                log::debug!("The store created {} {}", R::NOUN, row.id());
                self.rows.push(row);
                self.pager.increment_total();
                self.reporter.success(&format!("Created the {}", R::NOUN));
                true
            }
            Err(err) => {
                self.reporter
                    .failure(&format!("Could not create the {}: {}", R::NOUN, err));
                false
            }
        }
    }

    /// Overwrite the row identified by `id` with `draft`.
    ///
    /// On success the row returned by the store replaces the displayed row with the
    /// same id. When no displayed row matches, the configured
    /// [`UpdateMissPolicy`] applies. Returns whether everything this call did
    /// (the update, plus the refetch the policy may require) succeeded.
    pub async fn update(&mut self, id: &R::Id, draft: &R::Draft) -> bool {
        let row = match self.source.update(id, draft).await {
            Ok(row) => row,
            Err(err) => {
                self.reporter
                    .failure(&format!("Could not update the {}: {}", R::NOUN, err));
                return false;
            }
        };

        self.reporter.success(&format!("Updated the {}", R::NOUN));

        match self.rows.iter_mut().find(|displayed| displayed.id() == id) {
            Some(displayed) => {
                *displayed = row;
                true
            }
            None => match self.miss_policy {
                UpdateMissPolicy::Ignore => true,
                UpdateMissPolicy::Append => {
                    self.rows.push(row);
                    true
                }
                UpdateMissPolicy::Refetch => {
                    log::debug!(
                        "Updated {} {} is not displayed, re-reading the current page",
                        R::NOUN, id
                    );
                    self.refresh().await
                }
            },
        }
    }

    /// Delete the row identified by `id`.
    ///
    /// On success the matching displayed row (if any) is removed at once; if that
    /// drained a page beyond the first, the view steps back one page. The page is
    /// then refetched so the total stays authoritative. Returns whether both the
    /// delete and the refetch succeeded.
    pub async fn delete(&mut self, id: &R::Id) -> bool {
        if let Err(err) = self.source.delete(id).await {
            self.reporter
                .failure(&format!("Could not delete the {}: {}", R::NOUN, err));
            return false;
        }

        if let Some(position) = self.rows.iter().position(|displayed| displayed.id() == id) {
            self.rows.remove(position);
        }
        if self.rows.is_empty() {
            self.pager.step_back();
        }

        self.reporter.success(&format!("Deleted the {}", R::NOUN));
        self.refresh().await
    }
}
