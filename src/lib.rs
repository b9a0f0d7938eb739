//! This crate provides the data layer of a small-business admin app.
//!
//! Its heart is the [`ListView`](list::ListView) in the [`list`] module: a local, paginated view
//! over a remote table that stays consistent while the user pages, searches, and edits. \
//! A `ListView` reads from anything that implements [`TableSource`](traits::TableSource). Two sources ship with
//! this crate: the [`rest`] module talks to a hosted PostgREST-style table store (the kind
//! Supabase exposes), and the [`memory`] module keeps rows in process for demos and tests.
//!
//! Because the app is more than its lists, the crate also carries the [`session`] module
//! (email/password authentication against the same hosted backend), the local-only
//! [`TaskBoard`] and [`Agenda`], and the validated forms and modals of [`form`].

pub mod traits;

pub mod error;
pub use error::{StoreError, StoreResult};
pub mod pager;
pub use pager::{PageState, SearchFilter};
pub mod list;
pub use list::{notice_channel, ListView, Notice, NoticeReceiver, NoticeSender, RefreshTicket, UpdateMissPolicy};

pub mod rest;
pub use rest::RestTable;
pub mod memory;
pub use memory::MemoryTable;
mod resource;
pub use resource::Resource;
pub mod session;
pub use session::{AuthStateReceiver, AuthUser, Session};

mod client;
pub use client::{ClientDraft, ClientId, ClientRecord};
mod product;
pub use product::{Currency, Product, ProductDraft, ProductId};
mod task;
pub use task::{Priority, Task, TaskBoard};
mod event;
pub use event::Event;
mod agenda;
pub use agenda::{Agenda, AgendaView};
pub mod form;

pub mod mock_behaviour;

pub mod config;
pub mod utils;

/// A client list wired to the hosted store
pub type ClientList = ListView<ClientRecord, RestTable<ClientRecord>>;
/// A product list wired to the hosted store
pub type ProductList = ListView<Product, RestTable<Product>>;
