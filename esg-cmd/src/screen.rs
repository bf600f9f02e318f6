//! Screen container: owns the company/year selection and the fetch
//! lifecycle for one dashboard.
//!
//! Every fetch is tagged with a monotonically increasing sequence number.
//! Only the result of the most recently issued fetch is committed, so a slow
//! response for an old selection can never overwrite a newer one.

use log::{info, warn};
use std::fmt::Display;
use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub company_id: String,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    pub selection: Selection,
}

#[derive(Debug)]
pub struct Screen<T> {
    selection: Selection,
    state: LoadState<T>,
    latest_seq: u64,
}

impl<T> Screen<T> {
    pub fn new(selection: Selection) -> Self {
        Screen {
            selection,
            state: LoadState::Idle,
            latest_seq: 0,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// Change the company. Any fetch issued for the old selection becomes stale.
    /// Returns whether the selection changed.
    pub fn select_company(&mut self, company_id: impl Into<String>) -> bool {
        let company_id = company_id.into();
        if company_id == self.selection.company_id {
            return false;
        }
        self.selection.company_id = company_id;
        self.invalidate();
        true
    }

    /// Change the year. Any fetch issued for the old selection becomes stale.
    /// Returns whether the selection changed.
    pub fn select_year(&mut self, year: i32) -> bool {
        if year == self.selection.year {
            return false;
        }
        self.selection.year = year;
        self.invalidate();
        true
    }

    /// Data for the previous selection is discarded with the stale fetches.
    fn invalidate(&mut self) {
        self.latest_seq += 1;
        self.state = LoadState::Idle;
    }

    /// Start a fetch for the current selection.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.state = LoadState::Loading;
        FetchTicket {
            seq: self.latest_seq,
            selection: self.selection.clone(),
        }
    }

    /// Commit a fetch result if `ticket` is still the latest fetch.
    /// Returns false when the result was stale and dropped.
    pub fn complete_fetch<E: Display>(&mut self, ticket: FetchTicket, result: Result<T, E>) -> bool {
        if ticket.seq != self.latest_seq {
            warn!(
                "Dropping stale response for {} ({}), fetch #{} superseded by #{}",
                ticket.selection.company_id, ticket.selection.year, ticket.seq, self.latest_seq
            );
            return false;
        }
        self.state = match result {
            Ok(data) => {
                info!(
                    "Loaded data for {} ({})",
                    ticket.selection.company_id, ticket.selection.year
                );
                LoadState::Loaded(data)
            }
            Err(e) => LoadState::Failed(e.to_string()),
        };
        true
    }

    /// Fetch for the current selection and commit the result.
    pub async fn refresh<F, Fut, E>(&mut self, fetch: F) -> &LoadState<T>
    where
        F: FnOnce(Selection) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let ticket = self.begin_fetch();
        let result = fetch(ticket.selection.clone()).await;
        self.complete_fetch(ticket, result);
        &self.state
    }
}
