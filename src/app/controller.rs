//! The collection controller.
//!
//! Owns the summary list and the selected collection id in [`AppState`].
//! Every user intent goes through [`dispatch`], which mutates state and
//! returns the requests to run. Request completions come back through
//! [`summaries_loaded`] and [`collection_mutated`].
//!
//! Network failures are logged and otherwise ignored: a failed refresh keeps
//! the previous list on screen, and create/delete always refresh afterwards
//! whether or not the mutation went through.

use crate::api::{ApiError, ListId, ListSummary};
use crate::app::action::{Action, ApiRequest};
use crate::app::event::{Mutation, RefreshTicket};
use crate::app::state::{AppState, Summaries};
use chrono::Local;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Initialize,
    Refresh,
    Create { name: String },
    Delete { id: ListId },
    Select { id: ListId },
    Back,
}

pub fn dispatch(state: &mut AppState, intent: Intent) -> Vec<Action> {
    match intent {
        Intent::Initialize => initialize(state),
        Intent::Refresh => refresh(state),
        Intent::Create { name } => create_collection(name),
        Intent::Delete { id } => delete_collection(id),
        Intent::Select { id } => {
            select_collection(state, id);
            vec![]
        }
        Intent::Back => return_to_list(state),
    }
}

fn initialize(state: &mut AppState) -> Vec<Action> {
    if state.initialized {
        debug!("initialize called twice, ignoring");
        return vec![];
    }
    state.initialized = true;
    refresh(state)
}

fn refresh(state: &mut AppState) -> Vec<Action> {
    let ticket = state.refresh.issue();
    debug!(ticket = ticket.0, "refreshing collection summaries");
    vec![ApiRequest::FetchSummaries { ticket }.into()]
}

/// Names go out untouched; empty and duplicate names are the server's call.
fn create_collection(name: String) -> Vec<Action> {
    vec![ApiRequest::CreateCollection { name }.into()]
}

fn delete_collection(id: ListId) -> Vec<Action> {
    vec![ApiRequest::DeleteCollection { id }.into()]
}

fn select_collection(state: &mut AppState, id: ListId) {
    debug!(%id, "selected collection");
    state.selected = Some(id);
    state.dirty = true;
}

fn return_to_list(state: &mut AppState) -> Vec<Action> {
    state.selected = None;
    state.dirty = true;
    refresh(state)
}

/// Apply a settled summary request.
pub fn summaries_loaded(
    state: &mut AppState,
    ticket: RefreshTicket,
    result: Result<Vec<ListSummary>, ApiError>,
) {
    match result {
        Ok(rows) => {
            let discard_stale = state.config.behavior.discard_stale_refreshes;
            if !state.refresh.should_apply(ticket, discard_stale) {
                debug!(ticket = ticket.0, "dropping stale refresh response");
                return;
            }
            state.refresh.mark_applied(ticket);
            info!(ticket = ticket.0, count = rows.len(), "collection summaries refreshed");
            state.summaries = Summaries::Loaded(rows);
            state.last_refreshed = Some(Local::now());
            state.clamp_cursor();
            state.dirty = true;
        }
        Err(e) => {
            warn!(ticket = ticket.0, error = %e, "refresh failed");
        }
    }
}

/// A create/delete settled. Refreshes regardless of the outcome.
pub fn collection_mutated(
    state: &mut AppState,
    mutation: Mutation,
    result: Result<(), ApiError>,
) -> Vec<Action> {
    match (&mutation, result) {
        (Mutation::Create { name }, Ok(())) => info!(%name, "collection created"),
        (Mutation::Delete { id }, Ok(())) => info!(%id, "collection deleted"),
        (Mutation::Create { name }, Err(e)) => warn!(%name, error = %e, "create failed"),
        (Mutation::Delete { id }, Err(e)) => warn!(%id, error = %e, "delete failed"),
    }
    refresh(state)
}
