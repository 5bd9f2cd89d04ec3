//! Extension points that let a consumer observe core transitions without
//! the dispatcher special-casing them (spec [FULL] supplement).
use crate::client::ClientId;
use crate::monitor::MonitorId;
use crate::state::State;
use crate::Result;

/// Runs immediately after a client has been fully managed (rules applied,
/// tags/monitor assigned, attached to the order-list and focus-stack) but
/// before the first `arrange`.
pub type ManageHook<B> = Box<dyn FnMut(ClientId, &mut State, &mut B) -> Result<()>>;

/// Runs after every `arrange` call, once geometry has settled.
pub type RefreshHook<B> = Box<dyn FnMut(MonitorId, &mut State, &mut B) -> Result<()>>;
