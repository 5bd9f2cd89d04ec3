//! The manager's pure, backend-independent state (spec §3 Data model).
use slotmap::SlotMap;

use crate::client::{Client, ClientId};
use crate::config::Config;
use crate::monitor::{Monitor, MonitorId, Monitors};

/// Everything the core knows about the world, independent of any backend
/// connection. A [`crate::manager::WindowManager`] owns one `State`
/// alongside the live backend connection.
pub struct State {
    pub monitors: Monitors,
    pub clients: SlotMap<ClientId, Client>,
    pub config: Config,
    pub running: bool,
    /// The root-window status text set by an external status command,
    /// truncated to 255 UTF-16 code units.
    pub status_text: String,
}

impl State {
    pub fn new(config: Config) -> Self {
        Self {
            monitors: Monitors::new(),
            clients: SlotMap::with_key(),
            config,
            running: true,
            status_text: String::new(),
        }
    }

    pub fn selected_monitor(&self) -> Option<MonitorId> {
        self.monitors.selected
    }

    pub fn monitor(&self, id: MonitorId) -> Option<&Monitor> {
        self.monitors.arena.get(id)
    }

    pub fn monitor_mut(&mut self, id: MonitorId) -> Option<&mut Monitor> {
        self.monitors.arena.get_mut(id)
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(id)
    }

    pub fn client_mut(&mut self, id: ClientId) -> Option<&mut Client> {
        self.clients.get_mut(id)
    }

    pub fn find_client_by_handle(&self, handle: crate::client::WindowId) -> Option<ClientId> {
        self.clients
            .iter()
            .find(|(_, c)| c.handle == handle)
            .map(|(id, _)| id)
    }

    pub fn monitor_of(&self, client: ClientId) -> Option<MonitorId> {
        self.clients.get(client).map(|c| c.monitor)
    }

    pub fn set_status_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.status_text = text.chars().take(255).collect();
    }
}
