//! The top-level control loop (spec §5 Concurrency & resource model).
use nix::sys::signal::{self, SigHandler, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag};

use crate::backend::DisplayBackend;
use crate::config::Config;
use crate::hooks::{ManageHook, RefreshHook};
use crate::state::State;
use crate::Result;

/// Owns the backend connection and the pure [`State`], and drives the
/// event loop. Generic over the backend so the core never depends on a
/// concrete display-server binding.
pub struct WindowManager<B: DisplayBackend> {
    pub backend: B,
    pub state: State,
    pub(crate) manage_hooks: Vec<ManageHook<B>>,
    pub(crate) refresh_hooks: Vec<RefreshHook<B>>,
}

extern "C" fn reap_children(_: libc::c_int) {
    // Reap every exited child without blocking; spawned processes
    // (status commands, `Command::Spawn` launches) are otherwise never
    // waited on and would accumulate as zombies.
    loop {
        match waitpid(None, Some(WaitPidFlag::WNOHANG)) {
            Ok(nix::sys::wait::WaitStatus::StillAlive) => break,
            Err(_) => break,
            _ => continue,
        }
    }
}

impl<B: DisplayBackend> WindowManager<B> {
    pub fn new(backend: B, config: Config) -> Result<Self> {
        config.validate()?;

        // SAFETY: installs a signal-safe handler that only calls
        // `waitpid(WNOHANG)` in a loop, per spec §5's "reaped lazily by a
        // child-signal handler using non-blocking waitpid".
        unsafe {
            let handler = SigHandler::Handler(reap_children);
            if let Err(e) = signal::signal(Signal::SIGCHLD, handler) {
                tracing::warn!(error = %e, "failed to install SIGCHLD handler");
            }
        }

        Ok(Self {
            backend,
            state: State::new(config),
            manage_hooks: Vec::new(),
            refresh_hooks: Vec::new(),
        })
    }

    pub fn add_manage_hook(&mut self, hook: ManageHook<B>) {
        self.manage_hooks.push(hook);
    }

    pub fn add_refresh_hook(&mut self, hook: RefreshHook<B>) {
        self.refresh_hooks.push(hook);
    }

    pub(crate) fn run_manage_hooks(&mut self, id: crate::client::ClientId) -> Result<()> {
        let mut hooks = std::mem::take(&mut self.manage_hooks);
        for hook in hooks.iter_mut() {
            if let Err(e) = hook(id, &mut self.state, &mut self.backend) {
                tracing::warn!(error = %e, "manage hook failed");
            }
        }
        self.manage_hooks = hooks;
        Ok(())
    }

    pub(crate) fn run_refresh_hooks(&mut self, mon: crate::monitor::MonitorId) -> Result<()> {
        let mut hooks = std::mem::take(&mut self.refresh_hooks);
        for hook in hooks.iter_mut() {
            if let Err(e) = hook(mon, &mut self.state, &mut self.backend) {
                tracing::warn!(error = %e, "refresh hook failed");
            }
        }
        self.refresh_hooks = hooks;
        Ok(())
    }

    /// Bootstrap, then run the event loop until `quit` is commanded or the
    /// backend connection is lost, then clean up.
    pub fn run(&mut self) -> Result<()> {
        self.bootstrap()?;

        while self.state.running {
            match self.backend.next_event() {
                Ok(event) => {
                    if let Err(e) = self.handle_event(event) {
                        tracing::error!(error = %e, "event handler failed, continuing");
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "lost the display connection");
                    break;
                }
            }
        }

        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        tracing::debug!("shutting down");
        let monitors: Vec<_> = self.state.monitors.order.clone();
        let client_ids: Vec<_> = self.state.clients.keys().collect();
        for id in client_ids {
            if let Err(e) = self.unmanage(id, false) {
                tracing::warn!(error = %e, "failed to unmanage client during shutdown");
            }
        }
        for mon in monitors {
            self.state.monitors.remove(mon);
        }
        self.backend.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{WindowInfo, WindowTypeHint};
    use crate::bindings::{KeyBinding, KeyBindings, KeyCode, ModMask};
    use crate::command::{Arg, Command};
    use crate::event::{KeyEvent, XEvent};
    use crate::geometry::Rect;
    use crate::mock::MockBackend;

    fn wm_with_one_screen() -> WindowManager<MockBackend> {
        let backend = MockBackend::new(vec![Rect::new(0, 0, 1920, 1080)]);
        WindowManager::new(backend, Config::default()).unwrap()
    }

    #[test]
    fn bootstrap_creates_one_monitor_with_bars() {
        let mut wm = wm_with_one_screen();
        wm.bootstrap().unwrap();
        assert_eq!(wm.state.monitors.order.len(), 1);
        let mon = wm.state.monitors.selected.unwrap();
        let m = &wm.state.monitors.arena[mon];
        assert!(m.tagbar_window.is_some());
        assert!(m.clientbar_window.is_some());
    }

    #[test]
    fn bootstrap_with_no_screens_is_an_error() {
        let backend = MockBackend::new(vec![]);
        let mut wm = WindowManager::new(backend, Config::default()).unwrap();
        assert!(wm.bootstrap().is_err());
    }

    #[test]
    fn map_request_manages_and_focuses_the_new_client() {
        let mut wm = wm_with_one_screen();
        wm.bootstrap().unwrap();
        let window = wm.backend.add_existing_window(
            WindowInfo {
                title: "term".into(),
                class: "Xterm".into(),
                ..Default::default()
            },
            Rect::new(0, 0, 800, 600),
        );
        wm.handle_event(XEvent::MapRequest { window }).unwrap();

        let mon = wm.state.monitors.selected.unwrap();
        let sel = wm.state.monitors.arena[mon].sel;
        assert!(sel.is_some());
        assert_eq!(wm.state.clients[sel.unwrap()].handle, window);
    }

    #[test]
    fn scan_manages_pre_existing_windows_at_bootstrap() {
        let mut wm = wm_with_one_screen();
        let window = wm.backend.add_existing_window(
            WindowInfo {
                class: "Firefox".into(),
                ..Default::default()
            },
            Rect::new(0, 0, 800, 600),
        );
        wm.bootstrap().unwrap();
        assert!(wm.state.find_client_by_handle(window).is_some());
    }

    #[test]
    fn destroy_notify_unmanages_the_client() {
        let mut wm = wm_with_one_screen();
        wm.bootstrap().unwrap();
        let window = wm.backend.add_existing_window(WindowInfo::default(), Rect::new(0, 0, 800, 600));
        wm.handle_event(XEvent::MapRequest { window }).unwrap();
        assert!(wm.state.find_client_by_handle(window).is_some());

        wm.handle_event(XEvent::DestroyNotify { window }).unwrap();
        assert!(wm.state.find_client_by_handle(window).is_none());
    }

    #[test]
    fn key_press_dispatches_the_bound_command() {
        let mut wm = wm_with_one_screen();
        wm.state.config.key_bindings = KeyBindings(vec![KeyBinding {
            modifiers: ModMask::SUPER,
            key: KeyCode(24),
            command: Command::Quit,
            arg: Arg::None,
        }]);
        wm.bootstrap().unwrap();
        assert!(wm.state.running);
        wm.handle_event(XEvent::KeyPress(KeyEvent {
            key: KeyCode(24),
            modifiers: ModMask::SUPER,
        }))
        .unwrap();
        assert!(!wm.state.running);
    }

    #[test]
    fn fullscreen_toggle_restores_prior_geometry() {
        let mut wm = wm_with_one_screen();
        wm.bootstrap().unwrap();
        let window = wm.backend.add_existing_window(
            WindowInfo {
                window_type: WindowTypeHint::Normal,
                ..Default::default()
            },
            Rect::new(0, 0, 800, 600),
        );
        wm.handle_event(XEvent::MapRequest { window }).unwrap();
        let mon = wm.state.monitors.selected.unwrap();
        let id = wm.state.monitors.arena[mon].sel.unwrap();
        let before = wm.state.clients[id].rect;

        wm.apply_command(Command::ToggleFullscreen, &Arg::None).unwrap();
        assert!(wm.state.clients[id].fullscreen);

        wm.apply_command(Command::ToggleFullscreen, &Arg::None).unwrap();
        assert!(!wm.state.clients[id].fullscreen);
        assert_eq!(wm.state.clients[id].rect, before);
    }

    #[test]
    fn reconcile_monitors_attaches_a_newly_connected_screen() {
        let mut wm = wm_with_one_screen();
        wm.bootstrap().unwrap();
        assert_eq!(wm.state.monitors.order.len(), 1);

        wm.backend.screens.push(Rect::new(1920, 0, 1920, 1080));
        wm.reconcile_monitors().unwrap();
        assert_eq!(wm.state.monitors.order.len(), 2);
    }
}
