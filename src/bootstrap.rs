//! Startup: connect, claim the substructure-redirect role, discover the
//! screen layout, scan for pre-existing windows, and arrange everything
//! once before handing control to the event loop (spec component 4.J).
use crate::backend::DisplayBackend;
use crate::bindings::ClickTarget;
use crate::manager::WindowManager;
use crate::monitor::Monitor;
use crate::Result;

impl<B: DisplayBackend> WindowManager<B> {
    /// Runs once, before `run`'s event loop starts.
    pub(crate) fn bootstrap(&mut self) -> Result<()> {
        let root = self.backend.root();

        self.backend.install_error_handler(true);

        let rects = self.backend.screen_rects()?;
        let default_marked_width = self.state.config.marked_width;
        let show_tagbar = self.state.config.show_tagbar;
        let mut monitors = Vec::with_capacity(rects.len());
        for rect in rects {
            let mon = self
                .state
                .monitors
                .insert(Monitor::new(rect, default_marked_width, show_tagbar));
            monitors.push(mon);
        }
        if monitors.is_empty() {
            return Err(crate::Error::NoMonitors);
        }

        for &mon in &monitors {
            self.create_bars(mon)?;
        }

        let root_keys: Vec<_> = self
            .state
            .config
            .key_bindings
            .0
            .iter()
            .map(|b| b.key)
            .collect();
        self.backend.grab_keys(root, &root_keys).ok();
        let root_buttons: Vec<_> = self
            .state
            .config
            .mouse_bindings
            .0
            .iter()
            .filter(|b| b.target == ClickTarget::RootWindow)
            .map(|b| (b.target, b.modifiers, b.button))
            .collect();
        self.backend.grab_buttons(root, &root_buttons).ok();

        self.scan_existing_windows()?;

        for mon in monitors {
            self.arrange(mon)?;
        }

        tracing::info!("bootstrap complete");
        Ok(())
    }

    /// Manage every window already mapped before we took over, e.g. across
    /// a `Command::Quit`-then-`exec` restart.
    fn scan_existing_windows(&mut self) -> Result<()> {
        let windows = self.backend.existing_windows()?;
        for window in windows {
            match self.backend.window_info(window) {
                Ok(info) => {
                    if let Err(e) = self.manage(window, info) {
                        tracing::warn!(error = %e, "failed to manage a pre-existing window");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "failed to query a pre-existing window"),
            }
        }
        Ok(())
    }
}
