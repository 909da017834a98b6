//! The page-lifetime coordinator tying scanner, observer, watcher and gate
//! together.
//!
//! The coordinator is a plain state machine. Host notifications arrive as
//! [`Event`]s, timers as [`Coordinator::tick`] calls, and the coordinator
//! reports its [`next_deadline`](Coordinator::next_deadline) so an adapter
//! can arm a single host timer. Time is always passed in, which keeps every
//! transition reproducible from a test.
//!
//! # Example
//!
//! ```
//! use scroll_reveal::coordinator::{Coordinator, Event};
//! use scroll_reveal::host::memory::MemoryDocument;
//! use scroll_reveal::host::Capabilities;
//! use scroll_reveal::options::Options;
//!
//! let mut doc = MemoryDocument::with_root_class(1280, "cc-animate-enabled");
//! let hero = doc.insert(&[("data-cc-animate", "cc-fade-in")]);
//! doc.set_in_viewport(hero, true);
//!
//! let mut reveal =
//!     Coordinator::start(doc, Options::default(), Capabilities::all());
//! for entry in reveal.host_mut().take_entries() {
//!     reveal.handle(Event::from(entry), web_time::Instant::now());
//! }
//! assert!(reveal.host().classes(hero).iter().any(|c| c == "cc-animate-in"));
//! ```

use web_time::Instant;

use crate::gate::{GateState, GateTransition, ResponsiveGate};
use crate::host::memory::{ElementId, VisibilityEntry};
use crate::host::{Capabilities, Host};
use crate::observer::{ObserverStats, ViewportObserver};
use crate::options::Options;
use crate::scanner::{self, ScanReport};
use crate::watcher::MutationWatcher;

/// Host notifications fed to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<E> {
    /// The page finished its initial parse.
    Loaded,
    /// An observed element entered the viewport.
    Visible(E),
    /// An observed element left the viewport.
    Hidden(E),
    /// A batch of subtree mutations was delivered.
    Mutated,
    /// The min-width media query changed.
    WidthChanged {
        /// Whether the query matches after the change.
        matches: bool,
    },
}

impl From<VisibilityEntry> for Event<ElementId> {
    fn from(entry: VisibilityEntry) -> Self {
        if entry.is_intersecting {
            Self::Visible(entry.element)
        } else {
            Self::Hidden(entry.element)
        }
    }
}

/// Startup outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The page never opted in; the coordinator does nothing.
    Dormant,
    /// A required capability is missing; animations are revealed as static
    /// content and the coordinator does nothing further.
    Unsupported,
    /// The coordinator is processing events (the gate may still be closed).
    Active,
}

/// Counters for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinatorStats {
    /// Scans executed, including ones that found nothing.
    pub scans: usize,
    /// Elements prepared across all scans.
    pub prepared: usize,
    /// Observer totals.
    pub observer: ObserverStats,
}

/// Observer and watcher, created on first enable and kept for the page's
/// lifetime.
#[derive(Debug)]
struct Session {
    observer: ViewportObserver,
    watcher: MutationWatcher,
}

/// Owns the host and all subsystem state.
#[derive(Debug)]
pub struct Coordinator<H: Host> {
    host: H,
    options: Options,
    status: Status,
    gate: ResponsiveGate,
    session: Option<Session>,
    /// Start the watcher on `Loaded`; only set when enabled at startup.
    watch_on_load: bool,
    reenable_scan_at: Option<Instant>,
    scans: usize,
    prepared: usize,
}

impl<H: Host> Coordinator<H> {
    /// Evaluate capabilities and the responsive gate, then run the first
    /// scan if enabled.
    #[must_use]
    pub fn start(host: H, options: Options, capabilities: Capabilities) -> Self {
        let mut coordinator = Self {
            host,
            options,
            status: Status::Active,
            gate: ResponsiveGate::new(0, false, false),
            session: None,
            watch_on_load: false,
            reenable_scan_at: None,
            scans: 0,
            prepared: 0,
        };

        let enabled_class = coordinator.options.markers.enabled_class.clone();
        if !coordinator.host.root_has_class(&enabled_class) {
            log::info!("Scroll animations not enabled for this page");
            coordinator.status = Status::Dormant;
            return coordinator;
        }

        if !capabilities.supports_reveal() {
            log::info!(
                "Viewport or mutation detection unavailable; showing content \
                 without animation"
            );
            coordinator.host.set_root_class(&enabled_class, false);
            coordinator.status = Status::Unsupported;
            return coordinator;
        }

        let gate_opts = &coordinator.options.gate;
        let raw = coordinator
            .host
            .root_style_property(&gate_opts.min_width_property);
        let min_width = gate_opts.resolve_min_width(raw.as_deref());
        let matches = coordinator.host.matches_min_width(min_width);
        coordinator.gate =
            ResponsiveGate::new(min_width, matches, capabilities.media_change);

        if matches {
            log::info!("Scroll animations enabled (min width {min_width}px)");
            coordinator.watch_on_load = true;
            let _ = coordinator.run_scan();
        } else {
            log::info!(
                "Viewport below {min_width}px; scroll animations disabled"
            );
            coordinator.host.set_root_class(&enabled_class, false);
            if !capabilities.media_change {
                log::debug!("Media change events unavailable; gate stays off");
            }
        }
        coordinator
    }

    /// Apply one host notification.
    pub fn handle(&mut self, event: Event<H::Element>, now: Instant) {
        if self.status != Status::Active {
            return;
        }
        match event {
            Event::Loaded => {
                if std::mem::take(&mut self.watch_on_load) {
                    if let Some(session) = &mut self.session {
                        let _ = session.watcher.start(&mut self.host);
                    }
                }
            }
            Event::Visible(element) => {
                if let Some(session) = &mut self.session {
                    let _ = session.observer.on_visible(&mut self.host, &element);
                }
            }
            Event::Hidden(_) => {}
            Event::Mutated => {
                if let Some(session) = &mut self.session {
                    let _ = session.watcher.on_mutation(now);
                }
            }
            Event::WidthChanged { matches } => {
                if let Some(GateTransition::Reenable) =
                    self.gate.on_width_changed(matches)
                {
                    log::info!("Viewport widened; enabling scroll animations");
                    let enabled_class = &self.options.markers.enabled_class;
                    self.host.set_root_class(enabled_class, true);
                    self.reenable_scan_at =
                        Some(now + self.options.timing.reenable_delay());
                }
            }
        }
    }

    /// Run whichever timers are due at `now`. Returns what the resulting
    /// scans prepared.
    pub fn tick(&mut self, now: Instant) -> ScanReport {
        let mut report = ScanReport::default();
        if self.reenable_scan_at.is_some_and(|at| at <= now) {
            self.reenable_scan_at = None;
            report.prepared += self.run_scan().prepared;
        }
        let rescan_due = self
            .session
            .as_mut()
            .is_some_and(|session| session.watcher.take_due(now));
        if rescan_due {
            report.prepared += self.run_scan().prepared;
        }
        report
    }

    /// Earliest pending timer, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let rescan = self
            .session
            .as_ref()
            .and_then(|session| session.watcher.deadline());
        match (self.reenable_scan_at, rescan) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Run a scan now, creating the session on first use.
    pub fn run_scan(&mut self) -> ScanReport {
        let window = self.options.timing.rescan_debounce();
        let activated_class = &self.options.markers.activated_class;
        let session = self.session.get_or_insert_with(|| Session {
            observer: ViewportObserver::new(activated_class),
            watcher: MutationWatcher::new(window),
        });
        let report = scanner::scan(
            &mut self.host,
            &self.options.markers,
            &mut session.observer,
        );
        self.scans += 1;
        self.prepared += report.prepared;
        report
    }

    /// Startup outcome.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Current gate state.
    #[must_use]
    pub const fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    /// The resolved min-width threshold.
    #[must_use]
    pub const fn min_width(&self) -> u32 {
        self.gate.min_width()
    }

    /// Whether width changes can still re-enable the subsystem, i.e.
    /// whether an adapter should register a media-query listener.
    #[must_use]
    pub fn listens_for_width(&self) -> bool {
        self.status == Status::Active && self.gate.is_listening()
    }

    /// Whether the mutation watcher is running.
    #[must_use]
    pub fn is_watching_mutations(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.watcher.is_started())
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> CoordinatorStats {
        CoordinatorStats {
            scans: self.scans,
            prepared: self.prepared,
            observer: self
                .session
                .as_ref()
                .map(|session| session.observer.stats())
                .unwrap_or_default(),
        }
    }

    /// The host.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to drain queued notifications.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
