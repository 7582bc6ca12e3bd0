//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the voidgate engine and
//! the Zellij plugin system. It owns the wall clock, the render surface and
//! the network; the engine owns everything else.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, build and start the engine
//! 2. **Subscribe**: Key, Mouse, Timer, `WebRequestResult`, `PermissionRequestResult`
//! 3. **Update**: Translate the Zellij event, stamp it with the elapsed time,
//!    apply the resulting actions and re-arm the wake-up timer
//! 4. **Render**: Lay out the active view through [`TerminalSurface`]
//!
//! # Event Mapping
//!
//! - `Key(Char)` → `Event::Key`
//! - `Key(Backspace)` / `Key(Enter)` → `Event::Backspace` / `Event::Enter`
//! - `Mouse::LeftClick` → `Event::Click` on the hit-tested target
//! - `Mouse::RightClick` → the same click with the modifier held
//! - `Mouse::Hover` → `Event::PointerMove`, plus leave/enter when the target changes
//! - `Timer` → `Event::Tick`
//! - `WebRequestResult` → `Event::SubmissionCompleted`
//!
//! Until `WebAccess` is granted, submissions are answered locally with a
//! transport failure, so the visitor still moves on.

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;
use zellij_tile::prelude::*;

use voidgate::app::Millis;
use voidgate::domain::Target;
use voidgate::submission::{SubmissionOutcome, SubmissionReply, SubmissionRequest};
use voidgate::ui::{present, TerminalSurface};
use voidgate::{handle_event, Action, Config, Engine, Event};

register_plugin!(State);

/// Context key carrying the submission id through `web_request`.
const REQUEST_ID_KEY: &str = "request_id";

/// Answer to the `WebAccess` permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WebAccess {
    Unanswered,
    Granted,
    Denied,
}

struct State {
    engine: Option<Engine>,
    surface: TerminalSurface,
    submit_url: String,
    started_at: Instant,
    /// Deadline the pending `set_timeout` will wake us at.
    armed_for: Option<Millis>,
    hovered: Option<Target>,
    web_access: WebAccess,
}

impl Default for State {
    fn default() -> Self {
        Self {
            engine: None,
            surface: TerminalSurface::new(voidgate::Theme::default()),
            submit_url: voidgate::DEFAULT_SUBMIT_URL.to_string(),
            started_at: Instant::now(),
            armed_for: None,
            hovered: None,
            web_access: WebAccess::Unanswered,
        }
    }
}

impl ZellijPlugin for State {
    /// Requests `WebAccess` for email submissions. Everything else the
    /// plugin does stays inside its own pane.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        voidgate::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(submit_url = %config.submit_url, seeded = config.seed.is_some(), "parsed configuration");
        self.surface = TerminalSurface::new(config.theme());
        self.submit_url.clone_from(&config.submit_url);
        self.started_at = Instant::now();

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        match voidgate::initialize(&config) {
            Ok(mut engine) => {
                let actions = engine.start(0);
                self.engine = Some(engine);
                let follow_ups = self.execute(&actions);
                self.drive(0, follow_ups);
                tracing::debug!("plugin load complete");
            }
            Err(e) => tracing::error!(error = %e, "failed to build engine"),
        }
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let now = self.elapsed();
        let events = match event {
            zellij_tile::prelude::Event::Key(ref key) => Self::map_key_event(key).into_iter().collect(),
            zellij_tile::prelude::Event::Mouse(mouse) => self.map_mouse_event(mouse),
            zellij_tile::prelude::Event::Timer(_) => {
                self.armed_for = None;
                vec![Event::Tick]
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Self::map_web_result(status, &body, &context).into_iter().collect()
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                self.web_access = match status {
                    PermissionStatus::Granted => WebAccess::Granted,
                    PermissionStatus::Denied => WebAccess::Denied,
                };
                tracing::info!(web_access = ?self.web_access, "permission answered");
                return false;
            }
            _ => return false,
        };

        self.drive(now, events)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        if let Some(engine) = self.engine.as_ref() {
            print!("{}", self.surface.render(engine.registry(), rows, cols));
        }
    }
}

impl State {
    fn elapsed(&self) -> Millis {
        Millis::try_from(self.started_at.elapsed().as_millis()).unwrap_or(Millis::MAX)
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Feeds `events` to the engine, applying actions as they come. Replies
    /// the host produces on the spot are fed back in the same pass.
    fn drive(&mut self, now: Millis, events: impl IntoIterator<Item = Event>) -> bool {
        let mut queue: VecDeque<Event> = events.into_iter().collect();
        let mut should_render = false;
        while let Some(event) = queue.pop_front() {
            let Some(engine) = self.engine.as_mut() else {
                return false;
            };
            let (render, actions) = handle_event(engine, now, &event);
            for fault in engine.take_faults() {
                tracing::debug!(fault = %fault, "handler fault drained");
            }
            queue.extend(self.execute(&actions));
            should_render |= render;
        }
        self.arm_timer(now);
        should_render
    }

    fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) || key.has_modifiers(&[KeyModifier::Alt]) {
            return None;
        }
        match key.bare_key {
            BareKey::Char(c) => Some(Event::Key(c)),
            BareKey::Backspace => Some(Event::Backspace),
            BareKey::Enter => Some(Event::Enter),
            _ => None,
        }
    }

    /// Terminals report no modifier state on mouse events, so a right click
    /// stands in for a shift-click.
    fn map_mouse_event(&mut self, mouse: Mouse) -> Vec<Event> {
        let target_at = |surface: &TerminalSurface, line: isize, col: usize| {
            usize::try_from(line).ok().and_then(|row| surface.hit_test(row, col))
        };

        match mouse {
            Mouse::LeftClick(line, col) => vec![Event::Click {
                target: target_at(&self.surface, line, col),
                modifier: false,
            }],
            Mouse::RightClick(line, col) => vec![Event::Click {
                target: target_at(&self.surface, line, col),
                modifier: true,
            }],
            Mouse::Hover(line, col) => {
                let target = target_at(&self.surface, line, col);
                let mut events = vec![Event::PointerMove];
                if target != self.hovered {
                    events.extend(self.hovered.map(Event::PointerLeave));
                    events.extend(target.map(Event::PointerEnter));
                    self.hovered = target;
                }
                events
            }
            _ => Vec::new(),
        }
    }

    fn map_web_result(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(request_id) = context.get(REQUEST_ID_KEY).and_then(|id| id.parse().ok()) else {
            tracing::debug!("web request result without a submission id");
            return None;
        };
        let outcome = SubmissionOutcome::from_http(Some(status), body);
        tracing::debug!(request_id, status, outcome = ?outcome, "submission reply");
        Some(Event::SubmissionCompleted(SubmissionReply { request_id, outcome }))
    }

    /// Applies `actions` and returns the events they produced locally.
    fn execute(&mut self, actions: &[Action]) -> Vec<Event> {
        let mut follow_ups = Vec::new();
        for action in actions {
            if let Action::SetTitle(title) = action {
                rename_plugin_pane(get_plugin_ids().plugin_id, title);
            }
            if let Some(request) = present(action, &mut self.surface) {
                follow_ups.extend(self.send(request));
            }
        }
        follow_ups
    }

    /// Issues the HTTP call, or answers at once with a transport failure when
    /// the request cannot leave the plugin. Zellij drops `web_request` calls
    /// without the `WebAccess` permission and never reports back.
    #[tracing::instrument(level = "debug", skip(self, request), fields(request_id = request.request_id))]
    fn send(&self, request: &SubmissionRequest) -> Option<Event> {
        let undelivered = |reason: String| {
            Some(Event::SubmissionCompleted(SubmissionReply::undelivered(request.request_id, reason)))
        };

        if self.web_access != WebAccess::Granted {
            return undelivered(format!("web access {:?}", self.web_access).to_lowercase());
        }
        let body = match request.body() {
            Ok(body) => body,
            Err(e) => return undelivered(format!("failed to serialize submission: {e}")),
        };

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        if let Some(trace) = &request.trace_context {
            headers.insert(
                "traceparent".to_string(),
                format!("00-{}-{}-01", trace.trace_id, trace.parent_span_id),
            );
        }
        let mut context = BTreeMap::new();
        context.insert(REQUEST_ID_KEY.to_string(), request.request_id.to_string());

        web_request(&self.submit_url, HttpVerb::Post, headers, body, context);
        None
    }

    /// Zellij timers cannot be cancelled, so only arm one when the engine
    /// needs waking before whatever is already pending.
    fn arm_timer(&mut self, now: Millis) {
        let Some(deadline) = self.engine.as_ref().and_then(Engine::next_deadline) else {
            return;
        };
        if self.armed_for.is_some_and(|armed| armed <= deadline) {
            return;
        }

        let delay = deadline.saturating_sub(now);
        #[allow(clippy::cast_precision_loss)]
        set_timeout(delay as f64 / 1000.0);
        self.armed_for = Some(deadline);
    }
}
