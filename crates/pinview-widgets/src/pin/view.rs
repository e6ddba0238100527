#![forbid(unsafe_code)]

//! The pin field controller.
//!
//! [`PinView`] owns the [`FieldState`], one [`CellSurface`] per cell and the
//! platform [`Keyboard`]. Every input goes through the transition engine;
//! the controller then mirrors the new state onto the surfaces, runs the
//! requested focus move (now or after a short delay) and notifies listeners.
//!
//! Deferred focus moves are fired from [`PinView::tick`]. Hosts call it from
//! their event loop, using [`PinView::next_deadline`] to decide how long to
//! wait.

use pinview_core::color::PackedRgba;
use pinview_core::event::{Event, KeyCode, MouseEvent};
use pinview_core::geometry::Rect;
use web_time::Instant;

use super::codec::InputMode;
use super::config::{PinConfig, ResourceRef, clamp_length};
use super::layout::CellLayout;
use super::mask;
use super::scheduler::{Due, FOCUS_DELAY, FocusScheduler, KEYBOARD_DELAY, MASKED_FOCUS_DELAY};
use super::state::FieldState;
use super::surface::{CellSurface, Keyboard, SurfaceFactory};
use super::transition::{FieldEvent, FocusSource, Notification, Transition};

type CompletedListener = Box<dyn FnMut(&str, bool)>;
type ChangedListener = Box<dyn FnMut(&str)>;
type WidthListener = Box<dyn FnMut(u16)>;
type ClickListener = Box<dyn FnMut()>;

/// A row of single-character cells that behaves as one text field.
pub struct PinView<F: SurfaceFactory, K: Keyboard> {
    config: PinConfig,
    state: FieldState,
    layout: CellLayout,
    factory: F,
    surfaces: Vec<F::Surface>,
    keyboard: K,
    scheduler: FocusScheduler,
    /// Cell whose surface was last asked to take focus.
    platform_focus: Option<usize>,
    on_completed: Option<CompletedListener>,
    on_changed: Option<ChangedListener>,
    on_width_updated: Option<WidthListener>,
    on_click: Option<ClickListener>,
}

impl<F: SurfaceFactory, K: Keyboard> std::fmt::Debug for PinView<F, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinView")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("layout", &self.layout)
            .field("scheduler", &self.scheduler)
            .field("platform_focus", &self.platform_focus)
            .finish_non_exhaustive()
    }
}

impl<F: SurfaceFactory, K: Keyboard> PinView<F, K> {
    /// Build the row. With `force_keyboard` set, the current cell takes focus
    /// and the keyboard opens once [`KEYBOARD_DELAY`] has passed.
    pub fn new(config: PinConfig, factory: F, keyboard: K) -> Self {
        Self::new_at(config, factory, keyboard, Instant::now())
    }

    /// Build the row with an explicit construction time.
    pub fn new_at(config: PinConfig, factory: F, keyboard: K, now: Instant) -> Self {
        let state = FieldState::new(config.length(), config.mode())
            .with_masked(config.masked())
            .with_cursor_visible(config.cursor_visible());
        let layout = CellLayout::from_config(&config);
        let mut view = Self {
            config,
            state,
            layout,
            factory,
            surfaces: Vec::new(),
            keyboard,
            scheduler: FocusScheduler::new(),
            platform_focus: None,
            on_completed: None,
            on_changed: None,
            on_width_updated: None,
            on_click: None,
        };
        view.build_surfaces();
        if view.config.force_keyboard() {
            view.scheduler
                .schedule_keyboard(now + KEYBOARD_DELAY);
        }
        view
    }

    // --- Listeners ---

    /// Called with `(value, from_user)` when every cell becomes filled.
    pub fn on_value_completed(&mut self, listener: impl FnMut(&str, bool) + 'static) {
        self.on_completed = Some(Box::new(listener));
    }

    /// Called with the new value after every change.
    pub fn on_value_changed(&mut self, listener: impl FnMut(&str) + 'static) {
        self.on_changed = Some(Box::new(listener));
    }

    /// Called with the new scaled cell width when [`fit_to_width`](Self::fit_to_width)
    /// shrinks the cells.
    pub fn on_width_updated(&mut self, listener: impl FnMut(u16) + 'static) {
        self.on_width_updated = Some(Box::new(listener));
    }

    /// Called after [`click`](Self::click) has placed focus.
    pub fn on_click(&mut self, listener: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(listener));
    }

    // --- Value ---

    pub fn value(&self) -> String {
        self.state.value()
    }

    /// Replace the value. In number mode, non-digit input is ignored.
    pub fn set_value(&mut self, value: &str) {
        self.dispatch(FieldEvent::SetValue(value.to_owned()));
    }

    pub fn clear_value(&mut self) {
        self.set_value("");
    }

    // --- Raw cell events ---

    /// Text typed into a cell.
    pub fn char_entered(&mut self, cell: usize, text: &str) -> Transition {
        self.char_entered_at(cell, text, Instant::now())
    }

    /// Text typed into a cell at `now`. A resulting focus advance is
    /// scheduled relative to `now`.
    pub fn char_entered_at(&mut self, cell: usize, text: &str, now: Instant) -> Transition {
        self.dispatch_at(
            FieldEvent::CharEntered {
                cell,
                text: text.to_owned(),
            },
            now,
        )
    }

    /// The platform emptied a cell.
    pub fn cell_cleared(&mut self, cell: usize) -> Transition {
        self.dispatch(FieldEvent::CellCleared { cell })
    }

    /// Delete key in the focused cell.
    pub fn delete_key(&mut self) -> Transition {
        self.dispatch(FieldEvent::DeleteKey)
    }

    /// A cell asked for focus. For [`FocusSource::Touch`] the platform has
    /// already moved focus to that cell.
    pub fn focus_requested(&mut self, cell: usize, source: FocusSource) -> Transition {
        self.route_focus_request(cell, source, source == FocusSource::Touch)
    }

    /// Focus the current cell (or cell 0) and open the keyboard.
    ///
    /// Returns the focused cell, or `None` for a zero-length field.
    pub fn request_entry_focus(&mut self) -> Option<usize> {
        if self.state.is_empty() {
            return None;
        }
        let cell = self.state.focus().unwrap_or(0);
        self.move_platform_focus(cell);
        self.open_keyboard();
        Some(cell)
    }

    /// A click on the row as a whole: focus the first empty cell and open the
    /// keyboard, or focus the last cell when the row is full.
    pub fn click(&mut self) {
        if let Some(empty) = self.state.cells.first_empty() {
            self.route_focus_request(empty, FocusSource::Programmatic, false);
            self.open_keyboard();
        } else if !self.state.is_empty() {
            self.route_focus_request(self.state.len() - 1, FocusSource::Programmatic, false);
        }
        if let Some(listener) = self.on_click.as_mut() {
            listener();
        }
    }

    /// Feed a host input event. Returns `true` if the field consumed it.
    ///
    /// With the cursor visible, the left arrow moves focus back one cell.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        self.handle_event_at(event, Instant::now())
    }

    /// [`handle_event`](Self::handle_event) with an explicit event time.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> bool {
        match event {
            Event::Key(key) if event.is_key_press() => match key.code {
                KeyCode::Char(c) if !key.ctrl() && !key.alt() => {
                    let Some(cell) = self.state.focus() else {
                        return false;
                    };
                    let mut buf = [0u8; 4];
                    self.char_entered_at(cell, c.encode_utf8(&mut buf), now)
                        .rejected
                        .is_none()
                }
                KeyCode::Backspace | KeyCode::Delete => self.delete_key().rejected.is_none(),
                KeyCode::Left => self.focus_previous(),
                KeyCode::Char(_) => false,
            },
            Event::Key(_) => false,
            Event::Mouse(mouse) => self.handle_tap(mouse),
            Event::Paste(paste) => {
                if !self.state.mode().accepts(&paste.text) {
                    return false;
                }
                self.dispatch(FieldEvent::SetValue(paste.text.clone()))
                    .rejected
                    .is_none()
            }
            Event::Focus(true) => self.request_entry_focus().is_some(),
            Event::Focus(false) => {
                self.keyboard.hide();
                false
            }
        }
    }

    fn handle_tap(&mut self, mouse: &MouseEvent) -> bool {
        if !mouse.is_tap() {
            return false;
        }
        match self.layout.hit_test(self.state.len(), mouse.x, mouse.y) {
            Some(cell) => self
                .route_focus_request(cell, FocusSource::Touch, false)
                .rejected
                .is_none(),
            None => false,
        }
    }

    /// Request the cell before the focus.
    fn focus_previous(&mut self) -> bool {
        if !self.state.is_cursor_visible() {
            return false;
        }
        let Some(target) = self.state.focus().and_then(|f| f.checked_sub(1)) else {
            return false;
        };
        self.route_focus_request(target, FocusSource::Programmatic, false)
            .rejected
            .is_none()
    }

    // --- Scheduling ---

    /// Fire deferred work that is due at `now`.
    ///
    /// A deferred focus move only runs if its cell is still in range,
    /// enabled, and the logical focus; anything else means a later event
    /// superseded it.
    pub fn tick(&mut self, now: Instant) {
        for due in self.scheduler.take_due(now) {
            match due {
                Due::Focus(cell) => {
                    let still_valid = self.state.focus() == Some(cell)
                        && self.state.cell(cell).is_some_and(|c| c.is_enabled());
                    if still_valid {
                        pinview_core::trace!(cell, "deferred focus move");
                        self.move_platform_focus(cell);
                    } else {
                        pinview_core::debug!(cell, "stale focus move dropped");
                    }
                }
                Due::OpenKeyboard => {
                    self.request_entry_focus();
                }
            }
        }
    }

    /// Earliest time [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    // --- Configuration ---

    pub fn config(&self) -> &PinConfig {
        &self.config
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn surfaces(&self) -> &[F::Surface] {
        &self.surfaces
    }

    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    pub fn toggle_keyboard(&mut self) {
        self.keyboard.toggle();
    }

    pub fn length(&self) -> usize {
        self.state.len()
    }

    /// Rebuild with `length` empty cells. Negative values clamp to zero.
    pub fn set_length(&mut self, length: i32) {
        let length = clamp_length(length);
        self.config.set_length(length);
        self.dispatch(FieldEvent::Resize(length));
        self.scheduler.cancel_focus();
        self.build_surfaces();
    }

    pub fn cell_width(&self) -> u16 {
        self.config.cell_width()
    }

    pub fn set_cell_width(&mut self, width: u16) {
        self.config.set_cell_width(width);
        self.relayout();
    }

    pub fn cell_height(&self) -> u16 {
        self.config.cell_height()
    }

    pub fn set_cell_height(&mut self, height: u16) {
        self.config.set_cell_height(height);
        self.relayout();
    }

    pub fn cell_spacing(&self) -> u16 {
        self.config.cell_spacing()
    }

    pub fn set_cell_spacing(&mut self, spacing: u16) {
        self.config.set_cell_spacing(spacing);
        self.relayout();
    }

    /// Move the row's top-left corner.
    pub fn set_origin(&mut self, x: u16, y: u16) {
        self.layout = self.layout.with_origin(x, y);
        self.apply_frames();
    }

    /// Frame of cell `index` in scaled host units.
    pub fn cell_rect(&self, index: usize) -> Option<Rect> {
        (index < self.state.len()).then(|| self.layout.cell_rect(index))
    }

    /// Bounding box of the whole row.
    pub fn bounds(&self) -> Rect {
        self.layout.bounds(self.state.len())
    }

    /// Cell under a point.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<usize> {
        self.layout.hit_test(self.state.len(), x, y)
    }

    /// Shrink cells so the row fits in `available`. Returns `true` and
    /// notifies the width listener if the cells were resized.
    pub fn fit_to_width(&mut self, available: u16) -> bool {
        let Some(width) = self.layout.fit_width(self.state.len(), available) else {
            return false;
        };
        self.layout.set_cell_width(width);
        self.apply_frames();
        if let Some(listener) = self.on_width_updated.as_mut() {
            listener(width);
        }
        true
    }

    pub fn is_masked(&self) -> bool {
        self.state.is_masked()
    }

    pub fn set_masked(&mut self, masked: bool) {
        self.config.set_masked(masked);
        self.state.set_masked(masked);
        self.sync_surfaces();
    }

    pub fn mode(&self) -> InputMode {
        self.state.mode()
    }

    /// Switch input mode. The cells are rebuilt empty.
    pub fn set_mode(&mut self, mode: InputMode) {
        self.config.set_mode(mode);
        self.state.set_mode(mode);
        self.scheduler.cancel_focus();
        self.build_surfaces();
    }

    pub fn set_cell_background(&mut self, background: ResourceRef) {
        self.config.set_cell_background(background);
        for surface in &mut self.surfaces {
            surface.set_background(background);
        }
    }

    pub fn hint(&self) -> &str {
        self.config.hint()
    }

    pub fn set_hint(&mut self, hint: impl Into<String>) {
        self.config.set_hint(hint.into());
        for surface in &mut self.surfaces {
            surface.set_hint(self.config.hint());
        }
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.state.is_cursor_visible()
    }

    /// Show or hide the text cursor. A visible cursor lets the user focus any
    /// enabled cell directly.
    pub fn show_cursor(&mut self, visible: bool) {
        self.config.set_cursor_visible(visible);
        self.state.set_cursor_visible(visible);
        for surface in &mut self.surfaces {
            surface.set_cursor_visible(visible);
        }
    }

    pub fn set_cursor_color(&mut self, color: PackedRgba) {
        self.config.cursor_mut().color = Some(color);
        self.apply_cursor_appearance();
    }

    pub fn set_cursor_shape(&mut self, shape: ResourceRef) {
        self.config.cursor_mut().shape = Some(shape);
        self.apply_cursor_appearance();
    }

    pub fn text_size(&self) -> u16 {
        self.config.text_size()
    }

    pub fn set_text_size(&mut self, size: u16) {
        self.config.set_text_size(size);
        let scaled = self.config.scaled(size);
        for surface in &mut self.surfaces {
            surface.set_text_size(scaled);
        }
    }

    pub fn set_text_color(&mut self, color: PackedRgba) {
        self.config.set_text_color(color);
        for surface in &mut self.surfaces {
            surface.set_text_color(color);
        }
    }

    // --- Internals ---

    fn dispatch(&mut self, event: FieldEvent) -> Transition {
        self.dispatch_at(event, Instant::now())
    }

    fn dispatch_at(&mut self, event: FieldEvent, now: Instant) -> Transition {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("pin_event", event = ?event).entered();

        let t = self.state.apply(event);
        if t.rejected.is_some() {
            pinview_core::debug!(reason = ?t.rejected, "pin event ignored");
            return t;
        }

        if let Some(mv) = t.focus_move {
            if mv.deferred {
                let delay = if self.state.is_masked() {
                    MASKED_FOCUS_DELAY
                } else {
                    FOCUS_DELAY
                };
                self.scheduler.schedule_focus(mv.cell, now + delay);
            } else {
                self.scheduler.cancel_focus();
                self.move_platform_focus(mv.cell);
            }
        }

        self.sync_surfaces();
        self.notify(&t);
        t
    }

    /// Run a focus request and leave platform focus on the logical focus,
    /// whether the request was honoured, redirected or rejected.
    fn route_focus_request(
        &mut self,
        cell: usize,
        source: FocusSource,
        platform_focused: bool,
    ) -> Transition {
        if platform_focused && cell < self.surfaces.len() {
            self.platform_focus = Some(cell);
        }
        let t = self.dispatch(FieldEvent::FocusRequested { cell, source });
        if let Some(focus) = self.state.focus()
            && self.platform_focus != Some(focus)
        {
            self.move_platform_focus(focus);
        }
        t
    }

    fn notify(&mut self, t: &Transition) {
        for notification in &t.notifications {
            match notification {
                Notification::ValueChanged(value) => {
                    if let Some(listener) = self.on_changed.as_mut() {
                        listener(value);
                    }
                }
                Notification::Completed { value, from_user } => {
                    pinview_core::debug!(len = value.len(), from_user, "pin completed");
                    if let Some(listener) = self.on_completed.as_mut() {
                        listener(value, *from_user);
                    }
                }
            }
        }
    }

    fn move_platform_focus(&mut self, cell: usize) {
        if cell >= self.surfaces.len() {
            return;
        }
        if let Some(prev) = self.platform_focus
            && prev != cell
            && let Some(surface) = self.surfaces.get_mut(prev)
        {
            surface.clear_focus();
        }
        self.surfaces[cell].request_focus();
        self.platform_focus = Some(cell);
    }

    fn open_keyboard(&mut self) {
        if self.config.force_keyboard() {
            self.keyboard.show();
        }
    }

    fn build_surfaces(&mut self) {
        let len = self.state.len();
        self.surfaces = (0..len).map(|i| self.factory.create(i)).collect();
        self.platform_focus = None;

        let scaled_text = self.config.scaled(self.config.text_size());
        let cursor = self.config.cursor();
        for (i, surface) in self.surfaces.iter_mut().enumerate() {
            surface.set_frame(self.layout.cell_rect(i));
            if let Some(background) = self.config.cell_background() {
                surface.set_background(background);
            }
            surface.set_text_size(scaled_text);
            if let Some(color) = self.config.text_color() {
                surface.set_text_color(color);
            }
            surface.set_cursor_visible(self.config.cursor_visible());
            surface.set_cursor_appearance(&cursor);
            surface.set_hint(self.config.hint());
            surface.set_input_kind(self.config.mode());
        }
        self.sync_surfaces();
    }

    fn relayout(&mut self) {
        let origin = self.layout.origin();
        self.layout = CellLayout::from_config(&self.config).with_origin(origin.0, origin.1);
        self.apply_frames();
    }

    fn apply_frames(&mut self) {
        for (i, surface) in self.surfaces.iter_mut().enumerate() {
            surface.set_frame(self.layout.cell_rect(i));
        }
    }

    fn apply_cursor_appearance(&mut self) {
        let cursor = self.config.cursor();
        for surface in &mut self.surfaces {
            surface.set_cursor_appearance(&cursor);
        }
    }

    /// Mirror displayed text and enabled flags onto the surfaces.
    fn sync_surfaces(&mut self) {
        let glyph = self.state.is_masked().then(|| self.config.mask_glyph());
        for (surface, cell) in self.surfaces.iter_mut().zip(self.state.cells()) {
            surface.set_text(&mask::display_text(cell.value(), glyph));
            surface.set_enabled(cell.is_enabled());
        }
    }
}
