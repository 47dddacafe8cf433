//! Document - one UI, one loop.
//!
//! A [`Document`] owns the materialized tree, the compiled stylesheet, the
//! focus and open-element references, the two screen buffers and the
//! backend. Each [`tick`](Document::tick) runs the whole pipeline once:
//!
//! ```text
//! materialize -> layout -> paint -> flush -> read input -> dispatch
//! ```
//!
//! Handlers only mutate state. Everything they ask for beyond that (focus
//! moves, change events, exit) is applied here after their dispatch pass,
//! and any re-render waits for the next tick.
//!
//! # Example
//!
//! ```ignore
//! use retui::backend::CrosstermBackend;
//! use retui::pipeline::{Document, DocumentConfig};
//!
//! let config = DocumentConfig::default();
//! let backend = CrosstermBackend::stdout(&config)?;
//! let mut doc = Document::with_options(component(App), backend, Stylesheet::new(), config)?;
//! doc.run()?;
//! ```

use crate::backend::{Backend, CursorPlacement};
use crate::engine::{Element, NodeId, Tree};
use crate::error::Result;
use crate::layout::{self, compute_layout};
use crate::renderer::{Canvas, DiffRenderer, FlushStats};
use crate::state::{
    self, Effects, Event, EventKind, FocusState, KeyCode, MouseButtons, Payload, WHEEL_SCROLL,
    focus_target, next_focus, prev_focus, scroll_chain,
};
use crate::style::{Selector, StyleContext, Stylesheet};

use super::config::DocumentConfig;
use super::paint::{paint_tree, scroll_translation};

/// Materialize passes per frame. `mounted` hooks may dirty their node again;
/// anything still dirty after this waits for the next frame.
const MAX_MATERIALIZE_PASSES: usize = 8;

pub struct Document<B: Backend> {
    tree: Tree,
    sheet: Stylesheet,
    focus: FocusState,
    renderer: DiffRenderer,
    backend: B,
    config: DocumentConfig,
    running: bool,
}

impl<B: Backend> Document<B> {
    /// A document with the base stylesheet and default configuration.
    pub fn new(root: Element, backend: B) -> Result<Self> {
        Self::with_options(root, backend, Stylesheet::new(), DocumentConfig::default())
    }

    /// A document whose stylesheet is the base rules followed by `user`.
    pub fn with_options(
        root: Element,
        backend: B,
        user: Stylesheet,
        config: DocumentConfig,
    ) -> Result<Self> {
        let mut sheet = Stylesheet::with_base()?;
        sheet.extend(user);
        let (width, height) = backend.size()?;
        let mut tree = Tree::new();
        tree.mount_root(root);
        Ok(Self {
            tree,
            sheet,
            focus: FocusState::default(),
            renderer: DiffRenderer::new(width, height),
            backend,
            config,
            running: true,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Direct tree access, for state updates from outside a handler.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.sheet
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused
    }

    pub fn open_element(&self) -> Option<NodeId> {
        self.focus.open
    }

    /// First node in pre-order matching `selector`. Invalid selectors match nothing.
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        StyleContext::new(&self.tree, &self.sheet, self.focus).query(&selector)
    }

    /// Topmost node at cell (x, y) as of the last layout.
    pub fn find_element_at(&self, x: i32, y: i32) -> Option<NodeId> {
        layout::find_element_at(&self.tree, x, y)
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Materialize, lay out, paint and flush one frame.
    pub fn render(&mut self) -> Result<FlushStats> {
        if let Some(root) = self.tree.root() {
            for _ in 0..MAX_MATERIALIZE_PASSES {
                self.tree.materialize(root);
                if !self.tree.any_dirty() {
                    break;
                }
            }
        }
        let removed = self.tree.take_removed();
        if !removed.is_empty() {
            tracing::trace!(count = removed.len(), "nodes dropped");
        }
        self.focus.clear_dropped(&self.tree);

        let (width, height) = self.backend.size()?;
        if self.renderer.size() != (width, height) {
            self.renderer.resize(width, height);
        }
        compute_layout(&mut self.tree, &self.sheet, self.focus, width as i32, height as i32);

        {
            let cx = StyleContext::new(&self.tree, &self.sheet, self.focus);
            let mut canvas = Canvas::new(self.renderer.buffer_mut());
            paint_tree(&cx, &mut canvas);
            canvas.finish();
        }

        let cursor = self.cursor_placement();
        Ok(self.renderer.flush(&mut self.backend, cursor)?)
    }

    /// Content-relative cursor of the focused node, in screen cells.
    fn cursor_placement(&self) -> CursorPlacement {
        let Some(id) = self.focus.focused else {
            return CursorPlacement::Hidden;
        };
        let Some(node) = self.tree.get(id) else {
            return CursorPlacement::Hidden;
        };
        let cx = StyleContext::new(&self.tree, &self.sheet, self.focus);
        let Some((cur_x, cur_y)) = node.props().cursor else {
            return CursorPlacement::Hidden;
        };
        if cx.cursor_hidden(id) {
            return CursorPlacement::Hidden;
        }
        let (dx, dy) = scroll_translation(&self.tree, id);
        let content = node.layout.content;
        let (x, y) = (content.x + cur_x + dx, content.y + cur_y + dy);
        let (w, h) = self.renderer.size();
        if x < 0 || y < 0 || x >= w as i32 || y >= h as i32 {
            return CursorPlacement::Hidden;
        }
        CursorPlacement::At { x: x as u16, y: y as u16 }
    }

    // =========================================================================
    // Loop
    // =========================================================================

    /// Render, block for input, dispatch it. Returns false once the loop
    /// should stop.
    pub fn tick(&mut self) -> Result<bool> {
        if !self.running {
            return Ok(false);
        }
        self.render()?;
        for event in self.backend.read_events()? {
            self.handle_event(event)?;
            if !self.running {
                break;
            }
        }
        Ok(self.running)
    }

    /// Tick until stopped, then restore the terminal. The terminal is
    /// restored on the error path too, before the error is returned.
    pub fn run(&mut self) -> Result<()> {
        let result = loop {
            match self.tick() {
                Ok(true) => {}
                Ok(false) => break Ok(()),
                Err(err) => break Err(err),
            }
        };
        let restored = self.backend.restore();
        result?;
        Ok(restored?)
    }

    /// Stop the loop after the current event.
    pub fn stop(&mut self) {
        tracing::debug!("document stopping");
        self.running = false;
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Route one input event.
    pub fn handle_event(&mut self, mut event: Event) -> Result<()> {
        match event.kind {
            EventKind::Exit => self.stop(),
            EventKind::Resize => {
                if let Payload::Resize { width, height } = event.payload {
                    self.renderer.resize(width, height);
                }
                event.target = self.tree.root();
                self.dispatch(&mut event)?;
            }
            EventKind::KeyPress => self.handle_key(event)?,
            EventKind::Click => self.handle_click(event)?,
            EventKind::MouseDown | EventKind::MouseUp => {
                if let Some((x, y)) = event.position() {
                    event.target = self.find_element_at(x as i32, y as i32);
                    self.dispatch(&mut event)?;
                }
            }
            EventKind::Scroll => self.handle_scroll(event)?,
            _ => self.dispatch(&mut event)?,
        }
        Ok(())
    }

    fn handle_key(&mut self, mut event: Event) -> Result<()> {
        match event.keycode() {
            Some(KeyCode::Ctrl('c')) if self.config.exit_on_ctrl_c => {
                self.stop();
                return Ok(());
            }
            Some(KeyCode::Ctrl('l')) => {
                tracing::debug!("redraw requested");
                self.renderer.invalidate();
                return Ok(());
            }
            Some(KeyCode::Tab) if self.config.tab_focus => return self.focus_next(),
            Some(KeyCode::BackTab) if self.config.tab_focus => return self.focus_prev(),
            _ => {}
        }

        event.target = self.focus.focused.or(self.tree.root());
        self.dispatch(&mut event)?;

        if event.keycode() == Some(KeyCode::Enter) && !event.is_stopped() {
            if let Some(id) = self.focus.focused.filter(|id| self.tree.contains(*id)) {
                let r = self.tree[id].layout();
                let (dx, dy) = scroll_translation(&self.tree, id);
                let (x, y) = ((r.x + dx).max(0) as u16, (r.y + dy).max(0) as u16);
                let mut click = Event::click(MouseButtons::LEFT, x, y).with_target(id);
                self.dispatch(&mut click)?;
            }
        }
        Ok(())
    }

    fn handle_click(&mut self, mut event: Event) -> Result<()> {
        let Some((x, y)) = event.position() else {
            return Ok(());
        };
        let Some(hit) = self.find_element_at(x as i32, y as i32) else {
            return Ok(());
        };
        if let Some(target) = focus_target(&self.tree, hit) {
            self.set_focus(Some(target))?;
        }

        let open_before = self.focus.open;
        event.target = Some(hit);
        self.dispatch(&mut event)?;

        // Close the open element on a click outside it, unless this click
        // changed which element is open.
        if let Some(open) = open_before {
            let inside = self.tree.is_ancestor_or_self(open, hit);
            if self.focus.open == Some(open) && !inside {
                tracing::debug!(%open, "outside click closes open element");
                self.focus.open = None;
                self.dispatch(&mut Event::for_node(EventKind::Close, open))?;
            }
        }
        Ok(())
    }

    fn handle_scroll(&mut self, mut event: Event) -> Result<()> {
        let (Some((x, y)), Payload::Scroll { delta, .. }) = (event.position(), &event.payload) else {
            return Ok(());
        };
        let delta = *delta;
        let Some(hit) = self.find_element_at(x as i32, y as i32) else {
            return Ok(());
        };
        event.target = Some(hit);
        self.dispatch(&mut event)?;
        if !event.is_stopped() {
            if let Some(scrolled) = scroll_chain(&mut self.tree, hit, delta * WHEEL_SCROLL) {
                tracing::trace!(node = %scrolled, delta, "scrolled");
            }
        }
        Ok(())
    }

    /// One dispatch pass, then the effects its handlers queued.
    fn dispatch(&mut self, event: &mut Event) -> Result<()> {
        let mut effects = Effects::new();
        state::dispatch(&mut self.tree, &mut self.focus, &mut effects, event)?;
        self.apply(effects)
    }

    fn apply(&mut self, effects: Effects) -> Result<()> {
        let Effects {
            exit,
            changes,
            focus,
        } = effects;
        if exit {
            self.stop();
        }
        if let Some(target) = focus {
            self.set_focus(target)?;
        }
        for mut change in changes {
            self.dispatch(&mut change)?;
        }
        Ok(())
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Move focus, delivering Blur to the old node and Focus to the new one.
    pub fn focus(&mut self, id: Option<NodeId>) -> Result<()> {
        self.set_focus(id)
    }

    pub fn focus_next(&mut self) -> Result<()> {
        let next = next_focus(&self.tree, self.focus.focused);
        self.set_focus(next)
    }

    pub fn focus_prev(&mut self) -> Result<()> {
        let prev = prev_focus(&self.tree, self.focus.focused);
        self.set_focus(prev)
    }

    fn set_focus(&mut self, next: Option<NodeId>) -> Result<()> {
        let next = next.filter(|id| self.tree.contains(*id));
        let previous = self.focus.focused;
        if previous == next {
            return Ok(());
        }
        tracing::debug!(from = ?previous, to = ?next, "focus moved");
        self.focus.focused = next;
        if let Some(old) = previous.filter(|id| self.tree.contains(*id)) {
            self.dispatch(&mut Event::for_node(EventKind::Blur, old))?;
        }
        if let Some(new) = next {
            self.dispatch(&mut Event::for_node(EventKind::Focus, new))?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TestBackend;
    use crate::engine::{button, div};

    fn doc(root: Element) -> Document<TestBackend> {
        Document::new(root, TestBackend::new(20, 5)).unwrap()
    }

    #[test]
    fn test_exit_event_stops_loop() {
        let mut d = doc(div().child("hi"));
        d.backend_mut().push_events([Event::exit()]);
        assert!(!d.tick().unwrap());
        assert!(!d.is_running());
    }

    #[test]
    fn test_ctrl_c_configurable() {
        let config = DocumentConfig {
            exit_on_ctrl_c: false,
            ..DocumentConfig::default()
        };
        let mut d = Document::with_options(div(), TestBackend::new(4, 1), Stylesheet::new(), config).unwrap();
        d.handle_event(Event::key(KeyCode::Ctrl('c'))).unwrap();
        assert!(d.is_running());

        let mut d = doc(div());
        d.handle_event(Event::key(KeyCode::Ctrl('c'))).unwrap();
        assert!(!d.is_running());
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut d = doc(
            div()
                .child(button().id("a").on_click(|_, _| Ok(())).child("A"))
                .child(button().id("b").on_click(|_, _| Ok(())).child("B")),
        );
        d.render().unwrap();
        let (a, b) = (d.query("#a"), d.query("#b"));
        d.handle_event(Event::key(KeyCode::Tab)).unwrap();
        assert_eq!(d.focused(), a);
        d.handle_event(Event::key(KeyCode::Tab)).unwrap();
        assert_eq!(d.focused(), b);
        d.handle_event(Event::key(KeyCode::Tab)).unwrap();
        assert_eq!(d.focused(), None);
        d.handle_event(Event::key(KeyCode::BackTab)).unwrap();
        assert_eq!(d.focused(), b);
    }

    #[test]
    fn test_cursor_follows_focused_node() {
        let mut d = doc(div().child(
            button().id("field").style("padding", 0).cursor(2, 0).on_keypress(|_, _| Ok(())).child("abc"),
        ));
        d.render().unwrap();
        d.focus(d.query("#field")).unwrap();
        d.backend_mut().take_calls();
        d.render().unwrap();
        assert!(
            d.backend()
                .calls()
                .contains(&crate::backend::BackendCall::Cursor(CursorPlacement::At { x: 2, y: 0 }))
        );
    }

    #[test]
    fn test_query_sees_focus_pseudo() {
        let mut d = doc(div().child(button().id("b").on_click(|_, _| Ok(())).child("B")));
        d.render().unwrap();
        assert_eq!(d.query("button:focus"), None);
        d.focus_next().unwrap();
        assert_eq!(d.query("button:focus"), d.query("#b"));
        assert_eq!(d.query("not a selector!"), None);
    }
}
