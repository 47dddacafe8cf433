//! Counter demo.
//!
//! A bordered panel with three buttons and a popup menu. TAB moves focus,
//! ENTER or a click presses, Ctrl+C quits. Logs go to `counter.log`; set
//! `RUST_LOG=retui=debug` to see focus moves and reconciliation.
//!
//! ```text
//! cargo run --example counter
//! ```

use std::fs::File;
use std::sync::Mutex;

use retui::*;
use tracing_subscriber::EnvFilter;

const STYLES: &str = r##"
[".panel"]
border = 1
border-color = "cyan"
padding = "0 1"
width = 32

["#count"]
font-weight = "bold"
color = "yellow"

[".menu"]
display = "none"
position = "absolute"
z-index = 10
top = 5
left = 4
width = 12
background = "blue"
border = 2

[".menu:open"]
display = "flex"
"##;

fn find_by_class(tree: &Tree, class: &str) -> Option<NodeId> {
    let root = tree.root()?;
    tree.preorder(root)
        .into_iter()
        .find(|id| tree[*id].props().classes().any(|c| c == class))
}

struct Counter;

impl Component for Counter {
    fn name(&self) -> &str {
        "counter"
    }

    fn initial_state(&self, _props: &Props) -> State {
        State::new().with("n", 0)
    }

    fn render(&self, cx: &RenderContext<'_>) -> Child {
        let me = cx.id;
        let n = cx.state.int("n");

        let panel = div()
            .class("panel")
            .child(span().child("Count: ").child(span().id("count").child(n)))
            .child(
                span()
                    .child(button().on_click(move |_, cx| {
                        let n = cx.tree()[me].state().int("n");
                        cx.set_state_of(me, "n", n + 1);
                        Ok(())
                    }).child("+1"))
                    .child(button().on_click(move |_, cx| {
                        cx.set_state_of(me, "n", 0);
                        Ok(())
                    }).child("reset"))
                    .child(button().on_click(|_, cx| {
                        if let Some(menu) = find_by_class(cx.tree(), "menu") {
                            cx.open(menu);
                        }
                        Ok(())
                    }).child("menu")),
            );

        // Shown only while open; a click outside closes it.
        let menu = div()
            .class("menu")
            .on(EventKind::Close, |_, _| {
                tracing::info!("menu closed");
                Ok(())
            })
            .child(button().on_click(|_, cx| {
                cx.exit();
                Ok(())
            }).child("quit"));

        Child::List(vec![panel.into(), menu.into()])
    }

    fn mounted(&self, _cx: &mut StateContext<'_>) {
        tracing::info!("counter mounted");
    }
}

fn main() -> retui::Result<()> {
    let log = File::create("counter.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let mut sheet = Stylesheet::new();
    sheet.add_toml_str(STYLES)?;

    let config = DocumentConfig::default();
    let backend = CrosstermBackend::stdout(&config)?;
    let mut doc = Document::with_options(div().child(component(Counter)), backend, sheet, config)?;
    doc.run()
}
