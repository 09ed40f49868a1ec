//! Drives the loading screen against a scripted in-memory page: a few
//! uninteresting insertions, then the canvas the application mounts into.

use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use curtain_core::{Mutation, PageTree, ScreenConfig};
use curtain_screen::{ChannelSource, LoadingScreen};

struct ScriptedPage {
    elements: Mutex<HashSet<String>>,
    labels: Mutex<HashMap<String, String>>,
}

impl ScriptedPage {
    fn new(ids: &[&str]) -> Self {
        Self {
            elements: Mutex::new(ids.iter().map(|id| (*id).to_string()).collect()),
            labels: Mutex::new(HashMap::new()),
        }
    }

    fn has(&self, id: &str) -> bool {
        self.elements.lock().unwrap().contains(id)
    }
}

impl PageTree for ScriptedPage {
    fn element_exists(&self, id: &str) -> bool {
        self.has(id)
    }

    fn set_text(&self, id: &str, text: &str) {
        self.labels
            .lock()
            .unwrap()
            .insert(id.to_string(), text.to_string());
        tracing::info!(id, text, "label updated");
    }

    fn remove_element(&self, id: &str) {
        self.elements.lock().unwrap().remove(id);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let page = Arc::new(ScriptedPage::new(&["body", "loading-screen", "loading-dots"]));
    let screen = LoadingScreen::attach(Arc::clone(&page), ScreenConfig::fast())?;

    // The page timeline, as the data an observer would report.
    let timeline: Vec<Mutation> = serde_json::from_value(serde_json::json!([
        { "added": [{ "kind": "element", "tag": "STYLE" }] },
        { "added": [{ "kind": "text", "content": "compiling shaders" }] },
        { "added": [{ "kind": "element", "tag": "DIV" }, { "kind": "element", "tag": "CANVAS" }] }
    ]))?;

    let (tx, source) = ChannelSource::channel(8);
    tokio::spawn(async move {
        for mutation in timeline {
            tokio::time::sleep(Duration::from_millis(350)).await;
            if tx.send(vec![mutation]).await.is_err() {
                break;
            }
        }
    });

    let outcome = screen.run(source).await;
    tracing::info!(
        ?outcome,
        overlay_present = page.has("loading-screen"),
        "demo finished"
    );
    Ok(())
}
