//! Browser adapter: wires the loading screen to the live DOM.
//!
//! Runs once per page load. While the application boots, a `setInterval`
//! callback cycles the dot label; a `MutationObserver` on the page body waits
//! for the canvas element the application mounts into, then stops the timer,
//! removes the overlay and disconnects itself.

use std::cell::Cell;
use std::rc::Rc;

use curtain_core::{
    DotAnimator, MountWatcher, Mutation, Node as TreeNode, PageTree, ScreenConfig,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, MutationObserver, MutationObserverInit, MutationRecord, NodeList, Window,
};

fn report(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

/// `PageTree` over the live document.
#[derive(Clone)]
pub struct DocumentTree {
    document: Document,
}

impl DocumentTree {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl PageTree for DocumentTree {
    fn element_exists(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(element) = self.document.get_element_by_id(id) {
            element.set_text_content(Some(text));
        }
    }

    fn remove_element(&self, id: &str) {
        if let Some(element) = self.document.get_element_by_id(id) {
            element.remove();
        }
    }
}

/// Convert an observer-reported node list into the core node model. The node
/// kind is checked before any tag access; kinds other than element, text and
/// comment carry nothing the watcher cares about and are skipped.
fn collect_nodes(list: &NodeList) -> Vec<TreeNode> {
    let mut nodes = Vec::with_capacity(list.length() as usize);
    for index in 0..list.length() {
        let Some(node) = list.item(index) else {
            continue;
        };
        match node.node_type() {
            web_sys::Node::ELEMENT_NODE => {
                if let Ok(element) = node.dyn_into::<Element>() {
                    nodes.push(TreeNode::Element {
                        tag: element.tag_name(),
                    });
                }
            }
            web_sys::Node::TEXT_NODE => nodes.push(TreeNode::Text {
                content: node.text_content().unwrap_or_default(),
            }),
            web_sys::Node::COMMENT_NODE => nodes.push(TreeNode::Comment {
                content: node.text_content().unwrap_or_default(),
            }),
            _ => {}
        }
    }
    nodes
}

fn record_to_mutation(record: &MutationRecord) -> Mutation {
    Mutation {
        added: collect_nodes(&record.added_nodes()),
        removed: collect_nodes(&record.removed_nodes()),
    }
}

/// Install the loading screen on the current document.
///
/// If any required element is missing, the feature is disabled with a console
/// diagnostic: no timer, no observer, and the rest of page initialization is
/// left undisturbed.
pub fn install(window: &Window, document: &Document) {
    let config = ScreenConfig::default();
    let tree = DocumentTree::new(document.clone());

    let Some(container) = document.get_element_by_id(&config.container_id) else {
        report("curtain: can't find loading screen elements");
        return;
    };
    if !tree.element_exists(&config.overlay_id) || !tree.element_exists(&config.dots_id) {
        report("curtain: can't find loading screen elements");
        return;
    }

    // The tick closure owns the animator; it is only ever called from the
    // page's event loop, never concurrently with the observer callback.
    let mut animator = DotAnimator::new();
    let tick_tree = tree.clone();
    let dots_id = config.dots_id.clone();
    let tick = Closure::<dyn FnMut()>::new(move || {
        animator.render_tick(&tick_tree, &dots_id);
    });

    // Registered after the observer below, so the observer callback closes
    // over a shared slot rather than the handle itself.
    let interval: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let watcher = MountWatcher::new(&config.mount_tag);
    let overlay_id = config.overlay_id.clone();
    let observer_tree = tree.clone();
    let observer_window = window.clone();
    let observer_interval = Rc::clone(&interval);
    let on_mutations = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |records: js_sys::Array, observer: MutationObserver| {
            let batch: Vec<Mutation> = records
                .iter()
                .map(|record| record_to_mutation(record.unchecked_ref::<MutationRecord>()))
                .collect();
            if watcher.sees_mount(&batch) {
                // The application has mounted. Stop the timer, drop the
                // overlay, then disconnect so no further batches arrive.
                if let Some(handle) = observer_interval.take() {
                    observer_window.clear_interval_with_handle(handle);
                }
                observer_tree.remove_element(&overlay_id);
                observer.disconnect();
            }
        },
    );

    let observer = match MutationObserver::new(on_mutations.as_ref().unchecked_ref()) {
        Ok(observer) => observer,
        Err(_) => {
            report("curtain: failed to create mutation observer");
            return;
        }
    };
    on_mutations.forget();

    let options = MutationObserverInit::new();
    options.set_child_list(true);
    // The mount element may appear nested under the container, not only as a
    // direct child.
    options.set_subtree(true);
    if observer.observe_with_options(&container, &options).is_err() {
        report("curtain: failed to observe the page container");
        return;
    }

    let period_ms = i32::try_from(config.tick_interval.as_millis()).unwrap_or(1000);
    match window
        .set_interval_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), period_ms)
    {
        Ok(handle) => interval.set(Some(handle)),
        Err(_) => report("curtain: failed to start the dot animation"),
    }
    // The callbacks live as long as the page; the browser reclaims them with
    // it.
    tick.forget();
}

/// Entry point, called when the wasm module loads. Initialization happens at
/// the content-parsed lifecycle point, exactly once.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        report("curtain: no document to attach to");
        return;
    };

    if document.ready_state() == "loading" {
        // Not parsed yet; defer until the browser says it is.
        let deferred_window = window.clone();
        let deferred_document = document.clone();
        let on_ready = Closure::<dyn FnMut()>::new(move || {
            install(&deferred_window, &deferred_document);
        });
        if document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
            .is_err()
        {
            report("curtain: failed to wait for DOMContentLoaded");
        }
        on_ready.forget();
    } else {
        install(&window, &document);
    }
}
