use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub mod dots;
pub mod watcher;

pub use dots::{DotAnimator, MAX_DOT_COUNT};
pub use watcher::MountWatcher;

/// A node reported by a structural-change observer.
///
/// Only the element variant carries a tag, so a tag comparison is impossible
/// without first matching the node kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Element { tag: String },
    Text { content: String },
    Comment { content: String },
}

impl Node {
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element { tag: tag.into() }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Tag name, present only for element nodes.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag } => Some(tag),
            Self::Text { .. } | Self::Comment { .. } => None,
        }
    }
}

/// One child-list change on the observed container.
///
/// Observers deliver these in batches; mount detection only inspects `added`,
/// `removed` is reported for completeness.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mutation {
    pub added: Vec<Node>,
    #[serde(default)]
    pub removed: Vec<Node>,
}

impl Mutation {
    pub fn added(nodes: Vec<Node>) -> Self {
        Self {
            added: nodes,
            removed: vec![],
        }
    }
}

/// The page tree as seen by the loading screen: three elements addressable by
/// id, a text slot to animate, and an overlay to detach.
///
/// Receivers are `&self`; implementations are expected to use interior
/// mutability the way a real document does.
pub trait PageTree {
    fn element_exists(&self, id: &str) -> bool;

    fn set_text(&self, id: &str, text: &str);

    fn remove_element(&self, id: &str);
}

impl<T: PageTree + ?Sized> PageTree for Arc<T> {
    fn element_exists(&self, id: &str) -> bool {
        (**self).element_exists(id)
    }

    fn set_text(&self, id: &str, text: &str) {
        (**self).set_text(id, text)
    }

    fn remove_element(&self, id: &str) {
        (**self).remove_element(id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Container whose child-list changes are observed.
    pub container_id: String,
    /// Overlay detached once the application has mounted.
    pub overlay_id: String,
    /// Label element cycled through the dot animation.
    pub dots_id: String,
    /// Period of the dot animation.
    pub tick_interval: Duration,
    /// Tag whose appearance signals that the application is ready.
    pub mount_tag: String,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            container_id: "body".to_string(),
            overlay_id: "loading-screen".to_string(),
            dots_id: "loading-dots".to_string(),
            tick_interval: Duration::from_millis(1000),
            mount_tag: "canvas".to_string(),
        }
    }
}

impl ScreenConfig {
    pub fn with_tick_interval(mut self, ms: u64) -> Self {
        self.tick_interval = Duration::from_millis(ms);
        self
    }

    pub fn with_mount_tag(mut self, tag: impl Into<String>) -> Self {
        self.mount_tag = tag.into();
        self
    }

    pub fn with_ids(
        mut self,
        container: impl Into<String>,
        overlay: impl Into<String>,
        dots: impl Into<String>,
    ) -> Self {
        self.container_id = container.into();
        self.overlay_id = overlay.into();
        self.dots_id = dots.into();
        self
    }

    /// Short animation period, for demos.
    pub fn fast() -> Self {
        Self::default().with_tick_interval(100)
    }

    pub fn required_ids(&self) -> [&str; 3] {
        [&self.container_id, &self.overlay_id, &self.dots_id]
    }
}

/// The only failure in this component: a required element could not be found
/// when the screen was attached. Everything after attachment is infallible.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScreenError {
    #[error("can't find required loading screen element '#{0}'")]
    MissingElement(String),
}
