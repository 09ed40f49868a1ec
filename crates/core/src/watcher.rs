use crate::{Mutation, Node};

/// Scans structural-change batches for the element whose appearance means the
/// application has finished loading.
#[derive(Debug, Clone)]
pub struct MountWatcher {
    mount_tag: String,
}

impl MountWatcher {
    pub fn new(mount_tag: impl Into<String>) -> Self {
        Self {
            mount_tag: mount_tag.into(),
        }
    }

    /// Whether a node is the mount point. Only element nodes have a tag to
    /// compare; DOM tag names are reported uppercase, so the comparison is
    /// case-insensitive.
    pub fn is_mount_point(&self, node: &Node) -> bool {
        node.tag()
            .is_some_and(|tag| tag.eq_ignore_ascii_case(&self.mount_tag))
    }

    /// Whether any node added in this batch is the mount point.
    pub fn sees_mount(&self, mutations: &[Mutation]) -> bool {
        mutations
            .iter()
            .flat_map(|mutation| mutation.added.iter())
            .any(|node| self.is_mount_point(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watcher() -> MountWatcher {
        MountWatcher::new("canvas")
    }

    #[test]
    fn matches_element_tag_regardless_of_case() {
        assert!(watcher().is_mount_point(&Node::element("CANVAS")));
        assert!(watcher().is_mount_point(&Node::element("canvas")));
    }

    #[test]
    fn ignores_other_elements() {
        assert!(!watcher().is_mount_point(&Node::element("DIV")));
    }

    #[test]
    fn non_element_nodes_have_no_tag_to_match() {
        // A text node spelling the tag name is still not a mount point.
        assert!(!watcher().is_mount_point(&Node::text("canvas")));
        assert!(!watcher().is_mount_point(&Node::Comment {
            content: "canvas".to_string(),
        }));
    }

    #[test]
    fn scans_every_added_node_of_every_mutation() {
        let batch = vec![
            Mutation::added(vec![Node::element("STYLE"), Node::text("loading")]),
            Mutation::added(vec![Node::element("DIV"), Node::element("CANVAS")]),
        ];
        assert!(watcher().sees_mount(&batch));
    }

    #[test]
    fn removed_nodes_do_not_count() {
        let batch = vec![Mutation {
            added: vec![],
            removed: vec![Node::element("CANVAS")],
        }];
        assert!(!watcher().sees_mount(&batch));
    }

    #[test]
    fn empty_batch_is_not_a_mount() {
        assert!(!watcher().sees_mount(&[]));
    }
}
