// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Depth-first preorder flattening of a plugin tree.
//!
//! A plugin is immediately followed by its own flattened children, before its
//! next sibling. The virtual root never appears in the output.

use sanity_core::{PluginNode, PluginTree};

/// Flatten `tree` into its canonical processing order.
pub fn flatten(tree: &PluginTree) -> Vec<&PluginNode> {
    let mut ordered = Vec::with_capacity(tree.plugin_count());
    for child in &tree.children {
        push_preorder(child, &mut ordered);
    }
    ordered
}

/// Like [`flatten`], but returns owned nodes.
///
/// Each node keeps its `children`, so callers can still walk subtrees.
pub fn flatten_owned(tree: &PluginTree) -> Vec<PluginNode> {
    flatten(tree).into_iter().cloned().collect()
}

fn push_preorder<'a>(node: &'a PluginNode, ordered: &mut Vec<&'a PluginNode>) {
    ordered.push(node);
    for child in &node.children {
        push_preorder(child, ordered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sanity_core::Manifest;
    use std::path::PathBuf;

    fn node(name: &str, children: Vec<PluginNode>) -> PluginNode {
        PluginNode {
            name: name.to_string(),
            install_path: PathBuf::from("/sanity/node_modules").join(name),
            manifest: Manifest {
                plugins: children.iter().map(|c| c.name.clone()).collect(),
                ..Default::default()
            },
            children,
        }
    }

    fn tree(children: Vec<PluginNode>) -> PluginTree {
        PluginTree {
            base_path: PathBuf::from("/sanity"),
            manifest: Manifest::default(),
            children,
        }
    }

    fn names(nodes: &[&PluginNode]) -> Vec<String> {
        nodes.iter().map(|n| n.name.clone()).collect()
    }

    #[test]
    fn empty_tree_flattens_to_nothing() {
        assert!(flatten(&tree(vec![])).is_empty());
    }

    #[test]
    fn parent_is_followed_by_its_subtree() {
        let t = tree(vec![
            node("core", vec![node("layout", vec![node("theme", vec![])])]),
            node("gallery", vec![node("media", vec![])]),
            node("vision", vec![]),
        ]);
        assert_eq!(
            names(&flatten(&t)),
            vec!["core", "layout", "theme", "gallery", "media", "vision"]
        );
    }

    #[test]
    fn owned_nodes_keep_children() {
        let t = tree(vec![node("core", vec![node("layout", vec![])])]);
        let owned = flatten_owned(&t);
        assert_eq!(owned.len(), 2);
        assert_eq!(owned[0].children.len(), 1);
        assert_eq!(owned[1].name, "layout");
    }

    /// Builds a tree with unique node names from a nesting shape.
    fn arb_forest() -> impl Strategy<Value = Vec<PluginNode>> {
        let leaf = Just(Vec::<PluginNode>::new());
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop::collection::vec(inner, 0..4).prop_map(|groups| {
                groups
                    .into_iter()
                    .map(|children| node("n", children))
                    .collect()
            })
        })
    }

    fn rename(nodes: &mut [PluginNode], next: &mut usize) {
        for n in nodes {
            n.name = format!("p{next}");
            *next += 1;
            rename(&mut n.children, next);
        }
    }

    proptest! {
        #[test]
        fn flatten_is_preorder(mut forest in arb_forest()) {
            let mut next = 0;
            rename(&mut forest, &mut next);
            let t = tree(forest);
            let ordered = flatten(&t);

            // Every node appears exactly once, excluding the virtual root.
            prop_assert_eq!(ordered.len(), t.plugin_count());

            // Preorder numbering from `rename` is exactly the flatten order.
            let expected: Vec<String> = (0..next).map(|i| format!("p{i}")).collect();
            prop_assert_eq!(names(&ordered), expected);

            // Each subtree occupies a contiguous run directly after its root.
            for (index, n) in ordered.iter().enumerate() {
                let span = n.subtree_len();
                let run: Vec<&str> = ordered[index + 1..index + span]
                    .iter()
                    .map(|d| d.name.as_str())
                    .collect();
                let mut descendants = Vec::new();
                let mut stack: Vec<&PluginNode> = n.children.iter().rev().collect();
                while let Some(d) = stack.pop() {
                    descendants.push(d.name.as_str());
                    stack.extend(d.children.iter().rev());
                }
                prop_assert_eq!(run, descendants);
            }
        }
    }
}
