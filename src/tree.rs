//! Tree Utilities
//!
//! Turns flat parent-linked rows into a forest, and a forest back into
//! indented display rows.

use crate::models::{Record, RecordId, TreeNode};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap, HashSet};

/// How to read the hierarchy out of flat records
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSpec {
    /// Parent value that marks a root row
    pub root_parent_id: RecordId,
    /// Field holding the parent reference
    pub parent_key: String,
    /// Optional integer field ordering siblings
    pub sort_key: Option<String>,
}

impl TreeSpec {
    pub fn new(root_parent_id: RecordId, parent_key: impl Into<String>) -> Self {
        Self {
            root_parent_id,
            parent_key: parent_key.into(),
            sort_key: None,
        }
    }

    pub fn sorted_by(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self
    }
}

/// Build a forest from flat records, keeping input order among siblings.
///
/// Rows whose parent does not exist are dropped.
pub fn build_tree(records: &[Record], root_parent_id: RecordId, parent_key: &str) -> Vec<TreeNode> {
    build_tree_by(records, &TreeSpec::new(root_parent_id, parent_key))
}

/// Same as [`build_tree`], with optional sibling ordering from `spec`
pub fn build_tree_by(records: &[Record], spec: &TreeSpec) -> Vec<TreeNode> {
    // Build parent -> children map
    let mut children_map: HashMap<RecordId, Vec<&Record>> = HashMap::new();
    for record in records {
        if let Some(parent) = parent_of(record, spec) {
            children_map.entry(parent).or_default().push(record);
        }
    }

    // Stable, so ties keep input order; rows without the key go last
    if let Some(key) = &spec.sort_key {
        for children in children_map.values_mut() {
            children.sort_by_key(|r| r.int_field(key).unwrap_or(i64::MAX));
        }
    }

    let mut path = HashSet::from([spec.root_parent_id]);
    expand(spec.root_parent_id, &children_map, &mut path)
}

/// Missing or null parent means root; anything non-integral is unlinkable
fn parent_of(record: &Record, spec: &TreeSpec) -> Option<RecordId> {
    match record.get(&spec.parent_key) {
        None | Some(Value::Null) => Some(spec.root_parent_id),
        Some(_) => record.int_field(&spec.parent_key),
    }
}

fn expand(
    parent_id: RecordId,
    children_map: &HashMap<RecordId, Vec<&Record>>,
    path: &mut HashSet<RecordId>,
) -> Vec<TreeNode> {
    let Some(children) = children_map.get(&parent_id) else {
        return Vec::new();
    };

    let mut nodes = Vec::with_capacity(children.len());
    for record in children {
        let grandchildren = match record.id() {
            // Revisiting an id on the current path would never terminate
            Some(id) if path.contains(&id) => continue,
            Some(id) => {
                path.insert(id);
                let nested = expand(id, children_map, path);
                path.remove(&id);
                nested
            }
            None => Vec::new(),
        };
        nodes.push(TreeNode {
            record: (*record).clone(),
            children: grandchildren,
        });
    }
    nodes
}

/// A forest row ready for an indented table
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub record: Record,
    pub depth: usize,
    pub has_children: bool,
}

/// Render a forest as rows in display order (DFS).
/// Descendants of collapsed ids are skipped.
pub fn flatten_tree(forest: &[TreeNode], collapsed: &BTreeSet<RecordId>) -> Vec<TreeRow> {
    fn collect(
        nodes: &[TreeNode],
        depth: usize,
        collapsed: &BTreeSet<RecordId>,
        result: &mut Vec<TreeRow>,
    ) {
        for node in nodes {
            result.push(TreeRow {
                record: node.record.clone(),
                depth,
                has_children: !node.children.is_empty(),
            });
            let is_collapsed = node.id().is_some_and(|id| collapsed.contains(&id));
            if !is_collapsed {
                collect(&node.children, depth + 1, collapsed, result);
            }
        }
    }

    let mut result = Vec::new();
    collect(forest, 0, collapsed, &mut result);
    result
}

/// Ids of every node in the forest, parents before children
pub fn collect_ids(forest: &[TreeNode]) -> Vec<RecordId> {
    let mut ids = Vec::new();
    let mut stack: Vec<&TreeNode> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if let Some(id) = node.id() {
            ids.push(id);
        }
        stack.extend(node.children.iter().rev());
    }
    ids
}

/// `id` followed by all of its descendants; empty when `id` is not in the forest
pub fn subtree_ids(forest: &[TreeNode], id: RecordId) -> Vec<RecordId> {
    fn find(nodes: &[TreeNode], id: RecordId) -> Option<&TreeNode> {
        nodes
            .iter()
            .find_map(|node| if node.id() == Some(id) { Some(node) } else { find(&node.children, id) })
    }

    find(forest, id)
        .map(|node| collect_ids(std::slice::from_ref(node)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_record(id: i64, parent_id: i64) -> Record {
        Record::new().with("id", id).with("parent_id", parent_id)
    }

    fn ids(nodes: &[TreeNode]) -> Vec<i64> {
        nodes.iter().filter_map(TreeNode::id).collect()
    }

    #[test]
    fn test_build_tree_drops_orphans() {
        let records = vec![make_record(1, 0), make_record(2, 1), make_record(3, 99)];

        let forest = build_tree(&records, 0, "parent_id");

        let value = serde_json::to_value(&forest).unwrap();
        assert_eq!(
            value,
            json!([{"id": 1, "parent_id": 0, "children": [
                {"id": 2, "parent_id": 1, "children": []}
            ]}])
        );
        assert!(!collect_ids(&forest).contains(&3));
    }

    #[test]
    fn test_build_tree_empty_input() {
        assert!(build_tree(&[], 0, "parent_id").is_empty());
    }

    #[test]
    fn test_build_tree_root_only_input() {
        let records: Vec<Record> = (1..=4).map(|id| make_record(id, 0)).collect();

        let forest = build_tree(&records, 0, "parent_id");

        assert_eq!(forest.len(), 4);
        assert!(forest.iter().all(|node| node.depth() == 1));
        assert_eq!(ids(&forest), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_build_tree_keeps_sibling_input_order() {
        // Children listed before their parent, out of id order
        let records = vec![
            make_record(5, 1),
            make_record(3, 1),
            make_record(1, 0),
            make_record(4, 1),
            make_record(2, 0),
            make_record(6, 3),
        ];

        let forest = build_tree(&records, 0, "parent_id");

        assert_eq!(ids(&forest), vec![1, 2]);
        assert_eq!(ids(&forest[0].children), vec![5, 3, 4]);
        assert_eq!(ids(&forest[0].children[1].children), vec![6]);
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn test_build_tree_children_point_at_parent() {
        let records = vec![
            make_record(1, 0),
            make_record(2, 1),
            make_record(3, 2),
            make_record(4, 1),
            make_record(5, 0),
        ];

        fn check(nodes: &[TreeNode], parent: i64) {
            for node in nodes {
                assert_eq!(node.record.int_field("parent_id"), Some(parent));
                check(&node.children, node.id().unwrap());
            }
        }

        check(&build_tree(&records, 0, "parent_id"), 0);
    }

    #[test]
    fn test_build_tree_is_idempotent() {
        let records = vec![make_record(1, 0), make_record(2, 1), make_record(3, 1), make_record(4, 7)];

        assert_eq!(build_tree(&records, 0, "parent_id"), build_tree(&records, 0, "parent_id"));
    }

    #[test]
    fn test_build_tree_missing_or_null_parent_is_root() {
        let records = vec![
            Record::new().with("id", 1),
            Record::new().with("id", 2).with("parent_id", Value::Null),
            make_record(3, 1),
        ];

        let forest = build_tree(&records, 0, "parent_id");

        assert_eq!(ids(&forest), vec![1, 2]);
        assert_eq!(ids(&forest[0].children), vec![3]);
    }

    #[test]
    fn test_build_tree_custom_parent_key_and_sentinel() {
        let records = vec![
            Record::new().with("id", 10).with("pid", -1),
            Record::new().with("id", 11).with("pid", 10),
        ];

        let forest = build_tree(&records, -1, "pid");

        assert_eq!(ids(&forest), vec![10]);
        assert_eq!(ids(&forest[0].children), vec![11]);
    }

    #[test]
    fn test_build_tree_duplicate_id_cycle_terminates() {
        // Second row claims to be its own child through a duplicate id
        let records = vec![make_record(1, 0), make_record(1, 1), make_record(2, 1)];

        let forest = build_tree(&records, 0, "parent_id");

        assert_eq!(ids(&forest), vec![1]);
        assert_eq!(ids(&forest[0].children), vec![2]);
    }

    #[test]
    fn test_build_tree_sorted_by_key_is_stable() {
        let records = vec![
            make_record(1, 0).with("order_num", 2),
            make_record(2, 0).with("order_num", 1),
            make_record(3, 0).with("order_num", 2),
            make_record(4, 0),
        ];

        let spec = TreeSpec::new(0, "parent_id").sorted_by("order_num");
        let forest = build_tree_by(&records, &spec);

        assert_eq!(ids(&forest), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_flatten_tree() {
        let records = vec![
            make_record(1, 0), // Root 1
            make_record(2, 0), // Root 2
            make_record(3, 1), // Child of 1
            make_record(4, 1), // Child of 1
            make_record(5, 3), // Child of 3 (grandchild of 1)
        ];
        let forest = build_tree(&records, 0, "parent_id");

        let rows = flatten_tree(&forest, &BTreeSet::new());

        // Should be: 1 (depth 0), 3 (depth 1), 5 (depth 2), 4 (depth 1), 2 (depth 0)
        let shape: Vec<(i64, usize)> = rows.iter().map(|r| (r.record.id().unwrap(), r.depth)).collect();
        assert_eq!(shape, vec![(1, 0), (3, 1), (5, 2), (4, 1), (2, 0)]);
        assert!(rows[0].has_children);
        assert!(!rows[4].has_children);

        let collapsed = BTreeSet::from([3]);
        let rows = flatten_tree(&forest, &collapsed);
        let shown: Vec<i64> = rows.iter().filter_map(|r| r.record.id()).collect();
        assert_eq!(shown, vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_collect_ids_preorder() {
        let records = vec![make_record(1, 0), make_record(2, 1), make_record(3, 0)];
        let forest = build_tree(&records, 0, "parent_id");

        assert_eq!(collect_ids(&forest), vec![1, 2, 3]);
    }

    #[test]
    fn test_subtree_ids() {
        let records = vec![make_record(1, 0), make_record(2, 1), make_record(4, 2), make_record(3, 0)];
        let forest = build_tree(&records, 0, "parent_id");

        assert_eq!(subtree_ids(&forest, 2), vec![2, 4]);
        assert_eq!(subtree_ids(&forest, 3), vec![3]);
        assert!(subtree_ids(&forest, 9).is_empty());
    }
}
