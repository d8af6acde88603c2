use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

use super::Folder;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FolderNode {
    pub id: String,
    pub name: String,
    /// Recipes directly inside this folder.
    pub recipe_count: usize,
    pub children: Vec<FolderNode>,
}

/// In-memory view of the folder table.
///
/// Every traversal keeps a visited set so a corrupt `parent_id` cycle ends the
/// walk instead of looping forever.
#[derive(Debug, Default, Clone)]
pub struct Hierarchy {
    folders: HashMap<String, Folder>,
    children: HashMap<Option<String>, Vec<String>>,
}

impl Hierarchy {
    pub fn new(folders: Vec<Folder>) -> Self {
        let mut children: HashMap<Option<String>, Vec<String>> = HashMap::new();
        let folders = folders
            .into_iter()
            .map(|f| (f.id.to_owned(), f))
            .collect::<HashMap<_, _>>();

        for folder in folders.values() {
            // Dangling parents are shown at the root.
            let parent = folder
                .parent_id
                .to_owned()
                .filter(|p| folders.contains_key(p));
            children.entry(parent).or_default().push(folder.id.to_owned());
        }

        for ids in children.values_mut() {
            ids.sort_by(|a, b| {
                let a = &folders[a];
                let b = &folders[b];
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.id.cmp(&b.id))
            });
        }

        Self { folders, children }
    }

    pub fn get(&self, id: &str) -> Option<&Folder> {
        self.folders.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.folders.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Direct children, ordered by name.
    pub fn children(&self, parent_id: Option<&str>) -> Vec<&Folder> {
        self.children
            .get(&parent_id.map(str::to_owned))
            .map(|ids| ids.iter().filter_map(|id| self.folders.get(id)).collect())
            .unwrap_or_default()
    }

    /// Breadcrumb from the root down to `id` included. Empty when unknown.
    pub fn path(&self, id: &str) -> Vec<&Folder> {
        let mut path = vec![];
        let mut visited = HashSet::new();
        let mut current = self.folders.get(id);

        while let Some(folder) = current {
            if !visited.insert(folder.id.as_str()) {
                break;
            }

            path.push(folder);
            current = folder
                .parent_id
                .as_deref()
                .and_then(|p| self.folders.get(p));
        }

        path.reverse();
        path
    }

    /// Breadth-first, `id` itself excluded.
    pub fn descendant_ids(&self, id: &str) -> Vec<String> {
        let mut ids = vec![];
        let mut visited = HashSet::from([id.to_owned()]);
        let mut queue = VecDeque::from([id.to_owned()]);

        while let Some(current) = queue.pop_front() {
            let Some(children) = self.children.get(&Some(current)) else {
                continue;
            };

            for child in children {
                if visited.insert(child.to_owned()) {
                    ids.push(child.to_owned());
                    queue.push_back(child.to_owned());
                }
            }
        }

        ids
    }

    /// True when `candidate` is `id` or sits somewhere below it.
    pub fn is_within(&self, candidate: &str, id: &str) -> bool {
        self.path(candidate).iter().any(|f| f.id == id)
    }

    pub fn tree(&self, recipe_counts: &HashMap<String, usize>) -> Vec<FolderNode> {
        let mut visited = HashSet::new();

        self.build_nodes(None, recipe_counts, &mut visited)
    }

    fn build_nodes(
        &self,
        parent_id: Option<&str>,
        recipe_counts: &HashMap<String, usize>,
        visited: &mut HashSet<String>,
    ) -> Vec<FolderNode> {
        let mut nodes = vec![];

        for folder in self.children(parent_id) {
            if !visited.insert(folder.id.to_owned()) {
                continue;
            }

            nodes.push(FolderNode {
                id: folder.id.to_owned(),
                name: folder.name.to_owned(),
                recipe_count: recipe_counts.get(&folder.id).copied().unwrap_or_default(),
                children: self.build_nodes(Some(&folder.id), recipe_counts, visited),
            });
        }

        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: &str, parent: Option<&str>, name: &str) -> Folder {
        Folder {
            id: id.to_owned(),
            parent_id: parent.map(str::to_owned),
            name: name.to_owned(),
            created_at: 0,
        }
    }

    fn sample() -> Hierarchy {
        Hierarchy::new(vec![
            folder("desserts", None, "Desserts"),
            folder("cakes", Some("desserts"), "Cakes"),
            folder("chocolate", Some("cakes"), "Chocolate"),
            folder("pies", Some("desserts"), "pies"),
            folder("mains", None, "Mains"),
        ])
    }

    #[test]
    fn test_children_sorted_case_insensitive() {
        let hierarchy = sample();

        let roots = hierarchy
            .children(None)
            .iter()
            .map(|f| f.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(roots, vec!["desserts", "mains"]);

        let desserts = hierarchy
            .children(Some("desserts"))
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(desserts, vec!["Cakes", "pies"]);
    }

    #[test]
    fn test_path_is_root_first() {
        let hierarchy = sample();
        let path = hierarchy
            .path("chocolate")
            .iter()
            .map(|f| f.id.as_str())
            .collect::<Vec<_>>();

        assert_eq!(path, vec!["desserts", "cakes", "chocolate"]);
        assert!(hierarchy.path("unknown").is_empty());
    }

    #[test]
    fn test_descendants_breadth_first() {
        let hierarchy = sample();

        assert_eq!(
            hierarchy.descendant_ids("desserts"),
            vec!["cakes", "pies", "chocolate"]
        );
        assert!(hierarchy.descendant_ids("mains").is_empty());
    }

    #[test]
    fn test_is_within() {
        let hierarchy = sample();

        assert!(hierarchy.is_within("chocolate", "desserts"));
        assert!(hierarchy.is_within("desserts", "desserts"));
        assert!(!hierarchy.is_within("desserts", "chocolate"));
        assert!(!hierarchy.is_within("mains", "desserts"));
    }

    #[test]
    fn test_tree_counts() {
        let hierarchy = sample();
        let counts = HashMap::from([("cakes".to_owned(), 3), ("mains".to_owned(), 1)]);
        let tree = hierarchy.tree(&counts);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "Desserts");
        assert_eq!(tree[0].recipe_count, 0);
        assert_eq!(tree[0].children[0].recipe_count, 3);
        assert_eq!(tree[0].children[0].children[0].id, "chocolate");
        assert_eq!(tree[1].recipe_count, 1);
    }

    #[test]
    fn test_corrupt_cycle_terminates() {
        let hierarchy = Hierarchy::new(vec![
            folder("a", Some("b"), "A"),
            folder("b", Some("a"), "B"),
        ]);

        assert_eq!(hierarchy.path("a").len(), 2);
        assert_eq!(hierarchy.descendant_ids("a"), vec!["b"]);
        assert!(hierarchy.tree(&HashMap::new()).is_empty());
    }

    #[test]
    fn test_dangling_parent_lands_at_root() {
        let hierarchy = Hierarchy::new(vec![folder("orphan", Some("gone"), "Orphan")]);

        assert_eq!(hierarchy.children(None).len(), 1);
    }
}
