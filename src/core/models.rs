use serde::{Deserialize, Serialize};

/// The well-known identifier of the top of the folder hierarchy.
///
/// The root is always rendered with the fixed "all files" label, never with
/// whatever name the server happens to return for it.
pub const ROOT_FOLDER_ID: &str = "0";

/// Returns true for strings that are empty or whitespace only.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/*
 * A single entry in the cloud storage hierarchy, tagged by kind.
 * Every variant carries the server-issued identifier and display name; only
 * folders carry a child listing, and the listing is optional because most
 * responses return folders without their contents. Items are serialized as
 * part of state snapshots, so the shape here is also a persistence schema.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    File {
        id: String,
        name: String,
        shared_link: Option<String>,
    },
    Folder {
        id: String,
        name: String,
        shared_link: Option<String>,
        entries: Option<Vec<Item>>,
    },
    Bookmark {
        id: String,
        name: String,
        shared_link: Option<String>,
    },
}

impl Item {
    /// Creates a folder item carrying only its identifier. Used for entry
    /// points where nothing but the id is known yet.
    pub fn folder_from_id(id: impl Into<String>) -> Self {
        Item::Folder {
            id: id.into(),
            name: String::new(),
            shared_link: None,
            entries: None,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Item::File { id, .. } | Item::Folder { id, .. } | Item::Bookmark { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Item::File { name, .. } | Item::Folder { name, .. } | Item::Bookmark { name, .. } => {
                name
            }
        }
    }

    pub fn shared_link(&self) -> Option<&str> {
        match self {
            Item::File { shared_link, .. }
            | Item::Folder { shared_link, .. }
            | Item::Bookmark { shared_link, .. } => shared_link.as_deref(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Item::Folder { .. })
    }

    pub fn is_root_folder(&self) -> bool {
        self.is_folder() && self.id() == ROOT_FOLDER_ID
    }

    /// The number of child entries, when a listing is present.
    pub fn child_count(&self) -> Option<usize> {
        match self {
            Item::Folder { entries, .. } => entries.as_ref().map(|e| e.len()),
            _ => None,
        }
    }

    pub fn entries(&self) -> &[Item] {
        match self {
            Item::Folder {
                entries: Some(entries),
                ..
            } => entries,
            _ => &[],
        }
    }

    /*
     * Returns a copy of this item with any child listing removed. Folders
     * handed back to the caller of a pick flow are stripped so the result
     * does not carry a large or stale contents snapshot.
     */
    pub fn stripped(&self) -> Item {
        match self {
            Item::Folder {
                id,
                name,
                shared_link,
                entries,
            } => Item::Folder {
                id: id.clone(),
                name: name.clone(),
                shared_link: shared_link.clone(),
                entries: entries.as_ref().map(|_| Vec::new()),
            },
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank("budget"));
    }

    #[test]
    fn test_folder_from_id_has_no_name_or_entries() {
        let folder = Item::folder_from_id("42");
        assert_eq!(folder.id(), "42");
        assert!(folder.name().is_empty());
        assert_eq!(folder.child_count(), None);
        assert!(!folder.is_root_folder());
        assert!(Item::folder_from_id(ROOT_FOLDER_ID).is_root_folder());
    }

    #[test]
    fn test_stripped_empties_folder_entries() {
        let folder = Item::Folder {
            id: "123".into(),
            name: "Reports".into(),
            shared_link: Some("https://example.test/s/abc".into()),
            entries: Some(vec![Item::File {
                id: "9".into(),
                name: "q3.pdf".into(),
                shared_link: None,
            }]),
        };
        let stripped = folder.stripped();
        assert_eq!(stripped.child_count(), Some(0));
        assert_eq!(stripped.id(), "123");
        assert_eq!(stripped.shared_link(), Some("https://example.test/s/abc"));
    }

    #[test]
    fn test_stripped_leaves_files_untouched() {
        let file = Item::File {
            id: "9".into(),
            name: "q3.pdf".into(),
            shared_link: None,
        };
        assert_eq!(file.stripped(), file);
    }

    #[test]
    fn test_item_serde_round_trip() {
        let item = Item::Bookmark {
            id: "b1".into(),
            name: "intranet".into(),
            shared_link: None,
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
