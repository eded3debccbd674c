//! In-memory tree of groups and items.
//!
//! Groups and items live in plain vectors in display order. Each entry carries
//! a handle generated from a per-catalog counter, so lookups and deletions go
//! by identity rather than by value: two items with identical fields in the
//! same group are still independently addressable.

use crate::types::{GroupHandle, ItemHandle, ProgramGroup, ProgramItem, Theme};
use error::CatalogError;
use log::debug;

pub mod error {
    use crate::types::{GroupHandle, InvalidItem, ItemHandle};
    use thiserror::Error;

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum CatalogError {
        #[error("invalid item: {0}")]
        InvalidItem(#[from] InvalidItem),

        #[error("group not found: {0}")]
        GroupNotFound(GroupHandle),

        #[error("item not found: {0}")]
        ItemNotFound(ItemHandle),
    }

    impl CatalogError {
        /// True for both stale group and stale item handles.
        pub fn is_not_found(&self) -> bool {
            matches!(
                self,
                CatalogError::GroupNotFound(_) | CatalogError::ItemNotFound(_)
            )
        }
    }
}

/// A named, ordered collection of items.
#[derive(Debug, Clone)]
pub struct Group {
    handle: GroupHandle,
    title: String,
    items: Vec<Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    handle: ItemHandle,
    item: ProgramItem,
}

impl Group {
    pub fn handle(&self) -> GroupHandle {
        self.handle
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Items in display order, paired with their handles.
    pub fn items(&self) -> impl ExactSizeIterator<Item = (ItemHandle, &ProgramItem)> + '_ {
        self.items.iter().map(|entry| (entry.handle, &entry.item))
    }

    pub fn item(&self, handle: ItemHandle) -> Option<&ProgramItem> {
        self.position_of(handle).map(|index| &self.items[index].item)
    }

    pub fn item_at(&self, index: usize) -> Option<ItemHandle> {
        self.items.get(index).map(|entry| entry.handle)
    }

    pub fn find_item(&self, title: &str) -> Option<ItemHandle> {
        self.items
            .iter()
            .find(|entry| entry.item.title == title)
            .map(|entry| entry.handle)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Plain copy of the group without handles.
    pub fn to_program_group(&self) -> ProgramGroup {
        ProgramGroup {
            title: self.title.clone(),
            items: self.items.iter().map(|entry| entry.item.clone()).collect(),
        }
    }

    fn position_of(&self, handle: ItemHandle) -> Option<usize> {
        self.items.iter().position(|entry| entry.handle == handle)
    }
}

/// Content equality: handles are ignored.
impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(l, r)| l.item == r.item)
    }
}

impl Eq for Group {}

/// All groups plus the host's presentation preferences.
///
/// The host owns exactly one catalog and passes it to every operation; there
/// is no internal locking.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    theme: Theme,
    layout_state: String,
    groups: Vec<Group>,
    last_id: u64,
}

/// Content equality over theme, layout state and ordered groups.
impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.theme == other.theme
            && self.layout_state == other.layout_state
            && self.groups == other.groups
    }
}

impl Eq for Catalog {}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from plain data, keeping every field as given.
    ///
    /// No validation happens here: items loaded from disk may legally carry
    /// empty titles or commands.
    pub fn from_parts(theme: Theme, layout_state: String, groups: Vec<ProgramGroup>) -> Self {
        let mut catalog = Self {
            theme,
            layout_state,
            ..Self::default()
        };

        for group in groups {
            let handle = GroupHandle(catalog.next_id());
            let items = group
                .items
                .into_iter()
                .map(|item| Entry {
                    handle: ItemHandle(catalog.next_id()),
                    item,
                })
                .collect();
            catalog.groups.push(Group {
                handle,
                title: group.title,
                items,
            });
        }

        catalog
    }

    /// Plain copy of all groups, in order, without handles.
    pub fn to_program_groups(&self) -> Vec<ProgramGroup> {
        self.groups.iter().map(Group::to_program_group).collect()
    }

    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn insert_group(&mut self, title: String) -> GroupHandle {
        let handle = GroupHandle(self.next_id());
        self.groups.push(Group {
            handle,
            title,
            items: Vec::new(),
        });
        handle
    }

    fn group_index(&self, handle: GroupHandle) -> Option<usize> {
        self.groups.iter().position(|group| group.handle == handle)
    }

    /// Returns (group index, item index) for a live item handle.
    fn item_position(&self, handle: ItemHandle) -> Option<(usize, usize)> {
        self.groups
            .iter()
            .enumerate()
            .find_map(|(g, group)| group.position_of(handle).map(|i| (g, i)))
    }
}

/// Read operations.
impl Catalog {
    pub fn groups(&self) -> impl ExactSizeIterator<Item = &Group> + '_ {
        self.groups.iter()
    }

    pub fn group(&self, handle: GroupHandle) -> Option<&Group> {
        self.group_index(handle).map(|index| &self.groups[index])
    }

    pub fn group_at(&self, index: usize) -> Option<GroupHandle> {
        self.groups.get(index).map(|group| group.handle)
    }

    /// First group whose title matches exactly.
    pub fn find_group(&self, title: &str) -> Option<GroupHandle> {
        self.groups
            .iter()
            .find(|group| group.title == title)
            .map(|group| group.handle)
    }

    pub fn item(&self, handle: ItemHandle) -> Option<&ProgramItem> {
        self.item_position(handle)
            .map(|(g, i)| &self.groups[g].items[i].item)
    }

    /// The group currently holding `handle`.
    pub fn group_of(&self, handle: ItemHandle) -> Option<GroupHandle> {
        self.item_position(handle).map(|(g, _)| self.groups[g].handle)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group operations.
impl Catalog {
    /// Appends an empty group. The title is taken verbatim.
    pub fn add_group(&mut self, title: impl Into<String>) -> GroupHandle {
        let handle = self.insert_group(title.into());
        debug!("added {handle}");
        handle
    }

    pub fn rename_group(
        &mut self,
        handle: GroupHandle,
        new_title: impl Into<String>,
    ) -> Result<(), CatalogError> {
        let index = self
            .group_index(handle)
            .ok_or(CatalogError::GroupNotFound(handle))?;
        self.groups[index].title = new_title.into();
        debug!("renamed {handle}");
        Ok(())
    }

    /// Removes the group with all its items and returns it.
    pub fn delete_group(&mut self, handle: GroupHandle) -> Result<Group, CatalogError> {
        let index = self
            .group_index(handle)
            .ok_or(CatalogError::GroupNotFound(handle))?;
        let group = self.groups.remove(index);
        debug!("deleted {handle} with {} items", group.items.len());
        Ok(group)
    }
}

/// Item operations.
impl Catalog {
    /// Validates `item` and appends the trimmed copy to the group.
    pub fn add_item(
        &mut self,
        group: GroupHandle,
        item: ProgramItem,
    ) -> Result<ItemHandle, CatalogError> {
        let index = self
            .group_index(group)
            .ok_or(CatalogError::GroupNotFound(group))?;
        let item = item.validated()?;

        let handle = ItemHandle(self.next_id());
        self.groups[index].items.push(Entry { handle, item });
        debug!("added {handle} to {group}");
        Ok(handle)
    }

    /// Replaces the item's fields in place; the handle stays valid.
    pub fn edit_item(
        &mut self,
        handle: ItemHandle,
        new_fields: ProgramItem,
    ) -> Result<(), CatalogError> {
        let (g, i) = self
            .item_position(handle)
            .ok_or(CatalogError::ItemNotFound(handle))?;
        self.groups[g].items[i].item = new_fields.validated()?;
        debug!("edited {handle}");
        Ok(())
    }

    /// Removes exactly the item behind `handle` and returns it.
    pub fn delete_item(&mut self, handle: ItemHandle) -> Result<ProgramItem, CatalogError> {
        let (g, i) = self
            .item_position(handle)
            .ok_or(CatalogError::ItemNotFound(handle))?;
        let entry = self.groups[g].items.remove(i);
        debug!("deleted {handle}");
        Ok(entry.item)
    }
}

/// Presentation preferences.
impl Catalog {
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Opaque window-layout blob owned by the host.
    pub fn layout_state(&self) -> &str {
        &self.layout_state
    }

    pub fn set_layout_state(&mut self, layout_state: impl Into<String>) {
        self.layout_state = layout_state.into();
    }
}
