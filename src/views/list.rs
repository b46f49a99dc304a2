//! List panel state
//!
//! Holds the items of one resource type, a cursor for navigation
//! and at most one selected item.

use super::Resource;

#[derive(Debug, Clone)]
pub struct ListPanel<R: Resource> {
    pub items: Vec<R>,
    pub cursor: usize,
    selected: Option<u64>,
}

impl<R: Resource> Default for ListPanel<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
            selected: None,
        }
    }
}

impl<R: Resource> ListPanel<R> {
    /// Replace the items after a fetch.
    ///
    /// The selection survives if its id is still present.
    pub fn replace(&mut self, items: Vec<R>) {
        self.items = items;

        if let Some(id) = self.selected {
            if !self.items.iter().any(|i| i.id() == Some(id)) {
                self.selected = None;
            }
        }

        self.cursor = self.cursor.min(self.items.len().saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        if self.cursor < self.items.len().saturating_sub(1) {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn first(&mut self) {
        self.cursor = 0;
    }

    pub fn last(&mut self) {
        self.cursor = self.items.len().saturating_sub(1);
    }

    /// Select the item under the cursor, replacing any previous selection
    pub fn select_cursor(&mut self) -> bool {
        match self.items.get(self.cursor).and_then(|i| i.id()) {
            Some(id) => {
                self.selected = Some(id);
                true
            }
            None => false,
        }
    }

    /// Select by id and move the cursor onto it
    pub fn select_id(&mut self, id: u64) -> bool {
        match self.items.iter().position(|i| i.id() == Some(id)) {
            Some(pos) => {
                self.cursor = pos;
                self.selected = Some(id);
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selected
    }

    pub fn selected(&self) -> Option<&R> {
        let id = self.selected?;
        self.items.iter().find(|i| i.id() == Some(id))
    }

    pub fn is_selected(&self, item: &R) -> bool {
        self.selected.is_some() && item.id() == self.selected
    }
}
