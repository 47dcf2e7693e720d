// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A ready-made list of text rows.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use sightline_model::{Model, VecModel};
use sightline_virtual_list::{FixedExtentModel, SlotChanges};

use crate::{
    DrawCommand, DrawList, ListView, ListViewConfig, ScrollError, StyleCatalog, StyleContext,
    Widget,
};

/// One row of a [`StandardListView`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StandardListViewItem {
    /// Text shown in the row.
    pub text: String,
}

impl StandardListViewItem {
    /// Creates an item showing `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<&str> for StandardListViewItem {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for StandardListViewItem {
    fn from(text: String) -> Self {
        Self { text }
    }
}

/// A list of text rows that owns its items.
///
/// Rows are uniform, with the height and padding of the style the list was built with.
/// Every item edit is synced into the list right away and returns the resulting
/// [`SlotChanges`].
#[derive(Debug)]
pub struct StandardListView {
    items: VecModel<StandardListViewItem>,
    list: ListView<FixedExtentModel>,
    style: StyleContext,
}

impl StandardListView {
    /// Creates an empty list in `style`.
    pub fn new(style: StyleContext) -> Result<Self, ScrollError> {
        Self::with_items(style, [])
    }

    /// Creates a list in `style` showing `items`.
    pub fn with_items(
        style: StyleContext,
        items: impl IntoIterator<Item = StandardListViewItem>,
    ) -> Result<Self, ScrollError> {
        let items: VecModel<StandardListViewItem> = items.into_iter().collect();
        let list = ListView::fixed(&items, ListViewConfig::from_metrics(&style.metrics))?;
        Ok(Self { items, list, style })
    }

    /// Creates an empty list in the style `name` of `catalog`.
    ///
    /// Unknown names fall back to the default style.
    pub fn styled(catalog: &StyleCatalog, name: &str) -> Result<Self, ScrollError> {
        Self::new(catalog.resolve(name))
    }

    /// The items.
    #[must_use]
    pub fn items(&self) -> &VecModel<StandardListViewItem> {
        &self.items
    }

    /// The style rows are laid out and drawn with.
    #[must_use]
    pub fn style(&self) -> &StyleContext {
        &self.style
    }

    /// The underlying list.
    #[must_use]
    pub fn list(&self) -> &ListView<FixedExtentModel> {
        &self.list
    }

    /// The underlying list, for scrolling and resizing.
    pub fn list_mut(&mut self) -> &mut ListView<FixedExtentModel> {
        &mut self.list
    }

    /// Appends an item.
    pub fn push(&mut self, item: impl Into<StandardListViewItem>) -> Result<SlotChanges, ScrollError> {
        self.items.push(item.into());
        self.sync()
    }

    /// Inserts an item before `index`.
    pub fn insert(
        &mut self,
        index: usize,
        item: impl Into<StandardListViewItem>,
    ) -> Result<SlotChanges, ScrollError> {
        self.items.insert(index, item.into())?;
        self.sync()
    }

    /// Removes the item at `index`.
    pub fn remove(&mut self, index: usize) -> Result<SlotChanges, ScrollError> {
        self.items.remove(index)?;
        self.sync()
    }

    /// Replaces the item at `index`; its row is refreshed if it is materialized.
    pub fn set_item(
        &mut self,
        index: usize,
        item: impl Into<StandardListViewItem>,
    ) -> Result<SlotChanges, ScrollError> {
        self.items.set_row_data(index, item.into())?;
        self.sync()
    }

    /// Replaces all items.
    pub fn set_items(
        &mut self,
        items: impl IntoIterator<Item = StandardListViewItem>,
    ) -> Result<SlotChanges, ScrollError> {
        self.items.set_vec(items.into_iter().collect::<Vec<_>>());
        self.sync()
    }

    /// The current item, or `-1`.
    #[must_use]
    pub fn current_item(&self) -> isize {
        self.list.current_item()
    }

    /// Sets the current item, clamped to `[-1, len - 1]`, and scrolls it into view.
    pub fn set_current_item(&mut self, index: isize) -> SlotChanges {
        self.list.set_current_item(index)
    }

    /// Text of the current item.
    #[must_use]
    pub fn current_text(&self) -> Option<&str> {
        let index = self.list.current_index()?;
        self.items.row_data(index).map(|item| item.text.as_str())
    }

    fn sync(&mut self) -> Result<SlotChanges, ScrollError> {
        self.list.sync(&self.items)
    }
}

impl Widget for StandardListView {
    /// Draws the background, then each materialized row with its selection fill and
    /// padded text. `bounds` is the visible window.
    fn render(&self, style: &StyleContext, bounds: Rect, out: &mut DrawList) {
        let padding = self.style.metrics.padding;
        let palette = &style.palette;
        let origin = bounds.origin().to_vec2();
        out.push(DrawCommand::PushClip(bounds));
        out.push(DrawCommand::FillRect {
            rect: bounds,
            color: palette.background,
        });
        let current = self.list.current_index();
        for row in self.list.live_items() {
            let Some(item) = self.items.row_data(row.index) else {
                continue;
            };
            let rect = row.viewport_rect + origin;
            let selected = current == Some(row.index);
            if selected {
                out.push(DrawCommand::FillRect {
                    rect,
                    color: palette.selection,
                });
            }
            out.push(DrawCommand::Text {
                rect: rect - padding,
                text: item.text.clone(),
                color: if selected {
                    palette.selection_foreground
                } else {
                    palette.foreground
                },
            });
        }
        out.push(DrawCommand::PopClip);
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::vec::Vec;

    use kurbo::Rect;
    use sightline_model::Model;

    use super::{StandardListView, StandardListViewItem};
    use crate::{DrawCommand, DrawList, StyleCatalog, StyleContext, Widget};

    fn numbered(count: usize) -> Vec<StandardListViewItem> {
        (0..count)
            .map(|i| StandardListViewItem::new(format!("item {i}")))
            .collect()
    }

    #[test]
    fn row_height_comes_from_the_style() {
        let catalog = StyleCatalog::builtin();
        let mut view = StandardListView::styled(&catalog, "material").unwrap();
        view.set_items(numbered(10)).unwrap();
        assert_eq!(view.list().viewport_height(), 480.0);

        let fallback = StandardListView::styled(&catalog, "gtk").unwrap();
        assert_eq!(fallback.style(), &StyleContext::default());
    }

    #[test]
    fn edits_sync_immediately() {
        let mut view = StandardListView::with_items(StyleContext::default(), numbered(3)).unwrap();
        view.list_mut().set_visible_size(200.0, 100.0);
        let changes = view.push("tail").unwrap();
        assert_eq!(changes.created_indices(), [3]);

        let changes = view.set_item(1, "renamed").unwrap();
        assert_eq!(changes.to_refresh.len(), 1);

        view.set_current_item(2);
        assert_eq!(view.current_text(), Some("item 2"));
        view.remove(2).unwrap();
        assert_eq!(view.current_item(), -1);
        assert_eq!(view.current_text(), None);
        assert!(view.insert(9, "nowhere").is_err());
        assert_eq!(view.items().row_count(), 3);
    }

    #[test]
    fn render_emits_visible_rows_with_selection() {
        let style = StyleContext::default();
        let mut view = StandardListView::with_items(style.clone(), numbered(100)).unwrap();
        view.list_mut().set_visible_size(200.0, 48.0);
        view.list_mut().scroll_to(0.0, 12.0);
        view.set_current_item(1);

        let bounds = Rect::new(10.0, 20.0, 210.0, 68.0);
        let mut out = DrawList::new();
        view.render(&style, bounds, &mut out);
        assert!(out.is_balanced());

        let texts: Vec<(&str, Rect)> = out
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { rect, text, .. } => Some((text.as_str(), *rect)),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[0].0, "item 0");
        // Row 0 spans 0..24 in content space; scrolled by 12 and offset by the bounds.
        assert_eq!(texts[0].1, Rect::new(16.0, 10.0, 204.0, 30.0));

        let selection = out
            .commands()
            .iter()
            .filter(|command| {
                matches!(command, DrawCommand::FillRect { color, .. } if *color == style.palette.selection)
            })
            .count();
        assert_eq!(selection, 1);
    }
}
