// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw commands and the render capability of widgets.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Color;

use crate::StyleContext;

/// A single backend-agnostic draw command.
///
/// Coordinates are in the space of the `bounds` passed to [`Widget::render`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Fill an axis-aligned rectangle.
    FillRect {
        /// Rectangle to fill.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Draw a single line of text inside `rect`.
    Text {
        /// Box the text is laid into, padding already applied.
        rect: Rect,
        /// The text.
        text: String,
        /// Text color.
        color: Color,
    },
    /// Intersect the clip with `rect` until the matching [`DrawCommand::PopClip`].
    PushClip(Rect),
    /// Restore the clip pushed by the last [`DrawCommand::PushClip`].
    PopClip,
}

/// An append-only list of [`DrawCommand`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// The recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Removes every command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Returns `true` if every `PushClip` has a matching `PopClip`.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        let mut depth = 0_usize;
        for command in &self.commands {
            match command {
                DrawCommand::PushClip(_) => depth += 1,
                DrawCommand::PopClip => match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return false,
                },
                _ => {}
            }
        }
        depth == 0
    }
}

/// Something that can paint itself into a [`DrawList`].
pub trait Widget {
    /// Records the commands that draw `self` into `bounds`.
    fn render(&self, style: &StyleContext, bounds: Rect, out: &mut DrawList);
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::{DrawCommand, DrawList};

    #[test]
    fn clip_balance() {
        let mut list = DrawList::new();
        assert!(list.is_balanced());
        list.push(DrawCommand::PushClip(Rect::ZERO));
        assert!(!list.is_balanced());
        list.push(DrawCommand::PopClip);
        assert!(list.is_balanced());
        list.push(DrawCommand::PopClip);
        assert!(!list.is_balanced());
        assert_eq!(list.len(), 3);
    }
}
