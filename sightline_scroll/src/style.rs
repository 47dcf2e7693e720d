// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style metrics and the catalog of named styles.
//!
//! Containers do not read ambient style globals. A style name is resolved once, at
//! construction, into a [`StyleContext`]; the metrics then flow into
//! [`ListViewConfig`](crate::ListViewConfig) and [`BoxConfig`](crate::BoxConfig).

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Insets;
use peniko::Color;

/// Geometry a style imposes on containers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StyleMetrics {
    /// Height of one list row.
    pub row_height: f64,
    /// Gap between consecutive rows or box children.
    pub spacing: f64,
    /// Inner padding of rows and boxes.
    pub padding: Insets,
    /// Minimum width of a grid cell.
    pub min_cell_width: f64,
}

impl Default for StyleMetrics {
    fn default() -> Self {
        Self {
            row_height: 24.0,
            spacing: 0.0,
            padding: Insets::uniform_xy(6.0, 2.0),
            min_cell_width: 64.0,
        }
    }
}

/// Colors used when rendering list content.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    /// Container background.
    pub background: Color,
    /// Row text.
    pub foreground: Color,
    /// Background of the current row.
    pub selection: Color,
    /// Text of the current row.
    pub selection_foreground: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            foreground: Color::BLACK,
            selection: Color::from_rgb8(0x33, 0x66, 0xcc),
            selection_foreground: Color::WHITE,
        }
    }
}

/// A resolved, named style.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleContext {
    /// Name the style is registered under.
    pub name: String,
    /// Container geometry.
    pub metrics: StyleMetrics,
    /// Render colors.
    pub palette: Palette,
}

impl StyleContext {
    /// Creates a style with the given name and metrics and the default palette.
    #[must_use]
    pub fn new(name: impl Into<String>, metrics: StyleMetrics) -> Self {
        Self {
            name: name.into(),
            metrics,
            palette: Palette::default(),
        }
    }

    /// Replaces the palette.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::new("default", StyleMetrics::default())
    }
}

/// An immutable set of named styles.
///
/// Cloning is cheap: the entries live behind an `Rc` and are sorted by name for
/// `O(log n)` lookup. Use [`StyleCatalogBuilder`] to construct a custom catalog, or
/// [`StyleCatalog::builtin`] for the styles shipped with this crate.
///
/// ```rust
/// use sightline_scroll::StyleCatalog;
///
/// let catalog = StyleCatalog::builtin();
/// assert_eq!(catalog.resolve("material").metrics.row_height, 48.0);
///
/// // Unknown names fall back to the default style.
/// assert_eq!(catalog.resolve("no-such-style").name, "default");
/// ```
#[derive(Clone, Debug)]
pub struct StyleCatalog {
    styles: Rc<[StyleContext]>,
}

impl StyleCatalog {
    /// The built-in `fluent`, `material`, `native` and `ugly` styles.
    #[must_use]
    pub fn builtin() -> Self {
        let accent = |r, g, b| Palette {
            selection: Color::from_rgb8(r, g, b),
            ..Palette::default()
        };
        StyleCatalogBuilder::new()
            .insert(
                StyleContext::new(
                    "fluent",
                    StyleMetrics {
                        row_height: 32.0,
                        spacing: 2.0,
                        padding: Insets::uniform_xy(12.0, 4.0),
                        min_cell_width: 80.0,
                    },
                )
                .with_palette(accent(0x00, 0x5f, 0xb8)),
            )
            .insert(
                StyleContext::new(
                    "material",
                    StyleMetrics {
                        row_height: 48.0,
                        spacing: 0.0,
                        padding: Insets::uniform_xy(16.0, 8.0),
                        min_cell_width: 96.0,
                    },
                )
                .with_palette(accent(0x67, 0x50, 0xa4)),
            )
            .insert(StyleContext::new(
                "native",
                StyleMetrics {
                    row_height: 22.0,
                    spacing: 0.0,
                    padding: Insets::uniform_xy(4.0, 2.0),
                    min_cell_width: 64.0,
                },
            ))
            .insert(
                StyleContext::new(
                    "ugly",
                    StyleMetrics {
                        row_height: 20.0,
                        spacing: 1.0,
                        padding: Insets::uniform(1.0),
                        min_cell_width: 40.0,
                    },
                )
                .with_palette(Palette {
                    background: Color::from_rgb8(0xff, 0xff, 0x00),
                    foreground: Color::from_rgb8(0xff, 0x00, 0xff),
                    selection: Color::from_rgb8(0x00, 0xff, 0x00),
                    selection_foreground: Color::BLACK,
                }),
            )
            .build()
    }

    /// Returns the style registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StyleContext> {
        self.styles
            .binary_search_by(|style| style.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.styles[idx])
    }

    /// Returns the style registered under `name`, or the default style if there is none.
    pub fn resolve(&self, name: &str) -> StyleContext {
        if let Some(style) = self.get(name) {
            return style.clone();
        }
        log::warn!("unknown style {name:?}, using default metrics");
        StyleContext::default()
    }

    /// Registered style names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|style| style.name.as_str())
    }

    /// Number of registered styles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Returns `true` if no style is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builder for [`StyleCatalog`].
#[derive(Debug, Default)]
pub struct StyleCatalogBuilder {
    styles: Vec<StyleContext>,
}

impl StyleCatalogBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a style, replacing any style of the same name.
    #[must_use]
    pub fn insert(mut self, style: StyleContext) -> Self {
        match self
            .styles
            .binary_search_by(|probe| probe.name.as_str().cmp(style.name.as_str()))
        {
            Ok(idx) => self.styles[idx] = style,
            Err(idx) => self.styles.insert(idx, style),
        }
        self
    }

    /// Builds the catalog.
    #[must_use]
    pub fn build(self) -> StyleCatalog {
        StyleCatalog {
            styles: self.styles.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{StyleCatalog, StyleCatalogBuilder, StyleContext, StyleMetrics};

    #[test]
    fn builtin_styles_are_sorted_and_found() {
        let catalog = StyleCatalog::builtin();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, ["fluent", "material", "native", "ugly"]);
        assert_eq!(catalog.get("native").unwrap().metrics.row_height, 22.0);
        assert!(catalog.get("Fluent").is_none());
    }

    #[test]
    fn unknown_style_falls_back_to_defaults() {
        let catalog = StyleCatalog::builtin();
        let style = catalog.resolve("gtk");
        assert_eq!(style.metrics, StyleMetrics::default());
        assert_eq!(style, StyleContext::default());
    }

    #[test]
    fn builder_replaces_duplicates() {
        let tall = StyleMetrics {
            row_height: 100.0,
            ..StyleMetrics::default()
        };
        let catalog = StyleCatalogBuilder::new()
            .insert(StyleContext::default())
            .insert(StyleContext::new("default", tall))
            .build();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.resolve("default").metrics.row_height, 100.0);
    }
}
