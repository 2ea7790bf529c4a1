//! Layer stacks

use alloc::vec::Vec;

use super::tile::TileGrid;

/// One entry of a layer stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layer {
    /// A single tile placement
    Tile(TileGrid),
    /// A nested stack with its own offset and visibility
    Group(Group),
}

impl From<TileGrid> for Layer {
    fn from(tile: TileGrid) -> Self {
        Layer::Tile(tile)
    }
}

impl From<Group> for Layer {
    fn from(group: Group) -> Self {
        Layer::Group(group)
    }
}

/// Ordered back-to-front list of layers
///
/// Later layers are drawn on top. An empty group draws nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    /// Column offset applied to every child
    pub x: i32,
    /// Row offset applied to every child
    pub y: i32,
    /// Hidden groups are skipped with all their children
    pub hidden: bool,
    layers: Vec<Layer>,
}

impl Group {
    /// Create an empty group at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to an offset
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Add a layer on top
    pub fn push(&mut self, layer: impl Into<Layer>) {
        self.layers.push(layer.into());
    }

    /// Add a layer on top, builder style
    pub fn with(mut self, layer: impl Into<Layer>) -> Self {
        self.push(layer);
        self
    }

    /// Insert a layer at a stack position (0 = bottom)
    ///
    /// Positions past the top append.
    pub fn insert(&mut self, index: usize, layer: impl Into<Layer>) {
        let index = index.min(self.layers.len());
        self.layers.insert(index, layer.into());
    }

    /// Remove and return the layer at a stack position
    pub fn remove(&mut self, index: usize) -> Option<Layer> {
        (index < self.layers.len()).then(|| self.layers.remove(index))
    }

    /// Layers, bottom first
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable access to a layer
    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    /// Number of direct children
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if the group has no children
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
