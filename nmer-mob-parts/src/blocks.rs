use crate::errors::{MobModelError, Result};

/// Highest block identity in the terrain set.
pub const MAX_BLOCK_ID: u32 = 49;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockShape {
    Cube,
    Slab,
    Liquid,
    Plant,
    Mushroom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    id: u32,
    shape: BlockShape,
}

impl Block {
    /// Resolves a numeric model identity against the terrain set.
    /// Identity 0 is air and has no preview.
    pub fn from_numeric(id: u32) -> Result<Self> {
        if id == 0 || id > MAX_BLOCK_ID {
            return Err(MobModelError::UnknownBlock(id));
        }

        let shape = match id {
            6 | 37 | 38 => BlockShape::Plant,
            39 | 40 => BlockShape::Mushroom,
            8..=11 => BlockShape::Liquid,
            44 => BlockShape::Slab,
            _ => BlockShape::Cube,
        };

        Ok(Self { id, shape })
    }

    #[must_use]
    pub const fn id(self) -> u32 {
        self.id
    }

    #[must_use]
    pub const fn shape(self) -> BlockShape {
        self.shape
    }

    /// Vertical translation applied when the block is previewed as an
    /// entity model. Sprite-shaped blocks sit lower in the preview box
    /// than full cubes.
    #[must_use]
    pub const fn preview_offset(self) -> f32 {
        match self.shape {
            BlockShape::Plant | BlockShape::Mushroom => -1.8,
            _ => -1.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_shaped_blocks_use_the_deep_preview_offset() {
        let flower = Block::from_numeric(37).unwrap();
        assert_eq!(flower.shape(), BlockShape::Plant);
        assert_eq!(flower.preview_offset(), -1.8);

        let mushroom = Block::from_numeric(40).unwrap();
        assert_eq!(mushroom.preview_offset(), -1.8);
    }

    #[test]
    fn full_blocks_use_the_shallow_preview_offset() {
        let sand = Block::from_numeric(12).unwrap();
        assert_eq!(sand.shape(), BlockShape::Cube);
        assert_eq!(sand.preview_offset(), -1.4);
    }

    #[test]
    fn air_and_out_of_range_identities_are_unknown() {
        assert!(matches!(
            Block::from_numeric(0),
            Err(MobModelError::UnknownBlock(0))
        ));
        assert!(matches!(
            Block::from_numeric(60),
            Err(MobModelError::UnknownBlock(60))
        ));
    }
}
