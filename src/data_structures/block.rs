//! Block registry.
//!
//! Block kinds are a closed enumeration. Everything a renderer needs to know
//! about a kind lives in a static side table indexed by the id, so a block is
//! a single byte and no per-block dispatch exists.

/// Number of tiles along one edge of the block atlas.
pub const ATLAS_TILES: u32 = 2;
/// Edge length of one atlas tile in pixels.
pub const TILE_SIZE: u32 = 16;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockId {
    #[default]
    Air = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
}

/// Material properties shared by all blocks of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockProperties {
    pub name: &'static str,
    pub transparent: bool,
    /// Column and row of the texture tile in the atlas.
    pub atlas: [u32; 2],
    /// Base colour used when the atlas is generated procedurally.
    pub colour: [u8; 4],
}

const PROPERTIES: [BlockProperties; 4] = [
    BlockProperties {
        name: "air",
        transparent: true,
        atlas: [0, 0],
        colour: [0, 0, 0, 0],
    },
    BlockProperties {
        name: "grass",
        transparent: false,
        atlas: [0, 0],
        colour: [95, 159, 53, 255],
    },
    BlockProperties {
        name: "dirt",
        transparent: false,
        atlas: [1, 0],
        colour: [134, 96, 67, 255],
    },
    BlockProperties {
        name: "stone",
        transparent: false,
        atlas: [0, 1],
        colour: [125, 125, 125, 255],
    },
];

impl BlockId {
    pub const ALL: [BlockId; 4] = [BlockId::Air, BlockId::Grass, BlockId::Dirt, BlockId::Stone];

    pub fn properties(self) -> &'static BlockProperties {
        &PROPERTIES[self as usize]
    }

    pub fn is_transparent(self) -> bool {
        self.properties().transparent
    }
}

impl TryFrom<u8> for BlockId {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        BlockId::ALL.get(value as usize).copied().ok_or(value)
    }
}

/// A single block. Only the id is stored; properties come from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Block {
    pub id: BlockId,
}

impl Block {
    pub fn new(id: BlockId) -> Self {
        Self { id }
    }

    pub fn transparent(&self) -> bool {
        self.id.is_transparent()
    }

    pub fn texture_location(&self) -> [u32; 2] {
        self.id.properties().atlas
    }
}

/// Texture coordinates `(min, max)` of an atlas tile.
pub fn tile_uv(tile: [u32; 2]) -> ([f32; 2], [f32; 2]) {
    let step = 1.0 / ATLAS_TILES as f32;
    let min = [tile[0] as f32 * step, tile[1] as f32 * step];
    (min, [min[0] + step, min[1] + step])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_indexed_by_id() {
        for id in BlockId::ALL {
            assert_eq!(BlockId::try_from(id as u8), Ok(id));
        }
        assert_eq!(BlockId::Grass.properties().name, "grass");
        assert_eq!(BlockId::try_from(42), Err(42));
    }

    #[test]
    fn only_air_is_transparent() {
        let transparent: Vec<_> = BlockId::ALL
            .into_iter()
            .filter(|id| id.is_transparent())
            .collect();
        assert_eq!(transparent, vec![BlockId::Air]);
        assert!(Block::default().transparent());
    }

    #[test]
    fn solid_blocks_have_distinct_tiles_inside_the_atlas() {
        let solid: Vec<_> = BlockId::ALL
            .into_iter()
            .filter(|id| !id.is_transparent())
            .map(|id| id.properties().atlas)
            .collect();
        for (i, tile) in solid.iter().enumerate() {
            assert!(tile[0] < ATLAS_TILES && tile[1] < ATLAS_TILES);
            assert!(!solid[i + 1..].contains(tile));
        }
    }

    #[test]
    fn uv_covers_one_tile() {
        let (min, max) = tile_uv(Block::new(BlockId::Dirt).texture_location());
        assert_eq!(min, [0.5, 0.0]);
        assert_eq!(max, [1.0, 0.5]);
    }
}
