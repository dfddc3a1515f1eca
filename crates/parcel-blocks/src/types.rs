#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u16);

/// One placeable unit of world content, identified by its material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block {
    pub id: u16,
}

impl Block {
    pub const AIR: Block = Block { id: 0 };

    #[inline]
    pub const fn new(id: u16) -> Self {
        Self { id }
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == Block::AIR
    }
}

impl From<MaterialId> for Block {
    #[inline]
    fn from(value: MaterialId) -> Self {
        Block { id: value.0 }
    }
}

impl From<Block> for MaterialId {
    #[inline]
    fn from(value: Block) -> Self {
        MaterialId(value.id)
    }
}
