use crate::{blocks::Block, errors::Result, parts::part::ModelPart};

/// Per-frame animation inputs used to pose a model tree.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MobAnimation {
    pub limb_swing: f32,
    pub limb_amount: f32,
    /// Entity age in ticks, including the partial tick for this frame.
    pub age: f32,
    /// Head yaw in degrees.
    pub yaw: f32,
    /// Head pitch in degrees.
    pub pitch: f32,
    /// Head-dip amount for grazing animals, 0.0 to 1.0.
    pub graze: f32,
}

/// Geometry-submission collaborator. Implementations own the actual draw
/// calls and must only be invoked from the render thread.
pub trait GeometrySink {
    fn draw_part(&mut self, part: &ModelPart, scale: f32);

    fn set_cull_faces(&mut self, enabled: bool);

    /// Draws the static preview of a block-shaped entity, translated
    /// vertically by `y_offset`.
    fn draw_block_preview(&mut self, block: Block, y_offset: f32) -> Result<()>;
}
