use std::f32::consts::PI;

use crate::{
    parts::part::ModelPart,
    types::{GeometrySink, MobAnimation},
};

/// Biped model tree in the classic 64x32 texture layout. Shared by the
/// humanoid, zombie and skeleton model kinds.
#[derive(Debug, Clone)]
pub struct HumanoidModel {
    pub head: ModelPart,
    pub headwear: ModelPart,
    pub body: ModelPart,
    pub right_arm: ModelPart,
    pub left_arm: ModelPart,
    pub right_leg: ModelPart,
    pub left_leg: ModelPart,
}

impl Default for HumanoidModel {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanoidModel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            head: ModelPart::new([0.0, 0.0, 0.0]).with_cuboid(
                [-4.0, -8.0, -4.0],
                [8.0, 8.0, 8.0],
                (0, 0),
            ),
            headwear: ModelPart::new([0.0, 0.0, 0.0]).with_inflated_cuboid(
                [-4.0, -8.0, -4.0],
                [8.0, 8.0, 8.0],
                (32, 0),
                0.5,
            ),
            body: ModelPart::new([0.0, 0.0, 0.0]).with_cuboid(
                [-4.0, 0.0, -2.0],
                [8.0, 12.0, 4.0],
                (16, 16),
            ),
            right_arm: ModelPart::new([-5.0, 2.0, 0.0]).with_cuboid(
                [-3.0, -2.0, -2.0],
                [4.0, 12.0, 4.0],
                (40, 16),
            ),
            left_arm: ModelPart::new([5.0, 2.0, 0.0]).with_cuboid(
                [-1.0, -2.0, -2.0],
                [4.0, 12.0, 4.0],
                (40, 16),
            ),
            right_leg: ModelPart::new([-2.0, 12.0, 0.0]).with_cuboid(
                [-2.0, 0.0, -2.0],
                [4.0, 12.0, 4.0],
                (0, 16),
            ),
            left_leg: ModelPart::new([2.0, 12.0, 0.0]).with_cuboid(
                [-2.0, 0.0, -2.0],
                [4.0, 12.0, 4.0],
                (0, 16),
            ),
        }
    }

    pub fn pose(&mut self, anim: &MobAnimation) {
        self.head.yaw = anim.yaw.to_radians();
        self.head.pitch = anim.pitch.to_radians();

        let swing = anim.limb_swing * 0.6662;
        self.right_arm.pitch = (swing + PI).cos() * 2.0 * anim.limb_amount;
        self.left_arm.pitch = swing.cos() * 2.0 * anim.limb_amount;
        self.right_leg.pitch = swing.cos() * 1.4 * anim.limb_amount;
        self.left_leg.pitch = (swing + PI).cos() * 1.4 * anim.limb_amount;

        let sway = (anim.age * 0.09).cos() * 0.05 + 0.05;
        self.right_arm.roll = sway;
        self.left_arm.roll = -sway;
    }

    /// Renders every part except the headwear overlay. The overlay is drawn
    /// conditionally by the caller, which owns the face-culling toggle.
    pub fn render(&self, sink: &mut dyn GeometrySink, scale: f32) {
        sink.draw_part(&self.head, scale);
        sink.draw_part(&self.body, scale);
        sink.draw_part(&self.right_arm, scale);
        sink.draw_part(&self.left_arm, scale);
        sink.draw_part(&self.right_leg, scale);
        sink.draw_part(&self.left_leg, scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posing_converts_look_angles_to_radians() {
        let mut model = HumanoidModel::new();
        model.pose(&MobAnimation {
            yaw: 90.0,
            pitch: -45.0,
            ..Default::default()
        });

        assert!((model.head.yaw - 90.0_f32.to_radians()).abs() < 1e-6);
        assert!((model.head.pitch + 45.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn limbs_swing_in_opposite_phase() {
        let mut model = HumanoidModel::new();
        model.pose(&MobAnimation {
            limb_swing: 1.0,
            limb_amount: 1.0,
            ..Default::default()
        });

        assert!((model.right_arm.pitch + model.left_arm.pitch).abs() < 1e-5);
        assert!((model.right_leg.pitch + model.left_leg.pitch).abs() < 1e-5);
    }
}
