use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;

use crate::{
    parts::part::ModelPart,
    types::{GeometrySink, MobAnimation},
};

/// Four-legged model tree used by the animal model kinds. The fleece layer
/// of the sheep is the same tree with inflated cuboids.
#[derive(Debug, Clone)]
pub struct QuadrupedModel {
    pub head: ModelPart,
    pub body: ModelPart,
    pub legs: [ModelPart; 4],
}

/// The bone fields an overlay layer borrows from its base model. Copying
/// goes through this snapshot so both instances can come from the same
/// cache without aliasing borrows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrupedPose {
    pub head_pivot: Vec3,
    pub head_yaw: f32,
    pub head_pitch: f32,
    pub body_yaw: f32,
    pub body_pitch: f32,
    pub leg_pitch: [f32; 4],
}

impl QuadrupedModel {
    #[must_use]
    pub fn new(leg_length: f32, inflate: f32) -> Self {
        let leg = |x: f32, z: f32| {
            ModelPart::new([x, 24.0 - leg_length, z]).with_inflated_cuboid(
                [-2.0, 0.0, -2.0],
                [4.0, leg_length, 4.0],
                (0, 16),
                inflate,
            )
        };

        Self {
            head: ModelPart::new([0.0, 12.0, -8.0]).with_inflated_cuboid(
                [-4.0, -4.0, -8.0],
                [8.0, 8.0, 8.0],
                (0, 0),
                inflate,
            ),
            body: ModelPart::new([0.0, 12.0, 2.0]).with_inflated_cuboid(
                [-5.0, -10.0, -7.0],
                [10.0, 16.0, 8.0],
                (28, 8),
                inflate,
            ),
            legs: [leg(-3.0, -5.0), leg(3.0, -5.0), leg(-3.0, 7.0), leg(3.0, 7.0)],
        }
    }

    #[must_use]
    pub fn sheep() -> Self {
        Self::new(12.0, 0.0)
    }

    #[must_use]
    pub fn sheep_fur() -> Self {
        Self::new(12.0, 0.5)
    }

    #[must_use]
    pub fn pig() -> Self {
        Self::new(6.0, 0.0)
    }

    #[must_use]
    pub fn creeper() -> Self {
        Self::new(6.0, 0.0)
    }

    pub fn pose(&mut self, anim: &MobAnimation) {
        self.head.yaw = anim.yaw.to_radians();
        self.head.pitch = anim.pitch.to_radians() + anim.graze * 0.6;

        // Grazing dips the whole head towards the ground.
        self.head.pivot.y = 12.0 + anim.graze * 9.0;
        self.head.pivot.z = -8.0 + anim.graze * 2.0;

        // The body cuboid is modeled upright and laid horizontal here.
        self.body.pitch = FRAC_PI_2;

        let swing = anim.limb_swing * 0.6662;
        self.legs[0].pitch = swing.cos() * 1.4 * anim.limb_amount;
        self.legs[1].pitch = (swing + PI).cos() * 1.4 * anim.limb_amount;
        self.legs[2].pitch = (swing + PI).cos() * 1.4 * anim.limb_amount;
        self.legs[3].pitch = swing.cos() * 1.4 * anim.limb_amount;
    }

    pub fn render(&self, sink: &mut dyn GeometrySink, scale: f32) {
        sink.draw_part(&self.head, scale);
        sink.draw_part(&self.body, scale);
        for leg in &self.legs {
            sink.draw_part(leg, scale);
        }
    }

    #[must_use]
    pub fn pose_snapshot(&self) -> QuadrupedPose {
        QuadrupedPose {
            head_pivot: self.head.pivot,
            head_yaw: self.head.yaw,
            head_pitch: self.head.pitch,
            body_yaw: self.body.yaw,
            body_pitch: self.body.pitch,
            leg_pitch: [
                self.legs[0].pitch,
                self.legs[1].pitch,
                self.legs[2].pitch,
                self.legs[3].pitch,
            ],
        }
    }

    pub fn apply_pose(&mut self, pose: QuadrupedPose) {
        self.head.pivot = pose.head_pivot;
        self.head.yaw = pose.head_yaw;
        self.head.pitch = pose.head_pitch;
        self.body.yaw = pose.body_yaw;
        self.body.pitch = pose.body_pitch;
        for (leg, pitch) in self.legs.iter_mut().zip(pose.leg_pitch) {
            leg.pitch = pitch;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_snapshot_round_trips_onto_another_instance() {
        let mut base = QuadrupedModel::sheep();
        base.pose(&MobAnimation {
            limb_swing: 2.0,
            limb_amount: 1.0,
            age: 5.0,
            yaw: 30.0,
            pitch: 10.0,
            graze: 0.0,
        });

        let mut fleece = QuadrupedModel::sheep_fur();
        fleece.apply_pose(base.pose_snapshot());

        assert_eq!(fleece.pose_snapshot(), base.pose_snapshot());
    }

    #[test]
    fn fleece_layer_is_inflated_over_the_base() {
        let fleece = QuadrupedModel::sheep_fur();
        assert!(fleece.head.cuboids[0].inflate > 0.0);
        assert!(fleece.legs[0].cuboids[0].inflate > 0.0);
    }

    #[test]
    fn diagonal_legs_swing_together() {
        let mut model = QuadrupedModel::pig();
        model.pose(&MobAnimation {
            limb_swing: 1.0,
            limb_amount: 1.0,
            ..Default::default()
        });

        assert_eq!(model.legs[0].pitch, model.legs[3].pitch);
        assert_eq!(model.legs[1].pitch, model.legs[2].pitch);
        assert!((model.legs[0].pitch + model.legs[1].pitch).abs() < 1e-5);
    }
}
