use glam::Vec3;

/// An axis-aligned box attached to a [`ModelPart`], positioned relative to
/// the part's pivot. `box_uv` is the top-left corner of the box-unwrapped
/// texture region.
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    pub origin: Vec3,
    pub size: Vec3,
    pub box_uv: (u32, u32),
    pub inflate: f32,
}

/// One bone of a model tree. Rotation angles are radians and are public
/// because overlay layers copy them between cached instances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelPart {
    pub pivot: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub cuboids: Vec<Cuboid>,
}

impl ModelPart {
    #[must_use]
    pub fn new(pivot: [f32; 3]) -> Self {
        Self {
            pivot: Vec3::from(pivot),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_cuboid(self, origin: [f32; 3], size: [f32; 3], box_uv: (u32, u32)) -> Self {
        self.with_inflated_cuboid(origin, size, box_uv, 0.0)
    }

    #[must_use]
    pub fn with_inflated_cuboid(
        mut self,
        origin: [f32; 3],
        size: [f32; 3],
        box_uv: (u32, u32),
        inflate: f32,
    ) -> Self {
        self.cuboids.push(Cuboid {
            origin: Vec3::from(origin),
            size: Vec3::from(size),
            box_uv,
            inflate,
        });
        self
    }
}
