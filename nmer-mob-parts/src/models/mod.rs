pub mod humanoid;
pub mod quadruped;

use std::collections::HashMap;

use crate::{
    model::NamedModelKind,
    types::{GeometrySink, MobAnimation},
};

use self::{humanoid::HumanoidModel, quadruped::QuadrupedModel};

/// Closed dispatch over the model trees the client ships.
#[derive(Debug, Clone)]
pub enum ModelInstance {
    Humanoid(HumanoidModel),
    Quadruped(QuadrupedModel),
}

impl ModelInstance {
    fn for_kind(kind: NamedModelKind) -> Self {
        match kind {
            NamedModelKind::Humanoid | NamedModelKind::Zombie | NamedModelKind::Skeleton => {
                Self::Humanoid(HumanoidModel::new())
            }
            NamedModelKind::Sheep => Self::Quadruped(QuadrupedModel::sheep()),
            NamedModelKind::SheepFur => Self::Quadruped(QuadrupedModel::sheep_fur()),
            NamedModelKind::Pig => Self::Quadruped(QuadrupedModel::pig()),
            NamedModelKind::Creeper => Self::Quadruped(QuadrupedModel::creeper()),
        }
    }

    pub fn pose(&mut self, anim: &MobAnimation) {
        match self {
            Self::Humanoid(model) => model.pose(anim),
            Self::Quadruped(model) => model.pose(anim),
        }
    }

    pub fn render(&self, sink: &mut dyn GeometrySink, scale: f32) {
        match self {
            Self::Humanoid(model) => model.render(sink, scale),
            Self::Quadruped(model) => model.render(sink, scale),
        }
    }
}

/// Lazily-built model instances, owned by the render thread and shared by
/// every entity rendered in a frame. Bone fields borrowed during a render
/// must be restored before the instance is handed to the next entity.
#[derive(Debug, Default)]
pub struct ModelCache {
    models: HashMap<NamedModelKind, ModelInstance>,
}

impl ModelCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_mut(&mut self, kind: NamedModelKind) -> &mut ModelInstance {
        self.models
            .entry(kind)
            .or_insert_with(|| ModelInstance::for_kind(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_reuses_the_same_instance_per_kind() {
        let mut cache = ModelCache::new();

        if let ModelInstance::Quadruped(sheep) = cache.get_mut(NamedModelKind::Sheep) {
            sheep.head.yaw = 1.25;
        }

        match cache.get_mut(NamedModelKind::Sheep) {
            ModelInstance::Quadruped(sheep) => assert_eq!(sheep.head.yaw, 1.25),
            ModelInstance::Humanoid(_) => panic!("sheep maps to the quadruped tree"),
        }
    }

    #[test]
    fn biped_kinds_share_the_humanoid_tree() {
        let mut cache = ModelCache::new();
        assert!(matches!(
            cache.get_mut(NamedModelKind::Zombie),
            ModelInstance::Humanoid(_)
        ));
        assert!(matches!(
            cache.get_mut(NamedModelKind::Skeleton),
            ModelInstance::Humanoid(_)
        ));
    }
}
