use bevy::prelude::*;

/// Live projectile handles, in spawn order.
#[derive(Resource, Debug, Default)]
pub struct ProjectileRegistry {
    live: Vec<Entity>,
    next_id: u64,
}

impl ProjectileRegistry {
    #[inline]
    pub fn live(&self) -> &[Entity] {
        &self.live
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.live.contains(&entity)
    }

    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn register(&mut self, entity: Entity) {
        if !self.contains(entity) {
            self.live.push(entity);
        }
    }

    /// Returns `false` if the entity was not registered.
    pub fn deregister(&mut self, entity: Entity) -> bool {
        match self.live.iter().position(|&e| e == entity) {
            Some(i) => {
                self.live.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.live.clear();
        self.next_id = 0;
    }
}
