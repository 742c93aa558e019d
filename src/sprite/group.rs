use std::sync::atomic::{AtomicU64, Ordering};

use crate::sprite::error::SpriteError;
use crate::sprite::game_object::{GameObject, ObjectId};
use crate::sprite::surface::Surface;

static NEXT_GROUP_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GroupId(u64);

/// An ordered collection of game objects, updated and drawn together.
///
/// Insertion order is update and draw order: objects added later are painted on top.
#[derive(Debug)]
pub struct ObjectGroup {
    id: GroupId,
    members: Vec<GameObject>,
}

impl ObjectGroup {
    pub fn new() -> Self {
        Self {
            id: GroupId(NEXT_GROUP_ID.fetch_add(1, Ordering::Relaxed)),
            members: vec![],
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn add(&mut self, mut object: GameObject) -> ObjectId {
        debug_assert!(!self.contains(object.id()));
        object.set_group(Some(self.id));
        let id = object.id();
        log::trace!("{:?} joins {:?}", id, self.id);
        self.members.push(object);
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<GameObject> {
        let idx = self.members.iter().position(|e| e.id() == id)?;
        let mut object = self.members.remove(idx);
        object.set_group(None);
        log::trace!("{:?} left {:?}", id, self.id);
        Some(object)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.members.iter().any(|e| e.id() == id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.members.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.members.iter_mut().find(|e| e.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.members.iter_mut()
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Updates all members in insertion order, then drops the ones destroyed meanwhile.
    ///
    /// A failing member does not stop the frame: the others are still updated and the
    /// purge still happens. The first error is returned afterwards.
    pub fn update(&mut self, delta_time: f32) -> Result<(), SpriteError> {
        let mut result = Ok(());
        for object in self.members.iter_mut() {
            if let Err(e) = object.update(delta_time) {
                log::warn!("{:?} update failed: {e}", object.id());
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        self.purge();
        result
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for object in &self.members {
            object.draw(surface);
        }
    }

    /// Removes destroyed members and returns how many were removed.
    pub fn purge(&mut self) -> usize {
        let before = self.members.len();
        self.members.retain(|e| !e.is_destroyed());
        let removed = before - self.members.len();
        if removed > 0 {
            log::debug!("{:?}: {removed} destroyed object(s) removed, {} left", self.id, self.members.len());
        }
        removed
    }
}

impl Default for ObjectGroup {
    fn default() -> Self {
        Self::new()
    }
}
