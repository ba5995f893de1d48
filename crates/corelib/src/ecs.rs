//! Tiny ECS: World, Entity, components: Transform + Renderable.

use crate::transform::Transform;
use crate::{Vec3, Vec4};

/// Entity id (dense, index into component arrays).
pub type Entity = u32;

/// The hardcoded demo meshes. Geometry lives with whoever draws them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Triangle,
    Quad,
    Weird,
}

impl MeshKind {
    pub const ALL: [MeshKind; 3] = [MeshKind::Triangle, MeshKind::Quad, MeshKind::Weird];

    pub fn name(self) -> &'static str {
        match self {
            MeshKind::Triangle => "Triangle",
            MeshKind::Quad => "Quad",
            MeshKind::Weird => "The weird one",
        }
    }
}

/// Drawable component: which mesh, tinted with which color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Renderable {
    pub mesh: MeshKind,
    pub tint: Vec4,
}

impl Renderable {
    pub fn new(mesh: MeshKind) -> Self {
        Self {
            mesh,
            tint: Vec4::ONE,
        }
    }

    pub fn with_tint(mut self, tint: Vec4) -> Self {
        self.tint = tint;
        self
    }
}

/// Very small ECS world with dense parallel arrays.
/// No allocations per-frame; spawn may allocate to grow capacity.
#[derive(Default)]
pub struct World {
    transforms: Vec<Transform>,
    renderables: Vec<Option<Renderable>>,
    alive: Vec<bool>,
    len: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn entity with Transform and optional Renderable.
    pub fn spawn(&mut self, t: Transform, r: Option<Renderable>) -> Entity {
        let id = self.len;
        let idx = id as usize;
        self.len += 1;

        if idx >= self.transforms.len() {
            let new_len = (idx + 1).next_power_of_two().max(8);
            self.transforms.resize(new_len, Transform::identity());
            self.renderables.resize(new_len, None);
            self.alive.resize(new_len, false);
        }

        self.transforms[idx] = t;
        self.renderables[idx] = r;
        self.alive[idx] = true;
        log::trace!("Spawned entity {id} ({:?})", r.map(|r| r.mesh));
        id
    }

    /// Number of entities spawned so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_alive(&self, e: Entity) -> bool {
        let i = e as usize;
        i < self.len() && self.alive[i]
    }

    #[inline]
    pub fn transform_mut(&mut self, e: Entity) -> Option<&mut Transform> {
        if self.is_alive(e) {
            Some(&mut self.transforms[e as usize])
        } else {
            None
        }
    }

    #[inline]
    pub fn renderable(&self, e: Entity) -> Option<&Renderable> {
        if self.is_alive(e) {
            self.renderables[e as usize].as_ref()
        } else {
            None
        }
    }

    /// Iterate over (Transform, Renderable) pairs.
    ///
    /// Transforms are handed out mutably because reading the world matrix
    /// refreshes its cache.
    pub fn iter_renderables_mut(&mut self) -> impl Iterator<Item = (&mut Transform, &Renderable)> {
        let len = self.len();
        self.transforms[..len]
            .iter_mut()
            .zip(self.renderables[..len].iter())
            .zip(self.alive[..len].iter())
            .filter_map(|((t, r), alive)| match (alive, r) {
                (true, Some(r)) => Some((t, r)),
                _ => None,
            })
    }

    /// Spin every live transform by `speed` (pitch, yaw, roll per second) * dt.
    pub fn system_rotate_all(&mut self, dt: f32, speed: Vec3) {
        let len = self.len();
        for (t, alive) in self.transforms[..len].iter_mut().zip(&self.alive[..len]) {
            if *alive {
                t.rotate(speed * dt);
            }
        }
    }
}
