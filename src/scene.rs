/*
 * Scene Module
 *
 * The registry that owns every dipole and ferrite of a run. Insertion order
 * is draw order and iteration order. Entities never hold references to each
 * other: anything that needs the source list (tracing, ferrite updates)
 * receives it from the scene explicitly.
 */

use crate::dipole::Dipole;
use crate::ferrite::{FreeDipole, MomentUpdate};

/// Index of a dipole in its scene's source collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub usize);

/// Index of a ferrite in its scene's free-dipole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FerriteId(pub usize);

#[derive(Debug, Clone, Default)]
pub struct Scene {
    sources: Vec<Dipole>,
    free_dipoles: Vec<FreeDipole>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_source(&mut self, dipole: Dipole) -> SourceId {
        let id = SourceId(self.sources.len());
        log::debug!("attached dipole {} at {:?}", id.0, dipole.position());
        self.sources.push(dipole);
        id
    }

    pub fn attach_free_dipole(&mut self, ferrite: FreeDipole) -> FerriteId {
        let id = FerriteId(self.free_dipoles.len());
        log::debug!("attached ferrite {} at {:?}", id.0, ferrite.position());
        self.free_dipoles.push(ferrite);
        id
    }

    pub fn sources(&self) -> &[Dipole] {
        &self.sources
    }

    pub fn free_dipoles(&self) -> &[FreeDipole] {
        &self.free_dipoles
    }

    pub fn source(&self, id: SourceId) -> Option<&Dipole> {
        self.sources.get(id.0)
    }

    pub fn source_mut(&mut self, id: SourceId) -> Option<&mut Dipole> {
        self.sources.get_mut(id.0)
    }

    pub fn sources_mut(&mut self) -> impl Iterator<Item = &mut Dipole> {
        self.sources.iter_mut()
    }

    /// Dipoles that currently act as field sources.
    pub fn active_sources(&self) -> impl Iterator<Item = &Dipole> + Clone {
        self.sources.iter().filter(|dipole| dipole.is_active())
    }

    /// Every active source, paired with the full source list it must trace
    /// against (inactive dipoles still stop field lines).
    pub fn drawable_sources(&self) -> impl Iterator<Item = (SourceId, &Dipole, &[Dipole])> {
        let all = self.sources.as_slice();
        all.iter()
            .enumerate()
            .filter(|(_, dipole)| dipole.is_active())
            .map(move |(i, dipole)| (SourceId(i), dipole, all))
    }

    /// Re-orient every ferrite against the current sources. Returns how many
    /// ferrites actually turned.
    pub fn update_free_dipoles(&mut self) -> usize {
        let sources = self.sources.as_slice();
        self.free_dipoles
            .iter_mut()
            .map(|ferrite| ferrite.update_moment(sources))
            .filter(|update| matches!(update, MomentUpdate::Aligned(_)))
            .count()
    }

    /// Index of the topmost dipole whose body contains `point`.
    pub fn source_at(&self, point: nannou::prelude::Vec2) -> Option<SourceId> {
        self.sources
            .iter()
            .enumerate()
            .rev()
            .find(|(_, dipole)| dipole.hit_test(point))
            .map(|(i, _)| SourceId(i))
    }
}
