//! Sync Controller
//!
//! Owns the canonical plot/placement collections and mediates every
//! mutation through optimistic-apply-then-confirm:
//!
//! 1. [`SyncController::apply`] mutates the canonical collection
//!    immediately and hands back the persistence calls ready to
//!    dispatch (none if the target entity already has an op in
//!    flight).
//! 2. The caller performs the call and reports back through
//!    [`SyncController::resolve`].
//! 3. Success merges the authoritative entity (real id adopted);
//!    failure rolls the optimistic change back and surfaces a
//!    [`EditError::PersistenceFailure`].
//!
//! Ops are serialized per entity: a second edit to a plot whose
//! create is still pending queues behind it, so nothing ever goes
//! over the wire referencing an id the backend has not assigned yet.
//! A placement created inside a not-yet-persisted plot queues behind
//! that plot's create for the same reason.
//!
//! Everything here runs on the single UI thread; the "transaction"
//! discipline is the apply/confirm/rollback sequence, not locking.

use std::collections::{HashMap, VecDeque};

use crate::error::EditError;
use crate::intent::Intent;
use crate::models::{Placement, Plot};
use crate::spatial::SpatialIndex;

/// Client-side identity of an entity, valid before the backend id is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Plot(u32),
    Placement(u32),
}

/// A persistence call ready to go over the wire. Snapshots are taken
/// at dispatch time, so a queued update carries the newest state.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistCall {
    CreatePlot(Plot),
    UpdatePlot { id: u32, plot: Plot },
    DeletePlot { id: u32 },
    CreatePlacement(Placement),
    UpdatePlacement { id: u32, placement: Placement },
    DeletePlacement { id: u32 },
}

/// One dispatchable unit: feed the outcome back with the same `seq`
#[derive(Debug, Clone, PartialEq)]
pub struct OpRequest {
    pub seq: u64,
    pub call: PersistCall,
}

/// What the backend answered
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Plot(Plot),
    Placement(Placement),
    Deleted,
    Failed(String),
}

/// Result of resolving an op: follow-up dispatches unblocked by it,
/// plus the user-facing failure if it was rolled back
#[derive(Debug, Default)]
pub struct ResolveEffect {
    pub next: Vec<OpRequest>,
    pub failure: Option<EditError>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum OpKind {
    Create,
    Update,
    Delete,
}

/// Snapshot taken at apply time, sufficient to undo the optimistic
/// mutation if the backend says no
#[derive(Debug, Clone)]
enum Rollback {
    Create,
    UpdatePlot { prior: Plot },
    UpdatePlacement { prior: Placement },
    DeletePlot { prior: Plot, index: usize },
    DeletePlacement { prior: Placement, index: usize },
}

#[derive(Debug, Clone)]
struct PendingOp {
    key: EntityKey,
    kind: OpKind,
    rollback: Rollback,
}

pub struct SyncController {
    plots: Vec<Plot>,
    placements: Vec<Placement>,
    next_local_id: u32,
    next_seq: u64,
    /// seq of the single op currently in flight per entity
    in_flight: HashMap<EntityKey, u64>,
    pending: HashMap<u64, PendingOp>,
    /// Ops waiting behind an in-flight op. Keyed by the entity they
    /// wait ON — usually their own, but a placement create waiting
    /// for its plot's id sits in the plot's queue.
    queued: HashMap<EntityKey, VecDeque<PendingOp>>,
}

impl SyncController {
    pub fn new() -> Self {
        Self {
            plots: Vec::new(),
            placements: Vec::new(),
            next_local_id: 1,
            next_seq: 1,
            in_flight: HashMap::new(),
            pending: HashMap::new(),
            queued: HashMap::new(),
        }
    }

    /// Adopt the collections loaded from the backend, assigning local
    /// ids and resolving plot references.
    pub fn set_loaded(&mut self, mut plots: Vec<Plot>, mut placements: Vec<Placement>) {
        for plot in &mut plots {
            plot.local_id = self.alloc_local_id();
        }
        for placement in &mut placements {
            placement.local_id = self.alloc_local_id();
            placement.plot_local_id = plots
                .iter()
                .find(|plot| plot.id == placement.plot_id && plot.id.is_some())
                .map(|plot| plot.local_id)
                .unwrap_or(0);
        }
        self.plots = plots;
        self.placements = placements;
    }

    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn index(&self) -> SpatialIndex<'_> {
        SpatialIndex::new(&self.plots, &self.placements)
    }

    pub fn plot_by_local(&self, local_id: u32) -> Option<&Plot> {
        self.plots.iter().find(|p| p.local_id == local_id)
    }

    pub fn placement_by_local(&self, local_id: u32) -> Option<&Placement> {
        self.placements.iter().find(|p| p.local_id == local_id)
    }

    pub fn has_pending_ops(&self) -> bool {
        !self.in_flight.is_empty() || self.queued.values().any(|q| !q.is_empty())
    }

    /// Apply a validated intent optimistically and return any op now
    /// ready to dispatch.
    pub fn apply(&mut self, intent: Intent) -> Vec<OpRequest> {
        match intent {
            Intent::PlotCreate(draft) => {
                let local_id = self.alloc_local_id();
                self.plots.push(Plot {
                    local_id,
                    id: None,
                    name: draft.name,
                    boundary: draft.boundary,
                    center: draft.center,
                    width_feet: draft.width_feet,
                    height_feet: draft.height_feet,
                    soil_quality: draft.soil_quality,
                    sun_exposure: draft.sun_exposure,
                    irrigation_type: draft.irrigation_type,
                    garden_location_id: draft.garden_location_id,
                });
                self.enqueue(PendingOp {
                    key: EntityKey::Plot(local_id),
                    kind: OpKind::Create,
                    rollback: Rollback::Create,
                })
            }
            Intent::PlotGeometryUpdate { plot_local_id, patch } => {
                let Some(plot) = self.plots.iter_mut().find(|p| p.local_id == plot_local_id)
                else {
                    return Vec::new();
                };
                let prior = plot.clone();
                plot.boundary = patch.boundary;
                plot.center = patch.center;
                plot.width_feet = patch.width_feet;
                plot.height_feet = patch.height_feet;
                self.enqueue(PendingOp {
                    key: EntityKey::Plot(plot_local_id),
                    kind: OpKind::Update,
                    rollback: Rollback::UpdatePlot { prior },
                })
            }
            Intent::PlotAttributesUpdate { plot_local_id, patch } => {
                let Some(plot) = self.plots.iter_mut().find(|p| p.local_id == plot_local_id)
                else {
                    return Vec::new();
                };
                let prior = plot.clone();
                plot.name = patch.name;
                plot.soil_quality = patch.soil_quality;
                plot.sun_exposure = patch.sun_exposure;
                plot.irrigation_type = patch.irrigation_type;
                self.enqueue(PendingOp {
                    key: EntityKey::Plot(plot_local_id),
                    kind: OpKind::Update,
                    rollback: Rollback::UpdatePlot { prior },
                })
            }
            Intent::PlotDelete { plot_local_id } => {
                let Some(index) = self.plots.iter().position(|p| p.local_id == plot_local_id)
                else {
                    return Vec::new();
                };
                let prior = self.plots.remove(index);
                self.enqueue(PendingOp {
                    key: EntityKey::Plot(plot_local_id),
                    kind: OpKind::Delete,
                    rollback: Rollback::DeletePlot { prior, index },
                })
            }
            Intent::PlacementCreate(draft) => {
                let local_id = self.alloc_local_id();
                let plot_id = self
                    .plot_by_local(draft.plot_local_id)
                    .and_then(|plot| plot.id);
                self.placements.push(Placement {
                    local_id,
                    id: None,
                    plot_local_id: draft.plot_local_id,
                    plot_id,
                    position: draft.position,
                    plant_type_id: draft.plant_type_id,
                    plant_name: draft.plant_name,
                    plant_icon: draft.plant_icon,
                    plant_color: draft.plant_color,
                    spacing_inches: draft.spacing_inches,
                    sun_requirement: draft.sun_requirement,
                    water_requirement: draft.water_requirement,
                    days_to_harvest: draft.days_to_harvest,
                    scientific_name: draft.scientific_name,
                    category: draft.category,
                    planted_date: draft.planted_date,
                });
                self.enqueue(PendingOp {
                    key: EntityKey::Placement(local_id),
                    kind: OpKind::Create,
                    rollback: Rollback::Create,
                })
            }
            Intent::PlacementMove { placement_local_id, position } => {
                let Some(placement) = self
                    .placements
                    .iter_mut()
                    .find(|p| p.local_id == placement_local_id)
                else {
                    return Vec::new();
                };
                let prior = placement.clone();
                placement.position = position;
                self.enqueue(PendingOp {
                    key: EntityKey::Placement(placement_local_id),
                    kind: OpKind::Update,
                    rollback: Rollback::UpdatePlacement { prior },
                })
            }
            Intent::PlacementDelete { placement_local_id } => {
                let Some(index) = self
                    .placements
                    .iter()
                    .position(|p| p.local_id == placement_local_id)
                else {
                    return Vec::new();
                };
                let prior = self.placements.remove(index);
                self.enqueue(PendingOp {
                    key: EntityKey::Placement(placement_local_id),
                    kind: OpKind::Delete,
                    rollback: Rollback::DeletePlacement { prior, index },
                })
            }
        }
    }

    /// Feed a persistence outcome back and collect the follow-up
    /// dispatches it unblocks.
    pub fn resolve(&mut self, seq: u64, outcome: Outcome) -> ResolveEffect {
        let Some(op) = self.pending.remove(&seq) else {
            return ResolveEffect::default();
        };
        self.in_flight.remove(&op.key);

        match outcome {
            Outcome::Plot(confirmed) => {
                self.merge_plot(op.key, confirmed);
                ResolveEffect {
                    next: self.drain_queue(op.key),
                    failure: None,
                }
            }
            Outcome::Placement(confirmed) => {
                self.merge_placement(op.key, confirmed);
                ResolveEffect {
                    next: self.drain_queue(op.key),
                    failure: None,
                }
            }
            Outcome::Deleted => ResolveEffect {
                next: self.drain_queue(op.key),
                failure: None,
            },
            Outcome::Failed(message) => {
                self.roll_back(&op);
                ResolveEffect {
                    next: Vec::new(),
                    failure: Some(EditError::PersistenceFailure(message)),
                }
            }
        }
    }

    fn alloc_local_id(&mut self) -> u32 {
        let id = self.next_local_id;
        self.next_local_id += 1;
        id
    }

    /// Dispatch an op now, or park it behind whatever it waits on.
    fn enqueue(&mut self, op: PendingOp) -> Vec<OpRequest> {
        if self.entity_busy(op.key) {
            self.queued.entry(op.key).or_default().push_back(op);
            return Vec::new();
        }

        // A placement create cannot go out before its plot has an id
        if let Some(plot_key) = self.unresolved_plot_dependency(&op) {
            self.queued.entry(plot_key).or_default().push_back(op);
            return Vec::new();
        }

        let key = op.key;
        match self.dispatch(op) {
            Some(request) => vec![request],
            None => {
                // The entity vanished before the op could go out;
                // anything still queued for it can never run either
                self.discard_queue(key);
                Vec::new()
            }
        }
    }

    fn entity_busy(&self, key: EntityKey) -> bool {
        self.in_flight.contains_key(&key)
            || self.queued.values().flatten().any(|op| op.key == key)
    }

    fn unresolved_plot_dependency(&self, op: &PendingOp) -> Option<EntityKey> {
        if let (EntityKey::Placement(local_id), OpKind::Create) = (op.key, op.kind) {
            let placement = self.placement_by_local(local_id)?;
            let plot = self.plot_by_local(placement.plot_local_id)?;
            if plot.id.is_none() {
                return Some(EntityKey::Plot(plot.local_id));
            }
        }
        None
    }

    /// Build the wire call from the current canonical state and mark
    /// the op in flight. Returns None only if the entity vanished
    /// (already rolled back), in which case the op is dropped.
    fn dispatch(&mut self, op: PendingOp) -> Option<OpRequest> {
        let call = match (op.key, op.kind) {
            (EntityKey::Plot(local_id), OpKind::Create) => {
                PersistCall::CreatePlot(self.plot_by_local(local_id)?.clone())
            }
            (EntityKey::Plot(local_id), OpKind::Update) => {
                let plot = self.plot_by_local(local_id)?;
                PersistCall::UpdatePlot {
                    id: plot.id?,
                    plot: plot.clone(),
                }
            }
            (EntityKey::Plot(_), OpKind::Delete) => match &op.rollback {
                Rollback::DeletePlot { prior, .. } => PersistCall::DeletePlot { id: prior.id? },
                _ => return None,
            },
            (EntityKey::Placement(local_id), OpKind::Create) => {
                let mut placement = self.placement_by_local(local_id)?.clone();
                // plot_id may have been assigned after the optimistic add
                placement.plot_id = self
                    .plot_by_local(placement.plot_local_id)
                    .and_then(|plot| plot.id);
                PersistCall::CreatePlacement(placement)
            }
            (EntityKey::Placement(local_id), OpKind::Update) => {
                let placement = self.placement_by_local(local_id)?;
                PersistCall::UpdatePlacement {
                    id: placement.id?,
                    placement: placement.clone(),
                }
            }
            (EntityKey::Placement(_), OpKind::Delete) => match &op.rollback {
                Rollback::DeletePlacement { prior, .. } => {
                    PersistCall::DeletePlacement { id: prior.id? }
                }
                _ => return None,
            },
        };

        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight.insert(op.key, seq);
        self.pending.insert(seq, op);
        Some(OpRequest { seq, call })
    }

    /// After an op on `key` resolves, dispatch everything in its
    /// queue that is no longer blocked. FIFO order is preserved per
    /// entity: once one of an entity's ops stays queued, so do the
    /// rest of that entity's ops behind it.
    fn drain_queue(&mut self, key: EntityKey) -> Vec<OpRequest> {
        let Some(waiting) = self.queued.remove(&key) else {
            return Vec::new();
        };

        let mut requests = Vec::new();
        let mut still_waiting: VecDeque<PendingOp> = VecDeque::new();

        for op in waiting {
            let blocked = self.in_flight.contains_key(&op.key)
                || still_waiting.iter().any(|held| held.key == op.key);
            if blocked {
                still_waiting.push_back(op);
                continue;
            }
            let op_key = op.key;
            match self.dispatch(op) {
                Some(request) => requests.push(request),
                None => {
                    // Stale op for an entity deleted while it waited;
                    // drop whatever else is queued for that entity or
                    // it sits there forever
                    self.discard_queue(op_key);
                    still_waiting.retain(|held| held.key != op_key);
                }
            }
        }

        if !still_waiting.is_empty() {
            self.queued.insert(key, still_waiting);
        }
        requests
    }

    fn merge_plot(&mut self, key: EntityKey, mut confirmed: Plot) {
        let EntityKey::Plot(local_id) = key else { return };
        let has_queued_edits = self
            .queued
            .values()
            .flatten()
            .any(|op| op.key == key);

        match self.plots.iter_mut().find(|p| p.local_id == local_id) {
            Some(plot) => {
                if has_queued_edits {
                    // Newer local edits are queued; only adopt the id
                    // so they are not clobbered by the older server
                    // snapshot.
                    plot.id = confirmed.id;
                } else {
                    confirmed.local_id = local_id;
                    *plot = confirmed;
                }
            }
            None => {
                // Deleted locally while the create was in flight; the
                // queued delete still needs the id.
                self.assign_plot_id_in_queue(local_id, confirmed.id);
            }
        }

        // Resolve the foreign reference for placements dropped into
        // this plot before it had an id.
        if let Some(plot) = self.plot_by_local(local_id) {
            let plot_id = plot.id;
            for placement in &mut self.placements {
                if placement.plot_local_id == local_id {
                    placement.plot_id = plot_id;
                }
            }
        }
    }

    fn merge_placement(&mut self, key: EntityKey, mut confirmed: Placement) {
        let EntityKey::Placement(local_id) = key else { return };
        let has_queued_edits = self
            .queued
            .values()
            .flatten()
            .any(|op| op.key == key);

        match self.placements.iter_mut().find(|p| p.local_id == local_id) {
            Some(placement) => {
                if has_queued_edits {
                    placement.id = confirmed.id;
                } else {
                    confirmed.local_id = local_id;
                    confirmed.plot_local_id = placement.plot_local_id;
                    *placement = confirmed;
                }
            }
            None => {
                self.assign_placement_id_in_queue(local_id, confirmed.id);
            }
        }
    }

    fn assign_plot_id_in_queue(&mut self, local_id: u32, id: Option<u32>) {
        for op in self.queued.values_mut().flatten() {
            if op.key == EntityKey::Plot(local_id) {
                if let Rollback::DeletePlot { prior, .. } = &mut op.rollback {
                    prior.id = id;
                }
            }
        }
    }

    fn assign_placement_id_in_queue(&mut self, local_id: u32, id: Option<u32>) {
        for op in self.queued.values_mut().flatten() {
            if op.key == EntityKey::Placement(local_id) {
                if let Rollback::DeletePlacement { prior, .. } = &mut op.rollback {
                    prior.id = id;
                }
            }
        }
    }

    /// Undo the optimistic mutation of a failed op and discard
    /// everything queued behind it — follow-ups were built on a state
    /// that no longer holds.
    fn roll_back(&mut self, op: &PendingOp) {
        match (&op.rollback, op.key) {
            (Rollback::Create, EntityKey::Plot(local_id)) => {
                self.plots.retain(|p| p.local_id != local_id);
                // Placements optimistically dropped into the failed
                // plot cannot exist without it.
                self.placements.retain(|p| p.plot_local_id != local_id);
                self.discard_queue(op.key);
            }
            (Rollback::Create, EntityKey::Placement(local_id)) => {
                self.placements.retain(|p| p.local_id != local_id);
                self.discard_queue(op.key);
            }
            (Rollback::UpdatePlot { prior }, _) => {
                if let Some(plot) = self.plots.iter_mut().find(|p| p.local_id == prior.local_id)
                {
                    *plot = prior.clone();
                }
                self.discard_queue(op.key);
            }
            (Rollback::UpdatePlacement { prior }, _) => {
                if let Some(placement) = self
                    .placements
                    .iter_mut()
                    .find(|p| p.local_id == prior.local_id)
                {
                    *placement = prior.clone();
                }
                self.discard_queue(op.key);
            }
            (Rollback::DeletePlot { prior, index }, _) => {
                let at = (*index).min(self.plots.len());
                self.plots.insert(at, prior.clone());
                self.discard_queue(op.key);
            }
            (Rollback::DeletePlacement { prior, index }, _) => {
                let at = (*index).min(self.placements.len());
                self.placements.insert(at, prior.clone());
                self.discard_queue(op.key);
            }
        }
    }

    fn discard_queue(&mut self, key: EntityKey) {
        // Ops queued under the failed entity, plus any ops for it
        // parked in other queues (a placement create sitting in its
        // plot's queue when the placement is also the failed entity
        // cannot happen, but plot failure discards its whole queue
        // including dependent placement creates).
        if let Some(dropped) = self.queued.remove(&key) {
            for waiting in dropped {
                // A dependent placement create that will never run:
                // its optimistic entity must not survive.
                if let (EntityKey::Placement(local_id), OpKind::Create) =
                    (waiting.key, waiting.kind)
                {
                    self.placements.retain(|p| p.local_id != local_id);
                    self.discard_queue(waiting.key);
                }
            }
        }
        for queue in self.queued.values_mut() {
            queue.retain(|op| op.key != key);
        }
    }
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{PlacementDraft, PlotDraft, PlotGeometryPatch};
    use crate::models::{GeoPoint, IrrigationType, SoilQuality, SunExposure};
    use crate::test_fixtures::{make_placement, make_plot, unit_square};

    fn plot_draft(name: &str) -> PlotDraft {
        PlotDraft {
            name: name.to_string(),
            boundary: unit_square(45.0, -122.0),
            center: GeoPoint::new(45.5, -121.5),
            width_feet: 364000.0,
            height_feet: 364000.0,
            soil_quality: SoilQuality::Good,
            sun_exposure: SunExposure::FullSun,
            irrigation_type: IrrigationType::Manual,
            garden_location_id: 1,
        }
    }

    fn placement_draft(plot_local_id: u32) -> PlacementDraft {
        PlacementDraft {
            plot_local_id,
            position: GeoPoint::new(45.5, -121.5),
            plant_type_id: 1,
            plant_name: "Tomato".to_string(),
            plant_icon: "🍅".to_string(),
            plant_color: "#FF6B6B".to_string(),
            spacing_inches: 24,
            sun_requirement: "full".to_string(),
            water_requirement: "medium".to_string(),
            days_to_harvest: 80,
            scientific_name: "Solanum lycopersicum".to_string(),
            category: "vegetables".to_string(),
            planted_date: "2025-05-01".to_string(),
        }
    }

    fn confirmed_plot(template: &Plot, id: u32) -> Plot {
        let mut plot = template.clone();
        plot.id = Some(id);
        plot.local_id = 0;
        plot
    }

    #[test]
    fn test_create_is_applied_optimistically() {
        let mut sync = SyncController::new();
        let draft_boundary = unit_square(45.0, -122.0);

        let ops = sync.apply(Intent::PlotCreate(plot_draft("Garden Plot 1")));
        assert_eq!(ops.len(), 1);
        assert!(matches!(ops[0].call, PersistCall::CreatePlot(_)));

        // Round-trip before confirmation: the optimistic plot carries
        // the exact submitted boundary, without an id.
        assert_eq!(sync.plots().len(), 1);
        assert_eq!(sync.plots()[0].boundary, draft_boundary);
        assert_eq!(sync.plots()[0].id, None);
    }

    #[test]
    fn test_create_confirm_adopts_server_id() {
        let mut sync = SyncController::new();
        let ops = sync.apply(Intent::PlotCreate(plot_draft("Garden Plot 1")));

        let confirmed = confirmed_plot(&sync.plots()[0], 42);
        let effect = sync.resolve(ops[0].seq, Outcome::Plot(confirmed));

        assert!(effect.failure.is_none());
        assert!(effect.next.is_empty());
        assert_eq!(sync.plots()[0].id, Some(42));
        assert!(!sync.has_pending_ops());
    }

    #[test]
    fn test_create_failure_rolls_back() {
        let mut sync = SyncController::new();
        let ops = sync.apply(Intent::PlotCreate(plot_draft("Garden Plot 1")));
        assert_eq!(sync.plots().len(), 1);

        let effect = sync.resolve(ops[0].seq, Outcome::Failed("boom".to_string()));

        assert!(matches!(effect.failure, Some(EditError::PersistenceFailure(_))));
        assert!(sync.plots().is_empty());
        assert!(!sync.has_pending_ops());
    }

    #[test]
    fn test_update_queues_behind_pending_create() {
        let mut sync = SyncController::new();
        let create_ops = sync.apply(Intent::PlotCreate(plot_draft("Garden Plot 1")));
        let local_id = sync.plots()[0].local_id;

        let moved = unit_square(46.0, -122.0);
        let update_ops = sync.apply(Intent::PlotGeometryUpdate {
            plot_local_id: local_id,
            patch: PlotGeometryPatch {
                boundary: moved.clone(),
                center: GeoPoint::new(46.5, -121.5),
                width_feet: 364000.0,
                height_feet: 364000.0,
            },
        });

        // Nothing dispatched yet, but the edit is visible locally
        assert!(update_ops.is_empty());
        assert_eq!(sync.plots()[0].boundary, moved);

        // Create confirms; the queued update goes out with the real id
        let confirmed = confirmed_plot(&sync.plots()[0], 42);
        let effect = sync.resolve(create_ops[0].seq, Outcome::Plot(confirmed));
        assert_eq!(effect.next.len(), 1);
        match &effect.next[0].call {
            PersistCall::UpdatePlot { id, plot } => {
                assert_eq!(*id, 42);
                assert_eq!(plot.boundary, moved);
            }
            other => panic!("unexpected call: {:?}", other),
        }

        // The merge must not clobber the queued-then-dispatched edit
        assert_eq!(sync.plots()[0].boundary, moved);
        assert_eq!(sync.plots()[0].id, Some(42));
    }

    #[test]
    fn test_update_failure_restores_prior_state() {
        let mut sync = SyncController::new();
        sync.set_loaded(vec![make_plot(1, unit_square(45.0, -122.0))], Vec::new());
        let local_id = sync.plots()[0].local_id;
        let original = sync.plots()[0].clone();

        let ops = sync.apply(Intent::PlotGeometryUpdate {
            plot_local_id: local_id,
            patch: PlotGeometryPatch {
                boundary: unit_square(46.0, -122.0),
                center: GeoPoint::new(46.5, -121.5),
                width_feet: 364000.0,
                height_feet: 364000.0,
            },
        });
        assert_eq!(sync.plots()[0].boundary, unit_square(46.0, -122.0));

        let effect = sync.resolve(ops[0].seq, Outcome::Failed("timeout".to_string()));
        assert!(effect.failure.is_some());
        assert_eq!(sync.plots()[0], original);
    }

    #[test]
    fn test_delete_failure_reinserts_at_original_index() {
        let mut sync = SyncController::new();
        sync.set_loaded(
            vec![
                make_plot(1, unit_square(0.0, 0.0)),
                make_plot(2, unit_square(10.0, 10.0)),
            ],
            Vec::new(),
        );
        let first_local = sync.plots()[0].local_id;
        let first = sync.plots()[0].clone();

        let ops = sync.apply(Intent::PlotDelete { plot_local_id: first_local });
        assert_eq!(sync.plots().len(), 1);

        let effect = sync.resolve(ops[0].seq, Outcome::Failed("conflict".to_string()));
        assert!(effect.failure.is_some());
        assert_eq!(sync.plots().len(), 2);
        assert_eq!(sync.plots()[0], first);
    }

    #[test]
    fn test_placement_create_waits_for_plot_id() {
        let mut sync = SyncController::new();
        let create_ops = sync.apply(Intent::PlotCreate(plot_draft("Garden Plot 1")));
        let plot_local = sync.plots()[0].local_id;

        let placement_ops = sync.apply(Intent::PlacementCreate(placement_draft(plot_local)));
        assert!(placement_ops.is_empty());
        // Optimistically present, with the plot reference unresolved
        assert_eq!(sync.placements().len(), 1);
        assert_eq!(sync.placements()[0].plot_id, None);

        let confirmed = confirmed_plot(&sync.plots()[0], 42);
        let effect = sync.resolve(create_ops[0].seq, Outcome::Plot(confirmed));

        assert_eq!(effect.next.len(), 1);
        match &effect.next[0].call {
            PersistCall::CreatePlacement(placement) => {
                assert_eq!(placement.plot_id, Some(42));
            }
            other => panic!("unexpected call: {:?}", other),
        }
        assert_eq!(sync.placements()[0].plot_id, Some(42));
    }

    #[test]
    fn test_plot_create_failure_cascades_queued_placement() {
        let mut sync = SyncController::new();
        let create_ops = sync.apply(Intent::PlotCreate(plot_draft("Garden Plot 1")));
        let plot_local = sync.plots()[0].local_id;
        sync.apply(Intent::PlacementCreate(placement_draft(plot_local)));
        assert_eq!(sync.placements().len(), 1);

        let effect = sync.resolve(create_ops[0].seq, Outcome::Failed("boom".to_string()));

        assert!(effect.failure.is_some());
        assert!(sync.plots().is_empty());
        assert!(sync.placements().is_empty());
        assert!(!sync.has_pending_ops());
    }

    #[test]
    fn test_move_dispatches_immediately_for_persisted_placement() {
        let mut sync = SyncController::new();
        sync.set_loaded(
            vec![make_plot(1, unit_square(45.0, -122.0))],
            vec![make_placement(5, 1, GeoPoint::new(45.5, -121.5))],
        );
        let local_id = sync.placements()[0].local_id;
        let server_id = sync.placements()[0].id.unwrap();

        let ops = sync.apply(Intent::PlacementMove {
            placement_local_id: local_id,
            position: GeoPoint::new(45.6, -121.4),
        });
        assert_eq!(ops.len(), 1);
        match &ops[0].call {
            PersistCall::UpdatePlacement { id, placement } => {
                assert_eq!(*id, server_id);
                assert_eq!(placement.position, GeoPoint::new(45.6, -121.4));
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[test]
    fn test_delete_while_create_pending_queues_then_uses_new_id() {
        let mut sync = SyncController::new();
        let create_ops = sync.apply(Intent::PlotCreate(plot_draft("Garden Plot 1")));
        let plot_local = sync.plots()[0].local_id;
        let optimistic = sync.plots()[0].clone();

        let delete_ops = sync.apply(Intent::PlotDelete { plot_local_id: plot_local });
        assert!(delete_ops.is_empty());
        assert!(sync.plots().is_empty());

        let effect = sync.resolve(create_ops[0].seq, Outcome::Plot(confirmed_plot(&optimistic, 42)));
        assert_eq!(effect.next.len(), 1);
        assert_eq!(effect.next[0].call, PersistCall::DeletePlot { id: 42 });
        // The confirm must not resurrect the locally-deleted plot
        assert!(sync.plots().is_empty());
    }

    #[test]
    fn test_placement_deleted_before_plot_confirm_leaves_no_queued_ops() {
        let mut sync = SyncController::new();
        let create_ops = sync.apply(Intent::PlotCreate(plot_draft("Garden Plot 1")));
        let plot_local = sync.plots()[0].local_id;

        // Placement create parks behind the plot's unresolved id,
        // then the placement is deleted while both are pending
        sync.apply(Intent::PlacementCreate(placement_draft(plot_local)));
        let placement_local = sync.placements()[0].local_id;
        let delete_ops = sync.apply(Intent::PlacementDelete {
            placement_local_id: placement_local,
        });
        assert!(delete_ops.is_empty());
        assert!(sync.placements().is_empty());

        let confirmed = confirmed_plot(&sync.plots()[0], 42);
        let effect = sync.resolve(create_ops[0].seq, Outcome::Plot(confirmed));

        // The stale create is dropped, and the delete of a
        // never-persisted placement goes with it instead of sitting
        // in the queue forever
        assert!(effect.next.is_empty());
        assert!(!sync.has_pending_ops());
        assert_eq!(sync.plots()[0].id, Some(42));
    }
}
