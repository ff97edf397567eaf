//! Editable curve collection: control points in an arena, grouped into
//! ordered curves, with one curve marked current.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use tracing::{debug, instrument, warn};

use crate::config::EditorConfig;
use crate::curve::{Curve, Parameterization};
use crate::error::KernelError;
use crate::geometry::matrix::Matrix3x3;
use crate::geometry::Point2;
use crate::gesture::GestureSnapshot;

// ─── Entity Keys ─────────────────────────────────────────────────────────────

new_key_type! {
    pub struct CurveId;
    pub struct ControlPointId;
}

// ─── Entities ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub position: Point2,
    /// The curve this point belongs to.
    pub curve: CurveId,
}

#[derive(Debug, Clone, Default)]
struct CurveEntry {
    points: Vec<ControlPointId>,
}

// ─── Curve Set ───────────────────────────────────────────────────────────────

/// All curves being edited. There is always at least one curve, and
/// `current` always indexes `order`; only the methods below build one.
#[derive(Debug, Clone)]
pub struct CurveSet {
    points: SlotMap<ControlPointId, ControlPoint>,
    curves: SlotMap<CurveId, CurveEntry>,
    order: Vec<CurveId>,
    current: usize,
    /// Radius used by the position-based picking helpers.
    pub pick_radius: f64,
}

impl Default for CurveSet {
    fn default() -> Self {
        Self::new(EditorConfig::default().control_point_radius)
    }
}

impl CurveSet {
    /// A set holding a single empty curve.
    pub fn new(pick_radius: f64) -> Self {
        let mut curves = SlotMap::with_key();
        let first = curves.insert(CurveEntry::default());
        Self {
            points: SlotMap::with_key(),
            curves,
            order: vec![first],
            current: 0,
            pick_radius,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.control_point_radius)
    }

    pub fn curve_count(&self) -> usize {
        self.order.len()
    }

    /// Curve ids in creation order.
    pub fn curve_ids(&self) -> &[CurveId] {
        &self.order
    }

    pub fn current_curve_id(&self) -> CurveId {
        self.order[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn point(&self, id: ControlPointId) -> Option<&ControlPoint> {
        self.points.get(id)
    }

    pub fn position(&self, id: ControlPointId) -> Option<Point2> {
        self.points.get(id).map(|cp| cp.position)
    }

    /// Control points of `curve` in order. Unknown curves have none.
    pub fn control_points(&self, curve: CurveId) -> &[ControlPointId] {
        self.curves
            .get(curve)
            .map(|entry| entry.points.as_slice())
            .unwrap_or(&[])
    }

    /// Every control point of every curve, curve by curve.
    pub fn all_control_points(&self) -> Vec<ControlPointId> {
        self.order
            .iter()
            .flat_map(|&c| self.control_points(c).iter().copied())
            .collect()
    }

    fn current_is_empty(&self) -> bool {
        self.control_points(self.current_curve_id()).is_empty()
    }

    /// Start a new curve and make it current.
    ///
    /// Refused while the current curve has no points.
    #[instrument(skip(self))]
    pub fn new_curve(&mut self) -> Option<CurveId> {
        if self.current_is_empty() {
            warn!("current curve is empty, no curve created");
            return None;
        }
        let id = self.curves.insert(CurveEntry::default());
        self.order.push(id);
        self.current = self.order.len() - 1;
        debug!(?id, count = self.order.len(), "created curve");
        Some(id)
    }

    /// Make `id` the current curve.
    pub fn select_curve(&mut self, id: CurveId) -> Result<(), KernelError> {
        let index = self
            .order
            .iter()
            .position(|&c| c == id)
            .ok_or(KernelError::StaleCurve)?;
        self.current = index;
        Ok(())
    }

    pub fn prev_curve(&mut self) -> CurveId {
        self.current = (self.current + self.order.len() - 1) % self.order.len();
        self.current_curve_id()
    }

    pub fn next_curve(&mut self) -> CurveId {
        self.current = (self.current + 1) % self.order.len();
        self.current_curve_id()
    }

    /// Delete the current curve and its points.
    ///
    /// Refused while the current curve has no points. The curve that
    /// followed the deleted one becomes current; deleting the last curve
    /// leaves a fresh empty one.
    #[instrument(skip(self))]
    pub fn delete_current_curve(&mut self) -> bool {
        if self.current_is_empty() {
            warn!("current curve is empty, nothing deleted");
            return false;
        }
        let id = self.order.remove(self.current);
        if let Some(entry) = self.curves.remove(id) {
            for cp in entry.points {
                self.points.remove(cp);
            }
        }
        if self.order.is_empty() {
            let fresh = self.curves.insert(CurveEntry::default());
            self.order.push(fresh);
            self.current = 0;
        } else {
            self.current %= self.order.len();
        }
        debug!(?id, remaining = self.order.len(), "deleted curve");
        true
    }

    /// Append a control point to the current curve.
    #[instrument(skip(self), fields(position = ?[position.x, position.y]))]
    pub fn append_point(&mut self, position: Point2) -> ControlPointId {
        let curve = self.current_curve_id();
        let id = self.points.insert(ControlPoint { position, curve });
        if let Some(entry) = self.curves.get_mut(curve) {
            entry.points.push(id);
        }
        debug!(?id, ?curve, "appended control point");
        id
    }

    /// Remove a control point from whichever curve owns it.
    ///
    /// Returns the removed point's position, or `None` for a stale handle.
    #[instrument(skip(self))]
    pub fn remove_point(&mut self, id: ControlPointId) -> Option<Point2> {
        let cp = self.points.remove(id)?;
        if let Some(entry) = self.curves.get_mut(cp.curve) {
            entry.points.retain(|&p| p != id);
        }
        debug!(?id, curve = ?cp.curve, "removed control point");
        Some(cp.position)
    }

    /// Points of `candidates` within `radius` of `position`, closest first.
    ///
    /// Equal distances keep their order in `candidates`. Stale ids are skipped.
    pub fn points_in_radius(
        &self,
        candidates: &[ControlPointId],
        position: &Point2,
        radius: f64,
    ) -> Vec<ControlPointId> {
        let mut hits: Vec<(f64, ControlPointId)> = candidates
            .iter()
            .filter_map(|&id| {
                let cp = self.points.get(id)?;
                let d = nalgebra::distance(&cp.position, position);
                (d <= radius).then_some((d, id))
            })
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits.into_iter().map(|(_, id)| id).collect()
    }

    /// Remove the current curve's point closest to `position`, if any lies
    /// within the pick radius.
    pub fn try_remove_point_at(&mut self, position: &Point2) -> Option<Point2> {
        let candidates = self.control_points(self.current_curve_id()).to_vec();
        let closest = *self
            .points_in_radius(&candidates, position, self.pick_radius)
            .first()?;
        self.remove_point(closest)
    }

    /// Closest point of any curve within the pick radius.
    pub fn pick_any(&self, position: &Point2) -> Option<ControlPointId> {
        self.points_in_radius(&self.all_control_points(), position, self.pick_radius)
            .first()
            .copied()
    }

    pub fn move_point(&mut self, id: ControlPointId, position: Point2) -> Result<(), KernelError> {
        let cp = self
            .points
            .get_mut(id)
            .ok_or(KernelError::StaleControlPoint)?;
        cp.position = position;
        Ok(())
    }

    /// Snapshot of a curve's current point positions.
    pub fn curve(
        &self,
        id: CurveId,
        parameterization: Parameterization,
        closed: bool,
    ) -> Option<Curve> {
        let entry = self.curves.get(id)?;
        let points = entry
            .points
            .iter()
            .filter_map(|&p| self.position(p))
            .collect();
        Some(Curve::new(points, parameterization).with_closed(closed))
    }

    pub fn current_curve(&self, parameterization: Parameterization, closed: bool) -> Curve {
        let points = self
            .control_points(self.current_curve_id())
            .iter()
            .filter_map(|&p| self.position(p))
            .collect();
        Curve::new(points, parameterization).with_closed(closed)
    }

    /// Record `pivot` and the positions of `ids` at the start of a gesture.
    pub fn begin_gesture(&self, ids: &[ControlPointId], pivot: Point2) -> GestureSnapshot {
        let originals = ids
            .iter()
            .filter_map(|&id| self.position(id).map(|p| (id, p)))
            .collect();
        GestureSnapshot { pivot, originals }
    }

    /// Set every snapshot point to `matrix * original`.
    ///
    /// Always starts from the snapshot, so repeated updates never compound.
    /// Points deleted since the snapshot are skipped.
    #[instrument(skip(self, snapshot, matrix), fields(points = snapshot.originals.len()))]
    pub fn apply_gesture(&mut self, snapshot: &GestureSnapshot, matrix: &Matrix3x3) {
        for (id, original) in &snapshot.originals {
            if let Some(cp) = self.points.get_mut(*id) {
                cp.position = matrix.transform_point(original);
            }
        }
    }
}
