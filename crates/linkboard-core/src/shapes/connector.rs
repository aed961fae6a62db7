//! Directed connector between two boxes.
//!
//! A connector only stores the ids of its endpoints. Its line and
//! arrowhead are derived from the live box rectangles on every query, so
//! they can never go stale after a move or resize.

use super::ShapeId;
use crate::canvas::{CanvasDocument, CanvasError};
use crate::geometry::{arrowhead_polygon, line_angle, line_rect_intersection, nearest_boundary_points};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for connectors.
pub type ConnectorId = Uuid;

/// How connector endpoints are placed on the two boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Routing {
    /// Clip the center-to-center line at each box boundary.
    #[default]
    CenterLine,
    /// Clamp each box's center into the other box (cheap nearest points).
    NearestBoundary,
}

/// Visual parameters for connectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorStyle {
    /// Length of each arrowhead barb.
    pub head_size: f64,
    /// Where the arrowhead tip sits along the visible segment (0 = start, 1 = end).
    pub anchor_ratio: f64,
    pub routing: Routing,
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        Self {
            head_size: 10.0,
            anchor_ratio: 0.75,
            routing: Routing::default(),
        }
    }
}

/// Derived drawing geometry for one connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorGeometry {
    /// Point on the source boundary.
    pub start: Point,
    /// Point on the target boundary.
    pub end: Point,
    /// Arrowhead tip, between `start` and `end`.
    pub anchor: Point,
    /// Tip followed by the two barb points.
    pub arrowhead: [Point; 3],
}

impl ConnectorGeometry {
    /// True when the visible segment collapsed to a point.
    pub fn is_degenerate(&self) -> bool {
        (self.end - self.start).hypot2() < f64::EPSILON
    }
}

/// Segment endpoints between two rectangles.
pub fn endpoints(from: Rect, to: Rect, routing: Routing) -> (Point, Point) {
    match routing {
        Routing::CenterLine => {
            let (c1, c2) = (from.center(), to.center());
            (
                line_rect_intersection(c1, c2, from),
                line_rect_intersection(c2, c1, to),
            )
        }
        Routing::NearestBoundary => nearest_boundary_points(from, to),
    }
}

/// Full connector geometry between two rectangles.
pub fn route(from: Rect, to: Rect, style: &ConnectorStyle) -> ConnectorGeometry {
    let (start, end) = endpoints(from, to, style.routing);
    let anchor = start.lerp(end, style.anchor_ratio);

    // A collapsed segment has no direction of its own; fall back to the centers.
    let angle = if (end - start).hypot2() >= f64::EPSILON {
        line_angle(start, end)
    } else if (to.center() - from.center()).hypot2() >= f64::EPSILON {
        line_angle(from.center(), to.center())
    } else {
        0.0
    };

    ConnectorGeometry {
        start,
        end,
        anchor,
        arrowhead: arrowhead_polygon(anchor, angle, style.head_size),
    }
}

/// A directed edge from one box to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    pub(crate) id: ConnectorId,
    /// Box the connector leaves from.
    pub source: ShapeId,
    /// Box the arrowhead points at.
    pub target: ShapeId,
}

impl Connector {
    pub fn new(source: ShapeId, target: ShapeId) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            target,
        }
    }

    pub fn id(&self) -> ConnectorId {
        self.id
    }

    /// Check if either end is attached to `shape`.
    pub fn references(&self, shape: ShapeId) -> bool {
        self.source == shape || self.target == shape
    }

    /// False once either box has left the document.
    pub fn is_valid(&self, document: &CanvasDocument) -> bool {
        document.get_shape(self.source).is_some() && document.get_shape(self.target).is_some()
    }

    fn rects(&self, document: &CanvasDocument) -> Result<(Rect, Rect), CanvasError> {
        let source = document
            .get_shape(self.source)
            .ok_or(CanvasError::InvalidReference(self.source))?;
        let target = document
            .get_shape(self.target)
            .ok_or(CanvasError::InvalidReference(self.target))?;
        Ok((source.bounds(), target.bounds()))
    }

    /// Visible segment, clipped to both box boundaries.
    pub fn endpoints(
        &self,
        document: &CanvasDocument,
        routing: Routing,
    ) -> Result<(Point, Point), CanvasError> {
        let (from, to) = self.rects(document)?;
        Ok(endpoints(from, to, routing))
    }

    /// Where the arrowhead tip sits.
    pub fn arrow_anchor(
        &self,
        document: &CanvasDocument,
        style: &ConnectorStyle,
    ) -> Result<Point, CanvasError> {
        Ok(self.geometry(document, style)?.anchor)
    }

    pub fn geometry(
        &self,
        document: &CanvasDocument,
        style: &ConnectorStyle,
    ) -> Result<ConnectorGeometry, CanvasError> {
        let (from, to) = self.rects(document)?;
        Ok(route(from, to, style))
    }
}
