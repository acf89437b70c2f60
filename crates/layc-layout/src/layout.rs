//! The layout compiler: geometric primitives lowered to equations.
//!
//! Nothing here solves anything. Rectangles, anchors, links and fixes are
//! compiled into expression strings and assignments for the owned
//! [`LinearSystem`], following the `{entity}.{feature}.{axis}` naming
//! scheme. After a solve the geometry is recovered purely by symbol
//! lookup, which also picks up rectangles the user described with raw
//! equations under typed names like `rectangle_1.min.x`.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

use layc_solve::{LinearSystem, ParseError, SymbolState};
use layc_util::Handler;

use crate::geometry::{Rect, Vec2};
use crate::path::{Axis, Feature, SymbolPath};

/// Id of a layout entity (rectangle or link).
///
/// Allocated from one monotonic counter per layout, so every entity gets
/// a distinct symbol prefix. Distinct from symbol ids, which belong to
/// the symbol table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// The raw id value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error produced by the layout operations.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The entity id does not name a rectangle of this layout.
    #[error("Unknown rectangle id {0}")]
    UnknownRectangle(EntityId),

    /// An internally generated equation failed to parse. Reaching this
    /// indicates a bug in the equation emitter.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Per-rectangle bookkeeping: which lazy anchors have defining equations.
#[derive(Debug, Default)]
struct RectangleEntity {
    b_anchor: bool,
    d_anchor: bool,
}

/// Which rectangles a link connects.
#[derive(Debug)]
struct LinkEntity {
    src: EntityId,
    dst: EntityId,
}

/// A rectangle recovered from a solved system.
#[derive(Clone, Debug, PartialEq)]
pub struct SolvedRectangle {
    /// The entity prefix of the rectangle's symbols.
    pub entity: String,
    /// Its corners.
    pub rect: Rect,
}

/// A 2D layout described by rectangles and links, compiled to a linear
/// system.
///
/// # Example
///
/// ```
/// use layc_layout::{Feature, Layout};
/// use layc_util::Handler;
///
/// let mut layout = Layout::new();
/// let a = layout.rectangle_with_size(90.0, 20.0).unwrap();
/// let b = layout.rectangle_with_size(90.0, 20.0).unwrap();
/// layout.fix(a, Feature::Min, 100.0, 100.0).unwrap();
/// layout.link(a, Feature::B, b, Feature::Min, 10.0, 15.0).unwrap();
///
/// let mut handler = Handler::new();
/// assert!(layout.solve(&mut handler));
/// assert_eq!(layout.symbol_value(&format!("{b}.min.x")), 110.0);
/// ```
#[derive(Debug, Default)]
pub struct Layout {
    system: LinearSystem,
    next_id: u64,
    rectangles: IndexMap<EntityId, RectangleEntity>,
    links: IndexMap<EntityId, LinkEntity>,
}

impl Layout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rectangle of the given size.
    ///
    /// Defines `min`, `max` and `size` symbols on both axes, ties them
    /// together with `min + size - max = 0`, and assigns the size. The
    /// position stays free until some link or fix determines it.
    pub fn rectangle_with_size(&mut self, width: f64, height: f64) -> Result<EntityId, LayoutError> {
        let id = self.alloc_id();
        for axis in [Axis::X, Axis::Y] {
            self.system.add_equation(&format!(
                "{id}.min.{axis} + {id}.size.{axis} - {id}.max.{axis}"
            ))?;
        }
        self.system.assign(&sym(id, Feature::Size, Axis::X), width);
        self.system.assign(&sym(id, Feature::Size, Axis::Y), height);
        self.rectangles.insert(id, RectangleEntity::default());
        Ok(id)
    }

    /// Add the defining equations for an optional anchor.
    ///
    /// `B` is the bottom-left point `(min.x, min.y + size.y)` and `D` the
    /// top-right point `(min.x + size.x, min.y)`. The other features are
    /// present from creation and need no equations. Calling this twice
    /// adds duplicate equations; they are linearly dependent and do not
    /// disturb the solution.
    pub fn add_anchor(&mut self, id: EntityId, anchor: Feature) -> Result<(), LayoutError> {
        let rectangle = self
            .rectangles
            .get_mut(&id)
            .ok_or(LayoutError::UnknownRectangle(id))?;
        match anchor {
            Feature::B => {
                rectangle.b_anchor = true;
                self.system.add_equation(&format!("{id}.min.x - {id}.b.x"))?;
                self.system.add_equation(&format!("{id}.min.y + {id}.size.y - {id}.b.y"))?;
            }
            Feature::D => {
                rectangle.d_anchor = true;
                self.system.add_equation(&format!("{id}.min.x + {id}.size.x - {id}.d.x"))?;
                self.system.add_equation(&format!("{id}.min.y - {id}.d.y"))?;
            }
            Feature::Min | Feature::Max | Feature::Size => {}
        }
        Ok(())
    }

    /// Pin `dst`'s anchor at a fixed offset from `src`'s anchor.
    ///
    /// Compiles to `src.anchor.axis + d.axis - dst.anchor.axis = 0` per
    /// axis, where `d` belongs to the freshly allocated link entity, and
    /// assigns `d = (dx, dy)`. Anchors that need defining equations get
    /// them on first use.
    pub fn link(
        &mut self,
        src: EntityId,
        src_anchor: Feature,
        dst: EntityId,
        dst_anchor: Feature,
        dx: f64,
        dy: f64,
    ) -> Result<EntityId, LayoutError> {
        self.ensure_anchor(src, src_anchor)?;
        self.ensure_anchor(dst, dst_anchor)?;

        let id = self.alloc_id();
        for axis in [Axis::X, Axis::Y] {
            self.system.add_equation(&format!(
                "{src}.{src_anchor}.{axis} + {id}.d.{axis} - {dst}.{dst_anchor}.{axis}"
            ))?;
        }
        self.system.assign(&sym(id, Feature::D, Axis::X), dx);
        self.system.assign(&sym(id, Feature::D, Axis::Y), dy);
        self.links.insert(id, LinkEntity { src, dst });
        Ok(id)
    }

    /// Assign an anchor of a rectangle to a concrete position.
    ///
    /// Fixing `B` or `D` adds the anchor's defining equations first when
    /// they are missing, so the rest of the rectangle follows from the
    /// fixed point.
    pub fn fix(
        &mut self,
        id: EntityId,
        anchor: Feature,
        x: f64,
        y: f64,
    ) -> Result<(), LayoutError> {
        self.ensure_anchor(id, anchor)?;
        self.system.assign(&sym(id, anchor, Axis::X), x);
        self.system.assign(&sym(id, anchor, Axis::Y), y);
        Ok(())
    }

    /// Append a user-written equation to the underlying system.
    ///
    /// Symbols following the `{type}_{id}.{feature}.{axis}` convention
    /// coexist with engine-generated ones and are picked up by
    /// [`solved_rectangles`](Self::solved_rectangles).
    pub fn add_equation(&mut self, text: &str) -> Result<(), ParseError> {
        self.system.add_equation(text)
    }

    /// Assign a symbol of the underlying system by name.
    pub fn assign(&mut self, name: &str, value: f64) {
        self.system.assign(name, value);
    }

    /// Solve the compiled system. See [`LinearSystem::solve`].
    pub fn solve(&mut self, handler: &mut Handler) -> bool {
        self.system.solve(handler)
    }

    /// Value of a symbol by name.
    pub fn symbol_value(&self, name: &str) -> f64 {
        self.system.symbol_value(name)
    }

    /// The underlying linear system.
    pub fn system(&self) -> &LinearSystem {
        &self.system
    }

    /// Ids of the rectangles created through this layout, in creation
    /// order.
    pub fn rectangles(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.rectangles.keys().copied()
    }

    /// Ids of the links created through this layout, with the rectangles
    /// they connect, in creation order.
    pub fn links(&self) -> impl Iterator<Item = (EntityId, EntityId, EntityId)> + '_ {
        self.links.iter().map(|(&id, link)| (id, link.src, link.dst))
    }

    /// Recover every rectangle with a determined position from the
    /// solved system, in entity name order.
    ///
    /// Discovery is by symbol enumeration: any entity whose `min` and
    /// `max` symbols carry values is included, whether it was created
    /// through this layout or written as raw equations under a
    /// `rectangle_N` name. Entities with undetermined corners are left
    /// out.
    pub fn solved_rectangles(&self) -> Vec<SolvedRectangle> {
        #[derive(Default)]
        struct Corners {
            min: [Option<f64>; 2],
            max: [Option<f64>; 2],
        }

        let mut corners: BTreeMap<&str, Corners> = BTreeMap::new();
        for (name, state, value) in self.system.symbols() {
            if state == SymbolState::Unassigned {
                continue;
            }
            let Some(path) = SymbolPath::parse(name) else { continue };
            let slot = match path.axis {
                Axis::X => 0,
                Axis::Y => 1,
            };
            let entry = corners.entry(path.entity).or_default();
            match path.feature {
                Feature::Min => entry.min[slot] = Some(value),
                Feature::Max => entry.max[slot] = Some(value),
                _ => {}
            }
        }

        corners
            .into_iter()
            .filter_map(|(entity, c)| {
                let rect = Rect::new(
                    Vec2::new(c.min[0]?, c.min[1]?),
                    Vec2::new(c.max[0]?, c.max[1]?),
                );
                Some(SolvedRectangle { entity: entity.to_string(), rect })
            })
            .collect()
    }

    fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an anchor's defining equations unless they are already there.
    fn ensure_anchor(&mut self, id: EntityId, anchor: Feature) -> Result<(), LayoutError> {
        let rectangle = self
            .rectangles
            .get(&id)
            .ok_or(LayoutError::UnknownRectangle(id))?;
        let present = match anchor {
            Feature::B => rectangle.b_anchor,
            Feature::D => rectangle.d_anchor,
            Feature::Min | Feature::Max | Feature::Size => true,
        };
        if !present {
            self.add_anchor(id, anchor)?;
        }
        Ok(())
    }
}

/// Format the symbol name of one entity feature component.
fn sym(id: EntityId, feature: Feature, axis: Axis) -> String {
    format!("{id}.{feature}.{axis}")
}
