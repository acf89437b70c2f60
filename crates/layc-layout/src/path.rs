//! Structured symbol names.
//!
//! Every geometric symbol follows the shape `{entity}.{feature}.{axis}`.
//! Engine-generated entities are bare integer ids (`0.min.x`); user
//! equations may use typed names such as `rectangle_1.min.x` or
//! `link_2.d.x`, which go through the exact same rules. Parsing a name
//! back into its parts is how the renderer discovers geometry it was
//! never told about explicitly.

use std::fmt;

/// A coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The axis component of a symbol name.
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }

    fn parse(text: &str) -> Option<Self> {
        match text {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named point or extent on an entity.
///
/// `Min`, `Max` and `Size` exist on every rectangle from creation. `B`
/// (bottom-left) and `D` (top-right) are optional anchors whose defining
/// equations are introduced lazily. `D` is also the offset feature of a
/// link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
    /// Top-left corner.
    Min,
    /// Bottom-left anchor.
    B,
    /// Bottom-right corner.
    Max,
    /// Top-right anchor, or a link's offset vector.
    D,
    /// Width and height.
    Size,
}

impl Feature {
    /// The feature component of a symbol name.
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Min => "min",
            Feature::B => "b",
            Feature::Max => "max",
            Feature::D => "d",
            Feature::Size => "size",
        }
    }

    fn parse(text: &str) -> Option<Self> {
        match text {
            "min" => Some(Feature::Min),
            "b" => Some(Feature::B),
            "max" => Some(Feature::Max),
            "d" => Some(Feature::D),
            "size" => Some(Feature::Size),
            _ => None,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A symbol name split into its three parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolPath<'a> {
    /// The entity prefix: an integer id or a typed user name.
    pub entity: &'a str,
    pub feature: Feature,
    pub axis: Axis,
}

impl<'a> SymbolPath<'a> {
    /// Split `name` into entity, feature and axis.
    ///
    /// Returns `None` for names that do not follow the geometric scheme;
    /// such symbols are legal in the system but carry no geometry.
    pub fn parse(name: &'a str) -> Option<Self> {
        let mut parts = name.rsplitn(3, '.');
        let axis = Axis::parse(parts.next()?)?;
        let feature = Feature::parse(parts.next()?)?;
        let entity = parts.next()?;
        if entity.is_empty() {
            return None;
        }
        Some(Self { entity, feature, axis })
    }
}
