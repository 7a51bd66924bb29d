//! Floating element positioning
//!
//! The geometry lives behind the [`Positioner`] trait so hosts can plug in
//! their own layout math; [`CellPositioner`] is the terminal-cell default.
//! [`PopperInstance`] wraps a positioner with the create/update/destroy
//! lifecycle used by [`Popper`](crate::Popper).

mod compute;
mod instance;

pub use compute::CellPositioner;
pub use instance::PopperInstance;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Shared handle to an element's laid-out area.
///
/// The render pass attaches the area it drew an element into; positioning
/// reads it back. Cloning shares the same slot.
#[derive(Clone, Default)]
pub struct ElementRef(Rc<Cell<Option<Rect>>>);

impl ElementRef {
    /// Create a detached element
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element already attached at `area`
    pub fn attached(area: Rect) -> Self {
        let element = Self::new();
        element.attach(area);
        element
    }

    /// Record the area the element was laid out into
    pub fn attach(&self, area: Rect) {
        self.0.set(Some(area));
    }

    /// Forget the element's area
    pub fn detach(&self) {
        self.0.set(None);
    }

    /// Current area, if attached
    pub fn rect(&self) -> Option<Rect> {
        self.0.get()
    }

    /// Attached with a non-empty area
    pub fn is_attached(&self) -> bool {
        self.rect().is_some_and(|r| r.width > 0 && r.height > 0)
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementRef").field(&self.rect()).finish()
    }
}

/// Side of the anchor the floating element is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// The side across the anchor
    pub fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Whether the main axis is vertical
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

/// Alignment along the cross axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Start,
    Center,
    End,
}

/// Where the floating element sits relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    Top,
    TopStart,
    TopEnd,
    #[default]
    Bottom,
    BottomStart,
    BottomEnd,
    Left,
    LeftStart,
    LeftEnd,
    Right,
    RightStart,
    RightEnd,
}

impl Placement {
    /// All twelve placements
    pub const ALL: [Placement; 12] = [
        Placement::Top,
        Placement::TopStart,
        Placement::TopEnd,
        Placement::Bottom,
        Placement::BottomStart,
        Placement::BottomEnd,
        Placement::Left,
        Placement::LeftStart,
        Placement::LeftEnd,
        Placement::Right,
        Placement::RightStart,
        Placement::RightEnd,
    ];

    /// Build from a side and an alignment
    pub fn new(side: Side, alignment: Alignment) -> Self {
        use Alignment::*;
        match (side, alignment) {
            (Side::Top, Center) => Placement::Top,
            (Side::Top, Start) => Placement::TopStart,
            (Side::Top, End) => Placement::TopEnd,
            (Side::Bottom, Center) => Placement::Bottom,
            (Side::Bottom, Start) => Placement::BottomStart,
            (Side::Bottom, End) => Placement::BottomEnd,
            (Side::Left, Center) => Placement::Left,
            (Side::Left, Start) => Placement::LeftStart,
            (Side::Left, End) => Placement::LeftEnd,
            (Side::Right, Center) => Placement::Right,
            (Side::Right, Start) => Placement::RightStart,
            (Side::Right, End) => Placement::RightEnd,
        }
    }

    pub fn side(self) -> Side {
        match self {
            Placement::Top | Placement::TopStart | Placement::TopEnd => Side::Top,
            Placement::Bottom | Placement::BottomStart | Placement::BottomEnd => Side::Bottom,
            Placement::Left | Placement::LeftStart | Placement::LeftEnd => Side::Left,
            Placement::Right | Placement::RightStart | Placement::RightEnd => Side::Right,
        }
    }

    pub fn alignment(self) -> Alignment {
        match self {
            Placement::Top | Placement::Bottom | Placement::Left | Placement::Right => {
                Alignment::Center
            }
            Placement::TopStart
            | Placement::BottomStart
            | Placement::LeftStart
            | Placement::RightStart => Alignment::Start,
            Placement::TopEnd | Placement::BottomEnd | Placement::LeftEnd | Placement::RightEnd => {
                Alignment::End
            }
        }
    }

    /// Same alignment on the opposite side (the default flip target)
    pub fn opposite(self) -> Self {
        Placement::new(self.side().opposite(), self.alignment())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Placement::Top => "top",
            Placement::TopStart => "top-start",
            Placement::TopEnd => "top-end",
            Placement::Bottom => "bottom",
            Placement::BottomStart => "bottom-start",
            Placement::BottomEnd => "bottom-end",
            Placement::Left => "left",
            Placement::LeftStart => "left-start",
            Placement::LeftEnd => "left-end",
            Placement::Right => "right",
            Placement::RightStart => "right-start",
            Placement::RightEnd => "right-end",
        }
    }
}

impl FromStr for Placement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Placement::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| ConfigError::UnknownPlacement(s.to_string()))
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinate space of the reported position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Relative to the boundary origin
    #[default]
    Absolute,
    /// Relative to the screen
    Fixed,
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absolute" => Ok(Strategy::Absolute),
            "fixed" => Ok(Strategy::Fixed),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Arrow pointer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArrowOptions {
    /// Minimum distance in cells between the arrow and the floating corners
    pub padding: u16,
}

/// Options handed to the positioner on every (re)computation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PositionOptions {
    pub placement: Placement,
    pub strategy: Strategy,
    /// Gap in cells between anchor and floating element along the main axis
    pub offset: u16,
    /// Placements tried when the preferred one overflows the boundary.
    ///
    /// `None` falls back to the opposite side; an empty list disables flipping.
    pub fallback_placements: Option<Vec<Placement>>,
    /// Inner padding kept between the floating element and the boundary
    pub boundary_padding: u16,
    pub arrow: Option<ArrowOptions>,
}

impl PositionOptions {
    /// Candidate placements in the order they are tried
    pub fn candidates(&self) -> Vec<Placement> {
        let mut candidates = vec![self.placement];
        match &self.fallback_placements {
            None => candidates.push(self.placement.opposite()),
            Some(list) => candidates.extend(list.iter().copied()),
        }
        candidates.dedup();
        candidates
    }
}

/// Snapshot of everything needed for one position computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRequest {
    pub anchor: Rect,
    /// Only the width and height are used
    pub floating: Rect,
    pub boundary: Option<Rect>,
    pub options: PositionOptions,
}

/// Screen cell the arrow pointer is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowPosition {
    pub x: u16,
    pub y: u16,
}

/// Result of a position computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinates {
    /// Left edge in the strategy's coordinate space
    pub x: i32,
    /// Top edge in the strategy's coordinate space
    pub y: i32,
    /// Screen-space area to render into, clipped at the screen origin
    pub rect: Rect,
    /// Placement actually used after flipping
    pub placement: Placement,
    pub strategy: Strategy,
    pub arrow: Option<ArrowPosition>,
}

/// The position computation primitive.
pub trait Positioner {
    /// Compute where the floating element goes
    fn compute(&self, request: &PositionRequest) -> Coordinates;
}
