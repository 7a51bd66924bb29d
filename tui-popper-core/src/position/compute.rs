//! Terminal-cell positioning: offset, flip, overflow shift and arrow

use ratatui::layout::Rect;

use super::{
    Alignment, ArrowPosition, Coordinates, Placement, PositionRequest, Positioner, Side, Strategy,
};

/// Default positioner working in whole terminal cells.
///
/// Steps, in order:
/// 1. place the floating box on the requested side with the requested
///    alignment, `offset` cells away from the anchor
/// 2. flip: if the box overflows the boundary on its main axis, try the
///    fallback placements and keep the first that fits; if none fits the
///    preferred placement is kept
/// 3. shift along the cross axis to stay inside the boundary padding
/// 4. put the arrow on the edge facing the anchor, lined up with the anchor
///    centre
#[derive(Debug, Clone, Copy, Default)]
pub struct CellPositioner;

/// Signed rectangle used during computation; may lie partly off screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Frame {
    fn from_rect(rect: Rect) -> Self {
        Self {
            x: i32::from(rect.x),
            y: i32::from(rect.y),
            w: i32::from(rect.width),
            h: i32::from(rect.height),
        }
    }

    fn right(&self) -> i32 {
        self.x + self.w
    }

    fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Clip at the screen origin
    fn to_screen(self) -> Rect {
        let x = self.x.max(0);
        let y = self.y.max(0);
        let w = (self.right() - x).max(0);
        let h = (self.bottom() - y).max(0);
        Rect::new(clamp_u16(x), clamp_u16(y), clamp_u16(w), clamp_u16(h))
    }
}

fn clamp_u16(v: i32) -> u16 {
    u16::try_from(v.max(0)).unwrap_or(u16::MAX)
}

fn align(start: i32, len: i32, size: i32, alignment: Alignment) -> i32 {
    match alignment {
        Alignment::Start => start,
        Alignment::Center => start + (len - size).div_euclid(2),
        Alignment::End => start + len - size,
    }
}

fn place(anchor: Frame, w: i32, h: i32, placement: Placement, offset: i32) -> Frame {
    let alignment = placement.alignment();
    let (x, y) = match placement.side() {
        Side::Top => (align(anchor.x, anchor.w, w, alignment), anchor.y - offset - h),
        Side::Bottom => (
            align(anchor.x, anchor.w, w, alignment),
            anchor.bottom() + offset,
        ),
        Side::Left => (anchor.x - offset - w, align(anchor.y, anchor.h, h, alignment)),
        Side::Right => (
            anchor.right() + offset,
            align(anchor.y, anchor.h, h, alignment),
        ),
    };
    Frame { x, y, w, h }
}

/// Whether the box stays inside the padded boundary on its main axis
fn fits_main_axis(frame: Frame, side: Side, bounds: Frame) -> bool {
    match side {
        Side::Top => frame.y >= bounds.y,
        Side::Bottom => frame.bottom() <= bounds.bottom(),
        Side::Left => frame.x >= bounds.x,
        Side::Right => frame.right() <= bounds.right(),
    }
}

/// Clamp `pos` so `[pos, pos + size)` stays in `[min, max)`, favouring `min`
fn clamp_span(pos: i32, size: i32, min: i32, max: i32) -> i32 {
    pos.min(max - size).max(min)
}

fn padded(boundary: Rect, padding: u16) -> Frame {
    let mut bounds = Frame::from_rect(boundary);
    let pad = i32::from(padding);
    bounds.x += pad;
    bounds.y += pad;
    bounds.w = (bounds.w - 2 * pad).max(0);
    bounds.h = (bounds.h - 2 * pad).max(0);
    bounds
}

fn arrow_for(frame: Frame, anchor: Frame, side: Side, padding: i32) -> Option<ArrowPosition> {
    let (x, y) = if side.is_vertical() {
        let centre = anchor.x + anchor.w / 2;
        let x = if frame.w > 2 * padding {
            centre.clamp(frame.x + padding, frame.right() - 1 - padding)
        } else {
            frame.x + frame.w / 2
        };
        let y = match side {
            Side::Top => frame.bottom() - 1,
            _ => frame.y,
        };
        (x, y)
    } else {
        let centre = anchor.y + anchor.h / 2;
        let y = if frame.h > 2 * padding {
            centre.clamp(frame.y + padding, frame.bottom() - 1 - padding)
        } else {
            frame.y + frame.h / 2
        };
        let x = match side {
            Side::Left => frame.right() - 1,
            _ => frame.x,
        };
        (x, y)
    };

    Some(ArrowPosition {
        x: u16::try_from(x).ok()?,
        y: u16::try_from(y).ok()?,
    })
}

impl Positioner for CellPositioner {
    fn compute(&self, request: &PositionRequest) -> Coordinates {
        let options = &request.options;
        let anchor = Frame::from_rect(request.anchor);
        let w = i32::from(request.floating.width);
        let h = i32::from(request.floating.height);
        let offset = i32::from(options.offset);
        let bounds = request
            .boundary
            .map(|b| padded(b, options.boundary_padding));

        let preferred = place(anchor, w, h, options.placement, offset);
        let (placement, mut frame) = match bounds {
            Some(bounds) => options
                .candidates()
                .into_iter()
                .map(|p| (p, place(anchor, w, h, p, offset)))
                .find(|(p, f)| fits_main_axis(*f, p.side(), bounds))
                .unwrap_or((options.placement, preferred)),
            None => (options.placement, preferred),
        };

        if let Some(bounds) = bounds {
            if placement.side().is_vertical() {
                frame.x = clamp_span(frame.x, frame.w, bounds.x, bounds.right());
            } else {
                frame.y = clamp_span(frame.y, frame.h, bounds.y, bounds.bottom());
            }
        }

        let arrow = options
            .arrow
            .and_then(|arrow| arrow_for(frame, anchor, placement.side(), i32::from(arrow.padding)));

        let (x, y) = match (options.strategy, request.boundary) {
            (Strategy::Absolute, Some(boundary)) => (
                frame.x - i32::from(boundary.x),
                frame.y - i32::from(boundary.y),
            ),
            _ => (frame.x, frame.y),
        };

        Coordinates {
            x,
            y,
            rect: frame.to_screen(),
            placement,
            strategy: options.strategy,
            arrow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{ArrowOptions, PositionOptions};

    fn request(anchor: Rect, w: u16, h: u16, options: PositionOptions) -> PositionRequest {
        PositionRequest {
            anchor,
            floating: Rect::new(0, 0, w, h),
            boundary: Some(Rect::new(0, 0, 80, 24)),
            options,
        }
    }

    fn opts(placement: Placement) -> PositionOptions {
        PositionOptions {
            placement,
            strategy: Strategy::Fixed,
            ..Default::default()
        }
    }

    #[test]
    fn test_bottom_centered() {
        let coords = CellPositioner.compute(&request(
            Rect::new(30, 5, 10, 1),
            6,
            3,
            opts(Placement::Bottom),
        ));
        assert_eq!(coords.rect, Rect::new(32, 6, 6, 3));
        assert_eq!(coords.placement, Placement::Bottom);
    }

    #[test]
    fn test_alignments_and_offset() {
        let anchor = Rect::new(30, 10, 10, 2);
        let mut o = opts(Placement::TopStart);
        o.offset = 1;
        let c = CellPositioner.compute(&request(anchor, 6, 3, o));
        assert_eq!((c.rect.x, c.rect.y), (30, 6));

        let c = CellPositioner.compute(&request(anchor, 6, 3, opts(Placement::TopEnd)));
        assert_eq!((c.rect.x, c.rect.y), (34, 7));

        let c = CellPositioner.compute(&request(anchor, 6, 3, opts(Placement::RightStart)));
        assert_eq!((c.rect.x, c.rect.y), (40, 10));

        let c = CellPositioner.compute(&request(anchor, 6, 3, opts(Placement::LeftEnd)));
        assert_eq!((c.rect.x, c.rect.y), (24, 9));
    }

    #[test]
    fn test_flips_when_preferred_overflows() {
        // Anchor on the top row: no room above
        let coords = CellPositioner.compute(&request(
            Rect::new(10, 0, 8, 1),
            8,
            3,
            opts(Placement::Top),
        ));
        assert_eq!(coords.placement, Placement::Bottom);
        assert_eq!(coords.rect.y, 1);
    }

    #[test]
    fn test_flip_disabled_forces_preferred() {
        let mut o = opts(Placement::Top);
        o.fallback_placements = Some(vec![]);
        let coords = CellPositioner.compute(&request(Rect::new(10, 0, 8, 1), 8, 3, o));
        assert_eq!(coords.placement, Placement::Top);
        assert_eq!(coords.y, -3);
        // Clipped to the screen for rendering
        assert_eq!(coords.rect.y, 0);
        assert_eq!(coords.rect.height, 0);
    }

    #[test]
    fn test_custom_fallbacks_in_order() {
        let mut o = opts(Placement::Top);
        o.fallback_placements = Some(vec![Placement::Left, Placement::Right]);
        // Anchor at top-left: no room above or to the left
        let coords = CellPositioner.compute(&request(Rect::new(0, 0, 4, 1), 6, 2, o));
        assert_eq!(coords.placement, Placement::Right);
    }

    #[test]
    fn test_shift_keeps_inside_boundary() {
        let mut o = opts(Placement::Bottom);
        o.boundary_padding = 1;
        // Centered would start at x = -3
        let coords = CellPositioner.compute(&request(Rect::new(0, 5, 4, 1), 10, 2, o));
        assert_eq!(coords.rect.x, 1);

        let coords = CellPositioner.compute(&request(
            Rect::new(76, 5, 4, 1),
            10,
            2,
            opts(Placement::Bottom),
        ));
        assert_eq!(coords.rect.right(), 80);
    }

    #[test]
    fn test_absolute_is_relative_to_boundary() {
        let mut req = request(Rect::new(30, 10, 10, 1), 6, 2, PositionOptions::default());
        req.boundary = Some(Rect::new(20, 5, 40, 15));
        let coords = CellPositioner.compute(&req);
        assert_eq!(coords.strategy, Strategy::Absolute);
        assert_eq!((coords.x, coords.y), (12, 6));
        assert_eq!((coords.rect.x, coords.rect.y), (32, 11));
    }

    #[test]
    fn test_no_boundary_means_no_flip_or_shift() {
        let mut req = request(Rect::new(0, 0, 4, 1), 10, 3, opts(Placement::Top));
        req.boundary = None;
        let coords = CellPositioner.compute(&req);
        assert_eq!(coords.placement, Placement::Top);
        assert_eq!((coords.x, coords.y), (-3, -3));
    }

    #[test]
    fn test_arrow_faces_anchor() {
        let mut o = opts(Placement::Bottom);
        o.arrow = Some(ArrowOptions { padding: 1 });
        let coords = CellPositioner.compute(&request(Rect::new(30, 5, 10, 1), 12, 3, o.clone()));
        let arrow = coords.arrow.unwrap();
        assert_eq!(arrow.y, coords.rect.y);
        assert_eq!(arrow.x, 35);

        o.placement = Placement::Top;
        let coords = CellPositioner.compute(&request(Rect::new(30, 10, 10, 1), 12, 3, o.clone()));
        let arrow = coords.arrow.unwrap();
        assert_eq!(arrow.y, coords.rect.bottom() - 1);

        o.placement = Placement::Right;
        let coords = CellPositioner.compute(&request(Rect::new(10, 10, 4, 3), 12, 5, o));
        let arrow = coords.arrow.unwrap();
        assert_eq!((arrow.x, arrow.y), (14, 11));
    }

    #[test]
    fn test_arrow_clamped_by_padding() {
        let mut o = opts(Placement::BottomStart);
        o.arrow = Some(ArrowOptions { padding: 2 });
        // Anchor narrower than the box: centre lands near the box's left corner
        let coords = CellPositioner.compute(&request(Rect::new(30, 5, 1, 1), 12, 3, o));
        assert_eq!(coords.arrow.unwrap().x, 32);
    }
}
