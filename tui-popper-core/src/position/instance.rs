//! Live positioning instance with an explicit create/update/destroy lifecycle

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::{Coordinates, ElementRef, PositionOptions, PositionRequest, Positioner};
use crate::error::PositioningError;

/// A positioner bound to one anchor/floating pair.
///
/// Created by [`PopperInstance::create`], which fails while either element is
/// not laid out. The first successful computation is followed by one forced
/// re-measurement to pick up layout that settled during the same pass.
pub struct PopperInstance {
    anchor: ElementRef,
    floating: ElementRef,
    boundary: ElementRef,
    options: PositionOptions,
    positioner: Rc<dyn Positioner>,
    last_request: Option<PositionRequest>,
    coordinates: Option<Coordinates>,
    measurements: usize,
    destroyed: bool,
}

impl PopperInstance {
    /// Create an instance and compute the first position.
    ///
    /// # Errors
    ///
    /// [`PositioningError::AnchorDetached`] or
    /// [`PositioningError::FloatingDetached`] when an element has no area.
    pub fn create(
        anchor: &ElementRef,
        floating: &ElementRef,
        boundary: &ElementRef,
        options: PositionOptions,
        positioner: Rc<dyn Positioner>,
    ) -> Result<Self, PositioningError> {
        let mut instance = Self {
            anchor: anchor.clone(),
            floating: floating.clone(),
            boundary: boundary.clone(),
            options,
            positioner,
            last_request: None,
            coordinates: None,
            measurements: 0,
            destroyed: false,
        };
        instance.measure()?;
        // First update: measure once more now that the floating element exists
        instance.force_update()?;
        debug!(placement = %instance.options.placement, "Popper instance created");
        Ok(instance)
    }

    fn request(&self) -> Result<PositionRequest, PositioningError> {
        if self.destroyed {
            return Err(PositioningError::Destroyed);
        }
        let anchor = self
            .anchor
            .rect()
            .filter(|_| self.anchor.is_attached())
            .ok_or(PositioningError::AnchorDetached)?;
        let floating = self
            .floating
            .rect()
            .filter(|_| self.floating.is_attached())
            .ok_or(PositioningError::FloatingDetached)?;
        let boundary = self.boundary.rect().filter(|_| self.boundary.is_attached());

        Ok(PositionRequest {
            anchor,
            floating,
            boundary,
            options: self.options.clone(),
        })
    }

    fn measure(&mut self) -> Result<Coordinates, PositioningError> {
        let request = self.request()?;
        let coordinates = self.positioner.compute(&request);
        self.measurements += 1;
        self.last_request = Some(request);
        self.coordinates = Some(coordinates);
        Ok(coordinates)
    }

    /// Recompute if any input changed since the last computation.
    ///
    /// Idempotent: calling it again without layout changes returns the same
    /// coordinates without re-running the positioner.
    pub fn update(&mut self) -> Result<Coordinates, PositioningError> {
        let request = self.request()?;
        match (&self.last_request, self.coordinates) {
            (Some(last), Some(coordinates)) if *last == request => Ok(coordinates),
            _ => self.measure(),
        }
    }

    /// Recompute unconditionally
    pub fn force_update(&mut self) -> Result<Coordinates, PositioningError> {
        self.measure()
    }

    /// Replace the options and recompute
    pub fn set_options(
        &mut self,
        options: PositionOptions,
    ) -> Result<Coordinates, PositioningError> {
        if self.destroyed {
            return Err(PositioningError::Destroyed);
        }
        self.options = options;
        self.update()
    }

    /// Release the instance. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.coordinates = None;
        self.last_request = None;
        debug!("Popper instance destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Last computed position
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    /// How many times the positioner actually ran
    pub fn measurements(&self) -> usize {
        self.measurements
    }
}

impl fmt::Debug for PopperInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopperInstance")
            .field("anchor", &self.anchor)
            .field("floating", &self.floating)
            .field("options", &self.options)
            .field("coordinates", &self.coordinates)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{CellPositioner, Placement};
    use ratatui::layout::Rect;

    fn elements() -> (ElementRef, ElementRef, ElementRef) {
        (
            ElementRef::attached(Rect::new(10, 5, 6, 1)),
            ElementRef::attached(Rect::new(0, 0, 8, 3)),
            ElementRef::attached(Rect::new(0, 0, 80, 24)),
        )
    }

    fn create(
        anchor: &ElementRef,
        floating: &ElementRef,
        boundary: &ElementRef,
    ) -> Result<PopperInstance, PositioningError> {
        PopperInstance::create(
            anchor,
            floating,
            boundary,
            PositionOptions::default(),
            Rc::new(CellPositioner),
        )
    }

    #[test]
    fn test_create_measures_twice() {
        let (anchor, floating, boundary) = elements();
        let instance = create(&anchor, &floating, &boundary).unwrap();
        assert_eq!(instance.measurements(), 2);
        assert_eq!(instance.coordinates().unwrap().placement, Placement::Bottom);
    }

    #[test]
    fn test_create_fails_when_detached() {
        let (anchor, floating, boundary) = elements();
        anchor.detach();
        assert_eq!(
            create(&anchor, &floating, &boundary).unwrap_err(),
            PositioningError::AnchorDetached
        );

        let (anchor, floating, boundary) = elements();
        floating.detach();
        assert_eq!(
            create(&anchor, &floating, &boundary).unwrap_err(),
            PositioningError::FloatingDetached
        );
    }

    #[test]
    fn test_update_is_idempotent() {
        let (anchor, floating, boundary) = elements();
        let mut instance = create(&anchor, &floating, &boundary).unwrap();

        let first = instance.update().unwrap();
        let second = instance.update().unwrap();
        assert_eq!(first, second);
        assert_eq!(instance.measurements(), 2);

        anchor.attach(Rect::new(20, 5, 6, 1));
        let moved = instance.update().unwrap();
        assert_ne!(moved, first);
        assert_eq!(instance.measurements(), 3);
    }

    #[test]
    fn test_set_options_recomputes() {
        let (anchor, floating, boundary) = elements();
        let mut instance = create(&anchor, &floating, &boundary).unwrap();
        let coords = instance
            .set_options(PositionOptions {
                placement: Placement::Right,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(coords.placement, Placement::Right);
    }

    #[test]
    fn test_destroy_twice_is_noop() {
        let (anchor, floating, boundary) = elements();
        let mut instance = create(&anchor, &floating, &boundary).unwrap();

        instance.destroy();
        instance.destroy();

        assert!(instance.is_destroyed());
        assert!(instance.coordinates().is_none());
        assert_eq!(instance.update(), Err(PositioningError::Destroyed));
    }
}
