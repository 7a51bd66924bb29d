//! Effect-emitting reducers
//!
//! The visibility state machine never touches timers or the positioning
//! instance itself. It returns a [`DispatchResult`] describing what changed
//! and which side effects the caller has to carry out.
//!
//! ```ignore
//! fn reduce(state: &mut VisibilityState, policy: &VisibilityPolicy, action: PopperAction)
//!     -> DispatchResult<VisibilityEffect>
//! ```
//!
//! [`Popper`](crate::Popper) runs the effects against its scheduler and
//! positioning instance:
//!
//! ```ignore
//! let result = reduce(&mut state, &policy, PopperAction::RequestShow);
//! for effect in result.effects {
//!     match effect {
//!         VisibilityEffect::StartTimer { slot, id, delay } => { /* schedule */ }
//!         VisibilityEffect::VisibleChanged(shown) => { /* notify host */ }
//!         // ...
//!     }
//! }
//! ```

/// What a reducer did with one action.
///
/// `changed` tells the caller whether state moved; `effects` lists the side
/// effects it must carry out, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    pub changed: bool,
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// Nothing changed, nothing to do
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: Vec::new(),
        }
    }

    /// State changed without side effects
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: Vec::new(),
        }
    }

    /// A side effect only; state is untouched (e.g. asking the host to
    /// update a value it controls)
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn changed_with_many(effects: Vec<E>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }

    #[inline]
    pub fn mark_changed(mut self) -> Self {
        self.changed = true;
        self
    }
}
