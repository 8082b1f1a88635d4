//! Given-When-Then harness for reducer tests.
//!
//! A reducer test is three declarations: the state the session starts in,
//! the action that arrives, and what must hold for the resulting state and
//! effects. The harness keeps those three visually separate so a failing
//! transition reads like the transition table it violates.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use stagepass_core::{effect::Effect, reducer::Reducer};

/// One step of a reducer test: the state under test, the action applied to
/// it, and the checks to run afterwards.
///
/// # Example
///
/// ```ignore
/// use stagepass_testing::{ReducerTest, assertions};
///
/// ReducerTest::new(CheckoutReducer::new())
///     .with_env(test_environment())
///     .given_state(draft)
///     .when_action(CheckoutAction::ProceedToPayment)
///     .then_state(|state| assert!(state.is_awaiting_payment()))
///     .then_effects(assertions::assert_no_effects)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    action: Option<A>,
    state_checks: Vec<Box<dyn FnOnce(&S)>>,
    effect_checks: Vec<Box<dyn FnOnce(&[Effect<A>])>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: Clone,
    A: Clone,
{
    /// Starts a test for the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            action: None,
            state_checks: Vec::new(),
            effect_checks: Vec::new(),
        }
    }

    /// Injects the environment the reducer runs against
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Given: the state the session is in before the action arrives
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// When: the action under test
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Then: a check against the state after the reducer ran
    #[must_use]
    pub fn then_state<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_checks.push(Box::new(check));
        self
    }

    /// Then: a check against the effects the reducer returned
    #[must_use]
    pub fn then_effects<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_checks.push(Box::new(check));
        self
    }

    /// Runs the reducer once and evaluates every registered check
    ///
    /// # Panics
    ///
    /// Panics if the state, action, or environment was never supplied, or if
    /// any check fails.
    #[allow(clippy::expect_used)] // Test harness: a missing clause is a broken test
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("given_state() is required before run()");
        let action = self.action.expect("when_action() is required before run()");
        let env = self
            .environment
            .expect("with_env() is required before run()");

        let effects = self.reducer.reduce(&mut state, action, &env);

        for check in self.state_checks {
            check(&state);
        }
        for check in self.effect_checks {
            check(&effects);
        }
    }
}

/// Checks for the effect lists reducers return
pub mod assertions {
    use stagepass_core::effect::Effect;

    /// Asserts the reducer returned no work: either an empty list or a lone
    /// `Effect::None`
    ///
    /// # Panics
    ///
    /// Panics if any real effect is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.is_empty() || matches!(effects, [Effect::None]),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Asserts the exact number of effects returned
    ///
    /// # Panics
    ///
    /// Panics on a count mismatch.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Asserts at least one timer (`Effect::Delay`) was scheduled
    ///
    /// The simulated payment gateway settles through a delay, so this is the
    /// signature of a submitted payment.
    ///
    /// # Panics
    ///
    /// Panics if no `Delay` effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_delay_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Delay { .. })),
            "Expected at least one Delay effect, but none found"
        );
    }

    /// Asserts at least one async computation (`Effect::Future`) was started
    ///
    /// # Panics
    ///
    /// Panics if no `Future` effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Future(_))),
            "Expected at least one Future effect, but none found"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagepass_core::{SmallVec, smallvec};
    use std::time::Duration;

    #[derive(Clone, Debug, Default)]
    struct GateState {
        open: bool,
    }

    #[derive(Clone, Debug)]
    enum GateAction {
        Open,
        CloseLater,
        Close,
    }

    struct GateReducer;

    impl Reducer for GateReducer {
        type State = GateState;
        type Action = GateAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                GateAction::Open => {
                    state.open = true;
                    smallvec![Effect::None]
                },
                GateAction::CloseLater => {
                    smallvec![Effect::Delay {
                        duration: Duration::from_millis(10),
                        action: Box::new(GateAction::Close),
                    }]
                },
                GateAction::Close => {
                    state.open = false;
                    smallvec![Effect::None]
                },
            }
        }
    }

    #[test]
    fn state_checks_observe_the_transition() {
        ReducerTest::new(GateReducer)
            .with_env(())
            .given_state(GateState::default())
            .when_action(GateAction::Open)
            .then_state(|state| assert!(state.open))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn effect_checks_observe_scheduled_timers() {
        ReducerTest::new(GateReducer)
            .with_env(())
            .given_state(GateState { open: true })
            .when_action(GateAction::CloseLater)
            .then_state(|state| assert!(state.open))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_delay_effect(effects);
            })
            .run();
    }

    #[test]
    fn no_effects_accepts_empty_and_lone_none() {
        assertions::assert_no_effects::<GateAction>(&[]);
        assertions::assert_no_effects::<GateAction>(&[Effect::None]);
    }
}
