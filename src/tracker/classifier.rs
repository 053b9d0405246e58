/// User activity as seen by the sampling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityState {
    Active,
    Idle,
}

impl Default for ActivityState {
    fn default() -> Self {
        ActivityState::Active
    }
}

/// State change detected on a tick. At most one transition can occur per
/// tick; repeated idle ticks produce none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    IdleStarted,
    ActiveResumed,
}

/// Classifies the user for this tick from the observed idle time.
///
/// `Active -> Idle` fires once when the idle time exceeds the threshold;
/// `Idle -> Active` fires on the first tick back at or under it. Pure
/// function of its inputs so the sampling loop owns all the state.
pub fn classify(
    previous: ActivityState,
    idle_secs: u64,
    idle_threshold_secs: u64,
) -> (ActivityState, Option<Transition>) {
    let idle = idle_secs > idle_threshold_secs;
    match (previous, idle) {
        (ActivityState::Active, true) => (ActivityState::Idle, Some(Transition::IdleStarted)),
        (ActivityState::Idle, false) => (ActivityState::Active, Some(Transition::ActiveResumed)),
        (state, _) => (state, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_active_at_threshold() {
        let (state, transition) = classify(ActivityState::Active, 60, 60);
        assert_eq!(state, ActivityState::Active);
        assert_eq!(transition, None);
    }

    #[test]
    fn goes_idle_past_threshold() {
        let (state, transition) = classify(ActivityState::Active, 61, 60);
        assert_eq!(state, ActivityState::Idle);
        assert_eq!(transition, Some(Transition::IdleStarted));
    }

    #[test]
    fn idle_transition_fires_only_once() {
        let (state, transition) = classify(ActivityState::Active, 61, 60);
        assert_eq!(transition, Some(Transition::IdleStarted));

        // Still idle on the next tick: no second transition.
        let (state, transition) = classify(state, 90, 60);
        assert_eq!(state, ActivityState::Idle);
        assert_eq!(transition, None);
    }

    #[test]
    fn resumes_on_input() {
        let (state, transition) = classify(ActivityState::Idle, 2, 60);
        assert_eq!(state, ActivityState::Active);
        assert_eq!(transition, Some(Transition::ActiveResumed));
    }

    #[test]
    fn active_stays_active_without_transition() {
        let (state, transition) = classify(ActivityState::Active, 0, 60);
        assert_eq!(state, ActivityState::Active);
        assert_eq!(transition, None);
    }
}
