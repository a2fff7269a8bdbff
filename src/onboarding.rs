/// Onboarding flow as an explicit state machine
///
/// The first-run sequence is a fixed linear walk: Welcome → Name → Goal →
/// Cost → Reminder → Main. Each step is a tagged variant and the transitions
/// are a finite table, so a driver (the CLI wizard here, a screen stack
/// elsewhere) can't wander off the sequence.

/// One step of the first-run sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    Welcome,
    Name,
    Goal,
    Cost,
    Reminder,
    /// Onboarding finished, the main app takes over
    Main,
}

impl OnboardingStep {
    /// Where a fresh run starts
    pub fn first() -> Self {
        OnboardingStep::Welcome
    }

    /// Advance one step; `Main` is terminal and stays put
    pub fn next(self) -> Self {
        match self {
            OnboardingStep::Welcome => OnboardingStep::Name,
            OnboardingStep::Name => OnboardingStep::Goal,
            OnboardingStep::Goal => OnboardingStep::Cost,
            OnboardingStep::Cost => OnboardingStep::Reminder,
            OnboardingStep::Reminder => OnboardingStep::Main,
            OnboardingStep::Main => OnboardingStep::Main,
        }
    }

    /// Step back; `Welcome` is the start and stays put
    pub fn back(self) -> Self {
        match self {
            OnboardingStep::Welcome => OnboardingStep::Welcome,
            OnboardingStep::Name => OnboardingStep::Welcome,
            OnboardingStep::Goal => OnboardingStep::Name,
            OnboardingStep::Cost => OnboardingStep::Goal,
            OnboardingStep::Reminder => OnboardingStep::Cost,
            OnboardingStep::Main => OnboardingStep::Reminder,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == OnboardingStep::Main
    }

    /// Prompt title for the step, as the wizard shows it
    pub fn title(self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "Welcome to HabitSip",
            OnboardingStep::Name => "What should we call you?",
            OnboardingStep::Goal => "What's your goal?",
            OnboardingStep::Cost => "Average cost per drink?",
            OnboardingStep::Reminder => "Daily check-in reminder?",
            OnboardingStep::Main => "All set",
        }
    }
}
