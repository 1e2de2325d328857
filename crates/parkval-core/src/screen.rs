//! Kiosk screens as an explicit state machine.
//!
//! [`Screen::apply`] is a pure transition: it never touches storage. The
//! controller performs submissions and feeds their outcome back in as an
//! [`Action`].

// ─── Screen ──────────────────────────────────────────────────────────────────

/// The screen the kiosk is currently showing. Exactly one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Screen {
  /// Welcome screen with the parking-validation and temporary-badge options.
  #[default]
  MainMenu,
  /// Name and ID form; submitting issues a code from the pool.
  DirectEntry,
  /// Guest, provider and prepaid-code form; submitting echoes the code back.
  PrepaidEntry,
  /// Shows the code the visitor should use.
  CodeDisplay { code: String },
}

// ─── Action ──────────────────────────────────────────────────────────────────

/// Something the visitor did, or the outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  /// "Parking Validation" on the main menu.
  StartValidation,
  /// "Temporary Badge" on the main menu.
  TemporaryBadge,
  /// "I have a prepaid code" on the direct-entry form.
  HavePrepaidCode,
  /// "I don't have a prepaid code" on the prepaid form.
  NoPrepaidCode,
  /// "Cancel" on either form.
  Cancel,
  /// A submission succeeded and produced `code`.
  CodeIssued(String),
  /// The record could not be saved. Carries the reason shown to the visitor.
  SaveFailed(String),
  /// The record was saved but no code could be issued.
  CodeGenerationFailed,
  /// "Learn more about how to use a Parking Validation Code".
  ShowTutorial,
  /// "Return to Start".
  ReturnToStart,
  /// "Code not working? Get a new one here."
  RequestNewCode,
}

// ─── Notice ──────────────────────────────────────────────────────────────────

/// A message-box style notice raised by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
  TemporaryBadge,
  Tutorial,
  SaveFailed(String),
  CodeGenerationFailed,
}

impl Notice {
  pub fn title(&self) -> &'static str {
    match self {
      Self::TemporaryBadge => "Temporary Badge Info",
      Self::Tutorial => "How to Use Parking Validation",
      Self::SaveFailed(_) | Self::CodeGenerationFailed => "Error",
    }
  }

  pub fn is_error(&self) -> bool {
    matches!(self, Self::SaveFailed(_) | Self::CodeGenerationFailed)
  }

  pub fn message(&self) -> String {
    match self {
      Self::TemporaryBadge => "Ask the receptionist about getting a temporary badge, or call \
                               the service center if there is no receptionist present."
        .to_owned(),
      Self::Tutorial => [
        "To use your parking validation code:",
        "",
        "1. Park in the designated visitor parking area",
        "2. Take a parking ticket when entering",
        "3. Before leaving, go to the parking payment kiosk",
        "4. Select 'Use Validation Code'",
        "5. Enter the code shown above",
        "6. The parking fee will be automatically adjusted",
        "",
        "If you experience any issues, please contact the front desk.",
      ]
      .join("\n"),
      Self::SaveFailed(reason) => format!("Error saving parking data: {reason}"),
      Self::CodeGenerationFailed => {
        "Error generating parking code. Please try again or contact support.".to_owned()
      }
    }
  }
}

// ─── Transition ──────────────────────────────────────────────────────────────

/// The result of applying an [`Action`] to a [`Screen`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
  pub screen: Screen,
  pub notice: Option<Notice>,
}

impl Transition {
  fn to(screen: Screen) -> Self { Self { screen, notice: None } }

  fn with_notice(screen: Screen, notice: Notice) -> Self {
    Self { screen, notice: Some(notice) }
  }
}

impl Screen {
  /// Apply `action` to this screen.
  ///
  /// Actions that make no sense on the current screen leave it unchanged.
  pub fn apply(self, action: Action) -> Transition {
    use Action as A;
    use Screen as S;

    match (self, action) {
      (S::MainMenu, A::StartValidation) => Transition::to(S::DirectEntry),
      (S::MainMenu, A::TemporaryBadge) => {
        Transition::with_notice(S::MainMenu, Notice::TemporaryBadge)
      }

      (S::DirectEntry, A::HavePrepaidCode) => Transition::to(S::PrepaidEntry),
      (S::PrepaidEntry, A::NoPrepaidCode) => Transition::to(S::DirectEntry),
      (S::DirectEntry | S::PrepaidEntry, A::Cancel) => Transition::to(S::MainMenu),

      (S::DirectEntry | S::PrepaidEntry, A::CodeIssued(code)) => {
        Transition::to(S::CodeDisplay { code })
      }
      // A failed save keeps the form so the visitor can resubmit.
      (form @ (S::DirectEntry | S::PrepaidEntry), A::SaveFailed(reason)) => {
        Transition::with_notice(form, Notice::SaveFailed(reason))
      }
      (S::DirectEntry | S::PrepaidEntry, A::CodeGenerationFailed) => {
        Transition::with_notice(S::MainMenu, Notice::CodeGenerationFailed)
      }

      (display @ S::CodeDisplay { .. }, A::ShowTutorial) => {
        Transition::with_notice(display, Notice::Tutorial)
      }
      (S::CodeDisplay { .. }, A::ReturnToStart) => Transition::to(S::MainMenu),
      (S::CodeDisplay { .. }, A::RequestNewCode) => Transition::to(S::DirectEntry),

      (screen, _) => Transition::to(screen),
    }
  }

  /// Whether this screen is a data-entry form.
  pub fn is_form(&self) -> bool { matches!(self, Self::DirectEntry | Self::PrepaidEntry) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn main_menu_routes() {
    assert_eq!(Screen::MainMenu.apply(Action::StartValidation).screen, Screen::DirectEntry);

    let t = Screen::MainMenu.apply(Action::TemporaryBadge);
    assert_eq!(t.screen, Screen::MainMenu);
    assert_eq!(t.notice, Some(Notice::TemporaryBadge));
  }

  #[test]
  fn forms_switch_and_cancel() {
    assert_eq!(Screen::DirectEntry.apply(Action::HavePrepaidCode).screen, Screen::PrepaidEntry);
    assert_eq!(Screen::PrepaidEntry.apply(Action::NoPrepaidCode).screen, Screen::DirectEntry);
    assert_eq!(Screen::DirectEntry.apply(Action::Cancel).screen, Screen::MainMenu);
    assert_eq!(Screen::PrepaidEntry.apply(Action::Cancel).screen, Screen::MainMenu);
  }

  #[test]
  fn save_failure_keeps_the_form() {
    let t = Screen::PrepaidEntry.apply(Action::SaveFailed("disk full".into()));
    assert_eq!(t.screen, Screen::PrepaidEntry);
    assert_eq!(t.notice, Some(Notice::SaveFailed("disk full".into())));
    assert!(t.notice.unwrap().is_error());
  }

  #[test]
  fn code_generation_failure_returns_to_main_menu() {
    let t = Screen::DirectEntry.apply(Action::CodeGenerationFailed);
    assert_eq!(t.screen, Screen::MainMenu);
    assert_eq!(t.notice, Some(Notice::CodeGenerationFailed));
  }

  #[test]
  fn code_display_options() {
    let shown = Screen::DirectEntry.apply(Action::CodeIssued("CODE1".into())).screen;
    assert_eq!(shown, Screen::CodeDisplay { code: "CODE1".into() });

    let t = shown.clone().apply(Action::ShowTutorial);
    assert_eq!(t.screen, shown);
    assert_eq!(t.notice, Some(Notice::Tutorial));

    assert_eq!(shown.clone().apply(Action::ReturnToStart).screen, Screen::MainMenu);
    assert_eq!(shown.apply(Action::RequestNewCode).screen, Screen::DirectEntry);
  }

  #[test]
  fn unrelated_actions_are_ignored() {
    let t = Screen::MainMenu.apply(Action::CodeIssued("X".into()));
    assert_eq!(t, Transition { screen: Screen::MainMenu, notice: None });
    assert_eq!(Screen::DirectEntry.apply(Action::ReturnToStart).screen, Screen::DirectEntry);
  }
}
