//! Application state machine and event dispatcher.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use parkval_core::{Action, Kiosk, Notice, Screen, TableStore};
use tracing::{error, info};

// ─── Form ─────────────────────────────────────────────────────────────────────

/// A labelled text input.
#[derive(Debug, Clone)]
pub struct Field {
  pub label: &'static str,
  pub value: String,
}

/// The text inputs of one entry screen plus which one has focus.
#[derive(Debug, Clone)]
pub struct Form {
  pub prompt: &'static str,
  pub fields: Vec<Field>,
  pub focus:  usize,
}

impl Form {
  fn new(prompt: &'static str, labels: &[&'static str]) -> Self {
    Self {
      prompt,
      fields: labels
        .iter()
        .map(|&label| Field { label, value: String::new() })
        .collect(),
      focus: 0,
    }
  }

  /// The name/ID form.
  pub fn direct() -> Self {
    Self::new("Please enter your Name and ID below.", &["Name", "ID"])
  }

  /// The prepaid-code form.
  pub fn prepaid() -> Self {
    Self::new(
      "Please enter your Name, Provider, and Prepaid Code below.",
      &["Name", "Provider", "Prepaid Code"],
    )
  }

  pub fn value(&self, i: usize) -> &str {
    self.fields.get(i).map(|f| f.value.as_str()).unwrap_or_default()
  }

  /// Submit is only offered once every field has non-blank text.
  pub fn is_complete(&self) -> bool {
    self.fields.iter().all(|f| !f.value.trim().is_empty())
  }

  fn clear(&mut self) {
    for field in &mut self.fields {
      field.value.clear();
    }
    self.focus = 0;
  }

  fn next_field(&mut self) { self.focus = (self.focus + 1) % self.fields.len(); }

  fn prev_field(&mut self) {
    self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
  }

  fn focused(&mut self) -> &mut String { &mut self.fields[self.focus].value }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S> {
  /// Current screen.
  pub screen: Screen,

  /// Inputs of the name/ID screen.
  pub direct: Form,

  /// Inputs of the prepaid-code screen.
  pub prepaid: Form,

  /// Message box over the current screen, if any. Keys only dismiss it.
  pub notice: Option<Notice>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Codes left in the pool, refreshed after each issue.
  pub remaining: Option<usize>,

  /// Threshold under which `remaining` is highlighted.
  pub low_stock: usize,

  kiosk: Kiosk<S>,
}

impl<S: TableStore> App<S> {
  pub fn new(kiosk: Kiosk<S>, low_stock: usize) -> Self {
    let mut app = Self {
      screen: Screen::MainMenu,
      direct: Form::direct(),
      prepaid: Form::prepaid(),
      notice: None,
      status_msg: String::new(),
      remaining: None,
      low_stock,
      kiosk,
    };
    app.refresh_remaining();
    app
  }

  pub fn kiosk(&self) -> &Kiosk<S> { &self.kiosk }

  /// Whether the remaining-code count is at or under the warning threshold.
  pub fn low_on_codes(&self) -> bool {
    self.remaining.is_some_and(|n| n <= self.low_stock)
  }

  fn refresh_remaining(&mut self) {
    match self.kiosk.remaining_codes() {
      Ok(n) => self.remaining = Some(n),
      Err(e) => {
        self.remaining = None;
        error!(error = %e, "could not count remaining codes");
      }
    }
  }

  /// Run `action` through the screen state machine.
  fn apply(&mut self, action: Action) {
    let previous = std::mem::take(&mut self.screen);
    let transition = previous.clone().apply(action);

    // Entering a form from elsewhere starts it blank.
    if transition.screen != previous {
      match transition.screen {
        Screen::DirectEntry => self.direct.clear(),
        Screen::PrepaidEntry => self.prepaid.clear(),
        _ => {}
      }
    }

    self.screen = transition.screen;
    if transition.notice.is_some() {
      self.notice = transition.notice;
    }
    self.status_msg.clear();
  }

  /// The form for the current screen, if it is one.
  pub fn form(&self) -> Option<&Form> {
    match self.screen {
      Screen::DirectEntry => Some(&self.direct),
      Screen::PrepaidEntry => Some(&self.prepaid),
      _ => None,
    }
  }

  fn form_mut(&mut self) -> Option<&mut Form> {
    match self.screen {
      Screen::DirectEntry => Some(&mut self.direct),
      Screen::PrepaidEntry => Some(&mut self.prepaid),
      _ => None,
    }
  }

  // ── Submission ────────────────────────────────────────────────────────────

  fn submit(&mut self) {
    let today = Local::now().date_naive();
    let outcome = match self.screen {
      Screen::DirectEntry => {
        self
          .kiosk
          .submit_direct_entry(today, self.direct.value(0), self.direct.value(1))
      }
      Screen::PrepaidEntry => self.kiosk.submit_prepaid(
        today,
        self.prepaid.value(0),
        self.prepaid.value(1),
        self.prepaid.value(2),
      ),
      _ => return,
    };

    let action = match outcome {
      Ok(code) => {
        info!("submission accepted");
        Action::CodeIssued(code)
      }
      Err(failure) => {
        error!(error = %failure, "submission failed");
        failure.into_action()
      }
    };
    self.apply(action);
    self.refresh_remaining();
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    // An open notice swallows keys until dismissed.
    if self.notice.is_some() {
      if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        self.notice = None;
      }
      return true;
    }

    match self.screen {
      Screen::MainMenu => return self.handle_menu_key(key),
      Screen::DirectEntry | Screen::PrepaidEntry => self.handle_form_key(key),
      Screen::CodeDisplay { .. } => self.handle_code_key(key),
    }
    true
  }

  fn handle_menu_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Char('1') | KeyCode::Char('p') | KeyCode::Enter => {
        self.apply(Action::StartValidation)
      }
      KeyCode::Char('2') | KeyCode::Char('b') => self.apply(Action::TemporaryBadge),
      _ => {}
    }
    true
  }

  fn handle_form_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.apply(Action::Cancel),

      // Switch between the two forms.
      KeyCode::F(2) => {
        let action = if self.screen == Screen::DirectEntry {
          Action::HavePrepaidCode
        } else {
          Action::NoPrepaidCode
        };
        self.apply(action);
      }

      KeyCode::Enter => {
        if self.form().is_some_and(Form::is_complete) {
          self.submit();
        } else {
          self.status_msg = "Please fill in every field before submitting.".into();
        }
      }

      KeyCode::Tab | KeyCode::Down => {
        if let Some(form) = self.form_mut() {
          form.next_field();
        }
      }
      KeyCode::BackTab | KeyCode::Up => {
        if let Some(form) = self.form_mut() {
          form.prev_field();
        }
      }

      KeyCode::Backspace => {
        if let Some(form) = self.form_mut() {
          form.focused().pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(form) = self.form_mut() {
          form.focused().push(c);
        }
      }

      _ => {}
    }
  }

  fn handle_code_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('t') => self.apply(Action::ShowTutorial),
      KeyCode::Enter | KeyCode::Esc | KeyCode::Char('h') => self.apply(Action::ReturnToStart),
      KeyCode::Char('n') => self.apply(Action::RequestNewCode),
      _ => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{io, path::Path};

  use parkval_core::{Error, Layout, MemoryStore, Table};

  use super::*;

  fn app(seed: &[&str]) -> App<MemoryStore> {
    let kiosk = Kiosk::new(
      MemoryStore::new(),
      Layout::under("/kiosk"),
      seed.iter().map(|s| s.to_string()).collect(),
    );
    App::new(kiosk, 1)
  }

  fn press<S: TableStore>(app: &mut App<S>, code: KeyCode) -> bool {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
  }

  fn type_str<S: TableStore>(app: &mut App<S>, s: &str) {
    for c in s.chars() {
      press(app, KeyCode::Char(c));
    }
  }

  #[test]
  fn direct_entry_issues_a_code() {
    let mut app = app(&["CODE1", "CODE2"]);
    assert_eq!(app.remaining, Some(2));

    press(&mut app, KeyCode::Char('1'));
    assert_eq!(app.screen, Screen::DirectEntry);

    type_str(&mut app, "Jane Doe");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "E100");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.screen, Screen::CodeDisplay { code: "CODE1".into() });
    assert_eq!(app.remaining, Some(1));
    assert!(app.low_on_codes());

    let entries = app.kiosk().direct_entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].get("Name"), Some("Jane Doe"));
    assert_eq!(entries[0].get("ID"), Some("E100"));
  }

  #[test]
  fn incomplete_form_is_not_submitted() {
    let mut app = app(&["CODE1"]);
    press(&mut app, KeyCode::Char('1'));
    type_str(&mut app, "Jane");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.screen, Screen::DirectEntry);
    assert!(!app.status_msg.is_empty());
    assert!(app.kiosk().direct_entries().unwrap().is_empty());
  }

  #[test]
  fn prepaid_echoes_the_entered_code() {
    let mut app = app(&["CODE1"]);
    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::F(2));
    assert_eq!(app.screen, Screen::PrepaidEntry);

    type_str(&mut app, "Sam");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "ParkCo");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "PP-7");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.screen, Screen::CodeDisplay { code: "PP-7".into() });
    assert_eq!(app.remaining, Some(1));
  }

  #[test]
  fn exhausted_pool_returns_to_menu_with_notice() {
    let mut app = app(&["ONLY"]);
    for expected in [Some("ONLY"), None] {
      press(&mut app, KeyCode::Char('1'));
      type_str(&mut app, "Jane");
      press(&mut app, KeyCode::Tab);
      type_str(&mut app, "E1");
      press(&mut app, KeyCode::Enter);

      match expected {
        Some(code) => {
          assert_eq!(app.screen, Screen::CodeDisplay { code: code.into() });
          press(&mut app, KeyCode::Enter);
          assert_eq!(app.screen, Screen::MainMenu);
        }
        None => {
          assert_eq!(app.screen, Screen::MainMenu);
          assert_eq!(app.notice, Some(Notice::CodeGenerationFailed));
        }
      }
    }

    // Keys are swallowed until the notice is dismissed.
    press(&mut app, KeyCode::Char('1'));
    assert_eq!(app.screen, Screen::MainMenu);
    press(&mut app, KeyCode::Esc);
    assert!(app.notice.is_none());
  }

  #[test]
  fn forms_start_blank_and_cancel_goes_home() {
    let mut app = app(&["CODE1"]);
    press(&mut app, KeyCode::Char('1'));
    type_str(&mut app, "half");
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.screen, Screen::MainMenu);

    press(&mut app, KeyCode::Char('1'));
    assert_eq!(app.direct.value(0), "");
  }

  #[test]
  fn menu_badge_notice_and_quit() {
    let mut app = app(&["CODE1"]);
    assert!(press(&mut app, KeyCode::Char('2')));
    assert_eq!(app.notice, Some(Notice::TemporaryBadge));
    press(&mut app, KeyCode::Enter);
    assert!(!press(&mut app, KeyCode::Char('q')));
  }

  #[test]
  fn code_screen_offers_a_new_code() {
    let mut app = app(&["CODE1", "CODE2"]);
    press(&mut app, KeyCode::Char('1'));
    type_str(&mut app, "A");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "1");
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::Char('t'));
    assert_eq!(app.notice, Some(Notice::Tutorial));
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.screen, Screen::DirectEntry);
    assert_eq!(app.direct.value(0), "");
  }

  /// Reads work, every update fails as if the file were locked elsewhere.
  struct ReadOnlyStore(MemoryStore);

  impl TableStore for ReadOnlyStore {
    fn exists(&self, path: &Path) -> parkval_core::Result<bool> { self.0.exists(path) }

    fn create_if_absent(&self, path: &Path, initial: &Table) -> parkval_core::Result<bool> {
      self.0.create_if_absent(path, initial)
    }

    fn read(&self, path: &Path) -> parkval_core::Result<Table> { self.0.read(path) }

    fn update<T, F>(&self, _path: &Path, _f: F) -> parkval_core::Result<T>
    where
      F: FnOnce(&mut Table) -> parkval_core::Result<T>,
    {
      Err(Error::storage(io::Error::new(
        io::ErrorKind::PermissionDenied,
        "file is open in another program",
      )))
    }
  }

  #[test]
  fn save_failure_keeps_the_form_and_its_values() {
    let kiosk = Kiosk::new(
      ReadOnlyStore(MemoryStore::new()),
      Layout::under("/kiosk"),
      vec!["CODE1".into()],
    );
    let mut app = App::new(kiosk, 1);

    press(&mut app, KeyCode::Char('1'));
    type_str(&mut app, "Jane Doe");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "E100");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.screen, Screen::DirectEntry);
    assert!(matches!(
      &app.notice,
      Some(Notice::SaveFailed(reason)) if reason.contains("another program")
    ));
    assert_eq!(app.direct.value(0), "Jane Doe");
    assert_eq!(app.direct.value(1), "E100");
    assert_eq!(app.remaining, Some(1));

    // Dismissing the notice returns to the same filled-in form.
    press(&mut app, KeyCode::Enter);
    assert!(app.notice.is_none());
    assert_eq!(app.screen, Screen::DirectEntry);
    assert_eq!(app.direct.value(0), "Jane Doe");
    assert!(!app.kiosk().store().0.exists(&app.kiosk().layout().code_pool).unwrap());
  }
}
