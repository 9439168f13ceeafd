//! Main application orchestrator.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::application::router::{HashRouter, StateSubscription};
use crate::application::services::OrganizationService;
use crate::application::shell::{PageShell, Resolution};
use crate::domain::{NavigationState, Organization, OrganizationId, Page};
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::ui::{FormAction, HomeAction, HomeScreen, OrganizationForm, StaticPage};
use crate::presentation::widgets::{FooterBar, HeaderBar, KeyHint, NavMenu, TextInput};

const MENU_WIDTH: u16 = 26;

const HOME_HINTS: &[KeyHint] = &[
    KeyHint::new("j/k", "move"),
    KeyHint::new("Enter", "open"),
    KeyHint::new("r", "refresh"),
    KeyHint::new("F1-F6", "menu"),
    KeyHint::new("^L", "location"),
    KeyHint::new("q", "quit"),
];

const FORM_HINTS: &[KeyHint] = &[
    KeyHint::new("Tab", "next field"),
    KeyHint::new("^S", "save"),
    KeyHint::new("F1-F6", "menu"),
    KeyHint::new("^L", "location"),
    KeyHint::new("^C", "quit"),
];

const STATIC_HINTS: &[KeyHint] = &[
    KeyHint::new("j/k", "scroll"),
    KeyHint::new("F1-F6", "menu"),
    KeyHint::new("^L", "location"),
    KeyHint::new("q", "quit"),
];

const LOCATION_HINTS: &[KeyHint] = &[
    KeyHint::new("Enter", "go"),
    KeyHint::new("Esc", "cancel"),
];

#[derive(Debug)]
enum Action {
    OrganizationsLoaded(Vec<Organization>),
    OrganizationLoaded(Option<Organization>),
    SaveSent(OrganizationId),
}

enum CurrentScreen {
    Home(HomeScreen),
    Organization(Box<OrganizationForm>),
    Static(StaticPage),
}

/// Terminal front end: keeps the active screen in step with the router.
pub struct App {
    shell: PageShell,
    subscription: StateSubscription,
    service: Arc<OrganizationService>,
    state: NavigationState,
    entered: Option<(Page, NavigationState)>,
    screen: CurrentScreen,
    location: Option<TextInput>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    running: bool,
}

impl App {
    #[must_use]
    pub fn new(router: Arc<HashRouter>, service: Arc<OrganizationService>) -> Self {
        let subscription = router.subscribe();
        let state = subscription.current().clone();
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            shell: PageShell::new(router),
            subscription,
            service,
            state,
            entered: None,
            screen: CurrentScreen::Home(HomeScreen::new()),
            location: None,
            action_tx,
            action_rx,
            running: true,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal or reading events fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.apply_state(self.state.clone());
        self.run_event_loop(terminal).await?;
        info!(fragment = %self.shell.router().fragment(), "Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                Some(state) = self.subscription.changed() => {
                    self.apply_state(state);
                }

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                event = terminal_events.next() => match event {
                    Some(Ok(event)) => {
                        if self.handle_terminal_event(event) == EventResult::Exit {
                            self.running = false;
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => self.running = false,
                },
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    /// Resolves `state` and enters its page when the page or its arguments
    /// changed since the last one entered.
    fn apply_state(&mut self, state: NavigationState) {
        let resolution = self.shell.render(&state);
        self.state = state;

        let key = (resolution.page, resolution.args.clone());
        if self.entered.as_ref() == Some(&key) {
            return;
        }
        debug!(page = %resolution.page, args = %resolution.args, "Entering page");
        self.screen = self.enter_page(&resolution);
        self.entered = Some(key);
    }

    fn enter_page(&self, resolution: &Resolution) -> CurrentScreen {
        if let Some(content) = StaticPage::for_page(resolution.page) {
            return CurrentScreen::Static(content);
        }

        if resolution.page == Page::EditOrganization {
            let form = match resolution.args.get("id").filter(|id| !id.is_empty()) {
                Some(id) => {
                    let id = OrganizationId::new(id);
                    self.spawn_get(id.clone());
                    OrganizationForm::loading(id)
                }
                None => OrganizationForm::new(),
            };
            return CurrentScreen::Organization(Box::new(form));
        }

        self.spawn_list();
        CurrentScreen::Home(HomeScreen::new())
    }

    fn spawn_list(&self) {
        let service = Arc::clone(&self.service);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let organizations = service.list_organizations().await;
            let _ = tx.send(Action::OrganizationsLoaded(organizations));
        });
    }

    fn spawn_get(&self, id: OrganizationId) {
        let service = Arc::clone(&self.service);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let organization = service.get_organization(&id).await;
            let _ = tx.send(Action::OrganizationLoaded(organization));
        });
    }

    fn spawn_save(&self, organization: Organization) {
        let service = Arc::clone(&self.service);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            service.save_organization(&organization).await;
            let _ = tx.send(Action::SaveSent(organization.id));
        });
    }

    /// Applies a background result to the current screen, if it is of the
    /// matching kind.
    fn handle_action(&mut self, action: Action) {
        match (action, &mut self.screen) {
            (Action::OrganizationsLoaded(organizations), CurrentScreen::Home(screen)) => {
                screen.set_organizations(&organizations);
            }
            (Action::OrganizationLoaded(organization), CurrentScreen::Organization(form)) => {
                form.populate(organization);
            }
            (Action::SaveSent(id), CurrentScreen::Organization(form)) => {
                if form.id() == &id {
                    form.set_sent();
                }
            }
            (action, _) => debug!(?action, "Dropping result for inactive screen"),
        }
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_quit_event(&key) {
            return EventResult::Exit;
        }

        if self.location.is_some() {
            self.handle_location_key(key);
            return EventResult::Consumed;
        }

        if EventHandler::is_location_event(&key) {
            let mut input = TextInput::new("Location").placeholder("p=home");
            input.set_value(self.shell.router().fragment());
            input.set_focused(true);
            self.location = Some(input);
            return EventResult::Consumed;
        }

        let in_form = matches!(self.screen, CurrentScreen::Organization(_));
        if let Some(index) = EventHandler::nav_shortcut(&key, !in_form) {
            if let Some(link) = self.shell.menu_link(index).cloned() {
                self.shell.activate(&link, &self.state);
            }
            return EventResult::Consumed;
        }

        if !in_form && EventHandler::is_dismiss_event(&key) {
            return EventResult::Exit;
        }

        match &mut self.screen {
            CurrentScreen::Home(screen) => match screen.handle_key(key) {
                HomeAction::Open(link) => {
                    self.shell.activate(&link, &self.state);
                }
                HomeAction::Refresh => {
                    screen.set_loading();
                    self.spawn_list();
                }
                HomeAction::None => {}
            },
            CurrentScreen::Organization(form) => {
                if let FormAction::Save(organization) = form.handle_key(key) {
                    self.spawn_save(organization);
                }
            }
            CurrentScreen::Static(content) => content.handle_key(key),
        }
        EventResult::Continue
    }

    fn handle_location_key(&mut self, key: KeyEvent) {
        let Some(input) = self.location.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Enter => {
                let fragment = input.value().to_string();
                self.location = None;
                self.shell.router().set_fragment(&fragment);
            }
            KeyCode::Esc => self.location = None,
            KeyCode::Char(c) => input.input_char(c),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_start(),
            KeyCode::End => input.move_end(),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let fragment = self.shell.router().fragment();
        let header = HeaderBar::new(&fragment).location_input(self.location.as_ref());

        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(header.height()),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(header, header_area);

        let [menu_area, page_area] =
            Layout::horizontal([Constraint::Length(MENU_WIDTH), Constraint::Fill(1)])
                .areas(body_area);
        let menu = self.shell.menu(&self.state);
        frame.render_widget(NavMenu::new(&menu), menu_area);

        let page_area = page_area.inner(ratatui::layout::Margin::new(2, 1));
        self.render_page(frame, page_area);

        let (hints, label) = self.footer_hints();
        frame.render_widget(FooterBar::new(hints).label(label), footer_area);
    }

    fn render_page(&self, frame: &mut Frame, area: Rect) {
        match &self.screen {
            CurrentScreen::Home(screen) => frame.render_widget(screen, area),
            CurrentScreen::Organization(form) => frame.render_widget(form.as_ref(), area),
            CurrentScreen::Static(content) => frame.render_widget(content, area),
        }
    }

    fn footer_hints(&self) -> (&'static [KeyHint], &'static str) {
        if self.location.is_some() {
            return (LOCATION_HINTS, "LOCATION");
        }
        match self.screen {
            CurrentScreen::Home(_) => (HOME_HINTS, "HOME"),
            CurrentScreen::Organization(_) => (FORM_HINTS, "FORM"),
            CurrentScreen::Static(_) => (STATIC_HINTS, "PAGE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::StoreContext;
    use crate::domain::entities::SparseRecord;
    use crate::domain::errors::StoreError;
    use crate::domain::ports::mocks::{MockCredentials, MockOrganizationStorePort};
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};

    fn record(id: &str, name: &str) -> SparseRecord {
        [("id", id), ("name", name)].into_iter().collect()
    }

    fn make_app(fragment: &str, store: MockOrganizationStorePort) -> (App, Arc<HashRouter>) {
        let router = Arc::new(HashRouter::new(fragment));
        let context = Arc::new(StoreContext::new(Arc::new(MockCredentials::new(true))));
        let service = Arc::new(OrganizationService::new(Arc::new(store), context));
        let mut app = App::new(Arc::clone(&router), service);
        app.apply_state(app.state.clone());
        (app, router)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sync(app: &mut App) {
        while let Some(state) = app.subscription.try_changed() {
            app.apply_state(state);
        }
    }

    fn render_to_string(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..30)
            .map(|y| (0..100).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn next_action(app: &mut App) {
        let action = app.action_rx.recv().await.unwrap();
        app.handle_action(action);
    }

    #[tokio::test]
    async fn test_empty_fragment_redirects_home_and_lists() {
        let mut store = MockOrganizationStorePort::new();
        store
            .expect_scan()
            .times(1)
            .returning(|_, _| Ok(vec![record("2", "Intiman"), record("1", "ACT")]));
        let (mut app, router) = make_app("", store);

        assert_eq!(router.fragment(), "p=home");
        sync(&mut app);
        next_action(&mut app).await;

        let CurrentScreen::Home(screen) = &app.screen else {
            panic!("expected home screen");
        };
        let names: Vec<_> = screen.links().iter().map(|l| l.label().to_string()).collect();
        assert_eq!(names, ["ACT", "Intiman"]);
    }

    #[tokio::test]
    async fn test_edit_form_fetches_record() {
        let mut store = MockOrganizationStorePort::new();
        store
            .expect_get()
            .withf(|_, id| id.as_str() == "42")
            .times(1)
            .returning(|_, _| Ok(Some(record("42", "ACT"))));
        let (mut app, _router) = make_app("#p=edit-organization&id=42", store);

        next_action(&mut app).await;

        let CurrentScreen::Organization(form) = &app.screen else {
            panic!("expected form");
        };
        assert_eq!(form.organization(), Organization::new("42", "ACT", ""));
    }

    #[tokio::test]
    async fn test_new_form_without_id_does_not_fetch() {
        let (app, _router) = make_app("p=edit-organization", MockOrganizationStorePort::new());

        let CurrentScreen::Organization(form) = &app.screen else {
            panic!("expected form");
        };
        assert!(!form.id().is_empty());
    }

    #[tokio::test]
    async fn test_function_key_follows_menu_link() {
        let (mut app, router) = make_app("p=edit-venue&x=1", MockOrganizationStorePort::new());

        app.handle_key(key(KeyCode::F(6)));
        sync(&mut app);

        assert_eq!(router.fragment(), "p=random-ass-thoughts");
        assert!(matches!(app.screen, CurrentScreen::Static(_)));
    }

    #[tokio::test]
    async fn test_digits_type_into_form() {
        let (mut app, router) = make_app("p=edit-organization", MockOrganizationStorePort::new());

        app.handle_key(key(KeyCode::Char('1')));

        assert_eq!(router.fragment(), "p=edit-organization");
        let CurrentScreen::Organization(form) = &app.screen else {
            panic!("expected form");
        };
        assert_eq!(form.organization().name, "1");
    }

    #[tokio::test]
    async fn test_location_bar_sets_fragment() {
        let (mut app, router) = make_app("p=edit-venue", MockOrganizationStorePort::new());

        app.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert!(app.location.is_some());
        for _ in 0.."p=edit-venue".len() {
            app.handle_key(key(KeyCode::Backspace));
        }
        for c in "p=edit-production".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        sync(&mut app);

        assert!(app.location.is_none());
        assert_eq!(router.fragment(), "p=edit-production");
        let CurrentScreen::Static(content) = &app.screen else {
            panic!("expected static page");
        };
        assert_eq!(content.body(), "Edit Production.");
    }

    #[tokio::test]
    async fn test_location_bar_escape_cancels() {
        let (mut app, router) = make_app("p=edit-venue", MockOrganizationStorePort::new());

        app.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.handle_key(key(KeyCode::Esc)), EventResult::Consumed);

        assert!(app.location.is_none());
        assert_eq!(router.fragment(), "p=edit-venue");
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let (mut app, _router) = make_app("p=edit-venue", MockOrganizationStorePort::new());
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), EventResult::Exit);

        let (mut form_app, _router) =
            make_app("p=edit-organization", MockOrganizationStorePort::new());
        assert_eq!(form_app.handle_key(key(KeyCode::Char('q'))), EventResult::Continue);
        assert_eq!(
            form_app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            EventResult::Exit
        );
    }

    #[tokio::test]
    async fn test_save_marks_form_saved() {
        let mut store = MockOrganizationStorePort::new();
        store
            .expect_put()
            .withf(|_, item| item.get("name") == Some("ACT") && !item.contains("mission"))
            .times(1)
            .returning(|_, _| Ok(()));
        let (mut app, _router) = make_app("p=edit-organization", store);

        for c in "ACT".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        next_action(&mut app).await;

        let CurrentScreen::Organization(form) = &app.screen else {
            panic!("expected form");
        };
        assert_eq!(form.state(), crate::presentation::ui::FormState::Sent);
    }

    #[tokio::test]
    async fn test_failed_save_not_reported_as_success() {
        let mut store = MockOrganizationStorePort::new();
        store
            .expect_put()
            .times(1)
            .returning(|_, _| Err(StoreError::network("connection reset")));
        let (mut app, _router) = make_app("p=edit-organization", store);

        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        next_action(&mut app).await;

        let CurrentScreen::Organization(form) = &app.screen else {
            panic!("expected form");
        };
        assert_eq!(form.state(), crate::presentation::ui::FormState::Sent);
        let text = render_to_string(&app);
        assert!(text.contains("Save sent."));
        assert!(!text.contains("Saved."));
    }

    #[tokio::test]
    async fn test_same_page_and_args_keeps_screen() {
        let (mut app, router) = make_app("p=edit-organization", MockOrganizationStorePort::new());
        let id = match &app.screen {
            CurrentScreen::Organization(form) => form.id().clone(),
            _ => panic!("expected form"),
        };

        router.set_fragment("#p=edit-organization");
        app.apply_state(router.parse_state());

        let CurrentScreen::Organization(form) = &app.screen else {
            panic!("expected form");
        };
        assert_eq!(form.id(), &id);
    }

    #[tokio::test]
    async fn test_late_list_dropped_on_other_screen() {
        let (mut app, _router) = make_app("p=edit-venue", MockOrganizationStorePort::new());

        app.handle_action(Action::OrganizationsLoaded(vec![Organization::new(
            "1", "ACT", "",
        )]));

        assert!(matches!(app.screen, CurrentScreen::Static(_)));
    }
}
