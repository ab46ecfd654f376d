use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use wizard_core::{paginate, Route, WizardRole, DEFAULT_PAGE_SIZE};
use wizard_engine::{
    ensure_store_dir, load_employees, EmployeeApi, FileDraftStore, Navigator, ReqwestEmployeeApi,
    WizardConfig, WizardRunner,
};
use wizard_logging::{wizard_error, wizard_info, wizard_warn};

use super::command::{parse_command, Command, HELP};
use super::render::{render_employees, render_suggestions, render_wizard};

/// How often background progress (lookups, submission stages) is polled.
const REFRESH_INTERVAL: Duration = Duration::from_millis(75);

/// Hands routes from the runner's timer task to the prompt loop.
struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        if self.tx.send(route).is_err() {
            wizard_warn!("Navigation to {} dropped; prompt loop is gone", route.path());
        }
    }
}

/// Last printed suggestion panels, so each change is printed once.
#[derive(Default)]
struct SuggestionEcho {
    departments: Option<String>,
    locations: Option<String>,
}

impl SuggestionEcho {
    fn refresh(&mut self, runner: &WizardRunner) {
        let departments = runner.departments();
        let text = render_suggestions("department", &departments.snapshot(), |d| {
            departments.display(d)
        });
        echo_if_changed(&mut self.departments, text);

        let locations = runner.locations();
        let text = render_suggestions("officeLocation", &locations.snapshot(), |l| {
            locations.display(l)
        });
        echo_if_changed(&mut self.locations, text);
    }
}

fn echo_if_changed(last: &mut Option<String>, current: Option<String>) {
    if *last != current {
        if let Some(text) = &current {
            println!("{text}");
        }
        *last = current;
    }
}

pub(crate) fn connect(config: &WizardConfig) -> Result<Arc<dyn EmployeeApi>> {
    let api = ReqwestEmployeeApi::new(&config.api).context("invalid API settings")?;
    Ok(Arc::new(api))
}

/// Runs the wizard prompt until the user quits or a successful submission
/// navigates to the employee listing.
pub(crate) async fn run_wizard(config: &WizardConfig, role: WizardRole) -> Result<()> {
    let api = connect(config)?;
    if let Err(err) = ensure_store_dir(&config.draft_dir) {
        // Drafts are best effort; the wizard still works without them.
        wizard_warn!("Draft directory unavailable: {err}");
    }
    let store = Arc::new(FileDraftStore::new(&config.draft_dir));
    let (nav_tx, mut nav_rx) = mpsc::unbounded_channel();

    let runner = WizardRunner::new(
        role,
        Arc::clone(&api),
        store,
        Arc::new(ChannelNavigator { tx: nav_tx }),
        config.runner_settings(),
    );
    wizard_info!("Starting {role} wizard");
    runner.mount();
    println!("{HELP}\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut refresh = tokio::time::interval(REFRESH_INTERVAL);
    let mut suggestions = SuggestionEcho::default();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => apply(&runner, command),
                    Err(err) => println!("{err}"),
                }
            }
            Some(route) = nav_rx.recv() => {
                runner.shutdown();
                if let Some(view) = runner.take_view_if_dirty() {
                    println!("{}", render_wizard(&view));
                }
                return show_route(route, api.as_ref()).await;
            }
            _ = refresh.tick() => {}
        }

        if let Some(view) = runner.take_view_if_dirty() {
            println!("{}", render_wizard(&view));
        }
        suggestions.refresh(&runner);
    }

    runner.shutdown();
    Ok(())
}

fn apply(runner: &WizardRunner, command: Command) {
    match command {
        Command::Set { field, value } => runner.edit(field, value),
        Command::Pick { field, index } => match runner.choose_suggestion(field, index) {
            Some(name) => println!("Selected {name}"),
            None => println!("No suggestion #{} for {}", index + 1, field.name()),
        },
        Command::Leave { field } => runner.leave(field),
        Command::Next => runner.next(),
        Command::Submit => runner.submit(),
        Command::Clear => runner.clear_draft(),
        Command::Show => println!("{}", render_wizard(&runner.view())),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

async fn show_route(route: Route, api: &dyn EmployeeApi) -> Result<()> {
    match route {
        Route::Employees => print_employees(api, 1, DEFAULT_PAGE_SIZE).await,
        Route::Wizard(role) => {
            println!("Open {} to start another submission.", route.path());
            wizard_info!("Wizard finished for {role}");
            Ok(())
        }
    }
}

/// Loads both services, joins them and prints one page.
pub(crate) async fn print_employees(
    api: &dyn EmployeeApi,
    page: usize,
    page_size: usize,
) -> Result<()> {
    let employees = match load_employees(api).await {
        Ok(employees) => employees,
        Err(err) => {
            wizard_error!("Failed to load employees: {err}");
            return Err(err).context("failed to load employees");
        }
    };
    println!("{}", render_employees(&paginate(&employees, page, page_size)));
    Ok(())
}
