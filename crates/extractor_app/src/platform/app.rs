use std::io::{self, Stdout, Write};
use std::mem::{self, Discriminant};
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use extractor_core::{update, AppViewModel, FormState, Msg, ResultRegion};
use extractor_logging::{extractor_info, extractor_warn};

use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::logging;
use super::ui::{
    frame::{self, ScrollRequest, Viewport},
    input,
    input::KeyAction,
    layout::{self, PageShell, PAGE_META},
    render,
};

/// Input poll interval; also the render coalescing tick.
const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let file_config = config::read_config_file(Path::new(config::CONFIG_FILENAME));
    let mut app_config = match &file_config {
        Ok(Some(loaded)) => loaded.clone(),
        _ => AppConfig::default(),
    };
    app_config.apply_api_override(std::env::var(config::API_URL_ENV).ok());

    logging::initialize(app_config.log_destination);
    match file_config {
        Ok(Some(_)) => extractor_info!("Loaded {}", config::CONFIG_FILENAME),
        Ok(None) => extractor_info!("No {}, using defaults", config::CONFIG_FILENAME),
        Err(err) => extractor_warn!("Ignoring config file: {}", err),
    }
    if app_config.clamp_timeout() {
        extractor_warn!(
            "request_timeout_secs must be positive, using {}s",
            config::DEFAULT_TIMEOUT_SECS
        );
    }
    extractor_info!(
        "API base {} (timeout {}s)",
        app_config.api_url,
        app_config.request_timeout_secs
    );

    let shell = PageShell::new(PAGE_META, layout::load_logo(Path::new(layout::LOGO_PATH)));
    extractor_info!("{}: {}", shell.meta().title, shell.meta().description);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(app_config.client_settings(), msg_tx);

    let mut terminal = TerminalSession::enter()?;
    let mut state = FormState::new();
    terminal.draw(&shell, &state)?;

    loop {
        let mut repaint = false;

        if event::poll(TICK_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => match input::map_key(key, &state.view()) {
                    KeyAction::Quit => break,
                    KeyAction::Dispatch(msg) => state = dispatch(state, msg, &runner),
                    KeyAction::Scroll(request) => {
                        terminal.screen.scroll(request);
                        repaint = true;
                    }
                    KeyAction::Ignore => {}
                },
                Event::Resize(..) => repaint = true,
                _ => {}
            }
        }

        while let Ok(msg) = msg_rx.try_recv() {
            state = dispatch(state, msg, &runner);
        }

        if state.consume_dirty() || repaint {
            terminal.draw(&shell, &state)?;
        }
    }

    extractor_info!("Exiting");
    Ok(())
}

fn dispatch(state: FormState, msg: Msg, runner: &EffectRunner) -> FormState {
    let (state, effects) = update(state, msg);
    runner.enqueue(effects);
    state
}

/// Scroll position and what the last draw showed.
#[derive(Debug, Default)]
struct Screen {
    viewport: Viewport,
    shown_region: Option<Discriminant<ResultRegion>>,
    total_rows: usize,
    height: usize,
}

impl Screen {
    /// Paints `view`. The viewport jumps to the result region whenever the
    /// region changes kind and is off screen.
    fn draw(
        &mut self,
        out: &mut impl Write,
        shell: &PageShell,
        view: &AppViewModel,
        width: u16,
        height: u16,
    ) -> io::Result<()> {
        let frame = shell.wrap(render::render(view));
        let (rows, result) = frame.rows(width as usize);
        self.total_rows = rows.len();
        self.height = height as usize;

        let region = mem::discriminant(&view.result);
        if self.shown_region != Some(region) {
            self.shown_region = Some(region);
            if let Some(result) = result {
                self.viewport.reveal(result, self.total_rows, self.height);
            }
        }
        frame::paint(out, &frame, &mut self.viewport, width, height)
    }

    fn scroll(&mut self, request: ScrollRequest) {
        self.viewport.apply(request, self.total_rows, self.height);
    }
}

/// Raw mode plus alternate screen, restored on drop.
struct TerminalSession {
    stdout: Stdout,
    screen: Screen,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self {
            stdout,
            screen: Screen::default(),
        })
    }

    fn draw(&mut self, shell: &PageShell, state: &FormState) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        self.screen
            .draw(&mut self.stdout, shell, &state.view(), width, height)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use extractor_core::{ScrapeReply, Settlement};
    use serde_json::json;

    use super::*;

    const WIDTH: u16 = 80;
    const HEIGHT: u16 = 24;

    fn shipped_shell() -> PageShell {
        let logo = layout::load_logo(Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../assets/logo.txt"
        )));
        assert!(logo.is_some(), "logo asset missing");
        PageShell::new(PAGE_META, logo)
    }

    fn in_flight() -> FormState {
        let state = FormState::new();
        let (state, _) = update(
            state,
            Msg::DestinationChanged("https://docs.google.com/spreadsheets/d/abc".to_string()),
        );
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(state, Msg::RequestDispatched { request_id: 1 });
        state
    }

    fn settle(state: FormState, settlement: Settlement) -> FormState {
        update(
            state,
            Msg::ScrapeSettled {
                request_id: 1,
                settlement,
            },
        )
        .0
    }

    fn record(i: usize) -> serde_json::Value {
        json!({
            "correspondent_email": format!("owner{i}@example.com"),
            "phone_number": format!("555-010{i}"),
            "correspondent_name": format!("Owner {i}"),
            "date_cancelled": "2015-07-02",
            "us_serial_number": format!("8623456{i}"),
            "mark": format!("MARK {i}"),
            "goods_services": "Clothing, namely, shirts and hats",
        })
    }

    /// Draws the idle and loading screens, then returns what `last` paints.
    fn paint_after_loading(shell: &PageShell, last: &FormState) -> (Screen, String) {
        let mut screen = Screen::default();
        let mut sink = Vec::new();
        screen
            .draw(&mut sink, shell, &FormState::new().view(), WIDTH, HEIGHT)
            .unwrap();
        screen
            .draw(&mut sink, shell, &in_flight().view(), WIDTH, HEIGHT)
            .unwrap();

        let mut out = Vec::new();
        screen
            .draw(&mut out, shell, &last.view(), WIDTH, HEIGHT)
            .unwrap();
        (screen, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn success_preview_is_on_screen_at_80x24() {
        let shell = shipped_shell();
        let state = settle(
            in_flight(),
            Settlement::Completed(ScrapeReply {
                success: true,
                count: 5,
                data: (1..=5).map(record).collect(),
                message: None,
            }),
        );

        let (screen, painted) = paint_after_loading(&shell, &state);

        assert!(screen.total_rows > HEIGHT as usize);
        assert!(painted.contains("Successfully extracted 5 trademarks!"));
        assert!(painted.contains("86234561"));
    }

    #[test]
    fn long_transport_error_wraps_instead_of_clipping() {
        let shell = shipped_shell();
        let detail = "The caller does not have permission to write to this spreadsheet. \
Share the sheet with edit access for the account used by the extraction service: \
service-account@project.iam.gserviceaccount.com";
        let state = settle(
            in_flight(),
            Settlement::TransportFailed {
                detail: Some(detail.to_string()),
                message: None,
            },
        );

        let (_, painted) = paint_after_loading(&shell, &state);

        assert!(painted.contains("Error: The caller does not have permission"));
        assert!(painted.contains("gserviceaccount.com"));
    }

    #[test]
    fn page_down_reaches_the_key_help_line() {
        let shell = shipped_shell();
        let view = FormState::new().view();
        let mut screen = Screen::default();
        let mut out = Vec::new();
        screen.draw(&mut out, &shell, &view, WIDTH, HEIGHT).unwrap();
        assert_eq!(screen.viewport.scroll(), 0);

        screen.scroll(ScrollRequest::Bottom);
        let mut out = Vec::new();
        screen.draw(&mut out, &shell, &view, WIDTH, HEIGHT).unwrap();

        assert!(screen.viewport.scroll() > 0);
        assert!(String::from_utf8_lossy(&out).contains("Esc: quit"));
    }

    #[test]
    fn manual_scroll_survives_redraws_of_the_same_region() {
        let shell = shipped_shell();
        let view = in_flight().view();
        let mut screen = Screen::default();
        let mut out = Vec::new();
        screen.draw(&mut out, &shell, &view, WIDTH, HEIGHT).unwrap();

        screen.scroll(ScrollRequest::Top);
        screen.draw(&mut out, &shell, &view, WIDTH, HEIGHT).unwrap();

        assert_eq!(screen.viewport.scroll(), 0);
    }
}
