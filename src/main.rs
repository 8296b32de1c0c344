//! Headless runner: submit one analysis through the page controller and print the
//! resulting panel.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    match cli::run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::io::Read;
    use std::sync::Arc;
    use std::time::Duration;

    use sentipanel::api::HttpBackend;
    use sentipanel::{
        Document, HeadlessSession, MemoryDocument, Mode, PanelState, SentimentController,
        config, logging,
    };

    /// Exit status when the input was rejected before any request.
    const EXIT_REJECTED: i32 = 2;
    /// Slack on top of the configured timeouts before giving up on a worker.
    const SETTLE_GRACE: Duration = Duration::from_secs(5);

    #[derive(Debug, PartialEq, Eq)]
    pub(crate) struct Options {
        pub(crate) mode: Mode,
        pub(crate) base_url: Option<String>,
        pub(crate) html: bool,
        pub(crate) text: Option<String>,
    }

    pub(crate) fn run() -> Result<i32, String> {
        let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
            return Ok(0);
        };
        if let Err(err) = logging::init() {
            eprintln!("Logging disabled: {err}");
        }
        let mut config = config::load_or_default().map_err(|err| err.to_string())?;
        if let Some(url) = options.base_url {
            config.base_url = url;
        }
        let backend = HttpBackend::new(&config).map_err(|err| err.to_string())?;
        tracing::info!("Using backend at {}", backend.base_url());

        let input = match options.text {
            Some(text) => text,
            None => read_stdin()?,
        };
        let mode = options.mode;
        let mut document = MemoryDocument::host_page();
        document.set_input_value(mode.input_id(), &input);
        let controller = SentimentController::new(document, &config);
        let mut session = HeadlessSession::new(controller, Arc::new(backend));

        if !session.submit(mode) {
            for message in session.document_mut().take_notifications() {
                eprintln!("{message}");
            }
            return Ok(EXIT_REJECTED);
        }
        let budget = Duration::from_secs(config.connect_timeout_secs + config.read_timeout_secs);
        if !session.wait_until_settled(budget + SETTLE_GRACE) {
            return Err("Timed out waiting for the backend".to_string());
        }

        let document = session.document();
        let panel = document
            .element_by_id(mode.result_panel_id())
            .ok_or_else(|| format!("#{} missing from page", mode.result_panel_id()))?;
        if options.html {
            println!("{}", document.inner_html(&panel));
        } else {
            println!("{}", document.inner_text(&panel));
        }
        Ok(match session.controller().state(mode) {
            PanelState::Error => 1,
            _ => 0,
        })
    }

    pub(crate) fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
        let help_requested = args
            .iter()
            .take_while(|arg| *arg != "--")
            .any(|arg| arg == "--help" || arg == "-h");
        if help_requested {
            print_help();
            return Ok(None);
        }
        let mut mode = Mode::Single;
        let mut base_url = None;
        let mut html = false;
        let mut texts = Vec::new();
        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--batch" => mode = Mode::Batch,
                "--html" => html = true,
                "--url" => {
                    let value = it
                        .next()
                        .ok_or_else(|| "Missing value for --url".to_string())?;
                    base_url = Some(value);
                }
                "--" => texts.extend(it.by_ref()),
                flag if flag.starts_with("--") => {
                    return Err(format!("Unknown argument: {flag}"));
                }
                _ => texts.push(arg),
            }
        }
        let separator = match mode {
            Mode::Single => " ",
            Mode::Batch => "\n",
        };
        let text = (!texts.is_empty()).then(|| texts.join(separator));
        Ok(Some(Options {
            mode,
            base_url,
            html,
            text,
        }))
    }

    fn read_stdin() -> Result<String, String> {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .map_err(|err| format!("Failed to read stdin: {err}"))?;
        Ok(input)
    }

    fn print_help() {
        println!("Usage: sentipanel [--batch] [--url <base>] [--html] [TEXT...]");
        println!();
        println!("Options:");
        println!("  --batch       Analyze one text per argument (or per stdin line)");
        println!("  --url <base>  Backend origin (defaults to base_url in sentipanel.toml)");
        println!("  --html        Print the result panel as HTML instead of text");
        println!();
        println!("Reads TEXT from stdin when no text arguments are given.");
    }

}
