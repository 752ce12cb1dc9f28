use probability_session::config::SessionConfig;
use probability_session::input::{self, Input, ParseError, HELP};
use probability_session::render;
use probability_session::session_loop::{run_session_loop, SessionCommand};
use probability_shared::protocol::{Event, Snapshot};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, oneshot};

/// Terminal presentation of the session, text or JSON lines.
struct FrontEnd {
    json: bool,
    last: Snapshot,
    /// Print jar odds or the board with the next snapshot
    detail_pending: bool,
}

impl FrontEnd {
    fn parse(&self, line: &str) -> Result<Input, ParseError> {
        if self.json {
            input::parse_json(line).map(Input::Play)
        } else {
            input::parse_text(line)
        }
    }

    fn show(&mut self, event: &Event) {
        if let Event::Snapshot(snapshot) = event {
            self.last = snapshot.clone();
        }

        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!("Failed to encode event: {}", e),
            }
            return;
        }

        match event {
            Event::Snapshot(snapshot) => {
                if std::mem::take(&mut self.detail_pending) {
                    if let Some(detail) = render::render_detail(snapshot) {
                        println!("{}", detail);
                    }
                }
            }
            Event::ScreenChanged(_)
            | Event::MarbleDrawn(_)
            | Event::JarReset
            | Event::SlotSelected(_)
            | Event::BallDropped(_)
            | Event::BoardReset => self.detail_pending = true,
            _ => {}
        }
        if let Some(text) = render::render_event(event) {
            println!("{}", text);
        }
    }
}

#[tokio::main]
async fn main() {
    // stdout carries game output, logs go to stderr
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");

    let mut config = match SessionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid session configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Validate configuration before starting
    if let Err(e) = config.apply_args(&args).and_then(|_| config.validate()) {
        eprintln!("Invalid session configuration: {}", e);
        std::process::exit(1);
    }

    let (cmd_tx, cmd_rx) = mpsc::channel::<SessionCommand>(64);
    let (event_tx, mut event_rx) = broadcast::channel::<Event>(256);

    // Spawn session loop
    let session = tokio::spawn(run_session_loop(cmd_rx, event_tx, config));

    let (response, welcome_rx) = oneshot::channel();
    if cmd_tx.send(SessionCommand::Join { response }).await.is_err() {
        eprintln!("Session loop is not running");
        std::process::exit(1);
    }
    let welcome = match welcome_rx.await {
        Ok(welcome) => welcome,
        Err(_) => {
            eprintln!("Session loop closed before welcoming us");
            std::process::exit(1);
        }
    };

    let mut front = FrontEnd {
        json,
        last: welcome.snapshot.clone(),
        detail_pending: false,
    };
    front.show(&Event::Welcome(welcome));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    // Dropped on end of input; events keep flowing until the loop closes
    let mut cmd_tx = Some(cmd_tx);
    loop {
        tokio::select! {
            line = lines.next_line(), if cmd_tx.is_some() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        cmd_tx = None;
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read stdin: {}", e);
                        cmd_tx = None;
                        continue;
                    }
                };
                match front.parse(&line) {
                    Ok(Input::Play(command)) => {
                        let sent = match &cmd_tx {
                            Some(tx) => tx.send(SessionCommand::Play(command)).await.is_ok(),
                            None => false,
                        };
                        if !sent {
                            cmd_tx = None;
                        }
                    }
                    Ok(Input::Stats) => println!("{}", render::render_stats(&front.last.session)),
                    Ok(Input::Help) => println!("{}", HELP),
                    Ok(Input::Quit) => cmd_tx = None,
                    Err(ParseError::Empty) => {}
                    Err(e) => eprintln!("{}", e),
                }
            }

            event = event_rx.recv() => match event {
                Ok(event) => front.show(&event),
                Err(RecvError::Lagged(n)) => tracing::warn!("Front end lagged by {} events", n),
                Err(RecvError::Closed) => break,
            },
        }
    }

    let _ = session.await;
}
