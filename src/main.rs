use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use trivia_board::app::{controls, BoardView, Command};
use trivia_board::core::{ConfigProvider, SessionStatus};
use trivia_board::utils::{logger, validation::Validate};
use trivia_board::{CliConfig, GameConfig, GameError, HttpTriviaSource, Selector, TriviaGame};

type Game = TriviaGame<HttpTriviaSource>;

fn redraw(game: &Game, view: Option<&BoardView>, config: &GameConfig) {
    let session = game.session();
    match (session.status(), session.board(), view) {
        (SessionStatus::Ready, Some(board), Some(view)) => {
            println!(
                "{}",
                view.render(board, config.placeholder(), session.recent_clue())
            );
        }
        (SessionStatus::Failed(message), _, _) => {
            println!("❌ {} (type 'restart' to try again)", message);
        }
        _ => println!("⏳ Loading categories..."),
    }
}

fn reveal_cell(game: &mut Game, view: Option<&BoardView>, label: &str) {
    let Some(position) = view.and_then(|v| v.resolve(label)) else {
        println!("No cell '{}' on the board. Type 'help' for commands.", label);
        return;
    };

    match game.reveal(position.category, position.clue) {
        Ok(reveal) => {
            tracing::debug!("Revealed {} -> {:?}", label, reveal);
        }
        Err(e @ GameError::IndexOutOfRange { .. }) => {
            // 標籤都來自同一個棋盤，走到這裡代表對應表錯了
            if cfg!(debug_assertions) {
                panic!("cell map out of sync with board: {}", e);
            }
            tracing::error!("❌ {}", e);
        }
        Err(e) => println!("❌ {}", e.user_friendly_message()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting trivia-board");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let source = HttpTriviaSource::new(&config).context("creating trivia data source")?;
    let selector = Selector::new(source, &config);
    let mut game = TriviaGame::new(selector).with_seed(cli.seed);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut view: Option<BoardView> = None;
    game.spawn_setup(&tx);
    redraw(&game, view.as_ref(), &config);
    println!("{}", controls::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(outcome) = rx.recv() => {
                if game.install(outcome) {
                    view = game.session().board().map(BoardView::new);
                    redraw(&game, view.as_ref(), &config);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("reading from stdin")? else {
                    break;
                };

                match Command::parse(&line) {
                    Command::Empty => {}
                    Command::Quit => break,
                    Command::Help => println!("{}", controls::HELP),
                    Command::Show => redraw(&game, view.as_ref(), &config),
                    Command::Restart => {
                        tracing::info!("🔄 Restarting game");
                        view = None;
                        game.spawn_setup(&tx);
                        redraw(&game, view.as_ref(), &config);
                    }
                    Command::Reveal(label) => {
                        reveal_cell(&mut game, view.as_ref(), &label);
                        redraw(&game, view.as_ref(), &config);
                    }
                }
            }
        }
    }

    tracing::info!("Goodbye");
    Ok(())
}
