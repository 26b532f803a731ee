use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use recipe_engine::{
    build_source, ensure_state_dir, FileStore, Preferences, RecipeStore, SourceConfig, UrlHistory,
};
use recipe_logging::{recipe_info, recipe_warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

use super::cli::Args;
use super::{logging, render};

/// Location the in-process history starts from; the selection lives in its `id` parameter.
const START_URL: &str = "http://localhost/";

pub fn run_app(args: Args) -> anyhow::Result<()> {
    logging::initialize(args.log);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(run_session(args))
}

async fn run_session(args: Args) -> anyhow::Result<()> {
    let session = Session::open(&args.state_dir, &args.source_config()).await?;
    session.apply_args(&args).await;
    print!("{}", render::render(&session.store().view()));

    if args.interactive {
        session.interactive().await?;
    }
    Ok(())
}

/// A started store plus the history it pushes selections into.
pub struct Session {
    store: RecipeStore,
    history: Arc<UrlHistory>,
}

impl Session {
    /// Builds the store over the state directory and waits for the initial load.
    pub async fn open(state_dir: &Path, config: &SourceConfig) -> anyhow::Result<Self> {
        ensure_state_dir(state_dir)
            .with_context(|| format!("state directory {} is not usable", state_dir.display()))?;
        let preferences = Preferences::new(Arc::new(FileStore::new(state_dir)));
        let source = build_source(config).context("failed to configure recipe source")?;
        let history = Arc::new(UrlHistory::new(Url::parse(START_URL)?));

        let store = RecipeStore::builder(source, preferences)
            .navigator(history.clone())
            .build();
        store.start();
        store.settled().await;
        recipe_info!("Session ready with {} recipes", store.view().recipe_count);
        Ok(Self { store, history })
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    async fn apply_args(&self, args: &Args) {
        if let Some(query) = &args.query {
            self.store.set_search(query.as_str());
        }
        if !args.tags.is_empty() {
            self.store.set_tags(args.tags.iter().cloned());
        }
        if !args.cuisines.is_empty() {
            self.store.set_cuisines(args.cuisines.iter().cloned());
        }
        for id in &args.toggle_favorites {
            self.store.toggle_favorite(id.as_str());
        }
        if let Some(id) = &args.open {
            self.store.open_recipe(id.as_str());
        }
        self.store.settled().await;
    }

    /// Runs one command and waits for the work it started. Returns false on `quit`.
    pub async fn execute(&self, command: Command) -> bool {
        match command {
            Command::Search(text) => self.store.set_search(text),
            Command::Tags(tags) => self.store.set_tags(tags),
            Command::Cuisines(cuisines) => self.store.set_cuisines(cuisines),
            Command::Open(id) => self.store.open_recipe(id),
            Command::Close => self.store.close_recipe(),
            Command::Favorite(id) => self.store.toggle_favorite(id),
            Command::Back => match self.history.back() {
                Some(url) => self.store.location_changed(&url),
                None => println!("Already at the oldest entry."),
            },
            Command::Forward => match self.history.forward() {
                Some(url) => self.store.location_changed(&url),
                None => println!("Already at the newest entry."),
            },
            Command::Reload => self.store.load_recipes(),
            Command::Dismiss => self.store.dismiss_error(),
            Command::Show => {}
            Command::Help => print!("{HELP}"),
            Command::Quit => return false,
        }
        self.store.settled().await;
        true
    }

    async fn interactive(&self) -> anyhow::Result<()> {
        print!("{HELP}");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
            let Some(command) = parse_command(&line) else {
                if !line.trim().is_empty() {
                    recipe_warn!("Unknown command: {}", line.trim());
                    println!("Unknown command. Type `help` for a list.");
                }
                continue;
            };
            let redraw = !matches!(command, Command::Help | Command::Quit);
            if !self.execute(command).await {
                break;
            }
            if redraw {
                print!("{}", render::render(&self.store.view()));
            }
        }
        Ok(())
    }
}

const HELP: &str = "\
commands:
  search <text>        search title, description and ingredients
  tag <a,b,...>        require all tags (empty clears)
  cuisine <a,b,...>    accept any cuisine (empty clears)
  open <id> | close    show or hide a recipe
  fav <id>             toggle a favorite
  back | forward       move through selection history
  reload | dismiss     reload the catalog, clear the error
  show | help | quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Tags(Vec<String>),
    Cuisines(Vec<String>),
    Open(String),
    Close,
    Favorite(String),
    Back,
    Forward,
    Reload,
    Dismiss,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let command = match name {
        // Search keeps inner spacing; an empty argument clears the search.
        "search" | "s" => Command::Search(rest.to_string()),
        "tag" | "tags" => Command::Tags(split_list(rest)),
        "cuisine" | "cuisines" => Command::Cuisines(split_list(rest)),
        "open" if !rest.is_empty() => Command::Open(rest.to_string()),
        "fav" | "favorite" if !rest.is_empty() => Command::Favorite(rest.to_string()),
        "close" => Command::Close,
        "back" => Command::Back,
        "forward" => Command::Forward,
        "reload" => Command::Reload,
        "dismiss" => Command::Dismiss,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
