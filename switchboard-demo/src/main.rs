mod error;

use std::{cell::Cell, env, process::ExitCode};

use switchboard::{
    Arguments, Command, CommandFactory, CommandType, DefaultFactory, EnvironmentSettings,
    InvokeError, Invoker, Parameters, Registry, Value,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use crate::error::ConnectError;

#[derive(Debug, Clone, Copy, Default, Value)]
enum Style {
    #[default]
    Plain,
    Loud,
    #[value(name = "whisper")]
    Quiet,
}

/// greet -name:world -style:loud
#[derive(Debug, Default, Parameters)]
struct Greet {
    /// Who to greet
    #[param(short = "n", required)]
    name: String,

    #[param]
    style: Style,

    /// How many times to say it
    #[param(short = "r")]
    repeat: Option<u32>,
}

impl Command for Greet {
    fn run(&mut self) -> anyhow::Result<()> {
        let greeting = match self.style {
            Style::Plain => format!("Hello, {}!", self.name),
            Style::Loud => format!("HELLO, {}!", self.name.to_uppercase()),
            Style::Quiet => format!("hello, {}...", self.name.to_lowercase()),
        };

        for _ in 0..self.repeat.unwrap_or(1) {
            println!("{greeting}");
        }

        Ok(())
    }
}

/// connect -timeout:5, with the database coming from a connection string
#[derive(Debug, Parameters)]
struct Connect {
    /// Connection string for the database
    #[param(short = "db", connection_string, required)]
    database: String,

    /// Seconds to wait before giving up
    #[param(app_setting, environment_variable)]
    timeout: u32,

    #[param(short = "v")]
    verbose: bool,

    // Injected by the factory, not bound from the command line
    banner: &'static str,
}

impl Command for Connect {
    fn run(&mut self) -> anyhow::Result<()> {
        let (scheme, _) = self
            .database
            .split_once("://")
            .ok_or_else(|| ConnectError::MissingScheme(self.database.clone()))?;

        if self.timeout == 0 {
            return Err(ConnectError::ZeroTimeout.into());
        }

        println!("{}", self.banner);
        println!("connecting to a {scheme} database (timeout {}s)", self.timeout);

        if self.verbose {
            println!("  {}", self.database);
        }

        Ok(())
    }
}

/// Counts the commands it hands out and gets back.
#[derive(Debug, Default)]
struct CountingFactory {
    inner: DefaultFactory,
    live: Cell<u32>,
}

impl CommandFactory for CountingFactory {
    fn create(&self, command: &CommandType) -> anyhow::Result<Box<dyn Command>> {
        let instance = self.inner.create(command)?;
        self.live.set(self.live.get() + 1);
        Ok(instance)
    }

    fn release(&self, instance: Box<dyn Command>) -> anyhow::Result<()> {
        self.live.set(self.live.get() - 1);
        tracing::info!(live = self.live.get(), "command released");
        self.inner.release(instance)
    }
}

fn registry() -> anyhow::Result<Registry> {
    let mut registry = Registry::new().with::<Greet>()?;

    registry.register(CommandType::with_constructor(|| Connect {
        database: String::new(),
        timeout: 30,
        verbose: false,
        banner: "switchboard demo",
    }))?;

    Ok(registry)
}

/// Settings come from the file named by `SWITCHBOARD_SETTINGS`, if there is
/// one, plus the process environment.
fn settings() -> anyhow::Result<EnvironmentSettings> {
    Ok(match env::var_os("SWITCHBOARD_SETTINGS") {
        Some(path) => EnvironmentSettings::load(path)?,
        None => EnvironmentSettings::from_env(),
    })
}

fn run() -> anyhow::Result<()> {
    let registry = registry()?;
    let settings = settings()?;
    let arguments = Arguments::from_env();

    tracing::debug!(arguments = %arguments, "parsed command line");

    let invoker = Invoker::with_factory(CountingFactory::default());
    invoker.dispatch(&registry, &arguments, &settings)?;

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");

            match err.downcast_ref::<InvokeError>() {
                Some(err) if err.is_input_error() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
