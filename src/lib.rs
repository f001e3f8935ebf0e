/*!
Command-line dispatch for programs made of several commands, each with its
own switches.

A command line looks like `program <command> -switch:value -flag ...`.
Switches can be spelled several equivalent ways (`-path:value`,
`-path=value`, `-path"value"`, `-path value`, and `-n23` for a short numeric
form); [`Arguments::parse`] boils all of them down to ordered key/value pairs.

Commands are structs deriving [`Parameters`], which describes their
switches, and implementing [`Command`], which runs them. A parameter that
isn't given on the command line can fall back on an application setting,
a connection string, or an environment variable, if it opts in:

```
use switchboard::{Arguments, Command, CommandType, EnvironmentSettings, Invoker, Parameters, Registry};

#[derive(Parameters, Default)]
#[command(name = "connect")]
struct Connect {
    /// Connection string for the database
    #[param(short = "d", connection_string, required)]
    database: String,

    #[param(app_setting, environment_variable)]
    timeout: u32,

    #[param(short = "v")]
    verbose: bool,
}

impl Command for Connect {
    fn run(&mut self) -> anyhow::Result<()> {
        assert_eq!(self.database, "postgres://localhost");
        assert_eq!(self.timeout, 30);
        assert!(self.verbose);
        Ok(())
    }
}

let mut registry = Registry::new();
registry.register(CommandType::of::<Connect>()).unwrap();

let settings = EnvironmentSettings::empty()
    .with_connection_string("database", "postgres://localhost")
    .with_app_setting("timeout", "30");

let args = Arguments::parse(["connect", "-v"]);
Invoker::new().dispatch(&registry, &args, &settings).unwrap();
```

Each invocation creates a fresh instance through a [`CommandFactory`], binds
it, runs it, and releases it back to the factory, even when binding or
running fails.
*/

pub mod arguments;
pub mod bind;
pub mod command;
pub mod errors;
pub mod factory;
mod impls;
pub mod invoke;
pub mod parameter;
pub mod registry;
pub mod settings;
pub mod spec;

#[cfg(feature = "config")]
pub mod config;

pub use arguments::{Arguments, Switch};
pub use command::{Command, Parameters};
pub use errors::{BindError, InvokeError, ParameterError, SpecError};
pub use factory::{CommandFactory, DefaultFactory};
pub use invoke::Invoker;
pub use parameter::Value;
pub use registry::{CommandType, Registry};
pub use settings::EnvironmentSettings;
pub use switchboard_derive::{Parameters, Value};
