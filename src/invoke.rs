/*!
The command lifecycle: create an instance with a factory, bind its parameters,
run it, and release it.

Every instance that's successfully created is released exactly once, on every
exit path: success, a binding failure, a failure from the command itself, or a
panic unwinding out of either.
*/

use lazy_format::lazy_format;

use crate::{
    arguments::{Arguments, Switch},
    bind::bind,
    command::Command,
    errors::InvokeError,
    factory::{CommandFactory, DefaultFactory},
    registry::{CommandType, Registry},
    settings::EnvironmentSettings,
};

/// The lifecycle stage of a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Idle,
    Created,
    Bound,
    Ran,
    Released,
}

fn transition(command: &str, stage: &mut Stage, next: Stage) {
    tracing::debug!(command, stage = ?next, "command lifecycle");
    *stage = next;
}

/// A created instance that hasn't been released yet. Dropping it without
/// calling [`release`][Lease::release] (which only happens when unwinding)
/// releases it anyway.
struct Lease<'f, F: CommandFactory + ?Sized> {
    factory: &'f F,
    command: &'static str,
    stage: Stage,
    instance: Option<Box<dyn Command>>,
}

impl<'f, F: CommandFactory + ?Sized> Lease<'f, F> {
    fn new(factory: &'f F, command: &'static str, instance: Box<dyn Command>) -> Self {
        let mut lease = Self {
            factory,
            command,
            stage: Stage::Idle,
            instance: Some(instance),
        };

        lease.advance(Stage::Created);
        lease
    }

    fn advance(&mut self, stage: Stage) {
        transition(self.command, &mut self.stage, stage);
    }

    fn bind_and_run(
        &mut self,
        command: &CommandType,
        switches: &[Switch],
        settings: &EnvironmentSettings,
    ) -> Result<(), InvokeError> {
        let name = self.command;
        let stage = &mut self.stage;

        // Only a released lease has no instance
        let Some(instance) = self.instance.as_deref_mut() else {
            return Ok(());
        };

        bind(instance, command.spec(), switches, settings).map_err(|error| {
            InvokeError::Binding {
                command: name,
                error,
            }
        })?;
        transition(name, stage, Stage::Bound);

        let result = instance.run();
        transition(name, stage, Stage::Ran);

        result.map_err(|source| InvokeError::Execution {
            command: name,
            source,
        })
    }

    fn release(mut self) -> anyhow::Result<()> {
        match self.instance.take() {
            Some(instance) => {
                let result = self.factory.release(instance);
                self.advance(Stage::Released);
                result
            }
            None => Ok(()),
        }
    }
}

impl<F: CommandFactory + ?Sized> Drop for Lease<'_, F> {
    fn drop(&mut self) {
        if let Some(instance) = self.instance.take() {
            tracing::debug!(
                command = self.command,
                stage = ?self.stage,
                "releasing command while unwinding"
            );

            if let Err(error) = self.factory.release(instance) {
                tracing::error!(
                    command = self.command,
                    error = %lazy_format!("{:#}", error),
                    "couldn't release command while unwinding"
                );
            }
        }
    }
}

/**
Runs commands. The invoker itself is stateless apart from its
[`CommandFactory`], which is shared by every invocation.

The invoker doesn't hold on to the instances it runs. To look at a command
after it has run (to read back its bound fields, say), use a factory whose
[`release`][CommandFactory::release] keeps the instance, and recover the
concrete type with `downcast_ref` on `dyn Command`.

```
use switchboard::{Arguments, Command, EnvironmentSettings, Invoker, Parameters, Registry};

#[derive(Parameters, Default)]
#[command(name = "add")]
struct Add {
    #[param(required)]
    left: i64,

    #[param(required)]
    right: i64,
}

impl Command for Add {
    fn run(&mut self) -> anyhow::Result<()> {
        anyhow::ensure!(self.left + self.right == 5);
        Ok(())
    }
}

let registry = Registry::new().with::<Add>().unwrap();
let args = Arguments::parse(["add", "-left:2", "-right=3"]);

Invoker::new()
    .dispatch(&registry, &args, &EnvironmentSettings::empty())
    .unwrap();
```
*/
#[derive(Debug, Clone, Default)]
pub struct Invoker<F = DefaultFactory> {
    factory: F,
}

impl Invoker {
    /// An invoker using the [`DefaultFactory`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: CommandFactory> Invoker<F> {
    #[must_use]
    pub fn with_factory(factory: F) -> Self {
        Self { factory }
    }

    #[inline]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /**
    Create, bind, run and release one instance of `command`.

    If binding or running fails, that error is returned after the instance
    is released. If releasing also fails, the release error is logged rather
    than returned, so that it doesn't hide the original failure.
    */
    #[tracing::instrument(skip_all, fields(command = command.name()))]
    pub fn invoke(
        &self,
        command: &CommandType,
        switches: &[Switch],
        settings: &EnvironmentSettings,
    ) -> Result<(), InvokeError> {
        let name = command.name();

        let instance = self
            .factory
            .create(command)
            .map_err(|source| InvokeError::Creation {
                command: name,
                source,
            })?;

        let mut lease = Lease::new(&self.factory, name, instance);
        let outcome = lease.bind_and_run(command, switches, settings);
        let released = lease.release();

        match (outcome, released) {
            (Ok(()), Ok(())) => Ok(()),
            (Ok(()), Err(source)) => Err(InvokeError::Release {
                command: name,
                source,
            }),
            (Err(error), Ok(())) => Err(error),
            (Err(error), Err(release_error)) => {
                tracing::error!(
                    command = name,
                    error = %lazy_format!("{:#}", release_error),
                    "couldn't release command after it failed"
                );
                Err(error)
            }
        }
    }

    /// Look `name` up in `registry` and invoke it.
    pub fn invoke_named(
        &self,
        registry: &Registry,
        name: &str,
        switches: &[Switch],
        settings: &EnvironmentSettings,
    ) -> Result<(), InvokeError> {
        let command = registry.lookup(name)?;
        self.invoke(command, switches, settings)
    }

    /// Invoke the command named by a parsed command line, with its switches.
    pub fn dispatch(
        &self,
        registry: &Registry,
        arguments: &Arguments,
        settings: &EnvironmentSettings,
    ) -> Result<(), InvokeError> {
        let name = arguments
            .command()
            .ok_or_else(|| InvokeError::MissingCommand {
                known: registry.names().collect(),
            })?;

        self.invoke_named(registry, name, arguments.switches(), settings)
    }
}
