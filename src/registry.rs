/*!
Command types, and the name → type lookup used to dispatch a parsed command
line.
*/

use std::{any::TypeId, collections::BTreeMap, fmt, sync::Arc};

use crate::{
    command::Command,
    errors::{InvokeError, SpecError},
    spec::CommandSpec,
};

type Constructor = Arc<dyn Fn() -> Box<dyn Command> + Send + Sync>;

/**
Everything needed to create and bind one kind of command: its type identity,
its static [`CommandSpec`], and (optionally) a way to construct it.

Command types without a constructor can only be created by a custom
[`CommandFactory`][crate::factory::CommandFactory].
*/
#[derive(Clone)]
pub struct CommandType {
    id: TypeId,
    type_name: &'static str,
    spec: &'static CommandSpec,
    constructor: Option<Constructor>,
}

impl CommandType {
    /// A command type constructed with its [`Default`] implementation.
    pub fn of<T: Command + Default>() -> Self {
        Self::with_constructor(T::default)
    }

    /// A command type constructed by calling `constructor`. This is how
    /// dependencies are injected into commands that need them.
    pub fn with_constructor<T, F>(constructor: F) -> Self
    where
        T: Command,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            constructor: Some(Arc::new(move || Box::new(constructor()) as Box<dyn Command>)),
            ..Self::external::<T>()
        }
    }

    /// A command type that only a custom factory knows how to create.
    pub fn external<T: Command>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            spec: T::spec(),
            constructor: None,
        }
    }

    #[inline]
    pub fn spec(&self) -> &'static CommandSpec {
        self.spec
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.spec.name()
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn is<T: Command>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Construct a new instance, if this type has a constructor.
    pub fn construct(&self) -> Option<Box<dyn Command>> {
        self.constructor.as_ref().map(|constructor| constructor())
    }
}

impl fmt::Debug for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandType")
            .field("name", &self.name())
            .field("type_name", &self.type_name)
            .field("constructible", &self.constructor.is_some())
            .finish()
    }
}

/**
A mapping from command name to command type, built once at startup and
handed to the [`Invoker`][crate::Invoker].

```
use switchboard::{Command, CommandType, Parameters, Registry};

#[derive(Parameters, Default)]
struct Status {}

impl Command for Status {
    fn run(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

let mut registry = Registry::new();
registry.register(CommandType::of::<Status>()).unwrap();

assert!(registry.get("status").unwrap().is::<Status>());
assert!(registry.register(CommandType::of::<Status>()).is_err());
```
*/
#[derive(Debug, Clone, Default)]
pub struct Registry {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command type. Its spec is validated, and its name must not
    /// already be registered.
    pub fn register(&mut self, command: CommandType) -> Result<&mut Self, SpecError> {
        command.spec().validate()?;

        let name = command.name();

        if self.commands.contains_key(name) {
            return Err(SpecError::DuplicateCommand(name));
        }

        tracing::debug!(command = name, type_name = command.type_name(), "registered command");
        self.commands.insert(name, command);
        Ok(self)
    }

    /// Shorthand for registering [`CommandType::of`].
    pub fn with<T: Command + Default>(mut self) -> Result<Self, SpecError> {
        self.register(CommandType::of::<T>())?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&CommandType> {
        self.commands.get(name)
    }

    /// Like [`get`][Self::get], but produces an error listing the known
    /// commands on a miss.
    pub fn lookup(&self, name: &str) -> Result<&CommandType, InvokeError> {
        self.get(name).ok_or_else(|| InvokeError::UnknownCommand {
            name: name.to_owned(),
            known: self.names().collect(),
        })
    }

    /// Registered command names, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{command::Parameters, errors::ParameterError, spec::ParameterSpec};

    struct Ping {
        target: String,
    }

    impl Parameters for Ping {
        fn spec() -> &'static CommandSpec {
            static SPEC: CommandSpec =
                CommandSpec::new_unchecked("ping", &[ParameterSpec::new("target")]);
            &SPEC
        }

        fn assign(&mut self, parameter: &str, value: &str) -> Result<(), ParameterError> {
            match parameter {
                "target" => {
                    self.target = value.to_owned();
                    Ok(())
                }
                _ => Err(ParameterError::unknown(parameter)),
            }
        }
    }

    impl Command for Ping {
        fn run(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Parameters for Broken {
        fn spec() -> &'static CommandSpec {
            static SPEC: CommandSpec = CommandSpec::new_unchecked(
                "broken",
                &[ParameterSpec::new("a").short("x"), ParameterSpec::new("x")],
            );
            &SPEC
        }

        fn assign(&mut self, parameter: &str, _value: &str) -> Result<(), ParameterError> {
            Err(ParameterError::unknown(parameter))
        }
    }

    impl Command for Broken {
        fn run(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn constructors() {
        let injected = CommandType::with_constructor(|| Ping {
            target: "localhost".to_owned(),
        });
        let command = injected.construct().unwrap();

        assert!(injected.is::<Ping>());
        assert_eq!(command.downcast_ref::<Ping>().unwrap().target, "localhost");

        let external = CommandType::external::<Ping>();
        assert!(external.construct().is_none());
        assert_eq!(external.name(), "ping");
    }

    #[test]
    fn lookup_miss_lists_known_commands() {
        let mut registry = Registry::new();
        registry
            .register(CommandType::external::<Ping>())
            .unwrap();

        match registry.lookup("pong") {
            Err(InvokeError::UnknownCommand { name, known }) => {
                assert_eq!(name, "pong");
                assert_eq!(known, ["ping"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn registration_validates() {
        let mut registry = Registry::new();

        assert!(matches!(
            registry.register(CommandType::external::<Broken>()),
            Err(SpecError::ShortCollision { short: "x", .. })
        ));
        assert!(registry.is_empty());

        registry.register(CommandType::external::<Ping>()).unwrap();
        assert_eq!(
            registry
                .register(CommandType::external::<Ping>())
                .map(|_| ())
                .unwrap_err(),
            SpecError::DuplicateCommand("ping")
        );
        assert_eq!(registry.len(), 1);
    }
}
