/*!
The traits a command type implements.

[`Parameters`] is the declarative half, normally derived: a static
[`CommandSpec`] and a setter that assigns one converted value by parameter
name. [`Command`] is the part you write by hand: the `run` entry point.

```
use switchboard::{Command, Parameters};

#[derive(Parameters, Default)]
#[command(name = "greet")]
struct Greet {
    /// Who to greet
    #[param(short = "n", required)]
    name: String,

    #[param]
    shout: bool,
}

impl Command for Greet {
    fn run(&mut self) -> anyhow::Result<()> {
        let greeting = format!("hello, {}", self.name);

        match self.shout {
            true => println!("{}", greeting.to_uppercase()),
            false => println!("{greeting}"),
        }

        Ok(())
    }
}
```
*/

use std::any::Any;

use crate::{errors::ParameterError, spec::CommandSpec};

/**
A type whose fields can be bound from switches and settings.

The binder only ever calls [`assign`][Parameters::assign] with the names of
parameters listed in [`spec`][Parameters::spec], and only for parameters that
actually received a value. Fields of parameters that weren't given keep
whatever value the instance was constructed with.
*/
pub trait Parameters {
    /// The metadata for this command type.
    fn spec() -> &'static CommandSpec
    where
        Self: Sized;

    /// Convert `value` into the type of the named parameter and store it.
    fn assign(&mut self, parameter: &str, value: &str) -> Result<(), ParameterError>;
}

/// A runnable command. Instances are created by a
/// [`CommandFactory`][crate::factory::CommandFactory], bound, run exactly once,
/// and then released.
pub trait Command: Parameters + AsAny {
    fn run(&mut self) -> anyhow::Result<()>;
}

/// Access to a command as [`Any`], so that factories and tests can recover
/// the concrete type of a `dyn Command`.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl dyn Command {
    #[inline]
    pub fn is<T: Command>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Command>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    #[inline]
    pub fn downcast_mut<T: Command>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ParameterSpec;

    #[derive(Default)]
    struct Probe {
        value: String,
    }

    impl Parameters for Probe {
        fn spec() -> &'static CommandSpec {
            static SPEC: CommandSpec =
                CommandSpec::new_unchecked("probe", &[ParameterSpec::new("value")]);
            &SPEC
        }

        fn assign(&mut self, parameter: &str, value: &str) -> Result<(), ParameterError> {
            match parameter {
                "value" => {
                    self.value = value.to_owned();
                    Ok(())
                }
                _ => Err(ParameterError::unknown(parameter)),
            }
        }
    }

    impl Command for Probe {
        fn run(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn downcasting() {
        let mut command: Box<dyn Command> = Box::new(Probe::default());

        assert!(command.is::<Probe>());
        command.assign("value", "x").unwrap();
        command.downcast_mut::<Probe>().unwrap().value.push('y');
        assert_eq!(command.downcast_ref::<Probe>().unwrap().value, "xy");
    }

    #[test]
    fn assigning_unknown_parameter() {
        let mut probe = Probe::default();

        assert_eq!(
            probe.assign("nope", "x"),
            Err(ParameterError::UnknownParameter("nope".to_owned()))
        );
    }
}
