/*!
Command factories: the pluggable policy for creating command instances and
cleaning up after them.
*/

use std::{rc::Rc, sync::Arc};

use anyhow::anyhow;

use crate::{command::Command, registry::CommandType};

/**
Creates command instances for the [`Invoker`][crate::Invoker], and is told
when each one is finished with.

Every instance returned from [`create`][CommandFactory::create] is passed back
to [`release`][CommandFactory::release] exactly once, whether binding and
running it succeeded or not. A factory that injects dependencies can use
`release` to dispose of whatever it set up for the instance.

Factories take `&self`, so a factory that keeps state should use interior
mutability. Invocations on different threads share the factory, so it's only
safe to invoke concurrently if the factory is `Sync`.
*/
pub trait CommandFactory {
    fn create(&self, command: &CommandType) -> anyhow::Result<Box<dyn Command>>;

    fn release(&self, instance: Box<dyn Command>) -> anyhow::Result<()>;
}

/// Constructs commands with the constructor they were registered with, and
/// releases them by dropping them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFactory;

impl CommandFactory for DefaultFactory {
    fn create(&self, command: &CommandType) -> anyhow::Result<Box<dyn Command>> {
        command.construct().ok_or_else(|| {
            anyhow!(
                "{} has no constructor; it must be created by a custom factory",
                command.type_name()
            )
        })
    }

    #[inline]
    fn release(&self, instance: Box<dyn Command>) -> anyhow::Result<()> {
        drop(instance);
        Ok(())
    }
}

macro_rules! forward_factory {
    ($($pointer:ident,)*) => {
        $(
            impl<F: CommandFactory + ?Sized> CommandFactory for $pointer<F> {
                #[inline]
                fn create(&self, command: &CommandType) -> anyhow::Result<Box<dyn Command>> {
                    F::create(self, command)
                }

                #[inline]
                fn release(&self, instance: Box<dyn Command>) -> anyhow::Result<()> {
                    F::release(self, instance)
                }
            }
        )*
    };
}

forward_factory! {
    Box,
    Rc,
    Arc,
}

impl<F: CommandFactory + ?Sized> CommandFactory for &F {
    #[inline]
    fn create(&self, command: &CommandType) -> anyhow::Result<Box<dyn Command>> {
        F::create(self, command)
    }

    #[inline]
    fn release(&self, instance: Box<dyn Command>) -> anyhow::Result<()> {
        F::release(self, instance)
    }
}
