/*!
Binding parsed switches and external settings onto a command's parameters.

Each declared parameter is resolved independently, stopping at the first hit:

1. The last switch whose key is the parameter's name or short name
2. The application setting with the parameter's name, if permitted
3. The connection string with the parameter's name, if permitted
4. The environment variable with the parameter's name, if permitted

Switches that don't match any parameter are ignored.
*/

use crate::{
    arguments::Switch,
    command::Parameters,
    errors::BindError,
    settings::{EnvironmentSettings, Source},
    spec::{CommandSpec, ParameterSpec},
};

/// A raw value found for a parameter, and where it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub value: &'a str,
    pub source: Source,
}

/// Find the raw value for one parameter, if any source supplies it.
pub fn resolve<'a>(
    parameter: &ParameterSpec,
    switches: &'a [Switch],
    settings: &'a EnvironmentSettings,
) -> Option<Resolved<'a>> {
    let from_switch = switches
        .iter()
        .rev()
        .find(|switch| parameter.matches(&switch.key))
        .map(|switch| Resolved {
            value: &switch.value,
            source: Source::Switch,
        });

    from_switch.or_else(|| {
        parameter.sources.fallbacks().find_map(|source| {
            settings
                .lookup(source, parameter.name)
                .map(|value| Resolved { value, source })
        })
    })
}

/**
Bind every parameter in `spec` onto `target`.

All parameters are resolved before anything is assigned, so a missing
required parameter leaves `target` untouched. A conversion failure stops
binding at that parameter; the caller shouldn't run a partially bound
command.
*/
pub fn bind<P: Parameters + ?Sized>(
    target: &mut P,
    spec: &CommandSpec,
    switches: &[Switch],
    settings: &EnvironmentSettings,
) -> Result<(), BindError> {
    let resolved = spec
        .parameters()
        .iter()
        .filter_map(|parameter| match resolve(parameter, switches, settings) {
            Some(found) => Some(Ok((parameter, found))),
            None if parameter.required => Some(Err(BindError::MissingRequired {
                parameter: parameter.name,
            })),
            None => None,
        })
        .collect::<Result<Vec<_>, _>>()?;

    resolved.into_iter().try_for_each(|(parameter, found)| {
        tracing::debug!(
            parameter = parameter.name,
            source = %found.source,
            "resolved parameter"
        );

        target
            .assign(parameter.name, found.value)
            .map_err(|error| BindError::Conversion {
                parameter: parameter.name,
                raw: found.value.to_owned(),
                origin: found.source,
                error,
            })
    })
}
