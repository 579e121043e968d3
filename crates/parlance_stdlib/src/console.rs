//! Console verbs: SAY and SEND.

use parlance_foundation::{Error, HandleKind, Result, Role, Value};
use parlance_parser::{ActionContext, Arguments, Plugin, RegistryBuilder, RoleSpec, VerbDescriptor};

use crate::resolve::{locator, render, resolve_address};

/// Console: SAY - emit the value and return it unchanged
pub(crate) fn say(args: &Arguments, ctx: &mut ActionContext<'_>) -> Result<Value> {
    let value = args.require(Role::What, "SAY")?;
    ctx.say(render(value)?);
    Ok(value.clone())
}

/// Console: SEND - simulate delivering a message to an address
pub(crate) fn send(args: &Arguments, ctx: &mut ActionContext<'_>) -> Result<Value> {
    let body = render(args.require(Role::What, "SEND")?)?;
    let to = locator("SEND", args.require(Role::To, "SEND")?, HandleKind::Address)?;
    if resolve_address(&to).is_none() {
        return Err(Error::action_failed("SEND", format!("'{to}' is not an address")));
    }

    tracing::debug!(%to, bytes = body.len(), "sending message");
    ctx.say(format!("Sent to {to}: {body}"));
    Ok(Value::object([
        ("to", Value::text(&to)),
        ("body", Value::text(&body)),
        ("status", Value::text("sent")),
    ]))
}

/// SAY and SEND.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleVerbs;

impl Plugin for ConsoleVerbs {
    fn name(&self) -> &str {
        "console"
    }

    fn register(&self, builder: &mut RegistryBuilder) -> Result<()> {
        builder
            .verb(
                VerbDescriptor::new("SAY", say)
                    .with_synonyms(["PRINT", "ECHO"])
                    .with_role(RoleSpec::new(Role::What))
                    .with_summary("Print a value and return it"),
            )
            .verb(
                VerbDescriptor::new("SEND", send)
                    .with_role(RoleSpec::new(Role::What))
                    .with_role(RoleSpec::new(Role::To).resolving(resolve_address))
                    .with_summary("Deliver a message to an address"),
            );
        Ok(())
    }
}
