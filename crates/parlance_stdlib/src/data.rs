//! Data verbs: GET ... USING, SET, ENCODE, and DECODE.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use parlance_foundation::{Error, HandleKind, Result, Role, Value};
use parlance_parser::{ActionContext, Arguments, Plugin, RegistryBuilder, RoleSpec, VerbDescriptor};

use crate::resolve::{
    Codec, from_json, locator, render, resolve_codec, resolve_json, resolve_scalar,
};

/// Data: GET USING - parse a JSON payload into a structured value
pub(crate) fn get_using(args: &Arguments, _ctx: &mut ActionContext<'_>) -> Result<Value> {
    match args.require(Role::Using, "GET")? {
        Value::Text(text) => serde_json::from_str(text)
            .map(from_json)
            .map_err(|e| Error::action_failed("GET", format!("not JSON: {e}"))),
        other => Ok(other.clone()),
    }
}

/// Data: SET - store a value
pub(crate) fn set(args: &Arguments, _ctx: &mut ActionContext<'_>) -> Result<Value> {
    args.require(Role::To, "SET").cloned()
}

fn codec(verb: &str, args: &Arguments) -> Result<Codec> {
    let name = locator(verb, args.require(Role::Using, verb)?, HandleKind::Codec)?;
    Codec::parse(&name)
        .ok_or_else(|| Error::action_failed(verb, format!("unknown codec '{name}'")))
}

/// Data: ENCODE - encode text as base64 or hex
pub(crate) fn encode(args: &Arguments, _ctx: &mut ActionContext<'_>) -> Result<Value> {
    let text = render(args.require(Role::What, "ENCODE")?)?;
    let encoded = match codec("ENCODE", args)? {
        Codec::Base64 => STANDARD.encode(text.as_bytes()),
        Codec::Hex => hex::encode(text.as_bytes()),
    };
    Ok(Value::text(encoded))
}

/// Data: DECODE - decode base64 or hex back to text
pub(crate) fn decode(args: &Arguments, _ctx: &mut ActionContext<'_>) -> Result<Value> {
    let text = render(args.require(Role::What, "DECODE")?)?;
    let codec = codec("DECODE", args)?;
    let bytes = match codec {
        Codec::Base64 => STANDARD.decode(text.trim()).map_err(|e| e.to_string()),
        Codec::Hex => hex::decode(text.trim()).map_err(|e| e.to_string()),
    }
    .map_err(|e| Error::action_failed("DECODE", format!("invalid {}: {e}", codec.name())))?;

    String::from_utf8(bytes)
        .map(Value::text)
        .map_err(|_| Error::action_failed("DECODE", "decoded bytes are not UTF-8 text"))
}

/// GET USING, SET, ENCODE, and DECODE.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataVerbs;

impl Plugin for DataVerbs {
    fn name(&self) -> &str {
        "data"
    }

    fn register(&self, builder: &mut RegistryBuilder) -> Result<()> {
        builder
            .verb(
                VerbDescriptor::new("GET", get_using)
                    .with_role(RoleSpec::new(Role::What).receiver())
                    .with_role(RoleSpec::new(Role::Using).resolving(resolve_json))
                    .with_summary("Parse a JSON payload"),
            )
            .verb(
                VerbDescriptor::new("SET", set)
                    .with_synonyms(["LET"])
                    .with_role(RoleSpec::new(Role::What).receiver())
                    .with_role(RoleSpec::new(Role::To).resolving(resolve_scalar))
                    .with_summary("Store a value in a variable"),
            )
            .verb(
                VerbDescriptor::new("ENCODE", encode)
                    .with_role(RoleSpec::new(Role::What))
                    .with_role(RoleSpec::new(Role::Using).resolving(resolve_codec))
                    .with_summary("Encode text using base64 or hex"),
            )
            .verb(
                VerbDescriptor::new("DECODE", decode)
                    .with_role(RoleSpec::new(Role::What))
                    .with_role(RoleSpec::new(Role::Using).resolving(resolve_codec))
                    .with_summary("Decode base64 or hex text"),
            );
        Ok(())
    }
}
